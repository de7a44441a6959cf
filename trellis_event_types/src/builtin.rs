// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Names of the core event kinds pre-registered by
//! [`EventTypeRegistry::with_builtins`](crate::EventTypeRegistry::with_builtins).
//!
//! Built-ins are registered in the order of [`ALL`], so their ids are the same
//! in every registry created with `with_builtins`.

use crate::Category;

/// A node finished construction.
pub const INIT: &str = "init";
/// A node is about to be destroyed.
pub const QUIT: &str = "quit";
/// A node was attached to a parent.
pub const ADDED: &str = "added";
/// A node was detached from its parent.
pub const REMOVED: &str = "removed";
/// Per-frame update.
pub const UPDATE: &str = "update";

/// Pointer button pressed.
pub const MOUSE_DOWN: &str = "mouse_down";
/// Pointer button released.
pub const MOUSE_UP: &str = "mouse_up";
/// Pointer moved.
pub const MOUSE_MOVE: &str = "mouse_move";
/// Wheel scrolled.
pub const MOUSE_WHEEL: &str = "mouse_wheel";
/// Press and release on the same node.
pub const CLICK: &str = "click";
/// Two clicks in quick succession.
pub const DOUBLE_CLICK: &str = "double_click";
/// Key pressed.
pub const KEY_DOWN: &str = "key_down";
/// Key released.
pub const KEY_UP: &str = "key_up";
/// Committed text input.
pub const TEXT_INPUT: &str = "text_input";

/// Host window resized.
pub const WINDOW_RESIZE: &str = "window_resize";
/// Host window gained focus.
pub const WINDOW_FOCUS: &str = "window_focus";
/// Host window lost focus.
pub const WINDOW_BLUR: &str = "window_blur";
/// Host window close requested.
pub const WINDOW_CLOSE: &str = "window_close";

/// Node became the keyboard focus holder.
pub const FOCUS_GAINED: &str = "focus_gained";
/// Node stopped being the keyboard focus holder.
pub const FOCUS_LOST: &str = "focus_lost";
/// Pointer started hovering a node.
pub const MOUSE_ENTER: &str = "mouse_enter";
/// Pointer stopped hovering a node.
pub const MOUSE_LEAVE: &str = "mouse_leave";
/// Node enabled.
pub const ENABLED: &str = "enabled";
/// Node disabled.
pub const DISABLED: &str = "disabled";
/// Node shown.
pub const SHOWN: &str = "shown";
/// Node hidden.
pub const HIDDEN: &str = "hidden";

/// Drag gesture started.
pub const DRAG_START: &str = "drag_start";
/// Drag gesture moved.
pub const DRAG: &str = "drag";
/// Drag gesture ended.
pub const DRAG_END: &str = "drag_end";
/// Payload dropped on a node.
pub const DROP: &str = "drop";

/// Timer elapsed.
pub const TIMER: &str = "timer";

/// Clipboard copy requested.
pub const CLIPBOARD_COPY: &str = "clipboard_copy";
/// Clipboard cut requested.
pub const CLIPBOARD_CUT: &str = "clipboard_cut";
/// Clipboard paste requested.
pub const CLIPBOARD_PASTE: &str = "clipboard_paste";

/// Before the render walk.
pub const PRE_RENDER: &str = "pre_render";
/// A node is rendered.
pub const RENDER: &str = "render";
/// After the render walk.
pub const POST_RENDER: &str = "post_render";

/// Registration table: `(name, category, doc)` in registration order.
pub const ALL: &[(&str, Category, &str)] = &[
    (INIT, Category::LIFECYCLE, "A node finished construction."),
    (QUIT, Category::LIFECYCLE, "A node is about to be destroyed."),
    (ADDED, Category::LIFECYCLE, "A node was attached to a parent."),
    (REMOVED, Category::LIFECYCLE, "A node was detached from its parent."),
    (UPDATE, Category::LIFECYCLE, "Per-frame update."),
    (MOUSE_DOWN, Category::INPUT, "Pointer button pressed."),
    (MOUSE_UP, Category::INPUT, "Pointer button released."),
    (MOUSE_MOVE, Category::INPUT, "Pointer moved."),
    (MOUSE_WHEEL, Category::INPUT, "Wheel scrolled."),
    (CLICK, Category::INPUT, "Press and release on the same node."),
    (DOUBLE_CLICK, Category::INPUT, "Two clicks in quick succession."),
    (KEY_DOWN, Category::INPUT, "Key pressed."),
    (KEY_UP, Category::INPUT, "Key released."),
    (TEXT_INPUT, Category::INPUT, "Committed text input."),
    (WINDOW_RESIZE, Category::WINDOW, "Host window resized."),
    (WINDOW_FOCUS, Category::WINDOW, "Host window gained focus."),
    (WINDOW_BLUR, Category::WINDOW, "Host window lost focus."),
    (WINDOW_CLOSE, Category::WINDOW, "Host window close requested."),
    (FOCUS_GAINED, Category::UI_STATE, "Node became the keyboard focus holder."),
    (FOCUS_LOST, Category::UI_STATE, "Node stopped being the keyboard focus holder."),
    (MOUSE_ENTER, Category::UI_STATE, "Pointer started hovering a node."),
    (MOUSE_LEAVE, Category::UI_STATE, "Pointer stopped hovering a node."),
    (ENABLED, Category::UI_STATE, "Node enabled."),
    (DISABLED, Category::UI_STATE, "Node disabled."),
    (SHOWN, Category::UI_STATE, "Node shown."),
    (HIDDEN, Category::UI_STATE, "Node hidden."),
    (DRAG_START, Category::DRAG_DROP, "Drag gesture started."),
    (DRAG, Category::DRAG_DROP, "Drag gesture moved."),
    (DRAG_END, Category::DRAG_DROP, "Drag gesture ended."),
    (DROP, Category::DRAG_DROP, "Payload dropped on a node."),
    (TIMER, Category::TIMER, "Timer elapsed."),
    (CLIPBOARD_COPY, Category::CLIPBOARD, "Clipboard copy requested."),
    (CLIPBOARD_CUT, Category::CLIPBOARD, "Clipboard cut requested."),
    (CLIPBOARD_PASTE, Category::CLIPBOARD, "Clipboard paste requested."),
    (PRE_RENDER, Category::RENDER, "Before the render walk."),
    (RENDER, Category::RENDER, "A node is rendered."),
    (POST_RENDER, Category::RENDER, "After the render walk."),
];
