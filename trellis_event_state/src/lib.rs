// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Event State: small state machines that sit in front of dispatch.
//!
//! - [`meter`]: per event type rate limits ("metering") keyed by target, and a plain
//!   [`Throttle`](meter::Throttle) for work such as hover hit testing.
//! - [`click`]: turns pointer down/up pairs into click and double-click intents.
//!
//! All timestamps are caller-supplied milliseconds, so the state machines are
//! deterministic and easy to test.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod click;
pub mod meter;
