// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scalar values and ordered property maps.
//!
//! [`Properties`] is used both for node creation configs and for event payloads.

use core::fmt;

use crate::error::ConfigError;

/// A scalar configuration or payload value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// String.
    Str(String),
}

impl Value {
    /// Name of this value's kind, for diagnostics.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "a bool",
            Self::Int(_) => "an integer",
            Self::Float(_) => "a number",
            Self::Str(_) => "a string",
        }
    }

    /// The boolean, if this is a [`Value::Bool`].
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer, if this is a [`Value::Int`].
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The number, if this is a [`Value::Float`] or a [`Value::Int`].
    #[allow(
        clippy::cast_precision_loss,
        reason = "integers in configs are small enough to be exact in f64."
    )]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// The string, if this is a [`Value::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Int(v.into())
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

/// Insertion-ordered map from keys to [`Value`]s.
///
/// ```
/// use trellis_scene::Properties;
///
/// let props = Properties::new()
///     .with("name", "ok_button")
///     .with("x", 10)
///     .with("visible", false);
/// assert_eq!(props.get_str("name").unwrap(), Some("ok_button"));
/// assert_eq!(props.get_float("x").unwrap(), Some(10.0));
/// assert!(props.get_int("name").is_err());
/// assert_eq!(props.keys().collect::<Vec<_>>(), ["name", "x", "visible"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Properties {
    entries: Vec<(String, Value)>,
}

impl Properties {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Properties::set`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Insert or replace `key`. A replaced key keeps its position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(core::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Remove `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Boolean under `key`; an error if the key holds another kind.
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, ConfigError> {
        self.typed(key, "a bool", Value::as_bool)
    }

    /// Integer under `key`; an error if the key holds another kind.
    pub fn get_int(&self, key: &str) -> Result<Option<i64>, ConfigError> {
        self.typed(key, "an integer", Value::as_int)
    }

    /// Number under `key` (integers are accepted).
    pub fn get_float(&self, key: &str) -> Result<Option<f64>, ConfigError> {
        self.typed(key, "a number", Value::as_float)
    }

    /// String under `key`; an error if the key holds another kind.
    pub fn get_str(&self, key: &str) -> Result<Option<&str>, ConfigError> {
        self.typed(key, "a string", Value::as_str)
    }

    fn typed<'a, T>(
        &'a self,
        key: &str,
        expected: &'static str,
        f: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<Option<T>, ConfigError> {
        match self.get(key) {
            None => Ok(None),
            Some(v) => f(v).map(Some).ok_or_else(|| ConfigError::InvalidField {
                key: key.to_owned(),
                expected,
            }),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Self::new();
        for (k, v) in iter {
            props.set(k, v);
        }
        props
    }
}

impl fmt::Display for Properties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_in_place() {
        let mut props = Properties::new().with("a", 1).with("b", 2);
        assert_eq!(props.set("a", 3), Some(Value::Int(1)));
        assert_eq!(props.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(props.get_int("a").unwrap(), Some(3));
    }

    #[test]
    fn typed_getters_reject_other_kinds() {
        let props = Properties::new().with("flag", "yes");
        assert_eq!(
            props.get_bool("flag"),
            Err(ConfigError::InvalidField {
                key: "flag".into(),
                expected: "a bool"
            })
        );
        assert_eq!(props.get_bool("missing"), Ok(None));
    }

    #[test]
    fn float_getter_accepts_integers() {
        let props = Properties::new().with("w", 40).with("h", 2.5);
        assert_eq!(props.get_float("w").unwrap(), Some(40.0));
        assert_eq!(props.get_float("h").unwrap(), Some(2.5));
        assert!(props.get_int("h").is_err());
    }

    #[test]
    fn remove_and_display() {
        let mut props: Properties = [("x", 1), ("y", 2)].into_iter().collect();
        assert_eq!(props.remove("x"), Some(Value::Int(1)));
        assert!(!props.contains_key("x"));
        assert_eq!(props.to_string(), "{y: 2}");
        props.set("s", "hi");
        assert_eq!(props.to_string(), "{y: 2, s: \"hi\"}");
    }
}
