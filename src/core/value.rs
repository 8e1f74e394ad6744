//! The value type held by the store.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A configuration value.
///
/// Values are either raw strings or booleans. There is no numeric coercion;
/// a missing value is represented by the key being absent from the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A boolean flag, produced by `enable`/`disable` or `YES`/`NO`.
    Bool(bool),
    /// A raw string.
    String(String),
}

impl Value {
    /// Returns the string if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Bool(_) => None,
        }
    }

    /// Returns the boolean if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::String(_) => None,
        }
    }

    /// Whether this is exactly `Bool(true)`.
    pub fn is_true(&self) -> bool {
        matches!(self, Value::Bool(true))
    }

    /// Whether this is exactly `Bool(false)`.
    pub fn is_false(&self) -> bool {
        matches!(self, Value::Bool(false))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_boolean_checks() {
        assert!(Value::Bool(true).is_true());
        assert!(!Value::Bool(true).is_false());
        assert!(Value::Bool(false).is_false());

        let s = Value::from("true");
        assert!(!s.is_true());
        assert!(!s.is_false());
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert_eq!(Value::from("x").as_bool(), None);
        assert_eq!(Value::from(false).as_bool(), Some(false));
        assert_eq!(Value::from(false).as_str(), None);
    }

    #[test]
    fn test_untagged_serialization() {
        assert_eq!(serde_json::to_string(&Value::from("b")).unwrap(), "\"b\"");
        assert_eq!(serde_json::to_string(&Value::from(true)).unwrap(), "true");

        let v: Value = serde_json::from_str("false").unwrap();
        assert_eq!(v, Value::Bool(false));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from("some string d").to_string(), "some string d");
        assert_eq!(Value::from(true).to_string(), "true");
    }
}
