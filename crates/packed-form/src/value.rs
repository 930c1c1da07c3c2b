// File: src/value.rs
// Purpose: Field values flowing in from inputs and out of validation

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value mapping keyed by field name, in display order
pub type FormValues = IndexMap<String, Value>;

/// A single field value
///
/// Raw input is usually `String` (that is what HTML controls produce);
/// validation turns numeric fields into `Int` or `Float`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Value {
    /// Empty string value, the default for every field
    pub fn empty() -> Self {
        Value::String(String::new())
    }

    /// True for `Null` and the empty string
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            // f64 Display already drops a trailing ".0"
            Value::Float(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(s),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::empty()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
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

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Int(42).to_string(), "42");
        assert_eq!(Value::Float(18.0).to_string(), "18");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::from("hi").to_string(), "hi");
    }

    #[test]
    fn test_is_empty() {
        assert!(Value::Null.is_empty());
        assert!(Value::empty().is_empty());
        assert!(!Value::from(" ").is_empty());
        assert!(!Value::Int(0).is_empty());
    }

    #[test]
    fn test_json_untagged() {
        let values: FormValues =
            serde_json::from_str(r#"{"name":"Al","age":30,"score":1.5,"bio":null}"#).unwrap();
        assert_eq!(values["name"], Value::from("Al"));
        assert_eq!(values["age"], Value::Int(30));
        assert_eq!(values["score"], Value::Float(1.5));
        assert_eq!(values["bio"], Value::Null);
        assert_eq!(
            values.keys().collect::<Vec<_>>(),
            vec!["name", "age", "score", "bio"]
        );
    }
}
