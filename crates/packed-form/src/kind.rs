// File: src/kind.rs
// Purpose: The closed set of field kinds

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FormError;
use crate::registry;

/// Discriminant selecting the validator rules and widget of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Text,
    Int,
    Float,
    Email,
    Password,
}

impl FieldKind {
    pub const ALL: [FieldKind; 6] = [
        FieldKind::String,
        FieldKind::Text,
        FieldKind::Int,
        FieldKind::Float,
        FieldKind::Email,
        FieldKind::Password,
    ];

    /// Tag used in form definitions
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Text => "text",
            FieldKind::Int => "int",
            FieldKind::Float => "float",
            FieldKind::Email => "email",
            FieldKind::Password => "password",
        }
    }

    /// String-like kinds carry length options
    pub fn is_textual(&self) -> bool {
        !self.is_numeric()
    }

    /// Numeric kinds carry value options
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Int | FieldKind::Float)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = FormError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        registry::resolve_kind(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip_through_from_str() {
        for kind in FieldKind::ALL {
            assert_eq!(kind.as_str().parse::<FieldKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_tag() {
        let err = "unknown".parse::<FieldKind>().unwrap_err();
        assert!(matches!(err, FormError::UnsupportedFieldKind(tag) if tag == "unknown"));
    }

    #[test]
    fn test_families() {
        assert!(FieldKind::Int.is_numeric());
        assert!(FieldKind::Float.is_numeric());
        assert!(FieldKind::Email.is_textual());
        assert!(FieldKind::Text.is_textual());
        assert!(!FieldKind::Password.is_numeric());
    }
}
