// File: src/definition.rs
// Purpose: Field and form definitions, and their serde shape

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{FormError, Result};
use crate::kind::FieldKind;
use crate::registry;

/// Length bounds for string-like fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LengthOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

/// Value bounds for numeric fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Attributes of a string, text, email or password field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextualField {
    pub label: String,
    pub optional: bool,
    pub options: LengthOptions,
}

/// Attributes of an int or float field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericField {
    pub label: String,
    pub optional: bool,
    pub options: RangeOptions,
}

/// Declarative description of one form field
///
/// The variant is the field kind, so the kind of a definition can never
/// change after construction.
///
/// ```
/// use packed_form::{FieldDefinition, FieldKind};
///
/// let age = FieldDefinition::int("Age").optional().min(18.0).max(120.0);
/// assert_eq!(age.kind(), FieldKind::Int);
/// assert!(age.is_optional());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFieldDefinition", into = "RawFieldDefinition")]
pub enum FieldDefinition {
    String(TextualField),
    Text(TextualField),
    Email(TextualField),
    Password(TextualField),
    Int(NumericField),
    Float(NumericField),
}

impl FieldDefinition {
    pub fn string(label: impl Into<String>) -> Self {
        FieldDefinition::String(TextualField::labelled(label))
    }

    pub fn text(label: impl Into<String>) -> Self {
        FieldDefinition::Text(TextualField::labelled(label))
    }

    pub fn email(label: impl Into<String>) -> Self {
        FieldDefinition::Email(TextualField::labelled(label))
    }

    pub fn password(label: impl Into<String>) -> Self {
        FieldDefinition::Password(TextualField::labelled(label))
    }

    pub fn int(label: impl Into<String>) -> Self {
        FieldDefinition::Int(NumericField::labelled(label))
    }

    pub fn float(label: impl Into<String>) -> Self {
        FieldDefinition::Float(NumericField::labelled(label))
    }

    /// Builds the definition of `kind` with no options
    pub fn of_kind(kind: FieldKind, label: impl Into<String>) -> Self {
        match kind {
            FieldKind::String => Self::string(label),
            FieldKind::Text => Self::text(label),
            FieldKind::Email => Self::email(label),
            FieldKind::Password => Self::password(label),
            FieldKind::Int => Self::int(label),
            FieldKind::Float => Self::float(label),
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FieldDefinition::String(_) => FieldKind::String,
            FieldDefinition::Text(_) => FieldKind::Text,
            FieldDefinition::Email(_) => FieldKind::Email,
            FieldDefinition::Password(_) => FieldKind::Password,
            FieldDefinition::Int(_) => FieldKind::Int,
            FieldDefinition::Float(_) => FieldKind::Float,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            FieldDefinition::String(f)
            | FieldDefinition::Text(f)
            | FieldDefinition::Email(f)
            | FieldDefinition::Password(f) => &f.label,
            FieldDefinition::Int(f) | FieldDefinition::Float(f) => &f.label,
        }
    }

    pub fn is_optional(&self) -> bool {
        match self {
            FieldDefinition::String(f)
            | FieldDefinition::Text(f)
            | FieldDefinition::Email(f)
            | FieldDefinition::Password(f) => f.optional,
            FieldDefinition::Int(f) | FieldDefinition::Float(f) => f.optional,
        }
    }

    /// Length options, `None` for numeric kinds
    pub fn length_options(&self) -> Option<&LengthOptions> {
        self.textual().map(|f| &f.options)
    }

    /// Value options, `None` for string-like kinds
    pub fn range_options(&self) -> Option<&RangeOptions> {
        self.numeric().map(|f| &f.options)
    }

    /// Marks the field as optional
    pub fn optional(mut self) -> Self {
        self.set_optional(true);
        self
    }

    pub fn set_optional(&mut self, optional: bool) {
        match self {
            FieldDefinition::String(f)
            | FieldDefinition::Text(f)
            | FieldDefinition::Email(f)
            | FieldDefinition::Password(f) => f.optional = optional,
            FieldDefinition::Int(f) | FieldDefinition::Float(f) => f.optional = optional,
        }
    }

    /// Sets `minLength`; ignored on numeric kinds
    pub fn min_length(mut self, min_length: usize) -> Self {
        match self.textual_mut() {
            Some(f) => f.options.min_length = Some(min_length),
            None => debug!(kind = %self.kind(), "ignoring minLength on a numeric field"),
        }
        self
    }

    /// Sets `maxLength`; ignored on numeric kinds
    pub fn max_length(mut self, max_length: usize) -> Self {
        match self.textual_mut() {
            Some(f) => f.options.max_length = Some(max_length),
            None => debug!(kind = %self.kind(), "ignoring maxLength on a numeric field"),
        }
        self
    }

    /// Sets `min`; ignored on string-like kinds
    pub fn min(mut self, min: f64) -> Self {
        match self.numeric_mut() {
            Some(f) => f.options.min = Some(min),
            None => debug!(kind = %self.kind(), "ignoring min on a string field"),
        }
        self
    }

    /// Sets `max`; ignored on string-like kinds
    pub fn max(mut self, max: f64) -> Self {
        match self.numeric_mut() {
            Some(f) => f.options.max = Some(max),
            None => debug!(kind = %self.kind(), "ignoring max on a string field"),
        }
        self
    }

    /// Rejects inverted or non-finite bounds
    pub fn check_bounds(&self, field: &str) -> Result<()> {
        let invalid = |reason: String| FormError::InvalidBounds {
            field: field.to_string(),
            reason,
        };

        if let Some(LengthOptions {
            min_length: Some(min),
            max_length: Some(max),
        }) = self.length_options()
        {
            if min > max {
                return Err(invalid(format!(
                    "minLength {} is greater than maxLength {}",
                    min, max
                )));
            }
        }

        if let Some(options) = self.range_options() {
            for bound in [options.min, options.max].into_iter().flatten() {
                if !bound.is_finite() {
                    return Err(invalid(format!("bound {} is not a finite number", bound)));
                }
            }
            if let (Some(min), Some(max)) = (options.min, options.max) {
                if min > max {
                    return Err(invalid(format!("min {} is greater than max {}", min, max)));
                }
            }
        }

        Ok(())
    }

    fn textual(&self) -> Option<&TextualField> {
        match self {
            FieldDefinition::String(f)
            | FieldDefinition::Text(f)
            | FieldDefinition::Email(f)
            | FieldDefinition::Password(f) => Some(f),
            FieldDefinition::Int(_) | FieldDefinition::Float(_) => None,
        }
    }

    fn numeric(&self) -> Option<&NumericField> {
        match self {
            FieldDefinition::Int(f) | FieldDefinition::Float(f) => Some(f),
            _ => None,
        }
    }

    fn textual_mut(&mut self) -> Option<&mut TextualField> {
        match self {
            FieldDefinition::String(f)
            | FieldDefinition::Text(f)
            | FieldDefinition::Email(f)
            | FieldDefinition::Password(f) => Some(f),
            FieldDefinition::Int(_) | FieldDefinition::Float(_) => None,
        }
    }

    fn numeric_mut(&mut self) -> Option<&mut NumericField> {
        match self {
            FieldDefinition::Int(f) | FieldDefinition::Float(f) => Some(f),
            _ => None,
        }
    }
}

impl TextualField {
    fn labelled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }
}

impl NumericField {
    fn labelled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }
}

/// Untyped wire shape: `{ type, label, optional?, options? }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RawFieldDefinition {
    #[serde(rename = "type")]
    kind: String,
    label: String,
    #[serde(default, skip_serializing_if = "is_false")]
    optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<RawOptions>,
}

/// Union of every kind's options; keys foreign to a kind are dropped
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max: Option<f64>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl TryFrom<RawFieldDefinition> for FieldDefinition {
    type Error = FormError;

    fn try_from(raw: RawFieldDefinition) -> Result<Self> {
        let kind = registry::resolve_kind(&raw.kind)?;
        let options = raw.options.unwrap_or_default();

        let mut definition = FieldDefinition::of_kind(kind, raw.label);
        definition.set_optional(raw.optional);

        if kind.is_textual() {
            if options.min.is_some() || options.max.is_some() {
                debug!(%kind, "ignoring min/max options on a string field");
            }
            if let Some(f) = definition.textual_mut() {
                f.options = LengthOptions {
                    min_length: options.min_length,
                    max_length: options.max_length,
                };
            }
        } else {
            if options.min_length.is_some() || options.max_length.is_some() {
                debug!(%kind, "ignoring minLength/maxLength options on a numeric field");
            }
            if let Some(f) = definition.numeric_mut() {
                f.options = RangeOptions {
                    min: options.min,
                    max: options.max,
                };
            }
        }

        Ok(definition)
    }
}

impl From<FieldDefinition> for RawFieldDefinition {
    fn from(definition: FieldDefinition) -> Self {
        let kind = definition.kind().as_str().to_string();
        match definition {
            FieldDefinition::String(f)
            | FieldDefinition::Text(f)
            | FieldDefinition::Email(f)
            | FieldDefinition::Password(f) => {
                let LengthOptions {
                    min_length,
                    max_length,
                } = f.options;
                let options = (min_length.is_some() || max_length.is_some()).then(|| RawOptions {
                    min_length,
                    max_length,
                    ..RawOptions::default()
                });
                RawFieldDefinition {
                    kind,
                    label: f.label,
                    optional: f.optional,
                    options,
                }
            }
            FieldDefinition::Int(f) | FieldDefinition::Float(f) => {
                let RangeOptions { min, max } = f.options;
                let options = (min.is_some() || max.is_some()).then(|| RawOptions {
                    min,
                    max,
                    ..RawOptions::default()
                });
                RawFieldDefinition {
                    kind,
                    label: f.label,
                    optional: f.optional,
                    options,
                }
            }
        }
    }
}

/// Ordered mapping from field name to field definition
///
/// Iteration order is display order. Loading from JSON or TOML keeps the
/// order of the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormDefinition {
    fields: IndexMap<String, FieldDefinition>,
}

impl FormDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, replacing any earlier field of the same name in place
    pub fn field(mut self, name: impl Into<String>, definition: FieldDefinition) -> Self {
        self.insert(name, definition);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, definition: FieldDefinition) {
        self.fields.insert(name.into(), definition);
    }

    pub fn get(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDefinition)> {
        self.fields.iter().map(|(name, def)| (name.as_str(), def))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Parses a JSON object of field definitions
    pub fn from_json(source: &str) -> Result<Self> {
        let raw: IndexMap<String, RawFieldDefinition> = serde_json::from_str(source)?;
        Self::from_raw(raw)
    }

    /// Converts an already parsed JSON value
    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        let raw: IndexMap<String, RawFieldDefinition> = serde_json::from_value(value)?;
        Self::from_raw(raw)
    }

    /// Parses a TOML document whose tables are field definitions
    pub fn from_toml(source: &str) -> Result<Self> {
        let raw: IndexMap<String, RawFieldDefinition> = toml::from_str(source)?;
        Self::from_raw(raw)
    }

    /// Loads a definition file, picking the format from its extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| FormError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&content),
            Some("toml") => Self::from_toml(&content),
            _ => Err(FormError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    fn from_raw(raw: IndexMap<String, RawFieldDefinition>) -> Result<Self> {
        raw.into_iter()
            .map(|(name, field)| FieldDefinition::try_from(field).map(|def| (name, def)))
            .collect::<Result<IndexMap<_, _>>>()
            .map(|fields| Self { fields })
    }
}

impl FromIterator<(String, FieldDefinition)> for FormDefinition {
    fn from_iter<I: IntoIterator<Item = (String, FieldDefinition)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FormDefinition {
    type Item = (&'a String, &'a FieldDefinition);
    type IntoIter = indexmap::map::Iter<'a, String, FieldDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CONTACT_JSON: &str = r#"{
        "name": { "type": "string", "label": "Name", "options": { "minLength": 2, "maxLength": 50 } },
        "email": { "type": "email", "label": "Email" },
        "age": { "type": "int", "label": "Age", "optional": true, "options": { "min": 18, "max": 120 } },
        "message": { "type": "text", "label": "Message", "options": { "minLength": 10, "maxLength": 500 } }
    }"#;

    #[test]
    fn test_from_json_keeps_order_and_options() {
        let form = FormDefinition::from_json(CONTACT_JSON).unwrap();

        assert_eq!(
            form.names().collect::<Vec<_>>(),
            vec!["name", "email", "age", "message"]
        );

        let name = form.get("name").unwrap();
        assert_eq!(name.kind(), FieldKind::String);
        assert_eq!(
            name.length_options(),
            Some(&LengthOptions {
                min_length: Some(2),
                max_length: Some(50)
            })
        );

        let age = form.get("age").unwrap();
        assert!(age.is_optional());
        assert_eq!(
            age.range_options(),
            Some(&RangeOptions {
                min: Some(18.0),
                max: Some(120.0)
            })
        );
    }

    #[test]
    fn test_from_toml() {
        let form = FormDefinition::from_toml(
            r#"
            [username]
            type = "string"
            label = "Username"

            [password]
            type = "password"
            label = "Password"
            options = { minLength = 8 }

            [score]
            type = "float"
            label = "Score"
            optional = true
            "#,
        )
        .unwrap();

        assert_eq!(
            form.names().collect::<Vec<_>>(),
            vec!["username", "password", "score"]
        );
        assert_eq!(
            form.get("password"),
            Some(&FieldDefinition::password("Password").min_length(8))
        );
        assert_eq!(form.get("score"), Some(&FieldDefinition::float("Score").optional()));
    }

    #[test]
    fn test_unknown_kind_is_reported() {
        let err = FormDefinition::from_json(r#"{ "x": { "type": "unknown", "label": "X" } }"#)
            .unwrap_err();
        assert!(matches!(err, FormError::UnsupportedFieldKind(tag) if tag == "unknown"));
    }

    #[test]
    fn test_foreign_options_are_ignored() {
        let form = FormDefinition::from_json(
            r#"{ "n": { "type": "int", "label": "N", "options": { "minLength": 3, "max": 9 } } }"#,
        )
        .unwrap();
        assert_eq!(form.get("n"), Some(&FieldDefinition::int("N").max(9.0)));

        let mistyped = FieldDefinition::string("S").min(1.0).max(2.0);
        assert_eq!(mistyped, FieldDefinition::string("S"));
    }

    #[test]
    fn test_serialize_matches_wire_shape() {
        let json = serde_json::to_value(FieldDefinition::int("Age").optional().min(18.0)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "int", "label": "Age", "optional": true, "options": { "min": 18.0 } })
        );

        let json = serde_json::to_value(FieldDefinition::email("Email")).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "email", "label": "Email" }));
    }

    #[test]
    fn test_check_bounds() {
        assert!(FieldDefinition::string("S")
            .min_length(2)
            .max_length(2)
            .check_bounds("s")
            .is_ok());

        let err = FieldDefinition::text("T")
            .min_length(10)
            .max_length(5)
            .check_bounds("t")
            .unwrap_err();
        assert!(matches!(err, FormError::InvalidBounds { ref field, .. } if field == "t"));

        assert!(FieldDefinition::float("F")
            .min(5.0)
            .max(1.0)
            .check_bounds("f")
            .is_err());
        assert!(FieldDefinition::float("F").min(f64::NAN).check_bounds("f").is_err());
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("contact.json");
        fs::write(&json_path, CONTACT_JSON).unwrap();
        assert_eq!(FormDefinition::load(&json_path).unwrap().len(), 4);

        let yaml_path = dir.path().join("contact.yaml");
        fs::write(&yaml_path, "").unwrap();
        assert!(matches!(
            FormDefinition::load(&yaml_path),
            Err(FormError::UnsupportedFormat(_))
        ));

        assert!(matches!(
            FormDefinition::load(dir.path().join("missing.toml")),
            Err(FormError::Io { .. })
        ));
    }
}
