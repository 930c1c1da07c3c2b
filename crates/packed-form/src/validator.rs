// File: src/validator.rs
// Purpose: Per-field validators and the whole-form composite validator

use indexmap::IndexMap;
use packed_form_validation::{
    is_valid_email, parse_integer, parse_number, validate_integer, validate_max,
    validate_max_length, validate_min, validate_min_length, validate_safe_integer,
    INVALID_EMAIL_MESSAGE, NOT_A_NUMBER_MESSAGE, REQUIRED_MESSAGE,
};
use serde::Serialize;
use tracing::trace;

use crate::definition::{LengthOptions, RangeOptions};
use crate::value::{FormValues, Value};

/// Outcome of a whole-form validation: coerced values or per-field errors
pub type ValidationResult = Result<FormValues, ValidationErrors>;

/// Constraint applied to a present value
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Text {
        min_length: Option<usize>,
        max_length: Option<usize>,
        email: bool,
    },
    Number {
        min: Option<f64>,
        max: Option<f64>,
        integer: bool,
    },
}

/// Validator for a single field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValidator {
    rule: Rule,
    optional: bool,
}

impl FieldValidator {
    /// Plain string constraint
    pub fn text(options: Option<&LengthOptions>) -> Self {
        let options = options.cloned().unwrap_or_default();
        Self::required(Rule::Text {
            min_length: options.min_length,
            max_length: options.max_length,
            email: false,
        })
    }

    /// String constraint that also requires an email shape
    pub fn email(options: Option<&LengthOptions>) -> Self {
        let options = options.cloned().unwrap_or_default();
        Self::required(Rule::Text {
            min_length: options.min_length,
            max_length: options.max_length,
            email: true,
        })
    }

    /// Any finite number
    pub fn number(options: Option<&RangeOptions>) -> Self {
        let options = options.cloned().unwrap_or_default();
        Self::required(Rule::Number {
            min: options.min,
            max: options.max,
            integer: false,
        })
    }

    /// Whole numbers only; coerced to `Value::Int`
    pub fn integer(options: Option<&RangeOptions>) -> Self {
        let options = options.cloned().unwrap_or_default();
        Self::required(Rule::Number {
            min: options.min,
            max: options.max,
            integer: true,
        })
    }

    fn required(rule: Rule) -> Self {
        Self {
            rule,
            optional: false,
        }
    }

    /// Wraps the constraint so that an absent value is accepted
    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Validates one value
    ///
    /// `Ok(None)` means the field is optional and was left empty, so it is
    /// left out of the validated mapping.
    pub fn validate(&self, value: Option<&Value>) -> Result<Option<Value>, Vec<String>> {
        match &self.rule {
            Rule::Text {
                min_length,
                max_length,
                email,
            } => self.validate_text(value, *min_length, *max_length, *email),
            Rule::Number { min, max, integer } => {
                self.validate_number(value, *min, *max, *integer)
            }
        }
    }

    fn absent(&self) -> Result<Option<Value>, Vec<String>> {
        if self.optional {
            Ok(None)
        } else {
            Err(vec![REQUIRED_MESSAGE.to_string()])
        }
    }

    fn validate_text(
        &self,
        value: Option<&Value>,
        min_length: Option<usize>,
        max_length: Option<usize>,
        email: bool,
    ) -> Result<Option<Value>, Vec<String>> {
        let text = match value {
            None => return self.absent(),
            Some(v) if v.is_empty() => return self.absent(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };

        let mut errors = Vec::new();

        if email && !is_valid_email(&text) {
            errors.push(INVALID_EMAIL_MESSAGE.to_string());
        }
        if let Some(min) = min_length {
            errors.extend(validate_min_length(&text, min).err());
        }
        if let Some(max) = max_length {
            errors.extend(validate_max_length(&text, max).err());
        }

        if errors.is_empty() {
            Ok(Some(Value::String(text)))
        } else {
            Err(errors)
        }
    }

    fn validate_number(
        &self,
        value: Option<&Value>,
        min: Option<f64>,
        max: Option<f64>,
        integer: bool,
    ) -> Result<Option<Value>, Vec<String>> {
        let number = match value {
            None | Some(Value::Null) => return self.absent(),
            Some(Value::String(s)) if s.trim().is_empty() => return self.absent(),
            Some(Value::String(s)) => parse_number(s),
            Some(Value::Int(n)) => Ok(*n as f64),
            Some(Value::Float(n)) if n.is_finite() => Ok(*n),
            Some(_) => Err(NOT_A_NUMBER_MESSAGE.to_string()),
        };
        let number = number.map_err(|e| vec![e])?;

        let mut errors = Vec::new();

        let coerced = if integer {
            let whole = match value {
                Some(Value::Int(n)) => validate_safe_integer(*n),
                Some(Value::String(s)) => parse_integer(s),
                _ => validate_integer(number),
            };
            match whole {
                Ok(n) => Some(Value::Int(n)),
                Err(e) => {
                    errors.push(e);
                    None
                }
            }
        } else {
            Some(Value::Float(number))
        };

        if let Some(min) = min {
            errors.extend(validate_min(number, min).err());
        }
        if let Some(max) = max {
            errors.extend(validate_max(number, max).err());
        }

        match coerced {
            Some(value) if errors.is_empty() => Ok(Some(value)),
            _ => Err(errors),
        }
    }
}

/// Per-field error messages keyed by field name, in form order
///
/// Never thrown: it only blocks submission, never rendering or editing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("validation failed for {} field(s)", .0.len())]
#[serde(transparent)]
pub struct ValidationErrors(IndexMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, messages: Vec<String>) {
        self.0.insert(field.into(), messages);
    }

    /// First error for a specific field
    pub fn first(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .and_then(|errors| errors.first())
            .map(String::as_str)
    }

    /// All errors for a specific field
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> IndexMap<String, Vec<String>> {
        self.0
    }
}

/// Object-shaped validator: one field validator per form field
///
/// Its key set is exactly the key set of the form definition it was built
/// from. Input keys it does not know are dropped from the output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompositeValidator {
    fields: IndexMap<String, FieldValidator>,
}

impl CompositeValidator {
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&FieldValidator> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validates a whole value mapping
    pub fn validate(&self, values: &FormValues) -> ValidationResult {
        let mut output = FormValues::with_capacity(self.fields.len());
        let mut errors = ValidationErrors::new();

        for (name, validator) in &self.fields {
            match validator.validate(values.get(name)) {
                Ok(Some(value)) => {
                    output.insert(name.clone(), value);
                }
                Ok(None) => {}
                Err(messages) => {
                    trace!(field = %name, ?messages, "field failed validation");
                    errors.insert(name.clone(), messages);
                }
            }
        }

        if errors.is_empty() {
            Ok(output)
        } else {
            Err(errors)
        }
    }
}

impl FromIterator<(String, FieldValidator)> for CompositeValidator {
    fn from_iter<I: IntoIterator<Item = (String, FieldValidator)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn length(min: Option<usize>, max: Option<usize>) -> LengthOptions {
        LengthOptions {
            min_length: min,
            max_length: max,
        }
    }

    fn range(min: Option<f64>, max: Option<f64>) -> RangeOptions {
        RangeOptions { min, max }
    }

    #[test]
    fn test_text_bounds_collect_every_failure() {
        let v = FieldValidator::email(Some(&length(Some(10), None)));
        assert_eq!(
            v.validate(Some(&Value::from("x@y"))),
            Err(vec![
                "Invalid email address".to_string(),
                "Must be at least 10 characters".to_string()
            ])
        );
    }

    #[test]
    fn test_text_without_bounds_accepts_anything_present() {
        let v = FieldValidator::text(None);
        assert_eq!(
            v.validate(Some(&Value::from(" "))),
            Ok(Some(Value::from(" ")))
        );
        assert_eq!(
            v.validate(Some(&Value::Int(5))),
            Ok(Some(Value::from("5")))
        );
    }

    #[test]
    fn test_integer_coercion() {
        let v = FieldValidator::integer(None);
        assert_eq!(v.validate(Some(&Value::from(" 42 "))), Ok(Some(Value::Int(42))));
        assert_eq!(v.validate(Some(&Value::Float(7.0))), Ok(Some(Value::Int(7))));
        assert_eq!(
            v.validate(Some(&Value::from("4.5"))),
            Err(vec!["Must be a whole number".to_string()])
        );
        assert_eq!(
            v.validate(Some(&Value::Bool(true))),
            Err(vec!["Must be a number".to_string()])
        );
    }

    #[test]
    fn test_number_bounds() {
        let v = FieldValidator::number(Some(&range(Some(0.5), Some(1.5))));
        assert_eq!(v.validate(Some(&Value::from("1"))), Ok(Some(Value::Float(1.0))));
        assert_eq!(
            v.validate(Some(&Value::from("2"))),
            Err(vec!["Must be at most 1.5".to_string()])
        );
        assert_eq!(
            v.validate(Some(&Value::Float(f64::NAN))),
            Err(vec!["Must be a number".to_string()])
        );
    }

    #[test]
    fn test_fraction_below_min_reports_both() {
        let v = FieldValidator::integer(Some(&range(Some(18.0), None)));
        assert_eq!(
            v.validate(Some(&Value::from("15.5"))),
            Err(vec![
                "Must be a whole number".to_string(),
                "Must be at least 18".to_string()
            ])
        );
    }

    #[test]
    fn test_absent_values() {
        let required = FieldValidator::number(None);
        let optional = FieldValidator::number(None).optional(true);

        for absent in [None, Some(Value::Null), Some(Value::from("")), Some(Value::from("  "))] {
            assert_eq!(
                required.validate(absent.as_ref()),
                Err(vec!["This field is required".to_string()])
            );
            assert_eq!(optional.validate(absent.as_ref()), Ok(None));
        }
    }

    #[test]
    fn test_composite_strips_unknown_keys() {
        let composite: CompositeValidator = [
            ("a".to_string(), FieldValidator::text(None)),
            ("b".to_string(), FieldValidator::integer(None).optional(true)),
        ]
        .into_iter()
        .collect();

        let mut values = FormValues::new();
        values.insert("a".into(), "x".into());
        values.insert("zzz".into(), "ignored".into());

        let output = composite.validate(&values).unwrap();
        assert_eq!(output.keys().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_validation_errors_accessors() {
        let mut errors = ValidationErrors::new();
        errors.insert("name", vec!["one".into(), "two".into()]);

        assert_eq!(errors.first("name"), Some("one"));
        assert_eq!(errors.get("name").map(<[String]>::len), Some(2));
        assert!(errors.contains("name"));
        assert!(!errors.contains("age"));
        assert_eq!(errors.to_string(), "validation failed for 1 field(s)");
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            serde_json::json!({ "name": ["one", "two"] })
        );
    }
}
