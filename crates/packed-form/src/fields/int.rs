use crate::definition::FieldDefinition;
use crate::fields::FieldHandler;
use crate::kind::FieldKind;
use crate::validator::FieldValidator;
use crate::widget::{Control, InputMode};

/// Whole number; text input is coerced to an integer
#[derive(Debug, Clone, PartialEq)]
pub struct IntField {
    definition: FieldDefinition,
}

impl IntField {
    pub fn new(definition: FieldDefinition) -> Self {
        Self { definition }
    }

    pub(crate) fn boxed(definition: FieldDefinition) -> Box<dyn FieldHandler> {
        Box::new(Self::new(definition))
    }
}

impl FieldHandler for IntField {
    fn kind(&self) -> FieldKind {
        FieldKind::Int
    }

    fn definition(&self) -> &FieldDefinition {
        &self.definition
    }

    fn validator(&self) -> FieldValidator {
        FieldValidator::integer(self.definition.range_options()).optional(self.is_optional())
    }

    fn control(&self) -> Control {
        Control::numeric(InputMode::Numeric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_coerces_and_bounds() {
        let field = IntField::new(FieldDefinition::int("Age").min(18.0).max(120.0));
        let validator = field.validator();

        assert_eq!(validator.validate(Some(&Value::from("30"))), Ok(Some(Value::Int(30))));
        assert_eq!(
            validator.validate(Some(&Value::from("15"))),
            Err(vec!["Must be at least 18".to_string()])
        );
        assert_eq!(
            validator.validate(Some(&Value::from("121"))),
            Err(vec!["Must be at most 120".to_string()])
        );
        assert_eq!(
            validator.validate(Some(&Value::from("abc"))),
            Err(vec!["Must be a number".to_string()])
        );
    }

    #[test]
    fn test_mismatched_definition_uses_no_bounds() {
        // A string definition handed to the int handler keeps its label
        // but contributes no range options.
        let field = IntField::new(FieldDefinition::string("Odd").min_length(3));
        assert_eq!(field.kind(), FieldKind::Int);
        assert_eq!(field.label(), "Odd");
        assert_eq!(field.validator(), FieldValidator::integer(None));
    }
}
