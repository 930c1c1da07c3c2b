use crate::definition::FieldDefinition;
use crate::fields::FieldHandler;
use crate::kind::FieldKind;
use crate::validator::FieldValidator;
use crate::widget::{Control, InputType};

/// Single-line text that must look like an email address
#[derive(Debug, Clone, PartialEq)]
pub struct EmailField {
    definition: FieldDefinition,
}

impl EmailField {
    pub fn new(definition: FieldDefinition) -> Self {
        Self { definition }
    }

    pub(crate) fn boxed(definition: FieldDefinition) -> Box<dyn FieldHandler> {
        Box::new(Self::new(definition))
    }
}

impl FieldHandler for EmailField {
    fn kind(&self) -> FieldKind {
        FieldKind::Email
    }

    fn definition(&self) -> &FieldDefinition {
        &self.definition
    }

    fn validator(&self) -> FieldValidator {
        FieldValidator::email(self.definition.length_options()).optional(self.is_optional())
    }

    fn control(&self) -> Control {
        Control::input(InputType::Email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_email_shape() {
        let validator = EmailField::new(FieldDefinition::email("Email")).validator();

        assert_eq!(
            validator.validate(Some(&Value::from("not-an-email"))),
            Err(vec!["Invalid email address".to_string()])
        );
        assert_eq!(
            validator.validate(Some(&Value::from("a@b.com"))),
            Ok(Some(Value::from("a@b.com")))
        );
    }

    #[test]
    fn test_shape_checked_independently_of_length() {
        let validator = EmailField::new(FieldDefinition::email("Email").max_length(100)).validator();
        assert_eq!(
            validator.validate(Some(&Value::from("short"))),
            Err(vec!["Invalid email address".to_string()])
        );
    }
}
