use crate::definition::FieldDefinition;
use crate::fields::FieldHandler;
use crate::kind::FieldKind;
use crate::validator::FieldValidator;
use crate::widget::{Control, InputType};

/// Masked single-line text
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordField {
    definition: FieldDefinition,
}

impl PasswordField {
    pub fn new(definition: FieldDefinition) -> Self {
        Self { definition }
    }

    pub(crate) fn boxed(definition: FieldDefinition) -> Box<dyn FieldHandler> {
        Box::new(Self::new(definition))
    }
}

impl FieldHandler for PasswordField {
    fn kind(&self) -> FieldKind {
        FieldKind::Password
    }

    fn definition(&self) -> &FieldDefinition {
        &self.definition
    }

    fn validator(&self) -> FieldValidator {
        FieldValidator::text(self.definition.length_options()).optional(self.is_optional())
    }

    fn control(&self) -> Control {
        Control::input(InputType::Password)
    }
}
