use crate::definition::FieldDefinition;
use crate::fields::FieldHandler;
use crate::kind::FieldKind;
use crate::validator::FieldValidator;
use crate::widget::{Control, InputType};

/// Single-line free text
#[derive(Debug, Clone, PartialEq)]
pub struct StringField {
    definition: FieldDefinition,
}

impl StringField {
    pub fn new(definition: FieldDefinition) -> Self {
        Self { definition }
    }

    pub(crate) fn boxed(definition: FieldDefinition) -> Box<dyn FieldHandler> {
        Box::new(Self::new(definition))
    }
}

impl FieldHandler for StringField {
    fn kind(&self) -> FieldKind {
        FieldKind::String
    }

    fn definition(&self) -> &FieldDefinition {
        &self.definition
    }

    fn validator(&self) -> FieldValidator {
        FieldValidator::text(self.definition.length_options()).optional(self.is_optional())
    }

    fn control(&self) -> Control {
        Control::input(InputType::Text)
    }
}
