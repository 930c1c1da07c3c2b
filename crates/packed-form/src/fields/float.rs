use crate::definition::FieldDefinition;
use crate::fields::FieldHandler;
use crate::kind::FieldKind;
use crate::validator::FieldValidator;
use crate::widget::{Control, InputMode};

/// Decimal number
#[derive(Debug, Clone, PartialEq)]
pub struct FloatField {
    definition: FieldDefinition,
}

impl FloatField {
    pub fn new(definition: FieldDefinition) -> Self {
        Self { definition }
    }

    pub(crate) fn boxed(definition: FieldDefinition) -> Box<dyn FieldHandler> {
        Box::new(Self::new(definition))
    }
}

impl FieldHandler for FloatField {
    fn kind(&self) -> FieldKind {
        FieldKind::Float
    }

    fn definition(&self) -> &FieldDefinition {
        &self.definition
    }

    fn validator(&self) -> FieldValidator {
        FieldValidator::number(self.definition.range_options()).optional(self.is_optional())
    }

    fn control(&self) -> Control {
        Control::numeric(InputMode::Decimal)
    }
}
