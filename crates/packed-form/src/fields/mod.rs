//! Field handlers: one per field kind
//!
//! Each handler wraps one [`FieldDefinition`] and knows how to build the
//! field's validator and how to render its widget. Handlers hold no state
//! beyond their definition, so they are rebuilt whenever the definition
//! changes.

use std::fmt;

use crate::definition::FieldDefinition;
use crate::kind::FieldKind;
use crate::validator::FieldValidator;
use crate::widget::{Control, FieldBindings, Widget};

pub mod email;
pub mod float;
pub mod int;
pub mod password;
pub mod string;
pub mod text;

pub use email::EmailField;
pub use float::FloatField;
pub use int::IntField;
pub use password::PasswordField;
pub use string::StringField;
pub use text::TextField;

/// Capabilities every field kind provides
pub trait FieldHandler: fmt::Debug + Send + Sync {
    fn kind(&self) -> FieldKind;

    fn definition(&self) -> &FieldDefinition;

    /// Constraint built from the definition's options and optionality
    fn validator(&self) -> FieldValidator;

    /// Input control used by [`FieldHandler::render`]
    fn control(&self) -> Control;

    fn label(&self) -> &str {
        self.definition().label()
    }

    fn is_optional(&self) -> bool {
        self.definition().is_optional()
    }

    /// Labeled control bound to the caller's live field state
    fn render(&self, bindings: &FieldBindings) -> Widget {
        Widget::new(self.label(), self.control(), &self.validator(), bindings)
    }
}
