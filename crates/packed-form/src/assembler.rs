// File: src/assembler.rs
// Purpose: Turn a form definition into handlers plus one composite validator

use indexmap::IndexMap;
use tracing::debug;

use crate::definition::FormDefinition;
use crate::error::Result;
use crate::fields::FieldHandler;
use crate::registry;
use crate::validator::{CompositeValidator, ValidationResult};
use crate::value::FormValues;
use crate::widget::{FieldBindings, Widget};

/// Handlers and composite validator derived from one form definition
///
/// Immutable once built; share it behind an `Arc` and rebuild rather than
/// mutate when the definition changes.
#[derive(Debug)]
pub struct AssembledForm {
    handlers: IndexMap<String, Box<dyn FieldHandler>>,
    validator: CompositeValidator,
}

impl AssembledForm {
    pub fn handlers(&self) -> impl Iterator<Item = (&str, &dyn FieldHandler)> {
        self.handlers
            .iter()
            .map(|(name, handler)| (name.as_str(), handler.as_ref()))
    }

    pub fn handler(&self, name: &str) -> Option<&dyn FieldHandler> {
        self.handlers.get(name).map(|handler| handler.as_ref())
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    pub fn validator(&self) -> &CompositeValidator {
        &self.validator
    }

    pub fn validate(&self, values: &FormValues) -> ValidationResult {
        self.validator.validate(values)
    }

    /// Renders one field's widget, `None` if the form has no such field
    pub fn render_field(&self, bindings: &FieldBindings) -> Option<Widget> {
        self.handler(&bindings.name)
            .map(|handler| handler.render(bindings))
    }
}

/// Builds one handler per field, in definition order, and merges their
/// validators into a composite keyed by field name
///
/// Fails before producing anything if any field has inverted or
/// non-finite bounds.
pub fn assemble(definition: &FormDefinition) -> Result<AssembledForm> {
    let mut handlers = IndexMap::with_capacity(definition.len());

    for (name, field) in definition.iter() {
        field.check_bounds(name)?;
        handlers.insert(name.to_string(), registry::handler_for(field.clone()));
    }

    let validator = handlers
        .iter()
        .map(|(name, handler)| (name.clone(), handler.validator()))
        .collect::<CompositeValidator>();

    debug!(fields = handlers.len(), "assembled form");

    Ok(AssembledForm {
        handlers,
        validator,
    })
}
