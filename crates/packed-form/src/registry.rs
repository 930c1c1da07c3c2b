// File: src/registry.rs
// Purpose: Field-kind registry mapping type tags to handler constructors

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::definition::FieldDefinition;
use crate::error::{FormError, Result};
use crate::fields::{
    EmailField, FieldHandler, FloatField, IntField, PasswordField, StringField, TextField,
};
use crate::kind::FieldKind;

/// Builds the handler for one field definition
pub type HandlerConstructor = fn(FieldDefinition) -> Box<dyn FieldHandler>;

// Built once, never mutated
static KIND_TAGS: Lazy<HashMap<&'static str, FieldKind>> = Lazy::new(|| {
    FieldKind::ALL
        .iter()
        .map(|kind| (kind.as_str(), *kind))
        .collect()
});

/// Resolves a type tag from untyped data
pub fn resolve_kind(tag: &str) -> Result<FieldKind> {
    KIND_TAGS
        .get(tag)
        .copied()
        .ok_or_else(|| FormError::UnsupportedFieldKind(tag.to_string()))
}

/// Resolves a type tag to the constructor registered for it
pub fn resolve(tag: &str) -> Result<HandlerConstructor> {
    resolve_kind(tag).map(constructor)
}

/// Constructor for a kind; exhaustive, so a new kind cannot be forgotten
pub fn constructor(kind: FieldKind) -> HandlerConstructor {
    match kind {
        FieldKind::String => StringField::boxed,
        FieldKind::Text => TextField::boxed,
        FieldKind::Int => IntField::boxed,
        FieldKind::Float => FloatField::boxed,
        FieldKind::Email => EmailField::boxed,
        FieldKind::Password => PasswordField::boxed,
    }
}

/// Builds the handler matching a definition's own kind
pub fn handler_for(definition: FieldDefinition) -> Box<dyn FieldHandler> {
    constructor(definition.kind())(definition)
}

/// Every registered tag, in registration order
pub fn supported_kinds() -> impl Iterator<Item = &'static str> {
    FieldKind::ALL.into_iter().map(|kind| kind.as_str())
}
