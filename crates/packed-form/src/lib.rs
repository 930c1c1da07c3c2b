//! # Packed Form
//!
//! Declarative form builder: a [`FormDefinition`] (field name to typed field
//! definition, in display order) becomes a set of field handlers plus one
//! composite validator, and each handler renders a Maud widget.
//!
//! ## Example
//!
//! ```rust
//! use packed_form::{assemble, FieldDefinition, FormDefinition, FormValues, Value};
//!
//! let definition = FormDefinition::new()
//!     .field("name", FieldDefinition::string("Name").min_length(2).max_length(50))
//!     .field("age", FieldDefinition::int("Age").optional().min(18.0).max(120.0));
//!
//! let form = assemble(&definition).unwrap();
//!
//! let mut values = FormValues::new();
//! values.insert("name".into(), "Al".into());
//! values.insert("age".into(), "".into());
//!
//! let valid = form.validate(&values).unwrap();
//! assert_eq!(valid["name"], Value::from("Al"));
//! assert!(!valid.contains_key("age"));
//! ```

pub mod assembler;
pub mod config;
pub mod controller;
pub mod definition;
pub mod error;
pub mod fields;
pub mod kind;
pub mod registry;
pub mod validator;
pub mod value;
pub mod widget;

pub use assembler::{assemble, AssembledForm};
pub use config::{Config, RenderConfig, ServerConfig};
pub use controller::{FieldState, FieldStatus, FormController};
pub use definition::{
    FieldDefinition, FormDefinition, LengthOptions, NumericField, RangeOptions, TextualField,
};
pub use error::{FormError, Result};
pub use fields::FieldHandler;
pub use kind::FieldKind;
pub use registry::HandlerConstructor;
pub use validator::{CompositeValidator, FieldValidator, Rule, ValidationErrors, ValidationResult};
pub use value::{FormValues, Value};
pub use widget::{Control, FieldAttrs, FieldBindings, InputMode, InputType, Widget};

// Re-export Maud so callers can embed widgets in their own templates
pub use maud::{html, Markup, Render};
