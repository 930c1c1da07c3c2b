// File: src/widget.rs
// Purpose: Widget descriptions produced by field handlers, rendered with Maud

use maud::{html, Markup, Render};

use crate::config::RenderConfig;
use crate::validator::{FieldValidator, Rule};

/// Live per-field state handed to a handler when it renders
///
/// `on_change` and `on_blur` are opaque handler snippets emitted as
/// `onchange` / `onblur`; focus and keyboard handling stay with the browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldBindings {
    pub name: String,
    pub value: String,
    pub error: Option<String>,
    pub on_change: Option<String>,
    pub on_blur: Option<String>,
}

impl FieldBindings {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn error(mut self, error: Option<impl Into<String>>) -> Self {
        self.error = error.map(Into::into);
        self
    }

    pub fn on_change(mut self, handler: impl Into<String>) -> Self {
        self.on_change = Some(handler.into());
        self
    }

    pub fn on_blur(mut self, handler: impl Into<String>) -> Self {
        self.on_blur = Some(handler.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Text,
    Email,
    Password,
    Number,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Email => "email",
            InputType::Password => "password",
            InputType::Number => "number",
        }
    }
}

/// Virtual keyboard hint for numeric inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Numeric,
    Decimal,
}

impl InputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::Numeric => "numeric",
            InputMode::Decimal => "decimal",
        }
    }
}

/// The input control a field kind renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Multi-line input
    TextArea,
    /// Single-line input
    Input {
        input_type: InputType,
        input_mode: Option<InputMode>,
    },
}

impl Control {
    pub fn input(input_type: InputType) -> Self {
        Control::Input {
            input_type,
            input_mode: None,
        }
    }

    pub fn numeric(input_mode: InputMode) -> Self {
        Control::Input {
            input_type: InputType::Number,
            input_mode: Some(input_mode),
        }
    }
}

/// HTML5 constraint attributes mirroring a field validator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldAttrs {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<&'static str>,
}

impl From<&FieldValidator> for FieldAttrs {
    fn from(validator: &FieldValidator) -> Self {
        let required = !validator.is_optional();
        match *validator.rule() {
            Rule::Text {
                min_length,
                max_length,
                ..
            } => Self {
                required,
                min_length,
                max_length,
                ..Self::default()
            },
            Rule::Number { min, max, integer } => Self {
                required,
                min,
                max,
                step: Some(if integer { "1" } else { "any" }),
                ..Self::default()
            },
        }
    }
}

/// Labeled input control bound to a field's live value and error
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    pub name: String,
    pub label: String,
    pub control: Control,
    pub value: String,
    pub error: Option<String>,
    pub attrs: FieldAttrs,
    pub on_change: Option<String>,
    pub on_blur: Option<String>,
}

impl Widget {
    pub fn new(
        label: &str,
        control: Control,
        validator: &FieldValidator,
        bindings: &FieldBindings,
    ) -> Self {
        Self {
            name: bindings.name.clone(),
            label: label.to_string(),
            control,
            value: bindings.value.clone(),
            error: bindings.error.clone(),
            attrs: FieldAttrs::from(validator),
            on_change: bindings.on_change.clone(),
            on_blur: bindings.on_blur.clone(),
        }
    }

    /// DOM id of the control, targeted by the label
    pub fn id(&self) -> String {
        format!("field-{}", self.name)
    }

    /// Renders label, control and error slot with the given classes
    pub fn render_with(&self, config: &RenderConfig) -> Markup {
        let id = self.id();
        let attrs = &self.attrs;

        html! {
            div class=(config.field_class) data-field=(self.name) {
                label for=(id) { (self.label) }
                @match self.control {
                    Control::TextArea => {
                        textarea
                            id=(id)
                            name=(self.name)
                            required[attrs.required]
                            minlength=[attrs.min_length]
                            maxlength=[attrs.max_length]
                            onchange=[self.on_change.as_deref()]
                            onblur=[self.on_blur.as_deref()] { (self.value) }
                    }
                    Control::Input { input_type, input_mode } => {
                        input
                            type=(input_type.as_str())
                            id=(id)
                            name=(self.name)
                            value=(self.value)
                            inputmode=[input_mode.map(|mode| mode.as_str())]
                            required[attrs.required]
                            minlength=[attrs.min_length]
                            maxlength=[attrs.max_length]
                            min=[attrs.min.map(|n| n.to_string())]
                            max=[attrs.max.map(|n| n.to_string())]
                            step=[attrs.step]
                            onchange=[self.on_change.as_deref()]
                            onblur=[self.on_blur.as_deref()];
                    }
                }
                @if let Some(error) = &self.error {
                    p class=(config.error_class) { (error) }
                }
            }
        }
    }
}

impl Render for Widget {
    fn render(&self) -> Markup {
        self.render_with(&RenderConfig::default())
    }
}
