// File: src/controller.rs
// Purpose: Ties a form definition to a live editing session

use indexmap::IndexMap;
use maud::{html, Markup};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::assembler::{assemble, AssembledForm};
use crate::config::RenderConfig;
use crate::definition::FormDefinition;
use crate::error::{FormError, Result};
use crate::validator::{ValidationErrors, ValidationResult};
use crate::value::{FormValues, Value};
use crate::widget::FieldBindings;

/// Where a field stands in the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatus {
    Untouched,
    Valid,
    Invalid,
}

/// Live state of one field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    pub value: Value,
    pub touched: bool,
    pub errors: Vec<String>,
}

impl FieldState {
    fn pristine() -> Self {
        Self {
            value: Value::empty(),
            touched: false,
            errors: Vec::new(),
        }
    }

    pub fn status(&self) -> FieldStatus {
        match (self.touched, self.errors.is_empty()) {
            (false, _) => FieldStatus::Untouched,
            (true, true) => FieldStatus::Valid,
            (true, false) => FieldStatus::Invalid,
        }
    }

    /// Error shown next to the control: first error once touched
    pub fn visible_error(&self) -> Option<&str> {
        if self.touched {
            self.errors.first().map(String::as_str)
        } else {
            None
        }
    }
}

/// Form controller: defaults, validation and submission for one form
///
/// The handlers and composite validator are derived from the definition and
/// rebuilt only when a different definition is installed. Cloning copies
/// the session state and shares the built form.
#[derive(Debug, Clone)]
pub struct FormController {
    definition: Arc<FormDefinition>,
    form: Arc<AssembledForm>,
    state: IndexMap<String, FieldState>,
}

impl FormController {
    pub fn new(definition: Arc<FormDefinition>) -> Result<Self> {
        let form = Arc::new(assemble(&definition)?);
        let state = pristine_state(&form);
        Ok(Self {
            definition,
            form,
            state,
        })
    }

    pub fn definition(&self) -> &Arc<FormDefinition> {
        &self.definition
    }

    /// Shared, immutable snapshot of handlers and validator
    pub fn form(&self) -> &Arc<AssembledForm> {
        &self.form
    }

    /// Installs a new definition
    ///
    /// Rebuilds only if `definition` is a different allocation from the
    /// current one. A rebuild resets the session. On failure the previous
    /// build stays in place.
    pub fn set_definition(&mut self, definition: Arc<FormDefinition>) -> Result<()> {
        if Arc::ptr_eq(&self.definition, &definition) {
            return Ok(());
        }

        let form = assemble(&definition).map_err(|err| {
            warn!(error = %err, "keeping previous form; new definition failed to build");
            err
        })?;

        self.form = Arc::new(form);
        self.definition = definition;
        self.state = pristine_state(&self.form);
        debug!("form definition replaced");
        Ok(())
    }

    /// Every field starts as an empty string, numeric fields included
    pub fn default_values(&self) -> FormValues {
        self.form
            .field_names()
            .map(|name| (name.to_string(), Value::empty()))
            .collect()
    }

    /// Whole-form validation of an arbitrary value mapping
    pub fn validate(&self, values: &FormValues) -> ValidationResult {
        self.form.validate(values)
    }

    /// Current values of the session, in display order
    pub fn values(&self) -> FormValues {
        self.state
            .iter()
            .map(|(name, state)| (name.clone(), state.value.clone()))
            .collect()
    }

    pub fn field(&self, name: &str) -> Option<&FieldState> {
        self.state.get(name)
    }

    pub fn status(&self, name: &str) -> Option<FieldStatus> {
        self.state.get(name).map(FieldState::status)
    }

    /// Records a new value for a field and revalidates it
    pub fn change(&mut self, name: &str, value: impl Into<Value>) -> Result<FieldStatus> {
        let state = self.field_mut(name)?;
        state.value = value.into();
        state.touched = true;
        self.revalidate(name)
    }

    /// Marks a field as touched and revalidates it
    pub fn blur(&mut self, name: &str) -> Result<FieldStatus> {
        self.field_mut(name)?.touched = true;
        self.revalidate(name)
    }

    /// Back to default values, every field untouched
    pub fn reset(&mut self) {
        self.state = pristine_state(&self.form);
    }

    /// Validates the session values and hands them to `on_submit`
    ///
    /// On failure the callback is not called, every field is marked touched
    /// and the errors are kept for rendering.
    pub fn submit<F, R>(&mut self, on_submit: F) -> std::result::Result<R, ValidationErrors>
    where
        F: FnOnce(FormValues) -> R,
    {
        let result = self.validate(&self.values());

        for (name, state) in self.state.iter_mut() {
            state.touched = true;
            state.errors = match &result {
                Ok(_) => Vec::new(),
                Err(errors) => errors.get(name).map(<[String]>::to_vec).unwrap_or_default(),
            };
        }

        match result {
            Ok(values) => {
                debug!(fields = values.len(), "form submitted");
                Ok(on_submit(values))
            }
            Err(errors) => {
                debug!(invalid = errors.len(), "submission blocked");
                Err(errors)
            }
        }
    }

    /// Stateless submit for request/response handlers
    pub fn handle_submit<F, R>(
        &self,
        values: &FormValues,
        on_submit: F,
    ) -> std::result::Result<R, ValidationErrors>
    where
        F: FnOnce(FormValues) -> R,
    {
        self.validate(values).map(on_submit)
    }

    /// Loads submitted values into the session, marking every field touched
    ///
    /// Unknown keys are ignored; missing keys keep an empty value.
    pub fn load_values(&mut self, values: &FormValues) {
        let result = self.validate(values);
        for (name, state) in self.state.iter_mut() {
            state.value = values.get(name).cloned().unwrap_or_else(Value::empty);
            state.touched = true;
            state.errors = result
                .as_ref()
                .err()
                .and_then(|errors| errors.get(name))
                .map(<[String]>::to_vec)
                .unwrap_or_default();
        }
    }

    /// Renders the whole form with its widgets in display order
    pub fn render(&self, config: &RenderConfig) -> Markup {
        html! {
            form class=(config.form_class) action=(config.action) method=(config.method) novalidate {
                @for (name, handler) in self.form.handlers() {
                    @let state = self.state.get(name);
                    @let bindings = FieldBindings::new(name)
                        .value(state.map(|s| s.value.to_string()).unwrap_or_default())
                        .error(state.and_then(FieldState::visible_error));
                    (handler.render(&bindings).render_with(config))
                }
                button type="submit" { (config.submit_label) }
            }
        }
    }

    fn field_mut(&mut self, name: &str) -> Result<&mut FieldState> {
        self.state
            .get_mut(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    fn revalidate(&mut self, name: &str) -> Result<FieldStatus> {
        let unknown = || FormError::UnknownField(name.to_string());
        let validator = self.form.validator().get(name).ok_or_else(unknown)?;
        let state = self.state.get_mut(name).ok_or_else(unknown)?;
        state.errors = validator.validate(Some(&state.value)).err().unwrap_or_default();
        Ok(state.status())
    }
}

fn pristine_state(form: &AssembledForm) -> IndexMap<String, FieldState> {
    form.field_names()
        .map(|name| (name.to_string(), FieldState::pristine()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::FieldDefinition;
    use pretty_assertions::assert_eq;

    fn signup() -> Arc<FormDefinition> {
        Arc::new(
            FormDefinition::new()
                .field("user", FieldDefinition::string("User").min_length(3))
                .field("age", FieldDefinition::int("Age").optional().min(18.0)),
        )
    }

    #[test]
    fn test_defaults_are_empty_strings() {
        let controller = FormController::new(signup()).unwrap();
        let defaults = controller.default_values();
        assert_eq!(defaults["user"], Value::from(""));
        assert_eq!(defaults["age"], Value::from(""));
        assert_eq!(controller.values(), defaults);
    }

    #[test]
    fn test_field_state_machine() {
        let mut controller = FormController::new(signup()).unwrap();
        assert_eq!(controller.status("user"), Some(FieldStatus::Untouched));

        assert_eq!(controller.change("user", "ab").unwrap(), FieldStatus::Invalid);
        assert_eq!(controller.change("user", "abc").unwrap(), FieldStatus::Valid);
        assert_eq!(controller.change("user", "").unwrap(), FieldStatus::Invalid);

        assert_eq!(controller.blur("age").unwrap(), FieldStatus::Valid);
        assert!(matches!(
            controller.change("nope", "x"),
            Err(FormError::UnknownField(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_submit_calls_back_only_when_valid() {
        let mut controller = FormController::new(signup()).unwrap();

        let mut called = false;
        let errors = controller.submit(|_| called = true).unwrap_err();
        assert!(!called);
        assert_eq!(errors.first("user"), Some("This field is required"));
        assert_eq!(controller.status("user"), Some(FieldStatus::Invalid));
        assert_eq!(controller.status("age"), Some(FieldStatus::Valid));

        controller.change("user", "alice").unwrap();
        controller.change("age", "30").unwrap();
        let submitted = controller.submit(|values| values).unwrap();
        assert_eq!(submitted["user"], Value::from("alice"));
        assert_eq!(submitted["age"], Value::Int(30));
    }

    #[test]
    fn test_set_definition_is_memoized_on_identity() {
        let definition = signup();
        let mut controller = FormController::new(definition.clone()).unwrap();
        controller.change("user", "alice").unwrap();
        let before = Arc::clone(controller.form());

        controller.set_definition(definition).unwrap();
        assert!(Arc::ptr_eq(&before, controller.form()));
        assert_eq!(controller.values()["user"], Value::from("alice"));

        // Equal content, different allocation: rebuilt and reset
        controller.set_definition(signup()).unwrap();
        assert!(!Arc::ptr_eq(&before, controller.form()));
        assert_eq!(controller.values()["user"], Value::from(""));
        assert_eq!(before.validator(), controller.form().validator());
    }

    #[test]
    fn test_failed_rebuild_keeps_previous_form() {
        let mut controller = FormController::new(signup()).unwrap();
        let broken = Arc::new(
            FormDefinition::new().field("x", FieldDefinition::string("X").min_length(5).max_length(1)),
        );

        assert!(controller.set_definition(broken).is_err());
        assert_eq!(
            controller.form().field_names().collect::<Vec<_>>(),
            vec!["user", "age"]
        );
    }

    #[test]
    fn test_render_shows_errors_for_touched_fields_only() {
        let mut controller = FormController::new(signup()).unwrap();
        let html = controller.render(&RenderConfig::default()).into_string();
        assert!(!html.contains("field-error"));
        assert!(html.contains(r#"<button type="submit">Submit</button>"#));

        controller.change("user", "ab").unwrap();
        let html = controller.render(&RenderConfig::default()).into_string();
        assert!(html.contains("Must be at least 3 characters"));
        assert!(html.contains(r#"value="ab""#));
        assert_eq!(html.matches("field-error").count(), 1);
    }

    #[test]
    fn test_load_values_marks_fields_touched() {
        let mut controller = FormController::new(signup()).unwrap();
        let mut values = FormValues::new();
        values.insert("user".into(), "al".into());
        controller.load_values(&values);

        assert_eq!(controller.status("user"), Some(FieldStatus::Invalid));
        assert_eq!(controller.status("age"), Some(FieldStatus::Valid));
        assert_eq!(controller.values()["user"], Value::from("al"));
    }
}
