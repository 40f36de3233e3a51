#![forbid(unsafe_code)]

//! Stateful form validation for interactive UIs.
//!
//! A [`ValidationController`] owns the current values, errors and touched
//! flags of one form. Fields are validated only once the user has touched
//! them, so a fresh form shows no errors; once touched, every update
//! re-validates that field immediately. [`ValidationController::submit`]
//! checks everything, including fields never touched.
//!
//! # Example
//!
//! ```rust
//! use fieldguard::controller::ValidationController;
//! use fieldguard::patterns::EMAIL;
//! use fieldguard::rule::{RuleSet, ValidationRule};
//!
//! let rules = RuleSet::new()
//!     .field("email", ValidationRule::new().required().pattern(EMAIL.clone()));
//! let mut form = ValidationController::new(rules);
//!
//! form.update_field("email", "ada@");
//! assert_eq!(form.error("email"), None); // untouched
//!
//! form.touch_field("email");
//! assert_eq!(form.error("email"), Some("Please enter a valid email address"));
//!
//! form.update_field("email", "ada@example.com");
//! assert_eq!(form.error("email"), None);
//! assert!(form.submit().is_ok());
//! ```
//!
//! # State per field
//!
//! | State | Enters on | Update re-validates |
//! |-------|-----------|---------------------|
//! | untouched | construction, `reset` | no |
//! | touched-valid | `touch_field` / update with no error | yes |
//! | touched-invalid | `touch_field` / update with an error | yes |
//!
//! In [`ValidationMode::OnSubmit`] nothing is validated per field until the
//! first submit attempt; after that the table above applies.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::field::validate_named_field;
use crate::form::{
    FormValues, ValidationErrors, form_completion_percentage, is_form_valid, validate_form,
};
use crate::rule::RuleSet;
use crate::sanitize::sanitize_form_data;

// ---------------------------------------------------------------------------
// ValidationMode
// ---------------------------------------------------------------------------

/// When per-field validation feedback is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Touched fields validate on every change.
    #[default]
    RealTime,
    /// Fields validate on submit; touched fields go live after the first attempt.
    OnSubmit,
}

impl ValidationMode {
    /// The other mode.
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Self::RealTime => Self::OnSubmit,
            Self::OnSubmit => Self::RealTime,
        }
    }

    /// Short label for status lines.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::RealTime => "Real-time",
            Self::OnSubmit => "On Submit",
        }
    }
}

// ---------------------------------------------------------------------------
// ValidationController
// ---------------------------------------------------------------------------

/// Values, errors and touched state for one form.
#[derive(Debug, Clone)]
pub struct ValidationController {
    rules: RuleSet,
    values: FormValues,
    /// Snapshot taken at construction, for dirty tracking and `reset`.
    initial_values: FormValues,
    errors: ValidationErrors,
    touched: BTreeSet<String>,
    mode: ValidationMode,
    submit_attempted: bool,
}

impl ValidationController {
    /// Create a controller with every declared field set to `""`.
    #[must_use]
    pub fn new(rules: RuleSet) -> Self {
        Self::with_initial_values(rules, FormValues::new())
    }

    /// Create a controller from initial values.
    ///
    /// Declared fields missing from `initial` start as `""`. Extra values are
    /// kept and submitted but never validated.
    #[must_use]
    pub fn with_initial_values(rules: RuleSet, initial: FormValues) -> Self {
        let mut values = initial;
        for name in rules.field_names() {
            values.entry(name.to_string()).or_default();
        }
        Self {
            rules,
            initial_values: values.clone(),
            values,
            errors: ValidationErrors::new(),
            touched: BTreeSet::new(),
            mode: ValidationMode::default(),
            submit_attempted: false,
        }
    }

    /// Use `mode` from the start.
    #[must_use]
    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    // -- mutations --

    /// Store a new value, re-validating the field if it has been touched.
    pub fn update_field(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
        if self.touched.contains(name) && self.live() {
            self.revalidate(name);
        }
    }

    /// Mark a field as touched and validate it.
    pub fn touch_field(&mut self, name: &str) {
        self.touched.insert(name.to_string());
        if self.live() {
            self.revalidate(name);
        }
    }

    /// Validate every declared field and replace the stored errors.
    ///
    /// Touched state is left alone. Returns `true` if the form is valid.
    pub fn validate_all_fields(&mut self) -> bool {
        self.submit_attempted = true;
        self.errors = validate_form(&self.values, &self.rules);
        tracing::debug!(errors = self.errors.len(), "validated all fields");
        self.errors.is_empty()
    }

    /// Validate everything and, if valid, return sanitized values.
    ///
    /// The returned map is what gets handed to the delivery endpoint.
    pub fn submit(&mut self) -> Result<FormValues, ValidationErrors> {
        if self.validate_all_fields() {
            tracing::debug!(fields = self.values.len(), "form submitted");
            Ok(sanitize_form_data(&self.values))
        } else {
            tracing::debug!(errors = self.errors.len(), "form submission rejected");
            Err(self.errors.clone())
        }
    }

    /// Switch validation mode.
    ///
    /// Entering `OnSubmit` clears shown errors and the submit attempt;
    /// entering `RealTime` re-validates every touched field.
    pub fn set_mode(&mut self, mode: ValidationMode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        match mode {
            ValidationMode::OnSubmit => {
                self.errors.clear();
                self.submit_attempted = false;
            }
            ValidationMode::RealTime => {
                let touched: Vec<String> = self.touched.iter().cloned().collect();
                for name in &touched {
                    self.revalidate(name);
                }
            }
        }
    }

    /// Restore initial values and forget errors, touched flags and submits.
    pub fn reset(&mut self) {
        self.values = self.initial_values.clone();
        self.errors.clear();
        self.touched.clear();
        self.submit_attempted = false;
    }

    // -- derived state --

    /// Returns `true` if the current values pass every rule.
    ///
    /// Computed from values, not from the stored (possibly partial) errors.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        is_form_valid(&self.values, &self.rules)
    }

    /// Percentage of required fields with non-blank input.
    #[must_use]
    pub fn completion_percentage(&self) -> u8 {
        form_completion_percentage(&self.values, &self.rules)
    }

    // -- accessors --

    /// Current value of a field.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// All current values.
    #[must_use]
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// The error currently shown for a field.
    #[must_use]
    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name)
    }

    /// All errors currently shown.
    #[must_use]
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Returns `true` if the field has been touched.
    #[must_use]
    pub fn is_touched(&self, name: &str) -> bool {
        self.touched.contains(name)
    }

    /// Touched field names in name order.
    pub fn touched_fields(&self) -> impl Iterator<Item = &str> {
        self.touched.iter().map(String::as_str)
    }

    /// Returns `true` if the field differs from its initial value.
    #[must_use]
    pub fn is_dirty(&self, name: &str) -> bool {
        let initial = self.initial_values.get(name).map_or("", String::as_str);
        self.value(name).unwrap_or("") != initial
    }

    /// Fields whose value differs from the initial value.
    pub fn dirty_fields(&self) -> impl Iterator<Item = &str> {
        self.values
            .keys()
            .map(String::as_str)
            .filter(|name| self.is_dirty(name))
    }

    /// Returns `true` if nothing has been touched or changed.
    #[must_use]
    pub fn is_pristine(&self) -> bool {
        self.touched.is_empty() && self.dirty_fields().next().is_none()
    }

    /// Returns `true` once `validate_all_fields` or `submit` has run.
    #[must_use]
    pub fn submit_attempted(&self) -> bool {
        self.submit_attempted
    }

    /// The rules this controller validates against.
    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// The current validation mode.
    #[must_use]
    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    // -- internals --

    fn live(&self) -> bool {
        self.mode == ValidationMode::RealTime || self.submit_attempted
    }

    fn revalidate(&mut self, name: &str) {
        let value = self.values.get(name).map_or("", String::as_str);
        let message = self
            .rules
            .get(name)
            .and_then(|rule| validate_named_field(name, value, rule));
        match &message {
            Some(message) => tracing::debug!(field = name, error = %message, "field invalid"),
            None => tracing::debug!(field = name, "field valid"),
        }
        self.errors.set(name, message);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
