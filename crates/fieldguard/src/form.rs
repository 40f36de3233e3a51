#![forbid(unsafe_code)]

//! Whole-form validation and completion tracking.
//!
//! Fields are validated independently; only fields declared in the
//! [`RuleSet`] are ever checked, and only failures are recorded.

use std::collections::BTreeMap;
use std::fmt;

use crate::field::validate_named_field;
use crate::rule::RuleSet;

/// Raw form input keyed by field name.
///
/// May hold fields without a rule; validation ignores them.
pub type FormValues = BTreeMap<String, String>;

// ---------------------------------------------------------------------------
// ValidationErrors
// ---------------------------------------------------------------------------

/// Failed fields and their messages.
///
/// A field is absent when it has no error; messages are never empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<String, String>,
}

impl ValidationErrors {
    /// Create an empty error map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field`, or clear the field on `None`.
    ///
    /// Empty messages are treated as `None`.
    pub fn set(&mut self, field: impl Into<String>, message: Option<String>) {
        let field = field.into();
        match message.filter(|m| !m.is_empty()) {
            Some(message) => {
                self.errors.insert(field, message);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    /// Remove the error for `field`, returning it.
    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.errors.remove(field)
    }

    /// The message for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Returns `true` if `field` has an error.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Iterate over `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Names of failed fields in field order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    /// Number of failed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns `true` if no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Drop every error.
    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Borrow the underlying map.
    #[must_use]
    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Consume into the underlying map.
    #[must_use]
    pub fn into_map(self) -> BTreeMap<String, String> {
        self.errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.errors.len();
        write!(
            f,
            "{n} field{} failed validation",
            if n == 1 { "" } else { "s" }
        )?;
        for (field, message) in &self.errors {
            write!(f, "\n  {field}: {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// ---------------------------------------------------------------------------
// Form operations
// ---------------------------------------------------------------------------

/// Validate every field declared in `rules`.
///
/// Missing values are validated as `""`. Fields in `values` without a rule
/// are ignored.
#[must_use]
pub fn validate_form(values: &FormValues, rules: &RuleSet) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for (name, rule) in rules.iter() {
        let value = values.get(name).map_or("", String::as_str);
        errors.set(name, validate_named_field(name, value, rule));
    }
    errors
}

/// Returns `true` if [`validate_form`] finds no errors.
#[must_use]
pub fn is_form_valid(values: &FormValues, rules: &RuleSet) -> bool {
    validate_form(values, rules).is_empty()
}

/// Percentage of required fields holding non-blank input, 0 to 100.
///
/// Counts presence only: a filled field that fails its pattern still counts
/// as complete. Returns 100 when no field is required. Halves round up.
#[must_use]
pub fn form_completion_percentage(values: &FormValues, rules: &RuleSet) -> u8 {
    let (filled, total) = rules
        .required_fields()
        .fold((0usize, 0usize), |(filled, total), name| {
            let present = values.get(name).is_some_and(|v| !v.trim().is_empty());
            (filled + usize::from(present), total + 1)
        });

    if total == 0 {
        return 100;
    }
    // round(100 * filled / total) without floats
    let pct = (200 * filled + total) / (2 * total);
    u8::try_from(pct).unwrap_or(100)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
