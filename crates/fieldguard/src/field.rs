#![forbid(unsafe_code)]

//! Single-field validation.
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. `required` on a blank value
//! 2. blank optional values pass without further checks
//! 3. `min_length` on the trimmed value
//! 4. `max_length` on the trimmed value
//! 5. `pattern` on the trimmed value
//! 6. `custom` on the trimmed value, message used verbatim
//!
//! Lengths count characters, not bytes.

use crate::display::display_name;
use crate::patterns::{Pattern, PatternKind};
use crate::rule::ValidationRule;

/// Validate `value` against `rule`, naming the field `label` in messages.
///
/// Returns `None` when the value passes.
///
/// ```rust
/// use fieldguard::field::validate_field;
/// use fieldguard::rule::ValidationRule;
///
/// let rule = ValidationRule::new().required();
/// assert_eq!(validate_field("  ", &rule, "Name").as_deref(), Some("Name is required"));
/// assert_eq!(validate_field("Ada", &rule, "Name"), None);
/// ```
#[must_use]
pub fn validate_field(value: &str, rule: &ValidationRule, label: &str) -> Option<String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return rule.required.then(|| format!("{label} is required"));
    }

    let len = trimmed.chars().count();

    if let Some(min) = rule.min_length
        && len < min
    {
        return Some(format!("{label} must be at least {min} characters"));
    }

    if let Some(max) = rule.max_length
        && len > max
    {
        return Some(format!("{label} must be no more than {max} characters"));
    }

    if let Some(pattern) = &rule.pattern
        && !pattern.is_match(trimmed)
    {
        return Some(pattern_message(pattern, label));
    }

    rule.custom
        .as_ref()
        .and_then(|check| check(trimmed))
        .filter(|message| !message.is_empty())
}

/// Validate a field by key, deriving its display name.
///
/// The rule's `label` wins; otherwise the key is humanized.
#[must_use]
pub fn validate_named_field(name: &str, value: &str, rule: &ValidationRule) -> Option<String> {
    validate_field(value, rule, &field_label(name, rule))
}

/// The display name used for `name` under `rule`.
#[must_use]
pub fn field_label(name: &str, rule: &ValidationRule) -> String {
    rule.label.clone().unwrap_or_else(|| display_name(name))
}

fn pattern_message(pattern: &Pattern, label: &str) -> String {
    match pattern.kind() {
        PatternKind::Email => "Please enter a valid email address".to_string(),
        PatternKind::Phone => "Please enter a valid phone number".to_string(),
        PatternKind::Url => "Please enter a valid URL".to_string(),
        PatternKind::StrongPassword | PatternKind::Custom => format!("{label} format is invalid"),
    }
}
