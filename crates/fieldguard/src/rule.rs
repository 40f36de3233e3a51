#![forbid(unsafe_code)]

//! Declarative per-field rules.
//!
//! A [`ValidationRule`] is plain data: which checks apply to one field. The
//! order in which those checks run is fixed by the field validator, not by
//! the order in which builder methods are called.
//!
//! # Example
//!
//! ```rust
//! use fieldguard::patterns::EMAIL;
//! use fieldguard::rule::{RuleSet, ValidationRule};
//!
//! let rules = RuleSet::new()
//!     .field("name", ValidationRule::new().required().min_length(2))
//!     .field("email", ValidationRule::new().required().pattern(EMAIL.clone()));
//!
//! assert_eq!(rules.len(), 2);
//! assert!(rules.get("email").is_some_and(|rule| rule.is_required()));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::patterns::Pattern;

/// A caller-supplied check. Returns a display-ready message on failure.
pub type CustomRule = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

// ---------------------------------------------------------------------------
// ValidationRule
// ---------------------------------------------------------------------------

/// Constraints for a single field.
///
/// The default rule has no constraints and accepts every value.
#[derive(Clone, Default)]
pub struct ValidationRule {
    /// Blank values fail with an "is required" message.
    pub required: bool,
    /// Minimum length of the trimmed value, in characters.
    pub min_length: Option<usize>,
    /// Maximum length of the trimmed value, in characters.
    pub max_length: Option<usize>,
    /// Pattern the trimmed value must match.
    pub pattern: Option<Pattern>,
    /// Extra check run last, on the trimmed value.
    pub custom: Option<CustomRule>,
    /// Display name used in messages instead of the humanized field key.
    pub label: Option<String>,
}

impl ValidationRule {
    /// Create a rule with no constraints.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Require at least `min` characters after trimming.
    #[must_use]
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Allow at most `max` characters after trimming.
    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Require the trimmed value to match `pattern`.
    #[must_use]
    pub fn pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Attach a custom check.
    #[must_use]
    pub fn custom<F>(mut self, check: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.custom = Some(Arc::new(check));
        self
    }

    /// Override the display name used in error messages.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns `true` if the field must be non-blank.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns `true` if no constraint is set.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        !self.required
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.pattern.is_none()
            && self.custom.is_none()
    }
}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRule")
            .field("required", &self.required)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("pattern", &self.pattern.as_ref().map(Pattern::kind))
            .field("custom", &self.custom.is_some())
            .field("label", &self.label)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// RuleSet
// ---------------------------------------------------------------------------

/// Rules keyed by field name.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: BTreeMap<String, ValidationRule>,
}

impl RuleSet {
    /// Create an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the rule for `name`.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, rule: ValidationRule) -> Self {
        self.insert(name, rule);
        self
    }

    /// Add or replace the rule for `name`, returning the previous rule.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        rule: ValidationRule,
    ) -> Option<ValidationRule> {
        self.rules.insert(name.into(), rule)
    }

    /// Attach a custom check to an existing field.
    ///
    /// Fields without a rule are left alone; rule sets loaded from
    /// configuration get their code-only checks this way.
    #[must_use]
    pub fn with_custom<F>(mut self, name: &str, check: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        if let Some(rule) = self.rules.get_mut(name) {
            rule.custom = Some(Arc::new(check));
        }
        self
    }

    /// The rule for `name`, if declared.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ValidationRule> {
        self.rules.get(name)
    }

    /// Returns `true` if `name` has a rule.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Iterate over `(name, rule)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValidationRule)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    /// Declared field names in name order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Names of fields whose rule is `required`.
    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, rule)| rule.required)
            .map(|(name, _)| name)
    }

    /// Number of declared fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no field is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, ValidationRule)> for RuleSet {
    fn from_iter<I: IntoIterator<Item = (K, ValidationRule)>>(iter: I) -> Self {
        Self {
            rules: iter
                .into_iter()
                .map(|(name, rule)| (name.into(), rule))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{EMAIL, PatternKind};

    #[test]
    fn default_rule_is_unconstrained() {
        let rule = ValidationRule::new();
        assert!(rule.is_unconstrained());
        assert!(!rule.is_required());
    }

    #[test]
    fn label_does_not_count_as_constraint() {
        assert!(ValidationRule::new().label("Full name").is_unconstrained());
    }

    #[test]
    fn builder_sets_fields() {
        let rule = ValidationRule::new()
            .required()
            .min_length(2)
            .max_length(10)
            .pattern(EMAIL.clone())
            .custom(|_| None);
        assert!(rule.required);
        assert_eq!(rule.min_length, Some(2));
        assert_eq!(rule.max_length, Some(10));
        assert_eq!(rule.pattern.as_ref().map(Pattern::kind), Some(PatternKind::Email));
        assert!(rule.custom.is_some());
        assert!(!rule.is_unconstrained());
    }

    #[test]
    fn debug_hides_closure() {
        let rule = ValidationRule::new().custom(|_| None);
        let text = format!("{rule:?}");
        assert!(text.contains("custom: true"));
    }

    #[test]
    fn rule_set_replaces_by_name() {
        let mut rules = RuleSet::new().field("name", ValidationRule::new());
        let previous = rules.insert("name", ValidationRule::new().required());
        assert!(previous.is_some_and(|rule| !rule.required));
        assert_eq!(rules.len(), 1);
        assert!(rules.get("name").is_some_and(ValidationRule::is_required));
    }

    #[test]
    fn required_fields_filters() {
        let rules = RuleSet::new()
            .field("name", ValidationRule::new().required())
            .field("company", ValidationRule::new())
            .field("email", ValidationRule::new().required());
        let required: Vec<_> = rules.required_fields().collect();
        assert_eq!(required, vec!["email", "name"]);
    }

    #[test]
    fn with_custom_ignores_unknown_field() {
        let rules = RuleSet::new()
            .field("name", ValidationRule::new())
            .with_custom("missing", |_| Some("never".into()))
            .with_custom("name", |_| Some("always".into()));
        assert!(!rules.contains("missing"));
        let check = rules.get("name").and_then(|rule| rule.custom.clone());
        assert_eq!(check.and_then(|f| f("x")), Some("always".to_string()));
    }

    #[test]
    fn collects_from_pairs() {
        let rules: RuleSet = [("a", ValidationRule::new()), ("b", ValidationRule::new())]
            .into_iter()
            .collect();
        assert_eq!(rules.field_names().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
