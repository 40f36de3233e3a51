#![forbid(unsafe_code)]

//! Rule sets declared as JSON.
//!
//! Two shapes are accepted. A bare rule map:
//!
//! ```json
//! {
//!   "name":  { "required": true, "min_length": 2, "max_length": 50 },
//!   "email": { "required": true, "pattern": "email" },
//!   "zip":   { "regex": "^[0-9]{5}$", "label": "ZIP code" }
//! }
//! ```
//!
//! and a full form document, which adds the validation mode and the
//! re-validation debounce delay:
//!
//! ```json
//! { "mode": "on_submit", "debounce_ms": 300, "rules": { "name": { "required": true } } }
//! ```
//!
//! Custom checks are code-only; attach them after loading with
//! [`RuleSet::with_custom`].

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::controller::{ValidationController, ValidationMode};
use crate::patterns::{self, Pattern, PatternKind};
use crate::rule::{RuleSet, ValidationRule};

/// Default re-validation delay for forms that do not set `debounce_ms`.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors from loading rule configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Malformed JSON, wrong types, or unknown keys.
    Parse(serde_json::Error),
    /// A field's `regex` does not compile.
    InvalidRegex {
        /// Field the regex belongs to.
        field: String,
        /// Compiler error.
        source: regex::Error,
    },
    /// A field sets both `pattern` and `regex`.
    ConflictingPattern {
        /// Offending field.
        field: String,
    },
    /// A field's `min_length` exceeds its `max_length`.
    InvalidBounds {
        /// Offending field.
        field: String,
        /// Declared minimum.
        min: usize,
        /// Declared maximum.
        max: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "invalid rule configuration: {e}"),
            Self::InvalidRegex { field, source } => {
                write!(f, "field `{field}`: invalid regex: {source}")
            }
            Self::ConflictingPattern { field } => {
                write!(f, "field `{field}`: `pattern` and `regex` are mutually exclusive")
            }
            Self::InvalidBounds { field, min, max } => {
                write!(f, "field `{field}`: min_length {min} exceeds max_length {max}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::InvalidRegex { source, .. } => Some(source),
            Self::ConflictingPattern { .. } | Self::InvalidBounds { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

// ---------------------------------------------------------------------------
// Declarative shapes
// ---------------------------------------------------------------------------

/// Library pattern names accepted by `pattern`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternName {
    /// `"email"`, the shared email pattern.
    Email,
    /// `"phone"`, the shared phone-number pattern.
    Phone,
    /// `"url"`, the shared http(s) URL pattern.
    Url,
    /// `"strong_password"`, the shared strong-password pattern.
    StrongPassword,
}

impl From<PatternName> for PatternKind {
    fn from(name: PatternName) -> Self {
        match name {
            PatternName::Email => Self::Email,
            PatternName::Phone => Self::Phone,
            PatternName::Url => Self::Url,
            PatternName::StrongPassword => Self::StrongPassword,
        }
    }
}

/// One field's rule as written in configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleConfig {
    /// Blank values fail.
    pub required: bool,
    /// Minimum trimmed length in characters.
    pub min_length: Option<usize>,
    /// Maximum trimmed length in characters.
    pub max_length: Option<usize>,
    /// A library pattern by name. Exclusive with `regex`.
    pub pattern: Option<PatternName>,
    /// A custom regex source. Exclusive with `pattern`.
    pub regex: Option<String>,
    /// Display name used in messages.
    pub label: Option<String>,
}

impl RuleConfig {
    /// Compile into a [`ValidationRule`].
    pub fn build(&self, field: &str) -> Result<ValidationRule, ConfigError> {
        if let (Some(min), Some(max)) = (self.min_length, self.max_length)
            && min > max
        {
            return Err(ConfigError::InvalidBounds {
                field: field.to_string(),
                min,
                max,
            });
        }

        let pattern = match (self.pattern, self.regex.as_deref()) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::ConflictingPattern {
                    field: field.to_string(),
                });
            }
            (Some(name), None) => patterns::library(name.into()).cloned(),
            (None, Some(source)) => {
                Some(Pattern::new(source).map_err(|source| ConfigError::InvalidRegex {
                    field: field.to_string(),
                    source,
                })?)
            }
            (None, None) => None,
        };

        Ok(ValidationRule {
            required: self.required,
            min_length: self.min_length,
            max_length: self.max_length,
            pattern,
            custom: None,
            label: self.label.clone(),
        })
    }
}

/// A whole form: rules plus interaction settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormConfig {
    /// When per-field feedback is shown. Defaults to real-time.
    #[serde(default)]
    pub mode: ValidationMode,
    /// Re-validation delay in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Rules keyed by field name.
    pub rules: BTreeMap<String, RuleConfig>,
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

impl FormConfig {
    /// Parse a form document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Compile the rules.
    pub fn rule_set(&self) -> Result<RuleSet, ConfigError> {
        build_rule_set(&self.rules)
    }

    /// The re-validation delay.
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Build a controller with these rules and mode.
    pub fn controller(&self) -> Result<ValidationController, ConfigError> {
        Ok(ValidationController::new(self.rule_set()?).with_mode(self.mode))
    }
}

fn build_rule_set(rules: &BTreeMap<String, RuleConfig>) -> Result<RuleSet, ConfigError> {
    let mut set = RuleSet::new();
    for (field, config) in rules {
        set.insert(field.clone(), config.build(field)?);
    }
    tracing::debug!(fields = set.len(), "rule set loaded");
    Ok(set)
}

impl RuleSet {
    /// Load a bare rule map from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let rules: BTreeMap<String, RuleConfig> = serde_json::from_str(json)?;
        build_rule_set(&rules)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
