#![forbid(unsafe_code)]

//! Declarative field validation for interactive forms.
//!
//! # Role
//! `fieldguard` validates string-valued form input against per-field rules,
//! collects one message per failing field, strips markup before values leave
//! the form, and tracks touched/dirty/completion state so a UI can decide
//! when to show errors and when to enable submission.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`patterns`] | Shared email / phone / URL / strong-password matchers |
//! | [`rule`] | `ValidationRule` and `RuleSet` |
//! | [`field`] | Single-field validation with fixed check precedence |
//! | [`form`] | Whole-form validation, validity, completion percentage |
//! | [`sanitize`] | Best-effort script and tag stripping |
//! | [`debounce`] | Latest-wins call coalescing for live re-validation |
//! | [`controller`] | Touched-gated validation state for one form |
//! | [`config`] | Rule sets and form settings from JSON |
//! | [`display`] | Field-name humanizing and message formatting |
//!
//! # Example
//!
//! ```rust
//! use fieldguard::prelude::*;
//!
//! let rules = RuleSet::new()
//!     .field("name", ValidationRule::new().required().min_length(2))
//!     .field("email", ValidationRule::new().required().pattern(EMAIL.clone()))
//!     .field("message", ValidationRule::new().required().max_length(500));
//!
//! let mut values = FormValues::new();
//! values.insert("name".into(), "Ada".into());
//! values.insert("email".into(), "ada@example".into());
//!
//! let errors = validate_form(&values, &rules);
//! assert_eq!(errors.get("email"), Some("Please enter a valid email address"));
//! assert_eq!(errors.get("message"), Some("Message is required"));
//! assert_eq!(form_completion_percentage(&values, &rules), 67);
//! ```
//!
//! # Logging
//! Controller decisions, debounce supersession, and configuration loading
//! emit `tracing` events at `debug`/`trace` level. No subscriber is installed.

pub mod config;
pub mod controller;
pub mod debounce;
pub mod display;
pub mod field;
pub mod form;
pub mod patterns;
pub mod rule;
pub mod sanitize;

pub use config::{ConfigError, FormConfig, RuleConfig};
pub use controller::{ValidationController, ValidationMode};
pub use debounce::{DebounceStats, Debounced, Debouncer, debounce};
pub use display::{display_name, format_error_message};
pub use field::{validate_field, validate_named_field};
pub use form::{
    FormValues, ValidationErrors, form_completion_percentage, is_form_valid, validate_form,
};
pub use patterns::{EMAIL, PHONE, Pattern, PatternKind, STRONG_PASSWORD, URL};
pub use rule::{CustomRule, RuleSet, ValidationRule};
pub use sanitize::{sanitize_form_data, sanitize_value};

/// Everything needed to declare rules and drive a form.
pub mod prelude {
    pub use crate::controller::{ValidationController, ValidationMode};
    pub use crate::debounce::{Debounced, Debouncer, debounce};
    pub use crate::form::{
        FormValues, ValidationErrors, form_completion_percentage, is_form_valid, validate_form,
    };
    pub use crate::patterns::{EMAIL, PHONE, Pattern, STRONG_PASSWORD, URL};
    pub use crate::rule::{RuleSet, ValidationRule};
    pub use crate::sanitize::sanitize_form_data;
}
