#![forbid(unsafe_code)]

//! Shared pattern library.
//!
//! Every "valid email / phone / URL" decision in the crate goes through the
//! statics defined here. Patterns are compiled once on first use and are
//! immutable afterwards, so they can be shared freely across threads.
//!
//! A [`Pattern`] carries a [`PatternKind`] alongside its regexes. The field
//! validator uses the kind, not the regex text, to pick an error message.
//!
//! # Example
//!
//! ```rust
//! use fieldguard::patterns::{EMAIL, PatternKind};
//!
//! assert!(EMAIL.is_match("user@example.com"));
//! assert!(!EMAIL.is_match("user@example"));
//! assert_eq!(EMAIL.kind(), PatternKind::Email);
//! ```

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Pattern sources
// ---------------------------------------------------------------------------

const EMAIL_SOURCE: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const PHONE_SOURCE: &str = r"^\+?\(?[0-9][0-9\s().-]{5,18}[0-9]$";
const URL_SOURCE: &str = r"(?i)^https?://[^\s/$.?#][^\s]*$";

/// Characters accepted as the "special" class of a strong password.
pub const PASSWORD_SYMBOLS: &str = "@$!%*?&";

// `regex` has no look-around, so the strong-password rule is a conjunction.
const STRONG_PASSWORD_SOURCES: [&str; 5] = [
    r"[a-z]",
    r"[A-Z]",
    r"[0-9]",
    r"[@$!%*?&]",
    r"^[A-Za-z0-9@$!%*?&]{8,}$",
];

// ---------------------------------------------------------------------------
// PatternKind
// ---------------------------------------------------------------------------

/// Identity of a pattern, independent of its regex text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    /// The shared email pattern.
    Email,
    /// The shared phone-number pattern.
    Phone,
    /// The shared http(s) URL pattern.
    Url,
    /// The shared strong-password pattern.
    StrongPassword,
    /// Any caller-supplied pattern.
    Custom,
}

impl PatternKind {
    /// Stable lowercase name, matching the configuration spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Url => "url",
            Self::StrongPassword => "strong_password",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Pattern
// ---------------------------------------------------------------------------

/// A compiled matcher with an identity.
///
/// A value matches when every regex in the pattern matches it. Library
/// patterns hold one regex, except [`STRONG_PASSWORD`].
#[derive(Clone)]
pub struct Pattern {
    kind: PatternKind,
    regexes: Vec<Regex>,
}

impl Pattern {
    /// Compile a custom pattern from regex source.
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Ok(Self::from_regex(Regex::new(source)?))
    }

    /// Wrap an already-compiled regex as a custom pattern.
    #[must_use]
    pub fn from_regex(regex: Regex) -> Self {
        Self {
            kind: PatternKind::Custom,
            regexes: vec![regex],
        }
    }

    /// Build a library pattern from sources that are known to compile.
    fn builtin(kind: PatternKind, sources: &[&str]) -> Self {
        let regexes = sources
            .iter()
            .map(|source| {
                Regex::new(source)
                    .unwrap_or_else(|err| panic!("built-in {kind} pattern failed to compile: {err}"))
            })
            .collect();
        Self { kind, regexes }
    }

    /// The identity of this pattern.
    #[must_use]
    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    /// Returns `true` if every regex in the pattern matches `value`.
    #[must_use]
    pub fn is_match(&self, value: &str) -> bool {
        self.regexes.iter().all(|re| re.is_match(value))
    }

    /// The regex sources backing this pattern.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.regexes.iter().map(Regex::as_str)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("kind", &self.kind)
            .field("sources", &self.sources().collect::<Vec<_>>())
            .finish()
    }
}

/// Two patterns are equal when they have the same identity and sources.
impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.sources().eq(other.sources())
    }
}

impl Eq for Pattern {}

// ---------------------------------------------------------------------------
// Library
// ---------------------------------------------------------------------------

/// Email addresses: one `@`, no whitespace, a dot in the domain.
pub static EMAIL: LazyLock<Pattern> =
    LazyLock::new(|| Pattern::builtin(PatternKind::Email, &[EMAIL_SOURCE]));

/// Phone numbers: optional `+`, digits with spaces, dots, dashes or
/// parentheses, 7 to 20 characters, starting and ending on a digit.
pub static PHONE: LazyLock<Pattern> =
    LazyLock::new(|| Pattern::builtin(PatternKind::Phone, &[PHONE_SOURCE]));

/// `http://` or `https://` URLs with a non-empty host.
pub static URL: LazyLock<Pattern> =
    LazyLock::new(|| Pattern::builtin(PatternKind::Url, &[URL_SOURCE]));

/// At least 8 characters with a lowercase letter, an uppercase letter, a
/// digit, and one of [`PASSWORD_SYMBOLS`], using only those classes.
pub static STRONG_PASSWORD: LazyLock<Pattern> = LazyLock::new(|| {
    Pattern::builtin(PatternKind::StrongPassword, &STRONG_PASSWORD_SOURCES)
});

/// Look up a library pattern by kind. `Custom` has no library entry.
#[must_use]
pub fn library(kind: PatternKind) -> Option<&'static Pattern> {
    match kind {
        PatternKind::Email => Some(&*EMAIL),
        PatternKind::Phone => Some(&*PHONE),
        PatternKind::Url => Some(&*URL),
        PatternKind::StrongPassword => Some(&*STRONG_PASSWORD),
        PatternKind::Custom => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_valid() {
        assert!(EMAIL.is_match("user@example.com"));
        assert!(EMAIL.is_match("user.name+tag@example.co.uk"));
    }

    #[test]
    fn email_invalid() {
        assert!(!EMAIL.is_match("a"));
        assert!(!EMAIL.is_match("not-an-email"));
        assert!(!EMAIL.is_match("@example.com"));
        assert!(!EMAIL.is_match("user@example"));
        assert!(!EMAIL.is_match("user name@example.com"));
    }

    #[test]
    fn phone_valid() {
        assert!(PHONE.is_match("555-123-4567"));
        assert!(PHONE.is_match("+1 (555) 123-4567"));
        assert!(PHONE.is_match("(555) 123 4567"));
        assert!(PHONE.is_match("+447911123456"));
    }

    #[test]
    fn phone_invalid() {
        assert!(!PHONE.is_match("12345"));
        assert!(!PHONE.is_match("call me"));
        assert!(!PHONE.is_match("555-123-abcd"));
        assert!(!PHONE.is_match("555-123-4567-"));
    }

    #[test]
    fn url_valid() {
        assert!(URL.is_match("http://example.com"));
        assert!(URL.is_match("https://example.com/path?query=1"));
        assert!(URL.is_match("HTTPS://EXAMPLE.COM"));
    }

    #[test]
    fn url_invalid() {
        assert!(!URL.is_match("http://"));
        assert!(!URL.is_match("ftp://example.com"));
        assert!(!URL.is_match("example.com"));
        assert!(!URL.is_match("https://exa mple.com"));
    }

    #[test]
    fn strong_password_requires_every_class() {
        assert!(STRONG_PASSWORD.is_match("Passw0rd!"));
        assert!(!STRONG_PASSWORD.is_match("password1!")); // no uppercase
        assert!(!STRONG_PASSWORD.is_match("PASSWORD1!")); // no lowercase
        assert!(!STRONG_PASSWORD.is_match("Password!!")); // no digit
        assert!(!STRONG_PASSWORD.is_match("Password11")); // no symbol
        assert!(!STRONG_PASSWORD.is_match("Pa0!")); // too short
        assert!(!STRONG_PASSWORD.is_match("Passw0rd! ")); // disallowed char
    }

    #[test]
    fn library_kinds_round_trip() {
        for kind in [
            PatternKind::Email,
            PatternKind::Phone,
            PatternKind::Url,
            PatternKind::StrongPassword,
        ] {
            assert_eq!(library(kind).map(Pattern::kind), Some(kind));
        }
        assert!(library(PatternKind::Custom).is_none());
    }

    #[test]
    fn custom_pattern_is_custom_kind() {
        let zip = Pattern::new(r"^[0-9]{5}$").unwrap();
        assert_eq!(zip.kind(), PatternKind::Custom);
        assert!(zip.is_match("12345"));
        assert!(!zip.is_match("1234"));
    }

    #[test]
    fn custom_pattern_rejects_bad_regex() {
        assert!(Pattern::new("(unclosed").is_err());
    }

    #[test]
    fn custom_pattern_with_email_source_is_not_email() {
        let copy = Pattern::new(EMAIL_SOURCE).unwrap();
        assert_ne!(copy, *EMAIL);
        assert_eq!(copy.kind(), PatternKind::Custom);
    }
}
