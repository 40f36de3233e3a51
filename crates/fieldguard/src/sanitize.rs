#![forbid(unsafe_code)]

//! Best-effort markup stripping for submitted values.
//!
//! This is a cosmetic filter, not a security boundary. It removes
//! `<script>...</script>` blocks and anything shaped like a tag, using
//! regexes rather than an HTML parser. Entity-encoded markup, unterminated
//! tags, and attribute tricks are not handled. Escape output at render time.
//!
//! Per value:
//!
//! 1. trim
//! 2. remove script blocks (case-insensitive, shortest match, across lines)
//! 3. remove remaining `<...>` tags
//! 4. trim again, so that sanitizing twice changes nothing

use std::sync::LazyLock;

use regex::Regex;

use crate::form::FormValues;

static SCRIPT_BLOCK: LazyLock<Regex> = LazyLock::new(|| compile(r"(?is)<script\b[^>]*>.*?</script\s*>"));
static TAG: LazyLock<Regex> = LazyLock::new(|| compile(r"<[^>]*>"));

fn compile(source: &str) -> Regex {
    Regex::new(source).unwrap_or_else(|err| panic!("sanitizer regex failed to compile: {err}"))
}

/// Sanitize a single value.
///
/// ```rust
/// use fieldguard::sanitize::sanitize_value;
///
/// assert_eq!(sanitize_value("  Hi <b>there</b>  "), "Hi there");
/// assert_eq!(sanitize_value("a<script>alert(1)</script>b"), "ab");
/// ```
#[must_use]
pub fn sanitize_value(value: &str) -> String {
    let without_scripts = SCRIPT_BLOCK.replace_all(value.trim(), "");
    let without_tags = TAG.replace_all(&without_scripts, "");
    without_tags.trim().to_string()
}

/// Sanitize every value in `values`, returning a new map.
///
/// Keys are kept as-is, including fields no rule mentions.
#[must_use]
pub fn sanitize_form_data(values: &FormValues) -> FormValues {
    values
        .iter()
        .map(|(name, value)| (name.clone(), sanitize_value(value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_plain_text() {
        assert_eq!(sanitize_value("  hello  "), "hello");
        assert_eq!(sanitize_value("no markup"), "no markup");
    }

    #[test]
    fn strips_script_block_with_contents() {
        assert_eq!(
            sanitize_value("before<script>document.cookie</script>after"),
            "beforeafter"
        );
    }

    #[test]
    fn script_match_is_case_insensitive_and_multiline() {
        assert_eq!(
            sanitize_value("x<SCRIPT type=\"text/javascript\">\nevil()\n</ScRiPt>y"),
            "xy"
        );
    }

    #[test]
    fn script_match_is_non_greedy() {
        assert_eq!(
            sanitize_value("<script>a</script>keep<script>b</script>"),
            "keep"
        );
    }

    #[test]
    fn strips_bare_tags_but_keeps_inner_text() {
        assert_eq!(sanitize_value("<p>Hello <em>world</em></p>"), "Hello world");
        assert_eq!(sanitize_value("<img src=x onerror=alert(1)>"), "");
    }

    #[test]
    fn unterminated_tag_is_left_alone() {
        assert_eq!(sanitize_value("a < b"), "a < b");
    }

    #[test]
    fn trailing_space_left_by_tag_removal_is_trimmed() {
        assert_eq!(sanitize_value("a <br>"), "a");
    }

    #[test]
    fn nested_tag_fragments_do_not_reassemble() {
        let once = sanitize_value("<<b>script>alert(1)<</b>/script>");
        assert_eq!(sanitize_value(&once), once);
        assert!(!once.contains("<script>"));
    }

    #[test]
    fn form_data_keeps_all_keys() {
        let mut values = FormValues::new();
        values.insert("name".into(), "  <b>Ada</b> ".into());
        values.insert("_subject".into(), "New message".into());
        let clean = sanitize_form_data(&values);
        assert_eq!(clean.get("name").map(String::as_str), Some("Ada"));
        assert_eq!(clean.get("_subject").map(String::as_str), Some("New message"));
        assert_eq!(values.get("name").map(String::as_str), Some("  <b>Ada</b> "));
    }
}
