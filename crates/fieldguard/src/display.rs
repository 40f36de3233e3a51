#![forbid(unsafe_code)]

//! Human-facing text helpers.

/// Turn an identifier-style field key into a label.
///
/// A space is inserted before every uppercase letter after the first
/// character, and the first character is uppercased.
///
/// ```rust
/// use fieldguard::display::display_name;
///
/// assert_eq!(display_name("phoneNumber"), "Phone Number");
/// assert_eq!(display_name("email"), "Email");
/// ```
#[must_use]
pub fn display_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 4);
    for (i, ch) in field.chars().enumerate() {
        if i == 0 {
            out.extend(ch.to_uppercase());
        } else {
            if ch.is_uppercase() {
                out.push(' ');
            }
            out.push(ch);
        }
    }
    out
}

/// Normalize a message for display.
///
/// Trims, uppercases the first character, and appends a period unless the
/// message already ends in `.`, `!` or `?`. Validators never call this;
/// callers opt in. Blank input stays empty.
#[must_use]
pub fn format_error_message(message: &str) -> String {
    let trimmed = message.trim();
    let mut chars = trimmed.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut out = String::with_capacity(trimmed.len() + 1);
    out.extend(first.to_uppercase());
    out.push_str(chars.as_str());
    if !out.ends_with(['.', '!', '?']) {
        out.push('.');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_splits_camel_case() {
        assert_eq!(display_name("phoneNumber"), "Phone Number");
        assert_eq!(display_name("firstName"), "First Name");
        assert_eq!(display_name("preferredContactTime"), "Preferred Contact Time");
    }

    #[test]
    fn display_name_single_word() {
        assert_eq!(display_name("message"), "Message");
        assert_eq!(display_name("Message"), "Message");
    }

    #[test]
    fn display_name_leading_capital_gets_no_space() {
        assert_eq!(display_name("EmailAddress"), "Email Address");
    }

    #[test]
    fn display_name_acronym_splits_each_letter() {
        assert_eq!(display_name("homeURL"), "Home U R L");
    }

    #[test]
    fn display_name_empty() {
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn display_name_keeps_underscores() {
        assert_eq!(display_name("first_name"), "First_name");
    }

    #[test]
    fn format_error_message_normalizes() {
        assert_eq!(format_error_message("email is required"), "Email is required.");
        assert_eq!(format_error_message("  too short  "), "Too short.");
    }

    #[test]
    fn format_error_message_keeps_terminal_punctuation() {
        assert_eq!(format_error_message("Already done."), "Already done.");
        assert_eq!(format_error_message("really?"), "Really?");
        assert_eq!(format_error_message("stop!"), "Stop!");
    }

    #[test]
    fn format_error_message_blank() {
        assert_eq!(format_error_message("   "), "");
    }
}
