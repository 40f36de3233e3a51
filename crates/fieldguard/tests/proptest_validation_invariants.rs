//! Property-based invariant tests for validation and sanitization.
//!
//! 1. Optional fields with blank input always pass.
//! 2. Required fields with blank input always report "is required".
//! 3. Sanitizing is idempotent.
//! 4. Form errors only name declared fields.
//! 5. Completion is 100 when nothing is required.
//! 6. Completion stays within 0..=100.
//! 7. Validation never produces an empty message.

use fieldguard::prelude::*;
use fieldguard::{sanitize_value, validate_field};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn blank_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec![' ', '\t', '\n', '\r']), 0..8)
        .prop_map(|chars| chars.into_iter().collect())
}

fn field_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z]{0,8}"
}

fn markup_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("<".to_string()),
            Just(">".to_string()),
            Just("<script>".to_string()),
            Just("</script>".to_string()),
            Just("<b>".to_string()),
            Just(" ".to_string()),
            "[a-z ]{0,5}",
        ],
        0..12,
    )
    .prop_map(|parts| parts.concat())
}

fn rule_strategy() -> impl Strategy<Value = ValidationRule> {
    (
        any::<bool>(),
        prop::option::of(0usize..6),
        prop::option::of(0usize..12),
        prop::option::of(prop::sample::select(vec![0u8, 1, 2, 3])),
        0u8..3,
    )
        .prop_map(|(required, min, max, pattern, custom)| {
            let mut rule = ValidationRule::new();
            rule.required = required;
            rule.min_length = min;
            rule.max_length = max;
            rule.pattern = pattern.map(|p| match p {
                0 => EMAIL.clone(),
                1 => PHONE.clone(),
                2 => URL.clone(),
                _ => STRONG_PASSWORD.clone(),
            });
            match custom {
                1 => rule = rule.custom(|v| v.contains('x').then(|| "no x allowed".to_string())),
                2 => rule = rule.custom(|v| v.contains('x').then(String::new)),
                _ => {}
            }
            rule
        })
}

fn form_strategy() -> impl Strategy<Value = (RuleSet, FormValues)> {
    (
        prop::collection::btree_map(field_name_strategy(), rule_strategy(), 0..6),
        prop::collection::btree_map(field_name_strategy(), "[ a-z@.x]{0,12}", 0..8),
    )
        .prop_map(|(rules, values)| (rules.into_iter().collect(), values))
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Blank input
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn optional_blank_always_passes(rule in rule_strategy(), blank in blank_strategy()) {
        let mut rule = rule;
        rule.required = false;
        prop_assert_eq!(validate_field(&blank, &rule, "Field"), None);
    }

    #[test]
    fn required_blank_always_required(rule in rule_strategy(), blank in blank_strategy()) {
        let mut rule = rule;
        rule.required = true;
        let result = validate_field(&blank, &rule, "Field");
        prop_assert_eq!(
            result.as_deref(),
            Some("Field is required")
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Sanitizer idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn sanitize_is_idempotent(input in markup_strategy()) {
        let once = sanitize_value(&input);
        prop_assert_eq!(sanitize_value(&once), once.clone(), "input: {:?}", input);
    }

    #[test]
    fn sanitize_form_is_idempotent(values in prop::collection::btree_map(field_name_strategy(), markup_strategy(), 0..6)) {
        let once = sanitize_form_data(&values);
        prop_assert_eq!(sanitize_form_data(&once), once.clone());
        prop_assert_eq!(once.len(), values.len());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4-7. Form-level invariants
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn errors_are_subset_of_rules((rules, values) in form_strategy()) {
        let errors = validate_form(&values, &rules);
        for field in errors.fields() {
            prop_assert!(rules.contains(field), "undeclared field {:?} in errors", field);
        }
        prop_assert_eq!(errors.is_empty(), is_form_valid(&values, &rules));
    }

    #[test]
    fn completion_full_without_required((rules, values) in form_strategy()) {
        let optional: RuleSet = rules
            .iter()
            .map(|(name, rule)| {
                let mut rule = rule.clone();
                rule.required = false;
                (name.to_string(), rule)
            })
            .collect();
        prop_assert_eq!(form_completion_percentage(&values, &optional), 100);
    }

    #[test]
    fn completion_in_range((rules, values) in form_strategy()) {
        prop_assert!(form_completion_percentage(&values, &rules) <= 100);
    }

    #[test]
    fn messages_are_never_empty((rules, values) in form_strategy()) {
        for (_, message) in validate_form(&values, &rules).iter() {
            prop_assert!(!message.is_empty());
        }
    }
}
