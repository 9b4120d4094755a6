use pdf_batch::*;
use proptest::prelude::*;

#[test]
fn test_slugify_empty_is_placeholder() {
    assert_eq!(slugify(""), PLACEHOLDER_NAME);
    assert_eq!(slugify(PLACEHOLDER_NAME), PLACEHOLDER_NAME);
}

#[test]
fn test_resolve_prefers_explicit_name() {
    assert_eq!(
        resolve_file_name("Coinbase Customer Service", Some("coinbase"), 0),
        "coinbase"
    );
    assert_eq!(
        resolve_file_name("Coinbase Customer Service", None, 0),
        "coinbase-customer-service"
    );
}

#[test]
fn proptest_slugify_is_idempotent() {
    proptest!(|(text in "\\PC{0,60}")| {
        let once = slugify(&text);
        prop_assert_eq!(slugify(&once), once);
    });
}

#[test]
fn proptest_slug_charset() {
    proptest!(|(text in "\\PC{0,60}")| {
        let slug = slugify(&text);
        prop_assert!(!slug.is_empty());
        prop_assert!(!slug.starts_with('-') && !slug.ends_with('-'));
        prop_assert!(!slug.contains("--"));
        prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    });
}

#[test]
fn proptest_resolution_is_deterministic() {
    proptest!(|(title in "\\PC{0,40}", explicit in proptest::option::of("[a-zA-Z0-9 ._/-]{0,20}"), index in 0usize..100)| {
        let first = resolve_file_name(&title, explicit.as_deref(), index);
        let second = resolve_file_name(&title, explicit.as_deref(), index);
        prop_assert_eq!(first, second);
    });
}
