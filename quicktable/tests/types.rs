//! Type registry: default comparator contract, definition merging, built-in
//! types.

use std::cmp::Ordering;

use quicktable::filter::{FilterOptions, FilterPattern};
use quicktable::types::default_compare;
use quicktable::{TypeDefinition, TypeRegistry, Value};

// ============================================================================
// Default comparator
// ============================================================================

#[test]
fn test_default_compare_nil_handling() {
    assert_eq!(default_compare(&Value::Null, &Value::Null), Ordering::Equal);
    // nil sorts after non-nil
    assert_eq!(
        default_compare(&Value::Null, &Value::from("x")),
        Ordering::Greater
    );
    assert_eq!(
        default_compare(&Value::from("x"), &Value::Null),
        Ordering::Less
    );
}

#[test]
fn test_default_compare_strings() {
    assert_eq!(
        default_compare(&Value::from("a"), &Value::from("b")),
        Ordering::Less
    );
}

#[test]
fn test_default_compare_bool_stringification() {
    assert_eq!(
        default_compare(&Value::Bool(true), &Value::from("true")),
        Ordering::Equal
    );
    assert_eq!(
        default_compare(&Value::Bool(false), &Value::from("false")),
        Ordering::Equal
    );
}

#[test]
fn test_default_compare_numbers_numeric() {
    assert_eq!(
        default_compare(&Value::Int(9), &Value::Int(10)),
        Ordering::Less
    );
    // strings stay lexical
    assert_eq!(
        default_compare(&Value::from("10"), &Value::from("9")),
        Ordering::Less
    );
}

// ============================================================================
// Registry semantics
// ============================================================================

#[test]
fn test_unknown_type_falls_back_to_default() {
    let registry = TypeRegistry::new();
    assert_eq!(
        registry.compare(Some("no-such-type"), &Value::from("a"), &Value::from("b")),
        Ordering::Less
    );
    assert_eq!(
        registry.compare(None, &Value::Null, &Value::Null),
        Ordering::Equal
    );
}

#[test]
fn test_define_type_merges_slot_by_slot() {
    let registry = TypeRegistry::new();
    registry.define_type(
        "score",
        TypeDefinition::new().compare(|a, b| a.display().len().cmp(&b.display().len())),
    );
    // a later partial definition adds render without losing compare
    registry.define_type("score", TypeDefinition::new().render(|v| format!("<{}>", v.display())));

    let def = registry.get("score").unwrap();
    assert!(def.compare.is_some());
    assert!(def.render.is_some());

    assert_eq!(
        registry.compare(Some("score"), &Value::from("aaa"), &Value::from("bb")),
        Ordering::Greater
    );
    assert_eq!(registry.render(Some("score"), &Value::from("x")), "<x>");
}

#[test]
fn test_pre_sort_without_compare_uses_default_over_transformed() {
    let registry = TypeRegistry::new();
    // the number built-in only defines pre_sort
    assert_eq!(
        registry.compare(Some("number"), &Value::from("9"), &Value::from("10")),
        Ordering::Less
    );
    // unparseable input becomes nil and sorts last
    assert_eq!(
        registry.compare(Some("number"), &Value::from("abc"), &Value::from("1")),
        Ordering::Greater
    );
}

#[test]
fn test_date_type_compares_instants() {
    let registry = TypeRegistry::new();
    assert_eq!(
        registry.compare(
            Some("date"),
            &Value::from("2024-02-01"),
            &Value::from("2024-01-31"),
        ),
        Ordering::Greater
    );
    assert_eq!(
        registry.compare(
            Some("date"),
            &Value::from("2024-01-31T10:00:00Z"),
            &Value::from("2024-01-31T12:00:00+01:00"),
        ),
        Ordering::Less
    );
}

#[test]
fn test_html_type_sorts_on_visible_text() {
    let registry = TypeRegistry::new();
    assert_eq!(
        registry.compare(
            Some("html"),
            &Value::from("<b>apple</b>"),
            &Value::from("<i>banana</i>"),
        ),
        Ordering::Less
    );
}

#[test]
fn test_html_number_chains_strip_and_parse() {
    let registry = TypeRegistry::new();
    assert_eq!(
        registry.compare(
            Some("html-number"),
            &Value::from("<span>9</span>"),
            &Value::from("<span>10</span>"),
        ),
        Ordering::Less
    );
}

#[test]
fn test_render_falls_back_to_display() {
    let registry = TypeRegistry::new();
    assert_eq!(registry.render(None, &Value::Int(5)), "5");
    assert_eq!(registry.render(Some("string"), &Value::from("hi")), "hi");
    assert_eq!(registry.render(None, &Value::Null), "");
}

#[test]
fn test_matches_applies_pre_filter() {
    let registry = TypeRegistry::new();
    let pattern = FilterPattern::compile("apple", FilterOptions::default()).unwrap();
    // the html type strips markup before matching, so a pattern never
    // matches tag names
    assert!(registry.matches(Some("html"), &pattern, &Value::from("<b>Apple</b> pie")));
    let tag = FilterPattern::compile("span", FilterOptions::default()).unwrap();
    assert!(!registry.matches(Some("html"), &tag, &Value::from("<span>plum</span>")));
    assert!(registry.matches(None, &tag, &Value::from("<span>plum</span>")));
}
