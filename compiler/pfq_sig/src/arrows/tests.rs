use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

fn arity_of(text: &str) -> Option<usize> {
    arity(Signature::new(text))
}

fn segment_texts(text: &str) -> Vec<&str> {
    segments(Signature::new(text)).map(|s| s.as_str()).collect()
}

// === Arity ===

#[test]
fn arity_undefined_for_empty() {
    assert_eq!(arity_of(""), None);
    assert_eq!(arity_of("   "), None);
    assert_eq!(arity_of("()"), None);
    assert_eq!(arity_of("( ( ) )"), None);
}

#[test]
fn arity_zero_for_plain_types() {
    assert_eq!(arity_of("  CInt"), Some(0));
    assert_eq!(arity_of("   CInt - Error"), Some(0));
    assert_eq!(arity_of("(CInt)"), Some(0));
    assert_eq!(arity_of("(CInt - Error)"), Some(0));
    assert_eq!(arity_of("(    Action SkBuff )"), Some(0));
    assert_eq!(arity_of("a"), Some(0));
}

#[test]
fn arity_counts_top_level_arrows() {
    assert_eq!(arity_of("  CInt -> Bool   "), Some(1));
    assert_eq!(arity_of("    CInt -> ( CInt-> CShort ) -> SkBuff"), Some(2));
    assert_eq!(arity_of("(CInt -> Bool)   "), Some(1));
    assert_eq!(arity_of("(CInt -> ( CInt-> CShort ) -> SkBuff)    "), Some(2));
    assert_eq!(arity_of("(Int -> (CInt-> CShort) ) -> SkBuff  "), Some(1));
    assert_eq!(arity_of("  ((CInt -> ( CInt-> CShort )) -> CInt -> SkBuff)"), Some(2));
    assert_eq!(
        arity_of("(  ((CInt -> ( CInt-> CShort )) -> CInt -> SkBuff) )"),
        Some(2)
    );
    assert_eq!(
        arity_of("(    CInt -> ( CInt-> CShort ) -> SkBuff -> Action SkBuff )"),
        Some(3)
    );
    assert_eq!(
        arity_of("CInt -> (String) -> ((Maybe   SkBuff )) -> (Action SkBuff)  "),
        Some(3)
    );
}

#[test]
fn arity_follows_wrapped_result_arrow() {
    assert_eq!(
        arity_of("CInt -> (Maybe   SkBuff -> (Action SkBuff )  )  "),
        Some(2)
    );
    assert_eq!(arity_of("a -> ((b -> (c -> d)))"), Some(3));
}

#[test]
fn arity_undefined_for_unbalanced() {
    assert_eq!(arity_of("(Action SkBuff"), None);
    assert_eq!(arity_of("a) -> b"), None);
}

#[test]
fn arrows_inside_extents_are_nested() {
    assert_eq!(arity_of("[a -> b] -> c"), Some(1));
    assert_eq!(arity_of("[a -> b]"), Some(0));
}

// === is_function ===

#[test]
fn is_function_table() {
    let cases = [
        ("", false),
        ("  CInt", false),
        ("   CInt - Error", false),
        ("  CInt -> Bool   ", true),
        ("()", false),
        ("(CInt)", false),
        ("(CInt -> Bool)   ", true),
        ("(Int -> (CInt-> CShort) ) -> SkBuff  ", true),
        ("(    Action SkBuff )", false),
        ("CInt -> (Maybe   SkBuff -> (Action SkBuff )  )  ", true),
    ];
    for (text, expected) in cases {
        assert_eq!(is_function(Signature::new(text)), expected, "input: {text:?}");
    }
}

// === Segments ===

#[test]
fn segments_of_function() {
    assert_eq!(
        segment_texts("CInt -> (String) -> ((Maybe   SkBuff )) -> (Action SkBuff)  "),
        vec!["CInt", "(String)", "((Maybe   SkBuff ))", "(Action SkBuff)"]
    );
}

#[test]
fn segments_keep_nested_arrow_parameters_whole() {
    assert_eq!(
        segment_texts("(Int -> (CInt-> CShort) ) -> SkBuff"),
        vec!["(Int -> (CInt-> CShort) )", "SkBuff"]
    );
}

#[test]
fn segments_flatten_wrapped_result() {
    assert_eq!(
        segment_texts("CInt -> (Maybe   SkBuff -> (Action SkBuff )  )  "),
        vec!["CInt", "Maybe   SkBuff", "(Action SkBuff )"]
    );
}

#[test]
fn segments_of_plain_type_is_canonical_self() {
    assert_eq!(segment_texts("  ((Action SkBuff))  "), vec!["Action SkBuff"]);
}

#[test]
fn segments_of_empty_is_nothing() {
    assert!(segment_texts("").is_empty());
    assert!(segment_texts("()").is_empty());
    assert!(segment_texts("(a").is_empty());
}

#[test]
fn segments_tolerate_missing_operands() {
    assert_eq!(segment_texts("CInt ->"), vec!["CInt", ""]);
}

#[test]
fn segment_tails_are_residual_signatures() {
    let mut iter = segments(Signature::new("a -> (b -> (c))"));
    let tails: Vec<(&str, &str)> = std::iter::from_fn(|| iter.next_segment())
        .map(|s| (s.ty.as_str(), s.tail.as_str()))
        .collect();
    assert_eq!(
        tails,
        vec![("a", "a -> (b -> (c))"), ("b", "b -> (c)"), ("(c)", "(c)")]
    );
}

#[test]
fn segments_are_fused() {
    let mut iter = segments(Signature::new("a -> b"));
    assert_eq!(iter.by_ref().count(), 2);
    assert!(iter.next().is_none());
}

// === Reading from the back ===

fn front_segments(text: &str) -> Vec<(&str, &str)> {
    let mut iter = segments(Signature::new(text));
    std::iter::from_fn(|| iter.next_segment())
        .map(|s| (s.ty.as_str(), s.tail.as_str()))
        .collect()
}

fn back_segments(text: &str) -> Vec<(&str, &str)> {
    let mut iter = segments(Signature::new(text));
    let mut read: Vec<_> = std::iter::from_fn(|| iter.next_back_segment())
        .map(|s| (s.ty.as_str(), s.tail.as_str()))
        .collect();
    read.reverse();
    read
}

#[test]
fn segments_reversed() {
    let texts: Vec<&str> = segments(Signature::new(
        "CInt -> (Maybe   SkBuff -> (Action SkBuff )  )  ",
    ))
    .rev()
    .map(|s| s.as_str())
    .collect();
    assert_eq!(texts, vec!["(Action SkBuff )", "Maybe   SkBuff", "CInt"]);
}

#[test]
fn segments_from_both_ends_meet() {
    let mut iter = segments(Signature::new("a -> b -> c -> d"));
    assert_eq!(iter.len(), 4);
    assert_eq!(iter.next().map(|s| s.as_str()), Some("a"));
    assert_eq!(iter.next_back().map(|s| s.as_str()), Some("d"));
    assert_eq!(iter.len(), 2);
    assert_eq!(iter.next_back().map(|s| s.as_str()), Some("c"));
    assert_eq!(iter.next().map(|s| s.as_str()), Some("b"));
    assert!(iter.next().is_none());
    assert!(iter.next_back().is_none());
}

#[test]
fn back_tails_match_front_tails() {
    for text in [
        "a -> (b -> (c))",
        "a -> ((b -> (c -> d)))",
        "CInt -> (String) -> ((Maybe   SkBuff )) -> (Action SkBuff)  ",
        "(Int -> (CInt-> CShort) ) -> SkBuff",
        "a -> ( (b) -> c )",
        "a -> (b ->)",
        "-> a",
        "a -> ( )",
        "a -> [b -> (c -> d)]",
        "Maybe (a -> b)",
        "a -> Maybe (b -> c)",
        "x -->-> y",
    ] {
        assert_eq!(back_segments(text), front_segments(text), "input: {text:?}");
    }
}

#[test]
fn spliced_layers_table() {
    let cases = [
        ("a -> (b -> c)", 1),
        ("a -> ((b -> c))", 2),
        ("a -> (b)", 0),
        ("a -> ((b -> (c -> d)))", 3),
        ("Maybe (a -> b)", 0),
        ("a -> [b -> c]", 0),
        ("a -> (b -> c) -> d", 0),
        ("a -> (b -> (c))", 1),
    ];
    for (text, expected) in cases {
        assert_eq!(spliced_layers(text.as_bytes()), expected, "input: {text:?}");
    }
}

proptest! {
    #[test]
    fn back_agrees_with_front(text in "[-()\\[\\] a-c>]{0,24}") {
        prop_assert_eq!(back_segments(&text), front_segments(&text));
    }
}

// === Long inputs ===

fn right_spine(n: usize) -> String {
    format!("{}CInt{}", "CInt -> (".repeat(n), ")".repeat(n))
}

#[test]
fn arity_of_deep_right_spine() {
    let n = 100_000;
    assert_eq!(arity_of(&right_spine(n)), Some(n));
}

#[test]
fn arity_of_deep_result_without_arrows() {
    let n = 100_000;
    let wrapped = format!("CInt -> {}CInt{}", "(".repeat(n), ")".repeat(n));
    assert_eq!(arity_of(&wrapped), Some(1));
    let applied = format!("{}CInt{}", "CInt -> Maybe (".repeat(n), ")".repeat(n));
    assert_eq!(arity_of(&applied), Some(1));
}

#[test]
fn arity_of_long_flat_chain() {
    let chain = vec!["CInt"; 100_000].join(" -> ");
    assert_eq!(arity_of(&chain), Some(99_999));
}
