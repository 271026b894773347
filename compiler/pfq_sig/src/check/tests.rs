use pretty_assertions::assert_eq;

use super::*;

fn ok(text: &str) -> bool {
    check(Signature::new(text))
}

fn detail(text: &str) -> Result<(), CheckError> {
    check_detailed(Signature::new(text))
}

// === Accepted ===

#[test]
fn accepts_base_types() {
    for text in ["", "   ", "CInt", "a", "SkBuff", "  Bool  "] {
        assert!(ok(text), "input: {text:?}");
    }
}

#[test]
fn accepts_extents() {
    for text in ["[CInt]", "[  CInt   ]", "[a]", "[[a]]", "[CInt -> Bool]"] {
        assert!(ok(text), "input: {text:?}");
    }
}

#[test]
fn accepts_arrows() {
    for text in [
        "CInt -> CInt ",
        "CInt->CInt",
        "(CInt -> CInt ) -> Bool",
        "CInt -> (String) -> ((Maybe   SkBuff )) -> (Action SkBuff)  ",
        "CInt -> (Maybe   SkBuff -> (Action SkBuff )  )  ",
    ] {
        assert!(ok(text), "input: {text:?}");
    }
}

#[test]
fn accepts_constructor_applications() {
    for text in [
        "Action CInt",
        "Action a",
        "Action [CInt]",
        "Action [a]",
        "Action SkBuff",
        "Maybe(CInt)",
        "Maybe Maybe CInt",
        "Action (Maybe SkBuff)",
        "Maybe SkBuff -> Action SkBuff",
    ] {
        assert!(ok(text), "input: {text:?}");
    }
}

#[test]
fn bare_constructor_is_an_identifier() {
    assert!(ok("Maybe"));
    assert!(ok("Action -> CInt"));
}

// === Rejected ===

#[test]
fn rejects_unbalanced() {
    assert_eq!(
        detail("(Action SkBuff"),
        Err(CheckError::Unclosed {
            offset: 0,
            open: '('
        })
    );
    assert_eq!(
        detail("CInt)"),
        Err(CheckError::TrailingInput { offset: 4 })
    );
    assert!(!ok("[CInt"));
}

#[test]
fn rejects_mismatched_bracket_kinds() {
    assert_eq!(
        detail("(CInt]"),
        Err(CheckError::UnexpectedChar {
            offset: 5,
            found: ']'
        })
    );
}

#[test]
fn rejects_juxtaposed_identifiers() {
    assert_eq!(
        detail("CInt Bool"),
        Err(CheckError::TrailingInput { offset: 5 })
    );
    assert!(!ok("(a b)"));
    assert!(!ok("List CInt"));
}

#[test]
fn rejects_stray_operators() {
    assert_eq!(
        detail("   CInt - Error"),
        Err(CheckError::TrailingInput { offset: 8 })
    );
    assert_eq!(
        detail("-> CInt"),
        Err(CheckError::UnexpectedChar {
            offset: 0,
            found: '-'
        })
    );
    assert!(!ok("CInt => Bool"));
}

#[test]
fn rejects_missing_operands() {
    assert_eq!(detail("CInt ->"), Err(CheckError::UnexpectedEnd));
    assert_eq!(
        detail("()"),
        Err(CheckError::UnexpectedChar {
            offset: 1,
            found: ')'
        })
    );
    assert!(!ok("[]"));
    assert!(!ok("CInt -> -> Bool"));
}

#[test]
fn offsets_are_relative_to_the_view() {
    let text = "xx (a b) xx";
    let sig = Signature::new(text).slice(3..8);
    assert_eq!(
        check_detailed(sig),
        Err(CheckError::UnexpectedChar {
            offset: 3,
            found: 'b'
        })
    );
}

// === Constructor sets ===

#[test]
fn custom_constructor_set() {
    let names = ["List"];
    let set = ConstructorSet::new(&names);
    assert!(check_with(Signature::new("List CInt"), &set));
    assert!(!check_with(Signature::new("Maybe CInt"), &set));
    assert!(!ok("List CInt"));
}

#[test]
fn structure_check_applies_any_identifier() {
    assert!(check_structure(Signature::new("List CInt")));
    assert!(check_structure(Signature::new("a b -> c")));
    assert!(check_structure(Signature::new("Maybe -> CInt")));
    assert!(!check_structure(Signature::new("(a b")));
    assert!(!check_structure(Signature::new("a -> -> b")));
}

#[test]
fn check_error_display() {
    assert_eq!(
        CheckError::TrailingInput { offset: 5 }.to_string(),
        "trailing input at offset 5 after a complete type"
    );
    assert_eq!(
        CheckError::Unclosed {
            offset: 0,
            open: '['
        }
        .to_string(),
        "`[` at offset 0 is never closed"
    );
}

// === Stack safety ===

#[test]
fn deep_nesting_terminates() {
    let depth = 100_000;
    let deep = format!("{}CInt{}", "(".repeat(depth), ")".repeat(depth));
    assert!(ok(&deep));
    let unclosed = format!("{}CInt{}", "[".repeat(depth), "]".repeat(depth - 1));
    assert!(!ok(&unclosed));
}

#[test]
fn long_arrow_chains() {
    let chain = vec!["CInt"; 50_000].join(" -> ");
    assert!(ok(&chain));
}
