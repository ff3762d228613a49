use pretty_assertions::assert_eq;

use super::{ErrorCode, ALL_CODES};

#[test]
fn parse_round_trips() {
    for code in ALL_CODES {
        assert_eq!(ErrorCode::parse(code.as_str()), Some(*code));
    }
    assert_eq!(ErrorCode::parse("E9999"), None);
    assert_eq!(ErrorCode::parse("e1001"), None);
}

#[test]
fn every_code_has_an_explanation() {
    for code in ALL_CODES {
        assert!(
            !code.explanation().is_empty(),
            "{code} is missing an explanation"
        );
    }
}

#[test]
fn codes_are_banded_by_phase() {
    // Spot-check the band prefixes the documentation promises.
    assert!(ErrorCode::E0002.as_str().starts_with("E0")); // lexical
    assert!(ErrorCode::E1001.as_str().starts_with("E1")); // syntactic
    assert!(ErrorCode::E3001.as_str().starts_with("E3")); // scope
    assert!(ErrorCode::E4001.as_str().starts_with("E4")); // constraint
    assert!(ErrorCode::E5002.as_str().starts_with("E5")); // overload
    assert!(ErrorCode::E6001.as_str().starts_with("E6")); // sync
}
