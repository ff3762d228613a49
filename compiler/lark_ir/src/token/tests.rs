use pretty_assertions::assert_eq;

use super::TokenKind;

#[test]
fn keywords_round_trip_through_fixed_text() {
    for text in ["let", "pub", "sync", "on", "event", "fn", "send", "null"] {
        let kind = TokenKind::keyword(text).unwrap();
        assert_eq!(kind.fixed_text(), Some(text));
    }
}

#[test]
fn non_keywords_are_none() {
    assert_eq!(TokenKind::keyword("score"), None);
    assert_eq!(TokenKind::keyword("Let"), None);
}

#[test]
fn discriminant_indices_are_unique() {
    let kinds = [
        TokenKind::Int(0),
        TokenKind::Float(0),
        TokenKind::Str(String::new()),
        TokenKind::Ident(String::new()),
        TokenKind::Let,
        TokenKind::Eof,
        TokenKind::Error,
        TokenKind::OrOr,
    ];
    let mut seen = std::collections::HashSet::new();
    for kind in &kinds {
        assert!(seen.insert(kind.discriminant_index()), "duplicate index");
    }
}

#[test]
fn same_kind_ignores_payload() {
    assert!(TokenKind::Int(1).same_kind(&TokenKind::Int(99)));
    assert!(!TokenKind::Int(1).same_kind(&TokenKind::Float(0)));
}

#[test]
fn float_bits_round_trip() {
    let kind = TokenKind::float(3.25);
    match kind {
        TokenKind::Float(bits) => assert_eq!(TokenKind::float_value(bits), 3.25),
        other => panic!("expected float token, got {other:?}"),
    }
}
