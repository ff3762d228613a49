use lark_ir::TokenKind;

use super::{TokenSet, DECL_START, STMT_START};

#[test]
fn membership_ignores_payload() {
    let set = TokenSet::new().with(&TokenKind::Ident(String::new()));
    assert!(set.contains(&TokenKind::Ident("anything".into())));
    assert!(!set.contains(&TokenKind::Int(0)));
}

#[test]
fn union_combines() {
    let a = TokenSet::new().with(&TokenKind::Let);
    let b = TokenSet::new().with(&TokenKind::Fn);
    let both = a.union(b);
    assert!(both.contains(&TokenKind::Let));
    assert!(both.contains(&TokenKind::Fn));
    assert!(!both.contains(&TokenKind::On));
}

#[test]
fn decl_start_covers_every_declaration_keyword() {
    for kind in [
        TokenKind::Let,
        TokenKind::Pub,
        TokenKind::Sync,
        TokenKind::Fn,
        TokenKind::On,
        TokenKind::Event,
        TokenKind::Eof,
    ] {
        assert!(DECL_START.contains(&kind), "{kind:?} missing");
    }
    assert!(!DECL_START.contains(&TokenKind::If));
}

#[test]
fn stmt_start_includes_block_close_and_newline() {
    assert!(STMT_START.contains(&TokenKind::RBrace));
    assert!(STMT_START.contains(&TokenKind::Newline));
    assert!(STMT_START.contains(&TokenKind::Eof));
}

#[test]
fn empty_set() {
    assert!(TokenSet::new().is_empty());
    assert!(!DECL_START.is_empty());
}
