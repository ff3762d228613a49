//! Crash-freedom fuzzing.
//!
//! The compiler must terminate with a result or diagnostics on any
//! input; a panic is always an implementation defect. Inputs are random
//! mixtures of real token spellings, so they reach well past the lexer.

use lark_catalog::BuiltinCatalog;
use lark_ir::FileId;
use proptest::prelude::*;

/// Spellings drawn from the real grammar plus a few hostile ones.
const VOCAB: &[&str] = &[
    "let", "pub", "sync", "linear", "smooth", "fn", "on", "event", "send", "if", "else", "while",
    "for", "in", "return", "break", "continue", "true", "false", "null", "int", "float", "bool",
    "string", "object", "Start", "Update", "InputJump", "Vector3", "Mathf", "transform", "log",
    "this", "x", "y", "speed", "i", "=", "+=", "-=", "==", "!=", "<", "<=", "+", "-", "*", "/",
    "%", "!", "&&", "||", "..", ".", ",", ":", "->", "(", ")", "[", "]", "{", "}", "0", "1", "42",
    "3.5", "1e9", "\"hi\"", "\"{x}\"", "\"unterminated", "/*", "*/", "//", "@", "\u{1F980}",
];

fn plausible_source() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(VOCAB), 0..120)
        .prop_map(|words| words.join(" "))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn pipeline_never_panics_on_plausible_input(source in plausible_source()) {
        let catalog = BuiltinCatalog::new();
        let _ = larkc::compile(&source, FileId(0), &catalog);
    }

    #[test]
    fn pipeline_never_panics_on_arbitrary_bytes(source in "\\PC{0,200}") {
        let catalog = BuiltinCatalog::new();
        let _ = larkc::compile(&source, FileId(0), &catalog);
    }
}
