use lark_catalog::BuiltinCatalog;
use lark_ir::FileId;

use crate::compile;
use crate::reporting::{render, render_all};

#[test]
fn renders_header_location_and_carets() {
    let source = "let speed: float = 1.0\non Start { sped = 2.0 }";
    let catalog = BuiltinCatalog::new();
    let output = compile(source, FileId(0), &catalog);
    let diag = output
        .diagnostics
        .iter()
        .find(|d| d.code.as_str() == "E3001")
        .expect("expected an unknown-identifier error");

    let text = render(diag, "player.lark", source);
    assert!(text.starts_with("error[E3001]:"));
    assert!(text.contains("player.lark:2:12"));
    assert!(text.contains("on Start { sped = 2.0 }"));
    assert!(text.contains("^^^^"));
    assert!(text.contains("= help:"));
}

#[test]
fn renders_every_diagnostic_in_the_run() {
    let source = "on Start { a = 1\nb = 2 }";
    let catalog = BuiltinCatalog::new();
    let output = compile(source, FileId(0), &catalog);
    let text = render_all(&output.diagnostics, "main.lark", source);
    assert!(text.contains("main.lark:1:12"));
    assert!(text.contains("main.lark:2:1"));
}
