use pretty_assertions::assert_eq;

use lark_catalog::BuiltinCatalog;
use lark_ir::FileId;

use crate::{compile, compile_files};

#[test]
fn successful_compile_returns_assembly() {
    let catalog = BuiltinCatalog::new();
    let output = compile("on Start { log(\"hi\") }", FileId(0), &catalog);
    assert!(output.succeeded());
    assert!(output.diagnostics.is_empty());
    assert!(output.assembly.unwrap().contains(".code_start"));
}

#[test]
fn any_error_suppresses_assembly() {
    let catalog = BuiltinCatalog::new();
    let output = compile("on Start { missing = 1 }", FileId(0), &catalog);
    assert!(!output.succeeded());
    assert!(!output.diagnostics.is_empty());
}

#[test]
fn warnings_do_not_block_emission() {
    let catalog = BuiltinCatalog::new();
    let output = compile(
        "sync linear let hp: float = 100.0\non Start { hp = 50.0 }",
        FileId(0),
        &catalog,
    );
    assert!(output.succeeded());
    assert!(!output.diagnostics.is_empty());
}

#[test]
fn compile_files_preserves_input_order() {
    let catalog = BuiltinCatalog::new();
    let sources = ["on Start { }", "on Start { broken = 1 }", "let n: int = 3"];
    let outputs = compile_files(&sources, &catalog);
    assert_eq!(outputs.len(), 3);
    assert!(outputs[0].succeeded());
    assert!(!outputs[1].succeeded());
    assert!(outputs[2].succeeded());
}

#[test]
fn file_ids_follow_input_positions() {
    let catalog = BuiltinCatalog::new();
    let sources = ["on Start { }", "on Start { broken = 1 }"];
    let outputs = compile_files(&sources, &catalog);
    let span = outputs[1].diagnostics[0].primary_span().unwrap();
    assert_eq!(span.file, FileId(1));
}
