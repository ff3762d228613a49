use pretty_assertions::assert_eq;

use lark_catalog::BuiltinCatalog;
use lark_diagnostic::DiagnosticBag;
use lark_ir::FileId;

use crate::emit;

fn compile(source: &str) -> String {
    let mut bag = DiagnosticBag::new();
    let tokens = lark_lexer::lex(source, FileId(0), &mut bag);
    let module = lark_parse::parse(&tokens, FileId(0), &mut bag);
    let catalog = BuiltinCatalog::new();
    let analysis = lark_analyze::analyze(&module, &catalog, &mut bag);
    assert!(!bag.has_errors(), "source failed analysis");
    emit(&lark_lower::lower(&module, &analysis))
}

#[test]
fn hello_world_emits_one_exported_halting_block() {
    let asm = compile("on Start { log(\"hi\") }");
    assert_eq!(
        asm,
        ".data_start\n\
         \x20   __this: %EngineBehaviour, this\n\
         \x20   __const_0: %SystemString, \"hi\"\n\
         .data_end\n\
         .code_start\n\
         \x20   .export _start\n\
         \x20   _start:\n\
         \x20       PUSH, __const_0\n\
         \x20       EXTERN, \"UnityEngineDebug.__Log__SystemObject__SystemVoid\"\n\
         \x20       JUMP, 0xFFFFFFFC\n\
         .code_end\n"
    );
}

#[test]
fn empty_handler_pads_with_a_nop() {
    let asm = compile("on Update { }");
    assert!(asm.contains("    _update:\n        NOP\n        JUMP, 0xFFFFFFFC\n"));
}

#[test]
fn handler_labels_use_the_runtime_mapping() {
    let asm = compile("on LateUpdate { }\non PlayerJoined(p) { }");
    assert!(asm.contains(".export _lateUpdate"));
    assert!(asm.contains("    _lateUpdate:"));
    assert!(asm.contains(".export _onPlayerJoined"));
    assert!(asm.contains("    _onPlayerJoined:"));
}

#[test]
fn custom_events_keep_their_source_name() {
    let asm = compile("event Respawn { }");
    assert!(asm.contains(".export Respawn"));
    assert!(asm.contains("    Respawn:"));
}

#[test]
fn exported_and_synced_slots_carry_directives() {
    let asm = compile(
        "pub let speed: float = 5.0\n\
         sync linear let hp: float = 100.0",
    );
    assert!(asm.contains("    .export speed\n    speed: %SystemSingle, 5.0\n"));
    assert!(asm.contains("    .sync hp, linear\n    hp: %SystemSingle, 100.0\n"));
}

#[test]
fn whole_valued_floats_keep_their_decimal_point() {
    let asm = compile("let g: float = 3");
    assert!(asm.contains("g: %SystemSingle, 3.0"));
}

#[test]
fn string_initializers_are_escaped() {
    let asm = compile("let s: string = \"say \\\"hi\\\"\"");
    assert!(asm.contains("s: %SystemString, \"say \\\"hi\\\"\""));
}

#[test]
fn property_assignment_calls_the_setter_not_the_getter() {
    let asm = compile("on Start { transform.position = Vector3(0.0, 1.0, 0.0) }");
    assert!(asm.contains("UnityEngineTransform.__set_position__UnityEngineVector3__SystemVoid"));
    assert!(!asm.contains("UnityEngineTransform.__get_position"));
}

#[test]
fn functions_emit_unexported_blocks_with_indirect_returns() {
    let asm = compile(
        "fn square(n: int) -> int { return n * n }\n\
         on Start { let x = square(4) }",
    );
    assert!(asm.contains("    __fn_square:"));
    assert!(!asm.contains(".export __fn_square"));
    assert!(asm.contains("JUMP_INDIRECT, __ret_square"));
}

#[test]
fn output_is_deterministic() {
    let src = "let n: int = 0\n\
               fn bump() { n += 1 }\n\
               on Update { bump()\nlog(\"{n}\") }";
    assert_eq!(compile(src), compile(src));
}
