//! End-to-end pipeline scenarios, source text in and assembly text out.

use lark_catalog::{BuiltinCatalog, CatalogFile, FileCatalog};
use lark_diagnostic::ErrorCode;
use lark_ir::FileId;
use larkc::{compile, CompileOutput};
use pretty_assertions::assert_eq;

fn run(source: &str) -> CompileOutput {
    let catalog = BuiltinCatalog::new();
    compile(source, FileId(0), &catalog)
}

fn assembly(source: &str) -> String {
    let output = run(source);
    assert!(
        output.succeeded(),
        "compile failed: {:?}",
        output.diagnostics
    );
    output.assembly.unwrap()
}

fn codes(output: &CompileOutput) -> Vec<ErrorCode> {
    output.diagnostics.iter().map(|d| d.code).collect()
}

#[test]
fn compiling_twice_is_byte_identical() {
    let src = "pub let speed: float = 5.0\n\
               fn clamp_speed() { speed = Mathf.Clamp(speed, 0.0, 10.0) }\n\
               on Update { clamp_speed()\nlog(\"speed {speed}\") }";
    assert_eq!(assembly(src), assembly(src));
}

#[test]
fn hello_world_block_has_push_extern_halt() {
    let asm = assembly("on Start { log(\"hi\") }");
    let block = asm
        .split("_start:")
        .nth(1)
        .and_then(|rest| rest.split(".code_end").next())
        .expect("exported start block");
    let lines: Vec<&str> = block.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    assert_eq!(
        lines,
        [
            "PUSH, __const_0",
            "EXTERN, \"UnityEngineDebug.__Log__SystemObject__SystemVoid\"",
            "JUMP, 0xFFFFFFFC",
        ]
    );
}

#[test]
fn exported_module_variable_gets_exactly_one_export_line() {
    let asm = assembly("pub let speed: float = 5.0\nsync linear let hp: float = 1.0");
    assert_eq!(asm.matches(".export speed").count(), 1);
    assert!(asm.contains("speed: %SystemSingle, 5.0"));
    assert_eq!(asm.matches(".sync hp, linear").count(), 1);
}

#[test]
fn every_handler_block_ends_with_the_halt_sentinel() {
    let asm = assembly(
        "on Start { log(\"a\") }\n\
         on Update { log(\"b\") }\n\
         event Reset { log(\"c\") }",
    );
    let code = asm.split(".code_start").nth(1).unwrap();
    let mut prev_instr: Option<&str> = None;
    for line in code.lines().map(str::trim) {
        if line.is_empty() || line.starts_with(".export") {
            continue;
        }
        if line.ends_with(':') || line == ".code_end" {
            if let Some(instr) = prev_instr.take() {
                assert_eq!(instr, "JUMP, 0xFFFFFFFC", "block does not halt");
            }
            continue;
        }
        prev_instr = Some(line);
    }
}

#[test]
fn overload_resolution_picks_the_integer_abs() {
    let asm = assembly("on Start { let n = Mathf.Abs(-3) }");
    assert!(asm.contains("UnityEngineMathf.__Abs__SystemInt32__SystemInt32"));
    assert!(!asm.contains("UnityEngineMathf.__Abs__SystemSingle__SystemSingle"));
}

#[test]
fn wrong_arity_lists_the_available_overloads() {
    let output = run("on Start { let n = Mathf.Abs(1, 2) }");
    let diag = output
        .diagnostics
        .iter()
        .find(|d| d.code == ErrorCode::E5001)
        .expect("expected a no-overload error");
    assert!(diag.notes.iter().any(|n| n.contains("Abs(SystemInt32)")));
    assert!(diag.notes.iter().any(|n| n.contains("Abs(SystemSingle)")));
}

#[test]
fn mutual_recursion_is_rejected_with_the_cycle() {
    let output = run(
        "fn ping() { pong() }\n\
         fn pong() { ping() }\n\
         on Start { ping() }",
    );
    let diag = output
        .diagnostics
        .iter()
        .find(|d| d.code == ErrorCode::E4001)
        .expect("expected a recursion error");
    assert!(diag.message.contains("ping"));
    assert!(diag.message.contains("pong"));
}

#[test]
fn deep_call_chains_without_cycles_compile() {
    let mut src = String::new();
    for i in 0..10 {
        if i + 1 < 10 {
            src.push_str(&format!("fn f{i}() {{ f{}() }}\n", i + 1));
        } else {
            src.push_str(&format!("fn f{i}() {{ log(\"end\") }}\n"));
        }
    }
    src.push_str("on Start { f0() }");
    assert!(run(&src).succeeded());
}

#[test]
fn misspelled_names_get_a_suggestion() {
    let output = run("let speed: float = 1.0\non Start { sped = 2.0 }");
    let diag = output
        .diagnostics
        .iter()
        .find(|d| d.code == ErrorCode::E3001)
        .expect("expected an unknown-identifier error");
    assert!(diag.suggestions.iter().any(|s| s.contains("speed")));
}

#[test]
fn loop_variables_with_equal_names_get_distinct_slots() {
    let asm = assembly(
        "fn first() { for i in 0..2 { log(\"{i}\") } }\n\
         fn second() { for i in 0..2 { log(\"{i}\") } }\n\
         on Start { first()\nsecond() }",
    );
    assert!(asm.contains("    i: %SystemInt32, 0"));
    assert!(asm.contains("    i_1: %SystemInt32, 0"));

    // Each function's instructions reference only its own slot.
    let first = asm
        .split("__fn_first:")
        .nth(1)
        .unwrap()
        .split("__fn_second:")
        .next()
        .unwrap();
    let second = asm.split("__fn_second:").nth(1).unwrap();
    assert!(first.contains("PUSH, i\n"));
    assert!(!first.contains("PUSH, i_1\n"));
    assert!(second.contains("PUSH, i_1\n"));
    assert!(!second.contains("PUSH, i\n"));
}

#[test]
fn independent_semantic_errors_are_all_collected() {
    let output = run(
        "on Start {\n\
         first = 1\n\
         let x: int = \"text\"\n\
         second()\n\
         }",
    );
    let codes = codes(&output);
    assert_eq!(
        codes.iter().filter(|c| **c == ErrorCode::E3001).count(),
        2
    );
    assert!(codes.contains(&ErrorCode::E2001));
}

#[test]
fn loops_over_unwhitelisted_array_types_do_not_reach_assembly() {
    // The project catalog knows the producer of the array but none of
    // the array's own operations.
    let doc = CatalogFile::from_json(
        r#"{
          "types": [{ "name": "Registry" }],
          "operations": [{
            "id": "Registry.__All__UnityEngineTransformArray",
            "owner": "Registry",
            "member": "All",
            "kind": "static-method",
            "ret": "UnityEngineTransformArray"
          }]
        }"#,
    )
    .unwrap();
    let catalog = FileCatalog::from_document(doc).unwrap();
    let output = compile(
        "on Start { for t in Registry.All() { log(\"{t}\") } }",
        FileId(0),
        &catalog,
    );
    assert!(!output.succeeded());
    assert!(codes(&output).contains(&ErrorCode::E5003));
}

#[test]
fn property_assignment_emits_the_setter() {
    let asm = assembly("on Start { transform.position = Vector3(1.0, 2.0, 3.0) }");
    assert!(asm.contains("__set_position__"));
    assert!(!asm.contains("__get_position__"));
}

#[test]
fn synced_slot_carries_its_interpolation_mode() {
    let asm = assembly(
        "sync smooth let height: float = 1.0\n\
         on Update { height += 0.1\nrequest_sync() }",
    );
    assert!(asm.contains(".sync height, smooth"));
}

#[test]
fn input_event_parameter_uses_the_fixed_slot_name() {
    let asm = assembly("on InputJump(pressed) { if pressed { log(\"jump\") } }");
    assert!(asm.contains("inputJumpBoolValue: %SystemBoolean, false"));
    assert!(asm.contains(".export _inputJump"));
}
