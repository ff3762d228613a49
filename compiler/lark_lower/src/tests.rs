use pretty_assertions::assert_eq;

use lark_catalog::BuiltinCatalog;
use lark_diagnostic::DiagnosticBag;
use lark_ir::{
    FileId, Instr, IrBlock, IrBlockKind, IrModule, JumpTarget, SlotInit, SyncMode,
};

use crate::lower;

fn lower_src(source: &str) -> IrModule {
    let mut bag = DiagnosticBag::new();
    let tokens = lark_lexer::lex(source, FileId(0), &mut bag);
    let module = lark_parse::parse(&tokens, FileId(0), &mut bag);
    let catalog = BuiltinCatalog::new();
    let analysis = lark_analyze::analyze(&module, &catalog, &mut bag);
    assert!(!bag.has_errors(), "source failed analysis");
    lower(&module, &analysis)
}

fn block<'a>(ir: &'a IrModule, label: &str) -> &'a IrBlock {
    ir.blocks
        .iter()
        .find(|b| b.label == label)
        .unwrap_or_else(|| panic!("no block labeled `{label}`"))
}

fn var<'a>(ir: &'a IrModule, name: &str) -> &'a lark_ir::HeapVar {
    ir.vars
        .iter()
        .find(|v| v.name == name)
        .unwrap_or_else(|| panic!("no slot named `{name}`"))
}

#[test]
fn module_variables_become_configured_slots() {
    let ir = lower_src(
        "pub let speed: float = 5.0\n\
         sync linear let hp: float = 100.0\n\
         let tag: string = \"lark\"",
    );
    let speed = var(&ir, "speed");
    assert!(speed.export);
    assert_eq!(speed.init, Some(SlotInit::Float(5.0)));
    let hp = var(&ir, "hp");
    assert_eq!(hp.sync, Some(SyncMode::Linear));
    let tag = var(&ir, "tag");
    assert_eq!(tag.init, Some(SlotInit::Str("lark".to_owned())));
}

#[test]
fn integer_initializer_widens_into_a_float_slot() {
    let ir = lower_src("let x: float = 3");
    assert_eq!(var(&ir, "x").init, Some(SlotInit::Float(3.0)));
}

#[test]
fn the_behaviour_slot_comes_first() {
    let ir = lower_src("on Start { }");
    assert_eq!(ir.vars[0].name, "__this");
    assert_eq!(ir.vars[0].init, Some(SlotInit::This));
}

#[test]
fn handler_blocks_end_at_the_halt_sentinel() {
    let ir = lower_src("on Start { }");
    let start = block(&ir, "Start");
    assert!(start.export);
    assert_eq!(
        start.kind,
        IrBlockKind::Handler {
            event: "Start".to_owned()
        }
    );
    assert_eq!(
        start.instrs.last(),
        Some(&Instr::Jump {
            target: JumpTarget::Halt
        })
    );
}

#[test]
fn explicit_return_in_a_handler_does_not_double_the_halt() {
    let ir = lower_src("on Start { return }");
    let start = block(&ir, "Start");
    let halts = start
        .instrs
        .iter()
        .filter(|i| {
            matches!(
                i,
                Instr::Jump {
                    target: JumpTarget::Halt
                }
            )
        })
        .count();
    assert_eq!(halts, 1);
}

#[test]
fn same_spelled_locals_get_distinct_slots() {
    let ir = lower_src(
        "on Start {\n\
         if true { let i = 1 }\n\
         if true { let i = 2 }\n\
         }",
    );
    assert!(ir.vars.iter().any(|v| v.name == "i"));
    assert!(ir.vars.iter().any(|v| v.name == "i_1"));
}

#[test]
fn equal_literals_share_one_const_slot() {
    let ir = lower_src("on Start { let a = 7\nlet b = 7 }");
    let sevens = ir
        .vars
        .iter()
        .filter(|v| v.init == Some(SlotInit::Int(7)) && v.name.starts_with("__const"))
        .count();
    assert_eq!(sevens, 1);
}

#[test]
fn function_call_stores_resume_address_and_jumps() {
    let ir = lower_src(
        "fn add_one(n: int) -> int { return n + 1 }\n\
         on Start { let x = add_one(2) }",
    );
    let func = block(&ir, "__fn_add_one");
    assert_eq!(func.kind, IrBlockKind::Function);
    assert!(!func.export);
    assert_eq!(
        func.instrs.last(),
        Some(&Instr::JumpIndirect {
            slot: "__ret_add_one".to_owned()
        })
    );

    let start = block(&ir, "Start");
    let push_label_at = start
        .instrs
        .iter()
        .position(|i| matches!(i, Instr::PushLabel { .. }))
        .expect("call site pushes a resume label");
    assert_eq!(
        &start.instrs[push_label_at + 1..push_label_at + 4],
        &[
            Instr::Push {
                slot: "__ret_add_one".to_owned()
            },
            Instr::Copy,
            Instr::Jump {
                target: JumpTarget::Label("__fn_add_one".to_owned())
            },
        ]
    );
    // The resume label lands right after the jump.
    let Instr::PushLabel { label } = &start.instrs[push_label_at] else {
        unreachable!()
    };
    assert_eq!(
        start.instrs[push_label_at + 4],
        Instr::Label {
            name: label.clone()
        }
    );
}

#[test]
fn arguments_are_copied_into_parameter_slots() {
    let ir = lower_src(
        "fn shout(msg: string) { log(msg) }\n\
         on Start { shout(\"hi\") }",
    );
    assert!(ir.vars.iter().any(|v| v.name == "msg"));
    let start = block(&ir, "Start");
    let copies = start
        .instrs
        .windows(3)
        .any(|w| matches!(&w[1], Instr::Push { slot } if slot == "msg") && w[2] == Instr::Copy);
    assert!(copies, "argument is copied into `msg` before the jump");
}

#[test]
fn while_loop_tests_before_the_body_and_jumps_back() {
    let ir = lower_src("on Start { let n = 0\nwhile n < 3 { n += 1 } }");
    let start = block(&ir, "Start");
    let head = start
        .instrs
        .iter()
        .position(|i| matches!(i, Instr::Label { .. }))
        .expect("loop head label");
    let Instr::Label { name: head_label } = &start.instrs[head] else {
        unreachable!()
    };
    assert!(start
        .instrs
        .iter()
        .any(|i| matches!(i, Instr::JumpIfFalse { .. })));
    assert!(start.instrs[head + 1..].iter().any(|i| {
        matches!(i, Instr::Jump { target: JumpTarget::Label(l) } if l == head_label)
    }));
}

#[test]
fn for_range_counts_through_the_integer_externs() {
    let ir = lower_src("on Start { for i in 0..5 { log(\"{i}\") } }");
    let start = block(&ir, "Start");
    let lt = "SystemInt32.__op_LessThan__SystemInt32_SystemInt32__SystemBoolean";
    let add = "SystemInt32.__op_Addition__SystemInt32_SystemInt32__SystemInt32";
    assert!(start
        .instrs
        .iter()
        .any(|i| matches!(i, Instr::Extern { signature } if signature == lt)));
    assert!(start
        .instrs
        .iter()
        .any(|i| matches!(i, Instr::Extern { signature } if signature == add)));
    assert!(ir
        .vars
        .iter()
        .any(|v| v.init == Some(SlotInit::Int(1)) && v.name.starts_with("__const")));
}

#[test]
fn for_each_reads_length_and_elements_through_the_catalog() {
    let ir = lower_src("on Start { let a = [1, 2]\nfor x in a { log(\"{x}\") } }");
    let start = block(&ir, "Start");
    assert!(start.instrs.iter().any(|i| {
        matches!(i, Instr::Extern { signature }
            if signature == "SystemInt32Array.__get_Length__SystemInt32")
    }));
    assert!(start.instrs.iter().any(|i| {
        matches!(i, Instr::Extern { signature }
            if signature == "SystemInt32Array.__Get__SystemInt32__SystemInt32")
    }));
}

#[test]
fn send_dispatches_through_the_custom_event_extern() {
    let ir = lower_src("event Ping { }\non Start { send Ping }");
    let ping = block(&ir, "Ping");
    assert_eq!(ping.kind, IrBlockKind::CustomEvent);
    assert!(ping.export);

    let start = block(&ir, "Start");
    assert!(start.instrs.iter().any(|i| {
        matches!(i, Instr::Extern { signature }
            if signature == "EngineBehaviour.__SendCustomEvent__SystemString__SystemVoid")
    }));
    assert!(ir
        .vars
        .iter()
        .any(|v| v.init == Some(SlotInit::Str("Ping".to_owned()))));
}

#[test]
fn extern_calls_push_receiver_arguments_then_output() {
    let ir = lower_src("on Start { let d = Mathf.Abs(-3.5) }");
    let start = block(&ir, "Start");
    let at = start
        .instrs
        .iter()
        .position(|i| {
            matches!(i, Instr::Extern { signature }
                if signature == "UnityEngineMathf.__Abs__SystemSingle__SystemSingle")
        })
        .expect("Abs extern emitted");
    // Static call: argument slot then output slot directly before EXTERN.
    assert!(matches!(&start.instrs[at - 1], Instr::Push { .. }));
    assert!(matches!(&start.instrs[at - 2], Instr::Push { .. }));
}

#[test]
fn builtin_log_goes_through_debug() {
    let ir = lower_src("on Start { log(\"hello\") }");
    let start = block(&ir, "Start");
    assert!(start.instrs.iter().any(|i| {
        matches!(i, Instr::Extern { signature }
            if signature == "UnityEngineDebug.__Log__SystemObject__SystemVoid")
    }));
}

#[test]
fn interpolation_converts_and_concatenates() {
    let ir = lower_src("let score: int = 0\non Start { log(\"score: {score}\") }");
    let start = block(&ir, "Start");
    assert!(start.instrs.iter().any(|i| {
        matches!(i, Instr::Extern { signature }
            if signature == "SystemConvert.__ToString__SystemObject__SystemString")
    }));
    assert!(start.instrs.iter().any(|i| {
        matches!(i, Instr::Extern { signature }
            if signature == "SystemString.__Concat__SystemString_SystemString__SystemString")
    }));
}

#[test]
fn event_parameter_binds_to_its_reserved_slot() {
    let ir = lower_src("on PlayerJoined(who) { log(\"{who.displayName}\") }");
    let who = var(&ir, "onPlayerJoinedPlayer");
    assert_eq!(who.ty.platform_name(), "EnginePlayer");
    // No separate `who` slot exists.
    assert!(!ir.vars.iter().any(|v| v.name == "who"));
}

#[test]
fn module_variable_shadowing_a_reserved_slot_is_renamed() {
    let ir = lower_src(
        "let onPlayerJoinedPlayer: int = 1\n\
         on PlayerJoined(p) { }",
    );
    let renamed = var(&ir, "onPlayerJoinedPlayer_1");
    assert_eq!(renamed.init, Some(SlotInit::Int(1)));
    assert_eq!(
        var(&ir, "onPlayerJoinedPlayer").ty.platform_name(),
        "EnginePlayer"
    );
}

#[test]
fn array_literals_construct_then_fill() {
    let ir = lower_src("on Start { let xs = [1, 2] }");
    let start = block(&ir, "Start");
    assert!(start.instrs.iter().any(|i| {
        matches!(i, Instr::Extern { signature }
            if signature == "SystemInt32Array.__ctor__SystemInt32__SystemInt32Array")
    }));
    let sets = start
        .instrs
        .iter()
        .filter(|i| {
            matches!(i, Instr::Extern { signature }
                if signature == "SystemInt32Array.__Set__SystemInt32_SystemInt32__SystemVoid")
        })
        .count();
    assert_eq!(sets, 2);
}

#[test]
fn property_write_goes_through_the_setter() {
    let ir = lower_src("on Start { transform.position = Vector3(0.0, 1.0, 0.0) }");
    let start = block(&ir, "Start");
    assert!(start.instrs.iter().any(|i| {
        matches!(i, Instr::Extern { signature }
            if signature
                == "UnityEngineTransform.__set_position__UnityEngineVector3__SystemVoid")
    }));
    assert!(start.instrs.iter().any(|i| {
        matches!(i, Instr::Extern { signature }
            if signature
                == "UnityEngineVector3.__ctor__SystemSingle_SystemSingle_SystemSingle__UnityEngineVector3")
    }));
}
