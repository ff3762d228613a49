//! IR to assembly text.
//!
//! The output format is fixed by the target's own assembler: a data
//! section declaring every heap slot, then a code section of labeled
//! instruction blocks. Emission is purely mechanical; every signature
//! and slot name was resolved upstream, and nothing here can fail.

use std::fmt::Write;

use lark_catalog::events;
use lark_ir::{HeapVar, Instr, IrBlock, IrBlockKind, IrModule, JumpTarget, SlotInit};

/// The jump target value the runtime treats as end-of-execution.
const HALT_SENTINEL: &str = "0xFFFFFFFC";

/// Render a lowered module as target assembly text.
pub fn emit(module: &IrModule) -> String {
    let mut out = String::new();
    emit_data(&mut out, &module.vars);
    emit_code(&mut out, &module.blocks);
    out
}

fn emit_data(out: &mut String, vars: &[HeapVar]) {
    out.push_str(".data_start\n");
    for var in vars {
        if var.export {
            let _ = writeln!(out, "    .export {}", var.name);
        }
        if let Some(mode) = var.sync {
            let _ = writeln!(out, "    .sync {}, {}", var.name, mode.as_str());
        }
        let _ = writeln!(
            out,
            "    {}: %{}, {}",
            var.name,
            var.ty.platform_name(),
            init_value(var.init.as_ref())
        );
    }
    out.push_str(".data_end\n");
}

fn emit_code(out: &mut String, blocks: &[IrBlock]) {
    out.push_str(".code_start\n");
    for block in blocks {
        if block.export {
            let _ = writeln!(out, "    .export {}", block_label(block));
        }
        let _ = writeln!(out, "    {}:", block_label(block));
        // The target assembler rejects a label directly followed by
        // another label, so an empty block gets one NOP of padding.
        if body_is_empty(block) {
            out.push_str("        NOP\n");
        }
        for instr in &block.instrs {
            emit_instr(out, instr);
        }
    }
    out.push_str(".code_end\n");
}

/// The label a block carries in the output. Handlers use the runtime's
/// reserved label for their event, not the source spelling.
fn block_label(block: &IrBlock) -> &str {
    if let IrBlockKind::Handler { event } = &block.kind {
        if let Some(info) = events::event(event) {
            return info.label;
        }
    }
    &block.label
}

/// True when the block holds nothing but its terminator.
fn body_is_empty(block: &IrBlock) -> bool {
    match block.instrs.as_slice() {
        [] => true,
        [only] => matches!(
            only,
            Instr::Jump { .. } | Instr::JumpIndirect { .. }
        ),
        _ => false,
    }
}

fn emit_instr(out: &mut String, instr: &Instr) {
    match instr {
        Instr::Nop => out.push_str("        NOP\n"),
        Instr::Label { name } => {
            let _ = writeln!(out, "    {name}:");
        }
        Instr::Push { slot } => {
            let _ = writeln!(out, "        PUSH, {slot}");
        }
        Instr::PushLabel { label } => {
            let _ = writeln!(out, "        PUSH, {label}");
        }
        Instr::Pop => out.push_str("        POP\n"),
        Instr::Extern { signature } => {
            let _ = writeln!(out, "        EXTERN, \"{signature}\"");
        }
        Instr::JumpIfFalse { target } => {
            let _ = writeln!(out, "        JUMP_IF_FALSE, {target}");
        }
        Instr::Jump { target } => match target {
            JumpTarget::Label(label) => {
                let _ = writeln!(out, "        JUMP, {label}");
            }
            JumpTarget::Halt => {
                let _ = writeln!(out, "        JUMP, {HALT_SENTINEL}");
            }
        },
        Instr::JumpIndirect { slot } => {
            let _ = writeln!(out, "        JUMP_INDIRECT, {slot}");
        }
        Instr::Copy => out.push_str("        COPY\n"),
        Instr::Annotation { text } => {
            let _ = writeln!(out, "        ANNOTATION, \"{text}\"");
        }
    }
}

fn init_value(init: Option<&SlotInit>) -> String {
    match init {
        None | Some(SlotInit::Null) => "null".to_owned(),
        Some(SlotInit::Int(v)) => v.to_string(),
        // Debug formatting keeps the decimal point on whole values, so
        // a float slot never reads back as an integer.
        Some(SlotInit::Float(v)) => format!("{v:?}"),
        Some(SlotInit::Bool(v)) => v.to_string(),
        Some(SlotInit::Str(s)) => format!("\"{}\"", escape(s)),
        Some(SlotInit::This) => "this".to_owned(),
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}
