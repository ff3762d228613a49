//! The flat, slot-based IR consumed by the assembly emitter.
//!
//! Every value lives in a named heap slot; control flow is explicit
//! labeled blocks joined by jumps. Slot names are globally unique within
//! one lowered module — the lowering pass guarantees this even when two
//! source scopes declare the same spelled name.

use crate::ast::SyncMode;
use crate::ty::Ty;

/// Literal initial value of a heap slot.
#[derive(Clone, Debug, PartialEq)]
pub enum SlotInit {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Null,
    /// The platform binds this slot to the current behaviour object.
    This,
}

/// One named, typed storage slot in the data section.
#[derive(Clone, Debug)]
pub struct HeapVar {
    /// Globally unique slot name.
    pub name: String,
    pub ty: Ty,
    pub init: Option<SlotInit>,
    /// Emits an `.export` line; the slot is externally visible.
    pub export: bool,
    /// Emits a `.sync` line; the slot is networked.
    pub sync: Option<SyncMode>,
}

/// Where an unconditional jump goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JumpTarget {
    Label(String),
    /// The fixed halt sentinel terminating handler execution.
    Halt,
}

/// One IR instruction. Mirrors the target's 9-opcode set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instr {
    Nop,
    /// An in-block jump target (loop heads, else arms, call resume
    /// points). Emitted as a label line, not an opcode.
    Label { name: String },
    /// Push the address of a heap slot.
    Push { slot: String },
    /// Push the address of a code label (return linkage).
    PushLabel { label: String },
    Pop,
    /// Call a whitelisted external operation by signature id.
    Extern { signature: String },
    /// Pop a pushed boolean slot; jump if it holds false.
    JumpIfFalse { target: String },
    Jump { target: JumpTarget },
    /// Jump through the address stored in a heap slot.
    JumpIndirect { slot: String },
    /// Pop two addresses; copy the first pushed into the second.
    Copy,
    /// No-op carrying a comment into the assembly text.
    Annotation { text: String },
}

/// What kind of code block this is; decides labeling and termination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IrBlockKind {
    /// A platform event handler; the emitter maps the source event name
    /// to the platform's fixed label.
    Handler { event: String },
    /// A custom event; labeled by its source name, exported.
    CustomEvent,
    /// A user function; internal label, reached only by lowered calls.
    Function,
}

/// A labeled instruction block in the code section.
#[derive(Clone, Debug)]
pub struct IrBlock {
    pub label: String,
    pub kind: IrBlockKind,
    pub export: bool,
    pub instrs: Vec<Instr>,
}

/// A fully lowered module: all slots plus all code blocks.
#[derive(Clone, Debug, Default)]
pub struct IrModule {
    pub vars: Vec<HeapVar>,
    pub blocks: Vec<IrBlock>,
}
