//! Assembly emission for Lark.
//!
//! Turns a lowered [`IrModule`](lark_ir::IrModule) into the textual
//! assembly format the target toolchain ingests: a `.data_start` block
//! of typed, optionally exported or synced heap slots, and a
//! `.code_start` block of labeled instruction sequences.

mod emit;

pub use emit::emit;

#[cfg(test)]
mod tests;
