//! Lowering from the analyzed AST to the slot-based IR.
//!
//! Every expression value gets a named heap slot, every body becomes one
//! labeled instruction block, and every operation becomes a push
//! sequence ending in `EXTERN`, a jump, or a copy. Function calls have
//! no stack to use: arguments are copied into the callee's parameter
//! slots and the resume address is stored in its return-address slot
//! before jumping.

mod expr;
mod lower;
mod slots;

pub use lower::lower;

#[cfg(test)]
mod tests;
