//! Semantic analysis for Lark.
//!
//! Takes a parsed module and a platform catalog, and produces an
//! [`Analysis`]: resolved symbols plus side tables keyed by expression
//! id that tell the lowering stage exactly which heap slot, extern or
//! conversion every expression uses. All validation lives here: types,
//! scopes, overloads, the recursion ban, event names, and the sync
//! heuristics.

mod analysis;
mod check;
mod cycles;
mod expr;
mod suggest;
mod symbols;

pub use analysis::{
    AccessTarget, Analysis, CallEdge, CallTarget, InterpOps, IterOps, LoopOps, Store, StoreKind,
};
pub use check::analyze;
pub use symbols::{FnSig, ScopeStack, Symbol, SymbolId, SymbolKind, SymbolTable};

#[cfg(test)]
mod tests;
