//! Core data types shared across the Lark compiler pipeline.
//!
//! This crate is the dependency root: every other compiler crate builds on
//! the types defined here. It contains no logic beyond small constructors
//! and accessors.
//!
//! - [`span`] — source positions and spans (file id, 1-based line/column)
//! - [`token`] — the token stream produced by the lexer
//! - [`ast`] — the abstract syntax tree produced by the parser
//! - [`ty`] — the language-level type model and its platform mapping
//! - [`ir`] — the flat, slot-based IR consumed by the assembly emitter

pub mod ast;
pub mod ir;
pub mod span;
pub mod token;
pub mod ty;

pub use ast::{
    AssignOp, BinOp, Block, Decl, EventDecl, Expr, ExprId, ExprKind, FnDecl, HandlerDecl,
    InterpPart, Module, Param, Stmt, SyncMode, TypeRef, UnOp, VarDecl,
};
pub use ir::{HeapVar, Instr, IrBlock, IrBlockKind, IrModule, JumpTarget, SlotInit};
pub use span::{FileId, SourcePos, Span};
pub use token::{Token, TokenKind};
pub use ty::Ty;
