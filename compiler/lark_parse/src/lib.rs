//! Recursive-descent parser for Lark.
//!
//! Hand-written rather than generated: recovery that is aware of
//! statement and declaration boundaries is what keeps the later phases
//! useful on broken input, and table-driven generators only give generic
//! errors. On a parse failure inside a statement the parser skips to the
//! next statement start (or block close); inside a top-level declaration
//! it skips to the next declaration keyword. One parse pass therefore
//! collects every independent syntax error.
//!
//! String interpolation: a string token containing `{` is split here; each
//! bracketed fragment is re-lexed ([`lark_lexer::lex_at`]) and re-parsed
//! into an embedded expression with correct file positions.

mod expr;
mod interp;
mod parser;
mod recovery;
mod stmt;

pub use parser::parse;
pub use recovery::{TokenSet, DECL_START, STMT_START};
