//! Diagnostic system for the Lark compiler.
//!
//! Diagnostics are structured records: severity, stable code, message,
//! labeled spans, optional notes and fix suggestions. The core never
//! renders them; console text, protocol messages and IDE markers are the
//! responsibility of the consumers of this data.
//!
//! Error codes are banded by pipeline phase so a code alone tells you
//! which component produced it (see [`ErrorCode`]).

mod bag;
mod diagnostic;
mod error_code;

pub use bag::DiagnosticBag;
pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
