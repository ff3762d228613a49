//! Abstract syntax tree for Lark.
//!
//! The tree is strictly owned: a module owns its declarations, each
//! declaration owns its statement/expression subtree, and nothing is
//! shared. Expressions carry a parser-assigned [`ExprId`]; resolved type
//! information lives in the analyzer's side tables keyed by that id, so
//! the AST itself stays immutable after parsing.

use crate::span::Span;

/// Dense id assigned to every expression by the parser.
///
/// Side tables in the analyzer (types, resolved operations, implicit
/// conversions) are keyed by this id.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct ExprId(pub u32);

/// A parsed source file.
#[derive(Clone, Debug, Default)]
pub struct Module {
    pub decls: Vec<Decl>,
    /// Total number of expression ids handed out while parsing this
    /// module, including expressions embedded in interpolated strings.
    pub expr_count: u32,
}

/// Per-variable network replication policy.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SyncMode {
    None,
    Linear,
    Smooth,
}

impl SyncMode {
    /// The spelling used both in source and in `.sync` directives.
    pub fn as_str(self) -> &'static str {
        match self {
            SyncMode::None => "none",
            SyncMode::Linear => "linear",
            SyncMode::Smooth => "smooth",
        }
    }

    pub fn from_str(text: &str) -> Option<SyncMode> {
        Some(match text {
            "none" => SyncMode::None,
            "linear" => SyncMode::Linear,
            "smooth" => SyncMode::Smooth,
            _ => return None,
        })
    }
}

/// A source-level type reference, resolved to a `Ty` by the analyzer.
#[derive(Clone, Debug)]
pub enum TypeRef {
    Named { name: String, span: Span },
    Array { elem: Box<TypeRef>, span: Span },
}

impl TypeRef {
    pub fn span(&self) -> Span {
        match self {
            TypeRef::Named { span, .. } | TypeRef::Array { span, .. } => *span,
        }
    }
}

/// A top-level declaration.
#[derive(Clone, Debug)]
pub enum Decl {
    Variable(VarDecl),
    Function(FnDecl),
    Handler(HandlerDecl),
    CustomEvent(EventDecl),
}

impl Decl {
    pub fn span(&self) -> Span {
        match self {
            Decl::Variable(v) => v.span,
            Decl::Function(f) => f.span,
            Decl::Handler(h) => h.span,
            Decl::CustomEvent(e) => e.span,
        }
    }
}

/// `let x: int = 0`, optionally `pub` / `sync <mode>` at module level.
#[derive(Clone, Debug)]
pub struct VarDecl {
    pub name: String,
    pub name_span: Span,
    pub ty: Option<TypeRef>,
    pub init: Option<Expr>,
    pub export: bool,
    pub sync: Option<SyncMode>,
    pub span: Span,
}

/// A function parameter.
#[derive(Clone, Debug)]
pub struct Param {
    pub name: String,
    pub name_span: Span,
    pub ty: TypeRef,
}

/// `fn name(params) -> ret { body }`.
#[derive(Clone, Debug)]
pub struct FnDecl {
    pub name: String,
    pub name_span: Span,
    pub params: Vec<Param>,
    pub ret: Option<TypeRef>,
    pub body: Block,
    /// Span of a `<...>` type-parameter list, when the author wrote one.
    /// The target platform has no generics; the analyzer rejects this.
    pub generics_span: Option<Span>,
    pub span: Span,
}

/// `on Event(param) { body }` — a platform event handler.
#[derive(Clone, Debug)]
pub struct HandlerDecl {
    pub event: String,
    pub event_span: Span,
    pub param: Option<Param>,
    pub body: Block,
    pub span: Span,
}

/// `event Name { body }` — a custom event, externally invocable.
#[derive(Clone, Debug)]
pub struct EventDecl {
    pub name: String,
    pub name_span: Span,
    pub body: Block,
    pub span: Span,
}

/// A `{ ... }` statement block.
#[derive(Clone, Debug, Default)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

/// Compound assignment operators desugar to get → apply → set.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
}

impl AssignOp {
    /// The binary operator a compound assignment applies, if any.
    pub fn binary_op(self) -> Option<BinOp> {
        match self {
            AssignOp::Assign => None,
            AssignOp::Add => Some(BinOp::Add),
            AssignOp::Sub => Some(BinOp::Sub),
            AssignOp::Mul => Some(BinOp::Mul),
            AssignOp::Div => Some(BinOp::Div),
        }
    }
}

/// A statement.
#[derive(Clone, Debug)]
pub enum Stmt {
    /// Local variable declaration.
    Let(VarDecl),
    Assign {
        target: Expr,
        op: AssignOp,
        value: Expr,
        span: Span,
    },
    If {
        cond: Expr,
        then_block: Block,
        /// `else { .. }` or a nested `If` for `else if` chains.
        else_block: Option<Block>,
        span: Span,
    },
    While {
        cond: Expr,
        body: Block,
        span: Span,
    },
    /// `for i in start..end { .. }`
    ForRange {
        var: String,
        var_span: Span,
        start: Expr,
        end: Expr,
        body: Block,
        span: Span,
    },
    /// `for x in collection { .. }`
    ForEach {
        var: String,
        var_span: Span,
        iter: Expr,
        body: Block,
        span: Span,
    },
    Return {
        value: Option<Expr>,
        span: Span,
    },
    Break {
        span: Span,
    },
    Continue {
        span: Span,
    },
    /// `send EventName` — raise a custom event on the current behaviour.
    Send {
        event: String,
        event_span: Span,
        span: Span,
    },
    /// An expression evaluated for its effect (a call, typically).
    Expr(Expr),
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Let(v) => v.span,
            Stmt::Assign { span, .. }
            | Stmt::If { span, .. }
            | Stmt::While { span, .. }
            | Stmt::ForRange { span, .. }
            | Stmt::ForEach { span, .. }
            | Stmt::Return { span, .. }
            | Stmt::Break { span }
            | Stmt::Continue { span }
            | Stmt::Send { span, .. } => *span,
            Stmt::Expr(e) => e.span,
        }
    }
}

/// Binary operators, lowest to highest precedence tier.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinOp {
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinOp {
    /// The platform operator member name this operator resolves through.
    pub fn operator_name(self) -> &'static str {
        match self {
            BinOp::Or => "op_ConditionalOr",
            BinOp::And => "op_ConditionalAnd",
            BinOp::Eq => "op_Equality",
            BinOp::Ne => "op_Inequality",
            BinOp::Lt => "op_LessThan",
            BinOp::Le => "op_LessThanOrEqual",
            BinOp::Gt => "op_GreaterThan",
            BinOp::Ge => "op_GreaterThanOrEqual",
            BinOp::Add => "op_Addition",
            BinOp::Sub => "op_Subtraction",
            BinOp::Mul => "op_Multiply",
            BinOp::Div => "op_Division",
            BinOp::Rem => "op_Modulus",
        }
    }

    /// Source spelling, for diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            BinOp::Or => "||",
            BinOp::And => "&&",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Rem => "%",
        }
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnOp {
    Not,
    Neg,
}

impl UnOp {
    pub fn operator_name(self) -> &'static str {
        match self {
            UnOp::Not => "op_LogicalNot",
            UnOp::Neg => "op_UnaryNegation",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UnOp::Not => "!",
            UnOp::Neg => "-",
        }
    }
}

/// One fragment of an interpolated string.
#[derive(Clone, Debug)]
pub enum InterpPart {
    Text(String),
    Expr(Expr),
}

/// An expression node.
#[derive(Clone, Debug)]
pub struct Expr {
    pub id: ExprId,
    pub kind: ExprKind,
    pub span: Span,
}

/// Expression variants.
#[derive(Clone, Debug)]
pub enum ExprKind {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Null,
    Name(String),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Unary {
        op: UnOp,
        operand: Box<Expr>,
    },
    Member {
        object: Box<Expr>,
        member: String,
        member_span: Span,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
    },
    Array {
        elems: Vec<Expr>,
    },
    Interp {
        parts: Vec<InterpPart>,
    },
    /// Placeholder produced by parser error recovery.
    Error,
}
