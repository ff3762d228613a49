//! The analyzer's output: side tables keyed by [`ExprId`].
//!
//! The AST never mutates; everything the lowering stage needs to know
//! about an expression (its type, what its name resolved to, which
//! extern a call picked, which implicit conversion its value needs) is
//! recorded here.

use lark_catalog::{ExternSignature, ImplicitConversion};
use lark_ir::{ExprId, Span, Ty};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::symbols::{FnSig, SymbolId, SymbolTable};

/// What a call expression resolved to.
#[derive(Clone, Debug)]
pub enum CallTarget {
    /// A user function declared with `fn`.
    Function(SymbolId),
    /// A whitelisted platform operation. `on_this` marks sugar calls
    /// (`log`, `request_sync`) whose receiver is the implicit `this`.
    Extern {
        sig: ExternSignature,
        on_this: bool,
    },
    /// A platform constructor (`Vector3(x, y, z)`).
    Constructor(ExternSignature),
}

/// What a member, index or array-literal expression resolved to when
/// read as a value.
#[derive(Clone, Debug)]
pub enum AccessTarget {
    /// Property read through its getter extern.
    Property {
        getter: ExternSignature,
        on_this: bool,
    },
    /// Enum constant; carries the constant's numeric value.
    EnumValue { ty: Ty, value: i64 },
    /// `arr[i]` through the element `Get` extern.
    ArrayGet(ExternSignature),
    /// `[a, b, c]`: constructed then filled element by element.
    ArrayLiteral {
        ctor: ExternSignature,
        set: ExternSignature,
    },
}

/// Where an assignment writes, keyed by the target expression.
#[derive(Clone, Debug)]
pub struct Store {
    pub kind: StoreKind,
    /// The operator a compound assignment applies between the old and
    /// new value, resolved like any other binary operator.
    pub op: Option<ExternSignature>,
}

#[derive(Clone, Debug)]
pub enum StoreKind {
    Var(SymbolId),
    Property {
        setter: ExternSignature,
        /// Needed to read the old value on compound assignment.
        getter: Option<ExternSignature>,
        on_this: bool,
    },
    ArrayElem {
        set: ExternSignature,
        get: ExternSignature,
    },
}

/// The externs string interpolation lowers through.
#[derive(Clone, Debug)]
pub struct InterpOps {
    pub to_string: ExternSignature,
    pub concat: ExternSignature,
}

/// The externs a counted loop tests and steps with. Both `for` forms
/// count through an `int` index.
#[derive(Clone, Debug)]
pub struct LoopOps {
    pub less_than: ExternSignature,
    pub step: ExternSignature,
    /// Present for `for x in arr`: the getters of the iterated array.
    pub iter: Option<IterOps>,
}

/// Length and element getters of an iterated array type.
#[derive(Clone, Debug)]
pub struct IterOps {
    pub length: ExternSignature,
    pub get: ExternSignature,
}

/// One resolved `fn`-to-`fn` call edge, for cycle detection.
#[derive(Clone, Copy, Debug)]
pub struct CallEdge {
    pub caller: SymbolId,
    pub callee: SymbolId,
    pub span: Span,
}

/// Everything later stages need to know about a checked module.
#[derive(Default)]
pub struct Analysis {
    pub symbols: SymbolTable,
    pub fn_sigs: FxHashMap<SymbolId, FnSig>,
    /// Resolved type of every well-typed expression.
    pub expr_types: FxHashMap<ExprId, Ty>,
    /// `Name` expressions resolved to a value symbol.
    pub name_refs: FxHashMap<ExprId, SymbolId>,
    /// Declaration sites (name spans) to the symbol they introduced.
    pub decl_symbols: FxHashMap<Span, SymbolId>,
    /// `Name` expressions that denote a type, not a value. The lowerer
    /// must not evaluate these.
    pub type_names: FxHashSet<ExprId>,
    pub calls: FxHashMap<ExprId, CallTarget>,
    pub accesses: FxHashMap<ExprId, AccessTarget>,
    pub stores: FxHashMap<ExprId, Store>,
    /// Resolved operator extern per `Binary`/`Unary` expression.
    pub operators: FxHashMap<ExprId, ExternSignature>,
    /// Implicit conversion to apply to the value an expression produces.
    pub coercions: FxHashMap<ExprId, ImplicitConversion>,
    pub interp_ops: FxHashMap<ExprId, InterpOps>,
    /// `for` statements (by loop-variable span) to their counting
    /// externs. Lowering emits these ids verbatim.
    pub loops: FxHashMap<Span, LoopOps>,
    /// `send` statements (by event-name span) to the dispatch extern.
    pub sends: FxHashMap<Span, ExternSignature>,
    /// Resolved fn-to-fn call edges.
    pub call_edges: Vec<CallEdge>,
    /// The implicit `this` behaviour reference.
    pub this_symbol: Option<SymbolId>,
}

impl Analysis {
    pub fn ty(&self, id: ExprId) -> Option<&Ty> {
        self.expr_types.get(&id)
    }
}
