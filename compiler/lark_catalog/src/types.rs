//! Data model for the external-operation catalog.
//!
//! Every callable thing on the target VM is an [`ExternSignature`]: a
//! whitelisted heap operation identified by a flat string id. The catalog
//! never executes anything; it only answers "does this operation exist,
//! and what are its types".

/// What flavor of member an extern signature represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExternKind {
    /// Plain callable member, instance or static.
    Method,
    /// Property getter (`get_X`), zero value parameters.
    Getter,
    /// Property setter (`set_X`), one value parameter.
    Setter,
    /// Type constructor (`ctor`).
    Constructor,
    /// Operator member (`op_Addition` and friends).
    Operator,
}

/// One whitelisted external operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternSignature {
    /// Flat operation id as emitted into assembly, e.g.
    /// `UnityEngineMathf.__Abs__SystemSingle__SystemSingle`.
    pub id: String,
    /// Flattened owner type name.
    pub owner: String,
    /// Member name without the owner prefix, e.g. `Abs` or `get_position`.
    pub member: String,
    /// Flattened parameter type names, excluding the instance receiver.
    pub params: Vec<String>,
    /// Declared parameter names, used for diagnostics. May be empty when
    /// the catalog source does not carry names.
    pub param_names: Vec<String>,
    /// Flattened return type name; `SystemVoid` for no value.
    pub ret: String,
    /// Instance members consume a receiver pushed before the parameters.
    pub instance: bool,
    pub kind: ExternKind,
}

impl ExternSignature {
    /// Human-oriented rendering for diagnostics:
    /// `UnityEngineMathf.Abs(SystemSingle) -> SystemSingle`.
    pub fn display(&self) -> String {
        format!(
            "{}.{}({}) -> {}",
            self.owner,
            self.member,
            self.params.join(", "),
            self.ret
        )
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// Getter/setter pair for a named property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyInfo {
    pub owner: String,
    pub name: String,
    /// Flattened property type.
    pub ty: String,
    pub getter: Option<ExternSignature>,
    pub setter: Option<ExternSignature>,
    pub instance: bool,
}

impl PropertyInfo {
    pub fn is_read_only(&self) -> bool {
        self.setter.is_none()
    }
}

/// One type known to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogTypeInfo {
    /// Flattened name, e.g. `UnityEngineTransform`.
    pub name: String,
    /// Flattened base type, if any. `SystemObject` has none.
    pub base: Option<String>,
    pub is_enum: bool,
}

/// Enum type: named constants over an underlying integral type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumTypeInfo {
    pub name: String,
    /// Flattened underlying type, e.g. `SystemInt32`.
    pub underlying: String,
    /// Value names in catalog order, paired with their numeric values.
    pub values: Vec<(String, i64)>,
}

impl EnumTypeInfo {
    pub fn value(&self, name: &str) -> Option<i64> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, v)| v)
    }

    pub fn value_names(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(n, _)| n.as_str())
    }
}

/// A widening conversion the compiler may insert without being asked.
///
/// `op` is the extern that performs it at runtime; `None` means the
/// conversion is a pure reinterpretation (reference upcast) and costs
/// no instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImplicitConversion {
    pub from: String,
    pub to: String,
    pub op: Option<ExternSignature>,
}
