//! The language-level type model and its mapping onto platform type names.
//!
//! Lark's own types are a small closed set; everything else is a platform
//! type identified by its namespace-flattened name (`UnityEngineVector3`).
//! The catalog speaks exclusively in platform names, so [`Ty::platform_name`]
//! is the bridge every catalog query goes through.

use std::fmt;

/// A resolved Lark type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Ty {
    /// No value; the return type of void operations.
    Void,
    Int,
    Float,
    Double,
    Bool,
    Str,
    /// The platform's universal top type.
    Object,
    /// A platform type, by flattened platform name.
    Platform(String),
    /// An array of some element type.
    Array(Box<Ty>),
}

impl Ty {
    /// The platform type name used in catalog queries and emitted assembly.
    pub fn platform_name(&self) -> String {
        match self {
            Ty::Void => "SystemVoid".to_string(),
            Ty::Int => "SystemInt32".to_string(),
            Ty::Float => "SystemSingle".to_string(),
            Ty::Double => "SystemDouble".to_string(),
            Ty::Bool => "SystemBoolean".to_string(),
            Ty::Str => "SystemString".to_string(),
            Ty::Object => "SystemObject".to_string(),
            Ty::Platform(name) => name.clone(),
            Ty::Array(elem) => format!("{}Array", elem.platform_name()),
        }
    }

    /// Map a core language type keyword to its type, if it is one.
    pub fn from_keyword(name: &str) -> Option<Ty> {
        Some(match name {
            "int" => Ty::Int,
            "float" => Ty::Float,
            "double" => Ty::Double,
            "bool" => Ty::Bool,
            "string" => Ty::Str,
            "object" => Ty::Object,
            _ => return None,
        })
    }

    /// Map a platform type name back to a core type where one exists.
    ///
    /// Used when catalog queries return platform names (e.g. an extern's
    /// return type) that need to flow back into the language type model.
    pub fn from_platform_name(name: &str) -> Ty {
        match name {
            "SystemVoid" => Ty::Void,
            "SystemInt32" => Ty::Int,
            "SystemSingle" => Ty::Float,
            "SystemDouble" => Ty::Double,
            "SystemBoolean" => Ty::Bool,
            "SystemString" => Ty::Str,
            "SystemObject" => Ty::Object,
            other => {
                if let Some(elem) = other.strip_suffix("Array") {
                    Ty::Array(Box::new(Ty::from_platform_name(elem)))
                } else {
                    Ty::Platform(other.to_string())
                }
            }
        }
    }

    #[inline]
    pub fn is_void(&self) -> bool {
        matches!(self, Ty::Void)
    }

    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Ty::Int | Ty::Float | Ty::Double)
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Void => write!(f, "void"),
            Ty::Int => write!(f, "int"),
            Ty::Float => write!(f, "float"),
            Ty::Double => write!(f, "double"),
            Ty::Bool => write!(f, "bool"),
            Ty::Str => write!(f, "string"),
            Ty::Object => write!(f, "object"),
            Ty::Platform(name) => write!(f, "{name}"),
            Ty::Array(elem) => write!(f, "{elem}[]"),
        }
    }
}

#[cfg(test)]
mod tests;
