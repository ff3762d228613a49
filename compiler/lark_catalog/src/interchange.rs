//! On-disk catalog format.
//!
//! External catalogs are JSON documents carrying three collections:
//! operations, enum definitions, and type records. The format is
//! intentionally dumb; all smarts live in [`crate::resolve`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{ExternKind, ExternSignature};

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed catalog data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("operation `{id}` has unknown kind `{kind}`")]
    UnknownKind { id: String, kind: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub types: Vec<TypeRecord>,
    #[serde(default)]
    pub operations: Vec<OperationRecord>,
    #[serde(default)]
    pub enums: Vec<EnumRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeRecord {
    /// Flattened type name.
    pub name: String,
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub is_enum: bool,
    /// Optional source-level spelling that resolves to this type.
    #[serde(default)]
    pub alias: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationRecord {
    pub id: String,
    pub owner: String,
    pub member: String,
    /// One of `method`, `static-method`, `getter`, `setter`,
    /// `constructor`, `operator`.
    pub kind: String,
    #[serde(default)]
    pub instance: bool,
    #[serde(default)]
    pub params: Vec<String>,
    #[serde(default)]
    pub param_names: Vec<String>,
    pub ret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumRecord {
    pub name: String,
    pub underlying: String,
    /// Name/value pairs in declaration order.
    pub values: Vec<(String, i64)>,
}

impl CatalogFile {
    pub fn from_json(text: &str) -> Result<Self, CatalogLoadError> {
        Ok(serde_json::from_str(text)?)
    }
}

impl OperationRecord {
    pub fn kind(&self) -> Result<ExternKind, CatalogLoadError> {
        match self.kind.as_str() {
            "method" | "static-method" => Ok(ExternKind::Method),
            "getter" => Ok(ExternKind::Getter),
            "setter" => Ok(ExternKind::Setter),
            "constructor" => Ok(ExternKind::Constructor),
            "operator" => Ok(ExternKind::Operator),
            other => Err(CatalogLoadError::UnknownKind {
                id: self.id.clone(),
                kind: other.to_owned(),
            }),
        }
    }

    pub fn into_signature(self) -> Result<ExternSignature, CatalogLoadError> {
        let kind = self.kind()?;
        // The `static-method` tag carries staticness itself; a stray
        // `instance` flag on such a record is ignored.
        let instance = self.instance && self.kind != "static-method";
        Ok(ExternSignature {
            id: self.id,
            owner: self.owner,
            member: self.member,
            params: self.params,
            param_names: self.param_names,
            ret: self.ret,
            instance,
            kind,
        })
    }
}
