//! External-operation catalog for the Lark compiler.
//!
//! The target VM can only call operations on an explicit whitelist, each
//! addressed by a flat string id. This crate owns that whitelist: the
//! data model ([`types`]), the id format ([`id`]), scored overload
//! resolution ([`resolve`]), the fixed engine-event table ([`events`]),
//! and two interchangeable stores behind the [`Catalog`] trait: a
//! hand-authored built-in table and a JSON-loaded project catalog that
//! falls back to it.

pub mod builtin;
pub mod catalog;
pub mod events;
pub mod file;
pub mod id;
pub mod interchange;
pub mod resolve;
pub mod types;

pub use builtin::BuiltinCatalog;
pub use catalog::{Catalog, TOP_TYPE, VOID_TYPE};
pub use events::{event, EventInfo, EventParam};
pub use file::FileCatalog;
pub use interchange::{CatalogFile, CatalogLoadError};
pub use resolve::{ResolveError, ResolvedOverload};
pub use types::{
    CatalogTypeInfo, EnumTypeInfo, ExternKind, ExternSignature, ImplicitConversion, PropertyInfo,
};
