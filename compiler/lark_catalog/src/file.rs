//! Catalog backed by a loaded interchange document.
//!
//! Lookups hit the loaded tables first and fall back to the built-in
//! catalog on a miss, so a project catalog only needs to describe what
//! the built-in table lacks.

use std::path::Path;

use rustc_hash::FxHashMap;

use crate::builtin::BuiltinCatalog;
use crate::catalog::{Catalog, VOID_TYPE};
use crate::interchange::{CatalogFile, CatalogLoadError};
use crate::types::{
    CatalogTypeInfo, EnumTypeInfo, ExternKind, ExternSignature, ImplicitConversion, PropertyInfo,
};

pub struct FileCatalog {
    base: BuiltinCatalog,
    types: FxHashMap<String, CatalogTypeInfo>,
    aliases: FxHashMap<String, String>,
    methods: FxHashMap<(String, String, bool), Vec<ExternSignature>>,
    properties: FxHashMap<(String, String), PropertyInfo>,
    operators: FxHashMap<(String, String), Vec<ExternSignature>>,
    enums: FxHashMap<String, EnumTypeInfo>,
}

impl FileCatalog {
    pub fn load(path: &Path) -> Result<Self, CatalogLoadError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_document(CatalogFile::from_json(&text)?)
    }

    pub fn from_document(doc: CatalogFile) -> Result<Self, CatalogLoadError> {
        let mut catalog = Self {
            base: BuiltinCatalog::new(),
            types: FxHashMap::default(),
            aliases: FxHashMap::default(),
            methods: FxHashMap::default(),
            properties: FxHashMap::default(),
            operators: FxHashMap::default(),
            enums: FxHashMap::default(),
        };

        for record in doc.types {
            if let Some(alias) = &record.alias {
                catalog.aliases.insert(alias.clone(), record.name.clone());
            }
            catalog.types.insert(
                record.name.clone(),
                CatalogTypeInfo {
                    name: record.name,
                    base: record.base,
                    is_enum: record.is_enum,
                },
            );
        }

        for record in doc.enums {
            catalog.types.entry(record.name.clone()).or_insert_with(|| {
                CatalogTypeInfo {
                    name: record.name.clone(),
                    base: Some(crate::catalog::TOP_TYPE.to_owned()),
                    is_enum: true,
                }
            });
            catalog.enums.insert(
                record.name.clone(),
                EnumTypeInfo {
                    name: record.name,
                    underlying: record.underlying,
                    values: record.values,
                },
            );
        }

        for record in doc.operations {
            let sig = record.into_signature()?;
            match sig.kind {
                ExternKind::Getter | ExternKind::Setter => catalog.add_accessor(sig),
                ExternKind::Operator => {
                    catalog
                        .operators
                        .entry((sig.owner.clone(), sig.member.clone()))
                        .or_default()
                        .push(sig);
                }
                ExternKind::Method | ExternKind::Constructor => {
                    let key = (sig.owner.clone(), sig.member.clone(), !sig.instance);
                    catalog.methods.entry(key).or_default().push(sig);
                }
            }
        }

        Ok(catalog)
    }

    /// Fold a `get_X`/`set_X` record into the property table.
    fn add_accessor(&mut self, sig: ExternSignature) {
        let (is_getter, name) = match sig.kind {
            ExternKind::Getter => (true, sig.member.trim_start_matches("get_")),
            _ => (false, sig.member.trim_start_matches("set_")),
        };
        let name = name.to_owned();
        let ty = if is_getter {
            sig.ret.clone()
        } else {
            sig.params.first().cloned().unwrap_or_else(|| VOID_TYPE.to_owned())
        };
        let entry = self
            .properties
            .entry((sig.owner.clone(), name.clone()))
            .or_insert_with(|| PropertyInfo {
                owner: sig.owner.clone(),
                name,
                ty,
                getter: None,
                setter: None,
                instance: sig.instance,
            });
        if is_getter {
            entry.getter = Some(sig);
        } else {
            entry.setter = Some(sig);
        }
    }
}

impl Catalog for FileCatalog {
    fn type_info(&self, name: &str) -> Option<CatalogTypeInfo> {
        self.types
            .get(name)
            .cloned()
            .or_else(|| self.base.type_info(name))
    }

    fn resolve_type_name(&self, source_name: &str) -> Option<String> {
        if let Some(platform) = self.aliases.get(source_name) {
            return Some(platform.clone());
        }
        if self.types.contains_key(source_name) {
            return Some(source_name.to_owned());
        }
        self.base.resolve_type_name(source_name)
    }

    fn property(&self, owner: &str, name: &str) -> Option<PropertyInfo> {
        self.properties
            .get(&(owner.to_owned(), name.to_owned()))
            .cloned()
            .or_else(|| self.base.property(owner, name))
    }

    fn method_candidates(&self, owner: &str, member: &str, statik: bool) -> Vec<ExternSignature> {
        let mut found = self
            .methods
            .get(&(owner.to_owned(), member.to_owned(), statik))
            .cloned()
            .unwrap_or_default();
        // Loaded overloads extend the built-in set rather than hide it.
        for sig in self.base.method_candidates(owner, member, statik) {
            if !found.iter().any(|s| s.id == sig.id) {
                found.push(sig);
            }
        }
        found
    }

    fn operator_candidates(&self, owner: &str, op_name: &str) -> Vec<ExternSignature> {
        let mut found = self
            .operators
            .get(&(owner.to_owned(), op_name.to_owned()))
            .cloned()
            .unwrap_or_default();
        for sig in self.base.operator_candidates(owner, op_name) {
            if !found.iter().any(|s| s.id == sig.id) {
                found.push(sig);
            }
        }
        found
    }

    fn member_names(&self, owner: &str) -> Vec<String> {
        let mut names = self.base.member_names(owner);
        names.extend(
            self.methods
                .keys()
                .filter(|(o, _, _)| o == owner)
                .map(|(_, m, _)| m.clone()),
        );
        names.extend(
            self.properties
                .keys()
                .filter(|(o, _)| o == owner)
                .map(|(_, n)| n.clone()),
        );
        if let Some(info) = self.enums.get(owner) {
            names.extend(info.value_names().map(str::to_owned));
        }
        names
    }

    fn implicit_conversion(&self, from: &str, to: &str) -> Option<ImplicitConversion> {
        self.base.implicit_conversion(from, to)
    }

    fn enum_info(&self, name: &str) -> Option<EnumTypeInfo> {
        self.enums
            .get(name)
            .cloned()
            .or_else(|| self.base.enum_info(name))
    }
}

#[cfg(test)]
mod tests;
