//! The [`Catalog`] trait: the compiler's only window onto the target
//! platform.
//!
//! Both the built-in table and file-loaded catalogs implement this one
//! trait, so the analyzer and emitter never care where an operation
//! came from. Provided methods implement the lookups that are the same
//! for every store: base-chain walks and overload resolution.

use crate::resolve::{self, ResolveError, ResolvedOverload};
use crate::types::{
    CatalogTypeInfo, EnumTypeInfo, ExternSignature, ImplicitConversion, PropertyInfo,
};

/// Universal base of every reference type; also the boxing target for
/// value types.
pub const TOP_TYPE: &str = "SystemObject";

/// Return "type" of operations producing no value.
pub const VOID_TYPE: &str = "SystemVoid";

pub trait Catalog {
    /// Look up a type by its flattened name.
    fn type_info(&self, name: &str) -> Option<CatalogTypeInfo>;

    /// Map a source-level type spelling (`float`, `Vector3`,
    /// `UnityEngineVector3`) to its flattened platform name.
    fn resolve_type_name(&self, source_name: &str) -> Option<String>;

    /// Property declared directly on `owner` (no base-chain walk).
    fn property(&self, owner: &str, name: &str) -> Option<PropertyInfo>;

    /// Method overloads declared directly on `owner`.
    fn method_candidates(&self, owner: &str, member: &str, statik: bool) -> Vec<ExternSignature>;

    /// Operator overloads declared on `owner` (`op_Addition`, ...).
    fn operator_candidates(&self, owner: &str, op_name: &str) -> Vec<ExternSignature>;

    /// All member names declared directly on `owner`, for suggestions.
    fn member_names(&self, owner: &str) -> Vec<String>;

    /// Widening conversion the compiler may insert silently.
    fn implicit_conversion(&self, from: &str, to: &str) -> Option<ImplicitConversion>;

    fn enum_info(&self, name: &str) -> Option<EnumTypeInfo>;

    fn is_known_type(&self, name: &str) -> bool {
        self.type_info(name).is_some()
    }

    /// Is `ty` the same as `base` or a (transitive) derived type of it?
    fn derives_from(&self, ty: &str, base: &str) -> bool {
        let mut current = ty.to_owned();
        loop {
            if current == base {
                return true;
            }
            match self.type_info(&current).and_then(|info| info.base) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Property lookup walking the base chain, nearest declaration wins.
    fn find_property(&self, owner: &str, name: &str) -> Option<PropertyInfo> {
        let mut current = owner.to_owned();
        loop {
            if let Some(prop) = self.property(&current, name) {
                return Some(prop);
            }
            match self.type_info(&current).and_then(|info| info.base) {
                Some(parent) => current = parent,
                None => return None,
            }
        }
    }

    /// Method lookup walking the base chain. The nearest type that
    /// declares any overload of the name hides declarations further up.
    fn find_method_candidates(
        &self,
        owner: &str,
        member: &str,
        statik: bool,
    ) -> Vec<ExternSignature> {
        let mut current = owner.to_owned();
        loop {
            let found = self.method_candidates(&current, member, statik);
            if !found.is_empty() {
                return found;
            }
            match self.type_info(&current).and_then(|info| info.base) {
                Some(parent) => current = parent,
                None => return Vec::new(),
            }
        }
    }

    /// Every member name visible on `owner` including inherited ones,
    /// deduplicated and sorted. Suggestion fodder.
    fn all_member_names(&self, owner: &str) -> Vec<String> {
        let mut names = Vec::new();
        let mut current = owner.to_owned();
        loop {
            names.extend(self.member_names(&current));
            match self.type_info(&current).and_then(|info| info.base) {
                Some(parent) => current = parent,
                None => break,
            }
        }
        names.sort();
        names.dedup();
        names
    }

    /// Resolve a member call against every visible overload.
    fn resolve_method(
        &self,
        owner: &str,
        member: &str,
        args: &[&str],
        statik: bool,
    ) -> Result<ResolvedOverload, ResolveError> {
        let candidates = self.find_method_candidates(owner, member, statik);
        if candidates.is_empty() {
            return Err(ResolveError::UnknownMember {
                owner: owner.to_owned(),
                member: member.to_owned(),
            });
        }
        resolve::resolve_overload(self, &candidates, args)
    }

    /// Constructor overloads for `owner`.
    fn constructor_candidates(&self, owner: &str) -> Vec<ExternSignature> {
        self.method_candidates(owner, "ctor", true)
    }

    fn resolve_constructor(
        &self,
        owner: &str,
        args: &[&str],
    ) -> Result<ResolvedOverload, ResolveError> {
        let candidates = self.constructor_candidates(owner);
        if candidates.is_empty() {
            return Err(ResolveError::UnknownMember {
                owner: owner.to_owned(),
                member: "ctor".to_owned(),
            });
        }
        resolve::resolve_overload(self, &candidates, args)
    }

    /// Resolve a binary operator. Candidates are gathered from both
    /// operand types, mirroring how the source language of the platform
    /// searches operator overloads.
    fn resolve_binary_operator(
        &self,
        op_name: &str,
        lhs: &str,
        rhs: &str,
    ) -> Result<ResolvedOverload, ResolveError> {
        let mut candidates = self.operator_candidates(lhs, op_name);
        if rhs != lhs {
            for sig in self.operator_candidates(rhs, op_name) {
                if !candidates.iter().any(|c| c.id == sig.id) {
                    candidates.push(sig);
                }
            }
        }
        let candidates: Vec<ExternSignature> =
            candidates.into_iter().filter(|c| c.arity() == 2).collect();
        if candidates.is_empty() {
            return Err(ResolveError::UnknownMember {
                owner: lhs.to_owned(),
                member: op_name.to_owned(),
            });
        }
        resolve::resolve_overload(self, &candidates, &[lhs, rhs])
    }

    fn resolve_unary_operator(
        &self,
        op_name: &str,
        operand: &str,
    ) -> Result<ResolvedOverload, ResolveError> {
        let candidates: Vec<ExternSignature> = self
            .operator_candidates(operand, op_name)
            .into_iter()
            .filter(|c| c.arity() == 1)
            .collect();
        if candidates.is_empty() {
            return Err(ResolveError::UnknownMember {
                owner: operand.to_owned(),
                member: op_name.to_owned(),
            });
        }
        resolve::resolve_overload(self, &candidates, &[operand])
    }
}
