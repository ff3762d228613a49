//! Symbols and lexical scopes.

use lark_ir::{Span, SyncMode, Ty};
use rustc_hash::FxHashMap;

/// Dense id for every declared name. Later stages key heap slots by
/// this id, so two distinct locals that happen to share a spelling
/// never collide.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SymbolKind {
    /// Module-level variable; becomes a named heap slot.
    ModuleVar,
    /// Local variable inside a body.
    Local,
    /// Function or handler parameter.
    Param,
    /// User function. `ty` holds the return type.
    Function,
    /// `event Name { .. }` declaration.
    CustomEvent,
    /// Compiler-provided name such as `this`.
    Builtin,
}

#[derive(Clone, Debug)]
pub struct Symbol {
    pub id: SymbolId,
    pub name: String,
    pub span: Span,
    pub kind: SymbolKind,
    pub ty: Ty,
    pub export: bool,
    pub sync: SyncMode,
}

/// Signature of a user function, for call checking and lowering.
#[derive(Clone, Debug)]
pub struct FnSig {
    pub params: Vec<(SymbolId, Ty)>,
    pub ret: Ty,
}

#[derive(Default, Debug)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        span: Span,
        kind: SymbolKind,
        ty: Ty,
    ) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(Symbol {
            id,
            name: name.into(),
            span,
            kind,
            ty,
            export: false,
            sync: SyncMode::None,
        });
        id
    }

    pub fn get(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0 as usize]
    }

    pub fn get_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id.0 as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// A stack of name-to-symbol maps. The bottom scope is the module
/// scope and survives for the whole analysis; body scopes push and pop
/// around blocks.
#[derive(Default, Debug)]
pub struct ScopeStack {
    scopes: Vec<FxHashMap<String, SymbolId>>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self {
            scopes: vec![FxHashMap::default()],
        }
    }

    pub fn push(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    pub fn pop(&mut self) {
        debug_assert!(self.scopes.len() > 1, "popped the module scope");
        self.scopes.pop();
    }

    /// Declare a name in the innermost scope. On a clash in that same
    /// scope the existing symbol is returned; shadowing an outer scope
    /// is allowed.
    pub fn declare(&mut self, name: &str, id: SymbolId) -> Result<(), SymbolId> {
        let scope = self
            .scopes
            .last_mut()
            .unwrap_or_else(|| unreachable!("scope stack is never empty"));
        if let Some(&existing) = scope.get(name) {
            return Err(existing);
        }
        scope.insert(name.to_owned(), id);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).copied())
    }

    /// Every name visible from the innermost scope, for suggestions.
    pub fn visible_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .scopes
            .iter()
            .flat_map(|scope| scope.keys().cloned())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}
