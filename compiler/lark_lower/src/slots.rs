//! Heap slot allocation.
//!
//! Every value in the lowered program lives in a named heap slot, and
//! slot names share one flat namespace. The arena owns uniqueness:
//! source variables keep their spelling where possible and get a
//! deterministic `_<n>` suffix on collision, literals intern into
//! `__const_<n>` slots, and scratch values get `__t<n>`.

use lark_analyze::SymbolId;
use lark_ir::{HeapVar, SlotInit, SyncMode, Ty};
use rustc_hash::{FxHashMap, FxHashSet};

/// Interning key for literal slots. Floats are keyed by their bit
/// pattern so `0.0` and `-0.0` stay distinct.
#[derive(Clone, PartialEq, Eq, Hash)]
enum ConstKey {
    Int(i64),
    Float(u64),
    Bool(bool),
    Str(String),
    Null,
}

pub(crate) struct SlotArena {
    pub(crate) vars: Vec<HeapVar>,
    used: FxHashSet<String>,
    by_symbol: FxHashMap<SymbolId, String>,
    consts: FxHashMap<(String, ConstKey), String>,
    const_count: u32,
    temp_count: u32,
}

impl SlotArena {
    pub(crate) fn new() -> Self {
        Self {
            vars: Vec::new(),
            used: FxHashSet::default(),
            by_symbol: FxHashMap::default(),
            consts: FxHashMap::default(),
            const_count: 0,
            temp_count: 0,
        }
    }

    /// Claim `name` exactly; the caller guarantees it is a reserved
    /// platform name that nothing else may take.
    pub(crate) fn reserve(&mut self, name: &str) {
        self.used.insert(name.to_owned());
    }

    fn unique(&mut self, wanted: &str) -> String {
        if self.used.insert(wanted.to_owned()) {
            return wanted.to_owned();
        }
        let mut n = 1u32;
        loop {
            let candidate = format!("{wanted}_{n}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }

    fn push(&mut self, name: String, ty: Ty, init: Option<SlotInit>) -> String {
        self.vars.push(HeapVar {
            name: name.clone(),
            ty,
            init,
            export: false,
            sync: None,
        });
        name
    }

    /// Slot for a declared symbol. Repeat calls return the same slot.
    pub(crate) fn symbol_slot(&mut self, id: SymbolId, name: &str, ty: &Ty) -> String {
        if let Some(existing) = self.by_symbol.get(&id) {
            return existing.clone();
        }
        let slot = self.unique(name);
        let slot = self.push(slot, ty.clone(), Some(default_init(ty)));
        self.by_symbol.insert(id, slot.clone());
        slot
    }

    /// Slot bound to a fixed, runtime-mandated name (event parameters).
    pub(crate) fn fixed_symbol_slot(&mut self, id: SymbolId, name: &str, ty: &Ty) -> String {
        self.used.insert(name.to_owned());
        let slot = self.push(name.to_owned(), ty.clone(), Some(default_init(ty)));
        self.by_symbol.insert(id, slot.clone());
        slot
    }

    pub(crate) fn existing_symbol_slot(&self, id: SymbolId) -> Option<&str> {
        self.by_symbol.get(&id).map(String::as_str)
    }

    /// Configure a module variable's slot after creation.
    pub(crate) fn configure(
        &mut self,
        slot: &str,
        init: SlotInit,
        export: bool,
        sync: Option<SyncMode>,
    ) {
        if let Some(var) = self.vars.iter_mut().find(|v| v.name == slot) {
            var.init = Some(init);
            var.export = export;
            var.sync = sync;
        }
    }

    /// Interned literal slot.
    pub(crate) fn const_slot(&mut self, ty: &Ty, init: SlotInit) -> String {
        let key = (ty.platform_name(), const_key(&init));
        if let Some(existing) = self.consts.get(&key) {
            return existing.clone();
        }
        let name = format!("__const_{}", self.const_count);
        self.const_count += 1;
        self.used.insert(name.clone());
        let name = self.push(name, ty.clone(), Some(init));
        self.consts.insert(key, name.clone());
        name
    }

    /// Fresh scratch slot.
    pub(crate) fn temp(&mut self, ty: &Ty) -> String {
        let name = format!("__t{}", self.temp_count);
        self.temp_count += 1;
        self.used.insert(name.clone());
        self.push(name, ty.clone(), Some(default_init(ty)))
    }

    /// The return-address slot of a function. One per function; a
    /// second live activation would clobber it, which is why recursion
    /// is rejected upstream.
    pub(crate) fn ret_slot(&mut self, fn_name: &str) -> String {
        let name = format!("__ret_{fn_name}");
        if self.used.insert(name.clone()) {
            self.push(
                name.clone(),
                Ty::Platform("SystemUInt32".to_owned()),
                Some(SlotInit::Int(0)),
            );
        }
        name
    }

    /// The return-value slot of a function.
    pub(crate) fn retval_slot(&mut self, fn_name: &str, ty: &Ty) -> String {
        let name = format!("__retval_{fn_name}");
        if self.used.insert(name.clone()) {
            self.push(name.clone(), ty.clone(), Some(default_init(ty)));
        }
        name
    }

    /// The behaviour self-reference slot.
    pub(crate) fn this_slot(&mut self) -> String {
        let name = "__this".to_owned();
        if self.used.insert(name.clone()) {
            self.push(
                name.clone(),
                Ty::Platform("EngineBehaviour".to_owned()),
                Some(SlotInit::This),
            );
        }
        name
    }
}

fn const_key(init: &SlotInit) -> ConstKey {
    match init {
        SlotInit::Int(v) => ConstKey::Int(*v),
        SlotInit::Float(v) => ConstKey::Float(v.to_bits()),
        SlotInit::Bool(v) => ConstKey::Bool(*v),
        SlotInit::Str(v) => ConstKey::Str(v.clone()),
        SlotInit::Null | SlotInit::This => ConstKey::Null,
    }
}

/// A slot's value before anything is written to it.
fn default_init(ty: &Ty) -> SlotInit {
    match ty {
        Ty::Int => SlotInit::Int(0),
        Ty::Float | Ty::Double => SlotInit::Float(0.0),
        Ty::Bool => SlotInit::Bool(false),
        _ => SlotInit::Null,
    }
}
