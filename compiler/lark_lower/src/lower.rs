//! Module and statement lowering.
//!
//! Lowering only runs on an error-free analysis, so it never reports;
//! it mechanically turns each body into one labeled instruction block.
//! Functions get a dedicated return-address slot and a `JUMP_INDIRECT`
//! epilogue; handlers and custom events terminate at the halt sentinel.

use lark_analyze::{Analysis, FnSig, StoreKind, SymbolId};
use lark_catalog::{events, ExternSignature};
use lark_ir::{
    Block, Decl, Expr, ExprKind, HandlerDecl, Instr, IrBlock, IrBlockKind, IrModule, JumpTarget,
    Module, SlotInit, Stmt, SyncMode, Ty, UnOp, VarDecl,
};
use rustc_hash::FxHashMap;

use crate::slots::SlotArena;

/// Per-function lowering facts, prepared before any body is lowered so
/// that calls can be lowered in any order.
#[derive(Clone)]
pub(crate) struct FnInfo {
    pub(crate) entry: String,
    pub(crate) param_slots: Vec<String>,
    pub(crate) ret_slot: String,
    /// Return-value slot, absent for void functions.
    pub(crate) retval: Option<(String, Ty)>,
}

pub(crate) struct LoopLabels {
    pub(crate) continue_to: String,
    pub(crate) break_to: String,
}

pub(crate) struct Lowerer<'a> {
    pub(crate) analysis: &'a Analysis,
    pub(crate) slots: SlotArena,
    pub(crate) instrs: Vec<Instr>,
    pub(crate) fns: FxHashMap<SymbolId, FnInfo>,
    pub(crate) loops: Vec<LoopLabels>,
    pub(crate) current_fn: Option<FnInfo>,
    pub(crate) this: String,
    label_count: u32,
    blocks: Vec<IrBlock>,
}

/// Lower an analyzed module to the slot IR.
pub fn lower(module: &Module, analysis: &Analysis) -> IrModule {
    tracing::debug!(decls = module.decls.len(), "lowering module");
    let mut slots = SlotArena::new();
    let this = slots.this_slot();

    let mut lowerer = Lowerer {
        analysis,
        slots,
        instrs: Vec::new(),
        fns: FxHashMap::default(),
        loops: Vec::new(),
        current_fn: None,
        this,
        label_count: 0,
        blocks: Vec::new(),
    };

    lowerer.reserve_event_slots(module);
    lowerer.declare_module_vars(module);
    lowerer.declare_functions(module);
    lowerer.lower_bodies(module);

    IrModule {
        vars: lowerer.slots.vars,
        blocks: lowerer.blocks,
    }
}

impl Lowerer<'_> {
    /// Parameterized event handlers receive their argument through a
    /// runtime-mandated slot name; claim those names before any user
    /// variable can take them.
    fn reserve_event_slots(&mut self, module: &Module) {
        for decl in &module.decls {
            if let Decl::Handler(h) = decl {
                if h.param.is_some() {
                    if let Some(param) = events::event(&h.event).and_then(|e| e.param) {
                        self.slots.reserve(param.slot);
                    }
                }
            }
        }
    }

    fn declare_module_vars(&mut self, module: &Module) {
        for decl in &module.decls {
            let Decl::Variable(var) = decl else { continue };
            let Some(&id) = self.analysis.decl_symbols.get(&var.name_span) else {
                continue;
            };
            let ty = self.analysis.symbols.get(id).ty.clone();
            let slot = self.slots.symbol_slot(id, &var.name, &ty);
            let init = var
                .init
                .as_ref()
                .map(|expr| literal_slot_init(expr, &ty))
                .unwrap_or_else(|| default_slot_init(&ty));
            let sync = var.sync.filter(|mode| *mode != SyncMode::None);
            self.slots.configure(&slot, init, var.export, sync);
        }
    }

    fn declare_functions(&mut self, module: &Module) {
        for decl in &module.decls {
            let Decl::Function(f) = decl else { continue };
            let Some(&id) = self.analysis.decl_symbols.get(&f.name_span) else {
                continue;
            };
            let Some(sig) = self.analysis.fn_sigs.get(&id) else {
                continue;
            };
            let info = self.prepare_function(&f.name, sig);
            self.fns.insert(id, info);
        }
    }

    fn prepare_function(&mut self, name: &str, sig: &FnSig) -> FnInfo {
        let param_slots = sig
            .params
            .iter()
            .map(|(pid, ty)| {
                let pname = self.analysis.symbols.get(*pid).name.clone();
                self.slots.symbol_slot(*pid, &pname, ty)
            })
            .collect();
        let ret_slot = self.slots.ret_slot(name);
        let retval = (!sig.ret.is_void())
            .then(|| (self.slots.retval_slot(name, &sig.ret), sig.ret.clone()));
        FnInfo {
            entry: format!("__fn_{name}"),
            param_slots,
            ret_slot,
            retval,
        }
    }

    fn lower_bodies(&mut self, module: &Module) {
        for decl in &module.decls {
            match decl {
                Decl::Variable(_) => {}
                Decl::Handler(h) => self.lower_handler(h),
                Decl::CustomEvent(e) => {
                    self.lower_event_block(e.name.clone(), IrBlockKind::CustomEvent, &e.body);
                }
                Decl::Function(f) => self.lower_function(f),
            }
        }
    }

    fn lower_handler(&mut self, h: &HandlerDecl) {
        let Some(info) = events::event(&h.event) else {
            return;
        };
        // Bind the handler's parameter to its fixed platform slot.
        if let (Some(param), Some(event_param)) = (&h.param, info.param) {
            if let Some(&pid) = self.analysis.decl_symbols.get(&param.name_span) {
                let ty = Ty::from_platform_name(event_param.ty);
                self.slots.fixed_symbol_slot(pid, event_param.slot, &ty);
            }
        }
        self.lower_event_block(
            h.event.clone(),
            IrBlockKind::Handler {
                event: h.event.clone(),
            },
            &h.body,
        );
    }

    fn lower_event_block(&mut self, label: String, kind: IrBlockKind, body: &Block) {
        self.instrs.clear();
        self.current_fn = None;
        self.lower_block(body);
        if !matches!(
            self.instrs.last(),
            Some(Instr::Jump {
                target: JumpTarget::Halt
            })
        ) {
            self.instrs.push(Instr::Jump {
                target: JumpTarget::Halt,
            });
        }
        self.blocks.push(IrBlock {
            label,
            kind,
            export: true,
            instrs: std::mem::take(&mut self.instrs),
        });
    }

    fn lower_function(&mut self, f: &lark_ir::FnDecl) {
        let Some(&id) = self.analysis.decl_symbols.get(&f.name_span) else {
            return;
        };
        let Some(info) = self.fns.get(&id).cloned() else {
            return;
        };

        self.instrs.clear();
        self.current_fn = Some(info.clone());
        self.lower_block(&f.body);
        let epilogue = Instr::JumpIndirect {
            slot: info.ret_slot.clone(),
        };
        if self.instrs.last() != Some(&epilogue) {
            self.instrs.push(epilogue);
        }
        self.current_fn = None;
        self.blocks.push(IrBlock {
            label: info.entry,
            kind: IrBlockKind::Function,
            export: false,
            instrs: std::mem::take(&mut self.instrs),
        });
    }

    pub(crate) fn fresh_label(&mut self) -> String {
        let label = format!("__lbl_{}", self.label_count);
        self.label_count += 1;
        label
    }

    pub(crate) fn emit(&mut self, instr: Instr) {
        self.instrs.push(instr);
    }

    /// `COPY` pops destination then source: push source, push
    /// destination, copy.
    pub(crate) fn emit_copy(&mut self, src: &str, dst: &str) {
        self.emit(Instr::Push {
            slot: src.to_owned(),
        });
        self.emit(Instr::Push {
            slot: dst.to_owned(),
        });
        self.emit(Instr::Copy);
    }

    fn lower_block(&mut self, block: &Block) {
        for stmt in &block.stmts {
            self.lower_stmt(stmt);
        }
    }

    fn lower_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Let(var) => self.lower_let(var),
            Stmt::Assign { target, value, .. } => self.lower_assign(target, value),
            Stmt::If {
                cond,
                then_block,
                else_block,
                ..
            } => self.lower_if(cond, then_block, else_block.as_ref()),
            Stmt::While { cond, body, .. } => self.lower_while(cond, body),
            Stmt::ForRange {
                var_span,
                start,
                end,
                body,
                ..
            } => self.lower_for_range(*var_span, start, end, body),
            Stmt::ForEach {
                var_span,
                iter,
                body,
                ..
            } => self.lower_for_each(*var_span, iter, body),
            Stmt::Return { value, .. } => self.lower_return(value.as_ref()),
            Stmt::Break { .. } => {
                if let Some(labels) = self.loops.last() {
                    let target = labels.break_to.clone();
                    self.emit(Instr::Jump {
                        target: JumpTarget::Label(target),
                    });
                }
            }
            Stmt::Continue { .. } => {
                if let Some(labels) = self.loops.last() {
                    let target = labels.continue_to.clone();
                    self.emit(Instr::Jump {
                        target: JumpTarget::Label(target),
                    });
                }
            }
            Stmt::Send { event, event_span, .. } => self.lower_send(event, *event_span),
            Stmt::Expr(expr) => self.eval_discard(expr),
        }
    }

    fn lower_let(&mut self, var: &VarDecl) {
        let Some(&id) = self.analysis.decl_symbols.get(&var.name_span) else {
            return;
        };
        let ty = self.analysis.symbols.get(id).ty.clone();
        let slot = self.slots.symbol_slot(id, &var.name, &ty);
        if let Some(init) = &var.init {
            let value = self.eval(init);
            self.emit_copy(&value, &slot);
        }
    }

    fn lower_assign(&mut self, target: &Expr, value: &Expr) {
        let Some(store) = self.analysis.stores.get(&target.id).cloned() else {
            return;
        };
        match &store.kind {
            StoreKind::Var(id) => {
                let slot = self.symbol_slot_of(*id);
                let value_slot = self.eval(value);
                let new_value = match &store.op {
                    Some(op) => self.apply_binary(op, &slot, &value_slot),
                    None => value_slot,
                };
                self.emit_copy(&new_value, &slot);
            }
            StoreKind::Property {
                setter,
                getter,
                on_this,
            } => {
                let receiver = self.store_receiver(target, setter.instance, *on_this);
                let value_slot = self.eval(value);
                let new_value = match (&store.op, getter) {
                    (Some(op), Some(getter)) => {
                        let old = self.call_extern(getter, receiver.clone(), &[]);
                        let old = old.unwrap_or_else(|| value_slot.clone());
                        self.apply_binary(op, &old, &value_slot)
                    }
                    _ => value_slot,
                };
                self.call_extern(setter, receiver, &[new_value]);
            }
            StoreKind::ArrayElem { set, get } => {
                let ExprKind::Index { object, index } = &target.kind else {
                    return;
                };
                let arr = self.eval(object);
                let idx = self.eval(index);
                let value_slot = self.eval(value);
                let new_value = match &store.op {
                    Some(op) => {
                        let old = self.call_extern(get, Some(arr.clone()), &[idx.clone()]);
                        let old = old.unwrap_or_else(|| value_slot.clone());
                        self.apply_binary(op, &old, &value_slot)
                    }
                    None => value_slot,
                };
                self.call_extern(set, Some(arr), &[idx, new_value]);
            }
        }
    }

    /// Receiver slot for a property store: the evaluated object of the
    /// member expression, `__this` for behaviour sugar, or nothing for
    /// static properties.
    fn store_receiver(
        &mut self,
        target: &Expr,
        instance: bool,
        on_this: bool,
    ) -> Option<String> {
        if !instance {
            return None;
        }
        if on_this {
            return Some(self.this.clone());
        }
        if let ExprKind::Member { object, .. } = &target.kind {
            if self.analysis.type_names.contains(&object.id) {
                return None;
            }
            return Some(self.eval(object));
        }
        Some(self.this.clone())
    }

    fn lower_if(&mut self, cond: &Expr, then_block: &Block, else_block: Option<&Block>) {
        let cond_slot = self.eval(cond);
        match else_block {
            Some(else_block) => {
                let else_label = self.fresh_label();
                let end_label = self.fresh_label();
                self.emit(Instr::Push { slot: cond_slot });
                self.emit(Instr::JumpIfFalse {
                    target: else_label.clone(),
                });
                self.lower_block(then_block);
                self.emit(Instr::Jump {
                    target: JumpTarget::Label(end_label.clone()),
                });
                self.emit(Instr::Label { name: else_label });
                self.lower_block(else_block);
                self.emit(Instr::Label { name: end_label });
            }
            None => {
                let end_label = self.fresh_label();
                self.emit(Instr::Push { slot: cond_slot });
                self.emit(Instr::JumpIfFalse {
                    target: end_label.clone(),
                });
                self.lower_block(then_block);
                self.emit(Instr::Label { name: end_label });
            }
        }
    }

    fn lower_while(&mut self, cond: &Expr, body: &Block) {
        let test_label = self.fresh_label();
        let end_label = self.fresh_label();
        self.emit(Instr::Label {
            name: test_label.clone(),
        });
        let cond_slot = self.eval(cond);
        self.emit(Instr::Push { slot: cond_slot });
        self.emit(Instr::JumpIfFalse {
            target: end_label.clone(),
        });
        self.loops.push(LoopLabels {
            continue_to: test_label.clone(),
            break_to: end_label.clone(),
        });
        self.lower_block(body);
        self.loops.pop();
        self.emit(Instr::Jump {
            target: JumpTarget::Label(test_label),
        });
        self.emit(Instr::Label { name: end_label });
    }

    fn lower_for_range(&mut self, var_span: lark_ir::Span, start: &Expr, end: &Expr, body: &Block) {
        let Some(&vid) = self.analysis.decl_symbols.get(&var_span) else {
            return;
        };
        let Some(ops) = self.analysis.loops.get(&var_span).cloned() else {
            return;
        };
        let name = self.analysis.symbols.get(vid).name.clone();
        let var_slot = self.slots.symbol_slot(vid, &name, &Ty::Int);

        let start_slot = self.eval(start);
        self.emit_copy(&start_slot, &var_slot);
        // The bound is evaluated once, before the first iteration.
        let end_value = self.eval(end);
        let bound = self.slots.temp(&Ty::Int);
        self.emit_copy(&end_value, &bound);

        let test_label = self.fresh_label();
        let step_label = self.fresh_label();
        let end_label = self.fresh_label();

        self.emit(Instr::Label {
            name: test_label.clone(),
        });
        let cond = self.slots.temp(&Ty::Bool);
        self.emit(Instr::Push {
            slot: var_slot.clone(),
        });
        self.emit(Instr::Push {
            slot: bound.clone(),
        });
        self.emit(Instr::Push { slot: cond.clone() });
        self.emit(Instr::Extern {
            signature: ops.less_than.id.clone(),
        });
        self.emit(Instr::Push { slot: cond });
        self.emit(Instr::JumpIfFalse {
            target: end_label.clone(),
        });

        self.loops.push(LoopLabels {
            continue_to: step_label.clone(),
            break_to: end_label.clone(),
        });
        self.lower_block(body);
        self.loops.pop();

        self.emit(Instr::Label {
            name: step_label,
        });
        self.increment(&var_slot, &ops.step);
        self.emit(Instr::Jump {
            target: JumpTarget::Label(test_label),
        });
        self.emit(Instr::Label { name: end_label });
    }

    fn lower_for_each(&mut self, var_span: lark_ir::Span, iter: &Expr, body: &Block) {
        let Some(&vid) = self.analysis.decl_symbols.get(&var_span) else {
            return;
        };
        let Some(ops) = self.analysis.loops.get(&var_span).cloned() else {
            return;
        };
        let Some(iter_ops) = ops.iter.clone() else {
            return;
        };
        let elem_ty = self.analysis.symbols.get(vid).ty.clone();
        let name = self.analysis.symbols.get(vid).name.clone();
        let var_slot = self.slots.symbol_slot(vid, &name, &elem_ty);

        let arr = self.eval(iter);
        let len = self.slots.temp(&Ty::Int);
        self.emit(Instr::Push { slot: arr.clone() });
        self.emit(Instr::Push { slot: len.clone() });
        self.emit(Instr::Extern {
            signature: iter_ops.length.id.clone(),
        });

        let idx = self.slots.temp(&Ty::Int);
        let zero = self.slots.const_slot(&Ty::Int, SlotInit::Int(0));
        self.emit_copy(&zero, &idx);

        let test_label = self.fresh_label();
        let step_label = self.fresh_label();
        let end_label = self.fresh_label();

        self.emit(Instr::Label {
            name: test_label.clone(),
        });
        let cond = self.slots.temp(&Ty::Bool);
        self.emit(Instr::Push { slot: idx.clone() });
        self.emit(Instr::Push { slot: len.clone() });
        self.emit(Instr::Push { slot: cond.clone() });
        self.emit(Instr::Extern {
            signature: ops.less_than.id.clone(),
        });
        self.emit(Instr::Push { slot: cond });
        self.emit(Instr::JumpIfFalse {
            target: end_label.clone(),
        });

        // Load the current element into the loop variable.
        self.emit(Instr::Push { slot: arr.clone() });
        self.emit(Instr::Push { slot: idx.clone() });
        self.emit(Instr::Push {
            slot: var_slot.clone(),
        });
        self.emit(Instr::Extern {
            signature: iter_ops.get.id.clone(),
        });

        self.loops.push(LoopLabels {
            continue_to: step_label.clone(),
            break_to: end_label.clone(),
        });
        self.lower_block(body);
        self.loops.pop();

        self.emit(Instr::Label { name: step_label });
        self.increment(&idx, &ops.step);
        self.emit(Instr::Jump {
            target: JumpTarget::Label(test_label),
        });
        self.emit(Instr::Label { name: end_label });
    }

    /// `slot = slot + 1` through the loop's recorded step extern.
    fn increment(&mut self, slot: &str, step: &ExternSignature) {
        let one = self.slots.const_slot(&Ty::Int, SlotInit::Int(1));
        let next = self.slots.temp(&Ty::Int);
        self.emit(Instr::Push {
            slot: slot.to_owned(),
        });
        self.emit(Instr::Push { slot: one });
        self.emit(Instr::Push { slot: next.clone() });
        self.emit(Instr::Extern {
            signature: step.id.clone(),
        });
        self.emit_copy(&next, slot);
    }

    fn lower_return(&mut self, value: Option<&Expr>) {
        match self.current_fn.clone() {
            Some(info) => {
                if let (Some(value), Some((retval, _))) = (value, &info.retval) {
                    let slot = self.eval(value);
                    self.emit_copy(&slot, retval);
                }
                self.emit(Instr::JumpIndirect {
                    slot: info.ret_slot,
                });
            }
            None => {
                // `return` in a handler or custom event ends the block.
                self.emit(Instr::Jump {
                    target: JumpTarget::Halt,
                });
            }
        }
    }

    fn lower_send(&mut self, event: &str, event_span: lark_ir::Span) {
        let Some(sig) = self.analysis.sends.get(&event_span).cloned() else {
            return;
        };
        let name = self
            .slots
            .const_slot(&Ty::Str, SlotInit::Str(event.to_owned()));
        let receiver = Some(self.this.clone());
        self.call_extern(&sig, receiver, &[name]);
    }

    pub(crate) fn symbol_slot_of(&mut self, id: SymbolId) -> String {
        if let Some(slot) = self.slots.existing_symbol_slot(id) {
            return slot.to_owned();
        }
        let sym = self.analysis.symbols.get(id);
        let (name, ty) = (sym.name.clone(), sym.ty.clone());
        self.slots.symbol_slot(id, &name, &ty)
    }
}

/// Initial value of a module variable's slot, read from its literal
/// initializer. Integer literals take the slot's float representation
/// when the annotation widens them.
fn literal_slot_init(expr: &Expr, ty: &Ty) -> SlotInit {
    match &expr.kind {
        ExprKind::Int(v) => match ty {
            Ty::Float | Ty::Double => SlotInit::Float(*v as f64),
            _ => SlotInit::Int(*v),
        },
        ExprKind::Float(v) => SlotInit::Float(*v),
        ExprKind::Str(s) => SlotInit::Str(s.clone()),
        ExprKind::Bool(b) => SlotInit::Bool(*b),
        ExprKind::Null => SlotInit::Null,
        ExprKind::Unary {
            op: UnOp::Neg,
            operand,
        } => match literal_slot_init(operand, ty) {
            SlotInit::Int(v) => SlotInit::Int(-v),
            SlotInit::Float(v) => SlotInit::Float(-v),
            other => other,
        },
        _ => default_slot_init(ty),
    }
}

fn default_slot_init(ty: &Ty) -> SlotInit {
    match ty {
        Ty::Int => SlotInit::Int(0),
        Ty::Float | Ty::Double => SlotInit::Float(0.0),
        Ty::Bool => SlotInit::Bool(false),
        _ => SlotInit::Null,
    }
}
