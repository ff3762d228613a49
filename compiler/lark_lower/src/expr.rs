//! Expression lowering.
//!
//! `eval` turns an expression into the name of a heap slot holding its
//! value, emitting whatever instructions that takes. Implicit
//! conversions recorded by the analyzer are applied on the way out, so
//! statement lowering never has to think about them.

use lark_analyze::{AccessTarget, CallTarget};
use lark_catalog::ExternSignature;
use lark_ir::{Expr, ExprKind, Instr, InterpPart, JumpTarget, SlotInit, Ty};

use crate::lower::Lowerer;

impl Lowerer<'_> {
    /// Evaluate an expression into a slot, applying any implicit
    /// conversion the analyzer recorded for it.
    pub(crate) fn eval(&mut self, expr: &Expr) -> String {
        let raw = self.eval_raw(expr);
        let Some(conv) = self.analysis.coercions.get(&expr.id).cloned() else {
            return raw;
        };
        match conv.op {
            // A real representation change goes through its extern.
            Some(op) => self
                .call_extern(&op, None, &[raw])
                .unwrap_or_else(|| self.dummy()),
            // Reference upcasts reuse the slot unchanged.
            None => raw,
        }
    }

    /// Evaluate a call in statement position, discarding any result.
    pub(crate) fn eval_discard(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Call { callee, args } => {
                self.eval_call(expr, callee, args);
            }
            _ => {
                self.eval(expr);
            }
        }
    }

    fn eval_raw(&mut self, expr: &Expr) -> String {
        match &expr.kind {
            ExprKind::Int(v) => self.slots.const_slot(&Ty::Int, SlotInit::Int(*v)),
            ExprKind::Float(v) => self.slots.const_slot(&Ty::Float, SlotInit::Float(*v)),
            ExprKind::Str(s) => self.slots.const_slot(&Ty::Str, SlotInit::Str(s.clone())),
            ExprKind::Bool(b) => self.slots.const_slot(&Ty::Bool, SlotInit::Bool(*b)),
            ExprKind::Null => {
                let ty = self
                    .analysis
                    .ty(expr.id)
                    .cloned()
                    .unwrap_or(Ty::Object);
                self.slots.const_slot(&ty, SlotInit::Null)
            }
            ExprKind::Name(_) => self.eval_name(expr),
            ExprKind::Binary { lhs, rhs, .. } => {
                let Some(op) = self.analysis.operators.get(&expr.id).cloned() else {
                    return self.dummy();
                };
                let lhs = self.eval(lhs);
                let rhs = self.eval(rhs);
                self.apply_binary(&op, &lhs, &rhs)
            }
            ExprKind::Unary { operand, .. } => {
                let Some(op) = self.analysis.operators.get(&expr.id).cloned() else {
                    return self.dummy();
                };
                let operand = self.eval(operand);
                self.call_extern(&op, None, &[operand])
                    .unwrap_or_else(|| self.dummy())
            }
            ExprKind::Member { object, .. } => self.eval_member(expr, object),
            ExprKind::Call { callee, args } => self
                .eval_call(expr, callee, args)
                .unwrap_or_else(|| self.dummy()),
            ExprKind::Index { object, index } => {
                let Some(AccessTarget::ArrayGet(get)) =
                    self.analysis.accesses.get(&expr.id).cloned()
                else {
                    return self.dummy();
                };
                let arr = self.eval(object);
                let idx = self.eval(index);
                self.call_extern(&get, Some(arr), &[idx])
                    .unwrap_or_else(|| self.dummy())
            }
            ExprKind::Array { elems } => self.eval_array(expr, elems),
            ExprKind::Interp { parts } => self.eval_interp(expr, parts),
            ExprKind::Error => self.dummy(),
        }
    }

    fn eval_name(&mut self, expr: &Expr) -> String {
        if let Some(&sid) = self.analysis.name_refs.get(&expr.id) {
            if self.analysis.this_symbol == Some(sid) {
                return self.this.clone();
            }
            return self.symbol_slot_of(sid);
        }
        // Behaviour property sugar (`transform`, `game_object`).
        if let Some(AccessTarget::Property { getter, .. }) =
            self.analysis.accesses.get(&expr.id).cloned()
        {
            let receiver = Some(self.this.clone());
            return self
                .call_extern(&getter, receiver, &[])
                .unwrap_or_else(|| self.dummy());
        }
        self.dummy()
    }

    fn eval_member(&mut self, expr: &Expr, object: &Expr) -> String {
        match self.analysis.accesses.get(&expr.id).cloned() {
            Some(AccessTarget::Property { getter, on_this }) => {
                let receiver = self.receiver_for(&getter, on_this, Some(object));
                self.call_extern(&getter, receiver, &[])
                    .unwrap_or_else(|| self.dummy())
            }
            Some(AccessTarget::EnumValue { ty, value }) => {
                self.slots.const_slot(&ty, SlotInit::Int(value))
            }
            _ => self.dummy(),
        }
    }

    fn eval_call(&mut self, expr: &Expr, callee: &Expr, args: &[Expr]) -> Option<String> {
        match self.analysis.calls.get(&expr.id).cloned() {
            Some(CallTarget::Function(sid)) => self.eval_user_call(sid, args),
            Some(CallTarget::Extern { sig, on_this }) => {
                let object = match &callee.kind {
                    ExprKind::Member { object, .. } => Some(object.as_ref()),
                    _ => None,
                };
                let receiver = self.receiver_for(&sig, on_this, object);
                let args = self.eval_args(args);
                Some(
                    self.call_extern(&sig, receiver, &args)
                        .unwrap_or_else(|| self.dummy()),
                )
            }
            Some(CallTarget::Constructor(sig)) => {
                let args = self.eval_args(args);
                Some(
                    self.call_extern(&sig, None, &args)
                        .unwrap_or_else(|| self.dummy()),
                )
            }
            None => None,
        }
    }

    /// Lower a call to a user function: copy arguments into the callee's
    /// parameter slots, store the resume address in its return slot,
    /// jump, and land on a fresh resume label.
    fn eval_user_call(&mut self, callee: lark_analyze::SymbolId, args: &[Expr]) -> Option<String> {
        let info = self.fns.get(&callee).cloned()?;
        let arg_slots = self.eval_args(args);
        for (arg, param) in arg_slots.iter().zip(&info.param_slots) {
            self.emit_copy(arg, param);
        }
        let resume = self.fresh_label();
        self.emit(Instr::PushLabel {
            label: resume.clone(),
        });
        self.emit(Instr::Push {
            slot: info.ret_slot.clone(),
        });
        self.emit(Instr::Copy);
        self.emit(Instr::Jump {
            target: JumpTarget::Label(info.entry.clone()),
        });
        self.emit(Instr::Label { name: resume });
        // Move the shared return-value slot into a fresh temp so nested
        // calls to the same function cannot alias each other's results.
        match &info.retval {
            Some((retval, ty)) => {
                let out = self.slots.temp(ty);
                self.emit_copy(retval, &out);
                Some(out)
            }
            None => None,
        }
    }

    fn eval_args(&mut self, args: &[Expr]) -> Vec<String> {
        args.iter().map(|arg| self.eval(arg)).collect()
    }

    fn eval_array(&mut self, expr: &Expr, elems: &[Expr]) -> String {
        let Some(AccessTarget::ArrayLiteral { ctor, set }) =
            self.analysis.accesses.get(&expr.id).cloned()
        else {
            return self.dummy();
        };
        let len = self
            .slots
            .const_slot(&Ty::Int, SlotInit::Int(elems.len() as i64));
        let Some(arr) = self.call_extern(&ctor, None, &[len]) else {
            return self.dummy();
        };
        for (i, elem) in elems.iter().enumerate() {
            let idx = self.slots.const_slot(&Ty::Int, SlotInit::Int(i as i64));
            let value = self.eval(elem);
            self.call_extern(&set, Some(arr.clone()), &[idx, value]);
        }
        arr
    }

    fn eval_interp(&mut self, expr: &Expr, parts: &[InterpPart]) -> String {
        let Some(ops) = self.analysis.interp_ops.get(&expr.id).cloned() else {
            return self.dummy();
        };
        let mut pieces = Vec::with_capacity(parts.len());
        for part in parts {
            match part {
                InterpPart::Text(text) => {
                    pieces.push(
                        self.slots
                            .const_slot(&Ty::Str, SlotInit::Str(text.clone())),
                    );
                }
                InterpPart::Expr(inner) => {
                    let is_str = self.analysis.ty(inner.id) == Some(&Ty::Str);
                    let value = self.eval(inner);
                    if is_str {
                        pieces.push(value);
                    } else {
                        let text = self
                            .call_extern(&ops.to_string, None, &[value])
                            .unwrap_or_else(|| self.dummy());
                        pieces.push(text);
                    }
                }
            }
        }
        let mut pieces = pieces.into_iter();
        let Some(first) = pieces.next() else {
            return self.slots.const_slot(&Ty::Str, SlotInit::Str(String::new()));
        };
        pieces.fold(first, |acc, piece| {
            self.call_extern(&ops.concat, None, &[acc, piece])
                .unwrap_or_else(|| self.dummy())
        })
    }

    /// Emit one extern call: receiver (if instance), then arguments in
    /// order, then the output slot (if any), then the `EXTERN` itself.
    /// Returns the output slot for non-void operations.
    pub(crate) fn call_extern(
        &mut self,
        sig: &ExternSignature,
        receiver: Option<String>,
        args: &[String],
    ) -> Option<String> {
        if sig.instance {
            let receiver = receiver.unwrap_or_else(|| self.this.clone());
            self.emit(Instr::Push { slot: receiver });
        }
        for arg in args {
            self.emit(Instr::Push { slot: arg.clone() });
        }
        let out = (sig.ret != "SystemVoid").then(|| {
            let out = self.slots.temp(&Ty::from_platform_name(&sig.ret));
            self.emit(Instr::Push { slot: out.clone() });
            out
        });
        self.emit(Instr::Extern {
            signature: sig.id.clone(),
        });
        out
    }

    pub(crate) fn apply_binary(&mut self, op: &ExternSignature, lhs: &str, rhs: &str) -> String {
        self.call_extern(op, None, &[lhs.to_owned(), rhs.to_owned()])
            .unwrap_or_else(|| self.dummy())
    }

    /// Scratch slot standing in for an expression the analyzer already
    /// rejected. Keeps lowering total without inventing diagnostics.
    fn dummy(&mut self) -> String {
        self.slots.temp(&Ty::Object)
    }

    fn receiver_for(
        &mut self,
        sig: &ExternSignature,
        on_this: bool,
        object: Option<&Expr>,
    ) -> Option<String> {
        if !sig.instance {
            return None;
        }
        if on_this {
            return Some(self.this.clone());
        }
        match object {
            Some(object) if !self.analysis.type_names.contains(&object.id) => {
                Some(self.eval(object))
            }
            _ => Some(self.this.clone()),
        }
    }
}
