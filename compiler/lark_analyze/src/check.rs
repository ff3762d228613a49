//! Declaration collection and statement checking.
//!
//! Analysis runs in three passes: collect every module-level
//! declaration (so bodies can call functions declared later), check
//! each body, then run cycle detection over the resolved call graph.

use lark_catalog::{events, Catalog, ExternSignature, ResolveError};
use lark_diagnostic::{Diagnostic, DiagnosticBag, ErrorCode};
use lark_ir::{
    Block, Decl, Expr, ExprKind, HandlerDecl, Module, Span, Stmt, SyncMode, Ty, TypeRef, UnOp,
    VarDecl,
};
use rustc_hash::FxHashMap;

use crate::analysis::{Analysis, CallEdge, IterOps, LoopOps, Store, StoreKind};
use crate::suggest;
use crate::symbols::{FnSig, ScopeStack, SymbolId, SymbolKind};

/// The behaviour type the compiled module itself is an instance of.
pub(crate) const SELF_TYPE: &str = "EngineBehaviour";

pub(crate) struct Checker<'a> {
    pub(crate) catalog: &'a dyn Catalog,
    pub(crate) bag: &'a mut DiagnosticBag,
    pub(crate) out: Analysis,
    pub(crate) scopes: ScopeStack,
    /// Function bodies are checked with this set, for call edges and
    /// return checking.
    pub(crate) current_fn: Option<SymbolId>,
    pub(crate) current_ret: Ty,
    pub(crate) loop_depth: u32,
    /// Writes to synced variables in the body being checked.
    sync_writes: Vec<(Span, String)>,
    /// Did the body being checked request serialization anywhere?
    requested_sync: bool,
}

/// Run the full analysis over a parsed module.
pub fn analyze(module: &Module, catalog: &dyn Catalog, bag: &mut DiagnosticBag) -> Analysis {
    tracing::debug!(decls = module.decls.len(), "analyzing module");
    let mut checker = Checker {
        catalog,
        bag,
        out: Analysis::default(),
        scopes: ScopeStack::new(),
        current_fn: None,
        current_ret: Ty::Void,
        loop_depth: 0,
        sync_writes: Vec::new(),
        requested_sync: false,
    };
    checker.declare_builtins();
    checker.collect(module);
    checker.check_bodies(module);
    crate::cycles::check_cycles(&checker.out, checker.bag);
    checker.out
}

impl Checker<'_> {
    fn declare_builtins(&mut self) {
        let this = self.out.symbols.insert(
            "this",
            Span::DUMMY,
            SymbolKind::Builtin,
            Ty::Platform(SELF_TYPE.to_owned()),
        );
        // The module scope is the bottom of the stack; `this` can be
        // shadowed like any other name.
        let _ = self.scopes.declare("this", this);
        self.out.this_symbol = Some(this);
    }

    // ---- pass 1: declarations ----

    fn collect(&mut self, module: &Module) {
        let mut seen_handlers: FxHashMap<&str, Span> = FxHashMap::default();
        for decl in &module.decls {
            match decl {
                Decl::Variable(var) => self.collect_variable(var),
                Decl::Function(f) => self.collect_function(f),
                Decl::CustomEvent(e) => {
                    let id = self.out.symbols.insert(
                        e.name.clone(),
                        e.name_span,
                        SymbolKind::CustomEvent,
                        Ty::Void,
                    );
                    self.declare_module_name(&e.name, e.name_span, id);
                }
                Decl::Handler(h) => {
                    self.collect_handler(h, &mut seen_handlers);
                }
            }
        }
    }

    fn collect_variable(&mut self, var: &VarDecl) {
        let ty = self.module_var_type(var);
        let ty = ty.unwrap_or(Ty::Object);

        if let Some(mode) = var.sync {
            if mode != SyncMode::None && !ty.is_numeric() {
                self.bag.push(
                    Diagnostic::error(ErrorCode::E6002)
                        .with_message(format!(
                            "sync mode `{}` requires a numeric variable, but `{}` is `{ty}`",
                            mode.as_str(),
                            var.name
                        ))
                        .with_label(var.name_span, "declared here"),
                );
            }
        }

        let id =
            self.out
                .symbols
                .insert(var.name.clone(), var.name_span, SymbolKind::ModuleVar, ty);
        {
            let sym = self.out.symbols.get_mut(id);
            sym.export = var.export;
            sym.sync = var.sync.unwrap_or(SyncMode::None);
        }
        self.declare_module_name(&var.name, var.name_span, id);
    }

    /// Resolve a module variable's type and validate its initializer,
    /// which must be a literal: module variables become heap slots with
    /// a baked-in initial value.
    fn module_var_type(&mut self, var: &VarDecl) -> Option<Ty> {
        let annotated = match &var.ty {
            Some(tr) => Some(self.resolve_type(tr)?),
            None => None,
        };

        let literal = match &var.init {
            Some(init) => {
                if !is_literal_init(init) {
                    self.bag.push(
                        Diagnostic::error(ErrorCode::E2012)
                            .with_message(format!(
                                "initializer of module variable `{}` must be a literal",
                                var.name
                            ))
                            .with_label(init.span, "computed at runtime")
                            .with_note("move the computation into an `on Start` handler"),
                    );
                    return annotated;
                }
                Some(literal_type(init))
            }
            None => None,
        };

        match (annotated, literal) {
            (Some(ann), Some(lit)) => {
                if !literal_fits(&lit, &ann) {
                    self.bag.push(
                        Diagnostic::error(ErrorCode::E2001)
                            .with_message(format!(
                                "`{}` is declared `{ann}` but initialized with `{lit}`",
                                var.name
                            ))
                            .with_label(
                                var.init.as_ref().map_or(var.span, |i| i.span),
                                format!("this is `{lit}`"),
                            ),
                    );
                }
                Some(ann)
            }
            (Some(ann), None) => Some(ann),
            (None, Some(Ty::Object)) | (None, None) => {
                // `null` or nothing: no type to infer from.
                self.bag.push(
                    Diagnostic::error(ErrorCode::E2009)
                        .with_message(format!("cannot infer the type of `{}`", var.name))
                        .with_label(var.name_span, "needs a type annotation"),
                );
                None
            }
            (None, Some(lit)) => Some(lit),
        }
    }

    fn collect_function(&mut self, f: &lark_ir::FnDecl) {
        if let Some(span) = f.generics_span {
            self.bag.push(
                Diagnostic::error(ErrorCode::E4002)
                    .with_message("the target platform has no generics")
                    .with_label(span, "type parameters are not supported"),
            );
        }

        let ret = match &f.ret {
            Some(tr) => self.resolve_type(tr).unwrap_or(Ty::Void),
            None => Ty::Void,
        };
        let id = self
            .out
            .symbols
            .insert(f.name.clone(), f.name_span, SymbolKind::Function, ret.clone());

        let mut params = Vec::with_capacity(f.params.len());
        let mut seen: FxHashMap<&str, Span> = FxHashMap::default();
        for param in &f.params {
            if let Some(&first) = seen.get(param.name.as_str()) {
                self.duplicate(&param.name, param.name_span, first);
            } else {
                seen.insert(&param.name, param.name_span);
            }
            let ty = self.resolve_type(&param.ty).unwrap_or(Ty::Object);
            let pid = self.out.symbols.insert(
                param.name.clone(),
                param.name_span,
                SymbolKind::Param,
                ty.clone(),
            );
            self.out.decl_symbols.insert(param.name_span, pid);
            params.push((pid, ty));
        }
        self.out.fn_sigs.insert(id, FnSig { params, ret });
        self.declare_module_name(&f.name, f.name_span, id);
    }

    fn collect_handler(&mut self, h: &HandlerDecl, seen: &mut FxHashMap<&str, Span>) {
        let Some(info) = events::event(&h.event) else {
            let names = events::all_events().iter().map(|e| e.name);
            let mut d = Diagnostic::error(ErrorCode::E4003)
                .with_message(format!("`{}` is not a platform event", h.event))
                .with_label(h.event_span, "unknown event");
            if let Some(close) = suggest::closest(&h.event, names) {
                d = d.with_suggestion(format!("did you mean `{close}`?"));
            }
            self.bag.push(d);
            return;
        };

        if let Some(&first) = seen.get(info.name) {
            self.bag.push(
                Diagnostic::error(ErrorCode::E3002)
                    .with_message(format!("event `{}` already has a handler", info.name))
                    .with_label(h.event_span, "second handler here")
                    .with_secondary_label(first, "first handler here"),
            );
            return;
        }
        seen.insert(info.name, h.event_span);

        match (&h.param, info.param) {
            (Some(param), None) => {
                self.bag.push(
                    Diagnostic::error(ErrorCode::E2001)
                        .with_message(format!("event `{}` passes no parameter", info.name))
                        .with_label(param.name_span, "unexpected parameter"),
                );
            }
            (Some(param), Some(event_param)) => {
                let expected = Ty::from_platform_name(event_param.ty);
                if let Some(declared) = self.resolve_type(&param.ty) {
                    if declared != expected {
                        self.bag.push(
                            Diagnostic::error(ErrorCode::E2001)
                                .with_message(format!(
                                    "event `{}` passes a `{expected}`, not `{declared}`",
                                    info.name
                                ))
                                .with_label(param.ty.span(), format!("expected `{expected}`")),
                        );
                    }
                }
            }
            (None, _) => {}
        }
    }

    fn declare_module_name(&mut self, name: &str, span: Span, id: SymbolId) {
        if let Err(existing) = self.scopes.declare(name, id) {
            let first = self.out.symbols.get(existing).span;
            self.duplicate(name, span, first);
        } else {
            self.out.decl_symbols.insert(span, id);
        }
    }

    fn duplicate(&mut self, name: &str, span: Span, first: Span) {
        self.bag.push(
            Diagnostic::error(ErrorCode::E3002)
                .with_message(format!("`{name}` is already declared"))
                .with_label(span, "redeclared here")
                .with_secondary_label(first, "first declared here"),
        );
    }

    // ---- pass 2: bodies ----

    fn check_bodies(&mut self, module: &Module) {
        for decl in &module.decls {
            match decl {
                Decl::Variable(_) => {}
                Decl::Function(f) => {
                    let Some(&id) = self
                        .out
                        .decl_symbols
                        .get(&f.name_span)
                        .filter(|&&id| self.out.symbols.get(id).kind == SymbolKind::Function)
                    else {
                        continue;
                    };
                    self.current_fn = Some(id);
                    self.current_ret = self.out.symbols.get(id).ty.clone();
                    let params: Vec<(SymbolId, String)> = self.out.fn_sigs[&id]
                        .params
                        .iter()
                        .zip(&f.params)
                        .map(|(&(pid, _), p)| (pid, p.name.clone()))
                        .collect();
                    self.check_body(&f.body, &params);
                    self.current_fn = None;
                    self.current_ret = Ty::Void;
                }
                Decl::Handler(h) => {
                    let params = self.handler_param(h);
                    self.check_body(&h.body, &params);
                }
                Decl::CustomEvent(e) => {
                    self.check_body(&e.body, &[]);
                }
            }
        }
    }

    fn handler_param(&mut self, h: &HandlerDecl) -> Vec<(SymbolId, String)> {
        let (Some(param), Some(info)) = (&h.param, events::event(&h.event)) else {
            return Vec::new();
        };
        let Some(event_param) = info.param else {
            return Vec::new();
        };
        let ty = Ty::from_platform_name(event_param.ty);
        let id = self
            .out
            .symbols
            .insert(param.name.clone(), param.name_span, SymbolKind::Param, ty);
        self.out.decl_symbols.insert(param.name_span, id);
        vec![(id, param.name.clone())]
    }

    fn check_body(&mut self, body: &Block, params: &[(SymbolId, String)]) {
        self.sync_writes.clear();
        self.requested_sync = false;

        self.scopes.push();
        for (id, name) in params {
            // Parameter clashes were reported during collection.
            let _ = self.scopes.declare(name, *id);
        }
        self.check_block_stmts(body);
        self.scopes.pop();

        if !self.requested_sync {
            for (span, name) in std::mem::take(&mut self.sync_writes) {
                self.bag.push(
                    Diagnostic::warning(ErrorCode::E6001)
                        .with_message(format!(
                            "synced variable `{name}` is written but this body never \
                             calls `request_sync()`"
                        ))
                        .with_label(span, "write may not replicate"),
                );
            }
        }
    }

    fn check_block(&mut self, block: &Block) {
        self.scopes.push();
        self.check_block_stmts(block);
        self.scopes.pop();
    }

    fn check_block_stmts(&mut self, block: &Block) {
        for stmt in &block.stmts {
            self.check_stmt(stmt);
        }
    }

    fn check_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Let(var) => self.check_local(var),
            Stmt::Assign {
                target,
                op,
                value,
                span,
            } => self.check_assign(target, *op, value, *span),
            Stmt::If {
                cond,
                then_block,
                else_block,
                ..
            } => {
                self.check_condition(cond);
                self.check_block(then_block);
                if let Some(else_block) = else_block {
                    self.check_block(else_block);
                }
            }
            Stmt::While { cond, body, .. } => {
                self.check_condition(cond);
                self.loop_depth += 1;
                self.check_block(body);
                self.loop_depth -= 1;
            }
            Stmt::ForRange {
                var,
                var_span,
                start,
                end,
                body,
                ..
            } => {
                self.check_int_bound(start);
                self.check_int_bound(end);
                if let Some((less_than, step)) = self.int_loop_ops(*var_span) {
                    self.out.loops.insert(
                        *var_span,
                        LoopOps {
                            less_than,
                            step,
                            iter: None,
                        },
                    );
                }
                self.scopes.push();
                let id = self
                    .out
                    .symbols
                    .insert(var.clone(), *var_span, SymbolKind::Local, Ty::Int);
                self.out.decl_symbols.insert(*var_span, id);
                let _ = self.scopes.declare(var, id);
                self.loop_depth += 1;
                self.check_block_stmts(body);
                self.loop_depth -= 1;
                self.scopes.pop();
            }
            Stmt::ForEach {
                var,
                var_span,
                iter,
                body,
                ..
            } => {
                let mut iter_ops = None;
                let elem = match self.check_expr(iter) {
                    Some(Ty::Array(elem)) => {
                        iter_ops = self.resolve_iter_ops(&elem, iter.span);
                        *elem
                    }
                    Some(other) => {
                        self.bag.push(
                            Diagnostic::error(ErrorCode::E2007)
                                .with_message(format!("`for` needs an array, found `{other}`"))
                                .with_label(iter.span, "not an array"),
                        );
                        Ty::Object
                    }
                    None => Ty::Object,
                };
                if let Some(iter_ops) = iter_ops {
                    if let Some((less_than, step)) = self.int_loop_ops(iter.span) {
                        self.out.loops.insert(
                            *var_span,
                            LoopOps {
                                less_than,
                                step,
                                iter: Some(iter_ops),
                            },
                        );
                    }
                }
                self.scopes.push();
                let id = self
                    .out
                    .symbols
                    .insert(var.clone(), *var_span, SymbolKind::Local, elem);
                self.out.decl_symbols.insert(*var_span, id);
                let _ = self.scopes.declare(var, id);
                self.loop_depth += 1;
                self.check_block_stmts(body);
                self.loop_depth -= 1;
                self.scopes.pop();
            }
            Stmt::Return { value, span } => self.check_return(value.as_ref(), *span),
            Stmt::Break { span } | Stmt::Continue { span } => {
                if self.loop_depth == 0 {
                    let word = if matches!(stmt, Stmt::Break { .. }) {
                        "break"
                    } else {
                        "continue"
                    };
                    self.bag.push(
                        Diagnostic::error(ErrorCode::E2005)
                            .with_message(format!("`{word}` outside a loop"))
                            .with_label(*span, "not inside any loop"),
                    );
                }
            }
            Stmt::Send {
                event, event_span, ..
            } => self.check_send(event, *event_span),
            Stmt::Expr(expr) => {
                let _ = self.check_expr(expr);
            }
        }
    }

    fn check_local(&mut self, var: &VarDecl) {
        let annotated = var.ty.as_ref().and_then(|tr| self.resolve_type(tr));
        let init_ty = var.init.as_ref().and_then(|init| {
            let ty = self.check_expr(init)?;
            if ty.is_void() {
                self.bag.push(
                    Diagnostic::error(ErrorCode::E2008)
                        .with_message("initializer produces no value")
                        .with_label(init.span, "this returns nothing"),
                );
                return None;
            }
            Some(ty)
        });

        let ty = match (annotated, init_ty) {
            (Some(ann), Some(init)) => {
                if let Some(init_expr) = &var.init {
                    if !self.coerce_to(init_expr, &init, &ann) {
                        self.bag.push(
                            Diagnostic::error(ErrorCode::E2001)
                                .with_message(format!(
                                    "`{}` is declared `{ann}` but initialized with `{init}`",
                                    var.name
                                ))
                                .with_label(init_expr.span, format!("this is `{init}`")),
                        );
                    }
                }
                ann
            }
            (Some(ann), None) => ann,
            (None, Some(Ty::Object))
                if matches!(var.init.as_ref().map(|i| &i.kind), Some(ExprKind::Null)) =>
            {
                self.bag.push(
                    Diagnostic::error(ErrorCode::E2009)
                        .with_message(format!("cannot infer the type of `{}` from `null`", var.name))
                        .with_label(var.name_span, "needs a type annotation"),
                );
                Ty::Object
            }
            (None, Some(init)) => init,
            (None, None) => {
                self.bag.push(
                    Diagnostic::error(ErrorCode::E2009)
                        .with_message(format!("cannot infer the type of `{}`", var.name))
                        .with_label(var.name_span, "needs a type annotation or an initializer"),
                );
                Ty::Object
            }
        };

        let id = self
            .out
            .symbols
            .insert(var.name.clone(), var.name_span, SymbolKind::Local, ty);
        if let Err(existing) = self.scopes.declare(&var.name, id) {
            let first = self.out.symbols.get(existing).span;
            self.duplicate(&var.name, var.name_span, first);
        } else {
            self.out.decl_symbols.insert(var.name_span, id);
        }
    }

    fn check_condition(&mut self, cond: &Expr) {
        if let Some(ty) = self.check_expr(cond) {
            if ty != Ty::Bool {
                self.bag.push(
                    Diagnostic::error(ErrorCode::E2003)
                        .with_message(format!("condition must be `bool`, found `{ty}`"))
                        .with_label(cond.span, format!("this is `{ty}`")),
                );
            }
        }
    }

    fn check_int_bound(&mut self, bound: &Expr) {
        if let Some(ty) = self.check_expr(bound) {
            if ty != Ty::Int {
                self.bag.push(
                    Diagnostic::error(ErrorCode::E2001)
                        .with_message(format!("range bounds must be `int`, found `{ty}`"))
                        .with_label(bound.span, format!("this is `{ty}`")),
                );
            }
        }
    }

    fn check_return(&mut self, value: Option<&Expr>, span: Span) {
        match (value, self.current_ret.clone()) {
            (None, Ty::Void) => {}
            (None, ret) => {
                self.bag.push(
                    Diagnostic::error(ErrorCode::E2004)
                        .with_message(format!("expected a `{ret}` return value"))
                        .with_label(span, format!("returns nothing, function returns `{ret}`")),
                );
            }
            (Some(value), Ty::Void) => {
                let _ = self.check_expr(value);
                self.bag.push(
                    Diagnostic::error(ErrorCode::E2004)
                        .with_message("this body returns no value")
                        .with_label(value.span, "unexpected return value"),
                );
            }
            (Some(value), ret) => {
                if let Some(ty) = self.check_expr(value) {
                    if !self.coerce_to(value, &ty, &ret) {
                        self.bag.push(
                            Diagnostic::error(ErrorCode::E2004)
                                .with_message(format!(
                                    "return type mismatch: expected `{ret}`, found `{ty}`"
                                ))
                                .with_label(value.span, format!("this is `{ty}`")),
                        );
                    }
                }
            }
        }
    }

    fn check_send(&mut self, event: &str, event_span: Span) {
        let is_event = self
            .scopes
            .lookup(event)
            .is_some_and(|id| self.out.symbols.get(id).kind == SymbolKind::CustomEvent);
        if is_event {
            match self
                .catalog
                .resolve_method(SELF_TYPE, "SendCustomEvent", &["SystemString"], false)
            {
                Ok(resolved) => {
                    self.out.sends.insert(event_span, resolved.sig);
                }
                Err(_) => self.missing_platform_op(event_span, "SendCustomEvent"),
            }
        } else {
            let events: Vec<String> = self
                .out
                .symbols
                .iter()
                .filter(|s| s.kind == SymbolKind::CustomEvent)
                .map(|s| s.name.clone())
                .collect();
            let mut d = Diagnostic::error(ErrorCode::E3003)
                .with_message(format!("`{event}` is not a declared custom event"))
                .with_label(event_span, "unknown custom event");
            if let Some(close) = suggest::closest(event, events.iter().map(String::as_str)) {
                d = d.with_suggestion(format!("did you mean `{close}`?"));
            }
            self.bag.push(d);
        }
    }

    pub(crate) fn missing_platform_op(&mut self, span: Span, name: &str) {
        self.bag.push(
            Diagnostic::error(ErrorCode::E5003)
                .with_message(format!("the catalog does not whitelist `{name}`"))
                .with_label(span, "required platform operation missing"),
        );
    }

    /// The `int` compare and step operators every counted loop runs on.
    fn int_loop_ops(&mut self, span: Span) -> Option<(ExternSignature, ExternSignature)> {
        let int = Ty::Int.platform_name();
        let less_than = self.loop_operator("op_LessThan", &int, span)?;
        let step = self.loop_operator("op_Addition", &int, span)?;
        Some((less_than, step))
    }

    fn loop_operator(&mut self, name: &str, int: &str, span: Span) -> Option<ExternSignature> {
        match self.catalog.resolve_binary_operator(name, int, int) {
            Ok(resolved) => Some(resolved.sig),
            Err(_) => {
                self.missing_platform_op(span, &format!("{int}.{name}"));
                None
            }
        }
    }

    /// Length and element getters of the iterated array type.
    fn resolve_iter_ops(&mut self, elem: &Ty, span: Span) -> Option<IterOps> {
        let owner = Ty::Array(Box::new(elem.clone())).platform_name();
        let length = self
            .catalog
            .find_property(&owner, "Length")
            .and_then(|prop| prop.getter);
        let Some(length) = length else {
            self.missing_platform_op(span, &format!("{owner}.get_Length"));
            return None;
        };
        let get = match self
            .catalog
            .resolve_method(&owner, "Get", &["SystemInt32"], false)
        {
            Ok(resolved) => resolved.sig,
            Err(_) => {
                self.missing_platform_op(span, &format!("{owner}.Get"));
                return None;
            }
        };
        Some(IterOps { length, get })
    }

    /// Record an assignment, resolving its write target and, for
    /// compound forms, the operator applied between old and new value.
    fn check_assign(&mut self, target: &Expr, op: lark_ir::AssignOp, value: &Expr, span: Span) {
        let Some((target_ty, kind)) = self.check_store_target(target) else {
            let _ = self.check_expr(value);
            return;
        };
        // Compound assignment reads the old value first; a property
        // without a getter cannot supply it.
        if op.binary_op().is_some() {
            if let StoreKind::Property { getter: None, .. } = &kind {
                let _ = self.check_expr(value);
                self.bag.push(
                    Diagnostic::error(ErrorCode::E5005)
                        .with_message("compound assignment to a write-only property")
                        .with_label(target.span, "this property has no getter"),
                );
                return;
            }
        }
        let value_ty = self.check_expr(value);

        let bin_op = op.binary_op();
        let mut op_sig: Option<ExternSignature> = None;
        if let (Some(bin_op), Some(value_ty)) = (bin_op, value_ty.clone()) {
            match self.catalog.resolve_binary_operator(
                bin_op.operator_name(),
                &target_ty.platform_name(),
                &value_ty.platform_name(),
            ) {
                Ok(resolved) => {
                    if let Some(conv) = resolved.conversions[1].clone() {
                        self.out.coercions.insert(value.id, conv);
                    }
                    let result = Ty::from_platform_name(&resolved.sig.ret);
                    if result != target_ty {
                        self.bag.push(
                            Diagnostic::error(ErrorCode::E2001)
                                .with_message(format!(
                                    "`{}=` produces `{result}` but `{target_ty}` is required",
                                    bin_op.as_str()
                                ))
                                .with_label(span, "compound assignment type mismatch"),
                        );
                    }
                    op_sig = Some(resolved.sig);
                }
                Err(err) => {
                    self.report_operator_error(bin_op.as_str(), span, err);
                }
            }
        } else if let Some(value_ty) = value_ty {
            if !self.coerce_to(value, &value_ty, &target_ty) {
                self.bag.push(
                    Diagnostic::error(ErrorCode::E2001)
                        .with_message(format!(
                            "cannot assign `{value_ty}` to `{target_ty}`"
                        ))
                        .with_label(value.span, format!("this is `{value_ty}`"))
                        .with_secondary_label(target.span, format!("this is `{target_ty}`")),
                );
            }
        }

        if let StoreKind::Var(id) = kind {
            let sym = self.out.symbols.get(id);
            if sym.sync != SyncMode::None {
                self.sync_writes.push((span, sym.name.clone()));
            }
        }
        self.out.stores.insert(target.id, Store { kind, op: op_sig });
    }

    /// Resolve a type reference to a language type.
    pub(crate) fn resolve_type(&mut self, tr: &TypeRef) -> Option<Ty> {
        match tr {
            TypeRef::Named { name, span } => {
                if let Some(ty) = Ty::from_keyword(name) {
                    return Some(ty);
                }
                match self.catalog.resolve_type_name(name) {
                    Some(platform) => Some(Ty::from_platform_name(&platform)),
                    None => {
                        self.bag.push(
                            Diagnostic::error(ErrorCode::E2002)
                                .with_message(format!("unknown type `{name}`"))
                                .with_label(*span, "not a known type"),
                        );
                        None
                    }
                }
            }
            TypeRef::Array { elem, .. } => {
                let elem = self.resolve_type(elem)?;
                Some(Ty::Array(Box::new(elem)))
            }
        }
    }

    /// Note that the body requested serialization; used by the sync
    /// write heuristic.
    pub(crate) fn note_serialization_request(&mut self) {
        self.requested_sync = true;
    }

    pub(crate) fn report_operator_error(&mut self, op: &str, span: Span, err: ResolveError) {
        match err {
            ResolveError::Ambiguous { candidates } => {
                let mut d = Diagnostic::error(ErrorCode::E5002)
                    .with_message(format!("ambiguous overload for `{op}`"))
                    .with_label(span, "more than one overload matches equally well");
                for c in candidates {
                    d = d.with_note(format!("candidate: {c}"));
                }
                self.bag.push(d);
            }
            ResolveError::UnknownMember { .. } | ResolveError::NoMatch { .. } => {
                self.bag.push(
                    Diagnostic::error(ErrorCode::E5006)
                        .with_message(format!("no operator `{op}` for these operand types"))
                        .with_label(span, "operator not whitelisted for these types"),
                );
            }
        }
    }
}

/// Is this expression a literal a heap slot can be initialized with?
/// A negated numeric literal counts.
fn is_literal_init(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::Int(_)
        | ExprKind::Float(_)
        | ExprKind::Str(_)
        | ExprKind::Bool(_)
        | ExprKind::Null => true,
        ExprKind::Unary {
            op: UnOp::Neg,
            operand,
        } => matches!(operand.kind, ExprKind::Int(_) | ExprKind::Float(_)),
        _ => false,
    }
}

fn literal_type(expr: &Expr) -> Ty {
    match &expr.kind {
        ExprKind::Int(_) => Ty::Int,
        ExprKind::Float(_) => Ty::Float,
        ExprKind::Str(_) => Ty::Str,
        ExprKind::Bool(_) => Ty::Bool,
        ExprKind::Unary { operand, .. } => literal_type(operand),
        _ => Ty::Object,
    }
}

/// May a literal of type `lit` initialize a slot of type `slot`?
/// Integer literals widen to the float types; `null` fits any
/// reference type.
fn literal_fits(lit: &Ty, slot: &Ty) -> bool {
    if lit == slot {
        return true;
    }
    match (lit, slot) {
        (Ty::Int, Ty::Float | Ty::Double) => true,
        (Ty::Float, Ty::Double) => true,
        (Ty::Object, Ty::Str | Ty::Object | Ty::Platform(_) | Ty::Array(_)) => true,
        _ => false,
    }
}

