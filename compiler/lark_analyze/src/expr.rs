//! Expression checking and operation resolution.
//!
//! Every successful check records the expression's type; call, member
//! and operator expressions additionally record which extern they
//! resolved to, and arguments that need widening get an entry in the
//! coercion table. A `None` return always means the error is already
//! in the bag.

use lark_catalog::{Catalog, ResolveError, ResolvedOverload};
use lark_diagnostic::{Diagnostic, ErrorCode};
use lark_ir::{Expr, ExprKind, InterpPart, Span, Ty};

use crate::analysis::{AccessTarget, CallTarget, InterpOps, StoreKind};
use crate::check::{Checker, SELF_TYPE};
use crate::suggest;
use crate::symbols::SymbolKind;

/// Sugar names resolvable without a declaration: logging, the
/// serialization request, and the behaviour's own components.
const BUILTIN_FN_NAMES: &[&str] = &["log", "log_warning", "log_error", "request_sync"];
const BUILTIN_PROP_NAMES: &[&str] = &["transform", "game_object"];

impl Checker<'_> {
    pub(crate) fn check_expr(&mut self, expr: &Expr) -> Option<Ty> {
        let ty = match &expr.kind {
            ExprKind::Int(_) => Ty::Int,
            ExprKind::Float(_) => Ty::Float,
            ExprKind::Str(_) => Ty::Str,
            ExprKind::Bool(_) => Ty::Bool,
            ExprKind::Null => Ty::Object,
            ExprKind::Name(name) => self.check_name(expr, name)?,
            ExprKind::Binary { op, lhs, rhs } => {
                let lt = self.check_expr(lhs);
                let rt = self.check_expr(rhs);
                let (lt, rt) = (lt?, rt?);
                match self.catalog.resolve_binary_operator(
                    op.operator_name(),
                    &lt.platform_name(),
                    &rt.platform_name(),
                ) {
                    Ok(resolved) => {
                        self.record_arg_coercions(&resolved, &[lhs, rhs]);
                        let ret = Ty::from_platform_name(&resolved.sig.ret);
                        self.out.operators.insert(expr.id, resolved.sig);
                        ret
                    }
                    Err(err) => {
                        self.report_operator_error(op.as_str(), expr.span, err);
                        return None;
                    }
                }
            }
            ExprKind::Unary { op, operand } => {
                let ot = self.check_expr(operand)?;
                match self
                    .catalog
                    .resolve_unary_operator(op.operator_name(), &ot.platform_name())
                {
                    Ok(resolved) => {
                        self.record_arg_coercions(&resolved, &[operand]);
                        let ret = Ty::from_platform_name(&resolved.sig.ret);
                        self.out.operators.insert(expr.id, resolved.sig);
                        ret
                    }
                    Err(err) => {
                        self.report_operator_error(op.as_str(), expr.span, err);
                        return None;
                    }
                }
            }
            ExprKind::Member {
                object,
                member,
                member_span,
            } => self.check_member_read(expr, object, member, *member_span)?,
            ExprKind::Call { callee, args } => self.check_call(expr, callee, args)?,
            ExprKind::Index { object, index } => self.check_index(expr, object, index)?,
            ExprKind::Array { elems } => self.check_array(expr, elems)?,
            ExprKind::Interp { parts } => self.check_interp(expr, parts)?,
            ExprKind::Error => return None,
        };
        self.out.expr_types.insert(expr.id, ty.clone());
        Some(ty)
    }

    fn check_name(&mut self, expr: &Expr, name: &str) -> Option<Ty> {
        if let Some(id) = self.scopes.lookup(name) {
            let sym = self.out.symbols.get(id);
            match sym.kind {
                SymbolKind::Function | SymbolKind::CustomEvent => {
                    let span = expr.span;
                    self.bag.push(
                        Diagnostic::error(ErrorCode::E2006)
                            .with_message(format!("`{name}` is not a value"))
                            .with_label(span, "functions and events can only be called"),
                    );
                    return None;
                }
                _ => {
                    let ty = sym.ty.clone();
                    self.out.name_refs.insert(expr.id, id);
                    return Some(ty);
                }
            }
        }

        if let Some(platform_member) = builtin_prop(name) {
            let getter = self
                .catalog
                .find_property(SELF_TYPE, platform_member)
                .and_then(|prop| prop.getter.map(|g| (g, prop.ty)));
            let Some((getter, prop_ty)) = getter else {
                self.missing_platform_op(expr.span, platform_member);
                return None;
            };
            let ty = Ty::from_platform_name(&prop_ty);
            self.out.accesses.insert(
                expr.id,
                AccessTarget::Property {
                    getter,
                    on_this: true,
                },
            );
            return Some(ty);
        }

        if self.catalog.resolve_type_name(name).is_some() {
            self.bag.push(
                Diagnostic::error(ErrorCode::E2001)
                    .with_message(format!("type `{name}` cannot be used as a value"))
                    .with_label(expr.span, "this names a type"),
            );
            return None;
        }

        let mut candidates = self.scopes.visible_names();
        candidates.extend(BUILTIN_FN_NAMES.iter().map(|s| (*s).to_owned()));
        candidates.extend(BUILTIN_PROP_NAMES.iter().map(|s| (*s).to_owned()));
        let mut d = Diagnostic::error(ErrorCode::E3001)
            .with_message(format!("unknown identifier `{name}`"))
            .with_label(expr.span, "not declared in any enclosing scope");
        if let Some(close) = suggest::closest(name, candidates.iter().map(String::as_str)) {
            d = d.with_suggestion(format!("did you mean `{close}`?"));
        }
        self.bag.push(d);
        None
    }

    /// A `Name` receiver that is not a value in scope but names a
    /// catalog type denotes static access.
    fn type_receiver(&self, object: &Expr) -> Option<String> {
        let ExprKind::Name(name) = &object.kind else {
            return None;
        };
        if self.scopes.lookup(name).is_some() {
            return None;
        }
        self.catalog.resolve_type_name(name)
    }

    fn check_member_read(
        &mut self,
        expr: &Expr,
        object: &Expr,
        member: &str,
        member_span: Span,
    ) -> Option<Ty> {
        if let Some(owner) = self.type_receiver(object) {
            self.out.type_names.insert(object.id);

            if let Some(info) = self.catalog.enum_info(&owner) {
                if let Some(value) = info.value(member) {
                    let ty = Ty::from_platform_name(&owner);
                    self.out.accesses.insert(
                        expr.id,
                        AccessTarget::EnumValue {
                            ty: ty.clone(),
                            value,
                        },
                    );
                    return Some(ty);
                }
            }

            if let Some(prop) = self.catalog.find_property(&owner, member) {
                if !prop.instance {
                    let getter = match prop.getter {
                        Some(g) => g,
                        None => {
                            self.write_only(member, member_span);
                            return None;
                        }
                    };
                    let ty = Ty::from_platform_name(&prop.ty);
                    self.out.accesses.insert(
                        expr.id,
                        AccessTarget::Property {
                            getter,
                            on_this: false,
                        },
                    );
                    return Some(ty);
                }
            }

            self.unknown_property(&owner, member, member_span);
            return None;
        }

        let obj_ty = self.check_expr(object)?;
        if obj_ty.is_void() {
            self.void_value(object.span);
            return None;
        }
        let owner = obj_ty.platform_name();
        match self.catalog.find_property(&owner, member) {
            Some(prop) if prop.instance => {
                let getter = match prop.getter {
                    Some(g) => g,
                    None => {
                        self.write_only(member, member_span);
                        return None;
                    }
                };
                let ty = Ty::from_platform_name(&prop.ty);
                self.out.accesses.insert(
                    expr.id,
                    AccessTarget::Property {
                        getter,
                        on_this: false,
                    },
                );
                Some(ty)
            }
            _ => {
                self.unknown_property(&owner, member, member_span);
                None
            }
        }
    }

    fn check_call(&mut self, expr: &Expr, callee: &Expr, args: &[Expr]) -> Option<Ty> {
        let mut arg_tys = Vec::with_capacity(args.len());
        let mut failed = false;
        for arg in args {
            match self.check_expr(arg) {
                Some(ty) if ty.is_void() => {
                    self.void_value(arg.span);
                    failed = true;
                }
                Some(ty) => arg_tys.push(ty),
                None => failed = true,
            }
        }
        if failed {
            return None;
        }

        match &callee.kind {
            ExprKind::Name(name) => self.check_name_call(expr, callee, name, args, &arg_tys),
            ExprKind::Member {
                object,
                member,
                member_span,
            } => self.check_member_call(expr, object, member, *member_span, args, &arg_tys),
            _ => {
                self.bag.push(
                    Diagnostic::error(ErrorCode::E2006)
                        .with_message("this expression is not callable")
                        .with_label(callee.span, "cannot be called"),
                );
                None
            }
        }
    }

    fn check_name_call(
        &mut self,
        expr: &Expr,
        callee: &Expr,
        name: &str,
        args: &[Expr],
        arg_tys: &[Ty],
    ) -> Option<Ty> {
        if let Some(id) = self.scopes.lookup(name) {
            let kind = self.out.symbols.get(id).kind;
            if kind != SymbolKind::Function {
                self.bag.push(
                    Diagnostic::error(ErrorCode::E2006)
                        .with_message(format!("`{name}` is not callable"))
                        .with_label(callee.span, "only functions can be called"),
                );
                return None;
            }
            let sig = self.out.fn_sigs[&id].clone();
            if sig.params.len() != args.len() {
                self.bag.push(
                    Diagnostic::error(ErrorCode::E2011)
                        .with_message(format!(
                            "`{name}` takes {} argument(s) but {} were passed",
                            sig.params.len(),
                            args.len()
                        ))
                        .with_label(expr.span, "wrong number of arguments"),
                );
                return None;
            }
            for ((arg, arg_ty), (_, param_ty)) in args.iter().zip(arg_tys).zip(&sig.params) {
                if !self.coerce_to(arg, arg_ty, param_ty) {
                    self.bag.push(
                        Diagnostic::error(ErrorCode::E2001)
                            .with_message(format!(
                                "expected `{param_ty}`, found `{arg_ty}`"
                            ))
                            .with_label(arg.span, format!("this is `{arg_ty}`")),
                    );
                }
            }
            if let Some(caller) = self.current_fn {
                self.out.call_edges.push(crate::analysis::CallEdge {
                    caller,
                    callee: id,
                    span: expr.span,
                });
            }
            self.out.calls.insert(expr.id, CallTarget::Function(id));
            return Some(sig.ret);
        }

        let platform_args: Vec<String> = arg_tys.iter().map(Ty::platform_name).collect();
        let platform_refs: Vec<&str> = platform_args.iter().map(String::as_str).collect();

        if let Some((owner, member, on_this)) = builtin_fn(name) {
            let statik = !on_this;
            return match self
                .catalog
                .resolve_method(owner, member, &platform_refs, statik)
            {
                Ok(resolved) => {
                    if on_this {
                        self.note_serialization_request();
                    }
                    self.record_arg_coercions(&resolved, &arg_refs(args));
                    let ret = Ty::from_platform_name(&resolved.sig.ret);
                    self.out.calls.insert(
                        expr.id,
                        CallTarget::Extern {
                            sig: resolved.sig,
                            on_this,
                        },
                    );
                    Some(ret)
                }
                Err(err) => {
                    self.report_call_error(name, Some(owner), expr.span, err);
                    None
                }
            };
        }

        if let Some(owner) = self.catalog.resolve_type_name(name) {
            self.out.type_names.insert(callee.id);
            return match self.catalog.resolve_constructor(&owner, &platform_refs) {
                Ok(resolved) => {
                    self.record_arg_coercions(&resolved, &arg_refs(args));
                    let ret = Ty::from_platform_name(&resolved.sig.ret);
                    self.out
                        .calls
                        .insert(expr.id, CallTarget::Constructor(resolved.sig));
                    Some(ret)
                }
                Err(ResolveError::UnknownMember { .. }) => {
                    self.bag.push(
                        Diagnostic::error(ErrorCode::E5003)
                            .with_message(format!("`{name}` has no constructor"))
                            .with_label(expr.span, "cannot be constructed"),
                    );
                    None
                }
                Err(err) => {
                    self.report_call_error(name, Some(&owner), expr.span, err);
                    None
                }
            };
        }

        let mut candidates = self.scopes.visible_names();
        candidates.extend(BUILTIN_FN_NAMES.iter().map(|s| (*s).to_owned()));
        let mut d = Diagnostic::error(ErrorCode::E3001)
            .with_message(format!("unknown function `{name}`"))
            .with_label(callee.span, "not declared anywhere");
        if let Some(close) = suggest::closest(name, candidates.iter().map(String::as_str)) {
            d = d.with_suggestion(format!("did you mean `{close}`?"));
        }
        self.bag.push(d);
        None
    }

    fn check_member_call(
        &mut self,
        expr: &Expr,
        object: &Expr,
        member: &str,
        member_span: Span,
        args: &[Expr],
        arg_tys: &[Ty],
    ) -> Option<Ty> {
        let platform_args: Vec<String> = arg_tys.iter().map(Ty::platform_name).collect();
        let platform_refs: Vec<&str> = platform_args.iter().map(String::as_str).collect();

        let (owner, statik) = if let Some(owner) = self.type_receiver(object) {
            self.out.type_names.insert(object.id);
            (owner, true)
        } else {
            let obj_ty = self.check_expr(object)?;
            if obj_ty.is_void() {
                self.void_value(object.span);
                return None;
            }
            (obj_ty.platform_name(), false)
        };

        match self
            .catalog
            .resolve_method(&owner, member, &platform_refs, statik)
        {
            Ok(resolved) => {
                if resolved.sig.member == "RequestSerialization" {
                    self.note_serialization_request();
                }
                self.record_arg_coercions(&resolved, &arg_refs(args));
                let ret = Ty::from_platform_name(&resolved.sig.ret);
                self.out.calls.insert(
                    expr.id,
                    CallTarget::Extern {
                        sig: resolved.sig,
                        on_this: false,
                    },
                );
                Some(ret)
            }
            Err(err) => {
                self.report_call_error(member, Some(&owner), member_span, err);
                None
            }
        }
    }

    fn check_index(&mut self, expr: &Expr, object: &Expr, index: &Expr) -> Option<Ty> {
        let obj_ty = self.check_expr(object);
        let idx_ty = self.check_expr(index);

        if let Some(idx_ty) = idx_ty {
            if idx_ty != Ty::Int {
                self.bag.push(
                    Diagnostic::error(ErrorCode::E2001)
                        .with_message(format!("array index must be `int`, found `{idx_ty}`"))
                        .with_label(index.span, format!("this is `{idx_ty}`")),
                );
            }
        }

        match obj_ty? {
            Ty::Array(elem) => {
                let owner = Ty::Array(elem.clone()).platform_name();
                match self
                    .catalog
                    .resolve_method(&owner, "Get", &["SystemInt32"], false)
                {
                    Ok(resolved) => {
                        self.out
                            .accesses
                            .insert(expr.id, AccessTarget::ArrayGet(resolved.sig));
                        Some(*elem)
                    }
                    Err(_) => {
                        self.missing_platform_op(expr.span, &format!("{owner}.Get"));
                        None
                    }
                }
            }
            other => {
                self.bag.push(
                    Diagnostic::error(ErrorCode::E2007)
                        .with_message(format!("`{other}` cannot be indexed"))
                        .with_label(object.span, "not an array"),
                );
                None
            }
        }
    }

    fn check_array(&mut self, expr: &Expr, elems: &[Expr]) -> Option<Ty> {
        if elems.is_empty() {
            self.bag.push(
                Diagnostic::error(ErrorCode::E2009)
                    .with_message("cannot infer the element type of an empty array")
                    .with_label(expr.span, "no elements to infer from"),
            );
            return None;
        }

        let mut elem_ty: Option<Ty> = None;
        let mut ok = true;
        for elem in elems {
            let Some(ty) = self.check_expr(elem) else {
                ok = false;
                continue;
            };
            match &elem_ty {
                None => elem_ty = Some(ty),
                Some(first) if *first != ty => {
                    self.bag.push(
                        Diagnostic::error(ErrorCode::E2010)
                            .with_message(format!(
                                "array elements disagree: `{first}` then `{ty}`"
                            ))
                            .with_label(elem.span, format!("this is `{ty}`")),
                    );
                    ok = false;
                }
                Some(_) => {}
            }
        }
        let elem_ty = elem_ty?;
        if !ok {
            return None;
        }

        let array_ty = Ty::Array(Box::new(elem_ty.clone()));
        let owner = array_ty.platform_name();
        let elem_name = elem_ty.platform_name();
        let ctor = self.catalog.resolve_constructor(&owner, &["SystemInt32"]);
        let set = self
            .catalog
            .resolve_method(&owner, "Set", &["SystemInt32", &elem_name], false);
        match (ctor, set) {
            (Ok(ctor), Ok(set)) => {
                self.out.accesses.insert(
                    expr.id,
                    AccessTarget::ArrayLiteral {
                        ctor: ctor.sig,
                        set: set.sig,
                    },
                );
                Some(array_ty)
            }
            _ => {
                self.bag.push(
                    Diagnostic::error(ErrorCode::E2002)
                        .with_message(format!("the platform has no array of `{elem_ty}`"))
                        .with_label(expr.span, "element type has no platform array"),
                );
                None
            }
        }
    }

    fn check_interp(&mut self, expr: &Expr, parts: &[InterpPart]) -> Option<Ty> {
        let mut ok = true;
        for part in parts {
            if let InterpPart::Expr(inner) = part {
                match self.check_expr(inner) {
                    Some(ty) if ty.is_void() => {
                        self.void_value(inner.span);
                        ok = false;
                    }
                    Some(_) => {}
                    None => ok = false,
                }
            }
        }
        if !ok {
            return None;
        }

        let to_string = self
            .catalog
            .resolve_method("SystemConvert", "ToString", &["SystemObject"], true);
        let concat = self.catalog.resolve_method(
            "SystemString",
            "Concat",
            &["SystemString", "SystemString"],
            true,
        );
        match (to_string, concat) {
            (Ok(to_string), Ok(concat)) => {
                self.out.interp_ops.insert(
                    expr.id,
                    InterpOps {
                        to_string: to_string.sig,
                        concat: concat.sig,
                    },
                );
                Some(Ty::Str)
            }
            _ => {
                self.missing_platform_op(expr.span, "SystemString.Concat");
                None
            }
        }
    }

    /// Resolve where an assignment target writes.
    pub(crate) fn check_store_target(&mut self, target: &Expr) -> Option<(Ty, StoreKind)> {
        match &target.kind {
            ExprKind::Name(name) => self.check_store_name(target, name),
            ExprKind::Member {
                object,
                member,
                member_span,
            } => self.check_store_member(object, member, *member_span),
            ExprKind::Index { object, index } => self.check_store_index(object, index),
            // The parser rejects other targets before we get here.
            _ => None,
        }
    }

    fn check_store_name(&mut self, target: &Expr, name: &str) -> Option<(Ty, StoreKind)> {
        if let Some(id) = self.scopes.lookup(name) {
            let sym = self.out.symbols.get(id);
            return match sym.kind {
                SymbolKind::ModuleVar | SymbolKind::Local | SymbolKind::Param => {
                    let ty = sym.ty.clone();
                    self.out.expr_types.insert(target.id, ty.clone());
                    self.out.name_refs.insert(target.id, id);
                    Some((ty, StoreKind::Var(id)))
                }
                SymbolKind::Builtin => {
                    self.bag.push(
                        Diagnostic::error(ErrorCode::E2001)
                            .with_message(format!("`{name}` cannot be assigned"))
                            .with_label(target.span, "read-only"),
                    );
                    None
                }
                SymbolKind::Function | SymbolKind::CustomEvent => {
                    self.bag.push(
                        Diagnostic::error(ErrorCode::E2001)
                            .with_message(format!("cannot assign to `{name}`"))
                            .with_label(target.span, "not a variable"),
                    );
                    None
                }
            };
        }

        if let Some(platform_member) = builtin_prop(name) {
            // `transform` and `game_object` are read-only on the
            // behaviour itself.
            if self
                .catalog
                .find_property(SELF_TYPE, platform_member)
                .is_some()
            {
                self.write_only(name, target.span);
                return None;
            }
        }

        let mut d = Diagnostic::error(ErrorCode::E3001)
            .with_message(format!("unknown identifier `{name}`"))
            .with_label(target.span, "not declared in any enclosing scope");
        let candidates = self.scopes.visible_names();
        if let Some(close) = suggest::closest(name, candidates.iter().map(String::as_str)) {
            d = d.with_suggestion(format!("did you mean `{close}`?"));
        }
        self.bag.push(d);
        None
    }

    fn check_store_member(
        &mut self,
        object: &Expr,
        member: &str,
        member_span: Span,
    ) -> Option<(Ty, StoreKind)> {
        let (owner, on_this, statik) = if let Some(owner) = self.type_receiver(object) {
            self.out.type_names.insert(object.id);
            (owner, false, true)
        } else {
            let obj_ty = self.check_expr(object)?;
            if obj_ty.is_void() {
                self.void_value(object.span);
                return None;
            }
            (obj_ty.platform_name(), false, false)
        };

        let Some(prop) = self.catalog.find_property(&owner, member) else {
            self.unknown_property(&owner, member, member_span);
            return None;
        };
        if prop.instance == statik {
            self.unknown_property(&owner, member, member_span);
            return None;
        }
        let Some(setter) = prop.setter else {
            self.bag.push(
                Diagnostic::error(ErrorCode::E5005)
                    .with_message(format!("property `{member}` is read-only"))
                    .with_label(member_span, "no setter"),
            );
            return None;
        };
        let ty = Ty::from_platform_name(&prop.ty);
        Some((
            ty,
            StoreKind::Property {
                setter,
                getter: prop.getter,
                on_this,
            },
        ))
    }

    fn check_store_index(&mut self, object: &Expr, index: &Expr) -> Option<(Ty, StoreKind)> {
        let obj_ty = self.check_expr(object);
        if let Some(idx_ty) = self.check_expr(index) {
            if idx_ty != Ty::Int {
                self.bag.push(
                    Diagnostic::error(ErrorCode::E2001)
                        .with_message(format!("array index must be `int`, found `{idx_ty}`"))
                        .with_label(index.span, format!("this is `{idx_ty}`")),
                );
            }
        }
        match obj_ty? {
            Ty::Array(elem) => {
                let owner = Ty::Array(elem.clone()).platform_name();
                let elem_name = elem.platform_name();
                let get = self
                    .catalog
                    .resolve_method(&owner, "Get", &["SystemInt32"], false);
                let set = self
                    .catalog
                    .resolve_method(&owner, "Set", &["SystemInt32", &elem_name], false);
                match (get, set) {
                    (Ok(get), Ok(set)) => Some((
                        *elem,
                        StoreKind::ArrayElem {
                            set: set.sig,
                            get: get.sig,
                        },
                    )),
                    _ => {
                        self.missing_platform_op(object.span, &format!("{owner}.Set"));
                        None
                    }
                }
            }
            other => {
                self.bag.push(
                    Diagnostic::error(ErrorCode::E2007)
                        .with_message(format!("`{other}` cannot be indexed"))
                        .with_label(object.span, "not an array"),
                );
                None
            }
        }
    }

    /// Accept `from` where `to` is expected, recording an implicit
    /// conversion on `expr` when one is needed. Returns false when the
    /// types are simply incompatible; the caller reports.
    pub(crate) fn coerce_to(&mut self, expr: &Expr, from: &Ty, to: &Ty) -> bool {
        if from == to {
            return true;
        }
        // `null` fits any reference type.
        if matches!(expr.kind, ExprKind::Null)
            && matches!(to, Ty::Str | Ty::Object | Ty::Platform(_) | Ty::Array(_))
        {
            return true;
        }
        let from_name = from.platform_name();
        let to_name = to.platform_name();
        if let Some(conv) = self.catalog.implicit_conversion(&from_name, &to_name) {
            self.out.coercions.insert(expr.id, conv);
            return true;
        }
        if *to == Ty::Object {
            return true;
        }
        self.catalog.derives_from(&from_name, &to_name)
    }

    fn record_arg_coercions(&mut self, resolved: &ResolvedOverload, args: &[&Expr]) {
        for (arg, conv) in args.iter().zip(&resolved.conversions) {
            if let Some(conv) = conv.clone() {
                self.out.coercions.insert(arg.id, conv);
            }
        }
    }

    fn report_call_error(
        &mut self,
        name: &str,
        owner: Option<&str>,
        span: Span,
        err: ResolveError,
    ) {
        match err {
            ResolveError::UnknownMember { owner, member } => {
                let mut d = Diagnostic::error(ErrorCode::E5003)
                    .with_message(format!("`{owner}` has no member `{member}`"))
                    .with_label(span, "unknown member");
                let names = self.catalog.all_member_names(&owner);
                if let Some(close) = suggest::closest(&member, names.iter().map(String::as_str)) {
                    d = d.with_suggestion(format!("did you mean `{close}`?"));
                }
                self.bag.push(d);
            }
            ResolveError::NoMatch { candidates } => {
                let owner_prefix = owner.map(|o| format!("{o}.")).unwrap_or_default();
                let mut d = Diagnostic::error(ErrorCode::E5001)
                    .with_message(format!(
                        "no overload of `{owner_prefix}{name}` accepts these arguments"
                    ))
                    .with_label(span, "no matching overload");
                for c in candidates {
                    d = d.with_note(format!("candidate: {c}"));
                }
                self.bag.push(d);
            }
            ResolveError::Ambiguous { candidates } => {
                let mut d = Diagnostic::error(ErrorCode::E5002)
                    .with_message(format!("ambiguous call to `{name}`"))
                    .with_label(span, "more than one overload matches equally well")
                    .with_suggestion("convert an argument explicitly to pick one");
                for c in candidates {
                    d = d.with_note(format!("candidate: {c}"));
                }
                self.bag.push(d);
            }
        }
    }

    fn unknown_property(&mut self, owner: &str, member: &str, span: Span) {
        let mut d = Diagnostic::error(ErrorCode::E5004)
            .with_message(format!("`{owner}` has no property `{member}`"))
            .with_label(span, "unknown property");
        let names = self.catalog.all_member_names(owner);
        if let Some(close) = suggest::closest(member, names.iter().map(String::as_str)) {
            d = d.with_suggestion(format!("did you mean `{close}`?"));
        } else if !self
            .catalog
            .find_method_candidates(owner, member, false)
            .is_empty()
            || !self
                .catalog
                .find_method_candidates(owner, member, true)
                .is_empty()
        {
            d = d.with_note(format!("`{member}` is a method; call it with `()`"));
        }
        self.bag.push(d);
    }

    fn write_only(&mut self, member: &str, span: Span) {
        self.bag.push(
            Diagnostic::error(ErrorCode::E5005)
                .with_message(format!("property `{member}` cannot be accessed this way"))
                .with_label(span, "no accessor for this use"),
        );
    }

    fn void_value(&mut self, span: Span) {
        self.bag.push(
            Diagnostic::error(ErrorCode::E2008)
                .with_message("this operation produces no value")
                .with_label(span, "used as a value here"),
        );
    }
}

fn builtin_fn(name: &str) -> Option<(&'static str, &'static str, bool)> {
    Some(match name {
        "log" => ("UnityEngineDebug", "Log", false),
        "log_warning" => ("UnityEngineDebug", "LogWarning", false),
        "log_error" => ("UnityEngineDebug", "LogError", false),
        "request_sync" => (SELF_TYPE, "RequestSerialization", true),
        _ => return None,
    })
}

fn builtin_prop(name: &str) -> Option<&'static str> {
    Some(match name {
        "transform" => "transform",
        "game_object" => "gameObject",
        _ => return None,
    })
}

fn arg_refs(args: &[Expr]) -> Vec<&Expr> {
    args.iter().collect()
}
