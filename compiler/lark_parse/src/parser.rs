//! Parser state, token navigation, and declaration-level grammar.

use lark_diagnostic::{Diagnostic, DiagnosticBag, ErrorCode};
use lark_ir::{
    Block, Decl, EventDecl, Expr, ExprId, ExprKind, FnDecl, HandlerDecl, Module, Param, Span,
    SyncMode, Token, TokenKind, TypeRef, VarDecl,
};
use lark_ir::FileId;
use tracing::debug;

use crate::recovery::{TokenSet, DECL_START};

/// Parse a token stream into a module.
///
/// Always returns a module; on errors it contains what could be
/// recovered, and the bag holds one diagnostic per independent failure.
pub fn parse(tokens: &[Token], file: FileId, bag: &mut DiagnosticBag) -> Module {
    let mut parser = Parser {
        tokens,
        pos: 0,
        file,
        bag,
        next_expr_id: 0,
    };
    let module = parser.parse_module();
    debug!(
        decls = module.decls.len(),
        exprs = module.expr_count,
        "parsed module"
    );
    module
}

pub(crate) struct Parser<'a, 'b> {
    pub(crate) tokens: &'a [Token],
    pub(crate) pos: usize,
    pub(crate) file: FileId,
    pub(crate) bag: &'b mut DiagnosticBag,
    pub(crate) next_expr_id: u32,
}

impl Parser<'_, '_> {
    // ---- token navigation ----------------------------------------------

    pub(crate) fn current(&self) -> &Token {
        // The lexer guarantees a trailing Eof token.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    pub(crate) fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    pub(crate) fn current_span(&self) -> Span {
        self.current().span
    }

    pub(crate) fn at(&self, kind: &TokenKind) -> bool {
        self.current_kind().same_kind(kind)
    }

    pub(crate) fn at_eof(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or report an unexpected-token error.
    pub(crate) fn expect(&mut self, kind: &TokenKind) -> Option<Token> {
        if self.at(kind) {
            Some(self.advance())
        } else {
            self.unexpected(&format!(
                "expected {}",
                kind.fixed_text()
                    .map_or_else(|| format!("{kind:?}"), |t| format!("`{t}`"))
            ));
            None
        }
    }

    pub(crate) fn unexpected(&mut self, expected: &str) {
        let found = self.current_kind().describe();
        let span = self.current_span();
        self.bag.push(
            Diagnostic::error(ErrorCode::E1001)
                .with_message(format!("unexpected token: {expected}, found {found}"))
                .with_label(span, expected.to_string()),
        );
    }

    pub(crate) fn skip_newlines(&mut self) {
        while matches!(self.current_kind(), TokenKind::Newline | TokenKind::Semi) {
            self.advance();
        }
    }

    /// Skip ahead to the next token in `set`, consuming at least one
    /// token so recovery always makes progress.
    pub(crate) fn recover_to(&mut self, set: TokenSet) {
        if !self.at_eof() && set.contains(self.current_kind()) {
            self.advance();
        }
        while !self.at_eof() && !set.contains(self.current_kind()) {
            self.advance();
        }
    }

    pub(crate) fn make_expr(&mut self, kind: ExprKind, span: Span) -> Expr {
        let id = ExprId(self.next_expr_id);
        self.next_expr_id += 1;
        Expr { id, kind, span }
    }

    // ---- declarations --------------------------------------------------

    fn parse_module(&mut self) -> Module {
        let mut decls = Vec::new();
        self.skip_newlines();
        while !self.at_eof() {
            if matches!(self.current_kind(), TokenKind::Error) {
                // The lexer already reported this token.
                self.advance();
                self.skip_newlines();
                continue;
            }
            match self.parse_decl() {
                Some(decl) => decls.push(decl),
                None => self.recover_to(DECL_START),
            }
            self.skip_newlines();
        }
        Module {
            decls,
            expr_count: self.next_expr_id,
        }
    }

    fn parse_decl(&mut self) -> Option<Decl> {
        match self.current_kind() {
            TokenKind::Pub => {
                let start = self.advance().span;
                self.expect(&TokenKind::Let)?;
                self.parse_var_decl(start, true, None).map(Decl::Variable)
            }
            TokenKind::Sync => {
                let start = self.advance().span;
                let mode = self.parse_sync_mode()?;
                self.expect(&TokenKind::Let)?;
                self.parse_var_decl(start, false, Some(mode))
                    .map(Decl::Variable)
            }
            TokenKind::Let => {
                let start = self.advance().span;
                self.parse_var_decl(start, false, None).map(Decl::Variable)
            }
            TokenKind::Fn => self.parse_fn_decl().map(Decl::Function),
            TokenKind::On => self.parse_handler().map(Decl::Handler),
            TokenKind::Event => self.parse_custom_event().map(Decl::CustomEvent),
            _ => {
                let span = self.current_span();
                let found = self.current_kind().describe();
                self.bag.push(
                    Diagnostic::error(ErrorCode::E1006)
                        .with_message(format!("expected a declaration, found {found}"))
                        .with_label(span, "declarations start with `let`, `pub`, `sync`, `fn`, `on` or `event`"),
                );
                None
            }
        }
    }

    fn parse_sync_mode(&mut self) -> Option<SyncMode> {
        let span = self.current_span();
        if let TokenKind::Ident(name) = self.current_kind() {
            if let Some(mode) = SyncMode::from_str(name) {
                self.advance();
                return Some(mode);
            }
            let name = name.clone();
            self.advance();
            self.bag.push(
                Diagnostic::error(ErrorCode::E1008)
                    .with_message(format!("invalid sync mode `{name}`"))
                    .with_label(span, "expected `none`, `linear` or `smooth`"),
            );
            return None;
        }
        self.bag.push(
            Diagnostic::error(ErrorCode::E1008)
                .with_message("expected a sync mode after `sync`")
                .with_label(span, "expected `none`, `linear` or `smooth`"),
        );
        None
    }

    /// Body of a `let`, shared by module-level and local declarations.
    /// `start` is the span of the introducing keyword.
    pub(crate) fn parse_var_decl(
        &mut self,
        start: Span,
        export: bool,
        sync: Option<SyncMode>,
    ) -> Option<VarDecl> {
        let (name, name_span) = self.expect_ident("variable name")?;

        let ty = if self.eat(&TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };

        let init = if self.eat(&TokenKind::Assign) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        let end = init
            .as_ref()
            .map(|e| e.span)
            .or_else(|| ty.as_ref().map(TypeRef::span))
            .unwrap_or(name_span);
        Some(VarDecl {
            name,
            name_span,
            ty,
            init,
            export,
            sync,
            span: start.merge(end),
        })
    }

    fn parse_fn_decl(&mut self) -> Option<FnDecl> {
        let start = self.advance().span; // `fn`
        let (name, name_span) = self.expect_ident("function name")?;

        // A `<...>` here is a generics list. The platform cannot express
        // it; skip it now and let the analyzer reject the declaration so
        // the rest of the function still gets checked.
        let generics_span = self.skip_generic_params();

        self.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        while !self.at(&TokenKind::RParen) && !self.at_eof() {
            let param = self.parse_param()?;
            params.push(param);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen)?;

        let ret = if self.eat(&TokenKind::Arrow) {
            Some(self.parse_type()?)
        } else {
            None
        };

        let body = self.parse_block()?;
        let span = start.merge(body.span);
        Some(FnDecl {
            name,
            name_span,
            params,
            ret,
            body,
            generics_span,
            span,
        })
    }

    fn skip_generic_params(&mut self) -> Option<Span> {
        if !self.at(&TokenKind::Lt) {
            return None;
        }
        let start = self.advance().span;
        let mut depth = 1u32;
        let mut end = start;
        while depth > 0 && !self.at_eof() {
            match self.current_kind() {
                TokenKind::Lt => depth += 1,
                TokenKind::Gt => depth -= 1,
                TokenKind::LBrace | TokenKind::Newline => break,
                _ => {}
            }
            end = self.advance().span;
        }
        Some(start.merge(end))
    }

    fn parse_handler(&mut self) -> Option<HandlerDecl> {
        let start = self.advance().span; // `on`
        let (event, event_span) = self.expect_ident("event name")?;

        let param = if self.eat(&TokenKind::LParen) {
            let param = self.parse_param()?;
            self.expect(&TokenKind::RParen)?;
            Some(param)
        } else {
            None
        };

        let body = self.parse_block()?;
        let span = start.merge(body.span);
        Some(HandlerDecl {
            event,
            event_span,
            param,
            body,
            span,
        })
    }

    fn parse_custom_event(&mut self) -> Option<EventDecl> {
        let start = self.advance().span; // `event`
        let (name, name_span) = self.expect_ident("event name")?;
        let body = self.parse_block()?;
        let span = start.merge(body.span);
        Some(EventDecl {
            name,
            name_span,
            body,
            span,
        })
    }

    fn parse_param(&mut self) -> Option<Param> {
        let (name, name_span) = self.expect_ident("parameter name")?;
        self.expect(&TokenKind::Colon)?;
        let ty = self.parse_type()?;
        Some(Param {
            name,
            name_span,
            ty,
        })
    }

    pub(crate) fn parse_type(&mut self) -> Option<TypeRef> {
        let span = self.current_span();
        let TokenKind::Ident(name) = self.current_kind() else {
            let found = self.current_kind().describe();
            self.bag.push(
                Diagnostic::error(ErrorCode::E1005)
                    .with_message(format!("expected a type, found {found}"))
                    .with_label(span, "expected a type name"),
            );
            return None;
        };
        let name = name.clone();
        self.advance();
        let mut ty = TypeRef::Named { name, span };

        while self.at(&TokenKind::LBracket) {
            let open = self.advance().span;
            if self.expect(&TokenKind::RBracket).is_none() {
                return None;
            }
            let full = ty.span().merge(open).merge(self.tokens[self.pos - 1].span);
            ty = TypeRef::Array {
                elem: Box::new(ty),
                span: full,
            };
        }
        Some(ty)
    }

    pub(crate) fn expect_ident(&mut self, what: &str) -> Option<(String, Span)> {
        let span = self.current_span();
        if let TokenKind::Ident(name) = self.current_kind() {
            let name = name.clone();
            self.advance();
            Some((name, span))
        } else {
            let found = self.current_kind().describe();
            self.bag.push(
                Diagnostic::error(ErrorCode::E1004)
                    .with_message(format!("expected {what}, found {found}"))
                    .with_label(span, format!("expected {what}")),
            );
            None
        }
    }
}
