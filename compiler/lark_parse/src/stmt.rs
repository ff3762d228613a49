//! Statement and block grammar.

use lark_diagnostic::{Diagnostic, ErrorCode};
use lark_ir::{AssignOp, Block, Expr, ExprKind, Stmt, TokenKind};

use crate::parser::Parser;
use crate::recovery::STMT_START;

impl Parser<'_, '_> {
    pub(crate) fn parse_block(&mut self) -> Option<Block> {
        let open = self.expect(&TokenKind::LBrace)?.span;
        let mut stmts = Vec::new();

        self.skip_newlines();
        while !self.at(&TokenKind::RBrace) && !self.at_eof() {
            if matches!(self.current_kind(), TokenKind::Error) {
                self.advance();
                self.skip_newlines();
                continue;
            }
            match self.parse_stmt() {
                Some(stmt) => {
                    stmts.push(stmt);
                    self.expect_stmt_end();
                }
                None => self.recover_to(STMT_START),
            }
            self.skip_newlines();
        }

        let close = if self.at(&TokenKind::RBrace) {
            self.advance().span
        } else {
            self.bag.push(
                Diagnostic::error(ErrorCode::E1003)
                    .with_message("unclosed block")
                    .with_label(self.current_span(), "expected `}`")
                    .with_secondary_label(open, "block opened here"),
            );
            self.current_span()
        };

        Some(Block {
            stmts,
            span: open.merge(close),
        })
    }

    /// Statements are newline-separated; `;` also works.
    fn expect_stmt_end(&mut self) {
        if matches!(
            self.current_kind(),
            TokenKind::Newline | TokenKind::Semi | TokenKind::RBrace | TokenKind::Eof
        ) {
            return;
        }
        self.unexpected("expected end of statement");
        self.recover_to(STMT_START);
    }

    fn parse_stmt(&mut self) -> Option<Stmt> {
        match self.current_kind() {
            TokenKind::Let => {
                let start = self.advance().span;
                self.parse_var_decl(start, false, None).map(Stmt::Let)
            }
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Return => {
                let span = self.advance().span;
                let value = if matches!(
                    self.current_kind(),
                    TokenKind::Newline | TokenKind::Semi | TokenKind::RBrace | TokenKind::Eof
                ) {
                    None
                } else {
                    Some(self.parse_expr()?)
                };
                let span = value.as_ref().map_or(span, |v| span.merge(v.span));
                Some(Stmt::Return { value, span })
            }
            TokenKind::Break => {
                let span = self.advance().span;
                Some(Stmt::Break { span })
            }
            TokenKind::Continue => {
                let span = self.advance().span;
                Some(Stmt::Continue { span })
            }
            TokenKind::Send => {
                let start = self.advance().span;
                let (event, event_span) = self.expect_ident("custom event name")?;
                Some(Stmt::Send {
                    event,
                    event_span,
                    span: start.merge(event_span),
                })
            }
            _ => self.parse_assign_or_expr(),
        }
    }

    fn parse_if(&mut self) -> Option<Stmt> {
        let start = self.advance().span; // `if`
        let cond = self.parse_expr()?;
        let then_block = self.parse_block()?;

        let else_block = if self.eat(&TokenKind::Else) {
            if self.at(&TokenKind::If) {
                // `else if` chains nest as a one-statement else block.
                let nested = self.parse_if()?;
                let span = nested.span();
                Some(Block {
                    stmts: vec![nested],
                    span,
                })
            } else {
                Some(self.parse_block()?)
            }
        } else {
            None
        };

        let end = else_block
            .as_ref()
            .map_or(then_block.span, |block| block.span);
        Some(Stmt::If {
            cond,
            then_block,
            else_block,
            span: start.merge(end),
        })
    }

    fn parse_while(&mut self) -> Option<Stmt> {
        let start = self.advance().span; // `while`
        let cond = self.parse_expr()?;
        let body = self.parse_block()?;
        let span = start.merge(body.span);
        Some(Stmt::While { cond, body, span })
    }

    fn parse_for(&mut self) -> Option<Stmt> {
        let start = self.advance().span; // `for`
        let (var, var_span) = self.expect_ident("loop variable")?;
        self.expect(&TokenKind::In)?;
        let first = self.parse_expr()?;

        if self.eat(&TokenKind::DotDot) {
            let end = self.parse_expr()?;
            let body = self.parse_block()?;
            let span = start.merge(body.span);
            Some(Stmt::ForRange {
                var,
                var_span,
                start: first,
                end,
                body,
                span,
            })
        } else {
            let body = self.parse_block()?;
            let span = start.merge(body.span);
            Some(Stmt::ForEach {
                var,
                var_span,
                iter: first,
                body,
                span,
            })
        }
    }

    fn parse_assign_or_expr(&mut self) -> Option<Stmt> {
        let expr = self.parse_expr()?;

        let op = match self.current_kind() {
            TokenKind::Assign => Some(AssignOp::Assign),
            TokenKind::PlusAssign => Some(AssignOp::Add),
            TokenKind::MinusAssign => Some(AssignOp::Sub),
            TokenKind::StarAssign => Some(AssignOp::Mul),
            TokenKind::SlashAssign => Some(AssignOp::Div),
            _ => None,
        };

        let Some(op) = op else {
            return Some(Stmt::Expr(expr));
        };
        self.advance();

        if !is_assignable(&expr) {
            self.bag.push(
                Diagnostic::error(ErrorCode::E1007)
                    .with_message("invalid assignment target")
                    .with_label(expr.span, "cannot assign to this expression"),
            );
            // Parse and discard the value to keep the stream in sync.
            let _ = self.parse_expr();
            return None;
        }

        let value = self.parse_expr()?;
        let span = expr.span.merge(value.span);
        Some(Stmt::Assign {
            target: expr,
            op,
            value,
            span,
        })
    }
}

fn is_assignable(expr: &Expr) -> bool {
    matches!(
        expr.kind,
        ExprKind::Name(_) | ExprKind::Member { .. } | ExprKind::Index { .. }
    )
}
