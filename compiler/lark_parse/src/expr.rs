//! Expression grammar.
//!
//! Precedence ladder, lowest to highest: logical-or, logical-and,
//! equality, comparison, additive, multiplicative, unary, postfix
//! (member access, call, index), primary.

use lark_diagnostic::{Diagnostic, ErrorCode};
use lark_ir::{BinOp, Expr, ExprKind, TokenKind, UnOp};

use crate::parser::Parser;

impl Parser<'_, '_> {
    pub(crate) fn parse_expr(&mut self) -> Option<Expr> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_and()?;
        while self.at(&TokenKind::OrOr) {
            self.advance();
            let rhs = self.parse_and()?;
            lhs = self.binary(BinOp::Or, lhs, rhs);
        }
        Some(lhs)
    }

    fn parse_and(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_equality()?;
        while self.at(&TokenKind::AndAnd) {
            self.advance();
            let rhs = self.parse_equality()?;
            lhs = self.binary(BinOp::And, lhs, rhs);
        }
        Some(lhs)
    }

    fn parse_equality(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_comparison()?;
        loop {
            let op = match self.current_kind() {
                TokenKind::EqEq => BinOp::Eq,
                TokenKind::NotEq => BinOp::Ne,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_comparison()?;
            lhs = self.binary(op, lhs, rhs);
        }
        Some(lhs)
    }

    fn parse_comparison(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_additive()?;
        loop {
            let op = match self.current_kind() {
                TokenKind::Lt => BinOp::Lt,
                TokenKind::LtEq => BinOp::Le,
                TokenKind::Gt => BinOp::Gt,
                TokenKind::GtEq => BinOp::Ge,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_additive()?;
            lhs = self.binary(op, lhs, rhs);
        }
        Some(lhs)
    }

    fn parse_additive(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_multiplicative()?;
        loop {
            let op = match self.current_kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_multiplicative()?;
            lhs = self.binary(op, lhs, rhs);
        }
        Some(lhs)
    }

    fn parse_multiplicative(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.current_kind() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Rem,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_unary()?;
            lhs = self.binary(op, lhs, rhs);
        }
        Some(lhs)
    }

    fn parse_unary(&mut self) -> Option<Expr> {
        let op = match self.current_kind() {
            TokenKind::Bang => Some(UnOp::Not),
            TokenKind::Minus => Some(UnOp::Neg),
            _ => None,
        };
        let Some(op) = op else {
            return self.parse_postfix();
        };
        let start = self.advance().span;
        let operand = self.parse_unary()?;
        let span = start.merge(operand.span);
        Some(self.make_expr(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    fn parse_postfix(&mut self) -> Option<Expr> {
        let mut expr = self.parse_primary()?;
        loop {
            match self.current_kind() {
                TokenKind::Dot => {
                    self.advance();
                    let (member, member_span) = self.expect_ident("member name")?;
                    let span = expr.span.merge(member_span);
                    expr = self.make_expr(
                        ExprKind::Member {
                            object: Box::new(expr),
                            member,
                            member_span,
                        },
                        span,
                    );
                }
                TokenKind::LParen => {
                    self.advance();
                    let mut args = Vec::new();
                    while !self.at(&TokenKind::RParen) && !self.at_eof() {
                        args.push(self.parse_expr()?);
                        if !self.eat(&TokenKind::Comma) {
                            break;
                        }
                    }
                    let close = self.expect(&TokenKind::RParen)?.span;
                    let span = expr.span.merge(close);
                    expr = self.make_expr(
                        ExprKind::Call {
                            callee: Box::new(expr),
                            args,
                        },
                        span,
                    );
                }
                TokenKind::LBracket => {
                    self.advance();
                    let index = self.parse_expr()?;
                    let close = self.expect(&TokenKind::RBracket)?.span;
                    let span = expr.span.merge(close);
                    expr = self.make_expr(
                        ExprKind::Index {
                            object: Box::new(expr),
                            index: Box::new(index),
                        },
                        span,
                    );
                }
                _ => break,
            }
        }
        Some(expr)
    }

    fn parse_primary(&mut self) -> Option<Expr> {
        let span = self.current_span();
        let kind = match self.current_kind() {
            TokenKind::Int(v) => {
                let v = *v;
                self.advance();
                ExprKind::Int(v)
            }
            TokenKind::Float(bits) => {
                let v = TokenKind::float_value(*bits);
                self.advance();
                ExprKind::Float(v)
            }
            TokenKind::Str(_) => return self.parse_string(),
            TokenKind::True => {
                self.advance();
                ExprKind::Bool(true)
            }
            TokenKind::False => {
                self.advance();
                ExprKind::Bool(false)
            }
            TokenKind::Null => {
                self.advance();
                ExprKind::Null
            }
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                ExprKind::Name(name)
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                return Some(inner);
            }
            TokenKind::LBracket => {
                self.advance();
                let mut elems = Vec::new();
                while !self.at(&TokenKind::RBracket) && !self.at_eof() {
                    elems.push(self.parse_expr()?);
                    if !self.eat(&TokenKind::Comma) {
                        break;
                    }
                }
                let close = self.expect(&TokenKind::RBracket)?.span;
                return Some(self.make_expr(ExprKind::Array { elems }, span.merge(close)));
            }
            TokenKind::Error => {
                // Already reported by the lexer; yield a placeholder.
                self.advance();
                ExprKind::Error
            }
            _ => {
                let found = self.current_kind().describe();
                self.bag.push(
                    Diagnostic::error(ErrorCode::E1002)
                        .with_message(format!("expected expression, found {found}"))
                        .with_label(span, "expected expression here"),
                );
                return None;
            }
        };
        Some(self.make_expr(kind, span))
    }

    fn binary(&mut self, op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
        let span = lhs.span.merge(rhs.span);
        self.make_expr(
            ExprKind::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            span,
        )
    }
}
