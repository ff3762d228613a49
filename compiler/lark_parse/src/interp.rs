//! String literals and interpolation.
//!
//! The lexer hands over one opaque token holding the raw text between the
//! quotes. A `{expr}` fragment is cut out here, re-lexed at its true file
//! position, and re-parsed into an embedded expression; the result is an
//! ordered sequence of literal-text and expression fragments.

use lark_diagnostic::{Diagnostic, ErrorCode};
use lark_ir::{Expr, ExprKind, InterpPart, SourcePos, Span, TokenKind};

use crate::parser::Parser;

impl Parser<'_, '_> {
    /// Parse the string token at the cursor into a literal or an
    /// interpolation expression.
    pub(crate) fn parse_string(&mut self) -> Option<Expr> {
        let token = self.advance();
        let TokenKind::Str(raw) = token.kind else {
            return None;
        };
        let span = token.span;

        if !has_interpolation(&raw) {
            return Some(self.make_expr(ExprKind::Str(unescape(&raw)), span));
        }

        let mut parts = Vec::new();
        let mut text = String::new();
        // Column of the next character; +1 skips the opening quote.
        let mut col = span.start.col + 1;
        let line = span.start.line;

        let mut chars = raw.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '\\' => {
                    if let Some(next) = chars.next() {
                        text.push(unescape_char(next));
                        col += 2;
                    } else {
                        col += 1;
                    }
                }
                '{' => {
                    if !text.is_empty() {
                        parts.push(InterpPart::Text(std::mem::take(&mut text)));
                    }
                    col += 1; // the `{`
                    let frag_col = col;
                    let mut fragment = String::new();
                    let mut depth = 1u32;
                    for inner in chars.by_ref() {
                        col += 1;
                        match inner {
                            '{' => depth += 1,
                            '}' => {
                                depth -= 1;
                                if depth == 0 {
                                    break;
                                }
                            }
                            _ => {}
                        }
                        if depth > 0 {
                            fragment.push(inner);
                        }
                    }
                    if depth > 0 {
                        self.bag.push(
                            Diagnostic::error(ErrorCode::E0005)
                                .with_message("unterminated interpolation fragment")
                                .with_label(span, "missing `}` in this string"),
                        );
                        return Some(self.make_expr(ExprKind::Error, span));
                    }
                    let expr =
                        self.parse_fragment(&fragment, SourcePos::new(line, frag_col), span)?;
                    parts.push(InterpPart::Expr(expr));
                }
                _ => {
                    text.push(ch);
                    col += 1;
                }
            }
        }
        if !text.is_empty() {
            parts.push(InterpPart::Text(text));
        }

        Some(self.make_expr(ExprKind::Interp { parts }, span))
    }

    /// Re-invoke the lexer and parser on one interpolation fragment.
    fn parse_fragment(&mut self, fragment: &str, at: SourcePos, string_span: Span) -> Option<Expr> {
        let tokens = lark_lexer::lex_at(fragment, self.file, at, self.bag);

        let mut sub = Parser {
            tokens: &tokens,
            pos: 0,
            file: self.file,
            bag: &mut *self.bag,
            next_expr_id: self.next_expr_id,
        };
        let expr = sub.parse_expr();
        let leftover = !sub.at_eof();
        self.next_expr_id = sub.next_expr_id;

        if expr.is_none() || leftover {
            if leftover && expr.is_some() {
                self.bag.push(
                    Diagnostic::error(ErrorCode::E1001)
                        .with_message("interpolation fragment must be a single expression")
                        .with_label(string_span, "in this string"),
                );
            }
            return Some(self.make_expr(ExprKind::Error, string_span));
        }
        expr
    }
}

/// Does the raw text contain an unescaped `{`?
fn has_interpolation(raw: &str) -> bool {
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                let _ = chars.next();
            }
            '{' => return true,
            _ => {}
        }
    }
    false
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                out.push(unescape_char(next));
            }
        } else {
            out.push(ch);
        }
    }
    out
}

fn unescape_char(escaped: char) -> char {
    match escaped {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        // `\"`, `\\`, `\{`, `\}` and anything else map to themselves.
        other => other,
    }
}
