//! Hand-rolled single-pass lexer for Lark.
//!
//! Design constraints, all imposed by the pipeline behind it:
//!
//! - Every token carries its source span (1-based line/column).
//! - Malformed input emits a diagnostic plus an [`TokenKind::Error`]
//!   token and scanning resumes; the token stream never aborts.
//! - Block comments nest; a comment closes only when the depth counter
//!   returns to zero.
//! - String literals are one opaque token holding the raw text between
//!   the quotes. Splitting on `{expr}` interpolation markers is the
//!   parser's job, which re-invokes [`lex_at`] on each fragment.
//! - Newline tokens separate statements but are suppressed inside
//!   parentheses and brackets, so multi-line argument lists need no
//!   continuation syntax.

mod cursor;

use lark_diagnostic::{Diagnostic, DiagnosticBag, ErrorCode};
use lark_ir::{FileId, SourcePos, Span, Token, TokenKind};

use crate::cursor::Cursor;

/// Tokenize a whole source file.
pub fn lex(source: &str, file: FileId, bag: &mut DiagnosticBag) -> Vec<Token> {
    lex_at(source, file, SourcePos::START, bag)
}

/// Tokenize a source fragment whose first character sits at `start`.
///
/// The parser uses this to lex interpolation fragments embedded in string
/// literals, so that spans inside the fragment point into the real file.
pub fn lex_at(source: &str, file: FileId, start: SourcePos, bag: &mut DiagnosticBag) -> Vec<Token> {
    let mut lexer = Lexer {
        cursor: Cursor::new(source, start),
        file,
        bag,
        tokens: Vec::new(),
        bracket_depth: 0,
    };
    lexer.run();
    lexer.tokens
}

struct Lexer<'a, 'b> {
    cursor: Cursor<'a>,
    file: FileId,
    bag: &'b mut DiagnosticBag,
    tokens: Vec<Token>,
    /// Nesting depth of `(` and `[`; newlines inside are not separators.
    bracket_depth: u32,
}

impl Lexer<'_, '_> {
    fn run(&mut self) {
        while !self.cursor.is_eof() {
            self.scan_token();
        }
        let eof = self.cursor.source_pos();
        self.tokens
            .push(Token::new(TokenKind::Eof, Span::point(self.file, eof)));
    }

    fn push(&mut self, kind: TokenKind, start: SourcePos) {
        let span = Span::new(self.file, start, self.cursor.source_pos());
        self.tokens.push(Token::new(kind, span));
    }

    fn error(&mut self, code: ErrorCode, message: String, start: SourcePos) {
        let span = Span::new(self.file, start, self.cursor.source_pos());
        self.bag
            .push(Diagnostic::error(code).with_message(message).with_label(
                span,
                match code {
                    ErrorCode::E0002 => "string opened here",
                    ErrorCode::E0003 => "comment opened here",
                    _ => "here",
                },
            ));
        self.tokens.push(Token::new(TokenKind::Error, span));
    }

    fn scan_token(&mut self) {
        let start = self.cursor.source_pos();
        let Some(byte) = self.cursor.peek() else {
            return;
        };

        match byte {
            b' ' | b'\t' | b'\r' => self.cursor.bump(),
            b'\n' => {
                self.cursor.bump();
                if self.bracket_depth == 0 {
                    // Collapse runs of blank lines into one separator.
                    if !matches!(
                        self.tokens.last().map(|t| &t.kind),
                        Some(TokenKind::Newline) | None
                    ) {
                        self.push(TokenKind::Newline, start);
                    }
                }
            }
            b'/' => match self.cursor.peek2() {
                Some(b'/') => {
                    let len = self.cursor.line_remainder_len();
                    self.cursor.skip_within_line(len);
                }
                Some(b'*') => self.scan_block_comment(start),
                Some(b'=') => {
                    self.cursor.bump();
                    self.cursor.bump();
                    self.push(TokenKind::SlashAssign, start);
                }
                _ => {
                    self.cursor.bump();
                    self.push(TokenKind::Slash, start);
                }
            },
            b'"' => self.scan_string(start),
            b'0'..=b'9' => self.scan_number(start),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.scan_ident(start),
            _ => self.scan_operator(start),
        }
    }

    /// Nested block comments: `/*` increments depth, `*/` decrements,
    /// and the comment only ends when depth returns to zero.
    fn scan_block_comment(&mut self, start: SourcePos) {
        self.cursor.bump(); // '/'
        self.cursor.bump(); // '*'
        let mut depth = 1u32;

        while depth > 0 {
            match self.cursor.peek() {
                None => {
                    self.error(
                        ErrorCode::E0003,
                        "unterminated block comment".to_string(),
                        start,
                    );
                    return;
                }
                Some(b'/') if self.cursor.peek2() == Some(b'*') => {
                    self.cursor.bump();
                    self.cursor.bump();
                    depth += 1;
                }
                Some(b'*') if self.cursor.peek2() == Some(b'/') => {
                    self.cursor.bump();
                    self.cursor.bump();
                    depth -= 1;
                }
                Some(b) if b.is_ascii() => self.cursor.bump(),
                Some(_) => {
                    self.cursor.bump_char();
                }
            }
        }
    }

    /// One opaque string token; escapes stay raw so the parser can split
    /// interpolation fragments against the original text.
    fn scan_string(&mut self, start: SourcePos) {
        self.cursor.bump(); // opening quote
        let content_start = self.cursor.offset();

        loop {
            match self.cursor.peek() {
                None | Some(b'\n') => {
                    self.error(
                        ErrorCode::E0002,
                        "unterminated string literal".to_string(),
                        start,
                    );
                    return;
                }
                Some(b'"') => {
                    let raw = self
                        .cursor
                        .slice(content_start, self.cursor.offset())
                        .to_string();
                    self.cursor.bump(); // closing quote
                    self.push(TokenKind::Str(raw), start);
                    return;
                }
                Some(b'\\') => {
                    self.cursor.bump();
                    // Skip the escaped character whatever it is.
                    if !matches!(self.cursor.peek(), None | Some(b'\n')) {
                        self.cursor.bump_char();
                    }
                }
                Some(b) if b.is_ascii() => self.cursor.bump(),
                Some(_) => {
                    self.cursor.bump_char();
                }
            }
        }
    }

    fn scan_number(&mut self, start: SourcePos) {
        let begin = self.cursor.offset();
        while self.cursor.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.cursor.bump();
        }

        let mut is_float = false;
        // A `.` begins a fraction only when followed by a digit; `1..5`
        // keeps the range operator intact.
        if self.cursor.peek() == Some(b'.') && self.cursor.peek2().is_some_and(|b| b.is_ascii_digit())
        {
            is_float = true;
            self.cursor.bump();
            while self.cursor.peek().is_some_and(|b| b.is_ascii_digit()) {
                self.cursor.bump();
            }
        }
        if matches!(self.cursor.peek(), Some(b'e' | b'E')) {
            let after = self.cursor.peek2();
            let exp_digit = match after {
                Some(b'+' | b'-') => true,
                Some(d) => d.is_ascii_digit(),
                None => false,
            };
            if exp_digit {
                is_float = true;
                self.cursor.bump();
                if matches!(self.cursor.peek(), Some(b'+' | b'-')) {
                    self.cursor.bump();
                }
                while self.cursor.peek().is_some_and(|b| b.is_ascii_digit()) {
                    self.cursor.bump();
                }
            }
        }

        let text = self.cursor.slice(begin, self.cursor.offset());
        if is_float {
            match text.parse::<f64>() {
                Ok(value) => self.push(TokenKind::float(value), start),
                Err(_) => self.error(
                    ErrorCode::E0004,
                    format!("invalid number literal `{text}`"),
                    start,
                ),
            }
        } else {
            match text.parse::<i64>() {
                Ok(value) => self.push(TokenKind::Int(value), start),
                Err(_) => self.error(
                    ErrorCode::E0004,
                    format!("integer literal `{text}` is out of range"),
                    start,
                ),
            }
        }
    }

    fn scan_ident(&mut self, start: SourcePos) {
        let begin = self.cursor.offset();
        while self
            .cursor
            .peek()
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_')
        {
            self.cursor.bump();
        }
        let text = self.cursor.slice(begin, self.cursor.offset());
        let kind = TokenKind::keyword(text).unwrap_or_else(|| TokenKind::Ident(text.to_string()));
        self.push(kind, start);
    }

    fn scan_operator(&mut self, start: SourcePos) {
        let Some(byte) = self.cursor.peek() else {
            return;
        };
        let kind = match byte {
            b'(' => {
                self.bracket_depth += 1;
                self.one(TokenKind::LParen)
            }
            b')' => {
                self.bracket_depth = self.bracket_depth.saturating_sub(1);
                self.one(TokenKind::RParen)
            }
            b'[' => {
                self.bracket_depth += 1;
                self.one(TokenKind::LBracket)
            }
            b']' => {
                self.bracket_depth = self.bracket_depth.saturating_sub(1);
                self.one(TokenKind::RBracket)
            }
            b'{' => self.one(TokenKind::LBrace),
            b'}' => self.one(TokenKind::RBrace),
            b',' => self.one(TokenKind::Comma),
            b':' => self.one(TokenKind::Colon),
            b';' => self.one(TokenKind::Semi),
            b'.' => {
                self.cursor.bump();
                if self.cursor.eat(b'.') {
                    TokenKind::DotDot
                } else {
                    TokenKind::Dot
                }
            }
            b'+' => self.with_eq(TokenKind::Plus, TokenKind::PlusAssign),
            b'-' => {
                self.cursor.bump();
                if self.cursor.eat(b'>') {
                    TokenKind::Arrow
                } else if self.cursor.eat(b'=') {
                    TokenKind::MinusAssign
                } else {
                    TokenKind::Minus
                }
            }
            b'*' => self.with_eq(TokenKind::Star, TokenKind::StarAssign),
            b'%' => self.one(TokenKind::Percent),
            b'=' => self.with_eq(TokenKind::Assign, TokenKind::EqEq),
            b'!' => self.with_eq(TokenKind::Bang, TokenKind::NotEq),
            b'<' => self.with_eq(TokenKind::Lt, TokenKind::LtEq),
            b'>' => self.with_eq(TokenKind::Gt, TokenKind::GtEq),
            b'&' => {
                self.cursor.bump();
                if self.cursor.eat(b'&') {
                    TokenKind::AndAnd
                } else {
                    self.error(
                        ErrorCode::E0001,
                        "illegal character `&`; did you mean `&&`?".to_string(),
                        start,
                    );
                    return;
                }
            }
            b'|' => {
                self.cursor.bump();
                if self.cursor.eat(b'|') {
                    TokenKind::OrOr
                } else {
                    self.error(
                        ErrorCode::E0001,
                        "illegal character `|`; did you mean `||`?".to_string(),
                        start,
                    );
                    return;
                }
            }
            _ => {
                let ch = self.cursor.bump_char().unwrap_or('\u{FFFD}');
                self.error(ErrorCode::E0001, format!("illegal character `{ch}`"), start);
                return;
            }
        };
        self.push(kind, start);
    }

    fn one(&mut self, kind: TokenKind) -> TokenKind {
        self.cursor.bump();
        kind
    }

    fn with_eq(&mut self, plain: TokenKind, with_eq: TokenKind) -> TokenKind {
        self.cursor.bump();
        if self.cursor.eat(b'=') {
            with_eq
        } else {
            plain
        }
    }
}
