//! Tokens produced by the lexer.
//!
//! Float literals store their bit pattern as `u64` so that `TokenKind`
//! keeps `Eq` and `Hash`. String tokens hold the raw text between the
//! quotes with escapes unprocessed: interpolation splitting happens in the
//! parser, which needs the original `{`/`}` positions intact.

use std::fmt;

use crate::span::Span;

/// A token with its source span.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.span)
    }
}

/// Token kinds for Lark.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    /// Integer literal: `42`
    Int(i64),
    /// Float literal: `3.14` (stored as bits for `Eq`/`Hash`)
    Float(u64),
    /// String literal: raw text between the quotes, escapes unprocessed
    Str(String),
    /// Identifier
    Ident(String),

    // Keywords
    Let,
    Pub,
    Sync,
    On,
    Event,
    Fn,
    If,
    Else,
    While,
    For,
    In,
    Return,
    Break,
    Continue,
    Send,
    True,
    False,
    Null,

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Colon,
    Dot,
    DotDot,
    Arrow,
    Newline,
    Semi,

    // Operators
    Assign,
    PlusAssign,
    MinusAssign,
    StarAssign,
    SlashAssign,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    AndAnd,
    OrOr,
    Bang,

    /// Placeholder emitted after a lexical error so the stream never
    /// aborts.
    Error,
    /// End of input; always the last token in a stream.
    Eof,
}

impl TokenKind {
    /// Construct a float token from its value.
    #[inline]
    pub fn float(value: f64) -> Self {
        TokenKind::Float(value.to_bits())
    }

    /// The value of a `Float` token.
    #[inline]
    pub fn float_value(bits: u64) -> f64 {
        f64::from_bits(bits)
    }

    /// Dense index for bitset membership tests.
    ///
    /// Payload-carrying variants collapse to one index each; the parser's
    /// recovery sets only care about the kind, never the payload.
    #[inline]
    pub const fn discriminant_index(&self) -> u8 {
        match self {
            TokenKind::Int(_) => 0,
            TokenKind::Float(_) => 1,
            TokenKind::Str(_) => 2,
            TokenKind::Ident(_) => 3,
            TokenKind::Let => 4,
            TokenKind::Pub => 5,
            TokenKind::Sync => 6,
            TokenKind::On => 7,
            TokenKind::Event => 8,
            TokenKind::Fn => 9,
            TokenKind::If => 10,
            TokenKind::Else => 11,
            TokenKind::While => 12,
            TokenKind::For => 13,
            TokenKind::In => 14,
            TokenKind::Return => 15,
            TokenKind::Break => 16,
            TokenKind::Continue => 17,
            TokenKind::Send => 18,
            TokenKind::True => 19,
            TokenKind::False => 20,
            TokenKind::Null => 21,
            TokenKind::LParen => 22,
            TokenKind::RParen => 23,
            TokenKind::LBrace => 24,
            TokenKind::RBrace => 25,
            TokenKind::LBracket => 26,
            TokenKind::RBracket => 27,
            TokenKind::Comma => 28,
            TokenKind::Colon => 29,
            TokenKind::Dot => 30,
            TokenKind::DotDot => 31,
            TokenKind::Arrow => 32,
            TokenKind::Newline => 33,
            TokenKind::Semi => 34,
            TokenKind::Assign => 35,
            TokenKind::PlusAssign => 36,
            TokenKind::MinusAssign => 37,
            TokenKind::StarAssign => 38,
            TokenKind::SlashAssign => 39,
            TokenKind::Plus => 40,
            TokenKind::Minus => 41,
            TokenKind::Star => 42,
            TokenKind::Slash => 43,
            TokenKind::Percent => 44,
            TokenKind::EqEq => 45,
            TokenKind::NotEq => 46,
            TokenKind::Lt => 47,
            TokenKind::LtEq => 48,
            TokenKind::Gt => 49,
            TokenKind::GtEq => 50,
            TokenKind::AndAnd => 51,
            TokenKind::OrOr => 52,
            TokenKind::Bang => 53,
            TokenKind::Error => 54,
            TokenKind::Eof => 55,
        }
    }

    /// True if two kinds are the same variant, ignoring payloads.
    #[inline]
    pub fn same_kind(&self, other: &TokenKind) -> bool {
        self.discriminant_index() == other.discriminant_index()
    }

    /// Human-readable description for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Int(v) => format!("integer `{v}`"),
            TokenKind::Float(bits) => format!("float `{}`", f64::from_bits(*bits)),
            TokenKind::Str(_) => "string literal".to_string(),
            TokenKind::Ident(name) => format!("`{name}`"),
            TokenKind::Newline => "end of line".to_string(),
            TokenKind::Eof => "end of file".to_string(),
            TokenKind::Error => "invalid token".to_string(),
            other => format!("`{}`", other.fixed_text().unwrap_or("?")),
        }
    }

    /// The literal spelling of keyword/punctuation kinds.
    pub fn fixed_text(&self) -> Option<&'static str> {
        Some(match self {
            TokenKind::Let => "let",
            TokenKind::Pub => "pub",
            TokenKind::Sync => "sync",
            TokenKind::On => "on",
            TokenKind::Event => "event",
            TokenKind::Fn => "fn",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::For => "for",
            TokenKind::In => "in",
            TokenKind::Return => "return",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Send => "send",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Dot => ".",
            TokenKind::DotDot => "..",
            TokenKind::Arrow => "->",
            TokenKind::Semi => ";",
            TokenKind::Assign => "=",
            TokenKind::PlusAssign => "+=",
            TokenKind::MinusAssign => "-=",
            TokenKind::StarAssign => "*=",
            TokenKind::SlashAssign => "/=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::AndAnd => "&&",
            TokenKind::OrOr => "||",
            TokenKind::Bang => "!",
            _ => return None,
        })
    }

    /// Look up a keyword by its identifier spelling.
    pub fn keyword(text: &str) -> Option<TokenKind> {
        Some(match text {
            "let" => TokenKind::Let,
            "pub" => TokenKind::Pub,
            "sync" => TokenKind::Sync,
            "on" => TokenKind::On,
            "event" => TokenKind::Event,
            "fn" => TokenKind::Fn,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "for" => TokenKind::For,
            "in" => TokenKind::In,
            "return" => TokenKind::Return,
            "break" => TokenKind::Break,
            "continue" => TokenKind::Continue,
            "send" => TokenKind::Send,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests;
