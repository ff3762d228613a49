//! Error recovery for the parser.
//!
//! Provides token sets and synchronization points for continuing after a
//! parse failure. Uses bitset-based O(1) membership testing.

use lark_ir::TokenKind;

/// A set of token kinds using a `u128` bitset.
///
/// Each bit corresponds to a `TokenKind` discriminant index. Membership
/// testing, union and intersection are single bitwise operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenSet(u128);

impl TokenSet {
    /// Create an empty token set.
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Add a token kind to this set (builder pattern for const contexts).
    #[inline]
    #[must_use]
    pub const fn with(self, kind: &TokenKind) -> Self {
        Self(self.0 | (1u128 << kind.discriminant_index()))
    }

    /// Union of two token sets.
    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Check if this set contains a token kind (payloads ignored).
    #[inline]
    pub const fn contains(&self, kind: &TokenKind) -> bool {
        (self.0 & (1u128 << kind.discriminant_index())) != 0
    }

    /// Check if this set is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TokenSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Tokens that may begin a top-level declaration.
///
/// A failed declaration skips to the next of these so one parse collects
/// every independent declaration error.
pub const DECL_START: TokenSet = TokenSet::new()
    .with(&TokenKind::Let)
    .with(&TokenKind::Pub)
    .with(&TokenKind::Sync)
    .with(&TokenKind::Fn)
    .with(&TokenKind::On)
    .with(&TokenKind::Event)
    .with(&TokenKind::Eof);

/// Tokens that may begin a statement, plus block close.
///
/// A failed statement skips to the next of these; the newline separator
/// is included so recovery lands at the start of the next line.
pub const STMT_START: TokenSet = TokenSet::new()
    .with(&TokenKind::Let)
    .with(&TokenKind::If)
    .with(&TokenKind::While)
    .with(&TokenKind::For)
    .with(&TokenKind::Return)
    .with(&TokenKind::Break)
    .with(&TokenKind::Continue)
    .with(&TokenKind::Send)
    .with(&TokenKind::Newline)
    .with(&TokenKind::RBrace)
    .with(&TokenKind::Eof);

#[cfg(test)]
mod tests;
