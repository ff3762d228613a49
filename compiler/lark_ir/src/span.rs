//! Source locations.
//!
//! Positions are 1-based line/column pairs, as editors and the language
//! server expect them. A [`Span`] pairs a start and end position with the
//! id of the file it came from; every token and AST node carries one.

use std::fmt;

/// Identifies one source file within a compilation session.
///
/// The driver assigns file ids; the core never interprets them beyond
/// equality.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, PartialOrd, Ord)]
pub struct FileId(pub u32);

/// A 1-based line/column position in a source file.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct SourcePos {
    pub line: u32,
    pub col: u32,
}

impl SourcePos {
    /// First position of a file.
    pub const START: SourcePos = SourcePos { line: 1, col: 1 };

    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        SourcePos { line, col }
    }
}

impl Default for SourcePos {
    fn default() -> Self {
        SourcePos::START
    }
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// A half-open region of source text: `[start, end)`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Span {
    pub file: FileId,
    pub start: SourcePos,
    pub end: SourcePos,
}

impl Span {
    /// Dummy span for generated or synthesized nodes.
    pub const DUMMY: Span = Span {
        file: FileId(0),
        start: SourcePos::START,
        end: SourcePos::START,
    };

    #[inline]
    pub const fn new(file: FileId, start: SourcePos, end: SourcePos) -> Self {
        Span { file, start, end }
    }

    /// A zero-width span at a single position.
    #[inline]
    pub const fn point(file: FileId, pos: SourcePos) -> Self {
        Span {
            file,
            start: pos,
            end: pos,
        }
    }

    /// Union of two spans.
    ///
    /// Used when composing a larger node out of child nodes. Both spans
    /// must come from the same file; the file id of `self` wins.
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span {
            file: self.file,
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests;
