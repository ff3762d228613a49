//! Byte cursor with line/column tracking.
//!
//! The lexer works byte-at-a-time over the UTF-8 source. Columns count
//! Unicode scalar values, not bytes, so spans agree with what editors
//! display; multi-byte characters only ever appear inside strings,
//! comments, or as illegal-character errors.

use lark_ir::SourcePos;

pub struct Cursor<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: u32,
    col: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(src: &'a str, start: SourcePos) -> Self {
        Cursor {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            line: start.line,
            col: start.col,
        }
    }

    /// Current position, 1-based.
    #[inline]
    pub fn source_pos(&self) -> SourcePos {
        SourcePos::new(self.line, self.col)
    }

    /// Current byte offset.
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// The byte at the cursor, if any.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// The byte one past the cursor, if any.
    #[inline]
    pub fn peek2(&self) -> Option<u8> {
        self.bytes.get(self.pos + 1).copied()
    }

    /// Advance over one ASCII byte. Handles `\n` line accounting.
    ///
    /// Must only be called when the current byte is ASCII; use
    /// [`Cursor::bump_char`] when it might not be.
    #[inline]
    pub fn bump(&mut self) {
        debug_assert!(self.peek().is_some_and(|b| b.is_ascii()));
        if self.bytes[self.pos] == b'\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        self.pos += 1;
    }

    /// Advance over one character of any width, returning it.
    pub fn bump_char(&mut self) -> Option<char> {
        let ch = self.src[self.pos..].chars().next()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    /// Consume the current byte if it equals `expected`.
    #[inline]
    pub fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Slice of the source between two byte offsets.
    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.src[start..end]
    }

    /// Distance to the next newline, or to end of input.
    ///
    /// Used to skip line comments in one bounded step.
    pub fn line_remainder_len(&self) -> usize {
        memchr::memchr(b'\n', &self.bytes[self.pos..]).unwrap_or(self.bytes.len() - self.pos)
    }

    /// Skip `n` bytes that are known to contain no newline.
    ///
    /// Column accounting counts characters, so the skipped range is
    /// re-measured as UTF-8.
    pub fn skip_within_line(&mut self, n: usize) {
        let end = self.pos + n;
        let chars = self.src[self.pos..end].chars().count();
        self.col += u32::try_from(chars).unwrap_or(u32::MAX);
        self.pos = end;
    }
}
