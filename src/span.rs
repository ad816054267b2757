//! Byte ranges and human-readable positions.
//!
//! Offsets handed to and returned from the engine are byte offsets into the
//! document snapshot. `Location` turns one into a line/column pair for
//! display.

use core::fmt;

/// A location in a document (line and column, 1-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed, counted in Unicode code points).
    pub column: u32,
}

impl Location {
    /// Create a new location at line 1, column 1.
    pub fn new() -> Self {
        Self { line: 1, column: 1 }
    }

    /// Create a location at the specified line and column.
    pub fn at(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Compute the location of a byte offset in `text`.
    ///
    /// Offsets past the end resolve to the location just after the last
    /// character; offsets inside a multi-byte character resolve to that
    /// character.
    pub fn of_offset(text: &str, offset: usize) -> Self {
        let mut loc = Self::new();
        for (index, c) in text.char_indices() {
            if index + c.len_utf8() > offset {
                break;
            }
            loc.advance(c);
        }
        loc
    }

    /// Advance the location by one character.
    pub fn advance(&mut self, c: char) {
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open byte range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Span {
    /// Byte offset from start of document (inclusive).
    pub start: usize,
    /// Byte offset from start of document (exclusive).
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {} after end {}", start, end);
        Self { start, end }
    }

    /// Create a span of `len` bytes starting at `start`.
    pub fn with_len(start: usize, len: usize) -> Self {
        Self::new(start, start + len)
    }

    /// Get the length in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check whether `offset` falls inside the span.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Get the text covered by this span, if it is a valid range of `text`.
    pub fn text<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start..self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
