//! Character-addressable cursor over a document snapshot.
//!
//! The cursor works on bytes: every delimiter the scanner cares about is
//! ASCII, and ASCII bytes never occur inside a multi-byte UTF-8 sequence,
//! so byte-level scanning can't split a character at a tag boundary.
//!
//! Running off either end is never an error. Peeks past the edges return
//! `None` and the searching methods report `false`.

use crate::language::Dialect;

/// A cursor over document text with an explicit byte position.
#[derive(Debug, Clone)]
pub struct Source<'a> {
    /// Original document text (UTF-8).
    text: &'a str,
    /// Current byte position, always within `0..=text.len()`.
    pos: usize,
}

impl<'a> Source<'a> {
    /// Create a new cursor positioned at the start of `text`.
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Get the original document text.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Get the current byte position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Length of the document in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Check if at end of input.
    pub fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Move to an absolute position, clamped to the document.
    pub fn go_to(&mut self, pos: usize) {
        self.pos = pos.min(self.text.len());
    }

    /// Move `n` bytes forward, stopping at the end.
    pub fn advance(&mut self, n: usize) {
        self.go_to(self.pos.saturating_add(n));
    }

    /// Move `n` bytes backward, stopping at the start.
    pub fn go_back(&mut self, n: usize) {
        self.pos = self.pos.saturating_sub(n);
    }

    /// Peek at the byte `k` positions ahead (0 = current).
    pub fn peek_right(&self, k: usize) -> Option<u8> {
        self.byte_at(self.pos.checked_add(k)?)
    }

    /// Peek at the byte `k` positions behind (1 = just before the cursor).
    pub fn peek_left(&self, k: usize) -> Option<u8> {
        self.byte_at(self.pos.checked_sub(k)?)
    }

    /// Get the byte at an absolute offset.
    pub fn byte_at(&self, offset: usize) -> Option<u8> {
        self.text.as_bytes().get(offset).copied()
    }

    /// Check if the text at the cursor starts with `s`.
    pub fn starts_with(&self, s: &str) -> bool {
        self.text.as_bytes()[self.pos..].starts_with(s.as_bytes())
    }

    /// Check if the text up to and including the cursor byte ends with `s`.
    pub fn ends_with_inclusive(&self, s: &str) -> bool {
        let end = (self.pos + 1).min(self.text.len());
        self.text.as_bytes()[..end].ends_with(s.as_bytes())
    }

    /// Find the next occurrence of `needle` at or after `from`.
    pub fn find_from(&self, from: usize, needle: &str) -> Option<usize> {
        let haystack = self.text.as_bytes().get(from..)?;
        let needle = needle.as_bytes();
        if needle.is_empty() {
            return Some(from);
        }
        haystack
            .windows(needle.len())
            .position(|window| window == needle)
            .map(|index| from + index)
    }

    /// Find the last occurrence of `needle` that ends at or before `until`.
    pub fn rfind_until(&self, until: usize, needle: &str) -> Option<usize> {
        let haystack = self.text.as_bytes().get(..until.min(self.text.len()))?;
        let needle = needle.as_bytes();
        if needle.is_empty() {
            return Some(until);
        }
        haystack
            .windows(needle.len())
            .rposition(|window| window == needle)
    }

    /// Get a slice of the document, or `""` when the range is not valid.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        self.text.get(start..end).unwrap_or("")
    }

    /// Advance until the byte at the cursor is one of `chars`.
    ///
    /// When the dialect has expression delimiters, bytes inside an
    /// expression (`{ a > b }`) are never matched. With `inclusive` the
    /// cursor lands on the match, otherwise just past it. Returns `false`
    /// and leaves the cursor at the end when nothing matched.
    pub fn advance_until_either_char(
        &mut self,
        chars: &[u8],
        inclusive: bool,
        dialect: &dyn Dialect,
    ) -> bool {
        let bytes = self.text.as_bytes();
        let expression = dialect.expression_delimiters();
        let mut depth = 0usize;

        while self.pos < bytes.len() {
            let b = bytes[self.pos];
            if depth == 0 && chars.contains(&b) {
                if !inclusive {
                    self.pos += 1;
                }
                return true;
            }
            if let Some((open, close)) = expression {
                if b == open {
                    depth += 1;
                } else if b == close {
                    depth = depth.saturating_sub(1);
                }
            }
            self.pos += 1;
        }
        false
    }

    /// Move backward until the byte at the cursor is one of `chars`.
    ///
    /// The search starts just before the cursor, so repeated calls make
    /// progress. Expression delimiters are honored in reverse. Returns
    /// `false` and leaves the cursor at the start when nothing matched.
    pub fn go_back_until_either_char(&mut self, chars: &[u8], dialect: &dyn Dialect) -> bool {
        let bytes = self.text.as_bytes();
        let expression = dialect.expression_delimiters();
        let mut depth = 0usize;

        while self.pos > 0 {
            self.pos -= 1;
            let b = bytes[self.pos];
            if depth == 0 && chars.contains(&b) {
                return true;
            }
            if let Some((open, close)) = expression {
                if b == close {
                    depth += 1;
                } else if b == open {
                    depth = depth.saturating_sub(1);
                }
            }
        }
        false
    }
}
