//! Tag tokens produced by the scanner and tag occurrences reported by the
//! locators.

use core::fmt;

use crate::span::Span;

/// Which side of a tag pair a tag is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// `<name ...>`
    Opening,
    /// `</name>`
    Closing,
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagKind::Opening => write!(f, "opening tag"),
            TagKind::Closing => write!(f, "closing tag"),
        }
    }
}

/// A tag recognized by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagToken<'a> {
    /// Opening or closing.
    pub kind: TagKind,
    /// The tag name (empty for JSX fragments).
    pub name: &'a str,
    /// Byte offset of the first character of the name.
    pub name_offset: usize,
    /// The tag ends in `/>`.
    pub self_closing: bool,
    /// The tag's terminating `>` was found.
    pub terminated: bool,
}

impl<'a> TagToken<'a> {
    /// Span of the tag name.
    pub fn name_span(&self) -> Span {
        Span::with_len(self.name_offset, self.name.len())
    }
}

/// A tag located by one of the directional searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagOccurrence<'a> {
    /// The tag name as it appears in the document.
    pub tag_name: &'a str,
    /// Byte offset of the first character of the name.
    pub offset: usize,
    /// Same-named tag pairs crossed by the search before reaching this tag.
    pub indent: usize,
    /// The tag's terminating `>` lies between the tag and the search origin.
    pub seen_closing_bracket: bool,
}

impl<'a> TagOccurrence<'a> {
    /// Span of the tag name, which is exactly what a linked rename replaces.
    pub fn name_span(&self) -> Span {
        Span::with_len(self.offset, self.tag_name.len())
    }
}

impl fmt::Display for TagOccurrence<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` at {}", self.tag_name, self.name_span())
    }
}
