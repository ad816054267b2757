//! Errors for malformed rename requests.
//!
//! The engine itself never fails: every uncertain situation is "no linked
//! rename". These errors only describe requests a host should not have sent
//! in the first place, such as a token without a `<`.

use alloc::string::String;
use core::fmt;

/// A malformed rename request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditError {
    /// The kind of error.
    pub kind: EditErrorKind,
    /// The offending token text, when the error is about a token.
    pub token: Option<String>,
}

impl EditError {
    /// Create a new error.
    pub fn new(kind: EditErrorKind) -> Self {
        Self { kind, token: None }
    }

    /// Attach the offending token text.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Create a missing `<` error.
    pub fn missing_angle_bracket(token: &str) -> Self {
        Self::new(EditErrorKind::MissingAngleBracket).with_token(token)
    }

    /// Create an invalid tag name character error.
    pub fn invalid_tag_name(c: char, token: &str) -> Self {
        Self::new(EditErrorKind::InvalidTagName(c)).with_token(token)
    }

    /// Create a mixed opening/closing token error.
    pub fn mixed_tag_sides() -> Self {
        Self::new(EditErrorKind::MixedTagSides)
    }

    /// Create an offset out of bounds error.
    pub fn offset_out_of_bounds(offset: usize, len: usize) -> Self {
        Self::new(EditErrorKind::OffsetOutOfBounds { offset, len })
    }
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.token {
            Some(token) => write!(f, "{} in token {:?}", self.kind, token),
            None => write!(f, "{}", self.kind),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EditError {}

/// The kind of request error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditErrorKind {
    /// The token does not start with `<` or `</`.
    MissingAngleBracket,
    /// The tag name contains a character no dialect allows.
    InvalidTagName(char),
    /// One token is an opening tag and the other a closing tag.
    MixedTagSides,
    /// The edit offset lies past the end of the document.
    OffsetOutOfBounds {
        /// The requested offset.
        offset: usize,
        /// Length of the document in bytes.
        len: usize,
    },
}

impl fmt::Display for EditErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditErrorKind::MissingAngleBracket => write!(f, "expected a token starting with '<'"),
            EditErrorKind::InvalidTagName(c) => {
                if c.is_ascii_graphic() {
                    write!(f, "invalid tag name character '{}'", c)
                } else {
                    write!(f, "invalid tag name character U+{:04X}", *c as u32)
                }
            }
            EditErrorKind::MixedTagSides => {
                write!(f, "old and new tokens must both be opening or both be closing tags")
            }
            EditErrorKind::OffsetOutOfBounds { offset, len } => {
                write!(f, "offset {} is past the end of a {}-byte document", offset, len)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = EditError::missing_angle_bracket("div");
        let msg = format!("{}", error);
        assert!(msg.contains("expected a token starting with '<'"));
        assert!(msg.contains("\"div\""));
    }

    #[test]
    fn test_error_kind_display() {
        assert_eq!(
            format!("{}", EditErrorKind::InvalidTagName('>')),
            "invalid tag name character '>'"
        );
        assert_eq!(
            format!("{}", EditErrorKind::OffsetOutOfBounds { offset: 12, len: 4 }),
            "offset 12 is past the end of a 4-byte document"
        );
    }

    #[test]
    fn test_unprintable_char_display() {
        let kind = EditErrorKind::InvalidTagName('\n');
        assert!(format!("{}", kind).contains("U+000A"));
    }

    #[test]
    fn test_error_without_token() {
        assert_eq!(EditError::mixed_tag_sides().token, None);
    }
}
