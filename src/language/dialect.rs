//! Tag-syntax dialects.
//!
//! A dialect decides which bytes can start and continue a tag name and
//! whether brace-delimited expressions hide `<`/`>` from the scanner. The
//! locators only ever ask these questions through the trait.

/// Lexical rules for tags in one family of markup syntax.
pub trait Dialect {
    /// Short name of the dialect, used in diagnostics.
    fn name(&self) -> &'static str;

    /// Delimiters of embedded expressions whose contents are never tag
    /// delimiters (`{`/`}` in JSX).
    fn expression_delimiters(&self) -> Option<(u8, u8)> {
        None
    }

    /// Can `b` be the first byte of a tag name?
    fn is_tag_name_start(&self, b: u8) -> bool;

    /// Can `b` appear after the first byte of a tag name?
    fn is_tag_name_char(&self, b: u8) -> bool;

    /// Are nameless fragment tags (`<>` / `</>`) allowed?
    fn allows_fragments(&self) -> bool {
        false
    }
}

/// HTML and XML tag syntax.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Markup;

impl Dialect for Markup {
    fn name(&self) -> &'static str {
        "markup"
    }

    fn is_tag_name_start(&self, b: u8) -> bool {
        b.is_ascii_alphabetic()
    }

    fn is_tag_name_char(&self, b: u8) -> bool {
        b.is_ascii_alphanumeric() || matches!(b, b'-' | b':' | b'.' | b'_')
    }
}

/// JSX/TSX component syntax: brace expressions, fragments and
/// member-expression component names such as `<Foo.Bar>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Jsx;

impl Dialect for Jsx {
    fn name(&self) -> &'static str {
        "jsx"
    }

    fn expression_delimiters(&self) -> Option<(u8, u8)> {
        Some((b'{', b'}'))
    }

    fn is_tag_name_start(&self, b: u8) -> bool {
        b.is_ascii_alphabetic() || matches!(b, b'_' | b'$')
    }

    fn is_tag_name_char(&self, b: u8) -> bool {
        b.is_ascii_alphanumeric() || matches!(b, b'-' | b':' | b'.' | b'_' | b'$')
    }

    fn allows_fragments(&self) -> bool {
        true
    }
}
