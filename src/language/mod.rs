//! Pluggable per-language tag policy.
//!
//! A `LanguagePolicy` tells the scanner how tags are spelled (its
//! `Dialect`), which delimited regions are opaque (`MatchingPair`s such as
//! comments), and which tags never take a closing tag.

mod builder;
mod builtin;
mod dialect;

pub use builder::{CustomLanguage, LanguageBuilder};
pub use builtin::BuiltinLanguage;
pub use dialect::{Dialect, Jsx, Markup};

/// Trait for defining language-specific tag rules.
pub trait LanguagePolicy {
    /// Tag syntax of this language.
    fn dialect(&self) -> &dyn Dialect;

    /// Delimited regions whose contents are never scanned for tags
    /// (ordered by opener length, longest first).
    fn matching_pairs(&self) -> &[MatchingPair];

    /// Is `tag_name` a void/self-closing element in this language?
    fn is_self_closing(&self, tag_name: &str) -> bool;
}

impl<P: LanguagePolicy + ?Sized> LanguagePolicy for &P {
    fn dialect(&self) -> &dyn Dialect {
        (**self).dialect()
    }

    fn matching_pairs(&self) -> &[MatchingPair] {
        (**self).matching_pairs()
    }

    fn is_self_closing(&self, tag_name: &str) -> bool {
        (**self).is_self_closing(tag_name)
    }
}

/// An opening/closing delimiter pair enclosing an opaque region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchingPair {
    /// The opening delimiter (e.g., `"<!--"`).
    pub open: &'static str,
    /// The closing delimiter (e.g., `"-->"`).
    pub close: &'static str,
}

impl MatchingPair {
    /// Create a new delimiter pair.
    pub const fn new(open: &'static str, close: &'static str) -> Self {
        Self { open, close }
    }
}

/// `<!-- ... -->`
pub const COMMENT: MatchingPair = MatchingPair::new("<!--", "-->");
/// `<![CDATA[ ... ]]>`
pub const CDATA: MatchingPair = MatchingPair::new("<![CDATA[", "]]>");
/// `<? ... ?>`
pub const PROCESSING_INSTRUCTION: MatchingPair = MatchingPair::new("<?", "?>");
/// `<% ... %>`
pub const EMBEDDED_CODE: MatchingPair = MatchingPair::new("<%", "%>");
/// `{{ ... }}`
pub const MUSTACHE: MatchingPair = MatchingPair::new("{{", "}}");
/// `{% ... %}`
pub const TEMPLATE_STATEMENT: MatchingPair = MatchingPair::new("{%", "%}");
/// `{# ... #}`
pub const TEMPLATE_COMMENT: MatchingPair = MatchingPair::new("{#", "#}");

/// HTML void elements.
pub const HTML_VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link",
    "menuitem", "meta", "param", "source", "track", "wbr",
];
