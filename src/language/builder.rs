//! Fluent builder for custom language policies.

use alloc::boxed::Box;
use alloc::vec::Vec;

use super::{Dialect, LanguagePolicy, Markup, MatchingPair};

/// Builder for hosts that bring their own tag tables.
///
/// # Example
///
/// ```
/// use tagsync::language::{LanguageBuilder, LanguagePolicy};
///
/// let policy = LanguageBuilder::new()
///     .self_closing_tags(&["br", "hr"])
///     .matching_pair("<!--", "-->")
///     .matching_pair("@{", "}")
///     .build();
///
/// assert!(policy.is_self_closing("br"));
/// assert!(!policy.is_self_closing("div"));
/// assert_eq!(policy.matching_pairs()[0].open, "<!--");
/// ```
pub struct LanguageBuilder {
    dialect: Box<dyn Dialect>,
    matching_pairs: Vec<MatchingPair>,
    self_closing_tags: Vec<&'static str>,
    case_sensitive: bool,
}

impl LanguageBuilder {
    /// Create a builder for plain markup with no pairs and no void tags.
    pub fn new() -> Self {
        Self {
            dialect: Box::new(Markup),
            matching_pairs: Vec::new(),
            self_closing_tags: Vec::new(),
            case_sensitive: false,
        }
    }

    /// Set the tag-syntax dialect.
    pub fn dialect(mut self, dialect: impl Dialect + 'static) -> Self {
        self.dialect = Box::new(dialect);
        self
    }

    /// Add an opaque delimiter pair.
    pub fn matching_pair(mut self, open: &'static str, close: &'static str) -> Self {
        self.matching_pairs.push(MatchingPair::new(open, close));
        self
    }

    /// Add several opaque delimiter pairs.
    pub fn matching_pairs(mut self, pairs: &[MatchingPair]) -> Self {
        self.matching_pairs.extend_from_slice(pairs);
        self
    }

    /// Add void/self-closing tag names.
    pub fn self_closing_tags(mut self, tags: &[&'static str]) -> Self {
        self.self_closing_tags.extend_from_slice(tags);
        self
    }

    /// Add a single void/self-closing tag name.
    pub fn self_closing_tag(mut self, tag: &'static str) -> Self {
        self.self_closing_tags.push(tag);
        self
    }

    /// Compare self-closing tag names case-sensitively (XML style).
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Build the language policy.
    pub fn build(mut self) -> CustomLanguage {
        // An empty delimiter would match everywhere
        self.matching_pairs
            .retain(|pair| !pair.open.is_empty() && !pair.close.is_empty());
        // Longest opener first so a shorter prefix never shadows it
        self.matching_pairs
            .sort_by(|a, b| b.open.len().cmp(&a.open.len()));

        CustomLanguage {
            dialect: self.dialect,
            matching_pairs: self.matching_pairs,
            self_closing_tags: self.self_closing_tags,
            case_sensitive: self.case_sensitive,
        }
    }
}

impl Default for LanguageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A language policy built by `LanguageBuilder`.
pub struct CustomLanguage {
    dialect: Box<dyn Dialect>,
    matching_pairs: Vec<MatchingPair>,
    self_closing_tags: Vec<&'static str>,
    case_sensitive: bool,
}

impl LanguagePolicy for CustomLanguage {
    fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    fn matching_pairs(&self) -> &[MatchingPair] {
        &self.matching_pairs
    }

    fn is_self_closing(&self, tag_name: &str) -> bool {
        self.self_closing_tags.iter().any(|tag| {
            if self.case_sensitive {
                *tag == tag_name
            } else {
                tag.eq_ignore_ascii_case(tag_name)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::{Jsx, COMMENT, PROCESSING_INSTRUCTION};

    #[test]
    fn test_builder_defaults() {
        let lang = LanguageBuilder::new().build();
        assert_eq!(lang.dialect().name(), "markup");
        assert!(lang.matching_pairs().is_empty());
        assert!(!lang.is_self_closing("br"));
    }

    #[test]
    fn test_builder_self_closing() {
        let lang = LanguageBuilder::new()
            .self_closing_tags(&["br", "img"])
            .self_closing_tag("hr")
            .build();

        assert!(lang.is_self_closing("br"));
        assert!(lang.is_self_closing("BR"));
        assert!(lang.is_self_closing("hr"));
        assert!(!lang.is_self_closing("div"));
    }

    #[test]
    fn test_builder_case_sensitive() {
        let lang = LanguageBuilder::new()
            .self_closing_tag("br")
            .case_sensitive(true)
            .build();

        assert!(lang.is_self_closing("br"));
        assert!(!lang.is_self_closing("BR"));
    }

    #[test]
    fn test_builder_pairs_sorted() {
        let lang = LanguageBuilder::new()
            .matching_pairs(&[PROCESSING_INSTRUCTION])
            .matching_pair("{{", "}}")
            .matching_pairs(&[COMMENT])
            .build();

        let pairs = lang.matching_pairs();
        assert_eq!(pairs[0], COMMENT);
        assert_eq!(pairs.len(), 3);
    }

    #[test]
    fn test_builder_drops_empty_pairs() {
        let lang = LanguageBuilder::new()
            .matching_pair("", "}")
            .matching_pair("{", "")
            .matching_pair("[[", "]]")
            .build();
        assert_eq!(lang.matching_pairs(), &[MatchingPair::new("[[", "]]")]);
    }

    #[test]
    fn test_builder_dialect() {
        let lang = LanguageBuilder::new().dialect(Jsx).build();
        assert_eq!(lang.dialect().name(), "jsx");
        assert!(lang.dialect().allows_fragments());
    }
}
