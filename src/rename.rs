//! The rename decision engine.
//!
//! Given a document, the offset of an edited tag and the tag's token before
//! and after the edit, decide whether the partner tag should be renamed too
//! and where. Every uncertain situation (mid-edit markup, stale state,
//! ambiguous nesting) resolves to `None`, meaning "no linked edit".

use alloc::string::String;
use core::fmt;

use crate::error::EditError;
use crate::language::{BuiltinLanguage, LanguagePolicy};
use crate::locator::{next_closing_tag, previous_opening_tag};
use crate::scanner::{Scanner, ScannerState};
use crate::span::Span;
use crate::token::TagKind;

/// The token at the edit site: `<name` or `</name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditToken<'t> {
    /// Which side of the pair was edited.
    pub kind: TagKind,
    /// The tag name, possibly empty while the user is typing.
    pub name: &'t str,
}

impl<'t> EditToken<'t> {
    /// An opening-tag token.
    pub fn opening(name: &'t str) -> Self {
        Self {
            kind: TagKind::Opening,
            name,
        }
    }

    /// A closing-tag token.
    pub fn closing(name: &'t str) -> Self {
        Self {
            kind: TagKind::Closing,
            name,
        }
    }

    /// Parse `"<name"` or `"</name"`.
    ///
    /// ```
    /// use tagsync::{EditToken, TagKind};
    ///
    /// let token = EditToken::parse("</my-list").unwrap();
    /// assert_eq!(token.kind, TagKind::Closing);
    /// assert_eq!(token.name, "my-list");
    ///
    /// assert!(EditToken::parse("div").is_err());
    /// ```
    pub fn parse(token: &'t str) -> Result<Self, EditError> {
        let (kind, name) = if let Some(name) = token.strip_prefix("</") {
            (TagKind::Closing, name)
        } else if let Some(name) = token.strip_prefix('<') {
            (TagKind::Opening, name)
        } else {
            return Err(EditError::missing_angle_bracket(token));
        };

        if let Some(c) = name.chars().find(|&c| !is_token_name_char(c)) {
            return Err(EditError::invalid_tag_name(c, token));
        }
        Ok(Self { kind, name })
    }
}

impl fmt::Display for EditToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TagKind::Opening => write!(f, "<{}", self.name),
            TagKind::Closing => write!(f, "</{}", self.name),
        }
    }
}

/// Characters accepted in a token's name. Looser than any dialect so that a
/// name the scanner cannot read simply never matches.
fn is_token_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | ':' | '.' | '_' | '$')
}

/// The linked edit: replace `start_offset..end_offset` with `tag_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LinkedRename {
    /// Start of the partner tag's name, in bytes.
    pub start_offset: usize,
    /// End of the partner tag's name (exclusive), in bytes.
    pub end_offset: usize,
    /// The replacement name.
    pub tag_name: String,
}

impl LinkedRename {
    /// Create a linked rename of `span` to `tag_name`.
    pub fn new(span: Span, tag_name: impl Into<String>) -> Self {
        Self {
            start_offset: span.start,
            end_offset: span.end,
            tag_name: tag_name.into(),
        }
    }

    /// The range to replace.
    pub fn span(&self) -> Span {
        Span::new(self.start_offset, self.end_offset)
    }

    /// Splice the new name into `text`.
    ///
    /// # Panics
    ///
    /// Panics if the range does not lie on char boundaries of `text`, which
    /// only happens when `text` is not the document the rename was computed
    /// for.
    pub fn apply(&self, text: &str) -> String {
        let mut out = String::from(text);
        out.replace_range(self.start_offset..self.end_offset, &self.tag_name);
        out
    }
}

impl fmt::Display for LinkedRename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.span(), self.tag_name)
    }
}

/// A complete rename query as hosts send it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RenameRequest {
    /// The document after the edit.
    pub text: String,
    /// Byte offset of the edited tag.
    pub offset: usize,
    /// The token at the edit site after the edit.
    pub new_token: String,
    /// The token at the edit site before the edit.
    pub old_token: String,
    /// Editor language id, such as `html` or `typescriptreact`.
    #[cfg_attr(feature = "serde", serde(default = "default_language_id"))]
    pub language_id: String,
}

fn default_language_id() -> String {
    String::from("html")
}

impl RenameRequest {
    /// Create an HTML request.
    pub fn new(
        text: impl Into<String>,
        offset: usize,
        new_token: impl Into<String>,
        old_token: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            offset,
            new_token: new_token.into(),
            old_token: old_token.into(),
            language_id: default_language_id(),
        }
    }

    /// Set the language id.
    pub fn language(mut self, language_id: impl Into<String>) -> Self {
        self.language_id = language_id.into();
        self
    }

    /// Validate the request and run the engine.
    ///
    /// Malformed tokens, mixed opening/closing tokens and offsets past the
    /// end of the text are errors here; the engine's own "no action" is
    /// `Ok(None)`.
    pub fn resolve(&self) -> Result<Option<LinkedRename>, EditError> {
        let new = EditToken::parse(&self.new_token)?;
        let old = EditToken::parse(&self.old_token)?;
        if new.kind != old.kind {
            return Err(EditError::mixed_tag_sides());
        }
        if self.offset > self.text.len() {
            return Err(EditError::offset_out_of_bounds(self.offset, self.text.len()));
        }

        let language = BuiltinLanguage::for_id(&self.language_id);
        Ok(rename_with(&self.text, self.offset, &new, &old, &language))
    }
}

/// Compute the linked rename for an edited tag.
///
/// `new_token` and `old_token` are the token at `offset` after and before the
/// edit (`"<name"` or `"</name"`). Unknown language ids get HTML rules.
///
/// ```
/// use tagsync::do_auto_rename_tag;
///
/// let rename = do_auto_rename_tag("<div></div>", 1, "<span", "<div", "html").unwrap();
/// assert_eq!((rename.start_offset, rename.end_offset), (7, 10));
/// assert_eq!(rename.tag_name, "span");
///
/// assert_eq!(do_auto_rename_tag("<br>", 1, "<img", "<br", "html"), None);
/// ```
pub fn do_auto_rename_tag(
    text: &str,
    offset: usize,
    new_token: &str,
    old_token: &str,
    language_id: &str,
) -> Option<LinkedRename> {
    let (new, old) = match (EditToken::parse(new_token), EditToken::parse(old_token)) {
        (Ok(new), Ok(old)) => (new, old),
        (Err(error), _) | (_, Err(error)) => {
            tracing::trace!(%error, "malformed edit token");
            return None;
        }
    };
    let language = BuiltinLanguage::for_id(language_id);
    rename_with(text, offset, &new, &old, &language)
}

/// Compute the linked rename for an edited tag under any language policy.
pub fn rename_with<P>(
    text: &str,
    offset: usize,
    new: &EditToken<'_>,
    old: &EditToken<'_>,
    policy: &P,
) -> Option<LinkedRename>
where
    P: LanguagePolicy + ?Sized,
{
    if offset > text.len() {
        tracing::trace!(offset, len = text.len(), "offset past the end of the document");
        return None;
    }
    if new.kind != old.kind {
        tracing::trace!(%new, %old, "tokens are on different sides of the pair");
        return None;
    }

    let is_self_closing = |name: &str| policy.is_self_closing(name);
    let mut scanner = Scanner::new(text, 0, ScannerState::WithinContent, policy);

    match new.kind {
        TagKind::Closing => {
            tracing::trace!(offset, %new, %old, "closing tag edited");
            rename_opening_tag(&mut scanner, offset, new.name, old.name, &is_self_closing)
        }
        TagKind::Opening => {
            tracing::trace!(offset, %new, %old, "opening tag edited");
            rename_closing_tag(&mut scanner, offset, new.name, old.name, &is_self_closing)
        }
    }
}

/// A closing tag was edited: rename the opening tag that encloses it.
fn rename_opening_tag<F>(
    scanner: &mut Scanner<'_, '_>,
    offset: usize,
    new_name: &str,
    old_name: &str,
    is_self_closing: &F,
) -> Option<LinkedRename>
where
    F: Fn(&str) -> bool,
{
    let Some(parent) = previous_opening_tag(scanner, offset, is_self_closing) else {
        tracing::trace!("no enclosing opening tag");
        return None;
    };
    if parent.tag_name == new_name {
        tracing::trace!(%parent, "opening tag already has the new name");
        return None;
    }
    if parent.tag_name != old_name {
        tracing::trace!(%parent, old_name, "opening tag does not match the edited closing tag");
        return None;
    }
    if !parent.seen_closing_bracket {
        tracing::trace!(%parent, "opening tag is not terminated");
        return None;
    }
    Some(LinkedRename::new(parent.name_span(), new_name))
}

/// An opening tag was edited: rename the closing tag that ends its element.
fn rename_closing_tag<F>(
    scanner: &mut Scanner<'_, '_>,
    offset: usize,
    new_name: &str,
    old_name: &str,
    is_self_closing: &F,
) -> Option<LinkedRename>
where
    F: Fn(&str) -> bool,
{
    scanner.stream.go_to(offset + 1);
    scanner.state = ScannerState::WithinOpeningTag;
    let found = scanner.advance_until_either_char(&[b'<', b'>'], true);
    if !found || scanner.stream.peek_right(0) == Some(b'<') {
        tracing::trace!("opening tag is not terminated");
        return None;
    }
    if scanner.stream.peek_left(1) == Some(b'/') || is_self_closing(old_name) {
        tracing::trace!(old_name, "self-closing tag has no partner");
        return None;
    }

    // `<a href=/x>`-style trailing names are indistinguishable from `</x>`
    let end_of_start_tag = scanner.stream.position();
    while scanner.stream.peek_left(1).is_some_and(is_name_tail) {
        scanner.stream.go_back(1);
        if scanner.stream.peek_left(1) == Some(b'/') {
            tracing::trace!(end_of_start_tag, "`>` may belong to a closing tag");
            return None;
        }
    }

    let Some(closing) = next_closing_tag(scanner, end_of_start_tag + 1, is_self_closing) else {
        tracing::trace!("element is never closed");
        return None;
    };
    if closing.tag_name == new_name {
        tracing::trace!(%closing, "closing tag already has the new name");
        return None;
    }
    if closing.tag_name != old_name {
        tracing::trace!(%closing, old_name, "closing tag does not match the edited opening tag");
        return None;
    }

    if let Some(previous) = previous_opening_tag(scanner, offset, is_self_closing) {
        if previous.tag_name == old_name && previous.indent == closing.indent {
            tracing::trace!(%previous, %closing, "closing tag may pair with a same-named parent");
            return None;
        }
    }

    Some(LinkedRename::new(closing.name_span(), new_name))
}

fn is_name_tail(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'-' || b == b':'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EditErrorKind;
    use crate::language::LanguageBuilder;

    fn rename(text: &str, offset: usize, new: &str, old: &str) -> Option<LinkedRename> {
        do_auto_rename_tag(text, offset, new, old, "html")
    }

    fn linked(start: usize, end: usize, name: &str) -> Option<LinkedRename> {
        Some(LinkedRename {
            start_offset: start,
            end_offset: end,
            tag_name: name.to_string(),
        })
    }

    #[test]
    fn test_parse_tokens() {
        assert_eq!(EditToken::parse("<div").unwrap(), EditToken::opening("div"));
        assert_eq!(EditToken::parse("</div").unwrap(), EditToken::closing("div"));
        assert_eq!(EditToken::parse("<").unwrap(), EditToken::opening(""));
        assert_eq!(EditToken::parse("</").unwrap(), EditToken::closing(""));
        assert_eq!(EditToken::parse("<svg:rect").unwrap().name, "svg:rect");
    }

    #[test]
    fn test_parse_rejects_malformed_tokens() {
        let err = EditToken::parse("div").unwrap_err();
        assert_eq!(err.kind, EditErrorKind::MissingAngleBracket);
        assert_eq!(err.token.as_deref(), Some("div"));

        let err = EditToken::parse("<di v").unwrap_err();
        assert_eq!(err.kind, EditErrorKind::InvalidTagName(' '));
    }

    #[test]
    fn test_token_display() {
        assert_eq!(EditToken::opening("a").to_string(), "<a");
        assert_eq!(EditToken::closing("a").to_string(), "</a");
    }

    #[test]
    fn test_rename_opening_updates_closing() {
        assert_eq!(rename("<div></div>", 1, "<span", "<div"), linked(7, 10, "span"));
        // Offset on the `<` works the same
        assert_eq!(rename("<div></div>", 0, "<span", "<div"), linked(7, 10, "span"));
    }

    #[test]
    fn test_rename_closing_updates_opening() {
        assert_eq!(rename("<div></div>", 8, "</span", "</div"), linked(1, 4, "span"));
    }

    #[test]
    fn test_void_element_has_no_partner() {
        assert_eq!(rename("<br>", 1, "<img", "<br"), None);
        assert_eq!(rename("<p><br></p>", 4, "<hr", "<br"), None);
    }

    #[test]
    fn test_self_closing_syntax_has_no_partner() {
        assert_eq!(rename("<div><x-icon /></div>", 6, "<y-icon", "<x-icon"), None);
    }

    #[test]
    fn test_outer_pair_skips_nested_same_name() {
        let text = "<div><div></div></div>";
        assert_eq!(rename(text, 1, "<span", "<div"), linked(18, 21, "span"));
    }

    #[test]
    fn test_unterminated_opening_tag() {
        assert_eq!(rename("<div>", 1, "<span", "<div"), None);
        assert_eq!(rename("<div", 1, "<span", "<div"), None);
        assert_eq!(rename("<div\n</div>", 1, "<span", "<div"), None);
    }

    #[test]
    fn test_closing_edit_with_unterminated_opening_tag() {
        assert_eq!(rename("<div\n</div>", 7, "</p", "</div"), None);
    }

    #[test]
    fn test_no_op_and_stale_edits() {
        // Partner already has the new name
        assert_eq!(rename("<div></div>", 1, "<div", "<span"), None);
        assert_eq!(rename("<div></div>", 8, "</div", "</span"), None);
        // Partner does not have the old name
        assert_eq!(rename("<div></span>", 1, "<p", "<div"), None);
        assert_eq!(rename("<span></div>", 9, "</p", "</div"), None);
    }

    #[test]
    fn test_same_named_parent_is_ambiguous() {
        let text = "<div><div></div></div>";
        assert_eq!(rename(text, 6, "<span", "<div"), None);
    }

    #[test]
    fn test_same_named_siblings_differ_by_position() {
        // Only the first child has no crossed pair to tell it from its parent
        let text = "<div>\n  <div></div>\n  <div></div>\n</div>";
        assert_eq!(rename(text, 9, "<p", "<div"), None);
        assert_eq!(rename(text, 23, "<p", "<div"), linked(29, 32, "p"));
    }

    #[test]
    fn test_closing_edit_skips_sibling_pairs() {
        let text = "<ul><li>a</li><li>b</li></ul>";
        let offset = text.rfind("</ul").unwrap() + 2;
        assert_eq!(rename(text, offset, "</ol", "</ul"), linked(1, 3, "ol"));
    }

    #[test]
    fn test_comments_are_opaque() {
        let text = "<div><!-- </div> --></div>";
        let close = text.rfind("</div").unwrap() + 2;
        assert_eq!(rename(text, 1, "<main", "<div"), linked(close, close + 3, "main"));
    }

    #[test]
    fn test_quoted_brackets_in_attributes() {
        let text = r#"<a title="1 > 0">x</a>"#;
        let close = text.rfind("</a").unwrap() + 2;
        assert_eq!(rename(text, 1, "<b", "<a"), linked(close, close + 1, "b"));
    }

    #[test]
    fn test_closing_edit_ignores_tags_in_attribute_values() {
        let text = r#"<span><a title="<span>"></a></span>"#;
        let close = text.rfind("</span").unwrap() + 2;
        assert_eq!(rename(text, close, "</b", "</span"), linked(1, 5, "b"));
        assert_eq!(rename(text, 1, "<b", "<span"), linked(close, close + 4, "b"));
    }

    #[test]
    fn test_unquoted_path_attribute_is_refused() {
        assert_eq!(rename("<a href=/home>x</a>", 1, "<b", "<a"), None);
    }

    #[test]
    fn test_jsx_expression_attribute() {
        let text = "const App = () => <Foo onClick={() => a > b}>x</Foo>;";
        let open = text.find("<Foo").unwrap() + 1;
        let close = text.find("</Foo").unwrap() + 2;
        let result = do_auto_rename_tag(text, open, "<Bar", "<Foo", "typescriptreact");
        assert_eq!(result, linked(close, close + 3, "Bar"));
    }

    #[test]
    fn test_mixed_sides_and_bad_offsets() {
        assert_eq!(rename("<div></div>", 1, "</span", "<div"), None);
        assert_eq!(rename("<div></div>", 99, "<span", "<div"), None);
        assert_eq!(rename("<div></div>", 1, "span", "<div"), None);
    }

    #[test]
    fn test_rename_with_custom_policy() {
        let policy = LanguageBuilder::new()
            .self_closing_tag("slot")
            .matching_pair("@{", "}")
            .build();
        let text = "<p>@{ </p> }<slot></p>";
        let close = text.rfind("</p").unwrap() + 2;
        let new = EditToken::opening("q");
        let old = EditToken::opening("p");
        assert_eq!(rename_with(text, 1, &new, &old, &policy), linked(close, close + 1, "q"));
    }

    #[test]
    fn test_linked_rename_apply() {
        let text = "<div></div>";
        let rename = rename(text, 1, "<span", "<div").unwrap();
        assert_eq!(rename.span(), Span::new(7, 10));
        assert_eq!(rename.apply(text), "<div></span>");
        assert_eq!(rename.to_string(), "7..10 -> span");
    }

    #[test]
    fn test_request_resolve() {
        let request = RenameRequest::new("<div></div>", 8, "</span", "</div");
        assert_eq!(request.resolve().unwrap(), linked(1, 4, "span"));

        let request = RenameRequest::new("<div></div>", 1, "<span", "</div");
        assert_eq!(request.resolve().unwrap_err().kind, EditErrorKind::MixedTagSides);

        let request = RenameRequest::new("<a></a>", 8, "<b", "<a");
        assert_eq!(
            request.resolve().unwrap_err().kind,
            EditErrorKind::OffsetOutOfBounds { offset: 8, len: 7 }
        );

        let request = RenameRequest::new("<a></a>", 1, "<b", "a");
        assert_eq!(request.resolve().unwrap_err().kind, EditErrorKind::MissingAngleBracket);
    }

    #[test]
    fn test_request_language() {
        let request = RenameRequest::new("<br></br>", 1, "<hr", "<br").language("xml");
        assert_eq!(request.resolve().unwrap(), linked(6, 8, "hr"));
        let request = RenameRequest::new("<br></br>", 1, "<hr", "<br");
        assert_eq!(request.resolve().unwrap(), None);
    }
}
