//! Directional tag searches.
//!
//! Both searches reconstruct just enough nesting to find one tag: a
//! per-name counter of tags seen on the "wrong" side of the search stands
//! in for a parse-tree stack. A `<div>` inside a `<span>` never touches the
//! `span` counters.
//!
//! # Algorithm
//!
//! Walking left from a position, every closing tag `</name>` leaves a
//! pending close for `name`. An opening tag `<name>` either consumes one of
//! those (the pair lies entirely behind the position) or, if none is
//! pending, is the enclosing tag. Walking right from the end of an opening
//! tag mirrors this: opening tags leave pending opens, and the first closing
//! tag with nothing pending is the match.
//!
//! Self-closing tags (`<br/>`, or void elements per the language policy)
//! open nothing and are skipped in both directions.

use alloc::collections::BTreeMap;

use crate::scanner::{Scanner, ScannerState};
use crate::token::{TagKind, TagOccurrence};

/// Per-name bookkeeping for one search.
#[derive(Debug, Default)]
struct NestingCounters<'a> {
    /// Tags seen on the wrong side of the search that still need a partner.
    pending: BTreeMap<&'a str, usize>,
    /// Complete same-named pairs crossed so far.
    crossed: BTreeMap<&'a str, usize>,
}

impl<'a> NestingCounters<'a> {
    fn push(&mut self, name: &'a str) {
        *self.pending.entry(name).or_default() += 1;
    }

    /// Match `name` against a pending tag, recording the crossed pair.
    fn try_pop(&mut self, name: &'a str) -> bool {
        match self.pending.get_mut(name) {
            Some(count) if *count > 0 => {
                *count -= 1;
                *self.crossed.entry(name).or_default() += 1;
                true
            }
            _ => false,
        }
    }

    fn indent(&self, name: &str) -> usize {
        self.crossed.get(name).copied().unwrap_or(0)
    }
}

/// Find the nearest opening tag that encloses `position`.
///
/// If `position` lies inside a tag (between its `<` and `>`), that tag is
/// the edit site and is not a candidate. The returned occurrence records
/// whether the opening tag's `>` was seen between the tag and `position`;
/// an opening tag still being typed has none.
///
/// Returns `None` at the document root.
#[tracing::instrument(level = "trace", skip(scanner, is_self_closing), ret)]
pub fn previous_opening_tag<'a, F>(
    scanner: &mut Scanner<'a, '_>,
    position: usize,
    is_self_closing: F,
) -> Option<TagOccurrence<'a>>
where
    F: Fn(&str) -> bool,
{
    scanner.stream.go_to(position);
    scanner.state = ScannerState::WithinContent;

    let mut counters = NestingCounters::default();
    let mut at_origin = true;

    while let Some(boundary) = scanner.previous_tag_boundary() {
        if boundary == b'>' {
            at_origin = false;
            continue;
        }
        let start = scanner.stream.position();
        let Some(head) = scanner.tag_head_at(start) else {
            continue;
        };

        // The tag's own extent decides whether it is closed and self-closing
        let tag = scanner.read_tag(head);
        let closed = tag.terminated && scanner.stream.position() <= position;
        scanner.stream.go_to(start);
        scanner.state = ScannerState::WithinContent;

        if core::mem::take(&mut at_origin) && !closed {
            tracing::trace!(name = tag.name, "skipping tag at the search origin");
            continue;
        }

        match tag.kind {
            TagKind::Closing => counters.push(tag.name),
            TagKind::Opening => {
                if tag.self_closing || is_self_closing(tag.name) {
                    continue;
                }
                if counters.try_pop(tag.name) {
                    continue;
                }
                return Some(TagOccurrence {
                    tag_name: tag.name,
                    offset: tag.name_offset,
                    indent: counters.indent(tag.name),
                    seen_closing_bracket: closed,
                });
            }
        }
    }
    None
}

/// Find the closing tag that ends the element whose content starts at
/// `position`.
///
/// `position` is normally just past the enclosing opening tag's `>`.
/// Returns `None` when the document ends first, which is the usual state
/// while a new element is being typed.
#[tracing::instrument(level = "trace", skip(scanner, is_self_closing), ret)]
pub fn next_closing_tag<'a, F>(
    scanner: &mut Scanner<'a, '_>,
    position: usize,
    is_self_closing: F,
) -> Option<TagOccurrence<'a>>
where
    F: Fn(&str) -> bool,
{
    scanner.stream.go_to(position);
    scanner.state = ScannerState::WithinContent;

    let mut counters = NestingCounters::default();

    while let Some(tag) = scanner.next_tag() {
        match tag.kind {
            TagKind::Opening => {
                if tag.self_closing || is_self_closing(tag.name) {
                    continue;
                }
                counters.push(tag.name);
            }
            TagKind::Closing => {
                if counters.try_pop(tag.name) {
                    continue;
                }
                return Some(TagOccurrence {
                    tag_name: tag.name,
                    offset: tag.name_offset,
                    indent: counters.indent(tag.name),
                    seen_closing_bracket: tag.terminated,
                });
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::{BuiltinLanguage, LanguagePolicy};

    fn previous(
        text: &str,
        position: usize,
        language: BuiltinLanguage,
    ) -> Option<TagOccurrence<'_>> {
        let mut scanner = Scanner::new(text, 0, ScannerState::WithinContent, &language);
        previous_opening_tag(&mut scanner, position, |name| language.is_self_closing(name))
    }

    fn next(text: &str, position: usize, language: BuiltinLanguage) -> Option<TagOccurrence<'_>> {
        let mut scanner = Scanner::new(text, 0, ScannerState::WithinContent, &language);
        next_closing_tag(&mut scanner, position, |name| language.is_self_closing(name))
    }

    #[test]
    fn test_previous_from_content() {
        let text = "<div>text";
        let found = previous(text, text.len(), BuiltinLanguage::Html).unwrap();
        assert_eq!(found.tag_name, "div");
        assert_eq!(found.offset, 1);
        assert_eq!(found.indent, 0);
        assert!(found.seen_closing_bracket);
    }

    #[test]
    fn test_previous_skips_origin_tag() {
        // Position inside the closing tag's name
        let found = previous("<div></div>", 8, BuiltinLanguage::Html).unwrap();
        assert_eq!(found.offset, 1);

        // Position inside the opening tag's name: nothing encloses it
        assert_eq!(previous("<div></div>", 1, BuiltinLanguage::Html), None);
    }

    #[test]
    fn test_previous_skips_closed_siblings() {
        let text = "<ul><li>a</li><li>b</li>|";
        let position = text.len() - 1;
        let found = previous(text, position, BuiltinLanguage::Html).unwrap();
        assert_eq!(found.tag_name, "ul");
    }

    #[test]
    fn test_previous_counts_same_named_pairs() {
        let text = "<div><div></div><div></div>|";
        let found = previous(text, text.len() - 1, BuiltinLanguage::Html).unwrap();
        assert_eq!(found.offset, 1);
        assert_eq!(found.indent, 2);
    }

    #[test]
    fn test_previous_other_names_do_not_count() {
        let text = "<div><span></span>|";
        let found = previous(text, text.len() - 1, BuiltinLanguage::Html).unwrap();
        assert_eq!(found.tag_name, "div");
        assert_eq!(found.indent, 0);
    }

    #[test]
    fn test_previous_skips_void_and_self_closing() {
        let text = "<p><br><img/><input />|";
        let found = previous(text, text.len() - 1, BuiltinLanguage::Html).unwrap();
        assert_eq!(found.tag_name, "p");

        // In JSX `br` is only self-closing when written that way
        let text = "<p><br>|";
        let found = previous(text, text.len() - 1, BuiltinLanguage::Jsx).unwrap();
        assert_eq!(found.tag_name, "br");
    }

    #[test]
    fn test_previous_unclosed_opening_tag() {
        let text = "<div\n</div>";
        let found = previous(text, 8, BuiltinLanguage::Html).unwrap();
        assert_eq!(found.tag_name, "div");
        assert!(!found.seen_closing_bracket);
    }

    #[test]
    fn test_previous_ignores_comments() {
        let text = "<a><!-- <b> -->|";
        let found = previous(text, text.len() - 1, BuiltinLanguage::Html).unwrap();
        assert_eq!(found.tag_name, "a");
    }

    #[test]
    fn test_previous_ignores_tags_in_attribute_values() {
        let text = r#"<span><a title="<span>"></a></span>"#;
        let position = text.rfind("</span").unwrap() + 2;
        let found = previous(text, position, BuiltinLanguage::Html).unwrap();
        assert_eq!(found.tag_name, "span");
        assert_eq!(found.offset, 1);
        assert_eq!(found.indent, 0);
    }

    #[test]
    fn test_previous_self_closing_with_quoted_bracket() {
        let text = r#"<div><Icon label="a>b" /></div>"#;
        let position = text.rfind("</div").unwrap() + 2;
        let found = previous(text, position, BuiltinLanguage::Jsx).unwrap();
        assert_eq!(found.tag_name, "div");
        assert_eq!(found.offset, 1);
        assert!(found.seen_closing_bracket);
    }

    #[test]
    fn test_previous_at_root() {
        assert_eq!(previous("text", 2, BuiltinLanguage::Html), None);
        assert_eq!(previous("<a></a>|", 7, BuiltinLanguage::Html), None);
        assert_eq!(previous("", 0, BuiltinLanguage::Html), None);
    }

    #[test]
    fn test_next_simple() {
        let found = next("<div></div>", 5, BuiltinLanguage::Html).unwrap();
        assert_eq!(found.tag_name, "div");
        assert_eq!(found.offset, 7);
        assert_eq!(found.indent, 0);
        assert!(found.seen_closing_bracket);
    }

    #[test]
    fn test_next_skips_nested_same_name() {
        let text = "<div><div></div></div>";
        let found = next(text, 5, BuiltinLanguage::Html).unwrap();
        assert_eq!(found.offset, 18);
        assert_eq!(found.indent, 1);
    }

    #[test]
    fn test_next_unclosed_children() {
        // `<p>` never closes; the `</div>` still ends the outer element
        let text = "<div><p>one</div>";
        let found = next(text, 5, BuiltinLanguage::Html).unwrap();
        assert_eq!(found.tag_name, "div");
        assert_eq!(found.offset, 13);
    }

    #[test]
    fn test_next_skips_void_elements() {
        let text = "<p><br><hr/>x</p>";
        let found = next(text, 3, BuiltinLanguage::Html).unwrap();
        assert_eq!(found.tag_name, "p");
    }

    #[test]
    fn test_next_runs_off_the_end() {
        assert_eq!(next("<div><div></div>", 5, BuiltinLanguage::Html), None);
        assert_eq!(next("<div>", 5, BuiltinLanguage::Html), None);
    }

    #[test]
    fn test_next_unterminated_closing_tag() {
        let found = next("<a>x</a", 3, BuiltinLanguage::Html).unwrap();
        assert_eq!(found.tag_name, "a");
        assert!(!found.seen_closing_bracket);
    }

    #[test]
    fn test_next_jsx_expression_children() {
        let text = "<ul>{items.map(i => <li key={i}>{i}</li>)}</ul>";
        let found = next(text, 4, BuiltinLanguage::Jsx).unwrap();
        assert_eq!(found.tag_name, "ul");
    }
}
