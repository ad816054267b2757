//! Tag-aware scanning over a `Source`.
//!
//! The scanner adds a small lexical state machine on top of the cursor so
//! that quoted attribute values, comments and other opaque regions never
//! contribute `<` or `>` delimiters. It recognizes tags one at a time and
//! builds no tree.

use alloc::vec::Vec;

use crate::language::{Dialect, LanguagePolicy, MatchingPair};
use crate::source::Source;
use crate::token::{TagKind, TagToken};

/// Lexical mode of the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScannerState {
    /// Between tags.
    #[default]
    WithinContent,
    /// After `<name`, before the terminating `>`.
    WithinOpeningTag,
    /// After `</name`, before the terminating `>`.
    WithinClosingTag,
    /// Inside an opaque region that runs to the end of the document.
    WithinComment,
}

/// The head of a tag: everything up to and including its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagHead<'a> {
    /// Opening or closing.
    pub kind: TagKind,
    /// The tag name (empty for fragments).
    pub name: &'a str,
    /// Byte offset of the first character of the name.
    pub name_offset: usize,
}

/// A cursor plus the lexical state needed to find tag boundaries.
pub struct Scanner<'a, 'p> {
    /// The underlying cursor.
    pub stream: Source<'a>,
    /// Current lexical mode.
    pub state: ScannerState,
    dialect: &'p dyn Dialect,
    matching_pairs: &'p [MatchingPair],
    /// First byte of every pair opener.
    pair_starts: Vec<u8>,
    /// Last byte of every pair closer.
    pair_ends: Vec<u8>,
}

impl<'a, 'p> Scanner<'a, 'p> {
    /// Create a scanner over `input` using the rules of `policy`.
    pub fn new<P>(
        input: &'a str,
        initial_offset: usize,
        initial_state: ScannerState,
        policy: &'p P,
    ) -> Self
    where
        P: LanguagePolicy + ?Sized,
    {
        let matching_pairs = policy.matching_pairs();
        let mut pair_starts = Vec::new();
        let mut pair_ends = Vec::new();
        for pair in matching_pairs {
            if let Some(&first) = pair.open.as_bytes().first() {
                if !pair_starts.contains(&first) {
                    pair_starts.push(first);
                }
            }
            if let Some(&last) = pair.close.as_bytes().last() {
                if !pair_ends.contains(&last) {
                    pair_ends.push(last);
                }
            }
        }

        let mut stream = Source::new(input);
        stream.go_to(initial_offset);

        Self {
            stream,
            state: initial_state,
            dialect: policy.dialect(),
            matching_pairs,
            pair_starts,
            pair_ends,
        }
    }

    /// Get the tag-syntax dialect.
    pub fn dialect(&self) -> &'p dyn Dialect {
        self.dialect
    }

    /// Get the opaque delimiter pairs.
    pub fn matching_pairs(&self) -> &'p [MatchingPair] {
        self.matching_pairs
    }

    /// Advance until the cursor is on one of `chars`, treating regions that
    /// are opaque in the current state as invisible.
    ///
    /// Inside a tag, quoted attribute values are skipped. In content,
    /// matching pairs (comments, template delimiters) are skipped. The
    /// dialect's expression delimiters are honored in both.
    pub fn advance_until_either_char(&mut self, chars: &[u8], inclusive: bool) -> bool {
        let found = match self.state {
            ScannerState::WithinOpeningTag | ScannerState::WithinClosingTag => {
                self.advance_within_tag(chars)
            }
            ScannerState::WithinContent | ScannerState::WithinComment => {
                self.advance_within_content(chars)
            }
        };
        if found && !inclusive {
            self.stream.advance(1);
        }
        found
    }

    fn advance_within_tag(&mut self, chars: &[u8]) -> bool {
        let mut stops = chars.to_vec();
        for quote in [b'"', b'\''] {
            if !stops.contains(&quote) {
                stops.push(quote);
            }
        }

        loop {
            if !self.stream.advance_until_either_char(&stops, true, self.dialect) {
                return false;
            }
            let Some(b) = self.stream.peek_right(0) else {
                return false;
            };
            if chars.contains(&b) {
                return true;
            }
            let quote = if b == b'"' { "\"" } else { "'" };
            match self.stream.find_from(self.stream.position() + 1, quote) {
                Some(end) => self.stream.go_to(end + 1),
                None => {
                    self.stream.go_to(self.stream.len());
                    return false;
                }
            }
        }
    }

    fn advance_within_content(&mut self, chars: &[u8]) -> bool {
        let mut stops = chars.to_vec();
        for &start in &self.pair_starts {
            if !stops.contains(&start) {
                stops.push(start);
            }
        }

        loop {
            if !self.stream.advance_until_either_char(&stops, true, self.dialect) {
                return false;
            }
            if self.skip_opaque_region_forward() {
                continue;
            }
            match self.stream.peek_right(0) {
                Some(b) if chars.contains(&b) => return true,
                Some(_) => self.stream.advance(1),
                None => return false,
            }
        }
    }

    /// If a matching pair opens at the cursor, move past its closer.
    ///
    /// An unterminated region swallows the rest of the document and leaves
    /// the scanner in `WithinComment`.
    pub fn skip_opaque_region_forward(&mut self) -> bool {
        let pairs = self.matching_pairs;
        let Some(pair) = pairs
            .iter()
            .find(|pair| self.stream.starts_with(pair.open))
        else {
            return false;
        };

        let body = self.stream.position() + pair.open.len();
        match self.stream.find_from(body, pair.close) {
            Some(end) => {
                self.stream.go_to(end + pair.close.len());
                self.state = ScannerState::WithinContent;
            }
            None => {
                self.stream.go_to(self.stream.len());
                self.state = ScannerState::WithinComment;
            }
        }
        true
    }

    /// If a matching pair closes at the cursor byte, move back onto the
    /// first byte of its opener.
    pub fn skip_opaque_region_backward(&mut self) -> bool {
        let pairs = self.matching_pairs;
        let Some(pair) = pairs
            .iter()
            .find(|pair| self.stream.ends_with_inclusive(pair.close))
        else {
            return false;
        };

        let end = (self.stream.position() + 1).min(self.stream.len());
        let close_start = end - pair.close.len();
        match self.stream.rfind_until(close_start, pair.open) {
            Some(open_start) => {
                self.stream.go_to(open_start);
                true
            }
            // A stray closer is ordinary text
            None => false,
        }
    }

    /// If the cursor is on a quote, move onto the previous matching quote.
    ///
    /// A quote with no partner to its left is ordinary text.
    pub fn skip_quoted_backward(&mut self) -> bool {
        let quote = match self.stream.peek_right(0) {
            Some(b'"') => "\"",
            Some(b'\'') => "'",
            _ => return false,
        };
        match self.stream.rfind_until(self.stream.position(), quote) {
            Some(open) => {
                self.stream.go_to(open);
                true
            }
            None => false,
        }
    }

    /// Move back to the previous `<` or `>` outside any opaque region and
    /// return it.
    ///
    /// Crossing a `>` enters a tag, where quoted attribute values are
    /// opaque. Crossing a `<` returns to content, where matching pairs are.
    pub fn previous_tag_boundary(&mut self) -> Option<u8> {
        loop {
            let within_tag = matches!(
                self.state,
                ScannerState::WithinOpeningTag | ScannerState::WithinClosingTag
            );
            let mut stops = Vec::from([b'<', b'>']);
            let opaque_ends: &[u8] = if within_tag {
                &[b'"', b'\'']
            } else {
                self.pair_ends.as_slice()
            };
            for &end in opaque_ends {
                if !stops.contains(&end) {
                    stops.push(end);
                }
            }

            if !self.stream.go_back_until_either_char(&stops, self.dialect) {
                return None;
            }
            if within_tag {
                if self.skip_quoted_backward() {
                    continue;
                }
            } else if self.skip_opaque_region_backward() {
                continue;
            }
            match self.stream.peek_right(0) {
                Some(b'>') => {
                    self.state = ScannerState::WithinOpeningTag;
                    return Some(b'>');
                }
                Some(b'<') => {
                    self.state = ScannerState::WithinContent;
                    return Some(b'<');
                }
                _ => {}
            }
        }
    }

    /// Read the tag name starting at `offset`, or `""` if none starts there.
    pub fn tag_name_at(&self, offset: usize) -> &'a str {
        let bytes = self.stream.text().as_bytes();
        match bytes.get(offset) {
            Some(&b) if self.dialect.is_tag_name_start(b) => {}
            _ => return "",
        }
        let end = bytes[offset + 1..]
            .iter()
            .position(|&b| !self.dialect.is_tag_name_char(b))
            .map_or(bytes.len(), |index| offset + 1 + index);
        self.stream.slice(offset, end)
    }

    /// Read the name at the cursor and move past it.
    pub fn scan_tag_name(&mut self) -> &'a str {
        let name = self.tag_name_at(self.stream.position());
        self.stream.advance(name.len());
        name
    }

    /// Recognize the tag whose `<` is at `offset`, without moving.
    ///
    /// Returns `None` when the `<` does not start a tag (`a < b`,
    /// `<!DOCTYPE`, a half-typed `</`).
    pub fn tag_head_at(&self, offset: usize) -> Option<TagHead<'a>> {
        if self.stream.byte_at(offset) != Some(b'<') {
            return None;
        }
        let (kind, name_offset) = match self.stream.byte_at(offset + 1) {
            Some(b'/') => (TagKind::Closing, offset + 2),
            _ => (TagKind::Opening, offset + 1),
        };
        let name = self.tag_name_at(name_offset);
        if name.is_empty() {
            let fragment = self.dialect.allows_fragments()
                && self.stream.byte_at(name_offset) == Some(b'>');
            if !fragment {
                return None;
            }
        }
        Some(TagHead {
            kind,
            name,
            name_offset,
        })
    }

    /// Scan forward to the next tag and consume it through its `>`.
    ///
    /// A tag that reaches another `<` or the end of the document before its
    /// `>` is still returned, with `terminated` unset; the cursor then stays
    /// on that `<` so the following tag is seen next.
    pub fn next_tag(&mut self) -> Option<TagToken<'a>> {
        loop {
            self.state = ScannerState::WithinContent;
            if !self.advance_until_either_char(&[b'<'], true) {
                return None;
            }
            match self.tag_head_at(self.stream.position()) {
                Some(head) => return Some(self.read_tag(head)),
                None => self.stream.advance(1),
            }
        }
    }

    /// Consume the tag that starts with `head` through its `>`, skipping
    /// quoted attribute values.
    pub fn read_tag(&mut self, head: TagHead<'a>) -> TagToken<'a> {
        self.stream.go_to(head.name_offset);
        self.scan_tag_name();
        self.state = match head.kind {
            TagKind::Opening => ScannerState::WithinOpeningTag,
            TagKind::Closing => ScannerState::WithinClosingTag,
        };

        let found = self.advance_until_either_char(&[b'<', b'>'], true);
        let terminated = found && self.stream.peek_right(0) == Some(b'>');
        let self_closing = terminated
            && head.kind == TagKind::Opening
            && self.stream.peek_left(1) == Some(b'/');
        if terminated {
            self.stream.advance(1);
            self.state = ScannerState::WithinContent;
        }

        TagToken {
            kind: head.kind,
            name: head.name,
            name_offset: head.name_offset,
            self_closing,
            terminated,
        }
    }
}
