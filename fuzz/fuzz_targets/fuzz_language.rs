//! Custom language configuration fuzz target.
//!
//! Tests different builder configurations (dialects, opaque pairs, void
//! tags) combined with arbitrary input to find edge cases in language
//! interactions.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tagsync::language::{CustomLanguage, Jsx, LanguageBuilder};
use tagsync::{rename_with, EditToken};

/// Language configuration options (using static strings since LanguageBuilder requires them).
#[derive(Debug, Arbitrary)]
struct LanguageConfig {
    /// Use JSX tag syntax
    jsx: bool,
    /// Which opaque pairs to use
    pair_set: PairSet,
    /// Which void tags to use
    void_set: VoidSet,
    /// Compare void tags case-sensitively
    case_sensitive: bool,
}

#[derive(Debug, Arbitrary)]
enum PairSet {
    None,
    Comments,
    Templates,
    /// Delimiters that overlap tag syntax
    Overlapping,
    /// Empty delimiters, which the builder must drop
    Degenerate,
}

#[derive(Debug, Arbitrary)]
enum VoidSet {
    None,
    Html,
    Everything,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    config: LanguageConfig,
    text: String,
    offset: u16,
    closing: bool,
    new_name: String,
    old_name: String,
}

impl LanguageConfig {
    fn build(&self) -> CustomLanguage {
        let mut builder = LanguageBuilder::new().case_sensitive(self.case_sensitive);
        if self.jsx {
            builder = builder.dialect(Jsx);
        }

        builder = match self.pair_set {
            PairSet::None => builder,
            PairSet::Comments => builder.matching_pair("<!--", "-->"),
            PairSet::Templates => builder
                .matching_pair("{{", "}}")
                .matching_pair("{%", "%}")
                .matching_pair("<%", "%>"),
            PairSet::Overlapping => builder
                .matching_pair("<", ">")
                .matching_pair("</", "/>")
                .matching_pair(">", "<"),
            PairSet::Degenerate => builder.matching_pair("", "").matching_pair("<", ""),
        };

        match self.void_set {
            VoidSet::None => builder,
            VoidSet::Html => builder.self_closing_tags(&["br", "hr", "img", "input", "meta"]),
            VoidSet::Everything => builder.self_closing_tags(&["a", "b", "div", "p", "span"]),
        }
        .build()
    }
}

fuzz_target!(|input: FuzzInput| {
    let language = input.config.build();

    let prefix = if input.closing { "</" } else { "<" };
    let new_token = format!("{}{}", prefix, input.new_name);
    let old_token = format!("{}{}", prefix, input.old_name);
    let (Ok(new), Ok(old)) = (EditToken::parse(&new_token), EditToken::parse(&old_token)) else {
        return;
    };

    // Should never panic or hang, whatever the configuration
    let offset = usize::from(input.offset);
    if let Some(rename) = rename_with(&input.text, offset, &new, &old, &language) {
        assert_eq!(rename.span().text(&input.text), Some(old.name));
    }
});
