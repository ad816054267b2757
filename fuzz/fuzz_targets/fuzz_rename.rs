//! Rename engine fuzz target.
//!
//! Tests arbitrary documents, offsets and edit tokens against every
//! built-in language to find panics, hangs and invariant violations.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tagsync::{do_auto_rename_tag, EditToken};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    text: String,
    offset: u16,
    closing: bool,
    new_name: String,
    old_name: String,
    language: Language,
}

#[derive(Debug, Arbitrary)]
enum Language {
    Html,
    Xml,
    Jsx,
    Svelte,
    Php,
    Erb,
    Vue,
    Jinja,
}

impl Language {
    fn id(&self) -> &'static str {
        match self {
            Language::Html => "html",
            Language::Xml => "xml",
            Language::Jsx => "typescriptreact",
            Language::Svelte => "svelte",
            Language::Php => "php",
            Language::Erb => "erb",
            Language::Vue => "vue",
            Language::Jinja => "jinja",
        }
    }
}

fuzz_target!(|input: FuzzInput| {
    let prefix = if input.closing { "</" } else { "<" };
    let new_token = format!("{}{}", prefix, input.new_name);
    let old_token = format!("{}{}", prefix, input.old_name);
    let offset = usize::from(input.offset);

    // Core invariant: any request resolves without panicking
    let Some(rename) =
        do_auto_rename_tag(&input.text, offset, &new_token, &old_token, input.language.id())
    else {
        return;
    };

    // A linked rename only exists for well-formed tokens
    let old = EditToken::parse(&old_token).expect("rename from a malformed old token");
    let new = EditToken::parse(&new_token).expect("rename from a malformed new token");

    // The range covers exactly the old name and lies on char boundaries
    assert!(rename.start_offset <= rename.end_offset);
    assert_eq!(rename.span().text(&input.text), Some(old.name));
    assert_eq!(rename.tag_name, new.name);
    assert_ne!(old.name, new.name);

    // Splicing the result must be valid
    let edited = rename.apply(&input.text);
    assert_eq!(
        edited.len(),
        input.text.len() - old.name.len() + new.name.len()
    );
});
