//! Scanner fuzz target.
//!
//! Walks arbitrary input forward tag by tag and backward boundary by
//! boundary, checking that the cursor always makes progress and every tag
//! name lies inside the document.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tagsync::{BuiltinLanguage, Scanner, ScannerState};

fuzz_target!(|data: &str| {
    for language in BuiltinLanguage::ALL {
        check_forward(data, language);
        check_backward(data, language);
    }
});

fn check_forward(source: &str, language: BuiltinLanguage) {
    let mut scanner = Scanner::new(source, 0, ScannerState::WithinContent, &language);
    let mut last = 0;
    let mut count = 0;

    while let Some(tag) = scanner.next_tag() {
        let span = tag.name_span();
        assert!(span.end <= source.len(), "tag name {} past end", span);
        assert_eq!(span.text(source), Some(tag.name));

        // Each tag is found strictly after the previous one
        assert!(tag.name_offset >= last, "scanner moved backward");
        last = tag.name_offset + 1;

        count += 1;
        assert!(count <= source.len(), "more tags than bytes");
    }
}

fn check_backward(source: &str, language: BuiltinLanguage) {
    let mut scanner =
        Scanner::new(source, source.len(), ScannerState::WithinContent, &language);
    let mut previous = source.len();

    while let Some(boundary) = scanner.previous_tag_boundary() {
        let position = scanner.stream.position();
        assert!(position < previous, "backward scan did not make progress");
        assert_eq!(source.as_bytes()[position], boundary);
        previous = position;
    }
}
