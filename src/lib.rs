//! # tagsync
//!
//! Linked renaming of paired markup tags.
//!
//! When an editor user renames one side of a tag pair, this library finds
//! the other side and reports the range to replace, or decides that no
//! linked edit is safe. It works directly on the live, possibly half-typed
//! document text and builds no tree: two directional scans reconstruct just
//! enough nesting to find one partner tag.
//!
//! ## Features
//!
//! - **Mid-edit Safe**: unterminated tags, stale state and ambiguous nesting
//!   all resolve to "no linked edit"
//! - **Dialects**: HTML void elements, XML, JSX/TSX brace expressions and
//!   fragments, template languages (PHP, ERB, Vue, Jinja, ...)
//! - **Pluggable Languages**: bring your own void tags and opaque regions
//! - **`no_std` Support**: works with just `alloc`
//! - **WebAssembly Support**: JSON bindings for editor extensions
//!
//! ## `no_std` Support
//!
//! The `std` feature is enabled by default. Without it the crate needs only
//! an allocator:
//!
//! ```toml
//! [dependencies]
//! tagsync = { version = "0.1", default-features = false }
//! ```
//!
//! ## WebAssembly Support
//!
//! ```bash
//! cargo build --target wasm32-unknown-unknown --features wasm --release
//! wasm-bindgen target/wasm32-unknown-unknown/release/tagsync.wasm \
//!     --out-dir pkg --target web
//! ```
//!
//! ```javascript
//! import init, { doAutoRenameTag } from './pkg/tagsync.js';
//!
//! await init();
//! const rename = JSON.parse(doAutoRenameTag('<div></div>', 1, '<span', '<div', 'html'));
//! // { startOffset: 7, endOffset: 10, tagName: "span" }
//! ```
//!
//! ## Quick Start
//!
//! The user changed `<div>` to `<span>`; the text still holds the old
//! closing tag:
//!
//! ```rust
//! use tagsync::do_auto_rename_tag;
//!
//! let text = "<span><p>hi</p></div>";
//! let rename = do_auto_rename_tag(text, 1, "<span", "<div", "html").unwrap();
//!
//! assert_eq!((rename.start_offset, rename.end_offset), (17, 20));
//! assert_eq!(rename.apply(text), "<span><p>hi</p></span>");
//! ```
//!
//! Editing a closing tag renames the opening tag:
//!
//! ```rust
//! use tagsync::do_auto_rename_tag;
//!
//! let text = "<ul>\n  <li>one</li>\n</ol>";
//! let offset = text.find("</ol").unwrap() + 2;
//! let rename = do_auto_rename_tag(text, offset, "</ol", "</ul", "html").unwrap();
//!
//! assert_eq!(rename.apply(text), "<ol>\n  <li>one</li>\n</ol>");
//! ```
//!
//! ## Custom Languages
//!
//! ```rust
//! use tagsync::language::LanguageBuilder;
//! use tagsync::{rename_with, EditToken};
//!
//! let razor = LanguageBuilder::new()
//!     .self_closing_tags(&["br", "img"])
//!     .matching_pair("<!--", "-->")
//!     .matching_pair("@{", "}")
//!     .build();
//!
//! let text = "<p>@{ var s = \"</p>\"; }</p>";
//! let rename = rename_with(
//!     text,
//!     1,
//!     &EditToken::opening("q"),
//!     &EditToken::opening("p"),
//!     &razor,
//! )
//! .unwrap();
//!
//! assert_eq!(rename.start_offset, text.len() - 2);
//! ```
//!
//! ## Validated Requests
//!
//! `do_auto_rename_tag` quietly returns `None` for malformed input.
//! `RenameRequest` reports it instead:
//!
//! ```rust
//! use tagsync::{EditErrorKind, RenameRequest};
//!
//! let request = RenameRequest::new("<a></a>", 1, "b", "<a");
//! let err = request.resolve().unwrap_err();
//! assert_eq!(err.kind, EditErrorKind::MissingAngleBracket);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

// Core modules
pub mod error;
pub mod language;
pub mod locator;
pub mod rename;
pub mod scanner;
pub mod source;
pub mod span;
pub mod token;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use error::{EditError, EditErrorKind};
pub use language::{BuiltinLanguage, CustomLanguage, LanguageBuilder, LanguagePolicy};
pub use locator::{next_closing_tag, previous_opening_tag};
pub use rename::{do_auto_rename_tag, rename_with, EditToken, LinkedRename, RenameRequest};
pub use scanner::{Scanner, ScannerState};
pub use source::Source;
pub use span::{Location, Span};
pub use token::{TagKind, TagOccurrence, TagToken};
