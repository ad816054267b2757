//! WebAssembly bindings for editor extensions.
//!
//! Results cross the JS boundary as JSON strings.
//!
//! # Usage from JavaScript
//!
//! ```javascript
//! import init, { doAutoRenameTag, RenameConfig, renameWithConfig } from './tagsync.js';
//!
//! await init();
//!
//! // `null`, or { startOffset, endOffset, tagName }
//! const rename = JSON.parse(doAutoRenameTag('<div></div>', 1, '<span', '<div', 'html'));
//!
//! // Custom tag tables
//! const config = new RenameConfig();
//! config.addSelfClosingTag('slot');
//! config.addMatchingPair('@{', '}');
//! const custom = JSON.parse(renameWithConfig('<p>@{ x }</p>', 1, '<q', '<p', config));
//! ```

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::error::{EditError, EditErrorKind};
use crate::language::{BuiltinLanguage, Jsx, LanguageBuilder, MatchingPair};
use crate::rename::{
    do_auto_rename_tag as rename_tag, rename_with, EditToken, LinkedRename, RenameRequest,
};

/// A JSON-serializable request error for JavaScript consumption.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsEditError {
    /// The error message.
    pub message: String,
    /// Error kind identifier.
    pub kind: String,
}

impl JsEditError {
    fn from_error(error: &EditError) -> Self {
        let kind = match &error.kind {
            EditErrorKind::MissingAngleBracket => "MissingAngleBracket",
            EditErrorKind::InvalidTagName(_) => "InvalidTagName",
            EditErrorKind::MixedTagSides => "MixedTagSides",
            EditErrorKind::OffsetOutOfBounds { .. } => "OffsetOutOfBounds",
        };
        JsEditError {
            message: error.to_string(),
            kind: kind.into(),
        }
    }
}

/// The outcome of a validated request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResult {
    /// The linked rename, if one applies.
    pub rename: Option<LinkedRename>,
    /// Why the request was rejected, if it was.
    pub error: Option<JsEditError>,
    /// Whether the request was well-formed.
    pub success: bool,
}

fn to_json(rename: Option<LinkedRename>) -> String {
    serde_json::to_string(&rename).unwrap_or_else(|_| "null".into())
}

/// Compute the linked rename for an edited tag.
///
/// Returns `null` or `{"startOffset":..,"endOffset":..,"tagName":..}`.
#[wasm_bindgen(js_name = doAutoRenameTag)]
pub fn do_auto_rename_tag(
    text: &str,
    offset: usize,
    new_token: &str,
    old_token: &str,
    language_id: &str,
) -> String {
    to_json(rename_tag(text, offset, new_token, old_token, language_id))
}

/// Resolve a JSON-encoded `RenameRequest`, reporting malformed requests.
#[wasm_bindgen(js_name = resolveRequest)]
pub fn resolve_request(request: &str) -> String {
    let result = match serde_json::from_str::<RenameRequest>(request) {
        Ok(request) => match request.resolve() {
            Ok(rename) => ResolveResult {
                rename,
                error: None,
                success: true,
            },
            Err(error) => ResolveResult {
                rename: None,
                error: Some(JsEditError::from_error(&error)),
                success: false,
            },
        },
        Err(error) => ResolveResult {
            rename: None,
            error: Some(JsEditError {
                message: error.to_string(),
                kind: "InvalidRequest".into(),
            }),
            success: false,
        },
    };

    serde_json::to_string(&result).unwrap_or_else(|_| r#"{"error":"serialization failed"}"#.into())
}

/// Custom tag tables for hosts with their own language rules.
#[wasm_bindgen]
pub struct RenameConfig {
    self_closing_tags: Vec<&'static str>,
    matching_pairs: Vec<MatchingPair>,
    jsx: bool,
    case_sensitive: bool,
}

#[wasm_bindgen]
impl RenameConfig {
    /// Create an empty configuration: plain markup, no void tags.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            self_closing_tags: Vec::new(),
            matching_pairs: Vec::new(),
            jsx: false,
            case_sensitive: false,
        }
    }

    /// Add a tag that never takes a closing tag.
    #[wasm_bindgen(js_name = addSelfClosingTag)]
    pub fn add_self_closing_tag(&mut self, tag: &str) {
        // Configurations are created once per host and live for the session
        let leaked: &'static str = Box::leak(tag.to_string().into_boxed_str());
        self.self_closing_tags.push(leaked);
    }

    /// Add an opaque delimiter pair (e.g., `"{{"` and `"}}"`).
    #[wasm_bindgen(js_name = addMatchingPair)]
    pub fn add_matching_pair(&mut self, open: &str, close: &str) {
        let open: &'static str = Box::leak(open.to_string().into_boxed_str());
        let close: &'static str = Box::leak(close.to_string().into_boxed_str());
        self.matching_pairs.push(MatchingPair::new(open, close));
    }

    /// Use JSX tag syntax (brace expressions, fragments).
    #[wasm_bindgen(js_name = setJsx)]
    pub fn set_jsx(&mut self, jsx: bool) {
        self.jsx = jsx;
    }

    /// Compare self-closing tag names case-sensitively.
    #[wasm_bindgen(js_name = setCaseSensitive)]
    pub fn set_case_sensitive(&mut self, case_sensitive: bool) {
        self.case_sensitive = case_sensitive;
    }
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute the linked rename under a custom configuration.
///
/// Returns `null` or the rename object, like `doAutoRenameTag`.
#[wasm_bindgen(js_name = renameWithConfig)]
pub fn rename_with_config(
    text: &str,
    offset: usize,
    new_token: &str,
    old_token: &str,
    config: &RenameConfig,
) -> String {
    let (Ok(new), Ok(old)) = (EditToken::parse(new_token), EditToken::parse(old_token)) else {
        return to_json(None);
    };

    let mut builder = LanguageBuilder::new()
        .self_closing_tags(&config.self_closing_tags)
        .matching_pairs(&config.matching_pairs)
        .case_sensitive(config.case_sensitive);
    if config.jsx {
        builder = builder.dialect(Jsx);
    }
    let language = builder.build();

    to_json(rename_with(text, offset, &new, &old, &language))
}

/// List every language id with built-in rules.
#[wasm_bindgen(js_name = supportedLanguages)]
pub fn supported_languages() -> String {
    let ids: Vec<&str> = BuiltinLanguage::ALL
        .iter()
        .flat_map(|language| language.ids().iter().copied())
        .collect();
    serde_json::to_string(&ids).unwrap_or_else(|_| "[]".into())
}

/// Get the library version.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_do_auto_rename_tag_json() {
        let result = do_auto_rename_tag("<div></div>", 1, "<span", "<div", "html");
        assert_eq!(result, r#"{"startOffset":7,"endOffset":10,"tagName":"span"}"#);

        let parsed: Option<LinkedRename> = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed.unwrap().tag_name, "span");
    }

    #[test]
    fn test_no_action_is_null() {
        assert_eq!(do_auto_rename_tag("<br>", 1, "<img", "<br", "html"), "null");
        assert_eq!(do_auto_rename_tag("<div>", 1, "<p", "<div", "html"), "null");
    }

    #[test]
    fn test_resolve_request() {
        let request = r#"{"text":"<a></a>","offset":5,"newToken":"</b","oldToken":"</a"}"#;
        let parsed: ResolveResult = serde_json::from_str(&resolve_request(request)).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.rename.unwrap().start_offset, 1);
    }

    #[test]
    fn test_resolve_request_errors() {
        let request = r#"{"text":"<a></a>","offset":1,"newToken":"<b","oldToken":"</a"}"#;
        let parsed: ResolveResult = serde_json::from_str(&resolve_request(request)).unwrap();
        assert!(!parsed.success);
        assert_eq!(parsed.error.unwrap().kind, "MixedTagSides");

        let parsed: ResolveResult = serde_json::from_str(&resolve_request("{")).unwrap();
        assert_eq!(parsed.error.unwrap().kind, "InvalidRequest");
    }

    #[test]
    fn test_custom_config() {
        let mut config = RenameConfig::new();
        config.add_self_closing_tag("slot");
        config.add_matching_pair("@{", "}");

        let result = rename_with_config("<p>@{ </p> }<slot></p>", 1, "<q", "<p", &config);
        let parsed: Option<LinkedRename> = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed.unwrap().start_offset, 20);
    }

    #[test]
    fn test_supported_languages() {
        let parsed: Vec<String> = serde_json::from_str(&supported_languages()).unwrap();
        assert!(parsed.contains(&"html".to_string()));
        assert!(parsed.contains(&"typescriptreact".to_string()));
    }
}
