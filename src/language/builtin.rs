//! Built-in language table keyed by editor language identifier.

use super::{
    Dialect, Jsx, LanguagePolicy, Markup, MatchingPair, CDATA, COMMENT, EMBEDDED_CODE,
    HTML_VOID_ELEMENTS, MUSTACHE, PROCESSING_INSTRUCTION, TEMPLATE_COMMENT, TEMPLATE_STATEMENT,
};

/// Languages with built-in tag rules.
///
/// Unknown language identifiers fall back to `Html`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BuiltinLanguage {
    /// HTML, Markdown and anything not listed elsewhere.
    #[default]
    Html,
    /// XML-family documents: case-sensitive, no void elements.
    Xml,
    /// JavaScript/TypeScript with JSX.
    Jsx,
    /// Svelte and Astro: HTML elements with JSX-style brace expressions.
    Svelte,
    /// PHP templates.
    Php,
    /// EJS and ERB templates (`<% %>`).
    EmbeddedRuby,
    /// Mustache-style templates (`{{ }}`), including Vue and Handlebars.
    Mustache,
    /// Jinja-style templates (`{{ }}`, `{% %}`, `{# #}`).
    Jinja,
}

impl BuiltinLanguage {
    /// Every built-in language.
    pub const ALL: [BuiltinLanguage; 8] = [
        BuiltinLanguage::Html,
        BuiltinLanguage::Xml,
        BuiltinLanguage::Jsx,
        BuiltinLanguage::Svelte,
        BuiltinLanguage::Php,
        BuiltinLanguage::EmbeddedRuby,
        BuiltinLanguage::Mustache,
        BuiltinLanguage::Jinja,
    ];

    /// Resolve an editor language identifier.
    pub fn for_id(language_id: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|language| language.ids().contains(&language_id))
            .unwrap_or_default()
    }

    /// Language identifiers that resolve to this language.
    pub fn ids(self) -> &'static [&'static str] {
        match self {
            BuiltinLanguage::Html => &["html", "xhtml", "markdown", "mdx"],
            BuiltinLanguage::Xml => &["xml", "xsl", "xsd", "xaml", "svg"],
            BuiltinLanguage::Jsx => &[
                "javascript",
                "typescript",
                "javascriptreact",
                "typescriptreact",
            ],
            BuiltinLanguage::Svelte => &["svelte", "astro"],
            BuiltinLanguage::Php => &["php"],
            BuiltinLanguage::EmbeddedRuby => &["ejs", "erb", "eruby"],
            BuiltinLanguage::Mustache => &["handlebars", "mustache", "vue", "vue-html"],
            BuiltinLanguage::Jinja => &[
                "jinja",
                "jinja-html",
                "django-html",
                "nunjucks",
                "twig",
                "liquid",
                "blade",
            ],
        }
    }

    /// Does this language use HTML void elements?
    fn has_void_elements(self) -> bool {
        !matches!(self, BuiltinLanguage::Xml | BuiltinLanguage::Jsx)
    }
}

impl LanguagePolicy for BuiltinLanguage {
    fn dialect(&self) -> &dyn Dialect {
        match self {
            BuiltinLanguage::Jsx | BuiltinLanguage::Svelte => &Jsx,
            _ => &Markup,
        }
    }

    fn matching_pairs(&self) -> &[MatchingPair] {
        // Ordered by opener length (longest first) so prefixes never shadow
        static HTML: &[MatchingPair] = &[COMMENT];
        static XML: &[MatchingPair] = &[CDATA, COMMENT, PROCESSING_INSTRUCTION];
        static PHP: &[MatchingPair] = &[COMMENT, PROCESSING_INSTRUCTION];
        static EMBEDDED_RUBY: &[MatchingPair] = &[COMMENT, EMBEDDED_CODE];
        static MUSTACHE_PAIRS: &[MatchingPair] = &[COMMENT, MUSTACHE];
        static JINJA: &[MatchingPair] =
            &[COMMENT, MUSTACHE, TEMPLATE_STATEMENT, TEMPLATE_COMMENT];

        match self {
            BuiltinLanguage::Html | BuiltinLanguage::Jsx | BuiltinLanguage::Svelte => HTML,
            BuiltinLanguage::Xml => XML,
            BuiltinLanguage::Php => PHP,
            BuiltinLanguage::EmbeddedRuby => EMBEDDED_RUBY,
            BuiltinLanguage::Mustache => MUSTACHE_PAIRS,
            BuiltinLanguage::Jinja => JINJA,
        }
    }

    fn is_self_closing(&self, tag_name: &str) -> bool {
        self.has_void_elements()
            && HTML_VOID_ELEMENTS
                .iter()
                .any(|void| void.eq_ignore_ascii_case(tag_name))
    }
}
