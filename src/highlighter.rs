use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::document::{DocumentRenderer, wrap_document};
use crate::error::TintoResult;
use crate::markup::convert;
use crate::styled::StyledText;
use crate::themes::{Style, Theme, ThemeSet};

/// The markup produced by the tokenizer for some code, shaped like a highlight.js result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizedMarkup {
    /// The span markup
    pub value: String,
    /// The language used, especially useful with auto detection
    #[serde(default)]
    pub language: Option<String>,
}

impl TokenizedMarkup {
    /// Reads a result object serialized as JSON by the tokenizer
    pub fn from_json(json: &str) -> TintoResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Whatever turns source code into span markup. We only ever consume its output.
pub trait Tokenizer {
    /// Highlights `code` as `language`. `None` if the language is unknown or it failed.
    fn highlight(&self, code: &str, language: &str, ignore_illegals: bool)
    -> Option<TokenizedMarkup>;

    /// Highlights `code`, guessing the language.
    fn highlight_auto(&self, code: &str) -> Option<TokenizedMarkup>;

    /// The languages and aliases it supports
    fn languages(&self) -> Vec<String>;
}

/// How a highlighted document gets turned into rich text
#[derive(Default, Copy, Clone, Eq, PartialEq, Debug)]
pub enum RenderMode {
    /// Scan the markup ourselves and style it with the theme
    #[default]
    Fast,
    /// Hand a complete HTML document to a [`DocumentRenderer`]
    Document,
}

/// The output of a highlighting call
#[derive(Debug, Clone, PartialEq)]
pub struct Highlighted<T> {
    pub text: T,
    pub language: Option<String>,
}

type ThemeObserver = Box<dyn Fn(&Theme) + Send + Sync>;

/// Ties a tokenizer and a set of themes together.
pub struct Highlighter<T> {
    tokenizer: T,
    themes: ThemeSet,
    theme: Arc<Theme>,
    ignore_illegals: bool,
    observers: Vec<ThemeObserver>,
}

impl<T: Tokenizer> Highlighter<T> {
    /// Creates a highlighter using the theme `theme_name` from `themes`.
    pub fn new(tokenizer: T, themes: ThemeSet, theme_name: &str) -> TintoResult<Self> {
        let theme = themes.get(theme_name)?;
        Ok(Self {
            tokenizer,
            themes,
            theme,
            ignore_illegals: false,
            observers: Vec::new(),
        })
    }

    /// Forces the tokenizer to finish even if it finds illegal syntax. Defaults to `false`.
    pub fn ignore_illegals(mut self, value: bool) -> Self {
        self.ignore_illegals = value;
        self
    }

    pub fn theme(&self) -> &Arc<Theme> {
        &self.theme
    }

    /// Switches to another theme from the set and notifies the observers.
    /// The current theme is kept if `name` is unknown.
    pub fn set_theme(&mut self, name: &str) -> TintoResult<()> {
        self.theme = self.themes.get(name)?;
        for observer in &self.observers {
            observer(&self.theme);
        }
        Ok(())
    }

    /// Registers a callback called every time the theme changes.
    pub fn on_theme_change(&mut self, observer: impl Fn(&Theme) + Send + Sync + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn available_themes(&self) -> Vec<&str> {
        self.themes.names()
    }

    pub fn supported_languages(&self) -> Vec<String> {
        self.tokenizer.languages()
    }

    fn tokenize(&self, code: &str, language: Option<&str>) -> Option<TokenizedMarkup> {
        let markup = match language {
            Some(lang) => self.tokenizer.highlight(code, lang, self.ignore_illegals),
            None => self.tokenizer.highlight_auto(code),
        };
        if markup.is_none() {
            log::debug!("Tokenizer gave nothing for language {language:?}");
        }
        markup
    }

    /// Highlights `code` with the current theme. A `None` language means auto detection.
    ///
    /// Returns `None` when the tokenizer could not handle the code.
    pub fn highlight(
        &self,
        code: &str,
        language: Option<&str>,
    ) -> Option<Highlighted<StyledText<Style>>> {
        let markup = self.tokenize(code, language)?;
        Some(Highlighted {
            text: convert(&markup.value, self.theme.as_ref()),
            language: markup.language,
        })
    }

    /// Highlights `code` through the whole-document path.
    ///
    /// The text is `None` if the platform renderer failed, the language is still reported.
    pub fn highlight_document<R: DocumentRenderer>(
        &self,
        code: &str,
        language: Option<&str>,
        renderer: &R,
    ) -> Option<Highlighted<Option<R::Output>>> {
        let markup = self.tokenize(code, language)?;
        let document = wrap_document(&markup.value, self.theme.css());
        Some(Highlighted {
            text: renderer.render_document(&document),
            language: markup.language,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::themes::FontStyle;

    /// Pretends to be a highlighter knowing a single keyword
    struct KeywordTokenizer;

    impl Tokenizer for KeywordTokenizer {
        fn highlight(
            &self,
            code: &str,
            language: &str,
            _ignore_illegals: bool,
        ) -> Option<TokenizedMarkup> {
            if language != "toy" {
                return None;
            }
            let escaped = code.replace('&', "&amp;").replace('<', "&lt;");
            Some(TokenizedMarkup {
                value: escaped.replace("if", r#"<span class="hljs-keyword">if</span>"#),
                language: Some(language.to_string()),
            })
        }

        fn highlight_auto(&self, code: &str) -> Option<TokenizedMarkup> {
            self.highlight(code, "toy", false)
        }

        fn languages(&self) -> Vec<String> {
            vec!["toy".to_string()]
        }
    }

    fn themes() -> ThemeSet {
        let mut set = ThemeSet::default();
        set.add_theme_from_css(
            "dark",
            ".hljs { color: #fff; background: #000; } .hljs-keyword { font-weight: bold; }",
        );
        set.add_theme_from_css(
            "light",
            ".hljs { color: #000; background: #fff; } .hljs-keyword { font-style: italic; }",
        );
        set
    }

    fn highlighter() -> Highlighter<KeywordTokenizer> {
        Highlighter::new(KeywordTokenizer, themes(), "dark").unwrap()
    }

    #[test]
    fn can_parse_tokenizer_json() {
        let json = r#"{"value": "<span class=\"hljs-number\">1</span>", "language": "js", "relevance": 2}"#;
        let markup = TokenizedMarkup::from_json(json).unwrap();
        assert_eq!(markup.value, r#"<span class="hljs-number">1</span>"#);
        assert_eq!(markup.language.as_deref(), Some("js"));

        let markup = TokenizedMarkup::from_json(r#"{"value": "x"}"#).unwrap();
        assert_eq!(markup.language, None);
        assert!(TokenizedMarkup::from_json("{").is_err());
    }

    #[test]
    fn highlights_with_the_current_theme() {
        let h = highlighter();
        let out = h.highlight("if a < b", Some("toy")).unwrap();
        assert_eq!(out.language.as_deref(), Some("toy"));
        assert_eq!(out.text.plain_text(), "if a < b");
        assert_eq!(out.text.runs()[0].style.font_style, FontStyle::BOLD);
        assert!(out.text.runs()[1].style.font_style.is_empty());
    }

    #[test]
    fn auto_detection_and_unknown_language() {
        let h = highlighter();
        assert!(h.highlight("if", None).is_some());
        assert!(h.highlight("if", Some("cobol")).is_none());
    }

    #[test]
    fn theme_changes_are_observed() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut h = highlighter();
        let seen_by_observer = Arc::clone(&seen);
        h.on_theme_change(move |theme| {
            seen_by_observer.lock().unwrap().push(theme.name.clone());
        });

        h.set_theme("light").unwrap();
        assert!(h.set_theme("missing").is_err());
        assert_eq!(h.theme().name, "light");
        assert_eq!(*seen.lock().unwrap(), vec!["light".to_string()]);

        let out = h.highlight("if", Some("toy")).unwrap();
        assert_eq!(out.text.runs()[0].style.font_style, FontStyle::ITALIC);
    }

    #[test]
    fn document_path_bypasses_the_scanner() {
        struct Length;
        impl DocumentRenderer for Length {
            type Output = usize;
            fn render_document(&self, html: &str) -> Option<usize> {
                html.contains("&lt;").then_some(html.len())
            }
        }

        let h = highlighter();
        let out = h.highlight_document("a < b", Some("toy"), &Length).unwrap();
        assert!(out.text.is_some());
        let out = h.highlight_document("a b", Some("toy"), &Length).unwrap();
        assert_eq!(out.text, None);
    }

    #[test]
    fn lists_themes_and_languages() {
        let h = highlighter().ignore_illegals(true);
        assert_eq!(h.available_themes(), vec!["dark", "light"]);
        assert_eq!(h.supported_languages(), vec!["toy".to_string()]);
    }
}
