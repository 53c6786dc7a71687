use std::fmt;

use serde::{Deserialize, Serialize};

use crate::resolver::{BASE_SCOPE, StyleResolver};
use crate::styled::StyledRun;
use crate::themes::Color;
use crate::themes::font_style::{FontStyle, font_flag_from_css};
use crate::themes::raw::RawTheme;
use crate::themes::selector::{ThemeSelector, parse_selector};

/// A complete style with foreground, background colors and font styling
///
/// This is the runtime representation that always has concrete values.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub struct Style {
    pub foreground: Color,
    pub background: Color,
    pub font_style: FontStyle,
}

impl Default for Style {
    fn default() -> Style {
        Style {
            foreground: Color::BLACK,
            background: Color::WHITE,
            font_style: FontStyle::empty(),
        }
    }
}

/// A style modifier with optional values, what a single CSS rule says.
///
/// Font flags are tracked separately for setting and clearing since a rule can say
/// `font-weight: normal` without saying anything about italics.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct StyleModifier {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub font_set: FontStyle,
    pub font_unset: FontStyle,
}

impl StyleModifier {
    /// Reads the declarations of a rule, ignoring the ones we can't render or parse
    fn from_declarations(declarations: &[(String, String)]) -> Self {
        let mut modifier = StyleModifier::default();

        for (property, value) in declarations {
            match property.as_str() {
                "color" => match Color::from_css(value) {
                    Ok(c) => modifier.foreground = Some(c),
                    Err(e) => log::debug!("Skipping `color: {value}`: {e}"),
                },
                "background" | "background-color" => {
                    // `background` is a shorthand, the color can be anywhere in it
                    let color = Color::from_css(value).ok().or_else(|| {
                        value
                            .split_whitespace()
                            .rev()
                            .find_map(|part| Color::from_css(part).ok())
                    });
                    match color {
                        Some(c) => modifier.background = Some(c),
                        None => log::debug!("No usable color in `{property}: {value}`"),
                    }
                }
                _ => match font_flag_from_css(property, value) {
                    Some((flag, true)) => {
                        modifier.font_set.insert(flag);
                        modifier.font_unset.remove(flag);
                    }
                    Some((flag, false)) => {
                        modifier.font_unset.insert(flag);
                        modifier.font_set.remove(flag);
                    }
                    None => {}
                },
            }
        }

        modifier
    }

    pub fn is_empty(&self) -> bool {
        self.foreground.is_none()
            && self.background.is_none()
            && self.font_set.is_empty()
            && self.font_unset.is_empty()
    }

    pub fn apply_to(&self, style: &Style) -> Style {
        let mut font_style = style.font_style;
        font_style.remove(self.font_unset);
        font_style.insert(self.font_set);
        Style {
            foreground: self.foreground.unwrap_or(style.foreground),
            background: self.background.unwrap_or(style.background),
            font_style,
        }
    }
}

/// Compiled theme rule for efficient matching
#[derive(Debug, Clone)]
pub struct ThemeRule {
    pub selector: ThemeSelector,
    pub style_modifier: StyleModifier,
}

/// Styles already computed for a scope stack, shared between threads using the same theme
#[derive(Default)]
struct StyleCache(papaya::HashMap<String, Style>);

impl StyleCache {
    // Classes can't contain newlines so this can't be ambiguous
    fn key(scopes: &[&str]) -> String {
        scopes.join("\n")
    }
}

impl Clone for StyleCache {
    fn clone(&self) -> Self {
        // A fresh cache, it will fill up again
        Self::default()
    }
}

impl fmt::Debug for StyleCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StyleCache({} entries)", self.0.len())
    }
}

/// A highlight.js theme, ready to style scope stacks
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    /// Rules sorted by specificity, then source order
    pub rules: Vec<ThemeRule>,
    css: String,
    cache: StyleCache,
}

impl Theme {
    pub fn from_raw_theme(raw_theme: RawTheme) -> Self {
        let mut rules = Vec::new();

        for rule in &raw_theme.rules {
            let style_modifier = StyleModifier::from_declarations(&rule.declarations);
            if style_modifier.is_empty() {
                continue;
            }
            for selector in rule.selectors() {
                match parse_selector(selector) {
                    Some(selector) => rules.push(ThemeRule {
                        selector,
                        style_modifier,
                    }),
                    None => log::debug!("Skipping unsupported selector {selector:?}"),
                }
            }
        }
        // Stable so source order is kept for equal specificity
        rules.sort_by_key(|r| r.selector.specificity());

        Theme {
            name: raw_theme.name,
            rules,
            css: raw_theme.css,
            cache: StyleCache::default(),
        }
    }

    pub fn from_css(name: impl Into<String>, css: impl Into<String>) -> Self {
        RawTheme::from_css(name, css).compile()
    }

    /// The style sheet this theme was built from
    pub fn css(&self) -> &str {
        &self.css
    }

    /// The style of text that isn't in any span
    pub fn default_style(&self) -> Style {
        self.style_for(&[BASE_SCOPE])
    }

    /// Match a scope stack against theme rules, building styles hierarchically
    /// like a browser would with nested spans.
    pub fn style_for(&self, scopes: &[&str]) -> Style {
        let key = StyleCache::key(scopes);
        let cache = self.cache.0.pin();
        if let Some(style) = cache.get(key.as_str()) {
            return *style;
        }

        let style = self.style_for_uncached(scopes);
        cache.insert(key, style);
        style
    }

    fn style_for_uncached(&self, scopes: &[&str]) -> Style {
        let mut current_style = Style::default();

        // Each depth inherits from its parent and then applies its own rules
        for i in 1..=scopes.len() {
            let current_scope_path = &scopes[0..i];

            for rule in &self.rules {
                if rule.selector.matches(current_scope_path) {
                    current_style = rule.style_modifier.apply_to(&current_style);
                }
            }
        }

        current_style
    }
}

impl StyleResolver<Style> for Theme {
    fn resolve(&self, text: &str, scopes: &[&str]) -> StyledRun<Style> {
        StyledRun::new(text, self.style_for(scopes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSS: &str = r#"
.hljs { color: #DCCF8F; background: #181914; }
.hljs-keyword, .hljs-selector-tag { color: #B64926; font-weight: bold; }
.hljs-title { color: #FFFFFF; }
.hljs-title.function_ { color: #DDDDDD; }
.hljs-doctag .hljs-keyword { font-weight: normal; font-style: italic; }
.hljs-emphasis { font-style: italic; }
.hljs-strong { font-weight: 700; }
::selection { background: red; }
"#;

    fn theme() -> Theme {
        Theme::from_css("test", CSS)
    }

    #[test]
    fn base_scope_gets_the_theme_colors() {
        let style = theme().default_style();
        assert_eq!(style.foreground, Color::rgb(0xDC, 0xCF, 0x8F));
        assert_eq!(style.background, Color::rgb(0x18, 0x19, 0x14));
        assert!(style.font_style.is_empty());
    }

    #[test]
    fn nested_scopes_inherit() {
        let theme = theme();
        let style = theme.style_for(&["hljs", "hljs-keyword"]);
        assert_eq!(style.foreground, Color::rgb(0xB6, 0x49, 0x26));
        assert_eq!(style.background, Color::rgb(0x18, 0x19, 0x14));
        assert_eq!(style.font_style, FontStyle::BOLD);

        let style = theme.style_for(&["hljs", "hljs-strong", "hljs-emphasis"]);
        assert!(style.font_style.contains(FontStyle::BOLD));
        assert!(style.font_style.contains(FontStyle::ITALIC));
    }

    #[test]
    fn more_specific_rules_win() {
        let theme = theme();
        let style = theme.style_for(&["hljs", "hljs-title function_"]);
        assert_eq!(style.foreground, Color::rgb(0xDD, 0xDD, 0xDD));

        let style = theme.style_for(&["hljs", "hljs-doctag", "hljs-keyword"]);
        assert_eq!(style.foreground, Color::rgb(0xB6, 0x49, 0x26));
        assert_eq!(style.font_style, FontStyle::ITALIC);
    }

    #[test]
    fn unknown_scopes_keep_the_parent_style() {
        let theme = theme();
        assert_eq!(
            theme.style_for(&["hljs", "language-xml", "whatever"]),
            theme.default_style()
        );
    }

    #[test]
    fn unsupported_selectors_are_skipped() {
        // `::selection` is dropped, everything else is kept
        assert_eq!(theme().rules.len(), 8);
    }

    #[test]
    fn cached_styles_are_the_same() {
        let theme = theme();
        let first = theme.style_for(&["hljs", "hljs-keyword"]);
        let second = theme.style_for(&["hljs", "hljs-keyword"]);
        assert_eq!(first, second);
        assert_eq!(theme.clone().style_for(&["hljs", "hljs-keyword"]), first);
    }

    #[test]
    fn theme_is_a_resolver() {
        let run = theme().resolve("if", &["hljs", "hljs-keyword"]);
        assert_eq!(run.text, "if");
        assert_eq!(run.style.font_style, FontStyle::BOLD);
    }

    #[test]
    fn can_be_shared_between_threads() {
        let theme = theme();
        let markup = r#"<span class="hljs-keyword">if</span> x &amp;&amp; y"#;
        let expected = crate::markup::convert(markup, &theme);

        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| crate::markup::convert(markup, &theme)))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
