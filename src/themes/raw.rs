use std::fs;
use std::path::Path;

use crate::error::TintoResult;
use crate::themes::compiled::Theme;

/// A CSS rule as written in the style sheet, before any interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRule {
    /// The selector list, still comma separated
    pub selectors: String,
    /// `(property, value)` pairs, property lowercased
    pub declarations: Vec<(String, String)>,
}

impl RawRule {
    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.selectors
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// A highlight.js theme as a list of plain CSS rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTheme {
    pub name: String,
    pub css: String,
    pub rules: Vec<RawRule>,
}

fn strip_comments(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut rest = css;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => {
                rest = "";
                break;
            }
        }
    }
    out.push_str(rest);
    out
}

fn parse_declarations(block: &str) -> Vec<(String, String)> {
    block
        .split(';')
        .filter_map(|decl| {
            let (property, value) = decl.split_once(':')?;
            let property = property.trim().to_ascii_lowercase();
            let value = value.trim().trim_end_matches("!important").trim();
            if property.is_empty() || value.is_empty() {
                return None;
            }
            Some((property, value.to_string()))
        })
        .collect()
}

/// Splits a style sheet into rules. At-rules with nested blocks (`@media`...) are dropped
/// entirely since a theme can't know the context it will be displayed in.
pub(crate) fn parse_rules(css: &str) -> Vec<RawRule> {
    let css = strip_comments(css);
    let mut rules = Vec::new();
    let mut rest = css.as_str();

    while let Some(open) = rest.find('{') {
        let prelude = rest[..open].trim();
        let body_start = open + 1;

        // Find the matching close brace, at-rules can nest
        let mut depth = 1;
        let mut close = None;
        for (i, c) in rest[body_start..].char_indices() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        close = Some(body_start + i);
                        break;
                    }
                }
                _ => {}
            }
        }
        let Some(close) = close else {
            log::debug!("Unclosed CSS block for `{prelude}`, ignoring the rest of the theme");
            break;
        };

        if prelude.starts_with('@') {
            log::debug!("Skipping CSS at-rule `{prelude}`");
        } else {
            rules.push(RawRule {
                selectors: prelude.to_string(),
                declarations: parse_declarations(&rest[body_start..close]),
            });
        }
        rest = &rest[close + 1..];
    }

    rules
}

impl RawTheme {
    pub fn from_css(name: impl Into<String>, css: impl Into<String>) -> Self {
        let css = css.into();
        let rules = parse_rules(&css);
        Self {
            name: name.into(),
            css,
            rules,
        }
    }

    /// Loads a theme from a `.css` file, the name being the file stem
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> TintoResult<Self> {
        let path = path.as_ref();
        let css = fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::from_css(name, css))
    }

    pub fn compile(self) -> Theme {
        Theme::from_raw_theme(self)
    }
}
