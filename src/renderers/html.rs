use std::collections::BTreeMap;
use std::fmt;

use crate::styled::{StyledRun, StyledText};
use crate::themes::{Style, Theme};

#[derive(Debug, PartialEq, Clone, Default)]
/// A renderer that will output HTML with inline styles, no style sheet needed
pub struct HtmlRenderer {
    /// Any metadata we want to add as `<code>` data-* attribute
    pub other_metadata: BTreeMap<String, String>,
}

fn run_as_html(run: &StyledRun<Style>, default_style: &Style) -> String {
    let escaped = HtmlEscaped(run.text.as_str());
    if run.style == *default_style {
        return format!("<span>{escaped}</span>");
    }

    let mut css_style = String::with_capacity(30);
    if run.style.foreground != default_style.foreground {
        css_style.push_str(&run.style.foreground.as_css_color_property());
    }
    if run.style.background != default_style.background {
        css_style.push_str(&run.style.background.as_css_bg_color_property());
    }
    for font_attr in run.style.font_style.css_attributes() {
        css_style.push_str(font_attr);
    }
    format!(r#"<span style="{css_style}">{escaped}</span>"#)
}

impl HtmlRenderer {
    /// Renders styled text to an HTML string, escaping the text again.
    pub fn render(&self, text: &StyledText<Style>, theme: &Theme) -> String {
        let default_style = theme.default_style();
        let content: String = text
            .iter()
            .map(|run| run_as_html(run, &default_style))
            .collect();

        let mut data_attrs = format!(r#"data-theme="{}""#, HtmlEscaped(&theme.name));
        for (key, value) in &self.other_metadata {
            // lowercase and replace non-alphanumeric chars with hyphens
            let slugified_key: String = key
                .to_lowercase()
                .chars()
                .map(|c| {
                    if c.is_alphanumeric() || c == '-' {
                        c
                    } else {
                        '-'
                    }
                })
                .collect();
            data_attrs.push_str(&format!(
                r#" data-{slugified_key}="{}""#,
                HtmlEscaped(value)
            ));
        }

        let fg = default_style.foreground.as_css_color_property();
        let bg = default_style.background.as_css_bg_color_property();
        format!(r#"<pre class="tinto" style="{fg} {bg}"><code {data_attrs}>{content}</code></pre>"#)
    }
}

// From syntect
pub(crate) struct HtmlEscaped<'a>(pub &'a str);
impl fmt::Display for HtmlEscaped<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self(s) = *self;
        let mut last = 0;
        for (i, ch) in s.bytes().enumerate() {
            let escaped = match ch {
                b'>' => "&gt;",
                b'<' => "&lt;",
                b'&' => "&amp;",
                b'\'' => "&#39;",
                b'"' => "&quot;",
                _ => continue,
            };
            fmt.write_str(&s[last..i])?;
            fmt.write_str(escaped)?;
            last = i + 1;
        }

        if last < s.len() {
            fmt.write_str(&s[last..])?;
        }
        Ok(())
    }
}
