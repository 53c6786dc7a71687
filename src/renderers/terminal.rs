use crate::styled::StyledText;
use crate::themes::{Style, Theme};

/// Terminal renderer via ANSI escape codes. Requires a terminal that supports truecolor
#[derive(Default, Copy, Clone, PartialEq, Eq, Debug)]
pub struct TerminalRenderer {
    /// Also paint the theme background, most terminal themes look better without it
    pub with_background: bool,
}

impl TerminalRenderer {
    /// Render to the terminal with ANSI escape codes
    pub fn render(&self, text: &StyledText<Style>, theme: &Theme) -> String {
        let default_style = theme.default_style();
        let mut output = String::with_capacity(text.len() * 2);

        for run in text {
            let style = run.style;
            let mut params = Vec::new();

            let mut fg = String::new();
            style.foreground.as_ansi_fg(&mut fg);
            params.push(fg);
            if self.with_background || style.background != default_style.background {
                let mut bg = String::new();
                style.background.as_ansi_bg(&mut bg);
                params.push(bg);
            }
            params.extend(style.font_style.ansi_codes().into_iter().map(String::from));

            output.push_str("\x1b[");
            output.push_str(&params.join(";"));
            output.push('m');
            output.push_str(&run.text);
            // reset
            output.push_str("\x1b[0m");
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::convert;

    #[test]
    fn test_ansi_output() {
        let theme = Theme::from_css(
            "t",
            ".hljs { color: #ffffff; background: #000000; } .hljs-keyword { color: #ff0000; font-style: italic; } .hljs-addition { background: #00ff00; }",
        );
        let text = convert(
            r#"<span class="hljs-keyword">fn</span> x<span class="hljs-addition">+</span>"#,
            &theme,
        );

        let ansi = TerminalRenderer::default().render(&text, &theme);
        assert_eq!(
            ansi,
            "\x1b[38;2;255;0;0;3mfn\x1b[0m\x1b[38;2;255;255;255m x\x1b[0m\x1b[38;2;255;255;255;48;2;0;255;0m+\x1b[0m"
        );

        let ansi = TerminalRenderer {
            with_background: true,
        }
        .render(&text, &theme);
        assert!(ansi.starts_with("\x1b[38;2;255;0;0;48;2;0;0;0;3mfn"));
    }
}
