use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tinto::{
    HtmlRenderer, RenderMode, TerminalRenderer, ThemeSet, TokenizedMarkup, convert, wrap_document,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Terminal,
    Html,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    Fast,
    Document,
}

impl From<Mode> for RenderMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Fast => RenderMode::Fast,
            Mode::Document => RenderMode::Document,
        }
    }
}

/// Renders highlighter span markup with a highlight.js theme
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// File containing the markup, stdin if not given
    input: Option<PathBuf>,

    /// The input is a JSON result object (`{"value": ..., "language": ...}`) instead of raw markup
    #[arg(long)]
    json: bool,

    /// Directory containing the `.css` themes
    #[arg(long, default_value = "themes")]
    themes: PathBuf,

    /// Name of the theme to use
    #[arg(short, long, default_value = "pojoaque")]
    theme: String,

    #[arg(short, long, value_enum, default_value_t = Format::Terminal)]
    format: Format,

    /// `document` only wraps the markup in an HTML document with the theme style sheet
    #[arg(short, long, value_enum, default_value_t = Mode::Fast)]
    mode: Mode,

    /// List the available themes and exit
    #[arg(long)]
    list_themes: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let themes = ThemeSet::load_from_dir(&args.themes)?;

    if args.list_themes {
        for name in themes.names() {
            println!("{name}");
        }
        return Ok(());
    }

    let input = match &args.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let markup = if args.json {
        TokenizedMarkup::from_json(&input)?
    } else {
        TokenizedMarkup {
            value: input,
            language: None,
        }
    };
    if let Some(lang) = &markup.language {
        eprintln!("language: {lang}");
    }

    let theme = themes.get(&args.theme)?;
    match RenderMode::from(args.mode) {
        RenderMode::Document => println!("{}", wrap_document(&markup.value, theme.css())),
        RenderMode::Fast => {
            let text = convert(&markup.value, theme.as_ref());
            match args.format {
                Format::Terminal => println!("{}", TerminalRenderer::default().render(&text, &theme)),
                Format::Html => println!("{}", HtmlRenderer::default().render(&text, &theme)),
            }
        }
    }

    Ok(())
}
