//! Renders the span markup of highlight.js style highlighters into styled text runs.
//!
//! The markup is scanned once, every text run being styled by a [`StyleResolver`] from the
//! stack of scopes enclosing it, and character references are decoded afterwards.

mod document;
mod entities;
mod error;
mod highlighter;
mod markup;
mod renderers;
mod resolver;
mod styled;
mod themes;

pub use document::{DocumentRenderer, wrap_document};
pub use entities::{EntityMatch, decode_entities, decode_entity, find_entities};
pub use error::Error;
pub use highlighter::{Highlighted, Highlighter, RenderMode, TokenizedMarkup, Tokenizer};
pub use markup::{ScopeStack, convert, scan};
pub use renderers::{html::HtmlRenderer, terminal::TerminalRenderer};
pub use resolver::{BASE_SCOPE, StyleResolver};
pub use styled::{StyledRun, StyledText};
pub use themes::{
    ClassSet, Color, FontStyle, Parent, RawRule, RawTheme, Style, StyleModifier, Theme, ThemeRule,
    ThemeSelector, ThemeSet,
};
