mod color;
mod compiled;
mod font_style;
mod raw;
mod selector;
mod set;

pub use color::Color;
pub use compiled::{Style, StyleModifier, Theme, ThemeRule};
pub use font_style::FontStyle;
pub use raw::{RawRule, RawTheme};
pub use selector::{ClassSet, Parent, ThemeSelector};
pub use set::ThemeSet;
