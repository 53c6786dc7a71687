use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Debug,
)]
pub struct FontStyle {
    bits: u8,
}

impl FontStyle {
    /// Bold font style
    pub const BOLD: Self = Self { bits: 1 };
    /// Underline font style
    pub const UNDERLINE: Self = Self { bits: 2 };
    /// Italic font style
    pub const ITALIC: Self = Self { bits: 4 };

    /// Returns an empty set of flags
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Returns `true` if no flags are currently stored
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Returns `true` if all of the flags in `other` are contained within `self`
    pub const fn contains(&self, other: Self) -> bool {
        (self.bits & other.bits) == other.bits
    }

    /// Inserts the specified flags in-place
    pub fn insert(&mut self, other: Self) {
        self.bits |= other.bits;
    }

    /// Removes the specified flags in-place
    pub fn remove(&mut self, other: Self) {
        self.bits &= !other.bits;
    }

    /// The CSS declarations needed to render these flags inline
    pub fn css_attributes(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.contains(FontStyle::BOLD) {
            out.push("font-weight: bold;");
        }
        if self.contains(FontStyle::ITALIC) {
            out.push("font-style: italic;");
        }
        if self.contains(FontStyle::UNDERLINE) {
            out.push("text-decoration: underline;");
        }
        out
    }

    /// The SGR parameters for these flags
    pub(crate) fn ansi_codes(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.contains(FontStyle::BOLD) {
            out.push("1");
        }
        if self.contains(FontStyle::ITALIC) {
            out.push("3");
        }
        if self.contains(FontStyle::UNDERLINE) {
            out.push("4");
        }
        out
    }
}

/// What a single CSS declaration does to the font style: `Some(true)` sets the flag,
/// `Some(false)` clears it and `None` means the declaration isn't about that flag.
pub(crate) fn font_flag_from_css(property: &str, value: &str) -> Option<(FontStyle, bool)> {
    let value = value.trim().to_ascii_lowercase();
    match property {
        "font-weight" => {
            let bold = match value.as_str() {
                "bold" | "bolder" => true,
                "normal" | "lighter" => false,
                v => v.parse::<u16>().ok()? >= 600,
            };
            Some((FontStyle::BOLD, bold))
        }
        "font-style" => Some((FontStyle::ITALIC, value.contains("italic") || value == "oblique")),
        "text-decoration" | "text-decoration-line" => {
            Some((FontStyle::UNDERLINE, value.contains("underline")))
        }
        _ => None,
    }
}
