use serde::{Deserialize, Serialize};

use crate::error::{Error, TintoResult};

/// RGBA color with 8-bit components
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub struct Color {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

fn parse_hex_component(hex: &str, original: &str) -> TintoResult<u8> {
    u8::from_str_radix(hex, 16).map_err(|_| Error::InvalidColor {
        value: original.to_string(),
        reason: format!("invalid hex component '{}'", hex),
    })
}

impl Color {
    pub(crate) const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };
    pub(crate) const BLACK: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    /// Outputs the hex value for that colour.
    #[inline]
    pub fn as_hex(&self) -> String {
        if self.a < 255 {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        } else {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        }
    }

    #[inline]
    pub(crate) fn as_css_color_property(&self) -> String {
        format!("color: {};", self.as_hex())
    }

    #[inline]
    pub(crate) fn as_css_bg_color_property(&self) -> String {
        format!("background-color: {};", self.as_hex())
    }

    /// Writes the `38;2;r;g;b` truecolor foreground parameters, without the CSI.
    pub(crate) fn as_ansi_fg(&self, out: &mut String) {
        out.push_str(&format!("38;2;{};{};{}", self.r, self.g, self.b));
    }

    /// Writes the `48;2;r;g;b` truecolor background parameters, without the CSI.
    pub(crate) fn as_ansi_bg(&self, out: &mut String) {
        out.push_str(&format!("48;2;{};{};{}", self.r, self.g, self.b));
    }

    /// Creates a Color from a string (in theory a hex but it can also be black/white).
    ///
    /// Errors if the string is not a valid hex colour.
    pub fn from_hex(hex: &str) -> TintoResult<Self> {
        let original = hex;
        let hex = hex.trim_start_matches('#');

        if hex.eq_ignore_ascii_case("white") {
            return Ok(Color::WHITE);
        } else if hex.eq_ignore_ascii_case("black") {
            return Ok(Color::BLACK);
        }
        if !hex.is_ascii() {
            return Err(Error::InvalidColor {
                value: original.to_string(),
                reason: "non ascii characters".to_string(),
            });
        }

        match hex.len() {
            // #RGB and #RGBA
            3 | 4 => {
                let mut parts = [255u8; 4];
                for (i, part) in parts.iter_mut().enumerate().take(hex.len()) {
                    *part = parse_hex_component(&hex[i..i + 1], original)? * 17;
                }
                let [r, g, b, a] = parts;
                Ok(Color { r, g, b, a })
            }
            // #RRGGBB and #RRGGBBAA
            6 | 8 => {
                let mut parts = [255u8; 4];
                for (i, part) in parts.iter_mut().enumerate().take(hex.len() / 2) {
                    *part = parse_hex_component(&hex[i * 2..i * 2 + 2], original)?;
                }
                let [r, g, b, a] = parts;
                Ok(Color { r, g, b, a })
            }
            _ => Err(Error::InvalidColor {
                value: original.to_string(),
                reason: format!("invalid length {}", hex.len()),
            }),
        }
    }

    /// Parses a CSS color value as found in highlight.js themes: hex, `white`/`black`
    /// or `rgb(r, g, b)`.
    pub fn from_css(value: &str) -> TintoResult<Self> {
        let value = value.trim();
        let Some(args) = value
            .strip_prefix("rgb(")
            .and_then(|v| v.strip_suffix(')'))
        else {
            if value.starts_with('#')
                || value.eq_ignore_ascii_case("white")
                || value.eq_ignore_ascii_case("black")
            {
                return Color::from_hex(value);
            }
            return Err(Error::InvalidColor {
                value: value.to_string(),
                reason: "unsupported color syntax".to_string(),
            });
        };

        let components = args
            .split(',')
            .map(|c| c.trim().parse::<u8>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| Error::InvalidColor {
                value: value.to_string(),
                reason: e.to_string(),
            })?;
        match components.as_slice() {
            [r, g, b] => Ok(Color::rgb(*r, *g, *b)),
            _ => Err(Error::InvalidColor {
                value: value.to_string(),
                reason: format!("expected 3 components, got {}", components.len()),
            }),
        }
    }
}
