//! Color types and the heatmap palette.
//!
//! # References
//!
//! - Brewer, C. A. (2003). ColorBrewer: "Spectral" diverging scheme, 9 classes.

use crate::error::{Error, Result};

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse `#rrggbb` (or `rrggbb`) into an opaque color.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] if the string is not six hex digits.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(hex.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| Error::InvalidColor(hex.to_string()))
        };

        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lowercase `#rrggbb` form, alpha dropped.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS color string, `#rrggbb` when opaque and `rgba(...)` otherwise.
    #[must_use]
    pub fn to_css(self) -> String {
        if self.a == 255 {
            self.to_hex()
        } else {
            format!(
                "rgba({},{},{},{:.3})",
                self.r,
                self.g,
                self.b,
                f32::from(self.a) / 255.0
            )
        }
    }
}

/// ColorBrewer Spectral-9 in its published (warm-to-cool) order.
const SPECTRAL_9: [Rgba; 9] = [
    Rgba::rgb(0xd5, 0x3e, 0x4f),
    Rgba::rgb(0xf4, 0x6d, 0x43),
    Rgba::rgb(0xfd, 0xae, 0x61),
    Rgba::rgb(0xfe, 0xe0, 0x8b),
    Rgba::rgb(0xff, 0xff, 0xbf),
    Rgba::rgb(0xe6, 0xf5, 0x98),
    Rgba::rgb(0xab, 0xdd, 0xa4),
    Rgba::rgb(0x66, 0xc2, 0xa5),
    Rgba::rgb(0x32, 0x88, 0xbd),
];

/// An ordered list of bin colors, coolest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgba>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::spectral_reversed()
    }
}

impl Palette {
    /// Spectral-9 reversed, so index 0 is the coolest (blue) bin and the last
    /// index the warmest (red) one.
    #[must_use]
    pub fn spectral_reversed() -> Self {
        let mut colors = SPECTRAL_9.to_vec();
        colors.reverse();
        Self { colors }
    }

    /// Build a palette from hex strings.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty or any entry fails to parse.
    pub fn from_hex<S: AsRef<str>>(colors: &[S]) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::InvalidColor("palette requires at least one color".to_string()));
        }
        let colors = colors
            .iter()
            .map(|c| Rgba::from_hex(c.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { colors })
    }

    /// Colors in bin order.
    #[must_use]
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    /// Number of bins the palette colors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the palette has no colors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_constants() {
        assert_eq!(Rgba::BLACK, Rgba::rgb(0, 0, 0));
        assert_eq!(Rgba::WHITE, Rgba::rgb(255, 255, 255));
        assert_eq!(Rgba::TRANSPARENT.a, 0);
    }

    #[test]
    fn test_from_hex() {
        let c = Rgba::from_hex("#3288bd").unwrap();
        assert_eq!(c, Rgba::rgb(0x32, 0x88, 0xbd));
        assert_eq!(Rgba::from_hex("d53e4f").unwrap(), Rgba::rgb(213, 62, 79));
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(Rgba::from_hex("#12345").is_err());
        assert!(Rgba::from_hex("#zzzzzz").is_err());
        assert!(Rgba::from_hex("").is_err());
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(Rgba::rgb(0xfe, 0xe0, 0x8b).to_hex(), "#fee08b");
    }

    #[test]
    fn test_to_css_alpha() {
        let css = Rgba::new(255, 0, 0, 128).to_css();
        assert!(css.starts_with("rgba"));
        assert!(css.contains("0.502"));
        assert_eq!(Rgba::WHITE.to_css(), "#ffffff");
    }

    #[test]
    fn test_spectral_reversed_order() {
        let palette = Palette::spectral_reversed();
        assert_eq!(palette.len(), 9);
        assert_eq!(palette.colors()[0].to_hex(), "#3288bd");
        assert_eq!(palette.colors()[4].to_hex(), "#ffffbf");
        assert_eq!(palette.colors()[8].to_hex(), "#d53e4f");
    }

    #[test]
    fn test_palette_from_hex() {
        let palette = Palette::from_hex(&["#000000", "#ffffff"]).unwrap();
        assert_eq!(palette.colors(), &[Rgba::BLACK, Rgba::WHITE]);

        let empty: [&str; 0] = [];
        assert!(Palette::from_hex(&empty).is_err());
        assert!(Palette::from_hex(&["nope"]).is_err());
    }
}
