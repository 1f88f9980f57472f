//! Color representations shown for each palette entry.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// `#rrggbb`, lower-case, two zero-padded digits per channel.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse `#rrggbb` or `rrggbb`, case-insensitive.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hsl(self) -> Hsl {
        rgb_to_hsl(self)
    }

    /// CSS functional notation as copied to the clipboard: `rgb(r,g,b)`.
    pub fn css(self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.r, self.g, self.b)
    }
}

/// HSL with hue in whole degrees (0-360) and saturation/lightness in whole
/// percent (0-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

impl Hsl {
    /// CSS-like notation as copied to the clipboard: `hsl(h,s,l)`.
    pub fn css(self) -> String {
        format!("hsl({},{},{})", self.h, self.s, self.l)
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.h, self.s, self.l)
    }
}

/// Standard RGB to HSL conversion, rounded to whole units.
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = rgb.r as f64 / 255.0;
    let g = rgb.g as f64 / 255.0;
    let b = rgb.b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    let (h, s) = if max == min {
        (0.0, 0.0)
    } else {
        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        (h / 6.0, s)
    };

    Hsl {
        h: (h * 360.0).round() as u16,
        s: (s * 100.0).round() as u8,
        l: (l * 100.0).round() as u8,
    }
}

/// Hex string for an RGB triple, see [`Rgb::to_hex`].
pub fn rgb_to_hex(rgb: Rgb) -> String {
    rgb.to_hex()
}

/// One entry of an extracted palette, with every representation the page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteColor {
    pub rgb: Rgb,
    pub hex: String,
    pub hsl: Hsl,
}

impl From<Rgb> for PaletteColor {
    fn from(rgb: Rgb) -> Self {
        Self {
            rgb,
            hex: rgb.to_hex(),
            hsl: rgb.to_hsl(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_zero_pads() {
        assert_eq!(Rgb::new(0, 0, 0).to_hex(), "#000000");
        assert_eq!(Rgb::new(1, 10, 255).to_hex(), "#010aff");
    }

    #[test]
    fn test_hex_parse_is_case_insensitive() {
        assert_eq!(Rgb::from_hex("#010AFF"), Some(Rgb::new(1, 10, 255)));
        assert_eq!(Rgb::from_hex("010aff"), Some(Rgb::new(1, 10, 255)));
        assert_eq!(Rgb::from_hex("#12345"), None);
        assert_eq!(Rgb::from_hex("#zzzzzz"), None);
    }

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(rgb_to_hsl(Rgb::new(255, 0, 0)), Hsl { h: 0, s: 100, l: 50 });
        assert_eq!(rgb_to_hsl(Rgb::new(0, 255, 0)), Hsl { h: 120, s: 100, l: 50 });
        assert_eq!(rgb_to_hsl(Rgb::new(0, 0, 255)), Hsl { h: 240, s: 100, l: 50 });
    }

    #[test]
    fn test_hsl_greys_have_no_hue() {
        assert_eq!(rgb_to_hsl(Rgb::new(0, 0, 0)), Hsl { h: 0, s: 0, l: 0 });
        assert_eq!(rgb_to_hsl(Rgb::new(255, 255, 255)), Hsl { h: 0, s: 0, l: 100 });
        assert_eq!(rgb_to_hsl(Rgb::new(128, 128, 128)), Hsl { h: 0, s: 0, l: 50 });
    }

    #[test]
    fn test_hsl_magenta_wraps_hue() {
        // max == r with g < b takes the +6 branch
        assert_eq!(rgb_to_hsl(Rgb::new(255, 0, 128)).h, 330);
    }

    #[test]
    fn test_clipboard_notations() {
        let rgb = Rgb::new(255, 0, 0);
        assert_eq!(rgb.css(), "rgb(255,0,0)");
        assert_eq!(rgb.to_hsl().css(), "hsl(0,100,50)");
        assert_eq!(rgb.to_string(), "255, 0, 0");
    }

    #[test]
    fn test_palette_color_from_rgb() {
        let color = PaletteColor::from(Rgb::new(18, 52, 86));
        assert_eq!(color.hex, "#123456");
        assert_eq!(color.hsl, Hsl { h: 210, s: 65, l: 20 });
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Reference conversion using the sector formulation of hue.
    fn reference_hsl(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
        let (r, g, b) = (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let c = max - min;
        let l = (max + min) / 2.0;
        if c == 0.0 {
            return (0.0, 0.0, l * 100.0);
        }
        let h = if max == r {
            60.0 * ((g - b) / c).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / c + 2.0)
        } else {
            60.0 * ((r - g) / c + 4.0)
        };
        let s = c / (1.0 - (2.0 * l - 1.0).abs());
        (h, s * 100.0, l * 100.0)
    }

    proptest! {
        /// Property: hex digits decode back to the same channels.
        #[test]
        fn prop_hex_matches_channels(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            let hex = Rgb::new(r, g, b).to_hex();
            prop_assert_eq!(hex.len(), 7);
            prop_assert_eq!(u8::from_str_radix(&hex[1..3], 16).unwrap(), r);
            prop_assert_eq!(u8::from_str_radix(&hex[3..5], 16).unwrap(), g);
            prop_assert_eq!(u8::from_str_radix(&hex[5..7], 16).unwrap(), b);
            prop_assert_eq!(Rgb::from_hex(&hex.to_uppercase()), Some(Rgb::new(r, g, b)));
        }

        /// Property: HSL agrees with the reference within one unit.
        #[test]
        fn prop_hsl_matches_reference(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            let hsl = rgb_to_hsl(Rgb::new(r, g, b));
            let (h, s, l) = reference_hsl(r, g, b);

            let hue_diff = (hsl.h as f64 - h).abs();
            prop_assert!(hue_diff <= 1.0 || (360.0 - hue_diff) <= 1.0, "hue {} vs {}", hsl.h, h);
            prop_assert!((hsl.s as f64 - s).abs() <= 1.0, "sat {} vs {}", hsl.s, s);
            prop_assert!((hsl.l as f64 - l).abs() <= 1.0, "light {} vs {}", hsl.l, l);
            prop_assert!(hsl.h <= 360 && hsl.s <= 100 && hsl.l <= 100);
        }
    }
}
