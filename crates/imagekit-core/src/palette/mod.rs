//! Color palette extraction.
//!
//! An image is decoded into an RGBA buffer, every pixel is sampled into a flat
//! list of RGB triples, and the sample is handed to a [`Quantizer`] configured
//! for the requested color count. Each palette entry carries its hex and HSL
//! representations.

mod color;
mod quantize;
mod sample;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::DecodedImage;

pub use color::{rgb_to_hex, rgb_to_hsl, Hsl, PaletteColor, Rgb};
pub use quantize::{MedianCut, NeuQuantizer, Quantizer};
pub use sample::{sample_image, sample_rgba};

/// Errors raised by palette extraction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaletteError {
    #[error("Color count must be between {min} and {max}, got {0}", min = ColorCount::MIN, max = ColorCount::MAX)]
    ColorCountOutOfRange(u8),
}

/// Number of palette colors requested, always within 1-10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ColorCount(u8);

impl ColorCount {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(count: u8) -> Result<Self, PaletteError> {
        if (Self::MIN..=Self::MAX).contains(&count) {
            Ok(Self(count))
        } else {
            Err(PaletteError::ColorCountOutOfRange(count))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for ColorCount {
    fn default() -> Self {
        Self(5)
    }
}

impl TryFrom<u8> for ColorCount {
    type Error = PaletteError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ColorCount> for u8 {
    fn from(count: ColorCount) -> Self {
        count.0
    }
}

impl fmt::Display for ColorCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Extract a palette from a decoded image.
///
/// The full pixel buffer is re-sampled on every call.
pub fn extract_palette(
    image: &DecodedImage,
    count: ColorCount,
    quantizer: &dyn Quantizer,
) -> Vec<PaletteColor> {
    let sample = sample_image(image);
    quantizer
        .quantize(&sample, count.get() as usize)
        .into_iter()
        .map(PaletteColor::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quadrants() -> DecodedImage {
        let colors = [[255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255], [255, 255, 0, 255]];
        let mut pixels = Vec::new();
        for y in 0..8u32 {
            for x in 0..8u32 {
                let quadrant = (y / 4 * 2 + x / 4) as usize;
                pixels.extend_from_slice(&colors[quadrant]);
            }
        }
        DecodedImage::new(8, 8, pixels)
    }

    #[test]
    fn test_color_count_bounds() {
        assert!(ColorCount::new(0).is_err());
        assert!(ColorCount::new(11).is_err());
        assert_eq!(ColorCount::new(10).unwrap().get(), 10);
        assert_eq!(ColorCount::default().get(), 5);
    }

    #[test]
    fn test_color_count_error_message() {
        assert_eq!(
            ColorCount::new(42).unwrap_err().to_string(),
            "Color count must be between 1 and 10, got 42"
        );
    }

    #[test]
    fn test_extract_exact_count() {
        let palette = extract_palette(&quadrants(), ColorCount::new(4).unwrap(), &MedianCut);
        assert_eq!(palette.len(), 4);
        for entry in &palette {
            assert_eq!(entry.hex, entry.rgb.to_hex());
        }
    }

    #[test]
    fn test_extract_fewer_when_not_enough_colors() {
        let palette = extract_palette(&quadrants(), ColorCount::new(10).unwrap(), &MedianCut);
        assert_eq!(palette.len(), 4);
    }

    #[test]
    fn test_extract_single_color() {
        let palette = extract_palette(&quadrants(), ColorCount::new(1).unwrap(), &MedianCut);
        assert_eq!(palette.len(), 1);
        // Mean of red, green, blue and yellow quadrants.
        assert_eq!(palette[0].rgb, Rgb::new(128, 128, 64));
    }
}
