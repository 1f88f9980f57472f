//! Palette extraction WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { extract_palette } from '@imagekit/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! for (const color of extract_palette(bytes, 5)) {
//!   console.log(color.hex, color.rgb, color.hsl);
//! }
//! ```

use imagekit_core::page::INVALID_IMAGE_MESSAGE;
use imagekit_core::palette::{self, ColorCount, MedianCut, Rgb};
use imagekit_core::{decode_image, PageError};
use wasm_bindgen::prelude::*;

use crate::types::{js_error, JsPaletteColor};

fn palette_from_bytes(bytes: &[u8], color_count: u8) -> Result<Vec<JsPaletteColor>, PageError> {
    let count = ColorCount::new(color_count)?;
    let image = decode_image(bytes)
        .map_err(|e| PageError::Validation(format!("{INVALID_IMAGE_MESSAGE} ({e})")))?;
    Ok(palette::extract_palette(&image, count, &MedianCut)
        .into_iter()
        .map(JsPaletteColor::from)
        .collect())
}

/// Decode an image and extract `color_count` (1-10) representative colors,
/// most common first.
///
/// # Errors
///
/// Returns an error if the count is out of range or the bytes are not a
/// supported image.
#[wasm_bindgen]
pub fn extract_palette(bytes: &[u8], color_count: u8) -> Result<Vec<JsPaletteColor>, JsValue> {
    palette_from_bytes(bytes, color_count).map_err(js_error)
}

/// `#rrggbb` for an RGB triple.
#[wasm_bindgen]
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    palette::rgb_to_hex(Rgb::new(r, g, b))
}

/// `[h, s, l]` with hue in degrees and saturation/lightness in percent.
#[wasm_bindgen]
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Vec<u16> {
    let hsl = palette::rgb_to_hsl(Rgb::new(r, g, b));
    vec![hsl.h, hsl.s.into(), hsl.l.into()]
}
