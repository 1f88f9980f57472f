//! JPEG encoding.
//!
//! JPEG has no alpha channel, so transparent pixels are composited over a
//! white background before encoding, the same way a canvas export does.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::{validate, EncodeError};
use crate::decode::DecodedImage;

/// Encode an RGBA image to JPEG bytes.
///
/// # Arguments
///
/// * `image` - RGBA source image
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// Out-of-range quality values are clamped.
///
/// # Quality Guidelines
///
/// * 90-100: High quality
/// * 60-90: Good quality, recommended for most uses
/// * Below 60: Low quality, visible artifacts
pub fn encode_jpeg(image: &DecodedImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    validate(image)?;

    let quality = quality.clamp(1, 100);
    let rgb = flatten_over_white(&image.pixels);

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(&rgb, image.width, image.height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Drop the alpha channel by blending each pixel over white.
fn flatten_over_white(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        let alpha = px[3] as u32;
        for &channel in &px[..3] {
            let blended = (channel as u32 * alpha + 255 * (255 - alpha) + 127) / 255;
            rgb.push(blended as u8);
        }
    }
    rgb
}
