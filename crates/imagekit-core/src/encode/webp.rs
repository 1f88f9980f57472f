//! WebP encoding.
//!
//! With the `lossy-webp` feature images are encoded lossy through libwebp at
//! the requested quality. Without it (wasm32 builds) the `image` crate's
//! lossless encoder is used and quality has no effect.

use super::{validate, EncodeError};
use crate::decode::DecodedImage;

/// Encode an RGBA image to WebP bytes.
///
/// `quality` is clamped to 1-100.
pub fn encode_webp(image: &DecodedImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    validate(image)?;
    encode_validated(image, quality.clamp(1, 100))
}

#[cfg(feature = "lossy-webp")]
fn encode_validated(image: &DecodedImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let encoder = ::webp::Encoder::from_rgba(&image.pixels, image.width, image.height);
    let memory = encoder
        .encode_simple(false, quality as f32)
        .map_err(|e| EncodeError::EncodingFailed(format!("{e:?}")))?;
    Ok(memory.to_vec())
}

#[cfg(not(feature = "lossy-webp"))]
fn encode_validated(image: &DecodedImage, _quality: u8) -> Result<Vec<u8>, EncodeError> {
    use std::io::Cursor;

    use image::codecs::webp::WebPEncoder;
    use image::{ExtendedColorType, ImageEncoder};

    let mut buffer = Cursor::new(Vec::new());
    WebPEncoder::new_lossless(&mut buffer)
        .write_image(
            &image.pixels,
            image.width,
            image.height,
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
