//! Image encoding.
//!
//! This module provides functionality for:
//! - Encoding RGBA images to JPEG with configurable quality
//! - Encoding RGBA images to PNG
//! - Encoding RGBA images to WebP, lossy with the `lossy-webp` feature
//!
//! # Examples
//!
//! ```ignore
//! use imagekit_core::decode::DecodedImage;
//! use imagekit_core::encode::{encode_image, OutputFormat};
//!
//! let image = DecodedImage::solid(100, 100, [128, 128, 128, 255]);
//! let bytes = encode_image(&image, OutputFormat::Webp, 80).unwrap();
//! ```

mod format;
mod jpeg;
mod png;
mod webp;

use thiserror::Error;

use crate::decode::DecodedImage;

pub use format::{OutputFormat, UnknownFormat};
pub use jpeg::encode_jpeg;
pub use png::encode_png;
pub use webp::encode_webp;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The codec rejected the image
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode an image in the requested format.
///
/// `quality` is a percentage (1-100). It drives JPEG and WebP quality and PNG
/// compression effort. Lossless WebP builds ignore it.
pub fn encode_image(
    image: &DecodedImage,
    format: OutputFormat,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    match format {
        OutputFormat::Jpg | OutputFormat::Jpeg => encode_jpeg(image, quality),
        OutputFormat::Png => encode_png(image, quality),
        OutputFormat::Webp => encode_webp(image, quality),
    }
}

fn validate(image: &DecodedImage) -> Result<(), EncodeError> {
    if image.width == 0 || image.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    let expected = image.pixel_count() * DecodedImage::CHANNELS;
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::probe_dimensions;

    #[test]
    fn test_every_format_decodes_back_to_same_size() {
        let img = DecodedImage::solid(17, 9, [30, 60, 90, 255]);
        for format in OutputFormat::ALL {
            let bytes = encode_image(&img, format, 75).unwrap();
            assert_eq!(probe_dimensions(&bytes).unwrap(), (17, 9), "{format}");
        }
    }

    #[test]
    fn test_encode_error_display() {
        let err = EncodeError::InvalidPixelData {
            expected: 16,
            actual: 12,
        };
        assert_eq!(
            err.to_string(),
            "Invalid pixel data: expected 16 bytes (width * height * 4), got 12"
        );
    }
}
