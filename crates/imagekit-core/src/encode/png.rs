//! PNG encoding.
//!
//! PNG is lossless, so quality only picks the deflate effort: a low quality
//! selects the slower, stronger setting.

use std::io::Cursor;

use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};

use super::{validate, EncodeError};
use crate::decode::DecodedImage;

/// Quality at or below which PNG switches to best compression.
const PNG_BEST_COMPRESSION_AT_OR_BELOW: u8 = 50;

/// Encode an RGBA image to PNG bytes.
pub fn encode_png(image: &DecodedImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    validate(image)?;

    let compression = if quality <= PNG_BEST_COMPRESSION_AT_OR_BELOW {
        CompressionType::Best
    } else {
        CompressionType::Default
    };

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new_with_quality(&mut buffer, compression, PngFilter::Adaptive)
        .write_image(
            &image.pixels,
            image.width,
            image.height,
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_png_signature() {
        let img = DecodedImage::solid(8, 8, [0, 0, 0, 0]);
        let png = encode_png(&img, 80).unwrap();
        assert_eq!(&png[0..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_png_round_trip_keeps_alpha() {
        let img = DecodedImage::solid(3, 3, [200, 100, 50, 7]);
        let png = encode_png(&img, 20).unwrap();
        let decoded = crate::decode::decode_image(&png).unwrap();
        assert_eq!(decoded, img);
    }

    #[test]
    fn test_low_quality_selects_best_compression() {
        let mut img = DecodedImage::solid(64, 64, [0, 0, 0, 255]);
        for (i, px) in img.pixels.chunks_exact_mut(4).enumerate() {
            px[0] = (i % 64) as u8 * 4;
            px[1] = (i / 64) as u8 * 4;
        }
        let default = encode_png(&img, 80).unwrap();
        let best = encode_png(&img, 50).unwrap();
        assert!(best.len() <= default.len());
        assert_eq!(crate::decode::decode_image(&best).unwrap(), img);
    }

    #[test]
    fn test_invalid_dimensions_rejected() {
        let img = DecodedImage {
            width: 5,
            height: 0,
            pixels: vec![],
        };
        assert!(encode_png(&img, 80).is_err());
    }
}
