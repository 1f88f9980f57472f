//! Pixel sampling for quantization.

use super::Rgb;
use crate::decode::DecodedImage;

/// Collect the RGB triple of every pixel in an RGBA buffer.
///
/// The buffer is walked with a stride of 4 and the alpha byte is skipped, so
/// fully transparent pixels contribute their stored color like any other.
/// A trailing partial pixel is ignored.
pub fn sample_rgba(pixels: &[u8]) -> Vec<Rgb> {
    pixels
        .chunks_exact(DecodedImage::CHANNELS)
        .map(|px| Rgb::new(px[0], px[1], px[2]))
        .collect()
}

/// Sample every pixel of a decoded image.
pub fn sample_image(image: &DecodedImage) -> Vec<Rgb> {
    sample_rgba(&image.pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_skips_alpha() {
        let pixels = [1, 2, 3, 0, 4, 5, 6, 255];
        assert_eq!(
            sample_rgba(&pixels),
            vec![Rgb::new(1, 2, 3), Rgb::new(4, 5, 6)]
        );
    }

    #[test]
    fn test_sample_covers_every_pixel() {
        let img = DecodedImage::solid(7, 3, [9, 9, 9, 9]);
        assert_eq!(sample_image(&img).len(), 21);
    }

    #[test]
    fn test_sample_ignores_partial_pixel() {
        assert_eq!(sample_rgba(&[1, 2, 3, 4, 5, 6]).len(), 1);
        assert!(sample_rgba(&[]).is_empty());
    }
}
