//! Image resizing.
//!
//! All functions return new `DecodedImage` instances without modifying the input.

use super::{DecodeError, DecodedImage, FilterType};

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if either target edge is zero.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgba = image
        .to_rgba_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbaImage".to_string()))?;

    let resized = image::imageops::resize(&rgba, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgba_image(resized))
}

/// Resize an image so that its longest edge is at most `max_edge`.
///
/// Aspect ratio is preserved and images that already fit are returned
/// unchanged; nothing is ever upscaled.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if `max_edge` is zero.
pub fn resize_to_fit(
    image: &DecodedImage,
    max_edge: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if max_edge == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: max_edge,
            height: max_edge,
        });
    }

    let (new_width, new_height) = calculate_fit_dimensions(image.width, image.height, max_edge);
    resize(image, new_width, new_height, filter)
}

/// Calculate dimensions that fit within `max_edge` while preserving aspect ratio.
///
/// Returns the input unchanged when it already fits.
pub fn calculate_fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }
    if width <= max_edge && height <= max_edge {
        return (width, height);
    }

    let ratio = width as f64 / height as f64;

    if width >= height {
        let new_height = (max_edge as f64 / ratio).round() as u32;
        (max_edge, new_height.max(1))
    } else {
        let new_width = (max_edge as f64 * ratio).round() as u32;
        (new_width.max(1), max_edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(128);
                pixels.push(255);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_resize_basic() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 50, 25, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width, 50);
        assert_eq!(resized.height, 25);
        assert_eq!(resized.pixels.len(), 50 * 25 * 4);
    }

    #[test]
    fn test_resize_same_dimensions_is_identity() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 100, 50, FilterType::Bilinear).unwrap();
        assert_eq!(resized, img);
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let img = create_test_image(100, 50);

        assert!(resize(&img, 0, 50, FilterType::Bilinear).is_err());
        assert!(resize(&img, 50, 0, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_resize_to_fit_landscape() {
        let img = create_test_image(1920, 1280);
        let resized = resize_to_fit(&img, 720, FilterType::Lanczos3).unwrap();

        assert_eq!(resized.width, 720);
        assert_eq!(resized.height, 480);
    }

    #[test]
    fn test_resize_to_fit_portrait() {
        let img = create_test_image(400, 600);
        let resized = resize_to_fit(&img, 300, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width, 200);
        assert_eq!(resized.height, 300);
    }

    #[test]
    fn test_resize_to_fit_already_smaller() {
        let img = create_test_image(100, 50);
        let resized = resize_to_fit(&img, 1080, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width, 100);
        assert_eq!(resized.height, 50);
    }

    #[test]
    fn test_resize_to_fit_zero_max_edge_error() {
        let img = create_test_image(100, 50);
        assert!(resize_to_fit(&img, 0, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_calculate_fit_dimensions() {
        assert_eq!(calculate_fit_dimensions(6000, 4000, 2160), (2160, 1440));
        assert_eq!(calculate_fit_dimensions(4000, 6000, 2160), (1440, 2160));
        assert_eq!(calculate_fit_dimensions(4000, 4000, 1080), (1080, 1080));
        assert_eq!(calculate_fit_dimensions(0, 0, 256), (0, 0));
        assert_eq!(calculate_fit_dimensions(5000, 1, 100), (100, 1));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: fitted dimensions never exceed the bound and never grow.
        #[test]
        fn prop_fit_within_bound(
            width in 1u32..=8000,
            height in 1u32..=8000,
            max_edge in 1u32..=4000,
        ) {
            let (w, h) = calculate_fit_dimensions(width, height, max_edge);
            prop_assert!(w >= 1 && h >= 1);
            prop_assert!(w <= max_edge.max(1) && h <= max_edge.max(1));
            prop_assert!(w <= width && h <= height);
        }

        /// Property: images that already fit keep their size.
        #[test]
        fn prop_fitting_images_untouched(
            width in 1u32..=2000,
            height in 1u32..=2000,
        ) {
            let max_edge = width.max(height);
            prop_assert_eq!(calculate_fit_dimensions(width, height, max_edge), (width, height));
        }
    }
}
