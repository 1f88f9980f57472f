//! Background removal WASM bindings.

use imagekit_core::background::{BackgroundRemover, BorderKeyRemover};
use imagekit_core::download::removed_background_name;
use imagekit_core::InputFile;
use wasm_bindgen::prelude::*;

use crate::types::js_error;

/// Cut out the subject of one image and return PNG bytes with transparency.
///
/// `tolerance` is the RGB distance from the border color still treated as
/// background (default 48).
///
/// # Errors
///
/// Returns an error if the bytes are not a supported image.
#[wasm_bindgen]
pub fn remove_background(bytes: &[u8], tolerance: Option<f32>) -> Result<Vec<u8>, JsValue> {
    let remover = match tolerance {
        Some(tolerance) => BorderKeyRemover { tolerance },
        None => BorderKeyRemover::default(),
    };
    let file = InputFile::new("input", "image/png", bytes.to_vec());
    remover.remove_background(&file).map_err(js_error)
}

/// `<stem>_removedbg.png`
#[wasm_bindgen]
pub fn removed_background_file_name(original: &str) -> String {
    removed_background_name(original)
}

#[cfg(test)]
mod tests {
    use super::*;
    use imagekit_core::encode::encode_png;
    use imagekit_core::{decode_image, DecodedImage};

    #[test]
    fn test_remove_background_clears_uniform_border() {
        let mut image = DecodedImage::solid(5, 5, [240, 240, 240, 255]);
        let center = (2 * 5 + 2) * 4;
        image.pixels[center..center + 4].copy_from_slice(&[10, 10, 10, 255]);
        let png = encode_png(&image, 80).unwrap();

        let out = decode_image(&remove_background(&png, None).unwrap()).unwrap();
        assert_eq!(out.pixels[3], 0);
        assert_eq!(out.pixels[center + 3], 255);
    }

    #[test]
    fn test_zero_tolerance_keeps_near_matches() {
        let mut image = DecodedImage::solid(3, 3, [200, 200, 200, 255]);
        image.pixels[4..8].copy_from_slice(&[201, 200, 200, 255]);
        let png = encode_png(&image, 80).unwrap();

        let out = decode_image(&remove_background(&png, Some(0.0)).unwrap()).unwrap();
        assert_eq!(out.pixels[3], 0);
        assert_eq!(out.pixels[7], 255);
    }

    #[test]
    fn test_removed_background_file_name() {
        assert_eq!(removed_background_file_name("shoe.final.jpg"), "shoe.final_removedbg.png");
        assert_eq!(removed_background_file_name("noext"), "noext_removedbg.png");
    }
}
