//! Compression WASM bindings.
//!
//! Settings are passed as a plain object mirroring `CompressionSettings`;
//! missing fields take their defaults.
//!
//! # Example
//!
//! ```typescript
//! import { compress_image, compressed_file_name } from '@imagekit/wasm';
//!
//! const settings = { format: 'webp', quality: 50, resize: { mode: 'preset', value: 'fullhd' } };
//! const out = compress_image(bytes, file.type, settings);
//! const name = compressed_file_name(file.name, out.width, out.height, 'webp');
//! ```

use imagekit_core::compress::{CompressError, CompressionSettings, Compressor, ImageCompressor};
use imagekit_core::decode::probe_dimensions;
use imagekit_core::download::compressed_name;
use imagekit_core::encode::OutputFormat;
use imagekit_core::page::PageError;
use imagekit_core::InputFile;
use wasm_bindgen::prelude::*;

use crate::types::{js_error, JsCompressedImage};

/// Read settings from JS; `undefined` and `null` mean defaults.
pub(crate) fn settings_from_js(value: JsValue) -> Result<CompressionSettings, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(CompressionSettings::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(js_error)
}

pub(crate) fn compress_with(
    bytes: &[u8],
    mime_type: &str,
    settings: &CompressionSettings,
) -> Result<JsCompressedImage, PageError> {
    let options = settings.resolve()?;
    let file = InputFile::new("input", mime_type, bytes.to_vec());
    let output = ImageCompressor::default().compress(&file, &options)?;
    let (width, height) = probe_dimensions(&output).map_err(|source| CompressError::Decode {
        name: file.name().to_string(),
        source,
    })?;
    Ok(JsCompressedImage {
        bytes: output,
        width,
        height,
        mime_type: settings.format.mime_type().to_string(),
    })
}

/// Resize and re-encode one image.
///
/// # Errors
///
/// Returns an error for invalid settings or undecodable input.
#[wasm_bindgen]
pub fn compress_image(bytes: &[u8], mime_type: &str, settings: JsValue) -> Result<JsCompressedImage, JsValue> {
    let settings = settings_from_js(settings)?;
    compress_with(bytes, mime_type, &settings).map_err(js_error)
}

/// `<stem>_<width>x<height>.<format>`
#[wasm_bindgen]
pub fn compressed_file_name(original: &str, width: u32, height: u32, format: &str) -> Result<String, JsValue> {
    let format: OutputFormat = format.parse().map_err(js_error)?;
    Ok(compressed_name(original, width, height, format))
}

/// `[width, height]` read from the image header, after EXIF orientation.
#[wasm_bindgen]
pub fn image_dimensions(bytes: &[u8]) -> Result<Vec<u32>, JsValue> {
    let (width, height) = probe_dimensions(bytes).map_err(js_error)?;
    Ok(vec![width, height])
}

#[cfg(test)]
mod tests {
    use super::*;
    use imagekit_core::compress::{ResizeMode, ResolutionPreset};
    use imagekit_core::encode::encode_png;
    use imagekit_core::DecodedImage;

    fn png(width: u32, height: u32) -> Vec<u8> {
        encode_png(&DecodedImage::solid(width, height, [10, 200, 30, 255]), 80).unwrap()
    }

    #[test]
    fn test_compress_with_defaults() {
        let out = compress_with(&png(30, 20), "image/png", &CompressionSettings::default()).unwrap();
        assert_eq!((out.width(), out.height()), (30, 20));
        assert_eq!(out.mime_type(), "image/jpeg");
        assert_eq!(&out.bytes()[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_compress_with_preset() {
        let settings = CompressionSettings {
            format: OutputFormat::Png,
            resize: ResizeMode::Preset(ResolutionPreset::Hd),
            ..Default::default()
        };
        let out = compress_with(&png(1440, 900), "image/png", &settings).unwrap();
        assert_eq!((out.width(), out.height()), (720, 450));
    }

    #[test]
    fn test_compress_with_invalid_input() {
        let settings = CompressionSettings {
            resize: ResizeMode::Manual(10),
            ..Default::default()
        };
        assert!(matches!(
            compress_with(&png(4, 4), "image/png", &settings),
            Err(PageError::Settings(_))
        ));
    }

    #[test]
    fn test_compress_with_undecodable_input() {
        let err = compress_with(b"junk", "image/png", &CompressionSettings::default()).unwrap_err();
        assert!(matches!(
            err,
            PageError::Compress(CompressError::Decode { ref name, .. }) if name == "input"
        ));
    }

    #[test]
    fn test_compressed_file_name() {
        assert_eq!(
            compressed_file_name("holiday.photo.jpg", 800, 600, "webp").unwrap(),
            "holiday.photo_800x600.webp"
        );
    }

    #[test]
    fn test_image_dimensions() {
        assert_eq!(image_dimensions(&png(7, 3)).unwrap(), vec![7, 3]);
    }
}
