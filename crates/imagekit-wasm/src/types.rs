//! WASM-compatible wrapper types.
//!
//! These wrap the core result types with getter-only JavaScript classes.

use std::fmt::Display;

use imagekit_core::page::{CompressedImage, RemovedBackground};
use imagekit_core::PaletteColor;
use wasm_bindgen::prelude::*;

/// Map any core error to a JavaScript string error.
pub(crate) fn js_error(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// One palette entry with every representation the page displays.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsPaletteColor {
    inner: PaletteColor,
}

#[wasm_bindgen]
impl JsPaletteColor {
    #[wasm_bindgen(getter)]
    pub fn r(&self) -> u8 {
        self.inner.rgb.r
    }

    #[wasm_bindgen(getter)]
    pub fn g(&self) -> u8 {
        self.inner.rgb.g
    }

    #[wasm_bindgen(getter)]
    pub fn b(&self) -> u8 {
        self.inner.rgb.b
    }

    /// `#rrggbb`
    #[wasm_bindgen(getter)]
    pub fn hex(&self) -> String {
        self.inner.hex.clone()
    }

    /// `rgb(r,g,b)`
    #[wasm_bindgen(getter)]
    pub fn rgb(&self) -> String {
        self.inner.rgb.css()
    }

    /// `hsl(h,s,l)`
    #[wasm_bindgen(getter)]
    pub fn hsl(&self) -> String {
        self.inner.hsl.css()
    }
}

impl From<PaletteColor> for JsPaletteColor {
    fn from(inner: PaletteColor) -> Self {
        Self { inner }
    }
}

/// A compressed image returned by [`compress_image`](crate::compress_image).
///
/// `bytes()` copies the encoded output into a `Uint8Array`.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsCompressedImage {
    pub(crate) bytes: Vec<u8>,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) mime_type: String,
}

#[wasm_bindgen]
impl JsCompressedImage {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    #[wasm_bindgen(getter, js_name = mimeType)]
    pub fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}

/// A processed file as listed in a page's result gallery.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsPageResult {
    name: String,
    url: String,
    size: usize,
    width: Option<u32>,
    height: Option<u32>,
    download_name: String,
}

#[wasm_bindgen]
impl JsPageResult {
    /// Name of the source file.
    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.name.clone()
    }

    /// Object URL of the result blob.
    #[wasm_bindgen(getter)]
    pub fn url(&self) -> String {
        self.url.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Output width, only known for compressed images.
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> Option<u32> {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> Option<u32> {
        self.height
    }

    #[wasm_bindgen(getter, js_name = downloadName)]
    pub fn download_name(&self) -> String {
        self.download_name.clone()
    }
}

impl From<&CompressedImage> for JsPageResult {
    fn from(image: &CompressedImage) -> Self {
        Self {
            name: image.original_name.clone(),
            url: image.url.to_string(),
            size: image.size,
            width: Some(image.width),
            height: Some(image.height),
            download_name: image.download_name(),
        }
    }
}

impl From<&RemovedBackground> for JsPageResult {
    fn from(image: &RemovedBackground) -> Self {
        Self {
            name: image.original_name.clone(),
            url: image.url.to_string(),
            size: image.size,
            width: None,
            height: None,
            download_name: image.download_name(),
        }
    }
}
