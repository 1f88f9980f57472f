//! Page classes for the three tools.
//!
//! Each class wraps a core page wired to the browser capabilities, so object
//! URLs, clipboard writes and downloads go straight to the window.
//!
//! # Example
//!
//! ```typescript
//! import { CompressionPage } from '@imagekit/wasm';
//!
//! const page = new CompressionPage();
//! for (const file of input.files) {
//!   page.addFile(file.name, file.type, new Uint8Array(await file.arrayBuffer()));
//! }
//! page.setSettings({ format: 'webp', quality: 50 });
//! page.process();
//! page.results().forEach((r) => console.log(r.downloadName, r.url));
//! ```

use imagekit_core::background::BorderKeyRemover;
use imagekit_core::compress::ImageCompressor;
use imagekit_core::page::{BackgroundRemovalPage, CompressionPage, PalettePage};
use imagekit_core::palette::NeuQuantizer;
use imagekit_core::InputFile;
use wasm_bindgen::prelude::*;

use crate::browser::browser_capabilities;
use crate::compress::settings_from_js;
use crate::types::{js_error, JsPageResult, JsPaletteColor};

/// Color palette page.
#[wasm_bindgen(js_name = PalettePage)]
pub struct JsPalettePage {
    inner: PalettePage,
}

#[wasm_bindgen(js_class = PalettePage)]
impl JsPalettePage {
    /// `quantizer` is `"mediancut"` (default) or `"neuquant"`.
    #[wasm_bindgen(constructor)]
    pub fn new(quantizer: Option<String>) -> Result<JsPalettePage, JsValue> {
        let caps = browser_capabilities();
        let inner = match quantizer.as_deref() {
            None | Some("mediancut") => PalettePage::new(caps),
            Some("neuquant") => PalettePage::with_quantizer(caps, Box::new(NeuQuantizer::default())),
            Some(other) => return Err(JsValue::from_str(&format!("Unknown quantizer: {other}"))),
        };
        Ok(Self { inner })
    }

    /// Upload an image and return its palette.
    pub fn upload(&mut self, name: &str, mime_type: &str, bytes: Vec<u8>) -> Result<Vec<JsPaletteColor>, JsValue> {
        let file = InputFile::new(name, mime_type, bytes);
        let palette = self.inner.upload(&file).map_err(js_error)?;
        Ok(palette.iter().cloned().map(JsPaletteColor::from).collect())
    }

    #[wasm_bindgen(js_name = setColorCount)]
    pub fn set_color_count(&mut self, count: u8) -> Result<Vec<JsPaletteColor>, JsValue> {
        let palette = self.inner.set_color_count(count).map_err(js_error)?;
        Ok(palette.iter().cloned().map(JsPaletteColor::from).collect())
    }

    #[wasm_bindgen(getter, js_name = colorCount)]
    pub fn color_count(&self) -> u8 {
        self.inner.color_count().get()
    }

    pub fn palette(&self) -> Vec<JsPaletteColor> {
        self.inner.palette().iter().cloned().map(JsPaletteColor::from).collect()
    }

    /// Object URL of the uploaded image.
    #[wasm_bindgen(getter, js_name = sourceUrl)]
    pub fn source_url(&self) -> Option<String> {
        self.inner.source().map(|source| source.url.to_string())
    }

    #[wasm_bindgen(getter)]
    pub fn error(&self) -> Option<String> {
        self.inner.error().map(str::to_string)
    }

    #[wasm_bindgen(js_name = copyRgb)]
    pub fn copy_rgb(&self, index: usize) -> Result<String, JsValue> {
        self.inner.copy_rgb(index).map_err(js_error)
    }

    #[wasm_bindgen(js_name = copyHex)]
    pub fn copy_hex(&self, index: usize) -> Result<String, JsValue> {
        self.inner.copy_hex(index).map_err(js_error)
    }

    #[wasm_bindgen(js_name = copyHsl)]
    pub fn copy_hsl(&self, index: usize) -> Result<String, JsValue> {
        self.inner.copy_hsl(index).map_err(js_error)
    }
}

/// Compression / resize page.
#[wasm_bindgen(js_name = CompressionPage)]
pub struct JsCompressionPage {
    inner: CompressionPage,
}

#[wasm_bindgen(js_class = CompressionPage)]
impl JsCompressionPage {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsCompressionPage {
        Self {
            inner: CompressionPage::new(browser_capabilities()),
        }
    }

    #[wasm_bindgen(js_name = addFile)]
    pub fn add_file(&mut self, name: &str, mime_type: &str, bytes: Vec<u8>) -> usize {
        self.inner.add_files([InputFile::new(name, mime_type, bytes)])
    }

    /// Add a dropped file. Nothing is filtered; non-images fail when processed.
    #[wasm_bindgen(js_name = dropFile)]
    pub fn drop_file(&mut self, name: &str, mime_type: &str, bytes: Vec<u8>) -> usize {
        self.inner.drop_files([InputFile::new(name, mime_type, bytes)])
    }

    #[wasm_bindgen(js_name = removeFile)]
    pub fn remove_file(&mut self, index: usize) -> Result<(), JsValue> {
        self.inner.remove_file(index).map(drop).map_err(js_error)
    }

    #[wasm_bindgen(getter, js_name = fileCount)]
    pub fn file_count(&self) -> usize {
        self.inner.files().len()
    }

    /// Preview object URL of selected file `index`.
    pub fn preview(&self, index: usize) -> Option<String> {
        self.inner.preview(index).map(ToString::to_string)
    }

    /// Current settings as a plain object.
    pub fn settings(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.settings()).map_err(js_error)
    }

    /// Replace the settings; missing fields take their defaults.
    #[wasm_bindgen(js_name = setSettings)]
    pub fn set_settings(&mut self, settings: JsValue) -> Result<(), JsValue> {
        let settings = settings_from_js(settings)?;
        self.inner.set_settings(settings).map_err(js_error)
    }

    #[wasm_bindgen(getter, js_name = canProcess)]
    pub fn can_process(&self) -> bool {
        self.inner.can_process()
    }

    /// Compress every selected file. Files that fail are left out of the results.
    pub fn process(&mut self) -> Result<(), JsValue> {
        self.inner.process(&ImageCompressor::default()).map_err(js_error)
    }

    pub fn results(&self) -> Vec<JsPageResult> {
        self.inner.results().iter().map(JsPageResult::from).collect()
    }

    pub fn download(&self, index: usize) -> Result<(), JsValue> {
        self.inner.download(index).map_err(js_error)
    }

    #[wasm_bindgen(js_name = downloadAll)]
    pub fn download_all(&self) -> Result<(), JsValue> {
        self.inner.download_all().map_err(js_error)
    }
}

impl Default for JsCompressionPage {
    fn default() -> Self {
        Self::new()
    }
}

/// Background removal page.
#[wasm_bindgen(js_name = BackgroundRemovalPage)]
pub struct JsBackgroundRemovalPage {
    inner: BackgroundRemovalPage,
    remover: BorderKeyRemover,
}

#[wasm_bindgen(js_class = BackgroundRemovalPage)]
impl JsBackgroundRemovalPage {
    #[wasm_bindgen(constructor)]
    pub fn new(tolerance: Option<f32>) -> JsBackgroundRemovalPage {
        let remover = match tolerance {
            Some(tolerance) => BorderKeyRemover { tolerance },
            None => BorderKeyRemover::default(),
        };
        Self {
            inner: BackgroundRemovalPage::new(browser_capabilities()),
            remover,
        }
    }

    #[wasm_bindgen(js_name = addFile)]
    pub fn add_file(&mut self, name: &str, mime_type: &str, bytes: Vec<u8>) -> usize {
        self.inner.add_files([InputFile::new(name, mime_type, bytes)])
    }

    /// Add a dropped file; non-images are ignored.
    #[wasm_bindgen(js_name = dropFile)]
    pub fn drop_file(&mut self, name: &str, mime_type: &str, bytes: Vec<u8>) -> usize {
        self.inner.drop_files([InputFile::new(name, mime_type, bytes)])
    }

    #[wasm_bindgen(js_name = removeFile)]
    pub fn remove_file(&mut self, index: usize) -> Result<(), JsValue> {
        self.inner.remove_file(index).map(drop).map_err(js_error)
    }

    #[wasm_bindgen(getter, js_name = fileCount)]
    pub fn file_count(&self) -> usize {
        self.inner.files().len()
    }

    pub fn preview(&self, index: usize) -> Option<String> {
        self.inner.preview(index).map(ToString::to_string)
    }

    #[wasm_bindgen(getter, js_name = canProcess)]
    pub fn can_process(&self) -> bool {
        self.inner.can_process()
    }

    /// Process every selected file. If any fails, `error` is set and there
    /// are no results.
    pub fn process(&mut self) -> Result<(), JsValue> {
        self.inner.process(&self.remover).map_err(js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn error(&self) -> Option<String> {
        self.inner.error().map(str::to_string)
    }

    pub fn results(&self) -> Vec<JsPageResult> {
        self.inner.results().iter().map(JsPageResult::from).collect()
    }

    pub fn download(&self, index: usize) -> Result<(), JsValue> {
        self.inner.download(index).map_err(js_error)
    }

    #[wasm_bindgen(js_name = downloadAll)]
    pub fn download_all(&self) -> Result<(), JsValue> {
        self.inner.download_all().map_err(js_error)
    }
}
