//! Imagekit WASM - WebAssembly bindings for the imagekit browser tools
//!
//! This crate exposes imagekit-core to JavaScript/TypeScript: one-shot
//! functions for each tool plus page classes that keep selection, settings
//! and results, backed by the browser's object URLs, clipboard and downloads.
//!
//! # Module Structure
//!
//! - `palette` - Palette extraction and color conversions
//! - `compress` - Compression, resizing and output naming
//! - `background` - Background removal
//! - `pages` - `PalettePage`, `CompressionPage`, `BackgroundRemovalPage`
//! - `browser` - Capability implementations over `web-sys`
//! - `logger` - `log` records forwarded to the console
//! - `types` - WASM-compatible wrapper types
//!
//! # Usage
//!
//! ```typescript
//! import init, { extract_palette } from '@imagekit/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const colors = extract_palette(bytes, 5);
//! console.log(colors.map((c) => c.hex));
//! ```

use wasm_bindgen::prelude::*;

mod background;
mod browser;
mod compress;
mod logger;
mod pages;
mod palette;
mod types;

pub use background::{remove_background, removed_background_file_name};
pub use browser::{browser_capabilities, BrowserClipboard, BrowserDownloader, BrowserObjectUrls};
pub use compress::{compress_image, compressed_file_name, image_dimensions};
pub use logger::set_log_level;
pub use pages::{JsBackgroundRemovalPage, JsCompressionPage, JsPalettePage};
pub use palette::{extract_palette, rgb_to_hex, rgb_to_hsl};
pub use types::{JsCompressedImage, JsPageResult, JsPaletteColor};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logger::install(log::LevelFilter::Info);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
