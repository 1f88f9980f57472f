//! Imagekit Core - browser image tools
//!
//! This crate provides the processing and page logic behind three tools:
//! background removal, color palette extraction, and image compression with
//! resizing. Browser services (object URLs, clipboard, downloads) are reached
//! through the traits in [`capability`], so everything here also runs
//! natively and under test.

pub mod background;
pub mod batch;
pub mod capability;
pub mod compress;
pub mod decode;
pub mod download;
pub mod encode;
pub mod input;
pub mod page;
pub mod palette;

pub use background::{BackgroundRemover, BorderKeyRemover, RemovalError};
pub use batch::{BatchOutcome, FailurePolicy, ProcessingState};
pub use capability::{Capabilities, CapabilityError, ObjectUrl};
pub use compress::{CompressionOptions, CompressionSettings, Compressor, ImageCompressor};
pub use decode::{decode_image, probe_dimensions, DecodedImage};
pub use encode::OutputFormat;
pub use input::{FileSelection, InputFile};
pub use page::{BackgroundRemovalPage, CompressionPage, PageError, PalettePage};
pub use palette::{extract_palette, ColorCount, PaletteColor, Quantizer, Rgb};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(ColorCount::default().get(), 5);
        assert_eq!(OutputFormat::default(), OutputFormat::Jpeg);

        let settings = CompressionSettings::default();
        assert_eq!(settings.quality, 80);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_processing_state_starts_idle() {
        let state: ProcessingState<u8> = ProcessingState::default();
        assert!(!state.is_running());
        assert!(state.results().is_empty());
        assert_eq!(state.error(), None);
    }
}
