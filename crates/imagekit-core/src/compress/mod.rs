//! Image compression and resizing.
//!
//! [`CompressionSettings`] is the form state of the compression page. It
//! resolves into [`CompressionOptions`], the contract of a [`Compressor`].

mod compressor;
mod settings;

pub use compressor::{quality_percent, CompressError, Compressor, ImageCompressor};
pub use settings::{
    CompressionOptions, CompressionSettings, ResizeMode, ResolutionPreset, SettingsError,
};
