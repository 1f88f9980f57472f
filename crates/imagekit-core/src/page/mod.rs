//! Page state machines.
//!
//! Each page owns its file selection, its settings and a
//! [`ProcessingState`](crate::batch::ProcessingState). Batch pages expose a
//! two-phase API: `prepare()` captures the inputs and enters `Running`, the
//! returned job can be run anywhere, and `complete()` records the outcome.
//! `process()` does all three in one call.

mod background;
mod compress;
mod palette;
mod selection;

use thiserror::Error;

use crate::batch::BatchError;
use crate::capability::CapabilityError;
use crate::compress::{CompressError, SettingsError};
use crate::palette::PaletteError;

pub use background::{BackgroundRemovalPage, RemovalJob, RemovedBackground, REMOVAL_FAILED_MESSAGE};
pub use compress::{CompressedImage, CompressedOutput, CompressionJob, CompressionPage};
pub use palette::{PalettePage, SourceImage, INVALID_IMAGE_MESSAGE};

/// Errors returned by page operations.
#[derive(Debug, Error)]
pub enum PageError {
    /// Input rejected before any processing.
    #[error("{0}")]
    Validation(String),

    #[error("No files selected")]
    NoFiles,

    #[error("No item at index {index} (have {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("No image uploaded")]
    NoImage,

    #[error(transparent)]
    Batch(#[from] BatchError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Compress(#[from] CompressError),

    #[error(transparent)]
    Palette(#[from] PaletteError),

    #[error(transparent)]
    Capability(#[from] CapabilityError),
}
