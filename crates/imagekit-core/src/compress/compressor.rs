//! The compression collaborator and its in-tree implementation.

use log::{debug, warn};
use thiserror::Error;

use super::CompressionOptions;
use crate::decode::{decode_image, resize_to_fit, DecodeError, FilterType};
use crate::encode::{encode_image, EncodeError, OutputFormat};
use crate::input::InputFile;

/// Errors from a compression call.
#[derive(Debug, Error)]
pub enum CompressError {
    #[error("Failed to decode {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: DecodeError,
    },

    #[error("Failed to encode {name}: {source}")]
    Encode {
        name: String,
        #[source]
        source: EncodeError,
    },

    /// A collaborator-specific failure.
    #[error("Compression failed: {0}")]
    Failed(String),
}

/// Resize / re-encode / target-size negotiation for one file.
///
/// Implementations are called concurrently from batch workers.
pub trait Compressor: Send + Sync {
    fn compress(&self, file: &InputFile, options: &CompressionOptions) -> Result<Vec<u8>, CompressError>;
}

/// Compressor built on the `image` crate codecs.
///
/// Output dimensions change only through `max_dimension`. Size negotiation
/// lowers quality and never shrinks the image.
#[derive(Debug, Clone, Copy)]
pub struct ImageCompressor {
    pub filter: FilterType,
    /// Quality used when the options carry none, as a fraction.
    pub default_quality: f32,
    /// Number of re-encodes allowed while chasing the target size.
    pub max_iterations: u32,
}

impl Default for ImageCompressor {
    fn default() -> Self {
        Self {
            filter: FilterType::Lanczos3,
            default_quality: 0.8,
            max_iterations: 10,
        }
    }
}

/// Factor applied to quality on every negotiation trial.
const QUALITY_STEP: f32 = 0.95;

/// Convert a quality fraction into the 1-100 scale the encoders use.
pub fn quality_percent(fraction: f32) -> u8 {
    if fraction.is_nan() {
        return 1;
    }
    (fraction.clamp(0.0, 1.0) * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Quality for the next negotiation trial. Lossless PNG has no gradual
/// trade-off, so it goes straight to the strongest compression.
fn next_quality(format: OutputFormat, quality: u8) -> u8 {
    if format.is_lossy() {
        ((quality as f32 * QUALITY_STEP).floor() as u8).max(1)
    } else {
        1
    }
}

impl ImageCompressor {
    fn output_format(file: &InputFile, options: &CompressionOptions) -> OutputFormat {
        options
            .output_format
            .or_else(|| OutputFormat::from_mime_type(file.mime_type()))
            .unwrap_or_default()
    }
}

impl Compressor for ImageCompressor {
    fn compress(&self, file: &InputFile, options: &CompressionOptions) -> Result<Vec<u8>, CompressError> {
        let decode_err = |source| CompressError::Decode {
            name: file.name().to_string(),
            source,
        };
        let encode_err = |source| CompressError::Encode {
            name: file.name().to_string(),
            source,
        };

        let mut image = decode_image(file.bytes()).map_err(decode_err)?;
        if let Some(edge) = options.max_dimension {
            image = resize_to_fit(&image, edge, self.filter).map_err(decode_err)?;
        }

        let format = Self::output_format(file, options);
        let mut quality = quality_percent(options.quality.unwrap_or(self.default_quality));
        let mut best = encode_image(&image, format, quality).map_err(encode_err)?;

        let Some(target) = options.target_size_bytes() else {
            return Ok(best);
        };

        let mut trials = 0;
        while best.len() as u64 > target
            && format.responds_to_quality()
            && quality > 1
            && trials < self.max_iterations
        {
            quality = next_quality(format, quality);
            let candidate = encode_image(&image, format, quality).map_err(encode_err)?;
            debug!(
                "{}: trial {} at quality {} -> {} bytes",
                file.name(),
                trials + 1,
                quality,
                candidate.len()
            );
            if candidate.len() < best.len() {
                best = candidate;
            }
            trials += 1;
        }

        if best.len() as u64 > target {
            warn!(
                "{}: output is {} bytes, above the {} byte target",
                file.name(),
                best.len(),
                target
            );
        }
        Ok(best)
    }
}
