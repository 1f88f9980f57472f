//! User-facing compression settings and the options they resolve to.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::encode::OutputFormat;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Invalid setting values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Quality must be between 0 and 100, got {0}")]
    QualityOutOfRange(u8),

    #[error("Width must be between {min} and {max}, got {0}", min = ResizeMode::MIN_WIDTH, max = ResizeMode::MAX_WIDTH)]
    WidthOutOfRange(u32),

    #[error("Max file size must be greater than zero")]
    ZeroMaxSize,
}

/// Resolution presets offered by the resize picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionPreset {
    /// HD (720p)
    Hd,
    /// Full HD (1080p)
    FullHd,
    /// QHD (1440p)
    Qhd,
    /// 4K (2160p)
    Uhd,
}

impl ResolutionPreset {
    pub const ALL: [ResolutionPreset; 4] = [
        ResolutionPreset::Hd,
        ResolutionPreset::FullHd,
        ResolutionPreset::Qhd,
        ResolutionPreset::Uhd,
    ];

    /// Longest edge in pixels.
    pub fn pixels(self) -> u32 {
        match self {
            ResolutionPreset::Hd => 720,
            ResolutionPreset::FullHd => 1080,
            ResolutionPreset::Qhd => 1440,
            ResolutionPreset::Uhd => 2160,
        }
    }
}

/// How output dimensions are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "lowercase")]
pub enum ResizeMode {
    /// Keep source dimensions.
    #[default]
    Original,
    Preset(ResolutionPreset),
    /// Manual longest edge in pixels.
    Manual(u32),
}

impl ResizeMode {
    pub const MIN_WIDTH: u32 = 50;
    pub const MAX_WIDTH: u32 = 3840;

    /// Longest edge to fit into, `None` when resizing is disabled.
    pub fn max_dimension(self) -> Option<u32> {
        match self {
            ResizeMode::Original => None,
            ResizeMode::Preset(preset) => Some(preset.pixels()),
            ResizeMode::Manual(width) => Some(width),
        }
    }}

/// Settings form of the compression page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionSettings {
    pub format: OutputFormat,
    /// Quality percent, 0-100.
    pub quality: u8,
    /// Target maximum output size. `None` disables size negotiation.
    pub max_size_bytes: Option<u64>,
    pub resize: ResizeMode,
}

impl Default for CompressionSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Jpeg,
            quality: 80,
            max_size_bytes: Some(100 * 1024 * 1024),
            resize: ResizeMode::Original,
        }
    }
}

impl CompressionSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.quality > 100 {
            return Err(SettingsError::QualityOutOfRange(self.quality));
        }
        if let ResizeMode::Manual(width) = self.resize {
            if !(ResizeMode::MIN_WIDTH..=ResizeMode::MAX_WIDTH).contains(&width) {
                return Err(SettingsError::WidthOutOfRange(width));
            }
        }
        if self.max_size_bytes == Some(0) {
            return Err(SettingsError::ZeroMaxSize);
        }
        Ok(())
    }

    /// Resolve into the options passed to a [`Compressor`](super::Compressor).
    pub fn resolve(&self) -> Result<CompressionOptions, SettingsError> {
        self.validate()?;
        Ok(CompressionOptions {
            target_size_mb: self
                .max_size_bytes
                .map_or(f64::INFINITY, |bytes| bytes as f64 / BYTES_PER_MB),
            max_dimension: self.resize.max_dimension(),
            use_background_worker: true,
            output_format: Some(self.format),
            quality: Some(self.quality as f32 / 100.0),
        })
    }
}

/// Options understood by a compressor.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionOptions {
    /// Target maximum size in megabytes; infinite disables negotiation.
    pub target_size_mb: f64,
    /// Longest output edge; `None` keeps source dimensions.
    pub max_dimension: Option<u32>,
    /// Hint that the host may run the work off the UI thread.
    pub use_background_worker: bool,
    /// `None` keeps the source format when it can be encoded.
    pub output_format: Option<OutputFormat>,
    /// Quality fraction in [0, 1].
    pub quality: Option<f32>,
}

impl CompressionOptions {
    pub fn output_mime_type(&self) -> Option<&'static str> {
        self.output_format.map(OutputFormat::mime_type)
    }

    /// Target size in bytes, `None` when negotiation is disabled.
    pub fn target_size_bytes(&self) -> Option<u64> {
        (self.target_size_mb.is_finite() && self.target_size_mb > 0.0)
            .then(|| (self.target_size_mb * BYTES_PER_MB).floor() as u64)
    }
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            target_size_mb: f64::INFINITY,
            max_dimension: None,
            use_background_worker: true,
            output_format: None,
            quality: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_form() {
        let settings = CompressionSettings::default();
        assert_eq!(settings.format, OutputFormat::Jpeg);
        assert_eq!(settings.quality, 80);
        assert_eq!(settings.resize, ResizeMode::Original);
        assert_eq!(settings.resolve().unwrap().target_size_mb, 100.0);
    }

    #[test]
    fn test_resolve_converts_units() {
        let settings = CompressionSettings {
            format: OutputFormat::Webp,
            quality: 50,
            max_size_bytes: Some(512 * 1024),
            resize: ResizeMode::Preset(ResolutionPreset::FullHd),
        };
        let options = settings.resolve().unwrap();

        assert_eq!(options.target_size_mb, 0.5);
        assert_eq!(options.target_size_bytes(), Some(512 * 1024));
        assert_eq!(options.max_dimension, Some(1080));
        assert_eq!(options.quality, Some(0.5));
        assert_eq!(options.output_mime_type(), Some("image/webp"));
        assert!(options.use_background_worker);
    }

    #[test]
    fn test_original_disables_resize() {
        let options = CompressionSettings::default().resolve().unwrap();
        assert_eq!(options.max_dimension, None);
    }

    #[test]
    fn test_no_max_size_disables_negotiation() {
        let settings = CompressionSettings {
            max_size_bytes: None,
            ..Default::default()
        };
        assert_eq!(settings.resolve().unwrap().target_size_bytes(), None);
    }

    #[test]
    fn test_preset_pixels() {
        let pixels: Vec<_> = ResolutionPreset::ALL.iter().map(|p| p.pixels()).collect();
        assert_eq!(pixels, [720, 1080, 1440, 2160]);
    }

    #[test]
    fn test_validation_errors() {
        let mut settings = CompressionSettings::default();
        settings.quality = 101;
        assert_eq!(settings.validate(), Err(SettingsError::QualityOutOfRange(101)));

        settings = CompressionSettings::default();
        settings.resize = ResizeMode::Manual(10);
        assert_eq!(settings.validate(), Err(SettingsError::WidthOutOfRange(10)));

        settings = CompressionSettings::default();
        settings.max_size_bytes = Some(0);
        assert_eq!(settings.validate(), Err(SettingsError::ZeroMaxSize));
    }
}
