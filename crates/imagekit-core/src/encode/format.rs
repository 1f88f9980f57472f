//! Output formats offered by the compression tool.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Target format for re-encoded images.
///
/// `Jpg` and `Jpeg` produce the same bytes; they differ only in the file
/// extension and MIME string handed back to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Jpg,
    #[default]
    Jpeg,
    Png,
    Webp,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown output format: {0}")]
pub struct UnknownFormat(pub String);

impl OutputFormat {
    /// All formats, in the order the format picker lists them.
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Jpg,
        OutputFormat::Jpeg,
        OutputFormat::Png,
        OutputFormat::Webp,
    ];

    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpg => "jpg",
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Png => "png",
            OutputFormat::Webp => "webp",
        }
    }

    /// MIME type requested from the compressor, `image/<extension>`.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpg => "image/jpg",
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
            OutputFormat::Webp => "image/webp",
        }
    }

    /// Look a format up by MIME type. `image/jpg` is accepted as an alias.
    pub fn from_mime_type(mime: &str) -> Option<OutputFormat> {
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.mime_type().eq_ignore_ascii_case(mime))
    }

    /// Whether lower quality discards image data.
    pub fn is_lossy(self) -> bool {
        match self {
            OutputFormat::Jpg | OutputFormat::Jpeg => true,
            OutputFormat::Webp => cfg!(feature = "lossy-webp"),
            OutputFormat::Png => false,
        }
    }

    /// Whether the quality setting changes the encoded bytes. PNG stays
    /// lossless but trades encode time for size.
    pub fn responds_to_quality(self) -> bool {
        self.is_lossy() || self == OutputFormat::Png
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        assert_eq!("webp".parse::<OutputFormat>().unwrap(), OutputFormat::Webp);
        assert_eq!("JPG".parse::<OutputFormat>().unwrap(), OutputFormat::Jpg);
        assert_eq!(
            "gif".parse::<OutputFormat>(),
            Err(UnknownFormat("gif".to_string()))
        );
    }

    #[test]
    fn test_mime_types_follow_extension() {
        for format in OutputFormat::ALL {
            assert_eq!(format.mime_type(), format!("image/{}", format.extension()));
            assert_eq!(OutputFormat::from_mime_type(format.mime_type()), Some(format));
        }
        assert_eq!(OutputFormat::from_mime_type("image/gif"), None);
    }

    #[test]
    fn test_quality_sensitivity() {
        assert!(OutputFormat::Jpeg.is_lossy());
        assert!(!OutputFormat::Png.is_lossy());
        assert!(OutputFormat::Png.responds_to_quality());
        assert_eq!(OutputFormat::Webp.is_lossy(), cfg!(feature = "lossy-webp"));
    }

    #[test]
    fn test_default_is_jpeg() {
        assert_eq!(OutputFormat::default(), OutputFormat::Jpeg);
    }
}
