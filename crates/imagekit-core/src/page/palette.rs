//! Color palette extraction page.

use std::fmt;

use log::{debug, error};

use super::PageError;
use crate::capability::{Capabilities, ObjectUrl};
use crate::decode::{decode_image, DecodedImage};
use crate::input::InputFile;
use crate::palette::{extract_palette, ColorCount, MedianCut, PaletteColor, Quantizer};

/// Shown for uploads that are not images or fail to decode.
pub const INVALID_IMAGE_MESSAGE: &str = "Please upload a valid image file.";

/// The uploaded image, kept so the palette can be re-extracted.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub name: String,
    pub url: ObjectUrl,
    pub image: DecodedImage,
}

/// State of the palette page.
pub struct PalettePage {
    caps: Capabilities,
    quantizer: Box<dyn Quantizer>,
    color_count: ColorCount,
    source: Option<SourceImage>,
    palette: Vec<PaletteColor>,
    error: Option<String>,
}

impl fmt::Debug for PalettePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PalettePage")
            .field("color_count", &self.color_count)
            .field("source", &self.source.as_ref().map(|s| &s.name))
            .field("palette", &self.palette)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl PalettePage {
    pub fn new(caps: Capabilities) -> Self {
        Self::with_quantizer(caps, Box::new(MedianCut))
    }

    pub fn with_quantizer(caps: Capabilities, quantizer: Box<dyn Quantizer>) -> Self {
        Self {
            caps,
            quantizer,
            color_count: ColorCount::default(),
            source: None,
            palette: Vec::new(),
            error: None,
        }
    }

    /// Decode `file`, keep it as the source and extract its palette.
    ///
    /// On rejection the previous source and palette stay in place.
    pub fn upload(&mut self, file: &InputFile) -> Result<&[PaletteColor], PageError> {
        if !file.is_image() {
            return Err(self.reject(file, "not an image"));
        }
        let image = match decode_image(file.bytes()) {
            Ok(image) => image,
            Err(err) => return Err(self.reject(file, &err.to_string())),
        };
        let url = match self.caps.object_urls.create(file.bytes(), file.mime_type()) {
            Ok(url) => url,
            Err(err) => {
                self.error = Some(err.to_string());
                return Err(err.into());
            }
        };

        if let Some(old) = self.source.take() {
            self.caps.object_urls.revoke(&old.url);
        }
        self.palette = extract_palette(&image, self.color_count, self.quantizer.as_ref());
        self.source = Some(SourceImage {
            name: file.name().to_string(),
            url,
            image,
        });
        self.error = None;
        debug!("{}: {} palette colors", file.name(), self.palette.len());
        Ok(&self.palette)
    }

    /// Change the color count and re-extract from the retained source.
    pub fn set_color_count(&mut self, count: u8) -> Result<&[PaletteColor], PageError> {
        self.color_count = ColorCount::new(count)?;
        if let Some(source) = &self.source {
            self.palette = extract_palette(&source.image, self.color_count, self.quantizer.as_ref());
        }
        Ok(&self.palette)
    }

    pub fn color_count(&self) -> ColorCount {
        self.color_count
    }

    pub fn palette(&self) -> &[PaletteColor] {
        &self.palette
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Copy `rgb(r,g,b)` of entry `index`.
    pub fn copy_rgb(&self, index: usize) -> Result<String, PageError> {
        let color = self.color(index)?;
        self.copy(color.rgb.css())
    }

    /// Copy `#rrggbb` of entry `index`.
    pub fn copy_hex(&self, index: usize) -> Result<String, PageError> {
        let color = self.color(index)?;
        self.copy(color.hex.clone())
    }

    /// Copy `hsl(h,s,l)` of entry `index`.
    pub fn copy_hsl(&self, index: usize) -> Result<String, PageError> {
        let color = self.color(index)?;
        self.copy(color.hsl.css())
    }

    fn color(&self, index: usize) -> Result<&PaletteColor, PageError> {
        if self.source.is_none() {
            return Err(PageError::NoImage);
        }
        self.palette.get(index).ok_or(PageError::IndexOutOfRange {
            index,
            len: self.palette.len(),
        })
    }

    fn copy(&self, text: String) -> Result<String, PageError> {
        if let Err(err) = self.caps.clipboard.write_text(&text) {
            error!("failed to copy {text}: {err}");
            return Err(err.into());
        }
        Ok(text)
    }

    fn reject(&mut self, file: &InputFile, reason: &str) -> PageError {
        debug!("{}: rejected upload: {reason}", file.name());
        self.error = Some(INVALID_IMAGE_MESSAGE.to_string());
        PageError::Validation(INVALID_IMAGE_MESSAGE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::memory::MemoryCapabilities;
    use crate::encode::encode_png;
    use crate::palette::Rgb;

    const STRIPES: [[u8; 4]; 4] = [
        [255, 0, 0, 255],
        [0, 128, 0, 255],
        [0, 0, 255, 255],
        [250, 250, 250, 255],
    ];

    /// Four vertical stripes with decreasing widths 4, 3, 2, 1.
    fn striped_png(name: &str) -> InputFile {
        let widths = [4usize, 3, 2, 1];
        let mut pixels = Vec::new();
        for _ in 0..4 {
            for (color, width) in STRIPES.iter().zip(widths) {
                for _ in 0..width {
                    pixels.extend_from_slice(color);
                }
            }
        }
        let png = encode_png(&DecodedImage::new(10, 4, pixels), 80).unwrap();
        InputFile::new(name, "image/png", png)
    }

    fn page() -> (PalettePage, MemoryCapabilities) {
        let memory = MemoryCapabilities::new();
        (PalettePage::new(memory.capabilities()), memory)
    }

    #[test]
    fn test_upload_extracts_default_count() {
        let (mut page, _) = page();
        let palette = page.upload(&striped_png("stripes.png")).unwrap();

        // Only four distinct colors exist, fewer than the default five.
        assert_eq!(palette.len(), 4);
        assert_eq!(palette[0].rgb, Rgb::new(255, 0, 0));
        assert_eq!(palette[0].hex, "#ff0000");
        assert_eq!(page.source().unwrap().name, "stripes.png");
        assert_eq!(page.error(), None);
    }

    #[test]
    fn test_non_image_upload_leaves_state_unchanged() {
        let (mut page, _) = page();
        page.upload(&striped_png("first.png")).unwrap();
        let before = page.palette().to_vec();

        let text = InputFile::new("notes.txt", "text/plain", b"hello".to_vec());
        let err = page.upload(&text).unwrap_err();
        assert_eq!(err.to_string(), INVALID_IMAGE_MESSAGE);
        assert_eq!(page.error(), Some(INVALID_IMAGE_MESSAGE));
        assert_eq!(page.palette(), before.as_slice());
        assert_eq!(page.source().unwrap().name, "first.png");
    }

    #[test]
    fn test_undecodable_image_is_rejected() {
        let (mut page, _) = page();
        let broken = InputFile::new("broken.png", "image/png", vec![0u8, 1, 2]);
        assert!(matches!(page.upload(&broken), Err(PageError::Validation(_))));
        assert!(page.source().is_none());
        assert!(page.palette().is_empty());
    }

    #[test]
    fn test_set_color_count_reextracts() {
        let (mut page, _) = page();
        page.upload(&striped_png("stripes.png")).unwrap();

        assert_eq!(page.set_color_count(2).unwrap().len(), 2);
        assert_eq!(page.color_count().get(), 2);
        assert_eq!(page.set_color_count(4).unwrap().len(), 4);

        assert!(matches!(page.set_color_count(0), Err(PageError::Palette(_))));
        assert!(matches!(page.set_color_count(11), Err(PageError::Palette(_))));
        assert_eq!(page.color_count().get(), 4);
    }

    #[test]
    fn test_set_color_count_without_source() {
        let (mut page, _) = page();
        assert!(page.set_color_count(3).unwrap().is_empty());
    }

    #[test]
    fn test_new_upload_revokes_previous_preview() {
        let (mut page, memory) = page();
        page.upload(&striped_png("a.png")).unwrap();
        let first = page.source().unwrap().url.clone();

        page.upload(&striped_png("b.png")).unwrap();
        assert!(!memory.object_urls.is_live(&first));
        assert_eq!(memory.object_urls.live_count(), 1);
    }

    #[test]
    fn test_copy_formats() {
        let (mut page, memory) = page();
        page.upload(&striped_png("stripes.png")).unwrap();

        assert_eq!(page.copy_rgb(0).unwrap(), "rgb(255,0,0)");
        assert_eq!(page.copy_hex(0).unwrap(), "#ff0000");
        assert_eq!(page.copy_hsl(0).unwrap(), "hsl(0,100,50)");
        assert_eq!(memory.clipboard.history().len(), 3);
        assert!(matches!(
            page.copy_hex(9),
            Err(PageError::IndexOutOfRange { index: 9, .. })
        ));
    }

    #[test]
    fn test_copy_without_image_or_permission() {
        let (mut page, memory) = page();
        assert!(matches!(page.copy_rgb(0), Err(PageError::NoImage)));

        page.upload(&striped_png("stripes.png")).unwrap();
        memory.clipboard.set_denied(true);
        assert!(matches!(page.copy_hex(0), Err(PageError::Capability(_))));
        assert!(memory.clipboard.text().is_none());
    }
}
