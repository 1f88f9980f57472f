//! Background removal.
//!
//! Segmentation itself is a collaborator behind [`BackgroundRemover`]. The
//! in-tree [`BorderKeyRemover`] handles the common product-shot case: it
//! estimates the background from the image border and clears every pixel
//! connected to the border whose color is close to that estimate.

use std::collections::VecDeque;

use thiserror::Error;

use crate::decode::{decode_image, DecodeError, DecodedImage};
use crate::encode::{encode_png, EncodeError};
use crate::input::InputFile;
use crate::palette::Rgb;

/// Errors from a background removal call.
#[derive(Debug, Error)]
pub enum RemovalError {
    #[error("Failed to decode {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: DecodeError,
    },

    #[error("Failed to encode result: {0}")]
    Encode(#[from] EncodeError),

    /// A collaborator-specific failure (model load, inference, ...).
    #[error("Background removal failed: {0}")]
    Failed(String),
}

/// Produces a cut-out image for one input file.
///
/// The returned bytes are an encoded image with transparency (PNG for the
/// in-tree implementation). Implementations are called concurrently.
pub trait BackgroundRemover: Send + Sync {
    fn remove_background(&self, file: &InputFile) -> Result<Vec<u8>, RemovalError>;
}

/// Flood-fill background removal keyed on the border color.
#[derive(Debug, Clone, Copy)]
pub struct BorderKeyRemover {
    /// Maximum Euclidean RGB distance from the key color that still counts as
    /// background.
    pub tolerance: f32,
}

impl Default for BorderKeyRemover {
    fn default() -> Self {
        Self { tolerance: 48.0 }
    }
}

impl BorderKeyRemover {
    /// Median color of the border pixels, per channel.
    pub fn key_color(image: &DecodedImage) -> Option<Rgb> {
        let mut channels: [Vec<u8>; 3] = Default::default();
        for index in border_indices(image.width, image.height) {
            let px = &image.pixels[index * 4..index * 4 + 3];
            for (values, &v) in channels.iter_mut().zip(px) {
                values.push(v);
            }
        }
        if channels[0].is_empty() {
            return None;
        }
        let [r, g, b] = channels.map(|mut values| {
            values.sort_unstable();
            values[values.len() / 2]
        });
        Some(Rgb::new(r, g, b))
    }

    /// Clear background pixels in place and return how many were cleared.
    pub fn apply(&self, image: &mut DecodedImage) -> usize {
        let Some(key) = Self::key_color(image) else {
            return 0;
        };
        let width = image.width as usize;
        let height = image.height as usize;
        let limit = self.tolerance * self.tolerance;

        let is_background = |pixels: &[u8], index: usize| {
            let px = &pixels[index * 4..index * 4 + 3];
            let dr = px[0] as f32 - key.r as f32;
            let dg = px[1] as f32 - key.g as f32;
            let db = px[2] as f32 - key.b as f32;
            dr * dr + dg * dg + db * db <= limit
        };

        let mut visited = vec![false; width * height];
        let mut queue: VecDeque<usize> = VecDeque::new();
        for index in border_indices(image.width, image.height) {
            if !visited[index] && is_background(&image.pixels, index) {
                visited[index] = true;
                queue.push_back(index);
            }
        }

        let mut cleared = 0;
        while let Some(index) = queue.pop_front() {
            image.pixels[index * 4 + 3] = 0;
            cleared += 1;

            let (x, y) = (index % width, index / width);
            let neighbours = [
                (x > 0).then(|| index - 1),
                (x + 1 < width).then(|| index + 1),
                (y > 0).then(|| index - width),
                (y + 1 < height).then(|| index + width),
            ];
            for next in neighbours.into_iter().flatten() {
                if !visited[next] && is_background(&image.pixels, next) {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }
        cleared
    }
}

impl BackgroundRemover for BorderKeyRemover {
    fn remove_background(&self, file: &InputFile) -> Result<Vec<u8>, RemovalError> {
        let mut image = decode_image(file.bytes()).map_err(|source| RemovalError::Decode {
            name: file.name().to_string(),
            source,
        })?;
        let cleared = self.apply(&mut image);
        log::debug!("{}: cleared {} of {} pixels", file.name(), cleared, image.pixel_count());
        Ok(encode_png(&image, 80)?)
    }
}

/// Pixel indices on the outer ring, each listed once.
fn border_indices(width: u32, height: u32) -> impl Iterator<Item = usize> {
    let (w, h) = (width as usize, height as usize);
    let top_bottom = (0..w).flat_map(move |x| {
        let bottom = (h > 1).then(|| (h - 1) * w + x);
        std::iter::once(x).chain(bottom)
    });
    let sides = (1..h.saturating_sub(1)).flat_map(move |y| {
        let right = (w > 1).then(|| y * w + w - 1);
        std::iter::once(y * w).chain(right)
    });
    let empty = w == 0 || h == 0;
    top_bottom.chain(sides).filter(move |_| !empty)
}
