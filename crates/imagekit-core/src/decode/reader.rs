//! Image decoding with EXIF orientation handling.
//!
//! Decoding mirrors what a browser does when it draws an `<img>` onto an
//! off-screen canvas: the EXIF orientation is applied and the result is an
//! RGBA buffer.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageError, ImageReader};

use super::{DecodeError, DecodedImage, Orientation};

/// Decode an image from bytes, applying EXIF orientation correction.
///
/// The container format is guessed from the content, not from a file name.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format is not recognized.
/// Returns `DecodeError::CorruptedFile` if the data is truncated or damaged.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let orientation = extract_orientation(bytes);
    let img = decode_dynamic(bytes)?;
    let oriented = apply_orientation(img, orientation);
    Ok(DecodedImage::from_rgba_image(oriented.into_rgba8()))
}

/// Read the pixel dimensions of an encoded image.
///
/// Only the header is parsed. EXIF orientation is taken into account so the
/// reported size matches what [`decode_image`] produces.
pub fn probe_dimensions(bytes: &[u8]) -> Result<(u32, u32), DecodeError> {
    let reader = guessed_reader(bytes)?;
    let (width, height) = reader.into_dimensions().map_err(map_image_error)?;

    if extract_orientation(bytes).swaps_dimensions() {
        Ok((height, width))
    } else {
        Ok((width, height))
    }
}

fn decode_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    guessed_reader(bytes)?.decode().map_err(map_image_error)
}

fn guessed_reader(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }
    Ok(reader)
}

fn map_image_error(err: ImageError) -> DecodeError {
    match err {
        ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        other => DecodeError::CorruptedFile(other.to_string()),
    }
}

/// Returns `Orientation::Normal` if there is no EXIF block.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
