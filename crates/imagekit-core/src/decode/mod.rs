//! Image decoding.
//!
//! This module provides functionality for:
//! - Decoding JPEG, PNG and WebP images into an RGBA pixel buffer
//! - Reading output dimensions of an encoded image
//! - Image resizing with aspect ratio preservation
//!
//! # Examples
//!
//! ```ignore
//! use imagekit_core::decode::{decode_image, resize_to_fit, FilterType};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! let preview = resize_to_fit(&image, 1080, FilterType::Lanczos3).unwrap();
//! ```

mod reader;
mod resize;
mod types;

pub use reader::{decode_image, probe_dimensions};
pub use resize::{calculate_fit_dimensions, resize, resize_to_fit};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};
