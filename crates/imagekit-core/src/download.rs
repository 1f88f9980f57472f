//! Download file names.

use crate::encode::OutputFormat;

/// File name without its last extension.
///
/// Names without a dot, and dot-files such as `.hidden`, are returned whole.
pub fn file_stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(0) | None => name,
        Some(dot) => &name[..dot],
    }
}

/// `<stem>_removedbg.png`
pub fn removed_background_name(original: &str) -> String {
    format!("{}_removedbg.png", file_stem(original))
}

/// `<stem>_<width>x<height>.<ext>`
pub fn compressed_name(original: &str, width: u32, height: u32, format: OutputFormat) -> String {
    format!(
        "{}_{}x{}.{}",
        file_stem(original),
        width,
        height,
        format.extension()
    )
}
