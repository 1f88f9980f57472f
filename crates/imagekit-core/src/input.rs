//! Input files and the ordered selection list.

use std::sync::Arc;

/// An in-memory file picked or dropped by the user.
///
/// The bytes are reference counted so a batch job can hold the selection
/// without copying image data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    name: String,
    mime_type: String,
    bytes: Arc<[u8]>,
}

impl InputFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the declared MIME type is an `image/*` type.
    pub fn is_image(&self) -> bool {
        is_image_mime(&self.mime_type)
    }
}

/// `true` for MIME types starting with `image/`.
pub fn is_image_mime(mime_type: &str) -> bool {
    mime_type
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
}

/// Ordered list of selected files.
///
/// Order is selection order; results are always reported in this order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSelection {
    files: Vec<InputFile>,
}

impl FileSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append files in the given order.
    pub fn extend<I>(&mut self, files: I)
    where
        I: IntoIterator<Item = InputFile>,
    {
        self.files.extend(files);
    }

    /// Remove the file at `index`, shifting later files down.
    pub fn remove(&mut self, index: usize) -> Option<InputFile> {
        (index < self.files.len()).then(|| self.files.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&InputFile> {
        self.files.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InputFile> {
        self.files.iter()
    }

    pub fn as_slice(&self) -> &[InputFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl<'a> IntoIterator for &'a FileSelection {
    type Item = &'a InputFile;
    type IntoIter = std::slice::Iter<'a, InputFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, mime: &str) -> InputFile {
        InputFile::new(name, mime, vec![0u8; 4])
    }

    #[test]
    fn test_is_image_mime() {
        assert!(is_image_mime("image/png"));
        assert!(is_image_mime("IMAGE/JPEG"));
        assert!(!is_image_mime("text/plain"));
        assert!(!is_image_mime("image"));
        assert!(!is_image_mime(""));
    }

    #[test]
    fn test_extend_keeps_order() {
        let mut selection = FileSelection::new();
        selection.extend([file("a.png", "image/png"), file("b.txt", "text/plain")]);
        selection.extend([file("c.jpg", "image/jpeg")]);

        let names: Vec<_> = selection.iter().map(InputFile::name).collect();
        assert_eq!(names, ["a.png", "b.txt", "c.jpg"]);
    }

    #[test]
    fn test_remove_shifts() {
        let mut selection = FileSelection::new();
        selection.extend([
            file("a.png", "image/png"),
            file("b.png", "image/png"),
            file("c.png", "image/png"),
        ]);

        assert_eq!(selection.remove(1).unwrap().name(), "b.png");
        assert_eq!(selection.get(1).unwrap().name(), "c.png");
        assert!(selection.remove(5).is_none());
        assert_eq!(selection.len(), 2);
    }
}
