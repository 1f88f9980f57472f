//! File selection with preview handles.

use log::warn;

use super::PageError;
use crate::capability::{ObjectUrl, ObjectUrls};
use crate::input::{FileSelection, InputFile};

/// Selected files and one preview URL per file.
///
/// A preview is created when a file is added and revoked when it is removed.
#[derive(Debug, Default)]
pub(crate) struct PreviewedSelection {
    files: FileSelection,
    previews: Vec<Option<ObjectUrl>>,
}

impl PreviewedSelection {
    pub(crate) fn add<I>(&mut self, files: I, urls: &dyn ObjectUrls) -> usize
    where
        I: IntoIterator<Item = InputFile>,
    {
        let mut added = 0;
        for file in files {
            let preview = match urls.create(file.bytes(), file.mime_type()) {
                Ok(url) => Some(url),
                Err(err) => {
                    warn!("{}: no preview: {err}", file.name());
                    None
                }
            };
            self.previews.push(preview);
            self.files.extend([file]);
            added += 1;
        }
        added
    }

    pub(crate) fn add_images<I>(&mut self, files: I, urls: &dyn ObjectUrls) -> usize
    where
        I: IntoIterator<Item = InputFile>,
    {
        self.add(files.into_iter().filter(InputFile::is_image), urls)
    }

    pub(crate) fn remove(
        &mut self,
        index: usize,
        urls: &dyn ObjectUrls,
    ) -> Result<InputFile, PageError> {
        let len = self.files.len();
        let file = self
            .files
            .remove(index)
            .ok_or(PageError::IndexOutOfRange { index, len })?;
        if let Some(url) = self.previews.remove(index) {
            urls.revoke(&url);
        }
        Ok(file)
    }

    pub(crate) fn files(&self) -> &FileSelection {
        &self.files
    }

    pub(crate) fn preview(&self, index: usize) -> Option<&ObjectUrl> {
        self.previews.get(index).and_then(Option::as_ref)
    }
}
