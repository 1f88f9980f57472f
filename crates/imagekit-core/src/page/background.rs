//! Background removal page.

use log::{error, info};

use super::selection::PreviewedSelection;
use super::PageError;
use crate::background::BackgroundRemover;
use crate::batch::{run_ordered, settle, BatchError, BatchOutcome, FailurePolicy, ProcessingState};
use crate::capability::{Capabilities, ObjectUrl};
use crate::download::removed_background_name;
use crate::input::{FileSelection, InputFile};

/// Shown when any image of a batch fails.
pub const REMOVAL_FAILED_MESSAGE: &str = "Failed to process one or more images. Please try again.";

const RESULT_MIME_TYPE: &str = "image/png";

/// One cut-out image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedBackground {
    pub original_name: String,
    pub url: ObjectUrl,
    pub size: usize,
}

impl RemovedBackground {
    pub fn download_name(&self) -> String {
        removed_background_name(&self.original_name)
    }
}

/// Inputs captured when a batch starts.
#[derive(Debug, Clone)]
pub struct RemovalJob {
    files: Vec<InputFile>,
}

impl RemovalJob {
    /// Run every removal concurrently. One failure fails the batch.
    pub fn run(&self, remover: &dyn BackgroundRemover) -> BatchOutcome<Vec<u8>> {
        let results = run_ordered(&self.files, |file| remover.remove_background(file));
        let labels: Vec<&str> = self.files.iter().map(InputFile::name).collect();
        settle(&labels, results, FailurePolicy::AllOrNothing)
    }
}

/// State of the background removal page.
#[derive(Debug)]
pub struct BackgroundRemovalPage {
    caps: Capabilities,
    selection: PreviewedSelection,
    state: ProcessingState<RemovedBackground>,
}

impl BackgroundRemovalPage {
    pub fn new(caps: Capabilities) -> Self {
        Self {
            caps,
            selection: PreviewedSelection::default(),
            state: ProcessingState::Idle,
        }
    }

    /// Append files from the file picker.
    pub fn add_files<I>(&mut self, files: I) -> usize
    where
        I: IntoIterator<Item = InputFile>,
    {
        self.clear_error();
        self.selection.add(files, self.caps.object_urls.as_ref())
    }

    /// Append dropped files, keeping only images.
    pub fn drop_files<I>(&mut self, files: I) -> usize
    where
        I: IntoIterator<Item = InputFile>,
    {
        self.clear_error();
        self.selection.add_images(files, self.caps.object_urls.as_ref())
    }

    pub fn remove_file(&mut self, index: usize) -> Result<InputFile, PageError> {
        self.selection.remove(index, self.caps.object_urls.as_ref())
    }

    pub fn files(&self) -> &FileSelection {
        self.selection.files()
    }

    pub fn preview(&self, index: usize) -> Option<&ObjectUrl> {
        self.selection.preview(index)
    }

    pub fn state(&self) -> &ProcessingState<RemovedBackground> {
        &self.state
    }

    pub fn results(&self) -> &[RemovedBackground] {
        self.state.results()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    pub fn can_process(&self) -> bool {
        !self.files().is_empty() && !self.state.is_running()
    }

    /// Enter `Running` and capture the current selection.
    ///
    /// Object URLs of the previous results are revoked here.
    pub fn prepare(&mut self) -> Result<RemovalJob, PageError> {
        if self.state.is_running() {
            return Err(BatchError::AlreadyRunning.into());
        }
        if self.files().is_empty() {
            return Err(PageError::NoFiles);
        }
        self.release_results();
        self.state.begin()?;
        Ok(RemovalJob {
            files: self.files().as_slice().to_vec(),
        })
    }

    /// Record the outcome of a job returned by [`prepare`](Self::prepare).
    pub fn complete(&mut self, job: RemovalJob, outcome: BatchOutcome<Vec<u8>>) {
        let outcome = outcome
            .into_result(REMOVAL_FAILED_MESSAGE)
            .and_then(|blobs| self.register(&job, blobs));
        if let Ok(results) = &outcome {
            info!("background removed from {} images", results.len());
        }
        self.state.finish(outcome);
    }

    /// Run a whole batch synchronously.
    pub fn process(&mut self, remover: &dyn BackgroundRemover) -> Result<(), PageError> {
        let job = self.prepare()?;
        let outcome = job.run(remover);
        self.complete(job, outcome);
        Ok(())
    }

    pub fn download(&self, index: usize) -> Result<(), PageError> {
        let results = self.results();
        let result = results.get(index).ok_or(PageError::IndexOutOfRange {
            index,
            len: results.len(),
        })?;
        self.caps
            .downloader
            .save(&result.url, &result.download_name())?;
        Ok(())
    }

    pub fn download_all(&self) -> Result<(), PageError> {
        (0..self.results().len()).try_for_each(|index| self.download(index))
    }

    fn register(&self, job: &RemovalJob, blobs: Vec<Vec<u8>>) -> Result<Vec<RemovedBackground>, String> {
        let mut results = Vec::with_capacity(blobs.len());
        for (file, blob) in job.files.iter().zip(blobs) {
            match self.caps.object_urls.create(&blob, RESULT_MIME_TYPE) {
                Ok(url) => results.push(RemovedBackground {
                    original_name: file.name().to_string(),
                    url,
                    size: blob.len(),
                }),
                Err(err) => {
                    error!("{}: {err}", file.name());
                    for done in &results {
                        self.caps.object_urls.revoke(&done.url);
                    }
                    return Err(REMOVAL_FAILED_MESSAGE.to_string());
                }
            }
        }
        Ok(results)
    }

    fn release_results(&self) {
        for result in self.state.results() {
            self.caps.object_urls.revoke(&result.url);
        }
    }

    fn clear_error(&mut self) {
        if self.state.error().is_some() {
            self.state = ProcessingState::Idle;
        }
    }
}
