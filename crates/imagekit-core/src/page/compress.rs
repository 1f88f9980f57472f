//! Image compression / resize page.

use log::{info, warn};

use super::selection::PreviewedSelection;
use super::PageError;
use crate::batch::{run_ordered, settle, BatchError, BatchOutcome, FailurePolicy, ProcessingState};
use crate::capability::{Capabilities, ObjectUrl};
use crate::compress::{
    CompressError, CompressionOptions, CompressionSettings, Compressor, ResizeMode, ResolutionPreset,
};
use crate::decode::probe_dimensions;
use crate::download::compressed_name;
use crate::encode::OutputFormat;
use crate::input::{FileSelection, InputFile};

/// Compressed bytes of one file and their decoded dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedOutput {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// One entry of the result gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedImage {
    pub original_name: String,
    pub url: ObjectUrl,
    /// Output size in bytes.
    pub size: usize,
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
}

impl CompressedImage {
    pub fn download_name(&self) -> String {
        compressed_name(&self.original_name, self.width, self.height, self.format)
    }

    /// Size in kilobytes with two decimals, e.g. `"12.50 KB"`.
    pub fn size_label(&self) -> String {
        format!("{:.2} KB", self.size as f64 / 1024.0)
    }
}

/// Inputs and resolved options captured when a batch starts.
#[derive(Debug, Clone)]
pub struct CompressionJob {
    files: Vec<InputFile>,
    options: CompressionOptions,
    format: OutputFormat,
}

impl CompressionJob {
    /// Compress every file concurrently. Failed files are logged and dropped.
    pub fn run(&self, compressor: &dyn Compressor) -> BatchOutcome<CompressedOutput> {
        let results = run_ordered(&self.files, |file| compress_one(compressor, file, &self.options));
        let labels: Vec<&str> = self.files.iter().map(InputFile::name).collect();
        settle(&labels, results, FailurePolicy::BestEffort)
    }
}

fn compress_one(
    compressor: &dyn Compressor,
    file: &InputFile,
    options: &CompressionOptions,
) -> Result<CompressedOutput, CompressError> {
    let bytes = compressor.compress(file, options)?;
    let (width, height) = probe_dimensions(&bytes).map_err(|source| CompressError::Decode {
        name: file.name().to_string(),
        source,
    })?;
    Ok(CompressedOutput { bytes, width, height })
}

/// State of the compression page.
#[derive(Debug)]
pub struct CompressionPage {
    caps: Capabilities,
    selection: PreviewedSelection,
    settings: CompressionSettings,
    state: ProcessingState<CompressedImage>,
}

impl CompressionPage {
    pub fn new(caps: Capabilities) -> Self {
        Self {
            caps,
            selection: PreviewedSelection::default(),
            settings: CompressionSettings::default(),
            state: ProcessingState::Idle,
        }
    }

    pub fn add_files<I>(&mut self, files: I) -> usize
    where
        I: IntoIterator<Item = InputFile>,
    {
        self.selection.add(files, self.caps.object_urls.as_ref())
    }

    /// Append dropped files. Unlike the background removal page, nothing is
    /// filtered here; non-images fail individually when processed.
    pub fn drop_files<I>(&mut self, files: I) -> usize
    where
        I: IntoIterator<Item = InputFile>,
    {
        self.add_files(files)
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

    pub fn settings(&self) -> &CompressionSettings {
        &self.settings
    }

    /// Replace all settings at once.
    pub fn set_settings(&mut self, settings: CompressionSettings) -> Result<(), PageError> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    pub fn set_format(&mut self, format: OutputFormat) {
        self.settings.format = format;
    }

    pub fn set_quality(&mut self, quality: u8) -> Result<(), PageError> {
        self.set_settings(CompressionSettings {
            quality,
            ..self.settings.clone()
        })
    }

    /// `None` selects the "Original" preset and disables resizing.
    pub fn set_preset(&mut self, preset: Option<ResolutionPreset>) {
        self.settings.resize = preset.map_or(ResizeMode::Original, ResizeMode::Preset);
    }

    pub fn set_manual_width(&mut self, width: u32) -> Result<(), PageError> {
        self.set_settings(CompressionSettings {
            resize: ResizeMode::Manual(width),
            ..self.settings.clone()
        })
    }

    pub fn set_max_size_bytes(&mut self, max_size_bytes: Option<u64>) -> Result<(), PageError> {
        self.set_settings(CompressionSettings {
            max_size_bytes,
            ..self.settings.clone()
        })
    }

    pub fn state(&self) -> &ProcessingState<CompressedImage> {
        &self.state
    }

    pub fn results(&self) -> &[CompressedImage] {
        self.state.results()
    }

    pub fn can_process(&self) -> bool {
        !self.files().is_empty() && !self.state.is_running()
    }

    /// Enter `Running`, resolve the settings and capture the selection.
    pub fn prepare(&mut self) -> Result<CompressionJob, PageError> {
        if self.state.is_running() {
            return Err(BatchError::AlreadyRunning.into());
        }
        if self.files().is_empty() {
            return Err(PageError::NoFiles);
        }
        let options = self.settings.resolve()?;
        self.release_results();
        self.state.begin()?;
        Ok(CompressionJob {
            files: self.files().as_slice().to_vec(),
            options,
            format: self.settings.format,
        })
    }

    pub fn complete(&mut self, job: CompressionJob, outcome: BatchOutcome<CompressedOutput>) {
        let (outputs, skipped) = match outcome {
            BatchOutcome::Completed { results, skipped } => (results, skipped),
            // Best effort never fails as a whole.
            BatchOutcome::Failed { failed } => (Vec::new(), failed),
        };

        let names = job
            .files
            .iter()
            .enumerate()
            .filter(|(index, _)| !skipped.contains(index))
            .map(|(_, file)| file.name());

        let mut results = Vec::with_capacity(outputs.len());
        for (name, output) in names.zip(outputs) {
            match self.caps.object_urls.create(&output.bytes, job.format.mime_type()) {
                Ok(url) => results.push(CompressedImage {
                    original_name: name.to_string(),
                    url,
                    size: output.bytes.len(),
                    width: output.width,
                    height: output.height,
                    format: job.format,
                }),
                Err(err) => warn!("{name}: {err}; skipping"),
            }
        }

        info!("compressed {} of {} images", results.len(), job.files.len());
        self.state.finish(Ok(results));
    }

    pub fn process(&mut self, compressor: &dyn Compressor) -> Result<(), PageError> {
        let job = self.prepare()?;
        let outcome = job.run(compressor);
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

    fn release_results(&self) {
        for result in self.state.results() {
            self.caps.object_urls.revoke(&result.url);
        }
    }
}
