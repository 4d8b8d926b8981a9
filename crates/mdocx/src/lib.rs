//! mdocx - Batch Markdown to DOCX conversion with diagram rasterization.
//!
//! Scans Markdown documents for fenced mermaid blocks, rasterizes each block
//! to a PNG through an external renderer, and assembles the final Word
//! document through an external converter. Both external tools sit behind
//! capability traits so the pipeline can run against fakes in tests.

pub mod config;
pub mod convert;
pub mod extract;
pub mod render;

mod discover;
mod error;

pub use discover::discover_inputs;
pub use error::MdocxError;

use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info};

use config::AppConfig;
use convert::{DocumentConverter, PandocConverter};
use render::{DiagramRenderer, MmdcRenderer};

/// Pipeline for converting Markdown documents into Word documents.
///
/// Every document is processed inside its own ephemeral scratch directory,
/// which is removed when processing finishes, whether or not it succeeded.
///
/// # Examples
///
/// ```rust,no_run
/// use mdocx::{Pipeline, config::AppConfig};
///
/// // With the external mmdc/pandoc tools from the config
/// let pipeline = Pipeline::from_config(AppConfig::default());
///
/// let summary = pipeline.process_batch()
///     .expect("Failed to run batch");
/// println!("{} converted, {} failed", summary.converted().len(), summary.failed().len());
/// ```
pub struct Pipeline<R, C> {
    config: AppConfig,
    renderer: R,
    converter: C,
}

impl Pipeline<MmdcRenderer, PandocConverter> {
    /// Create a pipeline wired to the external tools named in `config`.
    pub fn from_config(config: AppConfig) -> Self {
        let renderer = MmdcRenderer::new(config.tools().renderer(), config.render().clone());
        let converter = PandocConverter::new(config.tools().converter());
        Self {
            config,
            renderer,
            converter,
        }
    }
}

impl<R: DiagramRenderer, C: DocumentConverter> Pipeline<R, C> {
    /// Create a pipeline with explicit renderer and converter capabilities.
    ///
    /// This is the seam used by tests to run the pipeline without spawning
    /// external processes.
    pub fn with_capabilities(config: AppConfig, renderer: R, converter: C) -> Self {
        Self {
            config,
            renderer,
            converter,
        }
    }

    /// Returns the pipeline configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Convert a single Markdown document.
    ///
    /// The output document is written alongside the input with a `.docx`
    /// extension. Diagram blocks that fail to render are kept as raw source
    /// and logged; a failed final conversion is fatal for the document.
    ///
    /// The document's scratch directory is removed unconditionally, on
    /// success and on failure.
    ///
    /// # Errors
    ///
    /// Returns `MdocxError` for I/O errors and converter failures.
    pub fn process_file(&self, input: &Path) -> Result<PathBuf, MdocxError> {
        let base_name = input
            .file_stem()
            .unwrap_or(input.as_os_str())
            .to_string_lossy()
            .into_owned();
        let output = input.with_extension("docx");

        info!(path = input.display().to_string(); "Processing document");

        let source = fs::read_to_string(input)?;

        // Scratch directory for diagram sources, rendered images, and the
        // rewritten document. Removed on drop, error paths included.
        let workspace = tempfile::tempdir()?;

        let (processed, images) =
            extract::extract_and_replace(&self.renderer, &source, workspace.path(), &base_name);

        let scratch_md = workspace.path().join(format!("{base_name}_processed.md"));
        fs::write(&scratch_md, &processed)?;

        self.converter
            .convert(&scratch_md, &output, workspace.path())?;

        info!(
            output = output.display().to_string(),
            images = images.len();
            "Created document"
        );

        Ok(output)
    }

    /// Discover and convert every matching document in the input directory.
    ///
    /// Documents are processed sequentially in sorted order. By default a
    /// document that fails to convert is recorded in the summary and the
    /// batch continues; with `fail_fast` set the first failure aborts the
    /// batch.
    ///
    /// # Errors
    ///
    /// Returns `MdocxError` if the input pattern is invalid, or for the
    /// first document failure when `fail_fast` is set.
    pub fn process_batch(&self) -> Result<BatchSummary, MdocxError> {
        let inputs = discover_inputs(self.config.discovery())?;
        info!(count = inputs.len(); "Converting documents");

        let mut summary = BatchSummary::default();

        for input in inputs {
            match self.process_file(&input) {
                Ok(output) => summary.converted.push(output),
                Err(err) => {
                    if self.config.batch().fail_fast() {
                        return Err(err);
                    }
                    error!(path = input.display().to_string(), err:? = err; "Failed to convert document");
                    summary.failed.push((input, err));
                }
            }
        }

        Ok(summary)
    }
}

/// Outcome of one batch run: which documents converted and which failed.
#[derive(Debug, Default)]
pub struct BatchSummary {
    converted: Vec<PathBuf>,
    failed: Vec<(PathBuf, MdocxError)>,
}

impl BatchSummary {
    /// Returns the output paths of the documents that converted.
    pub fn converted(&self) -> &[PathBuf] {
        &self.converted
    }

    /// Returns the inputs that failed, with the error for each.
    pub fn failed(&self) -> &[(PathBuf, MdocxError)] {
        &self.failed
    }

    /// Returns `true` if no document failed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}
