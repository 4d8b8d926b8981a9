//! Document conversion capability.
//!
//! Final document assembly is modeled as the [`DocumentConverter`] trait so
//! the pipeline can be exercised in tests without spawning processes. The
//! production implementation, [`PandocConverter`], shells out to a
//! pandoc-compatible command-line tool.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use log::debug;
use thiserror::Error;

/// Errors from converting a document.
///
/// Unlike per-block rendering, a failed conversion is fatal for the
/// document: no output file is produced.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Failed to launch converter '{converter}': {source}")]
    Launch {
        converter: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Converter exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
}

/// Capability for converting a Markdown document into the output format.
pub trait DocumentConverter {
    /// Convert the document at `input` into `output`, resolving relative
    /// resource references against `resource_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError`] if the conversion failed; `output` must not
    /// be relied upon after an error.
    fn convert(
        &self,
        input: &Path,
        output: &Path,
        resource_dir: &Path,
    ) -> Result<(), ConvertError>;
}

/// Converter backed by an external pandoc-compatible executable.
///
/// Invoked synchronously as
/// `<converter> <input> -o <output> --resource-path <resource_dir>`.
#[derive(Debug, Clone)]
pub struct PandocConverter {
    executable: PathBuf,
}

impl PandocConverter {
    /// Create a new converter for the given executable.
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Returns the configured executable path.
    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

impl DocumentConverter for PandocConverter {
    fn convert(
        &self,
        input: &Path,
        output: &Path,
        resource_dir: &Path,
    ) -> Result<(), ConvertError> {
        debug!(
            input = input.display().to_string(),
            output = output.display().to_string();
            "Invoking document converter"
        );

        let cmd_output = Command::new(&self.executable)
            .arg(input)
            .arg("-o")
            .arg(output)
            .arg("--resource-path")
            .arg(resource_dir)
            .output()
            .map_err(|source| ConvertError::Launch {
                converter: self.executable.clone(),
                source,
            })?;

        if !cmd_output.status.success() {
            return Err(ConvertError::Failed {
                status: cmd_output.status,
                stderr: String::from_utf8_lossy(&cmd_output.stderr).into_owned(),
            });
        }

        Ok(())
    }
}
