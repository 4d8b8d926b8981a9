//! Diagram rendering capability.
//!
//! External diagram rasterization is modeled as the [`DiagramRenderer`]
//! trait so the extraction logic can be exercised in tests without spawning
//! processes. The production implementation, [`MmdcRenderer`], shells out to
//! an mmdc-compatible command-line tool.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use log::debug;
use thiserror::Error;

use crate::config::RenderConfig;

/// Errors from rendering a single diagram block.
///
/// Rendering failures are recoverable: the caller keeps the original block
/// text and continues with the remaining blocks.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to write diagram scratch file: {0}")]
    Scratch(io::Error),

    #[error("Failed to launch renderer '{renderer}': {source}")]
    Launch {
        renderer: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Renderer exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
}

/// Capability for rendering diagram source text into an image file.
pub trait DiagramRenderer {
    /// Render `source` to a raster image at `output`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the diagram could not be rendered. The
    /// output file must not be relied upon after an error.
    fn render(&self, source: &str, output: &Path) -> Result<(), RenderError>;
}

/// Renderer backed by an external mmdc-compatible executable.
///
/// The diagram source is written to a scratch file next to the output image
/// (same stem, `.mmd` extension) and the tool is invoked synchronously as
/// `<renderer> -i <scratch> -o <output> -b <background> -s <scale>`.
#[derive(Debug, Clone)]
pub struct MmdcRenderer {
    executable: PathBuf,
    config: RenderConfig,
}

impl MmdcRenderer {
    /// Create a new renderer for the given executable and render options.
    pub fn new(executable: impl Into<PathBuf>, config: RenderConfig) -> Self {
        Self {
            executable: executable.into(),
            config,
        }
    }

    /// Returns the configured executable path.
    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

impl DiagramRenderer for MmdcRenderer {
    fn render(&self, source: &str, output: &Path) -> Result<(), RenderError> {
        let scratch = output.with_extension("mmd");
        fs::write(&scratch, source).map_err(RenderError::Scratch)?;

        debug!(
            scratch = scratch.display().to_string(),
            output = output.display().to_string();
            "Invoking diagram renderer"
        );

        let cmd_output = Command::new(&self.executable)
            .arg("-i")
            .arg(&scratch)
            .arg("-o")
            .arg(output)
            .arg("-b")
            .arg(self.config.background())
            .arg("-s")
            .arg(self.config.scale().to_string())
            .output()
            .map_err(|source| RenderError::Launch {
                renderer: self.executable.clone(),
                source,
            })?;

        if !cmd_output.status.success() {
            return Err(RenderError::Failed {
                status: cmd_output.status,
                stderr: String::from_utf8_lossy(&cmd_output.stderr).into_owned(),
            });
        }

        Ok(())
    }
}
