//! CLI logic for the mdocx converter.
//!
//! This module contains the core CLI logic for the mdocx converter.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use log::{info, warn};

use mdocx::{MdocxError, Pipeline};

/// Run the mdocx CLI application
///
/// Loads the configuration, applies command-line overrides, and processes
/// every matching document in the input directory.
///
/// Returns `true` if every discovered document converted successfully.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `MdocxError` for:
/// - Configuration loading errors
/// - Invalid input patterns
/// - The first document failure when `--fail-fast` is set
pub fn run(args: &Args) -> Result<bool, MdocxError> {
    // Load configuration and apply per-field overrides
    let mut app_config = config::load_config(args.config.as_ref())?;
    config::apply_overrides(&mut app_config, args);

    info!(
        input_dir = app_config.discovery().input_dir().display().to_string(),
        pattern = app_config.discovery().pattern();
        "Converting Markdown documents to DOCX"
    );

    let pipeline = Pipeline::from_config(app_config);
    let summary = pipeline.process_batch()?;

    info!(converted = summary.converted().len(); "Batch finished");

    if !summary.is_success() {
        warn!(failed = summary.failed().len(); "Some documents failed to convert");
    }

    Ok(summary.is_success())
}
