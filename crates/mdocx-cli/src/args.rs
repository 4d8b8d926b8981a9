//! Command-line argument definitions for the mdocx CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Every configuration field can be overridden individually;
//! unset flags fall back to the configuration file and then to defaults.

use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments for the mdocx converter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory searched for input Markdown files
    #[arg(short, long)]
    pub input_dir: Option<PathBuf>,

    /// Glob pattern matched against filenames in the input directory
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Diagram renderer executable (mmdc-compatible)
    #[arg(long)]
    pub renderer: Option<PathBuf>,

    /// Document converter executable (pandoc-compatible)
    #[arg(long)]
    pub converter: Option<PathBuf>,

    /// Background color for rendered diagrams
    #[arg(long)]
    pub background: Option<String>,

    /// Scale factor for rendered diagrams
    #[arg(long)]
    pub scale: Option<u32>,

    /// Abort the batch on the first document that fails to convert
    #[arg(long)]
    pub fail_fast: bool,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
