//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory)
//! and applying per-field command-line overrides on top.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use mdocx::{MdocxError, config::AppConfig};

use crate::Args;

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for MdocxError {
    fn from(err: ConfigError) -> Self {
        MdocxError::Io(std::io::Error::other(err.to_string()))
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (mdocx/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path to config file
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, MdocxError> {
    // 1. Try the explicitly provided path first if available
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    // 2. Try the local project directory
    let local_config = Path::new("mdocx/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    // 3. Try the platform-specific config directory
    if let Some(proj_dirs) = ProjectDirs::from("com", "mdocx", "mdocx") {
        let config_dir = proj_dirs.config_dir();
        let system_config = config_dir.join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    // 4. If no config is found, return default config
    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Apply command-line overrides on top of a loaded configuration.
///
/// Each field set on the command line replaces the corresponding config
/// value; unset fields keep whatever the file (or default) provided.
pub fn apply_overrides(config: &mut AppConfig, args: &Args) {
    if let Some(input_dir) = &args.input_dir {
        config.discovery_mut().set_input_dir(input_dir.clone());
    }
    if let Some(pattern) = &args.pattern {
        config.discovery_mut().set_pattern(pattern.clone());
    }
    if let Some(renderer) = &args.renderer {
        config.tools_mut().set_renderer(renderer.clone());
    }
    if let Some(converter) = &args.converter {
        config.tools_mut().set_converter(converter.clone());
    }
    if let Some(background) = &args.background {
        config.render_mut().set_background(background.clone());
    }
    if let Some(scale) = args.scale {
        config.render_mut().set_scale(scale);
    }
    if args.fail_fast {
        config.batch_mut().set_fail_fast(true);
    }
}

/// Load configuration from a TOML file
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// Returns error if:
/// - File doesn't exist
/// - File cannot be read
/// - TOML parsing fails
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, MdocxError> {
    let path = path.as_ref();

    // Check if file exists
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    // Read file content
    let content = fs::read_to_string(path)?;

    // Parse TOML content
    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use clap::Parser;
    use tempfile::NamedTempFile;

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = load_config(Some("/nonexistent/config.toml"))
            .expect_err("Loading should fail for a missing explicit path");
        assert!(err.to_string().contains("Missing configuration file"));
    }

    #[test]
    fn toml_sections_load_with_defaults_for_the_rest() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(
            file,
            "[tools]\nrenderer = \"/opt/mmdc\"\n\n[discovery]\npattern = \"Chapter*_Summary.md\"\n"
        )
        .unwrap();

        let config = load_config(Some(file.path())).expect("Loading should succeed");

        assert_eq!(config.tools().renderer(), Path::new("/opt/mmdc"));
        // Unset fields keep their defaults
        assert_eq!(config.tools().converter(), Path::new("pandoc"));
        assert_eq!(config.discovery().pattern(), "Chapter*_Summary.md");
        assert_eq!(config.render().scale(), 2);
        assert!(!config.batch().fail_fast());
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "not really toml [").unwrap();

        let err = load_config(Some(file.path())).expect_err("Loading should fail");
        assert!(err.to_string().contains("Failed to parse TOML configuration"));
    }

    #[test]
    fn command_line_overrides_win_over_config() {
        let mut config = AppConfig::default();
        let args = Args::parse_from([
            "mdocx",
            "--renderer",
            "/opt/mmdc",
            "--scale",
            "4",
            "--fail-fast",
        ]);

        apply_overrides(&mut config, &args);

        assert_eq!(config.tools().renderer(), Path::new("/opt/mmdc"));
        assert_eq!(config.tools().converter(), Path::new("pandoc"));
        assert_eq!(config.render().scale(), 4);
        assert!(config.batch().fail_fast());
    }
}
