//! Input document discovery.
//!
//! Globs a filename pattern inside the configured input directory. Results
//! are sorted so batch runs process documents in a deterministic order.

use std::path::PathBuf;

use log::debug;

use crate::config::DiscoveryConfig;
use crate::error::MdocxError;

/// Find all input documents matching the configured pattern, sorted by path.
///
/// Unreadable directory entries are skipped rather than failing the batch.
///
/// # Errors
///
/// Returns [`MdocxError::Pattern`] if the configured pattern is not a valid
/// glob.
pub fn discover_inputs(config: &DiscoveryConfig) -> Result<Vec<PathBuf>, MdocxError> {
    let pattern = config.input_dir().join(config.pattern());
    let pattern = pattern.to_string_lossy();

    let mut files: Vec<PathBuf> = glob::glob(&pattern)
        .map_err(|err| MdocxError::new_pattern_error(pattern.as_ref(), err))?
        .flatten()
        .filter(|path| path.is_file())
        .collect();

    // Sort for consistent processing order
    files.sort();

    debug!(pattern = pattern.as_ref(), count = files.len(); "Discovered input documents");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use tempfile::tempdir;

    #[test]
    fn matches_are_sorted_and_filtered_to_files() {
        let dir = tempdir().expect("Failed to create temp directory");
        fs::write(dir.path().join("b_summary.md"), "b").unwrap();
        fs::write(dir.path().join("a_summary.md"), "a").unwrap();
        fs::write(dir.path().join("notes.txt"), "skip").unwrap();
        fs::create_dir(dir.path().join("sub_summary.md.d")).unwrap();

        let config = DiscoveryConfig::new(dir.path().to_path_buf(), "*_summary.md".to_string());
        let files = discover_inputs(&config).expect("Discovery should succeed");

        assert_eq!(
            files,
            vec![
                dir.path().join("a_summary.md"),
                dir.path().join("b_summary.md"),
            ]
        );
    }

    #[test]
    fn no_matches_is_an_empty_list() {
        let dir = tempdir().expect("Failed to create temp directory");
        let config = DiscoveryConfig::new(dir.path().to_path_buf(), "*.md".to_string());
        assert!(discover_inputs(&config).expect("Discovery should succeed").is_empty());
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let dir = tempdir().expect("Failed to create temp directory");
        let config = DiscoveryConfig::new(dir.path().to_path_buf(), "[".to_string());
        let err = discover_inputs(&config).expect_err("Pattern should be invalid");
        assert!(matches!(err, MdocxError::Pattern { .. }), "got {err:?}");
    }
}
