//! Filesystem helpers — YAML loading, directory creation, sizes.

use crate::config_box::ConfigBox;
use crate::error::{ConfigError, Result};
use std::path::Path;

/// Read a YAML document into a [`ConfigBox`].
///
/// An empty document (no content, or only comments) is a
/// [`ConfigError::EmptyFile`]. Parse errors and I/O errors are returned as-is.
pub fn read_yaml(path: &Path) -> Result<ConfigBox> {
    let content = std::fs::read_to_string(path)?;
    let document: serde_yaml::Value = serde_yaml::from_str(&content)?;
    if document.is_null() {
        return Err(ConfigError::EmptyFile {
            path: path.to_path_buf(),
        }
        .into());
    }

    let value = serde_json::to_value(&document)?;
    let config = ConfigBox::from_value(value)?;
    tracing::info!(path = %path.display(), "yaml file loaded successfully");
    Ok(config)
}

/// Create each directory along with any missing parents.
///
/// Directories that already exist are left alone.
pub fn create_directories<P: AsRef<Path>>(paths: &[P], verbose: bool) -> Result<()> {
    for path in paths {
        let path = path.as_ref();
        std::fs::create_dir_all(path)?;
        if verbose {
            tracing::info!(path = %path.display(), "created directory");
        }
    }
    Ok(())
}

/// Human-readable file size in kilobytes, e.g. `~ 12 KB`.
pub fn get_size(path: &Path) -> Result<String> {
    let bytes = std::fs::metadata(path)?.len();
    Ok(format_size_kb(bytes))
}

fn format_size_kb(bytes: u64) -> String {
    // Ties go to the even neighbour: 2560 bytes is "~ 2 KB".
    let size_in_kb = (bytes as f64 / 1024.0).round_ties_even() as u64;
    format!("~ {size_in_kb} KB")
}
