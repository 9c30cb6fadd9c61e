//! Shared path helpers for the CLI and TUI.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Gets the cross-platform data directory for vta.
///
/// Returns `{data_dir}/vta` where `data_dir` is:
/// - Linux: `~/.local/share`
/// - macOS: `~/Library/Application Support`
/// - Windows: `C:\Users\<user>\AppData\Roaming`
///
/// # Errors
///
/// Returns an error if the data directory cannot be determined.
pub fn get_data_directory() -> Result<PathBuf> {
    let data_dir =
        dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Failed to determine data directory"))?;

    Ok(data_dir.join("vta"))
}

/// Gets the path of the TUI log file, `{data_dir}/vta/vta.log`.
///
/// # Errors
///
/// Returns an error if the data directory cannot be determined.
pub fn get_log_path() -> Result<PathBuf> {
    Ok(get_data_directory()?.join("vta.log"))
}

/// Ensures the parent directory of a file exists.
///
/// Creates the directory structure if it doesn't exist using `create_dir_all`.
///
/// # Errors
///
/// Returns an error if directory creation fails.
pub fn ensure_parent_directory(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}
