//! File download sink.
//!
//! Generated exports are "downloaded" by writing them into a directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{AppError, Result};

/// Writes `bytes` to `dir/file_name`, creating the directory if needed.
///
/// # Errors
/// Returns error if the directory or file cannot be written.
pub fn save_download(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .map_err(|e| AppError::io(format!("Failed to create directory {}", dir.display()), e))?;

    let path = dir.join(file_name);
    fs::write(&path, bytes)
        .map_err(|e| AppError::io(format!("Failed to write {}", path.display()), e))?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "Saved download");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_creates_directory() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("exports");

        let path = save_download(&target, "visitantes.csv", b"abc").unwrap();

        assert_eq!(path, target.join("visitantes.csv"));
        assert_eq!(fs::read(&path).unwrap(), b"abc");
    }
}
