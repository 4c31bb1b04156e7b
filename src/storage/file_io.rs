//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{TrackerError, TrackerResult};

/// Temp file used while replacing `path`; lives in the same directory so the
/// final rename stays on one filesystem
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Create the parent directory of `path` if needed
pub fn ensure_parent_dir(path: &Path) -> TrackerResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            TrackerError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }
    Ok(())
}

/// Replace `path` atomically: `produce` writes the new content to the given
/// temp path, which is then renamed over `path`
pub fn replace_atomic<F>(path: &Path, produce: F) -> TrackerResult<()>
where
    F: FnOnce(&Path) -> TrackerResult<()>,
{
    ensure_parent_dir(path)?;
    let temp_path = temp_path_for(path);

    if let Err(e) = produce(&temp_path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        TrackerError::Storage(format!("Failed to rename temp file: {}", e))
    })
}

/// Write a file atomically through a buffered writer, syncing before the rename
pub fn write_atomic<F>(path: &Path, write: F) -> TrackerResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> TrackerResult<()>,
{
    replace_atomic(path, |temp_path| {
        let file = File::create(temp_path)
            .map_err(|e| TrackerError::Storage(format!("Failed to create temp file: {}", e)))?;

        let mut writer = BufWriter::new(file);
        write(&mut writer)?;

        writer
            .flush()
            .map_err(|e| TrackerError::Storage(format!("Failed to flush data: {}", e)))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| TrackerError::Storage(format!("Failed to sync data: {}", e)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.csv");

        write_atomic(&path, |w| Ok(w.write_all(b"hello")?)).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
        assert!(!temp_dir.path().join("data.csv.tmp").exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("data.csv");

        write_atomic(&path, |w| Ok(w.write_all(b"x")?)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_failed_write_keeps_old_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.csv");
        fs::write(&path, "old").unwrap();

        let result = write_atomic(&path, |w| {
            w.write_all(b"partial")?;
            Err(TrackerError::Storage("boom".into()))
        });

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "old");
        assert!(!temp_dir.path().join("data.csv.tmp").exists());
    }
}
