//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{LedgerError, LedgerResult};

/// Read a whole file, returning `None` if it doesn't exist
pub fn read_bytes_optional<P: AsRef<Path>>(path: P) -> LedgerResult<Option<Vec<u8>>> {
    let path = path.as_ref();

    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(LedgerError::Io(format!(
            "Failed to read {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Path of the temp file used while writing `path`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write bytes to a file atomically (write to temp, then rename)
///
/// This ensures that the file is either completely written or not modified at all,
/// preventing corruption on crashes or power failures. Every failure is
/// reported as `PersistenceFailed`.
pub fn write_bytes_atomic<P: AsRef<Path>>(path: P, data: &[u8]) -> LedgerResult<()> {
    let path = path.as_ref();

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            LedgerError::PersistenceFailed(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Create temp file in same directory (important for atomic rename)
    let temp_path = temp_path_for(path);

    let result = write_and_sync(&temp_path, data).and_then(|()| {
        fs::rename(&temp_path, path).map_err(|e| {
            LedgerError::PersistenceFailed(format!("Failed to rename temp file: {}", e))
        })
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    result
}

fn write_and_sync(temp_path: &Path, data: &[u8]) -> LedgerResult<()> {
    let file = File::create(temp_path).map_err(|e| {
        LedgerError::PersistenceFailed(format!(
            "Failed to create temp file {}: {}",
            temp_path.display(),
            e
        ))
    })?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(data)
        .map_err(|e| LedgerError::PersistenceFailed(format!("Failed to write data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| LedgerError::PersistenceFailed(format!("Failed to flush data: {}", e)))?;

    // Sync to disk before rename
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| LedgerError::PersistenceFailed(format!("Failed to sync data: {}", e)))
}
