use crate::domain::ListSnapshot;
use crate::infra::errors::StorageError;
use tempfile::NamedTempFile;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

pub fn list_path(lists_dir: &Path, name: &str) -> PathBuf {
    lists_dir.join(format!("{name}.json"))
}

/// Loads the persisted snapshot of a list. A missing file is an empty list at version 0.0.0.
pub fn load_snapshot(path: &Path) -> Result<ListSnapshot, StorageError> {
    let display = path.display().to_string();

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(ListSnapshot::default()),
        Err(err) => return Err(StorageError::UnableToRead(display, err.to_string())),
    };

    serde_json::from_str(&content).map_err(|err| StorageError::Malformed(display, err.to_string()))
}

/// Writes through a temporary file in the same directory, so a failed write never leaves
/// a truncated list or a stray temporary file behind.
pub fn save_snapshot(path: &Path, snapshot: &ListSnapshot) -> Result<(), StorageError> {
    let display = path.display().to_string();
    let write_err = |err: std::io::Error| StorageError::UnableToWrite(display.clone(), err.to_string());

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(write_err)?;

    let content = serde_json::to_string_pretty(snapshot)
        .map_err(|err| StorageError::UnableToWrite(display.clone(), err.to_string()))?;

    let mut file = NamedTempFile::new_in(parent).map_err(write_err)?;
    file.write_all(content.as_bytes()).map_err(write_err)?;
    file.persist(path).map_err(|err| write_err(err.error))?;

    Ok(())
}
