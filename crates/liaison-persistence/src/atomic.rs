//! Atomic file operations for crash-safe persistence.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{PersistenceError, Result};

/// Serializes a value as pretty JSON and writes it atomically.
///
/// The bytes go to a temporary file in the target directory first, then
/// the temp file is renamed over the destination, so a crash mid-write
/// never leaves a half-written record behind.
pub fn write_json_atomic<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;

    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|source| PersistenceError::DirectoryError {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    // Temp file must live in the same directory for the rename to stay on
    // one filesystem.
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|source| {
        PersistenceError::WriteError {
            path: path.to_path_buf(),
            source,
        }
    })?;

    temp.write_all(json.as_bytes())
        .and_then(|()| temp.flush())
        .map_err(|source| PersistenceError::WriteError {
            path: path.to_path_buf(),
            source,
        })?;

    temp.persist(path).map_err(|e| PersistenceError::WriteError {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    Ok(())
}

/// Reads and deserializes a JSON file.
pub fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path).map_err(|source| PersistenceError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::tempdir;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Sample {
        label: String,
        count: u32,
    }

    #[test]
    fn test_write_then_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sample.json");

        let value = Sample {
            label: "roundtrip".to_string(),
            count: 7,
        };

        write_json_atomic(&path, &value).unwrap();
        let loaded: Sample = load_json(&path).unwrap();

        assert_eq!(loaded, value);
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/deeper/sample.json");

        write_json_atomic(&path, &Sample {
            label: "nested".to_string(),
            count: 1,
        })
        .unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_overwrite_replaces_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sample.json");

        write_json_atomic(&path, &Sample {
            label: "first".to_string(),
            count: 1,
        })
        .unwrap();
        write_json_atomic(&path, &Sample {
            label: "second".to_string(),
            count: 2,
        })
        .unwrap();

        let loaded: Sample = load_json(&path).unwrap();
        assert_eq!(loaded.label, "second");
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let result: Result<Sample> = load_json(&path);
        assert!(matches!(result, Err(PersistenceError::ReadError { .. })));
    }
}
