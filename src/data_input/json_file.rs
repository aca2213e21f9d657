// src/data_input/json_file.rs

use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::TelemetryError;

/// Reads a telemetry file and returns the last element of its top-level list.
///
/// The pipeline appends to each file, so only the final entry is current.
/// Returns `Ok(None)` when the list is empty.
pub fn read_last_entry(path: &Path) -> Result<Option<Value>, TelemetryError> {
    let mut entries = read_entries(path)?;
    Ok(entries.pop())
}

/// Reads a telemetry file as a list of entries, oldest first.
pub fn read_entries(path: &Path) -> Result<Vec<Value>, TelemetryError> {
    let contents = fs::read_to_string(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            TelemetryError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            TelemetryError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let parsed: Value = serde_json::from_str(&contents).map_err(|source| TelemetryError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    match parsed {
        Value::Array(entries) => Ok(entries),
        _ => Err(TelemetryError::NotAList {
            path: path.to_path_buf(),
        }),
    }
}

/// Like [`read_last_entry`], but treats an empty list as an error.
pub fn require_last_entry(path: &Path) -> Result<Value, TelemetryError> {
    read_last_entry(path)?.ok_or_else(|| TelemetryError::Empty {
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_last_entry_is_returned() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pose_data.json");
        fs::write(&path, r#"[{"x": 1}, {"x": 2}, {"x": 3}]"#).unwrap();

        let last = read_last_entry(&path).unwrap();
        assert_eq!(last, Some(json!({"x": 3})));
    }

    #[test]
    fn test_empty_list_yields_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pose_data.json");
        fs::write(&path, "[]").unwrap();

        assert_eq!(read_last_entry(&path).unwrap(), None);
        assert!(matches!(
            require_last_entry(&path),
            Err(TelemetryError::Empty { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_last_entry(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.is_missing());
    }

    #[test]
    fn test_malformed_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("misc_data.json");
        // A half-written file, as seen when the pipeline is mid-write.
        fs::write(&path, r#"[{"x": 1}, {"x": "#).unwrap();

        assert!(matches!(
            read_last_entry(&path),
            Err(TelemetryError::Json { .. })
        ));
    }

    #[test]
    fn test_top_level_object_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("misc_data.json");
        fs::write(&path, r#"{"x": 1}"#).unwrap();

        assert!(matches!(
            read_last_entry(&path),
            Err(TelemetryError::NotAList { .. })
        ));
    }
}

// src/data_input/json_file.rs
