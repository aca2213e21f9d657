// src/data_input/snapshot.rs

use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, warn};

use crate::constants::NO_DATA_MESSAGE;
use crate::data_input::json_file::read_last_entry;
use crate::error::TelemetryError;
use crate::source_names::SnapshotSource;

/// Text panel for one snapshot source: a title followed by `key: value` lines.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotPanel {
    pub title: String,
    pub lines: Vec<String>,
    pub available: bool,
}

impl SnapshotPanel {
    /// Panel shown when the source has no current record.
    pub fn placeholder(source: SnapshotSource) -> Self {
        Self {
            title: source.title().to_string(),
            lines: vec![NO_DATA_MESSAGE.to_string()],
            available: false,
        }
    }

    /// Panel for a record, one line per field in file order.
    pub fn from_record(source: SnapshotSource, record: &Map<String, Value>) -> Self {
        let lines = record
            .iter()
            .map(|(key, value)| format!("{key}: {}", format_value(value)))
            .collect();
        Self {
            title: source.title().to_string(),
            lines,
            available: true,
        }
    }
}

/// Top-level strings are shown bare; everything else is written the way the
/// ground-station scripts print values (`True`, `None`, `['a', 1]`).
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => value_repr(other),
    }
}

/// Single quotes unless the text holds one and no double quote.
fn quoted(text: &str) -> String {
    let escaped = text.replace('\\', "\\\\");
    if escaped.contains('\'') && !escaped.contains('"') {
        format!("\"{escaped}\"")
    } else {
        format!("'{}'", escaped.replace('\'', "\\'"))
    }
}

fn value_repr(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quoted(s),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(value_repr).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(fields) => {
            let fields: Vec<String> = fields
                .iter()
                .map(|(key, value)| format!("{}: {}", quoted(key), value_repr(value)))
                .collect();
            format!("{{{}}}", fields.join(", "))
        }
    }
}

/// Reads the most recent record of a snapshot file.
///
/// `Ok(None)` means the file exists but holds no entries yet.
pub fn read_snapshot_record(path: &Path) -> Result<Option<Map<String, Value>>, TelemetryError> {
    match read_last_entry(path)? {
        None => Ok(None),
        Some(Value::Object(record)) => Ok(Some(record)),
        Some(_) => Err(TelemetryError::Malformed {
            path: path.to_path_buf(),
            reason: "expected a JSON object".to_string(),
        }),
    }
}

/// Builds the panel for `source`, falling back to the placeholder on any failure.
pub fn load_snapshot(source: SnapshotSource, data_dir: &Path) -> SnapshotPanel {
    let path = data_dir.join(source.file_name());
    match read_snapshot_record(&path) {
        Ok(Some(record)) if record.is_empty() => {
            debug!(source = source.title(), "latest snapshot record is empty");
            SnapshotPanel::placeholder(source)
        }
        Ok(Some(record)) => {
            debug!(source = source.title(), fields = record.len(), "snapshot loaded");
            SnapshotPanel::from_record(source, &record)
        }
        Ok(None) => {
            debug!(source = source.title(), "snapshot file has no entries");
            SnapshotPanel::placeholder(source)
        }
        Err(err) if err.is_missing() => {
            debug!(source = source.title(), "{err}");
            SnapshotPanel::placeholder(source)
        }
        Err(err) => {
            warn!(source = source.title(), "{err}");
            SnapshotPanel::placeholder(source)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_panel_lines_follow_file_order() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("pose_data.json"),
            r#"[
                {"roll": 0.0, "pitch": 0.0, "yaw": 0.0},
                {"yaw": 12.5, "roll": -3, "pitch": 0.25, "mode": "nadir"}
            ]"#,
        )
        .unwrap();

        let panel = load_snapshot(SnapshotSource::Pose, dir.path());
        assert!(panel.available);
        assert_eq!(panel.title, "Pose Data");
        assert_eq!(
            panel.lines,
            ["yaw: 12.5", "roll: -3", "pitch: 0.25", "mode: nadir"]
        );
    }

    #[test]
    fn test_missing_file_gives_placeholder() {
        let dir = tempdir().unwrap();
        let panel = load_snapshot(SnapshotSource::Science, dir.path());
        assert_eq!(panel, SnapshotPanel::placeholder(SnapshotSource::Science));
        assert_eq!(panel.lines, [NO_DATA_MESSAGE]);
    }

    #[test]
    fn test_empty_list_gives_placeholder() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("misc_data.json"), "[]").unwrap();
        let panel = load_snapshot(SnapshotSource::Misc, dir.path());
        assert!(!panel.available);
    }

    #[test]
    fn test_non_object_entry_gives_placeholder() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("misc_data.json"), "[1, 2, 3]").unwrap();
        let panel = load_snapshot(SnapshotSource::Misc, dir.path());
        assert!(!panel.available);
    }

    #[test]
    fn test_empty_record_gives_placeholder() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("pose_data.json"), r#"[{"x": 1}, {}]"#).unwrap();
        let panel = load_snapshot(SnapshotSource::Pose, dir.path());
        assert!(!panel.available);
        assert_eq!(panel.lines, [NO_DATA_MESSAGE]);
    }

    #[test]
    fn test_value_formatting() {
        assert_eq!(format_value(&json!("ok")), "ok");
        assert_eq!(format_value(&json!(true)), "True");
        assert_eq!(format_value(&json!(false)), "False");
        assert_eq!(format_value(&json!(null)), "None");
        assert_eq!(format_value(&json!(3.5)), "3.5");
        assert_eq!(format_value(&json!(-3)), "-3");
    }

    #[test]
    fn test_nested_value_formatting() {
        assert_eq!(format_value(&json!([1, "a", null])), "[1, 'a', None]");
        assert_eq!(
            format_value(&json!({"lat": 1.5, "ok": false})),
            "{'lat': 1.5, 'ok': False}"
        );
        assert_eq!(format_value(&json!(["it's"])), r#"["it's"]"#);
    }
}

// src/data_input/snapshot.rs
