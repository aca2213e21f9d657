// src/error.rs

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a telemetry file could not be turned into a current record.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("{} not found", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} does not hold a JSON list", .path.display())]
    NotAList { path: PathBuf },

    #[error("{} holds an empty list", .path.display())]
    Empty { path: PathBuf },

    #[error("latest entry in {} is malformed: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("lidar grid in {} is {rows}x{cols}, expected {expected}x{expected}", .path.display())]
    GridShape {
        path: PathBuf,
        rows: usize,
        cols: usize,
        expected: usize,
    },
}

impl TelemetryError {
    /// A missing file is the normal state before the pipeline's first write.
    pub fn is_missing(&self) -> bool {
        matches!(self, TelemetryError::NotFound { .. })
    }

    /// Short reason suitable for a placeholder message on a plot.
    pub fn placeholder_reason(&self) -> &'static str {
        match self {
            TelemetryError::NotFound { .. } => "File not found",
            TelemetryError::Io { .. } => "File unreadable",
            TelemetryError::Json { .. } => "Malformed JSON",
            TelemetryError::NotAList { .. } => "Not a JSON list",
            TelemetryError::Empty { .. } => "No entries yet",
            TelemetryError::Malformed { .. } => "Malformed entry",
            TelemetryError::GridShape { .. } => "Unexpected grid shape",
        }
    }
}

/// Configuration loading and validation failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {} not found", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid setting: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_distinguished() {
        let missing = TelemetryError::NotFound {
            path: PathBuf::from("pose_data.json"),
        };
        let empty = TelemetryError::Empty {
            path: PathBuf::from("pose_data.json"),
        };
        assert!(missing.is_missing());
        assert!(!empty.is_missing());
    }

    #[test]
    fn test_display_names_path() {
        let err = TelemetryError::GridShape {
            path: PathBuf::from("lidar_data.json"),
            rows: 7,
            cols: 8,
            expected: 8,
        };
        assert_eq!(
            err.to_string(),
            "lidar grid in lidar_data.json is 7x8, expected 8x8"
        );
        assert_eq!(err.placeholder_reason(), "Unexpected grid shape");
    }
}
