// src/data_input/lidar.rs

use ndarray::Array2;
use ndarray_stats::QuantileExt;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

use crate::constants::{DEBRIS_FILE, LIDAR_FILE, LIDAR_GRID_SIZE};
use crate::data_input::json_file::{read_entries, require_last_entry};
use crate::error::TelemetryError;
use crate::types::SourceResult;

/// Latest lidar frame with the debris blobs detected in it.
#[derive(Debug, Clone, PartialEq)]
pub struct LidarFrame {
    pub label: i64,
    /// Distances indexed `[row, col]`.
    pub grid: Array2<f64>,
    /// Detected blob cells as `(row, col)`.
    pub blobs: Vec<(usize, usize)>,
}

impl LidarFrame {
    /// Smallest and largest distance in the grid.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let min = *self.grid.min().ok()?;
        let max = *self.grid.max().ok()?;
        Some((min, max))
    }
}

/// Labels are integers, but some writers emit them as `3.0`.
fn label_of(entry: &Value) -> Option<i64> {
    let label = entry.get("label")?;
    label.as_i64().or_else(|| {
        label
            .as_f64()
            .filter(|f| f.fract() == 0.0)
            .map(|f| f as i64)
    })
}

fn parse_grid(entry: &Value, path: &Path) -> Result<Array2<f64>, TelemetryError> {
    let malformed = |reason: &str| TelemetryError::Malformed {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let rows = entry
        .get("distances")
        .and_then(Value::as_array)
        .ok_or_else(|| malformed("lidar frame has no \"distances\" list"))?;

    let cols = rows.first().and_then(Value::as_array).map_or(0, Vec::len);
    if rows.len() != LIDAR_GRID_SIZE || cols != LIDAR_GRID_SIZE {
        return Err(TelemetryError::GridShape {
            path: path.to_path_buf(),
            rows: rows.len(),
            cols,
            expected: LIDAR_GRID_SIZE,
        });
    }

    let mut grid = Array2::<f64>::zeros((LIDAR_GRID_SIZE, LIDAR_GRID_SIZE));
    for (row_idx, row) in rows.iter().enumerate() {
        let cells = row
            .as_array()
            .ok_or_else(|| malformed("lidar grid row is not a list"))?;
        if cells.len() != LIDAR_GRID_SIZE {
            return Err(TelemetryError::GridShape {
                path: path.to_path_buf(),
                rows: rows.len(),
                cols: cells.len(),
                expected: LIDAR_GRID_SIZE,
            });
        }
        for (col_idx, cell) in cells.iter().enumerate() {
            grid[[row_idx, col_idx]] = cell
                .as_f64()
                .ok_or_else(|| malformed("lidar grid cell is not a number"))?;
        }
    }
    Ok(grid)
}

/// Blob positions from a detection entry. Off-grid or malformed pairs are dropped.
fn parse_blobs(entry: &Value) -> Vec<(usize, usize)> {
    let Some(blobs) = entry.get("blobs").and_then(Value::as_array) else {
        return Vec::new();
    };
    blobs
        .iter()
        .filter_map(|blob| {
            let pair = blob.as_array()?;
            if pair.len() != 2 {
                return None;
            }
            let row = usize::try_from(pair[0].as_u64()?).ok()?;
            let col = usize::try_from(pair[1].as_u64()?).ok()?;
            (row < LIDAR_GRID_SIZE && col < LIDAR_GRID_SIZE).then_some((row, col))
        })
        .collect()
}

/// Finds the blobs of the most recent detection carrying `label`.
pub fn matching_blobs(detections: &[Value], label: i64) -> Option<Vec<(usize, usize)>> {
    detections
        .iter()
        .rev()
        .find(|entry| label_of(entry) == Some(label))
        .map(parse_blobs)
}

/// Loads the latest lidar frame and overlays the debris detections with the same label.
///
/// A missing or broken debris file only removes the overlay.
pub fn load_lidar(data_dir: &Path) -> SourceResult<LidarFrame> {
    let lidar_path = data_dir.join(LIDAR_FILE);
    let frame = require_last_entry(&lidar_path)?;

    let label = label_of(&frame).ok_or_else(|| TelemetryError::Malformed {
        path: lidar_path.clone(),
        reason: "lidar frame has no integer \"label\"".to_string(),
    })?;
    let grid = parse_grid(&frame, &lidar_path)?;

    let debris_path = data_dir.join(DEBRIS_FILE);
    let blobs = match read_entries(&debris_path) {
        Ok(detections) => matching_blobs(&detections, label).unwrap_or_else(|| {
            debug!(label, "no debris detection matches lidar frame");
            Vec::new()
        }),
        Err(err) if err.is_missing() => {
            debug!("{err}");
            Vec::new()
        }
        Err(err) => {
            warn!("{err}; showing lidar frame without debris overlay");
            Vec::new()
        }
    };

    Ok(LidarFrame { label, grid, blobs })
}


// src/data_input/lidar.rs
