// src/types.rs
// Type aliases shared by the readers and renderers

use std::error::Error;
use std::path::PathBuf;

use crate::error::TelemetryError;

/// A telemetry source for one tick: its data, or why it is unavailable.
pub type SourceResult<T> = Result<T, TelemetryError>;

/// Path of the artifact a renderer wrote.
pub type RenderResult = Result<PathBuf, Box<dyn Error>>;

/// `(x, value)` points of one plotted series.
pub type SeriesPoints = Vec<(f64, f64)>;
