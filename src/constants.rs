// src/constants.rs

use plotters::style::colors::full_palette::{AMBER, BLUE, DEEPORANGE, GREEN, LIGHTBLUE, PURPLE, RED};
use plotters::style::RGBColor;

// Plot dimensions.
pub const PLOT_WIDTH: u32 = 1920;
pub const PLOT_HEIGHT: u32 = 1080;
pub const HEATMAP_PLOT_SIZE: u32 = 1080;

// Font sizes.
pub const FONT_SIZE_MAIN_TITLE: i32 = 28;
pub const FONT_SIZE_CHART_TITLE: i32 = 22;
pub const FONT_SIZE_AXIS_LABEL: i32 = 16;
pub const FONT_SIZE_LEGEND: i32 = 16;
pub const FONT_SIZE_MESSAGE: i32 = 24;
pub const FONT_SIZE_PANEL_TITLE: i32 = 35;
pub const FONT_SIZE_PANEL_LINE: i32 = 20;
pub const FONT_SIZE_CELL_LABEL: i32 = 14;

pub const FONT_FAMILY: &str = "sans-serif";

// Stroke widths for lines
pub const LINE_WIDTH_PLOT: u32 = 2;
pub const LINE_WIDTH_LEGEND: u32 = 2;

// Padding added around the data range, as a fraction of the span.
pub const RANGE_PADDING_FRACTION: f64 = 0.15;
// Fixed padding when the data range collapses to (nearly) a single value.
pub const RANGE_PADDING_FLAT: f64 = 0.5;

// --- Data Sources ---
pub const DEFAULT_DATA_DIR: &str = "../data";
pub const DEFAULT_OUTPUT_DIR: &str = "dashboard_out";
pub const DEFAULT_INTERVAL_MS: u64 = 1000;

pub const WOD_FILE: &str = "wod_data.json";
pub const LIDAR_FILE: &str = "lidar_data.json";
pub const DEBRIS_FILE: &str = "debris_data.json";

// --- Output Artifacts ---
pub const PANELS_TEXT_FILE: &str = "panels.txt";
pub const PANELS_IMAGE_FILE: &str = "panels.png";
pub const WOD_IMAGE_FILE: &str = "wod_housekeeping.png";
pub const LIDAR_IMAGE_FILE: &str = "lidar_heatmap.png";

pub const NO_DATA_MESSAGE: &str = "No data available";

// Lidar frames are always square grids of this size.
pub const LIDAR_GRID_SIZE: usize = 8;
pub const LIDAR_BLOB_RADIUS_PX: i32 = 18;

// --- Plot Color Assignments ---
pub const COLOR_TEMP_COMM: &RGBColor = &DEEPORANGE;
pub const COLOR_TEMP_EPS: &RGBColor = &PURPLE;
pub const COLOR_TEMP_BATTERY: &RGBColor = &RED;
pub const COLOR_BATT_VOLTAGE: &RGBColor = &BLUE;
pub const COLOR_BATT_CURRENT: &RGBColor = &AMBER;
pub const COLOR_CURRENT_3V3: &RGBColor = &GREEN;
pub const COLOR_CURRENT_5V: &RGBColor = &LIGHTBLUE;
pub const COLOR_BLOB_MARKER: &RGBColor = &RED;

// src/constants.rs
