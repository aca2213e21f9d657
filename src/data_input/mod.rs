// src/data_input/mod.rs

pub mod json_file;
pub mod lidar;
pub mod snapshot;
pub mod wod;

// src/data_input/mod.rs
