// src/plot_functions/mod.rs

pub mod plot_lidar_heatmap;
pub mod plot_text_panels;
pub mod plot_wod_housekeeping;

// src/plot_functions/mod.rs
