// src/plot_functions/plot_lidar_heatmap.rs

use std::path::Path;

use crate::constants::LIDAR_IMAGE_FILE;
use crate::data_input::lidar::LidarFrame;
use crate::plot_framework::{draw_heatmap_plot, HeatmapPlotConfig};
use crate::types::{RenderResult, SourceResult};

/// Heatmap settings for a lidar frame, colored over the frame's own min/max.
pub fn lidar_heatmap_config(frame: &LidarFrame) -> HeatmapPlotConfig {
    let (min_value, max_value) = frame.value_range().unwrap_or((0.0, 1.0));
    HeatmapPlotConfig {
        title: format!(
            "Lidar Frame {} (distance {min_value:.1} to {max_value:.1}, {} debris blob{})",
            frame.label,
            frame.blobs.len(),
            if frame.blobs.len() == 1 { "" } else { "s" }
        ),
        values: frame.grid.clone(),
        min_value,
        max_value,
        markers: frame.blobs.clone(),
        marker_label: "Debris blob".to_string(),
        x_label: "Column".to_string(),
        y_label: "Row".to_string(),
    }
}

/// Generates the lidar distance heatmap with the debris overlay.
pub fn plot_lidar_heatmap(
    lidar: &SourceResult<LidarFrame>,
    output_dir: &Path,
) -> RenderResult {
    let output_file = output_dir.join(LIDAR_IMAGE_FILE);
    let heatmap = match lidar {
        Ok(frame) => Ok(lidar_heatmap_config(frame)),
        Err(err) => Err(err.placeholder_reason().to_string()),
    };

    draw_heatmap_plot(&output_file, "Lidar / Debris", "Lidar", heatmap)?;
    Ok(output_file)
}


// src/plot_functions/plot_lidar_heatmap.rs
