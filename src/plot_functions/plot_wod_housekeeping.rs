// src/plot_functions/plot_wod_housekeeping.rs

use std::path::Path;

use crate::constants::{
    COLOR_BATT_CURRENT, COLOR_BATT_VOLTAGE, COLOR_CURRENT_3V3, COLOR_CURRENT_5V,
    COLOR_TEMP_BATTERY, COLOR_TEMP_COMM, COLOR_TEMP_EPS, LINE_WIDTH_PLOT, WOD_IMAGE_FILE,
};
use crate::data_input::wod::{WodBatch, WodChannel};
use crate::plot_framework::{
    calculate_range, draw_stacked_plot, value_bounds, x_bounds, PlotConfig, PlotSeries,
    SecondaryAxis,
};
use crate::types::{RenderResult, SourceResult};

/// Chart rows of the housekeeping figure, top to bottom.
pub const WOD_CHART_NAMES: [&str; 3] = ["Temperature", "Battery", "Bus Current"];

fn channel_series(wod: &WodBatch, channel: WodChannel, color: plotters::style::RGBColor) -> PlotSeries {
    PlotSeries {
        data: wod.series(channel),
        label: channel.label().to_string(),
        color,
        stroke_width: LINE_WIDTH_PLOT,
    }
}

/// Builds one row of the figure, or the reason it has nothing to show.
pub fn wod_chart(wod: &WodBatch, chart_index: usize) -> Result<PlotConfig, String> {
    let (title, y_label, series, secondary_series, secondary_label) = match chart_index {
        0 => (
            "Temperatures",
            "Temperature (°C)",
            vec![
                channel_series(wod, WodChannel::TempComm, *COLOR_TEMP_COMM),
                channel_series(wod, WodChannel::TempEps, *COLOR_TEMP_EPS),
                channel_series(wod, WodChannel::TempBattery, *COLOR_TEMP_BATTERY),
            ],
            Vec::new(),
            "",
        ),
        1 => (
            "Battery Voltage and Current",
            "Voltage (V)",
            vec![channel_series(wod, WodChannel::BattVoltage, *COLOR_BATT_VOLTAGE)],
            vec![channel_series(wod, WodChannel::BattCurrent, *COLOR_BATT_CURRENT)],
            "Current (mA)",
        ),
        2 => (
            "Regulated Bus Currents",
            "Current (mA)",
            vec![
                channel_series(wod, WodChannel::Current3v3, *COLOR_CURRENT_3V3),
                channel_series(wod, WodChannel::Current5v, *COLOR_CURRENT_5V),
            ],
            Vec::new(),
            "",
        ),
        _ => return Err("Unknown chart".to_string()),
    };

    let x_range = x_bounds(series.iter().chain(&secondary_series))
        .ok_or_else(|| "No samples with these channels".to_string())?;

    // With a twin axis, an empty primary still gets a nominal range so the secondary can draw.
    let (y_min, y_max) = value_bounds(&series)
        .map(|(lo, hi)| calculate_range(lo, hi))
        .unwrap_or((0.0, 1.0));

    let secondary = if secondary_series.is_empty() {
        None
    } else {
        let (sec_min, sec_max) = value_bounds(&secondary_series)
            .map(|(lo, hi)| calculate_range(lo, hi))
            .unwrap_or((0.0, 1.0));
        Some(SecondaryAxis {
            y_range: sec_min..sec_max,
            y_label: secondary_label.to_string(),
            series: secondary_series,
        })
    };

    Ok(PlotConfig {
        title: title.to_string(),
        x_range,
        y_range: y_min..y_max,
        series,
        x_label: wod.x_label().to_string(),
        y_label: y_label.to_string(),
        secondary,
    })
}

/// Generates the stacked housekeeping figure for the latest WOD batch.
///
/// When the WOD source is unavailable every row shows the failure reason.
pub fn plot_wod_housekeeping(
    wod: &SourceResult<WodBatch>,
    output_dir: &Path,
) -> RenderResult {
    let output_file = output_dir.join(WOD_IMAGE_FILE);
    let root_name = match wod {
        Ok(batch) => format!("Whole-Orbit Data ({} samples)", batch.samples.len()),
        Err(_) => "Whole-Orbit Data".to_string(),
    };

    draw_stacked_plot(&output_file, &root_name, &WOD_CHART_NAMES, |chart_index| {
        match wod {
            Ok(batch) => wod_chart(batch, chart_index),
            Err(err) => Err(err.placeholder_reason().to_string()),
        }
    })?;
    Ok(output_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::wod::WodSample;

    fn batch() -> WodBatch {
        WodBatch {
            samples: vec![
                WodSample {
                    batt_voltage: Some(7.4),
                    batt_current: Some(-120.0),
                    temp_eps: Some(20.0),
                    ..Default::default()
                },
                WodSample {
                    batt_voltage: Some(7.2),
                    batt_current: Some(-80.0),
                    temp_eps: Some(24.0),
                    ..Default::default()
                },
            ],
        }
    }

    #[test]
    fn test_battery_chart_uses_twin_axis() {
        let config = wod_chart(&batch(), 1).unwrap();
        assert_eq!(config.series.len(), 1);
        assert_eq!(config.series[0].data, vec![(0.0, 7.4), (1.0, 7.2)]);

        let secondary = config.secondary.expect("battery current on secondary axis");
        assert_eq!(secondary.series[0].data, vec![(0.0, -120.0), (1.0, -80.0)]);
        assert!(secondary.y_range.start < -120.0 && secondary.y_range.end > -80.0);
        assert_eq!(config.x_range, 0.0..1.0);
    }

    #[test]
    fn test_temperature_chart_keeps_empty_channels_out_of_range() {
        let config = wod_chart(&batch(), 0).unwrap();
        assert!(config.secondary.is_none());
        assert_eq!(config.series.len(), 3);
        // Only temp_eps has data: 20..24 padded by 15%.
        assert!((config.y_range.start - 19.4).abs() < 1e-9);
        assert!((config.y_range.end - 24.6).abs() < 1e-9);
    }

    #[test]
    fn test_chart_without_channels_reports_reason() {
        let reason = wod_chart(&batch(), 2).unwrap_err();
        assert_eq!(reason, "No samples with these channels");
    }
}

// src/plot_functions/plot_wod_housekeeping.rs
