// src/plot_framework.rs

use ndarray::Array2;
use plotters::backend::{BitMapBackend, DrawingBackend};
use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{Circle, PathElement, Rectangle, Text};
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, RED, WHITE};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color, IntoFont, RGBColor, TextStyle};

use std::error::Error;
use std::ops::Range;
use std::path::Path;
use tracing::info;

use crate::constants::{
    COLOR_BLOB_MARKER, FONT_FAMILY, FONT_SIZE_AXIS_LABEL, FONT_SIZE_CELL_LABEL,
    FONT_SIZE_CHART_TITLE, FONT_SIZE_LEGEND, FONT_SIZE_MAIN_TITLE, FONT_SIZE_MESSAGE,
    FONT_SIZE_PANEL_LINE, FONT_SIZE_PANEL_TITLE, HEATMAP_PLOT_SIZE, LIDAR_BLOB_RADIUS_PX,
    LINE_WIDTH_LEGEND, PLOT_HEIGHT, PLOT_WIDTH, RANGE_PADDING_FLAT, RANGE_PADDING_FRACTION,
};
use crate::types::SeriesPoints;

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Calculate plot range with padding.
/// Adds 15% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 {
        RANGE_PADDING_FLAT
    } else {
        range * RANGE_PADDING_FRACTION
    };
    (min - padding, max + padding)
}

/// Y-axis labels requested per chart; the formatter sizes decimals against this tick density.
const Y_LABEL_COUNT: usize = 10;
const MAX_Y_LABEL_DECIMALS: f64 = 6.0;

/// Decimals needed so adjacent ticks over `span` never print the same text.
fn y_label_decimals(span: f64, scale: f64) -> usize {
    let step = span / Y_LABEL_COUNT as f64 / scale;
    if !step.is_finite() || step <= 0.0 {
        return 0;
    }
    (-step.log10()).ceil().clamp(0.0, MAX_Y_LABEL_DECIMALS) as usize
}

/// Y-axis tick label: "k"/"M" for large magnitudes, with precision taken from the axis span.
pub fn format_y_axis_label(y: f64, span: f64) -> String {
    let (scale, suffix) = if y.abs() >= 1_000_000.0 {
        (1_000_000.0, "M")
    } else if y.abs() >= 1000.0 {
        (1000.0, "k")
    } else {
        (1.0, "")
    };
    let decimals = y_label_decimals(span, scale);
    // Normalize -0.0 so the zero tick never prints a sign.
    let scaled = if y == 0.0 { 0.0 } else { y / scale };
    format!("{scaled:.decimals$}{suffix}")
}

/// Min and max over all points of the given series, `None` when they are all empty.
pub fn value_bounds<'a>(series: impl IntoIterator<Item = &'a PlotSeries>) -> Option<(f64, f64)> {
    let mut bounds: Option<(f64, f64)> = None;
    for s in series {
        for &(_, y) in &s.data {
            bounds = Some(match bounds {
                Some((lo, hi)) => (lo.min(y), hi.max(y)),
                None => (y, y),
            });
        }
    }
    bounds
}

/// X extent over all points of the given series. A single x value is widened so the range is valid.
pub fn x_bounds<'a>(series: impl IntoIterator<Item = &'a PlotSeries>) -> Option<Range<f64>> {
    let mut bounds: Option<(f64, f64)> = None;
    for s in series {
        for &(x, _) in &s.data {
            bounds = Some(match bounds {
                Some((lo, hi)) => (lo.min(x), hi.max(x)),
                None => (x, x),
            });
        }
    }
    bounds.map(|(lo, hi)| {
        if hi > lo {
            lo..hi
        } else {
            (lo - RANGE_PADDING_FLAT)..(hi + RANGE_PADDING_FLAT)
        }
    })
}

/// Draw a "Data Unavailable" message on a plot area.
pub fn draw_unavailable_message(
    area: &Area,
    chart_name: &str,
    reason: &str,
) -> Result<(), Box<dyn Error>> {
    // Approximate character width relative to font size
    const CHAR_WIDTH_RATIO: f32 = 0.6;
    const LINE_HEIGHT_SPACING: i32 = 4;

    let (x_range, y_range) = area.get_pixel_range();
    let (width, height) = (x_range.end - x_range.start, y_range.end - y_range.start);
    let message = format!("{chart_name} Data Unavailable:\n{reason}");

    let estimated_char_width = (FONT_SIZE_MESSAGE as f32 * CHAR_WIDTH_RATIO) as i32;
    let estimated_line_height = FONT_SIZE_MESSAGE + LINE_HEIGHT_SPACING;

    let lines: Vec<&str> = message.split('\n').collect();
    let max_line_length = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
    let estimated_text_width = max_line_length as i32 * estimated_char_width;

    let start_x = (width / 2 - estimated_text_width / 2).max(0);
    let start_y = height / 2 - (lines.len() as i32 * estimated_line_height) / 2;

    let text_style = (FONT_FAMILY, FONT_SIZE_MESSAGE).into_font().color(&RED);
    for (i, line) in lines.iter().enumerate() {
        area.draw(&Text::new(
            line.to_string(),
            (start_x, start_y + i as i32 * estimated_line_height),
            text_style.clone(),
        ))?;
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct PlotSeries {
    pub data: SeriesPoints,
    pub label: String,
    pub color: RGBColor,
    pub stroke_width: u32,
}

/// Series plotted against a second y-axis on the right-hand side.
#[derive(Debug, Clone)]
pub struct SecondaryAxis {
    pub y_range: Range<f64>,
    pub y_label: String,
    pub series: Vec<PlotSeries>,
}

#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub title: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub series: Vec<PlotSeries>,
    pub x_label: String,
    pub y_label: String,
    pub secondary: Option<SecondaryAxis>,
}

impl PlotConfig {
    fn has_data(&self) -> bool {
        self.series.iter().any(|s| !s.data.is_empty())
            || self
                .secondary
                .as_ref()
                .is_some_and(|sec| sec.series.iter().any(|s| !s.data.is_empty()))
    }

    fn valid_ranges(&self) -> bool {
        self.x_range.end > self.x_range.start
            && self.y_range.end > self.y_range.start
            && self
                .secondary
                .as_ref()
                .map_or(true, |sec| sec.y_range.end > sec.y_range.start)
    }
}

#[derive(Debug, Clone)]
pub struct HeatmapPlotConfig {
    pub title: String,
    /// Cell values indexed `[row, col]`; row 0 is drawn at the top.
    pub values: Array2<f64>,
    pub min_value: f64,
    pub max_value: f64,
    /// Cells to circle, as `(row, col)`.
    pub markers: Vec<(usize, usize)>,
    pub marker_label: String,
    pub x_label: String,
    pub y_label: String,
}

/// Text block drawn as one column of a panel image.
#[derive(Debug, Clone)]
pub struct TextPanel {
    pub title: String,
    pub lines: Vec<String>,
}

fn map_value_to_color(value: f64, min_value: f64, max_value: f64) -> RGBColor {
    if !value.is_finite() || !min_value.is_finite() || !max_value.is_finite() {
        return RGBColor(0, 0, 0);
    }

    let (min_value, max_value) = if min_value <= max_value {
        (min_value, max_value)
    } else {
        (max_value, min_value)
    };

    // Ensure span is non-zero to avoid division by zero
    let span = (max_value - min_value).max(1e-9);
    let t = ((value.clamp(min_value, max_value) - min_value) / span).clamp(0.0, 1.0);

    let color = colorous::VIRIDIS.eval_continuous(t);
    RGBColor(color.r, color.g, color.b)
}

fn draw_legend_line(color: RGBColor) -> impl Fn((i32, i32)) -> PathElement<(i32, i32)> {
    move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH_LEGEND))
}

/// Draws a line chart, adding a right-hand y-axis when the config carries one.
fn draw_single_chart(area: &Area, plot_config: &PlotConfig) -> Result<(), Box<dyn Error>> {
    let builder_caption = (FONT_FAMILY, FONT_SIZE_CHART_TITLE);
    let y_span = plot_config.y_range.end - plot_config.y_range.start;
    let y_formatter = move |y: &f64| format_y_axis_label(*y, y_span);

    let mut legend_series_count = 0;

    match &plot_config.secondary {
        None => {
            let mut chart = ChartBuilder::on(area)
                .caption(&plot_config.title, builder_caption)
                .margin(5)
                .x_label_area_size(50)
                .y_label_area_size(60)
                .build_cartesian_2d(plot_config.x_range.clone(), plot_config.y_range.clone())?;

            chart
                .configure_mesh()
                .x_desc(&plot_config.x_label)
                .y_desc(&plot_config.y_label)
                .x_labels(20)
                .y_labels(Y_LABEL_COUNT)
                .y_label_formatter(&y_formatter)
                .light_line_style(WHITE.mix(0.7))
                .label_style((FONT_FAMILY, FONT_SIZE_AXIS_LABEL))
                .draw()?;

            for s in plot_config.series.iter().filter(|s| !s.data.is_empty()) {
                let drawn = chart.draw_series(LineSeries::new(
                    s.data.iter().cloned(),
                    s.color.stroke_width(s.stroke_width),
                ))?;
                if !s.label.is_empty() {
                    drawn.label(&s.label).legend(draw_legend_line(s.color));
                    legend_series_count += 1;
                }
            }

            if legend_series_count > 0 {
                chart
                    .configure_series_labels()
                    .position(SeriesLabelPosition::UpperRight)
                    .background_style(WHITE.mix(0.8))
                    .border_style(BLACK)
                    .label_font((FONT_FAMILY, FONT_SIZE_LEGEND))
                    .draw()?;
            }
        }
        Some(secondary) => {
            let mut chart = ChartBuilder::on(area)
                .caption(&plot_config.title, builder_caption)
                .margin(5)
                .x_label_area_size(50)
                .y_label_area_size(60)
                .right_y_label_area_size(60)
                .build_cartesian_2d(plot_config.x_range.clone(), plot_config.y_range.clone())?
                .set_secondary_coord(plot_config.x_range.clone(), secondary.y_range.clone());

            chart
                .configure_mesh()
                .x_desc(&plot_config.x_label)
                .y_desc(&plot_config.y_label)
                .x_labels(20)
                .y_labels(Y_LABEL_COUNT)
                .y_label_formatter(&y_formatter)
                .light_line_style(WHITE.mix(0.7))
                .label_style((FONT_FAMILY, FONT_SIZE_AXIS_LABEL))
                .draw()?;

            let secondary_span = secondary.y_range.end - secondary.y_range.start;
            let secondary_formatter = move |y: &f64| format_y_axis_label(*y, secondary_span);
            chart
                .configure_secondary_axes()
                .y_desc(&secondary.y_label)
                .y_labels(Y_LABEL_COUNT)
                .y_label_formatter(&secondary_formatter)
                .label_style((FONT_FAMILY, FONT_SIZE_AXIS_LABEL))
                .draw()?;

            for s in plot_config.series.iter().filter(|s| !s.data.is_empty()) {
                let drawn = chart.draw_series(LineSeries::new(
                    s.data.iter().cloned(),
                    s.color.stroke_width(s.stroke_width),
                ))?;
                if !s.label.is_empty() {
                    drawn.label(&s.label).legend(draw_legend_line(s.color));
                    legend_series_count += 1;
                }
            }

            for s in secondary.series.iter().filter(|s| !s.data.is_empty()) {
                let drawn = chart.draw_secondary_series(LineSeries::new(
                    s.data.iter().cloned(),
                    s.color.stroke_width(s.stroke_width),
                ))?;
                if !s.label.is_empty() {
                    drawn.label(&s.label).legend(draw_legend_line(s.color));
                    legend_series_count += 1;
                }
            }

            if legend_series_count > 0 {
                chart
                    .configure_series_labels()
                    .position(SeriesLabelPosition::UpperRight)
                    .background_style(WHITE.mix(0.8))
                    .border_style(BLACK)
                    .label_font((FONT_FAMILY, FONT_SIZE_LEGEND))
                    .draw()?;
            }
        }
    }

    Ok(())
}

fn draw_main_title(root_area: &Area, root_name: &str) -> Result<(), Box<dyn Error>> {
    root_area.draw(&Text::new(
        root_name,
        (10, 10),
        (FONT_FAMILY, FONT_SIZE_MAIN_TITLE)
            .into_font()
            .color(&BLACK),
    ))?;
    Ok(())
}

/// Creates a stacked plot image with one row per entry of `chart_names`.
///
/// `get_chart_data` returns the chart for a row, or the reason it cannot be drawn.
pub fn draw_stacked_plot<'a, F>(
    output_path: &'a Path,
    root_name: &str,
    chart_names: &[&str],
    mut get_chart_data: F,
) -> Result<(), Box<dyn Error>>
where
    F: FnMut(usize) -> Result<PlotConfig, String>,
    <BitMapBackend<'a> as DrawingBackend>::ErrorType: 'static,
{
    let root_area =
        BitMapBackend::new(output_path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root_area.fill(&WHITE)?;
    draw_main_title(&root_area, root_name)?;

    let margined_root_area = root_area.margin(50, 5, 5, 5);
    let sub_plot_areas = margined_root_area.split_evenly((chart_names.len().max(1), 1));
    let mut any_chart_plotted = false;

    for (chart_index, (area, chart_name)) in sub_plot_areas.iter().zip(chart_names).enumerate() {
        match get_chart_data(chart_index) {
            Ok(plot_config) => {
                let has_data = plot_config.has_data();
                if has_data && plot_config.valid_ranges() {
                    draw_single_chart(area, &plot_config)?;
                    any_chart_plotted = true;
                } else {
                    let reason = if !has_data {
                        "No data points"
                    } else {
                        "Invalid ranges"
                    };
                    draw_unavailable_message(area, chart_name, reason)?;
                }
            }
            Err(reason) => draw_unavailable_message(area, chart_name, &reason)?,
        }
    }

    root_area.present()?;
    if any_chart_plotted {
        info!("Stacked plot saved as '{}'.", output_path.display());
    } else {
        info!(
            "Stacked plot '{}' saved with placeholder messages only: no chart had data.",
            output_path.display()
        );
    }
    Ok(())
}

/// Cell value text, centered on the cell. Dark on the bright end of viridis, light on the dark end.
fn cell_label_style(value: f64, mid_value: f64) -> TextStyle<'static> {
    let text_color = if value > mid_value { &BLACK } else { &WHITE };
    (FONT_FAMILY, FONT_SIZE_CELL_LABEL)
        .into_font()
        .color(text_color)
        .pos(Pos::new(HPos::Center, VPos::Center))
}

/// Draws a square heatmap with circled marker cells and a value printed in every cell.
fn draw_heatmap_chart(area: &Area, config: &HeatmapPlotConfig) -> Result<(), Box<dyn Error>> {
    let (rows, cols) = config.values.dim();
    // Cell centers sit on integer coordinates; row 0 is the top row.
    let x_range = -0.5..(cols as f64 - 0.5);
    let y_range = -0.5..(rows as f64 - 0.5);
    let top_row = rows as f64 - 1.0;

    let mut chart = ChartBuilder::on(area)
        .caption(&config.title, (FONT_FAMILY, FONT_SIZE_CHART_TITLE))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(&config.x_label)
        .y_desc(&config.y_label)
        .x_labels(cols)
        .y_labels(rows)
        .x_label_formatter(&|x| format!("{:.0}", x))
        .y_label_formatter(&|y| format!("{:.0}", top_row - y.round()))
        .label_style((FONT_FAMILY, FONT_SIZE_AXIS_LABEL))
        .draw()?;

    let cell_center = |row: usize, col: usize| (col as f64, top_row - row as f64);

    chart.draw_series(config.values.indexed_iter().map(|((row, col), &value)| {
        let (cx, cy) = cell_center(row, col);
        let color = map_value_to_color(value, config.min_value, config.max_value);
        Rectangle::new([(cx - 0.5, cy - 0.5), (cx + 0.5, cy + 0.5)], color.filled())
    }))?;

    let mid_value = (config.min_value + config.max_value) / 2.0;
    chart.draw_series(config.values.indexed_iter().map(|((row, col), &value)| {
        Text::new(
            format!("{value:.1}"),
            cell_center(row, col),
            cell_label_style(value, mid_value),
        )
    }))?;

    if !config.markers.is_empty() {
        chart
            .draw_series(config.markers.iter().map(|&(row, col)| {
                Circle::new(
                    cell_center(row, col),
                    LIDAR_BLOB_RADIUS_PX,
                    COLOR_BLOB_MARKER.stroke_width(3),
                )
            }))?
            .label(&config.marker_label)
            .legend(|(x, y)| Circle::new((x + 10, y), 5, COLOR_BLOB_MARKER.stroke_width(2)));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font((FONT_FAMILY, FONT_SIZE_LEGEND))
            .draw()?;
    }

    Ok(())
}

/// Creates a square heatmap image, or a placeholder when `heatmap` carries a failure reason.
pub fn draw_heatmap_plot<'a>(
    output_path: &'a Path,
    root_name: &str,
    plot_type_name: &str,
    heatmap: Result<HeatmapPlotConfig, String>,
) -> Result<(), Box<dyn Error>>
where
    <BitMapBackend<'a> as DrawingBackend>::ErrorType: 'static,
{
    let root_area = BitMapBackend::new(output_path, (HEATMAP_PLOT_SIZE, HEATMAP_PLOT_SIZE))
        .into_drawing_area();
    root_area.fill(&WHITE)?;
    draw_main_title(&root_area, root_name)?;
    let area = root_area.margin(50, 5, 5, 5);

    match heatmap {
        Ok(config) if !config.values.is_empty() => {
            draw_heatmap_chart(&area, &config)?;
            root_area.present()?;
            info!("Heatmap plot saved as '{}'.", output_path.display());
        }
        Ok(_) => {
            draw_unavailable_message(&area, plot_type_name, "No data points")?;
            root_area.present()?;
        }
        Err(reason) => {
            draw_unavailable_message(&area, plot_type_name, &reason)?;
            root_area.present()?;
            info!(
                "Heatmap plot '{}' saved with placeholder message: {reason}.",
                output_path.display()
            );
        }
    }
    Ok(())
}

/// Creates an image with one column of text per panel.
pub fn draw_text_panels<'a>(
    output_path: &'a Path,
    root_name: &str,
    panels: &[TextPanel],
) -> Result<(), Box<dyn Error>>
where
    <BitMapBackend<'a> as DrawingBackend>::ErrorType: 'static,
{
    const LINE_SPACING_PX: i32 = 8;
    const COLUMN_PADDING_PX: i32 = 20;

    let root_area =
        BitMapBackend::new(output_path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root_area.fill(&WHITE)?;
    draw_main_title(&root_area, root_name)?;

    let columns = root_area
        .margin(60, 10, 10, 10)
        .split_evenly((1, panels.len().max(1)));

    for (area, panel) in columns.iter().zip(panels) {
        area.draw(&Text::new(
            panel.title.clone(),
            (COLUMN_PADDING_PX, 0),
            (FONT_FAMILY, FONT_SIZE_PANEL_TITLE)
                .into_font()
                .color(&BLACK),
        ))?;

        let mut y = FONT_SIZE_PANEL_TITLE + 2 * LINE_SPACING_PX;
        for line in &panel.lines {
            area.draw(&Text::new(
                line.clone(),
                (COLUMN_PADDING_PX, y),
                (FONT_FAMILY, FONT_SIZE_PANEL_LINE)
                    .into_font()
                    .color(&BLACK),
            ))?;
            y += FONT_SIZE_PANEL_LINE + LINE_SPACING_PX;
        }
    }

    root_area.present()?;
    info!("Panel image saved as '{}'.", output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotters::style::colors::BLUE;

    fn series(points: &[(f64, f64)]) -> PlotSeries {
        PlotSeries {
            data: points.to_vec(),
            label: String::new(),
            color: BLUE,
            stroke_width: 1,
        }
    }

    #[test]
    fn test_calculate_range_pads_span() {
        let (lo, hi) = calculate_range(0.0, 10.0);
        assert!((lo + 1.5).abs() < 1e-9);
        assert!((hi - 11.5).abs() < 1e-9);
    }

    #[test]
    fn test_calculate_range_flat_and_swapped() {
        assert_eq!(calculate_range(3.0, 3.0), (2.5, 3.5));
        let (lo, hi) = calculate_range(10.0, 0.0);
        assert!(lo < 0.0 && hi > 10.0);
    }

    #[test]
    fn test_value_bounds_across_series() {
        let a = series(&[(0.0, 2.0), (1.0, -1.0)]);
        let b = series(&[(0.0, 5.0)]);
        let empty = series(&[]);
        assert_eq!(value_bounds([&a, &b, &empty]), Some((-1.0, 5.0)));
        assert_eq!(value_bounds([&empty]), None);
    }

    #[test]
    fn test_x_bounds_widens_single_point() {
        let single = series(&[(4.0, 1.0)]);
        assert_eq!(x_bounds([&single]), Some(3.5..4.5));
        let pair = series(&[(4.0, 1.0), (9.0, 2.0)]);
        assert_eq!(x_bounds([&pair]), Some(4.0..9.0));
    }

    #[test]
    fn test_color_map_endpoints() {
        let low = map_value_to_color(0.0, 0.0, 10.0);
        let high = map_value_to_color(10.0, 0.0, 10.0);
        let first = colorous::VIRIDIS.eval_continuous(0.0);
        let last = colorous::VIRIDIS.eval_continuous(1.0);
        assert_eq!((low.0, low.1, low.2), (first.r, first.g, first.b));
        assert_eq!((high.0, high.1, high.2), (last.r, last.g, last.b));
        // Flat grids must not divide by zero.
        let flat = map_value_to_color(5.0, 5.0, 5.0);
        assert_eq!((flat.0, flat.1, flat.2), (first.r, first.g, first.b));
    }

    #[test]
    fn test_cell_labels_are_centered() {
        let style = cell_label_style(1.0, 2.0);
        assert!(matches!(style.pos.h_pos, HPos::Center));
        assert!(matches!(style.pos.v_pos, VPos::Center));
    }

    #[test]
    fn test_plot_config_availability() {
        let config = PlotConfig {
            title: "t".to_string(),
            x_range: 0.0..1.0,
            y_range: 0.0..1.0,
            series: vec![series(&[])],
            x_label: String::new(),
            y_label: String::new(),
            secondary: Some(SecondaryAxis {
                y_range: 0.0..1.0,
                y_label: String::new(),
                series: vec![series(&[(0.0, 0.5)])],
            }),
        };
        assert!(config.has_data());
        assert!(config.valid_ranges());
    }
}

// src/plot_framework.rs
