// src/dashboard.rs

use crossbeam::channel::{Receiver, RecvTimeoutError};
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use crate::config::DashboardConfig;
use crate::data_input::lidar::{load_lidar, LidarFrame};
use crate::data_input::snapshot::{load_snapshot, SnapshotPanel};
use crate::data_input::wod::{load_wod, WodBatch};
use crate::error::ConfigError;
use crate::plot_functions::plot_lidar_heatmap::plot_lidar_heatmap;
use crate::plot_functions::plot_text_panels::{plot_text_panels, write_panels_text};
use crate::plot_functions::plot_wod_housekeeping::plot_wod_housekeeping;
use crate::source_names::SNAPSHOT_SOURCES;
use crate::types::SourceResult;

/// Everything read from the data directory in one tick. Nothing is kept between ticks.
#[derive(Debug)]
pub struct TelemetrySources {
    pub panels: Vec<SnapshotPanel>,
    pub wod: SourceResult<WodBatch>,
    pub lidar: SourceResult<LidarFrame>,
}

/// An artifact that could not be rendered this tick.
#[derive(Debug, Clone)]
pub struct RenderFailure {
    pub artifact: &'static str,
    pub message: String,
}

#[derive(Debug)]
pub struct TickReport {
    pub tick: u64,
    pub sources: TelemetrySources,
    pub artifacts: Vec<PathBuf>,
    pub failures: Vec<RenderFailure>,
}

impl TickReport {
    pub fn panels_available(&self) -> usize {
        self.sources.panels.iter().filter(|p| p.available).count()
    }
}

pub struct Dashboard {
    config: DashboardConfig,
    ticks: u64,
}

/// Offset from the loop start of the next tick, on a fixed grid of `interval`.
///
/// Slots that have already passed are skipped rather than run back to back.
pub fn next_tick_offset(elapsed: Duration, interval: Duration) -> Duration {
    let interval_ns = interval.as_nanos().max(1);
    let next_slot = elapsed.as_nanos() / interval_ns + 1;
    let offset_ns = next_slot.saturating_mul(interval_ns);
    Duration::from_nanos(u64::try_from(offset_ns).unwrap_or(u64::MAX))
}

/// Grid slots passed over when the next tick lands later than the one expected.
pub fn skipped_slots(expected_offset: Duration, next_offset: Duration, interval: Duration) -> u64 {
    let late_ns = next_offset.saturating_sub(expected_offset).as_nanos();
    u64::try_from(late_ns / interval.as_nanos().max(1)).unwrap_or(u64::MAX)
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, ticks: 0 })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Reads every telemetry file. Never fails: unavailable sources carry their reason.
    pub fn read_sources(&self) -> TelemetrySources {
        let data_dir = &self.config.data_dir;
        let panels = SNAPSHOT_SOURCES
            .iter()
            .map(|&source| load_snapshot(source, data_dir))
            .collect();

        let wod = load_wod(data_dir);
        match &wod {
            Ok(batch) => debug!(samples = batch.samples.len(), "WOD batch loaded"),
            Err(err) if err.is_missing() => debug!("{err}"),
            Err(err) => warn!("WOD unavailable: {err}"),
        }

        let lidar = load_lidar(data_dir);
        match &lidar {
            Ok(frame) => debug!(label = frame.label, blobs = frame.blobs.len(), "lidar frame loaded"),
            Err(err) if err.is_missing() => debug!("{err}"),
            Err(err) => warn!("lidar unavailable: {err}"),
        }

        TelemetrySources { panels, wod, lidar }
    }

    /// One refresh: read all sources and re-render every artifact.
    ///
    /// A failed artifact is logged and reported; the others are still rendered.
    pub fn tick(&mut self) -> TickReport {
        self.ticks += 1;
        let sources = self.read_sources();
        let output_dir = &self.config.output_dir;

        let mut artifacts = Vec::new();
        let mut failures = Vec::new();
        let mut record = |artifact: &'static str, result: Result<PathBuf, String>| match result {
            Ok(path) => artifacts.push(path),
            Err(message) => {
                error!(artifact, "render failed: {message}");
                failures.push(RenderFailure { artifact, message });
            }
        };

        if let Err(err) = fs::create_dir_all(output_dir) {
            record(
                "output directory",
                Err(format!("cannot create {}: {err}", output_dir.display())),
            );
        } else {
            record(
                "panel text",
                write_panels_text(&sources.panels, output_dir).map_err(|e| e.to_string()),
            );
            record(
                "panel image",
                plot_text_panels(&sources.panels, output_dir).map_err(|e| e.to_string()),
            );
            record(
                "WOD housekeeping",
                plot_wod_housekeeping(&sources.wod, output_dir).map_err(|e| e.to_string()),
            );
            record(
                "lidar heatmap",
                plot_lidar_heatmap(&sources.lidar, output_dir).map_err(|e| e.to_string()),
            );
        }

        let report = TickReport {
            tick: self.ticks,
            sources,
            artifacts,
            failures,
        };
        info!(
            tick = report.tick,
            panels = report.panels_available(),
            wod = report.sources.wod.is_ok(),
            lidar = report.sources.lidar.is_ok(),
            rendered = report.artifacts.len(),
            failed = report.failures.len(),
            "tick complete"
        );
        report
    }

    /// Ticks immediately, then on a fixed interval until `shutdown` fires or
    /// disconnects, or `max_ticks` is reached. Returns the number of ticks run.
    pub fn run(&mut self, shutdown: &Receiver<()>) -> u64 {
        let interval = self.config.interval();
        let start = Instant::now();
        let mut ticks_run: u64 = 0;
        let mut expected_offset = Duration::ZERO;

        info!(
            data_dir = %self.config.data_dir.display(),
            output_dir = %self.config.output_dir.display(),
            interval_ms = self.config.interval_ms,
            "polling telemetry"
        );

        loop {
            self.tick();
            ticks_run += 1;

            if self.config.max_ticks.is_some_and(|max| ticks_run >= max) {
                info!(ticks = ticks_run, "tick limit reached");
                break;
            }

            expected_offset += interval;
            let next_offset = next_tick_offset(start.elapsed(), interval);
            let skipped = skipped_slots(expected_offset, next_offset, interval);
            if skipped > 0 {
                warn!(skipped, "tick overran the interval, skipping missed refreshes");
            }
            expected_offset = next_offset;

            let timeout = (start + next_offset).saturating_duration_since(Instant::now());
            match shutdown.recv_timeout(timeout) {
                Err(RecvTimeoutError::Timeout) => continue,
                Ok(()) => {
                    info!(ticks = ticks_run, "shutdown requested");
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => {
                    info!(ticks = ticks_run, "shutdown channel closed");
                    break;
                }
            }
        }

        ticks_run
    }
}


// src/dashboard.rs
