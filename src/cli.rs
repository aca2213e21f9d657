// src/cli.rs

// Every flag is optional: values left out come from `--config`, then from the defaults.

use std::path::PathBuf;

use clap::Parser;

use crate::config::ConfigOverrides;

/// Poll ground-station telemetry files and render dashboard panels and plots.
#[derive(Debug, Parser)]
#[command(name = "groundstation_dashboard", version = crate::crate_version())]
pub struct Cli {
    /// TOML config file (kebab-case keys: data-dir, output-dir, interval-ms, max-ticks).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory the pipeline writes its JSON files into.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Directory rendered panels and plots are written to.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Refresh interval in milliseconds.
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Stop after this many refreshes.
    #[arg(long, conflicts_with = "once")]
    pub max_ticks: Option<u64>,

    /// Render once and exit.
    #[arg(long)]
    pub once: bool,

    /// Log per-source detail.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            data_dir: self.data_dir.clone(),
            output_dir: self.output_dir.clone(),
            interval_ms: self.interval_ms,
            max_ticks: if self.once { Some(1) } else { self.max_ticks },
        }
    }
}


// src/cli.rs
