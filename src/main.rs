// src/main.rs

use anyhow::Context;
use clap::Parser;
use crossbeam::channel;
use tracing::{info, Level};

use groundstation_dashboard::cli::Cli;
use groundstation_dashboard::config::DashboardConfig;
use groundstation_dashboard::dashboard::Dashboard;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .init();
    info!("Starting ground-station dashboard {}", groundstation_dashboard::crate_version());

    // --- Configuration ---
    let base_config = match &cli.config {
        Some(path) => DashboardConfig::load(path).context("load config")?,
        None => DashboardConfig::default(),
    };
    let config = base_config.with_overrides(cli.overrides());
    let mut dashboard = Dashboard::new(config).context("invalid configuration")?;

    // --- Shutdown ---
    let (shutdown_tx, shutdown_rx) = channel::bounded(1);
    ctrlc::set_handler(move || {
        let _ = shutdown_tx.try_send(());
    })
    .context("Set ctrl-c")?;

    let ticks = dashboard.run(&shutdown_rx);
    info!(
        ticks,
        output_dir = %dashboard.config().output_dir.display(),
        "Dashboard stopped"
    );
    Ok(())
}

// src/main.rs
