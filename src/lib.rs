// src/lib.rs - Library interface for the dashboard binary and integration tests

pub mod cli;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod data_input;
pub mod error;
pub mod plot_framework;
pub mod plot_functions;
pub mod source_names;
pub mod types;

pub fn crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
