//! # BMI CLI Application
//!
//! Command-line front-end over `bmi_core`: compute a single BMI, append
//! measurements to a data file, and show or process whole files.

mod app;
mod config;
mod output;

use anyhow::Result;
use tracing::Level;

use crate::config::AppConfig;

fn main() -> Result<()> {
    let config = AppConfig::parse();

    let level = if config.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    app::run(&config)
}
