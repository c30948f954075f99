mod config;
mod platform;

use anyhow::{Context, Result};
use clap::Parser;
use engine_logging::engine_info;

use config::{AppConfig, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    config.apply_cli(&cli);

    platform::logging::initialize(config.log);
    engine_info!(
        "bili-summary {} starting server={}",
        env!("CARGO_PKG_VERSION"),
        config.server_url
    );

    platform::run_app(&config)
}
