mod chart;
mod ranges;
mod summary;

use serde_json::Value;
use tickboard_core::{DashboardConfig, MarketDataService};

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// JSON payload for stdout plus the number of per-symbol failures inside it.
pub struct CommandOutcome {
    pub data: Value,
    pub failures: usize,
}

impl CommandOutcome {
    pub fn ok(data: Value) -> Self {
        Self { data, failures: 0 }
    }
}

pub async fn run(cli: &Cli) -> Result<CommandOutcome, CliError> {
    match &cli.command {
        Command::Summary(args) => summary::run(args, &build_service(cli)?).await,
        Command::Chart(args) => chart::run(args, &build_service(cli)?).await,
        Command::Ranges => ranges::run(),
    }
}

fn build_service(cli: &Cli) -> Result<MarketDataService, CliError> {
    let config = load_config(cli)?;
    Ok(MarketDataService::from_config(&config))
}

/// File config, then environment overrides, then command-line flags.
fn load_config(cli: &Cli) -> Result<DashboardConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    config.apply_env_overrides()?;

    if let Some(base_url) = &cli.base_url {
        config.provider.base_url = base_url.clone();
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.provider.request_timeout_ms = timeout_ms;
    }

    Ok(config)
}
