use tickboard_core::{ChartRange, Interval, MarketDataService, Symbol};

use crate::cli::ChartArgs;
use crate::error::CliError;

use super::CommandOutcome;

pub async fn run(args: &ChartArgs, service: &MarketDataService) -> Result<CommandOutcome, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let range: ChartRange = args.range.parse()?;
    let interval = match &args.interval {
        Some(raw) => raw.parse::<Interval>()?,
        None => range.default_interval(),
    };

    let bundle = service.candlestick_bundle(&symbol, range, interval).await?;
    Ok(CommandOutcome::ok(serde_json::to_value(bundle)?))
}
