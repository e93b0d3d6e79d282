use serde::Serialize;
use tickboard_core::{MarketDataService, QuoteSummary, Symbol};
use tracing::warn;

use crate::cli::SummaryArgs;
use crate::error::CliError;

use super::CommandOutcome;

#[derive(Debug, Serialize)]
struct SymbolFailure {
    symbol: String,
    code: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
struct SummaryResponseData {
    summaries: Vec<QuoteSummary>,
    errors: Vec<SymbolFailure>,
}

pub async fn run(args: &SummaryArgs, service: &MarketDataService) -> Result<CommandOutcome, CliError> {
    let symbols = args
        .symbols
        .iter()
        .map(|raw| Symbol::parse(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let mut summaries = Vec::with_capacity(symbols.len());
    let mut errors = Vec::new();
    for symbol in symbols {
        match service.quote_summary(&symbol).await {
            Ok(summary) => summaries.push(summary),
            Err(error) => {
                let error = CliError::from(error);
                warn!(symbol = %symbol, error = %error, "summary lookup failed");
                errors.push(SymbolFailure {
                    symbol: symbol.to_string(),
                    code: error.code(),
                    message: error.to_string(),
                });
            }
        }
    }

    let failures = errors.len();
    let data = serde_json::to_value(SummaryResponseData { summaries, errors })?;
    Ok(CommandOutcome { data, failures })
}
