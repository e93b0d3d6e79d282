//! CLI argument definitions for tickboard.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `summary` | Quote cards for one or more symbols |
//! | `chart` | Candles with SMA overlays and Bollinger bands |
//! | `ranges` | Chart ranges and the intervals each one allows |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--config` | none | JSON config file |
//! | `--base-url` | config | Provider base URL |
//! | `--timeout-ms` | config | Per-request HTTP timeout |
//!
//! # Examples
//!
//! ```bash
//! tickboard summary AAPL MSFT --pretty
//! tickboard chart ^GSPC --range 5y --interval 1wk
//! RUST_LOG=tickboard_core=debug tickboard chart NVDA --range 10y
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Stock dashboard data from the command line.
#[derive(Debug, Parser)]
#[command(
    name = "tickboard",
    author,
    version,
    about = "Quote cards and candlestick charts with long-horizon moving averages"
)]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Load settings from a JSON config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the provider base URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Override the per-request HTTP timeout in milliseconds.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Price moves and SMA distance for one or more symbols.
    ///
    /// Symbols are looked up one after another. A symbol that fails is
    /// reported in `errors` without stopping the others.
    ///
    /// # Examples
    ///
    ///   tickboard summary AAPL
    ///   tickboard summary AAPL MSFT BRK-B --pretty
    Summary(SummaryArgs),

    /// Candlestick data with 50W/200W/60M SMAs and Bollinger bands.
    ///
    /// # Examples
    ///
    ///   tickboard chart AAPL
    ///   tickboard chart AAPL --range 10y --interval 1mo
    Chart(ChartArgs),

    /// List selectable chart ranges with their valid and default intervals.
    Ranges,
}

#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// Ticker symbols, e.g. AAPL ^GSPC EURUSD=X.
    #[arg(required = true, num_args = 1..)]
    pub symbols: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ChartArgs {
    /// Ticker symbol.
    pub symbol: String,

    /// Look-back range (6mo, 1y, 5y, 10y, max).
    #[arg(long, default_value = "6mo")]
    pub range: String,

    /// Candle interval (1d, 1wk, 1mo). Defaults to the range's usual interval.
    #[arg(long)]
    pub interval: Option<String>,
}
