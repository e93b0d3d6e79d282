//! # Indicator Engine
//!
//! Pure functions over immutable price series. Nothing here suspends, holds
//! state between calls, or mutates its inputs, so recomputing from the same
//! slices yields bit-identical output.
//!
//! | Function | Edge policy |
//! |----------|-------------|
//! | [`moving_average`] | Period clamps to the available history |
//! | [`moving_average_series`] | First `period - 1` entries are `None` |
//! | [`interpolate`] | Holds the last value forward, never fills backward |
//! | [`bollinger_bands`] | First `period - 1` entries are `None` |
//! | [`percent_deviation`] | Zero reference is an error, not an infinity |
//!
//! [`QuoteSummary`] and [`CandlestickBundle`] assemble these into the two
//! views the dashboard renders.

mod bollinger;
mod bundle;
mod change;
mod interpolate;
mod sma;
mod summary;

pub use bollinger::{bollinger_bands, BollingerBands};
pub use bundle::{BundleParams, CandlestickBundle, SmaOverlay, SmaOverlays, SmaSpec};
pub use change::{change, percent_change, percent_deviation};
pub use interpolate::interpolate;
pub use sma::{moving_average, moving_average_series, sma_points};
pub use summary::{QuoteSummary, SummaryParams};
