use serde_json::json;
use tickboard_core::chart_options;

use crate::error::CliError;

use super::CommandOutcome;

pub fn run() -> Result<CommandOutcome, CliError> {
    Ok(CommandOutcome::ok(json!({ "ranges": chart_options() })))
}
