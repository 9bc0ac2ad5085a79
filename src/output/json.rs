//! JSON output for command results.

use super::report::{CommandResult, Report};

/// Render a command result wrapped in a timestamped [`Report`].
pub fn render_json(command: &str, result: &CommandResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Report::new(command, result))
}
