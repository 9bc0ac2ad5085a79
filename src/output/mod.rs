//! Output formatting for command results.
//!
//! This module handles rendering results built from the core accessors:
//! - [`report`] - serializable report structures
//! - [`terminal`] - aligned, coloured text
//! - [`json`] - timestamped JSON envelope

pub mod json;
pub mod report;
pub mod terminal;

pub use json::render_json;
pub use report::{BlockReport, CommandResult, Report};
pub use terminal::{format_row, render_text};

use crate::config::OutputFormat;

/// Render `result` in the requested format.
pub fn render(
    command: &str,
    result: &CommandResult,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_text(result)),
        OutputFormat::Json => render_json(command, result),
    }
}
