//! Terminal output utilities.
//!
//! Provides aligned, coloured text rendering of command results.

use super::report::{BlockReport, CommandResult};
use crate::config::LABEL_WIDTH;
use colored::Colorize;

/// Format a `label: value` line with the label padded to `LABEL_WIDTH`.
pub fn format_row<T: ToString>(label: &str, value: T) -> String {
    let label = format!("{:<width$}", format!("{label}:"), width = LABEL_WIDTH);
    format!("{} {}", label.bold(), value.to_string())
}

fn render_report(report: &BlockReport) -> String {
    let mut lines = vec![
        format!("{}", report.cidr.green().bold()),
        format_row("Network", &report.network_cidr),
        format_row("Netmask", format!("{} = {}", report.netmask, report.prefix)),
        format_row("Wildcard", &report.wildcard),
        format_row("Broadcast", &report.broadcast),
        format_row(
            "Host range",
            format!("{} - {}", report.first_host, report.last_host),
        ),
        format_row("Addresses", report.address_count),
        format_row("Hosts", report.host_count),
        format_row("Host portion", report.host_portion),
        format_row("Hex", &report.hex),
        format_row("Binary", &report.binary),
        format_row("Reverse DNS", &report.reverse_dns),
        format_row("Class", &report.class),
    ];
    for name in &report.well_known {
        lines.push(format_row("Well known", name.yellow()));
    }
    lines.join("\n")
}

/// Render a command result as text for the terminal.
pub fn render_text(result: &CommandResult) -> String {
    match result {
        CommandResult::Blocks(blocks) if blocks.is_empty() => "(no blocks)".dimmed().to_string(),
        CommandResult::Blocks(blocks) => blocks
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<String>>()
            .join("\n"),
        CommandResult::Block(block) => block.to_string(),
        CommandResult::Reports(reports) => reports
            .iter()
            .map(render_report)
            .collect::<Vec<String>>()
            .join("\n\n"),
        CommandResult::Answer(true) => "true".green().to_string(),
        CommandResult::Answer(false) => "false".red().to_string(),
        CommandResult::Addresses {
            addresses,
            remaining,
        } => {
            let mut lines = addresses.clone();
            if *remaining > 0 {
                lines.push(format!("... {remaining} more").dimmed().to_string());
            }
            lines.join("\n")
        }
    }
}
