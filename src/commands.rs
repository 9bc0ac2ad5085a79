//! Command line dispatch.
//!
//! `main.rs` only sets up logging and calls [`run`]; everything testable
//! lives here.

use crate::config::{
    OutputFormat, Settings, ADJACENT_DEFAULT_COUNT, ADJACENT_MAX_COUNT, ENUMERATE_DEFAULT_LIMIT,
};
use crate::models::{to_dotted, CidrBlock};
use crate::output::{render, BlockReport, CommandResult};
use crate::parse::{parse_address, parse_cidr, parse_host_request, parse_range, try_blocks};
use crate::processing::{
    adjacent_n, aggregate, aggregate_items, exclude_all_items, range_to_blocks, summarize,
};
use std::error::Error;

pub const USAGE: &str = r#"Usage: cidr-algebra [--json|--text] <command> <args...>

Commands:
  info <cidr>...              Show every derived property of each block
  contains <a> <b>            Does block a contain block b
  overlaps <a> <b>            Do blocks a and b share any address
  exclude <base> <cut>...     Remove the cut blocks from base, in order
  aggregate <cidr>...         Minimal equivalent set of blocks
  summarize <cidr>...         Smallest single block covering all inputs
  next <cidr> [n]             The n (<= 65536) following blocks of the same size
  prev <cidr> [n]             The n (<= 65536) preceding blocks of the same size
  range <start> <end>         Blocks covering an address range exactly
  hosts <address> <n>         Smallest block at address holding n hosts
  enumerate <cidr> [limit]    List addresses of a block
  json <file> [summarize]     Aggregate (or summarize) a JSON array of blocks"#;

fn arg<'a>(args: &'a [String], i: usize, name: &str) -> Result<&'a str, Box<dyn Error>> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| format!("Missing argument <{name}>\n\n{USAGE}").into())
}

fn non_empty<'a>(args: &'a [String], name: &str) -> Result<&'a [String], Box<dyn Error>> {
    if args.is_empty() {
        return Err(format!("Expected at least one <{name}>\n\n{USAGE}").into());
    }
    Ok(args)
}

fn optional_number<T: std::str::FromStr>(
    args: &[String],
    i: usize,
    default: T,
) -> Result<T, Box<dyn Error>> {
    match args.get(i) {
        Some(s) => s
            .parse()
            .map_err(|_| format!("Expected a number, got '{s}'").into()),
        None => Ok(default),
    }
}

fn read_block_file(file: &str) -> Result<Vec<CidrBlock>, Box<dyn Error>> {
    let json = std::fs::read_to_string(file)
        .map_err(|e| format!("Error reading block file {file}: {e}"))?;
    let mut deserializer = serde_json::Deserializer::from_str(&json);
    let blocks: Vec<CidrBlock> = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| format!("Error parsing {file}: path={} error={}", e.path(), e))?;
    log::info!("Read {} block(s) from {file}", blocks.len());
    Ok(blocks)
}

/// Execute one command and return its result.
pub fn execute(command: &str, args: &[String]) -> Result<CommandResult, Box<dyn Error>> {
    log::info!("#Start {command} {args:?}");
    let result = match command {
        "info" => {
            let blocks = try_blocks(non_empty(args, "cidr")?)?;
            CommandResult::Reports(blocks.iter().map(BlockReport::new).collect())
        }
        "contains" | "overlaps" => {
            let a = parse_cidr(arg(args, 0, "a")?)?;
            let b = parse_cidr(arg(args, 1, "b")?)?;
            CommandResult::Answer(if command == "contains" {
                a.contains(&b)
            } else {
                a.overlaps(&b)
            })
        }
        "exclude" => {
            let base = parse_cidr(arg(args, 0, "base")?)?;
            let cuts = non_empty(&args[1..], "cut")?;
            CommandResult::Blocks(exclude_all_items(&base, cuts)?)
        }
        "aggregate" => CommandResult::Blocks(aggregate_items(non_empty(args, "cidr")?)?),
        "summarize" => {
            let blocks = try_blocks(non_empty(args, "cidr")?)?;
            CommandResult::Block(summarize(&blocks)?)
        }
        "next" | "prev" => {
            let block = parse_cidr(arg(args, 0, "cidr")?)?;
            let count: i64 = optional_number(args, 1, ADJACENT_DEFAULT_COUNT)?;
            if !(0..=ADJACENT_MAX_COUNT).contains(&count) {
                log::warn!("{command}: count {count} rejected");
                return Err(format!("Count must be between 0 and {ADJACENT_MAX_COUNT}").into());
            }
            let count = if command == "prev" {
                count.checked_neg().ok_or("Count out of range")?
            } else {
                count
            };
            CommandResult::Blocks(adjacent_n(&block, count)?)
        }
        "range" => {
            let (start, end) = if args.len() == 2 {
                (parse_address(&args[0])?, parse_address(&args[1])?)
            } else {
                parse_range(&args.join(" "))?
            };
            CommandResult::Blocks(range_to_blocks(start, end)?)
        }
        "hosts" => {
            let request = format!(
                "{} hosts {}",
                arg(args, 0, "address")?,
                arg(args, 1, "n")?
            );
            let block = parse_host_request(&request)?;
            CommandResult::Reports(vec![BlockReport::new(&block)])
        }
        "enumerate" => {
            let block = parse_cidr(arg(args, 0, "cidr")?)?;
            let limit: u64 = optional_number(args, 1, ENUMERATE_DEFAULT_LIMIT)?;
            let addresses: Vec<String> = block
                .addresses()
                .take(limit.min(usize::MAX as u64) as usize)
                .map(to_dotted)
                .collect();
            let remaining = block.address_count() - addresses.len() as u64;
            CommandResult::Addresses {
                addresses,
                remaining,
            }
        }
        "json" => {
            let blocks = read_block_file(arg(args, 0, "file")?)?;
            match args.get(1).map(String::as_str) {
                Some("summarize") => CommandResult::Block(summarize(&blocks)?),
                None | Some("aggregate") => CommandResult::Blocks(aggregate(&blocks)),
                Some(other) => return Err(format!("Unknown json operation '{other}'").into()),
            }
        }
        "help" | "--help" | "-h" => return Err(USAGE.into()),
        other => return Err(format!("Unknown command '{other}'\n\n{USAGE}").into()),
    };
    Ok(result)
}

/// Parse the process arguments (without the program name), run the command
/// and render its result.
pub fn run(args: &[String], settings: &Settings) -> Result<String, Box<dyn Error>> {
    let mut format = settings.format;
    let mut rest = args;
    while let Some(flag) = rest
        .first()
        .filter(|a| a.starts_with("--") && a.as_str() != "--help")
    {
        match flag.as_str() {
            "--json" => format = OutputFormat::Json,
            "--text" => format = OutputFormat::Text,
            other => return Err(format!("Unknown option '{other}'\n\n{USAGE}").into()),
        }
        rest = &rest[1..];
    }
    let (command, command_args) = rest
        .split_first()
        .ok_or_else(|| format!("Missing command\n\n{USAGE}"))?;
    let result = execute(command, command_args)?;
    Ok(render(command, &result, format)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn blocks_of(result: CommandResult) -> Vec<String> {
        match result {
            CommandResult::Blocks(blocks) => blocks.iter().map(|b| b.to_string()).collect(),
            other => panic!("expected blocks, got {other:?}"),
        }
    }

    #[test]
    fn test_execute_exclude() {
        let result = execute("exclude", &args(&["192.168.0.0/24", "192.168.0.0/25"])).unwrap();
        assert_eq!(blocks_of(result), vec!["192.168.0.128/25"]);
        assert!(execute("exclude", &args(&["192.168.0.0/24"])).is_err());
    }

    #[test]
    fn test_execute_aggregate_and_summarize() {
        let result = execute(
            "aggregate",
            &args(&["10.0.0.0/24", "10.0.1.0/24", "10.0.2.0/24", "10.0.3.0/24"]),
        )
        .unwrap();
        assert_eq!(blocks_of(result), vec!["10.0.0.0/22"]);

        let result = execute("summarize", &args(&["192.168.0.0/24", "192.168.2.0/24"])).unwrap();
        assert_eq!(
            result,
            CommandResult::Block("192.168.0.0/22".parse().unwrap())
        );
        assert!(execute("summarize", &[]).is_err());
    }

    #[test]
    fn test_execute_adjacent() {
        let result = execute("next", &args(&["192.168.0.0/24", "3"])).unwrap();
        assert_eq!(
            blocks_of(result),
            vec!["192.168.1.0/24", "192.168.2.0/24", "192.168.3.0/24"]
        );
        let result = execute("prev", &args(&["192.168.5.0/24"])).unwrap();
        assert_eq!(blocks_of(result), vec!["192.168.4.0/24"]);
        let err = execute("next", &args(&["255.255.255.0/24"])).unwrap_err();
        assert!(err.to_string().contains("leaves the IPv4 address space"));
        assert!(execute("next", &args(&["10.0.0.0/8", "many"])).is_err());

        let err = execute("next", &args(&["0.0.0.0/32", "4294967295"])).unwrap_err();
        assert!(err.to_string().contains("Count must be between 0 and 65536"));
        assert!(execute("prev", &args(&["10.0.0.0/8", "-1"])).is_err());
        let result = execute("next", &args(&["0.0.0.0/32", "65536"])).unwrap();
        assert_eq!(blocks_of(result).len(), 65536);
    }

    #[test]
    fn test_execute_range_forms() {
        let two = execute("range", &args(&["10.0.0.0", "10.0.0.255"])).unwrap();
        let joined = execute("range", &args(&["10.0.0.0", "-", "10.0.0.255"])).unwrap();
        assert_eq!(two, joined);
        assert_eq!(blocks_of(two), vec!["10.0.0.0/24"]);
    }

    #[test]
    fn test_execute_enumerate() {
        let result = execute("enumerate", &args(&["10.0.0.0/30", "2"])).unwrap();
        assert_eq!(
            result,
            CommandResult::Addresses {
                addresses: vec!["10.0.0.0".to_string(), "10.0.0.1".to_string()],
                remaining: 2,
            }
        );
        let result = execute("enumerate", &args(&["0.0.0.0/0", "1"])).unwrap();
        assert_eq!(
            result,
            CommandResult::Addresses {
                addresses: vec!["0.0.0.0".to_string()],
                remaining: 4294967295,
            }
        );
    }

    #[test]
    fn test_execute_hosts_and_info() {
        match execute("hosts", &args(&["10.0.0.0", "500"])).unwrap() {
            CommandResult::Reports(reports) => {
                assert_eq!(reports[0].network_cidr, "10.0.0.0/23");
                assert_eq!(reports[0].host_count, 510);
            }
            other => panic!("expected reports, got {other:?}"),
        }
        let err = execute("info", &args(&["10.0.0.0/8", "oops"])).unwrap_err();
        assert!(err.to_string().contains("Element #1"));
    }

    #[test]
    fn test_execute_json_file() {
        let path = std::env::temp_dir().join("cidr_algebra_commands_test.json");
        std::fs::write(&path, r#"["10.0.0.0/25", "10.0.0.128/25", "10.0.2.0/24"]"#).unwrap();
        let file = path.to_string_lossy().to_string();

        let result = execute("json", &args(&[&file])).unwrap();
        assert_eq!(blocks_of(result), vec!["10.0.0.0/24", "10.0.2.0/24"]);
        let result = execute("json", &args(&[&file, "summarize"])).unwrap();
        assert_eq!(result, CommandResult::Block("10.0.0.0/22".parse().unwrap()));

        std::fs::write(&path, r#"["10.0.0.0/25", "10.0.0.0/40"]"#).unwrap();
        let err = execute("json", &args(&[&file])).unwrap_err();
        assert!(err.to_string().contains("path=[1]"), "{err}");
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_run_formats() {
        colored::control::set_override(false);
        let settings = Settings::default();
        let text = run(&args(&["contains", "10.0.0.0/8", "10.1.0.0/16"]), &settings).unwrap();
        assert_eq!(text, "true");

        let json = run(&args(&["--json", "overlaps", "10.0.0.0/8", "11.0.0.0/8"]), &settings).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["command"], "overlaps");
        assert_eq!(value["result"]["value"], false);

        assert!(run(&args(&["--yaml", "info", "10.0.0.0/8"]), &settings).is_err());
        assert!(run(&[], &settings).is_err());
        assert!(run(&args(&["frobnicate"]), &settings).is_err());
    }
}
