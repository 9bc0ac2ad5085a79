//! Report data built from core accessors.

use crate::models::{
    to_binary, to_dotted, to_hex, to_reverse_dns, well_known, AddressClass, CidrBlock,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Every derived property of one block, in integer and text form.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BlockReport {
    pub cidr: String,
    pub network_cidr: String,
    pub prefix: u8,
    pub network: String,
    pub broadcast: String,
    pub netmask: String,
    pub wildcard: String,
    pub first_host: String,
    pub last_host: String,
    pub address_count: u64,
    pub host_count: u64,
    pub network_int: u32,
    pub broadcast_int: u32,
    pub host_portion: u32,
    pub hex: String,
    pub binary: String,
    pub reverse_dns: String,
    pub class: String,
    pub well_known: Vec<String>,
}

impl BlockReport {
    pub fn new(block: &CidrBlock) -> BlockReport {
        BlockReport {
            cidr: block.cidr(),
            network_cidr: block.network_cidr(),
            prefix: block.prefix(),
            network: to_dotted(block.network()),
            broadcast: to_dotted(block.broadcast()),
            netmask: block.mask().to_string(),
            wildcard: block.wildcard_mask().to_string(),
            first_host: to_dotted(block.first_host()),
            last_host: to_dotted(block.last_host()),
            address_count: block.address_count(),
            host_count: block.host_count(),
            network_int: block.network(),
            broadcast_int: block.broadcast(),
            host_portion: block.host_portion(),
            hex: to_hex(block.input_address()),
            binary: to_binary(block.input_address()),
            reverse_dns: to_reverse_dns(block.input_address()),
            class: AddressClass::of(block.network()).to_string(),
            well_known: well_known(block)
                .iter()
                .map(|range| format!("{} ({}, {})", range.name, range.block, range.rfc))
                .collect(),
        }
    }
}

/// Result of one command.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CommandResult {
    Blocks(Vec<CidrBlock>),
    Block(CidrBlock),
    Reports(Vec<BlockReport>),
    Answer(bool),
    Addresses { addresses: Vec<String>, remaining: u64 },
}

/// Envelope written for JSON output.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub command: &'a str,
    pub generated_at: DateTime<Utc>,
    pub result: &'a CommandResult,
}

impl<'a> Report<'a> {
    pub fn new(command: &'a str, result: &'a CommandResult) -> Report<'a> {
        Report {
            command,
            generated_at: Utc::now(),
            result,
        }
    }
}
