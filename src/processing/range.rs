//! Range decomposition and host-count sizing.
//!
//! Builds blocks from requests that are not already in CIDR form: an
//! arbitrary inclusive address range, or "a block with room for N hosts".

use crate::config::MAX_PREFIX;
use crate::error::{CidrError, Result};
use crate::models::{broadcast_addr, lo_mask, Address, CidrBlock};

/// Find the biggest block starting at `start_ip` that ends at or before `last`.
///
/// The returned prefix is constrained by:
/// 1. The alignment of `start_ip` (it must be a valid network address)
/// 2. The block must not run past `last`
fn find_biggest_block(start_ip: Address, last: Address) -> u8 {
    let mut prefix = lo_mask(start_ip);
    while broadcast_addr(start_ip, prefix).unwrap_or(start_ip) > last {
        prefix += 1;
    }
    debug_assert!(prefix <= MAX_PREFIX);
    prefix
}

/// Minimal ordered list of aligned blocks covering exactly `start..=end`.
///
/// ```
/// use cidr_algebra::processing::range_to_blocks;
/// let blocks = range_to_blocks(0x0A000001, 0x0A000006).unwrap();
/// assert_eq!(blocks.len(), 4); // .1/32 .2/31 .4/31 .6/32
/// ```
pub fn range_to_blocks(start: Address, end: Address) -> Result<Vec<CidrBlock>> {
    if start > end {
        return Err(CidrError::Parse(format!(
            "Range start {start:#010x} is after range end {end:#010x}"
        )));
    }
    let mut blocks = Vec::new();
    let mut next_ip = start as u64;
    while next_ip <= end as u64 {
        let prefix = find_biggest_block(next_ip as u32, end);
        let block = CidrBlock::aligned(next_ip as u32, prefix);
        log::trace!("range_to_blocks: {block}");
        next_ip += block.address_count();
        blocks.push(block);
    }
    Ok(blocks)
}

/// Usable hosts in a block of the given prefix.
pub fn hosts_for_prefix(prefix: u8) -> Result<u64> {
    Ok(CidrBlock::new(0, prefix)?.host_count())
}

/// The longest prefix whose blocks hold at least `hosts` usable hosts.
pub fn prefix_for_hosts(hosts: u64) -> Result<u8> {
    (0..=MAX_PREFIX)
        .rev()
        .find(|prefix| hosts_for_prefix(*prefix).map_or(false, |n| n >= hosts))
        .ok_or_else(|| CidrError::Parse(format!("No IPv4 block holds {hosts} hosts")))
}

/// Smallest block at `addr` with room for `hosts` usable hosts. Host bits of
/// `addr` are masked off for the chosen size.
pub fn block_for_hosts(addr: Address, hosts: u64) -> Result<CidrBlock> {
    let prefix = prefix_for_hosts(hosts)?;
    CidrBlock::new(addr, prefix)
}
