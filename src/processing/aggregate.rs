//! Aggregation and summarization of block sets.
//!
//! - [`aggregate`] - the minimal disjoint set covering exactly the same addresses
//! - [`summarize`] - the single smallest block covering every input

use super::relation::contains;
use crate::error::{CidrError, Result};
use crate::models::{cut_addr, CidrBlock};
use crate::parse::try_blocks;
use itertools::Itertools;

/// Number of matching leading bits of two addresses (32 when equal).
pub fn leading_common_bits(a: u32, b: u32) -> u8 {
    (a ^ b).leading_zeros() as u8
}

/// True when `lower` and `upper` are the two halves of one block.
pub fn is_sibling_pair(lower: &CidrBlock, upper: &CidrBlock) -> bool {
    let prefix = lower.prefix();
    if prefix == 0 || prefix != upper.prefix() {
        return false;
    }
    let half = lower.address_count();
    let parent_size = half * 2;
    (lower.network() as u64) % parent_size == 0 && upper.network() as u64 == lower.network() as u64 + half
}

/// Drop duplicates and blocks contained in another block.
///
/// Input must be sorted by (network, prefix); a container then always sorts
/// before anything it contains.
fn absorb_subnets(sorted: Vec<CidrBlock>) -> Vec<CidrBlock> {
    let mut kept: Vec<CidrBlock> = Vec::with_capacity(sorted.len());
    for block in sorted {
        match kept.last() {
            Some(last) if contains(last, &block) => {
                log::trace!("aggregate: {block} absorbed by {last}");
            }
            _ => kept.push(block),
        }
    }
    kept
}

/// One pass over sorted disjoint blocks merging every sibling pair found.
/// Returns the new list and whether anything merged.
fn merge_pass(blocks: Vec<CidrBlock>) -> (Vec<CidrBlock>, bool) {
    let mut merged = false;
    let mut out: Vec<CidrBlock> = Vec::with_capacity(blocks.len());
    let mut iter = blocks.into_iter().peekable();
    while let Some(block) = iter.next() {
        match iter.peek() {
            Some(next) if is_sibling_pair(&block, next) => {
                let parent = CidrBlock::aligned(block.network(), block.prefix() - 1);
                log::trace!("aggregate: {block} + {next} => {parent}");
                out.push(parent);
                iter.next();
                merged = true;
            }
            _ => out.push(block),
        }
    }
    (out, merged)
}

/// Reduce `blocks` to the minimal equivalent set of disjoint blocks, sorted
/// by network address. Empty input gives empty output.
///
/// ```
/// use cidr_algebra::parse::try_blocks;
/// use cidr_algebra::processing::aggregate;
/// let blocks = try_blocks(["10.0.0.0/24", "10.0.1.0/24"]).unwrap();
/// assert_eq!(aggregate(&blocks)[0].to_string(), "10.0.0.0/23");
/// ```
pub fn aggregate(blocks: &[CidrBlock]) -> Vec<CidrBlock> {
    let sorted: Vec<CidrBlock> = blocks
        .iter()
        .map(CidrBlock::normalized)
        .sorted()
        .dedup()
        .collect();
    let mut current = absorb_subnets(sorted);

    let mut passes = 0;
    loop {
        let (next, merged) = merge_pass(current);
        current = next;
        passes += 1;
        if !merged {
            break;
        }
    }
    log::debug!(
        "aggregate: {} block(s) => {} block(s) in {passes} pass(es)",
        blocks.len(),
        current.len()
    );
    current
}

/// [`aggregate`] over untyped items; an item that is not a valid block fails
/// with `TypeMismatch` naming its index.
pub fn aggregate_items<I, T>(items: I) -> Result<Vec<CidrBlock>>
where
    I: IntoIterator<Item = T>,
    T: TryInto<CidrBlock, Error = CidrError>,
{
    let blocks = try_blocks(items)?;
    Ok(aggregate(&blocks))
}

/// The smallest single block containing every block in `blocks`.
pub fn summarize(blocks: &[CidrBlock]) -> Result<CidrBlock> {
    let min_addr = blocks
        .iter()
        .map(CidrBlock::network)
        .min()
        .ok_or(CidrError::EmptyInputSet)?;
    let max_addr = blocks
        .iter()
        .map(CidrBlock::broadcast)
        .max()
        .ok_or(CidrError::EmptyInputSet)?;
    let prefix = leading_common_bits(min_addr, max_addr);
    let network = cut_addr(min_addr, prefix)?;
    log::debug!(
        "summarize: {} block(s) span {min_addr:#010x}..={max_addr:#010x} => /{prefix}",
        blocks.len()
    );
    Ok(CidrBlock::aligned(network, prefix))
}
