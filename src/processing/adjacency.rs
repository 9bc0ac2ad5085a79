//! Stepping between same-size neighbouring blocks.
//!
//! No wraparound: a step that would leave `0.0.0.0 ..= 255.255.255.255` fails
//! with [`CidrError::BoundaryExceeded`].

use crate::error::{CidrError, Direction, Result};
use crate::models::CidrBlock;

fn boundary(block: &CidrBlock, direction: Direction, steps: u64) -> CidrError {
    log::debug!("{block} cannot step {direction} {steps} block(s)");
    CidrError::BoundaryExceeded {
        block: block.network_cidr(),
        direction,
        steps,
    }
}

/// Network address `steps` blocks away, checked against the address space.
fn step(block: &CidrBlock, direction: Direction, steps: u64) -> Result<u32> {
    let size = block.address_count() as u128;
    let network = block.network() as u128;
    let offset = size * steps as u128;
    let candidate = match direction {
        Direction::Next => {
            let candidate = network + offset;
            // Broadcast of the candidate must stay inside the space.
            if candidate + size - 1 > u32::MAX as u128 {
                return Err(boundary(block, direction, steps));
            }
            candidate
        }
        Direction::Previous => network
            .checked_sub(offset)
            .ok_or_else(|| boundary(block, direction, steps))?,
    };
    Ok(candidate as u32)
}

/// The following block of the same size.
///
/// ```
/// use cidr_algebra::models::CidrBlock;
/// use cidr_algebra::processing::next_block;
/// let block: CidrBlock = "10.0.0.0/24".parse().unwrap();
/// assert_eq!(next_block(&block).unwrap().to_string(), "10.0.1.0/24");
/// ```
pub fn next_block(block: &CidrBlock) -> Result<CidrBlock> {
    let network = step(block, Direction::Next, 1)?;
    Ok(CidrBlock::aligned(network, block.prefix()))
}

/// The preceding block of the same size.
pub fn previous_block(block: &CidrBlock) -> Result<CidrBlock> {
    let network = step(block, Direction::Previous, 1)?;
    Ok(CidrBlock::aligned(network, block.prefix()))
}

/// `count` neighbouring blocks, nearest first. Positive counts walk forward,
/// negative counts walk backward, zero gives an empty list. Either every
/// requested block fits in the address space or the call fails.
pub fn adjacent_n(block: &CidrBlock, count: i64) -> Result<Vec<CidrBlock>> {
    let direction = if count < 0 {
        Direction::Previous
    } else {
        Direction::Next
    };
    let steps = count.unsigned_abs();
    if steps == 0 {
        return Ok(Vec::new());
    }
    // Check the farthest block first so nothing partial is built.
    step(block, direction, steps)?;

    let size = block.address_count();
    let blocks = (1..=steps)
        .map(|i| {
            let offset = (size * i) as u32;
            let network = match direction {
                Direction::Next => block.network() + offset,
                Direction::Previous => block.network() - offset,
            };
            CidrBlock::aligned(network, block.prefix())
        })
        .collect();
    Ok(blocks)
}

impl CidrBlock {
    pub fn next_block(&self) -> Result<CidrBlock> {
        next_block(self)
    }

    pub fn previous_block(&self) -> Result<CidrBlock> {
        previous_block(self)
    }

    pub fn adjacent_blocks(&self, count: i64) -> Result<Vec<CidrBlock>> {
        adjacent_n(self, count)
    }
}
