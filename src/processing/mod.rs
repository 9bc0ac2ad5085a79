//! Subnet algebra.
//!
//! This module contains the operations over [`CidrBlock`](crate::models::CidrBlock) values:
//! - `relation` - overlap and containment predicates
//! - `adjacency` - next, previous and n-th neighbouring blocks
//! - `exclude` - set difference
//! - `aggregate` - minimal equivalent set and single covering block
//! - `range` - blocks from address ranges and host counts
//!
//! Every function here is pure: inputs are never modified and results are
//! fresh values.

mod adjacency;
mod aggregate;
mod exclude;
mod range;
mod relation;

// Re-export public functions
pub use adjacency::{adjacent_n, next_block, previous_block};
pub use aggregate::{aggregate, aggregate_items, is_sibling_pair, leading_common_bits, summarize};
pub use exclude::{exclude, exclude_all, exclude_all_items};
pub use range::{block_for_hosts, hosts_for_prefix, prefix_for_hosts, range_to_blocks};
pub use relation::{contains, is_contained_in, overlaps};
