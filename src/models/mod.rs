//! Value types for the subnet algebra.
//!
//! This module contains the core data structures:
//! - [`address`] - IPv4 address codec (dotted, hex, binary, reverse DNS)
//! - [`mask`] - [`SubnetMask`] and [`WildcardMask`]
//! - [`CidrBlock`] - aligned network plus prefix length
//! - [`classify`] - classful and well-known range lookups

pub mod address;
mod cidr;
pub mod classify;
mod mask;

// Re-export public types
pub use address::{
    address_from_u64, parse_binary, parse_dotted, parse_hex, to_binary, to_dotted, to_hex,
    to_reverse_dns, Address,
};
pub use cidr::{broadcast_addr, block_size, cut_addr, lo_mask, AddressIter, CidrBlock, SubnetIter};
pub use classify::{is_private, well_known, well_known_ranges, AddressClass, WellKnownRange};
pub use mask::{get_cidr_mask, mask_to_prefix, SubnetMask, WildcardMask};
