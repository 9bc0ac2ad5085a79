//! CIDR block value type.
//!
//! Provides [`CidrBlock`], an aligned IPv4 network plus prefix length, along
//! with lazy iterators over the addresses and sub-blocks it spans.

use super::address::{address_from_u64, to_dotted, Address};
use super::mask::{get_cidr_mask, SubnetMask, WildcardMask};
use crate::config::MAX_PREFIX;
use crate::error::{CidrError, Result};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::net::Ipv4Addr;

/// Get the network address for a given address and prefix length.
pub fn cut_addr(addr: Address, len: u8) -> Result<Address> {
    Ok(addr & get_cidr_mask(len)?)
}

/// Calculate the broadcast address for a given address and prefix length.
pub fn broadcast_addr(addr: Address, len: u8) -> Result<Address> {
    let mask = get_cidr_mask(len)?;
    Ok((addr & mask) | !mask)
}

/// Number of addresses in a block of the given prefix; `2^32` fits in u64.
pub fn block_size(len: u8) -> u64 {
    1u64 << (MAX_PREFIX - len.min(MAX_PREFIX))
}

/// Longest prefix for which `addr` is a valid network address, based on its
/// trailing zeros.
pub fn lo_mask(addr: Address) -> u8 {
    let trailing_zeros = addr.trailing_zeros().min(32) as u8;
    MAX_PREFIX - trailing_zeros
}

/// An aligned IPv4 block.
///
/// The address given at construction is kept for display by [`cidr`](Self::cidr);
/// all arithmetic, equality and ordering use the normalized network address.
#[derive(Debug, Copy, Clone)]
pub struct CidrBlock {
    input: Address,
    network: Address,
    prefix: u8,
}

impl CidrBlock {
    /// Create a block, masking host bits off `addr`.
    pub fn new(addr: Address, prefix: u8) -> Result<CidrBlock> {
        let network = cut_addr(addr, prefix)?;
        Ok(CidrBlock {
            input: addr,
            network,
            prefix,
        })
    }

    /// Create a block from values held in wider integer types.
    pub fn from_wide(addr: u64, prefix: i64) -> Result<CidrBlock> {
        let addr = address_from_u64(addr)?;
        let prefix = u8::try_from(prefix)
            .ok()
            .filter(|p| *p <= MAX_PREFIX)
            .ok_or(CidrError::InvalidPrefix(prefix))?;
        CidrBlock::new(addr, prefix)
    }

    /// Block built from already aligned parts; only used by the algebra.
    pub(crate) fn aligned(network: Address, prefix: u8) -> CidrBlock {
        debug_assert!(prefix <= MAX_PREFIX);
        debug_assert_eq!(network & !SubnetMask::of(prefix).bits(), 0);
        CidrBlock {
            input: network,
            network,
            prefix,
        }
    }

    /// The whole IPv4 space, `0.0.0.0/0`.
    pub fn all() -> CidrBlock {
        CidrBlock::aligned(0, 0)
    }

    /// Copy of this block with the input address dropped.
    pub fn normalized(&self) -> CidrBlock {
        CidrBlock::aligned(self.network, self.prefix)
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// The address this block was created from, host bits included.
    pub fn input_address(&self) -> Address {
        self.input
    }

    /// Lowest address in the block.
    pub fn network(&self) -> Address {
        self.network
    }

    /// Highest address in the block.
    pub fn broadcast(&self) -> Address {
        self.network | self.wildcard_bits()
    }

    pub fn mask(&self) -> SubnetMask {
        SubnetMask::of(self.prefix)
    }

    pub fn wildcard_mask(&self) -> WildcardMask {
        self.mask().wildcard()
    }

    fn wildcard_bits(&self) -> u32 {
        !self.mask().bits()
    }

    /// `2^(32 - prefix)`; 4294967296 for /0.
    pub fn address_count(&self) -> u64 {
        block_size(self.prefix)
    }

    /// Usable hosts. /31 and /32 have no network or broadcast reservation.
    pub fn host_count(&self) -> u64 {
        let count = self.address_count();
        if self.prefix >= MAX_PREFIX - 1 {
            count
        } else {
            count - 2
        }
    }

    /// Input address with host bits zeroed (the network address).
    pub fn network_portion(&self) -> Address {
        self.input & self.mask().bits()
    }

    /// Input address with network bits zeroed.
    pub fn host_portion(&self) -> Address {
        self.input & self.wildcard_bits()
    }

    pub fn first_host(&self) -> Address {
        if self.prefix >= MAX_PREFIX - 1 {
            self.network
        } else {
            self.network + 1
        }
    }

    pub fn last_host(&self) -> Address {
        if self.prefix >= MAX_PREFIX - 1 {
            self.broadcast()
        } else {
            self.broadcast() - 1
        }
    }

    /// Renders `"{input address}/{prefix}"`.
    pub fn cidr(&self) -> String {
        format!("{}/{}", to_dotted(self.input), self.prefix)
    }

    /// Renders `"{network address}/{prefix}"`.
    pub fn network_cidr(&self) -> String {
        format!("{}/{}", to_dotted(self.network), self.prefix)
    }

    pub fn contains_address(&self, addr: Address) -> bool {
        addr >= self.network && addr <= self.broadcast()
    }

    /// The two halves one prefix level down, or `None` for a /32.
    pub fn split(&self) -> Option<(CidrBlock, CidrBlock)> {
        if self.prefix >= MAX_PREFIX {
            return None;
        }
        let prefix = self.prefix + 1;
        let half = block_size(prefix) as u32;
        Some((
            CidrBlock::aligned(self.network, prefix),
            CidrBlock::aligned(self.network + half, prefix),
        ))
    }

    /// The enclosing block one prefix level up, or `None` for a /0.
    pub fn supernet(&self) -> Option<CidrBlock> {
        let prefix = self.prefix.checked_sub(1)?;
        Some(CidrBlock::aligned(
            cut_addr(self.network, prefix).ok()?,
            prefix,
        ))
    }

    /// Lazy, restartable sequence of every address in the block.
    pub fn addresses(&self) -> AddressIter {
        AddressIter::new(self.network, self.broadcast())
    }

    /// Lazy sequence of the usable host addresses.
    pub fn hosts(&self) -> AddressIter {
        AddressIter::new(self.first_host(), self.last_host())
    }

    /// Lazy sequence of the sub-blocks with prefix `new_prefix`.
    pub fn subnets(&self, new_prefix: u8) -> Result<SubnetIter> {
        if new_prefix > MAX_PREFIX {
            return Err(CidrError::InvalidPrefix(new_prefix as i64));
        }
        if new_prefix < self.prefix {
            log::debug!("{} cannot hold larger /{new_prefix} blocks", self.network_cidr());
            return Err(CidrError::InvalidPrefix(new_prefix as i64));
        }
        Ok(SubnetIter {
            next: self.network as u64,
            end: self.broadcast() as u64 + 1,
            prefix: new_prefix,
        })
    }
}

impl TryFrom<(u32, u8)> for CidrBlock {
    type Error = CidrError;

    fn try_from((addr, prefix): (u32, u8)) -> Result<CidrBlock> {
        CidrBlock::new(addr, prefix)
    }
}

impl TryFrom<(u64, i64)> for CidrBlock {
    type Error = CidrError;

    fn try_from((addr, prefix): (u64, i64)) -> Result<CidrBlock> {
        CidrBlock::from_wide(addr, prefix)
    }
}

impl From<Ipv4Addr> for CidrBlock {
    fn from(addr: Ipv4Addr) -> CidrBlock {
        CidrBlock::aligned(u32::from(addr), MAX_PREFIX)
    }
}

impl Serialize for CidrBlock {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.cidr())
    }
}

impl<'de> Deserialize<'de> for CidrBlock {
    fn deserialize<D>(deserializer: D) -> std::result::Result<CidrBlock, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Strings and {"address", "prefix"} objects are both accepted.
        let value = serde_json::Value::deserialize(deserializer)?;
        CidrBlock::try_from(&value).map_err(de::Error::custom)
    }
}

impl std::fmt::Display for CidrBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.cidr())
    }
}

impl PartialEq for CidrBlock {
    fn eq(&self, other: &CidrBlock) -> bool {
        self.network == other.network && self.prefix == other.prefix
    }
}

impl Eq for CidrBlock {}

impl Hash for CidrBlock {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.network.hash(state);
        self.prefix.hash(state);
    }
}

impl Ord for CidrBlock {
    fn cmp(&self, other: &CidrBlock) -> Ordering {
        (self.network, self.prefix).cmp(&(other.network, other.prefix))
    }
}

impl PartialOrd for CidrBlock {
    fn partial_cmp(&self, other: &CidrBlock) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Iterator over an inclusive address range, held as u64 so a /0 never
/// overflows. Clone it to restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressIter {
    front: u64,
    back: u64,
}

impl AddressIter {
    pub fn new(first: Address, last: Address) -> AddressIter {
        AddressIter {
            front: first as u64,
            back: last as u64 + 1,
        }
    }

    /// Addresses left to yield.
    pub fn remaining(&self) -> u64 {
        self.back.saturating_sub(self.front)
    }
}

impl Iterator for AddressIter {
    type Item = Address;

    fn next(&mut self) -> Option<Address> {
        if self.front >= self.back {
            return None;
        }
        let addr = self.front as u32;
        self.front += 1;
        Some(addr)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }

    fn nth(&mut self, n: usize) -> Option<Address> {
        self.front = self.front.saturating_add(n as u64).min(self.back);
        self.next()
    }
}

impl DoubleEndedIterator for AddressIter {
    fn next_back(&mut self) -> Option<Address> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.back as u32)
    }
}

/// Iterator over equal-size sub-blocks of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubnetIter {
    next: u64,
    end: u64,
    prefix: u8,
}

impl Iterator for SubnetIter {
    type Item = CidrBlock;

    fn next(&mut self) -> Option<CidrBlock> {
        if self.next >= self.end {
            return None;
        }
        let block = CidrBlock::aligned(self.next as u32, self.prefix);
        self.next += block_size(self.prefix);
        Some(block)
    }
}
