//! Subnet and wildcard masks.
//!
//! [`SubnetMask`] and [`WildcardMask`] are bitwise complements of each other:
//! `mask ^ wildcard == 0xFFFFFFFF` and `mask & wildcard == 0`. The wildcard
//! form is the one router ACLs use.

use super::address::to_dotted;
use crate::config::MAX_PREFIX;
use crate::error::{CidrError, Result};
use serde::Serialize;
use std::fmt;

/// Convert a prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use cidr_algebra::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32> {
    if len > MAX_PREFIX {
        Err(CidrError::InvalidPrefix(len as i64))
    } else {
        let right_len = MAX_PREFIX - len;
        let all_bits = u32::MAX as u64;

        let mask = (all_bits >> right_len) << right_len;

        Ok(mask as u32)
    }
}

/// Prefix length of a contiguous mask, or `InvalidMask` when the ones are
/// not all leading.
pub fn mask_to_prefix(mask: u32) -> Result<u8> {
    let ones = mask.leading_ones();
    if mask.checked_shl(ones).unwrap_or(0) != 0 {
        return Err(CidrError::InvalidMask(mask));
    }
    Ok(ones as u8)
}

/// Network mask of a block (`255.255.255.0` for /24).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SubnetMask(u32);

/// Inverted mask of a block (`0.0.0.255` for /24).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct WildcardMask(u32);

impl SubnetMask {
    /// Mask for a prefix already known to be in range; larger values clamp to /32.
    pub(crate) fn of(prefix: u8) -> SubnetMask {
        let right_len = (MAX_PREFIX - prefix.min(MAX_PREFIX)) as u32;
        SubnetMask(u32::MAX.checked_shl(right_len).unwrap_or(0))
    }

    pub fn from_prefix(prefix: u8) -> Result<SubnetMask> {
        Ok(SubnetMask(get_cidr_mask(prefix)?))
    }

    /// Accepts only contiguous masks.
    pub fn from_bits(bits: u32) -> Result<SubnetMask> {
        mask_to_prefix(bits)?;
        Ok(SubnetMask(bits))
    }

    pub fn bits(&self) -> u32 {
        self.0
    }

    pub fn prefix(&self) -> u8 {
        self.0.leading_ones() as u8
    }

    pub fn wildcard(&self) -> WildcardMask {
        WildcardMask(!self.0)
    }
}

impl WildcardMask {
    pub fn from_prefix(prefix: u8) -> Result<WildcardMask> {
        Ok(SubnetMask::from_prefix(prefix)?.wildcard())
    }

    /// Accepts only masks whose ones are all trailing.
    pub fn from_bits(bits: u32) -> Result<WildcardMask> {
        mask_to_prefix(!bits).map_err(|_| CidrError::InvalidMask(bits))?;
        Ok(WildcardMask(bits))
    }

    pub fn bits(&self) -> u32 {
        self.0
    }

    pub fn prefix(&self) -> u8 {
        self.subnet_mask().prefix()
    }

    pub fn subnet_mask(&self) -> SubnetMask {
        SubnetMask(!self.0)
    }
}

impl fmt::Display for SubnetMask {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", to_dotted(self.0))
    }
}

impl fmt::Display for WildcardMask {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", to_dotted(self.0))
    }
}
