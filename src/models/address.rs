//! IPv4 address formatting and parsing.
//!
//! Addresses are plain `u32` values. These helpers render them as dotted
//! quads, 8 digit uppercase hex, 32 digit binary, or reverse DNS names, and
//! parse the first three forms back. Nothing here checks whether an address
//! is routable or special; see [`crate::models::classify`] for that.

use crate::error::{CidrError, Result};
use std::net::Ipv4Addr;

/// One IPv4 host address.
pub type Address = u32;

/// Render an address as `a.b.c.d`.
pub fn to_dotted(addr: Address) -> String {
    Ipv4Addr::from(addr).to_string()
}

/// Render an address as 8 uppercase hex digits, e.g. `C0A80001`.
pub fn to_hex(addr: Address) -> String {
    format!("{addr:08X}")
}

/// Render an address as 32 binary digits.
pub fn to_binary(addr: Address) -> String {
    format!("{addr:032b}")
}

/// Render an address as its `in-addr.arpa` pointer name.
///
/// ```
/// use cidr_algebra::models::to_reverse_dns;
/// assert_eq!(to_reverse_dns(0xC0A80001), "1.0.168.192.in-addr.arpa");
/// ```
pub fn to_reverse_dns(addr: Address) -> String {
    let [a, b, c, d] = addr.to_be_bytes();
    format!("{d}.{c}.{b}.{a}.in-addr.arpa")
}

/// Parse a dotted quad.
pub fn parse_dotted(s: &str) -> Result<Address> {
    let ip: Ipv4Addr = s
        .trim()
        .parse()
        .map_err(|_| CidrError::Parse(format!("Invalid dotted address '{s}'")))?;
    Ok(u32::from(ip))
}

/// Parse hex digits, with or without a `0x` prefix.
pub fn parse_hex(s: &str) -> Result<Address> {
    let s = s.trim();
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if digits.is_empty() || digits.len() > 8 {
        return Err(CidrError::Parse(format!("Invalid hex address '{s}'")));
    }
    u32::from_str_radix(digits, 16).map_err(|_| CidrError::Parse(format!("Invalid hex address '{s}'")))
}

/// Parse binary digits, with or without a `0b` prefix. Dots between octets
/// are accepted.
pub fn parse_binary(s: &str) -> Result<Address> {
    let s = s.trim();
    let digits: String = s
        .strip_prefix("0b")
        .or_else(|| s.strip_prefix("0B"))
        .unwrap_or(s)
        .chars()
        .filter(|c| *c != '.')
        .collect();
    if digits.is_empty() || digits.len() > 32 {
        return Err(CidrError::Parse(format!("Invalid binary address '{s}'")));
    }
    u32::from_str_radix(&digits, 2)
        .map_err(|_| CidrError::Parse(format!("Invalid binary address '{s}'")))
}

/// Widen-checked conversion for callers holding addresses in a wider type.
pub fn address_from_u64(value: u64) -> Result<Address> {
    u32::try_from(value).map_err(|_| CidrError::InvalidAddress(value))
}
