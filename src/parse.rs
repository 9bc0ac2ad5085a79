//! Text and JSON input parsing.
//!
//! Turns user supplied strings into validated [`CidrBlock`] values. Accepted
//! block forms are `a.b.c.d/len`, `a.b.c.d/m.m.m.m`, `a.b.c.d m.m.m.m` and a
//! bare address (treated as /32). Ranges are `start - end`; host requests are
//! `a.b.c.d hosts N`.

use crate::config::MAX_PREFIX;
use crate::error::{CidrError, Result};
use crate::models::{mask_to_prefix, parse_binary, parse_dotted, parse_hex, Address, CidrBlock};
use crate::processing::block_for_hosts;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use std::str::FromStr;

lazy_static! {
    static ref CIDR_RE: Regex =
        Regex::new(r"^\s*(?P<addr>[^\s/]+)\s*(?:(?:/|\s)\s*(?P<len>[^\s/]+))?\s*$")
            .expect("Invalid Regex?");
    static ref RANGE_RE: Regex =
        Regex::new(r"^\s*(?P<start>[^\s-]+)\s*-\s*(?P<end>[^\s-]+)\s*$").expect("Invalid Regex?");
    static ref HOSTS_RE: Regex =
        Regex::new(r"(?i)^\s*(?P<addr>\S+)\s+hosts?\s+(?P<count>\d+)\s*$").expect("Invalid Regex?");
}

/// Parse an address given as a dotted quad, `0x` hex or `0b` binary.
pub fn parse_address(s: &str) -> Result<Address> {
    let s = s.trim();
    if s.starts_with("0x") || s.starts_with("0X") {
        parse_hex(s)
    } else if s.starts_with("0b") || s.starts_with("0B") {
        parse_binary(s)
    } else {
        parse_dotted(s)
    }
}

/// Parse a prefix length, or a dotted mask when the text contains dots.
pub fn parse_prefix(s: &str) -> Result<u8> {
    let s = s.trim();
    if s.contains('.') {
        return mask_to_prefix(parse_dotted(s)?);
    }
    let len: i64 = s
        .parse()
        .map_err(|_| CidrError::Parse(format!("Invalid prefix length '{s}'")))?;
    u8::try_from(len)
        .ok()
        .filter(|len| *len <= MAX_PREFIX)
        .ok_or(CidrError::InvalidPrefix(len))
}

/// Parse a block in any of the accepted text forms.
pub fn parse_cidr(s: &str) -> Result<CidrBlock> {
    let caps = CIDR_RE
        .captures(s)
        .ok_or_else(|| CidrError::Parse(format!("Expected <address>/<prefix>, got '{s}'")))?;
    let addr = parse_address(&caps["addr"])?;
    let prefix = match caps.name("len") {
        Some(len) => parse_prefix(len.as_str())?,
        None => MAX_PREFIX,
    };
    log::trace!("parse_cidr({s}) => {addr:#010x}/{prefix}");
    CidrBlock::new(addr, prefix)
}

/// Parse `start - end` into an inclusive address pair.
pub fn parse_range(s: &str) -> Result<(Address, Address)> {
    let caps = RANGE_RE
        .captures(s)
        .ok_or_else(|| CidrError::Parse(format!("Expected <start> - <end>, got '{s}'")))?;
    let start = parse_address(&caps["start"])?;
    let end = parse_address(&caps["end"])?;
    if start > end {
        return Err(CidrError::Parse(format!(
            "Range start is after range end in '{s}'"
        )));
    }
    Ok((start, end))
}

/// Parse `a.b.c.d hosts N` into the smallest block at that address with at
/// least N usable hosts.
pub fn parse_host_request(s: &str) -> Result<CidrBlock> {
    let caps = HOSTS_RE
        .captures(s)
        .ok_or_else(|| CidrError::Parse(format!("Expected <address> hosts <count>, got '{s}'")))?;
    let addr = parse_address(&caps["addr"])?;
    let count: u64 = caps["count"]
        .parse()
        .map_err(|_| CidrError::Parse(format!("Invalid host count '{}'", &caps["count"])))?;
    block_for_hosts(addr, count)
}

/// Convert every item to a block; a failing item is reported by index.
pub fn try_blocks<I, T>(items: I) -> Result<Vec<CidrBlock>>
where
    I: IntoIterator<Item = T>,
    T: TryInto<CidrBlock, Error = CidrError>,
{
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            item.try_into().map_err(|e: CidrError| CidrError::TypeMismatch {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

impl FromStr for CidrBlock {
    type Err = CidrError;

    fn from_str(s: &str) -> Result<CidrBlock> {
        parse_cidr(s)
    }
}

impl TryFrom<&str> for CidrBlock {
    type Error = CidrError;

    fn try_from(s: &str) -> Result<CidrBlock> {
        parse_cidr(s)
    }
}

impl TryFrom<&String> for CidrBlock {
    type Error = CidrError;

    fn try_from(s: &String) -> Result<CidrBlock> {
        parse_cidr(s)
    }
}

/// Accepts `"a.b.c.d/len"` strings or `{"address": .., "prefix": ..}`
/// objects where the address is a string or an integer.
impl TryFrom<&Value> for CidrBlock {
    type Error = CidrError;

    fn try_from(value: &Value) -> Result<CidrBlock> {
        match value {
            Value::String(s) => parse_cidr(s),
            Value::Object(map) => {
                let prefix = map
                    .get("prefix")
                    .and_then(Value::as_i64)
                    .ok_or_else(|| CidrError::Parse("Missing integer 'prefix'".to_string()))?;
                match map.get("address") {
                    Some(Value::String(s)) => {
                        let addr = parse_address(s)?;
                        CidrBlock::from_wide(addr as u64, prefix)
                    }
                    Some(Value::Number(n)) => {
                        let addr = n.as_u64().ok_or_else(|| {
                            CidrError::Parse(format!("Address {n} is not an unsigned integer"))
                        })?;
                        CidrBlock::from_wide(addr, prefix)
                    }
                    _ => Err(CidrError::Parse("Missing 'address'".to_string())),
                }
            }
            other => Err(CidrError::Parse(format!(
                "Expected a CIDR string or object, got {other}"
            ))),
        }
    }
}

impl TryFrom<Value> for CidrBlock {
    type Error = CidrError;

    fn try_from(value: Value) -> Result<CidrBlock> {
        CidrBlock::try_from(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_address_forms() {
        assert_eq!(parse_address("192.168.0.1").unwrap(), 0xC0A80001);
        assert_eq!(parse_address("0xC0A80001").unwrap(), 0xC0A80001);
        assert_eq!(
            parse_address("0b11000000101010000000000000000001").unwrap(),
            0xC0A80001
        );
        assert!(parse_address("hello").is_err());
    }

    #[test]
    fn test_parse_cidr_forms() {
        let expected = CidrBlock::new(0x0A000000, 24).unwrap();
        assert_eq!(parse_cidr("10.0.0.0/24").unwrap(), expected);
        assert_eq!(parse_cidr(" 10.0.0.0 / 24 ").unwrap(), expected);
        assert_eq!(parse_cidr("10.0.0.0/255.255.255.0").unwrap(), expected);
        assert_eq!(parse_cidr("10.0.0.0 255.255.255.0").unwrap(), expected);
        assert_eq!(parse_cidr("10.0.0.9").unwrap().prefix(), 32);

        let block = parse_cidr("10.0.0.77/24").unwrap();
        assert_eq!(block, expected);
        assert_eq!(block.cidr(), "10.0.0.77/24");
    }

    #[test]
    fn test_parse_cidr_errors() {
        assert_eq!(
            parse_cidr("10.0.0.0/33").unwrap_err(),
            CidrError::InvalidPrefix(33)
        );
        assert_eq!(
            parse_cidr("10.0.0.0/-1").unwrap_err(),
            CidrError::InvalidPrefix(-1)
        );
        assert_eq!(
            parse_cidr("10.0.0.0/255.0.255.0").unwrap_err(),
            CidrError::InvalidMask(0xFF00FF00)
        );
        assert!(matches!(parse_cidr("10.0.0/8"), Err(CidrError::Parse(_))));
        assert!(matches!(parse_cidr("10.0.0.0/8/8"), Err(CidrError::Parse(_))));
        assert!(matches!(parse_cidr(""), Err(CidrError::Parse(_))));
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(
            parse_range("10.0.0.0 - 10.0.0.255").unwrap(),
            (0x0A000000, 0x0A0000FF)
        );
        assert_eq!(parse_range("10.0.0.5-10.0.0.5").unwrap(), (0x0A000005, 0x0A000005));
        assert!(parse_range("10.0.1.0 - 10.0.0.0").is_err());
        assert!(parse_range("10.0.1.0").is_err());
    }

    #[test]
    fn test_parse_host_request() {
        let block = parse_host_request("192.168.10.0 hosts 50").unwrap();
        assert_eq!(block.to_string(), "192.168.10.0/26");
        let block = parse_host_request("10.0.0.0 HOSTS 1").unwrap();
        assert_eq!(block.prefix(), 32);
        assert!(parse_host_request("10.0.0.0 hosts many").is_err());
    }

    #[test]
    fn test_try_blocks_reports_index() {
        let blocks = try_blocks(["10.0.0.0/24", "10.0.1.0/24"]).unwrap();
        assert_eq!(blocks.len(), 2);

        let err = try_blocks(["10.0.0.0/24", "10.0.1.0/24", "nonsense"]).unwrap_err();
        match err {
            CidrError::TypeMismatch { index, .. } => assert_eq!(index, 2),
            other => panic!("unexpected error {other:?}"),
        }

        let err = try_blocks(vec![(0u64, 8i64), (1u64 << 33, 8i64)]).unwrap_err();
        assert!(matches!(err, CidrError::TypeMismatch { index: 1, .. }));
    }

    #[test]
    fn test_json_values() {
        let values = json!([
            "10.0.0.0/8",
            {"address": "172.16.0.0", "prefix": 12},
            {"address": 3232235520u64, "prefix": 16}
        ]);
        let blocks = try_blocks(values.as_array().unwrap()).unwrap();
        let shown: Vec<String> = blocks.iter().map(|b| b.to_string()).collect();
        assert_eq!(shown, vec!["10.0.0.0/8", "172.16.0.0/12", "192.168.0.0/16"]);

        let bad = json!(["10.0.0.0/8", 42, {"address": 4294967296u64, "prefix": 8}]);
        let err = try_blocks(bad.as_array().unwrap()).unwrap_err();
        assert!(matches!(err, CidrError::TypeMismatch { index: 1, .. }));
        assert_eq!(
            CidrBlock::try_from(&bad[2]).unwrap_err(),
            CidrError::InvalidAddress(4294967296)
        );
    }
}
