//! Legacy classful addressing and well-known special-purpose ranges.

use super::address::Address;
use super::cidr::CidrBlock;
use lazy_static::lazy_static;
use serde::Serialize;
use std::fmt;

/// Pre-CIDR address class, decided by the leading bits of an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AddressClass {
    A,
    B,
    C,
    D,
    E,
}

impl AddressClass {
    pub fn of(addr: Address) -> AddressClass {
        match addr.leading_ones() {
            0 => AddressClass::A,
            1 => AddressClass::B,
            2 => AddressClass::C,
            3 => AddressClass::D,
            _ => AddressClass::E,
        }
    }

    /// Classful network prefix; multicast and reserved space have none.
    pub fn default_prefix(&self) -> Option<u8> {
        match self {
            AddressClass::A => Some(8),
            AddressClass::B => Some(16),
            AddressClass::C => Some(24),
            AddressClass::D | AddressClass::E => None,
        }
    }
}

impl fmt::Display for AddressClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            AddressClass::A => "A",
            AddressClass::B => "B",
            AddressClass::C => "C",
            AddressClass::D => "D (multicast)",
            AddressClass::E => "E (reserved)",
        };
        write!(f, "{name}")
    }
}

/// One entry of the special-purpose address registry.
#[derive(Debug, Clone, Serialize)]
pub struct WellKnownRange {
    pub block: CidrBlock,
    pub name: &'static str,
    pub rfc: &'static str,
}

const WELL_KNOWN: &[(u32, u8, &str, &str)] = &[
    (0x00000000, 8, "This network", "RFC 791"),
    (0x0A000000, 8, "Private-Use", "RFC 1918"),
    (0x64400000, 10, "Shared Address Space", "RFC 6598"),
    (0x7F000000, 8, "Loopback", "RFC 1122"),
    (0xA9FE0000, 16, "Link Local", "RFC 3927"),
    (0xAC100000, 12, "Private-Use", "RFC 1918"),
    (0xC0000000, 24, "IETF Protocol Assignments", "RFC 6890"),
    (0xC0000200, 24, "Documentation (TEST-NET-1)", "RFC 5737"),
    (0xC0586300, 24, "6to4 Relay Anycast", "RFC 7526"),
    (0xC0A80000, 16, "Private-Use", "RFC 1918"),
    (0xC6120000, 15, "Benchmarking", "RFC 2544"),
    (0xC6336400, 24, "Documentation (TEST-NET-2)", "RFC 5737"),
    (0xCB007100, 24, "Documentation (TEST-NET-3)", "RFC 5737"),
    (0xE0000000, 4, "Multicast", "RFC 5771"),
    (0xF0000000, 4, "Reserved", "RFC 1112"),
    (0xFFFFFFFF, 32, "Limited Broadcast", "RFC 919"),
];

lazy_static! {
    static ref WELL_KNOWN_RANGES: Vec<WellKnownRange> = WELL_KNOWN
        .iter()
        .map(|&(network, prefix, name, rfc)| WellKnownRange {
            block: CidrBlock::aligned(network, prefix),
            name,
            rfc,
        })
        .collect();
}

/// The whole registry, ordered by network address.
pub fn well_known_ranges() -> &'static [WellKnownRange] {
    &WELL_KNOWN_RANGES
}

/// Registry entries that fully contain `block`, most specific first.
pub fn well_known(block: &CidrBlock) -> Vec<&'static WellKnownRange> {
    let mut found: Vec<&WellKnownRange> = WELL_KNOWN_RANGES
        .iter()
        .filter(|range| range.block.contains(block))
        .collect();
    found.sort_by_key(|range| std::cmp::Reverse(range.block.prefix()));
    found
}

/// True when the block lies inside one of the RFC 1918 ranges.
pub fn is_private(block: &CidrBlock) -> bool {
    well_known(block).iter().any(|range| range.rfc == "RFC 1918")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(s: &str) -> CidrBlock {
        s.parse().unwrap()
    }

    #[test]
    fn test_address_class() {
        assert_eq!(AddressClass::of(block("10.0.0.0/8").network()), AddressClass::A);
        assert_eq!(AddressClass::of(0x7FFFFFFF), AddressClass::A);
        assert_eq!(AddressClass::of(0x80000000), AddressClass::B);
        assert_eq!(AddressClass::of(0xC0A80101), AddressClass::C);
        assert_eq!(AddressClass::of(0xE0000001), AddressClass::D);
        assert_eq!(AddressClass::of(0xF0000000), AddressClass::E);
        assert_eq!(AddressClass::of(u32::MAX), AddressClass::E);
        assert_eq!(AddressClass::B.default_prefix(), Some(16));
        assert_eq!(AddressClass::D.default_prefix(), None);
    }

    #[test]
    fn test_well_known() {
        let names: Vec<&str> = well_known(&block("192.168.10.0/24"))
            .iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Private-Use"]);
        assert!(is_private(&block("172.16.5.0/24")));
        assert!(!is_private(&block("172.32.0.0/24")));
        // Spanning past the registry entry does not match.
        assert!(well_known(&block("192.168.0.0/15")).is_empty());
        assert_eq!(
            well_known(&block("255.255.255.255/32"))
                .iter()
                .map(|r| r.name)
                .collect::<Vec<_>>(),
            vec!["Limited Broadcast", "Reserved"]
        );
    }

    #[test]
    fn test_registry_is_aligned_and_sorted() {
        let ranges = well_known_ranges();
        for pair in ranges.windows(2) {
            assert!(pair[0].block.network() < pair[1].block.network());
        }
        for range in ranges {
            assert_eq!(range.block.network(), range.block.normalized().network());
            assert_eq!(
                CidrBlock::new(range.block.network(), range.block.prefix()).unwrap(),
                range.block
            );
        }
    }
}
