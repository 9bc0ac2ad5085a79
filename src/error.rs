//! Error type shared by the subnet algebra.

use thiserror::Error;

/// Which way a stepping operation moved when it ran off the address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Direction::Next => write!(f, "next"),
            Direction::Previous => write!(f, "previous"),
        }
    }
}

/// Errors raised by block construction, parsing and the algebra.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CidrError {
    #[error("Prefix length {0} is outside 0..=32")]
    InvalidPrefix(i64),
    #[error("Address {0} is outside 0..=4294967295")]
    InvalidAddress(u64),
    #[error("Mask {0:#010x} is not a contiguous run of leading ones")]
    InvalidMask(u32),
    #[error("Stepping {direction} {steps} block(s) from {block} leaves the IPv4 address space")]
    BoundaryExceeded {
        block: String,
        direction: Direction,
        steps: u64,
    },
    #[error("Cannot summarize an empty set of blocks")]
    EmptyInputSet,
    #[error("Element #{index} is not a valid block: {reason}")]
    TypeMismatch { index: usize, reason: String },
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result alias used across the library.
pub type Result<T> = std::result::Result<T, CidrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CidrError::InvalidPrefix(33).to_string(),
            "Prefix length 33 is outside 0..=32"
        );
        assert_eq!(
            CidrError::InvalidMask(0xFF00FF00).to_string(),
            "Mask 0xff00ff00 is not a contiguous run of leading ones"
        );
        let err = CidrError::BoundaryExceeded {
            block: "255.255.255.0/24".to_string(),
            direction: Direction::Next,
            steps: 1,
        };
        assert_eq!(
            err.to_string(),
            "Stepping next 1 block(s) from 255.255.255.0/24 leaves the IPv4 address space"
        );
    }
}
