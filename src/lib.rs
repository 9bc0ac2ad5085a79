//! Exact arithmetic over IPv4 address space.
//!
//! Addresses are `u32` values and blocks are [`CidrBlock`](models::CidrBlock)
//! values (aligned network address plus prefix length). The algebra in
//! [`processing`] answers whether blocks overlap or nest, what remains of a
//! block after removing others, the minimal set or single block covering a
//! collection, and which blocks of equal size come next or before.
//!
//! ```
//! use cidr_algebra::models::CidrBlock;
//! use cidr_algebra::processing::exclude;
//!
//! let base: CidrBlock = "192.168.0.0/24".parse().unwrap();
//! let cut: CidrBlock = "192.168.0.0/25".parse().unwrap();
//! assert_eq!(exclude(&base, &cut)[0].to_string(), "192.168.0.128/25");
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod parse;
pub mod processing;

pub use error::{CidrError, Direction, Result};
pub use models::CidrBlock;
