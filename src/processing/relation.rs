//! Relationship predicates between blocks.
//!
//! All three are closed-interval comparisons on `[network, broadcast]`.
//! Because blocks are power-of-two aligned, two blocks that overlap always
//! nest: one contains the other.

use crate::models::CidrBlock;

/// True when the address ranges of `a` and `b` intersect.
pub fn overlaps(a: &CidrBlock, b: &CidrBlock) -> bool {
    a.network() <= b.broadcast() && b.network() <= a.broadcast()
}

/// True when every address of `inner` lies in `outer`. Reflexive.
pub fn contains(outer: &CidrBlock, inner: &CidrBlock) -> bool {
    inner.network() >= outer.network() && inner.broadcast() <= outer.broadcast()
}

/// `is_contained_in(a, b) == contains(b, a)`.
pub fn is_contained_in(inner: &CidrBlock, outer: &CidrBlock) -> bool {
    contains(outer, inner)
}

impl CidrBlock {
    pub fn overlaps(&self, other: &CidrBlock) -> bool {
        overlaps(self, other)
    }

    pub fn contains(&self, other: &CidrBlock) -> bool {
        contains(self, other)
    }

    pub fn is_contained_in(&self, other: &CidrBlock) -> bool {
        is_contained_in(self, other)
    }
}
