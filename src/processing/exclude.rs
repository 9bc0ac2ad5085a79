//! Set difference of blocks.
//!
//! `exclude(base, cut)` halves `base` until the half holding `cut` is `cut`
//! itself, collecting the untouched halves on the way back out. The result is
//! disjoint, aligned, and ordered from the smallest block (next to `cut`) to
//! the largest (next to the edge of `base`).

use super::relation::{contains, overlaps};
use crate::error::Result;
use crate::models::CidrBlock;
use crate::parse::try_blocks;

/// Remove `cut` from `base`.
pub fn exclude(base: &CidrBlock, cut: &CidrBlock) -> Vec<CidrBlock> {
    let base = base.normalized();
    if !overlaps(&base, cut) {
        return vec![base];
    }
    let mut remaining = Vec::new();
    exclude_into(&base, cut, &mut remaining);
    log::trace!("exclude({base}, {cut}) => {} block(s)", remaining.len());
    remaining
}

fn exclude_into(base: &CidrBlock, cut: &CidrBlock, remaining: &mut Vec<CidrBlock>) {
    if contains(cut, base) {
        return;
    }
    // `base` strictly contains `cut`, so it is larger than a /32.
    let Some((lower, upper)) = base.split() else {
        return;
    };
    let (hit, miss) = if contains(&lower, cut) {
        (lower, upper)
    } else {
        (upper, lower)
    };
    exclude_into(&hit, cut, remaining);
    remaining.push(miss);
}

/// Remove every block of `cuts` from `base`, one cut at a time, each cut
/// applied to what the previous cuts left.
pub fn exclude_all(base: &CidrBlock, cuts: &[CidrBlock]) -> Vec<CidrBlock> {
    let mut remaining = vec![base.normalized()];
    for cut in cuts {
        remaining = remaining
            .into_iter()
            .flat_map(|block| {
                if overlaps(&block, cut) {
                    exclude(&block, cut)
                } else {
                    vec![block]
                }
            })
            .collect();
        log::debug!("exclude_all: after {cut} {} block(s) left", remaining.len());
    }
    remaining
}

/// [`exclude_all`] over untyped cuts; a cut that is not a valid block fails
/// with `TypeMismatch` naming its index.
pub fn exclude_all_items<I, T>(base: &CidrBlock, cuts: I) -> Result<Vec<CidrBlock>>
where
    I: IntoIterator<Item = T>,
    T: TryInto<CidrBlock, Error = crate::error::CidrError>,
{
    let cuts = try_blocks(cuts)?;
    Ok(exclude_all(base, &cuts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CidrError;

    fn block(s: &str) -> CidrBlock {
        s.parse().unwrap()
    }

    fn shown(blocks: &[CidrBlock]) -> Vec<String> {
        blocks.iter().map(|b| b.to_string()).collect()
    }

    #[test]
    fn test_exclude_half() {
        let result = exclude(&block("192.168.0.0/24"), &block("192.168.0.0/25"));
        assert_eq!(shown(&result), vec!["192.168.0.128/25"]);
        let result = exclude(&block("192.168.0.0/24"), &block("192.168.0.128/25"));
        assert_eq!(shown(&result), vec!["192.168.0.0/25"]);
    }

    #[test]
    fn test_exclude_staircase() {
        let result = exclude(&block("10.0.0.0/8"), &block("10.0.0.0/16"));
        assert_eq!(
            shown(&result),
            vec![
                "10.1.0.0/16",
                "10.2.0.0/15",
                "10.4.0.0/14",
                "10.8.0.0/13",
                "10.16.0.0/12",
                "10.32.0.0/11",
                "10.64.0.0/10",
                "10.128.0.0/9"
            ]
        );
    }

    #[test]
    fn test_exclude_middle() {
        let result = exclude(&block("10.0.0.0/24"), &block("10.0.0.64/27"));
        assert_eq!(
            shown(&result),
            vec!["10.0.0.96/27", "10.0.0.0/26", "10.0.0.128/25"]
        );
    }

    #[test]
    fn test_exclude_disjoint_and_covering() {
        let base = block("10.0.0.0/24");
        assert_eq!(exclude(&base, &block("10.0.1.0/24")), vec![base]);
        assert!(exclude(&base, &base).is_empty());
        assert!(exclude(&base, &block("10.0.0.0/8")).is_empty());
        assert!(exclude(&base, &CidrBlock::all()).is_empty());
    }

    #[test]
    fn test_exclude_single_address() {
        let result = exclude(&block("10.0.0.0/30"), &block("10.0.0.2/32"));
        assert_eq!(shown(&result), vec!["10.0.0.3/32", "10.0.0.0/31"]);

        let result = exclude(&CidrBlock::all(), &block("255.255.255.255/32"));
        assert_eq!(result.len(), 32);
        let total: u64 = result.iter().map(|b| b.address_count()).sum();
        assert_eq!(total, 4294967295);
    }

    #[test]
    fn test_exclude_normalizes_output() {
        let result = exclude(&block("10.0.0.77/24"), &block("10.1.0.0/24"));
        assert_eq!(shown(&result), vec!["10.0.0.0/24"]);
    }

    #[test]
    fn test_exclude_all_sequential() {
        let base = block("10.0.0.0/24");
        let cuts = [block("10.0.0.0/26"), block("10.0.0.192/26")];
        let result = exclude_all(&base, &cuts);
        assert_eq!(shown(&result), vec!["10.0.0.64/26", "10.0.0.128/26"]);

        // Nested cuts: the second only sees what the first left.
        let cuts = [block("10.0.0.0/25"), block("10.0.0.0/26"), block("10.0.0.128/26")];
        let result = exclude_all(&base, &cuts);
        assert_eq!(shown(&result), vec!["10.0.0.192/26"]);

        assert_eq!(exclude_all(&base, &[]), vec![base]);
        assert!(exclude_all(&base, &[CidrBlock::all()]).is_empty());
    }

    #[test]
    fn test_exclude_all_items() {
        let base = block("10.0.0.0/24");
        let result = exclude_all_items(&base, ["10.0.0.0/25"]).unwrap();
        assert_eq!(shown(&result), vec!["10.0.0.128/25"]);

        let err = exclude_all_items(&base, ["10.0.0.0/25", "10.0.0.0/99"]).unwrap_err();
        assert!(matches!(err, CidrError::TypeMismatch { index: 1, .. }));
    }
}
