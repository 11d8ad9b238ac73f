use ahash::AHashMap;
use std::num::NonZeroU64;

/// Keys sharing the same quotient `y = key / t`, with their residues `x = key % t`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub id: u64,
    /// `(key, x)` pairs in key-set order.
    pub members: Vec<(u64, u64)>,
}

impl Bucket {
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn residues(&self) -> impl Iterator<Item = u64> + '_ {
        self.members.iter().map(|&(_, x)| x)
    }

    pub fn max_residue(&self) -> u64 {
        self.residues().max().unwrap_or(0)
    }
}

/// Group keys into non-empty buckets for modulus `t`.
///
/// Buckets come back largest first, ties broken by ascending id: the
/// displacement search places them in exactly this order.
pub fn partition<I>(keys: I, t: NonZeroU64) -> Vec<Bucket>
where
    I: IntoIterator<Item = u64>,
{
    let t = t.get();
    let mut by_id: AHashMap<u64, Vec<(u64, u64)>> = AHashMap::new();
    for key in keys {
        by_id.entry(key / t).or_default().push((key, key % t));
    }

    let mut buckets: Vec<Bucket> = by_id
        .into_iter()
        .map(|(id, members)| Bucket { id, members })
        .collect();
    buckets.sort_unstable_by(|a, b| b.len().cmp(&a.len()).then(a.id.cmp(&b.id)));
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: [u64; 16] = [0, 3, 4, 7, 10, 13, 15, 18, 19, 21, 22, 24, 26, 29, 30, 34];

    fn nz(t: u64) -> NonZeroU64 {
        NonZeroU64::new(t).unwrap()
    }

    #[test]
    fn every_key_lands_in_one_bucket() {
        let buckets = partition(EXAMPLE, nz(6));
        let total: usize = buckets.iter().map(Bucket::len).sum();
        assert_eq!(total, EXAMPLE.len());
        for b in &buckets {
            for &(key, x) in &b.members {
                assert_eq!(key / 6, b.id);
                assert_eq!(key % 6, x);
            }
        }
    }

    #[test]
    fn largest_first_then_by_id() {
        let order: Vec<(u64, usize)> = partition(EXAMPLE, nz(6))
            .iter()
            .map(|b| (b.id, b.len()))
            .collect();
        assert_eq!(order, vec![(3, 4), (0, 3), (4, 3), (1, 2), (2, 2), (5, 2)]);
    }

    #[test]
    fn modulus_one_gives_singletons() {
        let buckets = partition([9, 2, 5], nz(1));
        assert_eq!(buckets.iter().map(|b| b.id).collect::<Vec<_>>(), vec![2, 5, 9]);
        assert!(buckets.iter().all(|b| b.len() == 1 && b.max_residue() == 0));
    }
}
