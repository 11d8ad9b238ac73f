//! Minimal perfect hashing by first-fit-decreasing row displacement.
//!
//! Keys are laid out in a conceptual table with `t` columns: key `k` sits in
//! row `k / t`, column `k % t`. Rows are shifted right (never left) until every
//! column of the single flattened row `[0, n)` is taken exactly once.
//!
//! Query: `f(k) = (k - offset) % t + r[(k - offset) / t]`

use crate::bucket::{partition, Bucket};
use crate::error::Error;
use crate::keys::KeySet;
use crate::util::{first_success, BitSet};
use std::num::NonZeroU64;

/// Parameters of a minimal perfect hash found by [`DisplacementSearch`].
///
/// `t` and `r` are all an external implementation needs (plus `offset`,
/// which is zero unless the build asked to minimize).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashParameters {
    pub n: u64,
    pub t: u64,
    pub offset: u64,
    pub r: Vec<u64>, // len == (max_key - offset) / t + 1
}

impl HashParameters {
    /// O(1) lookup for a key of the original set.
    ///
    /// Keys outside the set may return any value or panic on the row index.
    #[inline]
    pub fn index(&self, key: u64) -> u64 {
        let k = key.wrapping_sub(self.offset);
        k % self.t + self.r[(k / self.t) as usize]
    }

    /// Like [`index`](Self::index) but `None` when the evaluation leaves the
    /// displacement vector or the slot range.
    pub fn try_index(&self, key: u64) -> Option<u64> {
        let k = key.checked_sub(self.offset)?;
        let row = usize::try_from(k / self.t).ok()?;
        let slot = (k % self.t).checked_add(*self.r.get(row)?)?;
        (slot < self.n).then_some(slot)
    }

    /// Inverse mapping: entry `i` is the key hashed to slot `i`.
    pub fn slot_table(&self, keys: &KeySet) -> Vec<u64> {
        let mut slots = vec![0u64; self.n as usize];
        for key in keys {
            slots[self.index(key) as usize] = key;
        }
        slots
    }

    #[cfg(feature = "serde")]
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        Ok(bincode::serialize(self)?)
    }

    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// Search parameters for the minimal engine.
#[derive(Debug, Clone)]
pub struct DisplacementSearch {
    /// First modulus tried. `None` picks `ceil(sqrt(max + 1))`, or `n` when that is smaller than `sqrt(n)`.
    pub initial_modulus: Option<NonZeroU64>,
    /// Subtract the smallest key before laying keys out; usually shrinks `r`.
    pub minimize: bool,
    /// Longest displacement vector the search may produce. Moduli that
    /// would need more rows are never tried.
    pub max_rows: u64,
    /// Try several moduli at once on the rayon pool (needs the `parallel` feature).
    pub parallel: bool,
}

impl Default for DisplacementSearch {
    fn default() -> Self {
        Self {
            initial_modulus: None,
            minimize: false,
            max_rows: 1 << 26,
            parallel: true,
        }
    }
}

impl DisplacementSearch {
    /// Find `(t, r)` such that every key gets a distinct slot in `[0, n)`.
    ///
    /// A single key is always offset to zero. When no modulus fits within
    /// `max_rows` on the raw keys, the search is repeated once with the
    /// smallest key as offset before giving up with
    /// [`Error::RowLimitExceeded`].
    pub fn search(&self, keys: &KeySet) -> Result<HashParameters, Error> {
        let n = keys.len() as u64;
        let min = keys.min();
        let offset = if self.minimize || n == 1 { min } else { 0 };

        let found = match self.search_with_offset(keys, offset) {
            None if offset == 0 && min > 0 => {
                log::debug!("no modulus within {} rows, retrying with offset {min}", self.max_rows);
                self.search_with_offset(keys, min)
            }
            found => found,
        };

        let Some(params) = found else {
            log::error!("displacement search gave up: every modulus needs more than {} rows", self.max_rows);
            return Err(Error::RowLimitExceeded {
                max_rows: self.max_rows,
            });
        };
        log::debug!("minimal perfect hash found: t={}, offset={}, |r|={}", params.t, params.offset, params.r.len());
        Ok(params)
    }

    fn search_with_offset(&self, keys: &KeySet, offset: u64) -> Option<HashParameters> {
        let n = keys.len() as u64;
        let shifted: Vec<u64> = keys.iter().map(|k| k - offset).collect();
        let max = keys.max() - offset;

        let t0 = self
            .initial_modulus
            .map(NonZeroU64::get)
            .unwrap_or_else(|| starting_modulus(max, n));
        let t_min = smallest_modulus(max, self.max_rows);
        log::debug!("displacement search: n={n}, max={max}, offset={offset}, starting t={t0}, t >= {t_min}");

        let (t, r) = first_success(candidate_moduli(t0, n, max, t_min), self.parallel, |t| {
            let placed = try_modulus(&shifted, t);
            if placed.is_none() {
                log::trace!("modulus {t} abandoned");
            }
            placed.map(|r| (t, r))
        })?;
        Some(HashParameters {
            n,
            t: t.get(),
            offset,
            r,
        })
    }
}

/// Smallest `t` with `t * t > max`, raised to `n` if the square could not hold every key.
fn starting_modulus(max: u64, n: u64) -> u64 {
    let t = ceil_sqrt(max.saturating_add(1)).max(1);
    if (t as u128) * (t as u128) < n as u128 { n } else { t }
}

fn ceil_sqrt(v: u64) -> u64 {
    let s = v.isqrt();
    if s * s < v { s + 1 } else { s }
}

/// Smallest `t` whose displacement vector, `max / t + 1` rows, fits in `max_rows`.
fn smallest_modulus(max: u64, max_rows: u64) -> u64 {
    max / max_rows.max(1) + 1
}

/// `lo, lo + 1, ..., top`, then `lo - 1, ..., t_min`, where `lo = max(t0, t_min)`
/// and `top = min(max + 1, lo + max(t0, n))`.
///
/// Past `max + 1` every key sits in row 0, and once `t` is well above `n`
/// some residue almost surely lands outside `[0, n)`, so the upward scan
/// stops there. With `t_min = 1` the scan ends on modulus 1, which always places.
fn candidate_moduli(t0: u64, n: u64, max: u64, t_min: u64) -> impl Iterator<Item = NonZeroU64> {
    let t0 = t0.max(1);
    let lo = t0.max(t_min);
    let top = max
        .saturating_add(1)
        .min(lo.saturating_add(t0.max(n)))
        .max(lo);
    (lo..=top).chain((t_min..lo).rev()).filter_map(NonZeroU64::new)
}

/// Place every bucket for modulus `t`, largest first, at its smallest free
/// displacement. `None` as soon as one bucket cannot be placed.
fn try_modulus(keys: &[u64], t: NonZeroU64) -> Option<Vec<u64>> {
    let n = keys.len();
    // A residue can never move left, so it must already be a valid slot.
    if keys.iter().any(|&k| k % t >= n as u64) {
        return None;
    }
    let buckets = partition(keys.iter().copied(), t);
    let mut occupied = BitSet::new(n);
    let mut disps = Vec::with_capacity(buckets.len());

    for bucket in &buckets {
        let d = first_fit(bucket, &occupied)?;
        for x in bucket.residues() {
            occupied.set((x + d) as usize);
        }
        disps.push((bucket.id, d));
    }
    debug_assert!(occupied.is_full());

    let rows = buckets.iter().map(|b| b.id).max().unwrap_or(0) as usize + 1;
    let mut r = vec![0u64; rows];
    for (id, d) in disps {
        r[id as usize] = d;
    }
    Some(r)
}

/// Smallest `d` that puts the whole bucket on free slots inside `[0, n)`.
fn first_fit(bucket: &Bucket, occupied: &BitSet) -> Option<u64> {
    let last_slot = occupied.len().checked_sub(1)? as u64;
    let ceiling = last_slot.checked_sub(bucket.max_residue())?;
    (0..=ceiling).find(|&d| bucket.residues().all(|x| !occupied.test((x + d) as usize)))
}
