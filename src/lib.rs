//! int_perfect_hash: perfect hashing for fixed sets of integer keys.
//!
//! - Build once, offline, on a set of **unique** `u64` keys.
//! - Minimal (default): `f(k) = k % t + r[k / t]`, slots exactly `[0..n)`.
//! - Ordered: acyclic-graph (CHM) construction, the `i`-th key hashes to `i`.
//! - Both results are plain parameter sets that can be exported and
//!   re-evaluated in any language.
//!
//! ```
//! use int_perfect_hash::{Builder, SlotFunction};
//!
//! let keys = [0, 3, 4, 7, 10, 13, 15, 18, 19, 21, 22, 24, 26, 29, 30, 34];
//! let hash = Builder::new().build(keys)?;
//! let params = hash.as_minimal().unwrap();
//! assert_eq!((params.t, params.r.as_slice()), (6, &[2, 7, 12, 0, 7, 10][..]));
//! assert_eq!(hash.slot(19), 1);
//! # Ok::<(), int_perfect_hash::Error>(())
//! ```

mod bucket;
mod builder;
mod displace;
mod error;
mod forest;
mod function;
mod hash;
mod keys;
mod map;
mod ordered;
mod util;

pub use builder::{BuildConfig, Builder, PerfectHashBuilder, Strategy};
pub use displace::{DisplacementSearch, HashParameters};
pub use error::Error;
pub use function::{PerfectHash, SlotFunction};
pub use hash::HashFamily;
pub use keys::KeySet;
pub use map::PerfectMap;
pub use ordered::{OrderedConstruction, OrderedHash};

/// Minimal perfect hash parameters `(t, r)` for `keys` with default settings.
pub fn hash_parameters<I>(keys: I) -> Result<HashParameters, Error>
where
    I: IntoIterator<Item = u64>,
{
    let keys = KeySet::new(keys)?;
    DisplacementSearch::default().search(&keys)
}

/// A callable minimal perfect hash (or order-preserving with [`Strategy::Ordered`]).
pub fn make_hash<I>(keys: I, strategy: Strategy) -> Result<impl Fn(u64) -> usize + Send + Sync, Error>
where
    I: IntoIterator<Item = u64>,
{
    Ok(Builder::new().with_strategy(strategy).build(keys)?.into_fn())
}
