use xxhash_rust::xxh3::xxh3_64_with_seed;

/// Seeded 64-bit hash used to derive graph vertices from an integer key.
///
/// Keys are hashed as their 8 little-endian bytes, so the exported
/// `(family, seeds)` pair is enough to recompute vertices elsewhere.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HashFamily {
    #[default]
    Xxh3,
    WyHash,
}

impl HashFamily {
    #[inline]
    pub fn hash(self, key: u64, seed: u64) -> u64 {
        let bytes = key.to_le_bytes();
        match self {
            HashFamily::Xxh3 => xxh3_64_with_seed(&bytes, seed),
            HashFamily::WyHash => wyhash::wyhash(&bytes, seed),
        }
    }
}

/// The two endpoints of a key's edge in a graph with `m` vertices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEdge {
    pub u: u64,
    pub v: u64,
}

impl KeyEdge {
    #[inline]
    pub fn from_key(family: HashFamily, seeds: [u64; 2], key: u64, m: u64) -> Self {
        let m = m.max(1);
        Self {
            u: family.hash(key, seeds[0]) % m,
            v: family.hash(key, seeds[1]) % m,
        }
    }
}
