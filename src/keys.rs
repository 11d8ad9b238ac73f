use crate::error::Error;
use hashbrown::HashSet;

/// A fixed, non-empty set of distinct integer keys.
///
/// Insertion order is kept: the minimal engine ignores it, the ordered engine
/// maps the `i`-th key to slot `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySet {
    keys: Vec<u64>,
}

impl KeySet {
    /// Collect keys, rejecting duplicates and empty input.
    pub fn new<I>(keys: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = u64>,
    {
        let iter = keys.into_iter();
        let mut uniq = Vec::with_capacity(iter.size_hint().0);
        let mut seen = HashSet::<u64>::with_capacity(iter.size_hint().0);
        for k in iter {
            if !seen.insert(k) {
                return Err(Error::DuplicateKey(k));
            }
            uniq.push(k);
        }
        Self::from_unique(uniq)
    }

    /// Collect keys, silently dropping repeats after their first occurrence.
    pub fn dedup<I>(keys: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = u64>,
    {
        let mut seen = HashSet::<u64>::new();
        let uniq: Vec<u64> = keys.into_iter().filter(|k| seen.insert(*k)).collect();
        Self::from_unique(uniq)
    }

    /// Collect signed keys; any negative value is rejected before anything else happens.
    pub fn from_signed<I>(keys: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = i64>,
    {
        let unsigned = keys
            .into_iter()
            .map(|k| u64::try_from(k).map_err(|_| Error::InvalidKey(k)))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(unsigned)
    }

    fn from_unique(keys: Vec<u64>) -> Result<Self, Error> {
        if keys.is_empty() {
            return Err(Error::EmptyKeySet);
        }
        Ok(Self { keys })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[u64] {
        &self.keys
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = u64> + '_ {
        self.keys.iter().copied()
    }

    pub fn min(&self) -> u64 {
        self.keys.iter().copied().min().unwrap_or(0)
    }

    pub fn max(&self) -> u64 {
        self.keys.iter().copied().max().unwrap_or(0)
    }
}

impl<'a> IntoIterator for &'a KeySet {
    type Item = u64;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, u64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter().copied()
    }
}
