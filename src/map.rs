use crate::builder::{BuildConfig, Builder, PerfectHashBuilder};
use crate::error::Error;
use crate::function::{PerfectHash, SlotFunction};
use crate::keys::KeySet;

/// Map over a fixed key set, backed by a perfect hash and a flat value array.
///
/// Lookups, inserts and removals are one hash evaluation plus one array
/// access. Keys outside the original set can never be inserted; the slot
/// table catches them, so they never alias a stored value.
///
/// Iteration follows slot order, which is insertion order for
/// [`Strategy::Ordered`](crate::Strategy::Ordered).
#[derive(Debug, Clone)]
pub struct PerfectMap<V, H = PerfectHash> {
    hash: H,
    slots: Box<[Option<u64>]>, // slot -> key
    values: Vec<Option<V>>,
    len: usize,
}

impl<V> PerfectMap<V> {
    /// Build a minimal perfect hash over `keys` and an empty map on top of it.
    pub fn new<I>(keys: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = u64>,
    {
        Self::with_builder(keys, &Builder::new())
    }

    pub fn with_config<I>(keys: I, cfg: BuildConfig) -> Result<Self, Error>
    where
        I: IntoIterator<Item = u64>,
    {
        Self::with_builder(keys, &Builder::new().with_config(cfg))
    }
}

impl<V, H: SlotFunction> PerfectMap<V, H> {
    pub fn with_builder<B, I>(keys: I, builder: &B) -> Result<Self, Error>
    where
        B: PerfectHashBuilder<Output = H>,
        I: IntoIterator<Item = u64>,
    {
        let keys = KeySet::new(keys)?;
        let hash = builder.build(&keys)?;
        Self::from_hash(hash, &keys)
    }

    /// Wrap an existing hash. Fails with [`Error::UnknownKey`] if `hash` sends
    /// a key outside its slot range, or [`Error::SlotCollision`] if two keys
    /// share a slot.
    pub fn from_hash(hash: H, keys: &KeySet) -> Result<Self, Error> {
        let mut slots: Box<[Option<u64>]> = vec![None; hash.len()].into_boxed_slice();
        for key in keys {
            let s = hash.try_slot(key).ok_or(Error::UnknownKey(key))?;
            if let Some(other) = slots[s].replace(key) {
                return Err(Error::SlotCollision { key, other, slot: s });
            }
        }
        let values = std::iter::repeat_with(|| None).take(slots.len()).collect();
        Ok(Self {
            hash,
            slots,
            values,
            len: 0,
        })
    }

    #[inline]
    fn locate(&self, key: u64) -> Option<usize> {
        let s = self.hash.try_slot(key)?;
        (*self.slots.get(s)? == Some(key)).then_some(s)
    }

    pub fn get(&self, key: u64) -> Option<&V> {
        self.values[self.locate(key)?].as_ref()
    }

    pub fn get_mut(&mut self, key: u64) -> Option<&mut V> {
        let s = self.locate(key)?;
        self.values[s].as_mut()
    }

    /// Store `value` for `key`, returning the previous value.
    pub fn insert(&mut self, key: u64, value: V) -> Result<Option<V>, Error> {
        let s = self.locate(key).ok_or(Error::UnknownKey(key))?;
        let old = self.values[s].replace(value);
        if old.is_none() {
            self.len += 1;
        }
        Ok(old)
    }

    pub fn remove(&mut self, key: u64) -> Option<V> {
        let s = self.locate(key)?;
        let old = self.values[s].take();
        if old.is_some() {
            self.len -= 1;
        }
        old
    }

    /// A value is currently stored for `key`.
    pub fn contains_key(&self, key: u64) -> bool {
        self.get(key).is_some()
    }

    /// `key` belongs to the key set, whether or not a value is stored.
    pub fn is_key(&self, key: u64) -> bool {
        self.locate(key).is_some()
    }

    /// Insert every pair, stopping at the first key outside the key set.
    pub fn try_extend<I>(&mut self, pairs: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (u64, V)>,
    {
        for (key, value) in pairs {
            self.insert(key, value)?;
        }
        Ok(())
    }

    /// Number of stored values.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of keys the map can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn hash(&self) -> &H {
        &self.hash
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &V)> + '_ {
        self.slots
            .iter()
            .zip(&self.values)
            .filter_map(|(k, v)| Some(((*k)?, v.as_ref()?)))
    }

    pub fn keys(&self) -> impl Iterator<Item = u64> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Strategy;
    use crate::displace::DisplacementSearch;

    const MONTHS: [u64; 12] = [31, 28, 331, 30, 531, 630, 731, 831, 930, 1031, 1130, 1231];

    fn ordered_config() -> BuildConfig {
        BuildConfig {
            strategy: Strategy::Ordered,
            ..Default::default()
        }
    }

    #[test]
    fn insert_get_remove() {
        let mut m = PerfectMap::new(MONTHS).unwrap();
        assert!(m.is_empty());
        assert_eq!(m.capacity(), 12);

        assert_eq!(m.insert(1231, 21).unwrap(), None);
        assert_eq!(m.insert(28, 0).unwrap(), None);
        assert_eq!(m.insert(28, 1).unwrap(), Some(0));
        assert_eq!(m.len(), 2);
        assert_eq!(m.get(28), Some(&1));
        assert_eq!(m.get(331), None);
        assert!(m.contains_key(1231) && !m.contains_key(331));
        assert!(m.is_key(331) && !m.is_key(332));

        *m.get_mut(1231).unwrap() += 1;
        assert_eq!(m.remove(1231), Some(22));
        assert_eq!(m.remove(1231), None);
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn foreign_keys_are_rejected() {
        let mut m: PerfectMap<&str> = PerfectMap::new(MONTHS).unwrap();
        assert!(matches!(m.insert(4, "apr"), Err(Error::UnknownKey(4))));
        assert_eq!(m.remove(999_999), None);
        assert_eq!(m.get(u64::MAX), None);
        assert!(m.is_empty());
    }

    #[test]
    fn ordered_map_iterates_in_insertion_order() {
        let mut m = PerfectMap::with_config(MONTHS, ordered_config()).unwrap();
        m.try_extend([(1231, "dec"), (28, "feb"), (531, "may"), (731, "jul")])
            .unwrap();
        assert_eq!(m.keys().collect::<Vec<_>>(), vec![28, 531, 731, 1231]);
        assert_eq!(
            m.values().copied().collect::<Vec<_>>(),
            vec!["feb", "may", "jul", "dec"]
        );
        assert!(m.try_extend([(1, "nope")]).is_err());
    }

    #[test]
    fn from_hash_checks_the_key_set() {
        let keys = KeySet::new([10, 20, 30]).unwrap();
        let params = DisplacementSearch::default().search(&keys).unwrap();
        let m: PerfectMap<u8, _> = PerfectMap::from_hash(params.clone(), &keys).unwrap();
        assert_eq!(m.capacity(), 3);

        let other = KeySet::new([10, 20, 31]).unwrap();
        assert!(PerfectMap::<u8, _>::from_hash(params, &other).is_err());
    }

    #[test]
    fn from_hash_reports_colliding_keys() {
        use crate::displace::HashParameters;

        // Both keys land on slot 0.
        let params = HashParameters {
            n: 2,
            t: 1,
            offset: 0,
            r: vec![0, 0],
        };
        let keys = KeySet::new([0, 1]).unwrap();
        let err = PerfectMap::<u8, _>::from_hash(params, &keys).unwrap_err();
        assert!(matches!(
            err,
            Error::SlotCollision {
                key: 1,
                other: 0,
                slot: 0
            }
        ));
    }
}
