use crate::displace::HashParameters;
#[cfg(feature = "serde")]
use crate::error::Error;
use crate::ordered::OrderedHash;

/// A built perfect hash, evaluated as `key -> slot`.
pub trait SlotFunction {
    /// Slot of a key from the original set.
    ///
    /// Other keys get an unspecified slot and may panic; use
    /// [`try_slot`](Self::try_slot) when the key is not known to be a member.
    fn slot(&self, key: u64) -> usize;

    /// `None` when the evaluation leaves the tables or the slot range. A
    /// `Some` result does not prove membership.
    fn try_slot(&self, key: u64) -> Option<usize>;

    /// Size of the slot range.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SlotFunction for HashParameters {
    #[inline]
    fn slot(&self, key: u64) -> usize {
        self.index(key) as usize
    }

    #[inline]
    fn try_slot(&self, key: u64) -> Option<usize> {
        self.try_index(key).map(|s| s as usize)
    }

    fn len(&self) -> usize {
        self.n as usize
    }
}

impl SlotFunction for OrderedHash {
    #[inline]
    fn slot(&self, key: u64) -> usize {
        self.index(key) as usize
    }

    #[inline]
    fn try_slot(&self, key: u64) -> Option<usize> {
        self.try_index(key).map(|s| s as usize)
    }

    fn len(&self) -> usize {
        self.n as usize
    }
}

/// Output of [`Builder`](crate::Builder): either engine behind one function.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PerfectHash {
    Minimal(HashParameters),
    Ordered(OrderedHash),
}

impl PerfectHash {
    /// Turn the hash into a plain closure.
    pub fn into_fn(self) -> impl Fn(u64) -> usize + Send + Sync {
        move |key| self.slot(key)
    }

    pub fn as_minimal(&self) -> Option<&HashParameters> {
        match self {
            PerfectHash::Minimal(p) => Some(p),
            PerfectHash::Ordered(_) => None,
        }
    }

    pub fn as_ordered(&self) -> Option<&OrderedHash> {
        match self {
            PerfectHash::Ordered(h) => Some(h),
            PerfectHash::Minimal(_) => None,
        }
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

impl SlotFunction for PerfectHash {
    #[inline]
    fn slot(&self, key: u64) -> usize {
        match self {
            PerfectHash::Minimal(p) => p.slot(key),
            PerfectHash::Ordered(h) => h.slot(key),
        }
    }

    #[inline]
    fn try_slot(&self, key: u64) -> Option<usize> {
        match self {
            PerfectHash::Minimal(p) => p.try_slot(key),
            PerfectHash::Ordered(h) => h.try_slot(key),
        }
    }

    fn len(&self) -> usize {
        match self {
            PerfectHash::Minimal(p) => p.len(),
            PerfectHash::Ordered(h) => h.len(),
        }
    }
}

impl From<HashParameters> for PerfectHash {
    fn from(p: HashParameters) -> Self {
        PerfectHash::Minimal(p)
    }
}

impl From<OrderedHash> for PerfectHash {
    fn from(h: OrderedHash) -> Self {
        PerfectHash::Ordered(h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DisplacementSearch, KeySet, OrderedConstruction};

    #[test]
    fn delegates_to_both_engines() {
        let keys = KeySet::new([5, 9, 2, 40]).unwrap();
        let minimal: PerfectHash = DisplacementSearch::default().search(&keys).unwrap().into();
        let ordered: PerfectHash = OrderedConstruction::default().construct(&keys).unwrap().into();

        for h in [&minimal, &ordered] {
            assert_eq!(h.len(), 4);
            let mut slots: Vec<usize> = keys.iter().map(|k| h.slot(k)).collect();
            slots.sort_unstable();
            assert_eq!(slots, vec![0, 1, 2, 3]);
        }
        assert!(minimal.as_minimal().is_some() && minimal.as_ordered().is_none());
        assert_eq!(ordered.slot(2), 2);
    }

    #[test]
    fn closure_matches_slot() {
        let keys = KeySet::new([11, 22, 33]).unwrap();
        let h: PerfectHash = DisplacementSearch::default().search(&keys).unwrap().into();
        let expected: Vec<usize> = keys.iter().map(|k| h.slot(k)).collect();
        let f = h.into_fn();
        assert_eq!(keys.iter().map(&f).collect::<Vec<_>>(), expected);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn bytes_round_trip() {
        let keys = KeySet::new([3, 14, 15, 92, 65]).unwrap();
        let h: PerfectHash = OrderedConstruction::default().construct(&keys).unwrap().into();
        let back = PerfectHash::from_bytes(&h.to_bytes().unwrap()).unwrap();
        assert_eq!(h, back);
    }
}
