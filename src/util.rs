/// Fixed-size occupancy bitmap with a running count of set bits.
#[derive(Debug)]
pub struct BitSet {
    bits: Vec<u64>,
    len: usize,
    ones: usize,
}

impl BitSet {
    pub fn new(len: usize) -> Self {
        let words = len.div_ceil(64);
        Self { bits: vec![0; words], len, ones: 0 }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Every position in `[0, len)` is set.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.ones == self.len
    }

    #[inline]
    pub fn test(&self, idx: usize) -> bool {
        let (w, b) = (idx / 64, idx % 64);
        (self.bits[w] >> b) & 1 == 1
    }

    #[inline]
    pub fn set(&mut self, idx: usize) {
        let (w, b) = (idx / 64, idx % 64);
        let mask = 1u64 << b;
        if self.bits[w] & mask == 0 {
            self.ones += 1;
        }
        self.bits[w] |= mask;
    }
}

/// Evaluate `attempt` over `candidates` in order and return the first success.
///
/// With `parallel` (and the `parallel` feature) candidates are tried in
/// batches on the rayon pool; `find_map_first` keeps the result identical to
/// the sequential scan.
pub(crate) fn first_success<C, T, F>(
    candidates: impl Iterator<Item = C>,
    parallel: bool,
    attempt: F,
) -> Option<T>
where
    C: Send,
    T: Send,
    F: Fn(C) -> Option<T> + Sync,
{
    #[cfg(feature = "parallel")]
    if parallel {
        use rayon::prelude::*;
        let batch = rayon::current_num_threads().max(1) * 4;
        let mut candidates = candidates;
        loop {
            let chunk: Vec<C> = candidates.by_ref().take(batch).collect();
            if chunk.is_empty() {
                return None;
            }
            if let Some(found) = chunk.into_par_iter().find_map_first(|c| attempt(c)) {
                return Some(found);
            }
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    candidates.into_iter().find_map(|c| attempt(c))
}
