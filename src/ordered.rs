use crate::error::Error;
use crate::forest::{Forest, Rejection};
use crate::hash::{HashFamily, KeyEdge};
use crate::keys::KeySet;
use crate::util::first_success;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Order-preserving minimal perfect hash over an acyclic 2-graph (CHM).
///
/// Every key is an edge `(h1(k), h2(k))` between `m` vertices; `g` is solved
/// per tree so that the `i`-th key of the key set evaluates to `i`.
///
/// Query: `f(k) = (g[h1(k)] + g[h2(k)]) % m`, with
/// `h_i(k) = family.hash(k.to_le_bytes(), seeds[i]) % m`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedHash {
    pub n: u64,              // number of keys
    pub m: u64,              // graph vertices, m >= n
    pub family: HashFamily,  // vertex hash
    pub seeds: [u64; 2],     // seeds of h1 and h2
    pub g: Vec<u64>,         // len == m, values in [0..m)
    /// 1-based number of the trial whose graph was acyclic.
    pub trials: u32,
}

impl OrderedHash {
    /// Insertion rank of a key of the original set.
    #[inline]
    pub fn index(&self, key: u64) -> u64 {
        let e = KeyEdge::from_key(self.family, self.seeds, key, self.m);
        (self.g[e.u as usize] + self.g[e.v as usize]) % self.m
    }

    /// `None` when the evaluation falls outside `[0, n)`, which can only
    /// happen for keys outside the original set.
    pub fn try_index(&self, key: u64) -> Option<u64> {
        let e = KeyEdge::from_key(self.family, self.seeds, key, self.m);
        let gu = *self.g.get(e.u as usize)?;
        let gv = *self.g.get(e.v as usize)?;
        let slot = (gu + gv) % self.m;
        (slot < self.n).then_some(slot)
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

/// Builder configuration for the ordered engine.
#[derive(Debug, Clone)]
pub struct OrderedConstruction {
    /// Vertex ratio m/n. Acyclic graphs become likely above 2; at or below 1 they are impossible.
    pub table_factor: f64,
    pub family: HashFamily,
    /// Seeds the generator that draws `(h1, h2)` seed pairs, one pair per trial.
    pub seed: u64,
    /// Maximum number of graphs tried before giving up.
    pub max_trials: u32,
    /// Try several seed pairs at once on the rayon pool (needs the `parallel` feature).
    pub parallel: bool,
}

impl Default for OrderedConstruction {
    fn default() -> Self {
        Self {
            table_factor: 3.0,
            family: HashFamily::Xxh3,
            seed: 0xC0FF_EE00_D15E_A5E,
            max_trials: 1_000,
            parallel: true,
        }
    }
}

impl OrderedConstruction {
    /// Number of graph vertices used for `n` keys.
    pub fn table_size(&self, n: usize) -> u64 {
        let m = (self.table_factor * n as f64).ceil() as u64;
        m.max(n as u64).max(2)
    }

    pub fn construct(&self, keys: &KeySet) -> Result<OrderedHash, Error> {
        let n = keys.len();
        let m = self.table_size(n);
        let family = self.family;
        log::debug!("ordered construction: n={n}, m={m}, seed={:#x}", self.seed);

        // Seed pairs are drawn on this thread in trial order, so a fixed
        // `seed` reproduces the same hash with or without `parallel`.
        let mut rng = StdRng::seed_from_u64(self.seed);
        let trials = (1..=self.max_trials).map(move |trial| (trial, [rng.r#gen::<u64>(), rng.r#gen::<u64>()]));

        let found = first_success(trials, self.parallel, |(trial, seeds)| {
            match try_graph(keys.as_slice(), m, family, seeds) {
                Ok(g) => Some((trial, seeds, g)),
                Err(why) => {
                    log::debug!("trial {trial} rejected: {why:?}");
                    None
                }
            }
        });

        let Some((trial, seeds, g)) = found else {
            log::error!(
                "ordered construction failed to find an acyclic graph after {} trials",
                self.max_trials
            );
            return Err(Error::SearchExhausted {
                trials: self.max_trials,
                table_size: m,
            });
        };
        log::debug!("acyclic graph found on trial {trial}");

        Ok(OrderedHash {
            n: n as u64,
            m,
            family,
            seeds,
            g,
            trials: trial,
        })
    }
}

/// One trial: map keys to edges, reject loops and cycles, then assign `g`.
fn try_graph(keys: &[u64], m: u64, family: HashFamily, seeds: [u64; 2]) -> Result<Vec<u64>, Rejection> {
    let edges: Vec<KeyEdge> = keys
        .iter()
        .map(|&k| KeyEdge::from_key(family, seeds, k, m))
        .collect();

    let mut forest = Forest::new(m as usize);
    for e in &edges {
        forest.add_edge(e.u as usize, e.v as usize)?;
    }
    debug_assert_eq!(forest.edges(), edges.len());

    Ok(assign(&edges, m))
}

/// Walk every tree from an arbitrary root with `g[root] = 0`; crossing edge
/// `i` from a solved vertex `u` to a fresh vertex `w` sets
/// `g[w] = (i - g[u]) mod m`. Requires `edges` to form a forest.
fn assign(edges: &[KeyEdge], m: u64) -> Vec<u64> {
    let mv = m as usize;

    // Degrees and CSR adjacency holding edge ids.
    let mut deg = vec![0usize; mv];
    for e in edges {
        deg[e.u as usize] += 1;
        deg[e.v as usize] += 1;
    }
    let mut off = vec![0usize; mv + 1];
    for i in 0..mv {
        off[i + 1] = off[i] + deg[i];
    }
    let mut cur = off.clone();
    let mut adj = vec![0usize; off[mv]];
    for (eid, e) in edges.iter().enumerate() {
        for end in [e.u as usize, e.v as usize] {
            adj[cur[end]] = eid;
            cur[end] += 1;
        }
    }

    let mut g = vec![0u64; mv];
    let mut visited = vec![false; mv];
    let mut stack = Vec::new();
    for root in 0..mv {
        if visited[root] || deg[root] == 0 {
            continue;
        }
        visited[root] = true;
        stack.push(root);
        while let Some(u) = stack.pop() {
            for &eid in &adj[off[u]..off[u + 1]] {
                let e = edges[eid];
                let w = (if e.u as usize == u { e.v } else { e.u }) as usize;
                // In a forest the only solved neighbour is the one we came from.
                if visited[w] {
                    continue;
                }
                g[w] = (eid as u64 % m + m - g[u]) % m;
                visited[w] = true;
                stack.push(w);
            }
        }
    }
    g
}
