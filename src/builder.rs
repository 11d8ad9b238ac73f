use crate::displace::{DisplacementSearch, HashParameters};
use crate::error::Error;
use crate::function::{PerfectHash, SlotFunction};
use crate::keys::KeySet;
use crate::ordered::{OrderedConstruction, OrderedHash};

/// Something that turns a validated key set into a perfect hash.
pub trait PerfectHashBuilder {
    type Output: SlotFunction;

    fn build(&self, keys: &KeySet) -> Result<Self::Output, Error>;
}

impl PerfectHashBuilder for DisplacementSearch {
    type Output = HashParameters;

    fn build(&self, keys: &KeySet) -> Result<HashParameters, Error> {
        self.search(keys)
    }
}

impl PerfectHashBuilder for OrderedConstruction {
    type Output = OrderedHash;

    fn build(&self, keys: &KeySet) -> Result<OrderedHash, Error> {
        self.construct(keys)
    }
}

/// Which engine [`Builder`] runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Displacement search: slots are `[0, n)`, key order is irrelevant.
    #[default]
    Minimal,
    /// Acyclic-graph construction: the `i`-th key gets slot `i`.
    Ordered,
}

/// Build parameters.
#[derive(Debug, Clone, Default)]
pub struct BuildConfig {
    pub strategy: Strategy,
    pub minimal: DisplacementSearch,
    pub ordered: OrderedConstruction,
}

#[derive(Debug, Clone, Default)]
pub struct Builder {
    cfg: BuildConfig,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            cfg: BuildConfig::default(),
        }
    }

    pub fn with_config(mut self, cfg: BuildConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.cfg.strategy = strategy;
        self
    }

    pub fn config(&self) -> &BuildConfig {
        &self.cfg
    }

    /// Build from **unique** keys; duplicates and empty input are errors.
    pub fn build<I>(&self, keys: I) -> Result<PerfectHash, Error>
    where
        I: IntoIterator<Item = u64>,
    {
        let keys = KeySet::new(keys)?;
        PerfectHashBuilder::build(self, &keys)
    }
}

impl PerfectHashBuilder for Builder {
    type Output = PerfectHash;

    fn build(&self, keys: &KeySet) -> Result<PerfectHash, Error> {
        match self.cfg.strategy {
            Strategy::Minimal => self.cfg.minimal.build(keys).map(PerfectHash::Minimal),
            Strategy::Ordered => self.cfg.ordered.build(keys).map(PerfectHash::Ordered),
        }
    }
}
