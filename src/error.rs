use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid key {0}: keys must be non-negative integers")]
    InvalidKey(i64),
    #[error("duplicate key {0} detected during build")]
    DuplicateKey(u64),
    #[error("empty key set is not supported")]
    EmptyKeySet,
    #[error(
        "no acyclic graph found in {trials} trials with table size {table_size}; \
         increase the table factor or the trial limit"
    )]
    SearchExhausted { trials: u32, table_size: u64 },
    #[error("no modulus places every key within {max_rows} displacement rows; raise max_rows")]
    RowLimitExceeded { max_rows: u64 },
    #[error("keys {key} and {other} share slot {slot}; the hash does not separate this key set")]
    SlotCollision { key: u64, other: u64, slot: usize },
    #[error("key {0} is not part of the key set the hash was built for")]
    UnknownKey(u64),
    #[cfg(feature = "serde")]
    #[error("serialization error: {0}")]
    Serde(#[from] Box<bincode::ErrorKind>),
}
