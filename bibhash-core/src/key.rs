//! Key capabilities required by the hash tables

use std::fmt;

/// Capabilities a type needs to live in a table.
///
/// The engine never looks inside a key beyond these: a deterministic
/// integer hash, equality and a printable rendering. Empty bucket slots
/// are `Option::None`; no sentinel key value exists.
pub trait HashKey: Clone + PartialEq + fmt::Display {
    /// Deterministic integer hash of the key
    fn hash_value(&self) -> u64;
}

/// Plain integers hash to themselves; handy for tests and benchmarks
/// where bucket placement must be predictable.
impl HashKey for u64 {
    fn hash_value(&self) -> u64 {
        *self
    }
}
