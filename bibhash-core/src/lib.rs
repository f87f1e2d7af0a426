//! bibhash-core - Hash table engine with pluggable collision strategies
//!
//! Provides:
//! - Dispersion functions mapping key hashes to primary bucket indices
//! - Exploration functions generating bounded probe sequences
//! - Fixed-capacity and growable bucket containers
//! - Closed and open hashing tables behind a single `Table` type

pub mod config;
pub mod dispersion;
pub mod exploration;
pub mod key;
pub mod sequence;
pub mod table;

pub use config::{ConfigError, TableConfig, TableLayout};
pub use dispersion::DispersionFunction;
pub use exploration::ExplorationFunction;
pub use key::HashKey;
pub use sequence::{DynamicSequence, Sequence, StaticSequence};
pub use table::{ClosedHashTable, OpenHashTable, Table};
