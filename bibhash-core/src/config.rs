//! Table configuration
//!
//! A table is built once from an immutable `TableConfig`; the open/closed
//! choice is a tagged layout so a closed table cannot be configured
//! without a block size and exploration function, nor an open one with
//! them. The remaining numeric checks live in `validate`.

use std::fmt;

use crate::dispersion::DispersionFunction;
use crate::exploration::ExplorationFunction;

/// How buckets store keys and how collisions are handled
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableLayout {
    /// Growable buckets, no probing
    Open,
    /// Fixed-capacity buckets probed with an exploration function
    Closed {
        block_size: usize,
        exploration: ExplorationFunction,
    },
}

/// Everything needed to build a table, fixed before construction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableConfig {
    pub table_size: usize,
    pub dispersion: DispersionFunction,
    pub layout: TableLayout,
}

impl TableConfig {
    /// Configuration for an open-hashing table
    pub fn open(table_size: usize, dispersion: DispersionFunction) -> Self {
        TableConfig {
            table_size,
            dispersion,
            layout: TableLayout::Open,
        }
    }

    /// Configuration for a closed-hashing table
    pub fn closed(
        table_size: usize,
        dispersion: DispersionFunction,
        block_size: usize,
        exploration: ExplorationFunction,
    ) -> Self {
        TableConfig {
            table_size,
            dispersion,
            layout: TableLayout::Closed {
                block_size,
                exploration,
            },
        }
    }

    /// Reject configurations no table can be built from
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.table_size == 0 {
            return Err(ConfigError::ZeroTableSize);
        }
        if let TableLayout::Closed { block_size, .. } = &self.layout {
            if *block_size == 0 {
                return Err(ConfigError::ZeroBlockSize);
            }
        }
        Ok(())
    }
}

/// Error type for table configuration
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    ZeroTableSize,
    ZeroBlockSize,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroTableSize => write!(f, "table size must be positive"),
            ConfigError::ZeroBlockSize => write!(f, "block size must be positive"),
        }
    }
}

impl std::error::Error for ConfigError {}
