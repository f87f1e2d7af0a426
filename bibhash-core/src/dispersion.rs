//! Dispersion functions mapping a key hash to a primary bucket index
//!
//! The classic teaching set: modulo, base-10 digit sum and a seeded
//! pseudo-random draw. Every variant lands in `[0, table_size)`.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Strategy that picks the primary bucket for a key hash
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispersionFunction {
    /// `hash % table_size`
    Mod,
    /// Base-10 digit sum of the hash, mod `table_size`
    Sum,
    /// One draw from a ChaCha generator seeded with the hash
    Random,
}

impl DispersionFunction {
    /// Primary bucket index for `hash`
    ///
    /// # Arguments
    /// * `hash` - Key hash value
    /// * `table_size` - Number of buckets in the table (> 0)
    pub fn index(&self, hash: u64, table_size: usize) -> usize {
        match self {
            DispersionFunction::Mod => (hash % table_size as u64) as usize,
            DispersionFunction::Sum => (digit_sum(hash) % table_size as u64) as usize,
            DispersionFunction::Random => {
                // Fresh generator per call: the draw depends only on the hash
                let mut rng = ChaCha8Rng::seed_from_u64(hash);
                rng.gen_range(0..table_size as u64) as usize
            }
        }
    }
}

fn digit_sum(mut value: u64) -> u64 {
    let mut sum = 0;
    while value != 0 {
        sum += value % 10;
        value /= 10;
    }
    sum
}
