//! Exploration functions generating probe offsets for closed hashing
//!
//! Attempts are 1-based. Offsets are raw; the table computes the final
//! probed index as `(primary + offset) % table_size`.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::dispersion::DispersionFunction;

/// Strategy that turns a (hash, attempt) pair into a probe offset
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExplorationFunction {
    /// `offset = attempt`
    Linear,
    /// `offset = attempt²`
    Quadratic,
    /// `offset = attempt * aux(hash)`, with the auxiliary dispersion
    /// chosen at configuration time and owned by the variant
    DoubleDispersion(DispersionFunction),
    /// `offset = attempt`-th draw of a generator seeded with the hash
    /// (attempt 1 is the first draw)
    Redispersion,
}

impl ExplorationFunction {
    /// Probe offset for the given attempt
    ///
    /// # Arguments
    /// * `hash` - Key hash value
    /// * `attempt` - Probe attempt number, starting at 1
    /// * `table_size` - Number of buckets, fed to the auxiliary dispersion
    pub fn offset(&self, hash: u64, attempt: u64, table_size: usize) -> u64 {
        match self {
            ExplorationFunction::Linear => attempt,
            ExplorationFunction::Quadratic => attempt * attempt,
            ExplorationFunction::DoubleDispersion(aux) => {
                attempt * aux.index(hash, table_size) as u64
            }
            ExplorationFunction::Redispersion => {
                let mut rng = ChaCha8Rng::seed_from_u64(hash);
                for _ in 1..attempt {
                    rng.gen::<u64>();
                }
                rng.gen::<u64>()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_offset_is_the_attempt() {
        for attempt in 1..=6 {
            assert_eq!(ExplorationFunction::Linear.offset(42, attempt, 10), attempt);
        }
    }

    #[test]
    fn test_quadratic_offset_squares_the_attempt() {
        assert_eq!(ExplorationFunction::Quadratic.offset(42, 3, 10), 9);
        assert_eq!(ExplorationFunction::Quadratic.offset(42, 5, 10), 25);
    }

    #[test]
    fn test_double_dispersion_scales_the_auxiliary_index() {
        let fe = ExplorationFunction::DoubleDispersion(DispersionFunction::Mod);
        // aux(7) = 7 % 5 = 2
        assert_eq!(fe.offset(7, 1, 5), 2);
        assert_eq!(fe.offset(7, 3, 5), 6);
    }

    #[test]
    fn test_redispersion_matches_the_seeded_draw_sequence() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let expected: Vec<u64> = (0..4).map(|_| rng.gen()).collect();
        for (i, draw) in expected.iter().enumerate() {
            let attempt = i as u64 + 1;
            assert_eq!(
                ExplorationFunction::Redispersion.offset(99, attempt, 10),
                *draw
            );
        }
    }
}
