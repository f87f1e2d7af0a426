//! Closed and open hashing tables
//!
//! A table owns `table_size` buckets plus its strategies. Closed hashing
//! pairs fixed-capacity buckets with an exploration function and resolves
//! collisions by probing; open hashing chains inside growable buckets and
//! never probes.

use crate::config::{ConfigError, TableConfig, TableLayout};
use crate::dispersion::DispersionFunction;
use crate::exploration::ExplorationFunction;
use crate::key::HashKey;
use crate::sequence::{DynamicSequence, Sequence, StaticSequence};

/// Closed-hashing table: fixed-capacity buckets probed on collision
pub struct ClosedHashTable<K: HashKey> {
    table_size: usize,
    block_size: usize,
    dispersion: DispersionFunction,
    exploration: ExplorationFunction,
    buckets: Vec<StaticSequence<K>>,
}

impl<K: HashKey> ClosedHashTable<K> {
    /// Create an empty table of `table_size` buckets of `block_size` slots
    pub fn new(
        table_size: usize,
        block_size: usize,
        dispersion: DispersionFunction,
        exploration: ExplorationFunction,
    ) -> Self {
        assert!(table_size > 0, "table_size must be positive");
        assert!(block_size > 0, "block_size must be positive");
        ClosedHashTable {
            table_size,
            block_size,
            dispersion,
            exploration,
            buckets: (0..table_size).map(|_| StaticSequence::new(block_size)).collect(),
        }
    }

    /// Bounded probe sequence for `hash`: the primary index first, then
    /// the exploration offsets for attempts `1..=table_size`.
    ///
    /// Capping the attempt count at `table_size` guarantees termination
    /// even when the exploration function cycles over visited indices.
    pub(crate) fn probe_sequence(&self, hash: u64) -> impl Iterator<Item = usize> + '_ {
        let primary = self.dispersion.index(hash, self.table_size);
        std::iter::once(primary).chain((1..=self.table_size as u64).map(move |attempt| {
            // Reduce the offset first so raw redispersion draws cannot
            // overflow the addition; the final index is unchanged.
            let offset = self.exploration.offset(hash, attempt, self.table_size)
                % self.table_size as u64;
            ((primary as u64 + offset) % self.table_size as u64) as usize
        }))
    }

    /// Bucket index holding `key`, or `None` when absent.
    ///
    /// Probing continues only through full buckets: reaching a non-full
    /// bucket without the key proves the insertion path would have
    /// stopped there, so the key is absent.
    pub fn search(&self, key: &K) -> Option<usize> {
        for index in self.probe_sequence(key.hash_value()) {
            if self.buckets[index].search(key) {
                return Some(index);
            }
            if !self.buckets[index].is_full() {
                return None;
            }
        }
        None
    }

    /// Store `key` in the first bucket along its probe sequence that
    /// accepts it; `false` once the attempt budget is exhausted.
    pub fn insert(&mut self, key: &K) -> bool {
        // Collect the probe path to release the shared borrow
        let probes: Vec<usize> = self.probe_sequence(key.hash_value()).collect();
        for index in probes {
            if self.buckets[index].insert(key) {
                return true;
            }
        }
        false
    }

    /// Locate `key` via the search probe sequence, then delete in place
    pub fn delete(&mut self, key: &K) -> bool {
        match self.search(key) {
            Some(index) => self.buckets[index].delete(key),
            None => false,
        }
    }

    /// True iff every bucket is full
    pub fn is_full(&self) -> bool {
        self.buckets.iter().all(|bucket| bucket.is_full())
    }

    /// Borrow the stored key equal (by hash) to `key`
    pub fn find(&self, key: &K) -> Option<&K> {
        self.search(key).and_then(|index| self.buckets[index].find(key))
    }

    /// Mutably borrow the stored key equal (by hash) to `key`
    pub fn find_mut(&mut self, key: &K) -> Option<&mut K> {
        match self.search(key) {
            Some(index) => self.buckets[index].find_mut(key),
            None => None,
        }
    }

    pub fn table_size(&self) -> usize {
        self.table_size
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.buckets.iter().map(StaticSequence::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(StaticSequence::is_empty)
    }

    pub fn bucket(&self, index: usize) -> &StaticSequence<K> {
        &self.buckets[index]
    }

    /// Iterate over all stored keys, bucket by bucket
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.buckets.iter().flat_map(|bucket| bucket.iter())
    }
}

/// Open-hashing table: growable buckets, no probing
pub struct OpenHashTable<K: HashKey> {
    table_size: usize,
    dispersion: DispersionFunction,
    buckets: Vec<DynamicSequence<K>>,
}

impl<K: HashKey> OpenHashTable<K> {
    /// Create an empty table of `table_size` growable buckets
    pub fn new(table_size: usize, dispersion: DispersionFunction) -> Self {
        assert!(table_size > 0, "table_size must be positive");
        OpenHashTable {
            table_size,
            dispersion,
            buckets: (0..table_size).map(|_| DynamicSequence::new()).collect(),
        }
    }

    fn primary(&self, key: &K) -> usize {
        self.dispersion.index(key.hash_value(), self.table_size)
    }

    pub fn search(&self, key: &K) -> Option<usize> {
        let index = self.primary(key);
        if self.buckets[index].search(key) {
            Some(index)
        } else {
            None
        }
    }

    /// Append `key` to its primary bucket; never fails
    pub fn insert(&mut self, key: &K) -> bool {
        let index = self.primary(key);
        self.buckets[index].insert(key)
    }

    /// Remove the first matching occurrence from the primary bucket
    pub fn delete(&mut self, key: &K) -> bool {
        let index = self.primary(key);
        self.buckets[index].delete(key)
    }

    /// A growable table never fills
    pub fn is_full(&self) -> bool {
        false
    }

    pub fn find(&self, key: &K) -> Option<&K> {
        let index = self.primary(key);
        self.buckets[index].find(key)
    }

    pub fn find_mut(&mut self, key: &K) -> Option<&mut K> {
        let index = self.primary(key);
        self.buckets[index].find_mut(key)
    }

    pub fn table_size(&self) -> usize {
        self.table_size
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(DynamicSequence::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(DynamicSequence::is_empty)
    }

    pub fn bucket(&self, index: usize) -> &DynamicSequence<K> {
        &self.buckets[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.buckets.iter().flat_map(|bucket| bucket.iter())
    }
}

/// A configured table, closed or open hashing
pub enum Table<K: HashKey> {
    Closed(ClosedHashTable<K>),
    Open(OpenHashTable<K>),
}

impl<K: HashKey> Table<K> {
    /// Build a table from a validated configuration
    pub fn new(config: &TableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let table = match &config.layout {
            TableLayout::Open => Table::Open(OpenHashTable::new(
                config.table_size,
                config.dispersion.clone(),
            )),
            TableLayout::Closed {
                block_size,
                exploration,
            } => Table::Closed(ClosedHashTable::new(
                config.table_size,
                *block_size,
                config.dispersion.clone(),
                exploration.clone(),
            )),
        };
        Ok(table)
    }

    pub fn search(&self, key: &K) -> Option<usize> {
        match self {
            Table::Closed(table) => table.search(key),
            Table::Open(table) => table.search(key),
        }
    }

    pub fn insert(&mut self, key: &K) -> bool {
        match self {
            Table::Closed(table) => table.insert(key),
            Table::Open(table) => table.insert(key),
        }
    }

    pub fn delete(&mut self, key: &K) -> bool {
        match self {
            Table::Closed(table) => table.delete(key),
            Table::Open(table) => table.delete(key),
        }
    }

    pub fn is_full(&self) -> bool {
        match self {
            Table::Closed(table) => table.is_full(),
            Table::Open(table) => table.is_full(),
        }
    }

    pub fn find(&self, key: &K) -> Option<&K> {
        match self {
            Table::Closed(table) => table.find(key),
            Table::Open(table) => table.find(key),
        }
    }

    pub fn find_mut(&mut self, key: &K) -> Option<&mut K> {
        match self {
            Table::Closed(table) => table.find_mut(key),
            Table::Open(table) => table.find_mut(key),
        }
    }

    pub fn table_size(&self) -> usize {
        match self {
            Table::Closed(table) => table.table_size(),
            Table::Open(table) => table.table_size(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Table::Closed(table) => table.len(),
            Table::Open(table) => table.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Table::Closed(table) => table.is_empty(),
            Table::Open(table) => table.is_empty(),
        }
    }

    /// Keys stored in one bucket, in slot order
    pub fn bucket_keys(&self, index: usize) -> Vec<&K> {
        match self {
            Table::Closed(table) => table.bucket(index).iter().collect(),
            Table::Open(table) => table.bucket(index).iter().collect(),
        }
    }

    /// Iterate over every stored key, bucket by bucket
    pub fn iter(&self) -> Box<dyn Iterator<Item = &K> + '_> {
        match self {
            Table::Closed(table) => Box::new(table.iter()),
            Table::Open(table) => Box::new(table.iter()),
        }
    }

    /// Insert a sequence of externally-parsed keys through the normal
    /// insert path, returning how many the table accepted.
    pub fn load<I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = K>,
    {
        keys.into_iter().filter(|key| self.insert(key)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colliding_table() -> ClosedHashTable<u64> {
        // table_size 5, block_size 1, everything lands on bucket 0 first
        ClosedHashTable::new(
            5,
            1,
            DispersionFunction::Mod,
            ExplorationFunction::Linear,
        )
    }

    #[test]
    fn test_linear_collision_cascade() {
        let mut table = colliding_table();
        for (position, key) in [0u64, 5, 10, 15, 20].iter().enumerate() {
            assert!(table.insert(key));
            assert_eq!(table.search(key), Some(position));
        }
        assert!(table.is_full());
        // A sixth colliding key finds no slot within the attempt budget
        assert!(!table.insert(&25));
    }

    #[test]
    fn test_is_full_only_after_the_last_slot() {
        let mut table = colliding_table();
        for key in [0u64, 5, 10, 15] {
            table.insert(&key);
            assert!(!table.is_full());
        }
        table.insert(&20);
        assert!(table.is_full());
    }

    #[test]
    fn test_search_stops_at_a_non_full_bucket() {
        let mut table = colliding_table();
        table.insert(&0);
        // Bucket 0 is full but bucket 1 is empty, so probing proves absence
        assert_eq!(table.search(&5), None);
    }

    #[test]
    fn test_delete_clears_the_slot() {
        let mut table = colliding_table();
        table.insert(&0);
        table.insert(&5);
        assert!(table.delete(&5));
        assert_eq!(table.search(&5), None);
        assert!(!table.delete(&5));
    }

    #[test]
    fn test_quadratic_placement() {
        let mut table = ClosedHashTable::new(
            5,
            1,
            DispersionFunction::Mod,
            ExplorationFunction::Quadratic,
        );
        table.insert(&0); // bucket 0
        table.insert(&5); // attempt 1 -> offset 1 -> bucket 1
        table.insert(&10); // attempt 2 -> offset 4 -> bucket 4
        assert_eq!(table.search(&0), Some(0));
        assert_eq!(table.search(&5), Some(1));
        assert_eq!(table.search(&10), Some(4));
    }

    #[test]
    fn test_open_table_chains_in_the_primary_bucket() {
        let mut table: OpenHashTable<u64> = OpenHashTable::new(4, DispersionFunction::Mod);
        assert!(table.insert(&3));
        assert!(table.insert(&7));
        assert!(table.insert(&11));
        assert_eq!(table.search(&3), Some(3));
        assert_eq!(table.search(&7), Some(3));
        assert_eq!(table.bucket(3).len(), 3);
        assert!(!table.is_full());
    }

    #[test]
    fn test_open_table_duplicate_then_single_delete() {
        let mut table: OpenHashTable<u64> = OpenHashTable::new(4, DispersionFunction::Mod);
        assert!(table.insert(&6));
        assert!(table.insert(&6));
        assert!(table.delete(&6));
        // Exactly one occurrence remains discoverable
        assert_eq!(table.search(&6), Some(2));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_bulk_load_counts_accepted_keys() {
        let config = TableConfig::closed(
            3,
            DispersionFunction::Mod,
            1,
            ExplorationFunction::Linear,
        );
        let mut table: Table<u64> = Table::new(&config).unwrap();
        // Four colliding keys into three slots: one must be refused
        let accepted = table.load(vec![0, 3, 6, 9]);
        assert_eq!(accepted, 3);
        assert!(table.is_full());
    }
}
