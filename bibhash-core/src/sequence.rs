//! Bucket containers
//!
//! Two containers sit behind the table buckets: a fixed-capacity slot
//! array for closed hashing and a growable list for open hashing.

use crate::key::HashKey;

/// Operations every bucket container supports
pub trait Sequence<K: HashKey> {
    /// True if the key is stored in this bucket
    fn search(&self, key: &K) -> bool;

    /// Store a copy of `key`; `false` only when the bucket refuses it
    fn insert(&mut self, key: &K) -> bool;

    /// Remove `key`; `false` when absent
    fn delete(&mut self, key: &K) -> bool;

    /// True when no further insert can succeed
    fn is_full(&self) -> bool;

    /// Stored keys, in slot order
    fn iter<'a>(&'a self) -> impl Iterator<Item = &'a K>
    where
        K: 'a;

    /// Borrow the stored key matching `key`
    fn find(&self, key: &K) -> Option<&K>;

    /// Mutably borrow the stored key matching `key`
    fn find_mut(&mut self, key: &K) -> Option<&mut K>;
}

/// Fixed-capacity bucket backed by `block_size` optional slots.
///
/// Matching is by integer hash value. Freed slots are reused first-fit,
/// so `is_full` is exactly the insert-refusal predicate and no write can
/// land past slot `block_size - 1`.
#[derive(Clone, Debug)]
pub struct StaticSequence<K> {
    slots: Vec<Option<K>>,
}

impl<K: HashKey> StaticSequence<K> {
    /// Create an empty bucket with `block_size` slots
    pub fn new(block_size: usize) -> Self {
        assert!(block_size > 0, "block_size must be positive");
        StaticSequence {
            slots: (0..block_size).map(|_| None).collect(),
        }
    }

    /// Slot capacity fixed at construction
    pub fn block_size(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    fn position(&self, key: &K) -> Option<usize> {
        let hash = key.hash_value();
        self.slots
            .iter()
            .position(|slot| matches!(slot, Some(stored) if stored.hash_value() == hash))
    }
}

impl<K: HashKey> Sequence<K> for StaticSequence<K> {
    fn search(&self, key: &K) -> bool {
        self.position(key).is_some()
    }

    fn insert(&mut self, key: &K) -> bool {
        match self.slots.iter().position(Option::is_none) {
            Some(free) => {
                self.slots[free] = Some(key.clone());
                true
            }
            None => false,
        }
    }

    fn delete(&mut self, key: &K) -> bool {
        match self.position(key) {
            Some(index) => {
                self.slots[index] = None;
                true
            }
            None => false,
        }
    }

    fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    fn iter<'a>(&'a self) -> impl Iterator<Item = &'a K>
    where
        K: 'a,
    {
        self.slots.iter().filter_map(Option::as_ref)
    }

    fn find(&self, key: &K) -> Option<&K> {
        self.position(key).and_then(|index| self.slots[index].as_ref())
    }

    fn find_mut(&mut self, key: &K) -> Option<&mut K> {
        match self.position(key) {
            Some(index) => self.slots[index].as_mut(),
            None => None,
        }
    }
}

/// Growable bucket used by open hashing.
///
/// Inserts always succeed and append; duplicates are accepted. Matching
/// is by key equality and delete removes the first match only.
#[derive(Clone, Debug, Default)]
pub struct DynamicSequence<K> {
    block: Vec<K>,
}

impl<K: HashKey> DynamicSequence<K> {
    pub fn new() -> Self {
        DynamicSequence { block: Vec::new() }
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.block.len()
    }

    pub fn is_empty(&self) -> bool {
        self.block.is_empty()
    }
}

impl<K: HashKey> Sequence<K> for DynamicSequence<K> {
    fn search(&self, key: &K) -> bool {
        self.block.iter().any(|stored| stored == key)
    }

    fn insert(&mut self, key: &K) -> bool {
        self.block.push(key.clone());
        true
    }

    fn delete(&mut self, key: &K) -> bool {
        match self.block.iter().position(|stored| stored == key) {
            Some(index) => {
                self.block.remove(index);
                true
            }
            None => false,
        }
    }

    fn is_full(&self) -> bool {
        false
    }

    fn iter<'a>(&'a self) -> impl Iterator<Item = &'a K>
    where
        K: 'a,
    {
        self.block.iter()
    }

    fn find(&self, key: &K) -> Option<&K> {
        self.block.iter().find(|stored| *stored == key)
    }

    fn find_mut(&mut self, key: &K) -> Option<&mut K> {
        self.block.iter_mut().find(|stored| &**stored == key)
    }
}
