//! Sparse map returning an explicit default for absent keys

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// Ordered sparse map with a default value
///
/// Lookups of absent keys return the default instead of failing, which
/// is what counting and tallying code needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseMap<K, V> {
    entries: BTreeMap<K, V>,
    default: V,
}

impl<K: Ord, V: Default> Default for SparseMap<K, V> {
    fn default() -> Self {
        Self::new(V::default())
    }
}

impl<K: Ord, V> SparseMap<K, V> {
    /// Create an empty map with the given default
    pub const fn new(default: V) -> Self {
        Self {
            entries: BTreeMap::new(),
            default,
        }
    }

    /// Stored value for `key`, or the default when absent
    pub fn get(&self, key: &K) -> &V {
        self.entries.get(key).unwrap_or(&self.default)
    }

    /// Check whether a value is stored for `key`
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Store a value, returning the previous one
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Mutable access to the value for `key`, storing a copy of the default first
    pub fn get_mut(&mut self, key: K) -> &mut V
    where
        V: Clone,
    {
        match self.entries.entry(key) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(self.default.clone()),
        }
    }

    /// The default value
    pub const fn default_value(&self) -> &V {
        &self.default
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether no entries are stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored entries in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter()
    }

    /// Stored keys in ascending order
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    /// Stored values in ascending key order
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values()
    }
}

impl<K: Ord> SparseMap<K, usize> {
    /// Increment the count stored for `key`
    pub fn increment(&mut self, key: K) {
        *self.get_mut(key) += 1;
    }

    /// Sum of all stored counts
    pub fn total(&self) -> usize {
        self.entries.values().sum()
    }
}
