//! Chained hash table with a polynomial rolling hash and doubling resize.
//!
//! The table owns its entries; keys are strings (callers coerce integer
//! keys with `to_string()`), unique across all buckets. Collisions chain
//! within a bucket and are resolved by linear scan. When the load factor
//! (entries / buckets) exceeds 0.75 the bucket array doubles and every
//! live entry is redistributed — invisible to callers except through
//! amortized cost.
//!
//! The frequency-counting primitive used across the crate is
//! [`HashTable::increment`].

use tracing::debug;

const INITIAL_BUCKETS: usize = 16;
const MAX_LOAD_FACTOR: f64 = 0.75;

#[derive(Debug, Clone)]
struct Entry<V> {
    key: String,
    hash: u64,
    value: V,
}

/// Chained hash table from string keys to values of type `V`.
///
/// # Examples
/// ```
/// use trip_analytics::table::HashTable;
///
/// let mut zones: HashTable<&str> = HashTable::new();
/// zones.set("138", "LaGuardia Airport");
/// zones.set("138", "LaGuardia");
/// assert_eq!(zones.get("138"), Some(&"LaGuardia"));
/// assert_eq!(zones.len(), 1);
/// assert!(zones.delete("138"));
/// assert_eq!(zones.get("138"), None);
/// ```
#[derive(Debug, Clone)]
pub struct HashTable<V> {
    buckets: Vec<Vec<Entry<V>>>,
    len: usize,
}

impl<V> HashTable<V> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            buckets: (0..INITIAL_BUCKETS).map(|_| Vec::new()).collect(),
            len: 0,
        }
    }

    /// Inserts or overwrites the value for `key`.
    ///
    /// # Returns
    /// The previous value if the key was already present.
    ///
    /// # Complexity
    /// Amortized O(1)
    pub fn set(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        let hash = polynomial_hash(&key);
        let idx = (hash % self.buckets.len() as u64) as usize;
        for entry in &mut self.buckets[idx] {
            if entry.key == key {
                return Some(std::mem::replace(&mut entry.value, value));
            }
        }
        self.buckets[idx].push(Entry { key, hash, value });
        self.len += 1;
        if self.len as f64 > MAX_LOAD_FACTOR * self.buckets.len() as f64 {
            self.resize();
        }
        None
    }

    /// Returns the value for `key`, or `None` if absent.
    pub fn get(&self, key: &str) -> Option<&V> {
        let hash = polynomial_hash(key);
        let idx = (hash % self.buckets.len() as u64) as usize;
        self.buckets[idx]
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.value)
    }

    /// Removes `key` and reports whether a removal occurred.
    pub fn delete(&mut self, key: &str) -> bool {
        let hash = polynomial_hash(key);
        let idx = (hash % self.buckets.len() as u64) as usize;
        let bucket = &mut self.buckets[idx];
        match bucket.iter().position(|entry| entry.key == key) {
            Some(pos) => {
                bucket.swap_remove(pos);
                self.len -= 1;
                true
            }
            None => false,
        }
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Snapshot of all `(key, value)` pairs, in unspecified order.
    pub fn entries(&self) -> Vec<(&str, &V)> {
        self.buckets
            .iter()
            .flatten()
            .map(|entry| (entry.key.as_str(), &entry.value))
            .collect()
    }

    /// Snapshot of all keys, in unspecified order.
    pub fn keys(&self) -> Vec<&str> {
        self.buckets
            .iter()
            .flatten()
            .map(|entry| entry.key.as_str())
            .collect()
    }

    /// Snapshot of all values, in unspecified order.
    pub fn values(&self) -> Vec<&V> {
        self.buckets
            .iter()
            .flatten()
            .map(|entry| &entry.value)
            .collect()
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let hash = polynomial_hash(key);
        let idx = (hash % self.buckets.len() as u64) as usize;
        self.buckets[idx]
            .iter_mut()
            .find(|entry| entry.key == key)
            .map(|entry| &mut entry.value)
    }

    /// Doubles the bucket array and redistributes every live entry.
    fn resize(&mut self) {
        let new_count = self.buckets.len() * 2;
        debug!(
            from = self.buckets.len(),
            to = new_count,
            entries = self.len,
            "resizing hash table"
        );
        let old: Vec<Vec<Entry<V>>> = std::mem::replace(
            &mut self.buckets,
            (0..new_count).map(|_| Vec::new()).collect(),
        );
        for entry in old.into_iter().flatten() {
            let idx = (entry.hash % new_count as u64) as usize;
            self.buckets[idx].push(entry);
        }
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl HashTable<u64> {
    /// Adds 1 to the count stored under `key`, starting from 0.
    ///
    /// Shorthand for `set(key, get(key).unwrap_or(0) + 1)`; this is the
    /// frequency-counting primitive behind [`crate::topk`] and
    /// [`crate::stats::mode`].
    ///
    /// # Returns
    /// The new count.
    pub fn increment(&mut self, key: impl Into<String>) -> u64 {
        let key = key.into();
        match self.get_mut(&key) {
            Some(count) => {
                *count += 1;
                *count
            }
            None => {
                self.set(key, 1);
                1
            }
        }
    }
}

/// Polynomial rolling hash (base 31, wrapping) over the key's bytes.
fn polynomial_hash(key: &str) -> u64 {
    let mut hash: u64 = 0;
    for byte in key.bytes() {
        hash = hash.wrapping_mul(31).wrapping_add(u64::from(byte));
    }
    hash
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_roundtrip() {
        let mut table: HashTable<i32> = HashTable::new();
        assert_eq!(table.set("alpha", 1), None);
        assert_eq!(table.set("beta", 2), None);
        assert_eq!(table.get("alpha"), Some(&1));
        assert_eq!(table.get("beta"), Some(&2));
        assert_eq!(table.get("gamma"), None);
    }

    #[test]
    fn test_set_overwrites() {
        let mut table: HashTable<i32> = HashTable::new();
        table.set("k", 1);
        assert_eq!(table.set("k", 2), Some(1));
        assert_eq!(table.get("k"), Some(&2));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_delete() {
        let mut table: HashTable<i32> = HashTable::new();
        table.set("k", 1);
        assert!(table.delete("k"));
        assert!(!table.delete("k"));
        assert_eq!(table.get("k"), None);
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn test_integer_keys_coerced_to_string() {
        let mut table: HashTable<&str> = HashTable::new();
        table.set(138.to_string(), "LaGuardia");
        assert_eq!(table.get("138"), Some(&"LaGuardia"));
    }

    #[test]
    fn test_len_tracks_live_entries() {
        let mut table: HashTable<u64> = HashTable::new();
        for i in 0..10 {
            table.set(i.to_string(), i);
        }
        assert_eq!(table.len(), 10);
        table.delete("3");
        table.delete("7");
        assert_eq!(table.len(), 8);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_resize_preserves_entries() {
        // 100 entries force several doublings past the 0.75 load factor.
        let mut table: HashTable<usize> = HashTable::new();
        for i in 0..100 {
            table.set(format!("key-{i}"), i);
        }
        assert_eq!(table.len(), 100);
        for i in 0..100 {
            assert_eq!(table.get(&format!("key-{i}")), Some(&i), "key-{i}");
        }
    }

    #[test]
    fn test_snapshots() {
        let mut table: HashTable<i32> = HashTable::new();
        table.set("a", 1);
        table.set("b", 2);
        table.set("c", 3);

        let mut keys = table.keys();
        keys.sort_unstable();
        assert_eq!(keys, vec!["a", "b", "c"]);

        let mut values: Vec<i32> = table.values().into_iter().copied().collect();
        values.sort_unstable();
        assert_eq!(values, vec![1, 2, 3]);

        let mut entries: Vec<(String, i32)> = table
            .entries()
            .into_iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect();
        entries.sort();
        assert_eq!(
            entries,
            vec![
                ("a".to_string(), 1),
                ("b".to_string(), 2),
                ("c".to_string(), 3)
            ]
        );
    }

    #[test]
    fn test_increment() {
        let mut counts: HashTable<u64> = HashTable::new();
        assert_eq!(counts.increment("route"), 1);
        assert_eq!(counts.increment("route"), 2);
        assert_eq!(counts.increment("other"), 1);
        assert_eq!(counts.get("route"), Some(&2));
    }

    #[test]
    fn test_empty_key_is_a_valid_key() {
        let mut table: HashTable<i32> = HashTable::new();
        table.set("", 42);
        assert_eq!(table.get(""), Some(&42));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        // The table agrees with std's HashMap under any interleaving of
        // set/delete, across resizes.
        #[test]
        fn behaves_like_model(
            ops in proptest::collection::vec(
                (0_u8..2, "[a-z]{0,6}", -1000_i64..1000),
                0..200,
            ),
        ) {
            let mut table: HashTable<i64> = HashTable::new();
            let mut model: HashMap<String, i64> = HashMap::new();

            for (op, key, value) in ops {
                match op {
                    0 => {
                        table.set(key.clone(), value);
                        model.insert(key, value);
                    }
                    _ => {
                        let removed = table.delete(&key);
                        prop_assert_eq!(removed, model.remove(&key).is_some());
                    }
                }
                prop_assert_eq!(table.len(), model.len());
            }

            for (key, value) in &model {
                prop_assert_eq!(table.get(key), Some(value));
            }
        }

        #[test]
        fn increment_counts_occurrences(
            keys in proptest::collection::vec("[a-c]", 0..100),
        ) {
            let mut counts: HashTable<u64> = HashTable::new();
            let mut model: HashMap<String, u64> = HashMap::new();
            for key in keys {
                counts.increment(key.clone());
                *model.entry(key).or_insert(0) += 1;
            }
            for (key, count) in &model {
                prop_assert_eq!(counts.get(key), Some(count));
            }
        }
    }
}
