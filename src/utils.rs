//! Utility functions and traits for `ProbingHashMap`

use crate::{HashFn, ProbingHashMap};

/// Extension trait for map implementations that provides additional utility methods
pub trait HashMapExtensions<V> {
    /// Returns the live keys of the map as a Vec, in slot order
    fn keys(&self) -> Vec<String>;

    /// Returns the live values of the map as a Vec, in slot order
    fn values(&self) -> Vec<V>;

    /// Returns true if the map contains the given key
    fn contains_key(&self, key: &str) -> bool;
}

impl<V: Clone> HashMapExtensions<V> for ProbingHashMap<V> {
    fn keys(&self) -> Vec<String> {
        self.iter().map(|(k, _)| k.clone()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    fn contains_key(&self, key: &str) -> bool {
        self.contains(key)
    }
}

/// Creates a `ProbingHashMap` from an iterator of key-value pairs using `hash_fn`.
///
/// The map starts at the default capacity and grows as the pairs arrive.
pub fn from_iter<V, I>(hash_fn: HashFn, iter: I) -> ProbingHashMap<V>
where
    V: Clone,
    I: IntoIterator<Item = (String, V)>,
{
    let mut map = ProbingHashMap::new(crate::DEFAULT_CAPACITY, hash_fn);
    map.extend(iter);
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::hash_function_1;

    #[test]
    fn test_from_iter() {
        let data = vec![("a".to_string(), 1), ("b".to_string(), 2), ("c".to_string(), 3)];

        let map = from_iter(hash_function_1, data);

        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.get("b"), Some(&2));
        assert_eq!(map.get("c"), Some(&3));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_keys_and_values() {
        let mut map = ProbingHashMap::new(11, hash_function_1);
        map.put("a".to_string(), 1);
        map.put("b".to_string(), 2);
        map.put("c".to_string(), 3);
        map.remove("b");

        let mut keys = map.keys();
        keys.sort(); // Sort for predictable comparison

        let mut values = map.values();
        values.sort_unstable();

        assert_eq!(keys, vec!["a".to_string(), "c".to_string()]);
        assert_eq!(values, vec![1, 3]);
    }

    #[test]
    fn test_contains_key() {
        let mut map = ProbingHashMap::new(11, hash_function_1);
        map.put("a".to_string(), 1);

        assert!(map.contains_key("a"));
        assert!(!map.contains_key("b"));
    }
}
