//! Map contracts
//!
//! [`ScalarMap`] is the read-only surface that wrapper layers call through
//! without knowing the storage behind it. [`MapMutation`] names every structural
//! mutator; immutable maps implement it by rejecting each call with
//! [`PrimoraError::UnsupportedOperation`](crate::error::PrimoraError).

use crate::error::Result;
use crate::scalar::ScalarKey;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

/// Read-only map from a scalar key to a value
pub trait ScalarMap<K: ScalarKey, V> {
    /// Number of entries
    fn len(&self) -> usize;

    /// True when the map has no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value bound to `key`, if any
    fn get(&self, key: K) -> Option<&V>;

    /// True when `key` is bound
    fn contains_key(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// Visit every entry in the map's iteration order
    fn for_each_entry(&self, f: &mut dyn FnMut(K, &V));
}

impl<K, V, S> ScalarMap<K, V> for HashMap<K, V, S>
where
    K: ScalarKey + Hash + Eq,
    S: BuildHasher,
{
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn get(&self, key: K) -> Option<&V> {
        HashMap::get(self, &key)
    }

    fn for_each_entry(&self, f: &mut dyn FnMut(K, &V)) {
        for (key, value) in self.iter() {
            f(*key, value);
        }
    }
}

/// Structural mutators of an insertion-ordered scalar map
pub trait MapMutation<K: ScalarKey, V> {
    /// Bind `key` to `value`, returning the previous value
    fn put(&mut self, key: K, value: V) -> Result<Option<V>>;

    /// Bind `key` to `value` only when unbound
    fn put_if_absent(&mut self, key: K, value: V) -> Result<Option<V>>;

    /// Copy every entry of `other` into this map
    fn put_all(&mut self, other: &dyn ScalarMap<K, V>) -> Result<()>;

    /// Unbind `key`, returning its value
    fn remove(&mut self, key: K) -> Result<Option<V>>;

    /// Unbind `key` only when it is bound to `value`
    fn remove_entry(&mut self, key: K, value: &V) -> Result<bool>;

    /// Remove the first entry in iteration order
    fn remove_first(&mut self) -> Result<V>;

    /// Remove the last entry in iteration order
    fn remove_last(&mut self) -> Result<V>;

    /// Remove every entry
    fn clear(&mut self) -> Result<()>;

    /// Recompute the binding of `key` from its current value
    fn compute<F>(&mut self, key: K, f: F) -> Result<Option<V>>
    where
        F: FnOnce(K, Option<&V>) -> Option<V>;

    /// Bind `key` to a computed value when unbound
    fn compute_if_absent<F>(&mut self, key: K, f: F) -> Result<V>
    where
        F: FnOnce(K) -> V;

    /// Recompute the binding of `key` when bound
    fn compute_if_present<F>(&mut self, key: K, f: F) -> Result<Option<V>>
    where
        F: FnOnce(K, &V) -> Option<V>;

    /// Combine `value` with the current binding of `key`
    fn merge<F>(&mut self, key: K, value: V, f: F) -> Result<Option<V>>
    where
        F: FnOnce(&V, &V) -> Option<V>;

    /// Rebind `key` only when already bound
    fn replace(&mut self, key: K, value: V) -> Result<Option<V>>;

    /// Rebind `key` only when bound to `old`
    fn replace_entry(&mut self, key: K, old: &V, new: V) -> Result<bool>;

    /// Move the entry for `key` to the front of the iteration order
    fn move_to_first(&mut self, key: K) -> Result<()>;

    /// Move the entry for `key` to the back of the iteration order
    fn move_to_last(&mut self, key: K) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_std_hash_map_as_scalar_map() {
        let mut map = HashMap::new();
        map.insert(3u16, "three");
        map.insert(0u16, "zero");

        assert_eq!(ScalarMap::len(&map), 2);
        assert!(!ScalarMap::is_empty(&map));
        assert_eq!(ScalarMap::get(&map, 3), Some(&"three"));
        assert!(ScalarMap::contains_key(&map, 0));
        assert!(!ScalarMap::contains_key(&map, 7));

        let mut seen = Vec::new();
        map.for_each_entry(&mut |k, v| seen.push((k, *v)));
        seen.sort();
        assert_eq!(seen, vec![(0, "zero"), (3, "three")]);
    }
}
