//! ImmutableOpenHashMap - build-once, insertion-ordered open-addressing map
//!
//! A read-only hash table from a scalar key to a value, designed for maps that
//! are built once and read many times:
//! - Linear probing over a power-of-two table (`pos & mask` wraparound)
//! - Parallel key/value slot arrays plus a presence bitmap, so the zero key is an
//!   ordinary key with no reserved sentinel slot
//! - Insertion order threaded through the table as packed `u64` links, giving
//!   iteration in input order independent of bucket order
//! - No mutation after construction; readers need no synchronization
//!
//! # Examples
//!
//! ```rust
//! use primora::hash_map::ImmutableOpenHashMap;
//!
//! let map = ImmutableOpenHashMap::<i16, i32>::new(&[5, 0, 5, 3], &[10, 20, 99, 30])?;
//!
//! assert_eq!(map.len(), 3);
//! assert_eq!(map.get(5), Some(&99));
//! assert_eq!(map.get(0), Some(&20));
//! assert_eq!(map.value_of(7), 0);
//! assert_eq!(map.iter().map(|(k, _)| k).collect::<Vec<_>>(), vec![5, 0, 3]);
//! # Ok::<(), primora::PrimoraError>(())
//! ```

use super::hash_functions::{array_size, check_load_factor, DEFAULT_LOAD_FACTOR};
use super::iter::{Iter, MapCursor};
use super::link::{Link, NIL};
use super::traits::{MapMutation, ScalarMap};
use super::views::{EntrySet, KeySet, ValuesView};
use crate::config::{Config, HashMapConfig};
use crate::error::{check_offset_length, PrimoraError, Result};
use crate::scalar::ScalarKey;
use std::fmt;

/// Presence bitmap over table slots
#[derive(Clone)]
struct Occupancy {
    words: Box<[u64]>,
}

impl Occupancy {
    fn new(slots: usize) -> Self {
        Self {
            words: vec![0u64; (slots + 63) / 64].into_boxed_slice(),
        }
    }

    #[inline(always)]
    fn contains(&self, slot: usize) -> bool {
        self.words[slot >> 6] & (1u64 << (slot & 63)) != 0
    }

    #[inline(always)]
    fn insert(&mut self, slot: usize) {
        self.words[slot >> 6] |= 1u64 << (slot & 63);
    }
}

/// Linear probe for `key` from its home bucket.
///
/// `Ok(slot)` when the key is present, `Err(slot)` with the first empty slot
/// reached otherwise. The table always keeps a free slot, so the probe ends.
#[inline]
fn probe<K: ScalarKey>(
    keys: &[K],
    used: &Occupancy,
    mask: usize,
    key: K,
) -> std::result::Result<usize, usize> {
    let mut pos = key.key_hash() as usize & mask;
    while used.contains(pos) {
        if keys[pos].key_eq(key) {
            return Ok(pos);
        }
        pos = (pos + 1) & mask;
    }
    Err(pos)
}

/// Insertion-ordered, immutable open-addressing hash map
///
/// Generic over a scalar key type `K` and a value type `V`. Built once from
/// parallel slices, a pair iterator, or another map; afterwards every
/// [`MapMutation`] method returns [`PrimoraError::UnsupportedOperation`].
pub struct ImmutableOpenHashMap<K, V> {
    /// Key slots; meaningful only where `used` is set
    keys: Box<[K]>,
    /// Value slots, parallel to `keys`
    values: Box<[V]>,
    /// Insertion-order links, parallel to `keys`
    links: Box<[Link]>,
    /// Which slots hold an entry
    used: Occupancy,
    /// Table size - 1
    mask: usize,
    /// Slot of the first entry in insertion order
    first: Option<usize>,
    /// Slot of the last entry in insertion order
    last: Option<usize>,
    /// Number of entries
    len: usize,
    /// Load factor the table was sized with
    load_factor: f32,
    /// Returned by `value_of` for absent keys
    default_return: V,
}

impl<K, V> ImmutableOpenHashMap<K, V>
where
    K: ScalarKey,
    V: Clone + Default,
{
    /// Build from parallel key and value slices with the default load factor.
    ///
    /// Later duplicates of a key overwrite the value of earlier ones; the key
    /// keeps the position of its first occurrence.
    pub fn new(keys: &[K], values: &[V]) -> Result<Self> {
        Self::with_load_factor(keys, values, DEFAULT_LOAD_FACTOR)
    }

    /// Build from parallel key and value slices with a custom load factor
    pub fn with_load_factor(keys: &[K], values: &[V], load_factor: f32) -> Result<Self> {
        Self::from_range(keys, values, 0, keys.len(), load_factor)
    }

    /// Build from `keys[offset..offset + length]` and the matching values
    pub fn from_range(
        keys: &[K],
        values: &[V],
        offset: usize,
        length: usize,
        load_factor: f32,
    ) -> Result<Self> {
        if keys.len() != values.len() {
            return Err(PrimoraError::invalid_argument(format!(
                "the key array and the value array have different lengths ({} and {})",
                keys.len(),
                values.len()
            )));
        }
        check_offset_length(offset, length, keys.len())?;
        let pairs = keys[offset..offset + length]
            .iter()
            .copied()
            .zip(values[offset..offset + length].iter().cloned());
        Self::init(length, load_factor, pairs)
    }

    /// Build from parallel slices using the load factor of `config`
    pub fn with_config(keys: &[K], values: &[V], config: &HashMapConfig) -> Result<Self> {
        config.validate()?;
        Self::with_load_factor(keys, values, config.load_factor)
    }

    /// Build from `(key, value)` pairs in iteration order
    pub fn from_pairs<I>(pairs: I, load_factor: f32) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let pairs: Vec<(K, V)> = pairs.into_iter().collect();
        Self::init(pairs.len(), load_factor, pairs)
    }

    /// Build from any [`ScalarMap`], preserving its iteration order
    pub fn from_map<M>(map: &M, load_factor: f32) -> Result<Self>
    where
        M: ScalarMap<K, V> + ?Sized,
    {
        let mut pairs = Vec::with_capacity(map.len());
        map.for_each_entry(&mut |key, value| pairs.push((key, value.clone())));
        Self::init(pairs.len(), load_factor, pairs)
    }

    /// An empty map
    pub fn empty() -> Self {
        // Two slots: the smallest table, with one slot always free
        let slots = 2;
        Self {
            keys: vec![K::default(); slots].into_boxed_slice(),
            values: (0..slots).map(|_| V::default()).collect(),
            links: vec![Link::UNLINKED; slots].into_boxed_slice(),
            used: Occupancy::new(slots),
            mask: slots - 1,
            first: None,
            last: None,
            len: 0,
            load_factor: DEFAULT_LOAD_FACTOR,
            default_return: V::default(),
        }
    }

    /// The single table-building pass every constructor funnels into
    fn init<I>(expected: usize, load_factor: f32, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        check_load_factor(load_factor)?;
        let slots = array_size(expected + 1, load_factor)?;
        let mask = slots - 1;

        let mut keys = vec![K::default(); slots].into_boxed_slice();
        let mut values: Box<[V]> = (0..slots).map(|_| V::default()).collect();
        let mut links = vec![Link::UNLINKED; slots].into_boxed_slice();
        let mut used = Occupancy::new(slots);
        let mut first = None;
        let mut last: Option<usize> = None;
        let mut len = 0usize;

        for (key, value) in entries {
            let pos = match probe(&keys, &used, mask, key) {
                Ok(pos) => {
                    values[pos] = value;
                    continue;
                }
                Err(pos) => pos,
            };

            if len + 1 >= slots {
                return Err(PrimoraError::invalid_argument(format!(
                    "more than {} distinct keys supplied for a table sized for {}",
                    len, expected
                )));
            }

            keys[pos] = key;
            values[pos] = value;
            used.insert(pos);
            match last {
                Some(tail) => {
                    links[tail] = links[tail].with_next(pos as u32);
                    links[pos] = Link::new(tail as u32, NIL);
                }
                None => {
                    first = Some(pos);
                    links[pos] = Link::new(NIL, NIL);
                }
            }
            last = Some(pos);
            len += 1;
        }

        if let Some(tail) = last {
            links[tail] = links[tail].terminated();
        }

        log::trace!(
            "built immutable open hash map: {} entries in {} slots (load factor {})",
            len,
            slots,
            load_factor
        );

        Ok(Self {
            keys,
            values,
            links,
            used,
            mask,
            first,
            last,
            len,
            load_factor,
            default_return: V::default(),
        })
    }

    /// Deep copy: same entries, same order, freshly allocated storage
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Replace the value `value_of` reports for absent keys
    pub fn with_default_return_value(mut self, value: V) -> Self {
        self.default_return = value;
        self
    }

    /// Value bound to `key`, or the default return value when absent
    pub fn value_of(&self, key: K) -> V {
        self.get(key).cloned().unwrap_or_else(|| self.default_return.clone())
    }

    /// Value bound to `key`, or `default` when absent
    pub fn get_or_default(&self, key: K, default: V) -> V {
        self.get(key).cloned().unwrap_or(default)
    }
}

impl<K, V> ImmutableOpenHashMap<K, V>
where
    K: ScalarKey,
{
    /// Locate `key`: `Ok(slot)` when present, `Err(slot)` with the empty slot
    /// where the probe stopped otherwise
    #[inline]
    pub fn find_index(&self, key: K) -> std::result::Result<usize, usize> {
        probe(&self.keys, &self.used, self.mask, key)
    }

    /// Value bound to `key`
    #[inline]
    pub fn get(&self, key: K) -> Option<&V> {
        self.find_index(key).ok().map(|pos| &self.values[pos])
    }

    /// True when `key` is bound
    #[inline]
    pub fn contains_key(&self, key: K) -> bool {
        self.find_index(key).is_ok()
    }

    /// True when some key is bound to `value`
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.iter().any(|(_, v)| v == value)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of table slots
    pub fn capacity(&self) -> usize {
        self.keys.len()
    }

    /// Load factor the table was sized with
    pub fn load_factor(&self) -> f32 {
        self.load_factor
    }

    /// Value reported by `value_of` for absent keys
    pub fn default_return_value(&self) -> &V {
        &self.default_return
    }

    /// First key in insertion order
    pub fn first_key(&self) -> Result<K> {
        self.first
            .map(|slot| self.keys[slot])
            .ok_or_else(|| PrimoraError::no_such_element("first key of an empty map"))
    }

    /// Last key in insertion order
    pub fn last_key(&self) -> Result<K> {
        self.last
            .map(|slot| self.keys[slot])
            .ok_or_else(|| PrimoraError::no_such_element("last key of an empty map"))
    }

    /// Value of the first entry in insertion order
    pub fn first_value(&self) -> Result<&V> {
        self.first
            .map(|slot| &self.values[slot])
            .ok_or_else(|| PrimoraError::no_such_element("first value of an empty map"))
    }

    /// Value of the last entry in insertion order
    pub fn last_value(&self) -> Result<&V> {
        self.last
            .map(|slot| &self.values[slot])
            .ok_or_else(|| PrimoraError::no_such_element("last value of an empty map"))
    }

    /// Iterate entries in insertion order; reversible
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }

    /// Bidirectional cursor positioned before the first entry
    pub fn cursor(&self) -> MapCursor<'_, K, V> {
        MapCursor::new(self)
    }

    /// Bidirectional cursor positioned right after the entry for `from`
    pub fn cursor_from(&self, from: K) -> Result<MapCursor<'_, K, V>> {
        MapCursor::starting_after(self, from)
    }

    /// View of the keys
    pub fn key_set(&self) -> KeySet<'_, K, V> {
        KeySet::new(self)
    }

    /// View of the values
    pub fn values(&self) -> ValuesView<'_, K, V> {
        ValuesView::new(self)
    }

    /// View of the entries
    pub fn entry_set(&self) -> EntrySet<'_, K, V> {
        EntrySet::new(self)
    }

    /// Visit every entry in insertion order
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(K, &V),
    {
        for (key, value) in self.iter() {
            f(key, value);
        }
    }

    // Slot-level accessors for iterators and views

    #[inline(always)]
    pub(crate) fn first_slot(&self) -> Option<usize> {
        self.first
    }

    #[inline(always)]
    pub(crate) fn last_slot(&self) -> Option<usize> {
        self.last
    }

    #[inline(always)]
    pub(crate) fn next_slot(&self, slot: usize) -> Option<usize> {
        self.links[slot].next()
    }

    #[inline(always)]
    pub(crate) fn prev_slot(&self, slot: usize) -> Option<usize> {
        self.links[slot].prev()
    }

    #[inline(always)]
    pub(crate) fn key_at(&self, slot: usize) -> K {
        self.keys[slot]
    }

    #[inline(always)]
    pub(crate) fn value_at(&self, slot: usize) -> &V {
        &self.values[slot]
    }
}

impl<K, V> Clone for ImmutableOpenHashMap<K, V>
where
    K: ScalarKey,
    V: Clone,
{
    fn clone(&self) -> Self {
        Self {
            keys: self.keys.clone(),
            values: self.values.clone(),
            links: self.links.clone(),
            used: self.used.clone(),
            mask: self.mask,
            first: self.first,
            last: self.last,
            len: self.len,
            load_factor: self.load_factor,
            default_return: self.default_return.clone(),
        }
    }
}

impl<K, V> Default for ImmutableOpenHashMap<K, V>
where
    K: ScalarKey,
    V: Clone + Default,
{
    fn default() -> Self {
        Self::empty()
    }
}

impl<K, V> PartialEq for ImmutableOpenHashMap<K, V>
where
    K: ScalarKey,
    V: PartialEq,
{
    /// Same bindings, regardless of order
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K, V> fmt::Debug for ImmutableOpenHashMap<K, V>
where
    K: ScalarKey,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> fmt::Display for ImmutableOpenHashMap<K, V>
where
    K: ScalarKey + fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}=>{}", key, value)?;
        }
        f.write_str("}")
    }
}

impl<'a, K, V> IntoIterator for &'a ImmutableOpenHashMap<K, V>
where
    K: ScalarKey,
{
    type Item = (K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> ScalarMap<K, V> for ImmutableOpenHashMap<K, V>
where
    K: ScalarKey,
{
    fn len(&self) -> usize {
        self.len
    }

    fn get(&self, key: K) -> Option<&V> {
        ImmutableOpenHashMap::get(self, key)
    }

    fn for_each_entry(&self, f: &mut dyn FnMut(K, &V)) {
        for (key, value) in self.iter() {
            f(key, value);
        }
    }
}

impl<K, V> MapMutation<K, V> for ImmutableOpenHashMap<K, V>
where
    K: ScalarKey,
{
    fn put(&mut self, _key: K, _value: V) -> Result<Option<V>> {
        Err(PrimoraError::unsupported("put"))
    }

    fn put_if_absent(&mut self, _key: K, _value: V) -> Result<Option<V>> {
        Err(PrimoraError::unsupported("put_if_absent"))
    }

    fn put_all(&mut self, _other: &dyn ScalarMap<K, V>) -> Result<()> {
        Err(PrimoraError::unsupported("put_all"))
    }

    fn remove(&mut self, _key: K) -> Result<Option<V>> {
        Err(PrimoraError::unsupported("remove"))
    }

    fn remove_entry(&mut self, _key: K, _value: &V) -> Result<bool> {
        Err(PrimoraError::unsupported("remove_entry"))
    }

    fn remove_first(&mut self) -> Result<V> {
        Err(PrimoraError::unsupported("remove_first"))
    }

    fn remove_last(&mut self) -> Result<V> {
        Err(PrimoraError::unsupported("remove_last"))
    }

    fn clear(&mut self) -> Result<()> {
        Err(PrimoraError::unsupported("clear"))
    }

    fn compute<F>(&mut self, _key: K, _f: F) -> Result<Option<V>>
    where
        F: FnOnce(K, Option<&V>) -> Option<V>,
    {
        Err(PrimoraError::unsupported("compute"))
    }

    fn compute_if_absent<F>(&mut self, _key: K, _f: F) -> Result<V>
    where
        F: FnOnce(K) -> V,
    {
        Err(PrimoraError::unsupported("compute_if_absent"))
    }

    fn compute_if_present<F>(&mut self, _key: K, _f: F) -> Result<Option<V>>
    where
        F: FnOnce(K, &V) -> Option<V>,
    {
        Err(PrimoraError::unsupported("compute_if_present"))
    }

    fn merge<F>(&mut self, _key: K, _value: V, _f: F) -> Result<Option<V>>
    where
        F: FnOnce(&V, &V) -> Option<V>,
    {
        Err(PrimoraError::unsupported("merge"))
    }

    fn replace(&mut self, _key: K, _value: V) -> Result<Option<V>> {
        Err(PrimoraError::unsupported("replace"))
    }

    fn replace_entry(&mut self, _key: K, _old: &V, _new: V) -> Result<bool> {
        Err(PrimoraError::unsupported("replace_entry"))
    }

    fn move_to_first(&mut self, _key: K) -> Result<()> {
        Err(PrimoraError::unsupported("move_to_first"))
    }

    fn move_to_last(&mut self, _key: K) -> Result<()> {
        Err(PrimoraError::unsupported("move_to_last"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn scenario() -> ImmutableOpenHashMap<i16, i32> {
        ImmutableOpenHashMap::new(&[5, 0, 5, 3], &[10, 20, 99, 30]).unwrap()
    }

    #[test]
    fn test_short_to_int_scenario() {
        let map = scenario();
        assert_eq!(map.len(), 3);
        assert_eq!(map.iter().map(|(k, _)| k).collect::<Vec<_>>(), vec![5, 0, 3]);
        assert_eq!(map.get(5), Some(&99));
        assert_eq!(map.get(0), Some(&20));
        assert_eq!(map.get(3), Some(&30));
        assert_eq!(map.get(7), None);
        assert_eq!(map.value_of(7), *map.default_return_value());
    }

    #[test]
    fn test_default_return_value() {
        let map = scenario().with_default_return_value(-1);
        assert_eq!(map.value_of(7), -1);
        assert_eq!(map.value_of(5), 99);
        assert_eq!(map.get_or_default(42, 8), 8);
        assert_eq!(map.get_or_default(3, 8), 30);
    }

    #[test]
    fn test_find_index_sign() {
        let map = scenario();
        let found = map.find_index(3).unwrap();
        assert_eq!(map.key_at(found), 3);

        let missing = map.find_index(7).unwrap_err();
        assert!(missing < map.capacity());
        assert!(!map.used.contains(missing));
    }

    #[test]
    fn test_zero_key_behaves_like_any_key() {
        let map = ImmutableOpenHashMap::<i64, u8>::new(&[0, 1, 2], &[7, 8, 9]).unwrap();
        assert!(map.contains_key(0));
        assert_eq!(map.get(0), Some(&7));
        assert_eq!(map.first_key().unwrap(), 0);

        let without_zero = ImmutableOpenHashMap::<i64, u8>::new(&[1, 2], &[8, 9]).unwrap();
        assert!(!without_zero.contains_key(0));
        assert_eq!(without_zero.get(0), None);
    }

    #[test]
    fn test_capacity_is_power_of_two() {
        for n in [0usize, 1, 2, 5, 16, 100, 1000] {
            let keys: Vec<i32> = (0..n as i32).collect();
            let values = keys.clone();
            let map = ImmutableOpenHashMap::new(&keys, &values).unwrap();
            assert!(map.capacity().is_power_of_two());
            assert!(map.capacity() > n);
            assert_eq!(map.len(), n);
        }
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let err = ImmutableOpenHashMap::<i32, i32>::new(&[1, 2], &[1]).unwrap_err();
        assert_eq!(err.category(), "argument");
    }

    #[test]
    fn test_invalid_load_factor_rejected() {
        assert!(ImmutableOpenHashMap::<i32, i32>::with_load_factor(&[1], &[1], 0.0).is_err());
        assert!(ImmutableOpenHashMap::<i32, i32>::with_load_factor(&[1], &[1], 1.0).is_err());
        assert!(ImmutableOpenHashMap::<i32, i32>::with_load_factor(&[1], &[1], -0.5).is_err());
    }

    #[test]
    fn test_from_range() {
        let keys = [1u32, 2, 3, 4, 5];
        let values = [10u32, 20, 30, 40, 50];
        let map = ImmutableOpenHashMap::from_range(&keys, &values, 1, 3, 0.5).unwrap();
        assert_eq!(map.iter().map(|(k, _)| k).collect::<Vec<_>>(), vec![2, 3, 4]);
        assert!(!map.contains_key(1));
        assert!(!map.contains_key(5));

        assert!(ImmutableOpenHashMap::from_range(&keys, &values, 3, 3, 0.5).is_err());
    }

    #[test]
    fn test_from_pairs_and_map() {
        let map =
            ImmutableOpenHashMap::from_pairs(vec![('a', 1u8), ('b', 2), ('a', 3)], 0.75).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get('a'), Some(&3));

        let copy = ImmutableOpenHashMap::from_map(&map, 0.5).unwrap();
        assert_eq!(copy.iter().collect::<Vec<_>>(), map.iter().collect::<Vec<_>>());

        let mut std_map = HashMap::new();
        std_map.insert(1i32, 1.5f64);
        std_map.insert(2i32, 2.5f64);
        let from_std = ImmutableOpenHashMap::from_map(&std_map, 0.75).unwrap();
        assert_eq!(from_std.len(), 2);
        assert_eq!(from_std.get(2), Some(&2.5));
    }

    #[test]
    fn test_copy_is_deep() {
        let map = scenario();
        let copy = map.copy();
        assert_eq!(copy, map);
        assert_eq!(copy.iter().collect::<Vec<_>>(), map.iter().collect::<Vec<_>>());
        assert_ne!(copy.keys.as_ptr(), map.keys.as_ptr());
        assert_ne!(copy.values.as_ptr(), map.values.as_ptr());
        assert_ne!(copy.links.as_ptr(), map.links.as_ptr());
    }

    #[test]
    fn test_mutators_unsupported() {
        let mut map = scenario();
        let before = map.copy();

        assert!(matches!(map.put(1, 1), Err(PrimoraError::UnsupportedOperation { .. })));
        assert!(map.put_if_absent(1, 1).is_err());
        assert!(map.put_all(&before).is_err());
        assert!(map.remove(5).is_err());
        assert!(map.remove_entry(5, &99).is_err());
        assert!(map.remove_first().is_err());
        assert!(map.remove_last().is_err());
        assert!(map.clear().is_err());
        assert!(map.compute(5, |_, _| Some(1)).is_err());
        assert!(map.compute_if_absent(8, |_| 1).is_err());
        assert!(map.compute_if_present(5, |_, _| None).is_err());
        assert!(map.merge(5, 1, |a, b| Some(a + b)).is_err());
        assert!(map.replace(5, 1).is_err());
        assert!(map.replace_entry(5, &99, 1).is_err());
        assert!(map.move_to_first(3).is_err());
        assert!(map.move_to_last(5).is_err());

        assert_eq!(map, before);
        assert_eq!(map.iter().collect::<Vec<_>>(), before.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_first_last_queries() {
        let map = scenario();
        assert_eq!(map.first_key().unwrap(), 5);
        assert_eq!(map.last_key().unwrap(), 3);
        assert_eq!(*map.first_value().unwrap(), 99);
        assert_eq!(*map.last_value().unwrap(), 30);

        let empty = ImmutableOpenHashMap::<i16, i32>::empty();
        assert!(matches!(empty.first_key(), Err(PrimoraError::NoSuchElement { .. })));
        assert!(empty.last_key().is_err());
        assert!(empty.first_value().is_err());
        assert!(empty.last_value().is_err());
        assert!(empty.is_empty());
        assert_eq!(empty.iter().count(), 0);
    }

    #[test]
    fn test_contains_value() {
        let map = scenario();
        assert!(map.contains_value(&99));
        assert!(!map.contains_value(&10));
    }

    #[test]
    fn test_display_and_debug() {
        let map = scenario();
        assert_eq!(format!("{}", map), "{5=>99, 0=>20, 3=>30}");
        assert_eq!(format!("{:?}", map), "{5: 99, 0: 20, 3: 30}");
        assert_eq!(format!("{}", ImmutableOpenHashMap::<u8, u8>::empty()), "{}");
    }

    #[test]
    fn test_equality_ignores_order() {
        let a = ImmutableOpenHashMap::<i32, i32>::new(&[1, 2], &[10, 20]).unwrap();
        let b = ImmutableOpenHashMap::<i32, i32>::new(&[2, 1], &[20, 10]).unwrap();
        let c = ImmutableOpenHashMap::<i32, i32>::new(&[2, 1], &[20, 11]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_float_keys() {
        let map =
            ImmutableOpenHashMap::<f64, i32>::new(&[0.0, -0.0, f64::NAN, 1.5], &[1, 2, 3, 4])
                .unwrap();
        assert_eq!(map.len(), 4);
        assert_eq!(map.get(0.0), Some(&1));
        assert_eq!(map.get(-0.0), Some(&2));
        assert_eq!(map.get(f64::NAN), Some(&3));
    }

    #[test]
    fn test_with_config() {
        let config = HashMapConfig { load_factor: 0.5 };
        let map = ImmutableOpenHashMap::<u16, u16>::with_config(&[1, 2, 3], &[1, 2, 3], &config)
            .unwrap();
        assert_eq!(map.load_factor(), 0.5);
        assert_eq!(map.capacity(), 8);

        let bad = HashMapConfig { load_factor: 2.0 };
        assert!(ImmutableOpenHashMap::<u16, u16>::with_config(&[1], &[1], &bad).is_err());
    }

    #[test]
    fn test_links_chain_invariant() {
        let keys: Vec<i32> = (0..200).map(|i| (i * 7919) % 211).collect();
        let values = keys.clone();
        let map = ImmutableOpenHashMap::new(&keys, &values).unwrap();

        let mut forward = Vec::new();
        let mut slot = map.first_slot();
        while let Some(s) = slot {
            forward.push(s);
            slot = map.next_slot(s);
        }
        assert_eq!(forward.len(), map.len());
        assert_eq!(forward.last().copied(), map.last_slot());

        let mut backward = Vec::new();
        let mut slot = map.last_slot();
        while let Some(s) = slot {
            backward.push(s);
            slot = map.prev_slot(s);
        }
        backward.reverse();
        assert_eq!(forward, backward);
    }
}
