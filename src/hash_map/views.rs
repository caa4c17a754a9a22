//! Key, value and entry views of [`ImmutableOpenHashMap`]
//!
//! Views are thin `Copy` facades over the map's slot arrays; they allocate
//! nothing and follow insertion order. The bulk helpers shared by every view
//! (`for_each`, `matches_any`, `fold`, ...) live on the [`MapView`] trait.
//!
//! Entries come in two flavors:
//! - [`MapEntry`] from [`EntrySet::iter`]: an independent value per step
//! - [`BasicEntry`] from [`EntrySet::fast_iter`]: one reused buffer, lent out
//!   until the next step

use super::immutable_open_hash_map::ImmutableOpenHashMap;
use super::iter::{Iter, MapCursor};
use crate::algorithms::merge_sort_by;
use crate::error::{PrimoraError, Result};
use crate::scalar::{NaturalOrder, ScalarKey};
use std::cmp::Ordering;
use std::fmt;

/// Bulk operations shared by the map views
pub trait MapView {
    /// Element type yielded by the view
    type Item;
    /// Iterator over the view, in insertion order
    type Iter: Iterator<Item = Self::Item>;

    /// Iterate the view in insertion order
    fn iter(&self) -> Self::Iter;

    /// Number of elements
    fn len(&self) -> usize;

    /// True when the view has no elements
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visit each element
    fn for_each<F>(&self, f: F)
    where
        F: FnMut(Self::Item),
    {
        self.iter().for_each(f);
    }

    /// Visit each element with its ordinal
    fn for_each_indexed<F>(&self, mut f: F)
    where
        F: FnMut(usize, Self::Item),
    {
        for (i, item) in self.iter().enumerate() {
            f(i, item);
        }
    }

    /// True when some element satisfies `p`
    fn matches_any<P>(&self, mut p: P) -> bool
    where
        P: FnMut(&Self::Item) -> bool,
    {
        self.iter().any(|item| p(&item))
    }

    /// True when no element satisfies `p`
    fn matches_none<P>(&self, p: P) -> bool
    where
        P: FnMut(&Self::Item) -> bool,
    {
        !self.matches_any(p)
    }

    /// True when every element satisfies `p`; true on an empty view
    fn matches_all<P>(&self, mut p: P) -> bool
    where
        P: FnMut(&Self::Item) -> bool,
    {
        self.iter().all(|item| p(&item))
    }

    /// First element satisfying `p`
    fn find_first<P>(&self, mut p: P) -> Option<Self::Item>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        self.iter().find(|item| p(item))
    }

    /// Number of elements satisfying `p`
    fn count<P>(&self, mut p: P) -> usize
    where
        P: FnMut(&Self::Item) -> bool,
    {
        self.iter().filter(|item| p(item)).count()
    }

    /// Combine all elements left to right; `None` on an empty view
    fn reduce<F>(&self, f: F) -> Option<Self::Item>
    where
        F: FnMut(Self::Item, Self::Item) -> Self::Item,
    {
        self.iter().reduce(f)
    }

    /// Combine all elements left to right starting from `init`
    fn fold<A, F>(&self, init: A, f: F) -> A
    where
        F: FnMut(A, Self::Item) -> A,
    {
        self.iter().fold(init, f)
    }
}

// ============================================================================
// Keys
// ============================================================================

/// View of the keys of a map
pub struct KeySet<'a, K, V> {
    map: &'a ImmutableOpenHashMap<K, V>,
}

impl<'a, K, V> Clone for KeySet<'a, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K, V> Copy for KeySet<'a, K, V> {}

impl<'a, K: ScalarKey, V> KeySet<'a, K, V> {
    pub(crate) fn new(map: &'a ImmutableOpenHashMap<K, V>) -> Self {
        Self { map }
    }

    /// True when `key` is in the map
    pub fn contains(&self, key: K) -> bool {
        self.map.contains_key(key)
    }

    /// First key in insertion order
    pub fn first(&self) -> Result<K> {
        self.map.first_key()
    }

    /// Last key in insertion order
    pub fn last(&self) -> Result<K> {
        self.map.last_key()
    }

    /// Keys that follow `from` in insertion order
    pub fn iter_from(&self, from: K) -> Result<KeysFrom<'a, K, V>> {
        Ok(KeysFrom {
            cursor: self.map.cursor_from(from)?,
        })
    }

    /// Snapshot of the keys in natural ascending order
    pub fn to_sorted_vec(&self) -> Vec<K>
    where
        K: NaturalOrder,
    {
        self.to_sorted_vec_by(|a, b| a.natural_cmp(b))
    }

    /// Snapshot of the keys ordered by `cmp`; keys that compare equal keep
    /// insertion order
    pub fn to_sorted_vec_by<F>(&self, cmp: F) -> Vec<K>
    where
        F: FnMut(&K, &K) -> Ordering,
    {
        let mut keys: Vec<K> = MapView::iter(self).collect();
        merge_sort_by(&mut keys, cmp);
        keys
    }
}

impl<'a, K: ScalarKey, V> MapView for KeySet<'a, K, V> {
    type Item = K;
    type Iter = Keys<'a, K, V>;

    fn iter(&self) -> Self::Iter {
        Keys {
            iter: self.map.iter(),
        }
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

impl<'a, K: ScalarKey, V> IntoIterator for KeySet<'a, K, V> {
    type Item = K;
    type IntoIter = Keys<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        MapView::iter(&self)
    }
}

impl<'a, K: ScalarKey, V> fmt::Debug for KeySet<'a, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(MapView::iter(self)).finish()
    }
}

/// Iterator over keys in insertion order
pub struct Keys<'a, K, V> {
    iter: Iter<'a, K, V>,
}

impl<'a, K: ScalarKey, V> Iterator for Keys<'a, K, V> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, K: ScalarKey, V> DoubleEndedIterator for Keys<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(k, _)| k)
    }
}

impl<'a, K: ScalarKey, V> ExactSizeIterator for Keys<'a, K, V> {}

/// Keys following a given key in insertion order
pub struct KeysFrom<'a, K, V> {
    cursor: MapCursor<'a, K, V>,
}

impl<'a, K: ScalarKey, V> KeysFrom<'a, K, V> {
    /// Step back to the previous key
    pub fn previous(&mut self) -> Option<K> {
        self.cursor.previous_entry().ok().map(|(k, _)| k)
    }
}

impl<'a, K: ScalarKey, V> Iterator for KeysFrom<'a, K, V> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next_entry().ok().map(|(k, _)| k)
    }
}

// ============================================================================
// Values
// ============================================================================

/// View of the values of a map
pub struct ValuesView<'a, K, V> {
    map: &'a ImmutableOpenHashMap<K, V>,
}

impl<'a, K, V> Clone for ValuesView<'a, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K, V> Copy for ValuesView<'a, K, V> {}

impl<'a, K: ScalarKey, V> ValuesView<'a, K, V> {
    pub(crate) fn new(map: &'a ImmutableOpenHashMap<K, V>) -> Self {
        Self { map }
    }

    /// True when some key is bound to `value`
    pub fn contains(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.map.contains_value(value)
    }
}

impl<'a, K: ScalarKey, V> MapView for ValuesView<'a, K, V> {
    type Item = &'a V;
    type Iter = Values<'a, K, V>;

    fn iter(&self) -> Self::Iter {
        Values {
            iter: self.map.iter(),
        }
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

impl<'a, K: ScalarKey, V> IntoIterator for ValuesView<'a, K, V> {
    type Item = &'a V;
    type IntoIter = Values<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        MapView::iter(&self)
    }
}

impl<'a, K: ScalarKey, V: fmt::Debug> fmt::Debug for ValuesView<'a, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(MapView::iter(self)).finish()
    }
}

/// Iterator over values in insertion order
pub struct Values<'a, K, V> {
    iter: Iter<'a, K, V>,
}

impl<'a, K: ScalarKey, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, K: ScalarKey, V> DoubleEndedIterator for Values<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(_, v)| v)
    }
}

impl<'a, K: ScalarKey, V> ExactSizeIterator for Values<'a, K, V> {}

// ============================================================================
// Entries
// ============================================================================

/// One entry of a map, borrowed from its value slot
#[derive(PartialEq)]
pub struct MapEntry<'a, K, V> {
    key: K,
    value: &'a V,
}

impl<'a, K: Copy, V> Clone for MapEntry<'a, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K: Copy, V> Copy for MapEntry<'a, K, V> {}

impl<'a, K: Copy, V> MapEntry<'a, K, V> {
    /// The entry's key
    pub fn key(&self) -> K {
        self.key
    }

    /// The entry's value
    pub fn value(&self) -> &'a V {
        self.value
    }

    /// Split into a `(key, &value)` pair
    pub fn into_pair(self) -> (K, &'a V) {
        (self.key, self.value)
    }
}

impl<'a, K: fmt::Debug, V: fmt::Debug> fmt::Debug for MapEntry<'a, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MapEntry")
            .field(&self.key)
            .field(self.value)
            .finish()
    }
}

impl<'a, K: fmt::Display, V: fmt::Display> fmt::Display for MapEntry<'a, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=>{}", self.key, self.value)
    }
}

/// Owned, reusable entry buffer handed out by [`FastEntries`]
#[derive(Debug, Clone, PartialEq)]
pub struct BasicEntry<K, V> {
    key: K,
    value: V,
}

impl<K: Copy, V> BasicEntry<K, V> {
    /// Create an entry
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// The entry's key
    pub fn key(&self) -> K {
        self.key
    }

    /// The entry's value
    pub fn value(&self) -> &V {
        &self.value
    }
}

/// View of the entries of a map
pub struct EntrySet<'a, K, V> {
    map: &'a ImmutableOpenHashMap<K, V>,
}

impl<'a, K, V> Clone for EntrySet<'a, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K, V> Copy for EntrySet<'a, K, V> {}

impl<'a, K: ScalarKey, V> EntrySet<'a, K, V> {
    pub(crate) fn new(map: &'a ImmutableOpenHashMap<K, V>) -> Self {
        Self { map }
    }

    /// True when `key` is bound to `value`
    pub fn contains(&self, key: K, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.map.get(key) == Some(value)
    }

    /// First entry in insertion order
    pub fn first(&self) -> Result<MapEntry<'a, K, V>> {
        MapView::iter(self)
            .next()
            .ok_or_else(|| PrimoraError::no_such_element("first entry of an empty map"))
    }

    /// Last entry in insertion order
    pub fn last(&self) -> Result<MapEntry<'a, K, V>> {
        MapView::iter(self)
            .next_back()
            .ok_or_else(|| PrimoraError::no_such_element("last entry of an empty map"))
    }

    /// Iterate through one reused entry buffer
    pub fn fast_iter(&self) -> FastEntries<'a, K, V>
    where
        V: Clone,
    {
        FastEntries {
            iter: self.map.iter(),
            entry: None,
        }
    }

    /// Visit each entry through one reused entry buffer
    pub fn fast_for_each<F>(&self, mut f: F)
    where
        V: Clone,
        F: FnMut(&BasicEntry<K, V>),
    {
        let mut entries = self.fast_iter();
        while let Some(entry) = entries.next_entry() {
            f(entry);
        }
    }
}

impl<'a, K: ScalarKey, V> MapView for EntrySet<'a, K, V> {
    type Item = MapEntry<'a, K, V>;
    type Iter = Entries<'a, K, V>;

    fn iter(&self) -> Self::Iter {
        Entries {
            iter: self.map.iter(),
        }
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

impl<'a, K: ScalarKey, V> IntoIterator for EntrySet<'a, K, V> {
    type Item = MapEntry<'a, K, V>;
    type IntoIter = Entries<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        MapView::iter(&self)
    }
}

/// Iterator over independent entries in insertion order
pub struct Entries<'a, K, V> {
    iter: Iter<'a, K, V>,
}

impl<'a, K: ScalarKey, V> Iterator for Entries<'a, K, V> {
    type Item = MapEntry<'a, K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(key, value)| MapEntry { key, value })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, K: ScalarKey, V> DoubleEndedIterator for Entries<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(key, value)| MapEntry { key, value })
    }
}

impl<'a, K: ScalarKey, V> ExactSizeIterator for Entries<'a, K, V> {}

/// Lending entry iterator that reuses one [`BasicEntry`]
///
/// Each call to [`next_entry`](Self::next_entry) overwrites the buffer, so the
/// returned reference is valid only until the next call.
pub struct FastEntries<'a, K, V> {
    iter: Iter<'a, K, V>,
    entry: Option<BasicEntry<K, V>>,
}

impl<'a, K: ScalarKey, V: Clone> FastEntries<'a, K, V> {
    /// Load the next entry into the buffer and lend it out
    pub fn next_entry(&mut self) -> Option<&BasicEntry<K, V>> {
        let (key, value) = self.iter.next()?;
        let entry = self
            .entry
            .get_or_insert_with(|| BasicEntry::new(key, value.clone()));
        entry.key = key;
        entry.value.clone_from(value);
        Some(&*entry)
    }

    /// Entries left
    pub fn remaining(&self) -> usize {
        self.iter.len()
    }
}
