//! Insertion-order traversal of [`ImmutableOpenHashMap`]
//!
//! [`Iter`] walks the link chain from both ends at once. [`MapCursor`] is the
//! bidirectional cursor: it sits between two entries, can move either way, and
//! reports its ordinal position lazily.

use super::immutable_open_hash_map::ImmutableOpenHashMap;
use crate::error::{PrimoraError, Result};
use crate::scalar::ScalarKey;
use std::iter::FusedIterator;

/// Iterator over `(key, &value)` in insertion order
pub struct Iter<'a, K, V> {
    map: &'a ImmutableOpenHashMap<K, V>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, K: ScalarKey, V> Iter<'a, K, V> {
    pub(crate) fn new(map: &'a ImmutableOpenHashMap<K, V>) -> Self {
        Self {
            map,
            front: map.first_slot(),
            back: map.last_slot(),
            remaining: map.len(),
        }
    }
}

impl<'a, K: ScalarKey, V> Iterator for Iter<'a, K, V> {
    type Item = (K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.front?;
        self.front = self.map.next_slot(slot);
        self.remaining -= 1;
        Some((self.map.key_at(slot), self.map.value_at(slot)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K: ScalarKey, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.back?;
        self.back = self.map.prev_slot(slot);
        self.remaining -= 1;
        Some((self.map.key_at(slot), self.map.value_at(slot)))
    }
}

impl<'a, K: ScalarKey, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K: ScalarKey, V> FusedIterator for Iter<'a, K, V> {}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Self {
            map: self.map,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

/// Bidirectional cursor over the entries of a map
///
/// The cursor always sits between two entries: `prev` is the entry a call to
/// [`previous_entry`](Self::previous_entry) would return and `next` the one
/// [`next_entry`](Self::next_entry) would return. The ordinal of `next` is only
/// computed when asked for, by walking from the first entry.
pub struct MapCursor<'a, K, V> {
    map: &'a ImmutableOpenHashMap<K, V>,
    prev: Option<usize>,
    next: Option<usize>,
    /// Slot of the entry most recently returned
    curr: Option<usize>,
    /// Number of entries before the cursor, when known
    index: Option<usize>,
}

impl<'a, K: ScalarKey, V> MapCursor<'a, K, V> {
    pub(crate) fn new(map: &'a ImmutableOpenHashMap<K, V>) -> Self {
        Self {
            map,
            prev: None,
            next: map.first_slot(),
            curr: None,
            index: Some(0),
        }
    }

    /// Cursor positioned right after the entry for `from`
    pub(crate) fn starting_after(map: &'a ImmutableOpenHashMap<K, V>, from: K) -> Result<Self> {
        // Starting after the last key needs no probe and no index walk
        if let Some(last) = map.last_slot() {
            if map.key_at(last).key_eq(from) {
                return Ok(Self {
                    map,
                    prev: Some(last),
                    next: None,
                    curr: None,
                    index: Some(map.len()),
                });
            }
        }

        match map.find_index(from) {
            Ok(slot) => Ok(Self {
                map,
                prev: Some(slot),
                next: map.next_slot(slot),
                curr: None,
                index: None,
            }),
            Err(_) => Err(PrimoraError::no_such_element(format!(
                "the key {:?} does not belong to this map",
                from
            ))),
        }
    }

    fn ensure_index_known(&mut self) -> usize {
        if let Some(index) = self.index {
            return index;
        }
        let index = match (self.prev, self.next) {
            (None, _) => 0,
            (Some(_), None) => self.map.len(),
            (Some(prev), Some(_)) => {
                let mut index = 1;
                let mut slot = self.map.first_slot();
                while let Some(s) = slot {
                    if s == prev {
                        break;
                    }
                    slot = self.map.next_slot(s);
                    index += 1;
                }
                index
            }
        };
        self.index = Some(index);
        index
    }

    /// True when an entry follows the cursor
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// True when an entry precedes the cursor
    pub fn has_previous(&self) -> bool {
        self.prev.is_some()
    }

    /// Ordinal of the entry `next_entry` would return
    pub fn next_index(&mut self) -> usize {
        self.ensure_index_known()
    }

    /// Ordinal of the entry `previous_entry` would return, `None` at the start
    pub fn previous_index(&mut self) -> Option<usize> {
        self.ensure_index_known().checked_sub(1)
    }

    /// Move forward over one entry and return it
    pub fn next_entry(&mut self) -> Result<(K, &'a V)> {
        let slot = self
            .next
            .ok_or_else(|| PrimoraError::no_such_element("cursor is past the last entry"))?;
        self.curr = Some(slot);
        self.prev = Some(slot);
        self.next = self.map.next_slot(slot);
        if let Some(index) = self.index.as_mut() {
            *index += 1;
        }
        Ok((self.map.key_at(slot), self.map.value_at(slot)))
    }

    /// Move backward over one entry and return it
    pub fn previous_entry(&mut self) -> Result<(K, &'a V)> {
        let slot = self
            .prev
            .ok_or_else(|| PrimoraError::no_such_element("cursor is before the first entry"))?;
        self.curr = Some(slot);
        self.next = Some(slot);
        self.prev = self.map.prev_slot(slot);
        if let Some(index) = self.index.as_mut() {
            *index -= 1;
        }
        Ok((self.map.key_at(slot), self.map.value_at(slot)))
    }

    /// Entry most recently returned by either direction
    pub fn current(&self) -> Option<(K, &'a V)> {
        self.curr
            .map(|slot| (self.map.key_at(slot), self.map.value_at(slot)))
    }

    /// Move forward over up to `n` entries; returns how many were passed
    pub fn advance(&mut self, n: usize) -> usize {
        let mut moved = 0;
        while moved < n && self.next_entry().is_ok() {
            moved += 1;
        }
        moved
    }

    /// Move backward over up to `n` entries; returns how many were passed
    pub fn back(&mut self, n: usize) -> usize {
        let mut moved = 0;
        while moved < n && self.previous_entry().is_ok() {
            moved += 1;
        }
        moved
    }

    /// Replace the value of the current entry
    pub fn set(&mut self, _value: V) -> Result<()> {
        Err(PrimoraError::unsupported("set"))
    }

    /// Insert an entry at the cursor
    pub fn add(&mut self, _key: K, _value: V) -> Result<()> {
        Err(PrimoraError::unsupported("add"))
    }

    /// Remove the current entry
    pub fn remove(&mut self) -> Result<()> {
        Err(PrimoraError::unsupported("remove"))
    }
}

impl<'a, K: ScalarKey, V> Iterator for MapCursor<'a, K, V> {
    type Item = (K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters() -> ImmutableOpenHashMap<char, u32> {
        ImmutableOpenHashMap::new(&['d', 'a', 'c', 'b', 'e'], &[4, 1, 3, 2, 5]).unwrap()
    }

    #[test]
    fn test_iter_both_directions() {
        let map = letters();
        let forward: Vec<char> = map.iter().map(|(k, _)| k).collect();
        let mut backward: Vec<char> = map.iter().rev().map(|(k, _)| k).collect();
        assert_eq!(forward, vec!['d', 'a', 'c', 'b', 'e']);
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_iter_meets_in_the_middle() {
        let map = letters();
        let mut iter = map.iter();
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.next().map(|(k, _)| k), Some('d'));
        assert_eq!(iter.next_back().map(|(k, _)| k), Some('e'));
        assert_eq!(iter.next().map(|(k, _)| k), Some('a'));
        assert_eq!(iter.next_back().map(|(k, _)| k), Some('b'));
        assert_eq!(iter.len(), 1);
        assert_eq!(iter.next().map(|(k, _)| k), Some('c'));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn test_cursor_walk() {
        let map = letters();
        let mut cursor = map.cursor();
        assert!(!cursor.has_previous());
        assert!(cursor.has_next());
        assert_eq!(cursor.next_index(), 0);
        assert_eq!(cursor.previous_index(), None);

        assert_eq!(cursor.next_entry().unwrap(), ('d', &4));
        assert_eq!(cursor.next_entry().unwrap(), ('a', &1));
        assert_eq!(cursor.next_index(), 2);
        assert_eq!(cursor.previous_entry().unwrap(), ('a', &1));
        assert_eq!(cursor.current(), Some(('a', &1)));
        assert_eq!(cursor.previous_index(), Some(0));
        assert_eq!(cursor.previous_entry().unwrap(), ('d', &4));
        assert!(matches!(
            cursor.previous_entry(),
            Err(PrimoraError::NoSuchElement { .. })
        ));
    }

    #[test]
    fn test_cursor_iterator_resumes_after_stepping_back() {
        let map = letters();
        let mut cursor = map.cursor();
        assert_eq!(cursor.by_ref().count(), 5);
        assert_eq!(cursor.next(), None);

        // Exhaustion is not final: stepping back re-arms the forward walk
        assert_eq!(cursor.previous_entry().unwrap(), ('e', &5));
        assert_eq!(cursor.previous_entry().unwrap(), ('b', &2));
        assert_eq!(cursor.next(), Some(('b', &2)));
        assert_eq!(cursor.next(), Some(('e', &5)));
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn test_cursor_from_middle_computes_index_lazily() {
        let map = letters();
        let mut cursor = map.cursor_from('c').unwrap();
        assert!(cursor.index.is_none());
        assert_eq!(cursor.next_index(), 3);
        assert_eq!(cursor.previous_index(), Some(2));
        assert_eq!(cursor.next_entry().unwrap().0, 'b');
        assert_eq!(cursor.next_index(), 4);

        let mut cursor = map.cursor_from('c').unwrap();
        assert_eq!(cursor.previous_entry().unwrap().0, 'c');
        assert_eq!(cursor.previous_entry().unwrap().0, 'a');
        assert_eq!(cursor.next_index(), 1);
    }

    #[test]
    fn test_cursor_from_last_key() {
        let map = letters();
        let mut cursor = map.cursor_from('e').unwrap();
        assert_eq!(cursor.index, Some(5));
        assert!(!cursor.has_next());
        assert!(cursor.next_entry().is_err());
        assert_eq!(cursor.previous_entry().unwrap().0, 'e');
        assert_eq!(cursor.next_index(), 4);
    }

    #[test]
    fn test_cursor_from_first_key() {
        let map = letters();
        let mut cursor = map.cursor_from('d').unwrap();
        assert_eq!(cursor.next_index(), 1);
        assert_eq!(cursor.previous_index(), Some(0));
    }

    #[test]
    fn test_cursor_from_missing_key() {
        let map = letters();
        assert!(matches!(
            map.cursor_from('z'),
            Err(PrimoraError::NoSuchElement { .. })
        ));
    }

    #[test]
    fn test_advance_and_back() {
        let map = letters();
        let mut cursor = map.cursor();
        assert_eq!(cursor.advance(3), 3);
        assert_eq!(cursor.next_index(), 3);
        assert_eq!(cursor.advance(10), 2);
        assert!(!cursor.has_next());
        assert_eq!(cursor.back(2), 2);
        assert_eq!(cursor.next_index(), 3);
        assert_eq!(cursor.back(10), 3);
        assert_eq!(cursor.next_index(), 0);
    }

    #[test]
    fn test_cursor_mutators_unsupported() {
        let map = letters();
        let mut cursor = map.cursor();
        assert!(cursor.next_entry().is_ok());
        assert!(matches!(cursor.set(9), Err(PrimoraError::UnsupportedOperation { .. })));
        assert!(cursor.add('z', 26).is_err());
        assert!(cursor.remove().is_err());
        assert_eq!(map.len(), 5);
    }

    #[test]
    fn test_cursor_as_iterator() {
        let map = letters();
        let rest: Vec<char> = map.cursor_from('a').unwrap().map(|(k, _)| k).collect();
        assert_eq!(rest, vec!['c', 'b', 'e']);

        let empty = ImmutableOpenHashMap::<u8, u8>::empty();
        assert_eq!(empty.cursor().count(), 0);
        assert!(empty.cursor_from(0).is_err());
    }
}
