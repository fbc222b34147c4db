// Copyright 2026 the Laminate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A tiny tag-keyed map for the differentiator's reinsertion detection.
//!
//! A general-purpose hash map buys average-case guarantees with hashing,
//! buckets, and allocation — all wasted on the dozen-or-so entries the
//! differentiator tracks per sibling list. `TinyMap` is the degenerate
//! alternative: a small-size-optimized vector of `(Tag, V)` pairs,
//! linear-scanned on lookup, tombstoned on erase. Insertion is a plain
//! push, which is exactly the hot path when a batch of views appears on
//! screen for the first time.

use smallvec::SmallVec;

use crate::id::Tag;

/// Inline capacity; sibling lists rarely exceed this, so the common case
/// never touches the heap.
const INLINE_ENTRIES: usize = 16;

/// Stable handle to an entry, returned by [`TinyMap::find`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Slot(usize);

/// Small tag-keyed associative container with tombstone-on-erase.
///
/// `Tag(0)` is reserved as the tombstone: erasing writes the sentinel over
/// the key in place and compaction never happens. Callers must never insert
/// the sentinel, and insertion does not check key uniqueness — the
/// differentiator guarantees it by construction, since every key is a
/// distinct sibling tag.
#[derive(Debug)]
pub(crate) struct TinyMap<V> {
    entries: SmallVec<[(Tag, V); INLINE_ENTRIES]>,
}

impl<V> TinyMap<V> {
    pub(crate) fn new() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    /// Appends an entry unconditionally.
    ///
    /// # Panics
    ///
    /// Panics if `key` is the reserved zero sentinel.
    pub(crate) fn insert(&mut self, key: Tag, value: V) {
        assert!(
            !key.is_sentinel(),
            "TinyMap cannot store the zero sentinel tag"
        );
        self.entries.push((key, value));
    }

    /// Linear-scan lookup. Tombstoned entries never match, since `key` is
    /// never the sentinel.
    pub(crate) fn find(&self, key: Tag) -> Option<Slot> {
        debug_assert!(!key.is_sentinel());
        self.entries
            .iter()
            .position(|(entry_key, _)| *entry_key == key)
            .map(Slot)
    }

    /// The value behind a slot returned by [`find`](Self::find).
    pub(crate) fn get(&self, slot: Slot) -> &V {
        &self.entries[slot.0].1
    }

    /// Tombstones the entry in place; the slot is never reused.
    pub(crate) fn erase(&mut self, slot: Slot) {
        self.entries[slot.0].0 = Tag(0);
    }

    /// Iterates live entries in insertion order.
    #[cfg_attr(not(test), expect(dead_code, reason = "part of the container contract"))]
    pub(crate) fn iter(&self) -> impl Iterator<Item = (Tag, &V)> {
        self.entries
            .iter()
            .filter(|(key, _)| !key.is_sentinel())
            .map(|(key, value)| (*key, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_find() {
        let mut map = TinyMap::new();
        map.insert(Tag(3), "c");
        map.insert(Tag(1), "a");
        let slot = map.find(Tag(1)).unwrap();
        assert_eq!(*map.get(slot), "a");
        assert!(map.find(Tag(2)).is_none());
    }

    #[test]
    fn erase_tombstones_without_compacting() {
        let mut map = TinyMap::new();
        map.insert(Tag(1), "a");
        map.insert(Tag(2), "b");
        let slot = map.find(Tag(1)).unwrap();
        map.erase(slot);

        assert!(map.find(Tag(1)).is_none());
        // Entries after the tombstone keep their identity.
        let remaining = map.find(Tag(2)).unwrap();
        assert_eq!(*map.get(remaining), "b");
    }

    #[test]
    fn iter_skips_tombstones() {
        let mut map = TinyMap::new();
        map.insert(Tag(1), 10);
        map.insert(Tag(2), 20);
        map.insert(Tag(3), 30);
        let slot = map.find(Tag(2)).unwrap();
        map.erase(slot);

        let live: Vec<_> = map.iter().map(|(key, value)| (key, *value)).collect();
        assert_eq!(live, vec![(Tag(1), 10), (Tag(3), 30)]);
    }

    #[test]
    fn grows_past_inline_capacity() {
        let mut map = TinyMap::new();
        for tag in 1..=40 {
            map.insert(Tag(tag), tag);
        }
        let slot = map.find(Tag(40)).unwrap();
        assert_eq!(*map.get(slot), 40);
    }

    #[test]
    #[should_panic(expected = "zero sentinel")]
    fn sentinel_key_is_rejected() {
        let mut map = TinyMap::new();
        map.insert(Tag(0), ());
    }
}
