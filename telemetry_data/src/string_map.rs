// Copyright 2026 the Telemetry Data Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered string key/value store.
//!
//! [`StringMap`] layers map-like operations over an order-preserving [`KvSlots`] sequence. Lookups
//! are linear scans in current order, which is cheap for the handful of labels telemetry records
//! usually carry.
//!
//! ## Policy and invariants
//!
//! - **Insert never overwrites.** Inserting an existing key is a silent no-op; use
//!   [`StringMap::upsert`] to replace.
//! - **Update never inserts.** Updating a missing key is a silent no-op.
//! - **Insert, update and upsert preserve order.** New pairs are appended.
//! - **Delete disorders.** [`StringMap::delete`] swap-removes: the last pair moves into the
//!   vacated position. [`StringMap::sort`] is the matching canonicalization step; sort both sides
//!   before comparing stores with different mutation histories.
//! - **Views share.** Clones of a `StringMap`, and maps built over the same [`KvSlots`], all see
//!   every mutation, including length changes.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use core::cell::RefCell;
use core::fmt;

use hashbrown::HashMap;

use crate::arena::{KvBacking, KvEntry, KvSlots};
use crate::trace::{TraceEvent, TraceSink, emit};
use crate::wire::StringKeyValueRecord;

/// Aliasing handle to one key/value record.
///
/// The key is fixed at creation; the value can be replaced. Reordering the owning map does not
/// change which record a handle views.
#[derive(Clone)]
pub struct StringKeyValue {
    record: KvEntry,
}

impl StringKeyValue {
    /// Creates a standalone pair.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            record: Rc::new(RefCell::new(StringKeyValueRecord {
                key: key.into(),
                value: value.into(),
            })),
        }
    }

    /// Returns a copy of the key.
    #[must_use]
    pub fn key(&self) -> String {
        self.record.borrow().key.clone()
    }

    /// Returns a copy of the value.
    #[must_use]
    pub fn value(&self) -> String {
        self.record.borrow().value.clone()
    }

    /// Replaces the value in place.
    pub fn set_value(&self, v: &str) {
        let mut r = self.record.borrow_mut();
        r.value.clear();
        r.value.push_str(v);
    }

    /// Returns `true` if both handles view the same record.
    #[must_use]
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.record, &other.record)
    }
}

impl PartialEq for StringKeyValue {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.record.borrow() == *other.record.borrow()
    }
}

impl Eq for StringKeyValue {}

impl fmt::Debug for StringKeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.record.borrow();
        f.debug_struct("StringKeyValue")
            .field("key", &r.key)
            .field("value", &r.value)
            .finish()
    }
}

/// Ordered map of string keys to string values.
///
/// Cloning a `StringMap` yields another view of the same backing sequence.
#[derive(Clone, Default)]
pub struct StringMap {
    slots: KvSlots,
}

impl StringMap {
    /// Creates an empty map over a fresh sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a view over an existing sequence.
    #[must_use]
    pub fn from_slots(slots: KvSlots) -> Self {
        Self { slots }
    }

    /// Builds a map from an unordered source map.
    ///
    /// The resulting order is unspecified; [`sort`](Self::sort) before comparing.
    #[must_use]
    pub fn from_map<S>(map: &HashMap<String, String, S>) -> Self {
        Self::from_pairs(map.iter())
    }

    /// Builds a map from a `std` map. See [`from_map`](Self::from_map).
    #[cfg(feature = "std")]
    #[must_use]
    pub fn from_std_map<S>(map: &std::collections::HashMap<String, String, S>) -> Self {
        Self::from_pairs(map.iter())
    }

    fn from_pairs<'a>(pairs: impl Iterator<Item = (&'a String, &'a String)>) -> Self {
        let entries = pairs
            .map(|(k, v)| {
                Rc::new(RefCell::new(StringKeyValueRecord {
                    key: k.clone(),
                    value: v.clone(),
                }))
            })
            .collect();
        Self::from_slots(KvSlots::from_entries(entries))
    }

    /// The backing sequence.
    #[must_use]
    #[inline]
    pub fn slots(&self) -> &KvSlots {
        &self.slots
    }

    /// Returns `true` if both views share a backing sequence.
    #[must_use]
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.slots.ptr_eq(&other.slots)
    }

    /// Attaches `sink` to the backing sequence, replacing any previous sink.
    ///
    /// The sink observes mutations made through every view of the sequence.
    pub fn set_trace_sink(&self, sink: Box<dyn TraceSink>) {
        self.slots.borrow_mut().sink = Some(sink);
    }

    /// Detaches and returns the current sink.
    pub fn take_trace_sink(&self) -> Option<Box<dyn TraceSink>> {
        self.slots.borrow_mut().sink.take()
    }

    /// Returns the first pair with `key`, in current order.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<StringKeyValue> {
        self.slots
            .borrow()
            .entries
            .iter()
            .find(|e| e.borrow().key == key)
            .map(|e| StringKeyValue {
                record: Rc::clone(e),
            })
    }

    /// Appends `key`/`value` unless `key` is already present.
    ///
    /// An existing value is left untouched.
    pub fn insert(&self, key: &str, value: &str) {
        if self.position(key).is_none() {
            self.push(key, value);
        }
    }

    /// Replaces the value for `key` in place. Does nothing if `key` is absent.
    pub fn update(&self, key: &str, value: &str) {
        if let Some(index) = self.position(key) {
            self.set_value_at(index, key, value);
        }
    }

    /// Replaces the value for `key`, or appends the pair if `key` is absent.
    pub fn upsert(&self, key: &str, value: &str) {
        match self.position(key) {
            Some(index) => self.set_value_at(index, key, value),
            None => self.push(key, value),
        }
    }

    /// Removes the pair with `key` and returns `true`, or returns `false` if absent.
    ///
    /// The last pair moves into the removed position, so remaining order is not preserved.
    pub fn delete(&self, key: &str) -> bool {
        let mut backing = self.slots.borrow_mut();
        let KvBacking { entries, sink } = &mut *backing;
        let Some(index) = entries.iter().position(|e| e.borrow().key == key) else {
            return false;
        };
        let last = entries.len() - 1;
        entries.swap_remove(index);
        emit(
            sink,
            &TraceEvent::Delete {
                key,
                index,
                moved_from: (index != last).then_some(last),
            },
        );
        true
    }

    /// Number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the map has no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the pair at `index` in current order.
    ///
    /// Mostly used to iterate with an index; see also [`iter`](Self::iter).
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[must_use]
    pub fn at(&self, index: usize) -> StringKeyValue {
        let backing = self.slots.borrow();
        let len = backing.entries.len();
        let Some(entry) = backing.entries.get(index) else {
            panic!("string map index out of range: index={index} len={len}");
        };
        StringKeyValue {
            record: Rc::clone(entry),
        }
    }

    /// Iterates pairs in current order.
    ///
    /// Iteration stops early if the map shrinks underneath it.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            map: self,
            index: 0,
        }
    }

    /// Stable-sorts the pairs by key, ascending, and returns `self` for chaining.
    ///
    /// Sorting two maps holding the same pairs yields element-wise equal sequences regardless of
    /// their insertion or deletion history.
    pub fn sort(&self) -> &Self {
        {
            let mut backing = self.slots.borrow_mut();
            let KvBacking { entries, sink } = &mut *backing;
            entries.sort_by(|a, b| a.borrow().key.cmp(&b.borrow().key));
            emit(sink, &TraceEvent::Sort { len: entries.len() });
        }
        self
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.slots
            .borrow()
            .entries
            .iter()
            .position(|e| e.borrow().key == key)
    }

    fn push(&self, key: &str, value: &str) {
        let mut backing = self.slots.borrow_mut();
        let KvBacking { entries, sink } = &mut *backing;
        entries.push(Rc::new(RefCell::new(StringKeyValueRecord {
            key: key.into(),
            value: value.into(),
        })));
        emit(
            sink,
            &TraceEvent::Insert {
                key,
                value,
                index: entries.len() - 1,
            },
        );
    }

    fn set_value_at(&self, index: usize, key: &str, value: &str) {
        let mut backing = self.slots.borrow_mut();
        let KvBacking { entries, sink } = &mut *backing;
        {
            let mut r = entries[index].borrow_mut();
            r.value.clear();
            r.value.push_str(value);
        }
        emit(sink, &TraceEvent::Update { key, value, index });
    }
}

/// Compares pairs element-wise in current order.
impl PartialEq for StringMap {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        let a = self.slots.borrow();
        let b = other.slots.borrow();
        a.entries.len() == b.entries.len()
            && a
                .entries
                .iter()
                .zip(b.entries.iter())
                .all(|(x, y)| *x.borrow() == *y.borrow())
    }
}

impl Eq for StringMap {}

impl fmt::Debug for StringMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let backing = self.slots.borrow();
        f.debug_map()
            .entries(backing.entries.iter().map(|e| {
                let r = e.borrow();
                (r.key.clone(), r.value.clone())
            }))
            .finish()
    }
}

impl<'a> IntoIterator for &'a StringMap {
    type Item = StringKeyValue;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Iterator over a [`StringMap`]'s pairs. See [`StringMap::iter`].
#[derive(Debug)]
pub struct Iter<'a> {
    map: &'a StringMap,
    index: usize,
}

impl Iterator for Iter<'_> {
    type Item = StringKeyValue;

    fn next(&mut self) -> Option<StringKeyValue> {
        let entry = {
            let backing = self.map.slots.borrow();
            Rc::clone(backing.entries.get(self.index)?)
        };
        self.index += 1;
        Some(StringKeyValue { record: entry })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{RecordedEvent, RecordingSink};
    use alloc::vec;
    use alloc::vec::Vec;

    fn keys(m: &StringMap) -> Vec<String> {
        m.iter().map(|kv| kv.key()).collect()
    }

    #[test]
    fn insert_does_not_overwrite() {
        let m = StringMap::new();
        m.insert("a", "1");
        m.insert("a", "2");
        let kv = m.get("a").unwrap();
        assert_eq!(kv.value(), "1");
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn upsert_overwrites_or_appends() {
        let m = StringMap::new();
        m.upsert("a", "1");
        m.upsert("a", "2");
        m.upsert("b", "3");
        assert_eq!(m.get("a").unwrap().value(), "2");
        assert_eq!(keys(&m), ["a", "b"]);
    }

    #[test]
    fn update_missing_key_is_noop() {
        let m = StringMap::new();
        m.update("a", "1");
        assert!(m.is_empty());
        m.insert("a", "1");
        m.update("a", "9");
        assert_eq!(m.get("a").unwrap().value(), "9");
    }

    #[test]
    fn get_returns_aliasing_pair() {
        let m = StringMap::new();
        m.insert("k", "v");
        let kv = m.get("k").unwrap();
        kv.set_value("w");
        assert_eq!(m.at(0).value(), "w");

        m.update("k", "x");
        assert_eq!(kv.value(), "x");
        assert!(m.get("missing").is_none());
    }

    #[test]
    fn value_can_be_written_back_to_itself() {
        let m = StringMap::new();
        m.insert("a", "1");
        let kv = m.get("a").unwrap();
        kv.set_value(&kv.value());
        m.upsert("a", &m.get("a").unwrap().value());
        m.update("a", &kv.value());
        assert_eq!(kv.value(), "1");
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn delete_swap_removes() {
        let m = StringMap::new();
        for k in ["a", "b", "c", "d"] {
            m.insert(k, k);
        }
        assert!(m.delete("b"));
        assert_eq!(keys(&m), ["a", "d", "c"]);
        assert!(m.get("b").is_none());

        assert!(!m.delete("b"));
        assert_eq!(m.len(), 3);

        // Deleting the last pair moves nothing.
        assert!(m.delete("c"));
        assert_eq!(keys(&m), ["a", "d"]);
    }

    #[test]
    fn sort_is_stable_and_chainable() {
        let m = StringMap::new();
        for k in ["c", "a", "b"] {
            m.insert(k, "v");
        }
        let held = m.get("c").unwrap();
        assert_eq!(keys(m.sort()), ["a", "b", "c"]);
        assert!(held.ptr_eq(&m.at(2)));
    }

    #[test]
    fn sorted_maps_compare_equal() {
        let a = StringMap::new();
        let b = StringMap::new();
        a.insert("x", "1");
        a.insert("y", "2");
        b.insert("y", "2");
        b.insert("x", "1");
        assert_ne!(a, b);
        assert_eq!(a.sort(), b.sort());
    }

    #[test]
    fn from_map_copies_all_pairs() {
        let mut src = HashMap::new();
        src.insert(String::from("k1"), String::from("v1"));
        src.insert(String::from("k2"), String::from("v2"));
        let m = StringMap::from_map(&src);
        assert_eq!(m.len(), 2);
        assert_eq!(keys(m.sort()), ["k1", "k2"]);

        let empty: HashMap<String, String> = HashMap::new();
        assert!(StringMap::from_map(&empty).is_empty());
    }

    #[test]
    fn clones_share_sequence() {
        let a = StringMap::new();
        let b = a.clone();
        a.insert("k", "v");
        assert_eq!(b.len(), 1);
        assert!(b.delete("k"));
        assert!(a.is_empty());
    }

    #[test]
    #[should_panic(expected = "string map index out of range")]
    fn at_out_of_range_panics() {
        let m = StringMap::new();
        m.insert("a", "1");
        let _ = m.at(1);
    }

    #[test]
    fn iter_stops_when_map_shrinks() {
        let m = StringMap::new();
        m.insert("a", "1");
        m.insert("b", "2");
        let mut it = m.iter();
        assert!(it.next().is_some());
        m.delete("b");
        assert!(it.next().is_none());
    }

    #[test]
    fn trace_sink_sees_mutations_from_every_view() {
        let rec = RecordingSink::new();
        let a = StringMap::new();
        let b = a.clone();
        a.set_trace_sink(Box::new(rec.clone()));

        a.insert("a", "1");
        b.insert("a", "ignored");
        b.upsert("b", "2");
        a.update("a", "3");
        a.update("zz", "nope");
        b.delete("a");
        a.sort();

        assert_eq!(
            rec.events(),
            vec![
                RecordedEvent::Insert {
                    key: "a".into(),
                    value: "1".into(),
                    index: 0,
                },
                RecordedEvent::Insert {
                    key: "b".into(),
                    value: "2".into(),
                    index: 1,
                },
                RecordedEvent::Update {
                    key: "a".into(),
                    value: "3".into(),
                    index: 0,
                },
                RecordedEvent::Delete {
                    key: "a".into(),
                    index: 0,
                    moved_from: Some(1),
                },
                RecordedEvent::Sort { len: 1 },
            ]
        );

        assert!(a.take_trace_sink().is_some());
        a.insert("c", "4");
        assert_eq!(rec.events().len(), 5);
    }
}
