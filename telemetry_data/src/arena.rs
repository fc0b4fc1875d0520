// Copyright 2026 the Telemetry Data Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared backing arrays for wire records.
//!
//! Handles in this crate are views: an [`AttributeValue`] is a reference to a [`ValueSlots`] array
//! plus a slot index, and a [`StringMap`](crate::string_map::StringMap) is a reference to a
//! [`KvSlots`] sequence. Cloning a handle clones the reference, never the record, so a mutation
//! through any clone is visible through all of them.
//!
//! Arrays are reference counted and released as a unit once the last handle is dropped. Slots are
//! never released individually.
//!
//! Borrows of a backing array or slot never outlive a single accessor call. Getters hand out owned
//! copies, so reading one slot while writing another (or the same one) is always allowed.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Ref, RefCell, RefMut};
use core::fmt;

use crate::config::AccessPolicy;
use crate::trace::TraceSink;
use crate::value::AttributeValue;
use crate::wire::{AnyValueRecord, StringKeyValueRecord};

pub(crate) type ValueCell = Rc<RefCell<AnyValueRecord>>;

/// Shared backing array of [`AnyValueRecord`]s.
///
/// Each slot has its own cell, so borrowing one slot never blocks another. The array only grows:
/// slots handed out by [`ValueSlots::alloc`] or [`AttributeValue::from_slots`] stay valid for the
/// lifetime of the array.
#[derive(Clone, Debug, Default)]
pub struct ValueSlots {
    cells: Rc<RefCell<Vec<ValueCell>>>,
    policy: AccessPolicy,
}

impl ValueSlots {
    /// Allocates `len` default records with [`AccessPolicy::Lenient`].
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self::with_policy(len, AccessPolicy::Lenient)
    }

    /// Allocates `len` default records with the given read policy.
    #[must_use]
    pub fn with_policy(len: usize, policy: AccessPolicy) -> Self {
        let mut records = Vec::with_capacity(len);
        records.resize_with(len, AnyValueRecord::default);
        Self::from_records(records, policy)
    }

    /// Wraps externally supplied records.
    #[must_use]
    pub fn from_records(records: Vec<AnyValueRecord>, policy: AccessPolicy) -> Self {
        let cells = records
            .into_iter()
            .map(|r| Rc::new(RefCell::new(r)))
            .collect();
        Self {
            cells: Rc::new(RefCell::new(cells)),
            policy,
        }
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.borrow().len()
    }

    /// Returns `true` if the array has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read policy applied by typed getters on handles into this array.
    #[must_use]
    #[inline]
    pub fn policy(&self) -> AccessPolicy {
        self.policy
    }

    /// Returns `true` if both refer to the same backing array.
    #[must_use]
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cells, &other.cells)
    }

    /// Appends `record` and returns a handle to its slot.
    pub fn alloc(&self, record: AnyValueRecord) -> AttributeValue {
        let cell = Rc::new(RefCell::new(record));
        let index = {
            let mut cells = self.cells.borrow_mut();
            cells.push(Rc::clone(&cell));
            cells.len() - 1
        };
        AttributeValue::from_raw(self.clone(), index, cell)
    }

    /// Returns a handle for every slot, in slot order.
    pub fn handles(&self) -> impl Iterator<Item = AttributeValue> + '_ {
        let cells: Vec<ValueCell> = self.cells.borrow().clone();
        cells
            .into_iter()
            .enumerate()
            .map(move |(index, cell)| AttributeValue::from_raw(self.clone(), index, cell))
    }

    /// Copies the current records out, e.g. for an encoder.
    #[must_use]
    pub fn to_records(&self) -> Vec<AnyValueRecord> {
        self.cells
            .borrow()
            .iter()
            .map(|c| c.borrow().clone())
            .collect()
    }

    pub(crate) fn cell(&self, index: usize) -> Option<ValueCell> {
        self.cells.borrow().get(index).cloned()
    }
}

pub(crate) type KvEntry = Rc<RefCell<StringKeyValueRecord>>;

#[derive(Default)]
pub(crate) struct KvBacking {
    pub(crate) entries: Vec<KvEntry>,
    pub(crate) sink: Option<Box<dyn TraceSink>>,
}

impl fmt::Debug for KvBacking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KvBacking")
            .field("len", &self.entries.len())
            .field("traced", &self.sink.is_some())
            .finish_non_exhaustive()
    }
}

/// Shared, ordered backing sequence of [`StringKeyValueRecord`]s.
///
/// The sequence holds one shared cell per record. Reordering the sequence (swap-remove, sort)
/// moves the cells, not the records, so a [`StringKeyValue`](crate::string_map::StringKeyValue)
/// obtained earlier keeps viewing the same record.
#[derive(Clone, Debug, Default)]
pub struct KvSlots {
    inner: Rc<RefCell<KvBacking>>,
}

impl KvSlots {
    /// Creates an empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps externally supplied records, keeping their order.
    #[must_use]
    pub fn from_records(records: Vec<StringKeyValueRecord>) -> Self {
        let entries = records
            .into_iter()
            .map(|r| Rc::new(RefCell::new(r)))
            .collect();
        Self::from_entries(entries)
    }

    pub(crate) fn from_entries(entries: Vec<KvEntry>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(KvBacking {
                entries,
                sink: None,
            })),
        }
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Returns `true` if the sequence is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if both refer to the same backing sequence.
    #[must_use]
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Copies the current records out in sequence order.
    #[must_use]
    pub fn to_records(&self) -> Vec<StringKeyValueRecord> {
        self.inner
            .borrow()
            .entries
            .iter()
            .map(|e| e.borrow().clone())
            .collect()
    }

    pub(crate) fn borrow(&self) -> Ref<'_, KvBacking> {
        self.inner.borrow()
    }

    pub(crate) fn borrow_mut(&self) -> RefMut<'_, KvBacking> {
        self.inner.borrow_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::ValueType;
    use alloc::vec;

    #[test]
    fn alloc_grows_and_keeps_earlier_slots() {
        let slots = ValueSlots::new(2);
        let v = slots.alloc(AnyValueRecord {
            value_type: ValueType::Int,
            int_value: 9,
            ..AnyValueRecord::default()
        });
        assert_eq!(slots.len(), 3);
        assert_eq!(v.slot_index(), 2);
        assert_eq!(v.int_val(), 9);
        assert_eq!(slots.to_records()[0], AnyValueRecord::default());
    }

    #[test]
    fn slots_borrow_independently() {
        let slots = ValueSlots::new(2);
        let first = slots.cell(0).unwrap();
        let _held = first.borrow();
        let second = AttributeValue::from_slots(&slots, 1).unwrap();
        second.set_string("written while slot 0 is borrowed");
        assert_eq!(second.string_val(), "written while slot 0 is borrowed");
    }

    #[test]
    fn handles_cover_every_slot() {
        let slots = ValueSlots::new(3);
        let idx: Vec<usize> = slots.handles().map(|h| h.slot_index()).collect();
        assert_eq!(idx, vec![0, 1, 2]);
    }

    #[test]
    fn clones_share_kv_sequence() {
        let a = KvSlots::from_records(vec![StringKeyValueRecord {
            key: "k".into(),
            value: "v".into(),
        }]);
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&KvSlots::new()));
        b.borrow_mut().entries.clear();
        assert!(a.is_empty());
    }
}
