// Copyright 2026 the Telemetry Data Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed attribute value handles.
//!
//! An [`AttributeValue`] is a small handle onto one [`AnyValueRecord`] slot in a shared
//! [`ValueSlots`] array. Handles are meant to be passed around by value (cloned), and a clone
//! aliases the same slot:
//!
//! ```
//! use telemetry_data::{AttributeValue, ValueType};
//!
//! fn make_int(v: AttributeValue) {
//!     v.set_int(234);
//! }
//!
//! let v = AttributeValue::new_string("a string");
//! make_int(v.clone());
//! assert_eq!(v.value_type(), ValueType::Int);
//! assert_eq!(v.int_val(), 234);
//! ```
//!
//! ## Typed getters
//!
//! Each record carries one payload field per type. Setters overwrite the discriminant and the
//! matching payload, leaving the other payloads as they were. Under the default
//! [`AccessPolicy::Lenient`] the plain getters return their payload field regardless of the
//! discriminant, so reading the wrong type yields a zero value or a stale payload. Check
//! [`AttributeValue::value_type`] first, use the `try_*` getters, or create the backing array with
//! [`AccessPolicy::Strict`] to turn mismatched reads into panics.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

use crate::arena::{ValueCell, ValueSlots};
use crate::config::AccessPolicy;
use crate::error::AccessError;
use crate::wire::{AnyValueRecord, ValueType};

/// Aliasing handle to one attribute value slot.
#[derive(Clone)]
pub struct AttributeValue {
    slots: ValueSlots,
    cell: ValueCell,
    index: usize,
}

impl AttributeValue {
    /// Creates a string value in a fresh slot.
    #[must_use]
    pub fn new_string(v: impl Into<String>) -> Self {
        Self::new_single(AnyValueRecord {
            value_type: ValueType::String,
            string_value: v.into(),
            ..AnyValueRecord::default()
        })
    }

    /// Creates an integer value in a fresh slot.
    #[must_use]
    pub fn new_int(v: i64) -> Self {
        Self::new_single(AnyValueRecord {
            value_type: ValueType::Int,
            int_value: v,
            ..AnyValueRecord::default()
        })
    }

    /// Creates a double value in a fresh slot.
    #[must_use]
    pub fn new_double(v: f64) -> Self {
        Self::new_single(AnyValueRecord {
            value_type: ValueType::Double,
            double_value: v,
            ..AnyValueRecord::default()
        })
    }

    /// Creates a boolean value in a fresh slot.
    #[must_use]
    pub fn new_bool(v: bool) -> Self {
        Self::new_single(AnyValueRecord {
            value_type: ValueType::Bool,
            bool_value: v,
            ..AnyValueRecord::default()
        })
    }

    /// Allocates `n` default slots in one backing array and returns one handle per slot.
    ///
    /// Slots are disjoint: mutating one handle never affects another. Each starts as an empty
    /// string.
    #[must_use]
    pub fn batch(n: usize) -> Vec<Self> {
        ValueSlots::new(n).handles().collect()
    }

    /// Views slot `index` of an existing array, or `None` if out of range.
    #[must_use]
    pub fn from_slots(slots: &ValueSlots, index: usize) -> Option<Self> {
        let cell = slots.cell(index)?;
        Some(Self::from_raw(slots.clone(), index, cell))
    }

    pub(crate) fn from_raw(slots: ValueSlots, index: usize, cell: ValueCell) -> Self {
        Self { slots, cell, index }
    }

    fn new_single(record: AnyValueRecord) -> Self {
        ValueSlots::new(0).alloc(record)
    }

    /// The backing array this handle points into.
    #[must_use]
    #[inline]
    pub fn slots(&self) -> &ValueSlots {
        &self.slots
    }

    /// Position of this handle's slot in its backing array.
    #[must_use]
    #[inline]
    pub fn slot_index(&self) -> usize {
        self.index
    }

    /// Returns `true` if both handles alias the same slot.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }

    /// Current discriminant.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        self.cell.borrow().value_type
    }

    /// Returns a copy of the string payload.
    #[must_use]
    pub fn string_val(&self) -> String {
        self.enforce_policy(ValueType::String);
        self.cell.borrow().string_value.clone()
    }

    /// Returns the integer payload.
    #[must_use]
    pub fn int_val(&self) -> i64 {
        self.enforce_policy(ValueType::Int);
        self.cell.borrow().int_value
    }

    /// Returns the double payload.
    #[must_use]
    pub fn double_val(&self) -> f64 {
        self.enforce_policy(ValueType::Double);
        self.cell.borrow().double_value
    }

    /// Returns the boolean payload.
    #[must_use]
    pub fn bool_val(&self) -> bool {
        self.enforce_policy(ValueType::Bool);
        self.cell.borrow().bool_value
    }

    /// Returns the string payload if the slot holds a string.
    pub fn try_string_val(&self) -> Result<String, AccessError> {
        self.check_type(ValueType::String)?;
        Ok(self.cell.borrow().string_value.clone())
    }

    /// Returns the integer payload if the slot holds an integer.
    pub fn try_int_val(&self) -> Result<i64, AccessError> {
        self.check_type(ValueType::Int)?;
        Ok(self.cell.borrow().int_value)
    }

    /// Returns the double payload if the slot holds a double.
    pub fn try_double_val(&self) -> Result<f64, AccessError> {
        self.check_type(ValueType::Double)?;
        Ok(self.cell.borrow().double_value)
    }

    /// Returns the boolean payload if the slot holds a boolean.
    pub fn try_bool_val(&self) -> Result<bool, AccessError> {
        self.check_type(ValueType::Bool)?;
        Ok(self.cell.borrow().bool_value)
    }

    /// Sets the slot to a string.
    pub fn set_string(&self, v: &str) {
        let mut r = self.cell.borrow_mut();
        r.value_type = ValueType::String;
        r.string_value.clear();
        r.string_value.push_str(v);
    }

    /// Sets the slot to an integer.
    pub fn set_int(&self, v: i64) {
        let mut r = self.cell.borrow_mut();
        r.value_type = ValueType::Int;
        r.int_value = v;
    }

    /// Sets the slot to a double.
    pub fn set_double(&self, v: f64) {
        let mut r = self.cell.borrow_mut();
        r.value_type = ValueType::Double;
        r.double_value = v;
    }

    /// Sets the slot to a boolean.
    pub fn set_bool(&self, v: bool) {
        let mut r = self.cell.borrow_mut();
        r.value_type = ValueType::Bool;
        r.bool_value = v;
    }

    fn check_type(&self, expected: ValueType) -> Result<(), AccessError> {
        let actual = self.value_type();
        if actual == expected {
            Ok(())
        } else {
            Err(AccessError::WrongType { expected, actual })
        }
    }

    fn enforce_policy(&self, expected: ValueType) {
        if self.slots.policy() == AccessPolicy::Strict
            && let Err(err) = self.check_type(expected)
        {
            panic!("{err}");
        }
    }
}

/// Compares the discriminant and the meaningful payload only; stale payloads are ignored.
impl PartialEq for AttributeValue {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        let a = self.cell.borrow();
        let b = other.cell.borrow();
        if a.value_type != b.value_type {
            return false;
        }
        match a.value_type {
            ValueType::String => a.string_value == b.string_value,
            ValueType::Int => a.int_value == b.int_value,
            ValueType::Double => a.double_value == b.double_value,
            ValueType::Bool => a.bool_value == b.bool_value,
        }
    }
}

impl fmt::Debug for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.cell.borrow();
        let mut d = f.debug_struct("AttributeValue");
        d.field("slot", &self.index);
        match r.value_type {
            ValueType::String => d.field("string", &r.string_value),
            ValueType::Int => d.field("int", &r.int_value),
            ValueType::Double => d.field("double", &r.double_value),
            ValueType::Bool => d.field("bool", &r.bool_value),
        };
        d.finish_non_exhaustive()
    }
}

/// Attribute names to values.
pub type AttributesMap = HashMap<String, AttributeValue>;

/// An attribute map paired with the number of attributes dropped upstream.
///
/// Typically used by translators to pass both around together. The two fields are independent;
/// `dropped_count` is informational.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attributes {
    attrs: AttributesMap,
    dropped_count: u32,
}

impl Attributes {
    /// Pairs `attrs` with `dropped_count`.
    #[must_use]
    pub fn new(attrs: AttributesMap, dropped_count: u32) -> Self {
        Self {
            attrs,
            dropped_count,
        }
    }

    /// The attribute map.
    #[must_use]
    #[inline]
    pub fn attrs(&self) -> &AttributesMap {
        &self.attrs
    }

    /// Number of attributes dropped upstream.
    #[must_use]
    #[inline]
    pub fn dropped_count(&self) -> u32 {
        self.dropped_count
    }

    /// Splits into the map and the dropped count.
    #[must_use]
    pub fn into_parts(self) -> (AttributesMap, u32) {
        (self.attrs, self.dropped_count)
    }
}
