// Copyright 2026 the Telemetry Data Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Instrumentation library descriptor.

use alloc::rc::Rc;
use alloc::string::String;
use core::cell::RefCell;

use crate::wire::InstrumentationLibraryRecord;

/// Aliasing handle to an instrumentation library's name and version.
#[derive(Clone, Debug, Default)]
pub struct InstrumentationLibrary {
    record: Rc<RefCell<InstrumentationLibraryRecord>>,
}

impl InstrumentationLibrary {
    /// Creates a descriptor backed by a fresh, empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing record.
    #[must_use]
    pub fn from_record(record: InstrumentationLibraryRecord) -> Self {
        Self {
            record: Rc::new(RefCell::new(record)),
        }
    }

    /// Returns a copy of the library name.
    #[must_use]
    pub fn name(&self) -> String {
        self.record.borrow().name.clone()
    }

    /// Sets the library name.
    pub fn set_name(&self, name: &str) {
        let mut r = self.record.borrow_mut();
        r.name.clear();
        r.name.push_str(name);
    }

    /// Returns a copy of the library version.
    #[must_use]
    pub fn version(&self) -> String {
        self.record.borrow().version.clone()
    }

    /// Sets the library version.
    pub fn set_version(&self, version: &str) {
        let mut r = self.record.borrow_mut();
        r.version.clear();
        r.version.push_str(version);
    }

    /// Copies the current record out.
    #[must_use]
    pub fn to_record(&self) -> InstrumentationLibraryRecord {
        self.record.borrow().clone()
    }
}
