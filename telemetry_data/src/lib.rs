// Copyright 2026 the Telemetry Data Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed, aliasing handle views over telemetry metadata wire records.
//!
//! Pipeline code reads and mutates attribute values and string labels through small handles
//! instead of re-encoding the underlying records:
//!
//! - [`AttributeValue`]: one typed value slot (string, int, double or bool) in a shared
//!   [`ValueSlots`] array.
//! - [`Attributes`]: an [`AttributesMap`] plus a dropped-attribute count.
//! - [`StringMap`]: an ordered string key/value store over a shared [`KvSlots`] sequence.
//! - [`InstrumentationLibrary`]: name/version descriptor.
//!
//! ## Aliasing
//!
//! Handles are views. Cloning one copies a reference to the backing record, and every clone
//! observes every mutation immediately. Handles are single-threaded (`!Send`, `!Sync`).
//!
//! ```
//! use telemetry_data::StringMap;
//!
//! let labels = StringMap::new();
//! let view = labels.clone();
//! view.insert("host", "a");
//! labels.insert("host", "b"); // existing keys are never overwritten by insert
//! assert_eq!(labels.get("host").unwrap().value(), "a");
//! ```
//!
//! ## Features
//!
//! - `std`: enables `StringMap::from_std_map`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod arena;
pub mod config;
pub mod error;
pub mod library;
pub mod string_map;
pub mod trace;
pub mod value;
pub mod wire;

pub use arena::{KvSlots, ValueSlots};
pub use config::AccessPolicy;
pub use error::AccessError;
pub use library::InstrumentationLibrary;
pub use string_map::{StringKeyValue, StringMap};
pub use trace::{TraceEvent, TraceMask, TraceSink};
pub use value::{AttributeValue, Attributes, AttributesMap};
pub use wire::{TimestampUnixNano, ValueType};
