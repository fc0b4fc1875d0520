// Copyright 2026 the Telemetry Data Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::string::String;

use telemetry_data::TraceEvent;

/// Optional label formatter for profiling messages.
///
/// Return `None` to fall back to the default label.
pub trait LabelFormatter {
    /// Format a label for `event`.
    fn label(&mut self, _event: &TraceEvent<'_>) -> Option<String> {
        None
    }
}

/// Default formatter that keeps the built-in labels.
#[derive(Default, Debug)]
pub struct DefaultLabelFormatter;

impl LabelFormatter for DefaultLabelFormatter {}

/// Formatter that prefixes the default label with a map name.
///
/// Useful when several maps report to the same profiler session.
#[derive(Clone, Debug)]
pub struct MapNameFormatter {
    name: String,
}

impl MapNameFormatter {
    /// Creates a formatter for the map called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl LabelFormatter for MapNameFormatter {
    fn label(&mut self, event: &TraceEvent<'_>) -> Option<String> {
        Some(format!("{}: {}", self.name, default_label(event)))
    }
}

// Values are left out; they can be large and are rarely useful on a timeline.
pub(crate) fn default_label(event: &TraceEvent<'_>) -> String {
    match *event {
        TraceEvent::Insert { key, index, .. } => {
            format!("string_map.insert key={key} index={index}")
        }
        TraceEvent::Update { key, index, .. } => {
            format!("string_map.update key={key} index={index}")
        }
        TraceEvent::Delete {
            key,
            index,
            moved_from: Some(from),
        } => format!("string_map.delete key={key} index={index} moved_from={from}"),
        TraceEvent::Delete {
            key,
            index,
            moved_from: None,
        } => format!("string_map.delete key={key} index={index}"),
        TraceEvent::Sort { len } => format!("string_map.sort len={len}"),
    }
}
