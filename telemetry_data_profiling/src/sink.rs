// Copyright 2026 the Telemetry Data Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::label::{DefaultLabelFormatter, LabelFormatter, default_label};
use telemetry_data::{TraceEvent, TraceMask, TraceSink};

/// A `TraceSink` that emits Tracy messages via `tracy-client`.
///
/// Events are dropped when no Tracy client is running.
pub struct ProfilingTraceSink<F = DefaultLabelFormatter> {
    formatter: F,
    mask: TraceMask,
    emitted: u64,
}

impl ProfilingTraceSink<DefaultLabelFormatter> {
    /// Create a new sink with the built-in labels.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<F: LabelFormatter> ProfilingTraceSink<F> {
    /// Create a new sink with a custom label formatter.
    #[must_use]
    pub fn with_formatter(formatter: F) -> Self {
        Self {
            formatter,
            mask: TraceMask::ALL,
            emitted: 0,
        }
    }

    /// Restrict the sink to the event kinds in `mask`.
    #[must_use]
    pub fn with_mask(mut self, mask: TraceMask) -> Self {
        self.mask = mask;
        self
    }

    /// Number of messages handed to a running Tracy client.
    #[must_use]
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    fn emit(&mut self, event: &TraceEvent<'_>) {
        let Some(client) = tracy_client::Client::running() else {
            return;
        };
        let label = self
            .formatter
            .label(event)
            .unwrap_or_else(|| default_label(event));
        client.message(&label, 0);
        self.emitted += 1;
    }
}

impl<F: LabelFormatter> TraceSink for ProfilingTraceSink<F> {
    fn mask(&self) -> TraceMask {
        self.mask
    }

    fn event(&mut self, event: &TraceEvent<'_>) {
        self.emit(event);
    }
}

impl<F> Default for ProfilingTraceSink<F>
where
    F: LabelFormatter + Default,
{
    fn default() -> Self {
        Self::with_formatter(F::default())
    }
}

impl<F> std::fmt::Debug for ProfilingTraceSink<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfilingTraceSink")
            .field("mask", &self.mask)
            .field("emitted", &self.emitted)
            .finish_non_exhaustive()
    }
}
