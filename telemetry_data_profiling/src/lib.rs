// Copyright 2026 the Telemetry Data Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Profiling adapters for `telemetry_data` (currently Tracy).
//!
//! This crate is `std`-only and keeps `telemetry_data` itself free of profiling dependencies.
//! It receives map mutation events through [`telemetry_data::TraceSink`] and emits them as Tracy
//! messages, so label churn shows up on the profiler timeline next to the pipeline code causing it.
//!
//! ## Backend
//! This crate currently supports the Tracy backend via `tracy-client`.
//!
//! ## Example
//! ```ignore
//! use telemetry_data::StringMap;
//! use telemetry_data_profiling::{MapNameFormatter, ProfilingTraceSink};
//!
//! let labels = StringMap::new();
//! let sink = ProfilingTraceSink::with_formatter(MapNameFormatter::new("resource.labels"));
//! labels.set_trace_sink(Box::new(sink));
//! labels.insert("host.name", "db-1");
//! ```

mod label;
mod sink;

pub use label::{DefaultLabelFormatter, LabelFormatter, MapNameFormatter};
pub use sink::ProfilingTraceSink;
