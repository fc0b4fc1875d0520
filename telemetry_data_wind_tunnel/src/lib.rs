// Copyright 2026 the Telemetry Data Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `telemetry_data`. See `benches/`.
