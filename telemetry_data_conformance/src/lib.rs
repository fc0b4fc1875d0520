// Copyright 2026 the Telemetry Data Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conformance tests for `telemetry_data`.
//!
//! The tests live in `tests/`. This library only holds shared fixtures.

use telemetry_data::StringMap;

/// Builds a map by inserting `pairs` in order.
#[must_use]
pub fn map_of(pairs: &[(&str, &str)]) -> StringMap {
    let m = StringMap::new();
    for (k, v) in pairs {
        m.insert(k, v);
    }
    m
}

/// Returns the map's pairs as owned tuples, in current order.
#[must_use]
pub fn pairs_of(m: &StringMap) -> Vec<(String, String)> {
    m.iter()
        .map(|kv| (kv.key(), kv.value()))
        .collect()
}
