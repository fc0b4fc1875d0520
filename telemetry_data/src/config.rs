// Copyright 2026 the Telemetry Data Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-backing-array configuration.

/// How typed getters behave when the requested type does not match the stored discriminant.
///
/// The policy is fixed when a [`ValueSlots`](crate::arena::ValueSlots) array is created and applies
/// to every handle into that array. Checked `try_*` getters ignore the policy and always report a
/// mismatch as an [`AccessError`](crate::error::AccessError).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum AccessPolicy {
    /// Return whatever the payload field holds, typically its zero value or a stale payload.
    ///
    /// Callers are expected to check [`value_type`](crate::value::AttributeValue::value_type)
    /// first.
    #[default]
    Lenient,
    /// Treat a mismatched read as a programming error and panic.
    Strict,
}

impl AccessPolicy {
    /// Returns `true` for [`AccessPolicy::Strict`].
    #[must_use]
    #[inline]
    pub const fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}
