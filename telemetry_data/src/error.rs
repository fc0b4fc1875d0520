// Copyright 2026 the Telemetry Data Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors for checked access.
//!
//! Most failure modes in this crate are programming errors and panic. The only recoverable
//! condition is a checked read against the wrong discriminant.

use core::fmt;

use crate::wire::ValueType;

/// A checked access error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AccessError {
    /// The slot holds a different value type than the one requested.
    WrongType {
        /// Type the caller asked for.
        expected: ValueType,
        /// Type the slot currently holds.
        actual: ValueType,
    },
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongType { expected, actual } => {
                write!(
                    f,
                    "attribute value type mismatch: expected {expected}, found {actual}"
                )
            }
        }
    }
}

impl core::error::Error for AccessError {}
