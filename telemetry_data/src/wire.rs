// Copyright 2026 the Telemetry Data Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wire record shapes.
//!
//! These mirror the records of the shared telemetry protocol definition. Encoding and transport
//! live elsewhere; this crate only stores records in shared backing arrays and hands out typed
//! views over them (see [`crate::arena`]).

use alloc::string::String;
use core::fmt;

/// A time specified as UNIX epoch time in nanoseconds since 00:00:00 UTC on 1 January 1970.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct TimestampUnixNano(pub u64);

/// Discriminant of an attribute value.
///
/// Numerically equal to the protocol's value type tag.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ValueType {
    /// UTF-8 string.
    #[default]
    String = 0,
    /// Signed 64-bit integer.
    Int = 1,
    /// 64-bit float.
    Double = 2,
    /// Boolean.
    Bool = 3,
}

impl ValueType {
    /// Returns the protocol tag.
    #[must_use]
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Decodes a protocol tag, returning `None` for unknown tags.
    #[must_use]
    pub const fn from_i32(tag: i32) -> Option<Self> {
        match tag {
            0 => Some(Self::String),
            1 => Some(Self::Int),
            2 => Some(Self::Double),
            3 => Some(Self::Bool),
            _ => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "STRING",
            Self::Int => "INT",
            Self::Double => "DOUBLE",
            Self::Bool => "BOOL",
        };
        f.write_str(name)
    }
}

/// Value record: a discriminant plus one payload field per value type.
///
/// Only the payload matching `value_type` is meaningful. The others keep whatever they last held.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnyValueRecord {
    /// Current discriminant.
    pub value_type: ValueType,
    /// Payload for [`ValueType::String`].
    pub string_value: String,
    /// Payload for [`ValueType::Int`].
    pub int_value: i64,
    /// Payload for [`ValueType::Double`].
    pub double_value: f64,
    /// Payload for [`ValueType::Bool`].
    pub bool_value: bool,
}

/// Key/value record of two strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct StringKeyValueRecord {
    /// Key.
    pub key: String,
    /// Value.
    pub value: String,
}

/// Instrumentation library record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct InstrumentationLibraryRecord {
    /// Library name.
    pub name: String,
    /// Library version.
    pub version: String,
}
