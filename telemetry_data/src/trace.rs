// Copyright 2026 the Telemetry Data Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mutation tracing hooks for [`StringMap`](crate::string_map::StringMap).
//!
//! A [`TraceSink`] attached to a map's backing sequence receives one [`TraceEvent`] per mutation
//! whose kind is enabled in the sink's [`TraceMask`]. Because the sink lives with the backing
//! sequence, every view sharing that sequence reports through it.
//!
//! Events are delivered while the backing sequence is borrowed. Sinks must not call back into the
//! map that is tracing them.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::ops::BitOr;

/// Bitmask selecting which [`TraceEvent`] kinds a sink receives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TraceMask(u8);

impl TraceMask {
    /// No events.
    pub const NONE: Self = Self(0);
    /// [`TraceEvent::Insert`].
    pub const INSERT: Self = Self(1 << 0);
    /// [`TraceEvent::Update`].
    pub const UPDATE: Self = Self(1 << 1);
    /// [`TraceEvent::Delete`].
    pub const DELETE: Self = Self(1 << 2);
    /// [`TraceEvent::Sort`].
    pub const SORT: Self = Self(1 << 3);
    /// Every event kind.
    pub const ALL: Self = Self(Self::INSERT.0 | Self::UPDATE.0 | Self::DELETE.0 | Self::SORT.0);

    /// Returns `true` if this mask contains every bit in `other`.
    #[must_use]
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl BitOr for TraceMask {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// A single mutation of a map's backing sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceEvent<'a> {
    /// A new pair was appended.
    Insert {
        /// Key of the new pair.
        key: &'a str,
        /// Value of the new pair.
        value: &'a str,
        /// Position of the new pair.
        index: usize,
    },
    /// An existing pair's value was replaced in place.
    Update {
        /// Key of the pair.
        key: &'a str,
        /// New value.
        value: &'a str,
        /// Position of the pair.
        index: usize,
    },
    /// A pair was swap-removed.
    Delete {
        /// Key of the removed pair.
        key: &'a str,
        /// Position the removed pair occupied.
        index: usize,
        /// Previous position of the pair moved into `index`, if any.
        moved_from: Option<usize>,
    },
    /// The sequence was sorted by key.
    Sort {
        /// Number of pairs sorted.
        len: usize,
    },
}

impl TraceEvent<'_> {
    /// Returns the mask bit for this event's kind.
    #[must_use]
    #[inline]
    pub const fn mask(&self) -> TraceMask {
        match self {
            Self::Insert { .. } => TraceMask::INSERT,
            Self::Update { .. } => TraceMask::UPDATE,
            Self::Delete { .. } => TraceMask::DELETE,
            Self::Sort { .. } => TraceMask::SORT,
        }
    }
}

/// Receives map mutation events.
pub trait TraceSink {
    /// Event kinds this sink wants. Defaults to [`TraceMask::ALL`].
    fn mask(&self) -> TraceMask {
        TraceMask::ALL
    }

    /// Called once per enabled mutation.
    fn event(&mut self, event: &TraceEvent<'_>);
}

pub(crate) fn emit(sink: &mut Option<Box<dyn TraceSink>>, event: &TraceEvent<'_>) {
    if let Some(sink) = sink.as_mut()
        && sink.mask().contains(event.mask())
    {
        sink.event(event);
    }
}

/// Owned copy of a [`TraceEvent`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// See [`TraceEvent::Insert`].
    Insert {
        /// Key of the new pair.
        key: Box<str>,
        /// Value of the new pair.
        value: Box<str>,
        /// Position of the new pair.
        index: usize,
    },
    /// See [`TraceEvent::Update`].
    Update {
        /// Key of the pair.
        key: Box<str>,
        /// New value.
        value: Box<str>,
        /// Position of the pair.
        index: usize,
    },
    /// See [`TraceEvent::Delete`].
    Delete {
        /// Key of the removed pair.
        key: Box<str>,
        /// Position the removed pair occupied.
        index: usize,
        /// Previous position of the pair moved into `index`, if any.
        moved_from: Option<usize>,
    },
    /// See [`TraceEvent::Sort`].
    Sort {
        /// Number of pairs sorted.
        len: usize,
    },
}

impl From<&TraceEvent<'_>> for RecordedEvent {
    fn from(event: &TraceEvent<'_>) -> Self {
        match *event {
            TraceEvent::Insert { key, value, index } => Self::Insert {
                key: key.into(),
                value: value.into(),
                index,
            },
            TraceEvent::Update { key, value, index } => Self::Update {
                key: key.into(),
                value: value.into(),
                index,
            },
            TraceEvent::Delete {
                key,
                index,
                moved_from,
            } => Self::Delete {
                key: key.into(),
                index,
                moved_from,
            },
            TraceEvent::Sort { len } => Self::Sort { len },
        }
    }
}

/// A sink that keeps every event it receives.
///
/// Clones share the same event log, so a caller can keep one clone and hand another to
/// [`StringMap::set_trace_sink`](crate::string_map::StringMap::set_trace_sink).
#[derive(Clone, Debug)]
pub struct RecordingSink {
    mask: TraceMask,
    events: Rc<RefCell<Vec<RecordedEvent>>>,
}

impl RecordingSink {
    /// Creates a sink that records every event kind.
    #[must_use]
    pub fn new() -> Self {
        Self::with_mask(TraceMask::ALL)
    }

    /// Creates a sink that records only the kinds in `mask`.
    #[must_use]
    pub fn with_mask(mask: TraceMask) -> Self {
        Self {
            mask,
            events: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Returns a copy of the events recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.borrow().clone()
    }

    /// Discards recorded events.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceSink for RecordingSink {
    fn mask(&self) -> TraceMask {
        self.mask
    }

    fn event(&mut self, event: &TraceEvent<'_>) {
        self.events.borrow_mut().push(event.into());
    }
}
