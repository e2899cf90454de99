// crates/sortrace-trace/src/format.rs

//! Versioned trace envelope written by the CLI and read by playback tools.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]

use serde::{Deserialize, Serialize};
use sortrace_core::{AccessEvent, Value};

/// Current envelope version.
pub const TRACE_VERSION: u16 = 1;

/// Trace envelope: the input buffer plus every access made while sorting it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TraceFile {
    /// Format/version tag for forward-compat.
    pub version: u16,
    /// Display name of the algorithm that produced the trace.
    pub algorithm: String,
    /// Buffer contents before the first event.
    pub initial: Vec<Value>,
    /// Events in chronological order.
    pub events: Vec<AccessEvent>,
    /// Optional metadata (seed, value range, timings…).
    pub meta: Option<serde_json::Value>,
}

impl TraceFile {
    /// Wrap a finished run.
    #[must_use]
    pub fn from_run(
        algorithm: impl Into<String>,
        initial: Vec<Value>,
        events: Vec<AccessEvent>,
    ) -> Self {
        Self {
            version: TRACE_VERSION,
            algorithm: algorithm.into(),
            initial,
            events,
            meta: None,
        }
    }

    /// Attach metadata.
    #[must_use]
    pub fn with_meta(mut self, meta: serde_json::Value) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Number of events.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the trace has no events.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Buffer after the last event (the initial buffer for an empty trace).
    #[must_use]
    pub fn final_state(&self) -> &[Value] {
        self.events
            .last()
            .map_or(self.initial.as_slice(), |ev| ev.snapshot.as_slice())
    }
}
