//! Errors surfaced by [`InstrumentedSequence`](crate::InstrumentedSequence) accesses.
//!
//! There is exactly one failure mode: an index outside `[0, len)`. A sorting
//! algorithm that produces one has a bounds defect, so callers propagate the
//! error unchanged instead of retrying.

use thiserror::Error;

/// Failure of a tracked access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// The requested position lies outside the buffer.
    #[error("index {index} out of range for sequence of length {len}")]
    IndexOutOfRange {
        /// Offending index.
        index: usize,
        /// Buffer length at the time of the access.
        len: usize,
    },
}
