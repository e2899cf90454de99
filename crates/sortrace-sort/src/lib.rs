// crates/sortrace-sort/src/lib.rs

//! Partition-sort engines over an [`InstrumentedSequence`].
//!
//! Engines touch the buffer only through `get`/`set`/`len`; every access is
//! therefore recorded by the sequence without the engine knowing about it.
//!
//! - [`Quicksort`]: recursive Lomuto quicksort, last-element pivot.
//! - [`IterativeQuicksort`]: the same partition and visiting order driven by
//!   an explicit range stack; its trace is identical to [`Quicksort`]'s.
//!
//! Both sort ascending with strict `<` against the pivot, so equal keys end up
//! right of the boundary and the sort is not stable.

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

use sortrace_core::{InstrumentedSequence, SequenceError};

/// Explicit-stack quicksort.
pub mod iterative;
/// Recursive quicksort and the shared Lomuto partition.
pub mod quicksort;

pub use iterative::IterativeQuicksort;
pub use quicksort::Quicksort;

/// Minimal in-place sorting API the rest of the system depends on.
///
/// Engines are typically used as type parameters, e.g.
/// `Quicksort::sort(&mut seq)` or `run::<IterativeQuicksort>(...)`.
///
/// ## Contracts implementors should uphold
/// - sort the full range `[0, seq.len())` ascending, in place;
/// - access elements only via `seq.get` / `seq.set`;
/// - never produce an out-of-range index. A returned
///   [`SequenceError::IndexOutOfRange`] is a bounds defect in the engine.
pub trait SortAlgorithm {
    /// Short display name, e.g. `"Quick"`.
    const NAME: &'static str;

    /// Sort `seq` in place.
    ///
    /// # Errors
    /// Propagates [`SequenceError`] from the first failing access.
    fn sort(seq: &mut InstrumentedSequence) -> Result<(), SequenceError>;
}

/// Sort with the default engine ([`Quicksort`]).
///
/// # Errors
/// See [`SortAlgorithm::sort`].
pub fn sort(seq: &mut InstrumentedSequence) -> Result<(), SequenceError> {
    Quicksort::sort(seq)
}
