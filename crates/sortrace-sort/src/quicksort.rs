// crates/sortrace-sort/src/quicksort.rs

//! Recursive Lomuto quicksort.
//!
//! `quicksort(lo, hi)` works on the inclusive range `[lo, hi]`:
//! 1) `p = partition(lo, hi)`
//! 2) recurse on `[lo, p - 1]`, then on `[p + 1, hi]`
//!
//! Recursion depth is O(n) on adversarial input (e.g. already sorted, with a
//! last-element pivot). Use [`IterativeQuicksort`](crate::IterativeQuicksort)
//! when the call stack is a concern.

use sortrace_core::{InstrumentedSequence, SequenceError};

use crate::SortAlgorithm;

/// Recursive quicksort, last-element pivot.
#[derive(Clone, Copy, Debug, Default)]
pub struct Quicksort;

impl SortAlgorithm for Quicksort {
    const NAME: &'static str = "Quick";

    fn sort(seq: &mut InstrumentedSequence) -> Result<(), SequenceError> {
        if seq.len() < 2 {
            return Ok(());
        }
        let hi = seq.len() - 1;
        quicksort(seq, 0, hi)
    }
}

fn quicksort(seq: &mut InstrumentedSequence, lo: usize, hi: usize) -> Result<(), SequenceError> {
    if lo >= hi {
        return Ok(());
    }
    let p = partition(seq, lo, hi)?;
    // `p == lo` leaves an empty left side; skip it rather than underflow.
    if p > lo {
        quicksort(seq, lo, p - 1)?;
    }
    quicksort(seq, p + 1, hi)
}

/// Lomuto partition of `[lo, hi]` around the pivot `seq[hi]`.
///
/// Returns the pivot's final position `i`: afterwards every element in
/// `[lo, i)` is `< pivot` and every element in `(i, hi]` is `>= pivot`.
pub(crate) fn partition(
    seq: &mut InstrumentedSequence,
    lo: usize,
    hi: usize,
) -> Result<usize, SequenceError> {
    let pivot = seq.get(hi)?;
    let mut i = lo;
    for j in lo..hi {
        if seq.get(j)? < pivot {
            swap(seq, i, j)?;
            i += 1;
        }
    }
    swap(seq, i, hi)?;
    Ok(i)
}

/// Exchange two positions with two reads and two writes, even when `a == b`.
fn swap(seq: &mut InstrumentedSequence, a: usize, b: usize) -> Result<(), SequenceError> {
    let tmp = seq.get(a)?;
    let v = seq.get(b)?;
    seq.set(a, v)?;
    seq.set(b, tmp)
}
