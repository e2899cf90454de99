// crates/sortrace-sort/src/iterative.rs

//! Quicksort driven by an explicit stack of inclusive `[lo, hi]` ranges.
//!
//! - Same Lomuto partition as [`Quicksort`](crate::Quicksort).
//! - After partitioning, the right range is pushed before the left one so
//!   the left subtree is fully processed first (pre-order, left-to-right),
//!   exactly like the recursive version. Traces are therefore identical.
//! - Live frames ≤ O(n) in the worst case, but on the heap instead of the
//!   call stack.

use sortrace_core::{InstrumentedSequence, SequenceError};

use crate::{quicksort::partition, SortAlgorithm};

/// Inclusive range still to be partitioned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Span {
    lo: usize,
    hi: usize,
}

/// Explicit-stack quicksort, last-element pivot.
#[derive(Clone, Copy, Debug, Default)]
pub struct IterativeQuicksort;

impl SortAlgorithm for IterativeQuicksort {
    const NAME: &'static str = "Quick (iterative)";

    fn sort(seq: &mut InstrumentedSequence) -> Result<(), SequenceError> {
        if seq.len() < 2 {
            return Ok(());
        }

        let mut st = vec![Span {
            lo: 0,
            hi: seq.len() - 1,
        }];

        while let Some(Span { lo, hi }) = st.pop() {
            if lo >= hi {
                continue;
            }
            let p = partition(seq, lo, hi)?;
            // LIFO: push right first so left pops next.
            st.push(Span { lo: p + 1, hi });
            if p > lo {
                st.push(Span { lo, hi: p - 1 });
            }
        }
        Ok(())
    }
}
