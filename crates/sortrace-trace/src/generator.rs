// crates/sortrace-trace/src/generator.rs

//! Seeded input generator used by the CLI `run` subcommand and the bench
//! harness. Produces `n` evenly spaced values over `[lo, hi]`, rounded to
//! whole numbers, in a seed-determined random order.

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

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use sortrace_core::Value;

/// `n` evenly spaced values over `[lo, hi]` (both ends included), rounded
/// half-to-even.
///
/// `n == 0` yields `[]`; `n == 1` yields `[lo]`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn linspace_rounded(n: usize, lo: Value, hi: Value) -> Vec<Value> {
    match n {
        0 => Vec::new(),
        1 => vec![lo.round_ties_even()],
        _ => {
            let step = (hi - lo) / (n - 1) as Value;
            let mut out: Vec<Value> = (0..n)
                .map(|i| (i as Value).mul_add(step, lo).round_ties_even())
                .collect();
            // Pin the right end exactly, independent of accumulated error.
            out[n - 1] = hi.round_ties_even();
            out
        }
    }
}

/// [`linspace_rounded`] shuffled with a `StdRng` seeded from `seed`.
///
/// The same `(n, lo, hi, seed)` always yields the same order.
#[must_use]
pub fn shuffled_linspace(n: usize, lo: Value, hi: Value, seed: u64) -> Vec<Value> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut v = linspace_rounded(n, lo, hi);
    v.shuffle(&mut rng);
    v
}
