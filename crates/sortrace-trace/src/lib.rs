//! Trace envelope, seeded input generation and trace I/O for sortrace.
//!
//! This crate provides four small building blocks around the core trace:
//!
//! - `format`: a minimal, versioned trace envelope (`TraceFile`).
//! - `generator`: a deterministic, seeded input generator.
//! - `io`: JSON/CBOR read/write helpers for `TraceFile`.
//! - `io_jsonl`: line-delimited streaming of individual `AccessEvent`s.
//!
//! We intentionally avoid broad re-exports so callers use stable paths like
//! `sortrace_trace::io::read_trace_auto`.

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

/// Versioned trace envelope.
pub mod format;
/// Seeded input generator (shuffled, rounded linspace).
pub mod generator;
/// JSON/CBOR I/O helpers for `TraceFile`.
pub mod io;
/// JSON Lines streaming of access events.
pub mod io_jsonl;
