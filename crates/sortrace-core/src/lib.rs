//! sortrace-core — instrumented sequence, access trace, replay and playback.
//!
//! This crate defines the **stable boundary** used across sortrace crates:
//! - canonical trace types (`AccessEvent`, `AccessOp`, `Value`),
//! - the [`InstrumentedSequence`] that records every `get`/`set` as an event,
//! - the trace [`Replay`] engine that rebuilds and checks the buffer trajectory, and
//! - a renderer-neutral playback model ([`playback::frames`]).
//!
//! ```
//! use sortrace_core::{AccessOp, InstrumentedSequence};
//!
//! let mut seq = InstrumentedSequence::new(&[3.0, 1.0, 2.0]);
//! let v = seq.get(2)?;
//! seq.set(0, v)?;
//! assert_eq!(seq.events().len(), 2);
//! assert_eq!(seq.events()[1].op, AccessOp::Set);
//! assert_eq!(seq.events()[1].snapshot, vec![2.0, 1.0, 2.0]);
//! # Ok::<(), sortrace_core::SequenceError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
// Small, explicit allowlist to keep docs readable and APIs ergonomic.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::doc_markdown
)]

/// Error type returned by sequence accesses.
pub mod error;
/// Renderer-neutral playback frames derived from a trace.
pub mod playback;
/// Trace replay: rebuild and check the buffer trajectory.
pub mod replay;
/// The instrumented, access-recording sequence.
pub mod sequence;
/// Canonical trace types shared across the workspace.
pub mod types;

// ---- Re-exports for workspace compatibility ----
pub use error::*;
pub use replay::*;
pub use sequence::*;
pub use types::*;

/// Commonly-used items for quick imports.
///
/// ```rust
/// use sortrace_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        error::SequenceError,
        playback::{frames, Focus, Frame, Highlight},
        sequence::InstrumentedSequence,
        types::*,
    };
}
