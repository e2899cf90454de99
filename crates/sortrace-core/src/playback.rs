//! Renderer-neutral playback model.
//!
//! A trace maps one-to-one onto frames: frame `k` shows the bars of event
//! `k`'s snapshot with the accessed index highlighted as a read or a write.
//! Colors, timing and drawing are the renderer's business.

use crate::{AccessEvent, AccessOp, Value};

/// How the accessed bar should be highlighted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Highlight {
    /// The bar was read.
    Read,
    /// The bar was written.
    Write,
}

impl From<AccessOp> for Highlight {
    #[inline]
    fn from(op: AccessOp) -> Self {
        match op {
            AccessOp::Get => Self::Read,
            AccessOp::Set => Self::Write,
        }
    }
}

/// The highlighted bar of a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Focus {
    /// Bar position.
    pub index: usize,
    /// Highlight kind.
    pub kind: Highlight,
}

/// One playback frame borrowed from a trace.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame<'a> {
    /// Zero-based frame number (= number of accesses before this one).
    pub number: usize,
    /// Bar heights.
    pub bars: &'a [Value],
    /// Highlighted bar.
    pub focus: Focus,
}

impl Frame<'_> {
    /// Overlay caption, e.g. `" Accesses = 12"`.
    #[must_use]
    pub fn caption(&self) -> String {
        format!(" Accesses = {}", self.number)
    }
}

/// Frames for `events`, in order. Pure; borrows the trace.
pub fn frames(events: &[AccessEvent]) -> impl ExactSizeIterator<Item = Frame<'_>> + '_ {
    events.iter().enumerate().map(|(number, ev)| Frame {
        number,
        bars: &ev.snapshot,
        focus: Focus {
            index: ev.index,
            kind: ev.op.into(),
        },
    })
}
