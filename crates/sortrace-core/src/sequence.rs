//! Instrumented sequence: a fixed-length numeric buffer that records every
//! element access.
//!
//! Reads and writes go through explicit [`InstrumentedSequence::get`] and
//! [`InstrumentedSequence::set`] calls (there is no `Index`/`IndexMut` impl).
//! Each successful call appends one [`AccessEvent`] carrying a full copy of
//! the buffer, so callers written against `get`/`set` are traced without
//! knowing it.
//!
//! Invariants:
//! - `events().len()` equals the number of successful `get`/`set` calls since
//!   construction or the last [`reset`](InstrumentedSequence::reset);
//! - the buffer length never changes;
//! - failed (out-of-range) accesses leave both buffer and trace untouched.

use crate::{AccessEvent, AccessOp, SequenceError, Value};

/// Fixed-length buffer with an append-only access trace.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InstrumentedSequence {
    buf: Vec<Value>,
    trace: Vec<AccessEvent>,
}

impl InstrumentedSequence {
    /// Copy `initial` into a fresh buffer with an empty trace.
    #[must_use]
    pub fn new(initial: &[Value]) -> Self {
        Self {
            buf: initial.to_vec(),
            trace: Vec::new(),
        }
    }

    /// Read `buf[index]` and record a `Get` event.
    pub fn get(&mut self, index: usize) -> Result<Value, SequenceError> {
        let value = *self.buf.get(index).ok_or(SequenceError::IndexOutOfRange {
            index,
            len: self.buf.len(),
        })?;
        self.record(index, AccessOp::Get, value);
        Ok(value)
    }

    /// Write `buf[index] = value` and record a `Set` event.
    ///
    /// The snapshot is taken after the write.
    pub fn set(&mut self, index: usize, value: Value) -> Result<(), SequenceError> {
        let len = self.buf.len();
        let slot = self
            .buf
            .get_mut(index)
            .ok_or(SequenceError::IndexOutOfRange { index, len })?;
        *slot = value;
        self.record(index, AccessOp::Set, value);
        Ok(())
    }

    /// Buffer length. Not an access; nothing is recorded.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the buffer is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Drop the trace, keep the buffer.
    pub fn reset(&mut self) {
        self.trace.clear();
    }

    /// Recorded events in chronological order.
    #[inline]
    #[must_use]
    pub fn events(&self) -> &[AccessEvent] {
        &self.trace
    }

    /// Untracked view of the current buffer, for inspecting results.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Value] {
        &self.buf
    }

    /// `(index, op)` for every recorded event.
    #[must_use]
    pub fn activity(&self) -> Vec<(usize, AccessOp)> {
        self.trace.iter().map(|ev| (ev.index, ev.op)).collect()
    }

    /// `(index, op)` of event number `frame`, if recorded.
    #[must_use]
    pub fn activity_at(&self, frame: usize) -> Option<(usize, AccessOp)> {
        self.trace.get(frame).map(|ev| (ev.index, ev.op))
    }

    /// Consume the sequence, returning `(buffer, trace)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Value>, Vec<AccessEvent>) {
        (self.buf, self.trace)
    }

    fn record(&mut self, index: usize, op: AccessOp, value: Value) {
        self.trace.push(AccessEvent {
            index,
            op,
            value,
            snapshot: self.buf.clone(),
        });
    }
}
