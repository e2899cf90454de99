//! Canonical trace types used across the sortrace workspace.
//!
//! These live in `sortrace-core` and are re-exported at the crate root so
//! other crates can import via `sortrace_core::AccessEvent`, etc.
//!
//! The design aims to keep serialized forms conservative and portable (serde).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Element type of an instrumented buffer.
pub type Value = f64;

/// Kind of access recorded in a trace.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AccessOp {
    /// A read; never mutates the buffer.
    Get,
    /// A write of `value` at `index`.
    Set,
}

impl AccessOp {
    /// Returns `true` for [`AccessOp::Set`].
    #[inline]
    #[must_use]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Set)
    }

    /// Lowercase wire name (`"get"` / `"set"`).
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Set => "set",
        }
    }
}

impl fmt::Display for AccessOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded access.
///
/// `snapshot` is a full copy of the buffer taken right after the access
/// completed, so every event can be rendered on its own.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AccessEvent {
    /// Position accessed (`0 <= index < len`).
    pub index: usize,
    /// Read or write.
    pub op: AccessOp,
    /// Value read (for `Get`) or written (for `Set`).
    pub value: Value,
    /// Buffer state after the access.
    pub snapshot: Vec<Value>,
}

impl AccessEvent {
    /// Length of the buffer this event was captured from.
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.snapshot.len()
    }
}

impl fmt::Display for AccessEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}] = {}", self.op, self.index, self.value)
    }
}
