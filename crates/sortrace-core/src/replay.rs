//! Trace replay
//!
//! - [`Replay`]: fallible engine that applies a trace to an initial buffer
//!   and checks every event against the reconstructed state
//! - [`ReplayConfig`]: toggles for the optional snapshot comparison
//!
//! **Design choice (current)**:
//! Only `(index, op, value)` drive the reconstruction. Snapshots are compared
//! against the replayed state when `check_snapshots` is set (the default);
//! with it cleared, a consumer that stores diffs instead of full copies
//! reconstructs the same trajectory.

use crate::{AccessEvent, AccessOp, Value};
use anyhow::{ensure, Context, Result};

/// Optional knobs for replay.
#[derive(Debug, Clone, Copy)]
pub struct ReplayConfig {
    /// Compare each event's snapshot with the replayed buffer.
    pub check_snapshots: bool,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            check_snapshots: true,
        }
    }
}

/// Fallible replay engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct Replay {
    /// Configuration toggles for replay behavior.
    pub cfg: ReplayConfig,
}

impl Replay {
    /// Construct a default replay engine (snapshots checked).
    #[must_use]
    pub fn new() -> Self {
        Self {
            cfg: ReplayConfig::default(),
        }
    }

    /// Construct a replay engine with an explicit configuration.
    #[must_use]
    pub const fn with_config(cfg: ReplayConfig) -> Self {
        Self { cfg }
    }

    /// Apply `events` to `initial` and return the final buffer.
    ///
    /// We:
    ///   - reject indices outside the buffer,
    ///   - require a `Get` to report the value currently at its index,
    ///   - apply each `Set` to the working buffer,
    ///   - compare snapshots with the working buffer if configured.
    ///
    /// # Errors
    /// Returns an error naming the first inconsistent event.
    pub fn replay(&self, initial: &[Value], events: &[AccessEvent]) -> Result<Vec<Value>> {
        let mut cur = initial.to_vec();
        for (n, ev) in events.iter().enumerate() {
            self.step(&mut cur, n, ev)?;
        }
        Ok(cur)
    }

    /// Like [`Replay::replay`], but returns the buffer after every event.
    ///
    /// `trajectory[k]` is the state after event `k`; its length equals
    /// `events.len()`.
    pub fn trajectory(
        &self,
        initial: &[Value],
        events: &[AccessEvent],
    ) -> Result<Vec<Vec<Value>>> {
        let mut cur = initial.to_vec();
        let mut out = Vec::with_capacity(events.len());
        for (n, ev) in events.iter().enumerate() {
            self.step(&mut cur, n, ev)?;
            out.push(cur.clone());
        }
        Ok(out)
    }

    fn step(&self, cur: &mut [Value], n: usize, ev: &AccessEvent) -> Result<()> {
        let len = cur.len();
        let slot = cur.get_mut(ev.index).with_context(|| {
            format!(
                "event {n}: index {} out of range for length {len}",
                ev.index
            )
        })?;

        match ev.op {
            AccessOp::Get => {
                ensure!(
                    same_value(*slot, ev.value),
                    "event {n}: get[{}] reported {} but buffer holds {}",
                    ev.index,
                    ev.value,
                    *slot
                );
            }
            AccessOp::Set => *slot = ev.value,
        }

        if self.cfg.check_snapshots {
            ensure!(
                ev.snapshot.len() == len,
                "event {n}: snapshot length {} != buffer length {len}",
                ev.snapshot.len()
            );
            let diverged = ev
                .snapshot
                .iter()
                .zip(cur.iter())
                .position(|(a, b)| !same_value(*a, *b));
            if let Some(pos) = diverged {
                anyhow::bail!(
                    "event {n}: snapshot diverges from replayed buffer at position {pos} ({} != {})",
                    ev.snapshot[pos],
                    cur[pos]
                );
            }
        }
        Ok(())
    }
}

/// Bitwise-aware equality so NaN payloads recorded in a trace replay cleanly.
#[inline]
fn same_value(a: Value, b: Value) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}
