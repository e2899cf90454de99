//! JSON Lines (NDJSON) helpers for streaming `AccessEvent` I/O.
//!
//! Traces carry a full snapshot per event, so they grow fast; these helpers
//! let consumers handle one event at a time. Each line is a single JSON object.
//!
//! - **Reader**: returns an iterator that *owns* its underlying reader,
//!   yielding `Result<AccessEvent>` so callers can surface per-line errors.
//! - **Writer**: streams each event straight into a buffered file.
//!
//! # Formats
//! We treat both `.jsonl` and `.ndjson` as equivalent line-delimited JSON.

use crate::io::ensure_parent_dir;
use anyhow::{Context, Result};
use sortrace_core::AccessEvent;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Owning JSONL iterator over `AccessEvent`.
///
/// Holds the file and buffered reader internally to avoid lifetime pitfalls
/// of returning a borrowed `Lines<'_>` iterator.
pub struct JsonlEventIter {
    rdr: BufReader<File>,
    buf: String,
    line_no: usize,
}

impl JsonlEventIter {
    fn new(file: File) -> Self {
        Self {
            rdr: BufReader::new(file),
            buf: String::with_capacity(8 << 10),
            line_no: 0,
        }
    }
}

impl Iterator for JsonlEventIter {
    type Item = Result<AccessEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.rdr.read_line(&mut self.buf) {
            Ok(0) => None, // EOF
            Ok(_) => {
                self.line_no += 1;
                // Trim a single trailing '\n' or '\r\n'
                if self.buf.ends_with('\n') {
                    self.buf.pop();
                    if self.buf.ends_with('\r') {
                        self.buf.pop();
                    }
                }
                if self.buf.is_empty() {
                    return Some(Err(anyhow::anyhow!(
                        "parse jsonl line {}: empty line",
                        self.line_no
                    )));
                }
                let parsed: Result<AccessEvent> = serde_json::from_str(&self.buf)
                    .with_context(|| format!("parse jsonl line {}", self.line_no));
                Some(parsed)
            }
            Err(e) => Some(Err(e).with_context(|| format!("read line {}", self.line_no + 1))),
        }
    }
}

/// Stream read: one JSON object per line → yields `AccessEvent` items.
///
/// # Errors
/// Opening the file may fail. Individual iteration items may be `Err` if a
/// particular line is malformed.
pub fn stream_events_jsonl<P: AsRef<Path>>(path: P) -> Result<JsonlEventIter> {
    let f = File::open(path.as_ref())
        .with_context(|| format!("open {}", path.as_ref().display()))?;
    Ok(JsonlEventIter::new(f))
}

/// Write events as JSON Lines, one object per line, creating parent
/// directories. Returns the number of events written.
///
/// # Errors
/// Filesystem and encoding failures. Non-finite values are written as `null`
/// and will not read back; keep such traces in CBOR.
pub fn write_events_jsonl<P: AsRef<Path>>(path: P, events: &[AccessEvent]) -> Result<usize> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(f);
    for (n, ev) in events.iter().enumerate() {
        serde_json::to_writer(&mut w, ev).with_context(|| format!("encode event {n}"))?;
        w.write_all(b"\n").context("write newline")?;
    }
    w.flush().context("flush JSONL writer")?;
    Ok(events.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortrace_core::AccessOp;

    #[test]
    fn jsonl_iterator_streams_and_reports_line() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("events.jsonl");
        {
            let mut f = File::create(&p).unwrap();
            writeln!(f, r#"{{"index":2,"op":"get","value":2.0,"snapshot":[3.0,1.0,2.0]}}"#).unwrap();
            writeln!(f, r#"{{"index":0,"op":"set","value":1.0,"snapshot":[1.0,1.0,2.0]}}"#).unwrap();
            writeln!(f, r#"{{"index":0,"op":"swap"}}"#).unwrap();
        }

        let items: Vec<_> = stream_events_jsonl(&p).unwrap().collect();
        assert_eq!(items.len(), 3);
        let first = items[0].as_ref().unwrap();
        assert_eq!(first.op, AccessOp::Get);
        assert_eq!(first.snapshot, vec![3.0, 1.0, 2.0]);
        assert_eq!(items[1].as_ref().unwrap().op, AccessOp::Set);
        let err = items[2].as_ref().unwrap_err();
        assert!(err.to_string().contains("line 3"), "{err}");
    }

    #[test]
    fn write_then_stream() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("events.ndjson");
        let ev = AccessEvent {
            index: 1,
            op: AccessOp::Set,
            value: 4.0,
            snapshot: vec![0.0, 4.0],
        };
        assert_eq!(write_events_jsonl(&p, &[ev.clone()]).unwrap(), 1);
        let back: Vec<_> = stream_events_jsonl(&p)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(back, vec![ev]);
    }

    #[test]
    fn writer_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("a/b/e.jsonl");
        assert_eq!(write_events_jsonl(&p, &[]).unwrap(), 0);
        assert!(p.is_file());
        assert_eq!(stream_events_jsonl(&p).unwrap().count(), 0);
    }
}
