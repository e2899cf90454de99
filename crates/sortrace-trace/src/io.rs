// crates/sortrace-trace/src/io.rs

//! Reading and writing [`TraceFile`] envelopes.
//!
//! Two encodings are supported, picked by file extension:
//! - `.json`: pretty-printed, human-diffable. JSON has no NaN or infinity, so
//!   [`write_trace_json`] refuses traces holding non-finite values.
//! - `.cbor`: compact and lossless for every `f64`, including NaN.
//!
//! Both readers reject envelopes whose `version` is not [`TRACE_VERSION`].
//! Event-level consistency is left to `sortrace_core::Replay`.

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

use crate::format::{TraceFile, TRACE_VERSION};
use anyhow::{bail, ensure, Context, Result};
use sortrace_core::Value;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// On-disk encoding of a trace envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceEncoding {
    /// Pretty JSON (finite values only).
    Json,
    /// CBOR via `ciborium`.
    Cbor,
}

impl TraceEncoding {
    /// Encoding named by the path's extension (case-insensitive), if any.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else if ext.eq_ignore_ascii_case("cbor") {
            Some(Self::Cbor)
        } else {
            None
        }
    }
}

/// Read a JSON trace envelope.
///
/// # Errors
/// Open/decode failures and a `version` other than [`TRACE_VERSION`].
pub fn read_trace_json<P: AsRef<Path>>(path: P) -> Result<TraceFile> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open trace {}", path.display()))?;
    let tf: TraceFile = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("decode JSON trace {}", path.display()))?;
    check_version(&tf)?;
    Ok(tf)
}

/// Write a trace envelope as pretty JSON, creating parent directories.
///
/// # Errors
/// Fails before touching the filesystem if any buffer value is NaN or
/// infinite, since JSON would store it as `null` and the trace could not be
/// read back. Use [`write_trace_cbor`] for such traces.
pub fn write_trace_json<P: AsRef<Path>>(path: P, tf: &TraceFile) -> Result<()> {
    let path = path.as_ref();
    ensure_json_safe(tf)?;
    ensure_parent_dir(path)?;
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, tf).context("encode JSON trace")?;
    w.flush().context("flush JSON trace")?;
    Ok(())
}

/// Read a CBOR trace envelope.
///
/// # Errors
/// Open/decode failures and a `version` other than [`TRACE_VERSION`].
pub fn read_trace_cbor<P: AsRef<Path>>(path: P) -> Result<TraceFile> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open trace {}", path.display()))?;
    let tf: TraceFile = ciborium::de::from_reader(BufReader::new(f))
        .with_context(|| format!("decode CBOR trace {}", path.display()))?;
    check_version(&tf)?;
    Ok(tf)
}

/// Write a trace envelope as CBOR, creating parent directories.
///
/// # Errors
/// Filesystem and encoding failures.
pub fn write_trace_cbor<P: AsRef<Path>>(path: P, tf: &TraceFile) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(f);
    ciborium::ser::into_writer(tf, &mut w).context("encode CBOR trace")?;
    w.flush().context("flush CBOR trace")?;
    Ok(())
}

/// Read a trace, choosing the decoder from the extension.
///
/// # Errors
/// A missing or unrecognised extension, plus everything the chosen reader
/// reports.
pub fn read_trace_auto<P: AsRef<Path>>(path: P) -> Result<TraceFile> {
    let path = path.as_ref();
    match TraceEncoding::from_path(path) {
        Some(TraceEncoding::Json) => read_trace_json(path),
        Some(TraceEncoding::Cbor) => read_trace_cbor(path),
        None => bail!(
            "cannot tell trace encoding of {} (expected a .json or .cbor extension)",
            path.display()
        ),
    }
}

/// Write a trace, choosing the encoder from the extension. Anything that is
/// not `.cbor` is written as JSON.
///
/// # Errors
/// Everything the chosen writer reports.
pub fn write_trace_auto<P: AsRef<Path>>(path: P, tf: &TraceFile) -> Result<()> {
    let path = path.as_ref();
    match TraceEncoding::from_path(path) {
        Some(TraceEncoding::Cbor) => write_trace_cbor(path, tf),
        _ => write_trace_json(path, tf),
    }
}

/// Create the parent directory of `path` if it has one.
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
            .with_context(|| format!("create parent directory {}", dir.display())),
        _ => Ok(()),
    }
}

fn check_version(tf: &TraceFile) -> Result<()> {
    ensure!(
        tf.version == TRACE_VERSION,
        "unsupported trace version {} (this build reads version {TRACE_VERSION})",
        tf.version
    );
    Ok(())
}

/// Locate the first NaN/infinite value in the envelope, if any.
fn first_non_finite(tf: &TraceFile) -> Option<(String, Value)> {
    let bad = |xs: &[Value]| xs.iter().position(|v| !v.is_finite());

    if let Some(i) = bad(&tf.initial) {
        return Some((format!("initial[{i}]"), tf.initial[i]));
    }
    for (n, ev) in tf.events.iter().enumerate() {
        if !ev.value.is_finite() {
            return Some((format!("event {n} value"), ev.value));
        }
        if let Some(i) = bad(&ev.snapshot) {
            return Some((format!("event {n} snapshot[{i}]"), ev.snapshot[i]));
        }
    }
    None
}

fn ensure_json_safe(tf: &TraceFile) -> Result<()> {
    if let Some((at, v)) = first_non_finite(tf) {
        bail!("{at} is {v}, which JSON cannot represent; write the trace as .cbor instead");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortrace_core::{AccessEvent, AccessOp};

    fn nan_trace() -> TraceFile {
        let ev = AccessEvent {
            index: 1,
            op: AccessOp::Get,
            value: f64::NAN,
            snapshot: vec![1.0, f64::NAN],
        };
        TraceFile::from_run("Quick", vec![1.0, f64::NAN], vec![ev])
    }

    #[test]
    fn encoding_from_extension() {
        assert_eq!(
            TraceEncoding::from_path(Path::new("a/B.CBOR")),
            Some(TraceEncoding::Cbor)
        );
        assert_eq!(
            TraceEncoding::from_path(Path::new("t.Json")),
            Some(TraceEncoding::Json)
        );
        assert_eq!(TraceEncoding::from_path(Path::new("t.bin")), None);
        assert_eq!(TraceEncoding::from_path(Path::new("noext")), None);
    }

    #[test]
    fn read_rejects_unknown_extension() {
        let err = read_trace_auto("trace.bin").unwrap_err();
        assert!(err.to_string().contains("cannot tell trace encoding"), "{err}");
        assert!(read_trace_auto("trace").is_err());
    }

    #[test]
    fn json_write_rejects_non_finite_values() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("t.json");
        let err = write_trace_json(&p, &nan_trace()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("initial[1]"), "{msg}");
        assert!(msg.contains(".cbor"), "{msg}");
        assert!(!p.exists());

        let mut tf = TraceFile::from_run("Quick", vec![0.0], vec![]);
        tf.events.push(AccessEvent {
            index: 0,
            op: AccessOp::Set,
            value: f64::INFINITY,
            snapshot: vec![f64::INFINITY],
        });
        let err = write_trace_auto(&p, &tf).unwrap_err();
        assert!(err.to_string().contains("event 0 value"), "{err}");
    }

    #[test]
    fn cbor_keeps_non_finite_values() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("t.cbor");
        let tf = nan_trace();
        write_trace_auto(&p, &tf).unwrap();
        let back = read_trace_auto(&p).unwrap();
        assert_eq!(back.initial[0], 1.0);
        assert!(back.initial[1].is_nan());
        assert!(back.events[0].value.is_nan());
        assert!(back.events[0].snapshot[1].is_nan());
    }

    #[test]
    fn readers_reject_other_versions() {
        let dir = tempfile::tempdir().unwrap();
        let mut tf = TraceFile::from_run("Quick", vec![2.0, 1.0], vec![]);
        tf.version = TRACE_VERSION + 1;

        for name in ["v.json", "v.cbor"] {
            let p = dir.path().join(name);
            write_trace_auto(&p, &tf).unwrap();
            let err = read_trace_auto(&p).unwrap_err();
            assert!(err.to_string().contains("unsupported trace version"), "{name}: {err}");
        }
    }

    #[test]
    fn parent_dir_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("x/y/z.json");
        ensure_parent_dir(&p).unwrap();
        assert!(dir.path().join("x/y").is_dir());
        ensure_parent_dir(Path::new("bare.json")).unwrap();
    }
}
