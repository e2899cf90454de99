// crates/sortrace-cli/src/main.rs

#![forbid(unsafe_code)]
#![deny(
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo
)]

use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use sortrace_core::{
    playback::{frames, Highlight},
    InstrumentedSequence, Replay, Value,
};
use sortrace_sort::{IterativeQuicksort, Quicksort, SortAlgorithm};
use sortrace_trace::{
    format::TraceFile,
    generator::shuffled_linspace,
    io::{read_trace_auto, write_trace_auto},
    io_jsonl::write_events_jsonl,
};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "sortrace",
    about = "Instrumented sorting with replayable access traces",
    long_about = "sortrace.\n\nSort a shuffled array through an access-recording sequence, then replay, inspect or export the resulting trace.",
    version = env!("CARGO_PKG_VERSION"),
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Generate a shuffled array, sort it and record every access.
    /// If --out ends with `.jsonl`, writes the events as NDJSON.
    Run {
        /// Array length N (default 200)
        #[arg(long)]
        n: Option<usize>,

        /// Shuffle seed (default 0)
        #[arg(long)]
        seed: Option<u64>,

        /// Smallest generated value (default 0)
        #[arg(long)]
        lo: Option<Value>,

        /// Largest generated value (default 1000)
        #[arg(long)]
        hi: Option<Value>,

        /// Sorting engine (default quick)
        #[arg(long, value_enum)]
        algorithm: Option<AlgorithmOpt>,

        /// TOML profile supplying defaults for the flags above
        #[arg(long)]
        profile: Option<PathBuf>,

        /// Output path for the trace (JSON/CBOR/JSONL)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Replay a trace from its initial buffer and check every event
    Replay {
        /// Input trace (JSON/CBOR)
        #[arg(long)]
        trace: PathBuf,
    },

    /// Print one line per playback frame
    Frames {
        /// Input trace (JSON/CBOR)
        #[arg(long)]
        trace: PathBuf,

        /// Stop after this many frames
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Convert a trace (JSON/CBOR) -> JSON Lines of access events
    ExportJsonl {
        /// Input trace path (JSON/CBOR)
        #[arg(long)]
        input: PathBuf,
        /// Output JSONL path
        #[arg(long)]
        output: PathBuf,
    },
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum AlgorithmOpt {
    /// Recursive Lomuto quicksort
    Quick,
    /// Explicit-stack Lomuto quicksort (same trace, no deep recursion)
    QuickIterative,
}

/// Defaults for `run`, read from a TOML profile. Flags win over the profile.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Profile {
    /// Array length
    n: Option<usize>,
    /// Shuffle seed
    seed: Option<u64>,
    /// Smallest generated value
    lo: Option<Value>,
    /// Largest generated value
    hi: Option<Value>,
    /// Sorting engine
    algorithm: Option<AlgorithmOpt>,
}

/// Fully resolved `run` settings.
#[derive(Debug, Clone, Copy)]
struct RunConfig {
    n: usize,
    seed: u64,
    lo: Value,
    hi: Value,
    algorithm: AlgorithmOpt,
}

impl RunConfig {
    /// The generated range must be finite and ordered.
    fn validate(&self) -> Result<()> {
        ensure!(
            self.lo.is_finite() && self.hi.is_finite(),
            "lo ({}) and hi ({}) must be finite",
            self.lo,
            self.hi
        );
        ensure!(
            self.lo <= self.hi,
            "lo ({}) must not exceed hi ({})",
            self.lo,
            self.hi
        );
        Ok(())
    }
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Run {
            n,
            seed,
            lo,
            hi,
            algorithm,
            profile,
            out,
        } => {
            let prof = match profile {
                Some(p) => read_profile(&p)?,
                None => Profile::default(),
            };
            let cfg = RunConfig {
                n: n.or(prof.n).unwrap_or(200),
                seed: seed.or(prof.seed).unwrap_or(0),
                lo: lo.or(prof.lo).unwrap_or(0.0),
                hi: hi.or(prof.hi).unwrap_or(1000.0),
                algorithm: algorithm.or(prof.algorithm).unwrap_or(AlgorithmOpt::Quick),
            };
            run(cfg, out.as_deref())
        }

        Cmd::Replay { trace } => replay(&trace),

        Cmd::Frames { trace, limit } => print_frames(&trace, limit),

        Cmd::ExportJsonl { input, output } => export_jsonl(&input, &output),
    }
}

/// Initialize tracing with an env-driven filter (default INFO).
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn read_profile(path: &Path) -> Result<Profile> {
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("read profile {}", path.display()))?;
    toml::from_str(&src).with_context(|| format!("parse profile toml {}", path.display()))
}

/// Sort `seq` with `A`, returning the engine name and wall time.
fn sort_timed<A: SortAlgorithm>(
    seq: &mut InstrumentedSequence,
) -> Result<(&'static str, Duration)> {
    let t0 = Instant::now();
    A::sort(seq).with_context(|| format!("{} sort hit a bounds defect", A::NAME))?;
    Ok((A::NAME, t0.elapsed()))
}

fn run(cfg: RunConfig, out: Option<&Path>) -> Result<()> {
    cfg.validate()?;

    info!(
        n = cfg.n,
        seed = cfg.seed,
        lo = cfg.lo,
        hi = cfg.hi,
        algorithm = ?cfg.algorithm,
        "generating input"
    );
    let initial = shuffled_linspace(cfg.n, cfg.lo, cfg.hi, cfg.seed);
    let mut seq = InstrumentedSequence::new(&initial);

    let (name, dt) = match cfg.algorithm {
        AlgorithmOpt::Quick => sort_timed::<Quicksort>(&mut seq)?,
        AlgorithmOpt::QuickIterative => sort_timed::<IterativeQuicksort>(&mut seq)?,
    };
    let ms = dt.as_secs_f64() * 1e3;

    println!("{name} Sort");
    println!("Array sorted in {ms:.1} ms");
    println!("Recorded {} accesses", seq.events().len());

    let Some(out) = out else {
        return Ok(());
    };

    let (_, events) = seq.into_parts();
    if is_jsonl(out) {
        let n = write_events_jsonl(out, &events)
            .with_context(|| format!("writing events to {}", out.display()))?;
        println!("Wrote {n} events → {}", out.display());
        return Ok(());
    }

    let tf = TraceFile::from_run(name, initial, events).with_meta(serde_json::json!({
        "n": cfg.n,
        "seed": cfg.seed,
        "lo": cfg.lo,
        "hi": cfg.hi,
        "sort_ms": ms,
    }));
    info!(out = %out.display(), events = tf.len(), "writing trace");
    write_trace_auto(out, &tf).with_context(|| format!("writing trace to {}", out.display()))?;
    println!("Wrote trace ({} events) → {}", tf.len(), out.display());
    Ok(())
}

fn replay(trace: &Path) -> Result<()> {
    info!(trace = %trace.display(), "replaying trace");
    let tf = read_trace_auto(trace).with_context(|| format!("reading trace {}", trace.display()))?;

    let out = Replay::new()
        .replay(&tf.initial, &tf.events)
        .with_context(|| format!("replaying {}", trace.display()))?;
    ensure!(
        out.as_slice() == tf.final_state(),
        "replayed buffer differs from the last recorded snapshot"
    );

    let sorted = out.windows(2).all(|w| w[0] <= w[1]);
    if !sorted {
        warn!(algorithm = %tf.algorithm, "replayed buffer is not sorted");
    }
    println!(
        "OK: {} events by {} replay to a {} buffer of length {}",
        tf.len(),
        tf.algorithm,
        if sorted { "sorted" } else { "UNSORTED" },
        out.len()
    );
    Ok(())
}

fn print_frames(trace: &Path, limit: Option<usize>) -> Result<()> {
    let tf = read_trace_auto(trace).with_context(|| format!("reading trace {}", trace.display()))?;
    let limit = limit.unwrap_or(usize::MAX);
    info!(trace = %trace.display(), frames = tf.len(), limit, "printing frames");

    for (frame, ev) in frames(&tf.events).zip(&tf.events).take(limit) {
        let kind = match frame.focus.kind {
            Highlight::Read => "read",
            Highlight::Write => "write",
        };
        println!(
            "{:<18} {kind:<5} [{}] = {}",
            frame.caption(),
            frame.focus.index,
            ev.value
        );
    }
    Ok(())
}

/// Convert a trace envelope into JSON Lines of its events.
fn export_jsonl(input: &Path, output: &Path) -> Result<()> {
    info!(infile = %input.display(), outfile = %output.display(), "export to jsonl");
    let tf = read_trace_auto(input).with_context(|| format!("reading trace {}", input.display()))?;
    let n = write_events_jsonl(output, &tf.events)
        .with_context(|| format!("writing events to {}", output.display()))?;
    println!("Exported {n} events → {}", output.display());
    Ok(())
}

fn is_jsonl(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("jsonl") || e.eq_ignore_ascii_case("ndjson"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_parses_partial_tables() -> Result<()> {
        let p: Profile = toml::from_str("n = 64\nalgorithm = \"quick-iterative\"\n")?;
        assert_eq!(p.n, Some(64));
        assert_eq!(p.algorithm, Some(AlgorithmOpt::QuickIterative));
        assert_eq!(p.seed, None);
        Ok(())
    }

    #[test]
    fn profile_rejects_unknown_keys() {
        assert!(toml::from_str::<Profile>("fps = 60\n").is_err());
    }

    fn cfg(lo: Value, hi: Value) -> RunConfig {
        RunConfig {
            n: 4,
            seed: 0,
            lo,
            hi,
            algorithm: AlgorithmOpt::Quick,
        }
    }

    #[test]
    fn run_config_requires_finite_ordered_range() -> Result<()> {
        cfg(0.0, 1000.0).validate()?;
        cfg(5.0, 5.0).validate()?;

        let err = cfg(0.0, f64::INFINITY)
            .validate()
            .err()
            .context("infinite hi was accepted")?;
        assert!(err.to_string().contains("must be finite"), "{err}");
        assert!(cfg(f64::NEG_INFINITY, 0.0).validate().is_err());
        assert!(cfg(f64::NAN, 1.0).validate().is_err());

        let err = cfg(2.0, 1.0)
            .validate()
            .err()
            .context("reversed range was accepted")?;
        assert!(err.to_string().contains("must not exceed"), "{err}");
        Ok(())
    }

    #[test]
    fn non_finite_range_is_rejected_before_writing() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let out = dir.path().join("t.json");
        assert!(run(cfg(0.0, f64::INFINITY), Some(&out)).is_err());
        assert!(!out.exists());
        Ok(())
    }

    #[test]
    fn run_writes_jsonl_into_new_directory() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let out = dir.path().join("out/nested/t.jsonl");
        run(cfg(0.0, 10.0), Some(&out))?;
        assert!(out.is_file());
        Ok(())
    }

    #[test]
    fn jsonl_detection() {
        assert!(is_jsonl(Path::new("out/trace.JSONL")));
        assert!(is_jsonl(Path::new("trace.ndjson")));
        assert!(!is_jsonl(Path::new("trace.json")));
    }
}
