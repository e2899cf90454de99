//! sortrace-bench-harness
//!
//! Run small end-to-end benchmarks (generate -> sort -> replay -> encode)
//! and append CSV rows into `benchmarks/reports/bench-<unix>.csv`.
//!
//! Usage examples:
//!   cargo run -p sortrace-bench-harness -- --profile benchmarks/profiles/small.toml --algorithm quick
//!   cargo run -p sortrace-bench-harness -- --profile benchmarks/profiles/medium.toml --algorithm quick-iterative

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::Deserialize;

use sortrace_core::{InstrumentedSequence, Replay};
use sortrace_sort::{IterativeQuicksort, Quicksort, SortAlgorithm};
use sortrace_trace::{format::TraceFile, generator::shuffled_linspace, io::write_trace_cbor};

#[derive(Debug, Deserialize)]
struct Profile {
    /// Array length
    n: usize,
    /// Shuffle seed (incremented per repeat)
    seed: u64,
    /// Repetitions of the whole pipeline
    repeats: u32,
    /// Value range
    #[serde(default)]
    lo: f64,
    #[serde(default = "default_hi")]
    hi: f64,
}

const fn default_hi() -> f64 {
    1000.0
}

#[derive(Clone, Copy, Debug)]
enum AlgorithmSel {
    Quick,
    QuickIterative,
}

fn parse_flag(name: &str, default: &str) -> String {
    let mut it = std::env::args().skip(1);
    while let Some(k) = it.next() {
        if k == format!("--{name}") {
            return it.next().unwrap_or_else(|| default.to_string());
        }
    }
    default.to_string()
}

fn dur_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1e3
}

fn sort_with(sel: AlgorithmSel, seq: &mut InstrumentedSequence) -> Result<()> {
    match sel {
        AlgorithmSel::Quick => Quicksort::sort(seq)?,
        AlgorithmSel::QuickIterative => IterativeQuicksort::sort(seq)?,
    }
    Ok(())
}

fn main() -> Result<()> {
    let profile_path = PathBuf::from(parse_flag("profile", "benchmarks/profiles/small.toml"));
    let algo_str = parse_flag("algorithm", "quick");
    let algo = match algo_str.as_str() {
        "quick" => AlgorithmSel::Quick,
        "quick-iterative" => AlgorithmSel::QuickIterative,
        other => anyhow::bail!("unknown --algorithm {other} (use quick|quick-iterative)"),
    };

    let profile_src = fs::read_to_string(&profile_path)
        .with_context(|| format!("read profile {}", profile_path.display()))?;
    let profile: Profile = toml::from_str(&profile_src).context("parse profile toml")?;
    println!(
        "Profile: n={}, seed={}, repeats={}, algorithm={algo_str}",
        profile.n, profile.seed, profile.repeats
    );

    fs::create_dir_all("benchmarks/reports").context("create benchmarks/reports")?;

    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock before unix epoch")?
        .as_secs();
    let csv_path = PathBuf::from(format!("benchmarks/reports/bench-{ts}.csv"));
    let mut csv = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&csv_path)
        .with_context(|| format!("open {}", csv_path.display()))?;
    writeln!(csv, "timestamp,algorithm,n,seed,repeat,stage,ms,extra")?;

    for rep in 0..profile.repeats {
        let seed = profile.seed + u64::from(rep);
        let trace_path = PathBuf::from(format!("benchmarks/tmp-trace-{ts}-{rep}.cbor"));

        // 1) generate input
        let t0 = Instant::now();
        let initial = shuffled_linspace(profile.n, profile.lo, profile.hi, seed);
        let t_gen = t0.elapsed();
        writeln!(
            csv,
            "{ts},{algo_str},{},{seed},{rep},gen,{:.3},",
            profile.n,
            dur_ms(t_gen)
        )?;

        // 2) instrumented sort
        let mut seq = InstrumentedSequence::new(&initial);
        let t0 = Instant::now();
        sort_with(algo, &mut seq)?;
        let t_sort = t0.elapsed();
        writeln!(
            csv,
            "{ts},{algo_str},{},{seed},{rep},sort,{:.3},events={}",
            profile.n,
            dur_ms(t_sort),
            seq.events().len()
        )?;

        // 3) replay with snapshot checks
        let t0 = Instant::now();
        let out = Replay::new().replay(&initial, seq.events())?;
        let t_replay = t0.elapsed();
        anyhow::ensure!(out.as_slice() == seq.as_slice(), "replay diverged on repeat {rep}");
        writeln!(
            csv,
            "{ts},{algo_str},{},{seed},{rep},replay,{:.3},",
            profile.n,
            dur_ms(t_replay)
        )?;

        // 4) encode trace envelope
        let (_, events) = seq.into_parts();
        let tf = TraceFile::from_run(algo_str.clone(), initial, events);
        let t0 = Instant::now();
        write_trace_cbor(&trace_path, &tf)?;
        let t_write = t0.elapsed();
        let bytes = fs::metadata(&trace_path).map(|m| m.len()).unwrap_or(0);
        writeln!(
            csv,
            "{ts},{algo_str},{},{seed},{rep},encode,{:.3},cbor_bytes={bytes}",
            profile.n,
            dur_ms(t_write)
        )?;

        // cleanup temp files to avoid disk bloat
        let _ = fs::remove_file(&trace_path);
    }

    println!("Wrote report → {}", csv_path.display());
    Ok(())
}
