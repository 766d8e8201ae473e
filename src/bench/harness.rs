//! Timed lookup and decode loops

use super::report::BenchReport;
use super::workload::LookupWorkload;
use crate::core::SymbolResolver;
use crate::log_bench;
use crate::parsing::MessageDecoder;
use std::hint::black_box;
use std::path::Path;
use std::time::{Duration, Instant};

/// Benchmark harness errors
#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    #[error("Failed to read capture {path}: {source}")]
    Capture {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Benchmark worker panicked")]
    WorkerPanicked,
}

/// Time every lookup in `workload` on the calling thread
pub fn measure_lookup<R>(label: &str, resolver: &R, workload: &LookupWorkload) -> BenchReport
where
    R: SymbolResolver + ?Sized,
{
    let (total, misses) = timed_lookups(resolver, workload.iter());
    let report = BenchReport::new(label, workload.len(), misses, total);
    log_bench!(tracing::Level::INFO, "{}", report);
    report
}

/// Split `workload` across `threads` scoped threads
///
/// Each thread times its own slice; totals are summed after join, so the
/// report's `avg_ns` is per-lookup CPU time, not wall time.
pub fn measure_lookup_parallel<R>(
    label: &str,
    resolver: &R,
    workload: &LookupWorkload,
    threads: usize,
) -> Result<BenchReport, BenchError>
where
    R: SymbolResolver + ?Sized,
{
    let threads = threads.max(1);
    let chunk = workload.len().div_ceil(threads).max(1);

    let results = crossbeam::thread::scope(|s| {
        let handles: Vec<_> = (0..workload.len())
            .step_by(chunk)
            .map(|start| {
                let end = (start + chunk).min(workload.len());
                s.spawn(move |_| timed_lookups(resolver, workload.slice(start, end)))
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join())
            .collect::<Result<Vec<_>, _>>()
    })
    .map_err(|_| BenchError::WorkerPanicked)?
    .map_err(|_| BenchError::WorkerPanicked)?;

    let (total, misses) = results
        .into_iter()
        .fold((Duration::ZERO, 0), |(t, m), (dt, dm)| (t + dt, m + dm));

    let report = BenchReport::new(format!("{} x{}", label, threads), workload.len(), misses, total);
    log_bench!(tracing::Level::INFO, "{}", report);
    Ok(report)
}

#[inline(never)]
fn timed_lookups<'k, R, I>(resolver: &R, keys: I) -> (Duration, usize)
where
    R: SymbolResolver + ?Sized,
    I: Iterator<Item = &'k [u8]>,
{
    let mut acc: u32 = 0;
    let mut misses = 0;

    let start = Instant::now();
    for key in keys {
        match resolver.resolve(black_box(key)) {
            Some(id) => acc ^= id.as_raw(),
            None => misses += 1,
        }
    }
    let elapsed = start.elapsed();

    black_box(acc);
    (elapsed, misses)
}

/// Decode every line, skipping failures
///
/// Skipped lines stay in `trials`; their cost is part of the timed loop.
pub fn measure_decode<D: MessageDecoder>(label: &str, decoder: &mut D, lines: &[Vec<u8>]) -> BenchReport {
    let mut skipped = 0;
    let mut acc: u32 = 0;

    let start = Instant::now();
    for line in lines {
        match decoder.decode(black_box(line)) {
            Ok(ticker) => acc ^= ticker.id.as_raw(),
            Err(e) => {
                skipped += 1;
                tracing::debug!("Skipping line: {}", e);
            }
        }
    }
    let total = start.elapsed();
    black_box(acc);

    let report = BenchReport::new(label, lines.len(), skipped, total);
    log_bench!(tracing::Level::INFO, "{}", report);
    report
}

/// Load a line-delimited capture; blank lines are ignored
pub fn read_capture(path: &Path) -> Result<Vec<Vec<u8>>, BenchError> {
    let contents = std::fs::read(path).map_err(|source| BenchError::Capture {
        path: path.display().to_string(),
        source,
    })?;

    Ok(contents
        .split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .filter(|line| !line.iter().all(u8::is_ascii_whitespace))
        .map(<[u8]>::to_vec)
        .collect())
}
