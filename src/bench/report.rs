//! Benchmark results and the regression rule

use std::fmt;
use std::time::Duration;

/// Default allowed slowdown of the perfect-hash path (10%)
pub const DEFAULT_REGRESSION_TOLERANCE: f64 = 0.10;

/// Timing of one measured path
///
/// `trials` counts every operation inside the timed loop, skipped ones
/// included, so `avg_ns` is `total / trials` for lookups and decodes alike.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchReport {
    pub label: String,
    /// Operations timed, including skipped ones
    pub trials: usize,
    /// Misses or malformed inputs among `trials`, counted not fatal
    pub skipped: usize,
    pub total: Duration,
    pub avg_ns: f64,
}

impl BenchReport {
    pub fn new(label: impl Into<String>, trials: usize, skipped: usize, total: Duration) -> Self {
        let avg_ns = if trials == 0 {
            0.0
        } else {
            total.as_nanos() as f64 / trials as f64
        };
        Self {
            label: label.into(),
            trials,
            skipped,
            total,
            avg_ns,
        }
    }
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} avg op: {:.2} ns ({} trials", self.label, self.avg_ns, self.trials)?;
        if self.skipped > 0 {
            write!(f, ", {} skipped", self.skipped)?;
        }
        write!(f, ")")
    }
}

/// Candidate path measured against a baseline
#[derive(Debug, Clone)]
pub struct Comparison<'a> {
    pub candidate: &'a BenchReport,
    pub baseline: &'a BenchReport,
    pub tolerance: f64,
}

impl<'a> Comparison<'a> {
    pub fn new(candidate: &'a BenchReport, baseline: &'a BenchReport) -> Self {
        Self {
            candidate,
            baseline,
            tolerance: DEFAULT_REGRESSION_TOLERANCE,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Candidate average over baseline average
    pub fn ratio(&self) -> f64 {
        if self.baseline.avg_ns == 0.0 {
            return 1.0;
        }
        self.candidate.avg_ns / self.baseline.avg_ns
    }

    /// Candidate slower than baseline beyond the tolerance
    pub fn is_regression(&self) -> bool {
        self.candidate.avg_ns > self.baseline.avg_ns * (1.0 + self.tolerance)
    }
}

impl fmt::Display for Comparison<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vs {}: {:.2}x{}",
            self.candidate.label,
            self.baseline.label,
            self.ratio(),
            if self.is_regression() { " REGRESSION" } else { "" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(label: &str, total_ns: u64) -> BenchReport {
        BenchReport::new(label, 1_000, 0, Duration::from_nanos(total_ns))
    }

    #[test]
    fn test_avg_ns() {
        assert_eq!(report("x", 25_000).avg_ns, 25.0);
        assert_eq!(BenchReport::new("x", 0, 0, Duration::ZERO).avg_ns, 0.0);
    }

    #[test]
    fn test_regression_rule() {
        let baseline = report("std::HashMap", 20_000);

        let faster = report("perfect hash", 8_000);
        assert!(!Comparison::new(&faster, &baseline).is_regression());

        let within = report("perfect hash", 21_500);
        assert!(!Comparison::new(&within, &baseline).is_regression());

        let slower = report("perfect hash", 23_000);
        assert!(Comparison::new(&slower, &baseline).is_regression());
        assert!(!Comparison::new(&slower, &baseline)
            .with_tolerance(0.20)
            .is_regression());
    }

    #[test]
    fn test_display() {
        let r = BenchReport::new("perfect hash", 4, 1, Duration::from_nanos(10));
        assert_eq!(r.to_string(), "perfect hash avg op: 2.50 ns (4 trials, 1 skipped)");
    }
}
