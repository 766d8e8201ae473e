//! Benchmark harness
//!
//! Measures average lookup cost of the perfect-hash table against the
//! dynamic map (and sorted table) over an identical seeded workload, plus
//! end-to-end decode cost over a message capture.

pub mod harness;
pub mod report;
pub mod workload;

pub use harness::{measure_decode, measure_lookup, measure_lookup_parallel, read_capture, BenchError};
pub use report::{BenchReport, Comparison, DEFAULT_REGRESSION_TOLERANCE};
pub use workload::{LookupWorkload, DEFAULT_SEED};
