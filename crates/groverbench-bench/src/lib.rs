//! Benchmark core: adaptive trial estimation and resource sampling.
//!
//! A benchmark run for one `(qubits, shots)` configuration proceeds as:
//!
//! ```text
//!   build Grover circuit ──→ start samplers ──→ adaptive estimator
//!                                                     │
//!   RunRecord ←── derive CPU/RAM metrics ←── stop samplers
//! ```
//!
//! The [`estimator`] runs an initial batch of timed trials, derives from
//! their spread how many trials a 5% relative 95% confidence half-width
//! needs, runs exactly that refinement batch once, and reports final
//! statistics. The [`monitor`] samplers record CPU and RAM usage on
//! dedicated threads while trials execute.

pub mod error;
pub mod estimator;
pub mod monitor;
pub mod runner;
pub mod stats;

pub use error::{BenchError, BenchResult};
pub use estimator::{EstimatorConfig, TimedOperation, TrialEstimator};
pub use monitor::{CpuReport, CpuSampler, RamReport, RamSampler, SAMPLE_INTERVAL, peak_mb};
pub use runner::{BenchmarkRunner, RunRecord, RunnerConfig};
pub use stats::{TrialStats, mean, required_trials, sample_stddev};
