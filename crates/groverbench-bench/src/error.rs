//! Error types for the benchmark core.

use thiserror::Error;

/// Result type for benchmark operations.
pub type BenchResult<T> = Result<T, BenchError>;

/// Errors that can occur while benchmarking.
#[derive(Debug, Error)]
pub enum BenchError {
    /// The initial trials are already slower than the measurement budget.
    ///
    /// Refining the estimate would multiply an hours-long mean by the trial
    /// count, so the whole sweep stops here.
    #[error("mean trial time {mean_s:.1}s exceeds the {ceiling_s:.0}s measurement budget")]
    BudgetExceeded {
        /// Mean duration of the initial trials, in seconds.
        mean_s: f64,
        /// Configured budget, in seconds.
        ceiling_s: f64,
    },

    /// Circuit construction failed.
    #[error("circuit construction failed: {0}")]
    Circuit(#[from] groverbench_ir::IrError),

    /// The backend failed during a trial.
    #[error("backend error: {0}")]
    Backend(#[from] groverbench_hal::HalError),
}
