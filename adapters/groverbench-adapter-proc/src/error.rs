//! Error types for the process adapter.

use thiserror::Error;

/// Result type for process adapter operations.
pub type ProcResult<T> = Result<T, ProcError>;

/// Errors that can occur when driving an external engine process.
#[derive(Debug, Error)]
pub enum ProcError {
    /// The engine process could not be spawned or spoken to.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The engine's reply was not valid protocol JSON.
    #[error("Protocol error: {0}")]
    Protocol(#[from] serde_json::Error),

    /// The engine reported a failure.
    #[error("Engine error: {0}")]
    Engine(String),

    /// The engine exited with a non-zero status.
    #[error("Engine exited with {code:?}: {stderr}")]
    NonZeroExit {
        /// Exit code, if the process was not killed by a signal.
        code: Option<i32>,
        /// Captured stderr.
        stderr: String,
    },
}

impl From<ProcError> for groverbench_hal::HalError {
    fn from(e: ProcError) -> Self {
        match e {
            ProcError::Io(err) => groverbench_hal::HalError::Io(err),
            ProcError::Protocol(err) => groverbench_hal::HalError::Serialization(err),
            ProcError::Engine(msg) => groverbench_hal::HalError::JobFailed(msg),
            ProcError::NonZeroExit { .. } => groverbench_hal::HalError::JobFailed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use groverbench_hal::HalError;

    #[test]
    fn test_engine_error_maps_to_job_failed() {
        let err: HalError = ProcError::Engine("boom".into()).into();
        assert!(matches!(err, HalError::JobFailed(msg) if msg == "boom"));
    }
}
