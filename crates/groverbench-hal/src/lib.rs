//! Backend abstraction layer for groverbench.
//!
//! Every simulation engine the benchmark can drive — the bundled statevector
//! simulator or an external process — implements the same [`Backend`] trait,
//! so the adaptive estimator times `submit` + `wait` without knowing which
//! engine is underneath.
//!
//! # Example: Running a Circuit
//!
//! ```ignore
//! use groverbench_hal::Backend;
//! use groverbench_adapter_sv::StatevectorBackend;
//! use groverbench_ir::Circuit;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = StatevectorBackend::new();
//!     let circuit = Circuit::bell()?;
//!
//!     let job_id = backend.submit(&circuit, 1000).await?;
//!     let result = backend.wait(&job_id).await?;
//!     println!("Results: {:?}", result.counts);
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod job;
pub mod result;

pub use backend::{Backend, BackendAvailability, BackendConfig, ValidationResult};
pub use capability::Capabilities;
pub use error::{HalError, HalResult};
pub use job::{Job, JobId, JobStatus};
pub use result::{Counts, ExecutionResult};
