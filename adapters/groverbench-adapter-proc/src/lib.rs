//! External simulator process backend.
//!
//! Delegates circuit execution to a user-supplied simulator command. One
//! process is spawned per job; the request (circuit + shots) is written to
//! the child's stdin as a single JSON document, and the child replies with a
//! JSON response on stdout:
//!
//! ```text
//!   stdin:  {"circuit": {...}, "shots": 1024}
//!   stdout: {"status": "ok", "counts": {"111": 980, ...}, "time_ms": 42}
//!           {"status": "error", "message": "..."}
//! ```
//!
//! This is how third-party engines (Qiskit Aer, Qulacs, and friends) plug
//! into the benchmark: a thin wrapper script around the engine speaks the
//! protocol, and the benchmark times the whole submit-to-result round trip
//! including process startup — the same cost a user of that engine pays.

mod backend;
mod error;
mod protocol;

pub use backend::ProcessBackend;
pub use error::{ProcError, ProcResult};
pub use protocol::{EngineRequest, EngineResponse};
