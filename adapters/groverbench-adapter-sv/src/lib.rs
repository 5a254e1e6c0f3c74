//! Bundled statevector simulator backend.
//!
//! Dense, exact statevector simulation. The circuit is applied once per job,
//! then measurement outcomes are sampled from the final distribution for the
//! requested number of shots. Memory grows as 2^n complex amplitudes, so the
//! default qubit ceiling is 26 (~1 GiB of state).
//!
//! This is the reference engine the benchmark falls back to when no external
//! simulator process is configured.

mod simulator;
mod statevector;

pub use simulator::StatevectorBackend;
pub use statevector::Statevector;
