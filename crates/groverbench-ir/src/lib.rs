//! Minimal circuit representation for groverbench.
//!
//! The benchmark harness only ever executes one workload family (Grover's
//! search), so the IR is deliberately small: a flat, validated instruction
//! list rather than a full DAG. Backends consume [`Circuit`] directly; the
//! external-process adapter serializes it as JSON.
//!
//! # Example
//!
//! ```
//! use groverbench_ir::grover::{grover_circuit, optimal_iterations};
//!
//! let circuit = grover_circuit(4, 0b1111).unwrap();
//! assert_eq!(circuit.num_qubits(), 4);
//! assert_eq!(optimal_iterations(4), 3);
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod grover;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::Gate;
pub use grover::{grover_circuit, grover_circuit_with_iterations, optimal_iterations};
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClbitId, QubitId};
