//! Error types for the IR crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur while building circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit index outside the circuit.
    #[error("Qubit {qubit} out of range for circuit with {num_qubits} qubits")]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Number of qubits in the circuit.
        num_qubits: u32,
    },

    /// Classical bit index outside the circuit.
    #[error("Classical bit {clbit} out of range for circuit with {num_clbits} classical bits")]
    ClbitOutOfRange {
        /// The offending classical bit.
        clbit: ClbitId,
        /// Number of classical bits in the circuit.
        num_clbits: u32,
    },

    /// The same qubit appears twice in one operation.
    #[error("Duplicate qubit {qubit} in '{gate}' operation")]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Name of the gate.
        gate: &'static str,
    },

    /// Gate applied with the wrong number of operands.
    #[error("Gate '{gate}' requires {expected} qubits, got {got}")]
    ArityMismatch {
        /// Name of the gate.
        gate: &'static str,
        /// Expected operand count.
        expected: u32,
        /// Provided operand count.
        got: u32,
    },

    /// Multi-controlled gate with no controls.
    #[error("Multi-controlled gate requires at least one control qubit")]
    MissingControls,

    /// Marked state does not fit in the search space.
    #[error("Marked state {marked} exceeds maximum {max} for {num_qubits} qubits")]
    MarkedStateOutOfRange {
        /// The requested marked state.
        marked: u64,
        /// Largest representable state.
        max: u64,
        /// Number of qubits.
        num_qubits: u32,
    },

    /// Workload needs more qubits than requested.
    #[error("Grover workload requires at least 2 qubits, got {0}")]
    TooFewQubits(u32),

    /// Search space does not fit 64-bit state arithmetic.
    #[error("Grover workload supports at most 63 qubits, got {0}")]
    TooManyQubits(u32),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
