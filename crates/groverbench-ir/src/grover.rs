//! Grover's search workload generator.
//!
//! Produces the fixed benchmark circuit: uniform superposition, the optimal
//! number of oracle + diffusion iterations for a single marked state, and a
//! full measurement. The oracle is a phase flip on the marked state built
//! from an X-conjugated multi-controlled Z (H·MCX·H on the last qubit).

use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};
use crate::qubit::QubitId;

/// Optimal number of Grover iterations for a single marked state in a
/// search space of size 2^n: `floor(pi / (4 * asin(sqrt(1 / 2^n))))`,
/// clamped to at least one iteration.
pub fn optimal_iterations(n_qubits: u32) -> usize {
    let space = f64::from(n_qubits).exp2();
    let theta = (1.0 / space).sqrt().asin();
    let optimal = (std::f64::consts::PI / (4.0 * theta)).floor() as usize;
    optimal.max(1)
}

/// Generate a Grover search circuit for `marked_state` with the optimal
/// iteration count.
pub fn grover_circuit(n_qubits: u32, marked_state: u64) -> IrResult<Circuit> {
    grover_circuit_with_iterations(n_qubits, marked_state, optimal_iterations(n_qubits))
}

/// Generate a Grover search circuit with an explicit iteration count.
pub fn grover_circuit_with_iterations(
    n_qubits: u32,
    marked_state: u64,
    iterations: usize,
) -> IrResult<Circuit> {
    if n_qubits < 2 {
        return Err(IrError::TooFewQubits(n_qubits));
    }
    // Marked states are u64 bit patterns, so the search space is capped at
    // 63 qubits; a shift by 64 would overflow.
    if n_qubits > 63 {
        return Err(IrError::TooManyQubits(n_qubits));
    }
    let max = (1u64 << n_qubits) - 1;
    if marked_state > max {
        return Err(IrError::MarkedStateOutOfRange {
            marked: marked_state,
            max,
            num_qubits: n_qubits,
        });
    }

    let mut circuit = Circuit::with_size(
        format!("grover_{n_qubits}q_{iterations}i"),
        n_qubits,
        n_qubits,
    );

    // Uniform superposition.
    for i in 0..n_qubits {
        circuit.h(QubitId(i))?;
    }

    for _ in 0..iterations {
        apply_oracle(&mut circuit, n_qubits, marked_state)?;
        apply_diffusion(&mut circuit, n_qubits)?;
    }

    circuit.measure_all()?;
    Ok(circuit)
}

/// Phase-flip the marked state: X where the marked bit is 0, then a
/// multi-controlled Z (as H·MCX·H on the last qubit), then undo the X gates.
fn apply_oracle(circuit: &mut Circuit, n_qubits: u32, marked_state: u64) -> IrResult<()> {
    for i in 0..n_qubits {
        if (marked_state >> i) & 1 == 0 {
            circuit.x(QubitId(i))?;
        }
    }

    apply_multi_controlled_z(circuit, n_qubits)?;

    for i in 0..n_qubits {
        if (marked_state >> i) & 1 == 0 {
            circuit.x(QubitId(i))?;
        }
    }
    Ok(())
}

/// The diffusion operator 2|s⟩⟨s| - I.
fn apply_diffusion(circuit: &mut Circuit, n_qubits: u32) -> IrResult<()> {
    for i in 0..n_qubits {
        circuit.h(QubitId(i))?;
        circuit.x(QubitId(i))?;
    }

    apply_multi_controlled_z(circuit, n_qubits)?;

    for i in 0..n_qubits {
        circuit.x(QubitId(i))?;
        circuit.h(QubitId(i))?;
    }
    Ok(())
}

/// Multi-controlled Z on all qubits, with the last qubit as target.
fn apply_multi_controlled_z(circuit: &mut Circuit, n_qubits: u32) -> IrResult<()> {
    let target = QubitId(n_qubits - 1);
    if n_qubits == 2 {
        circuit.cz(QubitId(0), target)?;
        return Ok(());
    }
    let controls: Vec<QubitId> = (0..n_qubits - 1).map(QubitId).collect();
    circuit.h(target)?;
    circuit.mcx(&controls, target)?;
    circuit.h(target)?;
    Ok(())
}
