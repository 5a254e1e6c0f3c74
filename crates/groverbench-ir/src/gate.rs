//! Gate definitions.

use serde::{Deserialize, Serialize};

/// A quantum gate.
///
/// The set is intentionally restricted to what the Grover workload and the
/// bundled backends need. `Mcx` is variable-arity: the instruction's qubit
/// list holds the controls followed by the target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "param", rename_all = "lowercase")]
pub enum Gate {
    /// Identity.
    I,
    /// Hadamard.
    H,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
    /// Phase gate S = P(pi/2).
    S,
    /// S-dagger.
    Sdg,
    /// T gate = P(pi/4).
    T,
    /// T-dagger.
    Tdg,
    /// Phase rotation P(theta).
    P(f64),
    /// Rotation around X.
    Rx(f64),
    /// Rotation around Y.
    Ry(f64),
    /// Rotation around Z.
    Rz(f64),
    /// Controlled-X.
    Cx,
    /// Controlled-Y.
    Cy,
    /// Controlled-Z.
    Cz,
    /// Controlled phase.
    Cp(f64),
    /// Swap two qubits.
    Swap,
    /// Toffoli.
    Ccx,
    /// Multi-controlled X; arity is determined by the instruction operands.
    Mcx,
}

impl Gate {
    /// OpenQASM 3 style gate name.
    pub fn name(&self) -> &'static str {
        match self {
            Gate::I => "id",
            Gate::H => "h",
            Gate::X => "x",
            Gate::Y => "y",
            Gate::Z => "z",
            Gate::S => "s",
            Gate::Sdg => "sdg",
            Gate::T => "t",
            Gate::Tdg => "tdg",
            Gate::P(_) => "p",
            Gate::Rx(_) => "rx",
            Gate::Ry(_) => "ry",
            Gate::Rz(_) => "rz",
            Gate::Cx => "cx",
            Gate::Cy => "cy",
            Gate::Cz => "cz",
            Gate::Cp(_) => "cp",
            Gate::Swap => "swap",
            Gate::Ccx => "ccx",
            Gate::Mcx => "mcx",
        }
    }

    /// Number of qubits the gate acts on, or `None` for variable arity.
    pub fn arity(&self) -> Option<u32> {
        match self {
            Gate::I
            | Gate::H
            | Gate::X
            | Gate::Y
            | Gate::Z
            | Gate::S
            | Gate::Sdg
            | Gate::T
            | Gate::Tdg
            | Gate::P(_)
            | Gate::Rx(_)
            | Gate::Ry(_)
            | Gate::Rz(_) => Some(1),
            Gate::Cx | Gate::Cy | Gate::Cz | Gate::Cp(_) | Gate::Swap => Some(2),
            Gate::Ccx => Some(3),
            Gate::Mcx => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity() {
        assert_eq!(Gate::H.arity(), Some(1));
        assert_eq!(Gate::Cz.arity(), Some(2));
        assert_eq!(Gate::Ccx.arity(), Some(3));
        assert_eq!(Gate::Mcx.arity(), None);
    }

    #[test]
    fn test_names() {
        assert_eq!(Gate::Mcx.name(), "mcx");
        assert_eq!(Gate::P(1.0).name(), "p");
    }

    #[test]
    fn test_serde_roundtrip() {
        let gate = Gate::Cp(std::f64::consts::PI);
        let json = serde_json::to_string(&gate).unwrap();
        let back: Gate = serde_json::from_str(&json).unwrap();
        assert_eq!(gate, back);
    }
}
