//! Wire protocol spoken with external engine processes.

use serde::{Deserialize, Serialize};

use groverbench_hal::Counts;
use groverbench_ir::Circuit;

/// Request written to the engine's stdin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineRequest {
    /// The circuit to execute.
    pub circuit: Circuit,
    /// Number of shots.
    pub shots: u32,
}

/// Response read from the engine's stdout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum EngineResponse {
    /// Execution succeeded.
    Ok {
        /// Measurement counts.
        counts: Counts,
        /// Engine-reported execution time in milliseconds.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        time_ms: Option<u64>,
    },
    /// Execution failed inside the engine.
    Error {
        /// Failure description.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_roundtrip() {
        let request = EngineRequest {
            circuit: Circuit::bell().unwrap(),
            shots: 1024,
        };
        let json = serde_json::to_string(&request).unwrap();
        let back: EngineRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.shots, 1024);
        assert_eq!(back.circuit, request.circuit);
    }

    #[test]
    fn test_ok_response_parses() {
        let json = r#"{"status":"ok","counts":{"11":980,"00":44},"time_ms":42}"#;
        let response: EngineResponse = serde_json::from_str(json).unwrap();
        match response {
            EngineResponse::Ok { counts, time_ms } => {
                assert_eq!(counts.get("11"), 980);
                assert_eq!(time_ms, Some(42));
            }
            EngineResponse::Error { .. } => panic!("expected ok"),
        }
    }

    #[test]
    fn test_error_response_parses() {
        let json = r#"{"status":"error","message":"out of memory"}"#;
        let response: EngineResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(
            response,
            EngineResponse::Error { message } if message == "out of memory"
        ));
    }
}
