//! Process backend implementation.

use std::process::Stdio;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, instrument};
use uuid::Uuid;

use groverbench_hal::{
    Backend, BackendAvailability, Capabilities, ExecutionResult, HalError, HalResult, Job, JobId,
    JobStatus, ValidationResult,
};
use groverbench_ir::Circuit;

use crate::error::{ProcError, ProcResult};
use crate::protocol::{EngineRequest, EngineResponse};

const DEFAULT_MAX_QUBITS: u32 = 32;

struct ProcJob {
    job: Job,
    result: Option<ExecutionResult>,
}

/// Backend that delegates each job to an external simulator command.
pub struct ProcessBackend {
    command: String,
    args: Vec<String>,
    env: Vec<(String, String)>,
    capabilities: Capabilities,
    jobs: Arc<Mutex<FxHashMap<String, ProcJob>>>,
}

impl ProcessBackend {
    /// Create a backend wrapping the given engine command.
    ///
    /// The display name is the command's basename, prefixed so that result
    /// records distinguish external engines from the bundled simulator.
    pub fn new(command: impl Into<String>) -> Self {
        let command = command.into();
        let basename = command
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(command.as_str())
            .to_string();
        Self {
            capabilities: Capabilities::external(format!("proc:{basename}"), DEFAULT_MAX_QUBITS),
            command,
            args: Vec::new(),
            env: Vec::new(),
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
        }
    }

    /// Extra arguments passed to every engine invocation.
    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Environment variables set for the engine process (e.g. the
    /// `OMP_NUM_THREADS` family when benchmarking with a core budget).
    pub fn with_env(mut self, env: impl IntoIterator<Item = (String, String)>) -> Self {
        self.env = env.into_iter().collect();
        self
    }

    /// Override the advertised qubit ceiling.
    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.capabilities.num_qubits = max_qubits;
        self
    }

    /// Spawn the engine, feed it one request, and parse its reply.
    async fn run_engine(&self, request: &EngineRequest) -> ProcResult<ExecutionResult> {
        let start = Instant::now();

        let mut child = Command::new(&self.command)
            .args(&self.args)
            .envs(self.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let payload = serde_json::to_vec(request)?;
        {
            // Taking stdin drops it after the write, closing the pipe so the
            // engine sees EOF and starts executing.
            let mut stdin = child.stdin.take().ok_or_else(|| {
                std::io::Error::other("engine process has no stdin handle")
            })?;
            stdin.write_all(&payload).await?;
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(ProcError::NonZeroExit {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let response: EngineResponse = serde_json::from_slice(&output.stdout)?;
        match response {
            EngineResponse::Ok { counts, time_ms } => {
                let elapsed = start.elapsed();
                debug!(?elapsed, engine_time_ms = ?time_ms, "engine completed");
                Ok(ExecutionResult::new(counts, request.shots)
                    .with_execution_time(time_ms.unwrap_or(elapsed.as_millis() as u64)))
            }
            EngineResponse::Error { message } => Err(ProcError::Engine(message)),
        }
    }
}

#[async_trait]
impl Backend for ProcessBackend {
    fn name(&self) -> &str {
        &self.capabilities.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        // A liveness probe would need a protocol extension; spawn failures
        // surface on the first submit instead.
        Ok(BackendAvailability::always_available())
    }

    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        if circuit.num_qubits() > self.capabilities.num_qubits {
            return Ok(ValidationResult::Invalid {
                reasons: vec![format!(
                    "circuit has {} qubits but engine is configured for {}",
                    circuit.num_qubits(),
                    self.capabilities.num_qubits
                )],
            });
        }
        Ok(ValidationResult::Valid)
    }

    #[instrument(skip(self, circuit), fields(circuit = circuit.name(), command = %self.command))]
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        if circuit.num_qubits() > self.capabilities.num_qubits {
            return Err(HalError::CircuitTooLarge(format!(
                "circuit has {} qubits but engine is configured for {}",
                circuit.num_qubits(),
                self.capabilities.num_qubits
            )));
        }
        if shots == 0 {
            return Err(HalError::InvalidShots("shots must be positive".into()));
        }

        let job_id = JobId::new(Uuid::new_v4().to_string());
        let job = Job::new(job_id.clone(), shots).with_backend(self.name());

        let request = EngineRequest {
            circuit: circuit.clone(),
            shots,
        };

        let (status, result) = match self.run_engine(&request).await {
            Ok(result) => (JobStatus::Completed, Some(result)),
            Err(e) => (JobStatus::Failed(e.to_string()), None),
        };

        {
            let mut jobs = self
                .jobs
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            jobs.insert(
                job_id.0.clone(),
                ProcJob {
                    job: job.with_status(status),
                    result,
                },
            );
        }

        debug!(%job_id, "submitted job");
        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        let jobs = self
            .jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        jobs.get(&job_id.0)
            .map(|j| j.job.status.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let jobs = self
            .jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        jobs.get(&job_id.0)
            .and_then(|j| j.result.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        let mut jobs = self
            .jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(proc_job) = jobs.get_mut(&job_id.0) {
            proc_job.job = proc_job.job.clone().with_status(JobStatus::Cancelled);
            Ok(())
        } else {
            Err(HalError::JobNotFound(job_id.0.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_from_command_basename() {
        let backend = ProcessBackend::new("/usr/local/bin/qulacs-engine");
        assert_eq!(backend.name(), "proc:qulacs-engine");
    }

    #[tokio::test]
    async fn test_missing_command_fails_job() {
        let backend = ProcessBackend::new("groverbench-test-no-such-engine");
        let circuit = Circuit::bell().unwrap();

        let job_id = backend.submit(&circuit, 100).await.unwrap();
        let status = backend.status(&job_id).await.unwrap();
        assert!(matches!(status, JobStatus::Failed(_)));

        let err = backend.wait(&job_id).await.unwrap_err();
        assert!(matches!(err, HalError::JobFailed(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stub_engine_roundtrip() {
        // A shell one-liner standing in for a real engine: drain the request,
        // emit a fixed reply.
        let backend = ProcessBackend::new("sh").with_args([
            "-c",
            r#"cat > /dev/null; printf '{"status":"ok","counts":{"11":100},"time_ms":1}'"#,
        ]);

        let circuit = Circuit::bell().unwrap();
        let job_id = backend.submit(&circuit, 100).await.unwrap();
        let result = backend.wait(&job_id).await.unwrap();

        assert_eq!(result.counts.get("11"), 100);
        assert_eq!(result.execution_time_ms, Some(1));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stub_engine_error_reply() {
        let backend = ProcessBackend::new("sh").with_args([
            "-c",
            r#"cat > /dev/null; printf '{"status":"error","message":"unsupported gate"}'"#,
        ]);

        let circuit = Circuit::bell().unwrap();
        let job_id = backend.submit(&circuit, 10).await.unwrap();
        let err = backend.wait(&job_id).await.unwrap_err();
        assert!(matches!(err, HalError::JobFailed(msg) if msg.contains("unsupported gate")));
    }
}
