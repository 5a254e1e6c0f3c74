//! Per-configuration benchmark runner.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use groverbench_hal::Backend;
use groverbench_ir::{Circuit, grover_circuit};

use crate::error::BenchResult;
use crate::estimator::{EstimatorConfig, TimedOperation, TrialEstimator};
use crate::monitor::{CpuReport, CpuSampler, RamReport, RamSampler, SAMPLE_INTERVAL};

/// Configuration for one benchmark run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Number of qubits in the Grover circuit.
    pub qubits: u32,
    /// Shots per trial.
    pub shots: u32,
    /// Marked state for the oracle; defaults to the all-ones state.
    pub marked: Option<u64>,
    /// Core budget recorded alongside the measurements.
    pub cores: u32,
    /// Whether to sample CPU usage during trials.
    pub sample_cpu: bool,
    /// Whether to sample RAM usage during trials.
    pub sample_ram: bool,
    /// Estimator parameters.
    pub estimator: EstimatorConfig,
}

impl RunnerConfig {
    /// Configuration with default sampling and estimator settings.
    pub fn new(qubits: u32, shots: u32) -> Self {
        Self {
            qubits,
            shots,
            marked: None,
            cores: 1,
            sample_cpu: true,
            sample_ram: true,
            estimator: EstimatorConfig::default(),
        }
    }

    fn marked_state(&self) -> u64 {
        // Saturates for 64+ qubits; circuit construction rejects such
        // configurations with a proper error rather than a shift overflow.
        self.marked
            .unwrap_or_else(|| match 1u64.checked_shl(self.qubits) {
                Some(space) => space - 1,
                None => u64::MAX,
            })
    }
}

/// One row of benchmark output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Backend that executed the trials.
    pub backend: String,
    /// Number of qubits.
    pub qubits: u32,
    /// Shots per trial.
    pub shots: u32,
    /// Total trials executed by the estimator.
    pub trials: u64,
    /// Mean trial duration in seconds.
    pub mean_s: f64,
    /// Sample standard deviation in seconds.
    pub stddev_s: f64,
    /// Average CPU utilisation percentage during trials.
    pub cpu_avg_percent: f64,
    /// Average process RAM percentage during trials.
    pub ram_avg_percent: f64,
    /// Peak process RAM percentage during trials.
    pub ram_peak_percent: f64,
    /// Peak process RAM in MB.
    pub ram_peak_mb: f64,
    /// Core budget the run was configured with.
    pub cores: u32,
}

/// Times one full submit-and-wait round trip per trial.
struct SubmitAndWait<'a> {
    backend: &'a dyn Backend,
    circuit: &'a Circuit,
    shots: u32,
}

#[async_trait]
impl TimedOperation for SubmitAndWait<'_> {
    async fn run_once(&mut self) -> BenchResult<Duration> {
        let start = Instant::now();
        let job_id = self.backend.submit(self.circuit, self.shots).await?;
        self.backend.wait(&job_id).await?;
        Ok(start.elapsed())
    }
}

/// Runs the adaptive estimator for one `(qubits, shots)` configuration while
/// sampling resource usage.
pub struct BenchmarkRunner<'a> {
    backend: &'a dyn Backend,
    config: RunnerConfig,
}

impl<'a> BenchmarkRunner<'a> {
    /// Create a runner for the given backend and configuration.
    pub fn new(backend: &'a dyn Backend, config: RunnerConfig) -> Self {
        Self { backend, config }
    }

    /// Execute the run and assemble its record.
    #[instrument(skip(self), fields(
        backend = self.backend.name(),
        qubits = self.config.qubits,
        shots = self.config.shots,
    ))]
    pub async fn run(&self) -> BenchResult<RunRecord> {
        let circuit = grover_circuit(self.config.qubits, self.config.marked_state())?;
        debug!(
            marked = self.config.marked_state(),
            depth = circuit.depth(),
            "built Grover circuit"
        );

        let cpu = self.config.sample_cpu.then(|| CpuSampler::start(SAMPLE_INTERVAL));
        let ram = self.config.sample_ram.then(|| RamSampler::start(SAMPLE_INTERVAL));

        let mut op = SubmitAndWait {
            backend: self.backend,
            circuit: &circuit,
            shots: self.config.shots,
        };
        let estimator = TrialEstimator::new(self.config.estimator.clone());
        let outcome = estimator.estimate(&mut op).await;

        // Samplers are joined even when estimation failed, so their threads
        // never outlive the run.
        let cpu_report = cpu.map(CpuSampler::stop).unwrap_or_default();
        let ram_report = ram.map(RamSampler::stop).unwrap_or_default();

        let stats = outcome?;
        info!(
            trials = stats.trials,
            mean_s = stats.mean_s,
            stddev_s = stats.stddev_s,
            "run complete"
        );

        Ok(self.record(stats.trials, stats.mean_s, stats.stddev_s, &cpu_report, &ram_report))
    }

    fn record(
        &self,
        trials: u64,
        mean_s: f64,
        stddev_s: f64,
        cpu: &CpuReport,
        ram: &RamReport,
    ) -> RunRecord {
        RunRecord {
            backend: self.backend.name().to_string(),
            qubits: self.config.qubits,
            shots: self.config.shots,
            trials,
            mean_s,
            stddev_s,
            cpu_avg_percent: cpu.avg_percent,
            ram_avg_percent: ram.avg_percent,
            ram_peak_percent: ram.peak_percent,
            ram_peak_mb: ram.peak_mb,
            cores: self.config.cores,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marked_state_defaults_to_all_ones() {
        let config = RunnerConfig::new(4, 100);
        assert_eq!(config.marked_state(), 0b1111);

        let config = RunnerConfig {
            marked: Some(3),
            ..RunnerConfig::new(4, 100)
        };
        assert_eq!(config.marked_state(), 3);
    }

    #[test]
    fn test_marked_state_saturates_for_wide_registers() {
        assert_eq!(RunnerConfig::new(64, 10).marked_state(), u64::MAX);
        assert_eq!(RunnerConfig::new(100, 10).marked_state(), u64::MAX);
        assert_eq!(RunnerConfig::new(63, 10).marked_state(), u64::MAX >> 1);
    }

    #[test]
    fn test_run_record_serializes_flat() {
        let record = RunRecord {
            backend: "statevector".into(),
            qubits: 4,
            shots: 1024,
            trials: 10,
            mean_s: 0.5,
            stddev_s: 0.0,
            cpu_avg_percent: 12.0,
            ram_avg_percent: 1.0,
            ram_peak_percent: 2.0,
            ram_peak_mb: 64.0,
            cores: 8,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["backend"], "statevector");
        assert_eq!(json["qubits"], 4);
        assert_eq!(json["trials"], 10);
        assert_eq!(json["cores"], 8);
    }
}
