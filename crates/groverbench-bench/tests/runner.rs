//! End-to-end benchmark runs against the bundled statevector backend.

use groverbench_adapter_sv::StatevectorBackend;
use groverbench_bench::{BenchError, BenchmarkRunner, EstimatorConfig, RunnerConfig};

/// Keep trial counts small: micro-benchmark timings of a tiny circuit are
/// noisy, and a wide margin stops the refinement batch from exploding.
fn fast_estimator() -> EstimatorConfig {
    EstimatorConfig {
        initial_trials: 3,
        relative_margin: 0.5,
        ..EstimatorConfig::default()
    }
}

#[tokio::test]
async fn run_produces_complete_record() {
    let backend = StatevectorBackend::new();
    let config = RunnerConfig {
        cores: 2,
        estimator: fast_estimator(),
        ..RunnerConfig::new(3, 50)
    };

    let record = BenchmarkRunner::new(&backend, config)
        .run()
        .await
        .unwrap();

    assert_eq!(record.backend, "statevector");
    assert_eq!(record.qubits, 3);
    assert_eq!(record.shots, 50);
    assert_eq!(record.cores, 2);
    assert!(record.trials >= 3);
    assert!(record.mean_s > 0.0);
    assert!(record.stddev_s >= 0.0);
    assert!(record.ram_peak_percent >= record.ram_avg_percent);
}

#[tokio::test]
async fn sampling_can_be_disabled() {
    let backend = StatevectorBackend::new();
    let config = RunnerConfig {
        sample_cpu: false,
        sample_ram: false,
        estimator: fast_estimator(),
        ..RunnerConfig::new(2, 10)
    };

    let record = BenchmarkRunner::new(&backend, config)
        .run()
        .await
        .unwrap();

    assert_eq!(record.cpu_avg_percent, 0.0);
    assert_eq!(record.ram_peak_mb, 0.0);
}

#[tokio::test]
async fn oversized_register_is_an_error_not_a_panic() {
    let backend = StatevectorBackend::new();
    let config = RunnerConfig {
        estimator: fast_estimator(),
        ..RunnerConfig::new(64, 10)
    };

    let err = BenchmarkRunner::new(&backend, config)
        .run()
        .await
        .unwrap_err();
    assert!(matches!(err, BenchError::Circuit(_)));
}

#[tokio::test]
async fn explicit_marked_state_is_respected() {
    let backend = StatevectorBackend::new();
    let config = RunnerConfig {
        marked: Some(0b010),
        estimator: fast_estimator(),
        ..RunnerConfig::new(3, 20)
    };

    // The record only carries timings; this exercises circuit construction
    // with a non-default oracle.
    let record = BenchmarkRunner::new(&backend, config)
        .run()
        .await
        .unwrap();
    assert!(record.trials >= 3);
}
