//! Adaptive trial estimator.
//!
//! Runs a fixed initial batch of timed trials, derives from their spread how
//! many trials are needed for the target confidence half-width, runs exactly
//! that refinement batch once, and reports final statistics. There is no
//! second refinement round: the first estimate is trusted.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{BenchError, BenchResult};
use crate::stats::{TrialStats, mean, required_trials, sample_stddev};

/// An operation whose duration is being estimated.
///
/// One call is one trial. Implementations report the duration of the work
/// they performed; the estimator never measures time itself, so scripted
/// implementations can drive it in tests.
#[async_trait]
pub trait TimedOperation {
    /// Execute the operation once and return how long it took.
    async fn run_once(&mut self) -> BenchResult<Duration>;
}

/// Estimator configuration.
#[derive(Debug, Clone)]
pub struct EstimatorConfig {
    /// Size of the initial trial batch.
    pub initial_trials: u64,
    /// Target half-width of the confidence interval, relative to the mean.
    pub relative_margin: f64,
    /// z-score of the target confidence level (1.96 for 95%).
    pub z_score: f64,
    /// Mean-duration budget in seconds; exceeding it aborts the run.
    pub ceiling_s: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            initial_trials: 10,
            relative_margin: 0.05,
            z_score: 1.96,
            ceiling_s: 8640.0,
        }
    }
}

/// Adaptive trial estimator.
#[derive(Debug, Clone, Default)]
pub struct TrialEstimator {
    config: EstimatorConfig,
}

impl TrialEstimator {
    /// Create an estimator with the given configuration.
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Run the estimation procedure to completion.
    ///
    /// Trial errors propagate immediately; durations already collected are
    /// discarded. Returns [`BenchError::BudgetExceeded`] when the initial
    /// batch's mean is above the configured ceiling.
    pub async fn estimate(
        &self,
        op: &mut (dyn TimedOperation + Send),
    ) -> BenchResult<TrialStats> {
        let k0 = self.config.initial_trials.max(1);
        let mut durations = Vec::with_capacity(k0 as usize);

        for trial in 0..k0 {
            let elapsed = op.run_once().await?;
            debug!(trial, secs = elapsed.as_secs_f64(), "initial trial");
            durations.push(elapsed.as_secs_f64());
        }

        let m = mean(&durations);
        let s = sample_stddev(&durations);

        if m > self.config.ceiling_s {
            return Err(BenchError::BudgetExceeded {
                mean_s: m,
                ceiling_s: self.config.ceiling_s,
            });
        }

        let required = required_trials(m, s, self.config.z_score, self.config.relative_margin);
        let total = required.max(k0);
        debug!(
            mean_s = m,
            stddev_s = s,
            required,
            refinement = total - k0,
            "initial batch complete"
        );

        for trial in k0..total {
            let elapsed = op.run_once().await?;
            debug!(trial, secs = elapsed.as_secs_f64(), "refinement trial");
            durations.push(elapsed.as_secs_f64());
        }

        Ok(TrialStats::from_durations(&durations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed script of durations without doing any work.
    struct Scripted {
        durations: Vec<Duration>,
        next: usize,
    }

    impl Scripted {
        fn secs(durations: &[f64]) -> Self {
            Self {
                durations: durations.iter().map(|&s| Duration::from_secs_f64(s)).collect(),
                next: 0,
            }
        }

        fn consumed(&self) -> usize {
            self.next
        }
    }

    #[async_trait]
    impl TimedOperation for Scripted {
        async fn run_once(&mut self) -> BenchResult<Duration> {
            let d = self.durations[self.next % self.durations.len()];
            self.next += 1;
            Ok(d)
        }
    }

    struct FailsAfter {
        remaining: u32,
    }

    #[async_trait]
    impl TimedOperation for FailsAfter {
        async fn run_once(&mut self) -> BenchResult<Duration> {
            if self.remaining == 0 {
                return Err(groverbench_hal::HalError::Backend("engine crashed".into()).into());
            }
            self.remaining -= 1;
            Ok(Duration::from_millis(1))
        }
    }

    fn quick_config(initial_trials: u64) -> EstimatorConfig {
        EstimatorConfig {
            initial_trials,
            ..EstimatorConfig::default()
        }
    }

    #[tokio::test]
    async fn test_identical_durations_stop_at_initial_batch() {
        let mut op = Scripted::secs(&[0.5]);
        let estimator = TrialEstimator::new(quick_config(10));

        let stats = estimator.estimate(&mut op).await.unwrap();
        assert_eq!(stats.trials, 10);
        assert_eq!(op.consumed(), 10);
        assert!((stats.mean_s - 0.5).abs() < 1e-12);
        assert_eq!(stats.stddev_s, 0.0);
    }

    #[tokio::test]
    async fn test_refinement_count_matches_formula() {
        // Initial batch alternates 1.0s and 2.0s: mean 1.5, stddev ~0.527.
        let mut op = Scripted::secs(&[1.0, 2.0]);
        let estimator = TrialEstimator::new(quick_config(10));

        let stats = estimator.estimate(&mut op).await.unwrap();

        let initial: Vec<f64> = [1.0, 2.0].iter().cycle().take(10).copied().collect();
        let expected =
            required_trials(mean(&initial), sample_stddev(&initial), 1.96, 0.05).max(10);
        assert_eq!(stats.trials, expected);
        assert_eq!(op.consumed() as u64, expected);
    }

    #[tokio::test]
    async fn test_final_mean_covers_all_consumed_durations() {
        let script = [0.9, 1.1, 1.0, 1.05, 0.95];
        let mut op = Scripted::secs(&script);
        let estimator = TrialEstimator::new(quick_config(10));

        let stats = estimator.estimate(&mut op).await.unwrap();

        let consumed: Vec<f64> = script
            .iter()
            .cycle()
            .take(op.consumed())
            .copied()
            .collect();
        assert_eq!(stats.trials as usize, consumed.len());
        assert!((stats.mean_s - mean(&consumed)).abs() < 1e-12);
        assert!((stats.stddev_s - sample_stddev(&consumed)).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_budget_exceeded() {
        let mut op = Scripted::secs(&[9000.0]);
        let estimator = TrialEstimator::new(quick_config(10));

        let err = estimator.estimate(&mut op).await.unwrap_err();
        assert!(matches!(
            err,
            BenchError::BudgetExceeded { mean_s, ceiling_s }
                if mean_s == 9000.0 && ceiling_s == 8640.0
        ));
        // The budget check happens after the initial batch, before refinement.
        assert_eq!(op.consumed(), 10);
    }

    #[tokio::test]
    async fn test_single_initial_trial_returns_immediately() {
        let mut op = Scripted::secs(&[2.0]);
        let estimator = TrialEstimator::new(quick_config(1));

        let stats = estimator.estimate(&mut op).await.unwrap();
        assert_eq!(stats.trials, 1);
        assert_eq!(stats.stddev_s, 0.0);
        assert!((stats.mean_s - 2.0).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_idempotent_over_identical_scripts() {
        let estimator = TrialEstimator::new(quick_config(10));
        let script = [0.8, 1.2, 1.0];

        let mut a = Scripted::secs(&script);
        let mut b = Scripted::secs(&script);
        let first = estimator.estimate(&mut a).await.unwrap();
        let second = estimator.estimate(&mut b).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_trial_error_propagates() {
        let mut op = FailsAfter { remaining: 3 };
        let estimator = TrialEstimator::new(quick_config(10));

        let err = estimator.estimate(&mut op).await.unwrap_err();
        assert!(matches!(err, BenchError::Backend(_)));
    }
}
