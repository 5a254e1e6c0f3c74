//! Trial timing statistics.

use serde::{Deserialize, Serialize};

/// Arithmetic mean. Zero for an empty slice.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Sample standard deviation (n - 1 denominator). Zero for fewer than two
/// samples.
pub fn sample_stddev(samples: &[f64]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    let m = mean(samples);
    let variance = samples.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (samples.len() - 1) as f64;
    variance.sqrt()
}

/// Total number of trials needed for a confidence half-width of
/// `margin * mean`:
///
/// ```text
///   N = ceil((2 * z * stddev) / (margin * mean))^2
/// ```
///
/// The ratio is rounded up *before* squaring. Returns zero when the mean is
/// not positive (the caller falls back to its initial batch size).
pub fn required_trials(mean: f64, stddev: f64, z: f64, margin: f64) -> u64 {
    if mean <= 0.0 {
        return 0;
    }
    let ratio = (2.0 * z * stddev) / (margin * mean);
    let n = ratio.ceil() as u64;
    n.saturating_mul(n)
}

/// Final statistics reported by the estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialStats {
    /// Total number of trials executed.
    pub trials: u64,
    /// Mean trial duration in seconds.
    pub mean_s: f64,
    /// Sample standard deviation in seconds.
    pub stddev_s: f64,
}

impl TrialStats {
    /// Compute statistics over collected trial durations (seconds).
    pub fn from_durations(durations: &[f64]) -> Self {
        Self {
            trials: durations.len() as u64,
            mean_s: mean(durations),
            stddev_s: sample_stddev(durations),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_mean_basic() {
        assert!((mean(&[1.0, 2.0, 3.0]) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_stddev_single_sample_is_zero() {
        assert_eq!(sample_stddev(&[5.0]), 0.0);
        assert_eq!(sample_stddev(&[]), 0.0);
    }

    #[test]
    fn test_stddev_identical_samples_is_zero() {
        assert_eq!(sample_stddev(&[3.0, 3.0, 3.0, 3.0]), 0.0);
    }

    #[test]
    fn test_stddev_known_value() {
        // Samples 2, 4, 4, 4, 5, 5, 7, 9: sample variance 32/7.
        let s = sample_stddev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((s - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_required_trials_zero_spread() {
        assert_eq!(required_trials(1.0, 0.0, 1.96, 0.05), 0);
    }

    #[test]
    fn test_required_trials_zero_mean() {
        assert_eq!(required_trials(0.0, 1.0, 1.96, 0.05), 0);
    }

    #[test]
    fn test_required_trials_rounds_up_before_squaring() {
        // ratio = (2 * 1.96 * 0.1) / (0.05 * 1.0) = 7.84 → ceil 8 → 64,
        // not ceil(7.84^2) = 62.
        assert_eq!(required_trials(1.0, 0.1, 1.96, 0.05), 64);
    }

    #[test]
    fn test_trial_stats_from_durations() {
        let stats = TrialStats::from_durations(&[1.0, 1.0, 1.0]);
        assert_eq!(stats.trials, 3);
        assert_eq!(stats.mean_s, 1.0);
        assert_eq!(stats.stddev_s, 0.0);
    }

    proptest! {
        #[test]
        fn prop_required_trials_is_perfect_square(
            mean in 0.001f64..1000.0,
            stddev in 0.0f64..100.0,
        ) {
            let n = required_trials(mean, stddev, 1.96, 0.05);
            let root = (n as f64).sqrt().round() as u64;
            prop_assert_eq!(root * root, n);
        }

        #[test]
        fn prop_required_trials_matches_formula(
            mean in 0.01f64..100.0,
            stddev in 0.0f64..10.0,
        ) {
            let expected = {
                let ratio = (2.0 * 1.96 * stddev) / (0.05 * mean);
                let r = ratio.ceil() as u64;
                r * r
            };
            prop_assert_eq!(required_trials(mean, stddev, 1.96, 0.05), expected);
        }

        #[test]
        fn prop_required_trials_monotone_in_spread(
            mean in 0.01f64..100.0,
            stddev in 0.0f64..10.0,
            extra in 0.0f64..10.0,
        ) {
            let base = required_trials(mean, stddev, 1.96, 0.05);
            let wider = required_trials(mean, stddev + extra, 1.96, 0.05);
            prop_assert!(wider >= base);
        }
    }
}
