//! Background CPU and RAM samplers.
//!
//! Each sampler owns a dedicated OS thread that appends one reading per tick
//! to a private buffer. A shared [`AtomicBool`] signals the loop to stop;
//! stopping joins the thread and hands the buffer back by value, so readings
//! are only ever consumed after the loop has exited.
//!
//! Sampling runs on plain threads rather than tasks: `sysinfo` refreshes are
//! blocking syscall work, and the samplers must keep ticking while the
//! benchmark monopolises the async runtime.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use sysinfo::{ProcessesToUpdate, System, get_current_pid};
use tracing::{debug, warn};

use crate::stats::mean;

/// Tick interval shared by both samplers.
///
/// The CPU sampler widens this to [`sysinfo::MINIMUM_CPU_UPDATE_INTERVAL`]:
/// usage deltas between refreshes closer together than that are unreliable.
pub const SAMPLE_INTERVAL: Duration = Duration::from_millis(100);

const BYTES_PER_MB: f64 = 1_048_576.0;

/// Peak RAM in MB from a peak percentage and the machine's total memory.
pub fn peak_mb(peak_percent: f64, total_memory_bytes: u64) -> f64 {
    peak_percent / 100.0 * total_memory_bytes as f64 / BYTES_PER_MB
}

fn peak(readings: &[f64]) -> f64 {
    readings.iter().copied().fold(0.0, f64::max)
}

/// Global CPU utilisation sampler.
pub struct CpuSampler {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<Vec<f64>>,
}

impl CpuSampler {
    /// Start sampling at the given interval, widened to
    /// [`sysinfo::MINIMUM_CPU_UPDATE_INTERVAL`] if shorter.
    pub fn start(interval: Duration) -> Self {
        let interval = interval.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);

        let handle = thread::spawn(move || {
            let mut sys = System::new();
            // First refresh primes the usage counters; the first meaningful
            // delta is available one tick later.
            sys.refresh_cpu_usage();

            let mut readings = Vec::new();
            while !flag.load(Ordering::Relaxed) {
                thread::sleep(interval);
                sys.refresh_cpu_usage();
                readings.push(f64::from(sys.global_cpu_usage()));
            }
            readings
        });

        Self { stop, handle }
    }

    /// Stop the sampler, join its thread, and return the readings.
    pub fn stop(self) -> CpuReport {
        self.stop.store(true, Ordering::Relaxed);
        let readings = self.handle.join().unwrap_or_else(|_| {
            warn!("CPU sampler thread panicked; discarding readings");
            Vec::new()
        });
        debug!(samples = readings.len(), "CPU sampler stopped");
        CpuReport::from_readings(&readings)
    }
}

/// Current-process RAM sampler, as a percentage of total system memory.
pub struct RamSampler {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<(Vec<f64>, u64)>,
}

impl RamSampler {
    /// Start sampling at the given interval.
    pub fn start(interval: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);

        let handle = thread::spawn(move || {
            let mut sys = System::new();
            sys.refresh_memory();
            let total = sys.total_memory();

            let Ok(pid) = get_current_pid() else {
                warn!("cannot resolve current pid; RAM sampling disabled");
                return (Vec::new(), total);
            };

            let mut readings = Vec::new();
            while !flag.load(Ordering::Relaxed) {
                thread::sleep(interval);
                sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
                let used = sys.process(pid).map_or(0, |p| p.memory());
                if total > 0 {
                    readings.push(used as f64 / total as f64 * 100.0);
                }
            }
            (readings, total)
        });

        Self { stop, handle }
    }

    /// Stop the sampler, join its thread, and return the derived report.
    pub fn stop(self) -> RamReport {
        self.stop.store(true, Ordering::Relaxed);
        let (readings, total) = self.handle.join().unwrap_or_else(|_| {
            warn!("RAM sampler thread panicked; discarding readings");
            (Vec::new(), 0)
        });
        debug!(samples = readings.len(), "RAM sampler stopped");
        RamReport::from_readings(&readings, total)
    }
}

/// Metrics derived from CPU readings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpuReport {
    /// Average CPU utilisation percentage over the run.
    pub avg_percent: f64,
    /// Number of readings taken.
    pub samples: usize,
}

impl CpuReport {
    fn from_readings(readings: &[f64]) -> Self {
        Self {
            avg_percent: mean(readings),
            samples: readings.len(),
        }
    }
}

/// Metrics derived from RAM readings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RamReport {
    /// Average process RAM as a percentage of total memory.
    pub avg_percent: f64,
    /// Peak process RAM as a percentage of total memory.
    pub peak_percent: f64,
    /// Peak process RAM in MB.
    pub peak_mb: f64,
    /// Number of readings taken.
    pub samples: usize,
}

impl RamReport {
    fn from_readings(readings: &[f64], total_memory_bytes: u64) -> Self {
        let peak_percent = peak(readings);
        Self {
            avg_percent: mean(readings),
            peak_percent,
            peak_mb: peak_mb(peak_percent, total_memory_bytes),
            samples: readings.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_mb_conversion() {
        // 50% of 8 GiB is 4096 MB.
        let total = 8u64 * 1024 * 1024 * 1024;
        assert!((peak_mb(50.0, total) - 4096.0).abs() < 1e-9);
    }

    #[test]
    fn test_peak_mb_zero_memory() {
        assert_eq!(peak_mb(50.0, 0), 0.0);
    }

    #[test]
    fn test_ram_report_derivation() {
        let total = 4u64 * 1024 * 1024 * 1024;
        let report = RamReport::from_readings(&[10.0, 30.0, 20.0], total);
        assert!((report.avg_percent - 20.0).abs() < 1e-12);
        assert_eq!(report.peak_percent, 30.0);
        assert!((report.peak_mb - peak_mb(30.0, total)).abs() < 1e-12);
        assert_eq!(report.samples, 3);
    }

    #[test]
    fn test_empty_readings_report_zero() {
        let report = RamReport::from_readings(&[], 1024);
        assert_eq!(report.avg_percent, 0.0);
        assert_eq!(report.peak_percent, 0.0);
        assert_eq!(report.peak_mb, 0.0);
        assert_eq!(report.samples, 0);
    }

    #[test]
    fn test_cpu_sampler_collects_readings() {
        let sampler = CpuSampler::start(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL + Duration::from_millis(50));
        let report = sampler.stop();

        assert!(report.samples > 0);
        assert!(report.avg_percent >= 0.0);
    }

    #[test]
    fn test_cpu_interval_never_undercuts_sysinfo_minimum() {
        // A 1 ms request is widened to the minimum interval, so a window a
        // little over two minimum intervals long yields only a handful of
        // readings instead of hundreds.
        let sampler = CpuSampler::start(Duration::from_millis(1));
        thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL * 2 + Duration::from_millis(50));
        let report = sampler.stop();

        assert!(report.samples >= 1);
        assert!(report.samples <= 4);
    }

    #[test]
    fn test_ram_sampler_sees_current_process() {
        let sampler = RamSampler::start(Duration::from_millis(10));
        thread::sleep(Duration::from_millis(80));
        let report = sampler.stop();

        assert!(report.samples > 0);
        // The test process itself occupies memory.
        assert!(report.peak_percent > 0.0);
        assert!(report.peak_mb > 0.0);
        assert!(report.avg_percent <= report.peak_percent);
    }

    #[test]
    fn test_immediate_stop_does_not_hang() {
        let sampler = CpuSampler::start(Duration::from_millis(10));
        let report = sampler.stop();
        assert!(report.samples <= 2);
    }
}
