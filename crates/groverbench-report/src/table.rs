//! Terminal summary tables for a single run.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use groverbench_bench::RunRecord;

fn base_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}

/// Timing summary: what was measured and the resulting statistics.
pub fn timing_table(record: &RunRecord) -> Table {
    let mut table = base_table(&[
        "backend", "qubits", "shots", "trials", "mean (s)", "stddev (s)",
    ]);
    table.add_row(vec![
        record.backend.clone(),
        record.qubits.to_string(),
        record.shots.to_string(),
        record.trials.to_string(),
        format!("{:.4}", record.mean_s),
        format!("{:.4}", record.stddev_s),
    ]);
    table
}

/// Resource usage summary for the same run.
pub fn usage_table(record: &RunRecord) -> Table {
    let mut table = base_table(&[
        "CPU avg (%)",
        "RAM avg (%)",
        "RAM peak (%)",
        "RAM peak (MB)",
        "cores",
    ]);
    table.add_row(vec![
        format!("{:.1}", record.cpu_avg_percent),
        format!("{:.2}", record.ram_avg_percent),
        format!("{:.2}", record.ram_peak_percent),
        format!("{:.1}", record.ram_peak_mb),
        record.cores.to_string(),
    ]);
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> RunRecord {
        RunRecord {
            backend: "statevector".into(),
            qubits: 4,
            shots: 1024,
            trials: 12,
            mean_s: 0.1234,
            stddev_s: 0.0021,
            cpu_avg_percent: 37.5,
            ram_avg_percent: 1.25,
            ram_peak_percent: 2.5,
            ram_peak_mb: 96.0,
            cores: 8,
        }
    }

    #[test]
    fn test_timing_table_contents() {
        let rendered = timing_table(&record()).to_string();
        assert!(rendered.contains("statevector"));
        assert!(rendered.contains("1024"));
        assert!(rendered.contains("0.1234"));
        assert!(rendered.contains("12"));
    }

    #[test]
    fn test_usage_table_contents() {
        let rendered = usage_table(&record()).to_string();
        assert!(rendered.contains("37.5"));
        assert!(rendered.contains("96.0"));
        assert!(rendered.contains("8"));
    }
}
