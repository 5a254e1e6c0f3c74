//! CSV persistence for run records.
//!
//! The sweep CSV is append-only: the header is written once when the file is
//! created, and every subsequent run appends one row. Reruns into the same
//! directory therefore accumulate rather than overwrite.

use std::fs::OpenOptions;
use std::path::Path;

use tracing::debug;

use groverbench_bench::RunRecord;

use crate::error::ReportResult;

/// Append one record to the sweep CSV, creating it (with a header) if needed.
pub fn append_record(path: &Path, record: &RunRecord) -> ReportResult<()> {
    let exists = path.exists();
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let mut writer = ::csv::WriterBuilder::new()
        .has_headers(!exists)
        .from_writer(file);
    writer.serialize(record)?;
    writer.flush()?;

    debug!(path = %path.display(), created = !exists, "appended run record");
    Ok(())
}

/// Read all records from a sweep CSV.
pub fn read_records(path: &Path) -> ReportResult<Vec<RunRecord>> {
    let mut reader = ::csv::Reader::from_path(path)?;
    let records = reader
        .deserialize()
        .collect::<Result<Vec<RunRecord>, _>>()?;
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(qubits: u32) -> RunRecord {
        RunRecord {
            backend: "statevector".into(),
            qubits,
            shots: 1024,
            trials: 10,
            mean_s: 0.25,
            stddev_s: 0.01,
            cpu_avg_percent: 40.0,
            ram_avg_percent: 1.5,
            ram_peak_percent: 2.0,
            ram_peak_mb: 128.0,
            cores: 4,
        }
    }

    #[test]
    fn test_append_then_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");

        append_record(&path, &record(4)).unwrap();
        append_record(&path, &record(5)).unwrap();

        let records = read_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].qubits, 4);
        assert_eq!(records[1].qubits, 5);
        assert_eq!(records[1], record(5));
    }

    #[test]
    fn test_header_written_only_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");

        append_record(&path, &record(4)).unwrap();
        append_record(&path, &record(5)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.matches("backend").count(), 1);
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_read_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_records(&dir.path().join("absent.csv")).is_err());
    }
}
