//! Comparison plots over a sweep's records.
//!
//! One line per backend, qubit count on the x-axis. Records sharing a
//! `(backend, qubits)` pair (different shot counts) are averaged into a
//! single point.

use std::collections::BTreeMap;
use std::path::Path;

use plotters::prelude::*;
use tracing::info;

use groverbench_bench::RunRecord;

use crate::error::{ReportError, ReportResult};

const PLOT_SIZE: (u32, u32) = (960, 640);

/// Per-backend `(qubits, value)` series, averaged over duplicate qubit
/// counts and sorted by qubit count.
pub fn series_by_backend(
    records: &[RunRecord],
    metric: fn(&RunRecord) -> f64,
) -> Vec<(String, Vec<(u32, f64)>)> {
    let mut grouped: BTreeMap<&str, BTreeMap<u32, (f64, u32)>> = BTreeMap::new();
    for record in records {
        let entry = grouped
            .entry(&record.backend)
            .or_default()
            .entry(record.qubits)
            .or_insert((0.0, 0));
        entry.0 += metric(record);
        entry.1 += 1;
    }

    grouped
        .into_iter()
        .map(|(backend, points)| {
            let series = points
                .into_iter()
                .map(|(qubits, (sum, count))| (qubits, sum / f64::from(count)))
                .collect();
            (backend.to_string(), series)
        })
        .collect()
}

/// Plot mean Grover execution time (seconds) against qubit count.
pub fn plot_mean_time(records: &[RunRecord], path: &Path) -> ReportResult<()> {
    draw_lines(
        records,
        path,
        "Mean Grover execution time",
        "mean time (s)",
        |r| r.mean_s,
    )
}

/// Plot peak process RAM (MB) against qubit count.
pub fn plot_peak_ram(records: &[RunRecord], path: &Path) -> ReportResult<()> {
    draw_lines(records, path, "Peak RAM usage", "peak RAM (MB)", |r| {
        r.ram_peak_mb
    })
}

fn draw_lines(
    records: &[RunRecord],
    path: &Path,
    title: &str,
    y_label: &str,
    metric: fn(&RunRecord) -> f64,
) -> ReportResult<()> {
    let series = series_by_backend(records, metric);
    if series.is_empty() {
        return Err(ReportError::Plot("no records to plot".into()));
    }

    let x_min = records.iter().map(|r| r.qubits).min().unwrap_or(0);
    let x_max = records.iter().map(|r| r.qubits).max().unwrap_or(1);
    let y_max = series
        .iter()
        .flat_map(|(_, points)| points.iter().map(|&(_, v)| v))
        .fold(0.0f64, f64::max)
        .max(f64::MIN_POSITIVE);

    let root = BitMapBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(72)
        .build_cartesian_2d(x_min..x_max + 1, 0.0..y_max * 1.1)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("qubits")
        .y_desc(y_label)
        .draw()
        .map_err(plot_err)?;

    for (i, (backend, points)) in series.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        chart
            .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))
            .map_err(plot_err)?
            .label(backend)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], color));
        chart
            .draw_series(points.iter().map(|&p| Circle::new(p, 3, color.filled())))
            .map_err(plot_err)?;
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.85))
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    info!(path = %path.display(), "wrote plot");
    Ok(())
}

fn plot_err(e: impl std::fmt::Display) -> ReportError {
    ReportError::Plot(e.to_string())
}
