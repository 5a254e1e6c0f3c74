//! Plot command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use groverbench_report::{plot_mean_time, plot_peak_ram, read_records};

/// Execute the plot command.
pub fn execute(input: &str, out_dir: Option<&str>) -> Result<()> {
    let csv_path = Path::new(input);
    let out_dir = out_dir
        .map(Path::new)
        .or_else(|| csv_path.parent())
        .unwrap_or(Path::new("."));

    let records = read_records(csv_path)
        .with_context(|| format!("failed to read records from {input}"))?;
    println!(
        "{} Plotting {} records from {}",
        style("→").cyan().bold(),
        records.len(),
        style(input).green()
    );

    let time_png = out_dir.join("grover_time_vs_qubits.png");
    let ram_png = out_dir.join("ram_peak_vs_qubits.png");
    plot_mean_time(&records, &time_png)?;
    plot_peak_ram(&records, &ram_png)?;

    println!("  Wrote {}", time_png.display());
    println!("  Wrote {}", ram_png.display());
    Ok(())
}
