//! Run command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use groverbench_adapter_proc::ProcessBackend;
use groverbench_adapter_sv::StatevectorBackend;
use groverbench_bench::{BenchError, BenchmarkRunner, RunnerConfig};
use groverbench_hal::Backend;
use groverbench_report::{append_record, plot_mean_time, plot_peak_ram, read_records, timing_table, usage_table};

use super::common::{
    effective_cores, parse_qubit_range, parse_shot_range, thread_env, unique_results_dir,
};

/// Execute the run command.
#[allow(clippy::too_many_arguments)]
pub async fn execute(
    qubits: &str,
    shots: &str,
    backend: &str,
    engine_cmd: Option<&str>,
    cores: Option<u32>,
    marked: Option<u64>,
    sample_cpu: bool,
    sample_ram: bool,
) -> Result<()> {
    let qubit_range = parse_qubit_range(qubits)?;
    let shot_range = parse_shot_range(shots)?;
    let cores = effective_cores(cores);

    let backend_impl: Box<dyn Backend> = match backend.to_lowercase().as_str() {
        "sv" | "statevector" => Box::new(StatevectorBackend::new()),
        "proc" | "external" => {
            let Some(cmd) = engine_cmd else {
                anyhow::bail!("--backend proc requires --engine-cmd");
            };
            Box::new(ProcessBackend::new(cmd).with_env(thread_env(cores)))
        }
        other => {
            anyhow::bail!("Unknown backend: '{other}'. Available: sv, proc");
        }
    };

    let results_dir = unique_results_dir(
        Path::new("."),
        &format!("results_{qubits}_qubits_{shots}_shots_{cores}_cores"),
    );
    std::fs::create_dir_all(&results_dir)?;
    let csv_path = results_dir.join(format!("grover_data_{backend}_{qubits}.csv"));

    println!(
        "{} Benchmarking Grover on {} ({} cores), results in {}",
        style("→").cyan().bold(),
        style(backend_impl.name()).yellow(),
        cores,
        style(results_dir.display()).green()
    );

    for n in qubit_range.clone() {
        for s in shot_range.clone() {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.cyan} {msg}")
                    .unwrap(),
            );
            spinner.set_message(format!("Grover: {n} qubits, {s} shots..."));
            spinner.enable_steady_tick(std::time::Duration::from_millis(100));

            let config = RunnerConfig {
                marked,
                cores,
                sample_cpu,
                sample_ram,
                ..RunnerConfig::new(n, s)
            };
            let outcome = BenchmarkRunner::new(&*backend_impl, config).run().await;
            spinner.finish_and_clear();

            let record = match outcome {
                Ok(record) => record,
                Err(BenchError::BudgetExceeded { mean_s, ceiling_s }) => {
                    // Larger configurations would only be slower, so the
                    // whole sweep stops here.
                    eprintln!(
                        "{} {n} qubits: mean trial time {mean_s:.1}s exceeds the {ceiling_s:.0}s budget, stopping",
                        style("!").yellow().bold(),
                    );
                    std::process::exit(2);
                }
                Err(e) => return Err(e.into()),
            };

            append_record(&csv_path, &record)?;
            println!("{}", timing_table(&record));
            println!("{}", usage_table(&record));
        }
    }

    write_plots(&csv_path, &results_dir)?;
    println!(
        "{} Sweep complete: {}",
        style("✓").green().bold(),
        csv_path.display()
    );

    Ok(())
}

fn write_plots(csv_path: &Path, out_dir: &Path) -> Result<()> {
    let records = read_records(csv_path)?;
    plot_mean_time(&records, &out_dir.join("grover_time_vs_qubits.png"))?;
    plot_peak_ram(&records, &out_dir.join("ram_peak_vs_qubits.png"))?;
    Ok(())
}
