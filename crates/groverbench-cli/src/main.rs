//! groverbench Command-Line Interface
//!
//! Benchmarks Grover's algorithm across simulation backends, sweeping qubit
//! and shot counts, and persists timing and resource-usage statistics.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{backends, plot, run, version};

/// groverbench - adaptive Grover benchmarking across quantum simulation backends
#[derive(Parser)]
#[command(name = "groverbench")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a benchmark sweep over qubit and shot ranges
    Run {
        /// Number of qubits or range (e.g. '4' or '4-7')
        qubits: String,

        /// Shots per trial or range (e.g. '1024' or '1024-1028')
        #[arg(short, long, default_value = "1024")]
        shots: String,

        /// Backend to benchmark (sv, proc)
        #[arg(short, long, default_value = "sv")]
        backend: String,

        /// External engine command (required with --backend proc)
        #[arg(long)]
        engine_cmd: Option<String>,

        /// Number of CPU cores to use (clamped to the machine)
        #[arg(long)]
        cores: Option<u32>,

        /// Marked state for the oracle (defaults to all ones)
        #[arg(long)]
        marked: Option<u64>,

        /// Do not monitor CPU usage
        #[arg(long)]
        no_cpu: bool,

        /// Do not monitor RAM usage
        #[arg(long)]
        no_ram: bool,
    },

    /// Regenerate comparison plots from a sweep CSV
    Plot {
        /// Sweep CSV produced by `run`
        #[arg(short, long)]
        input: String,

        /// Directory for the PNGs (defaults to the CSV's directory)
        #[arg(short, long)]
        out_dir: Option<String>,
    },

    /// List available backends
    Backends,

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Run {
            qubits,
            shots,
            backend,
            engine_cmd,
            cores,
            marked,
            no_cpu,
            no_ram,
        } => {
            run::execute(
                &qubits,
                &shots,
                &backend,
                engine_cmd.as_deref(),
                cores,
                marked,
                !no_cpu,
                !no_ram,
            )
            .await
        }

        Commands::Plot { input, out_dir } => plot::execute(&input, out_dir.as_deref()),

        Commands::Backends => backends::execute().await,

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
