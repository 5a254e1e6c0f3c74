//! Backends command implementation.

use anyhow::Result;
use console::style;

use groverbench_adapter_sv::StatevectorBackend;
use groverbench_hal::Backend;

/// Execute the backends command.
pub async fn execute() -> Result<()> {
    println!(
        "{} Available backends:\n",
        style("groverbench").cyan().bold()
    );

    let sv = StatevectorBackend::new();
    let caps = sv.capabilities();
    let available = sv.availability().await?.is_available;

    println!(
        "  {} {} (local)",
        if available {
            style("●").green()
        } else {
            style("○").red()
        },
        style("sv").bold(),
    );
    println!("    Qubits: {}", caps.num_qubits);
    println!("    Max shots: {}", caps.max_shots);
    println!("    Features: {}", caps.features.join(", "));
    println!();

    println!("  {} {} (external)", style("●").green(), style("proc").bold());
    println!("    Wraps any simulator command speaking the JSON stdio protocol");
    println!("    Select with: --backend proc --engine-cmd <command>");

    Ok(())
}
