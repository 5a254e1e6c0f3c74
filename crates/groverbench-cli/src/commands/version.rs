//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - adaptive Grover benchmarking for quantum simulators",
        style("groverbench").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  groverbench-ir      Circuit representation and Grover generator");
    println!("  groverbench-hal     Backend abstraction layer");
    println!("  groverbench-bench   Adaptive estimator and resource samplers");
    println!("  groverbench-report  CSV persistence, plots, and tables");
    println!("  groverbench-cli     Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style("https://github.com/groverbench/groverbench").underlined()
    );
    println!("License:    {}", style("Apache-2.0").dim());
}
