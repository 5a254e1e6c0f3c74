//! Shared helpers for CLI commands.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Parse a value or inclusive range: `"4"` or `"4-7"`.
fn parse_range(arg: &str) -> Result<RangeInclusive<u32>> {
    if let Some((start, end)) = arg.split_once('-') {
        let start: u32 = start.trim().parse()?;
        let end: u32 = end.trim().parse()?;
        if start >= end {
            bail!("invalid range '{arg}': start must be below end");
        }
        Ok(start..=end)
    } else {
        let n: u32 = arg.trim().parse()?;
        Ok(n..=n)
    }
}

/// Parse the qubit argument. Grover needs at least 3 qubits.
pub fn parse_qubit_range(arg: &str) -> Result<RangeInclusive<u32>> {
    let range = parse_range(arg)?;
    if *range.start() <= 2 {
        bail!("number of qubits must be greater than 2");
    }
    Ok(range)
}

/// Parse the shots argument.
pub fn parse_shot_range(arg: &str) -> Result<RangeInclusive<u32>> {
    let range = parse_range(arg)?;
    if *range.start() == 0 {
        bail!("number of shots must be positive");
    }
    Ok(range)
}

/// First non-existing directory named `base`, `base(1)`, `base(2)`, ...
///
/// Reruns with the same parameters get their own directory instead of
/// appending to an older sweep's CSV.
pub fn unique_results_dir(parent: &Path, base: &str) -> PathBuf {
    let mut candidate = parent.join(base);
    let mut index = 0;
    while candidate.exists() {
        index += 1;
        candidate = parent.join(format!("{base}({index})"));
    }
    candidate
}

/// Clamp the requested core count to the machine, defaulting to all cores.
pub fn effective_cores(requested: Option<u32>) -> u32 {
    let available = std::thread::available_parallelism()
        .map(|n| n.get() as u32)
        .unwrap_or(1);
    match requested {
        Some(n) => n.clamp(1, available),
        None => available,
    }
}

/// `OMP_NUM_THREADS`-family variables external engines honour.
pub fn thread_env(cores: u32) -> Vec<(String, String)> {
    [
        "OMP_NUM_THREADS",
        "MKL_NUM_THREADS",
        "NUMEXPR_NUM_THREADS",
        "VECLIB_MAXIMUM_THREADS",
        "OPENBLAS_NUM_THREADS",
    ]
    .iter()
    .map(|&key| (key.to_string(), cores.to_string()))
    .collect()
}
