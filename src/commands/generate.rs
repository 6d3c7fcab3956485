//! Generate command implementation.
//!
//! Runs the statistics pipeline once, overwriting both documents, and
//! optionally prints a text report.

use super::models::GenerateArgs;
use crate::output::{generate_stats_files, validate_output_path, GeneratedStats};
use anyhow::{Context, Result};
use log::info;
use std::time::Instant;

/// Execute the generate command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * File write errors (missing or malformed inputs only log warnings)
pub fn execute_generate(args: GenerateArgs) -> Result<GeneratedStats> {
    let start_time = Instant::now();
    let config = &args.config;

    info!(
        "Generating statistics from {} (lookup: {})",
        config.data_dir.display(),
        config.lookup_path.display()
    );

    let generated = generate_stats_files(config).context("Failed to write statistics files")?;

    info!("✓ Detailed statistics written to: {}", config.detailed_path().display());
    info!("✓ Simplified statistics written to: {}", config.summary_path().display());

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("QUESTION STATISTICS");
        println!("{}", "=".repeat(80));
        print!("{}", generated.simplified.text_report());
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Generation completed in {:.2}s", elapsed.as_secs_f64());

    Ok(generated)
}

/// Validate generate arguments
///
/// **Public** - can be called before execute_generate for early validation
pub fn validate_args(args: &GenerateArgs) -> Result<()> {
    let config = &args.config;

    if config.data_dir.as_os_str().is_empty() {
        anyhow::bail!("Data directory cannot be empty");
    }

    if config.data_dir.exists() && !config.data_dir.is_dir() {
        anyhow::bail!("Data path is not a directory: {}", config.data_dir.display());
    }

    if config.output_dir.is_file() {
        anyhow::bail!("Output path is a file: {}", config.output_dir.display());
    }

    validate_output_path(&config.detailed_path()).context("Invalid detailed statistics path")?;
    validate_output_path(&config.summary_path()).context("Invalid simplified statistics path")?;

    Ok(())
}
