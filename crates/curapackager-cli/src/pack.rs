//! Pack command implementation

use crate::output;
use anyhow::{Context, Result};
use curapackager::{PackConfig, pipeline};
use std::path::PathBuf;

/// Run the pack command
pub fn run(
    source: PathBuf,
    plugin_id: Option<String>,
    package_info: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    static_dir: Option<PathBuf>,
) -> Result<()> {
    let mut config = PackConfig::new(source);
    config.plugin_id = plugin_id;
    config.package_info_path = package_info;
    config.output_dir = output_dir;
    config.static_dir = static_dir;

    let report = pipeline::pack(&config).context("Failed to build curapackages")?;

    for package in &report.packages {
        println!(
            "  {} ({} bytes, sha256:{})",
            package.file_name, package.bytes_written, package.sha256
        );
    }

    if !report.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &report.warnings {
            println!("  {warning}");
        }
    }

    println!("\n✓ Built {} package(s)", report.packages.len());

    // Record the produced file names for a surrounding Actions workflow.
    let names = serde_json::to_string(&report.package_names())
        .context("Failed to encode package names")?;
    output::set_output("packages", &names).context("Failed to record step output")?;

    Ok(())
}
