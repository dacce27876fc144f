//! mfs-gen: pack the files named by a manifest into a Rust source artifact

use anyhow::{Context, Result};
use clap::Parser;
use mfs_rs::generator::{DEFAULT_ARTIFACT_NAME, DEFAULT_CRATE_PATH};
use mfs_rs::manifest::DEFAULT_MANIFEST;
use mfs_rs::{Generator, GeneratorConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mfs-gen")]
#[command(author, version, long_about = None)]
#[command(about = "Embed files listed in a manifest as a compressed Rust table")]
struct Cli {
    /// Manifest to read (.yaml, .toml or .json)
    #[arg(short, long, default_value = DEFAULT_MANIFEST)]
    manifest: PathBuf,

    /// Directory the artifact is written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Artifact file name
    #[arg(long, default_value = DEFAULT_ARTIFACT_NAME)]
    artifact: String,

    /// Path the generated code uses to refer to the runtime crate
    #[arg(long, default_value = DEFAULT_CRATE_PATH)]
    crate_path: String,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    mfs_rs::logging::init(cli.verbose);

    let generator = Generator::new(GeneratorConfig {
        manifest_path: cli.manifest,
        out_dir: cli.out_dir,
        artifact_name: cli.artifact,
        crate_path: cli.crate_path,
    });

    let report = generator.run().with_context(|| {
        format!(
            "failed to generate from {}",
            generator.config().manifest_path.display()
        )
    })?;

    for entry in &report.entries {
        println!(
            "{:<32} {:<5} {:>10} -> {:>10}",
            entry.name, entry.comp, entry.size_orig, entry.size_comp
        );
    }
    println!(
        "wrote {} ({} entries, {} -> {} bytes)",
        report.artifact.display(),
        report.entries.len(),
        report.total_orig(),
        report.total_stored()
    );

    Ok(())
}
