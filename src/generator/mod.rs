//! Generator: manifest -> packed descriptors -> Rust source artifact
//!
//! Usable from the `mfs-gen` binary or directly from a `build.rs`:
//!
//! ```no_run
//! use mfs_rs::generator::{Generator, GeneratorConfig};
//!
//! let config = GeneratorConfig {
//!     out_dir: std::env::var_os("OUT_DIR").unwrap().into(),
//!     ..Default::default()
//! };
//! let report = Generator::new(config).run()?;
//! for source in &report.sources {
//!     println!("cargo:rerun-if-changed={}", source.display());
//! }
//! # Ok::<(), mfs_rs::MfsError>(())
//! ```

mod emitter;
mod packer;

pub use emitter::{
    render_artifact, write_artifact, DEFAULT_ARTIFACT_NAME, DEFAULT_CRATE_PATH, TABLE_IDENT,
};
pub use packer::{build_table, pack_bytes, pack_entry, resolve_path};

use crate::descriptor::EntryStat;
use crate::error::Result;
use crate::manifest::{Manifest, DEFAULT_MANIFEST};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

/// Generator settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Manifest to read
    pub manifest_path: PathBuf,
    /// Directory the artifact is written to
    pub out_dir: PathBuf,
    /// Artifact file name inside `out_dir`
    pub artifact_name: String,
    /// Path the emitted code uses to name this crate
    pub crate_path: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            manifest_path: PathBuf::from(DEFAULT_MANIFEST),
            out_dir: PathBuf::from("."),
            artifact_name: DEFAULT_ARTIFACT_NAME.to_string(),
            crate_path: DEFAULT_CRATE_PATH.to_string(),
        }
    }
}

impl GeneratorConfig {
    pub fn artifact_path(&self) -> PathBuf {
        self.out_dir.join(&self.artifact_name)
    }
}

/// What a generator run produced
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub artifact: PathBuf,
    /// Per-entry metadata, sorted by name
    pub entries: Vec<EntryStat>,
    /// Host files that were read, in manifest order
    pub sources: Vec<PathBuf>,
}

impl GenerationReport {
    pub fn total_orig(&self) -> u64 {
        self.entries.iter().map(|e| e.size_orig).sum()
    }

    pub fn total_stored(&self) -> u64 {
        self.entries.iter().map(|e| e.size_comp).sum()
    }
}

pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Load the configured manifest and generate the artifact
    pub fn run(&self) -> Result<GenerationReport> {
        let manifest = Manifest::from_path(&self.config.manifest_path)?;
        self.run_with(&manifest)
    }

    /// Generate the artifact from an already loaded manifest
    pub fn run_with(&self, manifest: &Manifest) -> Result<GenerationReport> {
        let table = build_table(manifest)?;
        let source = render_artifact(table.values(), &self.config.crate_path);

        let artifact = self.config.artifact_path();
        write_artifact(&artifact, &source)?;

        let report = GenerationReport {
            artifact,
            entries: table.values().map(|desc| desc.stat()).collect(),
            sources: manifest
                .entries()
                .map(|(group, entry)| resolve_path(group, entry))
                .collect(),
        };
        info!(
            artifact = %report.artifact.display(),
            entries = report.entries.len(),
            size_orig = report.total_orig(),
            size_stored = report.total_stored(),
            "wrote artifact"
        );
        Ok(report)
    }
}
