use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for mfs operations
pub type Result<T> = std::result::Result<T, MfsError>;

/// Unified error type for generator and runtime operations
#[derive(Debug, Error)]
pub enum MfsError {
    // Manifest errors
    #[error("Cannot read manifest {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse manifest: {0}")]
    ManifestParseFailed(String),

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("Duplicate logical name: {0}")]
    DuplicateName(String),

    // Generator errors
    #[error("Cannot read source file {path}: {source}")]
    SourceFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Compression failed: {0}")]
    CompressionFailed(String),

    #[error("Cannot write artifact {path}: {source}")]
    ArtifactWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // Runtime errors
    #[error("Decompression failed: {0}")]
    DecompressionFailed(String),

    #[error("Corrupt entry {name}: {reason}")]
    CorruptEntry { name: String, reason: String },

    #[error("VFS table already initialized")]
    AlreadyInitialized,

    // Self-check errors
    #[error("Round-trip mismatch for {name}: embedded {embedded} bytes, on disk {on_disk} bytes")]
    Mismatch {
        name: String,
        embedded: usize,
        on_disk: usize,
    },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl MfsError {
    /// True when the error is a host filesystem "not found"
    pub fn is_not_found(&self) -> bool {
        matches!(self, MfsError::Io(err) if err.kind() == io::ErrorKind::NotFound)
    }
}

impl From<serde_yaml::Error> for MfsError {
    fn from(err: serde_yaml::Error) -> Self {
        MfsError::ManifestParseFailed(err.to_string())
    }
}

impl From<toml::de::Error> for MfsError {
    fn from(err: toml::de::Error) -> Self {
        MfsError::ManifestParseFailed(err.to_string())
    }
}

impl From<serde_json::Error> for MfsError {
    fn from(err: serde_json::Error) -> Self {
        MfsError::ManifestParseFailed(err.to_string())
    }
}
