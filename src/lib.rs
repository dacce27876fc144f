//! mfs-rs: build-time file embedding with a read-only runtime VFS
//!
//! - A manifest lists host files to embed, with a compression policy each
//! - The generator compresses every file (`none`, `gzip`, `lzw`, `zlib`, or
//!   the smallest of those under `auto`) and emits a Rust source file holding
//!   a static descriptor table
//! - The runtime VFS opens embedded names as decompressing streams, falls
//!   through to the host filesystem for unknown names, and can forget entries
//!
//! # Example
//!
//! `build.rs`:
//!
//! ```no_run
//! use mfs_rs::{Generator, GeneratorConfig};
//!
//! let report = Generator::new(GeneratorConfig {
//!     out_dir: std::env::var_os("OUT_DIR").unwrap().into(),
//!     ..Default::default()
//! })
//! .run()?;
//! # Ok::<(), mfs_rs::MfsError>(())
//! ```
//!
//! `main.rs`:
//!
//! ```ignore
//! mfs_rs::include_mfs!();
//!
//! fn main() -> mfs_rs::Result<()> {
//!     mfs_rs::init(MFS_TABLE)?;
//!     let data = mfs_rs::read("hello.txt")?;
//!     # let _ = data;
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod descriptor;
pub mod error;
pub mod generator;
pub mod logging;
pub mod manifest;
pub mod selfcheck;
pub mod vfs;

pub use codec::CompressionMethod;
pub use descriptor::{EntryStat, FileDescriptor};
pub use error::{MfsError, Result};
pub use generator::{GenerationReport, Generator, GeneratorConfig};
pub use manifest::{CompressionPolicy, Manifest};
pub use vfs::{
    contains, forget, global, init, install, list, open, read, stat, Origin, Vfs, VfsFile,
};

/// Include an artifact written by the generator into `OUT_DIR`
///
/// Without arguments the default `mfs_data.rs` is included, bringing
/// `MFS_TABLE` into scope.
#[macro_export]
macro_rules! include_mfs {
    () => {
        include!(concat!(env!("OUT_DIR"), "/mfs_data.rs"));
    };
    ($file:literal) => {
        include!(concat!(env!("OUT_DIR"), "/", $file));
    };
}
