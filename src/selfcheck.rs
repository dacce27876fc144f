//! Round-trip self-check
//!
//! Opens embedded names through the VFS and compares them byte for byte with
//! the files of the same relative name under a working directory. A program
//! that embeds a table can ship the check as its own binary:
//!
//! ```ignore
//! mfs_rs::include_mfs!();
//!
//! fn main() -> std::process::ExitCode {
//!     mfs_rs::selfcheck::main(MFS_TABLE)
//! }
//! ```

use crate::descriptor::FileDescriptor;
use crate::error::{MfsError, Result};
use crate::vfs::{self, Vfs};
use clap::{Args, Parser};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;

/// Options of the self-check
#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// Directory holding the original files
    #[arg(long, default_value = ".")]
    pub cwd: PathBuf,

    /// Check a single logical name instead of every embedded file
    #[arg(long)]
    pub name: Option<String>,
}

impl Default for CheckArgs {
    fn default() -> Self {
        Self {
            cwd: PathBuf::from("."),
            name: None,
        }
    }
}

#[derive(Parser)]
#[command(name = "mfs-check", version)]
#[command(about = "Verify that embedded files round-trip to their on-disk originals")]
struct CheckCli {
    #[command(flatten)]
    args: CheckArgs,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Compare one name read through `vfs` with `cwd/name`
pub fn check_name(vfs: &Vfs, cwd: &Path, name: &str) -> Result<()> {
    let embedded = vfs.read(name)?;

    let disk_path = cwd.join(name);
    let on_disk = std::fs::read(&disk_path).map_err(|source| MfsError::SourceFile {
        path: disk_path,
        source,
    })?;

    if embedded != on_disk {
        return Err(MfsError::Mismatch {
            name: name.to_string(),
            embedded: embedded.len(),
            on_disk: on_disk.len(),
        });
    }
    debug!(name, bytes = embedded.len(), "round-trip ok");
    Ok(())
}

/// Check the selected names, writing `SUCCESS: <name>` for each match
///
/// Stops at the first mismatch or I/O error. Returns the checked names.
pub fn run<W: Write>(vfs: &Vfs, args: &CheckArgs, out: &mut W) -> Result<Vec<String>> {
    let names = match &args.name {
        Some(name) => vec![name.clone()],
        None => {
            let mut names = vfs.list();
            names.sort();
            names
        }
    };

    for name in &names {
        check_name(vfs, &args.cwd, name)?;
        writeln!(out, "SUCCESS: {}", name)?;
    }
    Ok(names)
}

/// Entry point for a self-check binary over a generated table
///
/// Parses `--cwd` and `--name` from the command line, installs `table` as
/// the process-wide VFS and checks it.
pub fn main(table: &'static [FileDescriptor]) -> ExitCode {
    let cli = CheckCli::parse();
    crate::logging::init(cli.verbose);

    let result = vfs::init(table).and_then(|()| {
        let stdout = std::io::stdout();
        run(vfs::global(), &cli.args, &mut stdout.lock())
    });

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
