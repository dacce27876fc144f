//! Checks every embedded asset against its original
//!
//! Run from this directory so the originals resolve: `cargo run -- --cwd assets`

use std::process::ExitCode;

mfs_rs::include_mfs!();

fn main() -> ExitCode {
    mfs_rs::selfcheck::main(MFS_TABLE)
}
