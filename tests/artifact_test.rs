//! Emitted artifact: exact text and compiled behaviour
//!
//! `fixtures/mfs_data.rs` is what the generator writes for the manifest
//! below. It is compared textually and also compiled into this test.

use mfs_rs::generator::{render_artifact, DEFAULT_CRATE_PATH};
use mfs_rs::{CompressionMethod, FileDescriptor, Generator, GeneratorConfig, Vfs};
use std::fs;

include!("fixtures/mfs_data.rs");

const GOLDEN: &str = include_str!("fixtures/mfs_data.rs");

const MOTD: &[u8] = b"Welcome aboard. Mind the gap between the train and the platform.\n";

fn sources() -> Vec<(&'static str, &'static [u8])> {
    vec![
        ("hello.txt", &b"hi\n"[..]),
        ("motd.txt", MOTD),
        ("empty.txt", &b""[..]),
    ]
}

#[test]
fn test_render_matches_golden() {
    let descriptors: Vec<FileDescriptor> = sources()
        .into_iter()
        .map(|(name, raw)| {
            FileDescriptor::new(name, CompressionMethod::None, raw.len() as u64, raw.to_vec())
        })
        .collect();

    assert_eq!(render_artifact(&descriptors, DEFAULT_CRATE_PATH), GOLDEN);
}

#[test]
fn test_generator_writes_golden() {
    let dir = tempfile::tempdir().unwrap();
    let mut yaml = format!("mfs:\n  - dir: {}\n    entry:\n", dir.path().display());
    for (name, raw) in sources() {
        fs::write(dir.path().join(name), raw).unwrap();
        yaml.push_str(&format!("      - name: {}\n        comp: none\n", name));
    }
    let manifest_path = dir.path().join("mfs.yaml");
    fs::write(&manifest_path, yaml).unwrap();

    let report = Generator::new(GeneratorConfig {
        manifest_path,
        out_dir: dir.path().to_path_buf(),
        ..Default::default()
    })
    .run()
    .unwrap();

    assert_eq!(fs::read_to_string(&report.artifact).unwrap(), GOLDEN);
}

#[test]
fn test_compiled_table() {
    let names: Vec<&str> = MFS_TABLE.iter().map(|desc| desc.name.as_ref()).collect();
    assert_eq!(names, ["empty.txt", "hello.txt", "motd.txt"]);

    let vfs = Vfs::from_static(MFS_TABLE).unwrap();
    for (name, raw) in sources() {
        assert_eq!(vfs.read(name).unwrap(), raw, "{}", name);
    }

    let hello = vfs.stat("hello.txt").unwrap();
    assert_eq!(hello.comp, CompressionMethod::None);
    assert_eq!((hello.size_orig, hello.size_comp), (3, 3));
}
