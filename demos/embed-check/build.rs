use mfs_rs::{Generator, GeneratorConfig};
use std::error::Error;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn Error>> {
    let manifest_path = PathBuf::from("mfs.yaml");

    let report = Generator::new(GeneratorConfig {
        manifest_path: manifest_path.clone(),
        out_dir: std::env::var("OUT_DIR")?.into(),
        ..Default::default()
    })
    .run()?;

    println!("cargo:rerun-if-changed={}", manifest_path.display());
    for source in &report.sources {
        println!("cargo:rerun-if-changed={}", source.display());
    }
    Ok(())
}
