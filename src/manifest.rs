//! Manifest describing which host files to embed
//!
//! # Format
//!
//! The default manifest is YAML (`mfs.yaml`). A top-level `mfs` list holds
//! groups; each group names a directory and its entries:
//!
//! ```yaml
//! mfs:
//!   - dir: assets
//!     entry:
//!       - name: index.html          # read from assets/index.html
//!       - name: app.js
//!         path: dist/app.min.js     # read from assets/dist/app.min.js
//!         comp: gzip
//!       - name: logo.png
//!         comp: none
//! ```
//!
//! `comp` is one of `none`, `gzip`, `lzw`, `zlib` or `auto` (the default).
//! Manifests ending in `.toml` or `.json` are read with the same schema.
//!
//! Logical names must be unique across all groups. Unknown `comp` values
//! and duplicate names are rejected when the manifest is loaded.

use crate::codec::CompressionMethod;
use crate::error::{MfsError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Default manifest file name
pub const DEFAULT_MANIFEST: &str = "mfs.yaml";

/// Parsed manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(rename = "mfs")]
    pub groups: Vec<Group>,
}

/// Entries sharing a directory prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Group {
    pub dir: PathBuf,

    #[serde(rename = "entry", default)]
    pub entries: Vec<Entry>,
}

/// One file to embed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Entry {
    /// Logical VFS name
    pub name: String,

    /// Path relative to the group directory, defaults to `name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    #[serde(default)]
    pub comp: CompressionPolicy,
}

/// Compression requested for an entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionPolicy {
    None,
    Gzip,
    Lzw,
    Zlib,
    /// Pick the smallest of all methods at generation time
    #[default]
    Auto,
}

impl CompressionPolicy {
    /// The fixed method, or `None` for `auto`
    pub fn fixed(self) -> Option<CompressionMethod> {
        match self {
            Self::None => Some(CompressionMethod::None),
            Self::Gzip => Some(CompressionMethod::Gzip),
            Self::Lzw => Some(CompressionMethod::Lzw),
            Self::Zlib => Some(CompressionMethod::Zlib),
            Self::Auto => None,
        }
    }
}

/// Serialization format of a manifest file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Yaml,
    Toml,
    Json,
}

impl ManifestFormat {
    /// Choose by file extension; anything unrecognised is YAML
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("toml") => Self::Toml,
            Some("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

impl Manifest {
    /// Read and validate a manifest file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| MfsError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, ManifestFormat::from_path(path))
    }

    /// Parse and validate manifest text
    pub fn parse(text: &str, format: ManifestFormat) -> Result<Self> {
        let manifest: Manifest = match format {
            ManifestFormat::Yaml => serde_yaml::from_str(text)?,
            ManifestFormat::Toml => toml::from_str(text)?,
            ManifestFormat::Json => serde_json::from_str(text)?,
        };
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Self::parse(text, ManifestFormat::Yaml)
    }

    /// Reject empty and duplicate logical names
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for group in &self.groups {
            for entry in &group.entries {
                if entry.name.is_empty() {
                    return Err(MfsError::InvalidManifest(format!(
                        "entry with an empty name in group {}",
                        group.dir.display()
                    )));
                }
                if !seen.insert(entry.name.as_str()) {
                    return Err(MfsError::DuplicateName(entry.name.clone()));
                }
            }
        }
        Ok(())
    }

    /// All entries with their group, in manifest order
    pub fn entries(&self) -> impl Iterator<Item = (&Group, &Entry)> {
        self.groups
            .iter()
            .flat_map(|group| group.entries.iter().map(move |entry| (group, entry)))
    }

    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|group| group.entries.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = "\
mfs:
  - dir: assets
    entry:
      - name: hello.txt
        comp: none
      - name: app.js
        path: dist/app.min.js
        comp: gzip
      - name: data.bin
  - dir: /opt/shared
    entry:
      - name: table.dat
        comp: lzw
";

    #[test]
    fn test_parse_yaml() {
        let manifest = Manifest::from_yaml_str(YAML).unwrap();
        assert_eq!(manifest.groups.len(), 2);
        assert_eq!(manifest.entry_count(), 4);

        let group = &manifest.groups[0];
        assert_eq!(group.dir, PathBuf::from("assets"));
        assert_eq!(group.entries[0].comp, CompressionPolicy::None);
        assert_eq!(group.entries[0].path, None);
        assert_eq!(
            group.entries[1].path.as_deref(),
            Some(Path::new("dist/app.min.js"))
        );
        assert_eq!(group.entries[1].comp, CompressionPolicy::Gzip);
        assert_eq!(group.entries[2].comp, CompressionPolicy::Auto);
        assert_eq!(manifest.groups[1].entries[0].comp, CompressionPolicy::Lzw);
    }

    #[test]
    fn test_entries_iterator_order() {
        let manifest = Manifest::from_yaml_str(YAML).unwrap();
        let names: Vec<_> = manifest.entries().map(|(_, e)| e.name.as_str()).collect();
        assert_eq!(names, ["hello.txt", "app.js", "data.bin", "table.dat"]);
    }

    #[test]
    fn test_unknown_comp_rejected() {
        let yaml = "mfs:\n  - dir: a\n    entry:\n      - name: x\n        comp: brotli\n";
        let err = Manifest::from_yaml_str(yaml).unwrap_err();
        match err {
            MfsError::ManifestParseFailed(msg) => assert!(msg.contains("brotli"), "{}", msg),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let yaml = "\
mfs:
  - dir: a
    entry:
      - name: same.txt
  - dir: b
    entry:
      - name: same.txt
";
        assert!(matches!(
            Manifest::from_yaml_str(yaml),
            Err(MfsError::DuplicateName(name)) if name == "same.txt"
        ));
    }

    #[test]
    fn test_empty_name_rejected() {
        let yaml = "mfs:\n  - dir: a\n    entry:\n      - name: \"\"\n";
        assert!(matches!(
            Manifest::from_yaml_str(yaml),
            Err(MfsError::InvalidManifest(_))
        ));
    }

    #[test]
    fn test_missing_name_rejected() {
        let yaml = "mfs:\n  - dir: a\n    entry:\n      - path: x.txt\n";
        assert!(matches!(
            Manifest::from_yaml_str(yaml),
            Err(MfsError::ManifestParseFailed(_))
        ));
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[[mfs]]
dir = "assets"

[[mfs.entry]]
name = "hello.txt"
comp = "zlib"

[[mfs.entry]]
name = "other.txt"
"#;
        let manifest = Manifest::parse(toml, ManifestFormat::Toml).unwrap();
        assert_eq!(manifest.entry_count(), 2);
        assert_eq!(manifest.groups[0].entries[0].comp, CompressionPolicy::Zlib);
        assert_eq!(manifest.groups[0].entries[1].comp, CompressionPolicy::Auto);
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{"mfs":[{"dir":"web","entry":[{"name":"index.html","comp":"auto"}]}]}"#;
        let manifest = Manifest::parse(json, ManifestFormat::Json).unwrap();
        assert_eq!(manifest.groups[0].dir, PathBuf::from("web"));
        assert_eq!(manifest.groups[0].entries[0].comp, CompressionPolicy::Auto);
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ManifestFormat::from_path(Path::new("mfs.yaml")), ManifestFormat::Yaml);
        assert_eq!(ManifestFormat::from_path(Path::new("mfs.yml")), ManifestFormat::Yaml);
        assert_eq!(ManifestFormat::from_path(Path::new("mfs.TOML")), ManifestFormat::Toml);
        assert_eq!(ManifestFormat::from_path(Path::new("mfs.json")), ManifestFormat::Json);
        assert_eq!(ManifestFormat::from_path(Path::new("mfs")), ManifestFormat::Yaml);
    }

    #[test]
    fn test_empty_document_rejected() {
        for text in ["", "\n", "# nothing here\n"] {
            assert!(
                matches!(Manifest::from_yaml_str(text), Err(MfsError::ManifestParseFailed(_))),
                "{:?}",
                text
            );
        }
        assert!(Manifest::parse("", ManifestFormat::Toml).is_err());
        assert!(Manifest::parse("{}", ManifestFormat::Json).is_err());
    }

    #[test]
    fn test_misspelled_keys_rejected() {
        let top = "mfx:\n  - dir: a\n    entry:\n      - name: x\n";
        match Manifest::from_yaml_str(top).unwrap_err() {
            MfsError::ManifestParseFailed(msg) => assert!(msg.contains("mfx"), "{}", msg),
            other => panic!("unexpected error: {}", other),
        }

        let group = "mfs:\n  - dir: a\n    entries:\n      - name: x\n";
        assert!(matches!(
            Manifest::from_yaml_str(group),
            Err(MfsError::ManifestParseFailed(_))
        ));

        let entry = "mfs:\n  - dir: a\n    entry:\n      - name: x\n        compression: gzip\n";
        assert!(matches!(
            Manifest::from_yaml_str(entry),
            Err(MfsError::ManifestParseFailed(_))
        ));
    }

    #[test]
    fn test_missing_manifest_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Manifest::from_path(dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, MfsError::ManifestRead { .. }));
    }

    #[test]
    fn test_policy_fixed() {
        assert_eq!(CompressionPolicy::Auto.fixed(), None);
        assert_eq!(CompressionPolicy::Lzw.fixed(), Some(CompressionMethod::Lzw));
        assert_eq!(CompressionPolicy::None.fixed(), Some(CompressionMethod::None));
    }
}
