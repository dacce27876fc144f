use crate::codec::{compress, select_smallest};
use crate::descriptor::FileDescriptor;
use crate::error::{MfsError, Result};
use crate::manifest::{CompressionPolicy, Entry, Group, Manifest};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use tracing::info;

/// On-disk location of an entry: `dir/path`, or `dir/name` without a path
///
/// The relative part always stays under `dir`: a leading root or drive
/// prefix is dropped rather than replacing the group directory.
pub fn resolve_path(group: &Group, entry: &Entry) -> PathBuf {
    let relative = entry
        .path
        .as_deref()
        .unwrap_or_else(|| Path::new(&entry.name));

    let mut resolved = group.dir.clone();
    for component in relative.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {}
            other => resolved.push(other.as_os_str()),
        }
    }
    resolved
}

/// Compress raw bytes under `policy` into a descriptor
pub fn pack_bytes(name: &str, raw: &[u8], policy: CompressionPolicy) -> Result<FileDescriptor> {
    let (comp, stored) = match policy.fixed() {
        Some(method) => (method, compress(raw, method)?),
        None => {
            let selection = select_smallest(raw)?;
            (selection.method, selection.data)
        }
    };
    Ok(FileDescriptor::new(name, comp, raw.len() as u64, stored))
}

/// Read one entry from disk and pack it
pub fn pack_entry(group: &Group, entry: &Entry) -> Result<FileDescriptor> {
    let path = resolve_path(group, entry);
    let raw = std::fs::read(&path).map_err(|source| MfsError::SourceFile {
        path: path.clone(),
        source,
    })?;

    let descriptor = pack_bytes(&entry.name, &raw, entry.comp)?;
    info!(
        name = %entry.name,
        path = %path.display(),
        policy = ?entry.comp,
        comp = %descriptor.comp,
        size_orig = descriptor.size_orig,
        size_comp = descriptor.size_comp,
        "packed entry"
    );
    Ok(descriptor)
}

/// Pack every manifest entry, keyed by logical name
pub fn build_table(manifest: &Manifest) -> Result<BTreeMap<String, FileDescriptor>> {
    let mut table = BTreeMap::new();
    for (group, entry) in manifest.entries() {
        let descriptor = pack_entry(group, entry)?;
        if table.insert(entry.name.clone(), descriptor).is_some() {
            return Err(MfsError::DuplicateName(entry.name.clone()));
        }
    }
    Ok(table)
}
