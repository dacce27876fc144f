use crate::descriptor::FileDescriptor;
use crate::error::{MfsError, Result};
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;
use tempfile::NamedTempFile;

/// File name of the emitted artifact
pub const DEFAULT_ARTIFACT_NAME: &str = "mfs_data.rs";

/// Path under which emitted code refers to this crate
pub const DEFAULT_CRATE_PATH: &str = "::mfs_rs";

/// Identifier of the emitted table
pub const TABLE_IDENT: &str = "MFS_TABLE";

const BYTES_PER_LINE: usize = 32;

/// Render descriptors as a Rust source file defining `MFS_TABLE`
///
/// Entries are sorted by name so the output is reproducible.
pub fn render_artifact<'a, I>(descriptors: I, crate_path: &str) -> String
where
    I: IntoIterator<Item = &'a FileDescriptor>,
{
    let mut sorted: Vec<&FileDescriptor> = descriptors.into_iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let mut out = String::new();
    out.push_str("// @generated by mfs-gen. Do not edit.\n\n");
    // Writing into a String cannot fail
    let _ = writeln!(
        out,
        "pub static {}: &[{}::FileDescriptor] = &[",
        TABLE_IDENT, crate_path
    );
    for desc in sorted {
        let _ = writeln!(out, "    {}::FileDescriptor {{", crate_path);
        let _ = writeln!(
            out,
            "        name: ::std::borrow::Cow::Borrowed({:?}),",
            desc.name
        );
        let _ = writeln!(
            out,
            "        comp: {}::CompressionMethod::{},",
            crate_path,
            desc.comp.variant_name()
        );
        let _ = writeln!(out, "        size_orig: {},", desc.size_orig);
        let _ = writeln!(out, "        size_comp: {},", desc.size_comp);
        out.push_str("        content: ::std::borrow::Cow::Borrowed(");
        push_byte_string(&mut out, &desc.content);
        out.push_str("),\n");
        out.push_str("    },\n");
    }
    out.push_str("];\n");
    out
}

/// Append `bytes` as a byte string literal, wrapped with line continuations
fn push_byte_string(out: &mut String, bytes: &[u8]) {
    if bytes.is_empty() {
        out.push_str("b\"\"");
        return;
    }
    out.push_str("b\"\\\n");
    for line in bytes.chunks(BYTES_PER_LINE) {
        out.push_str("            ");
        for byte in line {
            let _ = write!(out, "\\x{:02X}", byte);
        }
        out.push_str("\\\n");
    }
    out.push_str("        \"");
}

/// Replace `path` with `contents`
///
/// The file is staged next to its destination and renamed into place; on
/// unix it ends up with mode 0660.
pub fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    let wrap = |source| MfsError::ArtifactWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir).map_err(wrap)?;
    staged.write_all(contents.as_bytes()).map_err(wrap)?;
    staged.as_file().sync_all().map_err(wrap)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        staged
            .as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o660))
            .map_err(wrap)?;
    }

    staged.persist(path).map_err(|e| wrap(e.error))?;
    Ok(())
}
