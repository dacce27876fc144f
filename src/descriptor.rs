//! The descriptor record shared by the generator and the runtime table
//!
//! The packer builds descriptors, the emitter renders them as Rust literals
//! of this very type, and the VFS serves them. There is no second copy of
//! the schema.

use crate::codec::CompressionMethod;
use crate::error::{MfsError, Result};
use serde::Serialize;
use std::borrow::Cow;

/// One embedded file
///
/// Emitted tables borrow `'static` data; descriptors built at runtime own it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Logical name (the lookup key)
    pub name: Cow<'static, str>,
    /// Concrete algorithm the content is stored under
    pub comp: CompressionMethod,
    /// Decompressed byte count
    pub size_orig: u64,
    /// Stored byte count, always `content.len()`
    pub size_comp: u64,
    /// Stored bytes
    pub content: Cow<'static, [u8]>,
}

impl FileDescriptor {
    /// Build an owned descriptor; `size_comp` is taken from `content`
    pub fn new(
        name: impl Into<String>,
        comp: CompressionMethod,
        size_orig: u64,
        content: Vec<u8>,
    ) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            comp,
            size_orig,
            size_comp: content.len() as u64,
            content: Cow::Owned(content),
        }
    }

    /// Check the size invariants
    pub fn validate(&self) -> Result<()> {
        if self.size_comp != self.content.len() as u64 {
            return Err(MfsError::CorruptEntry {
                name: self.name.to_string(),
                reason: format!(
                    "size_comp {} does not match stored length {}",
                    self.size_comp,
                    self.content.len()
                ),
            });
        }
        if self.comp == CompressionMethod::None && self.size_orig != self.size_comp {
            return Err(MfsError::CorruptEntry {
                name: self.name.to_string(),
                reason: format!(
                    "uncompressed entry declares {} bytes but stores {}",
                    self.size_orig, self.size_comp
                ),
            });
        }
        Ok(())
    }

    /// Metadata without content
    pub fn stat(&self) -> EntryStat {
        EntryStat {
            name: self.name.to_string(),
            comp: self.comp,
            size_orig: self.size_orig,
            size_comp: self.size_comp,
        }
    }
}

/// Descriptor metadata, for listings and reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryStat {
    pub name: String,
    pub comp: CompressionMethod,
    pub size_orig: u64,
    pub size_comp: u64,
}
