//! Runtime VFS over embedded descriptors
//!
//! A [`Vfs`] maps logical names to descriptors. `open` on a known name
//! returns a decompressing stream; an unknown name falls through to the host
//! filesystem so on-disk files can stand in for embedded ones during
//! development.
//!
//! The process-wide table is set once with [`init`] from the generated
//! `MFS_TABLE` and read through the free functions of this module:
//!
//! ```ignore
//! mfs_rs::include_mfs!();
//!
//! fn main() -> mfs_rs::Result<()> {
//!     mfs_rs::init(MFS_TABLE)?;
//!     let page = mfs_rs::read("index.html")?;
//!     mfs_rs::forget("index.html");
//!     Ok(())
//! }
//! ```

mod stream;

pub use stream::{Origin, VfsFile};

use crate::descriptor::{EntryStat, FileDescriptor};
use crate::error::{MfsError, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

type Table = HashMap<String, Arc<FileDescriptor>>;

/// Name -> descriptor table with host filesystem fallthrough
///
/// `open`, `list`, `contains` and `stat` share the table lock; `forget`
/// takes it exclusively. Streams hold their own reference to the entry, so
/// forgetting a name while it is being read is safe.
#[derive(Debug, Default)]
pub struct Vfs {
    table: RwLock<Table>,
    fallback_root: Option<PathBuf>,
}

impl Vfs {
    /// Empty table; every name falls through
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table, validating each descriptor and rejecting duplicates
    pub fn from_descriptors<I>(descriptors: I) -> Result<Self>
    where
        I: IntoIterator<Item = FileDescriptor>,
    {
        let mut table = Table::new();
        for descriptor in descriptors {
            descriptor.validate()?;
            let name = descriptor.name.to_string();
            if table.contains_key(&name) {
                return Err(MfsError::DuplicateName(name));
            }
            table.insert(name, Arc::new(descriptor));
        }
        debug!(entries = table.len(), "VFS table built");

        Ok(Self {
            table: RwLock::new(table),
            fallback_root: None,
        })
    }

    /// Build a table from a generated static slice without copying content
    pub fn from_static(table: &'static [FileDescriptor]) -> Result<Self> {
        Self::from_descriptors(table.iter().cloned())
    }

    /// Resolve fallthrough names against `root` instead of the working directory
    pub fn with_fallback_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.fallback_root = Some(root.into());
        self
    }

    pub fn fallback_root(&self) -> Option<&Path> {
        self.fallback_root.as_deref()
    }

    fn read_table(&self) -> RwLockReadGuard<'_, Table> {
        // Every critical section is a single map operation
        self.table.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_table(&self) -> RwLockWriteGuard<'_, Table> {
        self.table.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn host_path(&self, name: &str) -> PathBuf {
        match &self.fallback_root {
            Some(root) => root.join(name),
            None => PathBuf::from(name),
        }
    }

    /// Open a stream over the original bytes of `name`
    ///
    /// Unknown names open the host file of that name; a missing host file is
    /// an `Io` error of kind `NotFound`.
    pub fn open(&self, name: &str) -> Result<VfsFile> {
        let entry = self.read_table().get(name).cloned();
        match entry {
            Some(descriptor) => {
                descriptor.validate()?;
                debug!(name, comp = %descriptor.comp, "open embedded");
                VfsFile::embedded(descriptor)
            }
            None => {
                let path = self.host_path(name);
                debug!(name, path = %path.display(), "open host file");
                let file = File::open(&path)?;
                Ok(VfsFile::host(name, file))
            }
        }
    }

    /// Open `name` and read it to the end
    pub fn read(&self, name: &str) -> Result<Vec<u8>> {
        let mut file = self.open(name)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Names currently in the table, in no particular order
    pub fn list(&self) -> Vec<String> {
        self.read_table().keys().cloned().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read_table().contains_key(name)
    }

    pub fn stat(&self, name: &str) -> Option<EntryStat> {
        self.read_table().get(name).map(|desc| desc.stat())
    }

    pub fn len(&self) -> usize {
        self.read_table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_table().is_empty()
    }

    /// Drop `name` from the table; later opens fall through to the host
    ///
    /// Returns whether the name was present. The content is freed once the
    /// last open stream over it is closed.
    pub fn forget(&self, name: &str) -> bool {
        let removed = self.write_table().remove(name).is_some();
        if removed {
            debug!(name, "forgot entry");
        }
        removed
    }
}

static GLOBAL: OnceLock<Vfs> = OnceLock::new();

/// Install the process-wide table from a generated slice
///
/// Fails with `AlreadyInitialized` if a table was installed before or the
/// process-wide VFS was already used.
pub fn init(table: &'static [FileDescriptor]) -> Result<()> {
    install(Vfs::from_static(table)?)
}

/// Install a prepared [`Vfs`] as the process-wide table
pub fn install(vfs: Vfs) -> Result<()> {
    GLOBAL.set(vfs).map_err(|_| MfsError::AlreadyInitialized)
}

/// The process-wide table; empty if nothing was installed
pub fn global() -> &'static Vfs {
    GLOBAL.get_or_init(Vfs::new)
}

pub fn open(name: &str) -> Result<VfsFile> {
    global().open(name)
}

pub fn read(name: &str) -> Result<Vec<u8>> {
    global().read(name)
}

pub fn list() -> Vec<String> {
    global().list()
}

pub fn contains(name: &str) -> bool {
    global().contains(name)
}

pub fn stat(name: &str) -> Option<EntryStat> {
    global().stat(name)
}

pub fn forget(name: &str) -> bool {
    global().forget(name)
}
