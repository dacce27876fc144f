use crate::codec::{self, CompressionMethod, Decoder};
use crate::descriptor::FileDescriptor;
use crate::error::Result;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::sync::Arc;

/// Stored bytes of a descriptor, kept alive by the stream reading them
#[derive(Clone)]
pub(crate) struct Blob(Arc<FileDescriptor>);

impl AsRef<[u8]> for Blob {
    fn as_ref(&self) -> &[u8] {
        &self.0.content
    }
}

/// Fails a stream that yields more or fewer bytes than declared
pub(crate) struct SizeChecked<R> {
    inner: R,
    expected: u64,
    produced: u64,
}

impl<R: Read> SizeChecked<R> {
    pub(crate) fn new(inner: R, expected: u64) -> Self {
        Self {
            inner,
            expected,
            produced: 0,
        }
    }
}

impl<R: Read> Read for SizeChecked<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.produced += n as u64;

        if self.produced > self.expected {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "stream exceeds its declared size of {} bytes",
                    self.expected
                ),
            ));
        }
        if n == 0 && !buf.is_empty() && self.produced != self.expected {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "stream ended after {} of {} bytes",
                    self.produced, self.expected
                ),
            ));
        }
        Ok(n)
    }
}

/// Where the bytes of a [`VfsFile`] come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Embedded table entry stored under the given method
    Embedded(CompressionMethod),
    /// Host filesystem fallthrough
    Host,
}

enum Inner {
    Embedded(SizeChecked<Decoder<Blob>>),
    Host(File),
    Closed,
}

/// Read stream returned by `open`, yielding the original bytes
///
/// Each stream owns its decoder state; streams over the same entry are
/// independent. Dropping the stream closes it.
pub struct VfsFile {
    name: String,
    origin: Origin,
    inner: Inner,
}

impl VfsFile {
    pub(crate) fn embedded(descriptor: Arc<FileDescriptor>) -> Result<Self> {
        let name = descriptor.name.to_string();
        let comp = descriptor.comp;
        let size_orig = descriptor.size_orig;
        let decoder = codec::decoder(comp, Blob(descriptor))?;

        Ok(Self {
            name,
            origin: Origin::Embedded(comp),
            inner: Inner::Embedded(SizeChecked::new(decoder, size_orig)),
        })
    }

    pub(crate) fn host(name: &str, file: File) -> Self {
        Self {
            name: name.to_string(),
            origin: Origin::Host,
            inner: Inner::Host(file),
        }
    }

    /// Name the stream was opened with
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self.origin, Origin::Embedded(_))
    }

    /// Release the decoder or host file handle. Calling it again is a no-op.
    pub fn close(&mut self) {
        self.inner = Inner::Closed;
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.inner, Inner::Closed)
    }
}

impl Read for VfsFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.inner {
            Inner::Embedded(reader) => reader.read(buf),
            Inner::Host(file) => file.read(buf),
            Inner::Closed => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("{}: read on closed stream", self.name),
            )),
        }
    }
}

impl fmt::Debug for VfsFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VfsFile")
            .field("name", &self.name)
            .field("origin", &self.origin)
            .field("closed", &self.is_closed())
            .finish()
    }
}
