//! Compression codecs shared by the generator and the runtime reader
//!
//! Every embedded file is stored under exactly one [`CompressionMethod`].
//! The generator compresses with [`compress`]; the reader wraps the stored
//! bytes with [`decoder`] and streams the original content back out.

use crate::error::{MfsError, Result};
use flate2::read::{GzDecoder, ZlibDecoder};
use flate2::write::{GzEncoder, ZlibEncoder};
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Cursor, Read, Write};

pub mod lzw;
pub mod select;

pub use lzw::{LzwReader, LZW_BIT_ORDER, LZW_LITERAL_WIDTH};
pub use select::{pick_smallest, select_smallest, Selection, AUTO_PREFERENCE};

/// Concrete storage algorithm of an embedded file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionMethod {
    None,
    Gzip,
    Lzw,
    Zlib,
}

impl CompressionMethod {
    /// Lowercase tag used in manifests and logs
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Gzip => "gzip",
            Self::Lzw => "lzw",
            Self::Zlib => "zlib",
        }
    }

    /// Variant identifier as it appears in emitted Rust source
    pub fn variant_name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Gzip => "Gzip",
            Self::Lzw => "Lzw",
            Self::Zlib => "Zlib",
        }
    }
}

impl fmt::Display for CompressionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Compress `data` under `method`
///
/// gzip and zlib use the best compression level; `None` copies the input.
pub fn compress(data: &[u8], method: CompressionMethod) -> Result<Vec<u8>> {
    match method {
        CompressionMethod::None => Ok(data.to_vec()),
        CompressionMethod::Gzip => compress_gzip(data),
        CompressionMethod::Lzw => lzw::encode(data),
        CompressionMethod::Zlib => compress_zlib(data),
    }
}

fn compress_gzip(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder
        .write_all(data)
        .and_then(|()| encoder.finish())
        .map_err(|e| MfsError::CompressionFailed(format!("gzip compression failed: {}", e)))
}

fn compress_zlib(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder
        .write_all(data)
        .and_then(|()| encoder.finish())
        .map_err(|e| MfsError::CompressionFailed(format!("zlib compression failed: {}", e)))
}

/// Streaming decoder over a stored blob
pub enum Decoder<B> {
    Raw(Cursor<B>),
    Gzip(GzDecoder<Cursor<B>>),
    Zlib(ZlibDecoder<Cursor<B>>),
    Lzw(LzwReader<B>),
}

impl<B: AsRef<[u8]>> Read for Decoder<B> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Decoder::Raw(r) => r.read(buf),
            Decoder::Gzip(r) => r.read(buf),
            Decoder::Zlib(r) => r.read(buf),
            Decoder::Lzw(r) => r.read(buf),
        }
    }
}

/// Build a decoder for `blob` stored under `method`
///
/// gzip and zlib headers are validated up front so a malformed container
/// fails here rather than on the first read.
pub fn decoder<B: AsRef<[u8]>>(method: CompressionMethod, blob: B) -> Result<Decoder<B>> {
    match method {
        CompressionMethod::None => Ok(Decoder::Raw(Cursor::new(blob))),
        CompressionMethod::Gzip => {
            check_gzip_header(blob.as_ref())?;
            Ok(Decoder::Gzip(GzDecoder::new(Cursor::new(blob))))
        }
        CompressionMethod::Zlib => {
            check_zlib_header(blob.as_ref())?;
            Ok(Decoder::Zlib(ZlibDecoder::new(Cursor::new(blob))))
        }
        CompressionMethod::Lzw => Ok(Decoder::Lzw(LzwReader::new(blob))),
    }
}

/// Decode a whole blob into memory
pub fn decode_all(method: CompressionMethod, data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    decoder(method, data)?
        .read_to_end(&mut out)
        .map_err(|e| MfsError::DecompressionFailed(format!("{} stream: {}", method, e)))?;
    Ok(out)
}

fn check_gzip_header(data: &[u8]) -> Result<()> {
    // ID1 ID2 CM FLG MTIME(4) XFL OS
    if data.len() < 10 {
        return Err(MfsError::DecompressionFailed(
            "gzip: truncated header".to_string(),
        ));
    }
    if data[0] != 0x1f || data[1] != 0x8b {
        return Err(MfsError::DecompressionFailed(
            "gzip: invalid header".to_string(),
        ));
    }
    if data[2] != 8 {
        return Err(MfsError::DecompressionFailed(format!(
            "gzip: unsupported compression method {}",
            data[2]
        )));
    }
    Ok(())
}

fn check_zlib_header(data: &[u8]) -> Result<()> {
    if data.len() < 2 {
        return Err(MfsError::DecompressionFailed(
            "zlib: truncated header".to_string(),
        ));
    }
    let (cmf, flg) = (data[0], data[1]);
    if cmf & 0x0f != 8 || cmf >> 4 > 7 {
        return Err(MfsError::DecompressionFailed(format!(
            "zlib: unsupported compression method {:#04x}",
            cmf
        )));
    }
    if (u16::from(cmf) << 8 | u16::from(flg)) % 31 != 0 {
        return Err(MfsError::DecompressionFailed(
            "zlib: invalid header checksum".to_string(),
        ));
    }
    if flg & 0x20 != 0 {
        return Err(MfsError::DecompressionFailed(
            "zlib: preset dictionary not supported".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &[u8] = b"This is test data that should be compressed well when repeated. \
                          This is test data that should be compressed well when repeated. \
                          This is test data that should be compressed well when repeated.";

    #[test]
    fn test_method_names() {
        for method in AUTO_PREFERENCE {
            assert_eq!(method.to_string(), method.as_str());
            assert_eq!(method.variant_name().to_ascii_lowercase(), method.as_str());
        }
        assert_eq!(format!("{:<5}|", CompressionMethod::Lzw), "lzw  |");
    }

    #[test]
    fn test_all_methods_roundtrip() {
        for method in AUTO_PREFERENCE {
            let stored = compress(TEXT, method).unwrap();
            assert_eq!(decode_all(method, &stored).unwrap(), TEXT, "{}", method);
        }
    }

    #[test]
    fn test_none_is_identity() {
        assert_eq!(compress(TEXT, CompressionMethod::None).unwrap(), TEXT);
    }

    #[test]
    fn test_compressors_shrink_repetitive_text() {
        for method in [
            CompressionMethod::Gzip,
            CompressionMethod::Lzw,
            CompressionMethod::Zlib,
        ] {
            let stored = compress(TEXT, method).unwrap();
            assert!(stored.len() < TEXT.len(), "{} did not shrink", method);
        }
    }

    #[test]
    fn test_container_headers() {
        let gz = compress(TEXT, CompressionMethod::Gzip).unwrap();
        assert_eq!(&gz[..3], &[0x1f, 0x8b, 8]);

        let zl = compress(TEXT, CompressionMethod::Zlib).unwrap();
        assert_eq!(zl[0] & 0x0f, 8);
        assert_eq!((u16::from(zl[0]) << 8 | u16::from(zl[1])) % 31, 0);
    }

    #[test]
    fn test_malformed_gzip_fails_construction() {
        assert!(matches!(
            decoder(CompressionMethod::Gzip, &b"not gzip at all"[..]),
            Err(MfsError::DecompressionFailed(_))
        ));
        assert!(matches!(
            decoder(CompressionMethod::Gzip, &[0x1f, 0x8b][..]),
            Err(MfsError::DecompressionFailed(_))
        ));
    }

    #[test]
    fn test_malformed_zlib_fails_construction() {
        assert!(decoder(CompressionMethod::Zlib, &[0x78][..]).is_err());
        // Valid method nibble, wrong FCHECK
        assert!(decoder(CompressionMethod::Zlib, &[0x78, 0x00, 0x00][..]).is_err());
        // Preset dictionary flag
        assert!(decoder(CompressionMethod::Zlib, &[0x78, 0xbb, 0x00][..]).is_err());
    }

    #[test]
    fn test_corrupt_gzip_body_fails_on_read() {
        let mut gz = compress(TEXT, CompressionMethod::Gzip).unwrap();
        let last = gz.len() - 1;
        gz[last] ^= 0xff; // ISIZE trailer
        assert!(decode_all(CompressionMethod::Gzip, &gz).is_err());
    }

    #[test]
    fn test_empty_input_roundtrip() {
        for method in AUTO_PREFERENCE {
            let stored = compress(b"", method).unwrap();
            assert!(decode_all(method, &stored).unwrap().is_empty(), "{}", method);
        }
    }
}
