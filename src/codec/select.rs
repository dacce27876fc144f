//! Automatic compression selection
//!
//! The selector tries every compressor and keeps the smallest output. A
//! candidate replaces the current best only when it is strictly smaller, so
//! on exact ties the earlier entry of [`AUTO_PREFERENCE`] wins:
//! none > gzip > lzw > zlib.

use super::{compress, CompressionMethod};
use crate::error::Result;

/// Candidate order for automatic selection, most preferred first
pub const AUTO_PREFERENCE: [CompressionMethod; 4] = [
    CompressionMethod::None,
    CompressionMethod::Gzip,
    CompressionMethod::Lzw,
    CompressionMethod::Zlib,
];

/// Outcome of automatic selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub method: CompressionMethod,
    pub data: Vec<u8>,
}

/// Compress `raw` with every codec and keep the smallest result
pub fn select_smallest(raw: &[u8]) -> Result<Selection> {
    let candidates = AUTO_PREFERENCE[1..]
        .iter()
        .map(|&method| compress(raw, method).map(|data| (method, data)))
        .collect::<Result<Vec<_>>>()?;
    Ok(pick_smallest(raw, candidates))
}

/// Pick the smallest candidate, starting from `raw` stored as-is
///
/// Candidates must be given in preference order.
pub fn pick_smallest<I>(raw: &[u8], candidates: I) -> Selection
where
    I: IntoIterator<Item = (CompressionMethod, Vec<u8>)>,
{
    let mut best: Option<(CompressionMethod, Vec<u8>)> = None;
    let mut best_len = raw.len();

    for (method, data) in candidates {
        if data.len() < best_len {
            best_len = data.len();
            best = Some((method, data));
        }
    }

    match best {
        Some((method, data)) => Selection { method, data },
        None => Selection {
            method: CompressionMethod::None,
            data: raw.to_vec(),
        },
    }
}
