//! LZW bitstream codec
//!
//! Both sides use least-significant-bit-first packing with an 8-bit literal
//! width. A stream written with any other parameters is undecodable here.

use crate::error::{MfsError, Result};
use std::io::{self, Read};
use weezl::decode::Decoder;
use weezl::encode::Encoder;
use weezl::{BitOrder, LzwStatus};

/// Bit packing order of the LZW stream
pub const LZW_BIT_ORDER: BitOrder = BitOrder::Lsb;

/// Width in bits of a literal symbol
pub const LZW_LITERAL_WIDTH: u8 = 8;

/// Encode a whole buffer, terminated with an end code
pub fn encode(data: &[u8]) -> Result<Vec<u8>> {
    Encoder::new(LZW_BIT_ORDER, LZW_LITERAL_WIDTH)
        .encode(data)
        .map_err(|e| MfsError::CompressionFailed(format!("lzw compression failed: {}", e)))
}

/// Streaming LZW decoder over an in-memory blob
///
/// Construction cannot fail; malformed input surfaces as an `InvalidData`
/// error from `read`, and a stream without an end code as `UnexpectedEof`.
pub struct LzwReader<B> {
    src: B,
    pos: usize,
    decoder: Decoder,
    done: bool,
}

impl<B: AsRef<[u8]>> LzwReader<B> {
    pub fn new(src: B) -> Self {
        Self {
            src,
            pos: 0,
            decoder: Decoder::new(LZW_BIT_ORDER, LZW_LITERAL_WIDTH),
            done: false,
        }
    }
}

impl<B: AsRef<[u8]>> Read for LzwReader<B> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.done || buf.is_empty() {
            return Ok(0);
        }

        loop {
            let input = &self.src.as_ref()[self.pos..];
            let result = self.decoder.decode_bytes(input, buf);
            self.pos += result.consumed_in;

            let stalled = result.consumed_in == 0 && result.consumed_out == 0;
            match result.status {
                Ok(LzwStatus::Done) => {
                    self.done = true;
                    return Ok(result.consumed_out);
                }
                Ok(_) if result.consumed_out > 0 => return Ok(result.consumed_out),
                // Control codes consumed, nothing produced yet
                Ok(LzwStatus::Ok) if !stalled => continue,
                // An empty blob is the encoding of an empty file
                Ok(_) if self.src.as_ref().is_empty() => {
                    self.done = true;
                    return Ok(0);
                }
                Ok(_) => {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "lzw stream ended without an end code",
                    ))
                }
                Err(e) => return Err(io::Error::new(io::ErrorKind::InvalidData, e.to_string())),
            }
        }
    }
}
