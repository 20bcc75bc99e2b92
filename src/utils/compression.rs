//! # Compression Filter
//!
//! Streaming zlib/DEFLATE filter that rewrites a wire buffer's readable
//! region in place before the buffer is handed to the transport's encryption
//! layer, and inflates received buffers back out.
//!
//! One compressor and one decompressor are held per session. Compression
//! uses a synchronous flush, so every call emits a complete, independently
//! decodable chunk; no data is withheld across calls. The filter carries no
//! framing of its own, message boundaries are the caller's responsibility.
//!
//! The filter is not delayed: once constructed it applies to every message
//! on its direction. Negotiating *whether* to compress belongs to the
//! transport, not to this component.

use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress, Status};
use tracing::trace;

use crate::config::CodecConfig;
use crate::core::Buffer;
use crate::error::{Result, WireError};

/// Scratch region size for draining codec output, per direction.
const SCRATCH_SIZE: usize = 4096;

/// A validated DEFLATE compression level (0-9).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionLevel(u32);

impl CompressionLevel {
    /// Validate and wrap a compression level. Levels range from 0 (store)
    /// to 9 (best compression).
    pub fn new(level: u32) -> Result<Self> {
        if level > 9 {
            return Err(WireError::Config(format!(
                "invalid compression level: {level} (valid range: 0-9)"
            )));
        }
        Ok(Self(level))
    }

    /// The raw level value.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self(6)
    }
}

/// Per-session zlib codec state: one compressor, one decompressor, and a
/// fixed scratch region.
///
/// Constructed initialized; there is no close or mid-message reset. The
/// filter lives exactly as long as the transport session that owns it. Each
/// direction's state must be driven from a single consistent owner (the
/// sender path for [`Zlib::compress`], the receiver path for
/// [`Zlib::decompress`]); `&mut self` enforces exclusive access per call.
pub struct Zlib {
    deflate: Compress,
    inflate: Decompress,
    scratch: [u8; SCRATCH_SIZE],
}

impl Zlib {
    /// Create a session codec with the given compression level. The zlib
    /// wrapper is enabled, matching the standard "zlib" method.
    pub fn new(level: CompressionLevel) -> Self {
        Self {
            deflate: Compress::new(Compression::new(level.get()), true),
            inflate: Decompress::new(true),
            scratch: [0; SCRATCH_SIZE],
        }
    }

    /// Create a session codec from validated configuration.
    pub fn from_config(config: &CodecConfig) -> Result<Self> {
        Ok(Self::new(CompressionLevel::new(
            config.compression.level,
        )?))
    }

    /// Whether compression starts only after authentication. Always false
    /// for the plain zlib method.
    pub fn is_delayed(&self) -> bool {
        false
    }

    /// Replace `buffer`'s unread bytes with their compressed form, in place.
    ///
    /// The uncompressed payload is discarded by resetting the write cursor
    /// to the read cursor, then compressed output is drained into the same
    /// buffer (growing it as needed) until the codec stops producing. The
    /// synchronous flush guarantees the chunk decodes on its own.
    pub fn compress(&mut self, buffer: &mut Buffer) -> Result<()> {
        let input = buffer.to_unread_vec();
        buffer.set_wpos(buffer.rpos());

        let mut consumed = 0;
        loop {
            let in_before = self.deflate.total_in();
            let out_before = self.deflate.total_out();
            self.deflate
                .compress(&input[consumed..], &mut self.scratch, FlushCompress::Sync)
                .map_err(|e| WireError::Compression(e.to_string()))?;
            consumed += (self.deflate.total_in() - in_before) as usize;
            let produced = (self.deflate.total_out() - out_before) as usize;
            buffer.put_raw(&self.scratch[..produced]);

            // A partially filled scratch region means the flush completed.
            if consumed == input.len() && produced < SCRATCH_SIZE {
                break;
            }
        }
        trace!(
            uncompressed = input.len(),
            compressed = buffer.available(),
            "compressed message"
        );
        Ok(())
    }

    /// Inflate `source`'s unread bytes, appending all produced output to
    /// `destination`. The source bytes are consumed.
    pub fn decompress(&mut self, source: &mut Buffer, destination: &mut Buffer) -> Result<()> {
        let input = source.to_unread_vec();
        source.set_rpos(source.wpos());

        let mut consumed = 0;
        loop {
            let in_before = self.inflate.total_in();
            let out_before = self.inflate.total_out();
            let status = self
                .inflate
                .decompress(&input[consumed..], &mut self.scratch, FlushDecompress::Sync)
                .map_err(|e| WireError::Decompression(e.to_string()))?;
            consumed += (self.inflate.total_in() - in_before) as usize;
            let produced = (self.inflate.total_out() - out_before) as usize;
            destination.put_raw(&self.scratch[..produced]);

            if matches!(status, Status::StreamEnd) {
                break;
            }
            if consumed == input.len() && produced < SCRATCH_SIZE {
                break;
            }
        }
        Ok(())
    }
}
