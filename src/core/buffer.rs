//! # Wire Buffer
//!
//! Growable byte container with independent read and write cursors,
//! implementing the primitive encodings of the SSH wire format.
//!
//! All multi-byte integers are big-endian (network byte order). Strings and
//! opaque blobs are framed with a `u32` length prefix. Arbitrary-precision
//! integers use the `mpint` encoding: length-prefixed minimal two's-complement
//! bytes, zero-padded when the high bit of the first magnitude byte would
//! otherwise flip the sign.
//!
//! ## Cursor Model
//! - `rpos`: next byte to read
//! - `wpos`: next byte to write, exclusive end of valid data
//! - invariant: `0 <= rpos <= wpos <= data.len()`
//!
//! The backing region's length is always a power of two. Growth happens only
//! through [`Buffer::ensure_writable`] and always preserves `[0, wpos)`;
//! every other operation is allocation-free.
//!
//! ## Ownership
//! A buffer is exclusively owned by whoever currently holds it. All mutation
//! goes through `&mut self`, so the single-owner, no-shared-mutation model is
//! enforced at compile time.

use num_bigint::BigInt;

use crate::config::DEFAULT_BUFFER_SIZE;
use crate::error::{Result, WireError};

/// Growable byte buffer with separate read/write cursors.
#[derive(Debug, Clone)]
pub struct Buffer {
    data: Vec<u8>,
    rpos: usize,
    wpos: usize,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buffer {
    /// Create an empty buffer with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUFFER_SIZE)
    }

    /// Create an empty buffer whose capacity is the next power of two >= `size`.
    pub fn with_capacity(size: usize) -> Self {
        Self {
            data: vec![0; next_power_of_two(size)],
            rpos: 0,
            wpos: 0,
        }
    }

    /// Wrap caller-supplied bytes as fully written data, ready to be read.
    pub fn from_vec(data: Vec<u8>) -> Self {
        let wpos = data.len();
        Self {
            data,
            rpos: 0,
            wpos,
        }
    }

    /// Wrap caller-supplied bytes as spare capacity: nothing written yet,
    /// the region is reused for subsequent writes.
    pub fn from_vec_writable(data: Vec<u8>) -> Self {
        Self {
            data,
            rpos: 0,
            wpos: 0,
        }
    }

    /// Current read cursor.
    pub fn rpos(&self) -> usize {
        self.rpos
    }

    /// Move the read cursor. Clamped to `wpos` so the cursor invariant holds.
    pub fn set_rpos(&mut self, rpos: usize) {
        self.rpos = rpos.min(self.wpos);
    }

    /// Current write cursor (exclusive end of valid data).
    pub fn wpos(&self) -> usize {
        self.wpos
    }

    /// Move the write cursor, guaranteeing capacity up to the new position
    /// first. Used to reserve a length-prefix slot and patch it later.
    pub fn set_wpos(&mut self, wpos: usize) {
        if wpos > self.wpos {
            self.ensure_writable(wpos - self.wpos);
        }
        self.wpos = wpos;
        if self.rpos > self.wpos {
            self.rpos = self.wpos;
        }
    }

    /// Number of valid bytes remaining to read.
    pub fn available(&self) -> usize {
        self.wpos - self.rpos
    }

    /// Whether no unread bytes remain.
    pub fn is_empty(&self) -> bool {
        self.available() == 0
    }

    /// Bytes writable before the next reallocation.
    pub fn capacity_remaining(&self) -> usize {
        self.data.len() - self.wpos
    }

    /// The unread region `[rpos, wpos)`.
    pub fn unread(&self) -> &[u8] {
        &self.data[self.rpos..self.wpos]
    }

    /// Owned copy of the unread region.
    pub fn to_unread_vec(&self) -> Vec<u8> {
        self.unread().to_vec()
    }

    /// Reset both cursors to zero. Capacity is retained.
    pub fn clear(&mut self) {
        self.rpos = 0;
        self.wpos = 0;
    }

    /// Shift the unread region to offset zero, reclaiming consumed space
    /// without reallocating.
    pub fn compact(&mut self) {
        if self.available() > 0 {
            self.data.copy_within(self.rpos..self.wpos, 0);
        }
        self.wpos -= self.rpos;
        self.rpos = 0;
    }

    /// Guarantee at least `n` writable bytes, reallocating to the next power
    /// of two >= `wpos + n` when short. Existing bytes `[0, wpos)` are
    /// preserved. This is the only allocation site in the buffer.
    pub fn ensure_writable(&mut self, n: usize) {
        if self.capacity_remaining() < n {
            let needed = self.wpos + n;
            self.data.resize(next_power_of_two(needed), 0);
        }
    }

    fn ensure_available(&self, n: usize) -> Result<()> {
        if self.available() < n {
            return Err(WireError::Underflow {
                needed: n,
                available: self.available(),
            });
        }
        Ok(())
    }

    // ======================
    //  Write methods
    // ======================

    /// Write a single byte.
    pub fn put_u8(&mut self, b: u8) {
        self.ensure_writable(1);
        self.data[self.wpos] = b;
        self.wpos += 1;
    }

    /// Write a 32-bit big-endian integer.
    pub fn put_u32(&mut self, v: u32) {
        self.put_raw(&v.to_be_bytes());
    }

    /// Write a 64-bit big-endian integer.
    pub fn put_u64(&mut self, v: u64) {
        self.put_raw(&v.to_be_bytes());
    }

    /// Write a boolean as one byte (0x00 / 0x01).
    pub fn put_bool(&mut self, b: bool) {
        self.put_u8(u8::from(b));
    }

    /// Write raw bytes with no framing.
    pub fn put_raw(&mut self, bytes: &[u8]) {
        self.ensure_writable(bytes.len());
        self.data[self.wpos..self.wpos + bytes.len()].copy_from_slice(bytes);
        self.wpos += bytes.len();
    }

    /// Write a `u32` length prefix followed by the raw bytes.
    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.put_u32(bytes.len() as u32);
        self.put_raw(bytes);
    }

    /// Write a UTF-8 string with the same framing as [`Buffer::put_bytes`].
    pub fn put_string(&mut self, s: &str) {
        self.put_bytes(s.as_bytes());
    }

    /// Write an arbitrary-precision integer in mpint encoding: length prefix
    /// plus minimal two's-complement big-endian bytes.
    pub fn put_mpint(&mut self, v: &BigInt) {
        self.put_bytes(&v.to_signed_bytes_be());
    }

    /// Write a raw non-negative magnitude in mpint encoding. A zero byte is
    /// prepended when the first byte's high bit is set, so the value cannot
    /// be mistaken for a negative two's-complement number; the length prefix
    /// reflects the padded form.
    pub fn put_mpint_bytes(&mut self, magnitude: &[u8]) {
        if magnitude.first().is_some_and(|b| b & 0x80 != 0) {
            self.put_u32(magnitude.len() as u32 + 1);
            self.put_u8(0);
        } else {
            self.put_u32(magnitude.len() as u32);
        }
        self.put_raw(magnitude);
    }

    /// Append another buffer's unread bytes, consuming them from `other`.
    pub fn put_buffer(&mut self, other: &mut Buffer) {
        let n = other.available();
        self.put_raw(other.unread());
        other.rpos += n;
    }

    // ======================
    //  Read methods
    // ======================

    /// Read a single byte.
    pub fn get_u8(&mut self) -> Result<u8> {
        self.ensure_available(1)?;
        let b = self.data[self.rpos];
        self.rpos += 1;
        Ok(b)
    }

    /// Read a 32-bit big-endian integer.
    pub fn get_u32(&mut self) -> Result<u32> {
        self.ensure_available(4)?;
        let mut be = [0u8; 4];
        be.copy_from_slice(&self.data[self.rpos..self.rpos + 4]);
        self.rpos += 4;
        Ok(u32::from_be_bytes(be))
    }

    /// Read a 64-bit big-endian integer.
    pub fn get_u64(&mut self) -> Result<u64> {
        self.ensure_available(8)?;
        let mut be = [0u8; 8];
        be.copy_from_slice(&self.data[self.rpos..self.rpos + 8]);
        self.rpos += 8;
        Ok(u64::from_be_bytes(be))
    }

    /// Read a boolean: one byte, any nonzero value is true.
    pub fn get_bool(&mut self) -> Result<bool> {
        Ok(self.get_u8()? != 0)
    }

    /// Read exactly `n` raw bytes.
    pub fn get_raw(&mut self, n: usize) -> Result<Vec<u8>> {
        self.ensure_available(n)?;
        let out = self.data[self.rpos..self.rpos + n].to_vec();
        self.rpos += n;
        Ok(out)
    }

    /// Read exactly `out.len()` raw bytes into the supplied slice.
    pub fn get_raw_into(&mut self, out: &mut [u8]) -> Result<()> {
        self.ensure_available(out.len())?;
        out.copy_from_slice(&self.data[self.rpos..self.rpos + out.len()]);
        self.rpos += out.len();
        Ok(())
    }

    /// Read a `u32` length prefix followed by that many bytes. The length is
    /// rejected as malformed when its sign bit is set (negative as i32).
    pub fn get_bytes(&mut self) -> Result<Vec<u8>> {
        let len = self.get_u32()?;
        if len & 0x8000_0000 != 0 {
            return Err(WireError::MalformedLength(len));
        }
        self.get_raw(len as usize)
    }

    /// Read a length-prefixed UTF-8 string.
    pub fn get_string(&mut self) -> Result<String> {
        let bytes = self.get_bytes()?;
        String::from_utf8(bytes).map_err(|_| WireError::MalformedString)
    }

    /// Read an mpint: a length-prefixed two's-complement big-endian integer.
    /// No sign-unpadding step is needed, the two's-complement form already
    /// encodes the sign.
    pub fn get_mpint(&mut self) -> Result<BigInt> {
        Ok(BigInt::from_signed_bytes_be(&self.get_bytes()?))
    }

    /// Run `f` with the effective end of the buffer clamped to
    /// `rpos + len`, restoring the prior write cursor on every exit path.
    /// This bounds a nested decode so a malformed inner structure cannot read
    /// past its declared boundary into unrelated trailing data.
    pub(crate) fn with_clamped_end<T>(
        &mut self,
        len: usize,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.ensure_available(len)?;
        let prior_wpos = self.wpos;
        self.wpos = self.rpos + len;
        let result = f(self);
        self.wpos = prior_wpos;
        result
    }
}

fn next_power_of_two(n: usize) -> usize {
    let mut p = 1;
    while p < n {
        p <<= 1;
    }
    p
}
