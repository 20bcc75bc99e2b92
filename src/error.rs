//! # Error Types
//!
//! Error handling for the wire-format codec.
//!
//! This module defines all error variants that can occur while encoding or
//! decoding the wire format, from cursor underflow to unsupported key
//! algorithms and invalid compressed input.
//!
//! ## Error Categories
//! - **Buffer Errors**: reads past the end of valid data
//! - **Framing Errors**: invalid length prefixes, non-UTF-8 string payloads
//! - **Key Errors**: unknown algorithms, curve mismatches, malformed key fields
//! - **Compression Errors**: invalid DEFLATE input
//! - **Configuration Errors**: invalid codec settings
//!
//! Every variant is a terminal parse/format failure: the codec never retries,
//! never recovers partially decoded values, and never substitutes defaults
//! for unrecognized algorithms. Callers are expected to abandon the enclosing
//! message (or session) on any of these.
//!
//! All errors implement `std::error::Error` for interoperability.

use thiserror::Error;

/// Primary error type for all wire codec operations.
#[derive(Error, Debug)]
pub enum WireError {
    /// A read requested more bytes than are available between the read and
    /// write cursors. Always a protocol-state bug or a corrupt/malicious peer.
    #[error("buffer underflow: needed {needed} bytes, {available} available")]
    Underflow {
        /// Bytes the read required.
        needed: usize,
        /// Bytes actually available.
        available: usize,
    },

    /// A decoded length prefix is invalid (negative when interpreted as a
    /// signed 32-bit value).
    #[error("malformed length prefix: {0:#010x}")]
    MalformedLength(u32),

    /// A string payload was not valid UTF-8.
    #[error("string payload is not valid UTF-8")]
    MalformedString,

    /// An unknown key-algorithm identifier was encountered during decode.
    #[error("unsupported key algorithm: {0:?}")]
    UnsupportedAlgorithm(String),

    /// The curve name embedded in an EC key does not match the curve implied
    /// by the algorithm identifier.
    #[error("curve mismatch: expected {expected:?}, got {actual:?}")]
    CurveMismatch {
        /// Curve name the algorithm identifier implies.
        expected: &'static str,
        /// Curve name found on the wire.
        actual: String,
    },

    /// A key field could not produce a valid key (e.g. malformed point
    /// encoding, negative magnitude where a positive integer is required).
    #[error("malformed key material: {0}")]
    MalformedKey(String),

    /// The compressor reported a stream failure.
    #[error("compression failed: {0}")]
    Compression(String),

    /// The input was not valid compressed data for the configured format.
    #[error("decompression failed: {0}")]
    Decompression(String),

    /// Invalid codec configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Type alias for Results using WireError
pub type Result<T> = std::result::Result<T, WireError>;
