//! # SSH Wire Codec
//!
//! Byte-exact codec core for an SSH-style binary protocol: a growable wire
//! buffer with independent read/write cursors, primitive encodings (fixed
//! integers, booleans, length-prefixed strings, multi-precision integers),
//! an asymmetric key codec for five algorithm families, and a streaming
//! zlib compression filter.
//!
//! ## Components
//! - [`core::Buffer`]: growable byte region with read/write cursors and the
//!   primitive wire codec
//! - [`keys`]: tagged-union key material model and its wire encoding
//!   (RSA, DSA, NIST P-256/384/521 ECDSA, Ed25519)
//! - [`utils::compression`]: per-session zlib/DEFLATE filter with
//!   synchronous flush semantics
//! - [`config`]: codec configuration (TOML, environment)
//! - [`error`]: the error taxonomy; all failures are terminal parse errors
//!
//! ## Scope
//! This crate owns the wire format only. Session state machines, key
//! exchange, cipher execution, and transport framing are external
//! collaborators: they hand in key material and field values, and consume
//! the decoded values this codec produces.
//!
//! ## Example
//! ```rust
//! use ssh_wire_codec::core::Buffer;
//!
//! # fn main() -> ssh_wire_codec::error::Result<()> {
//! let mut buf = Buffer::new();
//! buf.put_u32(1);
//! buf.put_bool(true);
//! buf.put_string("abc");
//!
//! assert_eq!(buf.get_u32()?, 1);
//! assert!(buf.get_bool()?);
//! assert_eq!(buf.get_string()?, "abc");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod core;
pub mod error;
pub mod keys;
pub mod utils;

pub use crate::core::Buffer;
pub use crate::error::{Result, WireError};
pub use crate::keys::{EcCurve, EcPoint, KeyPair, PublicKey};
pub use crate::utils::compression::{CompressionLevel, Zlib};
