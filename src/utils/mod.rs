//! # Utility Modules
//!
//! Supporting utilities for compression and logging.
//!
//! ## Components
//! - **Compression**: streaming zlib/DEFLATE filter over wire buffers
//! - **Logging**: structured logging configuration
//!
//! ## Security
//! - Decompression never trusts declared sizes; output is drained through a
//!   fixed scratch region into a growable buffer

pub mod compression;
pub mod logging;

// Re-export public types for advanced users
pub use compression::{CompressionLevel, Zlib};
