//! # Core Wire Types
//!
//! The wire buffer and its primitive codec. Everything else in the crate is
//! built on top of [`Buffer`].

pub mod buffer;

pub use buffer::Buffer;
