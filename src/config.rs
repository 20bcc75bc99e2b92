//! # Configuration Management
//!
//! Centralized configuration for the wire codec library.
//!
//! This module provides structured configuration for buffer sizing,
//! compression, and logging, loadable from TOML files or environment
//! variables.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()`
//! - Direct instantiation with defaults
//! - Environment-specific overrides via `from_env()`

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::error::{Result, WireError};

/// Default wire buffer capacity in bytes (rounded up to a power of two).
pub const DEFAULT_BUFFER_SIZE: usize = 256;

/// Default DEFLATE compression level (medium).
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Largest buffer capacity the configuration accepts (64 MB).
pub const MAX_BUFFER_SIZE: usize = 64 * 1024 * 1024;

/// Main configuration structure for the codec.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CodecConfig {
    /// Wire buffer configuration
    #[serde(default)]
    pub buffer: BufferConfig,

    /// Compression filter configuration
    #[serde(default)]
    pub compression: CompressionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CodecConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)
            .map_err(|e| WireError::Config(format!("failed to open config file: {e}")))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| WireError::Config(format!("failed to read config file: {e}")))?;

        Self::from_toml(&contents)
    }

    /// Load configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| WireError::Config(format!("failed to parse TOML: {e}")))
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(size) = std::env::var("SSH_WIRE_CODEC_BUFFER_SIZE") {
            if let Ok(val) = size.parse::<usize>() {
                config.buffer.default_size = val;
            }
        }

        if let Ok(level) = std::env::var("SSH_WIRE_CODEC_COMPRESSION_LEVEL") {
            if let Ok(val) = level.parse::<u32>() {
                config.compression.level = val;
            }
        }

        Ok(config)
    }

    /// Apply overrides to the default configuration
    pub fn default_with_overrides<F>(mutator: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut config = Self::default();
        mutator(&mut config);
        config
    }

    /// Validate the configuration for common issues and misconfigurations.
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(self.buffer.validate());
        errors.extend(self.compression.validate());
        errors.extend(self.logging.validate());
        errors
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(WireError::Config(format!(
                "configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }
}

/// Wire buffer configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BufferConfig {
    /// Initial capacity for freshly allocated buffers, in bytes
    pub default_size: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl BufferConfig {
    /// Validate buffer configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.default_size == 0 {
            errors.push("Buffer default size cannot be 0".to_string());
        } else if self.default_size > MAX_BUFFER_SIZE {
            errors.push(format!(
                "Buffer default size too large: {} bytes (maximum: {} bytes)",
                self.default_size, MAX_BUFFER_SIZE
            ));
        }

        errors
    }
}

/// Compression filter configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompressionConfig {
    /// Whether the session applies compression at all
    pub enabled: bool,

    /// DEFLATE compression level (0-9)
    pub level: u32,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: DEFAULT_COMPRESSION_LEVEL,
        }
    }
}

impl CompressionConfig {
    /// Validate compression configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.level > 9 {
            errors.push(format!(
                "Invalid compression level: {} (valid range: 0-9)",
                self.level
            ));
        }

        errors
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Application name for logs
    pub app_name: String,

    /// Log level
    #[serde(with = "log_level_serde")]
    pub log_level: Level,

    /// Whether to log to console
    pub log_to_console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            app_name: String::from("ssh-wire-codec"),
            log_level: Level::INFO,
            log_to_console: true,
        }
    }
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.app_name.is_empty() {
            errors.push("Application name cannot be empty".to_string());
        } else if self.app_name.len() > 64 {
            errors.push(format!(
                "Application name too long: {} characters (maximum: 64)",
                self.app_name.len()
            ));
        }

        errors
    }
}

/// Helper module for tracing::Level serialization/deserialization
mod log_level_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;
    use tracing::Level;

    pub fn serialize<S>(level: &Level, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let level_str = match *level {
            Level::TRACE => "trace",
            Level::DEBUG => "debug",
            Level::INFO => "info",
            Level::WARN => "warn",
            Level::ERROR => "error",
        };
        level_str.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Level, D::Error>
    where
        D: Deserializer<'de>,
    {
        let level_str = String::deserialize(deserializer)?;
        Level::from_str(&level_str)
            .map_err(|_| serde::de::Error::custom(format!("Invalid log level: {level_str}")))
    }
}
