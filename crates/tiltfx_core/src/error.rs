//! Error types for tiltfx

use std::io;
use thiserror::Error;

/// Errors raised by the fallible tiltfx surfaces
///
/// The per-frame animation path never returns these: bad geometry, unknown
/// variants and numeric blow-ups all degrade to a safe value instead. Errors
/// only come from loading configuration and strict parsing.
#[derive(Error, Debug)]
pub enum TiltError {
    /// IO error when reading a configuration file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration could not be parsed or is inconsistent
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// TOML syntax or schema error in a configuration file
    #[error("TOML error: {0}")]
    Toml(String),

    /// A variant definition is unusable (empty key, bad layer list, ...)
    #[error("Invalid variant '{key}': {reason}")]
    InvalidVariant { key: String, reason: String },

    /// A gradient class string or color could not be parsed
    #[error("Gradient parsing failed: {0}")]
    Gradient(String),
}

/// Result type for tiltfx operations
pub type Result<T> = std::result::Result<T, TiltError>;
