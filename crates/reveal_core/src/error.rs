//! Configuration error types
//!
//! The frame engine itself never fails; the only fallible surface is turning
//! configuration text into a [`RevealConfig`](crate::config::RevealConfig).

use thiserror::Error;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration text is not valid TOML or has wrongly typed fields
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration could not be written back out
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Emitter strategy name not recognised
    #[error("Unknown emitter strategy `{0}` (expected path, attributes or mask)")]
    UnknownStrategy(String),

    /// Initial state name not recognised
    #[error("Unknown initial state `{0}` (expected covered or centered)")]
    UnknownInitialState(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
