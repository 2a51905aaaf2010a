//! Common error types for CFA

use thiserror::Error;

/// Common result type for CFA operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the CFA crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid value supplied for a model type
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
