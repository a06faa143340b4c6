//! Error types for varuna-perception

use thiserror::Error;

/// Varuna perception error type
#[derive(Error, Debug)]
pub enum VarunaError {
    /// A caller-supplied parameter is out of range (zero grid
    /// dimensions, non-positive resolution, bad sweep parameters,
    /// a polygon too small to fill).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Filesystem error while loading configuration or saving output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_yaml::Error> for VarunaError {
    fn from(e: serde_yaml::Error) -> Self {
        VarunaError::Config(e.to_string())
    }
}

/// Convenience alias for results carrying a [`VarunaError`].
pub type Result<T> = std::result::Result<T, VarunaError>;
