//! Error types for Curio

use thiserror::Error;

/// The main error type for Curio operations
#[derive(Debug, Error)]
pub enum CurioError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("Missing {kind} block at address {address}")]
    MissingBlock { kind: String, address: u64 },

    #[error("Block at address {address} is {found}, expected {expected}")]
    KindMismatch {
        address: u64,
        expected: String,
        found: String,
    },

    #[error("Broken list: {0}")]
    BrokenList(String),

    #[error("Checksum mismatch: expected {expected}, got {found}")]
    ChecksumMismatch { expected: String, found: String },

    #[error("Unsupported file version: {0}")]
    UnsupportedVersion(u32),

    #[error("Config error: {0}")]
    ConfigError(String),
}

/// Result type alias for Curio operations
pub type Result<T> = std::result::Result<T, CurioError>;

impl From<toml::de::Error> for CurioError {
    fn from(err: toml::de::Error) -> Self {
        CurioError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for CurioError {
    fn from(err: toml::ser::Error) -> Self {
        CurioError::TomlSerError(err.to_string())
    }
}
