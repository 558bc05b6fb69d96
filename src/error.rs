//! Error types for media-dl
//!
//! Errors raised inside a resource task never reach the caller of
//! [`MediaDownloader::download`](crate::MediaDownloader::download); they are
//! converted into terminal `error` progress events. The types here surface
//! directly only from synchronous entry points such as configuration
//! validation, category updates and [`decode_file`](crate::decoder::decode_file).

use thiserror::Error;

/// Result type alias for media-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for media-dl
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "max_concurrent_downloads")
        key: Option<String>,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network error from the bundled HTTP transfer
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Post-download deobfuscation failed
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The transfer collaborator reported a failure
    #[error("transfer failed: {0}")]
    Transfer(String),

    /// A category name outside the known set was rejected
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Errors from the fixed-length XOR decode step
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The key is not valid standard base64
    #[error("invalid base64 key: {0}")]
    InvalidKey(#[from] base64::DecodeError),

    /// The key decoded to zero bytes
    #[error("decode key is empty")]
    EmptyKey,

    /// Opening, reading or writing the target file failed
    #[error("file access failed: {0}")]
    Io(#[from] std::io::Error),
}
