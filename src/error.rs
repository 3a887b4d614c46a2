//! Error types for bricklink_pricer

use std::path::PathBuf;

use thiserror::Error;

/// Failure while talking to the BrickLink API for a single request.
///
/// These are recorded per line item by the pricing pipeline and never abort
/// a batch on their own.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Failed to decode the JSON response
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// API answered with a non-200 meta code
    #[error("{message} (code {code})")]
    ApiResponse { code: u16, message: String },
    /// HTTP error status code without a readable body
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
    /// Request could not be signed
    #[error("Signing error: {0}")]
    Signing(String),
}

/// Result alias for single API requests
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Unified error type for bricklink_pricer operations
#[derive(Debug, Error)]
pub enum Error {
    /// Missing credentials, invalid markup, unreadable config file
    #[error("Configuration error: {0}")]
    Config(String),
    /// Inventory file missing, malformed, or holding an invalid record
    #[error("Failed to parse inventory {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
    /// Network or API failure
    #[error(transparent)]
    Request(#[from] ApiError),
    /// Output file could not be written
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for bricklink_pricer operations
pub type Result<T> = std::result::Result<T, Error>;
