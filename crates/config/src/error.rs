//! Error types for the configuration module

use mesc::MescError;

/// Errors that can occur during configuration operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A generic error with a message
    #[error("Error: {0}")]
    Generic(String),

    /// The configuration file could not be parsed or serialized
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A key passed to `config` that doesn't exist, or a value of the wrong type
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// An error from MESC (Multiple Endpoint Shared Configuration)
    #[error("MESC error: {0}")]
    MescError(#[from] MescError),
}
