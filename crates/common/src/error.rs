//! Error types for the common module

/// Generic error type for deltascope common operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An error returned by, or while connecting to, the RPC provider
    #[error("RPC error: {0}")]
    RpcError(String),
    /// Generic error
    #[error("Error: {0}")]
    Generic(String),
    /// Internal error
    #[error("Internal error: {0}")]
    Eyre(#[from] eyre::Report),
}
