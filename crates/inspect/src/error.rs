//! Error types for transaction inspection

use std::time::Duration;

use crate::utils::signatures::EventKind;

/// Errors that fail a whole transaction. Inside a batch these become
/// [`TransactionFailure`](crate::TransactionFailure)s rather than aborting it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The transaction or its receipt couldn't be fetched
    #[error("Fetch error: {0}")]
    FetchError(String),
    /// The target isn't a 32-byte hex transaction hash
    #[error("Invalid transaction hash: {0}")]
    InvalidTransactionHash(String),
    /// Internal error
    #[error("Internal error: {0}")]
    Eyre(#[from] eyre::Report),
}

/// A recognized log that can't be decoded. The log is skipped and the error is kept as a warning.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LogDecodeError {
    /// The data payload is shorter than the event layout requires
    #[error("payload too short: expected at least {expected} bytes, got {actual}")]
    PayloadTooShort {
        /// Bytes required by the layout
        expected: usize,
        /// Bytes present
        actual: usize,
    },
    /// An indexed topic the event layout requires is absent
    #[error("{event} log is missing topic {index}")]
    MissingTopic {
        /// The recognized event
        event: EventKind,
        /// Position of the missing topic
        index: usize,
    },
}

/// A failed token metadata lookup. Never fatal: the lookup falls back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetadataError {
    /// The call reverted or the node rejected it
    #[error("call failed: {0}")]
    CallFailed(String),
    /// The call succeeded but returned nothing, e.g. the address has no code
    #[error("call returned no data")]
    EmptyReturn,
    /// The return data doesn't match the expected shape
    #[error("failed to decode return data: {0}")]
    Decode(String),
    /// The call didn't finish in time
    #[error("call timed out after {0:?}")]
    Timeout(Duration),
}
