//! Common utilities, constants, and resources used across the DeltaScope codebase.
//!
//! This crate provides shared functionality for the DeltaScope toolkit, including
//! the RPC provider wrapper, hex and file helpers, and serialization helpers.

/// Constants used throughout the DeltaScope codebase.
pub mod constants;

/// Error types for the common module.
pub mod error;

/// Utilities for interacting with Ethereum nodes over RPC.
pub mod ether;

/// General utility functions and types for common tasks.
pub mod utils;
