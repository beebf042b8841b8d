/// A thin wrapper around the alloy provider.
pub mod provider;

/// Retrying, cached helpers for the RPC methods DeltaScope needs.
pub mod rpc;
