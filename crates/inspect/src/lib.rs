//! Decodes the token movements of Ethereum transactions.
//!
//! Receipt logs are matched against the ERC20/ERC721 `Transfer` and `Approval` events and the
//! ERC1155 `TransferSingle`/`TransferBatch` events, then turned into [`TokenTransfer`]s and
//! [`ApprovalChange`]s with best-effort token metadata and a heuristic token standard.
//!
//! The decoding core never touches the network itself. Transactions and token metadata come from
//! the [`TransactionSource`] and [`TokenMetadataSource`] collaborators, with RPC-backed
//! implementations in [`RpcTransactionSource`] and [`RpcTokenMetadata`].

pub mod error;

mod core;
mod interfaces;
mod utils;

// re-export the public interface
pub use core::{
    decode_transaction, inspect, inspect_transactions, DEFAULT_CALL_TIMEOUT_SECS,
    metadata::{
        resolve_token_metadata, MetadataResolver, TokenInterface, TokenMetadata,
        TokenMetadataSource, UNKNOWN_SYMBOL,
    },
    InspectResult, TransactionOutcome,
};
pub use interfaces::{
    ApprovalChange, InspectArgs, InspectArgsBuilder, LogEntry, RpcTokenMetadata,
    RpcTransactionSource, TokenStandard, TokenTransfer, TransactionData, TransactionFailure,
    TransactionSource, TransactionSummary,
};
pub use utils::{
    amount::{compute_fee, format_amount},
    classify::{classify_transfer, Classification, NFT_TOKEN_ID_THRESHOLD},
    payload::{decode_payload, DecodedPayload},
    signatures::{EventKind, EventSignatures},
    topics::address_from_topic,
};
