mod args;
mod logs;
mod metadata;
mod summary;
mod transaction;

// re-export the public interface
pub use args::{InspectArgs, InspectArgsBuilder};
pub use logs::LogEntry;
pub use metadata::RpcTokenMetadata;
pub use summary::{
    ApprovalChange, TokenStandard, TokenTransfer, TransactionFailure, TransactionSummary,
};
pub use transaction::{RpcTransactionSource, TransactionData, TransactionSource};
