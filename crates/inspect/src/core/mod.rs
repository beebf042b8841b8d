pub(crate) mod decoder;
pub(crate) mod metadata;

use std::time::Duration;

use alloy::primitives::{utils::format_ether, TxHash, U256};
use deltascope_common::{constants::TRANSACTION_HASH_REGEX, utils::hex::ToLowerHex};
use tracing::{info, warn};

use crate::{
    core::{
        decoder::decode_logs,
        metadata::{MetadataResolver, TokenMetadataSource},
    },
    error::Error,
    interfaces::{
        InspectArgs, RpcTokenMetadata, RpcTransactionSource, TransactionData, TransactionFailure,
        TransactionSource, TransactionSummary,
    },
    utils::{amount::compute_fee, signatures::EventSignatures},
};

/// The result of inspecting one requested transaction
#[derive(Debug, Clone)]
pub enum TransactionOutcome {
    /// The transaction was fetched and decoded
    Decoded(Box<TransactionSummary>),
    /// The transaction couldn't be inspected
    Failed(TransactionFailure),
}

/// The outcome of every requested transaction, in request order
#[derive(Debug, Clone, Default)]
pub struct InspectResult {
    /// One outcome per requested transaction
    pub outcomes: Vec<TransactionOutcome>,
}

impl InspectResult {
    /// The successfully decoded transactions.
    pub fn summaries(&self) -> impl Iterator<Item = &TransactionSummary> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            TransactionOutcome::Decoded(summary) => Some(summary.as_ref()),
            TransactionOutcome::Failed(_) => None,
        })
    }

    /// The transactions that couldn't be inspected.
    pub fn failures(&self) -> impl Iterator<Item = &TransactionFailure> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            TransactionOutcome::Failed(failure) => Some(failure),
            TransactionOutcome::Decoded(_) => None,
        })
    }
}

/// Seconds each token metadata call may take when `InspectArgs::call_timeout` is unset.
pub const DEFAULT_CALL_TIMEOUT_SECS: u64 = 30;

/// Inspect the transactions in `args` against an RPC node.
///
/// Only fails when no provider can be built for the RPC url. Transactions that can't be fetched
/// are reported as failures in the result.
pub async fn inspect(args: InspectArgs) -> Result<InspectResult, Error> {
    let transactions = RpcTransactionSource::connect(&args.rpc_url).await?;
    let metadata = RpcTokenMetadata::connect(&args.rpc_url, call_timeout(&args)).await?;

    Ok(inspect_transactions(&transactions, &metadata, &args.targets).await)
}

/// Fetch and decode each of `targets`, one after another.
///
/// A target that isn't a valid hash, or can't be fetched, becomes a [`TransactionFailure`] and
/// the remaining targets are still inspected.
pub async fn inspect_transactions<T, M>(
    transactions: &T,
    metadata: &M,
    targets: &[String],
) -> InspectResult
where
    T: TransactionSource + ?Sized,
    M: TokenMetadataSource + ?Sized, {
    let signatures = EventSignatures::new();
    let mut result = InspectResult::default();

    for target in targets {
        let fetched = match parse_transaction_hash(target) {
            Ok(hash) => transactions.fetch(hash).await,
            Err(e) => Err(e),
        };

        let outcome = match fetched {
            Ok(data) => {
                let summary = decode_transaction(&data, metadata, &signatures).await;
                info!(
                    "decoded {} transfers and {} approvals from '{}'",
                    summary.transfers.len(),
                    summary.approvals.len(),
                    summary.tx_hash
                );
                TransactionOutcome::Decoded(Box::new(summary))
            }
            Err(e) => {
                warn!("failed to inspect '{}': {}", target, e);
                TransactionOutcome::Failed(TransactionFailure {
                    tx_hash: target.clone(),
                    reason: e.to_string(),
                })
            }
        };

        result.outcomes.push(outcome);
    }

    result
}

/// Decode the logs of a fetched transaction and assemble its summary.
pub async fn decode_transaction<M>(
    transaction: &TransactionData,
    metadata: &M,
    signatures: &EventSignatures,
) -> TransactionSummary
where
    M: TokenMetadataSource + ?Sized, {
    let mut resolver = MetadataResolver::new(metadata);
    let decoded = decode_logs(signatures, &mut resolver, &transaction.logs).await;

    let fee = compute_fee(transaction.gas_used, transaction.effective_gas_price);

    TransactionSummary {
        chain: transaction
            .chain_id
            .map(|chain_id| chain_id.to_string())
            .unwrap_or_else(|| "unknown".to_string()),
        tx_hash: transaction.hash.to_lower_hex(),
        block_number: transaction.block_number,
        status: u8::from(transaction.status),
        from: transaction.from.to_checksum(None),
        to: transaction.to.map(|to| to.to_checksum(None)),
        value_wei: transaction.value,
        value_eth: format_ether(transaction.value),
        gas_used: transaction.gas_used,
        effective_gas_price_wei: U256::from(transaction.effective_gas_price.unwrap_or_default()),
        fee_wei: fee,
        fee_eth: format_ether(fee),
        transfers: decoded.transfers,
        approvals: decoded.approvals,
        warnings: decoded.warnings,
    }
}

fn call_timeout(args: &InspectArgs) -> Duration {
    Duration::from_secs(args.call_timeout.unwrap_or(DEFAULT_CALL_TIMEOUT_SECS))
}

fn parse_transaction_hash(target: &str) -> Result<TxHash, Error> {
    if !TRANSACTION_HASH_REGEX.is_match(target).unwrap_or(false) {
        return Err(Error::InvalidTransactionHash(target.to_string()));
    }

    let hex = target.strip_prefix("0x").unwrap_or(target);
    hex.parse::<TxHash>().map_err(|_| Error::InvalidTransactionHash(target.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::InspectArgsBuilder;

    #[test]
    fn test_parse_transaction_hash() {
        let hash = "0xa5f676d0ee4c23cc1ccb0b802be5aaead5827a3337c06e9da8b0a85dfa3e7dd5";
        assert_eq!(parse_transaction_hash(hash).expect("valid hash").to_lower_hex(), hash);
        assert!(parse_transaction_hash(&hash[2..]).is_ok());
    }

    #[test]
    fn test_call_timeout_defaults_without_configuration() {
        let config_path = std::env::temp_dir().join("deltascope_inspect_untouched_config.toml");
        let _ = std::fs::remove_file(&config_path);
        std::env::set_var("DELTASCOPE_CONFIG", &config_path);

        let mut args = InspectArgsBuilder::new().build().expect("failed to build args");
        assert_eq!(call_timeout(&args), Duration::from_secs(DEFAULT_CALL_TIMEOUT_SECS));
        assert!(!config_path.exists());

        args.call_timeout = Some(5);
        assert_eq!(call_timeout(&args), Duration::from_secs(5));
    }

    #[test]
    fn test_parse_invalid_transaction_hash() {
        for target in ["", "0x1234", "not a hash", "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"] {
            assert!(matches!(
                parse_transaction_hash(target),
                Err(Error::InvalidTransactionHash(_))
            ));
        }
    }
}
