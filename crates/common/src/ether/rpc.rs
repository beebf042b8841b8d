use crate::{error::Error, ether::provider::MultiTransportProvider, utils::hex::ToLowerHex};
use alloy::{
    primitives::{keccak256, TxHash},
    rpc::types::{Transaction, TransactionReceipt},
};
use backoff::ExponentialBackoff;
use deltascope_cache::with_cache;
use std::time::Duration;
use tracing::{error, trace};

fn backoff_policy() -> ExponentialBackoff {
    ExponentialBackoff {
        max_elapsed_time: Some(Duration::from_secs(10)),
        ..ExponentialBackoff::default()
    }
}

/// Get the chainId of the provided RPC URL. The result is cached per RPC URL.
///
/// ```no_run
/// use deltascope_common::ether::rpc::chain_id;
///
/// // let chain_id = chain_id("https://eth.llamarpc.com").await?;
/// // assert_eq!(chain_id, 1);
/// ```
pub async fn chain_id(rpc_url: &str) -> Result<u64, Error> {
    // rpc urls may contain characters that aren't valid in a file name
    let cache_key = format!("chain_id.{}", keccak256(rpc_url.as_bytes()).to_lower_hex());

    with_cache(&cache_key, || async {
        let provider = MultiTransportProvider::connect(rpc_url)
            .await
            .map_err(|_| eyre::eyre!("failed to connect to provider '{}'", rpc_url))?;
        provider.get_chainid().await.map_err(|e| eyre::eyre!("failed to get chain id: {e}"))
    })
    .await
    .map_err(|e| Error::RpcError(e.to_string()))
}

/// Get the transaction with the provided transaction hash
///
/// ```no_run
/// use deltascope_common::ether::rpc::get_transaction;
///
/// // let tx = get_transaction("0x...".parse()?, "https://eth.llamarpc.com").await;
/// // assert!(tx.is_ok());
/// ```
pub async fn get_transaction(transaction_hash: TxHash, rpc_url: &str) -> Result<Transaction, Error> {
    backoff::future::retry(backoff_policy(), || async {
        trace!("fetching transaction from node: '{}' .", &transaction_hash);

        // create new provider
        let provider = match MultiTransportProvider::connect(rpc_url).await {
            Ok(provider) => provider,
            Err(_) => {
                error!("failed to connect to RPC provider '{}' .", &rpc_url);
                return Err(backoff::Error::Permanent(format!(
                    "failed to connect to provider '{rpc_url}'"
                )));
            }
        };

        match provider.get_transaction_by_hash(transaction_hash).await {
            Ok(Some(transaction)) => Ok(transaction),
            Ok(None) => Err(backoff::Error::Permanent(format!(
                "transaction '{transaction_hash}' not found"
            ))),
            Err(e) => Err(backoff::Error::Transient {
                err: format!("failed to get transaction '{transaction_hash}': {e}"),
                retry_after: None,
            }),
        }
    })
    .await
    .map_err(Error::RpcError)
}

/// Get the receipt of the provided transaction hash
///
/// ```no_run
/// use deltascope_common::ether::rpc::get_transaction_receipt;
///
/// // let receipt = get_transaction_receipt("0x...".parse()?, "https://eth.llamarpc.com").await;
/// // assert!(receipt.is_ok());
/// ```
pub async fn get_transaction_receipt(
    transaction_hash: TxHash,
    rpc_url: &str,
) -> Result<TransactionReceipt, Error> {
    backoff::future::retry(backoff_policy(), || async {
        trace!("fetching receipt from node for transaction: '{}' .", &transaction_hash);

        // create new provider
        let provider = match MultiTransportProvider::connect(rpc_url).await {
            Ok(provider) => provider,
            Err(_) => {
                error!("failed to connect to RPC provider '{}' .", &rpc_url);
                return Err(backoff::Error::Permanent(format!(
                    "failed to connect to provider '{rpc_url}'"
                )));
            }
        };

        // a pending transaction has no receipt yet, which isn't worth retrying
        match provider.get_transaction_receipt(transaction_hash).await {
            Ok(Some(receipt)) => Ok(receipt),
            Ok(None) => Err(backoff::Error::Permanent(format!(
                "receipt for transaction '{transaction_hash}' not found"
            ))),
            Err(e) => Err(backoff::Error::Transient {
                err: format!("failed to get receipt for transaction '{transaction_hash}': {e}"),
                retry_after: None,
            }),
        }
    })
    .await
    .map_err(Error::RpcError)
}
