use alloy::{
    network::{ReceiptResponse, TransactionResponse},
    primitives::{Address, TxHash, U256},
    rpc::types::{Transaction, TransactionReceipt},
};
use async_trait::async_trait;
use deltascope_cache::{read_cache, store_cache};
use deltascope_common::{
    ether::{
        provider::MultiTransportProvider,
        rpc::{chain_id, get_transaction, get_transaction_receipt},
    },
    utils::hex::ToLowerHex,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{error::Error, interfaces::LogEntry};

/// The fields of a transaction and its receipt that inspection needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionData {
    /// The transaction hash
    pub hash: TxHash,
    /// The chain the transaction was fetched from, if known
    pub chain_id: Option<u64>,
    /// The block the transaction was mined in
    pub block_number: Option<u64>,
    /// Whether the transaction executed successfully
    pub status: bool,
    /// Sender
    pub from: Address,
    /// Recipient, absent for contract creations
    pub to: Option<Address>,
    /// Ether sent, in wei
    pub value: U256,
    /// Gas used
    pub gas_used: u64,
    /// The effective gas price, in wei
    pub effective_gas_price: Option<u128>,
    /// The receipt logs, in order
    pub logs: Vec<LogEntry>,
}

impl TransactionData {
    /// Collect the inspected fields of an RPC transaction and its receipt.
    pub fn from_rpc(
        transaction: &Transaction,
        receipt: &TransactionReceipt,
        chain_id: Option<u64>,
    ) -> Self {
        Self {
            hash: TransactionResponse::tx_hash(transaction),
            chain_id,
            block_number: ReceiptResponse::block_number(receipt),
            status: ReceiptResponse::status(receipt),
            from: TransactionResponse::from(transaction),
            to: alloy::consensus::Transaction::to(transaction),
            value: alloy::consensus::Transaction::value(transaction),
            gas_used: ReceiptResponse::gas_used(receipt),
            effective_gas_price: Some(ReceiptResponse::effective_gas_price(receipt)),
            logs: receipt.inner.logs().iter().map(LogEntry::from).collect(),
        }
    }
}

/// Where transactions come from
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Fetch a transaction and its receipt.
    async fn fetch(&self, hash: TxHash) -> Result<TransactionData, Error>;
}

/// A [`TransactionSource`] backed by an RPC node. Mined transactions are cached on disk per
/// chain.
#[derive(Debug, Clone)]
pub struct RpcTransactionSource {
    rpc_url: String,
    chain_id: Option<u64>,
}

impl RpcTransactionSource {
    /// Connect to `rpc_url`. Fails only if no provider can be built for the url; an unreachable
    /// node shows up later as per-transaction fetch errors.
    pub async fn connect(rpc_url: &str) -> Result<Self, Error> {
        MultiTransportProvider::connect(rpc_url).await.map_err(|e| {
            Error::FetchError(format!("failed to connect to provider '{rpc_url}': {e}"))
        })?;

        let chain_id = match chain_id(rpc_url).await {
            Ok(chain_id) => Some(chain_id),
            Err(e) => {
                warn!("failed to fetch chain id, transactions won't be cached: {}", e);
                None
            }
        };

        Ok(Self { rpc_url: rpc_url.to_string(), chain_id })
    }

    /// The chain id reported by the node, if it answered.
    pub fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    fn cache_key(&self, hash: &TxHash) -> Option<String> {
        self.chain_id.map(|chain_id| format!("transaction.{chain_id}.{}", hash.to_lower_hex()))
    }
}

#[async_trait]
impl TransactionSource for RpcTransactionSource {
    async fn fetch(&self, hash: TxHash) -> Result<TransactionData, Error> {
        let cache_key = self.cache_key(&hash);

        if let Some(key) = &cache_key {
            match read_cache::<String>(key) {
                Ok(Some(cached)) => match serde_json::from_str::<TransactionData>(&cached) {
                    Ok(data) => {
                        debug!("found cached transaction '{}'", hash);
                        return Ok(data);
                    }
                    Err(e) => debug!("ignoring malformed cache entry '{}': {}", key, e),
                },
                Ok(None) => {}
                Err(e) => debug!("failed to read cache entry '{}': {}", key, e),
            }
        }

        let (transaction, receipt) = futures::try_join!(
            get_transaction(hash, &self.rpc_url),
            get_transaction_receipt(hash, &self.rpc_url)
        )
        .map_err(|e| Error::FetchError(e.to_string()))?;

        let data = TransactionData::from_rpc(&transaction, &receipt, self.chain_id);

        // only mined transactions are final
        if let (Some(key), Some(_)) = (cache_key, data.block_number) {
            let stored = serde_json::to_string(&data)
                .map_err(|e| e.to_string())
                .and_then(|json| store_cache(&key, json, None).map_err(|e| e.to_string()));
            if let Err(e) = stored {
                warn!("failed to cache transaction '{}': {}", hash, e);
            }
        }

        Ok(data)
    }
}
