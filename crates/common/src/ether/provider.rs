//! Create a custom data transport to use with a Provider.
use alloy::{
    network::Ethereum,
    primitives::{Address, Bytes, TxHash},
    providers::{Provider, ProviderBuilder, RootProvider},
    rpc::types::{Transaction, TransactionReceipt, TransactionRequest},
};
use eyre::Result;

/// [`MultiTransportProvider`] is a convenience wrapper around the different transport types
/// supported by the [`Provider`].
#[derive(Clone, Debug)]
pub struct MultiTransportProvider {
    provider: RootProvider<Ethereum>,
}

// We implement a convenience "constructor" method, to easily initialize the transport.
// The builder picks http, ws or ipc based on the scheme of the rpc_url.
impl MultiTransportProvider {
    /// Connect to a provider using the given rpc_url.
    pub async fn connect(rpc_url: &str) -> Result<Self> {
        if rpc_url.is_empty() {
            return Err(eyre::eyre!("No RPC URL provided"));
        }

        let provider = ProviderBuilder::new().connect(rpc_url).await?.root().clone();
        Ok(Self { provider })
    }

    /// Get the chain id.
    pub async fn get_chainid(&self) -> Result<u64> {
        Ok(self.provider.get_chain_id().await?)
    }

    /// Get the transaction by hash.
    pub async fn get_transaction_by_hash(&self, tx_hash: TxHash) -> Result<Option<Transaction>> {
        Ok(self.provider.get_transaction_by_hash(tx_hash).await?)
    }

    /// Get the receipt of the transaction with the given hash.
    pub async fn get_transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> Result<Option<TransactionReceipt>> {
        Ok(self.provider.get_transaction_receipt(tx_hash).await?)
    }

    /// Execute a read-only `eth_call` against `to` with the given calldata, returning the raw
    /// return data.
    pub async fn call(&self, to: Address, calldata: Bytes) -> Result<Bytes> {
        let request = TransactionRequest::default().to(to).input(calldata.into());
        Ok(self.provider.call(request).await?)
    }
}
