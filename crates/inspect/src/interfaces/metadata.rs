use std::time::Duration;

use alloy::{
    primitives::{Address, Bytes},
    sol,
    sol_types::SolCall,
};
use async_trait::async_trait;
use deltascope_common::{ether::provider::MultiTransportProvider, utils::strings::from_null_padded};
use tracing::trace;

use crate::{
    core::metadata::{TokenInterface, TokenMetadataSource},
    error::{Error, MetadataError},
};

sol! {
    interface IERC20Metadata {
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
    }

    /// Pre-standard tokens (MKR, SAI, CryptoPunks) return their symbol as a `bytes32`.
    interface ILegacySymbol {
        function symbol() external view returns (bytes32);
    }
}

/// A [`TokenMetadataSource`] that reads `symbol()` and `decimals()` through `eth_call`. Each
/// call is bounded by a timeout, which counts as a failed lookup.
#[derive(Debug, Clone)]
pub struct RpcTokenMetadata {
    provider: MultiTransportProvider,
    timeout: Duration,
}

impl RpcTokenMetadata {
    /// Connect to `rpc_url`, giving each call `timeout` to complete.
    pub async fn connect(rpc_url: &str, timeout: Duration) -> Result<Self, Error> {
        let provider = MultiTransportProvider::connect(rpc_url).await.map_err(|e| {
            Error::FetchError(format!("failed to connect to provider '{rpc_url}': {e}"))
        })?;

        Ok(Self { provider, timeout })
    }

    async fn call(&self, token: Address, calldata: Vec<u8>) -> Result<Bytes, MetadataError> {
        match tokio::time::timeout(self.timeout, self.provider.call(token, calldata.into())).await
        {
            Ok(Ok(output)) if output.is_empty() => Err(MetadataError::EmptyReturn),
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => Err(MetadataError::CallFailed(e.to_string())),
            Err(_) => Err(MetadataError::Timeout(self.timeout)),
        }
    }
}

/// Decode a `symbol()` return as a `string`, falling back to a null-padded `bytes32`.
fn decode_symbol(output: &[u8]) -> Result<String, MetadataError> {
    if let Ok(symbol) = IERC20Metadata::symbolCall::abi_decode_returns(output) {
        return Ok(symbol);
    }

    let word = ILegacySymbol::symbolCall::abi_decode_returns(output)
        .map_err(|e| MetadataError::Decode(e.to_string()))?;
    from_null_padded(word.as_slice())
        .ok_or_else(|| MetadataError::Decode("bytes32 symbol isn't printable text".to_string()))
}

#[async_trait]
impl TokenMetadataSource for RpcTokenMetadata {
    async fn symbol(
        &self,
        token: Address,
        interface: TokenInterface,
    ) -> Result<String, MetadataError> {
        trace!("calling symbol() on {} as {:?}", token, interface);
        let output = self.call(token, IERC20Metadata::symbolCall {}.abi_encode()).await?;

        match interface {
            TokenInterface::Fungible => IERC20Metadata::symbolCall::abi_decode_returns(&output)
                .map_err(|e| MetadataError::Decode(e.to_string())),
            TokenInterface::NonFungible => decode_symbol(&output),
        }
    }

    async fn decimals(&self, token: Address) -> Result<u8, MetadataError> {
        trace!("calling decimals() on {}", token);
        let output = self.call(token, IERC20Metadata::decimalsCall {}.abi_encode()).await?;

        IERC20Metadata::decimalsCall::abi_decode_returns(&output)
            .map_err(|e| MetadataError::Decode(e.to_string()))
    }
}
