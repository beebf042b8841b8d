use std::fmt;

use alloy::primitives::Address;
use async_trait::async_trait;
use futures::future::join_all;
use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{error::MetadataError, interfaces::TokenStandard};

/// The symbol used when a token doesn't answer `symbol()`.
pub const UNKNOWN_SYMBOL: &str = "UNKNOWN";

/// The interface shape a `symbol()` call is made against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenInterface {
    /// ERC20, returning `string`
    Fungible,
    /// ERC721 and pre-standard NFTs, returning `string` or `bytes32`
    NonFungible,
}

/// Answers token metadata queries. Implementations bound their own latency; a timeout is just
/// another [`MetadataError`].
#[async_trait]
pub trait TokenMetadataSource: Send + Sync {
    /// The token's symbol, read through `interface`.
    async fn symbol(&self, token: Address, interface: TokenInterface)
        -> Result<String, MetadataError>;

    /// The token's decimal scale.
    async fn decimals(&self, token: Address) -> Result<u8, MetadataError>;
}

/// Best-effort metadata of a token contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// The symbol, or [`UNKNOWN_SYMBOL`]
    pub symbol: String,
    /// The decimal scale. 0 when `decimals()` failed.
    pub decimals: u8,
    /// ERC20 if `decimals()` answered, ERC721 otherwise
    pub standard: TokenStandard,
}

/// Look up the metadata of `token`. Never fails.
///
/// A token that answers `decimals()` is provisionally ERC20. One that doesn't is taken to be an
/// NFT: its scale is 0 and `symbol()` is retried against the non-fungible shape. If that retry
/// fails too, the symbol from the first attempt is kept, or [`UNKNOWN_SYMBOL`] if there was none.
pub async fn resolve_token_metadata<S>(source: &S, token: Address) -> TokenMetadata
where
    S: TokenMetadataSource + ?Sized, {
    let (symbol, decimals) =
        futures::join!(source.symbol(token, TokenInterface::Fungible), source.decimals(token));

    match decimals {
        Ok(decimals) => TokenMetadata {
            symbol: symbol.unwrap_or_else(|e| {
                debug!("symbol() failed for {}: {}", token, e);
                UNKNOWN_SYMBOL.to_string()
            }),
            decimals,
            standard: TokenStandard::Erc20,
        },
        Err(e) => {
            debug!("decimals() failed for {}, treating it as non-fungible: {}", token, e);

            let symbol = match source.symbol(token, TokenInterface::NonFungible).await {
                Ok(symbol) => symbol,
                Err(e) => {
                    debug!("non-fungible symbol() failed for {}: {}", token, e);
                    symbol.unwrap_or_else(|_| UNKNOWN_SYMBOL.to_string())
                }
            };

            TokenMetadata { symbol, decimals: 0, standard: TokenStandard::Erc721 }
        }
    }
}

/// Memoizes [`resolve_token_metadata`] per token address. Lives for a single transaction.
pub struct MetadataResolver<'a, S: ?Sized> {
    source: &'a S,
    memo: HashMap<Address, TokenMetadata>,
}

impl<S: ?Sized> fmt::Debug for MetadataResolver<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataResolver").field("memo", &self.memo).finish_non_exhaustive()
    }
}

impl<'a, S> MetadataResolver<'a, S>
where
    S: TokenMetadataSource + ?Sized,
{
    /// Creates an empty resolver over `source`.
    pub fn new(source: &'a S) -> Self {
        Self { source, memo: HashMap::new() }
    }

    /// Resolve every token not yet known, concurrently.
    pub async fn prefetch(&mut self, tokens: impl IntoIterator<Item = Address>) {
        let mut seen = HashSet::new();
        let pending: Vec<Address> = tokens
            .into_iter()
            .filter(|token| !self.memo.contains_key(token) && seen.insert(*token))
            .collect();

        if pending.is_empty() {
            return;
        }

        debug!("resolving metadata for {} tokens", pending.len());
        let source = self.source;
        let resolved =
            join_all(pending.iter().map(|token| resolve_token_metadata(source, *token))).await;
        self.memo.extend(pending.into_iter().zip(resolved));
    }

    /// The metadata of `token`, resolved on first use.
    pub async fn resolve(&mut self, token: Address) -> TokenMetadata {
        if let Some(metadata) = self.memo.get(&token) {
            return metadata.clone();
        }

        let metadata = resolve_token_metadata(self.source, token).await;
        self.memo.insert(token, metadata.clone());
        metadata
    }
}
