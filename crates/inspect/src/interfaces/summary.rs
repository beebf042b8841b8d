use std::fmt::{self, Display};

use alloy::primitives::U256;
use deltascope_common::utils::decimal;
use serde::{Deserialize, Serialize};

/// The token standard inferred for a transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenStandard {
    /// Fungible token
    #[serde(rename = "ERC20")]
    Erc20,
    /// Non-fungible token
    #[serde(rename = "ERC721")]
    Erc721,
    /// Multi-token
    #[serde(rename = "ERC1155")]
    Erc1155,
}

impl Display for TokenStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenStandard::Erc20 => write!(f, "ERC20"),
            TokenStandard::Erc721 => write!(f, "ERC721"),
            TokenStandard::Erc1155 => write!(f, "ERC1155"),
        }
    }
}

/// A token movement decoded from a `Transfer`, `TransferSingle` or `TransferBatch` log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenTransfer {
    /// The token contract, checksummed
    pub token: String,
    /// The token symbol, or `UNKNOWN`
    pub symbol: String,
    /// The inferred standard
    pub standard: TokenStandard,
    /// Sender, checksummed
    pub from: String,
    /// Recipient, checksummed
    pub to: String,
    /// The amount for display. `"1"` for NFTs and `"BATCH"` for ERC1155 batches.
    pub amount: String,
    /// The unscaled on-chain value
    #[serde(serialize_with = "decimal::serialize")]
    pub raw_amount: U256,
    /// The token id of NFT and ERC1155 single transfers
    #[serde(serialize_with = "decimal::serialize_option")]
    pub token_id: Option<U256>,
}

/// An allowance set by an `Approval` log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApprovalChange {
    /// The token contract, checksummed
    pub token: String,
    /// The token symbol, or `UNKNOWN`
    pub symbol: String,
    /// The approving account, checksummed
    pub owner: String,
    /// The approved spender, checksummed
    pub spender: String,
    /// The allowance for display
    pub amount: String,
    /// The unscaled on-chain value
    #[serde(serialize_with = "decimal::serialize")]
    pub raw_amount: U256,
}

/// Everything decoded from one transaction. Transfers and approvals follow receipt log order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionSummary {
    /// The chain id in decimal, or `unknown`
    pub chain: String,
    /// The transaction hash, lowercase hex
    pub tx_hash: String,
    /// The block the transaction was mined in
    pub block_number: Option<u64>,
    /// 1 on success, 0 on failure
    pub status: u8,
    /// Sender, checksummed
    pub from: String,
    /// Recipient, checksummed. Absent for contract creations.
    pub to: Option<String>,
    /// Ether sent with the transaction, in wei
    #[serde(serialize_with = "decimal::serialize")]
    pub value_wei: U256,
    /// Ether sent with the transaction
    pub value_eth: String,
    /// Gas used
    pub gas_used: u64,
    /// The effective gas price, in wei
    #[serde(serialize_with = "decimal::serialize")]
    pub effective_gas_price_wei: U256,
    /// The fee paid, in wei
    #[serde(serialize_with = "decimal::serialize")]
    pub fee_wei: U256,
    /// The fee paid, in ether
    pub fee_eth: String,
    /// Token transfers
    pub transfers: Vec<TokenTransfer>,
    /// Approval changes
    pub approvals: Vec<ApprovalChange>,
    /// One entry per recognized log that couldn't be decoded
    pub warnings: Vec<String>,
}

impl TransactionSummary {
    /// Whether the transaction executed successfully.
    pub fn succeeded(&self) -> bool {
        self.status == 1
    }
}

/// A transaction that couldn't be inspected
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionFailure {
    /// The requested transaction hash, as given
    pub tx_hash: String,
    /// Why it failed
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_serializes_uppercase() {
        let json = serde_json::to_string(&[TokenStandard::Erc20, TokenStandard::Erc1155])
            .expect("failed to serialize");
        assert_eq!(json, "[\"ERC20\",\"ERC1155\"]");
        assert_eq!(TokenStandard::Erc721.to_string(), "ERC721");
    }

    #[test]
    fn test_transfer_serializes_raw_values_as_decimal() {
        let transfer = TokenTransfer {
            token: "0x0000000000000000000000000000000000000001".to_string(),
            symbol: "PUNK".to_string(),
            standard: TokenStandard::Erc721,
            from: "0x0000000000000000000000000000000000000002".to_string(),
            to: "0x0000000000000000000000000000000000000003".to_string(),
            amount: "1".to_string(),
            raw_amount: U256::from(255u64),
            token_id: Some(U256::from(255u64)),
        };

        let json = serde_json::to_value(&transfer).expect("failed to serialize");
        assert_eq!(json["raw_amount"], "255");
        assert_eq!(json["token_id"], "255");
        assert_eq!(json["standard"], "ERC721");
    }
}
