use alloy::primitives::U256;

use crate::{interfaces::TokenStandard, utils::amount::format_amount};

/// Scale-0 `Transfer` values below this are taken to be NFT token ids.
pub const NFT_TOKEN_ID_THRESHOLD: u64 = 10_000_000_000;

/// The standard and display fields of a decoded `Transfer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// The inferred token standard
    pub standard: TokenStandard,
    /// The amount to display
    pub amount: String,
    /// The token id, for non-fungible transfers
    pub token_id: Option<U256>,
}

/// Decide whether a `Transfer` moved a fungible amount or a single NFT.
///
/// A transfer is ERC721 when its token didn't answer `decimals()` (`provisional` is ERC721), or
/// when it reports no decimals and the value is small enough to be a token id. The value then
/// becomes the token id and the amount is `"1"`. Anything else is an ERC20 amount.
pub fn classify_transfer(provisional: TokenStandard, decimals: u8, raw: U256) -> Classification {
    let looks_like_token_id = decimals == 0 && raw < U256::from(NFT_TOKEN_ID_THRESHOLD);

    if provisional == TokenStandard::Erc721 || looks_like_token_id {
        return Classification {
            standard: TokenStandard::Erc721,
            amount: "1".to_string(),
            token_id: Some(raw),
        };
    }

    Classification {
        standard: TokenStandard::Erc20,
        amount: format_amount(raw, decimals),
        token_id: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::failed_decimals_lookup(TokenStandard::Erc721, 0, 3, TokenStandard::Erc721, "1", Some(3))]
    #[case::nft_with_large_id(TokenStandard::Erc721, 0, 20_000_000_000, TokenStandard::Erc721, "1", Some(20_000_000_000))]
    #[case::zero_decimals_small_value(TokenStandard::Erc20, 0, 9_999_999_999, TokenStandard::Erc721, "1", Some(9_999_999_999))]
    #[case::zero_decimals_at_threshold(TokenStandard::Erc20, 0, 10_000_000_000, TokenStandard::Erc20, "10000000000", None)]
    #[case::six_decimals(TokenStandard::Erc20, 6, 1_250_000, TokenStandard::Erc20, "1.25", None)]
    #[case::eighteen_decimals(TokenStandard::Erc20, 18, 3, TokenStandard::Erc20, "0", None)]
    fn test_classify_transfer(
        #[case] provisional: TokenStandard,
        #[case] decimals: u8,
        #[case] raw: u64,
        #[case] standard: TokenStandard,
        #[case] amount: &str,
        #[case] token_id: Option<u64>,
    ) {
        let classification = classify_transfer(provisional, decimals, U256::from(raw));

        assert_eq!(classification.standard, standard);
        assert_eq!(classification.amount, amount);
        assert_eq!(classification.token_id, token_id.map(U256::from));
    }
}
