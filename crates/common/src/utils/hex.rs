use alloy::primitives::FixedBytes;

/// A convenience function which encodes a given EVM type into a sized, lowercase hex string.
pub trait ToLowerHex {
    /// Encodes `self` as a `0x`-prefixed, lowercase hex string.
    fn to_lower_hex(&self) -> String;
}

impl ToLowerHex for FixedBytes<32> {
    fn to_lower_hex(&self) -> String {
        format!("{self:#x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{b256, B256};

    #[test]
    fn test_b256_to_lower_hex() {
        let word = b256!("ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef");
        assert_eq!(
            word.to_lower_hex(),
            "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
        );
    }

    #[test]
    fn test_to_lower_hex_keeps_leading_zeros() {
        let hex = B256::with_last_byte(1).to_lower_hex();
        assert_eq!(hex.len(), 66);
        assert_eq!(hex, format!("0x{}01", "0".repeat(62)));
    }
}
