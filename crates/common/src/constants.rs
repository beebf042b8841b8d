use fancy_regex::Regex;
use lazy_static::lazy_static;

lazy_static! {
    /// The following regex is used to validate Ethereum addresses
    pub static ref ADDRESS_REGEX: Regex = Regex::new(r"^(0x)?[0-9a-fA-F]{40}$").expect("failed to compile regex");

    /// The following regex is used to validate Ethereum transaction hashes
    pub static ref TRANSACTION_HASH_REGEX: Regex = Regex::new(r"^(0x)?[0-9a-fA-F]{64}$").expect("failed to compile regex");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_regex() {
        assert!(ADDRESS_REGEX
            .is_match("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045")
            .expect("regex failed"));
        assert!(ADDRESS_REGEX
            .is_match("d8da6bf26964af9d7eed9e03e53415d37aa96045")
            .expect("regex failed"));
        assert!(!ADDRESS_REGEX.is_match("0xd8da6bf26964af9d7eed").expect("regex failed"));
    }

    #[test]
    fn test_transaction_hash_regex() {
        assert!(TRANSACTION_HASH_REGEX
            .is_match("0xa5f676d0ee4c23cc1ccb0b802be5aaead5827a3337c06e9da8b0a85dfa3e7dd5")
            .expect("regex failed"));
        assert!(!TRANSACTION_HASH_REGEX
            .is_match("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045")
            .expect("regex failed"));
        assert!(!TRANSACTION_HASH_REGEX.is_match("not a hash").expect("regex failed"));
    }
}
