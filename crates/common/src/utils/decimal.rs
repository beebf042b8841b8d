//! `serialize_with` helpers that write [`U256`] values as base-10 strings, so raw token
//! amounts survive JSON consumers that parse numbers as doubles.

use alloy::primitives::U256;
use serde::Serializer;

/// Serialize a [`U256`] as a decimal string.
pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Serialize an `Option<U256>` as a decimal string or `null`.
pub fn serialize_option<S: Serializer>(
    value: &Option<U256>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(value) => serializer.collect_str(value),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Amounts {
        #[serde(serialize_with = "serialize")]
        amount: U256,
        #[serde(serialize_with = "serialize_option")]
        token_id: Option<U256>,
    }

    #[test]
    fn test_serializes_as_decimal_strings() {
        let amounts = Amounts { amount: U256::MAX, token_id: Some(U256::from(42u64)) };
        let json = serde_json::to_string(&amounts).expect("failed to serialize");
        assert_eq!(
            json,
            format!("{{\"amount\":\"{}\",\"token_id\":\"42\"}}", U256::MAX)
        );
    }

    #[test]
    fn test_serializes_none_as_null() {
        let amounts = Amounts { amount: U256::ZERO, token_id: None };
        let json = serde_json::to_string(&amounts).expect("failed to serialize");
        assert_eq!(json, "{\"amount\":\"0\",\"token_id\":null}");
    }
}
