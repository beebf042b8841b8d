use alloy::primitives::{B256, U256};

use crate::{error::LogDecodeError, utils::signatures::EventKind};

const WORD: usize = 32;

/// The values carried by a recognized log, besides its addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedPayload {
    /// The raw value of a `Transfer`. An amount for fungible tokens, a token id otherwise.
    Transfer(U256),
    /// The raw allowance of an `Approval`
    Approval(U256),
    /// A single ERC1155 transfer of `amount` units of `token_id`
    TransferSingle {
        /// The ERC1155 token id
        token_id: U256,
        /// Units transferred
        amount: U256,
    },
    /// An ERC1155 batch transfer. The dynamically encoded id and value arrays are left
    /// undecoded, and the transfer is reported as a single `BATCH` record.
    TransferBatch,
}

/// Decode the big-endian payload of a `kind` log.
///
/// `Transfer` and `Approval` read their value from the first word of `data`, unless the log has
/// a fourth topic, in which case the value is indexed (as ERC721 does) and read from `topics[3]`.
pub fn decode_payload(
    kind: EventKind,
    topics: &[B256],
    data: &[u8],
) -> Result<DecodedPayload, LogDecodeError> {
    match kind {
        EventKind::Transfer => Ok(DecodedPayload::Transfer(single_value(topics, data)?)),
        EventKind::Approval => Ok(DecodedPayload::Approval(single_value(topics, data)?)),
        EventKind::TransferSingle => {
            ensure_len(data, 2 * WORD)?;
            Ok(DecodedPayload::TransferSingle { token_id: word(data, 0), amount: word(data, 1) })
        }
        EventKind::TransferBatch => Ok(DecodedPayload::TransferBatch),
    }
}

fn single_value(topics: &[B256], data: &[u8]) -> Result<U256, LogDecodeError> {
    if let Some(indexed) = topics.get(3) {
        return Ok(U256::from_be_bytes(indexed.0));
    }

    ensure_len(data, WORD)?;
    Ok(word(data, 0))
}

fn ensure_len(data: &[u8], expected: usize) -> Result<(), LogDecodeError> {
    if data.len() < expected {
        return Err(LogDecodeError::PayloadTooShort { expected, actual: data.len() });
    }
    Ok(())
}

// callers check the length first
fn word(data: &[u8], index: usize) -> U256 {
    U256::from_be_slice(&data[index * WORD..(index + 1) * WORD])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(values: &[u64]) -> Vec<u8> {
        values.iter().flat_map(|v| U256::from(*v).to_be_bytes::<32>()).collect()
    }

    #[test]
    fn test_decode_transfer_amount() {
        let payload = decode_payload(EventKind::Transfer, &[B256::ZERO; 3], &encode(&[1_250_000]));
        assert_eq!(payload, Ok(DecodedPayload::Transfer(U256::from(1_250_000u64))));
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let mut data = encode(&[7]);
        data.extend_from_slice(&[0xff; 5]);
        let payload = decode_payload(EventKind::Approval, &[B256::ZERO; 3], &data);
        assert_eq!(payload, Ok(DecodedPayload::Approval(U256::from(7u64))));
    }

    #[test]
    fn test_decode_indexed_value() {
        let token_id = U256::from(4242u64);
        let topics = [B256::ZERO, B256::ZERO, B256::ZERO, B256::from(token_id)];

        let payload = decode_payload(EventKind::Transfer, &topics, &[]);
        assert_eq!(payload, Ok(DecodedPayload::Transfer(token_id)));
    }

    #[test]
    fn test_decode_transfer_single() {
        let payload =
            decode_payload(EventKind::TransferSingle, &[B256::ZERO; 4], &encode(&[0, 5]));
        assert_eq!(
            payload,
            Ok(DecodedPayload::TransferSingle { token_id: U256::ZERO, amount: U256::from(5u64) })
        );
    }

    #[test]
    fn test_payload_too_short() {
        assert_eq!(
            decode_payload(EventKind::Transfer, &[B256::ZERO; 3], &[0u8; 31]),
            Err(LogDecodeError::PayloadTooShort { expected: 32, actual: 31 })
        );
        assert_eq!(
            decode_payload(EventKind::TransferSingle, &[B256::ZERO; 4], &encode(&[1])),
            Err(LogDecodeError::PayloadTooShort { expected: 64, actual: 32 })
        );
    }

    #[test]
    fn test_batch_payload_is_not_decoded() {
        assert_eq!(
            decode_payload(EventKind::TransferBatch, &[B256::ZERO; 4], &[]),
            Ok(DecodedPayload::TransferBatch)
        );
    }
}
