use alloy::primitives::{Address, B256};

use crate::{error::LogDecodeError, utils::signatures::EventKind};

/// Render the address held in the low 20 bytes of an indexed topic, EIP-55 checksummed.
///
/// ```
/// use alloy::primitives::b256;
/// use deltascope_inspect::address_from_topic;
///
/// let topic = b256!("000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045");
/// assert_eq!(address_from_topic(&topic), "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045");
/// ```
pub fn address_from_topic(topic: &B256) -> String {
    Address::from_word(*topic).to_checksum(None)
}

/// Positions of the (from, to) addresses in the topics of `kind`. ERC1155 events carry the
/// operator in `topics[1]`, which isn't surfaced.
fn participant_indices(kind: EventKind) -> (usize, usize) {
    match kind {
        EventKind::Transfer | EventKind::Approval => (1, 2),
        EventKind::TransferSingle | EventKind::TransferBatch => (2, 3),
    }
}

fn topic_at(kind: EventKind, topics: &[B256], index: usize) -> Result<&B256, LogDecodeError> {
    topics.get(index).ok_or(LogDecodeError::MissingTopic { event: kind, index })
}

/// Extract the checksummed (from, to) pair of a log. For approvals this is (owner, spender).
pub(crate) fn participants(
    kind: EventKind,
    topics: &[B256],
) -> Result<(String, String), LogDecodeError> {
    let (from, to) = participant_indices(kind);

    Ok((
        address_from_topic(topic_at(kind, topics, from)?),
        address_from_topic(topic_at(kind, topics, to)?),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;
    use proptest::prelude::*;

    fn topic(address: Address) -> B256 {
        address.into_word()
    }

    #[test]
    fn test_address_from_topic_ignores_high_bytes() {
        let mut word = topic(address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045"));
        word.0[0] = 0xff;
        assert_eq!(address_from_topic(&word), "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045");
    }

    #[test]
    fn test_participants_transfer() {
        let from = address!("1111111111111111111111111111111111111111");
        let to = address!("2222222222222222222222222222222222222222");
        let topics = [B256::ZERO, topic(from), topic(to)];

        let (a, b) = participants(EventKind::Transfer, &topics).expect("should extract");
        assert_eq!(a, from.to_checksum(None));
        assert_eq!(b, to.to_checksum(None));
    }

    #[test]
    fn test_participants_skip_operator() {
        let operator = address!("9999999999999999999999999999999999999999");
        let from = address!("1111111111111111111111111111111111111111");
        let to = address!("2222222222222222222222222222222222222222");
        let topics = [B256::ZERO, topic(operator), topic(from), topic(to)];

        let (a, b) = participants(EventKind::TransferSingle, &topics).expect("should extract");
        assert_eq!(a, from.to_checksum(None));
        assert_eq!(b, to.to_checksum(None));
    }

    #[test]
    fn test_participants_missing_topic() {
        let topics = [B256::ZERO, B256::ZERO, B256::ZERO];
        assert_eq!(
            participants(EventKind::TransferBatch, &topics),
            Err(LogDecodeError::MissingTopic { event: EventKind::TransferBatch, index: 3 })
        );
    }

    proptest! {
        #[test]
        fn prop_address_from_topic_is_deterministic(bytes in any::<[u8; 32]>()) {
            let word = B256::from(bytes);
            let first = address_from_topic(&word);

            prop_assert_eq!(&first, &address_from_topic(&B256::from(bytes)));
            prop_assert_eq!(first.len(), 42);
            prop_assert_eq!(first.to_lowercase(), format!("{:#x}", Address::from_word(word)));

            // feeding the rendered address back through a topic is a fixed point
            let parsed: Address = first.parse().expect("checksummed output should parse");
            prop_assert_eq!(address_from_topic(&parsed.into_word()), first);
        }
    }
}
