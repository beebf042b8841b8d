use std::fmt::{self, Display};

use alloy::primitives::{keccak256, B256};
use serde::Serialize;

/// The event shapes the decoder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventKind {
    /// ERC20/ERC721 `Transfer(address,address,uint256)`
    Transfer,
    /// ERC20/ERC721 `Approval(address,address,uint256)`
    Approval,
    /// ERC1155 `TransferSingle(address,address,address,uint256,uint256)`
    TransferSingle,
    /// ERC1155 `TransferBatch(address,address,address,uint256[],uint256[])`
    TransferBatch,
}

impl EventKind {
    /// The canonical event signature, as hashed into `topic0`.
    pub fn signature(&self) -> &'static str {
        match self {
            EventKind::Transfer => "Transfer(address,address,uint256)",
            EventKind::Approval => "Approval(address,address,uint256)",
            EventKind::TransferSingle => {
                "TransferSingle(address,address,address,uint256,uint256)"
            }
            EventKind::TransferBatch => {
                "TransferBatch(address,address,address,uint256[],uint256[])"
            }
        }
    }
}

impl Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Transfer => write!(f, "Transfer"),
            EventKind::Approval => write!(f, "Approval"),
            EventKind::TransferSingle => write!(f, "TransferSingle"),
            EventKind::TransferBatch => write!(f, "TransferBatch"),
        }
    }
}

/// The `topic0` hashes of every [`EventKind`], computed once and shared by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSignatures {
    transfer: B256,
    approval: B256,
    transfer_single: B256,
    transfer_batch: B256,
}

impl Default for EventSignatures {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSignatures {
    /// Hash the four known event signatures.
    pub fn new() -> Self {
        Self {
            transfer: keccak256(EventKind::Transfer.signature()),
            approval: keccak256(EventKind::Approval.signature()),
            transfer_single: keccak256(EventKind::TransferSingle.signature()),
            transfer_batch: keccak256(EventKind::TransferBatch.signature()),
        }
    }

    /// The `topic0` of `kind`.
    pub fn hash(&self, kind: EventKind) -> B256 {
        match kind {
            EventKind::Transfer => self.transfer,
            EventKind::Approval => self.approval,
            EventKind::TransferSingle => self.transfer_single,
            EventKind::TransferBatch => self.transfer_batch,
        }
    }

    /// Identify the event whose signature hash is exactly `topic`.
    pub fn match_topic(&self, topic: &B256) -> Option<EventKind> {
        [
            EventKind::Transfer,
            EventKind::Approval,
            EventKind::TransferSingle,
            EventKind::TransferBatch,
        ]
        .into_iter()
        .find(|kind| self.hash(*kind) == *topic)
    }

    /// Identify the event of a log from its first topic. Logs without topics are anonymous and
    /// never match.
    pub fn match_topics(&self, topics: &[B256]) -> Option<EventKind> {
        topics.first().and_then(|topic| self.match_topic(topic))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::{primitives::b256, sol, sol_types::SolEvent};

    sol! {
        event Transfer(address indexed from, address indexed to, uint256 value);
        event TransferSingle(address indexed operator, address indexed from, address indexed to, uint256 id, uint256 value);
        event TransferBatch(address indexed operator, address indexed from, address indexed to, uint256[] ids, uint256[] values);
    }

    #[test]
    fn test_signature_hashes() {
        let signatures = EventSignatures::new();

        assert_eq!(
            signatures.hash(EventKind::Transfer),
            b256!("ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef")
        );
        assert_eq!(
            signatures.hash(EventKind::Approval),
            b256!("8c5be1e5ebec7d5bd14f71427d1e84f3dd0314c0f7b2291e5b200ac8c7c3b925")
        );
        assert_eq!(signatures.hash(EventKind::Transfer), Transfer::SIGNATURE_HASH);
        assert_eq!(signatures.hash(EventKind::TransferSingle), TransferSingle::SIGNATURE_HASH);
        assert_eq!(signatures.hash(EventKind::TransferBatch), TransferBatch::SIGNATURE_HASH);
    }

    #[test]
    fn test_match_topic() {
        let signatures = EventSignatures::new();

        for kind in [
            EventKind::Transfer,
            EventKind::Approval,
            EventKind::TransferSingle,
            EventKind::TransferBatch,
        ] {
            assert_eq!(signatures.match_topic(&signatures.hash(kind)), Some(kind));
        }

        // Deposit(address,uint256)
        let deposit = b256!("e1fffcc4923d04b559f4d29a8bfc6cda04eb5b0d3c460751c2402c5c5cc9109c");
        assert_eq!(signatures.match_topic(&deposit), None);
        assert_eq!(signatures.match_topic(&B256::ZERO), None);
    }

    #[test]
    fn test_match_topics_without_topics() {
        assert_eq!(EventSignatures::new().match_topics(&[]), None);
    }
}
