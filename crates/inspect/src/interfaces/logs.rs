use alloy::{
    primitives::{Address, Bytes, B256},
    rpc::types::Log,
};
use serde::{Deserialize, Serialize};

/// A raw receipt log, as the decoder sees it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogEntry {
    /// The contract that emitted the log
    pub address: Address,

    /// 0 to 4 indexed topics. `topics[0]` is the event signature hash, unless the event is
    /// anonymous.
    pub topics: Vec<B256>,

    /// The non-indexed event data
    pub data: Bytes,
}

impl LogEntry {
    /// Creates a new log entry.
    pub fn new(address: Address, topics: Vec<B256>, data: Bytes) -> Self {
        Self { address, topics, data }
    }
}

impl From<&Log> for LogEntry {
    fn from(log: &Log) -> Self {
        Self {
            address: log.address(),
            topics: log.topics().to_vec(),
            data: log.data().data.clone(),
        }
    }
}
