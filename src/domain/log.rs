//! Canonical L2 -> L1 log record.
//!
//! The named-field struct is the single source of truth; the positional
//! tuple view is a pure projection of it, so the two can never disagree.

use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

use crate::bindings::IL1Messenger;

/// A log passed from L2 to L1 through the messenger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct L2ToL1Log {
    /// Shard the log was emitted from (0 on single-shard chains)
    pub l2_shard_id: u8,
    /// Whether the log was emitted by a system contract
    pub is_service: bool,
    /// Index of the emitting transaction within its block
    pub tx_number_in_block: u16,
    /// Emitting contract
    pub sender: Address,
    /// First committed word
    pub key: B256,
    /// Second committed word
    pub value: B256,
}

impl L2ToL1Log {
    /// Positional view in declared field order.
    pub fn as_tuple(&self) -> (u8, bool, u16, Address, B256, B256) {
        (
            self.l2_shard_id,
            self.is_service,
            self.tx_number_in_block,
            self.sender,
            self.key,
            self.value,
        )
    }

    /// Rebuild from the positional view.
    pub fn from_tuple(tuple: (u8, bool, u16, Address, B256, B256)) -> Self {
        let (l2_shard_id, is_service, tx_number_in_block, sender, key, value) = tuple;
        Self {
            l2_shard_id,
            is_service,
            tx_number_in_block,
            sender,
            key,
            value,
        }
    }
}

impl From<IL1Messenger::L2ToL1Log> for L2ToL1Log {
    fn from(log: IL1Messenger::L2ToL1Log) -> Self {
        Self {
            l2_shard_id: log.l2ShardId,
            is_service: log.isService,
            tx_number_in_block: log.txNumberInBlock,
            sender: log.sender,
            key: log.key,
            value: log.value,
        }
    }
}

impl From<L2ToL1Log> for IL1Messenger::L2ToL1Log {
    fn from(log: L2ToL1Log) -> Self {
        Self {
            l2ShardId: log.l2_shard_id,
            isService: log.is_service,
            txNumberInBlock: log.tx_number_in_block,
            sender: log.sender,
            key: log.key,
            value: log.value,
        }
    }
}
