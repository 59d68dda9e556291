//! ABI declaration for the `IL1Messenger` system contract.
//!
//! This is the single source of truth for the contract surface: selectors,
//! canonical signatures, and event topics are all derived from this
//! declaration, never written out by hand.

use alloy::sol;
use alloy_primitives::{address, Address};

/// The messenger lives in the reserved system-contract address space.
pub const L1_MESSENGER_ADDRESS: Address = address!("0000000000000000000000000000000000008008");

sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    #[derive(Debug)]
    contract IL1Messenger {
        /// An L2 -> L1 log as it is committed to the merkle tree on L1.
        #[derive(Default, PartialEq, Eq)]
        struct L2ToL1Log {
            uint8 l2ShardId;
            bool isService;
            uint16 txNumberInBlock;
            address sender;
            bytes32 key;
            bytes32 value;
        }

        event BytecodeL1PublicationRequested(bytes32 bytecodeHash);

        event L1MessageSent(address indexed sender, bytes32 indexed hash, bytes message);

        event L2ToL1LogSent(L2ToL1Log l2log);

        function requestBytecodeL1Publication(bytes32 bytecodeHash) external;

        function sendL2ToL1Log(
            bool isService,
            bytes32 key,
            bytes32 value
        ) external returns (uint256 logId);

        function sendToL1(bytes calldata message) external returns (bytes32 hash);
    }
);
