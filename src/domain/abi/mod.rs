//! ABI domain models
//!
//! Descriptor types for the messenger interface and the registry that
//! resolves them by name or canonical signature, independent of the
//! underlying encoding implementation (alloy-dyn-abi).

mod descriptor;
mod registry;

pub use descriptor::{
    Descriptor, EventDescriptor, EventParamSpec, FunctionDescriptor, ParamSpec, StateMutability,
};
pub use registry::{
    InterfaceRegistry, LookupError, BYTECODE_L1_PUBLICATION_REQUESTED, L1_MESSAGE_SENT,
    L2_TO_L1_LOG_SENT, REQUEST_BYTECODE_L1_PUBLICATION, SEND_L2_TO_L1_LOG, SEND_TO_L1,
};
