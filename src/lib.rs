//! Typed bindings for the rollup L1 messenger system contract.
//!
//! The messenger exposes three state-mutating calls (`sendToL1`,
//! `sendL2ToL1Log`, `requestBytecodeL1Publication`) and three events
//! (`L1MessageSent`, `L2ToL1LogSent`, `BytecodeL1PublicationRequested`).
//! This crate declares that surface once (in [`bindings`]), derives
//! name/signature-resolvable descriptors from it, and wraps an alloy
//! provider in a typed handle for calls, queries, and subscriptions.
//!
//! Byte-level encoding, transport, and transaction handling are alloy's
//! job; this crate is the typed surface over them.

pub mod bindings;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use bindings::{IL1Messenger, L1_MESSENGER_ADDRESS};
pub use domain::abi::{
    Descriptor, EventDescriptor, EventParamSpec, FunctionDescriptor, InterfaceRegistry,
    LookupError, ParamSpec, StateMutability,
};
pub use domain::log::L2ToL1Log;
pub use infrastructure::codec::{CodecError, DecodedEvent, DecodedField};
pub use infrastructure::ethereum::{DefaultProvider, L1Messenger, ProviderConfig};
