//! Typed descriptors for the messenger ABI surface.

use alloy_primitives::B256;

/// A declared function parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    /// Parameter name as declared in the contract
    pub name: &'static str,
    /// Solidity type (e.g. "bytes32", "(uint8,bool,uint16,address,bytes32,bytes32)")
    pub kind: &'static str,
}

/// A declared event parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventParamSpec {
    /// Parameter name as declared in the contract
    pub name: &'static str,
    /// Solidity type
    pub kind: &'static str,
    /// Indexed parameters are carried in log topics rather than log data
    pub indexed: bool,
}

/// ABI mutability class of a function.
///
/// Every function of this contract is `NonPayable`; the other classes exist
/// so descriptors carry the full ABI vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateMutability {
    Pure,
    View,
    NonPayable,
    Payable,
}

/// Descriptor for one callable function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionDescriptor {
    /// Function name
    pub name: &'static str,
    /// Canonical signature string (e.g. "sendToL1(bytes)")
    pub signature: &'static str,
    /// 4-byte call selector, keccak256(signature)[..4]
    pub selector: [u8; 4],
    /// Input parameters in declared order
    pub inputs: &'static [ParamSpec],
    /// Output parameters in declared order
    pub outputs: &'static [ParamSpec],
    pub state_mutability: StateMutability,
}

impl FunctionDescriptor {
    /// Selector as a hex string
    pub fn selector_hex(&self) -> String {
        format!("0x{}", hex::encode(self.selector))
    }
}

/// Descriptor for one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventDescriptor {
    /// Event name
    pub name: &'static str,
    /// Canonical signature string (e.g. "L1MessageSent(address,bytes32,bytes)")
    pub signature: &'static str,
    /// keccak256 of the signature; topic0 of every emitted log
    pub topic: B256,
    /// Event parameters in declared order
    pub inputs: &'static [EventParamSpec],
}

impl EventDescriptor {
    /// Parameters carried in log topics
    pub fn indexed_inputs(&self) -> impl Iterator<Item = &'static EventParamSpec> {
        self.inputs.iter().filter(|param| param.indexed)
    }

    /// Parameters carried in log data
    pub fn data_inputs(&self) -> impl Iterator<Item = &'static EventParamSpec> {
        self.inputs.iter().filter(|param| !param.indexed)
    }
}

/// A resolved descriptor: one of the declared functions or events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descriptor {
    Function(&'static FunctionDescriptor),
    Event(&'static EventDescriptor),
}

impl Descriptor {
    pub fn name(&self) -> &'static str {
        match self {
            Descriptor::Function(function) => function.name,
            Descriptor::Event(event) => event.name,
        }
    }

    pub fn signature(&self) -> &'static str {
        match self {
            Descriptor::Function(function) => function.signature,
            Descriptor::Event(event) => event.signature,
        }
    }
}
