//! Interface registry - resolves descriptors by name or canonical signature.

use std::collections::HashMap;

use alloy_primitives::B256;
use alloy_sol_types::{SolCall, SolEvent};
use thiserror::Error;

use crate::bindings::IL1Messenger;

use super::descriptor::{
    Descriptor, EventDescriptor, EventParamSpec, FunctionDescriptor, ParamSpec, StateMutability,
};

/// `requestBytecodeL1Publication(bytes32)`
pub static REQUEST_BYTECODE_L1_PUBLICATION: FunctionDescriptor = FunctionDescriptor {
    name: "requestBytecodeL1Publication",
    signature: IL1Messenger::requestBytecodeL1PublicationCall::SIGNATURE,
    selector: IL1Messenger::requestBytecodeL1PublicationCall::SELECTOR,
    inputs: &[ParamSpec {
        name: "bytecodeHash",
        kind: "bytes32",
    }],
    outputs: &[],
    state_mutability: StateMutability::NonPayable,
};

/// `sendL2ToL1Log(bool,bytes32,bytes32)`
pub static SEND_L2_TO_L1_LOG: FunctionDescriptor = FunctionDescriptor {
    name: "sendL2ToL1Log",
    signature: IL1Messenger::sendL2ToL1LogCall::SIGNATURE,
    selector: IL1Messenger::sendL2ToL1LogCall::SELECTOR,
    inputs: &[
        ParamSpec {
            name: "isService",
            kind: "bool",
        },
        ParamSpec {
            name: "key",
            kind: "bytes32",
        },
        ParamSpec {
            name: "value",
            kind: "bytes32",
        },
    ],
    outputs: &[ParamSpec {
        name: "logId",
        kind: "uint256",
    }],
    state_mutability: StateMutability::NonPayable,
};

/// `sendToL1(bytes)`
pub static SEND_TO_L1: FunctionDescriptor = FunctionDescriptor {
    name: "sendToL1",
    signature: IL1Messenger::sendToL1Call::SIGNATURE,
    selector: IL1Messenger::sendToL1Call::SELECTOR,
    inputs: &[ParamSpec {
        name: "message",
        kind: "bytes",
    }],
    outputs: &[ParamSpec {
        name: "hash",
        kind: "bytes32",
    }],
    state_mutability: StateMutability::NonPayable,
};

/// `BytecodeL1PublicationRequested(bytes32)`
pub static BYTECODE_L1_PUBLICATION_REQUESTED: EventDescriptor = EventDescriptor {
    name: "BytecodeL1PublicationRequested",
    signature: IL1Messenger::BytecodeL1PublicationRequested::SIGNATURE,
    topic: IL1Messenger::BytecodeL1PublicationRequested::SIGNATURE_HASH,
    inputs: &[EventParamSpec {
        name: "bytecodeHash",
        kind: "bytes32",
        indexed: false,
    }],
};

/// `L1MessageSent(address,bytes32,bytes)`
pub static L1_MESSAGE_SENT: EventDescriptor = EventDescriptor {
    name: "L1MessageSent",
    signature: IL1Messenger::L1MessageSent::SIGNATURE,
    topic: IL1Messenger::L1MessageSent::SIGNATURE_HASH,
    inputs: &[
        EventParamSpec {
            name: "sender",
            kind: "address",
            indexed: true,
        },
        EventParamSpec {
            name: "hash",
            kind: "bytes32",
            indexed: true,
        },
        EventParamSpec {
            name: "message",
            kind: "bytes",
            indexed: false,
        },
    ],
};

/// `L2ToL1LogSent((uint8,bool,uint16,address,bytes32,bytes32))`
pub static L2_TO_L1_LOG_SENT: EventDescriptor = EventDescriptor {
    name: "L2ToL1LogSent",
    signature: IL1Messenger::L2ToL1LogSent::SIGNATURE,
    topic: IL1Messenger::L2ToL1LogSent::SIGNATURE_HASH,
    inputs: &[EventParamSpec {
        name: "l2log",
        kind: "(uint8,bool,uint16,address,bytes32,bytes32)",
        indexed: false,
    }],
};

static FUNCTIONS: [&FunctionDescriptor; 3] = [
    &REQUEST_BYTECODE_L1_PUBLICATION,
    &SEND_L2_TO_L1_LOG,
    &SEND_TO_L1,
];

static EVENTS: [&EventDescriptor; 3] = [
    &BYTECODE_L1_PUBLICATION_REQUESTED,
    &L1_MESSAGE_SENT,
    &L2_TO_L1_LOG_SENT,
];

/// Signature resolution failure, the only error native to this layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The name or signature matches none of the declared functions or events
    #[error("no function or event `{0}` in the L1 messenger ABI")]
    NotFound(String),
}

/// Registry of the messenger's function and event descriptors.
///
/// Each descriptor is registered under both its bare name and its canonical
/// signature string, mirroring the dual-keyed filter table of the generated
/// contract interface.
#[derive(Debug, Clone)]
pub struct InterfaceRegistry {
    by_key: HashMap<&'static str, Descriptor>,
    functions_by_selector: HashMap<[u8; 4], &'static FunctionDescriptor>,
    events_by_topic: HashMap<B256, &'static EventDescriptor>,
}

impl InterfaceRegistry {
    /// Build the registry over the declared interface.
    pub fn new() -> Self {
        let mut by_key = HashMap::new();
        let mut functions_by_selector = HashMap::new();
        let mut events_by_topic = HashMap::new();

        for function in FUNCTIONS {
            by_key.insert(function.name, Descriptor::Function(function));
            by_key.insert(function.signature, Descriptor::Function(function));
            functions_by_selector.insert(function.selector, function);
        }
        for event in EVENTS {
            by_key.insert(event.name, Descriptor::Event(event));
            by_key.insert(event.signature, Descriptor::Event(event));
            events_by_topic.insert(event.topic, event);
        }

        Self {
            by_key,
            functions_by_selector,
            events_by_topic,
        }
    }

    /// Resolve a descriptor by bare name or canonical signature string.
    pub fn lookup(&self, name_or_signature: &str) -> Result<Descriptor, LookupError> {
        self.by_key
            .get(name_or_signature)
            .copied()
            .ok_or_else(|| LookupError::NotFound(name_or_signature.to_string()))
    }

    /// Resolve a function descriptor by name or signature.
    pub fn function(
        &self,
        name_or_signature: &str,
    ) -> Result<&'static FunctionDescriptor, LookupError> {
        match self.lookup(name_or_signature)? {
            Descriptor::Function(function) => Ok(function),
            Descriptor::Event(_) => Err(LookupError::NotFound(name_or_signature.to_string())),
        }
    }

    /// Resolve an event descriptor by name or signature.
    pub fn event(&self, name_or_signature: &str) -> Result<&'static EventDescriptor, LookupError> {
        match self.lookup(name_or_signature)? {
            Descriptor::Event(event) => Ok(event),
            Descriptor::Function(_) => Err(LookupError::NotFound(name_or_signature.to_string())),
        }
    }

    /// Look up a function by its 4-byte call selector.
    pub fn function_by_selector(&self, selector: [u8; 4]) -> Option<&'static FunctionDescriptor> {
        self.functions_by_selector.get(&selector).copied()
    }

    /// Look up an event by its topic0.
    pub fn event_by_topic(&self, topic: B256) -> Option<&'static EventDescriptor> {
        self.events_by_topic.get(&topic).copied()
    }

    /// All declared functions
    pub fn functions(&self) -> impl Iterator<Item = &'static FunctionDescriptor> {
        FUNCTIONS.iter().copied()
    }

    /// All declared events
    pub fn events(&self) -> impl Iterator<Item = &'static EventDescriptor> {
        EVENTS.iter().copied()
    }
}

impl Default for InterfaceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::keccak256;

    #[test]
    fn test_function_lookup_by_name_and_signature() {
        let registry = InterfaceRegistry::new();

        for function in registry.functions() {
            let by_name = registry.function(function.name).unwrap();
            let by_signature = registry.function(function.signature).unwrap();
            assert_eq!(by_name, by_signature);
            assert_eq!(by_name.selector, function.selector);
        }
    }

    #[test]
    fn test_event_lookup_by_name_and_signature() {
        let registry = InterfaceRegistry::new();

        let by_name = registry.event("L1MessageSent").unwrap();
        let by_signature = registry
            .event("L1MessageSent(address,bytes32,bytes)")
            .unwrap();
        assert_eq!(by_name, by_signature);
        assert_eq!(by_name.name, "L1MessageSent");
    }

    #[test]
    fn test_lookup_miss() {
        let registry = InterfaceRegistry::new();

        let err = registry.lookup("doesNotExist").unwrap_err();
        assert_eq!(err, LookupError::NotFound("doesNotExist".to_string()));

        // An event name is not a function name
        assert!(registry.function("L1MessageSent").is_err());
        assert!(registry.event("sendToL1").is_err());
    }

    #[test]
    fn test_function_shapes() {
        let registry = InterfaceRegistry::new();

        let send_to_l1 = registry.function("sendToL1").unwrap();
        assert_eq!(send_to_l1.inputs.len(), 1);
        assert_eq!(send_to_l1.inputs[0].kind, "bytes");
        assert_eq!(send_to_l1.outputs[0].kind, "bytes32");
        assert_eq!(send_to_l1.state_mutability, StateMutability::NonPayable);

        let send_log = registry.function("sendL2ToL1Log").unwrap();
        let kinds: Vec<&str> = send_log.inputs.iter().map(|param| param.kind).collect();
        assert_eq!(kinds, ["bool", "bytes32", "bytes32"]);
        assert_eq!(send_log.outputs[0].kind, "uint256");

        let request = registry.function("requestBytecodeL1Publication").unwrap();
        assert_eq!(request.inputs[0].name, "bytecodeHash");
        assert!(request.outputs.is_empty());
    }

    #[test]
    fn test_selectors_and_topics_match_signatures() {
        let registry = InterfaceRegistry::new();

        for function in registry.functions() {
            let hash = keccak256(function.signature.as_bytes());
            assert_eq!(&hash[..4], function.selector, "{}", function.name);
            assert_eq!(
                registry.function_by_selector(function.selector),
                Some(function)
            );
        }

        for event in registry.events() {
            let hash = keccak256(event.signature.as_bytes());
            assert_eq!(hash, event.topic, "{}", event.name);
            assert_eq!(registry.event_by_topic(event.topic), Some(event));
        }
    }

    #[test]
    fn test_event_topics_are_distinct() {
        let registry = InterfaceRegistry::new();

        let topics: Vec<_> = registry.events().map(|event| event.topic).collect();
        assert_eq!(topics.len(), 3);
        assert!(topics[0] != topics[1] && topics[1] != topics[2] && topics[0] != topics[2]);
    }

    #[test]
    fn test_indexed_split() {
        let registry = InterfaceRegistry::new();

        let message_sent = registry.event("L1MessageSent").unwrap();
        let indexed: Vec<&str> = message_sent
            .indexed_inputs()
            .map(|param| param.name)
            .collect();
        assert_eq!(indexed, ["sender", "hash"]);

        let data: Vec<&str> = message_sent.data_inputs().map(|param| param.name).collect();
        assert_eq!(data, ["message"]);
    }
}
