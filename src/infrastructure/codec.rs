//! Descriptor-driven encoding and decoding using alloy-dyn-abi.
//!
//! Byte-level work is delegated to alloy; this module checks values against
//! the declared tuple shapes and projects decoded events into named fields.

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{Bytes, B256};
use thiserror::Error;

use crate::domain::abi::{EventDescriptor, FunctionDescriptor};

/// Encoding or decoding failure against a declared descriptor.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("argument count mismatch for `{name}`: expected {expected}, got {got}")]
    ArityMismatch {
        name: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("argument `{param}` does not match declared type `{kind}`")]
    TypeMismatch {
        param: &'static str,
        kind: &'static str,
    },
    #[error("calldata too short (need at least 4 bytes for the selector)")]
    CalldataTooShort,
    #[error("selector mismatch: got 0x{got}, expected 0x{expected}")]
    SelectorMismatch { expected: String, got: String },
    #[error("log topic does not match `{name}`: got {got}, expected {expected}")]
    TopicMismatch {
        name: &'static str,
        expected: B256,
        got: B256,
    },
    #[error("log carries no topics")]
    MissingTopics,
    #[error("missing topic for indexed parameter `{param}`")]
    MissingTopic { param: &'static str },
    #[error("log data of `{name}` is shorter than the declared tuple")]
    DataTooShort { name: &'static str },
    #[error("invalid Solidity type `{kind}`: {source}")]
    Type {
        kind: &'static str,
        source: alloy_dyn_abi::Error,
    },
    #[error("abi decoding failed: {0}")]
    Decode(#[from] alloy_dyn_abi::Error),
}

/// A decoded event argument, projected under its declared name.
#[derive(Debug, Clone)]
pub struct DecodedField {
    /// Parameter name
    pub name: String,
    /// Solidity type
    pub kind: String,
    /// Decoded value
    pub value: DynSolValue,
}

impl DecodedField {
    /// Human-readable rendering of the value
    pub fn display(&self) -> String {
        format_value(&self.value)
    }
}

/// A decoded event with its arguments in declared order.
#[derive(Debug, Clone)]
pub struct DecodedEvent {
    /// Event name
    pub name: String,
    /// Decoded arguments in declared order
    pub fields: Vec<DecodedField>,
}

impl DecodedEvent {
    /// Look up a field by its declared name
    pub fn field(&self, name: &str) -> Option<&DecodedField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// JSON projection with display-formatted values
    pub fn to_json(&self) -> serde_json::Value {
        let fields: serde_json::Map<String, serde_json::Value> = self
            .fields
            .iter()
            .map(|field| {
                (
                    field.name.clone(),
                    serde_json::Value::String(field.display()),
                )
            })
            .collect();
        serde_json::json!({ "event": self.name, "fields": fields })
    }
}

fn parse_kind(kind: &'static str) -> Result<DynSolType, CodecError> {
    DynSolType::parse(kind).map_err(|source| CodecError::Type { kind, source })
}

/// Encode a call to `function`: selector plus the ABI-encoded argument tuple.
///
/// Arity and types are checked against the declared inputs before encoding.
pub fn encode_call(
    function: &FunctionDescriptor,
    args: &[DynSolValue],
) -> Result<Bytes, CodecError> {
    if args.len() != function.inputs.len() {
        return Err(CodecError::ArityMismatch {
            name: function.name,
            expected: function.inputs.len(),
            got: args.len(),
        });
    }

    for (param, arg) in function.inputs.iter().zip(args) {
        let ty = parse_kind(param.kind)?;
        if !ty.matches(arg) {
            return Err(CodecError::TypeMismatch {
                param: param.name,
                kind: param.kind,
            });
        }
    }

    let mut calldata = function.selector.to_vec();
    if !args.is_empty() {
        let tuple = DynSolValue::Tuple(args.to_vec());
        calldata.extend_from_slice(&tuple.abi_encode_params());
    }

    Ok(Bytes::from(calldata))
}

/// Decode calldata against `function`, verifying the leading selector.
pub fn decode_call(
    function: &FunctionDescriptor,
    data: &[u8],
) -> Result<Vec<DynSolValue>, CodecError> {
    if data.len() < 4 {
        return Err(CodecError::CalldataTooShort);
    }

    let selector: [u8; 4] = data[..4].try_into().expect("length checked");
    if selector != function.selector {
        return Err(CodecError::SelectorMismatch {
            expected: hex::encode(function.selector),
            got: hex::encode(selector),
        });
    }

    decode_params(function.inputs, &data[4..])
}

/// Decode return data against `function`'s declared outputs.
pub fn decode_return(
    function: &FunctionDescriptor,
    data: &[u8],
) -> Result<Vec<DynSolValue>, CodecError> {
    decode_params(function.outputs, data)
}

fn decode_params(
    params: &[crate::domain::abi::ParamSpec],
    data: &[u8],
) -> Result<Vec<DynSolValue>, CodecError> {
    if params.is_empty() {
        return Ok(Vec::new());
    }

    let types = params
        .iter()
        .map(|param| parse_kind(param.kind))
        .collect::<Result<Vec<_>, _>>()?;

    let tuple = DynSolType::Tuple(types);
    match tuple.abi_decode_params(data)? {
        DynSolValue::Tuple(values) => Ok(values),
        other => Ok(vec![other]),
    }
}

/// Decode a log against `event`, splitting indexed parameters out of the
/// topics and the rest out of the data, in declared order.
///
/// Fails with [`CodecError::TopicMismatch`] when topic0 belongs to a
/// different event, so a consumer filtering on one descriptor never
/// silently accepts another event's logs.
pub fn decode_event(
    event: &EventDescriptor,
    topics: &[B256],
    data: &[u8],
) -> Result<DecodedEvent, CodecError> {
    let Some((topic0, indexed_topics)) = topics.split_first() else {
        return Err(CodecError::MissingTopics);
    };
    if *topic0 != event.topic {
        return Err(CodecError::TopicMismatch {
            name: event.name,
            expected: event.topic,
            got: *topic0,
        });
    }

    // Non-indexed parameters form one encoded tuple in the data section.
    let data_types = event
        .data_inputs()
        .map(|param| parse_kind(param.kind))
        .collect::<Result<Vec<_>, _>>()?;
    let mut data_values = if data_types.is_empty() {
        Vec::new()
    } else {
        match DynSolType::Tuple(data_types).abi_decode_params(data)? {
            DynSolValue::Tuple(values) => values,
            other => vec![other],
        }
    }
    .into_iter();

    // Indexed value-type parameters are stored verbatim as one topic each.
    // (Dynamic indexed parameters would be stored as their hash; this
    // contract declares none.)
    let mut topics_iter = indexed_topics.iter();

    let mut fields = Vec::with_capacity(event.inputs.len());
    for param in event.inputs {
        let value = if param.indexed {
            let topic = topics_iter
                .next()
                .ok_or(CodecError::MissingTopic { param: param.name })?;
            let ty = parse_kind(param.kind)?;
            ty.abi_decode(topic.as_slice())?
        } else {
            data_values
                .next()
                .ok_or(CodecError::DataTooShort { name: event.name })?
        };

        fields.push(DecodedField {
            name: param.name.to_string(),
            kind: param.kind.to_string(),
            value,
        });
    }

    Ok(DecodedEvent {
        name: event.name.to_string(),
        fields,
    })
}

/// Format a DynSolValue for display
pub fn format_value(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::Int(i, _) => i.to_string(),
        DynSolValue::Uint(u, _) => {
            let s = u.to_string();
            if s.len() > 20 {
                format!("0x{:x}", u)
            } else {
                s
            }
        }
        DynSolValue::FixedBytes(word, size) => {
            let bytes = &word.as_slice()[..(*size).min(32)];
            format!("0x{}", hex::encode(bytes))
        }
        DynSolValue::Address(addr) => format!("{:?}", addr),
        DynSolValue::Function(func) => format!("0x{}", hex::encode(func.as_slice())),
        DynSolValue::Bytes(bytes) => format!("0x{}", hex::encode(bytes)),
        DynSolValue::String(s) => format!("\"{}\"", s),
        DynSolValue::Array(values) | DynSolValue::FixedArray(values) => {
            let items: Vec<String> = values.iter().map(format_value).collect();
            format!("[{}]", items.join(", "))
        }
        DynSolValue::Tuple(values) => {
            let items: Vec<String> = values.iter().map(format_value).collect();
            format!("({})", items.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::IL1Messenger;
    use crate::domain::abi::{L1_MESSAGE_SENT, SEND_L2_TO_L1_LOG, SEND_TO_L1};
    use alloy_primitives::{address, b256, Bytes, U256};
    use alloy_sol_types::{SolCall, SolEvent};

    fn sample_args() -> Vec<DynSolValue> {
        vec![
            DynSolValue::Bool(true),
            DynSolValue::FixedBytes(
                b256!("0000000000000000000000000000000000000000000000000000000000001234"),
                32,
            ),
            DynSolValue::FixedBytes(
                b256!("0000000000000000000000000000000000000000000000000000000000005678"),
                32,
            ),
        ]
    }

    #[test]
    fn test_encode_matches_static_binding() {
        let calldata = encode_call(&SEND_L2_TO_L1_LOG, &sample_args()).unwrap();

        let expected = IL1Messenger::sendL2ToL1LogCall {
            isService: true,
            key: b256!("0000000000000000000000000000000000000000000000000000000000001234"),
            value: b256!("0000000000000000000000000000000000000000000000000000000000005678"),
        }
        .abi_encode();

        assert_eq!(calldata.as_ref(), expected.as_slice());
    }

    #[test]
    fn test_call_roundtrip() {
        let args = sample_args();
        let calldata = encode_call(&SEND_L2_TO_L1_LOG, &args).unwrap();
        let decoded = decode_call(&SEND_L2_TO_L1_LOG, &calldata).unwrap();

        assert_eq!(decoded, args);
    }

    #[test]
    fn test_arity_mismatch() {
        let err = encode_call(&SEND_L2_TO_L1_LOG, &[DynSolValue::Bool(true)]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::ArityMismatch {
                expected: 3,
                got: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_type_mismatch() {
        let err = encode_call(
            &SEND_TO_L1,
            &[DynSolValue::Uint(U256::from(1), 256)],
        )
        .unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { param: "message", .. }));
    }

    #[test]
    fn test_selector_mismatch() {
        let calldata = encode_call(&SEND_TO_L1, &[DynSolValue::Bytes(vec![1, 2, 3])]).unwrap();
        let err = decode_call(&SEND_L2_TO_L1_LOG, &calldata).unwrap_err();
        assert!(matches!(err, CodecError::SelectorMismatch { .. }));
    }

    #[test]
    fn test_decode_return() {
        let hash = b256!("00000000000000000000000000000000000000000000000000000000000000aa");
        let decoded = decode_return(&SEND_TO_L1, hash.as_slice()).unwrap();
        assert_eq!(decoded, vec![DynSolValue::FixedBytes(hash, 32)]);
    }

    #[test]
    fn test_decode_event_named_projection() {
        let sender = address!("742d35cc6634c0532925a3b844bc9e7595f0beb0");
        let hash = b256!("00000000000000000000000000000000000000000000000000000000000000aa");
        let event = IL1Messenger::L1MessageSent {
            sender,
            hash,
            message: Bytes::from(vec![0xde, 0xad]),
        };
        let log_data = event.encode_log_data();

        let decoded = decode_event(&L1_MESSAGE_SENT, log_data.topics(), &log_data.data).unwrap();

        assert_eq!(decoded.name, "L1MessageSent");
        assert_eq!(decoded.fields.len(), 3);
        assert_eq!(
            decoded.field("sender").unwrap().value,
            DynSolValue::Address(sender)
        );
        assert_eq!(
            decoded.field("hash").unwrap().value,
            DynSolValue::FixedBytes(hash, 32)
        );
        assert_eq!(
            decoded.field("message").unwrap().value,
            DynSolValue::Bytes(vec![0xde, 0xad])
        );

        let json = decoded.to_json();
        assert_eq!(json["event"], "L1MessageSent");
        assert_eq!(json["fields"]["message"], "0xdead");
    }

    #[test]
    fn test_decode_event_rejects_foreign_topic() {
        let event = IL1Messenger::BytecodeL1PublicationRequested {
            bytecodeHash: b256!(
                "00000000000000000000000000000000000000000000000000000000000000bb"
            ),
        };
        let log_data = event.encode_log_data();

        // A BytecodeL1PublicationRequested log must not decode as L1MessageSent
        let err = decode_event(&L1_MESSAGE_SENT, log_data.topics(), &log_data.data).unwrap_err();
        assert!(matches!(err, CodecError::TopicMismatch { .. }));
    }
}
