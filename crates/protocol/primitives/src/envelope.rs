//! Decoding of `eth_getBlockByNumber` responses.

use crate::Block;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The JSON-RPC protocol version tag.
pub const JSONRPC_VERSION: &str = "2.0";

/// A block together with the JSON-RPC envelope it arrived in.
///
/// This is the unit that gets indexed: the stored document carries `jsonrpc`,
/// `id` and the block under `result`, exactly as the node sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockEnvelope {
    /// The protocol version tag.
    #[serde(default)]
    pub jsonrpc: String,
    /// The block.
    pub result: Block,
    /// The request correlation id.
    #[serde(default)]
    pub id: u64,
}

/// The `error` member of a failed JSON-RPC response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RpcErrorObject {
    /// The error code.
    pub code: i64,
    /// The error message.
    #[serde(default)]
    pub message: String,
}

/// Errors produced by [`decode_block`].
///
/// Decoding succeeds or fails as a whole: no variant carries a partially
/// populated block.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body is not a JSON-RPC response object.
    #[error("malformed JSON-RPC response: {0}")]
    Malformed(#[source] serde_json::Error),
    /// The node answered with an `error` member.
    #[error("node returned error {code}: {message}")]
    Rpc {
        /// The error code.
        code: i64,
        /// The error message.
        message: String,
    },
    /// `result` is missing or `null`, e.g. the block is not known to the node.
    #[error("JSON-RPC response has no result")]
    MissingResult,
    /// `result` is present but is not an object.
    #[error("expected a block object in result, found {0}")]
    UnexpectedResult(&'static str),
    /// `result` is an object but a field has the wrong shape.
    #[error("invalid block in result: {0}")]
    InvalidBlock(#[source] serde_json::Error),
}

/// The response shape before `result` is known to be a block.
///
/// `id` is nullable: a node that cannot parse the request answers with
/// `"id": null` next to the `error` member.
#[derive(Deserialize)]
struct RawResponse {
    #[serde(default)]
    jsonrpc: String,
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

/// Decodes a raw `eth_getBlockByNumber` response body into a [`BlockEnvelope`].
pub fn decode_block(raw: &[u8]) -> Result<BlockEnvelope, DecodeError> {
    let response: RawResponse = serde_json::from_slice(raw).map_err(DecodeError::Malformed)?;

    if let Some(RpcErrorObject { code, message }) = response.error {
        return Err(DecodeError::Rpc { code, message });
    }

    let result = match response.result {
        None => return Err(DecodeError::MissingResult),
        Some(value @ Value::Object(_)) => value,
        Some(other) => return Err(DecodeError::UnexpectedResult(kind(&other))),
    };
    let block = serde_json::from_value(result).map_err(DecodeError::InvalidBlock)?;

    let id = response.id.unwrap_or_default();
    Ok(BlockEnvelope { jsonrpc: response.jsonrpc, result: block, id })
}

/// Serializes a [`BlockEnvelope`] back to JSON.
pub fn encode_block(envelope: &BlockEnvelope) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(envelope)
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
