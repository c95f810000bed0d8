//! JSON-RPC request bodies.

use blockdex_primitives::{JSONRPC_VERSION, encode_quantity};
use serde::Serialize;

/// The method used to fetch a block by number.
pub const GET_BLOCK_BY_NUMBER: &str = "eth_getBlockByNumber";

/// The correlation id sent with every request.
///
/// Requests are issued one at a time per connection, so a fixed id is enough to
/// pair a response with its request.
pub const REQUEST_ID: u64 = 1;

/// Params of [`GET_BLOCK_BY_NUMBER`]: the block number quantity and whether to
/// return full transaction objects.
pub type BlockByNumberParams = (String, bool);

/// A JSON-RPC 2.0 request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonRpcRequest<P> {
    /// Always `"2.0"`.
    pub jsonrpc: &'static str,
    /// The method name.
    pub method: &'static str,
    /// Positional params.
    pub params: P,
    /// The correlation id.
    pub id: u64,
}

impl JsonRpcRequest<BlockByNumberParams> {
    /// Builds an `eth_getBlockByNumber` request for `number`, asking for full
    /// transaction objects rather than hashes.
    pub fn block_by_number(number: u64) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method: GET_BLOCK_BY_NUMBER,
            params: (encode_quantity(number), true),
            id: REQUEST_ID,
        }
    }
}
