//! The block index mapping.

use serde_json::{Map, Value, json};

/// Header fields of a block, all indexed as text.
const BLOCK_FIELDS: &[&str] = &[
    "author",
    "difficulty",
    "extraData",
    "gasLimit",
    "gasUsed",
    "hash",
    "logsBloom",
    "miner",
    "mixHash",
    "nonce",
    "number",
    "parentHash",
    "receiptsRoot",
    "sealFields",
    "sha3Uncles",
    "size",
    "stateRoot",
    "timestamp",
    "totalDifficulty",
    "transactionsRoot",
    "uncles",
];

/// Transaction fields indexed as text.
const TRANSACTION_FIELDS: &[&str] = &[
    "blockHash",
    "blockNumber",
    "chainId",
    "creates",
    "from",
    "gas",
    "gasPrice",
    "hash",
    "input",
    "nonce",
    "publicKey",
    "r",
    "raw",
    "s",
    "standardV",
    "to",
    "transactionIndex",
    "v",
    "value",
];

/// Shard and replica counts for a new index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSettings {
    /// Number of primary shards.
    pub shards: u32,
    /// Number of replicas per shard.
    pub replicas: u32,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self { shards: 1, replicas: 0 }
    }
}

fn text_properties(fields: &[&str]) -> Map<String, Value> {
    fields.iter().map(|field| (field.to_string(), json!({ "type": "text" }))).collect()
}

/// Builds the `PUT /{index}` body for the block index.
///
/// Every leaf is `text`: values are hex strings and are never indexed as
/// numbers or keywords. `condition` is the exception; clients send it as an
/// object or `null`, so it is kept in `_source` only.
pub fn block_index_body(settings: IndexSettings) -> Value {
    let mut transaction = text_properties(TRANSACTION_FIELDS);
    transaction.insert("condition".to_string(), json!({ "type": "object", "enabled": false }));

    let mut result = text_properties(BLOCK_FIELDS);
    result.insert("transactions".to_string(), json!({ "properties": transaction }));

    json!({
        "settings": {
            "number_of_shards": settings.shards,
            "number_of_replicas": settings.replicas
        },
        "mappings": {
            "properties": {
                "jsonrpc": { "type": "text" },
                "id": { "type": "text" },
                "result": { "properties": result }
            }
        }
    })
}
