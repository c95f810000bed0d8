//! Block and transaction records.

use crate::{OpaqueValue, QuantityError, decode_quantity, nullable::nullable};
use serde::{Deserialize, Serialize};

/// A block as returned by `eth_getBlockByNumber` with full transactions.
///
/// All header fields are kept as the hex text the node sent. Fields missing from
/// the response, or sent as `null`, decode to an empty string or empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// The address credited with the block reward.
    #[serde(default, deserialize_with = "nullable")]
    pub author: String,
    /// The block difficulty.
    #[serde(default, deserialize_with = "nullable")]
    pub difficulty: String,
    /// Arbitrary data included by the miner.
    #[serde(default, deserialize_with = "nullable")]
    pub extra_data: String,
    /// The block gas limit.
    #[serde(default, deserialize_with = "nullable")]
    pub gas_limit: String,
    /// Total gas used by the transactions in the block.
    #[serde(default, deserialize_with = "nullable")]
    pub gas_used: String,
    /// The block hash.
    #[serde(default, deserialize_with = "nullable")]
    pub hash: String,
    /// Bloom filter over the logs of the block.
    #[serde(default, deserialize_with = "nullable")]
    pub logs_bloom: String,
    /// The beneficiary address.
    #[serde(default, deserialize_with = "nullable")]
    pub miner: String,
    /// Proof-of-work mix hash.
    #[serde(default, deserialize_with = "nullable")]
    pub mix_hash: String,
    /// Proof-of-work nonce.
    #[serde(default, deserialize_with = "nullable")]
    pub nonce: String,
    /// The block number.
    #[serde(default, deserialize_with = "nullable")]
    pub number: String,
    /// Hash of the parent block.
    #[serde(default, deserialize_with = "nullable")]
    pub parent_hash: String,
    /// Root of the receipts trie.
    #[serde(default, deserialize_with = "nullable")]
    pub receipts_root: String,
    /// Seal fields, in the order the node returned them.
    #[serde(default, deserialize_with = "nullable")]
    pub seal_fields: Vec<String>,
    /// Hash of the uncles list.
    #[serde(default, deserialize_with = "nullable")]
    pub sha3_uncles: String,
    /// Block size in bytes.
    #[serde(default, deserialize_with = "nullable")]
    pub size: String,
    /// Root of the state trie.
    #[serde(default, deserialize_with = "nullable")]
    pub state_root: String,
    /// Unix timestamp of the block.
    #[serde(default, deserialize_with = "nullable")]
    pub timestamp: String,
    /// Total chain difficulty up to and including this block.
    #[serde(default, deserialize_with = "nullable")]
    pub total_difficulty: String,
    /// Full transaction objects, in block order.
    #[serde(default, deserialize_with = "nullable")]
    pub transactions: Vec<Transaction>,
    /// Root of the transactions trie.
    #[serde(default, deserialize_with = "nullable")]
    pub transactions_root: String,
    /// Uncle entries. Usually hashes, but kept opaque.
    #[serde(default, deserialize_with = "nullable")]
    pub uncles: Vec<OpaqueValue>,
}

impl Block {
    /// Decodes the block number quantity.
    pub fn number_u64(&self) -> Result<u64, QuantityError> {
        decode_quantity(&self.number)
    }
}

/// A transaction inside a [`Block`].
///
/// `to` is empty for contract creations. `chainId`, `condition` and `creates`
/// are kept as [`OpaqueValue`]s and are omitted again on output if the node
/// omitted them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Hash of the containing block.
    #[serde(default, deserialize_with = "nullable")]
    pub block_hash: String,
    /// Number of the containing block.
    #[serde(default, deserialize_with = "nullable")]
    pub block_number: String,
    /// Chain id the transaction was signed for, in whatever shape the node used.
    #[serde(default, skip_serializing_if = "OpaqueValue::is_absent")]
    pub chain_id: OpaqueValue,
    /// Client-specific scheduling condition.
    #[serde(default, skip_serializing_if = "OpaqueValue::is_absent")]
    pub condition: OpaqueValue,
    /// Address of the contract created by this transaction, if any.
    #[serde(default, skip_serializing_if = "OpaqueValue::is_absent")]
    pub creates: OpaqueValue,
    /// The sender address.
    #[serde(default, deserialize_with = "nullable")]
    pub from: String,
    /// Gas provided by the sender.
    #[serde(default, deserialize_with = "nullable")]
    pub gas: String,
    /// Gas price in wei.
    #[serde(default, deserialize_with = "nullable")]
    pub gas_price: String,
    /// The transaction hash.
    #[serde(default, deserialize_with = "nullable")]
    pub hash: String,
    /// Call data.
    #[serde(default, deserialize_with = "nullable")]
    pub input: String,
    /// Sender nonce.
    #[serde(default, deserialize_with = "nullable")]
    pub nonce: String,
    /// Public key of the signer.
    #[serde(default, deserialize_with = "nullable")]
    pub public_key: String,
    /// Signature `r` value.
    #[serde(default, deserialize_with = "nullable")]
    pub r: String,
    /// The raw signed transaction.
    #[serde(default, deserialize_with = "nullable")]
    pub raw: String,
    /// Signature `s` value.
    #[serde(default, deserialize_with = "nullable")]
    pub s: String,
    /// Normalised recovery id.
    #[serde(default, deserialize_with = "nullable")]
    pub standard_v: String,
    /// The recipient address. Empty for contract creations.
    #[serde(default, deserialize_with = "nullable")]
    pub to: String,
    /// Position of the transaction in the block.
    #[serde(default, deserialize_with = "nullable")]
    pub transaction_index: String,
    /// Signature `v` value.
    #[serde(default, deserialize_with = "nullable")]
    pub v: String,
    /// Value transferred in wei.
    #[serde(default, deserialize_with = "nullable")]
    pub value: String,
}
