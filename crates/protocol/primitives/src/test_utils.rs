//! Fixtures shared by the workspace's tests.

use crate::{BlockEnvelope, decode_block};

/// A raw `eth_getBlockByNumber` response for block 801 (`0x321`).
///
/// The first transaction is a transfer with `null` loosely typed fields, the
/// second a contract creation with `"to": null` and populated `chainId`,
/// `condition` and `creates`.
pub const BLOCK_801_RESPONSE: &str = include_str!("../testdata/block_801.json");

/// The hash of block 801 in [`BLOCK_801_RESPONSE`].
pub const BLOCK_801_HASH: &str =
    "0xd0a1c8e0b6b5dc0e0ab9d5c05b0a6ec1b0f4e4b23a9b0c6f1f5d6b9c2b8ea0b1";

/// Decodes [`BLOCK_801_RESPONSE`].
pub fn block_801() -> BlockEnvelope {
    decode_block(BLOCK_801_RESPONSE.as_bytes()).expect("fixture decodes")
}
