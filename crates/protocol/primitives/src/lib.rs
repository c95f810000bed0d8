#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod block;
pub use block::{Block, Transaction};

mod envelope;
pub use envelope::{
    BlockEnvelope, DecodeError, JSONRPC_VERSION, RpcErrorObject, decode_block, encode_block,
};

mod opaque;
pub use opaque::OpaqueValue;

mod quantity;
pub use quantity::{QuantityError, decode_quantity, encode_quantity};

mod nullable;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
