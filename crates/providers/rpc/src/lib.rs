#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

mod client;
pub use client::{HttpBlockSource, RpcClientConfig};

mod error;
pub use error::FetchError;

mod request;
pub use request::{BlockByNumberParams, GET_BLOCK_BY_NUMBER, JsonRpcRequest, REQUEST_ID};

mod traits;
pub use traits::BlockSource;
