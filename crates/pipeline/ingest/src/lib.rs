#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

mod error;
pub use error::IngestError;

mod ingestor;
pub use ingestor::{IngestReport, Ingestor};

mod querier;
pub use querier::Querier;

mod retry;
pub use retry::RetryConfig;

mod stage;

#[cfg(test)]
mod test_utils;

#[cfg(feature = "metrics")]
mod metrics;
#[cfg(feature = "metrics")]
pub use crate::metrics::Metrics;
