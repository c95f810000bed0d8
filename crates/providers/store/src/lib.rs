#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

mod elastic;
pub use elastic::{ElasticConfig, ElasticStore, RefreshPolicy};

mod error;
pub use error::{QueryError, SchemaError, StoreError, WriteError};

mod mapping;
pub use mapping::{IndexSettings, block_index_body};

mod query;
pub use query::{BlockHit, BlockHits, QueryFacade};

mod schema;
pub use schema::{IndexStatus, SchemaManager};

mod traits;
pub use traits::DocumentStore;

mod types;
pub use types::{
    ClusterInfo, ClusterVersion, CreateIndexResponse, Hit, IndexResponse, SearchHits,
    SearchRequest, SearchResponse, TotalHits,
};

mod writer;
pub use writer::{DocumentWriter, WriteAck};

#[cfg(any(test, feature = "test-utils"))]
mod memory;
#[cfg(any(test, feature = "test-utils"))]
pub use memory::InMemoryStore;
