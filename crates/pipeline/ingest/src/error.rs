//! Errors of the ingestion pipeline.

use blockdex_primitives::DecodeError;
use blockdex_rpc::FetchError;
use blockdex_store::{QueryError, SchemaError, WriteError};
use thiserror::Error;

/// An ingestion or query failure, tagged with the stage that failed.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The block could not be fetched from the node.
    #[error("failed to fetch block {number}: {source}")]
    Fetch {
        /// The requested block number.
        number: u64,
        /// The fetch error.
        #[source]
        source: FetchError,
    },
    /// The node's response is not a block.
    #[error("failed to decode block {number}: {source}")]
    Decode {
        /// The requested block number.
        number: u64,
        /// The decode error.
        #[source]
        source: DecodeError,
    },
    /// The target index could not be made available. Nothing was written.
    #[error("index {index:?} unavailable for block {number}: {source}")]
    Schema {
        /// The requested block number.
        number: u64,
        /// The target index.
        index: String,
        /// The schema error.
        #[source]
        source: SchemaError,
    },
    /// The decoded block could not be written.
    #[error("failed to index block {number} as {id:?}: {source}")]
    Write {
        /// The requested block number.
        number: u64,
        /// The document id.
        id: String,
        /// The write error.
        #[source]
        source: WriteError,
    },
    /// A query against the block index failed.
    #[error(transparent)]
    Query(#[from] QueryError),
}

impl IngestError {
    /// The name of the pipeline stage that failed.
    pub const fn stage(&self) -> &'static str {
        match self {
            Self::Fetch { .. } => "fetch",
            Self::Decode { .. } => "decode",
            Self::Schema { .. } => "schema",
            Self::Write { .. } => "write",
            Self::Query(_) => "query",
        }
    }
}
