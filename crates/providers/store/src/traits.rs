//! The [`DocumentStore`] abstraction.

use crate::{ClusterInfo, CreateIndexResponse, IndexResponse, SearchRequest, SearchResponse, StoreError};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

/// The operations the pipeline needs from a document store.
///
/// Each method maps to a single REST call; none of them retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Debug + Send + Sync {
    /// Checks that the store is reachable and reports its version.
    async fn ping(&self) -> Result<ClusterInfo, StoreError>;

    /// Returns whether `index` exists.
    async fn index_exists(&self, index: &str) -> Result<bool, StoreError>;

    /// Creates `index` with the given settings and mappings.
    async fn create_index(&self, index: &str, body: &Value)
    -> Result<CreateIndexResponse, StoreError>;

    /// Writes the JSON `document` under `id`, replacing any existing document
    /// with that id.
    async fn index_document(
        &self,
        index: &str,
        id: &str,
        document: &[u8],
    ) -> Result<IndexResponse, StoreError>;

    /// Runs a search against `index`.
    async fn search(&self, index: &str, request: &SearchRequest)
    -> Result<SearchResponse, StoreError>;
}
