//! Test doubles for the pipeline's network seams.

use async_trait::async_trait;
use blockdex_rpc::{BlockSource, FetchError};
use blockdex_store::{
    ClusterInfo, CreateIndexResponse, DocumentStore, IndexResponse, SearchRequest,
    SearchResponse, StoreError,
};
use bytes::Bytes;
use mockall::mock;
use serde_json::Value;

mock! {
    pub Source {}

    #[async_trait]
    impl BlockSource for Source {
        async fn fetch_block(&self, number: u64) -> Result<Bytes, FetchError>;
    }
}

mock! {
    pub Store {}

    #[async_trait]
    impl DocumentStore for Store {
        async fn ping(&self) -> Result<ClusterInfo, StoreError>;
        async fn index_exists(&self, index: &str) -> Result<bool, StoreError>;
        async fn create_index(
            &self,
            index: &str,
            body: &Value,
        ) -> Result<CreateIndexResponse, StoreError>;
        async fn index_document(
            &self,
            index: &str,
            id: &str,
            document: &[u8],
        ) -> Result<IndexResponse, StoreError>;
        async fn search(
            &self,
            index: &str,
            request: &SearchRequest,
        ) -> Result<SearchResponse, StoreError>;
    }
}

impl std::fmt::Debug for MockSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSource").finish_non_exhaustive()
    }
}

impl std::fmt::Debug for MockStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockStore").finish_non_exhaustive()
    }
}
