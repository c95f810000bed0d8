//! Retrieving block documents by field.

use crate::{DocumentStore, QueryError, SearchRequest};
use blockdex_primitives::BlockEnvelope;
use std::sync::Arc;

/// A block document returned by a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHit {
    /// The document id.
    pub id: String,
    /// The stored envelope.
    pub block: BlockEnvelope,
}

/// A page of query results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockHits {
    /// The hits on this page, in store order.
    pub hits: Vec<BlockHit>,
    /// Time the store spent on the search, in milliseconds.
    pub took_millis: u64,
    /// Number of matching documents, independent of paging.
    pub total_hits: u64,
}

/// Exact-match lookups over the block index.
#[derive(Debug, Clone)]
pub struct QueryFacade {
    store: Arc<dyn DocumentStore>,
}

impl QueryFacade {
    /// Creates a new [`QueryFacade`].
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Returns up to `limit` blocks in `index` whose `field` equals `value`,
    /// skipping the first `offset` matches.
    ///
    /// `field` may be a dotted path such as `result.hash`.
    pub async fn find_by_field(
        &self,
        index: &str,
        field: &str,
        value: &str,
        offset: u64,
        limit: u64,
    ) -> Result<BlockHits, QueryError> {
        let request = SearchRequest::term(field, value, offset, limit);
        let res = self.store.search(index, &request).await.map_err(|source| QueryError::Store {
            index: index.to_string(),
            field: field.to_string(),
            source,
        })?;

        let total_hits = res.hits.total.map_or(res.hits.hits.len() as u64, |total| total.value());
        let hits = res
            .hits
            .hits
            .into_iter()
            .map(|hit| {
                let source = hit.source.ok_or_else(|| QueryError::MissingSource {
                    index: index.to_string(),
                    id: hit.id.clone(),
                })?;
                let block = serde_json::from_value(source).map_err(|source| {
                    QueryError::Decode { index: index.to_string(), id: hit.id.clone(), source }
                })?;
                Ok(BlockHit { id: hit.id, block })
            })
            .collect::<Result<Vec<_>, QueryError>>()?;

        info!(target: "store", index, field, value, took_ms = res.took, total_hits, "Query finished");
        Ok(BlockHits { hits, took_millis: res.took, total_hits })
    }
}
