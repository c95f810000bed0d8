//! The [`Querier`] reads indexed blocks back.

use crate::{IngestError, RetryConfig, stage::observe};
use blockdex_store::{BlockHits, DocumentStore, QueryError, QueryFacade};
use std::sync::Arc;

/// Runs exact-match queries against the block index.
///
/// Searches go through the same retry policy and stage accounting as
/// ingestion, under the `query` stage.
#[derive(Debug, Clone)]
pub struct Querier {
    facade: QueryFacade,
    index: String,
    retry: RetryConfig,
}

impl Querier {
    /// Creates a new [`Querier`] reading from `index`. Searches are attempted
    /// once unless a retry policy is set.
    pub fn new(store: Arc<dyn DocumentStore>, index: impl Into<String>) -> Self {
        #[cfg(feature = "metrics")]
        crate::Metrics::init();

        Self {
            facade: QueryFacade::new(store),
            index: index.into(),
            retry: RetryConfig::disabled(),
        }
    }

    /// Sets the retry policy.
    pub const fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Returns up to `limit` indexed blocks whose `field` equals `value`,
    /// skipping the first `offset` matches.
    pub async fn find_by_field(
        &self,
        field: &str,
        value: &str,
        offset: u64,
        limit: u64,
    ) -> Result<BlockHits, IngestError> {
        let index = self.index.as_str();
        debug!(target: "ingest", index, field, value, offset, limit, "Querying blocks");

        let hits = observe(
            "query",
            self.retry.run("query", QueryError::is_retryable, move || {
                self.facade.find_by_field(index, field, value, offset, limit)
            }),
        )
        .await?;
        Ok(hits)
    }
}
