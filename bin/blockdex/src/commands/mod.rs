//! Contains subcommands for blockdex.

mod ingest;
pub use ingest::IngestCommand;

mod query;
pub use query::QueryCommand;

use crate::flags::GlobalArgs;
use anyhow::{Context, Result};
use blockdex_ingest::{Ingestor, Querier, RetryConfig};
use blockdex_rpc::BlockSource;
use blockdex_store::{DocumentStore, ElasticConfig, ElasticStore};
use std::sync::Arc;

/// Connects to the document store and reports the cluster version.
pub(crate) async fn connect_store(args: &GlobalArgs) -> Result<Arc<ElasticStore>> {
    let store = ElasticStore::new(ElasticConfig::from(&args.store))?;
    let info = store
        .ping()
        .await
        .with_context(|| format!("document store at {} is unreachable", store.url()))?;
    tracing::info!(
        target: "store",
        url = %store.url(),
        cluster = %info.cluster_name,
        version = %info.version.number,
        "Connected to document store"
    );
    Ok(Arc::new(store))
}

/// Builds an [`Ingestor`] over `source` and `store` from the global flags.
pub(crate) fn ingestor(
    args: &GlobalArgs,
    source: Arc<dyn BlockSource>,
    store: Arc<dyn DocumentStore>,
) -> Ingestor {
    Ingestor::new(source, store, args.store.index.clone())
        .with_retry(RetryConfig::from(&args.retry))
        .with_index_settings(args.store.index_settings())
}

/// Builds a [`Querier`] over `store` from the global flags.
pub(crate) fn querier(args: &GlobalArgs, store: Arc<dyn DocumentStore>) -> Querier {
    Querier::new(store, args.store.index.clone()).with_retry(RetryConfig::from(&args.retry))
}
