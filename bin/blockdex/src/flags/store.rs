//! Document store flags.

use blockdex_store::{ElasticConfig, IndexSettings, RefreshPolicy};
use clap::Parser;
use std::time::Duration;
use url::Url;

/// Connection to the Elasticsearch cluster and the block index.
#[derive(Parser, Clone, Debug, PartialEq, Eq)]
pub struct StoreArgs {
    /// Base URL of the Elasticsearch cluster.
    #[arg(
        long = "store.url",
        global = true,
        default_value = ElasticConfig::DEFAULT_URL,
        env = "BLOCKDEX_STORE_URL"
    )]
    pub url: Url,
    /// Name of the block index.
    #[arg(long = "store.index", global = true, default_value = "block", env = "BLOCKDEX_STORE_INDEX")]
    pub index: String,
    /// Request timeout in seconds.
    #[arg(long = "store.timeout", global = true, default_value_t = 30, env = "BLOCKDEX_STORE_TIMEOUT")]
    pub timeout: u64,
    /// When writes become visible to search: `true`, `wait_for` or `false`.
    #[arg(
        long = "store.refresh",
        global = true,
        default_value_t = RefreshPolicy::WaitFor,
        env = "BLOCKDEX_STORE_REFRESH"
    )]
    pub refresh: RefreshPolicy,
    /// Primary shards of a newly created index.
    #[arg(long = "store.shards", global = true, default_value_t = 1, env = "BLOCKDEX_STORE_SHARDS")]
    pub shards: u32,
    /// Replicas of a newly created index.
    #[arg(
        long = "store.replicas",
        global = true,
        default_value_t = 0,
        env = "BLOCKDEX_STORE_REPLICAS"
    )]
    pub replicas: u32,
}

impl StoreArgs {
    /// Settings for the index, should it need to be created.
    pub const fn index_settings(&self) -> IndexSettings {
        IndexSettings { shards: self.shards, replicas: self.replicas }
    }
}

impl From<&StoreArgs> for ElasticConfig {
    fn from(args: &StoreArgs) -> Self {
        Self::new(args.url.clone())
            .with_timeout(Duration::from_secs(args.timeout))
            .with_refresh(args.refresh)
    }
}
