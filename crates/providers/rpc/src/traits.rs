//! The [`BlockSource`] abstraction.

use crate::FetchError;
use async_trait::async_trait;
use bytes::Bytes;
use std::fmt::Debug;

/// A source of raw `eth_getBlockByNumber` responses.
#[async_trait]
pub trait BlockSource: Debug + Send + Sync {
    /// Fetches block `number` with full transactions and returns the response
    /// body without parsing it.
    async fn fetch_block(&self, number: u64) -> Result<Bytes, FetchError>;
}
