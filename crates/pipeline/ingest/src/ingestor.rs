//! The [`Ingestor`] drives a block from the node into the index.

use crate::{IngestError, RetryConfig, stage::observe};
use blockdex_primitives::decode_block;
use blockdex_rpc::{BlockSource, FetchError};
use blockdex_store::{
    DocumentStore, DocumentWriter, IndexSettings, IndexStatus, SchemaError, SchemaManager,
    WriteAck, WriteError,
};
use std::sync::Arc;

/// Summary of one ingested block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    /// The requested block number.
    pub number: u64,
    /// The block hash as reported by the node.
    pub hash: String,
    /// Number of transactions in the block.
    pub transactions: usize,
    /// Whether the index had to be created for this block.
    pub index_status: IndexStatus,
    /// The store's acknowledgement of the write.
    pub ack: WriteAck,
}

/// Fetches blocks from a [`BlockSource`] and indexes them in a [`DocumentStore`].
///
/// Each call to [`Ingestor::ingest`] runs fetch, decode, schema check and write
/// strictly in that order. The only state shared between calls lives in the
/// store. Each network stage is attempted once unless a retry policy is set
/// with [`Ingestor::with_retry`].
#[derive(Debug, Clone)]
pub struct Ingestor {
    /// Source of raw block responses.
    source: Arc<dyn BlockSource>,
    /// Creates the index on first use.
    schema: SchemaManager,
    /// Writes block documents.
    writer: DocumentWriter,
    /// The target index.
    index: String,
    /// Retry policy for every network stage.
    retry: RetryConfig,
}

impl Ingestor {
    /// Creates a new [`Ingestor`] writing to `index`.
    pub fn new(
        source: Arc<dyn BlockSource>,
        store: Arc<dyn DocumentStore>,
        index: impl Into<String>,
    ) -> Self {
        #[cfg(feature = "metrics")]
        crate::Metrics::init();

        Self {
            source,
            schema: SchemaManager::new(store.clone()),
            writer: DocumentWriter::new(store),
            index: index.into(),
            retry: RetryConfig::disabled(),
        }
    }

    /// Sets the retry policy.
    pub const fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the settings used if the index has to be created.
    pub fn with_index_settings(mut self, settings: IndexSettings) -> Self {
        self.schema = self.schema.with_settings(settings);
        self
    }

    /// Returns the target index.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Fetches block `number` and writes it under `doc_id`, or under the
    /// decimal block number if no id is given.
    ///
    /// Ingesting the same block twice under the same id replaces the first
    /// document. If the index cannot be made available nothing is written.
    pub async fn ingest(
        &self,
        number: u64,
        doc_id: Option<&str>,
    ) -> Result<IngestReport, IngestError> {
        let id = doc_id.map_or_else(|| number.to_string(), str::to_string);
        info!(target: "ingest", number, %id, index = %self.index, "Ingesting block");

        let raw = observe(
            "fetch",
            self.retry.run("fetch", FetchError::is_retryable, move || {
                self.source.fetch_block(number)
            }),
        )
        .await
        .map_err(|source| IngestError::Fetch { number, source })?;
        debug!(target: "ingest", number, bytes = raw.len(), "Block fetched");

        let block = observe("decode", async { decode_block(&raw) })
            .await
            .map_err(|source| IngestError::Decode { number, source })?;
        if block.result.number_u64().ok() != Some(number) {
            warn!(
                target: "ingest",
                number,
                returned = %block.result.number,
                "Node returned a block with a different number"
            );
        }

        let index = self.index.as_str();
        let index_status = observe(
            "schema",
            self.retry.run("schema", SchemaError::is_retryable, move || {
                self.schema.ensure_index(index)
            }),
        )
        .await
        .map_err(|source| IngestError::Schema { number, index: index.to_string(), source })?;

        let (doc, envelope) = (id.as_str(), &block);
        let ack = observe(
            "write",
            self.retry.run("write", WriteError::is_retryable, move || {
                self.writer.put(index, doc, envelope)
            }),
        )
        .await
        .map_err(|source| IngestError::Write { number, id: id.clone(), source })?;

        #[cfg(feature = "metrics")]
        crate::Metrics::record_ingested();

        info!(
            target: "ingest",
            number,
            hash = %block.result.hash,
            id = %ack.id,
            result = %ack.result,
            version = ack.version,
            "Block indexed"
        );
        Ok(IngestReport {
            number,
            hash: block.result.hash,
            transactions: block.result.transactions.len(),
            index_status,
            ack,
        })
    }
}
