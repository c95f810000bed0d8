//! Writing block documents.

use crate::{DocumentStore, WriteError};
use blockdex_primitives::{BlockEnvelope, encode_block};
use std::sync::Arc;

/// Acknowledgement of a stored document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteAck {
    /// The document id.
    pub id: String,
    /// The index the document lives in.
    pub index: String,
    /// `created` for a new id, `updated` when an earlier document was replaced.
    pub result: String,
    /// The document version after the write.
    pub version: u64,
}

/// Persists block envelopes under caller-chosen ids.
///
/// A write replaces whatever is stored under the id, so repeated ingestion of
/// the same block leaves a single document.
#[derive(Debug, Clone)]
pub struct DocumentWriter {
    store: Arc<dyn DocumentStore>,
}

impl DocumentWriter {
    /// Creates a new [`DocumentWriter`].
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Writes `block` to `index` under `id`.
    ///
    /// The document is the envelope as [`encode_block`] renders it. A store
    /// rejection such as `mapper_parsing_exception` surfaces as
    /// [`WriteError::Store`] and is not retryable.
    pub async fn put(
        &self,
        index: &str,
        id: &str,
        block: &BlockEnvelope,
    ) -> Result<WriteAck, WriteError> {
        let document = encode_block(block).map_err(|source| WriteError::Encode {
            index: index.to_string(),
            id: id.to_string(),
            source,
        })?;

        let res = self.store.index_document(index, id, &document).await.map_err(|source| {
            WriteError::Store { index: index.to_string(), id: id.to_string(), source }
        })?;

        debug!(
            target: "store",
            index = %res.index,
            id = %res.id,
            version = res.version,
            result = %res.result,
            "Document written"
        );
        Ok(WriteAck { id: res.id, index: res.index, result: res.result, version: res.version })
    }
}
