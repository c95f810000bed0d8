//! Creation of the block index.

use crate::{DocumentStore, IndexSettings, SchemaError, block_index_body};
use std::sync::Arc;

/// Outcome of [`SchemaManager::ensure_index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexStatus {
    /// The index was created by this call.
    Created,
    /// The index was already there; nothing was changed.
    Existing,
}

/// Makes sure the block index exists with the expected mapping.
#[derive(Debug, Clone)]
pub struct SchemaManager {
    /// The document store.
    store: Arc<dyn DocumentStore>,
    /// Settings used when the index has to be created.
    settings: IndexSettings,
}

impl SchemaManager {
    /// Creates a new [`SchemaManager`] with default index settings.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store, settings: IndexSettings::default() }
    }

    /// Overrides the settings used for a newly created index.
    pub const fn with_settings(mut self, settings: IndexSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Creates `index` unless it already exists.
    ///
    /// An existing index is left untouched, whatever its mapping. A create that
    /// loses a race against another writer counts as [`IndexStatus::Existing`].
    pub async fn ensure_index(&self, index: &str) -> Result<IndexStatus, SchemaError> {
        let exists = self
            .store
            .index_exists(index)
            .await
            .map_err(|source| SchemaError::ExistenceCheck { index: index.to_string(), source })?;
        if exists {
            info!(target: "store", index, "Index exists");
            return Ok(IndexStatus::Existing);
        }

        let body = block_index_body(self.settings);
        let res = match self.store.create_index(index, &body).await {
            Ok(res) => res,
            Err(err) if err.is_index_already_exists() => {
                debug!(target: "store", index, "Index created concurrently");
                return Ok(IndexStatus::Existing);
            }
            Err(source) => return Err(SchemaError::Create { index: index.to_string(), source }),
        };
        if !res.acknowledged {
            return Err(SchemaError::NotAcknowledged { index: index.to_string() });
        }

        info!(
            target: "store",
            index,
            shards = self.settings.shards,
            replicas = self.settings.replicas,
            "Index created"
        );
        Ok(IndexStatus::Created)
    }
}
