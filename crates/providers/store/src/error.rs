//! Error types for the document store.

use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

/// An error talking to the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
    /// The configured URL cannot have path segments appended.
    #[error("store URL {0} cannot be used as a base")]
    InvalidUrl(Url),
    /// The request did not complete.
    #[error("failed to reach document store: {0}")]
    Transport(#[source] reqwest::Error),
    /// The store answered with a non-success status.
    #[error("document store returned HTTP {status}: {body}")]
    Status {
        /// The HTTP status.
        status: StatusCode,
        /// The response body, for diagnostics.
        body: String,
    },
    /// The response body was not what the API documents.
    #[error("unexpected document store response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl StoreError {
    /// Returns `true` if repeating the request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            Self::Build(_) | Self::InvalidUrl(_) | Self::Decode(_) => false,
        }
    }

    /// Returns `true` if the store refused to create an index that already exists.
    pub fn is_index_already_exists(&self) -> bool {
        matches!(
            self,
            Self::Status { status, body }
                if *status == StatusCode::BAD_REQUEST
                    && body.contains("resource_already_exists_exception")
        )
    }
}

/// An error making sure the block index exists.
///
/// Any of these aborts the ingestion attempt before a document is written.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The existence check failed.
    #[error("failed to check whether index {index:?} exists: {source}")]
    ExistenceCheck {
        /// The index name.
        index: String,
        /// The underlying store error.
        #[source]
        source: StoreError,
    },
    /// The create request failed.
    #[error("failed to create index {index:?}: {source}")]
    Create {
        /// The index name.
        index: String,
        /// The underlying store error.
        #[source]
        source: StoreError,
    },
    /// The store answered the create request without acknowledging it.
    #[error("creation of index {index:?} was not acknowledged")]
    NotAcknowledged {
        /// The index name.
        index: String,
    },
}

impl SchemaError {
    /// Returns `true` if repeating the operation may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ExistenceCheck { source, .. } | Self::Create { source, .. } => {
                source.is_retryable()
            }
            Self::NotAcknowledged { .. } => false,
        }
    }
}

/// An error writing a block document.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The block could not be serialized.
    #[error("failed to encode document {id:?} for index {index:?}: {source}")]
    Encode {
        /// The index name.
        index: String,
        /// The document id.
        id: String,
        /// The serialization error.
        #[source]
        source: serde_json::Error,
    },
    /// The store rejected the write or could not be reached.
    #[error("failed to write document {id:?} to index {index:?}: {source}")]
    Store {
        /// The index name.
        index: String,
        /// The document id.
        id: String,
        /// The underlying store error.
        #[source]
        source: StoreError,
    },
}

impl WriteError {
    /// Returns `true` if repeating the write may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Encode { .. } => false,
            Self::Store { source, .. } => source.is_retryable(),
        }
    }
}

/// An error running a block query.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The search request failed.
    #[error("search on {index:?} for {field} failed: {source}")]
    Store {
        /// The index name.
        index: String,
        /// The queried field.
        field: String,
        /// The underlying store error.
        #[source]
        source: StoreError,
    },
    /// A hit came back without its `_source`.
    #[error("hit {id:?} in index {index:?} has no source")]
    MissingSource {
        /// The index name.
        index: String,
        /// The document id.
        id: String,
    },
    /// A hit's `_source` is not a block document.
    #[error("hit {id:?} in index {index:?} is not a block document: {source}")]
    Decode {
        /// The index name.
        index: String,
        /// The document id.
        id: String,
        /// The decoding error.
        #[source]
        source: serde_json::Error,
    },
}

impl QueryError {
    /// Returns `true` if repeating the query may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Store { source, .. } => source.is_retryable(),
            Self::MissingSource { .. } | Self::Decode { .. } => false,
        }
    }
}
