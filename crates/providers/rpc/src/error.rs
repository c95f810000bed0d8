//! Errors returned by the RPC client.

use reqwest::StatusCode;
use thiserror::Error;

/// An error fetching a block from the node.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
    /// The request did not complete: connection refused, DNS failure, timeout,
    /// or the body could not be read.
    #[error("failed to reach node for block {number}: {source}")]
    Transport {
        /// The requested block number.
        number: u64,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },
    /// The node answered with a non-success HTTP status.
    #[error("node returned HTTP {status} for block {number}: {body}")]
    Status {
        /// The requested block number.
        number: u64,
        /// The HTTP status.
        status: StatusCode,
        /// The response body, for diagnostics.
        body: String,
    },
}

impl FetchError {
    /// Returns `true` if repeating the request may succeed.
    ///
    /// Transport failures, server errors and `429 Too Many Requests` are
    /// retryable. Anything else would fail the same way again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Build(_) => false,
            Self::Transport { .. } => true,
            Self::Status { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> FetchError {
        FetchError::Status {
            number: 1,
            status: StatusCode::from_u16(code).unwrap(),
            body: String::new(),
        }
    }

    #[test]
    fn test_status_retryable() {
        assert!(status(500).is_retryable());
        assert!(status(503).is_retryable());
        assert!(status(429).is_retryable());
        assert!(!status(400).is_retryable());
        assert!(!status(404).is_retryable());
    }
}
