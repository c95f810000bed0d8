//! Request and response bodies of the Elasticsearch REST API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Response of `GET /`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterInfo {
    /// The cluster name.
    #[serde(default)]
    pub cluster_name: String,
    /// The server version.
    #[serde(default)]
    pub version: ClusterVersion,
}

/// The `version` member of [`ClusterInfo`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterVersion {
    /// The version number, e.g. `7.17.0`.
    #[serde(default)]
    pub number: String,
}

/// Response of `PUT /{index}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateIndexResponse {
    /// Whether the cluster acknowledged the creation.
    #[serde(default)]
    pub acknowledged: bool,
    /// The created index.
    #[serde(default)]
    pub index: String,
}

/// Response of `PUT /{index}/_doc/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexResponse {
    /// The index the document was written to.
    #[serde(rename = "_index")]
    pub index: String,
    /// The document id.
    #[serde(rename = "_id")]
    pub id: String,
    /// The document version after the write.
    #[serde(rename = "_version", default)]
    pub version: u64,
    /// `created` or `updated`.
    #[serde(default)]
    pub result: String,
}

/// Body of `POST /{index}/_search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    /// The query DSL.
    pub query: Value,
    /// Offset of the first hit.
    pub from: u64,
    /// Maximum number of hits to return.
    pub size: u64,
}

impl SearchRequest {
    /// Builds an exact `term` query on `field = value`.
    pub fn term(field: &str, value: &str, from: u64, size: u64) -> Self {
        let mut term = Map::new();
        term.insert(field.to_string(), Value::String(value.to_string()));
        Self { query: json!({ "term": term }), from, size }
    }

    /// Returns the `(field, value)` of a single-field term query.
    pub fn as_term(&self) -> Option<(&str, &str)> {
        let (field, value) = self.query.get("term")?.as_object()?.iter().next()?;
        Some((field.as_str(), value.as_str()?))
    }
}

/// Response of `POST /{index}/_search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Time the search took, in milliseconds.
    #[serde(default)]
    pub took: u64,
    /// The matching documents.
    #[serde(default)]
    pub hits: SearchHits,
}

/// The `hits` member of [`SearchResponse`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchHits {
    /// Total number of matches, independent of paging.
    #[serde(default)]
    pub total: Option<TotalHits>,
    /// The requested page of matches.
    #[serde(default)]
    pub hits: Vec<Hit>,
}

/// Total hit count, in either the 6.x or the 7.x+ shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TotalHits {
    /// A bare number (6.x and `rest_total_hits_as_int`).
    Count(u64),
    /// `{ "value": n, "relation": "eq" }` (7.x+).
    Object {
        /// The count.
        value: u64,
    },
}

impl TotalHits {
    /// Returns the count.
    pub const fn value(&self) -> u64 {
        match self {
            Self::Count(value) | Self::Object { value } => *value,
        }
    }
}

/// A single search hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    /// The index holding the document.
    #[serde(rename = "_index", default)]
    pub index: String,
    /// The document id.
    #[serde(rename = "_id", default)]
    pub id: String,
    /// The stored document.
    #[serde(rename = "_source", default)]
    pub source: Option<Value>,
}
