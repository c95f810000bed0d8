//! An in-process [`DocumentStore`] for tests.

use crate::{
    ClusterInfo, ClusterVersion, CreateIndexResponse, DocumentStore, Hit, IndexResponse,
    SearchHits, SearchRequest, SearchResponse, StoreError, TotalHits,
};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{Value, json};
use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

#[derive(Debug, Default)]
struct Index {
    mapping: Value,
    /// Documents in insertion order, with their current version.
    documents: Vec<(String, Value, u64)>,
}

#[derive(Debug)]
struct State {
    indices: HashMap<String, Index>,
    create_calls: usize,
    acknowledge: bool,
}

/// A [`DocumentStore`] that keeps indices in memory.
///
/// It mirrors the store behaviour the pipeline relies on: creating an existing
/// index fails with `resource_already_exists_exception`, writing to a missing
/// index fails with 404, a write replaces the document under its id, and
/// search supports single-field `term` queries on `_id` or a dotted source
/// path, where any element of an array matches.
///
/// Of the mapping, only `text` leaves are enforced: a document holding an
/// object where the mapping says `text` is rejected with 400
/// `mapper_parsing_exception`, as a cluster would.
#[derive(Debug)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                indices: HashMap::new(),
                create_calls: 0,
                acknowledge: true,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Controls whether index creation is acknowledged.
    pub fn set_acknowledge(&self, acknowledge: bool) {
        self.state().acknowledge = acknowledge;
    }

    /// Number of `create_index` calls received, successful or not.
    pub fn create_calls(&self) -> usize {
        self.state().create_calls
    }

    /// The body `index` was created with.
    pub fn mapping(&self, index: &str) -> Option<Value> {
        self.state().indices.get(index).map(|i| i.mapping.clone())
    }

    /// Number of documents in `index`.
    pub fn document_count(&self, index: &str) -> usize {
        self.state().indices.get(index).map_or(0, |i| i.documents.len())
    }

    /// The document stored under `id` in `index`.
    pub fn document(&self, index: &str, id: &str) -> Option<Value> {
        self.state()
            .indices
            .get(index)?
            .documents
            .iter()
            .find(|(doc_id, _, _)| doc_id == id)
            .map(|(_, doc, _)| doc.clone())
    }
}

fn error(status: StatusCode, kind: &str, index: &str) -> StoreError {
    let body = json!({ "error": { "type": kind, "index": index }, "status": status.as_u16() });
    StoreError::Status { status, body: body.to_string() }
}

fn holds_object(value: &Value) -> bool {
    match value {
        Value::Object(_) => true,
        Value::Array(items) => items.iter().any(holds_object),
        _ => false,
    }
}

/// Returns the dotted path of the first `text` field in `document` that holds
/// an object.
fn object_in_text_field(properties: &Value, document: &Value, prefix: &str) -> Option<String> {
    let (Value::Object(properties), Value::Object(fields)) = (properties, document) else {
        return None;
    };
    properties.iter().find_map(|(name, def)| {
        let value = fields.get(name)?;
        let path = if prefix.is_empty() { name.clone() } else { format!("{prefix}.{name}") };
        if def["type"] == "text" {
            return holds_object(value).then_some(path);
        }
        let nested = def.get("properties")?;
        match value {
            Value::Array(items) => {
                items.iter().find_map(|item| object_in_text_field(nested, item, &path))
            }
            other => object_in_text_field(nested, other, &path),
        }
    })
}

fn matches_path(value: &Value, path: &[&str], expected: &str) -> bool {
    match (value, path.split_first()) {
        (Value::Array(items), _) => items.iter().any(|item| matches_path(item, path, expected)),
        (Value::Object(map), Some((key, rest))) => {
            map.get(*key).is_some_and(|child| matches_path(child, rest, expected))
        }
        (Value::String(s), None) => s == expected,
        (Value::Number(n), None) => n.to_string() == expected,
        (Value::Bool(b), None) => b.to_string() == expected,
        _ => false,
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn ping(&self) -> Result<ClusterInfo, StoreError> {
        Ok(ClusterInfo {
            cluster_name: "in-memory".to_string(),
            version: ClusterVersion { number: "7.17.0".to_string() },
        })
    }

    async fn index_exists(&self, index: &str) -> Result<bool, StoreError> {
        Ok(self.state().indices.contains_key(index))
    }

    async fn create_index(
        &self,
        index: &str,
        body: &Value,
    ) -> Result<CreateIndexResponse, StoreError> {
        let mut state = self.state();
        state.create_calls += 1;
        if state.indices.contains_key(index) {
            return Err(error(StatusCode::BAD_REQUEST, "resource_already_exists_exception", index));
        }
        if !state.acknowledge {
            return Ok(CreateIndexResponse { acknowledged: false, index: index.to_string() });
        }
        state
            .indices
            .insert(index.to_string(), Index { mapping: body.clone(), documents: Vec::new() });
        Ok(CreateIndexResponse { acknowledged: true, index: index.to_string() })
    }

    async fn index_document(
        &self,
        index: &str,
        id: &str,
        document: &[u8],
    ) -> Result<IndexResponse, StoreError> {
        let mut state = self.state();
        let Some(entry) = state.indices.get_mut(index) else {
            return Err(error(StatusCode::NOT_FOUND, "index_not_found_exception", index));
        };
        let Ok(document) = serde_json::from_slice::<Value>(document) else {
            return Err(error(StatusCode::BAD_REQUEST, "mapper_parsing_exception", index));
        };
        let properties = &entry.mapping["mappings"]["properties"];
        if object_in_text_field(properties, &document, "").is_some() {
            return Err(error(StatusCode::BAD_REQUEST, "mapper_parsing_exception", index));
        }

        let (version, result) =
            match entry.documents.iter_mut().find(|(doc_id, _, _)| doc_id == id) {
                Some((_, doc, version)) => {
                    *doc = document;
                    *version += 1;
                    (*version, "updated")
                }
                None => {
                    entry.documents.push((id.to_string(), document, 1));
                    (1, "created")
                }
            };
        Ok(IndexResponse {
            index: index.to_string(),
            id: id.to_string(),
            version,
            result: result.to_string(),
        })
    }

    async fn search(
        &self,
        index: &str,
        request: &SearchRequest,
    ) -> Result<SearchResponse, StoreError> {
        let Some((field, value)) = request.as_term() else {
            return Err(error(StatusCode::BAD_REQUEST, "parsing_exception", index));
        };
        let state = self.state();
        let Some(entry) = state.indices.get(index) else {
            return Err(error(StatusCode::NOT_FOUND, "index_not_found_exception", index));
        };

        let path: Vec<&str> = field.split('.').collect();
        let matching: Vec<_> = entry
            .documents
            .iter()
            .filter(|(id, doc, _)| {
                if field == "_id" { id == value } else { matches_path(doc, &path, value) }
            })
            .collect();

        let from = usize::try_from(request.from).unwrap_or(usize::MAX);
        let size = usize::try_from(request.size).unwrap_or(usize::MAX);
        let hits = matching
            .iter()
            .skip(from)
            .take(size)
            .map(|(id, doc, _)| Hit {
                index: index.to_string(),
                id: id.clone(),
                source: Some(doc.clone()),
            })
            .collect();

        let total = TotalHits::Object { value: matching.len() as u64 };
        Ok(SearchResponse { took: 0, hits: SearchHits { total: Some(total), hits } })
    }
}
