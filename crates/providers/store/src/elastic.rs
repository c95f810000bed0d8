//! [`DocumentStore`] over the Elasticsearch REST API.

use crate::{
    ClusterInfo, CreateIndexResponse, DocumentStore, IndexResponse, SearchRequest, SearchResponse,
    StoreError,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, header::CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{fmt, str::FromStr, time::Duration};
use url::Url;

/// When a written document becomes visible to search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RefreshPolicy {
    /// Refresh the affected shards immediately.
    Immediate,
    /// Return once a refresh has made the write visible.
    #[default]
    WaitFor,
    /// Do not refresh; the write becomes visible on the next scheduled refresh.
    None,
}

impl RefreshPolicy {
    /// The value of the `refresh` query parameter.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Immediate => "true",
            Self::WaitFor => "wait_for",
            Self::None => "false",
        }
    }
}

impl fmt::Display for RefreshPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RefreshPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "true" => Ok(Self::Immediate),
            "wait_for" => Ok(Self::WaitFor),
            "false" => Ok(Self::None),
            other => Err(format!("invalid refresh policy {other:?}, expected true, wait_for or false")),
        }
    }
}

/// Connection settings for [`ElasticStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElasticConfig {
    /// Base URL of the cluster.
    pub url: Url,
    /// Deadline for a single request.
    pub timeout: Duration,
    /// Refresh behaviour of document writes.
    pub refresh: RefreshPolicy,
}

impl ElasticConfig {
    /// The default cluster address.
    pub const DEFAULT_URL: &'static str = "http://127.0.0.1:9200";

    /// The default request deadline.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a config for `url` with default timeout and refresh policy.
    pub fn new(url: Url) -> Self {
        Self { url, timeout: Self::DEFAULT_TIMEOUT, refresh: RefreshPolicy::default() }
    }

    /// Sets the request deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the refresh policy for writes.
    pub fn with_refresh(mut self, refresh: RefreshPolicy) -> Self {
        self.refresh = refresh;
        self
    }
}

/// An Elasticsearch cluster reached over HTTP.
#[derive(Debug, Clone)]
pub struct ElasticStore {
    /// Connection settings.
    config: ElasticConfig,
    /// The inner reqwest client.
    inner: Client,
}

impl ElasticStore {
    /// Creates a new [`ElasticStore`].
    pub fn new(config: ElasticConfig) -> Result<Self, StoreError> {
        let inner = Client::builder().timeout(config.timeout).build().map_err(StoreError::Build)?;
        Ok(Self { config, inner })
    }

    /// Returns the cluster URL.
    pub const fn url(&self) -> &Url {
        &self.config.url
    }

    /// Appends `segments` to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let mut url = self.config.url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::InvalidUrl(self.config.url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends `request` and decodes a successful JSON response.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, StoreError> {
        let res = request.send().await.map_err(StoreError::Transport)?;
        let status = res.status();
        let body = res.bytes().await.map_err(StoreError::Transport)?;
        if !status.is_success() {
            return Err(StoreError::Status {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        serde_json::from_slice(&body).map_err(StoreError::Decode)
    }
}

#[async_trait]
impl DocumentStore for ElasticStore {
    async fn ping(&self) -> Result<ClusterInfo, StoreError> {
        let url = self.endpoint(&[])?;
        self.send(self.inner.get(url)).await
    }

    async fn index_exists(&self, index: &str) -> Result<bool, StoreError> {
        let url = self.endpoint(&[index])?;
        let res = self.inner.head(url).send().await.map_err(StoreError::Transport)?;
        match res.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(StoreError::Status { status, body: String::new() }),
        }
    }

    async fn create_index(
        &self,
        index: &str,
        body: &Value,
    ) -> Result<CreateIndexResponse, StoreError> {
        let url = self.endpoint(&[index])?;
        self.send(self.inner.put(url).json(body)).await
    }

    async fn index_document(
        &self,
        index: &str,
        id: &str,
        document: &[u8],
    ) -> Result<IndexResponse, StoreError> {
        let mut url = self.endpoint(&[index, "_doc", id])?;
        url.query_pairs_mut().append_pair("refresh", self.config.refresh.as_str());
        let request =
            self.inner.put(url).header(CONTENT_TYPE, "application/json").body(document.to_vec());
        self.send(request).await
    }

    async fn search(
        &self,
        index: &str,
        request: &SearchRequest,
    ) -> Result<SearchResponse, StoreError> {
        let url = self.endpoint(&[index, "_search"])?;
        self.send(self.inner.post(url).json(request)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        sync::Mutex,
        task::JoinHandle,
    };

    /// A canned HTTP server that answers connections in order and records what
    /// it was sent.
    struct StubServer {
        url: Url,
        requests: Arc<Mutex<Vec<String>>>,
        handle: JoinHandle<()>,
    }

    impl StubServer {
        async fn start(responses: Vec<(u16, &'static str)>) -> Self {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let url = Url::parse(&format!("http://{}", listener.local_addr().unwrap())).unwrap();
            let requests = Arc::new(Mutex::new(Vec::new()));
            let recorded = requests.clone();
            let handle = tokio::spawn(async move {
                for (status, body) in responses {
                    let (mut stream, _) = listener.accept().await.unwrap();
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 8192];
                    loop {
                        let n = stream.read(&mut chunk).await.unwrap();
                        buf.extend_from_slice(&chunk[..n]);
                        if n == 0 || request_complete(&buf) {
                            break;
                        }
                    }
                    recorded.lock().await.push(String::from_utf8(buf).unwrap());
                    let response = format!(
                        "HTTP/1.1 {status} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    stream.write_all(response.as_bytes()).await.unwrap();
                    stream.shutdown().await.ok();
                }
            });
            Self { url, requests, handle }
        }

        fn store(&self) -> ElasticStore {
            ElasticStore::new(ElasticConfig::new(self.url.clone())).unwrap()
        }

        async fn finish(self) -> Vec<String> {
            self.handle.await.unwrap();
            Arc::try_unwrap(self.requests).unwrap().into_inner()
        }
    }

    fn request_complete(buf: &[u8]) -> bool {
        let text = String::from_utf8_lossy(buf);
        let Some(end) = text.find("\r\n\r\n") else {
            return false;
        };
        let len = text[..end]
            .lines()
            .find_map(|line| {
                let (key, value) = line.split_once(':')?;
                if key.eq_ignore_ascii_case("content-length") {
                    value.trim().parse::<usize>().ok()
                } else {
                    None
                }
            })
            .unwrap_or(0);
        buf.len() >= end + 4 + len
    }

    fn body_of(request: &str) -> Value {
        serde_json::from_str(request.split_once("\r\n\r\n").unwrap().1).unwrap()
    }

    #[tokio::test]
    async fn test_ping() {
        let server = StubServer::start(vec![(
            200,
            r#"{"name":"n1","cluster_name":"blocks","version":{"number":"7.17.0"}}"#,
        )])
        .await;
        let info = server.store().ping().await.unwrap();
        assert_eq!(info.cluster_name, "blocks");
        assert_eq!(info.version.number, "7.17.0");

        let requests = server.finish().await;
        assert!(requests[0].starts_with("GET / HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_index_exists() {
        let server = StubServer::start(vec![(200, ""), (404, ""), (500, "")]).await;
        let store = server.store();
        assert!(store.index_exists("block").await.unwrap());
        assert!(!store.index_exists("block").await.unwrap());
        assert!(matches!(
            store.index_exists("block").await,
            Err(StoreError::Status { status: StatusCode::INTERNAL_SERVER_ERROR, .. })
        ));

        let requests = server.finish().await;
        assert!(requests.iter().all(|r| r.starts_with("HEAD /block HTTP/1.1")));
    }

    #[tokio::test]
    async fn test_create_index() {
        let server = StubServer::start(vec![(
            200,
            r#"{"acknowledged":true,"shards_acknowledged":true,"index":"block"}"#,
        )])
        .await;
        let body = json!({ "settings": { "number_of_shards": 1 } });
        let res = server.store().create_index("block", &body).await.unwrap();
        assert!(res.acknowledged);
        assert_eq!(res.index, "block");

        let requests = server.finish().await;
        assert!(requests[0].starts_with("PUT /block HTTP/1.1"));
        assert_eq!(body_of(&requests[0]), body);
    }

    #[tokio::test]
    async fn test_index_document() {
        let server = StubServer::start(vec![(
            201,
            r#"{"_index":"block","_id":"801","_version":1,"result":"created"}"#,
        )])
        .await;
        let document = json!({ "jsonrpc": "2.0", "id": 1, "result": { "number": "0x321" } });
        let raw = document.to_string();
        let res = server.store().index_document("block", "801", raw.as_bytes()).await.unwrap();
        assert_eq!(res.id, "801");
        assert_eq!(res.result, "created");

        let requests = server.finish().await;
        assert!(requests[0].starts_with("PUT /block/_doc/801?refresh=wait_for HTTP/1.1"));
        assert!(requests[0].to_ascii_lowercase().contains("content-type: application/json"));
        assert_eq!(body_of(&requests[0]), document);
    }

    #[tokio::test]
    async fn test_document_id_is_escaped() {
        let server = StubServer::start(vec![(
            200,
            r#"{"_index":"block","_id":"a/b","_version":1,"result":"created"}"#,
        )])
        .await;
        server.store().index_document("block", "a/b", b"{}").await.unwrap();

        let requests = server.finish().await;
        assert!(requests[0].starts_with("PUT /block/_doc/a%2Fb?refresh=wait_for "));
    }

    #[tokio::test]
    async fn test_search() {
        let server = StubServer::start(vec![(
            200,
            r#"{"took":4,"timed_out":false,"hits":{"total":{"value":1,"relation":"eq"},"hits":[{"_index":"block","_id":"801","_source":{"id":1}}]}}"#,
        )])
        .await;
        let request = SearchRequest::term("id", "1", 0, 10);
        let res = server.store().search("block", &request).await.unwrap();
        assert_eq!(res.took, 4);
        assert_eq!(res.hits.hits.len(), 1);
        assert_eq!(res.hits.hits[0].id, "801");

        let requests = server.finish().await;
        assert!(requests[0].starts_with("POST /block/_search HTTP/1.1"));
        assert_eq!(body_of(&requests[0]), serde_json::to_value(&request).unwrap());
    }

    #[tokio::test]
    async fn test_error_status_keeps_body() {
        let server = StubServer::start(vec![(
            400,
            r#"{"error":{"type":"resource_already_exists_exception"},"status":400}"#,
        )])
        .await;
        let err = server.store().create_index("block", &json!({})).await.unwrap_err();
        assert!(err.is_index_already_exists());
        server.finish().await;
    }

    #[tokio::test]
    async fn test_base_path_is_kept() {
        let server = StubServer::start(vec![(200, r#"{"took":0,"hits":{"hits":[]}}"#)]).await;
        let url = server.url.join("/es/").unwrap();
        let store = ElasticStore::new(ElasticConfig::new(url)).unwrap();
        store.search("block", &SearchRequest::term("id", "1", 0, 1)).await.unwrap();

        let requests = server.finish().await;
        assert!(requests[0].starts_with("POST /es/block/_search HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_unreachable_store() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = Url::parse(&format!("http://{}", listener.local_addr().unwrap())).unwrap();
        drop(listener);

        let store = ElasticStore::new(ElasticConfig::new(url)).unwrap();
        let err = store.index_exists("block").await.unwrap_err();
        assert!(matches!(err, StoreError::Transport(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_refresh_policy_parse() {
        assert_eq!("true".parse::<RefreshPolicy>().unwrap(), RefreshPolicy::Immediate);
        assert_eq!("wait_for".parse::<RefreshPolicy>().unwrap(), RefreshPolicy::WaitFor);
        assert_eq!("false".parse::<RefreshPolicy>().unwrap(), RefreshPolicy::None);
        assert!("sometimes".parse::<RefreshPolicy>().is_err());
        assert_eq!(RefreshPolicy::default().to_string(), "wait_for");
    }

    #[test]
    fn test_config_defaults() {
        let config = ElasticConfig::new(Url::parse(ElasticConfig::DEFAULT_URL).unwrap());
        assert_eq!(config.timeout, ElasticConfig::DEFAULT_TIMEOUT);
        assert_eq!(config.refresh, RefreshPolicy::WaitFor);
    }
}
