//! End-to-end ingestion of block 801 into an in-memory store.

use async_trait::async_trait;
use blockdex_ingest::{Ingestor, Querier, RetryConfig};
use blockdex_primitives::test_utils::{BLOCK_801_HASH, BLOCK_801_RESPONSE, block_801};
use blockdex_rpc::{BlockSource, FetchError, HttpBlockSource, RpcClientConfig};
use blockdex_store::{InMemoryStore, IndexStatus};
use bytes::Bytes;
use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};
use url::Url;

/// Serves the block 801 fixture for any number and counts requests.
#[derive(Debug, Default)]
struct FixtureSource {
    requests: AtomicUsize,
}

#[async_trait]
impl BlockSource for FixtureSource {
    async fn fetch_block(&self, _number: u64) -> Result<Bytes, FetchError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        Ok(Bytes::from_static(BLOCK_801_RESPONSE.as_bytes()))
    }
}

fn retry() -> RetryConfig {
    RetryConfig {
        max_retries: 2,
        min_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(5),
    }
}

#[tokio::test]
async fn ingest_then_query_by_envelope_id() {
    let store = Arc::new(InMemoryStore::new());
    let ingestor = Ingestor::new(Arc::new(FixtureSource::default()), store.clone(), "block")
        .with_retry(retry());

    ingestor.ingest(801, Some("1")).await.unwrap();

    let hits = Querier::new(store, "block").find_by_field("id", "1", 0, 10).await.unwrap();
    assert_eq!(hits.total_hits, 1);
    assert_eq!(hits.hits.len(), 1);
    assert_eq!(hits.hits[0].id, "1");
    assert_eq!(hits.hits[0].block, block_801());
}

#[tokio::test]
async fn repeated_ingestion_overwrites() {
    let store = Arc::new(InMemoryStore::new());
    let source = Arc::new(FixtureSource::default());
    let ingestor = Ingestor::new(source.clone(), store.clone(), "block").with_retry(retry());

    let first = ingestor.ingest(801, None).await.unwrap();
    let second = ingestor.ingest(801, None).await.unwrap();

    assert_eq!(first.index_status, IndexStatus::Created);
    assert_eq!(second.index_status, IndexStatus::Existing);
    assert_eq!(first.ack.result, "created");
    assert_eq!(second.ack.result, "updated");
    assert_eq!(second.ack.version, 2);

    assert_eq!(source.requests.load(Ordering::SeqCst), 2);
    assert_eq!(store.create_calls(), 1);
    assert_eq!(store.document_count("block"), 1);

    let hits = Querier::new(store, "block").find_by_field("_id", "801", 0, 10).await.unwrap();
    assert_eq!(hits.total_hits, 1);
}

#[tokio::test]
async fn ingestors_share_one_index() {
    let store = Arc::new(InMemoryStore::new());
    let a = Ingestor::new(Arc::new(FixtureSource::default()), store.clone(), "block");
    let b = Ingestor::new(Arc::new(FixtureSource::default()), store.clone(), "block");

    a.ingest(801, Some("a")).await.unwrap();
    b.ingest(801, Some("b")).await.unwrap();

    assert_eq!(store.create_calls(), 1);
    let querier = Querier::new(store, "block");
    let hits = querier.find_by_field("result.hash", BLOCK_801_HASH, 0, 10).await.unwrap();
    assert_eq!(hits.total_hits, 2);
    let ids: Vec<_> = hits.hits.iter().map(|hit| hit.id.as_str()).collect();
    assert_eq!(ids, ["a", "b"]);
}

#[tokio::test]
async fn block_801_over_http() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = Url::parse(&format!("http://{}", listener.local_addr().unwrap())).unwrap();

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        while !String::from_utf8_lossy(&buf).ends_with("\"id\":1}") {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            BLOCK_801_RESPONSE.len(),
            BLOCK_801_RESPONSE
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();
        String::from_utf8(buf).unwrap()
    });

    let source = HttpBlockSource::new(RpcClientConfig::new(url)).unwrap();
    let store = Arc::new(InMemoryStore::new());
    let ingestor = Ingestor::new(Arc::new(source), store.clone(), "block").with_retry(retry());

    let report = ingestor.ingest(801, None).await.unwrap();
    assert_eq!(report.hash, BLOCK_801_HASH);

    let request = server.await.unwrap();
    assert!(request.starts_with("POST / HTTP/1.1"));
    assert!(request.ends_with(
        r#"{"jsonrpc":"2.0","method":"eth_getBlockByNumber","params":["0x321",true],"id":1}"#
    ));

    let querier = Querier::new(store, "block").with_retry(retry());
    let hits = querier.find_by_field("result.number", "0x321", 0, 10).await.unwrap();
    assert_eq!(hits.total_hits, 1);
    assert_eq!(hits.hits[0].block.result.number, "0x321");
}
