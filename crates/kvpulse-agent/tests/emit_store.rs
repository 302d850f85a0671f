//! End-to-end emit tests against a fake store.
//!
//! Well-formed and malformed responses are served by an axum app bound to an
//! ephemeral port; abrupt connection drops use a raw TCP listener since axum
//! always answers with a complete response.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::routing::get;
use axum::{Json, Router};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use kvpulse_agent::collector::{Instrument, StoreCollector};
use kvpulse_core::sink::RecordingSink;

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Fake store serving a stats body and a key-tree response with the given
/// consensus headers.
fn fake_store(stats: serde_json::Value, headers: Vec<(String, String)>) -> Router {
    Router::new()
        .route(
            "/v2/stats/store",
            get(move || {
                let stats = stats.clone();
                async move { Json(stats) }
            }),
        )
        .route(
            "/v2/keys/",
            get(move || {
                let headers = headers.clone();
                async move {
                    let mut map = HeaderMap::new();
                    for (k, v) in &headers {
                        map.insert(
                            HeaderName::from_bytes(k.as_bytes()).unwrap(),
                            HeaderValue::from_str(v).unwrap(),
                        );
                    }
                    (map, Json(serde_json::json!({"action": "get"})))
                }
            }),
        )
}

fn full_headers(etcd: &str, raft: &str, term: &str) -> Vec<(String, String)> {
    vec![
        ("X-Etcd-Index".to_string(), etcd.to_string()),
        ("X-Raft-Index".to_string(), raft.to_string()),
        ("X-Raft-Term".to_string(), term.to_string()),
    ]
}

fn collector(addr: SocketAddr) -> (StoreCollector, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    let collector = StoreCollector::new(&format!("http://{addr}"), sink.clone());
    (collector, sink)
}

#[test]
fn endpoints_derived_from_base() {
    let sink = Arc::new(RecordingSink::new());
    let c = StoreCollector::new("127.0.0.1:4001/", sink);
    assert_eq!(c.stats_endpoint(), "http://127.0.0.1:4001/v2/stats/store");
    assert_eq!(c.keys_endpoint(), "http://127.0.0.1:4001/v2/keys/");
}

#[tokio::test]
async fn happy_path_emits_triple_then_stats() {
    let app = fake_store(
        serde_json::json!({"getsCount": 42, "setsCount": 7}),
        full_headers("100", "99", "3"),
    );
    let addr = serve(app).await;
    let (c, sink) = collector(addr);

    let ctx = c.emit().await;
    assert_eq!(ctx.name, "store");
    assert_eq!(c.name(), "store");
    assert_eq!(ctx.metrics.len(), 5);

    // Fixed-order triple first.
    assert_eq!(ctx.metrics[0].name, "EtcdIndex");
    assert_eq!(ctx.metrics[0].value, 100);
    assert_eq!(ctx.metrics[1].name, "RaftIndex");
    assert_eq!(ctx.metrics[1].value, 99);
    assert_eq!(ctx.metrics[2].name, "RaftTerm");
    assert_eq!(ctx.metrics[2].value, 3);

    // Stats-derived metrics by membership only; map order is unspecified.
    let tail: HashSet<(String, u64)> = ctx.metrics[3..]
        .iter()
        .map(|m| (m.name.clone(), m.value))
        .collect();
    assert!(tail.contains(&("GetsCount".to_string(), 42)));
    assert!(tail.contains(&("SetsCount".to_string(), 7)));

    assert!(sink.take().is_empty());
}

#[tokio::test]
async fn stats_transport_failure_yields_empty_context() {
    // Bind then drop so nothing is listening on the port.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (c, sink) = collector(addr);
    let ctx = c.emit().await;
    assert!(ctx.metrics.is_empty());

    let events = sink.take();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event, "failed-to-collect-stats");
}

#[tokio::test]
async fn malformed_stats_body_yields_empty_context() {
    let app = Router::new()
        .route("/v2/stats/store", get(|| async { "not json" }))
        .route("/v2/keys/", get(|| async { "unreached" }));
    let addr = serve(app).await;

    let (c, sink) = collector(addr);
    let ctx = c.emit().await;
    assert!(ctx.metrics.is_empty());

    let events = sink.take();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event, "failed-to-unmarshal-stats");
}

#[tokio::test]
async fn keys_transport_failure_discards_good_stats() {
    let addr = serve_raw_dropping_keys().await;

    let (c, sink) = collector(addr);
    let ctx = c.emit().await;
    assert!(ctx.metrics.is_empty());

    let events = sink.take();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event, "failed-to-read-from-store");
}

#[tokio::test]
async fn missing_header_discards_whole_snapshot() {
    let app = fake_store(
        serde_json::json!({"getsCount": 42}),
        vec![
            ("X-Etcd-Index".to_string(), "100".to_string()),
            ("X-Raft-Index".to_string(), "99".to_string()),
        ],
    );
    let addr = serve(app).await;

    let (c, sink) = collector(addr);
    let ctx = c.emit().await;
    assert!(ctx.metrics.is_empty());

    let events = sink.take();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event, "failed-to-parse-raft-term");
    assert_eq!(events[0].data, vec![("term", String::new())]);
}

#[tokio::test]
async fn non_numeric_header_discards_whole_snapshot() {
    let app = fake_store(
        serde_json::json!({"getsCount": 42}),
        full_headers("100", "99", "abc"),
    );
    let addr = serve(app).await;

    let (c, sink) = collector(addr);
    let ctx = c.emit().await;
    assert!(ctx.metrics.is_empty());

    let events = sink.take();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event, "failed-to-parse-raft-term");
    assert_eq!(events[0].data, vec![("term", "abc".to_string())]);
}

#[tokio::test]
async fn concurrent_emits_are_independent() {
    let app = fake_store(
        serde_json::json!({"getsCount": 42}),
        full_headers("100", "99", "3"),
    );
    let addr = serve(app).await;
    let (c, sink) = collector(addr);

    let (a, b) = tokio::join!(c.emit(), c.emit());
    assert_eq!(a, b);
    assert_eq!(a.metrics.len(), 4);
    assert_eq!(a.metrics[0].name, "EtcdIndex");
    assert!(sink.take().is_empty());
}

/// Raw HTTP fake: answers the stats request, drops the key-tree connection
/// without writing a response.
async fn serve_raw_dropping_keys() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let (mut sock, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => break,
            };
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                let mut req = Vec::new();
                loop {
                    let n = sock.read(&mut buf).await.unwrap_or(0);
                    if n == 0 {
                        return;
                    }
                    req.extend_from_slice(&buf[..n]);
                    if req.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
                if req.starts_with(b"GET /v2/stats/store") {
                    let body = r#"{"getsCount":42}"#;
                    let resp = format!(
                        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = sock.write_all(resp.as_bytes()).await;
                }
                // Any other path: close without responding.
            });
        }
    });
    addr
}
