//! End-to-end tests against a real listener on an ephemeral port.

#![allow(clippy::panic)]

use std::net::SocketAddr;
use std::path::Path;

use tea_tracker::api;
use tea_tracker::api::dto::{LogCupResponse, StatusResponse};
use tea_tracker::app_state::AppState;
use tea_tracker::persistence::CounterStore;
use tea_tracker::service::CounterService;
use tokio::task::JoinHandle;

struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    async fn start(counter_file: &Path) -> Self {
        let store = match CounterStore::open(counter_file).await {
            Ok(store) => store,
            Err(e) => panic!("failed to open store: {e}"),
        };
        let app = api::build_router().with_state(AppState::new(CounterService::new(store)));

        let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
            panic!("failed to bind");
        };
        let Ok(addr) = listener.local_addr() else {
            panic!("no local addr");
        };
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Self { addr, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    async fn stop(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }
}

async fn log_cup(client: &reqwest::Client, server: &TestServer) -> LogCupResponse {
    let response = match client.get(server.url("/tea")).send().await {
        Ok(response) => response,
        Err(e) => panic!("GET /tea failed: {e}"),
    };
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    match response.json().await {
        Ok(body) => body,
        Err(e) => panic!("invalid /tea body: {e}"),
    }
}

async fn status(client: &reqwest::Client, server: &TestServer) -> StatusResponse {
    let response = match client.get(server.url("/tea/status")).send().await {
        Ok(response) => response,
        Err(e) => panic!("GET /tea/status failed: {e}"),
    };
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    match response.json().await {
        Ok(body) => body,
        Err(e) => panic!("invalid /tea/status body: {e}"),
    }
}

#[tokio::test]
async fn logging_cups_survives_restart() {
    let Ok(dir) = tempfile::tempdir() else {
        panic!("failed to create temp dir");
    };
    let counter_file = dir.path().join("tea_count.json");
    let client = reqwest::Client::new();

    let server = TestServer::start(&counter_file).await;
    assert_eq!(status(&client, &server).await.total_cups, 0);

    let first = log_cup(&client, &server).await;
    assert_eq!(first.message, "Cup of tea logged!");
    assert_eq!(first.total_cups, 1);
    assert_eq!(log_cup(&client, &server).await.total_cups, 2);
    assert_eq!(status(&client, &server).await.total_cups, 2);
    server.stop().await;

    let restarted = TestServer::start(&counter_file).await;
    assert_eq!(status(&client, &restarted).await.total_cups, 2);
    assert_eq!(log_cup(&client, &restarted).await.total_cups, 3);
    restarted.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_each_get_a_unique_total() {
    const N: u64 = 32;

    let Ok(dir) = tempfile::tempdir() else {
        panic!("failed to create temp dir");
    };
    let counter_file = dir.path().join("tea_count.json");
    let client = reqwest::Client::new();
    let server = TestServer::start(&counter_file).await;
    let url = server.url("/tea");

    let mut handles = Vec::new();
    for _ in 0..N {
        let client = client.clone();
        let url = url.clone();
        handles.push(tokio::spawn(async move {
            let Ok(response) = client.get(url).send().await else {
                panic!("request failed");
            };
            let Ok(body) = response.json::<LogCupResponse>().await else {
                panic!("invalid body");
            };
            body.total_cups
        }));
    }

    let mut totals = Vec::new();
    for handle in handles {
        let Ok(total) = handle.await else {
            panic!("request task failed");
        };
        totals.push(total);
    }
    totals.sort_unstable();

    let expected: Vec<u64> = (1..=N).collect();
    assert_eq!(totals, expected);
    assert_eq!(status(&client, &server).await.total_cups, N);
    server.stop().await;
}

#[tokio::test]
async fn corrupt_counter_file_refuses_to_start() {
    let Ok(dir) = tempfile::tempdir() else {
        panic!("failed to create temp dir");
    };
    let counter_file = dir.path().join("tea_count.json");
    assert!(std::fs::write(&counter_file, r#"{"count": "lots"}"#).is_ok());

    let result = CounterStore::open(&counter_file).await;
    assert!(matches!(
        result,
        Err(tea_tracker::error::TrackerError::CorruptState { .. })
    ));
}

#[tokio::test]
async fn health_reports_total() {
    let Ok(dir) = tempfile::tempdir() else {
        panic!("failed to create temp dir");
    };
    let client = reqwest::Client::new();
    let server = TestServer::start(&dir.path().join("tea_count.json")).await;
    log_cup(&client, &server).await;

    let Ok(response) = client.get(server.url("/health")).send().await else {
        panic!("GET /health failed");
    };
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let Ok(body) = response.json::<serde_json::Value>().await else {
        panic!("invalid /health body");
    };
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["total_cups"], 1);

    // Only operational fields; no server paths leak out.
    let Some(fields) = body.as_object() else {
        panic!("/health body must be an object");
    };
    let mut keys: Vec<&str> = fields.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["status", "timestamp", "total_cups", "version"]);
    server.stop().await;
}
