//! Integration test: drive the dashboard API over HTTP on an ephemeral port.
#![cfg(feature = "dashboard")]

use std::net::{SocketAddr, TcpListener};
use std::time::Duration;

use chrono::Utc;
use quantum_matrix::dashboard::{self, DashboardState};
use quantum_matrix::market::seed_snapshot;
use quantum_matrix::refresh::WallClock;
use quantum_matrix::risk_controls::RiskControls;
use quantum_matrix::store::SnapshotStore;
use serde_json::{json, Value};
use tokio::sync::oneshot;

struct TestServer {
    base: String,
    store: SnapshotStore,
    client: reqwest::Client,
    _shutdown: oneshot::Sender<()>,
}

async fn spawn_server() -> TestServer {
    let store = SnapshotStore::new(seed_snapshot(Utc::now()));
    let state = DashboardState::new(store.clone(), WallClock::default(), RiskControls::default());

    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr: SocketAddr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(dashboard::serve(listener, state, async {
        let _ = rx.await;
    }));

    TestServer {
        base: format!("http://{}", addr),
        store,
        client: reqwest::Client::new(),
        _shutdown: tx,
    }
}

impl TestServer {
    async fn get(&self, path: &str) -> Value {
        self.client
            .get(format!("{}{}", self.base, path))
            .send()
            .await
            .expect("request")
            .json()
            .await
            .expect("json body")
    }

    async fn post(&self, path: &str) -> Value {
        self.client
            .post(format!("{}{}", self.base, path))
            .send()
            .await
            .expect("request")
            .json()
            .await
            .expect("json body")
    }
}

#[tokio::test]
async fn health_and_root() {
    let server = spawn_server().await;
    let body = server
        .client
        .get(format!("{}/healthz", server.base))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "OK");

    let page = server.client.get(&server.base).send().await.unwrap().text().await.unwrap();
    assert!(page.contains("QUANTUM TRADE MATRIX"));
}

#[tokio::test]
async fn snapshot_reflects_store_replacements() {
    let server = spawn_server().await;
    let body = server.get("/api/snapshot").await;
    assert_eq!(body["revision"], 0);
    assert_eq!(body["snapshot"]["assets"]["forex"][0]["symbol"], "EUR/USD");
    assert_eq!(body["snapshot"]["strategies"]["active"], 147);

    let mut next = (*server.store.get().await).clone();
    next.strategies.active = 155;
    server.store.replace(next).await;

    let body = server.get("/api/snapshot").await;
    assert_eq!(body["revision"], 1);
    assert_eq!(body["snapshot"]["strategies"]["active"], 155);
}

#[tokio::test]
async fn overview_summarises_seed() {
    let server = spawn_server().await;
    let body = server.get("/api/overview").await;
    assert_eq!(body["systemStatus"], "active");
    assert_eq!(body["assetClasses"].as_array().unwrap().len(), 4);
    assert_eq!(body["heatmap"].as_array().unwrap().len(), 21);
    assert_eq!(body["risk"]["drawdown"]["status"], "warning");
    assert_eq!(body["risk"]["dailyPnL"]["status"], "safe");
    assert_eq!(body["risk"]["sharpeRatio"]["status"], "safe");
    assert_eq!(body["risk"]["riskScore"]["status"], "warning");
    assert_eq!(body["risk"]["activeTrades"]["threshold"], 30.0);
    assert_eq!(body["modules"]["total"], 11);
    assert_eq!(body["topStrategies"], json!(["STR_001", "STR_003"]));
}

#[tokio::test]
async fn module_toggle_and_priority() {
    let server = spawn_server().await;
    let body = server.get("/api/modules").await;
    assert_eq!(body["modules"].as_array().unwrap().len(), 11);
    assert_eq!(body["summary"]["enabled"], 4);
    let guardian = &body["modules"][3];
    assert_eq!(guardian["id"], "guardian-angel");
    assert_eq!(guardian["icon"], "shield");
    assert_eq!(guardian["statusColor"], "green");
    assert_eq!(guardian["statusIcon"], "check-circle");
    let brain = &body["modules"][9];
    assert_eq!(brain["icon"], "brain");
    assert_eq!(brain["statusColor"], "yellow");
    assert_eq!(brain["statusIcon"], "clock");

    let body = server.post("/api/modules/strategy-swarm/toggle").await;
    let swarm = &body["modules"][1];
    assert_eq!(swarm["id"], "strategy-swarm");
    assert_eq!(swarm["enabled"], false);
    assert_eq!(body["summary"]["enabled"], 3);

    let body = server.post("/api/modules/strategy-swarm/toggle").await;
    assert_eq!(body["modules"][1]["enabled"], true);

    let body: Value = server
        .client
        .put(format!("{}/api/modules/data-retriever/priority", server.base))
        .json(&json!({ "priority": 2 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["modules"][4]["id"], "data-retriever");
    assert_eq!(body["modules"][4]["priority"], 2);
}

#[tokio::test]
async fn unknown_module_is_noop() {
    let server = spawn_server().await;
    let before = server.get("/api/modules").await;
    let after = server.post("/api/modules/does-not-exist/toggle").await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn system_toggle_round_trip() {
    let server = spawn_server().await;
    assert_eq!(server.get("/api/system").await["status"], "active");
    let body = server.post("/api/system/toggle").await;
    assert_eq!(body["status"], "paused");
    assert_eq!(body["color"], "yellow");
    assert_eq!(server.post("/api/system/toggle").await["status"], "active");
}

#[tokio::test]
async fn risk_controls_apply_reject_and_reset() {
    let server = spawn_server().await;
    let url = format!("{}/api/risk-controls", server.base);

    let resp = server
        .client
        .put(&url)
        .json(&json!({ "riskTolerance": 0.72, "maxDailyLoss": 5000.0, "maxDrawdown": 10.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert!((body["riskTolerance"].as_f64().unwrap() - 0.7).abs() < 1e-9);
    assert_eq!(body["maxDailyLoss"], 5000.0);

    let resp = server
        .client
        .put(&url)
        .json(&json!({ "riskTolerance": 3.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    assert!(resp.text().await.unwrap().contains("risk tolerance"));

    // rejected update leaves the previous values in place
    let body = server.get("/api/risk-controls").await;
    assert_eq!(body["maxDrawdown"], 10.0);

    let body = server.post("/api/risk-controls/reset").await;
    assert_eq!(body["riskTolerance"], 0.5);
    assert!(body.get("maxDailyLoss").is_none());
}

#[tokio::test]
async fn clock_has_display_string() {
    let server = spawn_server().await;
    let body = server.get("/api/clock").await;
    assert_eq!(body["display"].as_str().unwrap().len(), 8);
}

#[tokio::test]
async fn events_stream_pushes_snapshots() {
    let server = spawn_server().await;
    let mut resp = server.client.get(format!("{}/api/events", server.base)).send().await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);

    let mut received = String::new();

    // initial event
    tokio::time::timeout(Duration::from_secs(5), async {
        while !received.contains("\"active\":147") {
            let chunk = resp.chunk().await.unwrap().expect("stream ended");
            received.push_str(&String::from_utf8_lossy(&chunk));
        }
    })
    .await
    .expect("initial snapshot event");
    assert!(received.contains("event:") && received.contains("snapshot"));

    let mut next = (*server.store.get().await).clone();
    next.strategies.active = 158;
    server.store.replace(next).await;

    tokio::time::timeout(Duration::from_secs(5), async {
        while !received.contains("\"active\":158") {
            let chunk = resp.chunk().await.unwrap().expect("stream ended");
            received.push_str(&String::from_utf8_lossy(&chunk));
        }
    })
    .await
    .expect("pushed snapshot event");
}
