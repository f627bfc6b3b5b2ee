use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use reqwest::Client;
use serde_json::{json, Value};

use earlybird::config::{Config, GithubConfig, TelegramConfig};

/// A request captured by the mock sink server.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

/// In-process stand-in for both notification sinks. Records every request
/// and answers with a scriptable status code.
pub struct MockSink {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    status: Arc<AtomicU16>,
}

#[derive(Clone)]
struct SinkState {
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    status: Arc<AtomicU16>,
}

impl MockSink {
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path_fragment: &str) -> Vec<CapturedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path.contains(path_fragment))
            .collect()
    }

    /// Make the sink answer every request with the given status.
    pub fn set_status(&self, status: u16) {
        self.status.store(status, Ordering::SeqCst);
    }
}

async fn capture(
    State(state): State<SinkState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let captured = CapturedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string()),
        body: serde_json::from_slice(&body).unwrap_or(json!(null)),
    };
    state.requests.lock().unwrap().push(captured);

    let status =
        StatusCode::from_u16(state.status.load(Ordering::SeqCst)).unwrap_or(StatusCode::OK);
    (status, axum::Json(json!({"ok": true})))
}

async fn spawn_mock_sink() -> MockSink {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let status = Arc::new(AtomicU16::new(200));

    let app = Router::new()
        .fallback(capture)
        .with_state(SinkState {
            requests: requests.clone(),
            status: status.clone(),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock sink");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock sink failed");
    });

    MockSink {
        addr,
        requests,
        status,
    }
}

/// A running test server instance, with both sinks pointed at a mock.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub sink: MockSink,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Submit a JSON payload, return (body, status).
    pub async fn submit(&self, payload: &Value) -> (Value, reqwest::StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/submit"))
            .json(payload)
            .send()
            .await
            .expect("submit request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

/// Spawn a test app with both sinks configured against the mock server.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(true, true).await
}

/// Spawn a test app, choosing which sink credentials are present.
pub async fn spawn_app_with(telegram: bool, github: bool) -> TestApp {
    let sink = spawn_mock_sink().await;
    let sink_base = format!("http://{}", sink.addr);
    spawn_app_inner(telegram, github, sink_base, sink).await
}

/// Spawn a test app with both sinks configured but pointed at an address
/// nothing listens on, so every delivery attempt fails at connect.
pub async fn spawn_app_unreachable() -> TestApp {
    let sink = spawn_mock_sink().await;
    spawn_app_inner(true, true, "http://127.0.0.1:1".to_string(), sink).await
}

async fn spawn_app_inner(
    telegram: bool,
    github: bool,
    sink_base: String,
    sink: MockSink,
) -> TestApp {
    let config = Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        max_body_size: 65_536,
        sink_timeout: Duration::from_secs(5),
        log_level: "warn".to_string(),
        telegram: telegram.then(|| TelegramConfig {
            bot_token: "test-token".to_string(),
            chat_id: "12345".to_string(),
        }),
        github: github.then(|| GithubConfig {
            token: "gh-test".to_string(),
            repo: "acme/landing".to_string(),
        }),
        telegram_api_base: sink_base.clone(),
        github_api_base: sink_base,
    };

    let app = earlybird::build_app(config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp { addr, client, sink }
}
