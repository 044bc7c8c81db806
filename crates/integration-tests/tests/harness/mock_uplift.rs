//! Mock Uplift synthesis backend for integration tests
//!
//! Serves both the buffered and streaming synthesis endpoints with canned
//! audio, and captures inbound requests for payload assertions.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use bytes::Bytes;
use tokio_util::sync::CancellationToken;

/// Header the real API uses to report audio duration
const DURATION_HEADER: &str = "x-uplift-ai-audio-duration";

/// A request captured by the mock
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub authorization: Option<String>,
    pub payload: serde_json::Value,
}

/// Canned behavior for the mock backend
#[derive(Debug, Clone)]
pub struct MockOptions {
    /// Audio bytes returned by the buffered endpoint
    pub audio: Vec<u8>,
    /// Duration header value, omitted when `None`
    pub duration: Option<String>,
    /// Chunks emitted by the streaming endpoint, in order
    pub chunks: Vec<Vec<u8>>,
    /// When set, both endpoints fail with this status and body
    pub failure: Option<(u16, String)>,
}

impl Default for MockOptions {
    fn default() -> Self {
        Self {
            audio: b"mock-audio".to_vec(),
            duration: Some("1234".to_string()),
            chunks: vec![b"c1".to_vec(), b"c2".to_vec(), b"c3".to_vec()],
            failure: None,
        }
    }
}

struct MockState {
    options: MockOptions,
    synthesize_count: AtomicU32,
    stream_count: AtomicU32,
    captured: std::sync::Mutex<Vec<CapturedRequest>>,
}

/// Mock synthesis backend that returns predictable responses
pub struct MockUplift {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

impl MockUplift {
    /// Start the mock with default canned audio
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with(MockOptions::default()).await
    }

    /// Start a mock whose endpoints fail with the given status and body
    pub async fn start_failing(status: u16, body: &str) -> anyhow::Result<Self> {
        Self::start_with(MockOptions {
            failure: Some((status, body.to_string())),
            ..MockOptions::default()
        })
        .await
    }

    /// Start the mock with explicit behavior
    pub async fn start_with(options: MockOptions) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            options,
            synthesize_count: AtomicU32::new(0),
            stream_count: AtomicU32::new(0),
            captured: std::sync::Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/synthesis/text-to-speech", routing::post(handle_synthesize))
            .route("/synthesis/text-to-speech/stream", routing::post(handle_stream))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as the synthesis upstream
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of buffered synthesis requests received
    pub fn synthesize_count(&self) -> u32 {
        self.state.synthesize_count.load(Ordering::Relaxed)
    }

    /// Number of streaming synthesis requests received
    pub fn stream_count(&self) -> u32 {
        self.state.stream_count.load(Ordering::Relaxed)
    }

    /// Requests captured so far, in arrival order
    pub fn captured(&self) -> Vec<CapturedRequest> {
        self.state.captured.lock().expect("captured lock").clone()
    }

    /// The most recent captured request
    pub fn last_request(&self) -> CapturedRequest {
        self.captured().last().cloned().expect("no requests captured")
    }
}

impl Drop for MockUplift {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn capture(state: &MockState, headers: &HeaderMap, payload: serde_json::Value) {
    let authorization = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    state
        .captured
        .lock()
        .expect("captured lock")
        .push(CapturedRequest { authorization, payload });
}

fn failure_response(failure: &(u16, String)) -> Response {
    let (status, body) = failure;
    (
        StatusCode::from_u16(*status).expect("valid mock status"),
        body.clone(),
    )
        .into_response()
}

async fn handle_synthesize(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(payload): Json<serde_json::Value>,
) -> Response {
    state.synthesize_count.fetch_add(1, Ordering::Relaxed);
    capture(&state, &headers, payload);

    if let Some(ref failure) = state.options.failure {
        return failure_response(failure);
    }

    let mut response = Response::builder().status(StatusCode::OK);
    if let Some(ref duration) = state.options.duration {
        response = response.header(DURATION_HEADER, duration);
    }

    response
        .body(Body::from(state.options.audio.clone()))
        .expect("mock response must build")
}

async fn handle_stream(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(payload): Json<serde_json::Value>,
) -> Response {
    state.stream_count.fetch_add(1, Ordering::Relaxed);
    capture(&state, &headers, payload);

    if let Some(ref failure) = state.options.failure {
        return failure_response(failure);
    }

    let chunks = state
        .options
        .chunks
        .clone()
        .into_iter()
        .map(|chunk| Ok::<_, std::io::Error>(Bytes::from(chunk)));

    Response::builder()
        .status(StatusCode::OK)
        .body(Body::from_stream(futures_util::stream::iter(chunks)))
        .expect("mock response must build")
}
