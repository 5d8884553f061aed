//! Shared test utilities and fake model infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use textsum::models::{
    LoadedModel, ModelCache, ModelLoadError, ModelLoader, ModelOption, SummarizationCapability,
    SummarizeError, SummaryOptions,
};
use textsum::pipeline::Summarizer;
use textsum::server::router::build_router;
use textsum::server::AppState;
use tower::ServiceExt;

// -- Fake models --------------------------------------------------------------

/// What a fake model does when asked to summarize.
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Return the first `n` words of the input.
    FirstWords(usize),
    /// Return an empty candidate list.
    Nothing,
    /// Fail with an API error carrying this message.
    Fail(String),
}

pub struct FakeModel {
    identifier: &'static str,
    behavior: Behavior,
    calls: Arc<AtomicUsize>,
    last_options: Arc<parking_lot::Mutex<Option<SummaryOptions>>>,
}

#[async_trait]
impl SummarizationCapability for FakeModel {
    fn identifier(&self) -> &str {
        self.identifier
    }

    async fn summarize(
        &self,
        text: &str,
        options: &SummaryOptions,
    ) -> Result<Vec<String>, SummarizeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_options.lock() = Some(*options);
        match &self.behavior {
            Behavior::FirstWords(n) => Ok(vec![text
                .split_whitespace()
                .take(*n)
                .collect::<Vec<_>>()
                .join(" ")]),
            Behavior::Nothing => Ok(Vec::new()),
            Behavior::Fail(message) => Err(SummarizeError::ApiError {
                status: 500,
                message: message.clone(),
            }),
        }
    }
}

/// Loader producing [`FakeModel`]s and counting loads and summarize calls.
pub struct FakeLoader {
    pub loads: AtomicUsize,
    pub calls: Arc<AtomicUsize>,
    pub last_options: Arc<parking_lot::Mutex<Option<SummaryOptions>>>,
    failing_loads: AtomicUsize,
    behavior: Behavior,
    delay: Duration,
}

impl FakeLoader {
    pub fn new() -> Self {
        Self {
            loads: AtomicUsize::new(0),
            calls: Arc::new(AtomicUsize::new(0)),
            last_options: Arc::new(parking_lot::Mutex::new(None)),
            failing_loads: AtomicUsize::new(0),
            behavior: Behavior::FirstWords(5),
            delay: Duration::ZERO,
        }
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Make the next `n` loads fail as unavailable.
    pub fn failing_loads(self, n: usize) -> Self {
        self.failing_loads.store(n, Ordering::SeqCst);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelLoader for FakeLoader {
    async fn load(&self, option: &ModelOption) -> Result<LoadedModel, ModelLoadError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let should_fail = self
            .failing_loads
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(ModelLoadError::Unavailable {
                identifier: option.identifier.to_string(),
                status: 503,
                message: "Model is currently loading".to_string(),
            });
        }

        Ok(Arc::new(FakeModel {
            identifier: option.identifier,
            behavior: self.behavior.clone(),
            calls: self.calls.clone(),
            last_options: self.last_options.clone(),
        }))
    }
}

// -- App builders -------------------------------------------------------------

/// Build a router and state wired to `loader`.
pub fn test_app(loader: Arc<FakeLoader>) -> (Router, AppState) {
    let state = AppState::new(Summarizer::new(ModelCache::new(loader)));
    let router = build_router(state.clone(), 1024 * 1024);
    (router, state)
}

/// Send one request through the router.
pub async fn send(router: &Router, request: Request<Body>) -> Response<Body> {
    router
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible")
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// `name=value` part of the response's `Set-Cookie` header.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

pub fn get(path: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_empty(path: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

// -- Multipart ----------------------------------------------------------------

pub const BOUNDARY: &str = "textsum-test-boundary";

/// Hand-built `multipart/form-data` body.
#[derive(Default)]
pub struct MultipartBody {
    bytes: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &str, value: &str) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, filename: &str, content: &[u8]) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: text/plain\r\n\r\n",
                BOUNDARY, filename
            )
            .as_bytes(),
        );
        self.bytes.extend_from_slice(content);
        self.bytes.extend_from_slice(b"\r\n");
        self
    }

    /// The form as a browser submits it: model, both sliders, text, and an
    /// empty file part.
    pub fn form(model: &str, max_length: u32, min_length: u32, text: &str) -> Self {
        Self::new()
            .field("model", model)
            .field("max_length", &max_length.to_string())
            .field("min_length", &min_length.to_string())
            .field("text", text)
            .file("", b"")
    }

    pub fn into_request(mut self, cookie: Option<&str>) -> Request<Body> {
        self.bytes
            .extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        let mut builder = Request::builder()
            .method("POST")
            .uri("/summarize")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            );
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        builder.body(Body::from(self.bytes)).unwrap()
    }
}
