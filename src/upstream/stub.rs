//! In-memory transport double shared by the unit tests.

use super::transport::{HttpTransport, TransportResponse, UpstreamRequest};
use crate::error::TransportError;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

type Responder =
    Box<dyn Fn(&UpstreamRequest) -> Result<TransportResponse, TransportError> + Send + Sync>;

/// Answers requests with a closure and records every URL it saw.
pub struct StubTransport {
    responder: Responder,
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl StubTransport {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&UpstreamRequest) -> Result<TransportResponse, TransportError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Route `/users/..` and `/posts` to fixed responses.
    pub fn routes(user: TransportResponse, posts: TransportResponse) -> Self {
        Self::new(move |req| {
            if req.url.path().starts_with("/users/") {
                Ok(user.clone())
            } else {
                Ok(posts.clone())
            }
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn execute(&self, request: UpstreamRequest) -> Result<TransportResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(request.url.to_string());
        (self.responder)(&request)
    }
}

pub fn ok_json(body: &str) -> TransportResponse {
    status(200, body)
}

pub fn status(code: u16, body: &str) -> TransportResponse {
    TransportResponse {
        status: StatusCode::from_u16(code).unwrap(),
        body: Ok(body.as_bytes().to_vec()),
    }
}

pub const CHACHA_USER: &str =
    r#"{"id":987654,"name":"Chacha","username":"chacha22","email":"chacha22@gmail.com"}"#;

pub const CHACHA_POSTS: &str = r#"[{"userId":987654,"id":42,"title":"How to Adult","body":"N/A"}]"#;
