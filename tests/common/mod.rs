//! Stub backend shared by the HTTP and CLI integration tests.
//!
//! Serves `POST /rpc/{method}` from a table of canned JSON bodies and
//! records every request it receives.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::Value;

#[derive(Default)]
struct StubState {
    responses: HashMap<String, Value>,
    failures: HashMap<String, u16>,
    requests: Mutex<Vec<(String, Value)>>,
}

#[derive(Default)]
pub struct StubBuilder {
    responses: HashMap<String, Value>,
    failures: HashMap<String, u16>,
}

impl StubBuilder {
    pub fn respond(mut self, method: &str, body: Value) -> Self {
        self.responses.insert(method.to_string(), body);
        self
    }

    pub fn fail(mut self, method: &str, status: u16) -> Self {
        self.failures.insert(method.to_string(), status);
        self
    }

    pub async fn start(self) -> StubBackend {
        let state = Arc::new(StubState {
            responses: self.responses,
            failures: self.failures,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/rpc/{method}", post(rpc))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        StubBackend {
            base_url: format!("http://{}", addr),
            state,
        }
    }
}

pub struct StubBackend {
    pub base_url: String,
    state: Arc<StubState>,
}

impl StubBackend {
    pub fn builder() -> StubBuilder {
        StubBuilder::default()
    }

    /// Request bodies received for `method`, in arrival order.
    pub fn requests_for(&self, method: &str) -> Vec<Value> {
        self.state
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, _)| m == method)
            .map(|(_, body)| body.clone())
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.state.requests.lock().unwrap().len()
    }
}

async fn rpc(
    State(state): State<Arc<StubState>>,
    Path(method): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    state
        .requests
        .lock()
        .unwrap()
        .push((method.clone(), body));

    if let Some(status) = state.failures.get(&method) {
        let status = StatusCode::from_u16(*status).unwrap();
        return (status, "stub failure").into_response();
    }
    match state.responses.get(&method) {
        Some(body) => Json(body.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, format!("no stub for {}", method)).into_response(),
    }
}
