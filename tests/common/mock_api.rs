//! Loopback stand-in for the Matriz HTTP API, served by axum on an
//! ephemeral port. Used by the client unit tests and the binary tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, mpsc};
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct Route {
    method: &'static str,
    path: &'static str,
    status: u16,
    body: String,
    delay: Duration,
}

impl Route {
    pub fn json(method: &'static str, path: &'static str, body: Value) -> Self {
        Route::text(method, path, 200, &body.to_string())
    }

    /// Raw body, served as-is whatever it contains.
    pub fn text(method: &'static str, path: &'static str, status: u16, body: &str) -> Self {
        Route {
            method,
            path,
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    /// Lowercase header names.
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }

    pub fn header(&self, name: &str) -> Option<String> {
        self.headers.get(&name.to_ascii_lowercase()).cloned()
    }

    /// "METHOD /path"
    pub fn line(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

#[derive(Clone)]
struct ApiState {
    routes: Arc<Vec<Route>>,
    seen: Arc<Mutex<Vec<Recorded>>>,
}

pub struct MockServer {
    pub base_url: String,
    seen: Arc<Mutex<Vec<Recorded>>>,
}

impl MockServer {
    /// Serve `routes` until the test process exits; anything else is a 404.
    pub fn start(routes: Vec<Route>) -> Self {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new().fallback(answer).with_state(ApiState {
            routes: Arc::new(routes),
            seen: Arc::clone(&seen),
        });

        let (tx, rx) = mpsc::channel::<SocketAddr>();
        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("mock runtime");
            rt.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind loopback");
                tx.send(listener.local_addr().expect("local addr"))
                    .expect("report address");
                axum::serve(listener, app).await.expect("serve mock api");
            });
        });
        let addr = rx.recv().expect("mock api should start");

        MockServer {
            base_url: format!("http://{addr}"),
            seen,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.seen.lock().unwrap().clone()
    }
}

async fn answer(
    State(state): State<ApiState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let route = state
        .routes
        .iter()
        .find(|r| r.method == method.as_str() && r.path == path)
        .cloned();

    state.seen.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path,
        headers: headers
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect(),
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let (status, body, delay) = match route {
        Some(r) => (r.status, r.body, r.delay),
        None => (404, r#"{"error":"not found"}"#.to_string(), Duration::ZERO),
    };
    tokio::time::sleep(delay).await;
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}
