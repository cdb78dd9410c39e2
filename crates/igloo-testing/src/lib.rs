//! Mock Igloo community
//!
//! An `axum` server on a background runtime. Routes answer with canned
//! JSON and every request is recorded so tests can check exactly what the
//! client sent. The clients under test are blocking, so they must be
//! driven from a plain `#[test]` thread, never from inside the runtime.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{ACCEPT, CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use parking_lot::Mutex;
use serde_json::Value;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    /// Raw (still percent-encoded) path
    pub path: String,
    pub query: Option<String>,
    pub cookie: Option<String>,
    pub accept: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    /// Decoded query pairs, in order
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        decode_pairs(self.query.as_deref().unwrap_or_default())
    }

    /// Decoded `application/x-www-form-urlencoded` body pairs
    pub fn form_pairs(&self) -> Vec<(String, String)> {
        decode_pairs(&self.body)
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

fn decode_pairs(raw: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(raw.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

#[derive(Debug, Clone)]
struct MockReply {
    status: u16,
    body: String,
    /// Sent as one `Set-Cookie` header each
    cookies: Vec<String>,
}

#[derive(Default)]
struct MockState {
    /// (method, path) -> reply
    routes: Mutex<HashMap<(String, String), MockReply>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub struct MockServer {
    addr: SocketAddr,
    state: Arc<MockState>,
    // Dropping the runtime stops the server.
    _runtime: tokio::runtime::Runtime,
}

impl MockServer {
    pub fn start() -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("mock server runtime");

        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind mock server");
        listener
            .set_nonblocking(true)
            .expect("non-blocking mock listener");
        let addr = listener.local_addr().expect("mock server address");

        let state = Arc::new(MockState::default());
        let app = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&state));

        runtime.spawn(async move {
            let listener =
                tokio::net::TcpListener::from_std(listener).expect("adopt mock listener");
            axum::serve(listener, app).await.expect("mock server");
        });

        Self {
            addr,
            state,
            _runtime: runtime,
        }
    }

    /// Base URL, ending with `/`
    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}/", self.addr)).expect("mock server url")
    }

    pub fn mock(&self, method: &str, path: &str, status: u16, body: Value) {
        self.mock_raw(method, path, status, &body.to_string());
    }

    /// Register a reply whose body is sent verbatim, e.g. broken JSON.
    pub fn mock_raw(&self, method: &str, path: &str, status: u16, body: &str) {
        self.insert(method, path, status, body.to_string(), Vec::new());
    }

    /// Like [`MockServer::mock`], also setting `cookies` on the reply.
    pub fn mock_with_cookies(
        &self,
        method: &str,
        path: &str,
        status: u16,
        body: Value,
        cookies: &[&str],
    ) {
        let cookies = cookies.iter().map(|c| c.to_string()).collect();
        self.insert(method, path, status, body.to_string(), cookies);
    }

    fn insert(&self, method: &str, path: &str, status: u16, body: String, cookies: Vec<String>) {
        self.state.routes.lock().insert(
            (method.to_uppercase(), path.to_string()),
            MockReply {
                status,
                body,
                cookies,
            },
        );
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.requests.lock().len()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state.requests.lock().last().cloned()
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header = |name: HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let key = (method.to_string(), uri.path().to_string());
    state.requests.lock().push(RecordedRequest {
        method: key.0.clone(),
        path: key.1.clone(),
        query: uri.query().map(str::to_string),
        cookie: header(COOKIE),
        accept: header(ACCEPT),
        content_type: header(CONTENT_TYPE),
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let reply = state.routes.lock().get(&key).cloned();
    match reply {
        Some(reply) => {
            let mut response = (
                StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                [(CONTENT_TYPE, "application/json")],
                reply.body,
            )
                .into_response();
            for cookie in &reply.cookies {
                if let Ok(value) = HeaderValue::from_str(cookie) {
                    response.headers_mut().append(SET_COOKIE, value);
                }
            }
            response
        }
        None => (StatusCode::NOT_FOUND, format!("no mock for {} {}", key.0, key.1)).into_response(),
    }
}
