// Shared test helpers for driving the router without a socket.
//
// Requests go through `tower::ServiceExt::oneshot`; the client address the
// rate limiter keys on is injected as a `ConnectInfo` extension.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use axum::body::Body;
use axum::extract::connect_info::MockConnectInfo;
use axum::extract::ConnectInfo;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use book_shelf::{build_router, AppState, Config};

/// Address used when a test does not pick a client explicitly.
pub const DEFAULT_CLIENT: IpAddr = IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1));

/// A response reduced to what the tests look at.
#[allow(dead_code)] // Not every test file reads every field
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

#[allow(dead_code)]
impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body)
            .unwrap_or_else(|e| panic!("body is not JSON ({}): {:?}", e, self.body))
    }

    pub fn ids(&self) -> Vec<u64> {
        self.json()
            .as_array()
            .expect("body should be a JSON array")
            .iter()
            .map(|book| book["id"].as_u64().expect("book id should be an integer"))
            .collect()
    }
}

/// Default configuration (100 seeded books, 30 requests per 60s).
#[allow(dead_code)]
pub fn default_config() -> Config {
    Config::default()
}

/// Configuration with a custom quota and window.
#[allow(dead_code)]
pub fn config_with_limit(rate_limit: u32, window: Duration) -> Config {
    Config {
        rate_limit,
        rate_window: window,
        ..Config::default()
    }
}

/// Router plus a handle on the state it serves, for inspecting the store.
pub fn test_app(config: &Config) -> (Router, AppState) {
    let state = AppState::from_config(config);
    let router = build_router(state.clone())
        .layer(MockConnectInfo(SocketAddr::new(DEFAULT_CLIENT, 40000)));
    (router, state)
}

/// Sends one request from [`DEFAULT_CLIENT`].
#[allow(dead_code)]
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    send_from(app, DEFAULT_CLIENT, method, uri, body).await
}

/// Sends one request as if it came from `client`.
pub async fn send_from(
    app: &Router,
    client: IpAddr,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let mut request = builder.body(body).expect("request should build");
    request
        .extensions_mut()
        .insert(ConnectInfo(SocketAddr::new(client, 40000)));

    send_request(app, request).await
}

/// Sends a prebuilt request (for raw or malformed bodies).
pub async fn send_request(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();

    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).expect("body should be UTF-8"),
    }
}
