//! End-to-end test over a real socket.
//!
//! Verifies that the listener wiring provides the peer address the rate
//! limiter keys on, and that graceful shutdown returns cleanly.

use std::time::Duration;

use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use book_shelf::{start_server, AppState, Config};

#[tokio::test]
async fn test_server_over_tcp() {
    let config = Config {
        rate_limit: 3,
        rate_window: Duration::from_secs(60),
        seed_books: 5,
        ..Config::default()
    };
    let state = AppState::from_config(&config);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("ephemeral port should bind");
    let addr = listener.local_addr().expect("listener has an address");

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(start_server(listener, state.clone(), async move {
        let _ = stop_rx.await;
    }));

    let client = reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("client should build");
    let base = format!("http://{}/api/books", addr);

    let created = client
        .post(&base)
        .json(&json!({"title": "1984", "author": "George Orwell"}))
        .send()
        .await
        .expect("create should succeed");
    assert_eq!(created.status(), 201);
    let created: Value = created.json().await.expect("create returns JSON");
    assert_eq!(created["id"], 6);

    let listed = client
        .get(format!("{}?author=George%20Orwell", base))
        .send()
        .await
        .expect("list should succeed");
    assert_eq!(listed.status(), 200);
    assert_eq!(
        listed.headers()["x-ratelimit-remaining"],
        "1",
        "create and list share the collection quota"
    );

    let third = client.get(&base).send().await.expect("request should succeed");
    assert_eq!(third.status(), 200);

    let fourth = client.get(&base).send().await.expect("request should succeed");
    assert_eq!(fourth.status(), 429);
    assert!(fourth.headers().contains_key("retry-after"));
    let body: Value = fourth.json().await.expect("429 returns JSON");
    assert_eq!(body, json!({"error": "Too Many Requests"}));

    let deleted = client
        .delete(format!("{}/6", base))
        .send()
        .await
        .expect("delete should succeed");
    assert_eq!(deleted.status(), 200);
    assert_eq!(state.books.len().await, 5);

    drop(client);
    stop_tx.send(()).expect("server is still running");
    server
        .await
        .expect("server task panicked")
        .expect("server exits cleanly");
}
