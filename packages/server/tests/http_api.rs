//! HTTP API integration tests.
//!
//! Tests for REST API endpoints (health check, message history, static fallback).

mod fixtures;
use fixtures::{TestServer, next_json, send_json};

#[tokio::test]
async fn test_health_endpoint() {
    // テスト項目: /api/health エンドポイントが正常に動作する
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .get(format!("{}/api/health", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_messages_endpoint_empty_on_start() {
    // テスト項目: 起動直後の /api/messages は空配列を返す
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let response = reqwest::get(format!("{}/api/messages", server.base_url()))
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_messages_endpoint_returns_history_in_order() {
    // テスト項目: /api/messages が参加通知と発言を到着順に返す
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect("alice").await;
    assert_eq!(next_json(&mut alice).await["content"], "alice joined the chat");

    // when (操作):
    send_json(&mut alice, serde_json::json!({"type": "chat", "content": "hello"})).await;
    assert_eq!(next_json(&mut alice).await["content"], "hello");

    let response = reqwest::get(format!("{}/api/messages", server.base_url()))
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    let messages = body.as_array().expect("Response should be an array");
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["type"], "system");
    assert_eq!(messages[0]["content"], "alice joined the chat");
    assert_eq!(messages[1]["type"], "chat");
    assert_eq!(messages[1]["content"], "hello");
    assert_eq!(messages[1]["sender"], "alice");
    assert!(messages[1]["timestamp"].is_string());
}

#[tokio::test]
async fn test_unknown_path_falls_back_to_static_files() {
    // テスト項目: ルートに一致しないパスは静的ファイル配信になり、存在しなければ 404
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let response = reqwest::get(format!("{}/no-such-file.html", server.base_url()))
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 404);
}
