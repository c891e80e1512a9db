//! WebSocket integration tests.
//!
//! Drive the hub end to end through real WebSocket clients.

mod fixtures;

use fixtures::{TestServer, next_json, send_json};
use futures_util::SinkExt;
use hearth_server::ServerConfig;
use hearth_shared::time::parse_rfc3339;
use tokio_tungstenite::{connect_async, tungstenite};

#[tokio::test]
async fn test_connect_without_username_is_rejected() {
    // テスト項目: username なしの接続要求は 400 で拒否される
    // given (前提条件):
    let server = TestServer::start().await;

    for url in [
        server.ws_url(""),
        server.ws_url("").replace("?username=", ""),
    ] {
        // when (操作):
        let result = connect_async(url).await;

        // then (期待する結果):
        match result {
            Err(tungstenite::Error::Http(response)) => {
                assert_eq!(response.status(), 400);
            }
            Err(other) => panic!("expected HTTP 400, got {other:?}"),
            Ok(_) => panic!("expected HTTP 400, connection was accepted"),
        }
    }
}

#[tokio::test]
async fn test_join_chat_leave_flow() {
    // テスト項目: 参加・発言・退出が接続中のクライアントに配信される
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作): alice, bob の順に接続
    let mut alice = server.connect("alice").await;
    let joined = next_json(&mut alice).await;
    assert_eq!(joined["type"], "system");
    assert_eq!(joined["content"], "alice joined the chat");

    let mut bob = server.connect("bob").await;

    // then (期待する結果): 両方が bob の参加通知を受け取る
    assert_eq!(next_json(&mut alice).await["content"], "bob joined the chat");
    assert_eq!(next_json(&mut bob).await["content"], "bob joined the chat");

    // when (操作): alice が sender を偽って発言
    send_json(
        &mut alice,
        serde_json::json!({
            "type": "chat",
            "content": "hi",
            "sender": "eve",
            "timestamp": "1999-01-01T00:00:00Z",
        }),
    )
    .await;

    // then (期待する結果): sender と timestamp はサーバーが上書きする
    let received = next_json(&mut bob).await;
    assert_eq!(received["type"], "chat");
    assert_eq!(received["content"], "hi");
    assert_eq!(received["sender"], "alice");
    let timestamp = parse_rfc3339(received["timestamp"].as_str().unwrap()).unwrap();
    let year_2000 = parse_rfc3339("2000-01-01T00:00:00Z").unwrap();
    assert!(timestamp > year_2000);
    assert_eq!(next_json(&mut alice).await["sender"], "alice");

    // when (操作): alice が切断
    alice.close(None).await.unwrap();

    // then (期待する結果): bob に退出通知が届く
    let left = next_json(&mut bob).await;
    assert_eq!(left["type"], "system");
    assert_eq!(left["content"], "alice left the chat");
}

#[tokio::test]
async fn test_message_without_type_defaults_to_chat() {
    // テスト項目: type を省略したメッセージは chat として配信される
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect("alice").await;
    next_json(&mut alice).await;

    // when (操作):
    send_json(&mut alice, serde_json::json!({"content": "no type"})).await;

    // then (期待する結果):
    let received = next_json(&mut alice).await;
    assert_eq!(received["type"], "chat");
    assert_eq!(received["content"], "no type");
}

#[tokio::test]
async fn test_malformed_frame_disconnects_sender() {
    // テスト項目: 不正なフレームを送ったクライアントは切断され、他の参加者に退出が通知される
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect("alice").await;
    next_json(&mut alice).await;
    let mut bob = server.connect("bob").await;
    next_json(&mut alice).await;
    next_json(&mut bob).await;

    // when (操作):
    bob.send(tungstenite::Message::Text("not json".into()))
        .await
        .unwrap();

    // then (期待する結果):
    let left = next_json(&mut alice).await;
    assert_eq!(left["content"], "bob left the chat");
}

#[tokio::test]
async fn test_duplicate_usernames_are_allowed() {
    // テスト項目: 同じ username で複数接続でき、片方の切断でもう片方は残る
    // given (前提条件):
    let server = TestServer::start().await;
    let mut first = server.connect("alice").await;
    next_json(&mut first).await;
    let mut second = server.connect("alice").await;
    next_json(&mut first).await;
    next_json(&mut second).await;

    // when (操作):
    first.close(None).await.unwrap();

    // then (期待する結果):
    assert_eq!(next_json(&mut second).await["content"], "alice left the chat");
    send_json(&mut second, serde_json::json!({"type": "chat", "content": "still here"})).await;
    assert_eq!(next_json(&mut second).await["content"], "still here");
}

#[tokio::test]
async fn test_small_mailbox_does_not_block_other_clients() {
    // テスト項目: 読み取らないクライアントがいても他のクライアントへの配信は止まらない
    // given (前提条件): メールボックス容量 1
    let server = TestServer::start_with(ServerConfig {
        mailbox_capacity: 1,
        ..ServerConfig::default()
    })
    .await;
    let mut alice = server.connect("alice").await;
    next_json(&mut alice).await;
    let _stalled = server.connect("bob").await;
    next_json(&mut alice).await;

    // when (操作): bob が読み取らない間に alice が連続で発言
    for i in 0..20 {
        send_json(&mut alice, serde_json::json!({"content": format!("m{i}")})).await;
        // then (期待する結果): alice には毎回届く
        assert_eq!(next_json(&mut alice).await["content"], format!("m{i}"));
    }
}
