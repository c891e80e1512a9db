//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::{net::SocketAddr, time::Duration};

use futures_util::{SinkExt, StreamExt};
use hearth_server::{ServerConfig, serve};
use tokio::{net::TcpListener, sync::oneshot};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message as WsMessage,
};

pub type WsClient = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Server running in-process on an ephemeral port. Shut down on drop.
pub struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(ServerConfig::default()).await
    }

    pub async fn start_with(config: ServerConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let (tx, rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let shutdown = async {
                let _ = rx.await;
            };
            if let Err(e) = serve(listener, config, shutdown).await {
                eprintln!("test server error: {e}");
            }
        });

        Self {
            addr,
            shutdown: Some(tx),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self, username: &str) -> String {
        format!("ws://{}/ws?username={}", self.addr, username)
    }

    pub async fn connect(&self, username: &str) -> WsClient {
        let (ws, _) = connect_async(self.ws_url(username))
            .await
            .expect("Failed to connect");
        ws
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Receive the next JSON text frame, skipping control frames.
pub async fn next_json(ws: &mut WsClient) -> serde_json::Value {
    loop {
        let frame = tokio::time::timeout(Duration::from_secs(5), ws.next())
            .await
            .expect("Timed out waiting for frame")
            .expect("Stream ended")
            .expect("WebSocket error");
        match frame {
            WsMessage::Text(text) => {
                return serde_json::from_str(text.as_str()).expect("Invalid JSON frame");
            }
            WsMessage::Ping(_) | WsMessage::Pong(_) => continue,
            other => panic!("Unexpected frame: {other:?}"),
        }
    }
}

pub async fn send_json(ws: &mut WsClient, value: serde_json::Value) {
    ws.send(WsMessage::Text(value.to_string().into()))
        .await
        .expect("Failed to send frame");
}
