//! WebSocket connection adapter.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use axum::extract::ws::{Message as WsMessage, WebSocket};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::sync::Mutex;

use crate::{
    domain::{Connection, ConnectionError, IncomingMessage, Message},
    infrastructure::dto::websocket::{decode_incoming, encode_message},
};

/// [`Connection`] over an upgraded axum WebSocket.
///
/// The socket is split so the reader pump and the writer pump never wait on
/// each other; each half has its own lock.
pub struct WebSocketConnection {
    sink: Mutex<SplitSink<WebSocket, WsMessage>>,
    stream: Mutex<SplitStream<WebSocket>>,
    closed: AtomicBool,
}

impl WebSocketConnection {
    pub fn new(socket: WebSocket) -> Self {
        let (sink, stream) = socket.split();
        Self {
            sink: Mutex::new(sink),
            stream: Mutex::new(stream),
            closed: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl Connection for WebSocketConnection {
    async fn receive(&self) -> Result<IncomingMessage, ConnectionError> {
        let mut stream = self.stream.lock().await;
        loop {
            let frame = match stream.next().await {
                Some(Ok(frame)) => frame,
                Some(Err(e)) => return Err(ConnectionError::Transport(e.to_string())),
                None => return Err(ConnectionError::Closed),
            };

            match frame {
                WsMessage::Text(text) => return decode_incoming(text.as_str().as_bytes()),
                WsMessage::Binary(bytes) => return decode_incoming(&bytes),
                WsMessage::Close(_) => return Err(ConnectionError::Closed),
                // Ping/pong is handled automatically by the WebSocket protocol
                WsMessage::Ping(_) | WsMessage::Pong(_) => {
                    tracing::trace!("Received control frame");
                }
            }
        }
    }

    async fn send(&self, message: &Message) -> Result<(), ConnectionError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(ConnectionError::Closed);
        }
        let json = encode_message(message)?;
        self.sink
            .lock()
            .await
            .send(WsMessage::Text(json.into()))
            .await
            .map_err(|e| ConnectionError::Transport(e.to_string()))
    }

    async fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        let mut sink = self.sink.lock().await;
        if let Err(e) = sink.send(WsMessage::Close(None)).await {
            tracing::debug!("Failed to send close frame: {}", e);
        }
        if let Err(e) = sink.close().await {
            tracing::debug!("Failed to close WebSocket sink: {}", e);
        }
    }
}
