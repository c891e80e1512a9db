//! WebSocket message DTOs for the chat hub.
//!
//! One JSON object per frame:
//! `{"type":"chat","content":"hi","sender":"alice","timestamp":"2025-01-01T00:00:00.000Z"}`

use serde::{Deserialize, Serialize};

use crate::domain::{
    ConnectionError, IncomingMessage, Message, MessageKind, ValueObjectError,
};

/// Message type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Chat,
    System,
    Status,
}

impl From<MessageKind> for MessageType {
    fn from(kind: MessageKind) -> Self {
        match kind {
            MessageKind::Chat => MessageType::Chat,
            MessageKind::System => MessageType::System,
            MessageKind::Status => MessageType::Status,
        }
    }
}

/// Message as sent to clients and returned by the history endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDto {
    pub r#type: MessageType,
    pub content: String,
    pub sender: String,
    pub timestamp: String, // RFC 3339
}

impl From<&Message> for MessageDto {
    fn from(message: &Message) -> Self {
        Self {
            r#type: message.kind().into(),
            content: message.content().to_string(),
            sender: message.sender().to_string(),
            timestamp: message.timestamp().to_rfc3339(),
        }
    }
}

/// Message as received from clients.
///
/// `sender` and `timestamp` are accepted on the wire but never read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncomingMessageDto {
    #[serde(default)]
    pub r#type: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl TryFrom<IncomingMessageDto> for IncomingMessage {
    type Error = ValueObjectError;

    fn try_from(dto: IncomingMessageDto) -> Result<Self, Self::Error> {
        let kind = match dto.r#type.as_deref() {
            None | Some("") => None,
            Some(value) => Some(MessageKind::try_from(value)?),
        };
        Ok(IncomingMessage::new(kind, dto.content.unwrap_or_default()))
    }
}

/// Decode one inbound frame.
pub fn decode_incoming(payload: &[u8]) -> Result<IncomingMessage, ConnectionError> {
    let dto: IncomingMessageDto = serde_json::from_slice(payload)
        .map_err(|e| ConnectionError::MalformedPayload(e.to_string()))?;
    IncomingMessage::try_from(dto).map_err(|e| ConnectionError::MalformedPayload(e.to_string()))
}

/// Encode one outbound frame.
pub fn encode_message(message: &Message) -> Result<String, ConnectionError> {
    serde_json::to_string(&MessageDto::from(message))
        .map_err(|e| ConnectionError::Transport(e.to_string()))
}
