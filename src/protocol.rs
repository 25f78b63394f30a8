//! Wire protocol — every event exchanged over the websocket.
//!
//! ARCHITECTURE
//! ============
//! Each frame is one JSON text message of the shape
//! `{"event": <name>, "data": <payload>}`, with `data` omitted for
//! payload-less events. Inbound frames deserialize into [`ClientEvent`] and
//! outbound frames serialize from [`ServerEvent`]; the websocket handler
//! dispatches on the variant and never re-parses payloads.
//!
//! Signaling and drawing payloads are opaque `serde_json::Value`s: the server
//! relays them byte-for-byte in meaning and never inspects their structure.
//! Chat and deletion payloads ARE typed, so a frame missing a required field
//! is rejected with an `error` event instead of relaying garbage.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::presence::IndicatorColor;

// =============================================================================
// PAYLOADS
// =============================================================================

/// A chat message. The server never stores it; `id` is client-generated
/// (typically a timestamp) and is the sole identity used for deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: i64,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_sticker: Option<bool>,
}

/// Deletion request: the id every peer drops, plus the artifact to clean up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMessage {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

/// Typing relay, enriched with the sender's session so receivers can tell
/// whose indicator to toggle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingStatus {
    pub is_typing: bool,
    pub user_id: Uuid,
}

/// First frame sent to a fresh connection: its assigned session id, the
/// current canvas indicator, and the active drawing history for replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Welcome {
    pub session_id: Uuid,
    pub indicator_color: IndicatorColor,
    pub history: Vec<Value>,
}

/// Typed rejection for malformed or unrecognized inbound frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
}

// =============================================================================
// CLIENT → SERVER
// =============================================================================

/// Everything a peer may send. Unknown event names fail deserialization and
/// are answered with [`ServerEvent::Error`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    // WebRTC signaling, relayed unmodified.
    Offer(Value),
    Answer(Value),
    Candidate(Value),
    // Chat.
    Message(ChatMessage),
    Typing(bool),
    DeleteMessage(DeleteMessage),
    AnimationTriggered(String),
    // Shared canvas.
    StartDrawing(Value),
    Draw(Value),
    StopDrawing,
    Undo,
    Redo,
    ClearCanvas,
    CanvasPointerEnter,
    CanvasPointerLeave,
}

// =============================================================================
// SERVER → CLIENT
// =============================================================================

/// Everything the server may emit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    Connected(Welcome),
    // Signaling relays.
    Offer(Value),
    Answer(Value),
    Candidate(Value),
    // Chat relays. `Message` goes to the other peers; `MessageSent` is the
    // echo confirming delivery to the sender's own UI.
    Message(ChatMessage),
    MessageSent(ChatMessage),
    UserTyping(TypingStatus),
    /// Bare message id; the artifact cleanup already ran (or failed quietly).
    DeleteMessage(i64),
    AnimationTriggered(String),
    // Canvas relays.
    StartDrawing(Value),
    Draw(Value),
    StopDrawing,
    Undo,
    Redo,
    ClearCanvas,
    UpdateIndicatorColor(IndicatorColor),
    Error(ErrorPayload),
}

impl ServerEvent {
    /// Short name for logging, matching the wire spelling.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Connected(_) => "connected",
            Self::Offer(_) => "offer",
            Self::Answer(_) => "answer",
            Self::Candidate(_) => "candidate",
            Self::Message(_) => "message",
            Self::MessageSent(_) => "messageSent",
            Self::UserTyping(_) => "userTyping",
            Self::DeleteMessage(_) => "deleteMessage",
            Self::AnimationTriggered(_) => "animationTriggered",
            Self::StartDrawing(_) => "startDrawing",
            Self::Draw(_) => "draw",
            Self::StopDrawing => "stopDrawing",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::ClearCanvas => "clearCanvas",
            Self::UpdateIndicatorColor(_) => "updateIndicatorColor",
            Self::Error(_) => "error",
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(ErrorPayload { message: message.into() })
    }
}

#[cfg(test)]
#[path = "protocol_test.rs"]
mod tests;
