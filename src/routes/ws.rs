//! WebSocket handler — event relay between connected peers.
//!
//! DESIGN
//! ======
//! On upgrade, the connection is registered with the relay service and sent a
//! `connected` welcome (session id, indicator color, history replay), then the
//! handler enters a `select!` loop:
//! - Incoming client frames → parse + route by event variant
//! - Relayed events from peers → forward to this client's socket
//!
//! `route` is pure business logic over the locked room state: it mutates the
//! drawing history / pointer counter and returns an [`Outcome`]. The dispatch
//! layer owns all outbound concerns — who receives what is decided in exactly
//! one place.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade → register → send `connected`
//! 2. Client frames → route → apply Outcome (echo / broadcast)
//! 3. Close → deregister (emits compensating pointer-leave if needed)

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::protocol::{ClientEvent, ServerEvent, TypingStatus};
use crate::services::{attachment, relay};
use crate::state::{AppState, CLIENT_CHANNEL_CAPACITY, RoomState};

// =============================================================================
// OUTCOME
// =============================================================================

/// Result returned by `route`. The dispatch layer uses this to decide who
/// receives what — routing logic never sends frames directly.
enum Outcome {
    /// Relay to every peer except the sender.
    ToOthers(ServerEvent),
    /// Relay to every peer including the sender.
    ToAll(ServerEvent),
    /// Echo one event back to the sender and relay another to the rest.
    EchoAndOthers { echo: ServerEvent, others: ServerEvent },
    /// Drop the event entirely (illegal undo/redo transitions).
    Silent,
}

// =============================================================================
// UPGRADE
// =============================================================================

pub async fn handle_ws(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_ws(socket, state))
}

// =============================================================================
// CONNECTION
// =============================================================================

async fn run_ws(mut socket: WebSocket, state: AppState) {
    // Per-connection channel for events relayed from other peers.
    let (client_tx, mut client_rx) = mpsc::channel::<ServerEvent>(CLIENT_CHANNEL_CAPACITY);

    let (session_id, welcome) = relay::connect(&state, client_tx).await;
    if send_event(&mut socket, &welcome).await.is_err() {
        relay::disconnect(&state, session_id).await;
        return;
    }

    loop {
        tokio::select! {
            msg = socket.recv() => {
                let Some(Ok(msg)) = msg else { break };
                match msg {
                    Message::Text(text) => {
                        process_inbound_text(&state, session_id, &text).await;
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            Some(event) = client_rx.recv() => {
                if send_event(&mut socket, &event).await.is_err() {
                    break;
                }
            }
        }
    }

    relay::disconnect(&state, session_id).await;
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Parse one inbound text frame, route it, and apply the outcome.
///
/// Separated from the socket loop so tests can drive dispatch end-to-end
/// against registered mpsc receivers without a live websocket.
async fn process_inbound_text(state: &AppState, session_id: Uuid, text: &str) {
    let event: ClientEvent = match serde_json::from_str(text) {
        Ok(event) => event,
        Err(e) => {
            warn!(%session_id, error = %e, "ws: invalid inbound frame");
            let room = state.room.read().await;
            relay::send_to(&room, session_id, &ServerEvent::error(format!("invalid frame: {e}")));
            return;
        }
    };

    // Artifact cleanup is a side effect of deletion, fully decoupled from the
    // relay: spawned fire-and-forget, outcome never blocks the broadcast.
    if let ClientEvent::DeleteMessage(del) = &event {
        if let Some(file_path) = &del.file_path {
            attachment::remove_fire_and_forget(state, file_path);
        }
    }

    let mut room = state.room.write().await;
    match route(&mut room, session_id, event) {
        Outcome::ToOthers(event) => relay::broadcast(&room, &event, Some(session_id)),
        Outcome::ToAll(event) => relay::broadcast(&room, &event, None),
        Outcome::EchoAndOthers { echo, others } => {
            relay::broadcast(&room, &others, Some(session_id));
            relay::send_to(&room, session_id, &echo);
        }
        Outcome::Silent => {}
    }
}

/// The routing table. Mutations happen here, under the caller's write lock,
/// so history and pointer transitions are serialized per inbound event.
fn route(room: &mut RoomState, session_id: Uuid, event: ClientEvent) -> Outcome {
    match event {
        // WebRTC signaling: pass through to the other peers unmodified.
        ClientEvent::Offer(payload) => Outcome::ToOthers(ServerEvent::Offer(payload)),
        ClientEvent::Answer(payload) => Outcome::ToOthers(ServerEvent::Answer(payload)),
        ClientEvent::Candidate(payload) => Outcome::ToOthers(ServerEvent::Candidate(payload)),

        // Chat: peers get the message, the sender gets a delivery echo.
        ClientEvent::Message(msg) => Outcome::EchoAndOthers {
            echo: ServerEvent::MessageSent(msg.clone()),
            others: ServerEvent::Message(msg),
        },
        ClientEvent::Typing(is_typing) => {
            Outcome::ToOthers(ServerEvent::UserTyping(TypingStatus { is_typing, user_id: session_id }))
        }
        ClientEvent::DeleteMessage(del) => Outcome::ToOthers(ServerEvent::DeleteMessage(del.id)),
        ClientEvent::AnimationTriggered(url) => Outcome::ToAll(ServerEvent::AnimationTriggered(url)),

        // Shared canvas.
        ClientEvent::StartDrawing(payload) => Outcome::ToOthers(ServerEvent::StartDrawing(payload)),
        ClientEvent::Draw(payload) => {
            room.history.push(payload.clone());
            Outcome::ToAll(ServerEvent::Draw(payload))
        }
        ClientEvent::StopDrawing => Outcome::ToAll(ServerEvent::StopDrawing),
        ClientEvent::Undo => {
            if room.history.undo() {
                Outcome::ToAll(ServerEvent::Undo)
            } else {
                debug!(%session_id, "ws: illegal undo dropped");
                Outcome::Silent
            }
        }
        ClientEvent::Redo => {
            if room.history.redo() {
                Outcome::ToAll(ServerEvent::Redo)
            } else {
                debug!(%session_id, "ws: illegal redo dropped");
                Outcome::Silent
            }
        }
        ClientEvent::ClearCanvas => {
            room.history.clear();
            Outcome::ToAll(ServerEvent::ClearCanvas)
        }

        // Presence: the counter moves, everyone sees the derived color.
        ClientEvent::CanvasPointerEnter => {
            room.pointer_active.insert(session_id);
            room.pointers.enter();
            Outcome::ToAll(ServerEvent::UpdateIndicatorColor(room.pointers.color()))
        }
        ClientEvent::CanvasPointerLeave => {
            room.pointer_active.remove(&session_id);
            room.pointers.leave();
            Outcome::ToAll(ServerEvent::UpdateIndicatorColor(room.pointers.color()))
        }
    }
}

// =============================================================================
// HELPERS
// =============================================================================

async fn send_event(socket: &mut WebSocket, event: &ServerEvent) -> Result<(), ()> {
    let json = match serde_json::to_string(event) {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, event = event.name(), "ws: failed to serialize event");
            return Err(());
        }
    };
    socket.send(Message::Text(json.into())).await.map_err(|_| ())
}

#[cfg(test)]
#[path = "ws_test.rs"]
mod tests;
