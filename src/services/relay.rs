//! Connection registry and broadcast fan-out.
//!
//! DESIGN
//! ======
//! Each connection gets an opaque session id and a bounded mpsc sender; the
//! websocket writer drains the receiving end. Broadcasts are best-effort
//! `try_send`: a peer whose queue is full simply misses the frame, matching
//! the fire-and-forget relay model (no acks, no retry).
//!
//! Teardown compensates for pointer state: a session that disconnects while
//! hovering the canvas would otherwise pin the shared indicator red forever,
//! so `disconnect` emits the pointer-leave the client never sent.

use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

use crate::protocol::{ServerEvent, Welcome};
use crate::state::{AppState, RoomState};

/// Register a new peer. Returns the assigned session id and the welcome
/// event carrying the current indicator color and drawing-history replay.
pub async fn connect(state: &AppState, tx: mpsc::Sender<ServerEvent>) -> (Uuid, ServerEvent) {
    let session_id = Uuid::new_v4();
    let mut room = state.room.write().await;
    room.clients.insert(session_id, tx);

    let welcome = ServerEvent::Connected(Welcome {
        session_id,
        indicator_color: room.pointers.color(),
        history: room.history.replay().to_vec(),
    });

    info!(%session_id, peers = room.clients.len(), "client connected");
    (session_id, welcome)
}

/// Deregister a peer. If it was still hovering the canvas, emit the
/// compensating pointer-leave and rebroadcast the indicator.
pub async fn disconnect(state: &AppState, session_id: Uuid) {
    let mut room = state.room.write().await;
    room.clients.remove(&session_id);

    if room.pointer_active.remove(&session_id) {
        room.pointers.leave();
        let color = room.pointers.color();
        broadcast(&room, &ServerEvent::UpdateIndicatorColor(color), None);
    }

    info!(%session_id, peers = room.clients.len(), "client disconnected");
}

/// Send an event to every connected peer, optionally excluding one.
pub fn broadcast(room: &RoomState, event: &ServerEvent, exclude: Option<Uuid>) {
    for (session_id, tx) in &room.clients {
        if exclude == Some(*session_id) {
            continue;
        }
        // Best-effort: if a peer's channel is full, skip it.
        let _ = tx.try_send(event.clone());
    }
}

/// Send an event to a single peer, best-effort.
pub fn send_to(room: &RoomState, session_id: Uuid, event: &ServerEvent) {
    if let Some(tx) = room.clients.get(&session_id) {
        let _ = tx.try_send(event.clone());
    }
}

#[cfg(test)]
#[path = "relay_test.rs"]
mod tests;
