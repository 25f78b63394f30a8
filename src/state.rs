//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into axum handlers via the `State` extractor. All
//! mutable relay state lives in one `RoomState` behind an `RwLock`: there is
//! exactly one broadcast domain per process (no rooms), one drawing history,
//! and one pointer counter. Every inbound event takes the write lock for its
//! mutation, which serializes history transitions without finer locking.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

use crate::history::DrawHistory;
use crate::presence::PointerCounter;
use crate::protocol::ServerEvent;

/// Outbound frames queued per connection before the socket writer drains them.
/// Sends beyond this are dropped (fire-and-forget relay, no backpressure).
pub const CLIENT_CHANNEL_CAPACITY: usize = 256;

// =============================================================================
// ROOM STATE
// =============================================================================

/// The single shared relay state: connected peers plus canvas state.
#[derive(Default)]
pub struct RoomState {
    /// Connected peers: session id -> sender for outgoing events.
    pub clients: HashMap<Uuid, mpsc::Sender<ServerEvent>>,
    /// Sessions that have entered the canvas and not yet left. Used to emit a
    /// compensating pointer-leave when such a session disconnects.
    pub pointer_active: HashSet<Uuid>,
    /// The one authoritative drawing history.
    pub history: DrawHistory,
    /// The one process-wide pointer counter.
    pub pointers: PointerCounter,
}

impl RoomState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state. Clone is required by axum — inner fields are
/// Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub room: Arc<RwLock<RoomState>>,
    /// Where uploaded attachments live; the attachment lifecycle never
    /// touches anything outside this directory.
    pub upload_dir: Arc<PathBuf>,
}

impl AppState {
    #[must_use]
    pub fn new(upload_dir: PathBuf) -> Self {
        Self { room: Arc::new(RwLock::new(RoomState::new())), upload_dir: Arc::new(upload_dir) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
