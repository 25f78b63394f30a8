use super::*;
use crate::presence::IndicatorColor;
use crate::state::{CLIENT_CHANNEL_CAPACITY, test_helpers};
use serde_json::json;

#[tokio::test]
async fn connect_assigns_unique_ids_and_registers_sender() {
    let state = test_helpers::test_app_state();
    let (tx_a, _rx_a) = mpsc::channel(CLIENT_CHANNEL_CAPACITY);
    let (tx_b, _rx_b) = mpsc::channel(CLIENT_CHANNEL_CAPACITY);

    let (id_a, _) = connect(&state, tx_a).await;
    let (id_b, _) = connect(&state, tx_b).await;

    assert_ne!(id_a, id_b);
    let room = state.room.read().await;
    assert_eq!(room.clients.len(), 2);
    assert!(room.clients.contains_key(&id_a));
    assert!(room.clients.contains_key(&id_b));
}

#[tokio::test]
async fn welcome_carries_replay_and_indicator() {
    let state = test_helpers::test_app_state();
    {
        let mut room = state.room.write().await;
        room.history.push(json!({"x": 1}));
        room.history.push(json!({"x": 2}));
        room.history.undo();
        room.pointers.enter();
    }

    let (tx, _rx) = mpsc::channel(CLIENT_CHANNEL_CAPACITY);
    let (session_id, welcome) = connect(&state, tx).await;
    let ServerEvent::Connected(welcome) = welcome else {
        panic!("expected connected event");
    };
    assert_eq!(welcome.session_id, session_id);
    assert_eq!(welcome.indicator_color, IndicatorColor::Red);
    // Undone entries are not replayed to late joiners.
    assert_eq!(welcome.history, vec![json!({"x": 1})]);
}

#[tokio::test]
async fn disconnect_removes_client() {
    let state = test_helpers::test_app_state();
    let (tx, _rx) = mpsc::channel(CLIENT_CHANNEL_CAPACITY);
    let (session_id, _) = connect(&state, tx).await;

    disconnect(&state, session_id).await;
    assert!(state.room.read().await.clients.is_empty());
}

#[tokio::test]
async fn disconnect_while_hovering_emits_compensating_leave() {
    let state = test_helpers::test_app_state();
    let (hoverer, _rx) = test_helpers::register_client(&state).await;
    let (_watcher, mut watcher_rx) = test_helpers::register_client(&state).await;
    {
        let mut room = state.room.write().await;
        room.pointer_active.insert(hoverer);
        room.pointers.enter();
    }

    disconnect(&state, hoverer).await;

    let room = state.room.read().await;
    assert_eq!(room.pointers.count(), 0);
    drop(room);
    assert_eq!(
        watcher_rx.try_recv().unwrap(),
        ServerEvent::UpdateIndicatorColor(IndicatorColor::Green)
    );
}

#[tokio::test]
async fn disconnect_without_hover_leaves_counter_alone() {
    let state = test_helpers::test_app_state();
    let (session_id, _rx) = test_helpers::register_client(&state).await;
    let (_watcher, mut watcher_rx) = test_helpers::register_client(&state).await;

    disconnect(&state, session_id).await;

    assert_eq!(state.room.read().await.pointers.count(), 0);
    assert!(watcher_rx.try_recv().is_err());
}

#[tokio::test]
async fn broadcast_excludes_requested_session() {
    let state = test_helpers::test_app_state();
    let (sender, mut sender_rx) = test_helpers::register_client(&state).await;
    let (_peer, mut peer_rx) = test_helpers::register_client(&state).await;

    let room = state.room.read().await;
    broadcast(&room, &ServerEvent::StopDrawing, Some(sender));
    drop(room);

    assert_eq!(peer_rx.try_recv().unwrap(), ServerEvent::StopDrawing);
    assert!(sender_rx.try_recv().is_err());
}

#[tokio::test]
async fn broadcast_without_exclusion_reaches_everyone() {
    let state = test_helpers::test_app_state();
    let (_a, mut rx_a) = test_helpers::register_client(&state).await;
    let (_b, mut rx_b) = test_helpers::register_client(&state).await;

    let room = state.room.read().await;
    broadcast(&room, &ServerEvent::ClearCanvas, None);
    drop(room);

    assert_eq!(rx_a.try_recv().unwrap(), ServerEvent::ClearCanvas);
    assert_eq!(rx_b.try_recv().unwrap(), ServerEvent::ClearCanvas);
}

#[tokio::test]
async fn full_channel_is_skipped_not_fatal() {
    let state = test_helpers::test_app_state();
    let session_id = uuid::Uuid::new_v4();
    let (tx, mut rx) = mpsc::channel(1);
    state.room.write().await.clients.insert(session_id, tx);

    let room = state.room.read().await;
    broadcast(&room, &ServerEvent::Undo, None);
    broadcast(&room, &ServerEvent::Redo, None);
    drop(room);

    // Only the first frame fit; the second was silently dropped.
    assert_eq!(rx.try_recv().unwrap(), ServerEvent::Undo);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn send_to_unknown_session_is_a_no_op() {
    let state = test_helpers::test_app_state();
    let room = state.room.read().await;
    send_to(&room, uuid::Uuid::new_v4(), &ServerEvent::Undo);
}
