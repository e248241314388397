//! WebSocket route: frame fan-out and send forwarding.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade → register a per-client channel in [`AppState`]
//! 2. Replay the last stats frame so the client has telemetry immediately
//! 3. `select!` loop: device broadcasts out, client `send` frames in
//! 4. Close → deregister
//!
//! Clients have exactly one verb, `{"type":"send","data":<text>}`; anything
//! else is logged and dropped without a reply, and the sender never learns
//! whether its text reached the radio.

use axum::Router;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use axum::routing::get;
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::state::AppState;
use frames::Outbound;

pub fn app(state: AppState) -> Router {
    Router::new().route("/", get(handle_ws)).with_state(state)
}

async fn handle_ws(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_ws(socket, state))
}

async fn run_ws(mut socket: WebSocket, state: AppState) {
    let client_id = Uuid::new_v4();
    let (client_tx, mut client_rx) = mpsc::channel::<String>(256);
    state.clients.write().await.insert(client_id, client_tx);
    info!(%client_id, "ws: client connected");

    // Replay the most recent telemetry so a fresh client is not blank until
    // the next device tick.
    let replay = state.latest_stats.read().await.clone();
    if let Some(stats) = replay {
        let frame = serde_json::json!({"type": "stats", "data": stats}).to_string();
        if socket.send(Message::Text(frame.into())).await.is_err() {
            state.clients.write().await.remove(&client_id);
            return;
        }
    }

    loop {
        tokio::select! {
            msg = socket.recv() => {
                let Some(Ok(msg)) = msg else { break };
                match msg {
                    Message::Text(text) => handle_inbound(&state, client_id, &text).await,
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            frame = client_rx.recv() => {
                let Some(frame) = frame else { break };
                if socket.send(Message::Text(frame.into())).await.is_err() {
                    break;
                }
            }
        }
    }

    state.clients.write().await.remove(&client_id);
    info!(%client_id, "ws: client disconnected");
}

/// Handle one inbound client frame. Only `send` is honored; the text is
/// trimmed and blank sends are dropped before they reach the device.
async fn handle_inbound(state: &AppState, client_id: Uuid, text: &str) {
    match frames::decode_outbound(text) {
        Ok(Outbound::Send(message)) => {
            let trimmed = message.trim();
            if trimmed.is_empty() {
                return;
            }
            info!(%client_id, text = %trimmed, "ws: forwarding send to device");
            if state.device_tx.send(format!("{trimmed}\n")).await.is_err() {
                warn!(%client_id, "device writer gone; dropping send");
            }
        }
        Err(error) => {
            warn!(%client_id, error = %error, "ws: dropping invalid client frame");
        }
    }
}

#[cfg(test)]
#[path = "ws_test.rs"]
mod tests;
