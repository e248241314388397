//! Session glue: one listener feeding the two presentation states.
//!
//! The listener task delivers [`LinkEvent`]s strictly in arrival order;
//! [`Session::apply`] folds them into state synchronously and totally (no
//! transition fails). Local sends append to the chat list first and only
//! then attempt the network write, so a disconnected send still appears in
//! the conversation with no error surfaced.

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use std::time::{SystemTime, UNIX_EPOCH};

use crate::net::listener::{LinkEvent, LinkHandle};
use crate::state::chat::ChatState;
use crate::state::telemetry::TelemetryState;

/// Wall clock in milliseconds since the Unix epoch.
#[must_use]
pub fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

/// Presentation state derived from listener events plus local input.
#[derive(Debug)]
pub struct Session {
    pub chat: ChatState,
    pub telemetry: TelemetryState,
    pub connected: bool,
}

impl Session {
    /// A fresh session over a just-opened connection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            chat: ChatState::default(),
            telemetry: TelemetryState::default(),
            connected: true,
        }
    }

    /// Fold one listener event into presentation state.
    pub fn apply(&mut self, event: &LinkEvent, now_ms: i64) {
        match event {
            LinkEvent::Message(text) => self.chat.recv_message(text.clone(), now_ms),
            LinkEvent::Stats(payload) => self.telemetry.apply_stats(payload),
            LinkEvent::Closed => self.connected = false,
        }
    }

    /// Send the composer contents: append locally, then attempt the network
    /// write. Once disconnected the write is skipped silently; the message
    /// still lands in the local list.
    pub fn send(&mut self, handle: &LinkHandle, now_ms: i64) {
        if let Some(text) = self.chat.local_send(now_ms) {
            if self.connected {
                let _ = handle.send(&text);
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
