//! Client-side link runtime for the LoRa gateway.
//!
//! Two halves, deliberately decoupled: `net` owns the WebSocket and turns
//! wire frames into typed events, `state` folds those events (plus local
//! user input) into presentation state. `session` wires them together.

pub mod net;
pub mod session;
pub mod state;
