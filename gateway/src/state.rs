//! Shared gateway state.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

/// Shared state injected into axum handlers via the `State` extractor.
/// Clone is required by axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    /// Connected clients: client id -> sender of outbound frame text.
    pub clients: Arc<RwLock<HashMap<Uuid, mpsc::Sender<String>>>>,
    /// Most recent stats payload, replayed to clients on connect.
    pub latest_stats: Arc<RwLock<Option<Value>>>,
    /// Outbound line writer into the device task.
    pub device_tx: mpsc::Sender<String>,
}

impl AppState {
    #[must_use]
    pub fn new(device_tx: mpsc::Sender<String>) -> Self {
        Self {
            clients: Arc::new(RwLock::new(HashMap::new())),
            latest_stats: Arc::new(RwLock::new(None)),
            device_tx,
        }
    }

    /// Fan one frame out to every connected client.
    ///
    /// A client whose channel is full or gone is skipped; its ws loop cleans
    /// up the registration on its own.
    pub async fn broadcast(&self, text: &str) {
        let clients = self.clients.read().await;
        for tx in clients.values() {
            let _ = tx.try_send(text.to_owned());
        }
    }
}
