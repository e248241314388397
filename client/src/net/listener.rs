//! WebSocket transport listener.
//!
//! DESIGN
//! ======
//! One task owns the socket. Inbound text frames are decoded and pushed as
//! [`LinkEvent`]s into an mpsc channel, so consumers observe frames strictly
//! in arrival order with no overlapping processing. Outbound sends go through
//! [`LinkHandle`]; once the connection is gone they are silently dropped,
//! never queued, and no error reaches the user.
//!
//! LIFECYCLE
//! =========
//! One connection per [`connect`] call. A lost connection is reported as a
//! terminal [`LinkEvent::Closed`]; there is no reconnect.

use frames::{Inbound, Outbound, StatsPayload};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::warn;

/// Error returned by [`connect`].
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    #[error("websocket connect failed: {0}")]
    Connect(Box<tokio_tungstenite::tungstenite::Error>),
}

/// Typed event pushed by the listener task.
#[derive(Clone, Debug, PartialEq)]
pub enum LinkEvent {
    /// Inbound chat text from the remote device.
    Message(String),
    /// Telemetry payload, replacing whatever snapshot came before it.
    Stats(StatsPayload),
    /// The socket closed; no further events follow.
    Closed,
}

/// Writer half of an open link.
#[derive(Clone, Debug)]
pub struct LinkHandle {
    tx: mpsc::UnboundedSender<String>,
}

impl LinkHandle {
    /// Write one outbound chat frame.
    ///
    /// Returns `false` when the connection is gone. The text is dropped
    /// without queuing or error feedback, matching the original widget.
    pub fn send(&self, text: &str) -> bool {
        let json = frames::encode_outbound(&Outbound::Send(text.to_owned()));
        self.tx.send(json).is_ok()
    }
}

/// Connect to the gateway and spawn the reader and writer tasks.
///
/// Returns the writer handle and the ordered event stream.
///
/// # Errors
///
/// Returns [`ListenerError::Connect`] when the initial handshake fails.
pub async fn connect(url: &str) -> Result<(LinkHandle, mpsc::Receiver<LinkEvent>), ListenerError> {
    let (stream, _) = connect_async(url)
        .await
        .map_err(|error| ListenerError::Connect(Box::new(error)))?;
    let (mut sink, mut source) = stream.split();

    let (event_tx, event_rx) = mpsc::channel::<LinkEvent>(256);
    let (write_tx, mut write_rx) = mpsc::unbounded_channel::<String>();

    // Writer task: drains the handle's channel into the socket. Dropping the
    // last LinkHandle ends it; a dead socket ends it on the next send.
    tokio::spawn(async move {
        while let Some(json) = write_rx.recv().await {
            if sink.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    // Reader task: serializes all inbound frames into the event channel.
    tokio::spawn(async move {
        while let Some(message) = source.next().await {
            let Ok(message) = message else { break };
            match message {
                Message::Text(text) => {
                    if let Some(event) = event_from_text(&text) {
                        if event_tx.send(event).await.is_err() {
                            // Consumer hung up; nothing left to deliver to.
                            return;
                        }
                    }
                }
                Message::Close(_) => break,
                _ => {}
            }
        }
        let _ = event_tx.send(LinkEvent::Closed).await;
    });

    Ok((LinkHandle { tx: write_tx }, event_rx))
}

/// Decode one inbound text frame into an event.
///
/// Malformed frames and unknown discriminators are logged and dropped rather
/// than tearing down the listener.
fn event_from_text(text: &str) -> Option<LinkEvent> {
    match frames::decode_inbound(text) {
        Ok(Inbound::Message(text)) => Some(LinkEvent::Message(text)),
        Ok(Inbound::Stats(payload)) => Some(LinkEvent::Stats(payload)),
        Ok(Inbound::Unknown { kind, .. }) => {
            warn!(kind = %kind, "dropping frame with unknown discriminator");
            None
        }
        Err(error) => {
            warn!(error = %error, "dropping malformed inbound frame");
            None
        }
    }
}


#[cfg(test)]
#[path = "listener_test.rs"]
mod tests;
