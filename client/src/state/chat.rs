#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

/// Delivery status of a chat message.
///
/// `Sent` and `Read` exist in the model but no transition currently reaches
/// them: the gateway sends no delivery acks, so local messages stay
/// `Sending` forever and inbound messages are created `Delivered`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeliveryStatus {
    Sending,
    Sent,
    Delivered,
    Read,
}

/// A single chat message. Never mutated or removed once appended.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    /// Locally generated, time-based identifier.
    pub id: String,
    pub sender: String,
    pub content: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
    pub status: DeliveryStatus,
    pub is_me: bool,
}

/// Chat panel state: append-only message list plus the composer input.
///
/// Ordering is append order, oldest first; inbound frames and local sends
/// interleave in the order they are observed.
#[derive(Clone, Debug, Default)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub composer: String,
}

impl ChatState {
    /// Append an inbound message relayed by the gateway.
    pub fn recv_message(&mut self, content: String, now_ms: i64) {
        self.messages.push(ChatMessage {
            id: now_ms.to_string(),
            sender: "Remote".to_owned(),
            content,
            timestamp_ms: now_ms,
            status: DeliveryStatus::Delivered,
            is_me: false,
        });
    }

    /// Append the composer text as an outgoing message and clear the composer.
    ///
    /// Returns the drained text for the transport write, or `None` when the
    /// composer holds only whitespace (nothing is appended, nothing cleared).
    pub fn local_send(&mut self, now_ms: i64) -> Option<String> {
        if self.composer.trim().is_empty() {
            return None;
        }

        let content = std::mem::take(&mut self.composer);
        self.messages.push(ChatMessage {
            id: now_ms.to_string(),
            sender: "You".to_owned(),
            content: content.clone(),
            timestamp_ms: now_ms,
            status: DeliveryStatus::Sending,
            is_me: true,
        });
        Some(content)
    }
}
