//! Wire model and JSON codec for the LoRa gateway link.
//!
//! This crate owns the frame shapes exchanged over the WebSocket between the
//! gateway and its clients. Every frame is one JSON text message of the form
//! `{"type": <discriminator>, "data": <payload>}`. The `type` field routes
//! the frame; `data` carries either chat text or a telemetry payload.

mod stats;

pub use stats::{SignalQuality, StatsPayload, TelemetrySnapshot};

use serde::Serialize;
use serde_json::Value;

/// Error returned by [`decode_inbound`] and [`decode_outbound`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The frame was not valid JSON.
    #[error("malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The frame carried no string `type` discriminator.
    #[error("frame missing `type` discriminator")]
    MissingType,
    /// A recognized discriminator carried the wrong payload shape.
    #[error("invalid `{kind}` payload: {reason}")]
    InvalidPayload { kind: String, reason: String },
    /// A client-written frame used a discriminator the gateway does not serve.
    #[error("unknown frame type: {0}")]
    UnknownType(String),
}

/// One decoded gateway-to-client frame.
#[derive(Clone, Debug, PartialEq)]
pub enum Inbound {
    /// Chat text relayed from the remote device.
    Message(String),
    /// Telemetry payload. Always replaces prior state wholesale.
    Stats(StatsPayload),
    /// Unrecognized discriminator. The raw payload is kept so callers can
    /// log what they dropped.
    Unknown { kind: String, data: Value },
}

/// Decode one gateway-to-client text frame.
///
/// # Errors
///
/// Returns [`CodecError::Malformed`] for invalid JSON,
/// [`CodecError::MissingType`] when no string `type` field is present, and
/// [`CodecError::InvalidPayload`] when a recognized discriminator carries the
/// wrong payload shape. An unrecognized discriminator is not an error; it
/// decodes to [`Inbound::Unknown`] and the caller decides whether to drop it.
pub fn decode_inbound(text: &str) -> Result<Inbound, CodecError> {
    let value: Value = serde_json::from_str(text)?;
    let Some(kind) = value.get("type").and_then(Value::as_str) else {
        return Err(CodecError::MissingType);
    };
    let data = value.get("data").cloned().unwrap_or(Value::Null);

    match kind {
        "message" => {
            let Value::String(text) = data else {
                return Err(CodecError::InvalidPayload {
                    kind: "message".to_owned(),
                    reason: "data must be a string".to_owned(),
                });
            };
            Ok(Inbound::Message(text))
        }
        "stats" => {
            let payload = serde_json::from_value::<StatsPayload>(data).map_err(|error| {
                CodecError::InvalidPayload {
                    kind: "stats".to_owned(),
                    reason: error.to_string(),
                }
            })?;
            Ok(Inbound::Stats(payload))
        }
        _ => Ok(Inbound::Unknown {
            kind: kind.to_owned(),
            data,
        }),
    }
}

/// One client-to-gateway frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Outbound {
    /// Chat text destined for the remote device.
    Send(String),
}

/// Encode a client-to-gateway frame as JSON text.
#[must_use]
pub fn encode_outbound(frame: &Outbound) -> String {
    // Serializing a string-carrying enum cannot fail.
    serde_json::to_string(frame).unwrap_or_default()
}

/// Decode one client-written text frame on the gateway side.
///
/// Unlike [`decode_inbound`], the gateway rejects unknown discriminators
/// outright: clients have exactly one verb.
///
/// # Errors
///
/// Returns [`CodecError::Malformed`], [`CodecError::MissingType`],
/// [`CodecError::InvalidPayload`], or [`CodecError::UnknownType`].
pub fn decode_outbound(text: &str) -> Result<Outbound, CodecError> {
    let value: Value = serde_json::from_str(text)?;
    let Some(kind) = value.get("type").and_then(Value::as_str) else {
        return Err(CodecError::MissingType);
    };

    match kind {
        "send" => match value.get("data").and_then(Value::as_str) {
            Some(text) => Ok(Outbound::Send(text.to_owned())),
            None => Err(CodecError::InvalidPayload {
                kind: "send".to_owned(),
                reason: "data must be a string".to_owned(),
            }),
        },
        _ => Err(CodecError::UnknownType(kind.to_owned())),
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
