//! Telemetry payload model, RSSI classification, and display formatting.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Raw device-stat payload as it appears on the wire.
///
/// Every field is optional and defaults to `None`: a partial `stats` frame
/// decodes with holes, and the snapshot built from it replaces the previous
/// one wholesale. No field is ever inherited from an earlier payload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsPayload {
    /// Raw RSSI in dBm (negative).
    pub signal_strength: Option<f64>,
    /// Carrier frequency in Hz.
    pub frequency: Option<f64>,
    /// Channel bandwidth in Hz.
    pub bandwidth: Option<f64>,
    pub spreading_factor: Option<u32>,
    /// Milliseconds since the Unix epoch of the last device ping.
    pub last_ping: Option<i64>,
    pub messages_sent: Option<u64>,
    pub messages_received: Option<u64>,
    /// Delivery success rate in percent, as reported by the device.
    pub delivery_rate: Option<f64>,
    /// Average round-trip latency in milliseconds.
    pub avg_latency: Option<f64>,
}

/// Qualitative signal category derived from RSSI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl SignalQuality {
    /// Classify a raw RSSI reading in dBm.
    ///
    /// The threshold chain is strict (`>`, never `>=`): exactly -70 dBm is
    /// Good, exactly -85 is Fair, exactly -100 is Poor. NaN falls through
    /// every comparison and classifies Poor.
    #[must_use]
    pub fn from_rssi(rssi: f64) -> Self {
        if rssi > -70.0 {
            Self::Excellent
        } else if rssi > -85.0 {
            Self::Good
        } else if rssi > -100.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

impl fmt::Display for SignalQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        };
        write!(f, "{label}")
    }
}

/// Display-ready telemetry state.
///
/// Built from one [`StatsPayload`] and always replaced wholesale; fields the
/// payload omitted render as the `-` placeholder. The last-ping age is kept
/// as raw epoch millis so it can be rendered against the clock at display
/// time rather than at ingest time.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TelemetrySnapshot {
    pub signal_quality: SignalQuality,
    /// e.g. `915 MHz`.
    pub frequency: String,
    /// e.g. `125 kHz`.
    pub bandwidth: String,
    /// e.g. `SF7`.
    pub spreading_factor: String,
    pub last_ping_ms: Option<i64>,
    pub sent_messages: u64,
    pub received_messages: u64,
    /// Percentage as reported by the device, never locally computed.
    pub delivery_rate: f64,
    /// e.g. `42.3 ms`.
    pub latency: String,
}

impl Default for TelemetrySnapshot {
    /// State shown before the first `stats` frame arrives.
    fn default() -> Self {
        Self {
            signal_quality: SignalQuality::Good,
            frequency: placeholder(),
            bandwidth: placeholder(),
            spreading_factor: placeholder(),
            last_ping_ms: None,
            sent_messages: 0,
            received_messages: 0,
            delivery_rate: 0.0,
            latency: placeholder(),
        }
    }
}

impl TelemetrySnapshot {
    /// Transform a wire payload into display state.
    ///
    /// A payload with a missing `signalStrength` classifies Poor, matching
    /// the fall-through of the classification chain.
    #[must_use]
    pub fn from_payload(payload: &StatsPayload) -> Self {
        Self {
            signal_quality: payload
                .signal_strength
                .map_or(SignalQuality::Poor, SignalQuality::from_rssi),
            frequency: payload
                .frequency
                .map_or_else(placeholder, |hz| format!("{} MHz", hz / 1_000_000.0)),
            bandwidth: payload
                .bandwidth
                .map_or_else(placeholder, |hz| format!("{} kHz", hz / 1_000.0)),
            spreading_factor: payload
                .spreading_factor
                .map_or_else(placeholder, |sf| format!("SF{sf}")),
            last_ping_ms: payload.last_ping,
            sent_messages: payload.messages_sent.unwrap_or(0),
            received_messages: payload.messages_received.unwrap_or(0),
            delivery_rate: payload.delivery_rate.unwrap_or(0.0),
            latency: payload
                .avg_latency
                .map_or_else(placeholder, |ms| format!("{ms:.1} ms")),
        }
    }

    /// Seconds-ago label for the last ping, relative to `now_ms`.
    #[must_use]
    pub fn last_ping_age(&self, now_ms: i64) -> String {
        match self.last_ping_ms {
            Some(ping) => {
                let secs = ((now_ms.saturating_sub(ping)) as f64 / 1000.0).round() as i64;
                format!("{secs}s ago")
            }
            None => placeholder(),
        }
    }
}

fn placeholder() -> String {
    "-".to_owned()
}

#[cfg(test)]
#[path = "stats_test.rs"]
mod tests;
