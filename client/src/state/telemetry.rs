#[cfg(test)]
#[path = "telemetry_test.rs"]
mod tests;

use frames::{StatsPayload, TelemetrySnapshot};

/// Most-recent-wins telemetry state.
#[derive(Clone, Debug, Default)]
pub struct TelemetryState {
    pub snapshot: TelemetrySnapshot,
}

impl TelemetryState {
    /// Replace the snapshot wholesale.
    ///
    /// No field-level merge: anything the payload omits resets to its empty
    /// placeholder, never inherited from the previous snapshot.
    pub fn apply_stats(&mut self, payload: &StatsPayload) {
        self.snapshot = TelemetrySnapshot::from_payload(payload);
    }
}
