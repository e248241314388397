//! Device line protocol: incremental parsing and device backends.
//!
//! DESIGN
//! ======
//! The radio firmware emits text lines of two shapes: `[MSG] <payload>` for
//! relayed chat text and `[STATS] {json}` for telemetry. Outbound chat is
//! written back as one newline-terminated line. Each backend runs as its own
//! task (or thread for blocking serial I/O) and talks to the rest of the
//! gateway through a [`DeviceLink`] channel pair, so the WebSocket side never
//! touches hardware directly.

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// One parsed device line.
#[derive(Clone, Debug, PartialEq)]
pub enum DeviceLine {
    /// Chat payload relayed by the radio.
    Msg(String),
    /// Raw telemetry JSON as emitted by the firmware.
    Stats(Value),
}

/// Channel pair connecting a device backend to the gateway.
pub struct DeviceLink {
    /// Parsed lines from the device.
    pub lines: mpsc::Receiver<DeviceLine>,
    /// Newline-terminated lines to write to the device.
    pub writer: mpsc::Sender<String>,
}

// =============================================================================
// LINE PARSER
// =============================================================================

/// Incremental parser over the device byte stream.
///
/// Keeps a carry buffer so lines split across reads reassemble, skips stats
/// lines whose JSON fails to parse, and deduplicates repeated `[MSG]`
/// payloads (the radio re-emits a message on every retransmission).
#[derive(Debug, Default)]
pub struct LineParser {
    buffer: String,
    recent: Vec<String>,
}

/// Dedup list cap; on overflow the oldest half is discarded.
const RECENT_CAP: usize = 100;
const RECENT_KEEP: usize = 50;

impl LineParser {
    /// Feed raw text from the device; returns every fully parsed line.
    pub fn push(&mut self, chunk: &str) -> Vec<DeviceLine> {
        self.buffer.push_str(chunk);

        let mut out = Vec::new();
        while let Some(newline) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=newline).collect();
            if let Some(parsed) = self.parse_line(line.trim_end_matches(['\n', '\r'])) {
                out.push(parsed);
            }
        }
        out
    }

    fn parse_line(&mut self, line: &str) -> Option<DeviceLine> {
        if let Some(start) = line.find("[MSG]") {
            let payload = line[start + "[MSG]".len()..].trim();
            if payload.is_empty() || self.seen_before(payload) {
                return None;
            }
            return Some(DeviceLine::Msg(payload.to_owned()));
        }

        if let Some(start) = line.find("[STATS]") {
            let rest = &line[start + "[STATS]".len()..];
            let json_start = rest.find('{')?;
            match serde_json::from_str::<Value>(&rest[json_start..]) {
                Ok(stats) => return Some(DeviceLine::Stats(stats)),
                Err(error) => {
                    warn!(error = %error, line, "skipping unparseable stats line");
                    return None;
                }
            }
        }

        // Anything else is boot noise or debug output.
        None
    }

    fn seen_before(&mut self, payload: &str) -> bool {
        if self.recent.iter().any(|seen| seen == payload) {
            return true;
        }
        self.recent.push(payload.to_owned());
        if self.recent.len() > RECENT_CAP {
            let overflow = self.recent.len() - RECENT_KEEP;
            self.recent.drain(..overflow);
        }
        false
    }
}

// =============================================================================
// SIMULATED DEVICE
// =============================================================================

/// Spawn a simulated radio: randomized stats once a second, the occasional
/// beacon message, and an echo for every outbound send. Lines pass through
/// the same [`LineParser`] a real device would.
#[must_use]
pub fn spawn_simulated() -> DeviceLink {
    let (line_tx, lines) = mpsc::channel::<DeviceLine>(64);
    let (writer, mut write_rx) = mpsc::channel::<String>(64);

    tokio::spawn(async move {
        let mut parser = LineParser::default();
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(1));
        let mut ticks: u64 = 0;
        let mut sent: u64 = 0;
        let mut received: u64 = 0;

        loop {
            let chunk = tokio::select! {
                _ = interval.tick() => {
                    ticks += 1;
                    if ticks % 15 == 0 {
                        received += 1;
                        format!("[MSG] beacon #{received} from the field\n")
                    } else {
                        stats_line(sent, received)
                    }
                }
                outbound = write_rx.recv() => {
                    let Some(outbound) = outbound else { break };
                    let text = outbound.trim_end().to_owned();
                    info!(text = %text, "simulated device accepted send");
                    sent += 1;
                    received += 1;
                    format!("[MSG] echo: {text}\n")
                }
            };

            for line in parser.push(&chunk) {
                if line_tx.send(line).await.is_err() {
                    return;
                }
            }
        }
    });

    DeviceLink { lines, writer }
}

fn stats_line(sent: u64, received: u64) -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    let stats = serde_json::json!({
        "signalStrength": rng.random_range(-110.0..-50.0_f64).round(),
        "frequency": 915_000_000.0,
        "bandwidth": 125_000.0,
        "spreadingFactor": 7,
        "lastPing": now_ms(),
        "messagesSent": sent,
        "messagesReceived": received,
        "deliveryRate": rng.random_range(80.0..100.0_f64).round(),
        "avgLatency": rng.random_range(20.0..80.0_f64),
    });
    format!("[STATS] {stats}\n")
}

fn now_ms() -> i64 {
    let Ok(dur) = std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

// =============================================================================
// SERIAL DEVICE (feature = "serial")
// =============================================================================

/// Spawn reader/writer threads over a real serial port.
///
/// Blocking I/O stays on dedicated threads; lines cross into async land via
/// the same channels the simulator uses.
///
/// # Errors
///
/// Returns the underlying [`serialport::Error`] when the port cannot be
/// opened or cloned.
#[cfg(feature = "serial")]
pub fn spawn_serial(path: &str, baud: u32) -> Result<DeviceLink, serialport::Error> {
    use std::io::{Read, Write};

    let mut port = serialport::new(path, baud)
        .timeout(std::time::Duration::from_millis(100))
        .open()?;
    let mut reader = port.try_clone()?;

    let (line_tx, lines) = mpsc::channel::<DeviceLine>(64);
    let (writer, mut write_rx) = mpsc::channel::<String>(64);

    std::thread::spawn(move || {
        let mut parser = LineParser::default();
        let mut buf = [0_u8; 512];
        loop {
            match reader.read(&mut buf) {
                Ok(0) => {}
                Ok(n) => {
                    let chunk = String::from_utf8_lossy(&buf[..n]).into_owned();
                    for line in parser.push(&chunk) {
                        if line_tx.blocking_send(line).is_err() {
                            return;
                        }
                    }
                }
                Err(error) if error.kind() == std::io::ErrorKind::TimedOut => {}
                Err(error) => {
                    warn!(error = %error, "serial read failed; device stream ending");
                    return;
                }
            }
        }
    });

    std::thread::spawn(move || {
        while let Some(text) = write_rx.blocking_recv() {
            if port.write_all(text.as_bytes()).is_err() || port.flush().is_err() {
                warn!("serial write failed; dropping outbound line");
                return;
            }
        }
    });

    Ok(DeviceLink { lines, writer })
}

#[cfg(test)]
#[path = "device_test.rs"]
mod tests;
