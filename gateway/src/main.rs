//! LoRa serial-to-WebSocket gateway.
//!
//! Bridges one radio device to any number of WebSocket chat clients: device
//! `[MSG]`/`[STATS]` lines fan out as JSON frames, client `send` frames are
//! written back to the device. Runs against a simulated device by default;
//! build with `--features serial` and set `DEVICE_PORT` for real hardware.

mod device;
mod state;
mod ws;

use tracing::{info, warn};

use crate::device::DeviceLine;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("GATEWAY_PORT")
        .unwrap_or_else(|_| "8765".into())
        .parse()
        .expect("invalid GATEWAY_PORT");

    let link = spawn_device();
    let state = state::AppState::new(link.writer.clone());

    // Pump device lines into client broadcasts.
    let pump_state = state.clone();
    let mut lines = link.lines;
    tokio::spawn(async move {
        while let Some(line) = lines.recv().await {
            let frame = match line {
                DeviceLine::Msg(text) => {
                    info!(text = %text, "device message");
                    serde_json::json!({"type": "message", "data": text})
                }
                DeviceLine::Stats(stats) => {
                    *pump_state.latest_stats.write().await = Some(stats.clone());
                    serde_json::json!({"type": "stats", "data": stats})
                }
            };
            pump_state.broadcast(&frame.to_string()).await;
        }
        warn!("device stream ended; clients will see no further frames");
    });

    let app = ws::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    info!(%port, "gateway listening");
    axum::serve(listener, app).await.expect("server failed");
}

#[cfg(feature = "serial")]
fn spawn_device() -> device::DeviceLink {
    let path = std::env::var("DEVICE_PORT").unwrap_or_else(|_| "/dev/ttyUSB0".into());
    let baud: u32 = std::env::var("DEVICE_BAUD")
        .unwrap_or_else(|_| "115200".into())
        .parse()
        .expect("invalid DEVICE_BAUD");

    info!(%path, %baud, "opening serial device");
    device::spawn_serial(&path, baud).expect("failed to open serial device")
}

#[cfg(not(feature = "serial"))]
fn spawn_device() -> device::DeviceLink {
    info!("no serial feature; running simulated device");
    device::spawn_simulated()
}
