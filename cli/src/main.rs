//! Terminal chat client for the LoRa gateway.
//!
//! Connects to the gateway's WebSocket, prints inbound chat messages, keeps
//! the telemetry snapshot current, and forwards stdin lines as sends.
//! `/stats` prints the snapshot; the process exits when the socket closes.

use clap::Parser;
use client::net::listener::{self, LinkEvent, ListenerError};
use client::session::{Session, now_ms};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Connect(#[from] ListenerError),
}

#[derive(Parser, Debug)]
#[command(name = "lora-chat", about = "Chat and telemetry client for the LoRa gateway")]
struct Cli {
    /// Gateway WebSocket endpoint.
    #[arg(long, env = "LORA_GATEWAY_URL", default_value = "ws://localhost:8765")]
    url: String,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let (handle, mut events) = listener::connect(&cli.url).await?;
    let mut session = Session::new();
    println!("connected to {} — type to chat, /stats for telemetry", cli.url);

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                session.apply(&event, now_ms());
                match event {
                    LinkEvent::Message(text) => println!("[Remote] {text}"),
                    // Stats update silently; `/stats` renders on demand.
                    LinkEvent::Stats(_) => {}
                    LinkEvent::Closed => {
                        println!("connection closed");
                        break;
                    }
                }
            }
            line = stdin.next_line() => {
                let Ok(Some(line)) = line else { break };
                if line.trim() == "/stats" {
                    print_snapshot(&session);
                    continue;
                }
                session.chat.composer = line;
                session.send(&handle, now_ms());
            }
        }
    }

    Ok(())
}

fn print_snapshot(session: &Session) {
    let snap = &session.telemetry.snapshot;
    println!(
        "signal {} | freq {} | bw {} | {} | ping {} | sent {} recv {} | delivery {}% | latency {}",
        snap.signal_quality,
        snap.frequency,
        snap.bandwidth,
        snap.spreading_factor,
        snap.last_ping_age(now_ms()),
        snap.sent_messages,
        snap.received_messages,
        snap.delivery_rate,
        snap.latency,
    );
}
