pub mod chat;
pub mod telemetry;
