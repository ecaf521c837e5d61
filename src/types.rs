// src/types.rs
use std::net::SocketAddr;
use crate::drivers::IngestStats;

// Where samples come from
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum SourceMode {
    Network(SocketAddr),
    Simulation { rate_hz: f64 },
}

// Messages from the ingest worker to the GUI
#[derive(Clone, Debug)]
pub enum EngineMessage {
    Log(String),
    Stats(IngestStats),
    // Source exhausted, worker exited
    Stopped,
}
