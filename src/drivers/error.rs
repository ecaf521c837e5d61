use std::io;
use std::net::SocketAddr;
use thiserror::Error;
use crate::drivers::ChannelId;
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("malformed packet: expected {} bytes, got {len}", crate::drivers::PACKET_LEN)]
    MalformedPacket { len: usize },
    #[error("incomplete update: missing channels {missing:?}")]
    IncompleteUpdate { missing: Vec<ChannelId> },
    #[error("plot length must be at least 1, got {0}")]
    InvalidPlotLength(usize),
    #[error("sample rate {0} Hz has no representable period")]
    InvalidRate(f64),
    #[error("failed to bind UDP listener on {addr}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("failed to receive datagram")]
    Receive(#[source] io::Error),
}
