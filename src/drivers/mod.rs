// src/drivers/mod.rs
// Telemetry ingestion: wire decoding, channel derivation and rolling history.
mod buffer;
pub mod channel;
pub mod derive;
pub mod error;
pub mod packet;
pub mod pipeline;
pub mod source;
pub mod store;
pub use channel::{Axis, ChannelId, SensorGroup, CHANNEL_COUNT};
pub use derive::{derive_channels, ChannelValues};
pub use error::TelemetryError;
pub use packet::{decode_packet, encode_packet, RawSample, PACKET_LEN};
pub use pipeline::{IngestStats, PumpOutcome, SignalPipeline};
pub use source::{ManualSource, SignalSource, SimulatedSource, UdpSource};
pub use store::{ChannelSink, ChannelStore, StoreFrame, DEFAULT_PLOT_LENGTH};
