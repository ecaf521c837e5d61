use std::sync::Arc;
use crate::drivers::derive::derive_channels;
use crate::drivers::error::TelemetryError;
use crate::drivers::packet::decode_packet;
use crate::drivers::source::SignalSource;
use crate::drivers::store::ChannelStore;
/// Receive buffer size. Anything longer than a packet is rejected anyway;
/// the slack just lets us report the real length of slightly oversized datagrams.
const MAX_DATAGRAM_SIZE: usize = 512;
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub accepted: u64,
    pub malformed: u64,
    pub receive_errors: u64,
}
#[derive(Debug)]
pub enum PumpOutcome {
    Applied { generation: u64 },
    Dropped(TelemetryError),
}
/// Receives datagrams and folds them into the shared store, one at a time.
pub struct SignalPipeline<S: SignalSource> {
    source: S,
    store: Arc<ChannelStore>,
    stats: IngestStats,
    recv_buf: [u8; MAX_DATAGRAM_SIZE],
}
impl<S: SignalSource> SignalPipeline<S> {
    pub fn new(source: S, store: Arc<ChannelStore>) -> Self {
        Self {
            source,
            store,
            stats: IngestStats::default(),
            recv_buf: [0u8; MAX_DATAGRAM_SIZE],
        }
    }
    pub fn store(&self) -> &Arc<ChannelStore> {
        &self.store
    }
    pub fn stats(&self) -> IngestStats {
        self.stats
    }
    /// Decode, derive and apply one datagram. A malformed datagram leaves the
    /// store untouched.
    pub fn ingest(&mut self, datagram: &[u8]) -> Result<u64, TelemetryError> {
        apply(&self.store, &mut self.stats, datagram)
    }
    /// Block for the next datagram and apply it. `Ok(None)` once the source is exhausted.
    pub fn pump_once(&mut self) -> Result<Option<PumpOutcome>, TelemetryError> {
        let len = match self.source.recv_datagram(&mut self.recv_buf) {
            Ok(Some(len)) => len,
            Ok(None) => return Ok(None),
            Err(err) => {
                self.stats.receive_errors += 1;
                return Err(err);
            }
        };
        let outcome = match apply(&self.store, &mut self.stats, &self.recv_buf[..len]) {
            Ok(generation) => PumpOutcome::Applied { generation },
            Err(err @ TelemetryError::MalformedPacket { .. }) => PumpOutcome::Dropped(err),
            Err(err) => return Err(err),
        };
        Ok(Some(outcome))
    }
}
fn apply(
    store: &ChannelStore,
    stats: &mut IngestStats,
    datagram: &[u8],
) -> Result<u64, TelemetryError> {
    let sample = match decode_packet(datagram) {
        Ok(sample) => sample,
        Err(err) => {
            stats.malformed += 1;
            return Err(err);
        }
    };
    let generation = store.update(&derive_channels(&sample))?;
    stats.accepted += 1;
    Ok(generation)
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::channel::ChannelId;
    use crate::drivers::packet::encode_packet;
    use crate::drivers::source::ManualSource;
    fn store(len: usize) -> Arc<ChannelStore> {
        Arc::new(ChannelStore::new(len).unwrap())
    }
    #[test]
    fn pipeline_applies_valid_and_drops_malformed() {
        let good = encode_packet([16384, -16384, 0, 0, 0, 0, 0]).to_vec();
        let source = ManualSource::new(vec![good.clone(), vec![0u8; 13], vec![0u8; 15], good]);
        let mut pipeline = SignalPipeline::new(source, store(4));
        let mut applied = Vec::new();
        let mut dropped = Vec::new();
        while let Some(outcome) = pipeline.pump_once().unwrap() {
            match outcome {
                PumpOutcome::Applied { generation } => applied.push(generation),
                PumpOutcome::Dropped(TelemetryError::MalformedPacket { len }) => dropped.push(len),
                PumpOutcome::Dropped(other) => panic!("unexpected drop {other}"),
            }
        }
        assert_eq!(applied, vec![1, 2]);
        assert_eq!(dropped, vec![13, 15]);
        assert_eq!(
            pipeline.stats(),
            IngestStats {
                accepted: 2,
                malformed: 2,
                receive_errors: 0
            }
        );
        let axy = pipeline.store().snapshot(ChannelId::Axy);
        assert_eq!(axy[..2], [0.0, 0.0]);
        assert!((axy[3] - 0.5_f64.sqrt()).abs() < 1e-4);
    }
    #[test]
    fn malformed_datagram_leaves_store_unchanged() {
        let mut pipeline = SignalPipeline::new(ManualSource::new(Vec::new()), store(5));
        pipeline
            .ingest(&encode_packet([1000, 2000, 3000, 0, 4000, 5000, 6000]))
            .unwrap();
        let before = pipeline.store().frame();
        for len in [13, 15] {
            let err = pipeline.ingest(&vec![0xAB; len]).unwrap_err();
            assert!(matches!(err, TelemetryError::MalformedPacket { .. }));
        }
        let after = pipeline.store().frame();
        assert_eq!(before.generation, after.generation);
        assert_eq!(before.channels, after.channels);
    }
    #[test]
    fn exhausted_source_yields_none() {
        let mut pipeline = SignalPipeline::new(ManualSource::new(Vec::new()), store(1));
        assert!(pipeline.pump_once().unwrap().is_none());
    }
}
