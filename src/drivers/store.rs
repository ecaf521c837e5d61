use std::sync::{PoisonError, RwLock};
use log::debug;
use crate::drivers::buffer::RollingBuffer;
use crate::drivers::channel::{ChannelId, CHANNEL_COUNT};
use crate::drivers::derive::ChannelValues;
use crate::drivers::TelemetryError;
pub const DEFAULT_PLOT_LENGTH: usize = 100;
/// Receiver side of the renderer contract: the latest window for one channel.
pub trait ChannelSink {
    fn set_channel(&mut self, id: ChannelId, values: &[f64]);
}
/// Consistent copy of every channel taken at one generation.
#[derive(Clone, Debug, Default)]
pub struct StoreFrame {
    pub generation: u64,
    pub channels: Vec<Vec<f64>>, // indexed by ChannelId::index()
}
impl StoreFrame {
    pub fn channel(&self, id: ChannelId) -> &[f64] {
        self.channels
            .get(id.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
    pub fn deliver_to<K: ChannelSink + ?Sized>(&self, sink: &mut K) {
        for id in ChannelId::ALL {
            sink.set_channel(id, self.channel(id));
        }
    }
}
struct StoreState {
    buffers: Vec<RollingBuffer>,
    generation: u64,
}
/// Rolling history for all channels behind a single lock.
///
/// An update touches every buffer inside one write-lock section, so readers
/// never observe channels from different generations.
pub struct ChannelStore {
    plot_length: usize,
    state: RwLock<StoreState>,
}
impl ChannelStore {
    pub fn new(plot_length: usize) -> Result<Self, TelemetryError> {
        if plot_length == 0 {
            return Err(TelemetryError::InvalidPlotLength(plot_length));
        }
        let buffers = (0..CHANNEL_COUNT)
            .map(|_| RollingBuffer::zeroed(plot_length))
            .collect();
        Ok(Self {
            plot_length,
            state: RwLock::new(StoreState {
                buffers,
                generation: 0,
            }),
        })
    }
    pub fn plot_length(&self) -> usize {
        self.plot_length
    }
    pub fn generation(&self) -> u64 {
        self.read(|state| state.generation)
    }
    /// Push one value into every channel. All fourteen must be present;
    /// otherwise nothing changes.
    pub fn update(&self, values: &ChannelValues) -> Result<u64, TelemetryError> {
        let Some(resolved) = values.complete() else {
            return Err(TelemetryError::IncompleteUpdate {
                missing: values.missing(),
            });
        };
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        for (buffer, value) in state.buffers.iter_mut().zip(resolved) {
            buffer.push(value);
        }
        state.generation += 1;
        let generation = state.generation;
        drop(state);
        debug!("store advanced to generation {generation}");
        Ok(generation)
    }
    pub fn snapshot(&self, id: ChannelId) -> Vec<f64> {
        self.read(|state| state.buffers[id.index()].to_vec())
    }
    pub fn frame(&self) -> StoreFrame {
        let mut frame = StoreFrame::default();
        self.frame_into(&mut frame);
        frame
    }
    /// Refill `frame` in place. Vectors already sized to the window are reused.
    pub fn frame_into(&self, frame: &mut StoreFrame) {
        frame.channels.resize_with(CHANNEL_COUNT, Vec::new);
        self.read(|state| {
            frame.generation = state.generation;
            for (out, buffer) in frame.channels.iter_mut().zip(&state.buffers) {
                buffer.copy_into(out);
            }
        });
    }
    fn read<T>(&self, f: impl FnOnce(&StoreState) -> T) -> T {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }
}
