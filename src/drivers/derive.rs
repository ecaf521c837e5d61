use crate::drivers::channel::{ChannelId, CHANNEL_COUNT};
use crate::drivers::packet::RawSample;
/// Per-channel values for one update. Slots may be empty; the store only
/// accepts a fully populated set.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChannelValues {
    slots: [Option<f64>; CHANNEL_COUNT],
}
impl ChannelValues {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn set(&mut self, id: ChannelId, value: f64) {
        self.slots[id.index()] = Some(value);
    }
    pub fn remove(&mut self, id: ChannelId) -> Option<f64> {
        self.slots[id.index()].take()
    }
    pub fn get(&self, id: ChannelId) -> Option<f64> {
        self.slots[id.index()]
    }
    pub fn missing(&self) -> Vec<ChannelId> {
        ChannelId::ALL
            .into_iter()
            .filter(|id| self.slots[id.index()].is_none())
            .collect()
    }
    /// All fourteen values in [`ChannelId::ALL`] order, or `None` if any is missing.
    pub fn complete(&self) -> Option<[f64; CHANNEL_COUNT]> {
        let mut out = [0.0; CHANNEL_COUNT];
        for (dst, slot) in out.iter_mut().zip(&self.slots) {
            *dst = (*slot)?;
        }
        Some(out)
    }
}
impl FromIterator<(ChannelId, f64)> for ChannelValues {
    fn from_iter<I: IntoIterator<Item = (ChannelId, f64)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (id, value) in iter {
            values.set(id, value);
        }
        values
    }
}
/// Euclidean norm of a handful of bounded components.
pub fn magnitude(components: impl IntoIterator<Item = f64>) -> f64 {
    components.into_iter().map(|c| c * c).sum::<f64>().sqrt()
}
/// Expand one raw sample into every plotted channel.
pub fn derive_channels(sample: &RawSample) -> ChannelValues {
    ChannelId::ALL
        .into_iter()
        .map(|id| {
            let value = match id.axes() {
                [axis] => sample.axis(*axis),
                axes => magnitude(axes.iter().map(|axis| sample.axis(*axis))),
            };
            (id, value)
        })
        .collect()
}
