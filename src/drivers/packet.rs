//! Wire format of one sensor sample.
//!
//! A datagram is seven big-endian `i16` words read straight from the MPU register
//! block: accel X/Y/Z, one reserved word, gyro X/Y/Z. The reserved word is skipped
//! and never interpreted.
use crate::drivers::channel::Axis;
use crate::drivers::TelemetryError;
/// Exact size of a sample datagram.
pub const PACKET_LEN: usize = 14;
const WORDS: usize = PACKET_LEN / 2;
const RESERVED_WORD: usize = 3;
/// One decoded sample, every field in [-1.0, 1.0].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RawSample {
    pub ax: f64,
    pub ay: f64,
    pub az: f64,
    pub gx: f64,
    pub gy: f64,
    pub gz: f64,
}
impl RawSample {
    pub fn axis(&self, axis: Axis) -> f64 {
        match axis {
            Axis::AccelX => self.ax,
            Axis::AccelY => self.ay,
            Axis::AccelZ => self.az,
            Axis::GyroX => self.gx,
            Axis::GyroY => self.gy,
            Axis::GyroZ => self.gz,
        }
    }
}
/// Map a signed 16-bit reading onto [-1, 1]. Negative and positive extents are
/// scaled separately so both -32768 and 32767 land exactly on the bounds.
pub fn normalize(raw: i16) -> f64 {
    if raw < 0 {
        raw as f64 / 32768.0
    } else {
        raw as f64 / 32767.0
    }
}
/// Inverse of [`normalize`], clamping out-of-range input.
pub fn quantize(value: f64) -> i16 {
    let value = value.clamp(-1.0, 1.0);
    if value < 0.0 {
        (value * 32768.0).round() as i16
    } else {
        (value * 32767.0).round() as i16
    }
}
pub fn decode_packet(bytes: &[u8]) -> Result<RawSample, TelemetryError> {
    if bytes.len() != PACKET_LEN {
        return Err(TelemetryError::MalformedPacket { len: bytes.len() });
    }
    let mut words = [0i16; WORDS];
    for (word, pair) in words.iter_mut().zip(bytes.chunks_exact(2)) {
        *word = i16::from_be_bytes([pair[0], pair[1]]);
    }
    Ok(RawSample {
        ax: normalize(words[0]),
        ay: normalize(words[1]),
        az: normalize(words[2]),
        gx: normalize(words[4]),
        gy: normalize(words[5]),
        gz: normalize(words[6]),
    })
}
pub fn encode_packet(words: [i16; WORDS]) -> [u8; PACKET_LEN] {
    let mut out = [0u8; PACKET_LEN];
    for (chunk, word) in out.chunks_exact_mut(2).zip(words) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    out
}
/// Encode a sample, writing zero into the reserved word.
pub fn encode_sample(sample: &RawSample) -> [u8; PACKET_LEN] {
    let mut words = [0i16; WORDS];
    words[0] = quantize(sample.ax);
    words[1] = quantize(sample.ay);
    words[2] = quantize(sample.az);
    words[RESERVED_WORD] = 0;
    words[4] = quantize(sample.gx);
    words[5] = quantize(sample.gy);
    words[6] = quantize(sample.gz);
    encode_packet(words)
}
