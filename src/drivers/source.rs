use std::collections::VecDeque;
use std::f64::consts::TAU;
use std::net::{SocketAddr, UdpSocket};
use std::thread;
use std::time::{Duration, Instant};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::drivers::packet::{encode_sample, RawSample, PACKET_LEN};
use crate::drivers::TelemetryError;
/// Something that yields raw datagrams, one per call.
///
/// `Ok(None)` means the source has nothing more to give and the caller should stop.
pub trait SignalSource {
    fn recv_datagram(&mut self, buf: &mut [u8]) -> Result<Option<usize>, TelemetryError>;
}
impl<S: SignalSource + ?Sized> SignalSource for Box<S> {
    fn recv_datagram(&mut self, buf: &mut [u8]) -> Result<Option<usize>, TelemetryError> {
        (**self).recv_datagram(buf)
    }
}
/// Blocking UDP listener accepting datagrams from any sender.
pub struct UdpSource {
    socket: UdpSocket,
    last_peer: Option<SocketAddr>,
}
impl UdpSource {
    pub fn bind(addr: SocketAddr) -> Result<Self, TelemetryError> {
        let socket = UdpSocket::bind(addr).map_err(|source| TelemetryError::Bind { addr, source })?;
        info!("listening for sensor packets on {addr}");
        Ok(Self {
            socket,
            last_peer: None,
        })
    }
    pub fn local_addr(&self) -> Result<SocketAddr, TelemetryError> {
        self.socket.local_addr().map_err(TelemetryError::Receive)
    }
}
impl SignalSource for UdpSource {
    fn recv_datagram(&mut self, buf: &mut [u8]) -> Result<Option<usize>, TelemetryError> {
        let (len, peer) = self.socket.recv_from(buf).map_err(TelemetryError::Receive)?;
        if self.last_peer != Some(peer) {
            info!("receiving sensor packets from {peer}");
            self.last_peer = Some(peer);
        }
        Ok(Some(len))
    }
}
/// In-memory source useful for tests and deterministic playback.
pub struct ManualSource {
    queue: VecDeque<Vec<u8>>,
}
impl ManualSource {
    pub fn new(datagrams: impl IntoIterator<Item = Vec<u8>>) -> Self {
        Self {
            queue: datagrams.into_iter().collect(),
        }
    }
}
impl SignalSource for ManualSource {
    fn recv_datagram(&mut self, buf: &mut [u8]) -> Result<Option<usize>, TelemetryError> {
        let Some(datagram) = self.queue.pop_front() else {
            return Ok(None);
        };
        // Oversized datagrams are truncated the way a socket would.
        let len = datagram.len().min(buf.len());
        buf[..len].copy_from_slice(&datagram[..len]);
        Ok(Some(len))
    }
}
/// Synthesizes MPU packets so the plotter runs without hardware.
pub struct SimulatedSource {
    period: Duration,
    next_due: Instant,
    tick: u64,
    rng: StdRng,
    noise: f64,
    limit: Option<u64>,
}
impl SimulatedSource {
    pub fn new(rate_hz: f64) -> Result<Self, TelemetryError> {
        let period = Duration::try_from_secs_f64(1.0 / rate_hz)
            .map_err(|_| TelemetryError::InvalidRate(rate_hz))?;
        Ok(Self {
            period,
            next_due: Instant::now(),
            tick: 0,
            rng: StdRng::from_entropy(),
            noise: 0.02,
            limit: None,
        })
    }
    /// Deterministic, unpaced variant that stops after `count` packets.
    pub fn seeded(seed: u64, count: u64) -> Self {
        Self {
            period: Duration::ZERO,
            next_due: Instant::now(),
            tick: 0,
            rng: StdRng::seed_from_u64(seed),
            noise: 0.02,
            limit: Some(count),
        }
    }
    fn next_sample(&mut self) -> RawSample {
        let t = self.tick as f64 * 0.05;
        let mut wave = |freq: f64, phase: f64, amp: f64| {
            let jitter = self.rng.gen_range(-self.noise..=self.noise);
            (amp * (TAU * freq * t + phase).sin() + jitter).clamp(-1.0, 1.0)
        };
        RawSample {
            ax: wave(0.5, 0.0, 0.6),
            ay: wave(0.7, 1.0, 0.5),
            az: wave(0.3, 2.0, 0.4),
            gx: wave(1.1, 0.5, 0.7),
            gy: wave(0.9, 1.5, 0.6),
            gz: wave(1.3, 2.5, 0.5),
        }
    }
}
impl SignalSource for SimulatedSource {
    fn recv_datagram(&mut self, buf: &mut [u8]) -> Result<Option<usize>, TelemetryError> {
        if self.limit.is_some_and(|limit| self.tick >= limit) {
            return Ok(None);
        }
        let now = Instant::now();
        if self.next_due > now {
            thread::sleep(self.next_due - now);
        }
        self.next_due += self.period;
        let sample = self.next_sample();
        self.tick += 1;
        let packet = encode_sample(&sample);
        let len = PACKET_LEN.min(buf.len());
        buf[..len].copy_from_slice(&packet[..len]);
        Ok(Some(len))
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::packet::{decode_packet, encode_packet};
    use std::net::Ipv4Addr;
    #[test]
    fn manual_source_drains_in_order() {
        let mut source = ManualSource::new(vec![vec![1, 2], vec![3; 20]]);
        let mut buf = [0u8; 16];
        assert_eq!(source.recv_datagram(&mut buf).unwrap(), Some(2));
        assert_eq!(&buf[..2], &[1, 2]);
        assert_eq!(source.recv_datagram(&mut buf).unwrap(), Some(16));
        assert_eq!(source.recv_datagram(&mut buf).unwrap(), None);
    }
    #[test]
    fn simulated_packets_decode() {
        let mut source = SimulatedSource::seeded(7, 50);
        let mut buf = [0u8; 64];
        let mut count = 0;
        while let Some(len) = source.recv_datagram(&mut buf).unwrap() {
            assert_eq!(len, PACKET_LEN);
            let sample = decode_packet(&buf[..len]).unwrap();
            assert!((-1.0..=1.0).contains(&sample.gz));
            count += 1;
        }
        assert_eq!(count, 50);
    }
    #[test]
    fn unrepresentable_rate_is_rejected() {
        for rate in [1e-20, 0.0, -5.0, f64::NAN] {
            assert!(matches!(
                SimulatedSource::new(rate),
                Err(TelemetryError::InvalidRate(_))
            ));
        }
        assert!(SimulatedSource::new(20.0).is_ok());
    }
    #[test]
    fn udp_source_receives_from_any_sender() {
        let mut source = UdpSource::bind((Ipv4Addr::LOCALHOST, 0).into()).unwrap();
        let target = source.local_addr().unwrap();
        let sender = UdpSocket::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
        let packet = encode_packet([1, 2, 3, 4, 5, 6, 7]);
        sender.send_to(&packet, target).unwrap();
        let mut buf = [0u8; 64];
        let len = source.recv_datagram(&mut buf).unwrap().unwrap();
        assert_eq!(&buf[..len], &packet);
    }
    #[test]
    fn bind_conflict_is_reported() {
        let first = UdpSource::bind((Ipv4Addr::LOCALHOST, 0).into()).unwrap();
        let taken = first.local_addr().unwrap();
        match UdpSource::bind(taken) {
            Err(TelemetryError::Bind { addr, .. }) => assert_eq!(addr, taken),
            Err(other) => panic!("unexpected error {other}"),
            Ok(_) => panic!("second bind on {taken} should fail"),
        }
    }
}
