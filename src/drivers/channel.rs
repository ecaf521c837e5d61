use std::fmt;
/// Number of plotted channels: six raw axes plus eight derived magnitudes.
pub const CHANNEL_COUNT: usize = 14;
/// Sensor a channel is computed from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SensorGroup {
    Accel,
    Gyro,
}
/// One of the six raw readings carried by a packet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    AccelX,
    AccelY,
    AccelZ,
    GyroX,
    GyroY,
    GyroZ,
}
/// Identity of a plotted time series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChannelId {
    Ax,
    Ay,
    Az,
    Gx,
    Gy,
    Gz,
    Axy,
    Axz,
    Ayz,
    Axyz,
    Gxy,
    Gxz,
    Gyz,
    Gxyz,
}
impl ChannelId {
    pub const ALL: [ChannelId; CHANNEL_COUNT] = [
        ChannelId::Ax,
        ChannelId::Ay,
        ChannelId::Az,
        ChannelId::Gx,
        ChannelId::Gy,
        ChannelId::Gz,
        ChannelId::Axy,
        ChannelId::Axz,
        ChannelId::Ayz,
        ChannelId::Axyz,
        ChannelId::Gxy,
        ChannelId::Gxz,
        ChannelId::Gyz,
        ChannelId::Gxyz,
    ];
    /// Position of this channel in [`ChannelId::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
    pub fn name(self) -> &'static str {
        match self {
            ChannelId::Ax => "ax",
            ChannelId::Ay => "ay",
            ChannelId::Az => "az",
            ChannelId::Gx => "gx",
            ChannelId::Gy => "gy",
            ChannelId::Gz => "gz",
            ChannelId::Axy => "axy",
            ChannelId::Axz => "axz",
            ChannelId::Ayz => "ayz",
            ChannelId::Axyz => "axyz",
            ChannelId::Gxy => "gxy",
            ChannelId::Gxz => "gxz",
            ChannelId::Gyz => "gyz",
            ChannelId::Gxyz => "gxyz",
        }
    }
    /// Raw axes combined into this channel. A single axis means passthrough.
    pub fn axes(self) -> &'static [Axis] {
        use Axis::*;
        match self {
            ChannelId::Ax => &[AccelX],
            ChannelId::Ay => &[AccelY],
            ChannelId::Az => &[AccelZ],
            ChannelId::Gx => &[GyroX],
            ChannelId::Gy => &[GyroY],
            ChannelId::Gz => &[GyroZ],
            ChannelId::Axy => &[AccelX, AccelY],
            ChannelId::Axz => &[AccelX, AccelZ],
            ChannelId::Ayz => &[AccelY, AccelZ],
            ChannelId::Axyz => &[AccelX, AccelY, AccelZ],
            ChannelId::Gxy => &[GyroX, GyroY],
            ChannelId::Gxz => &[GyroX, GyroZ],
            ChannelId::Gyz => &[GyroY, GyroZ],
            ChannelId::Gxyz => &[GyroX, GyroY, GyroZ],
        }
    }
    pub fn arity(self) -> usize {
        self.axes().len()
    }
    pub fn group(self) -> SensorGroup {
        match self.axes()[0] {
            Axis::AccelX | Axis::AccelY | Axis::AccelZ => SensorGroup::Accel,
            Axis::GyroX | Axis::GyroY | Axis::GyroZ => SensorGroup::Gyro,
        }
    }
    /// Y range a panel should use: raw axes span [-1, 1], a norm over k
    /// unit-range axes spans [0, sqrt(k)].
    pub fn display_range(self) -> (f64, f64) {
        match self.arity() {
            1 => (-1.0, 1.0),
            k => (0.0, (k as f64).sqrt()),
        }
    }
}
impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
