// src/config.rs
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use crate::drivers::DEFAULT_PLOT_LENGTH;
use crate::types::SourceMode;

/// Port the sensor firmware sends to.
pub const DEFAULT_PORT: u16 = 12345;
/// The firmware samples every 50 ms.
pub const DEFAULT_SIM_RATE_HZ: f64 = 20.0;
/// Largest accepted window; fourteen channels of this many samples stay in the low megabytes.
pub const MAX_PLOT_LENGTH: usize = 100_000;
pub const SIM_RATE_RANGE_HZ: RangeInclusive<f64> = 0.01..=10_000.0;

#[derive(Parser, Debug, Default)]
#[command(name = "mpu-plotter", about = "Live plot of MPU accelerometer and gyroscope telemetry")]
pub struct Cli {
    /// JSON settings file; command-line flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Samples kept per channel
    #[arg(long)]
    pub plot_length: Option<usize>,
    /// Address to listen on
    #[arg(long)]
    pub bind: Option<IpAddr>,
    #[arg(long)]
    pub port: Option<u16>,
    /// Generate synthetic samples instead of listening on the network
    #[arg(long)]
    pub simulate: bool,
    #[arg(long)]
    pub sim_rate_hz: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub plot_length: usize,
    pub bind_address: IpAddr,
    pub port: u16,
    pub simulate: bool,
    pub sim_rate_hz: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            plot_length: DEFAULT_PLOT_LENGTH,
            bind_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            simulate: false,
            sim_rate_hz: DEFAULT_SIM_RATE_HZ,
        }
    }
}

impl Settings {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing settings in {}", path.display()))
    }

    pub fn load(cli: &Cli) -> Result<Self> {
        let mut settings = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(n) = cli.plot_length {
            settings.plot_length = n;
        }
        if let Some(addr) = cli.bind {
            settings.bind_address = addr;
        }
        if let Some(port) = cli.port {
            settings.port = port;
        }
        if cli.simulate {
            settings.simulate = true;
        }
        if let Some(rate) = cli.sim_rate_hz {
            settings.sim_rate_hz = rate;
        }
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_PLOT_LENGTH).contains(&self.plot_length) {
            bail!(
                "plot_length must be between 1 and {MAX_PLOT_LENGTH}, got {}",
                self.plot_length
            );
        }
        if !SIM_RATE_RANGE_HZ.contains(&self.sim_rate_hz) {
            bail!(
                "sim_rate_hz must be between {} and {} Hz, got {}",
                SIM_RATE_RANGE_HZ.start(),
                SIM_RATE_RANGE_HZ.end(),
                self.sim_rate_hz
            );
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    pub fn source_mode(&self) -> SourceMode {
        if self.simulate {
            SourceMode::Simulation {
                rate_hz: self.sim_rate_hz,
            }
        } else {
            SourceMode::Network(self.listen_addr())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use crate::drivers::SimulatedSource;

    #[test]
    fn defaults_match_firmware() {
        let settings = Settings::load(&Cli::default()).unwrap();
        assert_eq!(settings.plot_length, 100);
        assert_eq!(settings.listen_addr(), "0.0.0.0:12345".parse::<SocketAddr>().unwrap());
        assert_eq!(settings.source_mode(), SourceMode::Network(settings.listen_addr()));
    }

    #[test]
    fn cli_flags_override_defaults() {
        let cli = Cli::parse_from([
            "mpu-plotter",
            "--plot-length",
            "250",
            "--bind",
            "127.0.0.1",
            "--port",
            "9000",
            "--simulate",
        ]);
        let settings = Settings::load(&cli).unwrap();
        assert_eq!(settings.plot_length, 250);
        assert_eq!(settings.listen_addr(), "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(settings.source_mode(), SourceMode::Simulation { rate_hz: 20.0 });
    }

    #[test]
    fn json_file_is_partial_and_overridable() {
        let path = std::env::temp_dir().join(format!("mpu-plotter-{}.json", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, r#"{{ "plot_length": 40, "port": 5555 }}"#).unwrap();
        drop(file);
        let cli = Cli::parse_from([
            "mpu-plotter",
            "--config",
            path.to_str().unwrap(),
            "--port",
            "6000",
        ]);
        let settings = Settings::load(&cli).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(settings.plot_length, 40);
        assert_eq!(settings.port, 6000);
        assert_eq!(settings.sim_rate_hz, DEFAULT_SIM_RATE_HZ);
    }

    #[test]
    fn rejects_invalid_values() {
        let cli = Cli::parse_from(["mpu-plotter", "--plot-length", "0"]);
        assert!(Settings::load(&cli).is_err());
        let cli = Cli::parse_from(["mpu-plotter", "--sim-rate-hz", "0"]);
        assert!(Settings::load(&cli).is_err());
    }

    #[test]
    fn tiny_sim_rate_is_rejected_before_the_source_is_built() {
        let cli = Cli::parse_from(["mpu-plotter", "--simulate", "--sim-rate-hz", "1e-20"]);
        let err = Settings::load(&cli).unwrap_err();
        assert!(err.to_string().contains("sim_rate_hz"));
        let cli = Cli::parse_from(["mpu-plotter", "--simulate", "--sim-rate-hz", "NaN"]);
        assert!(Settings::load(&cli).is_err());
        // Every accepted rate yields a usable source.
        for rate in [*SIM_RATE_RANGE_HZ.start(), DEFAULT_SIM_RATE_HZ, *SIM_RATE_RANGE_HZ.end()] {
            let settings = Settings {
                simulate: true,
                sim_rate_hz: rate,
                ..Settings::default()
            };
            settings.validate().unwrap();
            assert!(SimulatedSource::new(rate).is_ok());
        }
    }

    #[test]
    fn oversized_plot_length_is_rejected() {
        let cli = Cli::parse_from(["mpu-plotter", "--plot-length", "10000000000"]);
        let err = Settings::load(&cli).unwrap_err();
        assert!(err.to_string().contains("plot_length"));
        let max = MAX_PLOT_LENGTH.to_string();
        let cli = Cli::parse_from(["mpu-plotter", "--plot-length", max.as_str()]);
        assert_eq!(Settings::load(&cli).unwrap().plot_length, MAX_PLOT_LENGTH);
    }
}
