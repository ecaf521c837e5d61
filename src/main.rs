// src/main.rs
use std::sync::mpsc::channel;
use std::sync::Arc;
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;
use log::{error, info};
use mpu_plotter::config::{Cli, Settings};
use mpu_plotter::drivers::{ChannelStore, SignalPipeline, SignalSource, SimulatedSource, UdpSource};
use mpu_plotter::types::SourceMode;
use mpu_plotter::{engine, gui};

fn main() -> Result<()> {
    env_logger::init();
    let settings = Settings::load(&Cli::parse())?;
    info!("starting with {settings:?}");
    let store = Arc::new(ChannelStore::new(settings.plot_length)?);

    // Bind before opening a window: a listener that cannot bind is fatal.
    let mode = settings.source_mode();
    let source: Box<dyn SignalSource + Send>;
    let source_label;
    match mode {
        SourceMode::Network(addr) => {
            let udp = UdpSource::bind(addr).with_context(|| format!("cannot listen on {addr}"))?;
            source_label = format!("UDP {}", udp.local_addr()?);
            source = Box::new(udp);
        }
        SourceMode::Simulation { rate_hz } => {
            source = Box::new(SimulatedSource::new(rate_hz)?);
            source_label = format!("Simulated sensor @ {rate_hz} Hz");
        }
    }
    let pipeline = SignalPipeline::new(source, Arc::clone(&store));

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1280.0, 900.0])
        .with_maximized(true)
        .with_title("MPU Plotter");
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "MPU Plotter",
        options,
        Box::new(move |cc| {
            let (tx, rx) = channel();
            let mut app = gui::MpuPlotterApp::new(store, rx, source_label);
            let ctx = cc.egui_ctx.clone();
            if let Err(err) = engine::spawn_thread(pipeline, tx, move || ctx.request_repaint()) {
                error!("failed to start ingest worker: {err}");
                app.log(&format!("Ingest worker failed: {err}"));
                app.set_worker_running(false);
            }
            Box::new(app)
        }),
    )
    .map_err(|err| anyhow!("GUI exited with error: {err}"))
}
