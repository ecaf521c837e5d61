// src/engine.rs
use std::io;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use log::{error, info, warn};
use crate::drivers::{PumpOutcome, SignalPipeline, SignalSource};
use crate::types::EngineMessage;

/// Minimum spacing between stats and log messages sent to the GUI. The channel is
/// unbounded, so per-packet messages would pile up whenever the window stops draining it.
pub const REPORT_INTERVAL: Duration = Duration::from_millis(250);

fn due(last: Option<Instant>) -> bool {
    last.map_or(true, |at| at.elapsed() >= REPORT_INTERVAL)
}

/// Start the ingest worker. It blocks on the source, applies every datagram to
/// the store and calls `on_update` after each applied sample so the renderer
/// can pull a fresh frame. Runs until the source is exhausted.
pub fn spawn_thread<S, F>(
    mut pipeline: SignalPipeline<S>,
    tx: Sender<EngineMessage>,
    on_update: F,
) -> io::Result<JoinHandle<()>>
where
    S: SignalSource + Send + 'static,
    F: Fn() + Send + 'static,
{
    thread::Builder::new()
        .name("ingest".to_owned())
        .spawn(move || {
            info!(
                "ingest worker started, window of {} samples",
                pipeline.store().plot_length()
            );
            let mut last_stats = None;
            let mut last_log = None;
            let mut suppressed = 0u64;
            loop {
                let line = match pipeline.pump_once() {
                    Ok(Some(PumpOutcome::Applied { .. })) => {
                        on_update();
                        None
                    }
                    Ok(Some(PumpOutcome::Dropped(err))) => {
                        warn!("dropping datagram: {err}");
                        Some(format!("dropped: {err}"))
                    }
                    Ok(None) => break,
                    Err(err) => {
                        error!("ingest error: {err}");
                        Some(format!("error: {err}"))
                    }
                };
                if let Some(mut line) = line {
                    if due(last_log) {
                        if suppressed > 0 {
                            line.push_str(&format!(" (+{suppressed} more)"));
                            suppressed = 0;
                        }
                        tx.send(EngineMessage::Log(line)).ok();
                        last_log = Some(Instant::now());
                    } else {
                        suppressed += 1;
                    }
                }
                if due(last_stats) {
                    tx.send(EngineMessage::Stats(pipeline.stats())).ok();
                    last_stats = Some(Instant::now());
                }
            }
            info!("ingest source exhausted, worker stopping");
            tx.send(EngineMessage::Stats(pipeline.stats())).ok();
            tx.send(EngineMessage::Stopped).ok();
        })
}
