// src/gui.rs
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::Duration;
use eframe::egui;
use egui::{Color32, RichText};
use egui_plot::{Line, Plot, PlotPoints};
use crate::drivers::{ChannelId, ChannelSink, ChannelStore, IngestStats, StoreFrame, CHANNEL_COUNT};
use crate::types::EngineMessage;

const GRID_ROWS: usize = 6;
const GRID_COLS: usize = 3;
const MAGENTA: Color32 = Color32::from_rgb(255, 0, 255);
const CYAN: Color32 = Color32::from_rgb(0, 255, 255);

// Panel placement: gyro on top, accel below, raw axes left, pairs right, triples centre.
struct PanelSpec {
    id: ChannelId,
    title: &'static str,
    color: Color32,
    row: usize,
    col: usize,
}

const PANELS: [PanelSpec; CHANNEL_COUNT] = [
    PanelSpec { id: ChannelId::Gx, title: "Gyro X--", color: Color32::RED, row: 0, col: 0 },
    PanelSpec { id: ChannelId::Gy, title: "Gyro -Y-", color: Color32::GREEN, row: 1, col: 0 },
    PanelSpec { id: ChannelId::Gz, title: "Gyro --Z", color: Color32::BLUE, row: 2, col: 0 },
    PanelSpec { id: ChannelId::Gxyz, title: "Gyro XYZ", color: Color32::WHITE, row: 1, col: 1 },
    PanelSpec { id: ChannelId::Gyz, title: "Gyro -YZ", color: CYAN, row: 0, col: 2 },
    PanelSpec { id: ChannelId::Gxz, title: "Gyro X-Z", color: MAGENTA, row: 1, col: 2 },
    PanelSpec { id: ChannelId::Gxy, title: "Gyro XY-", color: Color32::YELLOW, row: 2, col: 2 },
    PanelSpec { id: ChannelId::Ax, title: "Accel X--", color: Color32::RED, row: 3, col: 0 },
    PanelSpec { id: ChannelId::Ay, title: "Accel -Y-", color: Color32::GREEN, row: 4, col: 0 },
    PanelSpec { id: ChannelId::Az, title: "Accel --Z", color: Color32::BLUE, row: 5, col: 0 },
    PanelSpec { id: ChannelId::Axyz, title: "Accel XYZ", color: Color32::WHITE, row: 4, col: 1 },
    PanelSpec { id: ChannelId::Ayz, title: "Accel -YZ", color: CYAN, row: 3, col: 2 },
    PanelSpec { id: ChannelId::Axz, title: "Accel X-Z", color: MAGENTA, row: 4, col: 2 },
    PanelSpec { id: ChannelId::Axy, title: "Accel XY-", color: Color32::YELLOW, row: 5, col: 2 },
];

/// Plot points for every channel, refreshed through the sink contract.
struct PanelCurves {
    points: Vec<Vec<[f64; 2]>>,
}

impl PanelCurves {
    fn plot_points(&self, id: ChannelId) -> PlotPoints {
        self.points[id.index()].iter().copied().collect()
    }
}

impl ChannelSink for PanelCurves {
    fn set_channel(&mut self, id: ChannelId, values: &[f64]) {
        let curve = &mut self.points[id.index()];
        curve.clear();
        curve.extend(values.iter().enumerate().map(|(i, v)| [i as f64, *v]));
    }
}

pub struct MpuPlotterApp {
    store: Arc<ChannelStore>,
    frame: StoreFrame,
    curves: PanelCurves,
    drawn_generation: Option<u64>,

    source_label: String,
    stats: IngestStats,
    worker_running: bool,
    log_messages: Vec<String>,

    rx: Receiver<EngineMessage>,
}

impl MpuPlotterApp {
    pub fn new(store: Arc<ChannelStore>, rx: Receiver<EngineMessage>, source_label: String) -> Self {
        Self {
            store,
            frame: StoreFrame::default(),
            curves: PanelCurves {
                points: vec![Vec::new(); CHANNEL_COUNT],
            },
            drawn_generation: None,
            source_label,
            stats: IngestStats::default(),
            worker_running: true,
            log_messages: vec!["MPU Plotter ready.".to_owned()],
            rx,
        }
    }

    pub fn log(&mut self, msg: &str) {
        self.log_messages.push(format!("> {}", msg));
        if self.log_messages.len() > 8 {
            self.log_messages.remove(0);
        }
    }

    pub fn set_worker_running(&mut self, running: bool) {
        self.worker_running = running;
    }

    fn drain_messages(&mut self) {
        let mut msg_count = 0;
        while let Ok(msg) = self.rx.try_recv() {
            msg_count += 1;
            match msg {
                EngineMessage::Stats(stats) => self.stats = stats,
                // Only keep stats once the queue gets long
                EngineMessage::Log(_) if msg_count > 20 => continue,
                EngineMessage::Log(s) => self.log(&s),
                EngineMessage::Stopped => {
                    self.worker_running = false;
                    self.log("Source closed.");
                }
            }
        }
    }

    // Pull a consistent frame; only rebuild curves when a new sample landed.
    fn refresh_curves(&mut self) {
        self.store.frame_into(&mut self.frame);
        if self.drawn_generation != Some(self.frame.generation) {
            self.frame.deliver_to(&mut self.curves);
            self.drawn_generation = Some(self.frame.generation);
        }
    }

    fn draw_panel(&self, ui: &mut egui::Ui, panel: &PanelSpec, height: f32) {
        let (y_min, y_max) = panel.id.display_range();
        let x_max = self.store.plot_length() as f64;
        ui.label(RichText::new(panel.title).small().color(panel.color));
        Plot::new(panel.id.name())
            .height(height)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .include_x(0.0)
            .include_x(x_max)
            .include_y(y_min)
            .include_y(y_max)
            .show(ui, |plot_ui| {
                let points = self.curves.plot_points(panel.id);
                plot_ui.line(Line::new(points).color(panel.color).name(panel.title));
            });
    }
}

impl eframe::App for MpuPlotterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // 1. Worker messages
        self.drain_messages();

        // 2. Latest window from the store
        self.refresh_curves();

        // The worker requests a repaint per sample; this only keeps counters fresh when idle.
        ctx.request_repaint_after(Duration::from_millis(250));

        // 3. UI
        egui::SidePanel::left("status").min_width(220.0).show(ctx, |ui| {
            ui.add_space(10.0);
            ui.heading("MPU Plotter");
            ui.label(self.source_label.as_str());
            ui.separator();

            let state = if self.worker_running {
                RichText::new("RECEIVING").color(Color32::GREEN)
            } else {
                RichText::new("STOPPED").color(Color32::RED)
            };
            ui.label(state.strong());
            ui.label(format!("Window: {} samples", self.store.plot_length()));
            ui.label(format!("Samples applied: {}", self.frame.generation));
            ui.label(format!("Packets accepted: {}", self.stats.accepted));
            ui.label(format!("Packets dropped: {}", self.stats.malformed));
            ui.label(format!("Receive errors: {}", self.stats.receive_errors));

            ui.add_space(10.0);
            ui.separator();
            egui::ScrollArea::vertical().max_height(160.0).show(ui, |ui| {
                for m in &self.log_messages {
                    ui.monospace(m);
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let spacing = ui.spacing().item_spacing.y;
            let label_height = ui.text_style_height(&egui::TextStyle::Small) + spacing;
            let cell = ui.available_height() / GRID_ROWS as f32;
            let plot_height = (cell - label_height - spacing).max(40.0);
            ui.columns(GRID_COLS, |columns| {
                for (col, column) in columns.iter_mut().enumerate() {
                    for row in 0..GRID_ROWS {
                        match PANELS.iter().find(|p| p.row == row && p.col == col) {
                            Some(panel) => self.draw_panel(column, panel, plot_height),
                            None => column.add_space(cell - spacing),
                        }
                    }
                }
            });
        });
    }
}
