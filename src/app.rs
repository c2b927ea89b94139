use eframe::egui;

use crate::data::model::TrackDataset;
use crate::state::AppState;
use crate::style::ChartStyle;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct VibePandaApp {
    pub state: AppState,
}

impl VibePandaApp {
    pub fn new(dataset: TrackDataset) -> Self {
        Self {
            state: AppState::new(dataset, ChartStyle::shared()),
        }
    }
}

impl eframe::App for VibePandaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: tabs + chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::dashboard(ui, &mut self.state);
        });
    }
}
