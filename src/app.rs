use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct GameExplorerApp {
    pub state: AppState,
}

impl GameExplorerApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for GameExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar and selected-games count ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: selection ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: matching games ----
        if self.state.dataset.is_some() {
            egui::TopBottomPanel::bottom("games_table")
                .resizable(true)
                .default_height(200.0)
                .show(ctx, |ui| {
                    table::games_table(ui, &self.state);
                });
        }

        // ---- Central panel: plots ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.heading("Open a game dataset to explore  (File → Open…)");
                });
                return;
            }
            ui.columns(2, |cols| {
                plot::score_scatter(&mut cols[0], &self.state);
                plot::release_area(&mut cols[1], &self.state);
            });
        });
    }
}
