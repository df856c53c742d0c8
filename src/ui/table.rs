use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

/// Table of the games matching the current selection.
pub fn games_table(ui: &mut Ui, state: &AppState) {
    let games = &state.view.games;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::remainder().at_least(160.0))
        .columns(Column::auto().at_least(60.0), 5)
        .header(ROW_HEIGHT, |mut header| {
            for title in ["Name", "Platform", "Genre", "Year", "Critic", "User"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, games.len(), |mut row| {
                let game = &games[row.index()];
                row.col(|ui| {
                    ui.label(&game.value);
                });
                row.col(|ui| {
                    ui.label(&game.platform);
                });
                row.col(|ui| {
                    ui.label(&game.genre);
                });
                row.col(|ui| {
                    ui.label(game.year.to_string());
                });
                row.col(|ui| {
                    ui.label(format!("{:.0}", game.critic_score));
                });
                row.col(|ui| {
                    ui.label(format!("{:.1}", game.user_score));
                });
            });
        });
}
