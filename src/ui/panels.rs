use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::export;
use crate::data::filter::Restriction;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the left selection panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some((min_year, max_year)) = state.dataset.as_ref().and_then(|ds| ds.year_bounds()) else {
        ui.label("No dataset loaded.");
        return;
    };

    // ---- Year range ----
    ui.strong("Years");
    if let Some((mut lo, mut hi)) = state.year_range() {
        let lo_changed = ui
            .add(egui::Slider::new(&mut lo, min_year..=max_year).text("from"))
            .changed();
        let hi_changed = ui
            .add(egui::Slider::new(&mut hi, min_year..=max_year).text("to"))
            .changed();
        if lo_changed || hi_changed {
            state.set_years(lo, hi);
        }
    }
    ui.separator();

    // Clone the choice lists so we can mutate state inside the loops.
    let genres = state.view.genre_choices.clone();
    let platforms = state.view.platform_choices.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let toggled = choice_list(ui, "Genres", &genres, &state.selection.genres);
            match toggled {
                Some(Toggle::Value(genre)) => state.toggle_genre(&genre),
                Some(Toggle::All) => state.clear_genres(),
                None => {}
            }

            let toggled = choice_list(ui, "Platforms", &platforms, &state.selection.platforms);
            match toggled {
                Some(Toggle::Value(platform)) => state.toggle_platform(&platform),
                Some(Toggle::All) => state.clear_platforms(),
                None => {}
            }
        });
}

enum Toggle {
    Value(String),
    All,
}

/// Collapsible checkbox list for one categorical dimension.
///
/// Nothing ticked means every value matches; "All" clears the ticks.
fn choice_list(
    ui: &mut Ui,
    title: &str,
    choices: &BTreeSet<String>,
    selected: &Restriction,
) -> Option<Toggle> {
    let n_selected = selected.selected().count();
    let header_text = if n_selected == 0 {
        format!("{title}  (all {})", choices.len())
    } else {
        format!("{title}  ({n_selected}/{})", choices.len())
    };

    let mut toggled = None;
    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            if ui.small_button("All").clicked() {
                toggled = Some(Toggle::All);
            }
            for value in choices {
                let mut checked = selected.contains(value);
                if ui.checkbox(&mut checked, value.as_str()).changed() {
                    toggled = Some(Toggle::Value(value.clone()));
                }
            }
        });
    toggled
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            let has_data = state.dataset.is_some();
            if ui
                .add_enabled(has_data, egui::Button::new("Export matching games…"))
                .clicked()
            {
                export_dialog(state, Export::Games);
                ui.close_menu();
            }
            if ui
                .add_enabled(has_data, egui::Button::new("Export release counts…"))
                .clicked()
            {
                export_dialog(state, Export::Counts);
                ui.close_menu();
            }
        });

        ui.separator();

        if state.dataset.is_some() {
            ui.label(format!("Selected games: {}", state.view.selected_count()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open game dataset")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_file(&path);
    }
}

#[derive(Clone, Copy)]
enum Export {
    Games,
    Counts,
}

fn export_dialog(state: &mut AppState, what: Export) {
    let default_name = match what {
        Export::Games => "games_filtered.csv",
        Export::Counts => "release_counts.csv",
    };
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export CSV")
        .set_file_name(default_name)
        .add_filter("CSV", &["csv"])
        .save_file()
    else {
        return;
    };

    let result = match what {
        Export::Games => export::write_games_csv(&path, &state.view.games),
        Export::Counts => export::write_counts_csv(&path, &state.view.counts),
    };
    match result {
        Ok(()) => {
            log::info!("Exported {}", path.display());
            state.status_message = None;
        }
        Err(e) => {
            log::error!("Export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
