use std::collections::BTreeMap;

use eframe::egui::{Stroke, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points, Polygon};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Score scatter plot
// ---------------------------------------------------------------------------

/// User score (x) against critic score (y), one coloured series per genre.
pub fn score_scatter(ui: &mut Ui, state: &AppState) {
    let mut by_genre: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for game in &state.view.games {
        by_genre
            .entry(game.genre.as_str())
            .or_default()
            .push([game.user_score, game.critic_score]);
    }

    ui.strong("User vs critic scores");
    Plot::new("score_scatter")
        .legend(Legend::default())
        .x_axis_label("User score")
        .y_axis_label("Critic score")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (genre, points) in by_genre {
                let points = Points::new(PlotPoints::from(points))
                    .name(genre)
                    .color(state.genre_colors.color_for(genre))
                    .radius(2.5);
                plot_ui.points(points);
            }
        });
}

// ---------------------------------------------------------------------------
// Stacked release chart
// ---------------------------------------------------------------------------

/// Releases per year (x) stacked by platform (y).
///
/// Bands are filled one trapezoid per pair of consecutive years; polygon
/// fills must be convex.
pub fn release_area(ui: &mut Ui, state: &AppState) {
    ui.strong("Releases by year and platform");
    Plot::new("release_area")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Games released")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &state.view.series {
                let color = state.platform_colors.color_for(&series.platform);

                for pair in series.points.windows(2) {
                    let [x0, lo0, hi0] = pair[0];
                    let [x1, lo1, hi1] = pair[1];
                    let quad: PlotPoints = vec![[x0, lo0], [x1, lo1], [x1, hi1], [x0, hi0]].into();
                    plot_ui.polygon(
                        Polygon::new(quad)
                            .name(&series.platform)
                            .fill_color(color.gamma_multiply(0.6))
                            .stroke(Stroke::NONE),
                    );
                }

                let upper: PlotPoints = series.points.iter().map(|&[x, _, hi]| [x, hi]).collect();
                plot_ui.line(Line::new(upper).name(&series.platform).color(color).width(1.5));
            }
        });
}
