use std::collections::BTreeSet;
use std::path::Path;

use crate::color::ColorMap;
use crate::data::filter::{
    available_genres, available_platforms, matching_games, release_counts, Restriction, Selection,
    YearSelection,
};
use crate::data::loader::{self, PreprocessConfig};
use crate::data::model::{GameDataset, MatchedGame, ReleaseCount};
use crate::data::stack::{stack_release_counts, AreaSeries};

// ---------------------------------------------------------------------------
// View model: everything the UI renders, derived from one Selection
// ---------------------------------------------------------------------------

/// Outputs recomputed from the current selection on every input event.
#[derive(Debug, Clone, Default)]
pub struct ViewModel {
    /// Matching games (scatter plot, table, count).
    pub games: Vec<MatchedGame>,
    /// Matching games per (year, platform).
    pub counts: Vec<ReleaseCount>,
    /// Stacked bands for the area chart.
    pub series: Vec<AreaSeries>,
    /// Platforms offered in the selector: still reachable ones plus the selected ones.
    pub platform_choices: BTreeSet<String>,
    /// Genres offered in the selector: still reachable ones plus the selected ones.
    pub genre_choices: BTreeSet<String>,
}

impl ViewModel {
    pub fn compute(dataset: &GameDataset, selection: &Selection) -> Self {
        let counts = release_counts(dataset, selection);
        let series = stack_release_counts(&counts);

        let mut platform_choices = available_platforms(dataset, selection);
        platform_choices.extend(selection.platforms.selected().cloned());
        let mut genre_choices = available_genres(dataset, selection);
        genre_choices.extend(selection.genres.selected().cloned());

        ViewModel {
            games: matching_games(dataset, selection),
            counts,
            series,
            platform_choices,
            genre_choices,
        }
    }

    pub fn selected_count(&self) -> usize {
        self.games.len()
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<GameDataset>,

    /// The single authoritative selection.
    pub selection: Selection,

    /// Derived outputs (cached until the selection changes).
    pub view: ViewModel,

    /// Stable colours per genre (scatter) and per platform (area chart).
    pub genre_colors: ColorMap,
    pub platform_colors: ColorMap,

    /// Preprocessing applied to every file loaded.
    pub config: PreprocessConfig,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: PreprocessConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Load a file with the configured preprocessing. On failure the
    /// current dataset is kept and the error is shown in the status line.
    pub fn load_file(&mut self, path: &Path) {
        match loader::load_file(path, &self.config) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} games ({} platforms, {} genres)",
                    dataset.len(),
                    dataset.platforms().len(),
                    dataset.genres().len()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded dataset and reset the selection to cover it.
    pub fn set_dataset(&mut self, dataset: GameDataset) {
        self.selection = Selection {
            years: dataset
                .year_bounds()
                .map(|(lo, hi)| YearSelection::range(lo, hi))
                .unwrap_or_default(),
            ..Selection::default()
        };
        self.genre_colors = ColorMap::new(dataset.genres());
        self.platform_colors = ColorMap::new(dataset.platforms());
        self.dataset = Some(dataset);
        self.status_message = None;
        self.recompute();
    }

    /// Recompute every derived output from the current selection.
    pub fn recompute(&mut self) {
        self.view = match &self.dataset {
            Some(ds) => ViewModel::compute(ds, &self.selection),
            None => ViewModel::default(),
        };
    }

    pub fn toggle_platform(&mut self, platform: &str) {
        self.selection.platforms.toggle(platform);
        self.recompute();
    }

    pub fn toggle_genre(&mut self, genre: &str) {
        self.selection.genres.toggle(genre);
        self.recompute();
    }

    pub fn clear_platforms(&mut self) {
        self.selection.platforms = Restriction::Any;
        self.recompute();
    }

    pub fn clear_genres(&mut self) {
        self.selection.genres = Restriction::Any;
        self.recompute();
    }

    /// Set the inclusive year range. Endpoints are kept as given; an
    /// inverted range simply matches nothing.
    pub fn set_years(&mut self, lo: i32, hi: i32) {
        self.selection.years = YearSelection::range(lo, hi);
        self.recompute();
    }

    /// Current year range, falling back to the dataset bounds when unrestricted.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        match self.selection.years {
            YearSelection::Range { lo, hi } => Some((lo, hi)),
            YearSelection::Any => self.dataset.as_ref().and_then(GameDataset::year_bounds),
        }
    }
}
