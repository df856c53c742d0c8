use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Cell – a single raw value read from a source table
// ---------------------------------------------------------------------------

/// A loosely-typed cell as read from CSV / JSON / Parquet, before
/// preprocessing coerces the columns we care about.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Missing,
}

impl Cell {
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Numeric view of the cell. Text is parsed, so `"2006.0"` and `"8.5"` work.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            Cell::Text(s) => s.trim().parse::<f64>().ok(),
            Cell::Missing => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Missing => write!(f, "<missing>"),
        }
    }
}

/// A source table before preprocessing: header names and rows of cells, in file order.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

// ---------------------------------------------------------------------------
// GameRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single game release after preprocessing.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub name: String,
    pub platform: String,
    pub genre: String,
    pub year_of_release: i32,
    pub critic_score: f64,
    pub user_score: f64,
}

// ---------------------------------------------------------------------------
// GameDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The preprocessed dataset with pre-computed distinct values per dimension.
///
/// Built once and never mutated; every filter call borrows it.
#[derive(Debug, Clone, Default)]
pub struct GameDataset {
    records: Vec<GameRecord>,
    platforms: BTreeSet<String>,
    genres: BTreeSet<String>,
    years: BTreeSet<i32>,
}

impl GameDataset {
    /// Build distinct-value indices from the records.
    pub fn from_records(records: Vec<GameRecord>) -> Self {
        let mut platforms = BTreeSet::new();
        let mut genres = BTreeSet::new();
        let mut years = BTreeSet::new();

        for rec in &records {
            platforms.insert(rec.platform.clone());
            genres.insert(rec.genre.clone());
            years.insert(rec.year_of_release);
        }

        GameDataset {
            records,
            platforms,
            genres,
            years,
        }
    }

    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    pub fn platforms(&self) -> &BTreeSet<String> {
        &self.platforms
    }

    pub fn genres(&self) -> &BTreeSet<String> {
        &self.genres
    }

    pub fn years(&self) -> &BTreeSet<i32> {
        &self.years
    }

    /// Smallest and largest release year, if any records exist.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        Some((*self.years.first()?, *self.years.last()?))
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Filter outputs
// ---------------------------------------------------------------------------

/// A matching record with the downstream column names: `name` is exposed
/// as `value` and `year_of_release` as `year`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedGame {
    pub value: String,
    pub platform: String,
    pub genre: String,
    pub year: i32,
    pub critic_score: f64,
    pub user_score: f64,
}

impl From<&GameRecord> for MatchedGame {
    fn from(rec: &GameRecord) -> Self {
        MatchedGame {
            value: rec.name.clone(),
            platform: rec.platform.clone(),
            genre: rec.genre.clone(),
            year: rec.year_of_release,
            critic_score: rec.critic_score,
            user_score: rec.user_score,
        }
    }
}

/// Number of matching releases for one `(year, platform)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ReleaseCount {
    pub year: i32,
    pub platform: String,
    pub count: usize,
}

/// Result of applying a selection to the dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum FilteredView {
    Rows(Vec<MatchedGame>),
    Counts(Vec<ReleaseCount>),
}

impl FilteredView {
    /// Number of rows (matches or groups) in the view.
    pub fn len(&self) -> usize {
        match self {
            FilteredView::Rows(rows) => rows.len(),
            FilteredView::Counts(groups) => groups.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
