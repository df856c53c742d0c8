use std::collections::{BTreeMap, BTreeSet};

use super::model::{FilteredView, GameDataset, GameRecord, MatchedGame, ReleaseCount};

// ---------------------------------------------------------------------------
// Selection: one explicit predicate per dimension
// ---------------------------------------------------------------------------

/// Restriction on a categorical dimension (platform or genre).
///
/// `OneOf` with an empty set behaves exactly like `Any`: an empty selection
/// never means "match nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Restriction {
    #[default]
    Any,
    OneOf(BTreeSet<String>),
}

impl Restriction {
    /// Build a restriction from selected values, collapsing an empty list to `Any`.
    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if set.is_empty() {
            Restriction::Any
        } else {
            Restriction::OneOf(set)
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        match self {
            Restriction::Any => true,
            Restriction::OneOf(set) => set.is_empty(),
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Restriction::Any => true,
            Restriction::OneOf(set) => set.is_empty() || set.contains(value),
        }
    }

    /// Explicitly selected values (empty when unrestricted).
    pub fn selected(&self) -> impl Iterator<Item = &String> {
        let set = match self {
            Restriction::Any => None,
            Restriction::OneOf(set) => Some(set),
        };
        set.into_iter().flatten()
    }

    pub fn contains(&self, value: &str) -> bool {
        matches!(self, Restriction::OneOf(set) if set.contains(value))
    }

    /// Add or remove a single value; removing the last value yields `Any`.
    pub fn toggle(&mut self, value: &str) {
        let mut set = match std::mem::take(self) {
            Restriction::Any => BTreeSet::new(),
            Restriction::OneOf(set) => set,
        };
        if !set.remove(value) {
            set.insert(value.to_string());
        }
        *self = Restriction::one_of(set);
    }
}

/// Restriction on the release year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum YearSelection {
    #[default]
    Any,
    /// Inclusive range. Years inside it match even if the dataset has no
    /// record for them; `lo > hi` matches nothing.
    Range { lo: i32, hi: i32 },
}

impl YearSelection {
    pub fn range(lo: i32, hi: i32) -> Self {
        YearSelection::Range { lo, hi }
    }

    pub fn matches(&self, year: i32) -> bool {
        match *self {
            YearSelection::Any => true,
            YearSelection::Range { lo, hi } => lo <= year && year <= hi,
        }
    }
}

/// The combined platform / year / genre criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub platforms: Restriction,
    pub years: YearSelection,
    pub genres: Restriction,
}

impl Selection {
    /// Whether a record satisfies all three predicates.
    pub fn matches(&self, record: &GameRecord) -> bool {
        self.genres.matches(&record.genre)
            && self.platforms.matches(&record.platform)
            && self.years.matches(record.year_of_release)
    }

    /// This selection with the platform dimension left free.
    pub fn without_platforms(&self) -> Selection {
        Selection {
            platforms: Restriction::Any,
            ..self.clone()
        }
    }

    /// This selection with the genre dimension left free.
    pub fn without_genres(&self) -> Selection {
        Selection {
            genres: Restriction::Any,
            ..self.clone()
        }
    }
}

// ---------------------------------------------------------------------------
// Filtering and aggregation
// ---------------------------------------------------------------------------

fn matching<'a>(
    dataset: &'a GameDataset,
    selection: &'a Selection,
) -> impl Iterator<Item = &'a GameRecord> + 'a {
    dataset.records().iter().filter(move |rec| selection.matches(rec))
}

/// Apply `selection` to `dataset`, optionally collapsing the matches into
/// per-(year, platform) release counts.
pub fn filter(dataset: &GameDataset, selection: &Selection, aggregate: bool) -> FilteredView {
    if aggregate {
        FilteredView::Counts(release_counts(dataset, selection))
    } else {
        FilteredView::Rows(matching_games(dataset, selection))
    }
}

/// Matching records in dataset order.
pub fn matching_games(dataset: &GameDataset, selection: &Selection) -> Vec<MatchedGame> {
    matching(dataset, selection).map(MatchedGame::from).collect()
}

/// Number of matching records.
pub fn count_matches(dataset: &GameDataset, selection: &Selection) -> usize {
    matching(dataset, selection).count()
}

/// Matching records grouped by `(year, platform)`, sorted by that key.
pub fn release_counts(dataset: &GameDataset, selection: &Selection) -> Vec<ReleaseCount> {
    let mut groups: BTreeMap<(i32, &str), usize> = BTreeMap::new();
    for rec in matching(dataset, selection) {
        *groups
            .entry((rec.year_of_release, rec.platform.as_str()))
            .or_default() += 1;
    }

    groups
        .into_iter()
        .map(|((year, platform), count)| ReleaseCount {
            year,
            platform: platform.to_string(),
            count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Choice lists
// ---------------------------------------------------------------------------

/// Platforms still reachable under the year and genre restrictions.
pub fn available_platforms(dataset: &GameDataset, selection: &Selection) -> BTreeSet<String> {
    let free = selection.without_platforms();
    matching(dataset, &free)
        .map(|rec| rec.platform.clone())
        .collect()
}

/// Genres still reachable under the year and platform restrictions.
pub fn available_genres(dataset: &GameDataset, selection: &Selection) -> BTreeSet<String> {
    let free = selection.without_genres();
    matching(dataset, &free)
        .map(|rec| rec.genre.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(name: &str, platform: &str, genre: &str, year: i32) -> GameRecord {
        GameRecord {
            name: name.to_string(),
            platform: platform.to_string(),
            genre: genre.to_string(),
            year_of_release: year,
            critic_score: 75.0,
            user_score: 7.5,
        }
    }

    fn scenario() -> GameDataset {
        GameDataset::from_records(vec![
            record("A", "X", "RPG", 2005),
            record("B", "X", "RPG", 2005),
            record("C", "Y", "Action", 2006),
            record("D", "Y", "RPG", 2005),
            record("E", "X", "Action", 2007),
        ])
    }

    fn values(view: &FilteredView) -> Vec<String> {
        match view {
            FilteredView::Rows(rows) => rows.iter().map(|r| r.value.clone()).collect(),
            FilteredView::Counts(_) => panic!("expected rows"),
        }
    }

    fn counts(view: FilteredView) -> BTreeSet<(i32, String, usize)> {
        match view {
            FilteredView::Counts(groups) => groups
                .into_iter()
                .map(|g| (g.year, g.platform, g.count))
                .collect(),
            FilteredView::Rows(_) => panic!("expected counts"),
        }
    }

    #[test]
    fn scenario_rows_match_all_three_predicates() {
        let ds = scenario();
        let sel = Selection {
            platforms: Restriction::one_of(["X"]),
            years: YearSelection::range(2005, 2006),
            genres: Restriction::one_of(["RPG"]),
        };

        let view = filter(&ds, &sel, false);
        assert_eq!(values(&view), ["A", "B"]);
    }

    #[test]
    fn scenario_unrestricted_aggregation() {
        let ds = scenario();
        let groups = counts(filter(&ds, &Selection::default(), true));

        let expected: BTreeSet<(i32, String, usize)> = [
            (2005, "X", 2),
            (2006, "Y", 1),
            (2005, "Y", 1),
            (2007, "X", 1),
        ]
        .into_iter()
        .map(|(y, p, c)| (y, p.to_string(), c))
        .collect();
        assert_eq!(groups, expected);
        assert_eq!(groups.iter().map(|g| g.2).sum::<usize>(), 5);
    }

    #[test]
    fn matched_rows_carry_renamed_fields() {
        let ds = scenario();
        let rows = matching_games(&ds, &Selection::default());
        assert_eq!(rows[2].value, "C");
        assert_eq!(rows[2].year, 2006);
        assert_eq!(rows[2].platform, "Y");
    }

    #[test]
    fn unrestricted_selection_returns_whole_dataset_in_order() {
        let ds = scenario();
        let view = filter(&ds, &Selection::default(), false);
        assert_eq!(values(&view), ["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn empty_one_of_is_unrestricted() {
        let ds = scenario();
        let sel = Selection {
            platforms: Restriction::OneOf(BTreeSet::new()),
            genres: Restriction::one_of(Vec::<String>::new()),
            ..Selection::default()
        };
        assert_eq!(sel.genres, Restriction::Any);
        assert_eq!(count_matches(&ds, &sel), 5);
    }

    #[test]
    fn year_range_includes_years_absent_from_dataset() {
        let ds = GameDataset::from_records(vec![
            record("A", "X", "RPG", 2005),
            record("B", "X", "RPG", 2007),
        ]);

        let wide = Selection {
            years: YearSelection::range(2005, 2007),
            ..Selection::default()
        };
        assert_eq!(count_matches(&ds, &wide), 2);

        let gap_only = Selection {
            years: YearSelection::range(2006, 2006),
            ..Selection::default()
        };
        assert!(filter(&ds, &gap_only, false).is_empty());
    }

    #[test]
    fn inverted_year_range_matches_nothing() {
        let ds = scenario();
        let sel = Selection {
            years: YearSelection::range(2007, 2005),
            ..Selection::default()
        };
        assert!(filter(&ds, &sel, false).is_empty());
        assert!(filter(&ds, &sel, true).is_empty());
    }

    #[test]
    fn unknown_values_never_match() {
        let ds = scenario();
        let sel = Selection {
            platforms: Restriction::one_of(["Dreamcast"]),
            ..Selection::default()
        };
        assert_eq!(filter(&ds, &sel, false), FilteredView::Rows(Vec::new()));
        assert_eq!(filter(&ds, &sel, true), FilteredView::Counts(Vec::new()));
    }

    #[test]
    fn release_counts_are_sorted_by_year_then_platform() {
        let ds = scenario();
        let groups = release_counts(&ds, &Selection::default());
        let keys: Vec<(i32, &str)> = groups
            .iter()
            .map(|g| (g.year, g.platform.as_str()))
            .collect();
        assert_eq!(keys, [(2005, "X"), (2005, "Y"), (2006, "Y"), (2007, "X")]);
    }

    #[test]
    fn choice_lists_ignore_their_own_dimension() {
        let ds = scenario();
        let sel = Selection {
            platforms: Restriction::one_of(["X"]),
            years: YearSelection::range(2006, 2007),
            genres: Restriction::one_of(["Action"]),
        };

        let platforms: Vec<String> = available_platforms(&ds, &sel).into_iter().collect();
        assert_eq!(platforms, ["X", "Y"]);

        let genres: Vec<String> = available_genres(&ds, &sel).into_iter().collect();
        assert_eq!(genres, ["Action"]);
    }

    #[test]
    fn toggle_adds_and_removes_values() {
        let mut r = Restriction::Any;
        r.toggle("PS2");
        assert!(r.contains("PS2"));
        r.toggle("Wii");
        assert_eq!(r.selected().count(), 2);
        r.toggle("PS2");
        r.toggle("Wii");
        assert_eq!(r, Restriction::Any);
    }

    // -- Property tests --

    const PLATFORMS: [&str; 3] = ["PS2", "X360", "Wii"];
    const GENRES: [&str; 3] = ["Action", "RPG", "Sports"];

    fn arb_dataset() -> impl Strategy<Value = GameDataset> {
        prop::collection::vec((0..3usize, 0..3usize, 2000..2017i32), 0..40).prop_map(|rows| {
            let records = rows
                .into_iter()
                .enumerate()
                .map(|(i, (p, g, y))| record(&format!("game{i}"), PLATFORMS[p], GENRES[g], y))
                .collect();
            GameDataset::from_records(records)
        })
    }

    fn arb_restriction(pool: &'static [&'static str; 3]) -> impl Strategy<Value = Restriction> {
        prop::collection::vec(0..3usize, 0..3)
            .prop_map(move |idx| Restriction::one_of(idx.into_iter().map(|i| pool[i])))
    }

    fn arb_years() -> impl Strategy<Value = YearSelection> {
        prop_oneof![
            Just(YearSelection::Any),
            (1998..2019i32, 1998..2019i32).prop_map(|(lo, hi)| YearSelection::range(lo, hi)),
        ]
    }

    fn arb_selection() -> impl Strategy<Value = Selection> {
        (arb_restriction(&PLATFORMS), arb_years(), arb_restriction(&GENRES)).prop_map(
            |(platforms, years, genres)| Selection {
                platforms,
                years,
                genres,
            },
        )
    }

    proptest! {
        #[test]
        fn prop_filter_never_adds_rows(ds in arb_dataset(), sel in arb_selection()) {
            prop_assert!(filter(&ds, &sel, false).len() <= ds.len());
        }

        #[test]
        fn prop_unrestricted_filter_is_identity(ds in arb_dataset()) {
            let rows = matching_games(&ds, &Selection::default());
            let expected: Vec<MatchedGame> = ds.records().iter().map(MatchedGame::from).collect();
            prop_assert_eq!(rows, expected);
        }

        #[test]
        fn prop_adding_year_restriction_only_shrinks(
            ds in arb_dataset(),
            platforms in arb_restriction(&PLATFORMS),
            lo in 1998..2019i32,
            hi in 1998..2019i32,
        ) {
            let loose = Selection { platforms, ..Selection::default() };
            let tight = Selection { years: YearSelection::range(lo, hi), ..loose.clone() };

            let loose_rows = matching_games(&ds, &loose);
            let tight_rows = matching_games(&ds, &tight);
            prop_assert!(tight_rows.iter().all(|r| loose_rows.contains(r)));
        }

        #[test]
        fn prop_counts_sum_to_match_count(ds in arb_dataset(), sel in arb_selection()) {
            let total: usize = release_counts(&ds, &sel).iter().map(|g| g.count).sum();
            prop_assert_eq!(total, count_matches(&ds, &sel));
        }
    }
}
