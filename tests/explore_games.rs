use std::io::Write;

use game_explorer::data::filter::{filter, Restriction, Selection, YearSelection};
use game_explorer::data::loader::{load_file, PreprocessConfig};
use game_explorer::data::model::FilteredView;
use game_explorer::data::stack::stack_release_counts;
use game_explorer::state::AppState;
use tempfile::NamedTempFile;

const GAMES_CSV: &str = "\
Name,Platform,Year_of_Release,Genre,NA_sales,EU_sales,JP_sales,Other_sales,Critic_Score,User_Score,Rating
Wii Sports,Wii,2006.0,Sports,41.36,28.96,3.77,8.45,76.0,8,E
Mario Kart Wii,Wii,2008.0,Racing,15.68,12.76,3.79,3.29,82.0,8.3,E
Super Mario Bros.,NES,1985.0,Platform,29.08,3.58,6.81,0.77,,,
Wii Fit,Wii,2007.0,Sports,8.92,8.03,3.6,2.15,80.0,7.7,E
Grand Theft Auto V,PS3,2013.0,Action,7.02,9.09,0.98,3.96,97.0,8.2,M
Grand Theft Auto V,X360,2013.0,Action,9.66,5.14,0.06,1.41,97.0,8.1,M
Call of Duty: Ghosts,PS3,2013.0,Shooter,4.1,3.63,0.38,1.25,71.0,2.6,M
FIFA 14,PS3,2013.0,Sports,0.78,4.24,0.07,1.37,86.0,4.3,E
Just Dance 2014,Wii,2013.0,Misc,1.2,0.7,0.0,0.15,,tbd,E10+
Zumba Fitness,Wii,2010.0,Sports,3.45,2.59,0.0,0.66,,tbd,E
";

fn games_file() -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    write!(file, "{GAMES_CSV}").unwrap();
    file
}

#[test]
fn load_then_filter_and_aggregate() {
    let file = games_file();
    let ds = load_file(file.path(), &PreprocessConfig::default()).unwrap();
    assert_eq!(ds.len(), 7);

    let sel = Selection {
        platforms: Restriction::one_of(["PS3"]),
        years: YearSelection::range(2010, 2016),
        genres: Restriction::one_of(["Action", "Sports"]),
    };
    let FilteredView::Rows(rows) = filter(&ds, &sel, false) else {
        panic!("expected rows");
    };
    let names: Vec<&str> = rows.iter().map(|r| r.value.as_str()).collect();
    assert_eq!(names, ["Grand Theft Auto V", "FIFA 14"]);

    let FilteredView::Counts(counts) = filter(&ds, &Selection::default(), true) else {
        panic!("expected counts");
    };
    assert_eq!(counts.iter().map(|c| c.count).sum::<usize>(), ds.len());

    let series = stack_release_counts(&counts);
    let platforms: Vec<&str> = series.iter().map(|s| s.platform.as_str()).collect();
    assert_eq!(platforms, ["PS3", "Wii", "X360"]);
    let top_2013 = series
        .last()
        .and_then(|s| s.points.iter().find(|p| p[0] == 2013.0))
        .map(|p| p[2]);
    assert_eq!(top_2013, Some(4.0));
}

#[test]
fn view_model_tracks_selection_changes() {
    let file = games_file();
    let mut state = AppState::new(PreprocessConfig::default());
    state.load_file(file.path());

    assert_eq!(state.year_range(), Some((2006, 2013)));
    assert_eq!(state.view.selected_count(), 7);

    state.toggle_platform("Wii");
    assert_eq!(state.view.selected_count(), 3);

    state.set_years(2007, 2008);
    assert_eq!(state.view.selected_count(), 2);
    let genres: Vec<&str> = state.view.genre_choices.iter().map(String::as_str).collect();
    assert_eq!(genres, ["Racing", "Sports"]);
}
