use std::path::PathBuf;

use clap::Parser;

use crate::data::loader::PreprocessConfig;

#[derive(Debug, Parser)]
#[command(
    name = "game-explorer",
    version,
    about = "Explore video-game releases by genre, platform and year"
)]
pub struct Cli {
    /// Dataset to open at startup (.csv, .json or .parquet).
    #[arg(long, short = 'd', value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Drop games released before this year.
    #[arg(long, default_value_t = 2000)]
    pub min_year: i32,

    /// User_Score value that marks a game as not yet rated.
    #[arg(long, default_value = "tbd")]
    pub unrated_marker: String,
}

impl Cli {
    pub fn preprocess_config(&self) -> PreprocessConfig {
        PreprocessConfig {
            min_year: self.min_year,
            unrated_marker: self.unrated_marker.clone(),
        }
    }
}
