use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::model::{MatchedGame, ReleaseCount};

pub const GAME_HEADERS: [&str; 6] = ["value", "platform", "genre", "year", "critic_score", "user_score"];
pub const COUNT_HEADERS: [&str; 3] = ["year", "platform", "count"];

/// Write matching games as CSV. The header is written even when `games` is empty.
pub fn write_games_csv(path: &Path, games: &[MatchedGame]) -> Result<()> {
    write_csv(path, &GAME_HEADERS, games)
}

/// Write per-(year, platform) release counts as CSV.
pub fn write_counts_csv(path: &Path, counts: &[ReleaseCount]) -> Result<()> {
    write_csv(path, &COUNT_HEADERS, counts)
}

fn write_csv<T: Serialize>(path: &Path, headers: &[&str], rows: &[T]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(headers).context("writing CSV header")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}
