use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const PLATFORMS: [(&str, i32, i32); 8] = [
    ("PS2", 2000, 2011),
    ("XB", 2001, 2008),
    ("GC", 2001, 2007),
    ("DS", 2004, 2014),
    ("Wii", 2006, 2016),
    ("X360", 2005, 2016),
    ("PS3", 2006, 2016),
    ("PC", 1995, 2016),
];
const GENRES: [&str; 8] = [
    "Action", "Sports", "Shooter", "Racing", "Role-Playing", "Platform", "Misc", "Strategy",
];
const RATINGS: [&str; 4] = ["E", "E10+", "T", "M"];
const ROWS: usize = 3000;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// One synthetic row, with the gaps and placeholders real exports contain.
struct SampleGame {
    name: String,
    platform: &'static str,
    year: Option<f64>,
    genre: &'static str,
    critic_score: Option<f64>,
    user_score: Option<String>,
    rating: Option<&'static str>,
}

fn generate(rng: &mut SimpleRng) -> Vec<SampleGame> {
    (0..ROWS)
        .map(|i| {
            let (platform, first, last) = PLATFORMS[rng.below(PLATFORMS.len())];
            // Some releases predate the default cut-off year.
            let first = first - 3;
            let year = first + rng.below((last - first + 1) as usize) as i32;
            let critic = rng.gauss(70.0, 12.0).clamp(15.0, 98.0).round();
            let user = (critic / 10.0 + rng.gauss(0.0, 1.0)).clamp(0.5, 9.7);

            let roll = rng.next_f64();
            SampleGame {
                name: format!("Game {i:04}"),
                platform,
                year: (roll >= 0.02).then_some(f64::from(year)),
                genre: GENRES[rng.below(GENRES.len())],
                critic_score: (roll >= 0.10).then_some(critic),
                user_score: if roll < 0.15 {
                    Some("tbd".to_string())
                } else {
                    Some(format!("{user:.1}"))
                },
                rating: (rng.next_f64() >= 0.05).then(|| RATINGS[rng.below(RATINGS.len())]),
            }
        })
        .collect()
}

fn write_csv(path: &str, games: &[SampleGame]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record([
        "Name",
        "Platform",
        "Year_of_Release",
        "Genre",
        "Critic_Score",
        "User_Score",
        "Rating",
    ])?;
    for g in games {
        writer.write_record([
            g.name.clone(),
            g.platform.to_string(),
            g.year.map(|y| format!("{y:.1}")).unwrap_or_default(),
            g.genre.to_string(),
            g.critic_score.map(|c| format!("{c:.1}")).unwrap_or_default(),
            g.user_score.clone().unwrap_or_default(),
            g.rating.unwrap_or_default().to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &str, games: &[SampleGame]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Name", DataType::Utf8, false),
        Field::new("Platform", DataType::Utf8, false),
        Field::new("Year_of_Release", DataType::Float64, true),
        Field::new("Genre", DataType::Utf8, false),
        Field::new("Critic_Score", DataType::Float64, true),
        Field::new("User_Score", DataType::Utf8, true),
        Field::new("Rating", DataType::Utf8, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(games.iter().map(|g| g.name.as_str()))),
            Arc::new(StringArray::from_iter_values(games.iter().map(|g| g.platform))),
            Arc::new(Float64Array::from_iter(games.iter().map(|g| g.year))),
            Arc::new(StringArray::from_iter_values(games.iter().map(|g| g.genre))),
            Arc::new(Float64Array::from_iter(games.iter().map(|g| g.critic_score))),
            Arc::new(StringArray::from_iter(games.iter().map(|g| g.user_score.as_deref()))),
            Arc::new(StringArray::from_iter(games.iter().map(|g| g.rating))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let games = generate(&mut rng);

    write_csv("games.csv", &games)?;
    write_parquet("games.parquet", &games)?;

    println!("Wrote {} games to games.csv and games.parquet", games.len());
    Ok(())
}
