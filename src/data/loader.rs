use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{Cell, GameDataset, GameRecord, RawTable};

pub const NAME: &str = "Name";
pub const PLATFORM: &str = "Platform";
pub const YEAR_OF_RELEASE: &str = "Year_of_Release";
pub const GENRE: &str = "Genre";
pub const CRITIC_SCORE: &str = "Critic_Score";
pub const USER_SCORE: &str = "User_Score";

/// Text cells read as missing, in addition to the empty string.
const NA_MARKERS: [&str; 6] = ["NA", "N/A", "NaN", "nan", "null", "NULL"];

// ---------------------------------------------------------------------------
// Errors and configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}: column '{column}' has non-numeric value '{value}'")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },
    #[error("expected a top-level JSON array of records")]
    NotAnArray,
    #[error("JSON row {0} is not an object")]
    NotAnObject(usize),
}

/// Fixed preprocessing applied once after reading the source table.
#[derive(Debug, Clone, PartialEq)]
pub struct PreprocessConfig {
    /// Rows released before this year are dropped.
    pub min_year: i32,
    /// `User_Score` value marking a game as not yet rated.
    pub unrated_marker: String,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            min_year: 2000,
            unrated_marker: "tbd".to_string(),
        }
    }
}

/// How many rows each preprocessing step removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreprocessReport {
    pub rows_read: usize,
    pub before_min_year: usize,
    pub missing_values: usize,
    pub unrated: usize,
    pub kept: usize,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and preprocess a game dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one game per line
/// * `.json`    – `[{ "Name": ..., "Platform": ..., ... }, ...]`
/// * `.parquet` – one column per field, as written by Pandas or Polars
pub fn load_file(path: &Path, config: &PreprocessConfig) -> Result<GameDataset> {
    let table = read_table(path)?;
    let (dataset, report) = preprocess(&table, config)
        .with_context(|| format!("preprocessing {}", path.display()))?;

    log::info!(
        "{}: read {} rows, dropped {} before {}, {} with missing values, {} unrated; kept {}",
        path.display(),
        report.rows_read,
        report.before_min_year,
        config.min_year,
        report.missing_values,
        report.unrated,
        report.kept
    );
    Ok(dataset)
}

/// Read a source table without any preprocessing.
pub fn read_table(path: &Path) -> Result<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => read_csv(path),
        "json" => read_json(path),
        "parquet" | "pq" => read_parquet(path),
        other => Err(DatasetError::UnsupportedExtension(other.to_string()).into()),
    }
}

// ---------------------------------------------------------------------------
// Preprocessing
// ---------------------------------------------------------------------------

/// Turn a raw table into the immutable dataset.
///
/// Steps, in order: keep `Year_of_Release >= min_year`, drop rows with any
/// missing cell, drop unrated `User_Score`, coerce scores and year to numbers.
pub fn preprocess(
    table: &RawTable,
    config: &PreprocessConfig,
) -> Result<(GameDataset, PreprocessReport), DatasetError> {
    let col = |name: &'static str| {
        table
            .column_index(name)
            .ok_or(DatasetError::MissingColumn(name))
    };
    let name_idx = col(NAME)?;
    let platform_idx = col(PLATFORM)?;
    let year_idx = col(YEAR_OF_RELEASE)?;
    let genre_idx = col(GENRE)?;
    let critic_idx = col(CRITIC_SCORE)?;
    let user_idx = col(USER_SCORE)?;

    let mut report = PreprocessReport {
        rows_read: table.rows.len(),
        ..PreprocessReport::default()
    };
    let mut records = Vec::new();

    for (row_no, row) in table.rows.iter().enumerate() {
        let year = match row[year_idx].as_f64() {
            Some(y) if y >= f64::from(config.min_year) => y,
            _ => {
                report.before_min_year += 1;
                continue;
            }
        };

        if row.iter().any(Cell::is_missing) {
            log::debug!("row {row_no}: dropped, missing values");
            report.missing_values += 1;
            continue;
        }

        if matches!(&row[user_idx], Cell::Text(s) if s.trim() == config.unrated_marker) {
            report.unrated += 1;
            continue;
        }

        records.push(GameRecord {
            name: row[name_idx].to_string(),
            platform: row[platform_idx].to_string(),
            genre: row[genre_idx].to_string(),
            year_of_release: year as i32,
            critic_score: number(&row[critic_idx], row_no, CRITIC_SCORE)?,
            user_score: number(&row[user_idx], row_no, USER_SCORE)?,
        });
    }

    report.kept = records.len();
    Ok((GameDataset::from_records(records), report))
}

fn number(cell: &Cell, row: usize, column: &'static str) -> Result<f64, DatasetError> {
    cell.as_f64().ok_or_else(|| DatasetError::InvalidNumber {
        row,
        column,
        value: cell.to_string(),
    })
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

fn read_csv(path: &Path) -> Result<RawTable> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let columns: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(csv_cell).collect());
    }

    Ok(RawTable { columns, rows })
}

fn csv_cell(s: &str) -> Cell {
    let s = s.trim();
    if s.is_empty() || NA_MARKERS.contains(&s) {
        Cell::Missing
    } else {
        Cell::Text(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
/// A key absent from a record reads as missing.
fn read_json(path: &Path) -> Result<RawTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;
    let records = root.as_array().ok_or(DatasetError::NotAnArray)?;

    let mut columns: Vec<String> = Vec::new();
    let mut objects = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or(DatasetError::NotAnObject(i))?;
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
        objects.push(obj);
    }

    let rows = objects
        .into_iter()
        .map(|obj| {
            columns
                .iter()
                .map(|c| obj.get(c).map(json_cell).unwrap_or(Cell::Missing))
                .collect()
        })
        .collect();

    Ok(RawTable { columns, rows })
}

fn json_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::Null => Cell::Missing,
        JsonValue::Number(n) => n.as_f64().map(Cell::Number).unwrap_or(Cell::Missing),
        JsonValue::String(s) => csv_cell(s),
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet reader
// ---------------------------------------------------------------------------

fn read_parquet(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            let cells = batch
                .columns()
                .iter()
                .map(|col| parquet_cell(col, row))
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("parquet row {row}"))?;
            rows.push(cells);
        }
    }

    Ok(RawTable { columns, rows })
}

fn parquet_cell(col: &ArrayRef, row: usize) -> Result<Cell> {
    if col.is_null(row) {
        return Ok(Cell::Missing);
    }
    let cell = match col.data_type() {
        DataType::Utf8 => csv_cell(col.as_string::<i32>().value(row)),
        DataType::LargeUtf8 => csv_cell(col.as_string::<i64>().value(row)),
        DataType::Int32 => Cell::Number(f64::from(col.as_primitive::<Int32Type>().value(row))),
        DataType::Int64 => Cell::Number(col.as_primitive::<Int64Type>().value(row) as f64),
        DataType::Float32 => Cell::Number(f64::from(col.as_primitive::<Float32Type>().value(row))),
        DataType::Float64 => {
            let v = col.as_primitive::<Float64Type>().value(row);
            if v.is_nan() {
                Cell::Missing
            } else {
                Cell::Number(v)
            }
        }
        _ => Cell::Text(array_value_to_string(col, row).context("formatting parquet value")?),
    };
    Ok(cell)
}
