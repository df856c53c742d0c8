/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read table → preprocess → GameDataset
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ GameDataset  │  Vec<GameRecord>, distinct platforms/genres/years
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  Selection → matching games / release counts
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stack    │  release counts → stacked area bands
///   └──────────┘
/// ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stack;
