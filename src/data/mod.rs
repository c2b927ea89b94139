/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → TrackDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ TrackDataset  │  Vec<Track>, distinct genres
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  genre selection → FilteredView
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  (genre, sentiment) → count
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
