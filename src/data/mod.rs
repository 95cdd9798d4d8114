/// Data layer: core types, loading, filtering and chart series.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset   (memoized by cache::DatasetLoader)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<ClaimRecord>, filter options, date bounds
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterSelection → ClaimsView
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  series   │  group → accumulate → sort, one table per chart
///   └──────────┘
/// ```

pub mod cache;
pub mod filter;
pub mod loader;
pub mod model;
pub mod series;
