/// Data layer: core types, loading, filtering and reshaping.
///
/// Architecture:
/// ```text
///  .csv / .parquet / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → BudgetTable
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ BudgetTable │  Vec<BudgetRow>, year-column layout (immutable)
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  cascade of five level selections → indices + options
///   └──────────┘
///        │
///        ├──────────────────────┐
///        ▼                      ▼
///   ┌──────────┐          ┌──────────┐
///   │ reshape  │ + label  │ summary  │  percentage change per label
///   └──────────┘          └──────────┘
/// ```

pub mod filter;
pub mod label;
pub mod loader;
pub mod model;
pub mod reshape;
pub mod summary;
