/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawRow → CatalogRecord (+ title_length, year_added)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Catalog  │  immutable Vec<CatalogRecord>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  type selector → fresh Catalog copy
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  count / explode / pivot → small chart tables
///   └───────────┘
/// ```

pub mod aggregate;
pub mod dates;
pub mod filter;
pub mod loader;
pub mod model;
