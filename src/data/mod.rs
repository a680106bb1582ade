/// Data layer: core types, loading, filtering, aggregation, chart specs.
///
/// Architecture:
/// ```text
///   Cropland Value.csv / Crop Prices.csv / Index Prices.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV, normalize values → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterSpec → FilterOutcome (rows or empty)
///   └──────────┘
///        │
///        ├──────────────────────┐
///        ▼                      ▼
///   ┌───────────┐         ┌──────────┐
///   │ aggregate  │         │  chart    │
///   │ stats /    │         │ ChartSpec │
///   │ latest     │         └──────────┘
///   └───────────┘
/// ```
pub mod aggregate;
pub mod chart;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
