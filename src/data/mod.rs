/// Data layer: core types, loading, cleaning/clipping, and output.
///
/// Architecture:
/// ```text
///  .csv / .xlsx            .geojson / .shp
///        │                       │
///        ▼                       ▼
///   ┌──────────┐           ┌──────────┐
///   │  loader   │           │  loader   │  boundary → MultiPolygon
///   └──────────┘           └──────────┘
///        │                       │
///        ▼                       │
///   ┌──────────────┐             │
///   │ SourceDataset │◄────────────┘
///   └──────────────┘   filter: exclusion list + point-in-polygon
///        │
///        ▼  (sim layer draws the synthetic fields)
///   ┌──────────────┐
///   │    writer     │  SimulatedRecord rows → CSV
///   └──────────────┘
/// ```
pub mod filter;
pub mod loader;
pub mod model;
pub mod writer;
