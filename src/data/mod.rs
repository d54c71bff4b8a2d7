/// Data layer: canonical records, feed adapters, retrieval and summaries.
///
/// Architecture:
/// ```text
///  Socrata JSON   ArcGIS JSON      .json / .csv on disk
///        │             │                  │
///        ▼             ▼                  ▼
///   ┌──────────┐  ┌──────────┐      ┌──────────┐
///   │  fetch    │  │  fetch    │      │  loader   │
///   └──────────┘  └──────────┘      └──────────┘
///        │             │                  │
///        ▼             ▼                  ▼
///   ┌─────────────────────────────────────────┐
///   │ adapter   payload → Vec<CivicRecord>      │
///   └─────────────────────────────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  summary  │  records → CitySummary
///   └──────────┘
/// ```

pub mod adapter;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod model;
pub mod sample;
pub mod summary;
