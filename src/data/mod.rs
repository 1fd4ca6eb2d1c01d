//! Data layer: table model, loading, filtering and export.
//!
//! Architecture:
//! ```text
//!  .csv / .tsv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Dataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  Dataset  │  headers + Vec<Row>
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  label-presence predicate → filtered indices → Navigator
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  export   │  rows + labels → quoted CSV
//!   └──────────┘
//! ```
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
