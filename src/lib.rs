//! Core of the tagging tool: everything except rendering.
//!
//! ```text
//!  .csv / .tsv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Dataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────┐      ┌────────────┐
//!   │ RowLabelStore │ ◄── │ normalize   │  label column → LabelSet per row
//!   └──────────────┘      └────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  FilterMode → filtered indices → Navigator
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  export   │  Dataset + labels → quoted CSV
//!   └──────────┘
//! ```
//!
//! The presentation layer drives a [`state::Session`] exclusively through
//! [`state::Intent`] values and re-renders from its query methods.

pub mod config;
pub mod data;
pub mod error;
pub mod labels;
pub mod state;

pub use config::TaggerConfig;
pub use data::filter::{FilterMode, NavOutcome, Navigator};
pub use data::model::{Dataset, Row};
pub use error::{SessionError, StoreError};
pub use labels::{CustomLabelCatalog, LabelSet, RowLabelStore};
pub use state::{Intent, Phase, Session};
