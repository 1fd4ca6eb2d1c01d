//! Label state: parsing existing label cells, per-row label sets, and the
//! user's own label catalog.

pub mod catalog;
pub mod normalize;
pub mod store;

pub use catalog::CustomLabelCatalog;
pub use normalize::{normalize_cell, LabelDiscovery};
pub use store::{LabelSet, RowLabelStore};
