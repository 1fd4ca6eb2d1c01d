use std::path::PathBuf;

use thiserror::Error;

/// Failures of a single point operation on the [`crate::RowLabelStore`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("row index {index} is out of range (dataset has {len} rows)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Everything that can block a requested session transition.
///
/// None of these are fatal: the session stays in the state it was in before
/// the failing intent.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The file could not be parsed as tabular data.
    #[error("could not load {}: {cause:#}", .path.display())]
    Input {
        path: PathBuf,
        cause: anyhow::Error,
    },

    /// A required choice (text column, loaded dataset, ...) is missing.
    #[error("{0}")]
    Precondition(String),

    #[error("could not export to {}: {cause:#}", .path.display())]
    Export {
        path: PathBuf,
        cause: anyhow::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SessionError {
    pub(crate) fn precondition(msg: impl Into<String>) -> Self {
        SessionError::Precondition(msg.into())
    }
}
