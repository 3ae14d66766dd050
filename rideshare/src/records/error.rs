//! Record loading error types.

use std::path::PathBuf;

use crate::dispatch::DispatchError;
use crate::domain::DomainError;

/// A single record could not be turned into an entity.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    /// Required column absent or empty
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// Column present but its value is not valid for the entity
    #[error("invalid field `{field}`: {source}")]
    InvalidField {
        field: &'static str,
        source: DomainError,
    },

    /// Timestamp in a format we do not understand
    #[error("invalid timestamp in `{field}`: {value:?}")]
    InvalidTimestamp { field: &'static str, value: String },
}

/// Errors from loading a data directory.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// File could not be opened or a row could not be parsed as CSV
    #[error("failed to read {}: {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },

    /// Row parsed but failed validation
    #[error("{} record {record}: {source}", path.display())]
    Record {
        path: PathBuf,
        /// 1-based data row number, not counting the header
        record: usize,
        source: RecordError,
    },

    /// Entities are valid on their own but do not form a consistent graph
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
