//! Error types for the data-loader crate.
//!
//! Two families of errors live here:
//! - Contract violations (`InvalidIndex`) that callers should never trigger
//!   with validated inputs. These are propagated with `?` and fail loudly.
//! - "Not ready" states (alignment and column resolution failures) that a
//!   host reports to the user while the engine simply does not run.
//!
//! Parse and I/O errors come from the file loaders.

use thiserror::Error;

/// Errors that can occur while loading, aligning or indexing data
///
/// The `#[derive(Error)]` macro from thiserror implements `std::error::Error`
/// and `Display` from the `#[error(...)]` attributes.
#[derive(Error, Debug)]
pub enum DataError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in data file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A person, item or node index outside the valid range
    #[error("Invalid {what} index {index} (valid range is 0..{len})")]
    InvalidIndex {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// Two collaborating inputs disagree on their dimensions
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Person names declared by the network and the item table differ as sets
    #[error(
        "Person names do not match the item table (missing: [{}], unexpected: [{}])",
        .missing.join(", "),
        .unexpected.join(", ")
    )]
    AlignmentMismatch {
        /// Names the network declares but the item table lacks
        missing: Vec<String>,
        /// Names the item table declares but the network lacks
        unexpected: Vec<String>,
    },

    /// The same person name appears more than once
    #[error("Duplicate person name: {0}")]
    DuplicateName(String),

    /// No column can provide person names
    #[error("No applicable column with person names")]
    NoApplicableNameColumn,

    /// No column can provide item names
    #[error("No applicable column with item names")]
    NoApplicableItemColumn,

    /// Several columns qualify and no explicit choice was made
    #[error("Column for {role} is ambiguous, choose one of: {}", .candidates.join(", "))]
    AmbiguousColumn {
        role: String,
        candidates: Vec<String>,
    },

    /// Neither the network nodes nor an item table carry choices
    #[error("No item choices: the network has no choice data and no item table was given")]
    NoChoices,
}

impl DataError {
    /// True for validation states a host shows as "not ready" rather than
    /// treating as a failure.
    pub fn is_not_ready(&self) -> bool {
        matches!(
            self,
            DataError::AlignmentMismatch { .. }
                | DataError::DuplicateName(_)
                | DataError::NoApplicableNameColumn
                | DataError::NoApplicableItemColumn
                | DataError::AmbiguousColumn { .. }
                | DataError::NoChoices
                | DataError::ShapeMismatch(_)
        )
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataError>;
