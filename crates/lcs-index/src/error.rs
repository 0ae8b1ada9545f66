//! Error types for the index crate.

use lcs_ledger::LedgerError;

/// Errors that can occur during index operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    /// A composite key could not be built or split.
    #[error("index key error: {0}")]
    KeyConstruction(String),

    /// The underlying ledger operation failed.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

impl IndexError {
    pub(crate) fn from_key_error(error: LedgerError) -> Self {
        match error {
            LedgerError::CompositeKey(reason) => Self::KeyConstruction(reason),
            other => Self::Ledger(other),
        }
    }
}

/// Convenience alias for index results.
pub type IndexResult<T> = Result<T, IndexError>;
