/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("invalid key {key:?}: {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("invalid composite key: {0}")]
    CompositeKey(String),

    #[error("caller identity attributes are unavailable: {0}")]
    IdentityUnavailable(String),

    #[error("ledger lock poisoned")]
    LockPoisoned,
}

/// Result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
