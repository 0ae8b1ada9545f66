use thiserror::Error;

use lcs_gate::GateError;
use lcs_index::IndexError;
use lcs_ledger::LedgerError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("access denied: {0}")]
    Auth(#[from] GateError),

    #[error("incorrect number of arguments: expecting {expected}, got {actual}")]
    InvalidArgumentCount { expected: usize, actual: usize },

    #[error("index key error: {0}")]
    IndexKey(String),

    #[error("not an integer: {0:?}")]
    NumericParse(String),

    #[error("point balance overflow: {balance} minus {deduction}")]
    PointsOverflow { balance: i64, deduction: i64 },

    #[error("{kind} already exists: {key}")]
    DuplicateKey { kind: &'static str, key: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<IndexError> for EngineError {
    fn from(error: IndexError) -> Self {
        match error {
            IndexError::KeyConstruction(reason) => Self::IndexKey(reason),
            IndexError::Ledger(inner) => Self::Ledger(inner),
        }
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
