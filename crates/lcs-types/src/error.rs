use thiserror::Error;

/// Errors produced when parsing domain vocabulary from strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown license status: {0}")]
    UnknownStatus(String),

    #[error("invalid exam result: {0} (expected Pass or Fail)")]
    InvalidExamResult(String),

    #[error("unknown role: {0}")]
    UnknownRole(String),

    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    #[error("invalid point balance: {0:?}")]
    InvalidPoints(String),
}
