use thiserror::Error;

use lcs_engine::EngineError;
use lcs_gate::GateError;
use lcs_ledger::LedgerError;

#[derive(Debug, Error)]
pub enum ContractError {
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<GateError> for ContractError {
    fn from(error: GateError) -> Self {
        Self::Engine(EngineError::Auth(error))
    }
}

impl From<serde_json::Error> for ContractError {
    fn from(error: serde_json::Error) -> Self {
        Self::Engine(EngineError::from(error))
    }
}

pub type ContractResult<T> = Result<T, ContractError>;
