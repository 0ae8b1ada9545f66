use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use lcs_ledger::{KeyModification, LedgerStub};

use crate::error::{EngineError, EngineResult};

/// One committed version of a key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "TxId")]
    pub tx_id: String,
    /// The stored JSON document, or `null` for a deletion.
    #[serde(rename = "Value")]
    pub value: Option<Value>,
    #[serde(rename = "Timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "IsDelete")]
    pub is_delete: bool,
}

impl From<KeyModification> for HistoryEntry {
    fn from(modification: KeyModification) -> Self {
        let value = match (modification.is_delete, modification.value) {
            (false, Some(bytes)) => Some(
                serde_json::from_slice(&bytes)
                    .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned())),
            ),
            _ => None,
        };
        Self {
            tx_id: modification.tx_id,
            value,
            timestamp: modification.timestamp,
            is_delete: modification.is_delete,
        }
    }
}

/// Reads the ledger's change log for entity keys.
pub struct HistoryService<'a> {
    stub: &'a dyn LedgerStub,
}

impl<'a> HistoryService<'a> {
    pub fn new(stub: &'a dyn LedgerStub) -> Self {
        Self { stub }
    }

    /// Versions of `key` in commit order. Single pass.
    pub fn history(
        &self,
        key: &str,
    ) -> EngineResult<impl Iterator<Item = EngineResult<HistoryEntry>> + 'a> {
        let modifications = self.stub.history_for_key(key)?;
        Ok(modifications.map(|m| m.map(HistoryEntry::from).map_err(EngineError::from)))
    }
}
