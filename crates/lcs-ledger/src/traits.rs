use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::composite;
use crate::error::LedgerResult;

/// A committed key/value pair returned by a range or partial-key scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateEntry {
    pub key: String,
    pub value: Vec<u8>,
}

/// One committed change to a key.
///
/// `value` is `None` for deletions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyModification {
    pub tx_id: String,
    pub value: Option<Vec<u8>>,
    pub timestamp: DateTime<Utc>,
    pub is_delete: bool,
}

/// Lazy, single-pass iterator over scan results.
pub type StateIterator<'a> = Box<dyn Iterator<Item = LedgerResult<StateEntry>> + 'a>;

/// Lazy, single-pass iterator over a key's change history, oldest first.
pub type HistoryIterator<'a> = Box<dyn Iterator<Item = LedgerResult<KeyModification>> + 'a>;

/// The view of the ledger available to a single invocation.
///
/// Every read and write issued through a stub belongs to one transaction:
/// either all writes are committed together or none are. Implementations
/// read committed state; writes become visible only after commit.
pub trait LedgerStub: Send + Sync {
    /// Identifier of the transaction this stub belongs to.
    fn tx_id(&self) -> &str;

    /// Read the committed value of a key. `Ok(None)` if absent.
    fn get_state(&self, key: &str) -> LedgerResult<Option<Vec<u8>>>;

    /// Stage a write of `value` under `key`.
    fn put_state(&self, key: &str, value: &[u8]) -> LedgerResult<()>;

    /// Stage a deletion. Deleting an absent key is not an error.
    fn del_state(&self, key: &str) -> LedgerResult<()>;

    /// Iterate every committed entry whose composite key starts with
    /// `object_type` followed by `attributes`, in key order.
    fn state_by_partial_composite_key(
        &self,
        object_type: &str,
        attributes: &[&str],
    ) -> LedgerResult<StateIterator<'_>>;

    /// Iterate the committed change history of a key, oldest first.
    fn history_for_key(&self, key: &str) -> LedgerResult<HistoryIterator<'_>>;

    /// Look up an attribute of the authenticated caller.
    ///
    /// Returns `Ok(None)` if the caller's identity does not carry the
    /// attribute, and an error if the identity could not be inspected.
    fn caller_attribute(&self, name: &str) -> LedgerResult<Option<String>>;

    fn create_composite_key(&self, object_type: &str, attributes: &[&str]) -> LedgerResult<String> {
        composite::create_composite_key(object_type, attributes)
    }

    fn split_composite_key(&self, key: &str) -> LedgerResult<(String, Vec<String>)> {
        composite::split_composite_key(key)
    }
}
