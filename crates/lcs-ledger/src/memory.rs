use std::collections::BTreeMap;
use std::sync::{Mutex, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::composite;
use crate::error::{LedgerError, LedgerResult};
use crate::identity::CallerIdentity;
use crate::traits::{HistoryIterator, KeyModification, LedgerStub, StateEntry, StateIterator};

/// In-memory ledger for tests, local tooling, and embedding.
///
/// Committed state is a sorted key/value map plus an append-only change log
/// per key. All mutation goes through [`Transaction`]s.
pub struct InMemoryLedger {
    inner: RwLock<LedgerSnapshot>,
}

/// Serializable image of a ledger's committed state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Number of committed transactions.
    pub height: u64,
    pub world: BTreeMap<String, Vec<u8>>,
    pub history: BTreeMap<String, Vec<KeyModification>>,
}

/// Summary of a committed transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitReceipt {
    pub tx_id: String,
    pub height: u64,
    pub timestamp: DateTime<Utc>,
    pub writes: usize,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::from_snapshot(LedgerSnapshot::default())
    }

    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Self {
        Self {
            inner: RwLock::new(snapshot),
        }
    }

    /// Copy of the committed state.
    pub fn snapshot(&self) -> LedgerResult<LedgerSnapshot> {
        Ok(self.read()?.clone())
    }

    /// Open a transaction on behalf of `caller`.
    pub fn begin(&self, caller: CallerIdentity) -> Transaction<'_> {
        Transaction {
            ledger: self,
            tx_id: uuid::Uuid::now_v7().simple().to_string(),
            caller,
            writes: Mutex::new(BTreeMap::new()),
        }
    }

    /// Committed value of a key, outside any transaction.
    pub fn get(&self, key: &str) -> LedgerResult<Option<Vec<u8>>> {
        Ok(self.read()?.world.get(key).cloned())
    }

    /// All committed keys in key order.
    pub fn keys(&self) -> LedgerResult<Vec<String>> {
        Ok(self.read()?.world.keys().cloned().collect())
    }

    pub fn height(&self) -> LedgerResult<u64> {
        Ok(self.read()?.height)
    }

    fn read(&self) -> LedgerResult<std::sync::RwLockReadGuard<'_, LedgerSnapshot>> {
        self.inner.read().map_err(|_| LedgerError::LockPoisoned)
    }

    fn apply(
        &self,
        tx_id: &str,
        writes: BTreeMap<String, Option<Vec<u8>>>,
    ) -> LedgerResult<CommitReceipt> {
        let mut state = self.inner.write().map_err(|_| LedgerError::LockPoisoned)?;
        let timestamp = Utc::now();
        let count = writes.len();

        for (key, value) in writes {
            match &value {
                Some(bytes) => {
                    state.world.insert(key.clone(), bytes.clone());
                }
                None => {
                    state.world.remove(&key);
                }
            }
            state.history.entry(key).or_default().push(KeyModification {
                tx_id: tx_id.to_string(),
                is_delete: value.is_none(),
                value,
                timestamp,
            });
        }

        state.height += 1;
        Ok(CommitReceipt {
            tx_id: tx_id.to_string(),
            height: state.height,
            timestamp,
            writes: count,
        })
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct("InMemoryLedger");
        if let Ok(state) = self.inner.read() {
            debug
                .field("height", &state.height)
                .field("keys", &state.world.len());
        }
        debug.finish()
    }
}

/// A single all-or-nothing unit of work against an [`InMemoryLedger`].
///
/// Reads observe committed state only. Writes are buffered (last write to a
/// key wins) and applied atomically by [`Transaction::commit`]. Dropping the
/// transaction discards them.
pub struct Transaction<'a> {
    ledger: &'a InMemoryLedger,
    tx_id: String,
    caller: CallerIdentity,
    writes: Mutex<BTreeMap<String, Option<Vec<u8>>>>,
}

impl Transaction<'_> {
    /// Number of distinct keys written so far.
    pub fn pending_writes(&self) -> LedgerResult<usize> {
        Ok(self.write_set()?.len())
    }

    /// Apply every buffered write to the ledger.
    pub fn commit(self) -> LedgerResult<CommitReceipt> {
        let writes = self
            .writes
            .into_inner()
            .map_err(|_| LedgerError::LockPoisoned)?;
        let receipt = self.ledger.apply(&self.tx_id, writes)?;
        debug!(
            tx_id = %receipt.tx_id,
            height = receipt.height,
            writes = receipt.writes,
            "transaction committed"
        );
        Ok(receipt)
    }

    /// Discard every buffered write.
    pub fn rollback(self) {
        let discarded = self.write_set().map(|w| w.len()).unwrap_or(0);
        debug!(tx_id = %self.tx_id, discarded, "transaction rolled back");
    }

    fn write_set(
        &self,
    ) -> LedgerResult<std::sync::MutexGuard<'_, BTreeMap<String, Option<Vec<u8>>>>> {
        self.writes.lock().map_err(|_| LedgerError::LockPoisoned)
    }

    fn stage(&self, key: &str, value: Option<Vec<u8>>) -> LedgerResult<()> {
        if key.is_empty() {
            return Err(LedgerError::InvalidKey {
                key: String::new(),
                reason: "key must not be empty".into(),
            });
        }
        self.write_set()?.insert(key.to_string(), value);
        Ok(())
    }
}

impl LedgerStub for Transaction<'_> {
    fn tx_id(&self) -> &str {
        &self.tx_id
    }

    fn get_state(&self, key: &str) -> LedgerResult<Option<Vec<u8>>> {
        self.ledger.get(key)
    }

    fn put_state(&self, key: &str, value: &[u8]) -> LedgerResult<()> {
        self.stage(key, Some(value.to_vec()))
    }

    fn del_state(&self, key: &str) -> LedgerResult<()> {
        self.stage(key, None)
    }

    fn state_by_partial_composite_key(
        &self,
        object_type: &str,
        attributes: &[&str],
    ) -> LedgerResult<StateIterator<'_>> {
        let prefix = composite::create_composite_key(object_type, attributes)?;
        let state = self.ledger.read()?;
        let entries: Vec<StateEntry> = state
            .world
            .range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
            .map(|(key, value)| StateEntry {
                key: key.clone(),
                value: value.clone(),
            })
            .collect();
        Ok(Box::new(entries.into_iter().map(Ok)))
    }

    fn history_for_key(&self, key: &str) -> LedgerResult<HistoryIterator<'_>> {
        let state = self.ledger.read()?;
        let modifications = state.history.get(key).cloned().unwrap_or_default();
        Ok(Box::new(modifications.into_iter().map(Ok)))
    }

    fn caller_attribute(&self, name: &str) -> LedgerResult<Option<String>> {
        self.caller.attribute(name)
    }
}
