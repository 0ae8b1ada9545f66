//! The index manager.
//!
//! [`IndexManager`] is the only writer of index entries. It is a thin,
//! stateless view over a [`LedgerStub`]: every entry it adds or removes is
//! staged in the stub's transaction alongside the primary-record write that
//! caused it.

use tracing::debug;

use lcs_ledger::{LedgerStub, StateIterator};

use crate::error::{IndexError, IndexResult};
use crate::name::IndexName;

/// Constant partition for the status-like indexes and `nid`.
pub const CURRENT: &str = "current";

/// Value stored under every index key. Only presence is meaningful.
pub const SENTINEL: &[u8] = &[0x00];

/// Maintains index entries through a ledger stub.
#[derive(Clone, Copy)]
pub struct IndexManager<'a> {
    stub: &'a dyn LedgerStub,
}

impl std::fmt::Debug for IndexManager<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexManager")
            .field("tx_id", &self.stub.tx_id())
            .finish()
    }
}

impl<'a> IndexManager<'a> {
    pub fn new(stub: &'a dyn LedgerStub) -> Self {
        Self { stub }
    }

    /// Composite key of the entry for `entity_id` in the given partition.
    pub fn entry_key(
        &self,
        index: IndexName,
        partition: &[&str],
        entity_id: &str,
    ) -> IndexResult<String> {
        let mut parts = Vec::with_capacity(partition.len() + 1);
        parts.extend_from_slice(partition);
        parts.push(entity_id);
        self.stub
            .create_composite_key(index.object_type(), &parts)
            .map_err(IndexError::from_key_error)
    }

    /// Insert `entity_id` into a partition. Re-adding is harmless.
    pub fn add_entry(
        &self,
        index: IndexName,
        partition: &[&str],
        entity_id: &str,
    ) -> IndexResult<()> {
        let key = self.entry_key(index, partition, entity_id)?;
        self.stub.put_state(&key, SENTINEL)?;
        debug!(%index, ?partition, entity_id, "index entry added");
        Ok(())
    }

    /// Remove `entity_id` from a partition. Removing an absent entry is a
    /// no-op.
    pub fn remove_entry(
        &self,
        index: IndexName,
        partition: &[&str],
        entity_id: &str,
    ) -> IndexResult<()> {
        let key = self.entry_key(index, partition, entity_id)?;
        self.stub.del_state(&key)?;
        debug!(%index, ?partition, entity_id, "index entry removed");
        Ok(())
    }

    /// Returns `true` if the committed ledger holds the entry.
    pub fn contains(
        &self,
        index: IndexName,
        partition: &[&str],
        entity_id: &str,
    ) -> IndexResult<bool> {
        let key = self.entry_key(index, partition, entity_id)?;
        Ok(self.stub.get_state(&key)?.is_some())
    }

    /// Lazily enumerate the entity IDs in a partition, in key order.
    pub fn scan_partition(
        &self,
        index: IndexName,
        partition: &[&str],
    ) -> IndexResult<PartitionScan<'a>> {
        let entries = self
            .stub
            .state_by_partial_composite_key(index.object_type(), partition)
            .map_err(IndexError::from_key_error)?;
        Ok(PartitionScan {
            stub: self.stub,
            index,
            entries,
        })
    }

    pub fn add_current(&self, index: IndexName, entity_id: &str) -> IndexResult<()> {
        self.add_entry(index, &[CURRENT], entity_id)
    }

    pub fn remove_current(&self, index: IndexName, entity_id: &str) -> IndexResult<()> {
        self.remove_entry(index, &[CURRENT], entity_id)
    }

    pub fn contains_current(&self, index: IndexName, entity_id: &str) -> IndexResult<bool> {
        self.contains(index, &[CURRENT], entity_id)
    }

    pub fn scan_current(&self, index: IndexName) -> IndexResult<PartitionScan<'a>> {
        self.scan_partition(index, &[CURRENT])
    }
}

/// Entity IDs of one index partition, in ledger key order.
///
/// Single pass: the scan is consumed as it is iterated.
pub struct PartitionScan<'a> {
    stub: &'a dyn LedgerStub,
    index: IndexName,
    entries: StateIterator<'a>,
}

impl Iterator for PartitionScan<'_> {
    type Item = IndexResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = match self.entries.next()? {
            Ok(entry) => entry,
            Err(e) => return Some(Err(e.into())),
        };

        let result = self
            .stub
            .split_composite_key(&entry.key)
            .map_err(IndexError::from_key_error)
            .and_then(|(_, mut parts)| {
                parts.pop().ok_or_else(|| {
                    IndexError::KeyConstruction(format!(
                        "{} entry {:?} carries no entity id",
                        self.index, entry.key
                    ))
                })
            });
        Some(result)
    }
}
