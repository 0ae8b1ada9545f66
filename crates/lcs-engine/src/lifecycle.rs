use tracing::{info, warn};

use lcs_index::{IndexManager, IndexName};
use lcs_ledger::LedgerStub;
use lcs_types::{ExamResult, ExamSlot, License, LicenseStatus, INITIAL_POINTS};

use crate::error::{EngineError, EngineResult};

/// IDs seeded by [`LicenseEngine::init_ledger`].
pub const DEMO_LICENSES: [&str; 2] = ["LICENSE0", "LICENSE1"];

/// License lifecycle state machine.
///
/// Every transition rewrites the primary record and moves its index entries
/// through the same stub, so they commit or vanish together.
pub struct LicenseEngine<'a> {
    stub: &'a dyn LedgerStub,
    indexes: IndexManager<'a>,
    initial_points: i64,
}

impl<'a> LicenseEngine<'a> {
    pub fn new(stub: &'a dyn LedgerStub) -> Self {
        Self {
            stub,
            indexes: IndexManager::new(stub),
            initial_points: INITIAL_POINTS,
        }
    }

    /// Override the point balance given to new licenses.
    pub fn with_initial_points(mut self, points: i64) -> Self {
        self.initial_points = points;
        self
    }

    // ---- Transitions ----

    /// Issue a learner license.
    pub fn create(&self, id: &str, name: &str, nid: &str) -> EngineResult<License> {
        self.ensure_unissued(id, nid)?;

        let license = License::learner(id, name, nid, self.initial_points);
        self.store(id, &license)?;
        self.indexes.add_current(IndexName::Learner, id)?;
        self.indexes.add_current(IndexName::Nid, nid)?;

        info!(license = id, tx_id = self.stub.tx_id(), "learner license created");
        Ok(license)
    }

    /// Record the outcome of one exam. Passing all three queues the license
    /// for promotion without changing its status.
    pub fn record_exam(&self, slot: ExamSlot, id: &str, result: &str) -> EngineResult<License> {
        let result: ExamResult = result
            .parse()
            .map_err(|e: lcs_types::TypeError| EngineError::InvalidArgument(e.to_string()))?;

        let mut license = self.load(id)?;
        license.set_exam(slot, result);
        self.store(id, &license)?;

        if license.all_exams_passed() {
            self.indexes.add_current(IndexName::Waiting, id)?;
            info!(license = id, "all exams passed, queued for promotion");
        }
        Ok(license)
    }

    pub fn promote(&self, id: &str) -> EngineResult<License> {
        self.indexes.remove_current(IndexName::Learner, id)?;
        self.indexes.remove_current(IndexName::Waiting, id)?;
        let license = self.set_status(id, LicenseStatus::Active)?;

        info!(license = id, tx_id = self.stub.tx_id(), "license promoted to active");
        Ok(license)
    }

    /// Suspend a license. Clears any pending-revocation marker.
    pub fn revoke(&self, id: &str) -> EngineResult<License> {
        self.indexes.remove_current(IndexName::Active, id)?;
        self.indexes.remove_current(IndexName::ToStall, id)?;
        let license = self.set_status(id, LicenseStatus::Stalled)?;

        info!(license = id, tx_id = self.stub.tx_id(), "license revoked");
        Ok(license)
    }

    /// Remove a license and every status entry that could reference it.
    ///
    /// The `nid` entry stays, so the NID cannot be reused.
    pub fn delete(&self, id: &str) -> EngineResult<()> {
        for index in IndexName::STATUS.into_iter().chain([IndexName::ToStall]) {
            self.indexes.remove_current(index, id)?;
        }
        self.stub.del_state(id)?;

        info!(license = id, tx_id = self.stub.tx_id(), "license deleted");
        Ok(())
    }

    /// Seed two active demonstration licenses.
    ///
    /// Fails with [`EngineError::DuplicateKey`] if either ID or NID is
    /// already taken, so an existing license is never overwritten.
    pub fn init_ledger(&self) -> EngineResult<Vec<License>> {
        let mut seeded = Vec::with_capacity(DEMO_LICENSES.len());
        for (n, id) in DEMO_LICENSES.into_iter().enumerate() {
            let nid = format!("12{n}");
            self.ensure_unissued(id, &nid)?;

            let mut license = License::learner(id, format!("Test{n}"), nid, self.initial_points);
            license.status = LicenseStatus::Active;
            for slot in ExamSlot::ALL {
                license.set_exam(slot, ExamResult::Pass);
            }

            self.store(id, &license)?;
            self.indexes.add_current(IndexName::for_status(license.status), id)?;
            self.indexes.add_current(IndexName::Nid, &license.nid)?;
            seeded.push(license);
        }

        info!(count = seeded.len(), "ledger seeded");
        Ok(seeded)
    }

    // ---- Queries ----

    /// Raw stored record, exactly as written.
    pub fn get(&self, id: &str) -> EngineResult<Option<Vec<u8>>> {
        Ok(self.stub.get_state(id)?)
    }

    /// Licenses in an index's `current` partition, in scan order.
    ///
    /// An entry whose primary record is gone yields `None`.
    pub fn list(&self, index: IndexName) -> EngineResult<Vec<Option<License>>> {
        let mut licenses = Vec::new();
        for id in self.indexes.scan_current(index)? {
            let id = id?;
            match self.stub.get_state(&id)? {
                Some(bytes) => licenses.push(Some(License::from_slice_lenient(&bytes))),
                None => {
                    warn!(%index, license = %id, "dangling index entry");
                    licenses.push(None);
                }
            }
        }
        Ok(licenses)
    }

    // ---- Records ----

    /// Decode the stored license, or the zero-valued one if absent or corrupt.
    pub(crate) fn load(&self, id: &str) -> EngineResult<License> {
        Ok(self
            .stub
            .get_state(id)?
            .map(|bytes| License::from_slice_lenient(&bytes))
            .unwrap_or_default())
    }

    pub(crate) fn store(&self, id: &str, license: &License) -> EngineResult<()> {
        let bytes = license.to_vec()?;
        self.stub.put_state(id, &bytes)?;
        Ok(())
    }

    /// Rewrite the status and add the matching status index entry.
    fn set_status(&self, id: &str, status: LicenseStatus) -> EngineResult<License> {
        let mut license = self.load(id)?;
        license.status = status;
        self.store(id, &license)?;
        self.indexes.add_current(IndexName::for_status(status), id)?;
        Ok(license)
    }

    fn ensure_unissued(&self, id: &str, nid: &str) -> EngineResult<()> {
        if self.stub.get_state(id)?.is_some() {
            return Err(EngineError::DuplicateKey {
                kind: "license",
                key: id.to_string(),
            });
        }
        if self.indexes.contains_current(IndexName::Nid, nid)? {
            return Err(EngineError::DuplicateKey {
                kind: "NID",
                key: nid.to_string(),
            });
        }
        Ok(())
    }
}
