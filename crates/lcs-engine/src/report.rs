use tracing::{info, warn};

use lcs_index::{IndexManager, IndexName};
use lcs_ledger::LedgerStub;
use lcs_types::ViolationReport;

use crate::error::{EngineError, EngineResult};
use crate::lifecycle::LicenseEngine;

/// Files violation reports and deducts their points from the holder.
pub struct ReportEngine<'a> {
    stub: &'a dyn LedgerStub,
    indexes: IndexManager<'a>,
    licenses: LicenseEngine<'a>,
}

impl<'a> ReportEngine<'a> {
    pub fn new(stub: &'a dyn LedgerStub) -> Self {
        Self {
            stub,
            indexes: IndexManager::new(stub),
            licenses: LicenseEngine::new(stub),
        }
    }

    /// File a report against `holder` and deduct `points` from its balance.
    ///
    /// A balance that reaches zero or below marks the holder for revocation;
    /// the status itself is left alone.
    pub fn create_report(
        &self,
        id: &str,
        holder: &str,
        level: &str,
        desc: &str,
        points: &str,
    ) -> EngineResult<ViolationReport> {
        if self.stub.get_state(id)?.is_some() {
            return Err(EngineError::DuplicateKey {
                kind: "report",
                key: id.to_string(),
            });
        }

        let report = ViolationReport::new(id, holder, level, desc, points);
        self.stub.put_state(id, &report.to_vec()?)?;
        self.indexes.add_entry(IndexName::Crime, &[holder], id)?;

        let deduction = parse_points(points)?;
        let mut license = self.licenses.load(holder)?;
        let balance = license
            .points()
            .map_err(|_| EngineError::NumericParse(license.point.clone()))?;
        let remaining = balance
            .checked_sub(deduction)
            .ok_or(EngineError::PointsOverflow { balance, deduction })?;
        license.set_points(remaining);
        self.licenses.store(holder, &license)?;

        if remaining <= 0 {
            self.indexes.add_current(IndexName::ToStall, holder)?;
            info!(license = holder, remaining, "balance exhausted, marked for revocation");
        }

        info!(report = id, license = holder, deduction, remaining, "violation reported");
        Ok(report)
    }

    /// Reports filed against `holder`, in scan order.
    pub fn list_by_holder(&self, holder: &str) -> EngineResult<Vec<Option<ViolationReport>>> {
        let mut reports = Vec::new();
        for id in self.indexes.scan_partition(IndexName::Crime, &[holder])? {
            let id = id?;
            match self.stub.get_state(&id)? {
                Some(bytes) => reports.push(Some(ViolationReport::from_slice_lenient(&bytes))),
                None => {
                    warn!(license = holder, report = %id, "dangling crime entry");
                    reports.push(None);
                }
            }
        }
        Ok(reports)
    }
}

fn parse_points(raw: &str) -> EngineResult<i64> {
    raw.parse()
        .map_err(|_| EngineError::NumericParse(raw.to_string()))
}
