use lcs_engine::{EngineError, HistoryEntry, HistoryService, LicenseEngine, ReportEngine};
use lcs_index::IndexName;
use lcs_ledger::LedgerStub;
use lcs_types::{ExamSlot, Operation};

use crate::config::ContractConfig;
use crate::error::ContractResult;

/// Run an already-authorized operation and produce its JSON payload.
pub fn route(
    stub: &dyn LedgerStub,
    config: &ContractConfig,
    operation: Operation,
    args: &[String],
) -> ContractResult<Vec<u8>> {
    if args.len() != operation.arity() {
        return Err(EngineError::InvalidArgumentCount {
            expected: operation.arity(),
            actual: args.len(),
        }
        .into());
    }

    let licenses = LicenseEngine::new(stub).with_initial_points(config.initial_points);
    let arg = |i: usize| args[i].as_str();

    let payload = match operation {
        Operation::InitLedger => {
            licenses.init_ledger()?;
            Vec::new()
        }
        Operation::CreateLearnerLicense => {
            licenses.create(arg(0), arg(1), arg(2))?.to_vec()?
        }
        Operation::InputTest1Result => {
            licenses.record_exam(ExamSlot::First, arg(0), arg(1))?.to_vec()?
        }
        Operation::InputTest2Result => {
            licenses.record_exam(ExamSlot::Second, arg(0), arg(1))?.to_vec()?
        }
        Operation::InputTest3Result => {
            licenses.record_exam(ExamSlot::Third, arg(0), arg(1))?.to_vec()?
        }
        Operation::UpgradeLearnerToActive => licenses.promote(arg(0))?.to_vec()?,
        Operation::RevokeLicense => licenses.revoke(arg(0))?.to_vec()?,
        Operation::DeleteLicense => {
            licenses.delete(arg(0))?;
            Vec::new()
        }
        Operation::CreatePoliceReport => ReportEngine::new(stub)
            .create_report(arg(0), arg(1), arg(2), arg(3), arg(4))?
            .to_vec()?,
        Operation::QueryLicense => licenses.get(arg(0))?.unwrap_or_default(),
        Operation::QueryLearnerList => serde_json::to_vec(&licenses.list(IndexName::Learner)?)?,
        Operation::QueryWaitingList => serde_json::to_vec(&licenses.list(IndexName::Waiting)?)?,
        Operation::QueryActiveList => serde_json::to_vec(&licenses.list(IndexName::Active)?)?,
        Operation::QueryToStallList => serde_json::to_vec(&licenses.list(IndexName::ToStall)?)?,
        Operation::QueryStalledList => serde_json::to_vec(&licenses.list(IndexName::Stalled)?)?,
        Operation::QueryComplainByLicenseNo => {
            serde_json::to_vec(&ReportEngine::new(stub).list_by_holder(arg(0))?)?
        }
        Operation::GetHistoryForAsset => {
            let entries = HistoryService::new(stub)
                .history(arg(0))?
                .collect::<Result<Vec<HistoryEntry>, EngineError>>()?;
            serde_json::to_vec(&entries)?
        }
    };
    Ok(payload)
}
