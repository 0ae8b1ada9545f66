use tracing::{info, warn};

use lcs_gate::AccessGate;
use lcs_ledger::{CallerIdentity, InMemoryLedger, LedgerStub};
use lcs_types::Operation;

use crate::config::ContractConfig;
use crate::error::{ContractError, ContractResult};
use crate::response::Response;
use crate::router::route;

/// The licensing contract: named operations over a ledger.
#[derive(Clone, Debug, Default)]
pub struct Contract {
    config: ContractConfig,
    gate: AccessGate,
}

impl Contract {
    pub fn new(config: ContractConfig) -> Self {
        Self {
            gate: AccessGate::new(config.gate.clone()),
            config,
        }
    }

    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    /// Authorize and run one operation through `stub`.
    ///
    /// Writes are staged on the stub; committing them is the caller's job.
    pub fn execute(
        &self,
        stub: &dyn LedgerStub,
        name: &str,
        args: &[String],
    ) -> ContractResult<Vec<u8>> {
        let operation: Operation = name
            .parse()
            .map_err(|_| ContractError::UnknownOperation(name.to_string()))?;
        self.gate.check(stub, operation)?;
        route(stub, &self.config, operation, args)
    }

    /// Run one operation as a single transaction against `ledger`.
    ///
    /// The transaction commits only if the operation succeeds and wrote
    /// something; otherwise the ledger is left untouched.
    pub fn invoke(
        &self,
        ledger: &InMemoryLedger,
        caller: CallerIdentity,
        name: &str,
        args: &[String],
    ) -> Response {
        let tx = ledger.begin(caller);

        let payload = match self.execute(&tx, name, args) {
            Ok(payload) => payload,
            Err(error) => {
                warn!(operation = name, tx_id = tx.tx_id(), %error, "invocation failed");
                tx.rollback();
                return Response::error(error.to_string());
            }
        };

        match tx.pending_writes() {
            Ok(0) => {
                tx.rollback();
                Response::success(payload)
            }
            Ok(_) => match tx.commit() {
                Ok(receipt) => {
                    info!(
                        operation = name,
                        tx_id = %receipt.tx_id,
                        height = receipt.height,
                        writes = receipt.writes,
                        "invocation committed"
                    );
                    Response::success(payload)
                }
                Err(error) => Response::error(ContractError::from(error).to_string()),
            },
            Err(error) => Response::error(ContractError::from(error).to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lcs_gate::{AccessRule, GateConfig};
    use lcs_types::{License, LicenseStatus};
    use serde_json::Value;

    const APPROVER: &str = "org1-approver";
    const POLICE: &str = "org2-police";

    fn call(contract: &Contract, ledger: &InMemoryLedger, role: &str, op: &str, args: &[&str]) -> Response {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        contract.invoke(ledger, CallerIdentity::with_role(role), op, &args)
    }

    fn ok_json(response: Response) -> Value {
        assert!(response.is_ok(), "unexpected failure: {}", response.message);
        response.json().unwrap_or(Value::Null)
    }

    fn list_ids(contract: &Contract, ledger: &InMemoryLedger, op: &str) -> Vec<String> {
        let json = ok_json(call(contract, ledger, APPROVER, op, &[]));
        json.as_array()
            .unwrap()
            .iter()
            .map(|l| l["id"].as_str().unwrap().to_string())
            .collect()
    }

    fn pass_all(contract: &Contract, ledger: &InMemoryLedger, id: &str) {
        for n in 1..=3 {
            let role = format!("org1-examcenter{n}");
            let op = format!("inputTest{n}Result");
            ok_json(call(contract, ledger, &role, &op, &[id, "Pass"]));
        }
    }

    #[test]
    fn full_scenario_through_dispatch() {
        let contract = Contract::default();
        let ledger = InMemoryLedger::new();

        let created = ok_json(call(&contract, &ledger, APPROVER, "createLearnerLicense", &["L1", "Ann", "NID1"]));
        assert_eq!(created["status"], "Learner");
        assert_eq!(created["point"], "15");
        assert_eq!(list_ids(&contract, &ledger, "queryLearnerList"), vec!["L1"]);

        pass_all(&contract, &ledger, "L1");
        assert_eq!(list_ids(&contract, &ledger, "queryWaitingList"), vec!["L1"]);

        let promoted = ok_json(call(&contract, &ledger, APPROVER, "upgradeLearnerToActive", &["L1"]));
        assert_eq!(promoted["status"], "Active");
        assert!(list_ids(&contract, &ledger, "queryLearnerList").is_empty());
        assert!(list_ids(&contract, &ledger, "queryWaitingList").is_empty());
        assert_eq!(list_ids(&contract, &ledger, "queryActiveList"), vec!["L1"]);

        let report = ok_json(call(&contract, &ledger, POLICE, "createPoliceReport", &["R1", "L1", "major", "dui", "20"]));
        assert_eq!(report["pointsdeduction"], "20");
        assert_eq!(list_ids(&contract, &ledger, "queryToStallList"), vec!["L1"]);
        let license = ok_json(call(&contract, &ledger, POLICE, "queryLicense", &["L1"]));
        assert_eq!(license["point"], "-5");

        ok_json(call(&contract, &ledger, APPROVER, "revokeLicense", &["L1"]));
        assert!(list_ids(&contract, &ledger, "queryActiveList").is_empty());
        assert!(list_ids(&contract, &ledger, "queryToStallList").is_empty());
        assert_eq!(list_ids(&contract, &ledger, "queryStalledList"), vec!["L1"]);

        let complaints = ok_json(call(&contract, &ledger, "", "queryComplainByLicenseNo", &["L1"]));
        assert_eq!(complaints[0]["id"], "R1");
    }

    #[test]
    fn history_tracks_every_write_to_a_license() {
        let contract = Contract::default();
        let ledger = InMemoryLedger::new();

        ok_json(call(&contract, &ledger, APPROVER, "createLearnerLicense", &["L1", "Ann", "NID1"]));
        pass_all(&contract, &ledger, "L1");
        ok_json(call(&contract, &ledger, APPROVER, "upgradeLearnerToActive", &["L1"]));
        ok_json(call(&contract, &ledger, POLICE, "createPoliceReport", &["R1", "L1", "major", "dui", "20"]));
        ok_json(call(&contract, &ledger, APPROVER, "revokeLicense", &["L1"]));
        ok_json(call(&contract, &ledger, APPROVER, "deleteLicense", &["L1"]));

        let history = ok_json(call(&contract, &ledger, "", "getHistoryForAsset", &["L1"]));
        let entries = history.as_array().unwrap();
        assert_eq!(entries.len(), 8);

        let statuses: Vec<&str> = entries[..7]
            .iter()
            .map(|e| e["Value"]["status"].as_str().unwrap())
            .collect();
        assert_eq!(
            statuses,
            ["Learner", "Learner", "Learner", "Learner", "Active", "Active", "Stalled"]
        );
        assert!(entries[..7].iter().all(|e| e["IsDelete"] == false));
        assert_eq!(entries[7]["Value"], Value::Null);
        assert_eq!(entries[7]["IsDelete"], true);
    }

    #[test]
    fn failed_invocation_leaves_ledger_unchanged() {
        let contract = Contract::default();
        let ledger = InMemoryLedger::new();
        ok_json(call(&contract, &ledger, APPROVER, "createLearnerLicense", &["L1", "Ann", "NID1"]));
        let before = ledger.snapshot().unwrap();

        // The report and crime entry are staged before the deduction fails.
        let r = call(&contract, &ledger, POLICE, "createPoliceReport", &["R1", "L1", "minor", "x", "lots"]);
        assert!(!r.is_ok());
        assert!(r.payload.is_empty());
        assert_eq!(ledger.snapshot().unwrap(), before);
    }

    #[test]
    fn queries_do_not_advance_the_ledger() {
        let contract = Contract::default();
        let ledger = InMemoryLedger::new();
        ok_json(call(&contract, &ledger, APPROVER, "createLearnerLicense", &["L1", "Ann", "NID1"]));
        let height = ledger.height().unwrap();

        ok_json(call(&contract, &ledger, "", "queryLearnerList", &[]));
        ok_json(call(&contract, &ledger, "", "queryLicense", &["L1"]));
        assert_eq!(ledger.height().unwrap(), height);
    }

    #[test]
    fn gate_runs_before_argument_checks() {
        let contract = Contract::default();
        let ledger = InMemoryLedger::new();

        let r = call(&contract, &ledger, POLICE, "createLearnerLicense", &["L1"]);
        assert!(r.message.contains("not permitted"), "{}", r.message);

        let r = call(&contract, &ledger, APPROVER, "createLearnerLicense", &["L1"]);
        assert!(r.message.contains("expecting 3, got 1"), "{}", r.message);
        assert_eq!(ledger.height().unwrap(), 0);
    }

    #[test]
    fn caller_without_role_is_rejected() {
        let contract = Contract::default();
        let ledger = InMemoryLedger::new();
        let r = contract.invoke(
            &ledger,
            CallerIdentity::anonymous(),
            "revokeLicense",
            &["L1".to_string()],
        );
        assert_eq!(r.status, crate::response::ERROR);
        assert!(r.message.contains("'role' attribute"), "{}", r.message);
    }

    #[test]
    fn unknown_operation_is_rejected() {
        let contract = Contract::default();
        let ledger = InMemoryLedger::new();
        let r = call(&contract, &ledger, APPROVER, "restictedMethod", &[]);
        assert_eq!(r.message, "unknown operation: restictedMethod");
    }

    #[test]
    fn query_license_returns_stored_bytes_or_nothing() {
        let contract = Contract::default();
        let ledger = InMemoryLedger::new();
        ok_json(call(&contract, &ledger, APPROVER, "createLearnerLicense", &["L1", "Ann", "NID1"]));

        let r = call(&contract, &ledger, "", "queryLicense", &["L1"]);
        assert_eq!(r.payload, ledger.get("L1").unwrap().unwrap());

        let r = call(&contract, &ledger, "", "queryLicense", &["L2"]);
        assert!(r.is_ok());
        assert!(r.payload.is_empty());
    }

    #[test]
    fn deleted_license_is_gone_from_lists() {
        let contract = Contract::default();
        let ledger = InMemoryLedger::new();
        ok_json(call(&contract, &ledger, APPROVER, "createLearnerLicense", &["L1", "Ann", "NID1"]));
        pass_all(&contract, &ledger, "L1");

        let r = call(&contract, &ledger, APPROVER, "deleteLicense", &["L1"]);
        assert!(r.is_ok() && r.payload.is_empty());
        assert!(list_ids(&contract, &ledger, "queryLearnerList").is_empty());
        assert!(list_ids(&contract, &ledger, "queryWaitingList").is_empty());

        let r = call(&contract, &ledger, APPROVER, "createLearnerLicense", &["L2", "Ann", "NID1"]);
        assert!(r.message.contains("NID already exists"), "{}", r.message);
    }

    #[test]
    fn init_ledger_seeds_active_list() {
        let contract = Contract::default();
        let ledger = InMemoryLedger::new();
        let r = call(&contract, &ledger, APPROVER, "initLedger", &[]);
        assert!(r.is_ok() && r.payload.is_empty());

        let active = ok_json(call(&contract, &ledger, "", "queryActiveList", &[]));
        let active: Vec<License> = serde_json::from_value(active).unwrap();
        assert_eq!(active.len(), 2);
        assert!(active.iter().all(|l| l.status == LicenseStatus::Active));
    }

    #[test]
    fn init_ledger_over_existing_learner_is_rejected() {
        let contract = Contract::default();
        let ledger = InMemoryLedger::new();
        let r = call(&contract, &ledger, APPROVER, "createLearnerLicense", &["LICENSE0", "Ann", "120"]);
        assert!(r.is_ok());
        let before = ledger.snapshot().unwrap();

        let r = call(&contract, &ledger, APPROVER, "initLedger", &[]);
        assert!(!r.is_ok());
        assert!(r.message.contains("license already exists: LICENSE0"), "{}", r.message);
        assert_eq!(ledger.snapshot().unwrap(), before);
        assert!(list_ids(&contract, &ledger, "queryActiveList").is_empty());
        assert_eq!(list_ids(&contract, &ledger, "queryLearnerList"), vec!["LICENSE0"]);
    }

    #[test]
    fn overflowing_report_deduction_is_an_error_response() {
        let contract = Contract::default();
        let ledger = InMemoryLedger::new();
        call(&contract, &ledger, APPROVER, "createLearnerLicense", &["L1", "Ann", "NID1"]);
        let before = ledger.snapshot().unwrap();

        let r = call(
            &contract,
            &ledger,
            POLICE,
            "createPoliceReport",
            &["R1", "L1", "minor", "x", "-9223372036854775808"],
        );
        assert!(!r.is_ok());
        assert!(r.message.contains("overflow"), "{}", r.message);
        assert_eq!(ledger.snapshot().unwrap(), before);
    }

    #[test]
    fn configured_overrides_apply() {
        let config = ContractConfig {
            gate: GateConfig::default().with_rule(Operation::QueryWaitingList, AccessRule::Open),
            initial_points: 10,
            ..ContractConfig::default()
        };
        let contract = Contract::new(config);
        let ledger = InMemoryLedger::new();

        let created = ok_json(call(&contract, &ledger, APPROVER, "createLearnerLicense", &["L1", "Ann", "NID1"]));
        assert_eq!(created["point"], "10");
        assert!(call(&contract, &ledger, "", "queryWaitingList", &[]).is_ok());
    }
}
