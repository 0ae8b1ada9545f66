use std::collections::BTreeSet;

use tracing::{debug, warn};

use lcs_ledger::LedgerStub;
use lcs_types::{Operation, Role};

use crate::config::{AccessRule, GateConfig};
use crate::error::GateError;

/// Name of the caller attribute that carries the role.
pub const ROLE_ATTRIBUTE: &str = "role";

/// Check the caller's role against a set of permitted roles.
///
/// Reads only the [`ROLE_ATTRIBUTE`] attribute and has no other side
/// effects. A role string that does not name a known [`Role`] is treated
/// like any other role outside the set.
pub fn authorize(stub: &dyn LedgerStub, required: &BTreeSet<Role>) -> Result<Role, GateError> {
    let value = stub
        .caller_attribute(ROLE_ATTRIBUTE)
        .map_err(|e| GateError::AttributeUnavailable(e.to_string()))?
        .ok_or_else(|| GateError::AttributeMissing {
            attribute: ROLE_ATTRIBUTE.to_string(),
        })?;

    match value.parse::<Role>() {
        Ok(role) if required.contains(&role) => Ok(role),
        _ => Err(GateError::Forbidden {
            role: value,
            allowed: required
                .iter()
                .map(Role::as_attribute)
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

/// Authorizes operations against a [`GateConfig`].
#[derive(Clone, Debug, Default)]
pub struct AccessGate {
    config: GateConfig,
}

impl AccessGate {
    pub fn new(config: GateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Authorize the caller of `stub` for `operation`.
    ///
    /// Returns the caller's role for gated operations and `None` for open
    /// ones; open operations never read the role attribute.
    pub fn check(
        &self,
        stub: &dyn LedgerStub,
        operation: Operation,
    ) -> Result<Option<Role>, GateError> {
        let required = match self.config.rule(operation) {
            AccessRule::Open => return Ok(None),
            AccessRule::Roles(roles) => roles,
        };

        match authorize(stub, &required) {
            Ok(role) => {
                debug!(%operation, %role, tx_id = stub.tx_id(), "access granted");
                Ok(Some(role))
            }
            Err(error) => {
                warn!(%operation, tx_id = stub.tx_id(), %error, "access denied");
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lcs_ledger::{CallerIdentity, InMemoryLedger};

    fn roles(roles: &[Role]) -> BTreeSet<Role> {
        roles.iter().copied().collect()
    }

    #[test]
    fn permitted_role_is_returned() {
        let ledger = InMemoryLedger::new();
        let tx = ledger.begin(CallerIdentity::with_role("org1-approver"));
        let role = authorize(&tx, &roles(&[Role::Approver])).unwrap();
        assert_eq!(role, Role::Approver);
    }

    #[test]
    fn missing_attribute_is_reported() {
        let ledger = InMemoryLedger::new();
        let tx = ledger.begin(CallerIdentity::anonymous());
        assert_eq!(
            authorize(&tx, &roles(&[Role::Approver])),
            Err(GateError::AttributeMissing {
                attribute: "role".into()
            })
        );
    }

    #[test]
    fn unreadable_identity_is_reported() {
        let ledger = InMemoryLedger::new();
        let tx = ledger.begin(CallerIdentity::undecodable());
        assert!(matches!(
            authorize(&tx, &roles(&[Role::Approver])),
            Err(GateError::AttributeUnavailable(_))
        ));
    }

    #[test]
    fn wrong_role_is_forbidden() {
        let ledger = InMemoryLedger::new();
        let tx = ledger.begin(CallerIdentity::with_role("org1-examcenter1"));
        let error = authorize(&tx, &roles(&[Role::Approver, Role::Police])).unwrap_err();
        assert_eq!(
            error,
            GateError::Forbidden {
                role: "org1-examcenter1".into(),
                allowed: "org1-approver, org2-police".into(),
            }
        );
    }

    #[test]
    fn unknown_role_string_is_forbidden() {
        let ledger = InMemoryLedger::new();
        let tx = ledger.begin(CallerIdentity::with_role("org9-anyone"));
        assert!(matches!(
            authorize(&tx, &roles(&[Role::Approver])),
            Err(GateError::Forbidden { role, .. }) if role == "org9-anyone"
        ));
    }

    #[test]
    fn open_operations_skip_the_attribute_read() {
        let ledger = InMemoryLedger::new();
        let tx = ledger.begin(CallerIdentity::undecodable());
        let gate = AccessGate::default();
        assert_eq!(gate.check(&tx, Operation::QueryLicense).unwrap(), None);
        assert!(gate.check(&tx, Operation::QueryWaitingList).is_err());
    }

    #[test]
    fn tostall_list_is_shared_by_approver_and_police() {
        let ledger = InMemoryLedger::new();
        let gate = AccessGate::default();
        for role in ["org1-approver", "org2-police"] {
            let tx = ledger.begin(CallerIdentity::with_role(role));
            assert!(gate.check(&tx, Operation::QueryToStallList).is_ok());
        }
        let tx = ledger.begin(CallerIdentity::with_role("org1-examcenter3"));
        assert!(gate.check(&tx, Operation::QueryToStallList).is_err());
    }
}
