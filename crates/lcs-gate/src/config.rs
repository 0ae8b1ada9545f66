use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use lcs_types::{Operation, Role};

/// Who may invoke an operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessRule {
    /// Any caller, with or without a role attribute.
    Open,
    /// Only callers whose role is in the set.
    Roles(BTreeSet<Role>),
}

impl AccessRule {
    pub fn roles(roles: impl IntoIterator<Item = Role>) -> Self {
        Self::Roles(roles.into_iter().collect())
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Configuration for the access gate.
///
/// `rules` overrides the built-in table per operation. Operations without an
/// override use [`GateConfig::default_rule`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    pub rules: BTreeMap<Operation, AccessRule>,
}

impl GateConfig {
    /// The rule in force for an operation.
    pub fn rule(&self, operation: Operation) -> AccessRule {
        self.rules
            .get(&operation)
            .cloned()
            .unwrap_or_else(|| Self::default_rule(operation))
    }

    pub fn with_rule(mut self, operation: Operation, rule: AccessRule) -> Self {
        self.rules.insert(operation, rule);
        self
    }

    /// Built-in rule table.
    pub fn default_rule(operation: Operation) -> AccessRule {
        use Operation::*;

        match operation {
            InitLedger | CreateLearnerLicense | UpgradeLearnerToActive | RevokeLicense
            | DeleteLicense | QueryWaitingList => AccessRule::roles([Role::Approver]),
            InputTest1Result => AccessRule::roles([Role::ExamCenter1]),
            InputTest2Result => AccessRule::roles([Role::ExamCenter2]),
            InputTest3Result => AccessRule::roles([Role::ExamCenter3]),
            CreatePoliceReport => AccessRule::roles([Role::Police]),
            QueryToStallList => AccessRule::roles([Role::Approver, Role::Police]),
            QueryLicense | QueryLearnerList | QueryActiveList | QueryStalledList
            | QueryComplainByLicenseNo | GetHistoryForAsset => AccessRule::Open,
        }
    }
}
