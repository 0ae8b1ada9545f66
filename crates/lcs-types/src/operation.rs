use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A named operation exposed by the licensing contract.
///
/// The wire name (used for dispatch and in configuration files) is the
/// camel-case form, e.g. `createLearnerLicense`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    InitLedger,
    CreateLearnerLicense,
    InputTest1Result,
    InputTest2Result,
    InputTest3Result,
    UpgradeLearnerToActive,
    CreatePoliceReport,
    RevokeLicense,
    DeleteLicense,
    QueryLicense,
    QueryLearnerList,
    QueryWaitingList,
    QueryActiveList,
    QueryToStallList,
    QueryStalledList,
    QueryComplainByLicenseNo,
    GetHistoryForAsset,
}

impl Operation {
    pub const ALL: [Operation; 17] = [
        Self::InitLedger,
        Self::CreateLearnerLicense,
        Self::InputTest1Result,
        Self::InputTest2Result,
        Self::InputTest3Result,
        Self::UpgradeLearnerToActive,
        Self::CreatePoliceReport,
        Self::RevokeLicense,
        Self::DeleteLicense,
        Self::QueryLicense,
        Self::QueryLearnerList,
        Self::QueryWaitingList,
        Self::QueryActiveList,
        Self::QueryToStallList,
        Self::QueryStalledList,
        Self::QueryComplainByLicenseNo,
        Self::GetHistoryForAsset,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::InitLedger => "initLedger",
            Self::CreateLearnerLicense => "createLearnerLicense",
            Self::InputTest1Result => "inputTest1Result",
            Self::InputTest2Result => "inputTest2Result",
            Self::InputTest3Result => "inputTest3Result",
            Self::UpgradeLearnerToActive => "upgradeLearnerToActive",
            Self::CreatePoliceReport => "createPoliceReport",
            Self::RevokeLicense => "revokeLicense",
            Self::DeleteLicense => "deleteLicense",
            Self::QueryLicense => "queryLicense",
            Self::QueryLearnerList => "queryLearnerList",
            Self::QueryWaitingList => "queryWaitingList",
            Self::QueryActiveList => "queryActiveList",
            Self::QueryToStallList => "queryToStallList",
            Self::QueryStalledList => "queryStalledList",
            Self::QueryComplainByLicenseNo => "queryComplainByLicenseNo",
            Self::GetHistoryForAsset => "getHistoryForAsset",
        }
    }

    /// Number of string arguments the operation expects.
    pub fn arity(&self) -> usize {
        match self {
            Self::InitLedger
            | Self::QueryLearnerList
            | Self::QueryWaitingList
            | Self::QueryActiveList
            | Self::QueryToStallList
            | Self::QueryStalledList => 0,
            Self::UpgradeLearnerToActive
            | Self::RevokeLicense
            | Self::DeleteLicense
            | Self::QueryLicense
            | Self::QueryComplainByLicenseNo
            | Self::GetHistoryForAsset => 1,
            Self::InputTest1Result | Self::InputTest2Result | Self::InputTest3Result => 2,
            Self::CreateLearnerLicense => 3,
            Self::CreatePoliceReport => 5,
        }
    }

    /// Returns `true` if the operation writes to the ledger.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::InitLedger
                | Self::CreateLearnerLicense
                | Self::InputTest1Result
                | Self::InputTest2Result
                | Self::InputTest3Result
                | Self::UpgradeLearnerToActive
                | Self::CreatePoliceReport
                | Self::RevokeLicense
                | Self::DeleteLicense
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| TypeError::UnknownOperation(s.to_string()))
    }
}
