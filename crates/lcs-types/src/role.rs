use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Authenticated role of a caller, as carried in the `role` attribute of the
/// caller's identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// Licensing authority: issues, promotes, revokes and deletes licenses.
    #[serde(rename = "org1-approver")]
    Approver,
    #[serde(rename = "org1-examcenter1")]
    ExamCenter1,
    #[serde(rename = "org1-examcenter2")]
    ExamCenter2,
    #[serde(rename = "org1-examcenter3")]
    ExamCenter3,
    /// Reporting authority: files violation reports.
    #[serde(rename = "org2-police")]
    Police,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Self::Approver,
        Self::ExamCenter1,
        Self::ExamCenter2,
        Self::ExamCenter3,
        Self::Police,
    ];

    /// The attribute value identifying this role.
    pub fn as_attribute(&self) -> &'static str {
        match self {
            Self::Approver => "org1-approver",
            Self::ExamCenter1 => "org1-examcenter1",
            Self::ExamCenter2 => "org1-examcenter2",
            Self::ExamCenter3 => "org1-examcenter3",
            Self::Police => "org2-police",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_attribute())
    }
}

impl FromStr for Role {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_attribute() == s)
            .ok_or_else(|| TypeError::UnknownRole(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_strings_parse_back() {
        for role in Role::ALL {
            assert_eq!(role.as_attribute().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn role_matching_is_exact() {
        assert!("ORG1-APPROVER".parse::<Role>().is_err());
        assert!("org1-approver ".parse::<Role>().is_err());
        assert_eq!(
            "org3-admin".parse::<Role>(),
            Err(TypeError::UnknownRole("org3-admin".into()))
        );
    }

    #[test]
    fn serde_uses_attribute_strings() {
        let json = serde_json::to_string(&Role::Police).unwrap();
        assert_eq!(json, "\"org2-police\"");
        let role: Role = serde_json::from_str("\"org1-examcenter2\"").unwrap();
        assert_eq!(role, Role::ExamCenter2);
    }
}
