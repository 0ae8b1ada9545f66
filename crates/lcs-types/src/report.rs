use serde::{Deserialize, Serialize};

/// A traffic-rule violation report filed against a license holder.
///
/// Reports are immutable once written. `pointsdeduction` keeps the value as
/// it was submitted; the deduction itself is applied to the holder's license
/// when the report is filed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViolationReport {
    pub id: String,
    /// License ID of the offender.
    pub holder: String,
    pub level: String,
    pub desc: String,
    #[serde(rename = "pointsdeduction")]
    pub points_deduction: String,
}

impl ViolationReport {
    pub fn new(
        id: impl Into<String>,
        holder: impl Into<String>,
        level: impl Into<String>,
        desc: impl Into<String>,
        points_deduction: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            holder: holder.into(),
            level: level.into(),
            desc: desc.into(),
            points_deduction: points_deduction.into(),
        }
    }

    pub fn from_slice_lenient(bytes: &[u8]) -> Self {
        serde_json::from_slice(bytes).unwrap_or_default()
    }

    pub fn to_vec(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}
