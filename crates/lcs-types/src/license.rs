//! The license record and its lifecycle vocabulary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Point balance granted to every newly issued learner license.
pub const INITIAL_POINTS: i64 = 15;

/// Lifecycle status of a license.
///
/// ```text
/// Learner ──▶ Active ──▶ Stalled
/// ```
///
/// `Waiting` exists in the vocabulary but is not entered by any transition:
/// passing all three exams only enqueues the license in the waiting index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LicenseStatus {
    #[default]
    Learner,
    Waiting,
    Active,
    Stalled,
}

impl LicenseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Learner => "Learner",
            Self::Waiting => "Waiting",
            Self::Active => "Active",
            Self::Stalled => "Stalled",
        }
    }
}

impl fmt::Display for LicenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LicenseStatus {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Learner" => Ok(Self::Learner),
            "Waiting" => Ok(Self::Waiting),
            "Active" => Ok(Self::Active),
            "Stalled" => Ok(Self::Stalled),
            other => Err(TypeError::UnknownStatus(other.to_string())),
        }
    }
}

/// Outcome of a single exam.
///
/// Older records spell the outcomes `Yes`/`No`; both spellings decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExamResult {
    #[serde(alias = "Yes")]
    Pass,
    #[default]
    #[serde(alias = "No")]
    Fail,
}

impl ExamResult {
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

impl fmt::Display for ExamResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => f.write_str("Pass"),
            Self::Fail => f.write_str("Fail"),
        }
    }
}

impl FromStr for ExamResult {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pass" | "yes" => Ok(Self::Pass),
            "fail" | "no" => Ok(Self::Fail),
            _ => Err(TypeError::InvalidExamResult(s.to_string())),
        }
    }
}

/// Which of the three exams a result belongs to. Each slot is recorded by
/// its own exam center.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExamSlot {
    First,
    Second,
    Third,
}

impl ExamSlot {
    pub const ALL: [ExamSlot; 3] = [Self::First, Self::Second, Self::Third];

    /// 1-based exam number.
    pub fn number(&self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
        }
    }
}

impl fmt::Display for ExamSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "test{}", self.number())
    }
}

/// A driving license as stored on the ledger.
///
/// The point balance is kept in its stored decimal-string form and parsed
/// on use, so that a corrupt balance surfaces as an error at the deduction
/// that touches it rather than at decode time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct License {
    pub id: String,
    pub name: String,
    pub nid: String,
    pub status: LicenseStatus,
    pub test1: ExamResult,
    pub test2: ExamResult,
    pub test3: ExamResult,
    pub point: String,
}

impl License {
    /// A freshly issued learner license: all exams failed, full balance.
    pub fn learner(
        id: impl Into<String>,
        name: impl Into<String>,
        nid: impl Into<String>,
        initial_points: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            nid: nid.into(),
            status: LicenseStatus::Learner,
            test1: ExamResult::Fail,
            test2: ExamResult::Fail,
            test3: ExamResult::Fail,
            point: initial_points.to_string(),
        }
    }

    /// Decode a stored record. Missing or corrupt bytes yield the
    /// zero-valued license instead of an error.
    pub fn from_slice_lenient(bytes: &[u8]) -> Self {
        serde_json::from_slice(bytes).unwrap_or_default()
    }

    pub fn to_vec(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    pub fn exam(&self, slot: ExamSlot) -> ExamResult {
        match slot {
            ExamSlot::First => self.test1,
            ExamSlot::Second => self.test2,
            ExamSlot::Third => self.test3,
        }
    }

    pub fn set_exam(&mut self, slot: ExamSlot, result: ExamResult) {
        match slot {
            ExamSlot::First => self.test1 = result,
            ExamSlot::Second => self.test2 = result,
            ExamSlot::Third => self.test3 = result,
        }
    }

    /// Returns `true` once every exam slot holds a pass.
    pub fn all_exams_passed(&self) -> bool {
        ExamSlot::ALL.iter().all(|slot| self.exam(*slot).is_pass())
    }

    /// Parse the stored point balance.
    pub fn points(&self) -> Result<i64, TypeError> {
        self.point
            .parse::<i64>()
            .map_err(|_| TypeError::InvalidPoints(self.point.clone()))
    }

    pub fn set_points(&mut self, points: i64) {
        self.point = points.to_string();
    }
}
