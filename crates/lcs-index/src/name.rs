use std::fmt;

use lcs_types::LicenseStatus;

/// The named secondary indexes.
///
/// Status-like indexes (`Learner`, `Waiting`, `Active`, `ToStall`, `Stalled`)
/// and `Nid` are partitioned by the constant [`CURRENT`](crate::CURRENT).
/// `Crime` is partitioned by the holder's license ID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IndexName {
    Learner,
    Waiting,
    Active,
    /// Pending-revocation marker; may coexist with `Active`.
    ToStall,
    Stalled,
    /// National identity numbers already issued a license.
    Nid,
    /// Violation reports by holder.
    Crime,
}

impl IndexName {
    pub const ALL: [IndexName; 7] = [
        Self::Learner,
        Self::Waiting,
        Self::Active,
        Self::ToStall,
        Self::Stalled,
        Self::Nid,
        Self::Crime,
    ];

    /// Indexes whose membership mirrors a license's status.
    pub const STATUS: [IndexName; 4] = [Self::Learner, Self::Waiting, Self::Active, Self::Stalled];

    /// Ledger object type under which the index's composite keys live.
    pub fn object_type(&self) -> &'static str {
        match self {
            Self::Learner => "learner~key",
            Self::Waiting => "waiting~key",
            Self::Active => "active~key",
            Self::ToStall => "tostall~key",
            Self::Stalled => "stalled~key",
            Self::Nid => "nid~key",
            Self::Crime => "crime~key",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Learner => "learner",
            Self::Waiting => "waiting",
            Self::Active => "active",
            Self::ToStall => "tostall",
            Self::Stalled => "stalled",
            Self::Nid => "nid",
            Self::Crime => "crime",
        }
    }

    /// The status index a license in `status` belongs to.
    pub fn for_status(status: LicenseStatus) -> Self {
        match status {
            LicenseStatus::Learner => Self::Learner,
            LicenseStatus::Waiting => Self::Waiting,
            LicenseStatus::Active => Self::Active,
            LicenseStatus::Stalled => Self::Stalled,
        }
    }
}

impl fmt::Display for IndexName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
