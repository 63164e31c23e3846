use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::{
    ParseEnumError,
    ids::{FundUpdateId, ProfileId, ProjectId},
    normalize,
};

/// Review lifecycle for a fund update. `approved` and `rejected` are
/// terminal; the only legal transitions leave `pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Terminal states admit no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseEnumError {
                expected: "review status",
                got: s.to_string(),
            }),
        }
    }
}

/// A contractor's fund-release request or expense report, awaiting review by
/// a territorially-scoped official. Approval increments the referenced
/// project's `fund_utilized` by `amount` in the same atomic step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundUpdate {
    pub id: FundUpdateId,
    pub project_id: ProjectId,
    pub contractor_id: ProfileId,
    /// Whole rupees, strictly positive.
    pub amount: i64,
    pub description: String,
    pub receipt_url: Option<String>,
    pub status: ReviewStatus,
    pub reviewed_by: Option<ProfileId>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
