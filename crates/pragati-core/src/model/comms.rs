use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::{
    ParseEnumError,
    ids::{CommunicationId, ProfileId, ProjectId},
    normalize,
    profile::Role,
};

/// Which of the two message parties authored a communication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SenderType {
    Contractor,
    DistrictCollector,
}

impl SenderType {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Contractor => "contractor",
            Self::DistrictCollector => "district_collector",
        }
    }

    /// The message side a role occupies, if it occupies one at all. State
    /// officials are not a party to contractor/collector threads.
    #[must_use]
    pub const fn side_of(role: Role) -> Option<Self> {
        match role {
            Role::Contractor => Some(Self::Contractor),
            Role::DistrictCollector => Some(Self::DistrictCollector),
            Role::StateOfficial => None,
        }
    }
}

impl fmt::Display for SenderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SenderType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "contractor" => Ok(Self::Contractor),
            "district_collector" => Ok(Self::DistrictCollector),
            _ => Err(ParseEnumError {
                expected: "sender type",
                got: s.to_string(),
            }),
        }
    }
}

/// A two-party message between a contractor and a district collector.
/// Created unread; only the non-sending party flips `read`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Communication {
    pub id: CommunicationId,
    pub project_id: Option<ProjectId>,
    pub contractor_id: ProfileId,
    pub district_collector_id: Option<ProfileId>,
    pub sender_type: SenderType,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}
