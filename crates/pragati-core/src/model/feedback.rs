use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::{
    ParseEnumError,
    ids::{FeedbackId, ProjectId},
    normalize,
};

/// Citizen feedback categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackType {
    Complaint,
    Query,
    Suggestion,
    Appreciation,
}

impl FeedbackType {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Complaint => "complaint",
            Self::Query => "query",
            Self::Suggestion => "suggestion",
            Self::Appreciation => "appreciation",
        }
    }
}

impl fmt::Display for FeedbackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "complaint" => Ok(Self::Complaint),
            "query" => Ok(Self::Query),
            "suggestion" => Ok(Self::Suggestion),
            "appreciation" => Ok(Self::Appreciation),
            _ => Err(ParseEnumError {
                expected: "feedback type",
                got: s.to_string(),
            }),
        }
    }
}

/// Triage priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackPriority {
    Low,
    Medium,
    High,
}

impl FeedbackPriority {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for FeedbackPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackPriority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParseEnumError {
                expected: "feedback priority",
                got: s.to_string(),
            }),
        }
    }
}

/// Feedback lifecycle: `pending → in_progress → resolved`, forward only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackStatus {
    Pending,
    InProgress,
    Resolved,
}

impl FeedbackStatus {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
        }
    }

    const fn rank(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::InProgress => 1,
            Self::Resolved => 2,
        }
    }

    /// Whether moving to `next` goes strictly forward along the lifecycle.
    /// Forward jumps (`pending → resolved`) count; no-ops and reversals do
    /// not.
    #[must_use]
    pub const fn is_forward(self, next: Self) -> bool {
        next.rank() > self.rank()
    }
}

impl fmt::Display for FeedbackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            _ => Err(ParseEnumError {
                expected: "feedback status",
                got: s.to_string(),
            }),
        }
    }
}

/// A citizen-submitted feedback entry. Intake is external; the engine only
/// advances its status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: FeedbackId,
    pub project_id: Option<ProjectId>,
    pub district: String,
    /// Anonymous submissions carry no name.
    pub citizen_name: Option<String>,
    pub feedback_type: FeedbackType,
    pub priority: FeedbackPriority,
    pub status: FeedbackStatus,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::{FeedbackPriority, FeedbackStatus, FeedbackType};
    use std::str::FromStr;

    #[test]
    fn status_json_uses_snake_case() {
        assert_eq!(
            serde_json::to_string(&FeedbackStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
    }

    #[test]
    fn forward_only_transitions() {
        use FeedbackStatus::{InProgress, Pending, Resolved};
        assert!(Pending.is_forward(InProgress));
        assert!(Pending.is_forward(Resolved));
        assert!(InProgress.is_forward(Resolved));

        assert!(!InProgress.is_forward(Pending));
        assert!(!Resolved.is_forward(InProgress));
        assert!(!Resolved.is_forward(Resolved));
        assert!(!Pending.is_forward(Pending));
    }

    #[test]
    fn parse_rejects_unknown_values() {
        assert!(FeedbackType::from_str("rant").is_err());
        assert!(FeedbackPriority::from_str("urgent").is_err());
        assert!(FeedbackStatus::from_str("closed").is_err());
    }
}
