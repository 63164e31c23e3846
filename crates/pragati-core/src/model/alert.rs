use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::{
    ParseEnumError,
    ids::{AlertId, ProjectId},
    normalize,
};

/// Alert categories. The source schema leaves this column unconstrained, so
/// unknown categories round-trip losslessly through [`AlertType::Other`]
/// instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AlertType {
    Delay,
    FundIssue,
    QualityConcern,
    Other(String),
}

impl AlertType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Delay => "delay",
            Self::FundIssue => "fund_issue",
            Self::QualityConcern => "quality_concern",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for AlertType {
    fn from(s: String) -> Self {
        match normalize(&s).as_str() {
            "delay" => Self::Delay,
            "fund_issue" => Self::FundIssue,
            "quality_concern" => Self::QualityConcern,
            _ => Self::Other(s),
        }
    }
}

impl From<AlertType> for String {
    fn from(t: AlertType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

/// Alert severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(ParseEnumError {
                expected: "severity",
                got: s.to_string(),
            }),
        }
    }
}

/// Alert lifecycle: `active` until explicitly resolved; `resolved` is
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Active,
    Resolved,
}

impl AlertStatus {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Resolved => "resolved",
        }
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "active" => Ok(Self::Active),
            "resolved" => Ok(Self::Resolved),
            _ => Err(ParseEnumError {
                expected: "alert status",
                got: s.to_string(),
            }),
        }
    }
}

/// A monitoring alert, created externally or by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: AlertId,
    pub project_id: Option<ProjectId>,
    pub district: String,
    pub alert_type: AlertType,
    pub severity: Severity,
    pub status: AlertStatus,
    pub title: String,
    pub description: String,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::{AlertStatus, AlertType, Severity};
    use std::str::FromStr;

    #[test]
    fn known_alert_types_normalize() {
        assert_eq!(AlertType::from_str("delay").unwrap(), AlertType::Delay);
        assert_eq!(
            AlertType::from_str("Fund_Issue").unwrap(),
            AlertType::FundIssue
        );
    }

    #[test]
    fn unknown_alert_type_round_trips() {
        let t = AlertType::from_str("land_dispute").unwrap();
        assert_eq!(t, AlertType::Other("land_dispute".into()));
        assert_eq!(
            serde_json::to_string(&t).unwrap(),
            "\"land_dispute\""
        );
        let back: AlertType = serde_json::from_str("\"land_dispute\"").unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn known_alert_type_json_uses_wire_names() {
        assert_eq!(
            serde_json::to_string(&AlertType::QualityConcern).unwrap(),
            "\"quality_concern\""
        );
        assert_eq!(
            serde_json::from_str::<AlertType>("\"fund_issue\"").unwrap(),
            AlertType::FundIssue
        );
    }

    #[test]
    fn severity_orders_low_to_critical() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn status_parse_rejects_unknown() {
        assert!(AlertStatus::from_str("open").is_err());
        assert_eq!(
            AlertStatus::from_str("resolved").unwrap(),
            AlertStatus::Resolved
        );
    }
}
