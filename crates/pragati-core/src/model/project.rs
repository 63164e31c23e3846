use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::{
    ParseEnumError,
    ids::{ProfileId, ProjectId},
    normalize,
};

/// Project lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Planned,
    Ongoing,
    Delayed,
    Completed,
}

impl ProjectStatus {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Ongoing => "ongoing",
            Self::Delayed => "delayed",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "planned" => Ok(Self::Planned),
            "ongoing" => Ok(Self::Ongoing),
            "delayed" => Ok(Self::Delayed),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseEnumError {
                expected: "project status",
                got: s.to_string(),
            }),
        }
    }
}

/// A public infrastructure project.
///
/// `fund_utilized` may legitimately exceed `budget_allocated` — overrun is a
/// valid, alertable state, not an invariant violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub district: String,
    pub agency: String,
    /// The assigned contractor, if any. `None` + `Ongoing` means the project
    /// is open for contractor self-assignment.
    pub contractor_id: Option<ProfileId>,
    /// Whole rupees.
    pub budget_allocated: i64,
    /// Whole rupees; incremented only by approved fund updates.
    pub fund_utilized: i64,
    /// Integer percent in `0..=100`.
    pub completion_percentage: u8,
    pub status: ProjectStatus,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Open for contractor self-assignment: unassigned and ongoing.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.contractor_id.is_none() && self.status == ProjectStatus::Ongoing
    }

    #[must_use]
    pub fn is_assigned_to(&self, contractor: &ProfileId) -> bool {
        self.contractor_id.as_ref() == Some(contractor)
    }
}

#[cfg(test)]
mod tests {
    use super::{Project, ProjectStatus};
    use crate::model::ids::{ProfileId, ProjectId};
    use chrono::{NaiveDate, Utc};
    use std::str::FromStr;

    fn project(status: ProjectStatus, contractor: Option<&str>) -> Project {
        Project {
            id: ProjectId::new("p-1"),
            name: "Rural Road Development Phase 1".into(),
            district: "Mumbai".into(),
            agency: "PWD".into(),
            contractor_id: contractor.map(ProfileId::new),
            budget_allocated: 5_000_000,
            fund_utilized: 3_200_000,
            completion_percentage: 64,
            status,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date"),
            end_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn status_roundtrips() {
        for status in [
            ProjectStatus::Planned,
            ProjectStatus::Ongoing,
            ProjectStatus::Delayed,
            ProjectStatus::Completed,
        ] {
            let rendered = status.to_string();
            assert_eq!(ProjectStatus::from_str(&rendered).unwrap(), status);
        }
        assert!(ProjectStatus::from_str("active").is_err());
    }

    #[test]
    fn availability_requires_unassigned_and_ongoing() {
        assert!(project(ProjectStatus::Ongoing, None).is_available());
        assert!(!project(ProjectStatus::Ongoing, Some("c-1")).is_available());
        assert!(!project(ProjectStatus::Planned, None).is_available());
        assert!(!project(ProjectStatus::Completed, None).is_available());
    }

    #[test]
    fn assignment_check_matches_exact_contractor() {
        let p = project(ProjectStatus::Ongoing, Some("c-1"));
        assert!(p.is_assigned_to(&ProfileId::new("c-1")));
        assert!(!p.is_assigned_to(&ProfileId::new("c-2")));
    }
}
