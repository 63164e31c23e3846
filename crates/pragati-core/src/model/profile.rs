use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::{ParseEnumError, ids::ProfileId, normalize};

/// The three actor roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    StateOfficial,
    DistrictCollector,
    Contractor,
}

impl Role {
    const fn as_str(self) -> &'static str {
        match self {
            Self::StateOfficial => "state_official",
            Self::DistrictCollector => "district_collector",
            Self::Contractor => "contractor",
        }
    }

    /// Whether this role reviews contractor submissions.
    #[must_use]
    pub const fn is_official(self) -> bool {
        matches!(self, Self::StateOfficial | Self::DistrictCollector)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "state_official" => Ok(Self::StateOfficial),
            "district_collector" => Ok(Self::DistrictCollector),
            "contractor" => Ok(Self::Contractor),
            _ => Err(ParseEnumError {
                expected: "role",
                got: s.to_string(),
            }),
        }
    }
}

/// An authenticated actor. The role is immutable after provisioning; role
/// changes are an external admin action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub role: Role,
    /// Territorial assignment. `None` only for a `StateOfficial` or an
    /// unassigned `Contractor`.
    pub assigned_district: Option<String>,
    pub email: String,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Whether this actor's territorial scope covers `district`.
    ///
    /// A state official covers everything; a collector covers exactly their
    /// assigned district; a contractor covers nothing (contractor access goes
    /// through project assignment, not territory).
    #[must_use]
    pub fn oversees_district(&self, district: &str) -> bool {
        match self.role {
            Role::StateOfficial => true,
            Role::DistrictCollector => {
                self.assigned_district.as_deref() == Some(district)
            }
            Role::Contractor => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Profile, Role};
    use crate::model::ids::ProfileId;
    use chrono::Utc;
    use std::str::FromStr;

    fn collector(district: &str) -> Profile {
        Profile {
            id: ProfileId::new("dc-1"),
            role: Role::DistrictCollector,
            assigned_district: Some(district.to_string()),
            email: "collector@example.gov.in".into(),
            full_name: "District Collector".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn role_json_uses_snake_case() {
        assert_eq!(
            serde_json::to_string(&Role::StateOfficial).unwrap(),
            "\"state_official\""
        );
        assert_eq!(
            serde_json::from_str::<Role>("\"district_collector\"").unwrap(),
            Role::DistrictCollector
        );
    }

    #[test]
    fn role_parse_rejects_unknown() {
        assert!(Role::from_str("admin").is_err());
        assert_eq!(Role::from_str(" Contractor ").unwrap(), Role::Contractor);
    }

    #[test]
    fn collector_scope_is_exact_match() {
        let actor = collector("Pune");
        assert!(actor.oversees_district("Pune"));
        assert!(!actor.oversees_district("Pune Rural"));
        assert!(!actor.oversees_district("pune"));
    }

    #[test]
    fn state_official_covers_all_districts() {
        let mut actor = collector("Pune");
        actor.role = Role::StateOfficial;
        actor.assigned_district = None;
        assert!(actor.oversees_district("Nagpur"));
    }

    #[test]
    fn contractor_has_no_territorial_scope() {
        let mut actor = collector("Pune");
        actor.role = Role::Contractor;
        assert!(!actor.oversees_district("Pune"));
    }
}
