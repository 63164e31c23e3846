//! Demo fixtures: the ten-district roster, five flagship projects, alerts,
//! feedback, and a small profile roster. Loaded by `pgt init --sample` and
//! reused by tests that want a realistic data set.

use chrono::{DateTime, NaiveDate, Utc};

use pragati_core::model::{
    Alert, AlertId, AlertStatus, AlertType, Feedback, FeedbackId, FeedbackPriority,
    FeedbackStatus, FeedbackType, Profile, ProfileId, Project, ProjectId, ProjectStatus, Role,
    Severity,
};
use pragati_core::store::{EntityStore, StoreError};

/// The Maharashtra district roster of the demo data set.
pub const DISTRICTS: &[&str] = &[
    "Mumbai",
    "Pune",
    "Nagpur",
    "Nashik",
    "Aurangabad",
    "Thane",
    "Solapur",
    "Amravati",
    "Kolhapur",
    "Sangli",
];

/// The full demo data set.
#[derive(Debug, Clone)]
pub struct Fixtures {
    pub districts: Vec<String>,
    pub profiles: Vec<Profile>,
    pub projects: Vec<Project>,
    pub alerts: Vec<Alert>,
    pub feedback: Vec<Feedback>,
}

fn at(text: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(text)
        .expect("valid fixture timestamp")
        .with_timezone(&Utc)
}

fn day(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").expect("valid fixture date")
}

fn profile(id: &str, role: Role, district: Option<&str>, email: &str, name: &str) -> Profile {
    Profile {
        id: ProfileId::new(id),
        role,
        assigned_district: district.map(str::to_string),
        email: email.to_string(),
        full_name: name.to_string(),
        created_at: at("2023-06-01T09:00:00Z"),
    }
}

#[allow(clippy::too_many_arguments)]
fn project(
    id: &str,
    name: &str,
    district: &str,
    agency: &str,
    contractor: Option<&str>,
    budget: i64,
    utilized: i64,
    completion: u8,
    status: ProjectStatus,
    start: &str,
    end: Option<&str>,
) -> Project {
    Project {
        id: ProjectId::new(id),
        name: name.to_string(),
        district: district.to_string(),
        agency: agency.to_string(),
        contractor_id: contractor.map(ProfileId::new),
        budget_allocated: budget,
        fund_utilized: utilized,
        completion_percentage: completion,
        status,
        start_date: day(start),
        end_date: end.map(day),
        created_at: at("2024-01-02T08:00:00Z"),
        updated_at: at("2024-10-01T08:00:00Z"),
    }
}

/// Build the demo data set.
#[must_use]
pub fn demo_fixtures() -> Fixtures {
    let profiles = vec![
        profile(
            "so-maharashtra",
            Role::StateOfficial,
            None,
            "secretary.pwd@maharashtra.gov.in",
            "State Project Secretary",
        ),
        profile(
            "dc-mumbai",
            Role::DistrictCollector,
            Some("Mumbai"),
            "collector.mumbai@maharashtra.gov.in",
            "Collector, Mumbai",
        ),
        profile(
            "dc-pune",
            Role::DistrictCollector,
            Some("Pune"),
            "collector.pune@maharashtra.gov.in",
            "Collector, Pune",
        ),
        profile(
            "c-kumar",
            Role::Contractor,
            Some("Mumbai"),
            "office@kumarconstruction.in",
            "Kumar Construction Ltd.",
        ),
        profile(
            "c-singh",
            Role::Contractor,
            Some("Pune"),
            "contact@singhbuilders.in",
            "Singh Builders Pvt. Ltd.",
        ),
        profile(
            "c-aqua",
            Role::Contractor,
            Some("Nagpur"),
            "projects@aquasolutions.in",
            "Aqua Solutions Infrastructure",
        ),
        profile(
            "c-medibuild",
            Role::Contractor,
            Some("Nashik"),
            "info@medibuild.in",
            "Medibuild Construction Co.",
        ),
        profile(
            "c-tech",
            Role::Contractor,
            Some("Mumbai"),
            "support@techsolutionsindia.in",
            "Tech Solutions India Pvt. Ltd.",
        ),
    ];

    let projects = vec![
        project(
            "p-road-1",
            "Rural Road Development Phase 1",
            "Mumbai",
            "PWD Maharashtra",
            Some("c-kumar"),
            5_000_000,
            3_200_000,
            64,
            ProjectStatus::Ongoing,
            "2024-01-15",
            Some("2025-06-30"),
        ),
        project(
            "p-school-1",
            "School Infrastructure Upgrade",
            "Pune",
            "Education Department",
            Some("c-singh"),
            2_500_000,
            1_800_000,
            55,
            ProjectStatus::Delayed,
            "2024-03-01",
            Some("2024-12-31"),
        ),
        project(
            "p-water-1",
            "Water Supply Network Expansion",
            "Nagpur",
            "Water Resources Dept",
            Some("c-aqua"),
            8_000_000,
            7_850_000,
            100,
            ProjectStatus::Completed,
            "2023-11-01",
            Some("2024-10-31"),
        ),
        project(
            "p-health-1",
            "Health Center Modernization",
            "Nashik",
            "Health Department",
            Some("c-medibuild"),
            3_500_000,
            2_100_000,
            60,
            ProjectStatus::Ongoing,
            "2024-02-01",
            Some("2025-01-31"),
        ),
        project(
            "p-digital-1",
            "Digital Infrastructure Setup",
            "Mumbai",
            "IT Department",
            Some("c-tech"),
            4_200_000,
            1_500_000,
            35,
            ProjectStatus::Ongoing,
            "2024-04-01",
            Some("2025-03-31"),
        ),
        // Unassigned and ongoing: the available-projects view has something
        // to offer out of the box.
        project(
            "p-sports-1",
            "Community Sports Complex",
            "Thane",
            "Sports & Youth Services",
            None,
            3_000_000,
            0,
            0,
            ProjectStatus::Ongoing,
            "2024-09-01",
            None,
        ),
    ];

    let alerts = vec![
        Alert {
            id: AlertId::new("a-delay-1"),
            project_id: Some(ProjectId::new("p-school-1")),
            district: "Pune".into(),
            alert_type: AlertType::Delay,
            severity: Severity::High,
            status: AlertStatus::Active,
            title: "Project Timeline Delay".into(),
            description:
                "School Infrastructure Upgrade is 2 weeks behind schedule due to material shortage"
                    .into(),
            resolved_at: None,
            created_at: at("2024-10-01T10:30:00Z"),
        },
        Alert {
            id: AlertId::new("a-fund-1"),
            project_id: Some(ProjectId::new("p-digital-1")),
            district: "Mumbai".into(),
            alert_type: AlertType::FundIssue,
            severity: Severity::Medium,
            status: AlertStatus::Active,
            title: "Fund Utilization Below Target".into(),
            description:
                "Digital Infrastructure project has utilized only 35% of allocated funds".into(),
            resolved_at: None,
            created_at: at("2024-10-03T14:20:00Z"),
        },
        Alert {
            id: AlertId::new("a-quality-1"),
            project_id: Some(ProjectId::new("p-road-1")),
            district: "Mumbai".into(),
            alert_type: AlertType::QualityConcern,
            severity: Severity::Critical,
            status: AlertStatus::Active,
            title: "Quality Inspection Failed".into(),
            description:
                "Recent inspection revealed substandard material usage in road construction".into(),
            resolved_at: None,
            created_at: at("2024-10-04T09:15:00Z"),
        },
    ];

    let feedback = vec![
        Feedback {
            id: FeedbackId::new("f-traffic-1"),
            project_id: Some(ProjectId::new("p-road-1")),
            district: "Mumbai".into(),
            citizen_name: Some("Rajesh Kumar".into()),
            feedback_type: FeedbackType::Complaint,
            priority: FeedbackPriority::High,
            status: FeedbackStatus::InProgress,
            description:
                "Road construction work is causing severe traffic congestion during peak hours"
                    .into(),
            created_at: at("2024-09-28T11:00:00Z"),
        },
        Feedback {
            id: FeedbackId::new("f-health-1"),
            project_id: Some(ProjectId::new("p-health-1")),
            district: "Nashik".into(),
            citizen_name: Some("Priya Sharma".into()),
            feedback_type: FeedbackType::Appreciation,
            priority: FeedbackPriority::Low,
            status: FeedbackStatus::Resolved,
            description:
                "Excellent progress on health center upgrades. Staff is very cooperative".into(),
            created_at: at("2024-09-30T15:30:00Z"),
        },
        Feedback {
            id: FeedbackId::new("f-school-1"),
            project_id: Some(ProjectId::new("p-school-1")),
            district: "Pune".into(),
            citizen_name: Some("Amit Patel".into()),
            feedback_type: FeedbackType::Query,
            priority: FeedbackPriority::Medium,
            status: FeedbackStatus::Pending,
            description:
                "When will the school infrastructure work be completed? Classes are affected"
                    .into(),
            created_at: at("2024-10-02T08:45:00Z"),
        },
    ];

    Fixtures {
        districts: DISTRICTS.iter().map(|d| (*d).to_string()).collect(),
        profiles,
        projects,
        alerts,
        feedback,
    }
}

/// Load the demo data set into an empty store.
pub fn load_demo<S: EntityStore>(store: &mut S) -> Result<(), StoreError> {
    let fixtures = demo_fixtures();
    for district in &fixtures.districts {
        store.insert_district(district)?;
    }
    for profile in fixtures.profiles {
        store.insert_profile(profile)?;
    }
    for project in fixtures.projects {
        store.insert_project(project)?;
    }
    for alert in fixtures.alerts {
        store.insert_alert(alert)?;
    }
    for feedback in fixtures.feedback {
        store.insert_feedback(feedback)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{DISTRICTS, demo_fixtures, load_demo};
    use pragati_core::aggregate::compute_kpis;
    use pragati_core::store::{EntityStore, MemoryStore};

    #[test]
    fn fixtures_reference_only_known_records() {
        let fixtures = demo_fixtures();
        let project_ids: Vec<_> = fixtures.projects.iter().map(|p| p.id.clone()).collect();
        let profile_ids: Vec<_> = fixtures.profiles.iter().map(|p| p.id.clone()).collect();

        for project in &fixtures.projects {
            assert!(fixtures.districts.contains(&project.district));
            if let Some(contractor) = &project.contractor_id {
                assert!(profile_ids.contains(contractor), "dangling {contractor}");
            }
        }
        for alert in &fixtures.alerts {
            let id = alert.project_id.as_ref().expect("demo alerts name projects");
            assert!(project_ids.contains(id));
        }
        for feedback in &fixtures.feedback {
            let id = feedback.project_id.as_ref().expect("demo feedback names projects");
            assert!(project_ids.contains(id));
        }
    }

    #[test]
    fn demo_loads_into_memory_store() {
        let mut store = MemoryStore::new();
        load_demo(&mut store).expect("load");

        assert_eq!(store.districts().expect("districts").len(), DISTRICTS.len());
        let projects = store.projects().expect("projects");
        assert_eq!(projects.len(), 6);

        let kpis = compute_kpis(&projects);
        assert_eq!(kpis.total_projects, 6);
        assert_eq!(kpis.delayed_count, 1);
        // 1 of 6 completed
        assert_eq!(kpis.completed_percent, "16.7");
    }

    #[test]
    fn one_project_is_open_for_claims() {
        let fixtures = demo_fixtures();
        let open: Vec<_> = fixtures
            .projects
            .iter()
            .filter(|p| p.is_available())
            .collect();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id.as_str(), "p-sports-1");
    }
}
