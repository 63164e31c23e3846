use serde::Serialize;

use crate::model::{Project, ProjectStatus};
use crate::percent::ratio_percent_whole;

/// One bar-chart row in the district performance comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistrictComparison {
    pub district: String,
    /// Whole percent, rounded to nearest.
    pub completed_percent: u32,
    pub delayed_count: usize,
    pub total_count: usize,
}

/// Compare every district in `districts` over the given projects. Districts
/// with zero projects still get a row (`completed_percent = 0,
/// total_count = 0`) so the roster never shrinks on screen.
#[must_use]
pub fn district_comparison(districts: &[String], projects: &[Project]) -> Vec<DistrictComparison> {
    districts
        .iter()
        .map(|district| {
            let in_district: Vec<&Project> = projects
                .iter()
                .filter(|p| p.district == *district)
                .collect();
            let total = in_district.len();
            let completed = in_district
                .iter()
                .filter(|p| p.status == ProjectStatus::Completed)
                .count();
            let delayed = in_district
                .iter()
                .filter(|p| p.status == ProjectStatus::Delayed)
                .count();

            DistrictComparison {
                district: district.clone(),
                completed_percent: ratio_percent_whole(completed, total),
                delayed_count: delayed,
                total_count: total,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::district_comparison;
    use crate::model::{Project, ProjectId, ProjectStatus};
    use chrono::{NaiveDate, Utc};

    fn project(id: &str, district: &str, status: ProjectStatus) -> Project {
        Project {
            id: ProjectId::new(id),
            name: format!("Project {id}"),
            district: district.into(),
            agency: "PWD".into(),
            contractor_id: None,
            budget_allocated: 1_000_000,
            fund_utilized: 500_000,
            completion_percentage: 50,
            status,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
            end_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn zero_project_district_still_appears() {
        let districts = vec!["Mumbai".to_string(), "Sangli".to_string()];
        let projects = vec![project("p1", "Mumbai", ProjectStatus::Completed)];

        let rows = district_comparison(&districts, &projects);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].district, "Sangli");
        assert_eq!(rows[1].completed_percent, 0);
        assert_eq!(rows[1].delayed_count, 0);
        assert_eq!(rows[1].total_count, 0);
    }

    #[test]
    fn percent_rounds_to_nearest_not_down() {
        let districts = vec!["Pune".to_string()];
        let projects = vec![
            project("p1", "Pune", ProjectStatus::Completed),
            project("p2", "Pune", ProjectStatus::Completed),
            project("p3", "Pune", ProjectStatus::Ongoing),
        ];
        // 2/3 = 66.67% -> 67
        assert_eq!(district_comparison(&districts, &projects)[0].completed_percent, 67);
    }

    #[test]
    fn counts_are_per_district() {
        let districts = vec!["Mumbai".to_string(), "Pune".to_string()];
        let projects = vec![
            project("p1", "Mumbai", ProjectStatus::Delayed),
            project("p2", "Pune", ProjectStatus::Delayed),
            project("p3", "Pune", ProjectStatus::Delayed),
        ];
        let rows = district_comparison(&districts, &projects);
        assert_eq!(rows[0].delayed_count, 1);
        assert_eq!(rows[1].delayed_count, 2);
        assert_eq!(rows[1].total_count, 2);
    }
}
