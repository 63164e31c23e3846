use serde::Serialize;

use crate::model::Project;
use crate::percent::ratio_percent_1dp;

/// Rupees per lakh, the fixed display unit of the fund-flow chart.
const RUPEES_PER_LAKH: f64 = 100_000.0;

/// One bar pair in the allocated-vs-utilized fund-flow chart. Values are in
/// lakh — conversion happens here, at the display boundary, never inside the
/// raw-rupee aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundFlowRow {
    pub label: String,
    pub allocated_lakh: f64,
    pub utilized_lakh: f64,
}

/// State-wide fund flow: one row per district, summing that district's
/// projects. Zero-project districts roll up to zero rows rather than being
/// dropped.
#[must_use]
pub fn state_fund_flow(districts: &[String], projects: &[Project]) -> Vec<FundFlowRow> {
    districts
        .iter()
        .map(|district| {
            let (allocated, utilized) = projects
                .iter()
                .filter(|p| p.district == *district)
                .fold((0_i64, 0_i64), |(a, u), p| {
                    (a + p.budget_allocated, u + p.fund_utilized)
                });
            to_row(district.clone(), allocated, utilized)
        })
        .collect()
}

/// District-scoped fund flow: one row per project, labeled by project name.
/// Callers pass the already-filtered district project set.
#[must_use]
pub fn district_fund_flow(projects: &[Project]) -> Vec<FundFlowRow> {
    projects
        .iter()
        .map(|p| to_row(p.name.clone(), p.budget_allocated, p.fund_utilized))
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn to_row(label: String, allocated: i64, utilized: i64) -> FundFlowRow {
    FundFlowRow {
        label,
        allocated_lakh: allocated as f64 / RUPEES_PER_LAKH,
        utilized_lakh: utilized as f64 / RUPEES_PER_LAKH,
    }
}

/// Raw-rupee totals plus the preformatted utilization rate for the overview
/// cards above the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FundTotals {
    pub allocated: i64,
    pub utilized: i64,
    pub utilization_percent: String,
}

/// Totals over an already-filtered project set.
#[must_use]
pub fn fund_totals(projects: &[Project]) -> FundTotals {
    let allocated: i64 = projects.iter().map(|p| p.budget_allocated).sum();
    let utilized: i64 = projects.iter().map(|p| p.fund_utilized).sum();
    FundTotals {
        allocated,
        utilized,
        utilization_percent: ratio_percent_1dp(utilized, allocated),
    }
}

#[cfg(test)]
mod tests {
    use super::{district_fund_flow, fund_totals, state_fund_flow};
    use crate::model::{Project, ProjectId, ProjectStatus};
    use chrono::{NaiveDate, Utc};

    fn project(id: &str, district: &str, allocated: i64, utilized: i64) -> Project {
        Project {
            id: ProjectId::new(id),
            name: format!("Project {id}"),
            district: district.into(),
            agency: "PWD".into(),
            contractor_id: None,
            budget_allocated: allocated,
            fund_utilized: utilized,
            completion_percentage: 40,
            status: ProjectStatus::Ongoing,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
            end_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn state_scope_groups_by_district() {
        let districts = vec!["Mumbai".to_string(), "Pune".to_string()];
        let projects = vec![
            project("p1", "Mumbai", 5_000_000, 3_200_000),
            project("p2", "Mumbai", 4_200_000, 1_500_000),
            project("p3", "Pune", 2_500_000, 1_800_000),
        ];

        let rows = state_fund_flow(&districts, &projects);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, "Mumbai");
        assert!((rows[0].allocated_lakh - 92.0).abs() < f64::EPSILON);
        assert!((rows[0].utilized_lakh - 47.0).abs() < f64::EPSILON);
        assert_eq!(rows[1].label, "Pune");
        assert!((rows[1].allocated_lakh - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn district_scope_is_one_row_per_project() {
        let projects = vec![
            project("p1", "Mumbai", 5_000_000, 3_200_000),
            project("p2", "Mumbai", 4_200_000, 1_500_000),
        ];
        let rows = district_fund_flow(&projects);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, "Project p1");
        assert!((rows[0].allocated_lakh - 50.0).abs() < f64::EPSILON);
        assert!((rows[1].utilized_lakh - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn totals_keep_raw_rupees() {
        let projects = vec![
            project("p1", "Mumbai", 5_000_000, 3_200_000),
            project("p2", "Pune", 2_500_000, 1_800_000),
        ];
        let totals = fund_totals(&projects);
        assert_eq!(totals.allocated, 7_500_000);
        assert_eq!(totals.utilized, 5_000_000);
        assert_eq!(totals.utilization_percent, "66.7");
    }

    #[test]
    fn empty_sets_produce_zero_rows_and_sentinel() {
        assert!(district_fund_flow(&[]).is_empty());
        let totals = fund_totals(&[]);
        assert_eq!(totals.utilization_percent, "0");
    }
}
