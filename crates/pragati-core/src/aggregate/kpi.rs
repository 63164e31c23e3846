use serde::Serialize;

use crate::model::{Project, ProjectStatus};
use crate::percent::ratio_percent_1dp;

/// The KPI card row shown at the top of every dashboard.
///
/// Percentages are preformatted one-decimal strings (`"65.5"`), with a bare
/// `"0"` when the underlying set is empty — never a division by zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiSummary {
    pub total_projects: usize,
    pub completed_percent: String,
    pub ongoing_count: usize,
    pub delayed_count: usize,
    pub fund_utilization_percent: String,
}

/// Compute the KPI summary over an already-filtered project set.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn compute_kpis(projects: &[Project]) -> KpiSummary {
    let total = projects.len();
    let completed = count_status(projects, ProjectStatus::Completed);
    let ongoing = count_status(projects, ProjectStatus::Ongoing);
    let delayed = count_status(projects, ProjectStatus::Delayed);

    let allocated: i64 = projects.iter().map(|p| p.budget_allocated).sum();
    let utilized: i64 = projects.iter().map(|p| p.fund_utilized).sum();

    KpiSummary {
        total_projects: total,
        completed_percent: ratio_percent_1dp(completed as i64, total as i64),
        ongoing_count: ongoing,
        delayed_count: delayed,
        fund_utilization_percent: ratio_percent_1dp(utilized, allocated),
    }
}

fn count_status(projects: &[Project], status: ProjectStatus) -> usize {
    projects.iter().filter(|p| p.status == status).count()
}
