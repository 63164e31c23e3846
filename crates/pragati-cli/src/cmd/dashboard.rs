use anyhow::Result;
use std::io::{self, Write};

use pragati_core::aggregate::KpiSummary;
use pragati_core::facade::{self, ContractorOverview, DistrictOverview, Overview, StateOverview};

use super::Ctx;
use crate::output::{kv, render, rule, rupees_crore, rupees_lakh, section};

/// Execute `pgt dashboard`: the role-dispatched overview.
pub fn run_dashboard(ctx: &Ctx) -> Result<()> {
    let view = facade::dashboard(&ctx.store, &ctx.actor)?;
    render(ctx.output, &view, |view, w| match view {
        Overview::State(state) => render_state(state, w),
        Overview::District(district) => render_district(district, w),
        Overview::Contractor(contractor) => render_contractor(contractor, w),
    })
}

fn render_kpis(kpis: &KpiSummary, w: &mut dyn Write) -> io::Result<()> {
    kv(w, "Total projects", kpis.total_projects.to_string())?;
    kv(w, "Completed", format!("{}%", kpis.completed_percent))?;
    kv(w, "Ongoing", kpis.ongoing_count.to_string())?;
    kv(w, "Delayed", kpis.delayed_count.to_string())?;
    kv(
        w,
        "Fund utilization",
        format!("{}%", kpis.fund_utilization_percent),
    )
}

fn render_state(view: &StateOverview, w: &mut dyn Write) -> io::Result<()> {
    section(w, "State Overview")?;
    render_kpis(&view.kpis, w)?;
    kv(w, "Allocated", rupees_crore(view.fund_totals.allocated))?;
    kv(w, "Utilized", rupees_crore(view.fund_totals.utilized))?;
    writeln!(w)?;

    section(w, "District-wise Performance")?;
    for row in &view.district_comparison {
        writeln!(
            w,
            "{:<14} {:>3}% complete   {:>2} delayed   {:>2} total",
            row.district, row.completed_percent, row.delayed_count, row.total_count
        )?;
    }
    writeln!(w)?;

    section(w, "Recent Projects")?;
    for project in &view.recent_projects {
        writeln!(
            w,
            "{:<14} {:<38} [{}] {:>3}%",
            project.district, project.name, project.status, project.completion_percentage
        )?;
    }
    writeln!(w)?;

    render_alert_and_feedback_cards(&view.active_alerts, &view.recent_feedback, w)
}

fn render_district(view: &DistrictOverview, w: &mut dyn Write) -> io::Result<()> {
    section(w, &format!("{} Dashboard", view.district))?;
    render_kpis(&view.kpis, w)?;
    kv(w, "Unread messages", view.unread_messages.to_string())?;
    writeln!(w)?;

    section(w, "Review Queue")?;
    if view.review_queue.is_empty() {
        writeln!(w, "No fund updates awaiting review.")?;
    }
    for update in &view.review_queue {
        writeln!(
            w,
            "{:<38} {:>10}   {}",
            update.id,
            rupees_lakh(update.amount),
            update.description
        )?;
    }
    writeln!(w)?;

    section(w, "Projects")?;
    for project in &view.recent_projects {
        writeln!(
            w,
            "{:<38} [{}] {:>3}%   {} / {}",
            project.name,
            project.status,
            project.completion_percentage,
            rupees_lakh(project.fund_utilized),
            rupees_lakh(project.budget_allocated),
        )?;
    }
    writeln!(w)?;

    render_alert_and_feedback_cards(&view.active_alerts, &view.recent_feedback, w)
}

fn render_contractor(view: &ContractorOverview, w: &mut dyn Write) -> io::Result<()> {
    section(w, "Contractor Dashboard")?;
    kv(w, "Assigned projects", view.my_projects.len().to_string())?;
    kv(w, "Pending updates", view.pending_updates.to_string())?;
    kv(w, "Unread messages", view.unread_messages.to_string())?;
    kv(w, "Approved funds", rupees_lakh(view.approved_total))?;
    writeln!(w)?;

    section(w, "My Projects")?;
    if view.my_projects.is_empty() {
        writeln!(w, "No projects assigned yet.")?;
    }
    for project in &view.my_projects {
        writeln!(
            w,
            "{:<38} {:<12} [{}] {:>3}%",
            project.name, project.district, project.status, project.completion_percentage
        )?;
    }
    writeln!(w)?;

    section(w, "Available Projects")?;
    if view.available_projects.is_empty() {
        writeln!(w, "No unassigned projects right now.")?;
    }
    for project in &view.available_projects {
        writeln!(
            w,
            "{:<38} {:<12} budget {}",
            project.name,
            project.district,
            rupees_lakh(project.budget_allocated)
        )?;
    }
    writeln!(w)?;

    section(w, "Submitted Fund Updates")?;
    if view.fund_updates.is_empty() {
        writeln!(w, "No updates submitted yet.")?;
    }
    for update in &view.fund_updates {
        writeln!(
            w,
            "{:<10} {:>10}   {}",
            update.status,
            rupees_lakh(update.amount),
            update.description
        )?;
    }
    Ok(())
}

fn render_alert_and_feedback_cards(
    alerts: &[pragati_core::model::Alert],
    feedback: &[pragati_core::model::Feedback],
    w: &mut dyn Write,
) -> io::Result<()> {
    section(w, "Active Alerts")?;
    if alerts.is_empty() {
        writeln!(w, "No active alerts.")?;
    }
    for alert in alerts {
        writeln!(
            w,
            "[{}] {:<42} {}",
            alert.severity, alert.title, alert.district
        )?;
    }
    writeln!(w)?;

    section(w, "Citizen Feedback")?;
    if feedback.is_empty() {
        writeln!(w, "No feedback yet.")?;
    }
    for entry in feedback {
        writeln!(
            w,
            "[{}] {:<12} {}",
            entry.status,
            entry.feedback_type,
            truncate(&entry.description, 60)
        )?;
    }
    rule(w)
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let cut: String = text.chars().take(limit).collect();
        format!("{cut}...")
    }
}
