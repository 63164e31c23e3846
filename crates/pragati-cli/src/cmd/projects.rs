use anyhow::Result;
use clap::Args;
use std::io::Write as _;

use pragati_core::facade;
use pragati_core::model::{ProjectId, ProjectStatus};
use pragati_core::store::EntityStore;
use pragati_core::visibility;

use super::Ctx;
use crate::output::{kv, render, rupees_lakh, section};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only projects with this status.
    #[arg(long)]
    pub status: Option<ProjectStatus>,

    /// Only projects in this district (exact name).
    #[arg(long)]
    pub district: Option<String>,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Project id.
    pub id: String,
}

/// Execute `pgt projects`: the visibility-filtered project list.
pub fn run_list(ctx: &Ctx, args: &ListArgs) -> Result<()> {
    let mut projects = visibility::filter_projects(&ctx.actor, &ctx.store.projects()?);
    if let Some(status) = args.status {
        projects.retain(|p| p.status == status);
    }
    if let Some(district) = &args.district {
        projects.retain(|p| p.district == *district);
    }

    render(ctx.output, &projects, |projects, w| {
        if projects.is_empty() {
            writeln!(w, "No visible projects.")?;
            return Ok(());
        }
        for project in projects {
            writeln!(
                w,
                "{:<14} {:<14} {:<38} [{}] {:>3}%   {} / {}",
                project.id,
                project.district,
                project.name,
                project.status,
                project.completion_percentage,
                rupees_lakh(project.fund_utilized),
                rupees_lakh(project.budget_allocated),
            )?;
        }
        Ok(())
    })
}

/// Execute `pgt show`: one project with its submission history.
pub fn run_show(ctx: &Ctx, args: &ShowArgs) -> Result<()> {
    let detail = facade::project_detail(&ctx.store, &ctx.actor, &ProjectId::new(&*args.id))?;

    render(ctx.output, &detail, |detail, w| {
        let p = &detail.project;
        section(w, &p.name)?;
        kv(w, "District", &p.district)?;
        kv(w, "Agency", &p.agency)?;
        kv(
            w,
            "Contractor",
            p.contractor_id
                .as_ref()
                .map_or("unassigned", |c| c.as_str()),
        )?;
        kv(w, "Status", p.status.to_string())?;
        kv(w, "Completion", format!("{}%", p.completion_percentage))?;
        kv(w, "Budget", rupees_lakh(p.budget_allocated))?;
        kv(w, "Utilized", rupees_lakh(p.fund_utilized))?;
        kv(w, "Start", p.start_date.to_string())?;
        if let Some(end) = p.end_date {
            kv(w, "End", end.to_string())?;
        }
        writeln!(w)?;

        section(w, "Fund Updates")?;
        if detail.fund_updates.is_empty() {
            writeln!(w, "None submitted.")?;
        }
        for update in &detail.fund_updates {
            writeln!(
                w,
                "{:<10} {:>10}   {}",
                update.status,
                rupees_lakh(update.amount),
                update.description
            )?;
        }
        writeln!(w)?;

        section(w, "Progress Images")?;
        if detail.images.is_empty() {
            writeln!(w, "No imagery uploaded.")?;
        }
        for image in &detail.images {
            writeln!(
                w,
                "{:<10} {}  {}",
                image.image_type,
                image.image_url,
                image.description.as_deref().unwrap_or("")
            )?;
        }
        writeln!(w)?;

        section(w, "Alerts")?;
        for alert in &detail.alerts {
            writeln!(w, "[{}] [{}] {}", alert.status, alert.severity, alert.title)?;
        }
        if detail.alerts.is_empty() {
            writeln!(w, "None.")?;
        }
        writeln!(w)?;

        section(w, "Feedback")?;
        for entry in &detail.feedback {
            writeln!(
                w,
                "[{}] [{}] {}",
                entry.status, entry.feedback_type, entry.description
            )?;
        }
        if detail.feedback.is_empty() {
            writeln!(w, "None.")?;
        }
        Ok(())
    })
}

/// Execute `pgt available`: the unassigned, ongoing project pool.
pub fn run_available(ctx: &Ctx) -> Result<()> {
    let open = visibility::available_projects(&ctx.store.projects()?);
    render(ctx.output, &open, |open, w| {
        if open.is_empty() {
            writeln!(w, "No unassigned projects right now.")?;
            return Ok(());
        }
        for project in open {
            writeln!(
                w,
                "{:<14} {:<14} {:<38} budget {}",
                project.id,
                project.district,
                project.name,
                rupees_lakh(project.budget_allocated),
            )?;
        }
        Ok(())
    })
}
