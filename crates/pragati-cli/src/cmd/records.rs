use anyhow::Result;
use chrono::Utc;
use clap::Args;
use std::io::Write as _;
use serde::Serialize;

use pragati_core::model::{AlertId, AlertStatus, FeedbackId, FeedbackStatus};
use pragati_core::store::EntityStore;
use pragati_core::visibility;
use pragati_core::workflow;

use super::Ctx;
use crate::output::render;

#[derive(Args, Debug)]
pub struct AlertsArgs {
    /// Include resolved alerts too.
    #[arg(long)]
    pub all: bool,
}

#[derive(Args, Debug)]
pub struct ResolveAlertArgs {
    /// Alert id to resolve.
    pub id: String,
}

#[derive(Args, Debug)]
pub struct FeedbackArgs {}

#[derive(Args, Debug)]
pub struct AdvanceArgs {
    /// Feedback id to advance.
    pub id: String,

    /// Target status: in_progress or resolved.
    #[arg(long = "to")]
    pub to: FeedbackStatus,
}

#[derive(Debug, Serialize)]
struct RecordOutput {
    ok: bool,
    id: String,
    status: String,
}

/// Execute `pgt alerts`: the visibility-filtered alert list.
pub fn run_alerts(ctx: &Ctx, args: &AlertsArgs) -> Result<()> {
    let projects = visibility::filter_projects(&ctx.actor, &ctx.store.projects()?);
    let mut alerts = visibility::filter_alerts(&ctx.actor, &ctx.store.alerts()?, &projects);
    if !args.all {
        alerts.retain(|a| a.status == AlertStatus::Active);
    }

    render(ctx.output, &alerts, |alerts, w| {
        if alerts.is_empty() {
            writeln!(w, "No alerts.")?;
            return Ok(());
        }
        for alert in alerts {
            writeln!(
                w,
                "{:<14} [{}] [{}] {:<12} {}",
                alert.id, alert.status, alert.severity, alert.district, alert.title
            )?;
        }
        Ok(())
    })
}

/// Execute `pgt resolve-alert`.
pub fn run_resolve_alert(ctx: &mut Ctx, args: &ResolveAlertArgs) -> Result<()> {
    let alert = workflow::resolve_alert(
        &mut ctx.store,
        &ctx.actor,
        &AlertId::new(&*args.id),
        Utc::now(),
    )?;

    let out = RecordOutput {
        ok: true,
        id: alert.id.to_string(),
        status: alert.status.to_string(),
    };
    render(ctx.output, &out, |out, w| {
        writeln!(w, "Alert {} is now {}", out.id, out.status)?;
        Ok(())
    })
}

/// Execute `pgt feedback`: the visibility-filtered feedback list.
pub fn run_feedback(ctx: &Ctx, _args: &FeedbackArgs) -> Result<()> {
    let projects = visibility::filter_projects(&ctx.actor, &ctx.store.projects()?);
    let feedback = visibility::filter_feedback(&ctx.actor, &ctx.store.feedback()?, &projects);

    render(ctx.output, &feedback, |feedback, w| {
        if feedback.is_empty() {
            writeln!(w, "No feedback.")?;
            return Ok(());
        }
        for entry in feedback {
            writeln!(
                w,
                "{:<14} [{}] [{}] {:<12} {}",
                entry.id,
                entry.status,
                entry.priority,
                entry.feedback_type,
                entry.description
            )?;
        }
        Ok(())
    })
}

/// Execute `pgt advance`: move feedback forward along its lifecycle.
pub fn run_advance(ctx: &mut Ctx, args: &AdvanceArgs) -> Result<()> {
    let entry = workflow::advance_feedback(
        &mut ctx.store,
        &ctx.actor,
        &FeedbackId::new(&*args.id),
        args.to,
    )?;

    let out = RecordOutput {
        ok: true,
        id: entry.id.to_string(),
        status: entry.status.to_string(),
    };
    render(ctx.output, &out, |out, w| {
        writeln!(w, "Feedback {} is now {}", out.id, out.status)?;
        Ok(())
    })
}
