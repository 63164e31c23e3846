use anyhow::Result;
use chrono::Utc;
use clap::Args;
use std::io::Write as _;
use serde::Serialize;

use pragati_core::model::{ImageKind, ProjectId, ProjectStatus};
use pragati_core::workflow;

use super::Ctx;
use crate::output::render;

#[derive(Args, Debug)]
pub struct SubmitFundArgs {
    /// Project id the expense belongs to.
    pub project_id: String,

    /// Amount in whole rupees.
    #[arg(long)]
    pub amount: i64,

    /// What the funds were (or will be) spent on.
    #[arg(long)]
    pub description: String,

    /// Blob-store URL of the uploaded receipt.
    #[arg(long)]
    pub receipt_url: Option<String>,
}

#[derive(Args, Debug)]
pub struct SubmitImageArgs {
    /// Project id the image belongs to.
    pub project_id: String,

    /// Image kind: progress, ar, or 360.
    #[arg(long)]
    pub kind: ImageKind,

    /// Blob-store URL of the uploaded image.
    #[arg(long)]
    pub url: String,

    /// What the image shows.
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args, Debug)]
pub struct ProgressArgs {
    /// Project id to report on.
    pub project_id: String,

    /// Completion percentage, 0..=100.
    #[arg(long)]
    pub completion: u8,

    /// New project status; keeps the current one when omitted.
    #[arg(long)]
    pub status: Option<ProjectStatus>,
}

#[derive(Debug, Serialize)]
struct SubmitOutput {
    ok: bool,
    id: String,
    project_id: String,
    status: String,
}

/// Execute `pgt submit-fund`: file a fund-release request for review.
pub fn run_submit_fund(ctx: &mut Ctx, args: &SubmitFundArgs) -> Result<()> {
    let update = workflow::submit_fund_update(
        &mut ctx.store,
        &ctx.actor,
        &ProjectId::new(&*args.project_id),
        args.amount,
        &args.description,
        args.receipt_url.clone(),
        Utc::now(),
    )?;

    let out = SubmitOutput {
        ok: true,
        id: update.id.to_string(),
        project_id: update.project_id.to_string(),
        status: update.status.to_string(),
    };
    render(ctx.output, &out, |out, w| {
        writeln!(w, "Submitted fund update {} ({})", out.id, out.status)?;
        Ok(())
    })
}

/// Execute `pgt submit-image`: append to the project's image log.
pub fn run_submit_image(ctx: &mut Ctx, args: &SubmitImageArgs) -> Result<()> {
    let update = workflow::submit_image_update(
        &mut ctx.store,
        &ctx.actor,
        &ProjectId::new(&*args.project_id),
        args.kind,
        &args.url,
        args.description.clone(),
        Utc::now(),
    )?;

    let out = SubmitOutput {
        ok: true,
        id: update.id.to_string(),
        project_id: update.project_id.to_string(),
        status: update.image_type.to_string(),
    };
    render(ctx.output, &out, |out, w| {
        writeln!(w, "Recorded {} image update {}", out.status, out.id)?;
        Ok(())
    })
}

/// Execute `pgt progress`: report completion (and optionally status).
pub fn run_progress(ctx: &mut Ctx, args: &ProgressArgs) -> Result<()> {
    let project = workflow::report_progress(
        &mut ctx.store,
        &ctx.actor,
        &ProjectId::new(&*args.project_id),
        args.completion,
        args.status,
        Utc::now(),
    )?;

    let out = SubmitOutput {
        ok: true,
        id: project.id.to_string(),
        project_id: project.id.to_string(),
        status: project.status.to_string(),
    };
    render(ctx.output, &out, |out, w| {
        writeln!(
            w,
            "Project {} now at {}% ({})",
            out.project_id, args.completion, out.status
        )?;
        Ok(())
    })
}
