use anyhow::Result;
use chrono::Utc;
use clap::Args;
use std::io::Write as _;
use serde::Serialize;

use pragati_core::model::ProjectId;
use pragati_core::workflow;

use super::Ctx;
use crate::output::render;

#[derive(Args, Debug)]
pub struct ClaimArgs {
    /// Project id to claim.
    pub id: String,
}

#[derive(Debug, Serialize)]
struct ClaimOutput {
    ok: bool,
    project_id: String,
    contractor_id: String,
}

/// Execute `pgt claim`: contractor self-assignment.
pub fn run_claim(ctx: &mut Ctx, args: &ClaimArgs) -> Result<()> {
    let project = workflow::claim_project(
        &mut ctx.store,
        &ctx.actor,
        &ProjectId::new(&*args.id),
        Utc::now(),
    )?;

    let out = ClaimOutput {
        ok: true,
        project_id: project.id.to_string(),
        contractor_id: ctx.actor.id.to_string(),
    };
    render(ctx.output, &out, |out, w| {
        writeln!(w, "Claimed project {} for {}", out.project_id, out.contractor_id)?;
        Ok(())
    })
}
