use anyhow::Result;
use chrono::Utc;
use clap::Args;
use std::io::Write as _;
use serde::Serialize;

use pragati_core::model::FundUpdateId;
use pragati_core::workflow;

use super::Ctx;
use crate::output::{render, rupees_lakh};

#[derive(Args, Debug)]
pub struct ApproveArgs {
    /// Fund update id to approve.
    pub id: String,
}

#[derive(Args, Debug)]
pub struct RejectArgs {
    /// Fund update id to reject.
    pub id: String,
}

#[derive(Debug, Serialize)]
struct ReviewOutput {
    ok: bool,
    fund_update_id: String,
    project_id: String,
    status: String,
    amount: i64,
}

/// Execute `pgt approve`: settle a pending fund update and move the funds.
pub fn run_approve(ctx: &mut Ctx, args: &ApproveArgs) -> Result<()> {
    let settled = workflow::approve_fund_update(
        &mut ctx.store,
        &ctx.actor,
        &FundUpdateId::new(&*args.id),
        Utc::now(),
    )?;
    finish(ctx, settled)
}

/// Execute `pgt reject`: settle a pending fund update without moving funds.
pub fn run_reject(ctx: &mut Ctx, args: &RejectArgs) -> Result<()> {
    let settled = workflow::reject_fund_update(
        &mut ctx.store,
        &ctx.actor,
        &FundUpdateId::new(&*args.id),
        Utc::now(),
    )?;
    finish(ctx, settled)
}

fn finish(ctx: &Ctx, settled: pragati_core::model::FundUpdate) -> Result<()> {
    let out = ReviewOutput {
        ok: true,
        fund_update_id: settled.id.to_string(),
        project_id: settled.project_id.to_string(),
        status: settled.status.to_string(),
        amount: settled.amount,
    };
    render(ctx.output, &out, |out, w| {
        writeln!(
            w,
            "Fund update {} is now {} ({} on project {})",
            out.fund_update_id,
            out.status,
            rupees_lakh(out.amount),
            out.project_id
        )?;
        Ok(())
    })
}
