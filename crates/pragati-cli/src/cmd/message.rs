use anyhow::Result;
use chrono::Utc;
use clap::Args;
use std::io::Write as _;
use serde::Serialize;

use pragati_core::facade;
use pragati_core::model::{CommunicationId, ProfileId, ProjectId};
use pragati_core::workflow;

use super::Ctx;
use crate::output::render;

#[derive(Args, Debug)]
pub struct MessageArgs {
    /// Message body.
    pub body: String,

    /// Recipient contractor id (required when a collector sends).
    #[arg(long)]
    pub contractor: Option<String>,

    /// Project the message is about.
    #[arg(long)]
    pub project: Option<String>,
}

#[derive(Args, Debug)]
pub struct ReadArgs {
    /// Communication id to mark read.
    pub id: String,
}

#[derive(Debug, Serialize)]
struct MessageOutput {
    ok: bool,
    id: String,
    read: bool,
}

/// Execute `pgt message`: send a message to the counterparty.
pub fn run_message(ctx: &mut Ctx, args: &MessageArgs) -> Result<()> {
    let contractor = args.contractor.as_deref().map(ProfileId::from);
    let project = args.project.as_deref().map(ProjectId::from);
    let comm = workflow::send_message(
        &mut ctx.store,
        &ctx.actor,
        contractor.as_ref(),
        project.as_ref(),
        &args.body,
        Utc::now(),
    )?;

    let out = MessageOutput {
        ok: true,
        id: comm.id.to_string(),
        read: comm.read,
    };
    render(ctx.output, &out, |out, w| {
        writeln!(w, "Sent message {}", out.id)?;
        Ok(())
    })
}

/// Execute `pgt inbox`: list the actor's message thread.
pub fn run_inbox(ctx: &Ctx) -> Result<()> {
    let comms = facade::inbox(&ctx.store, &ctx.actor)?;
    render(ctx.output, &comms, |comms, w| {
        if comms.is_empty() {
            writeln!(w, "No messages yet.")?;
            return Ok(());
        }
        for comm in comms {
            let flag = if comm.read { " " } else { "*" };
            writeln!(
                w,
                "{flag} {:<38} [{}] {}",
                comm.id, comm.sender_type, comm.message
            )?;
        }
        Ok(())
    })
}

/// Execute `pgt read`: mark a message read (counterparty only).
pub fn run_read(ctx: &mut Ctx, args: &ReadArgs) -> Result<()> {
    let comm = workflow::mark_read(&mut ctx.store, &ctx.actor, &CommunicationId::new(&*args.id))?;

    let out = MessageOutput {
        ok: true,
        id: comm.id.to_string(),
        read: comm.read,
    };
    render(ctx.output, &out, |out, w| {
        if out.read {
            writeln!(w, "Marked {} read", out.id)?;
        } else {
            writeln!(w, "Message {} unchanged (sender cannot mark own message)", out.id)?;
        }
        Ok(())
    })
}
