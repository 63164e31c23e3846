use anyhow::Result;
use serde::Serialize;
use std::io::Write as _;

use pragati_core::aggregate::{FundFlowRow, FundTotals};
use pragati_core::error::EngineError;
use pragati_core::facade;
use pragati_core::model::Role;

use super::Ctx;
use crate::output::{kv, render, rupees_crore, section};

#[derive(Debug, Serialize)]
struct FundFlowOutput {
    scope: String,
    totals: FundTotals,
    rows: Vec<FundFlowRow>,
}

/// Execute `pgt fundflow`: allocated-vs-utilized rollup for officials.
/// State scope groups by district; district scope lists projects.
pub fn run_fundflow(ctx: &Ctx) -> Result<()> {
    let out = match ctx.actor.role {
        Role::StateOfficial => {
            let view = facade::state_overview(&ctx.store, &ctx.actor)?;
            FundFlowOutput {
                scope: "state".into(),
                totals: view.fund_totals,
                rows: view.fund_flow,
            }
        }
        Role::DistrictCollector => {
            let view = facade::district_overview(&ctx.store, &ctx.actor)?;
            FundFlowOutput {
                scope: view.district.clone(),
                totals: view.fund_totals,
                rows: view.fund_flow,
            }
        }
        Role::Contractor => {
            return Err(EngineError::Authorization {
                reason: "contractors track funds on the contractor dashboard".into(),
            }
            .into());
        }
    };

    render(ctx.output, &out, |out, w| {
        section(w, "Fund Flow")?;
        kv(w, "Scope", &out.scope)?;
        kv(w, "Total allocated", rupees_crore(out.totals.allocated))?;
        kv(w, "Total utilized", rupees_crore(out.totals.utilized))?;
        kv(
            w,
            "Utilization rate",
            format!("{}%", out.totals.utilization_percent),
        )?;
        writeln!(w)?;

        for row in &out.rows {
            writeln!(
                w,
                "{:<38} allocated {:>9.2}L   utilized {:>9.2}L",
                row.label, row.allocated_lakh, row.utilized_lakh
            )?;
        }
        Ok(())
    })
}
