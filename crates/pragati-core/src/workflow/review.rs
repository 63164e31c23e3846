//! Fund-update review: `pending → approved | rejected`, reviewer-only.
//!
//! Only an official whose territory covers the referenced project's district
//! may settle an update — never the submitting contractor. Approval and the
//! project fund increment are a single conditional store write, so a racing
//! second reviewer gets a conflict instead of a double increment.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::error::EngineError;
use crate::model::{FundUpdate, FundUpdateId, Profile, ReviewStatus};
use crate::store::{EntityStore, ReviewDecision, StoreError};

/// Approve a pending fund update, incrementing the project's utilized funds.
pub fn approve_fund_update<S: EntityStore>(
    store: &mut S,
    actor: &Profile,
    id: &FundUpdateId,
    now: DateTime<Utc>,
) -> Result<FundUpdate, EngineError> {
    settle(store, actor, id, ReviewStatus::Approved, now)
}

/// Reject a pending fund update. The project's funds are untouched.
pub fn reject_fund_update<S: EntityStore>(
    store: &mut S,
    actor: &Profile,
    id: &FundUpdateId,
    now: DateTime<Utc>,
) -> Result<FundUpdate, EngineError> {
    settle(store, actor, id, ReviewStatus::Rejected, now)
}

fn settle<S: EntityStore>(
    store: &mut S,
    actor: &Profile,
    id: &FundUpdateId,
    verdict: ReviewStatus,
    now: DateTime<Utc>,
) -> Result<FundUpdate, EngineError> {
    let update = store.fund_update(id)?;
    let project = store.project(&update.project_id)?;

    if !actor.role.is_official() {
        return Err(EngineError::authorization(format!(
            "role {} cannot review fund updates",
            actor.role
        )));
    }
    if !actor.oversees_district(&project.district) {
        return Err(EngineError::authorization(format!(
            "district '{}' is outside the reviewer's scope",
            project.district
        )));
    }

    // The settle is conditioned on the status still being pending; the store
    // applies verdict, reviewer stamp, and fund increment as one atomic unit.
    let result = store.settle_fund_update(
        id,
        ReviewStatus::Pending,
        ReviewDecision {
            verdict,
            reviewed_by: actor.id.clone(),
            reviewed_at: now,
        },
    );

    match result {
        Ok(settled) => {
            info!(
                fund_update = %settled.id,
                project = %settled.project_id,
                verdict = %verdict,
                reviewer = %actor.id,
                "fund update settled"
            );
            Ok(settled)
        }
        Err(StoreError::Conflict { actual, .. }) => {
            warn!(fund_update = %id, %actual, "fund update already reviewed");
            Err(EngineError::conflict(format!(
                "fund update '{id}' already reviewed ({actual})"
            )))
        }
        Err(other) => Err(other.into()),
    }
}
