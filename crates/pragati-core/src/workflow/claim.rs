//! Contractor self-assignment: claim an unassigned, ongoing project.
//!
//! The precondition is re-checked by the store at commit time, not just when
//! the available list was rendered, so two contractors racing for the same
//! project resolve to one winner and one typed conflict.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::error::EngineError;
use crate::model::{Profile, Project, ProjectId, Role};
use crate::store::{EntityStore, StoreError};

/// Claim `id` for the acting contractor. Not reversible by the contractor;
/// unassignment is an official action outside this engine.
pub fn claim_project<S: EntityStore>(
    store: &mut S,
    actor: &Profile,
    id: &ProjectId,
    now: DateTime<Utc>,
) -> Result<Project, EngineError> {
    if actor.role != Role::Contractor {
        return Err(EngineError::authorization(format!(
            "role {} cannot claim projects",
            actor.role
        )));
    }

    match store.claim_project(id, &actor.id, now) {
        Ok(project) => {
            info!(project = %project.id, contractor = %actor.id, "project claimed");
            Ok(project)
        }
        Err(StoreError::Conflict { actual, .. }) => {
            warn!(project = %id, contractor = %actor.id, %actual, "claim lost");
            Err(EngineError::conflict(format!(
                "project '{id}' is not open for assignment ({actual})"
            )))
        }
        Err(other) => Err(other.into()),
    }
}
