//! Official-side record lifecycles: alert resolution and feedback triage.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::error::EngineError;
use crate::model::{Alert, AlertId, Feedback, FeedbackId, FeedbackStatus, Profile};
use crate::store::{EntityStore, StoreError};

/// Resolve an active alert. Officials only, district-scoped for collectors;
/// `resolved` is terminal.
pub fn resolve_alert<S: EntityStore>(
    store: &mut S,
    actor: &Profile,
    id: &AlertId,
    now: DateTime<Utc>,
) -> Result<Alert, EngineError> {
    let alert = store.alert(id)?;

    if !actor.role.is_official() {
        return Err(EngineError::authorization(format!(
            "role {} cannot resolve alerts",
            actor.role
        )));
    }
    if !actor.oversees_district(&alert.district) {
        return Err(EngineError::authorization(format!(
            "district '{}' is outside the actor's scope",
            alert.district
        )));
    }

    match store.resolve_alert(id, now) {
        Ok(resolved) => {
            info!(alert = %id, resolver = %actor.id, "alert resolved");
            Ok(resolved)
        }
        Err(StoreError::Conflict { .. }) => {
            warn!(alert = %id, "alert already resolved");
            Err(EngineError::conflict(format!(
                "alert '{id}' is already resolved"
            )))
        }
        Err(other) => Err(other.into()),
    }
}

/// Advance feedback along `pending → in_progress → resolved`. Forward jumps
/// are allowed; reversals and no-ops are conflicts. Officials only,
/// district-scoped for collectors.
pub fn advance_feedback<S: EntityStore>(
    store: &mut S,
    actor: &Profile,
    id: &FeedbackId,
    next: FeedbackStatus,
) -> Result<Feedback, EngineError> {
    let entry = store.feedback_entry(id)?;

    if !actor.role.is_official() {
        return Err(EngineError::authorization(format!(
            "role {} cannot triage feedback",
            actor.role
        )));
    }
    if !actor.oversees_district(&entry.district) {
        return Err(EngineError::authorization(format!(
            "district '{}' is outside the actor's scope",
            entry.district
        )));
    }
    if !entry.status.is_forward(next) {
        return Err(EngineError::conflict(format!(
            "feedback '{id}' cannot move {} -> {next}",
            entry.status
        )));
    }

    // Conditioned on the status we just read; a concurrent advance conflicts.
    let advanced = store.advance_feedback(id, entry.status, next)?;
    info!(feedback = %id, from = %entry.status, to = %next, "feedback advanced");
    Ok(advanced)
}

#[cfg(test)]
mod tests {
    use super::{advance_feedback, resolve_alert};
    use crate::error::ErrorCode;
    use crate::model::{
        Alert, AlertId, AlertStatus, AlertType, Feedback, FeedbackId, FeedbackPriority,
        FeedbackStatus, FeedbackType, Profile, ProfileId, Role, Severity,
    };
    use crate::store::{EntityStore, MemoryStore};
    use chrono::Utc;

    fn profile(id: &str, role: Role, district: Option<&str>) -> Profile {
        Profile {
            id: ProfileId::new(id),
            role,
            assigned_district: district.map(str::to_string),
            email: format!("{id}@example.gov.in"),
            full_name: id.to_string(),
            created_at: Utc::now(),
        }
    }

    fn seeded_store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store
            .insert_alert(Alert {
                id: AlertId::new("a1"),
                project_id: None,
                district: "Pune".into(),
                alert_type: AlertType::Delay,
                severity: Severity::High,
                status: AlertStatus::Active,
                title: "Project Timeline Delay".into(),
                description: "Two weeks behind schedule".into(),
                resolved_at: None,
                created_at: Utc::now(),
            })
            .expect("insert alert");
        store
            .insert_feedback(Feedback {
                id: FeedbackId::new("f1"),
                project_id: None,
                district: "Pune".into(),
                citizen_name: Some("Amit Patel".into()),
                feedback_type: FeedbackType::Query,
                priority: FeedbackPriority::Medium,
                status: FeedbackStatus::Pending,
                description: "When will the work be completed?".into(),
                created_at: Utc::now(),
            })
            .expect("insert feedback");
        store
    }

    #[test]
    fn collector_resolves_in_district_alert_once() {
        let mut store = seeded_store();
        let collector = profile("dc-pune", Role::DistrictCollector, Some("Pune"));

        let resolved = resolve_alert(&mut store, &collector, &AlertId::new("a1"), Utc::now())
            .expect("resolve");
        assert_eq!(resolved.status, AlertStatus::Resolved);
        assert!(resolved.resolved_at.is_some());

        let err = resolve_alert(&mut store, &collector, &AlertId::new("a1"), Utc::now())
            .expect_err("terminal");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[test]
    fn out_of_district_or_contractor_cannot_resolve() {
        let mut store = seeded_store();
        let foreign = profile("dc-mumbai", Role::DistrictCollector, Some("Mumbai"));
        let err = resolve_alert(&mut store, &foreign, &AlertId::new("a1"), Utc::now())
            .expect_err("scope");
        assert_eq!(err.code(), ErrorCode::Authorization);

        let contractor = profile("c-1", Role::Contractor, None);
        let err = resolve_alert(&mut store, &contractor, &AlertId::new("a1"), Utc::now())
            .expect_err("role");
        assert_eq!(err.code(), ErrorCode::Authorization);
    }

    #[test]
    fn feedback_moves_forward_only() {
        let mut store = seeded_store();
        let official = profile("so-1", Role::StateOfficial, None);

        let advanced = advance_feedback(
            &mut store,
            &official,
            &FeedbackId::new("f1"),
            FeedbackStatus::InProgress,
        )
        .expect("advance");
        assert_eq!(advanced.status, FeedbackStatus::InProgress);

        let err = advance_feedback(
            &mut store,
            &official,
            &FeedbackId::new("f1"),
            FeedbackStatus::Pending,
        )
        .expect_err("reversal");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[test]
    fn feedback_forward_jump_is_allowed() {
        let mut store = seeded_store();
        let official = profile("so-1", Role::StateOfficial, None);
        let advanced = advance_feedback(
            &mut store,
            &official,
            &FeedbackId::new("f1"),
            FeedbackStatus::Resolved,
        )
        .expect("jump");
        assert_eq!(advanced.status, FeedbackStatus::Resolved);
    }

    #[test]
    fn missing_records_surface_not_found() {
        let mut store = MemoryStore::new();
        let official = profile("so-1", Role::StateOfficial, None);
        let err = resolve_alert(&mut store, &official, &AlertId::new("none"), Utc::now())
            .expect_err("missing alert");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
