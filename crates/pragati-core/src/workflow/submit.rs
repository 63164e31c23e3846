//! Contractor submissions: fund-release requests, progress imagery, and
//! progress reports.
//!
//! Cross-entity consistency is enforced at write time: a submission naming a
//! contractor must reference a project actually assigned to that contractor,
//! so a dangling or hijacked reference never reaches the store.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::EngineError;
use crate::model::{
    FundUpdate, FundUpdateId, ImageKind, ImageUpdate, ImageUpdateId, Profile, Project, ProjectId,
    ProjectStatus, ReviewStatus, Role,
};
use crate::store::EntityStore;

/// Submit a fund-release request or expense report for review.
pub fn submit_fund_update<S: EntityStore>(
    store: &mut S,
    actor: &Profile,
    project_id: &ProjectId,
    amount: i64,
    description: &str,
    receipt_url: Option<String>,
    now: DateTime<Utc>,
) -> Result<FundUpdate, EngineError> {
    if amount <= 0 {
        return Err(EngineError::validation("amount must be positive"));
    }
    if description.trim().is_empty() {
        return Err(EngineError::validation("description must not be blank"));
    }
    authorize_assigned_contractor(store, actor, project_id)?;

    let update = FundUpdate {
        id: FundUpdateId::generate(),
        project_id: project_id.clone(),
        contractor_id: actor.id.clone(),
        amount,
        description: description.trim().to_string(),
        receipt_url,
        status: ReviewStatus::Pending,
        reviewed_by: None,
        reviewed_at: None,
        created_at: now,
    };
    store.insert_fund_update(update.clone())?;
    info!(
        fund_update = %update.id,
        project = %project_id,
        contractor = %actor.id,
        amount,
        "fund update submitted"
    );
    Ok(update)
}

/// Append an entry to a project's image log.
pub fn submit_image_update<S: EntityStore>(
    store: &mut S,
    actor: &Profile,
    project_id: &ProjectId,
    image_type: ImageKind,
    image_url: &str,
    description: Option<String>,
    now: DateTime<Utc>,
) -> Result<ImageUpdate, EngineError> {
    if image_url.trim().is_empty() {
        return Err(EngineError::validation("image url must not be blank"));
    }
    authorize_assigned_contractor(store, actor, project_id)?;

    let update = ImageUpdate {
        id: ImageUpdateId::generate(),
        project_id: project_id.clone(),
        contractor_id: actor.id.clone(),
        image_type,
        image_url: image_url.trim().to_string(),
        description,
        created_at: now,
    };
    store.insert_image_update(update.clone())?;
    info!(
        image_update = %update.id,
        project = %project_id,
        kind = %image_type,
        "image update recorded"
    );
    Ok(update)
}

/// Report progress on a project: completion percentage and, optionally, a new
/// status. Allowed for the assigned contractor and for officials whose
/// territory covers the project.
pub fn report_progress<S: EntityStore>(
    store: &mut S,
    actor: &Profile,
    project_id: &ProjectId,
    completion: u8,
    status: Option<ProjectStatus>,
    now: DateTime<Utc>,
) -> Result<Project, EngineError> {
    if completion > 100 {
        return Err(EngineError::validation(
            "completion percentage must be within 0..=100",
        ));
    }

    let project = store.project(project_id)?;
    let permitted = match actor.role {
        Role::Contractor => project.is_assigned_to(&actor.id),
        Role::StateOfficial | Role::DistrictCollector => {
            actor.oversees_district(&project.district)
        }
    };
    if !permitted {
        return Err(EngineError::authorization(format!(
            "actor '{}' may not report progress on project '{project_id}'",
            actor.id
        )));
    }

    let next_status = status.unwrap_or(project.status);
    let updated = store.update_progress(project_id, completion, next_status, now)?;
    info!(
        project = %project_id,
        completion,
        status = %next_status,
        reporter = %actor.id,
        "progress reported"
    );
    Ok(updated)
}

fn authorize_assigned_contractor<S: EntityStore>(
    store: &S,
    actor: &Profile,
    project_id: &ProjectId,
) -> Result<(), EngineError> {
    if actor.role != Role::Contractor {
        return Err(EngineError::authorization(format!(
            "role {} cannot submit contractor updates",
            actor.role
        )));
    }
    let project = store.project(project_id)?;
    if !project.is_assigned_to(&actor.id) {
        return Err(EngineError::authorization(format!(
            "project '{project_id}' is not assigned to contractor '{}'",
            actor.id
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{report_progress, submit_fund_update, submit_image_update};
    use crate::error::ErrorCode;
    use crate::model::{
        ImageKind, Profile, ProfileId, Project, ProjectId, ProjectStatus, ReviewStatus, Role,
    };
    use crate::store::{EntityStore, MemoryStore};
    use chrono::{NaiveDate, Utc};

    fn profile(id: &str, role: Role, district: Option<&str>) -> Profile {
        Profile {
            id: ProfileId::new(id),
            role,
            assigned_district: district.map(str::to_string),
            email: format!("{id}@example.in"),
            full_name: id.to_string(),
            created_at: Utc::now(),
        }
    }

    fn seeded_store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store
            .insert_project(Project {
                id: ProjectId::new("p1"),
                name: "Health Center Modernization".into(),
                district: "Nashik".into(),
                agency: "Health Department".into(),
                contractor_id: Some(ProfileId::new("c-1")),
                budget_allocated: 3_500_000,
                fund_utilized: 2_100_000,
                completion_percentage: 60,
                status: ProjectStatus::Ongoing,
                start_date: NaiveDate::from_ymd_opt(2024, 2, 1).expect("valid date"),
                end_date: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
            .expect("insert project");
        store
    }

    #[test]
    fn assigned_contractor_submits_pending_update() {
        let mut store = seeded_store();
        let contractor = profile("c-1", Role::Contractor, None);
        let update = submit_fund_update(
            &mut store,
            &contractor,
            &ProjectId::new("p1"),
            400_000,
            "OPD wing electricals",
            Some("https://blobs.example/receipt-91.pdf".into()),
            Utc::now(),
        )
        .expect("submit");
        assert_eq!(update.status, ReviewStatus::Pending);
        assert_eq!(update.contractor_id, ProfileId::new("c-1"));
        assert_eq!(store.fund_updates().expect("list").len(), 1);
    }

    #[test]
    fn non_positive_amount_is_validation_error() {
        let mut store = seeded_store();
        let contractor = profile("c-1", Role::Contractor, None);
        for amount in [0, -5] {
            let err = submit_fund_update(
                &mut store,
                &contractor,
                &ProjectId::new("p1"),
                amount,
                "desc",
                None,
                Utc::now(),
            )
            .expect_err("bad amount");
            assert_eq!(err.code(), ErrorCode::Validation);
        }
    }

    #[test]
    fn unassigned_contractor_is_blocked() {
        let mut store = seeded_store();
        let outsider = profile("c-9", Role::Contractor, None);
        let err = submit_fund_update(
            &mut store,
            &outsider,
            &ProjectId::new("p1"),
            100,
            "desc",
            None,
            Utc::now(),
        )
        .expect_err("not assigned");
        assert_eq!(err.code(), ErrorCode::Authorization);
    }

    #[test]
    fn officials_cannot_submit_contractor_updates() {
        let mut store = seeded_store();
        let collector = profile("dc-1", Role::DistrictCollector, Some("Nashik"));
        let err = submit_image_update(
            &mut store,
            &collector,
            &ProjectId::new("p1"),
            ImageKind::Progress,
            "https://blobs.example/site.jpg",
            None,
            Utc::now(),
        )
        .expect_err("wrong role");
        assert_eq!(err.code(), ErrorCode::Authorization);
    }

    #[test]
    fn image_log_appends() {
        let mut store = seeded_store();
        let contractor = profile("c-1", Role::Contractor, None);
        for (kind, url) in [
            (ImageKind::Progress, "https://blobs.example/1.jpg"),
            (ImageKind::ThreeSixty, "https://blobs.example/2.jpg"),
        ] {
            submit_image_update(
                &mut store,
                &contractor,
                &ProjectId::new("p1"),
                kind,
                url,
                Some("OPD wing renovation".into()),
                Utc::now(),
            )
            .expect("append");
        }
        assert_eq!(store.image_updates().expect("list").len(), 2);
    }

    #[test]
    fn progress_report_updates_completion_and_status() {
        let mut store = seeded_store();
        let contractor = profile("c-1", Role::Contractor, None);
        let updated = report_progress(
            &mut store,
            &contractor,
            &ProjectId::new("p1"),
            100,
            Some(ProjectStatus::Completed),
            Utc::now(),
        )
        .expect("report");
        assert_eq!(updated.completion_percentage, 100);
        assert_eq!(updated.status, ProjectStatus::Completed);
    }

    #[test]
    fn progress_report_keeps_status_when_omitted() {
        let mut store = seeded_store();
        let collector = profile("dc-1", Role::DistrictCollector, Some("Nashik"));
        let updated = report_progress(
            &mut store,
            &collector,
            &ProjectId::new("p1"),
            75,
            None,
            Utc::now(),
        )
        .expect("report");
        assert_eq!(updated.completion_percentage, 75);
        assert_eq!(updated.status, ProjectStatus::Ongoing);
    }

    #[test]
    fn out_of_range_completion_is_rejected() {
        let mut store = seeded_store();
        let contractor = profile("c-1", Role::Contractor, None);
        let err = report_progress(
            &mut store,
            &contractor,
            &ProjectId::new("p1"),
            101,
            None,
            Utc::now(),
        )
        .expect_err("overflow");
        assert_eq!(err.code(), ErrorCode::Validation);
    }

    #[test]
    fn out_of_district_collector_cannot_report() {
        let mut store = seeded_store();
        let foreign = profile("dc-2", Role::DistrictCollector, Some("Pune"));
        let err = report_progress(
            &mut store,
            &foreign,
            &ProjectId::new("p1"),
            80,
            None,
            Utc::now(),
        )
        .expect_err("out of scope");
        assert_eq!(err.code(), ErrorCode::Authorization);
    }
}
