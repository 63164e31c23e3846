//! Cross-actor race scenarios over a shared store: two reviewers settling
//! the same fund update, two contractors claiming the same project, and the
//! read-state no-op. These exercise the full workflow + store stack the way
//! interleaved requests would.

use chrono::{NaiveDate, Utc};

use pragati_core::model::{
    FundUpdate, FundUpdateId, Profile, ProfileId, Project, ProjectId, ProjectStatus, ReviewStatus,
    Role,
};
use pragati_core::store::{EntityStore, MemoryStore};
use pragati_core::workflow::{
    approve_fund_update, claim_project, mark_read, reject_fund_update, send_message,
};
use pragati_core::{EngineError, ErrorCode};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

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

fn project(id: &str, district: &str, contractor: Option<&str>) -> Project {
    Project {
        id: ProjectId::new(id),
        name: format!("Project {id}"),
        district: district.into(),
        agency: "PWD".into(),
        contractor_id: contractor.map(ProfileId::new),
        budget_allocated: 5_000_000,
        fund_utilized: 1_000_000,
        completion_percentage: 30,
        status: ProjectStatus::Ongoing,
        start_date: NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date"),
        end_date: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn pending_update(id: &str, project: &str, contractor: &str, amount: i64) -> FundUpdate {
    FundUpdate {
        id: FundUpdateId::new(id),
        project_id: ProjectId::new(project),
        contractor_id: ProfileId::new(contractor),
        amount,
        description: "Site material".into(),
        receipt_url: None,
        status: ReviewStatus::Pending,
        reviewed_by: None,
        reviewed_at: None,
        created_at: Utc::now(),
    }
}

// ---------------------------------------------------------------------------
// Fund-update review races
// ---------------------------------------------------------------------------

#[test]
fn double_approval_increments_exactly_once() {
    let mut store = MemoryStore::new();
    store
        .insert_project(project("p1", "Mumbai", Some("c-1")))
        .expect("insert project");
    store
        .insert_fund_update(pending_update("fu-1", "p1", "c-1", 500_000))
        .expect("insert update");

    let reviewer_a = profile("dc-a", Role::DistrictCollector, Some("Mumbai"));
    let reviewer_b = profile("so-b", Role::StateOfficial, None);

    // Both reviewers read the update as pending; A commits first.
    approve_fund_update(&mut store, &reviewer_a, &FundUpdateId::new("fu-1"), Utc::now())
        .expect("first approval wins");
    let err =
        approve_fund_update(&mut store, &reviewer_b, &FundUpdateId::new("fu-1"), Utc::now())
            .expect_err("second approval loses");
    assert_eq!(err.code(), ErrorCode::Conflict);

    let p = store.project(&ProjectId::new("p1")).expect("project");
    assert_eq!(p.fund_utilized, 1_500_000, "exactly one increment");

    let fu = store.fund_update(&FundUpdateId::new("fu-1")).expect("update");
    assert_eq!(fu.status, ReviewStatus::Approved);
    assert_eq!(fu.reviewed_by, Some(ProfileId::new("dc-a")));
}

#[test]
fn approve_then_reject_race_keeps_first_verdict() {
    let mut store = MemoryStore::new();
    store
        .insert_project(project("p1", "Mumbai", Some("c-1")))
        .expect("insert project");
    store
        .insert_fund_update(pending_update("fu-1", "p1", "c-1", 500_000))
        .expect("insert update");

    let reviewer = profile("so-1", Role::StateOfficial, None);
    reject_fund_update(&mut store, &reviewer, &FundUpdateId::new("fu-1"), Utc::now())
        .expect("reject wins");
    let err = approve_fund_update(&mut store, &reviewer, &FundUpdateId::new("fu-1"), Utc::now())
        .expect_err("late approval conflicts");
    assert!(matches!(err, EngineError::Conflict { .. }));

    let p = store.project(&ProjectId::new("p1")).expect("project");
    assert_eq!(p.fund_utilized, 1_000_000, "rejection never moves funds");
}

// ---------------------------------------------------------------------------
// Project claim races
// ---------------------------------------------------------------------------

#[test]
fn claim_race_has_one_winner() {
    let mut store = MemoryStore::new();
    store
        .insert_project(project("p-open", "Nagpur", None))
        .expect("insert project");

    let first = profile("c-1", Role::Contractor, None);
    let second = profile("c-2", Role::Contractor, None);

    claim_project(&mut store, &first, &ProjectId::new("p-open"), Utc::now())
        .expect("first claim succeeds");
    let err = claim_project(&mut store, &second, &ProjectId::new("p-open"), Utc::now())
        .expect_err("second claim conflicts");
    assert_eq!(err.code(), ErrorCode::Conflict);

    let p = store.project(&ProjectId::new("p-open")).expect("project");
    assert!(p.is_assigned_to(&ProfileId::new("c-1")));
}

#[test]
fn claim_checks_status_at_commit_time() {
    let mut store = MemoryStore::new();
    let mut p = project("p-stale", "Nagpur", None);
    p.status = ProjectStatus::Ongoing;
    store.insert_project(p).expect("insert project");

    // The project flips to delayed after the available list was rendered but
    // before the claim commits — simulated by mutating between read and write.
    let viewer = profile("c-1", Role::Contractor, None);
    let available = pragati_core::visibility::available_projects(
        &store.projects().expect("projects"),
    );
    assert_eq!(available.len(), 1);

    store
        .update_progress(
            &ProjectId::new("p-stale"),
            30,
            ProjectStatus::Delayed,
            Utc::now(),
        )
        .expect("status change");

    let err = claim_project(&mut store, &viewer, &ProjectId::new("p-stale"), Utc::now())
        .expect_err("stale precondition caught at commit");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

// ---------------------------------------------------------------------------
// Communication read-state
// ---------------------------------------------------------------------------

#[test]
fn read_state_flips_once_and_only_for_counterparty() {
    let mut store = MemoryStore::new();
    store
        .insert_profile(profile("c-1", Role::Contractor, None))
        .expect("insert contractor");
    store
        .insert_profile(profile("dc-1", Role::DistrictCollector, Some("Mumbai")))
        .expect("insert collector");

    let contractor = profile("c-1", Role::Contractor, None);
    let collector = profile("dc-1", Role::DistrictCollector, Some("Mumbai"));

    let comm = send_message(&mut store, &contractor, None, None, "Site update", Utc::now())
        .expect("send");
    assert!(!comm.read);

    // Sender's attempt: no-op, unchanged record back.
    let unchanged = mark_read(&mut store, &contractor, &comm.id).expect("sender no-op");
    assert!(!unchanged.read);
    assert_eq!(unchanged, store.communication(&comm.id).expect("comm"));

    // Counterparty flips it; a second read is idempotent.
    assert!(mark_read(&mut store, &collector, &comm.id).expect("read").read);
    assert!(mark_read(&mut store, &collector, &comm.id).expect("re-read").read);
}
