//! The entity-store contract: the narrow repository seam between the engine
//! and whatever persistence backs it.
//!
//! Reads return snapshots; the engine filters and aggregates over them
//! without holding locks. Writes for the workflow machines are *conditional*:
//! each carries the prior state the caller read, and the store commits the
//! whole change atomically only if that state still holds, otherwise it
//! returns [`StoreError::Conflict`]. That compare-and-set discipline is the
//! only concurrency control the engine requires.

mod memory;

pub use memory::MemoryStore;

use chrono::{DateTime, Utc};

use crate::model::{
    Alert, AlertId, Communication, CommunicationId, Feedback, FeedbackId, FeedbackStatus,
    FundUpdate, FundUpdateId, ImageUpdate, Profile, ProfileId, Project, ProjectId, ProjectStatus,
    ReviewStatus,
};

/// Errors surfaced by an entity store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    /// A conditional write found the record in a different state than the
    /// caller expected. The write did not happen.
    #[error("{entity} '{id}': expected {expected}, found {actual}")]
    Conflict {
        entity: &'static str,
        id: String,
        expected: String,
        actual: String,
    },

    #[error("{entity} '{id}' already exists")]
    AlreadyExists { entity: &'static str, id: String },

    #[error("storage backend: {0}")]
    Backend(String),
}

/// The terminal verdict a reviewer passes on a pending fund update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDecision {
    /// `Approved` or `Rejected` — never `Pending`.
    pub verdict: ReviewStatus,
    pub reviewed_by: ProfileId,
    pub reviewed_at: DateTime<Utc>,
}

/// Repository contract over the persisted entities of the monitoring domain.
///
/// Mutating methods that implement a workflow transition are conditioned on
/// the previously-read state and must be atomic: either the whole transition
/// (including any cross-entity effect, like a fund-utilization increment)
/// commits, or nothing does.
pub trait EntityStore {
    // -- districts ---------------------------------------------------------

    /// The district roster, independent of projects, so zero-project
    /// districts still participate in comparisons.
    fn districts(&self) -> Result<Vec<String>, StoreError>;

    fn insert_district(&mut self, name: &str) -> Result<(), StoreError>;

    // -- profiles ----------------------------------------------------------

    fn profile(&self, id: &ProfileId) -> Result<Profile, StoreError>;

    fn profiles(&self) -> Result<Vec<Profile>, StoreError>;

    fn insert_profile(&mut self, profile: Profile) -> Result<(), StoreError>;

    // -- projects ----------------------------------------------------------

    fn project(&self, id: &ProjectId) -> Result<Project, StoreError>;

    fn projects(&self) -> Result<Vec<Project>, StoreError>;

    fn insert_project(&mut self, project: Project) -> Result<(), StoreError>;

    /// Contractor self-assignment: set `contractor_id` iff the project is
    /// still unassigned **and** still `ongoing` at commit time.
    fn claim_project(
        &mut self,
        id: &ProjectId,
        contractor: &ProfileId,
        now: DateTime<Utc>,
    ) -> Result<Project, StoreError>;

    /// Progress reporting: update completion percentage and status.
    fn update_progress(
        &mut self,
        id: &ProjectId,
        completion: u8,
        status: ProjectStatus,
        now: DateTime<Utc>,
    ) -> Result<Project, StoreError>;

    // -- alerts ------------------------------------------------------------

    fn alert(&self, id: &AlertId) -> Result<Alert, StoreError>;

    fn alerts(&self) -> Result<Vec<Alert>, StoreError>;

    fn insert_alert(&mut self, alert: Alert) -> Result<(), StoreError>;

    /// `active → resolved`, stamping `resolved_at`. Conflict once resolved.
    fn resolve_alert(&mut self, id: &AlertId, at: DateTime<Utc>) -> Result<Alert, StoreError>;

    // -- feedback ----------------------------------------------------------

    fn feedback_entry(&self, id: &FeedbackId) -> Result<Feedback, StoreError>;

    fn feedback(&self) -> Result<Vec<Feedback>, StoreError>;

    fn insert_feedback(&mut self, feedback: Feedback) -> Result<(), StoreError>;

    /// Move feedback to `next` iff its status still equals `expected`.
    fn advance_feedback(
        &mut self,
        id: &FeedbackId,
        expected: FeedbackStatus,
        next: FeedbackStatus,
    ) -> Result<Feedback, StoreError>;

    // -- fund updates ------------------------------------------------------

    fn fund_update(&self, id: &FundUpdateId) -> Result<FundUpdate, StoreError>;

    fn fund_updates(&self) -> Result<Vec<FundUpdate>, StoreError>;

    fn insert_fund_update(&mut self, update: FundUpdate) -> Result<(), StoreError>;

    /// Settle a pending fund update with a terminal verdict, conditioned on
    /// its status still being `expected`. On approval the referenced
    /// project's `fund_utilized` is incremented by the update's amount in
    /// the same atomic unit, so two racing reviewers can never
    /// double-increment.
    fn settle_fund_update(
        &mut self,
        id: &FundUpdateId,
        expected: ReviewStatus,
        decision: ReviewDecision,
    ) -> Result<FundUpdate, StoreError>;

    // -- communications ----------------------------------------------------

    fn communication(&self, id: &CommunicationId) -> Result<Communication, StoreError>;

    fn communications(&self) -> Result<Vec<Communication>, StoreError>;

    fn insert_communication(&mut self, comm: Communication) -> Result<(), StoreError>;

    /// One-directional `unread → read`. Idempotent; the party check lives in
    /// the workflow layer.
    fn mark_communication_read(
        &mut self,
        id: &CommunicationId,
    ) -> Result<Communication, StoreError>;

    // -- image updates -----------------------------------------------------

    fn image_updates(&self) -> Result<Vec<ImageUpdate>, StoreError>;

    fn insert_image_update(&mut self, update: ImageUpdate) -> Result<(), StoreError>;
}
