//! In-memory reference implementation of [`EntityStore`], used by tests and
//! as executable documentation of the conditional-write contract. Iteration
//! order is insertion order, matching what a `created_at`-ordered table scan
//! would return.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use super::{EntityStore, ReviewDecision, StoreError};
use crate::model::{
    Alert, AlertId, AlertStatus, Communication, CommunicationId, Feedback, FeedbackId,
    FeedbackStatus, FundUpdate, FundUpdateId, ImageUpdate, Profile, ProfileId, Project, ProjectId,
    ProjectStatus, ReviewStatus,
};

/// Keyed rows plus an insertion-order index.
#[derive(Debug, Clone)]
struct Table<K: Ord + Clone, V: Clone> {
    rows: BTreeMap<K, V>,
    order: Vec<K>,
}

// Manual impl: the derived one would demand `Default` on keys and rows.
impl<K: Ord + Clone, V: Clone> Default for Table<K, V> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            order: Vec::new(),
        }
    }
}

impl<K: Ord + Clone, V: Clone> Table<K, V> {
    fn insert(&mut self, key: K, value: V) -> bool {
        if self.rows.contains_key(&key) {
            return false;
        }
        self.order.push(key.clone());
        self.rows.insert(key, value);
        true
    }

    fn get(&self, key: &K) -> Option<&V> {
        self.rows.get(key)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.rows.get_mut(key)
    }

    fn values(&self) -> Vec<V> {
        self.order
            .iter()
            .filter_map(|k| self.rows.get(k))
            .cloned()
            .collect()
    }
}

/// The in-memory store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    districts: Vec<String>,
    profiles: Table<ProfileId, Profile>,
    projects: Table<ProjectId, Project>,
    alerts: Table<AlertId, Alert>,
    feedback: Table<FeedbackId, Feedback>,
    fund_updates: Table<FundUpdateId, FundUpdate>,
    communications: Table<CommunicationId, Communication>,
    image_updates: Vec<ImageUpdate>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntityStore for MemoryStore {
    fn districts(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.districts.clone())
    }

    fn insert_district(&mut self, name: &str) -> Result<(), StoreError> {
        if self.districts.iter().any(|d| d == name) {
            return Err(StoreError::AlreadyExists {
                entity: "district",
                id: name.to_string(),
            });
        }
        self.districts.push(name.to_string());
        Ok(())
    }

    fn profile(&self, id: &ProfileId) -> Result<Profile, StoreError> {
        self.profiles.get(id).cloned().ok_or(StoreError::NotFound {
            entity: "profile",
            id: id.to_string(),
        })
    }

    fn profiles(&self) -> Result<Vec<Profile>, StoreError> {
        Ok(self.profiles.values())
    }

    fn insert_profile(&mut self, profile: Profile) -> Result<(), StoreError> {
        let id = profile.id.clone();
        if self.profiles.insert(id.clone(), profile) {
            Ok(())
        } else {
            Err(StoreError::AlreadyExists {
                entity: "profile",
                id: id.to_string(),
            })
        }
    }

    fn project(&self, id: &ProjectId) -> Result<Project, StoreError> {
        self.projects.get(id).cloned().ok_or(StoreError::NotFound {
            entity: "project",
            id: id.to_string(),
        })
    }

    fn projects(&self) -> Result<Vec<Project>, StoreError> {
        Ok(self.projects.values())
    }

    fn insert_project(&mut self, project: Project) -> Result<(), StoreError> {
        let id = project.id.clone();
        if self.projects.insert(id.clone(), project) {
            Ok(())
        } else {
            Err(StoreError::AlreadyExists {
                entity: "project",
                id: id.to_string(),
            })
        }
    }

    fn claim_project(
        &mut self,
        id: &ProjectId,
        contractor: &ProfileId,
        now: DateTime<Utc>,
    ) -> Result<Project, StoreError> {
        let project = self.projects.get_mut(id).ok_or(StoreError::NotFound {
            entity: "project",
            id: id.to_string(),
        })?;

        if let Some(current) = &project.contractor_id {
            return Err(StoreError::Conflict {
                entity: "project",
                id: id.to_string(),
                expected: "unassigned".into(),
                actual: format!("assigned to '{current}'"),
            });
        }
        if project.status != ProjectStatus::Ongoing {
            return Err(StoreError::Conflict {
                entity: "project",
                id: id.to_string(),
                expected: "status ongoing".into(),
                actual: format!("status {}", project.status),
            });
        }

        project.contractor_id = Some(contractor.clone());
        project.updated_at = now;
        Ok(project.clone())
    }

    fn update_progress(
        &mut self,
        id: &ProjectId,
        completion: u8,
        status: ProjectStatus,
        now: DateTime<Utc>,
    ) -> Result<Project, StoreError> {
        let project = self.projects.get_mut(id).ok_or(StoreError::NotFound {
            entity: "project",
            id: id.to_string(),
        })?;
        project.completion_percentage = completion;
        project.status = status;
        project.updated_at = now;
        Ok(project.clone())
    }

    fn alert(&self, id: &AlertId) -> Result<Alert, StoreError> {
        self.alerts.get(id).cloned().ok_or(StoreError::NotFound {
            entity: "alert",
            id: id.to_string(),
        })
    }

    fn alerts(&self) -> Result<Vec<Alert>, StoreError> {
        Ok(self.alerts.values())
    }

    fn insert_alert(&mut self, alert: Alert) -> Result<(), StoreError> {
        let id = alert.id.clone();
        if self.alerts.insert(id.clone(), alert) {
            Ok(())
        } else {
            Err(StoreError::AlreadyExists {
                entity: "alert",
                id: id.to_string(),
            })
        }
    }

    fn resolve_alert(&mut self, id: &AlertId, at: DateTime<Utc>) -> Result<Alert, StoreError> {
        let alert = self.alerts.get_mut(id).ok_or(StoreError::NotFound {
            entity: "alert",
            id: id.to_string(),
        })?;
        if alert.status == AlertStatus::Resolved {
            return Err(StoreError::Conflict {
                entity: "alert",
                id: id.to_string(),
                expected: "status active".into(),
                actual: "status resolved".into(),
            });
        }
        alert.status = AlertStatus::Resolved;
        alert.resolved_at = Some(at);
        Ok(alert.clone())
    }

    fn feedback_entry(&self, id: &FeedbackId) -> Result<Feedback, StoreError> {
        self.feedback.get(id).cloned().ok_or(StoreError::NotFound {
            entity: "feedback",
            id: id.to_string(),
        })
    }

    fn feedback(&self) -> Result<Vec<Feedback>, StoreError> {
        Ok(self.feedback.values())
    }

    fn insert_feedback(&mut self, feedback: Feedback) -> Result<(), StoreError> {
        let id = feedback.id.clone();
        if self.feedback.insert(id.clone(), feedback) {
            Ok(())
        } else {
            Err(StoreError::AlreadyExists {
                entity: "feedback",
                id: id.to_string(),
            })
        }
    }

    fn advance_feedback(
        &mut self,
        id: &FeedbackId,
        expected: FeedbackStatus,
        next: FeedbackStatus,
    ) -> Result<Feedback, StoreError> {
        let entry = self.feedback.get_mut(id).ok_or(StoreError::NotFound {
            entity: "feedback",
            id: id.to_string(),
        })?;
        if entry.status != expected {
            return Err(StoreError::Conflict {
                entity: "feedback",
                id: id.to_string(),
                expected: format!("status {expected}"),
                actual: format!("status {}", entry.status),
            });
        }
        entry.status = next;
        Ok(entry.clone())
    }

    fn fund_update(&self, id: &FundUpdateId) -> Result<FundUpdate, StoreError> {
        self.fund_updates
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound {
                entity: "fund update",
                id: id.to_string(),
            })
    }

    fn fund_updates(&self) -> Result<Vec<FundUpdate>, StoreError> {
        Ok(self.fund_updates.values())
    }

    fn insert_fund_update(&mut self, update: FundUpdate) -> Result<(), StoreError> {
        let id = update.id.clone();
        if self.fund_updates.insert(id.clone(), update) {
            Ok(())
        } else {
            Err(StoreError::AlreadyExists {
                entity: "fund update",
                id: id.to_string(),
            })
        }
    }

    fn settle_fund_update(
        &mut self,
        id: &FundUpdateId,
        expected: ReviewStatus,
        decision: ReviewDecision,
    ) -> Result<FundUpdate, StoreError> {
        // Check the project exists before touching the fund update, so a
        // dangling reference can't leave a half-applied approval.
        let update = self.fund_updates.get(id).ok_or(StoreError::NotFound {
            entity: "fund update",
            id: id.to_string(),
        })?;
        let project_id = update.project_id.clone();
        let amount = update.amount;
        if decision.verdict == ReviewStatus::Approved && self.projects.get(&project_id).is_none() {
            return Err(StoreError::NotFound {
                entity: "project",
                id: project_id.to_string(),
            });
        }

        let update = self
            .fund_updates
            .get_mut(id)
            .ok_or(StoreError::NotFound {
                entity: "fund update",
                id: id.to_string(),
            })?;
        if update.status != expected {
            return Err(StoreError::Conflict {
                entity: "fund update",
                id: id.to_string(),
                expected: format!("status {expected}"),
                actual: format!("status {}", update.status),
            });
        }

        update.status = decision.verdict;
        update.reviewed_by = Some(decision.reviewed_by);
        update.reviewed_at = Some(decision.reviewed_at);
        let settled = update.clone();

        if decision.verdict == ReviewStatus::Approved {
            if let Some(project) = self.projects.get_mut(&project_id) {
                project.fund_utilized += amount;
                project.updated_at = decision.reviewed_at;
            }
        }

        Ok(settled)
    }

    fn communication(&self, id: &CommunicationId) -> Result<Communication, StoreError> {
        self.communications
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound {
                entity: "communication",
                id: id.to_string(),
            })
    }

    fn communications(&self) -> Result<Vec<Communication>, StoreError> {
        Ok(self.communications.values())
    }

    fn insert_communication(&mut self, comm: Communication) -> Result<(), StoreError> {
        let id = comm.id.clone();
        if self.communications.insert(id.clone(), comm) {
            Ok(())
        } else {
            Err(StoreError::AlreadyExists {
                entity: "communication",
                id: id.to_string(),
            })
        }
    }

    fn mark_communication_read(
        &mut self,
        id: &CommunicationId,
    ) -> Result<Communication, StoreError> {
        let comm = self.communications.get_mut(id).ok_or(StoreError::NotFound {
            entity: "communication",
            id: id.to_string(),
        })?;
        comm.read = true;
        Ok(comm.clone())
    }

    fn image_updates(&self) -> Result<Vec<ImageUpdate>, StoreError> {
        Ok(self.image_updates.clone())
    }

    fn insert_image_update(&mut self, update: ImageUpdate) -> Result<(), StoreError> {
        self.image_updates.push(update);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{EntityStore, MemoryStore, ReviewDecision, StoreError};
    use crate::model::{
        FundUpdate, FundUpdateId, ProfileId, Project, ProjectId, ProjectStatus, ReviewStatus,
    };
    use chrono::{NaiveDate, Utc};

    fn project(id: &str, contractor: Option<&str>, status: ProjectStatus) -> Project {
        Project {
            id: ProjectId::new(id),
            name: format!("Project {id}"),
            district: "Mumbai".into(),
            agency: "PWD".into(),
            contractor_id: contractor.map(ProfileId::new),
            budget_allocated: 5_000_000,
            fund_utilized: 1_000_000,
            completion_percentage: 20,
            status,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
            end_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn fund_update(id: &str, project: &str, amount: i64) -> FundUpdate {
        FundUpdate {
            id: FundUpdateId::new(id),
            project_id: ProjectId::new(project),
            contractor_id: ProfileId::new("c-1"),
            amount,
            description: "Material procurement".into(),
            receipt_url: None,
            status: ReviewStatus::Pending,
            reviewed_by: None,
            reviewed_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn claim_is_first_writer_wins() {
        let mut store = MemoryStore::new();
        store
            .insert_project(project("p1", None, ProjectStatus::Ongoing))
            .expect("insert");

        let now = Utc::now();
        let claimed = store
            .claim_project(&ProjectId::new("p1"), &ProfileId::new("c-1"), now)
            .expect("first claim succeeds");
        assert!(claimed.is_assigned_to(&ProfileId::new("c-1")));

        let err = store
            .claim_project(&ProjectId::new("p1"), &ProfileId::new("c-2"), now)
            .expect_err("second claim conflicts");
        assert!(matches!(err, StoreError::Conflict { .. }));
    }

    #[test]
    fn claim_rejects_non_ongoing() {
        let mut store = MemoryStore::new();
        store
            .insert_project(project("p1", None, ProjectStatus::Planned))
            .expect("insert");
        let err = store
            .claim_project(&ProjectId::new("p1"), &ProfileId::new("c-1"), Utc::now())
            .expect_err("planned project is not claimable");
        assert!(matches!(err, StoreError::Conflict { .. }));
    }

    #[test]
    fn settle_increments_exactly_once() {
        let mut store = MemoryStore::new();
        store
            .insert_project(project("p1", Some("c-1"), ProjectStatus::Ongoing))
            .expect("insert project");
        store
            .insert_fund_update(fund_update("fu-1", "p1", 250_000))
            .expect("insert update");

        let decision = ReviewDecision {
            verdict: ReviewStatus::Approved,
            reviewed_by: ProfileId::new("dc-1"),
            reviewed_at: Utc::now(),
        };

        let settled = store
            .settle_fund_update(&FundUpdateId::new("fu-1"), ReviewStatus::Pending, decision.clone())
            .expect("first settle succeeds");
        assert_eq!(settled.status, ReviewStatus::Approved);

        let err = store
            .settle_fund_update(&FundUpdateId::new("fu-1"), ReviewStatus::Pending, decision)
            .expect_err("second settle conflicts");
        assert!(matches!(err, StoreError::Conflict { .. }));

        let p = store.project(&ProjectId::new("p1")).expect("project");
        assert_eq!(p.fund_utilized, 1_250_000);
    }

    #[test]
    fn rejection_does_not_touch_project_funds() {
        let mut store = MemoryStore::new();
        store
            .insert_project(project("p1", Some("c-1"), ProjectStatus::Ongoing))
            .expect("insert project");
        store
            .insert_fund_update(fund_update("fu-1", "p1", 250_000))
            .expect("insert update");

        store
            .settle_fund_update(
                &FundUpdateId::new("fu-1"),
                ReviewStatus::Pending,
                ReviewDecision {
                    verdict: ReviewStatus::Rejected,
                    reviewed_by: ProfileId::new("dc-1"),
                    reviewed_at: Utc::now(),
                },
            )
            .expect("reject succeeds");

        let p = store.project(&ProjectId::new("p1")).expect("project");
        assert_eq!(p.fund_utilized, 1_000_000);
    }

    #[test]
    fn duplicate_insert_reports_already_exists() {
        let mut store = MemoryStore::new();
        store
            .insert_project(project("p1", None, ProjectStatus::Ongoing))
            .expect("insert");
        let err = store
            .insert_project(project("p1", None, ProjectStatus::Ongoing))
            .expect_err("duplicate id");
        assert!(matches!(err, StoreError::AlreadyExists { .. }));
    }

    #[test]
    fn listing_preserves_insertion_order() {
        let mut store = MemoryStore::new();
        for id in ["p3", "p1", "p2"] {
            store
                .insert_project(project(id, None, ProjectStatus::Ongoing))
                .expect("insert");
        }
        let ids: Vec<String> = store
            .projects()
            .expect("list")
            .into_iter()
            .map(|p| p.id.to_string())
            .collect();
        assert_eq!(ids, vec!["p3", "p1", "p2"]);
    }
}
