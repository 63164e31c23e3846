//! The visibility filter: the single authorization choke point between raw
//! entity collections and anything an actor gets to see.
//!
//! Every function here is pure and order-preserving: no I/O, and the output
//! is always a subset of the input in input order. Rules per role:
//!
//! | role               | projects                  | alerts / feedback           |
//! |--------------------|---------------------------|-----------------------------|
//! | state official     | all                       | all                         |
//! | district collector | `district` exact match    | `district` exact match      |
//! | contractor         | `contractor_id == actor`  | `project_id` in own projects|
//!
//! A contractor additionally gets the separate "available projects" view
//! (unassigned + ongoing), which is a precondition listing, not a visibility
//! grant over someone else's records.

use std::collections::BTreeSet;

use crate::model::{Alert, Feedback, Profile, Project, ProjectId, Role};

/// Projects the actor may observe.
#[must_use]
pub fn filter_projects(actor: &Profile, projects: &[Project]) -> Vec<Project> {
    match actor.role {
        Role::StateOfficial => projects.to_vec(),
        Role::DistrictCollector => projects
            .iter()
            .filter(|p| actor.assigned_district.as_deref() == Some(p.district.as_str()))
            .cloned()
            .collect(),
        Role::Contractor => projects
            .iter()
            .filter(|p| p.is_assigned_to(&actor.id))
            .cloned()
            .collect(),
    }
}

/// Unassigned, ongoing projects open for contractor self-assignment. Not
/// district-scoped: any contractor may see and claim them.
#[must_use]
pub fn available_projects(projects: &[Project]) -> Vec<Project> {
    projects.iter().filter(|p| p.is_available()).cloned().collect()
}

/// Alerts the actor may observe.
#[must_use]
pub fn filter_alerts(actor: &Profile, alerts: &[Alert], projects: &[Project]) -> Vec<Alert> {
    match actor.role {
        Role::StateOfficial => alerts.to_vec(),
        Role::DistrictCollector => alerts
            .iter()
            .filter(|a| actor.assigned_district.as_deref() == Some(a.district.as_str()))
            .cloned()
            .collect(),
        Role::Contractor => {
            let own = own_project_ids(actor, projects);
            alerts
                .iter()
                .filter(|a| a.project_id.as_ref().is_some_and(|id| own.contains(id)))
                .cloned()
                .collect()
        }
    }
}

/// Feedback entries the actor may observe.
#[must_use]
pub fn filter_feedback(
    actor: &Profile,
    feedback: &[Feedback],
    projects: &[Project],
) -> Vec<Feedback> {
    match actor.role {
        Role::StateOfficial => feedback.to_vec(),
        Role::DistrictCollector => feedback
            .iter()
            .filter(|f| actor.assigned_district.as_deref() == Some(f.district.as_str()))
            .cloned()
            .collect(),
        Role::Contractor => {
            let own = own_project_ids(actor, projects);
            feedback
                .iter()
                .filter(|f| f.project_id.as_ref().is_some_and(|id| own.contains(id)))
                .cloned()
                .collect()
        }
    }
}

/// Whether a single project is visible to the actor (same rule as
/// [`filter_projects`], without materializing the whole set).
#[must_use]
pub fn can_view_project(actor: &Profile, project: &Project) -> bool {
    match actor.role {
        Role::StateOfficial => true,
        Role::DistrictCollector => {
            actor.assigned_district.as_deref() == Some(project.district.as_str())
        }
        Role::Contractor => project.is_assigned_to(&actor.id) || project.is_available(),
    }
}

fn own_project_ids(actor: &Profile, projects: &[Project]) -> BTreeSet<ProjectId> {
    projects
        .iter()
        .filter(|p| p.is_assigned_to(&actor.id))
        .map(|p| p.id.clone())
        .collect()
}
