//! The dashboard facade: composes the visibility filter, the aggregation
//! rollups, and store reads into the view model each role's screen needs.
//!
//! No authorization or arithmetic of its own — everything is delegated to
//! [`crate::visibility`] and [`crate::aggregate`], so a screen can never
//! bypass the choke point by accident.

use serde::Serialize;
use std::cmp::Reverse;

use crate::aggregate::{
    DistrictComparison, FundFlowRow, FundTotals, KpiSummary, compute_kpis, district_comparison,
    district_fund_flow, fund_totals, state_fund_flow,
};
use crate::error::EngineError;
use crate::model::{
    Alert, AlertStatus, Communication, Feedback, FundUpdate, ImageUpdate, Profile, Project,
    ProjectId, ReviewStatus, Role, SenderType,
};
use crate::store::EntityStore;
use crate::visibility::{
    available_projects, can_view_project, filter_alerts, filter_feedback, filter_projects,
};

/// How many projects the dashboard's "recent" table shows.
const RECENT_PROJECTS: usize = 5;
/// How many alerts / feedback entries the dashboard cards show.
const RECENT_CARDS: usize = 3;

/// The state official's dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct StateOverview {
    pub kpis: KpiSummary,
    pub district_comparison: Vec<DistrictComparison>,
    pub fund_flow: Vec<FundFlowRow>,
    pub fund_totals: FundTotals,
    pub recent_projects: Vec<Project>,
    pub active_alerts: Vec<Alert>,
    pub recent_feedback: Vec<Feedback>,
}

/// The district collector's dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DistrictOverview {
    pub district: String,
    pub kpis: KpiSummary,
    pub fund_flow: Vec<FundFlowRow>,
    pub fund_totals: FundTotals,
    pub recent_projects: Vec<Project>,
    pub active_alerts: Vec<Alert>,
    pub recent_feedback: Vec<Feedback>,
    /// Pending fund updates awaiting this collector's review.
    pub review_queue: Vec<FundUpdate>,
    pub unread_messages: usize,
}

/// The contractor's dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct ContractorOverview {
    pub my_projects: Vec<Project>,
    pub available_projects: Vec<Project>,
    pub fund_updates: Vec<FundUpdate>,
    /// Sum of approved fund-update amounts, whole rupees.
    pub approved_total: i64,
    pub pending_updates: usize,
    pub messages: Vec<Communication>,
    pub unread_messages: usize,
    pub alerts: Vec<Alert>,
    pub feedback: Vec<Feedback>,
}

/// One project joined with its submission history and records.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetail {
    pub project: Project,
    pub images: Vec<ImageUpdate>,
    pub fund_updates: Vec<FundUpdate>,
    pub alerts: Vec<Alert>,
    pub feedback: Vec<Feedback>,
}

/// The role-dispatched dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum Overview {
    State(StateOverview),
    District(DistrictOverview),
    Contractor(ContractorOverview),
}

/// Build the dashboard for whichever role the actor holds.
pub fn dashboard<S: EntityStore>(store: &S, actor: &Profile) -> Result<Overview, EngineError> {
    match actor.role {
        Role::StateOfficial => state_overview(store, actor).map(Overview::State),
        Role::DistrictCollector => district_overview(store, actor).map(Overview::District),
        Role::Contractor => contractor_overview(store, actor).map(Overview::Contractor),
    }
}

/// The state-wide dashboard. Actor must be a state official.
pub fn state_overview<S: EntityStore>(
    store: &S,
    actor: &Profile,
) -> Result<StateOverview, EngineError> {
    if actor.role != Role::StateOfficial {
        return Err(EngineError::authorization(format!(
            "role {} cannot open the state overview",
            actor.role
        )));
    }

    let districts = store.districts()?;
    let projects = filter_projects(actor, &store.projects()?);
    let alerts = filter_alerts(actor, &store.alerts()?, &projects);
    let feedback = filter_feedback(actor, &store.feedback()?, &projects);

    Ok(StateOverview {
        kpis: compute_kpis(&projects),
        district_comparison: district_comparison(&districts, &projects),
        fund_flow: state_fund_flow(&districts, &projects),
        fund_totals: fund_totals(&projects),
        recent_projects: newest(projects, RECENT_PROJECTS),
        active_alerts: newest(active_only(alerts), RECENT_CARDS),
        recent_feedback: newest(feedback, RECENT_CARDS),
    })
}

/// The district dashboard. Actor must be a collector with an assignment.
pub fn district_overview<S: EntityStore>(
    store: &S,
    actor: &Profile,
) -> Result<DistrictOverview, EngineError> {
    if actor.role != Role::DistrictCollector {
        return Err(EngineError::authorization(format!(
            "role {} cannot open the district overview",
            actor.role
        )));
    }
    let Some(district) = actor.assigned_district.clone() else {
        return Err(EngineError::authorization(
            "collector has no assigned district",
        ));
    };

    let projects = filter_projects(actor, &store.projects()?);
    let alerts = filter_alerts(actor, &store.alerts()?, &projects);
    let feedback = filter_feedback(actor, &store.feedback()?, &projects);

    let project_ids: Vec<ProjectId> = projects.iter().map(|p| p.id.clone()).collect();
    let review_queue: Vec<FundUpdate> = store
        .fund_updates()?
        .into_iter()
        .filter(|fu| fu.status == ReviewStatus::Pending && project_ids.contains(&fu.project_id))
        .collect();

    let unread_messages = store
        .communications()?
        .iter()
        .filter(|c| {
            !c.read
                && c.sender_type == SenderType::Contractor
                && c.district_collector_id
                    .as_ref()
                    .is_none_or(|dc| *dc == actor.id)
        })
        .count();

    Ok(DistrictOverview {
        district,
        kpis: compute_kpis(&projects),
        fund_flow: district_fund_flow(&projects),
        fund_totals: fund_totals(&projects),
        recent_projects: newest(projects, RECENT_PROJECTS),
        active_alerts: newest(active_only(alerts), RECENT_CARDS),
        recent_feedback: newest(feedback, RECENT_CARDS),
        review_queue,
        unread_messages,
    })
}

/// The contractor dashboard. Actor must be a contractor.
pub fn contractor_overview<S: EntityStore>(
    store: &S,
    actor: &Profile,
) -> Result<ContractorOverview, EngineError> {
    if actor.role != Role::Contractor {
        return Err(EngineError::authorization(format!(
            "role {} cannot open the contractor overview",
            actor.role
        )));
    }

    let all_projects = store.projects()?;
    let my_projects = filter_projects(actor, &all_projects);
    let alerts = filter_alerts(actor, &store.alerts()?, &my_projects);
    let feedback = filter_feedback(actor, &store.feedback()?, &my_projects);

    let fund_updates: Vec<FundUpdate> = store
        .fund_updates()?
        .into_iter()
        .filter(|fu| fu.contractor_id == actor.id)
        .collect();
    let approved_total = fund_updates
        .iter()
        .filter(|fu| fu.status == ReviewStatus::Approved)
        .map(|fu| fu.amount)
        .sum();
    let pending_updates = fund_updates
        .iter()
        .filter(|fu| fu.status == ReviewStatus::Pending)
        .count();

    let messages: Vec<Communication> = store
        .communications()?
        .into_iter()
        .filter(|c| c.contractor_id == actor.id)
        .collect();
    let unread_messages = messages
        .iter()
        .filter(|c| !c.read && c.sender_type == SenderType::DistrictCollector)
        .count();

    Ok(ContractorOverview {
        my_projects,
        available_projects: available_projects(&all_projects),
        fund_updates,
        approved_total,
        pending_updates,
        messages,
        unread_messages,
        alerts,
        feedback,
    })
}

/// The messages an actor is a party to. A contractor sees their own thread;
/// a collector sees messages addressed to them plus unaddressed contractor
/// messages (a contractor message sent without a named collector lands in
/// every collector's inbox). State officials have no seat here.
pub fn inbox<S: EntityStore>(
    store: &S,
    actor: &Profile,
) -> Result<Vec<Communication>, EngineError> {
    let comms = store.communications()?;
    match SenderType::side_of(actor.role) {
        Some(SenderType::Contractor) => Ok(comms
            .into_iter()
            .filter(|c| c.contractor_id == actor.id)
            .collect()),
        Some(SenderType::DistrictCollector) => Ok(comms
            .into_iter()
            .filter(|c| {
                c.district_collector_id
                    .as_ref()
                    .is_none_or(|dc| *dc == actor.id)
            })
            .collect()),
        None => Err(EngineError::authorization(
            "state officials are not a party to contractor messages",
        )),
    }
}

/// One project with its full submission history, visibility-checked. An
/// actor who cannot see the project gets `NotFound`, not a hint that it
/// exists.
pub fn project_detail<S: EntityStore>(
    store: &S,
    actor: &Profile,
    id: &ProjectId,
) -> Result<ProjectDetail, EngineError> {
    let project = store.project(id)?;
    if !can_view_project(actor, &project) {
        return Err(EngineError::NotFound {
            entity: "project",
            id: id.to_string(),
        });
    }

    let images = store
        .image_updates()?
        .into_iter()
        .filter(|i| i.project_id == *id)
        .collect();
    let fund_updates = store
        .fund_updates()?
        .into_iter()
        .filter(|fu| fu.project_id == *id)
        .collect();
    let alerts = store
        .alerts()?
        .into_iter()
        .filter(|a| a.project_id.as_ref() == Some(id))
        .collect();
    let feedback = store
        .feedback()?
        .into_iter()
        .filter(|f| f.project_id.as_ref() == Some(id))
        .collect();

    Ok(ProjectDetail {
        project,
        images,
        fund_updates,
        alerts,
        feedback,
    })
}

fn active_only(alerts: Vec<Alert>) -> Vec<Alert> {
    alerts
        .into_iter()
        .filter(|a| a.status == AlertStatus::Active)
        .collect()
}

trait Stamped {
    fn stamp(&self) -> chrono::DateTime<chrono::Utc>;
}

impl Stamped for Project {
    fn stamp(&self) -> chrono::DateTime<chrono::Utc> {
        self.created_at
    }
}

impl Stamped for Alert {
    fn stamp(&self) -> chrono::DateTime<chrono::Utc> {
        self.created_at
    }
}

impl Stamped for Feedback {
    fn stamp(&self) -> chrono::DateTime<chrono::Utc> {
        self.created_at
    }
}

fn newest<T: Stamped>(mut items: Vec<T>, limit: usize) -> Vec<T> {
    items.sort_by_key(|item| Reverse(item.stamp()));
    items.truncate(limit);
    items
}
