//! Two-party messaging between a contractor and a district collector.
//!
//! Messages are created unread. Only the non-sending party flips the read
//! flag; a sender marking their own message is a no-op (the unchanged record
//! comes back), and a state official is not a party to these threads at all.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::EngineError;
use crate::model::{
    Communication, CommunicationId, Profile, ProfileId, ProjectId, Role, SenderType,
};
use crate::store::EntityStore;

/// Send a message. A contractor writes to their district collector; a
/// collector writes to a named contractor. When a project is referenced it
/// must belong to that contractor, and a collector may only reference
/// projects inside their own district.
pub fn send_message<S: EntityStore>(
    store: &mut S,
    actor: &Profile,
    contractor_id: Option<&ProfileId>,
    project_id: Option<&ProjectId>,
    body: &str,
    now: DateTime<Utc>,
) -> Result<Communication, EngineError> {
    if body.trim().is_empty() {
        return Err(EngineError::validation("message body must not be blank"));
    }

    let Some(sender_type) = SenderType::side_of(actor.role) else {
        return Err(EngineError::authorization(
            "state officials are not a party to contractor messages",
        ));
    };

    let (contractor, collector) = match sender_type {
        SenderType::Contractor => (actor.id.clone(), None),
        SenderType::DistrictCollector => {
            let Some(recipient) = contractor_id else {
                return Err(EngineError::validation(
                    "a collector message must name the recipient contractor",
                ));
            };
            // The recipient must exist and actually be a contractor.
            let recipient_profile = store.profile(recipient)?;
            if recipient_profile.role != Role::Contractor {
                return Err(EngineError::validation(format!(
                    "recipient '{recipient}' is not a contractor"
                )));
            }
            (recipient.clone(), Some(actor.id.clone()))
        }
    };

    if let Some(pid) = project_id {
        let project = store.project(pid)?;
        if !project.is_assigned_to(&contractor) {
            return Err(EngineError::validation(format!(
                "project '{pid}' is not assigned to contractor '{contractor}'"
            )));
        }
        if sender_type == SenderType::DistrictCollector
            && !actor.oversees_district(&project.district)
        {
            return Err(EngineError::authorization(format!(
                "district '{}' is outside the collector's scope",
                project.district
            )));
        }
    }

    let comm = Communication {
        id: CommunicationId::generate(),
        project_id: project_id.cloned(),
        contractor_id: contractor,
        district_collector_id: collector,
        sender_type,
        message: body.trim().to_string(),
        read: false,
        created_at: now,
    };
    store.insert_communication(comm.clone())?;
    info!(communication = %comm.id, sender = %actor.id, "message sent");
    Ok(comm)
}

/// Mark a message read. No-op (returns the unchanged record) when the sender
/// tries to mark their own message; an authorization error when the actor is
/// not a party to the thread.
pub fn mark_read<S: EntityStore>(
    store: &mut S,
    actor: &Profile,
    id: &CommunicationId,
) -> Result<Communication, EngineError> {
    let comm = store.communication(id)?;

    let Some(side) = SenderType::side_of(actor.role) else {
        return Err(EngineError::authorization(
            "state officials are not a party to contractor messages",
        ));
    };

    match side {
        SenderType::Contractor => {
            if comm.contractor_id != actor.id {
                return Err(EngineError::authorization(format!(
                    "communication '{id}' belongs to a different contractor"
                )));
            }
        }
        SenderType::DistrictCollector => {
            if comm
                .district_collector_id
                .as_ref()
                .is_some_and(|dc| *dc != actor.id)
            {
                return Err(EngineError::authorization(format!(
                    "communication '{id}' belongs to a different collector"
                )));
            }
        }
    }

    if side == comm.sender_type {
        debug!(communication = %id, "sender mark-read ignored");
        return Ok(comm);
    }

    let updated = store.mark_communication_read(id)?;
    debug!(communication = %id, reader = %actor.id, "message read");
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::{mark_read, send_message};
    use crate::error::ErrorCode;
    use crate::model::{
        Profile, ProfileId, Project, ProjectId, ProjectStatus, Role, SenderType,
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
        for p in [
            profile("c-1", Role::Contractor, None),
            profile("dc-1", Role::DistrictCollector, Some("Mumbai")),
        ] {
            store.insert_profile(p).expect("insert profile");
        }
        store
            .insert_project(Project {
                id: ProjectId::new("p1"),
                name: "Rural Road Development Phase 1".into(),
                district: "Mumbai".into(),
                agency: "PWD".into(),
                contractor_id: Some(ProfileId::new("c-1")),
                budget_allocated: 5_000_000,
                fund_utilized: 3_200_000,
                completion_percentage: 64,
                status: ProjectStatus::Ongoing,
                start_date: NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date"),
                end_date: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
            .expect("insert project");
        store
    }

    #[test]
    fn contractor_message_is_created_unread() {
        let mut store = seeded_store();
        let sender = profile("c-1", Role::Contractor, None);
        let comm = send_message(
            &mut store,
            &sender,
            None,
            Some(&ProjectId::new("p1")),
            "Road foundation completed for 5km stretch",
            Utc::now(),
        )
        .expect("send");
        assert!(!comm.read);
        assert_eq!(comm.sender_type, SenderType::Contractor);
        assert_eq!(comm.contractor_id, ProfileId::new("c-1"));
        assert!(comm.district_collector_id.is_none());
    }

    #[test]
    fn counterparty_marks_read_sender_cannot() {
        let mut store = seeded_store();
        let sender = profile("c-1", Role::Contractor, None);
        let comm = send_message(&mut store, &sender, None, None, "Update please", Utc::now())
            .expect("send");

        // sender's own attempt is a no-op
        let unchanged = mark_read(&mut store, &sender, &comm.id).expect("no-op");
        assert!(!unchanged.read);

        let collector = profile("dc-1", Role::DistrictCollector, Some("Mumbai"));
        let read = mark_read(&mut store, &collector, &comm.id).expect("counterparty read");
        assert!(read.read);
    }

    #[test]
    fn collector_message_requires_recipient() {
        let mut store = seeded_store();
        let collector = profile("dc-1", Role::DistrictCollector, Some("Mumbai"));
        let err = send_message(&mut store, &collector, None, None, "Status?", Utc::now())
            .expect_err("no recipient");
        assert_eq!(err.code(), ErrorCode::Validation);

        let comm = send_message(
            &mut store,
            &collector,
            Some(&ProfileId::new("c-1")),
            None,
            "Status?",
            Utc::now(),
        )
        .expect("send with recipient");
        assert_eq!(comm.district_collector_id, Some(ProfileId::new("dc-1")));
        assert_eq!(comm.sender_type, SenderType::DistrictCollector);
    }

    #[test]
    fn project_must_belong_to_the_contractor() {
        let mut store = seeded_store();
        store
            .insert_profile(profile("c-2", Role::Contractor, None))
            .expect("insert");
        let other = profile("c-2", Role::Contractor, None);
        let err = send_message(
            &mut store,
            &other,
            None,
            Some(&ProjectId::new("p1")),
            "About this project",
            Utc::now(),
        )
        .expect_err("foreign project");
        assert_eq!(err.code(), ErrorCode::Validation);
    }

    #[test]
    fn out_of_district_collector_cannot_reference_project() {
        let mut store = seeded_store();
        let foreign = profile("dc-2", Role::DistrictCollector, Some("Pune"));
        let err = send_message(
            &mut store,
            &foreign,
            Some(&ProfileId::new("c-1")),
            Some(&ProjectId::new("p1")),
            "Inspection due",
            Utc::now(),
        )
        .expect_err("out of scope");
        assert_eq!(err.code(), ErrorCode::Authorization);
    }

    #[test]
    fn state_official_is_not_a_party() {
        let mut store = seeded_store();
        let sender = profile("c-1", Role::Contractor, None);
        let comm = send_message(&mut store, &sender, None, None, "Hello", Utc::now())
            .expect("send");

        let official = profile("so-1", Role::StateOfficial, None);
        let err = mark_read(&mut store, &official, &comm.id).expect_err("no seat");
        assert_eq!(err.code(), ErrorCode::Authorization);
    }

    #[test]
    fn blank_body_is_rejected() {
        let mut store = seeded_store();
        let sender = profile("c-1", Role::Contractor, None);
        let err = send_message(&mut store, &sender, None, None, "   ", Utc::now())
            .expect_err("blank");
        assert_eq!(err.code(), ErrorCode::Validation);
    }
}
