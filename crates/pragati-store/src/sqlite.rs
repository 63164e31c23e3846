//! [`EntityStore`] over SQLite.
//!
//! Reads map rows straight into the core model types; enum and timestamp
//! parse failures surface as conversion errors rather than panics, so a
//! hand-edited database degrades into a typed backend error. Conditional
//! writes run inside a transaction and re-read the row first purely to
//! produce a precise conflict message — the guard itself is the `WHERE`
//! clause on the `UPDATE`.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, Row, params, types::Type};
use std::str::FromStr;
use tracing::debug;

use pragati_core::model::{
    Alert, AlertId, AlertType, Communication, CommunicationId, Feedback, FeedbackId,
    FeedbackStatus, FundUpdate, FundUpdateId, ImageUpdate, ImageUpdateId, ParseEnumError, Profile,
    ProfileId, Project, ProjectId, ProjectStatus, ReviewStatus,
};
use pragati_core::store::{EntityStore, ReviewDecision, StoreError};

/// SQLite-backed entity store. One connection, one logical actor per call.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub(crate) const fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Direct connection access for maintenance and tests.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Whether seed fixtures were already loaded into this database.
    pub fn is_seeded(&self) -> Result<bool, StoreError> {
        self.conn
            .query_row("SELECT seeded FROM store_meta WHERE id = 1", [], |row| {
                row.get::<_, bool>(0)
            })
            .map_err(backend)
    }

    /// Record that seed fixtures were loaded.
    pub fn mark_seeded(&mut self) -> Result<(), StoreError> {
        self.conn
            .execute("UPDATE store_meta SET seeded = 1 WHERE id = 1", [])
            .map_err(backend)?;
        Ok(())
    }

    fn exists(&self, table: &str, id: &str) -> Result<bool, StoreError> {
        // Table names come from the fixed call sites below, never from input.
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?1)");
        self.conn
            .query_row(&sql, [id], |row| row.get(0))
            .map_err(backend)
    }

    fn guard_new(&self, table: &str, entity: &'static str, id: &str) -> Result<(), StoreError> {
        if self.exists(table, id)? {
            Err(StoreError::AlreadyExists {
                entity,
                id: id.to_string(),
            })
        } else {
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

fn backend(err: rusqlite::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

fn ts(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

fn corrupt<E>(err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(err))
}

fn parse_ts(text: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(corrupt)
}

fn parse_opt_ts(text: Option<String>) -> rusqlite::Result<Option<DateTime<Utc>>> {
    text.as_deref().map(parse_ts).transpose()
}

fn parse_date(text: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(corrupt)
}

fn parse_enum<T>(text: &str) -> rusqlite::Result<T>
where
    T: FromStr<Err = ParseEnumError>,
{
    T::from_str(text).map_err(corrupt)
}

// ---------------------------------------------------------------------------
// Row mappers
// ---------------------------------------------------------------------------

fn row_profile(row: &Row<'_>) -> rusqlite::Result<Profile> {
    Ok(Profile {
        id: ProfileId::new(row.get::<_, String>(0)?),
        role: parse_enum(&row.get::<_, String>(1)?)?,
        assigned_district: row.get(2)?,
        email: row.get(3)?,
        full_name: row.get(4)?,
        created_at: parse_ts(&row.get::<_, String>(5)?)?,
    })
}

fn row_project(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: ProjectId::new(row.get::<_, String>(0)?),
        name: row.get(1)?,
        district: row.get(2)?,
        agency: row.get(3)?,
        contractor_id: row.get::<_, Option<String>>(4)?.map(ProfileId::new),
        budget_allocated: row.get(5)?,
        fund_utilized: row.get(6)?,
        completion_percentage: row.get(7)?,
        status: parse_enum(&row.get::<_, String>(8)?)?,
        start_date: parse_date(&row.get::<_, String>(9)?)?,
        end_date: row
            .get::<_, Option<String>>(10)?
            .as_deref()
            .map(parse_date)
            .transpose()?,
        created_at: parse_ts(&row.get::<_, String>(11)?)?,
        updated_at: parse_ts(&row.get::<_, String>(12)?)?,
    })
}

fn row_alert(row: &Row<'_>) -> rusqlite::Result<Alert> {
    Ok(Alert {
        id: AlertId::new(row.get::<_, String>(0)?),
        project_id: row.get::<_, Option<String>>(1)?.map(ProjectId::new),
        district: row.get(2)?,
        alert_type: AlertType::from(row.get::<_, String>(3)?),
        severity: parse_enum(&row.get::<_, String>(4)?)?,
        status: parse_enum(&row.get::<_, String>(5)?)?,
        title: row.get(6)?,
        description: row.get(7)?,
        resolved_at: parse_opt_ts(row.get(8)?)?,
        created_at: parse_ts(&row.get::<_, String>(9)?)?,
    })
}

fn row_feedback(row: &Row<'_>) -> rusqlite::Result<Feedback> {
    Ok(Feedback {
        id: FeedbackId::new(row.get::<_, String>(0)?),
        project_id: row.get::<_, Option<String>>(1)?.map(ProjectId::new),
        district: row.get(2)?,
        citizen_name: row.get(3)?,
        feedback_type: parse_enum(&row.get::<_, String>(4)?)?,
        priority: parse_enum(&row.get::<_, String>(5)?)?,
        status: parse_enum(&row.get::<_, String>(6)?)?,
        description: row.get(7)?,
        created_at: parse_ts(&row.get::<_, String>(8)?)?,
    })
}

fn row_fund_update(row: &Row<'_>) -> rusqlite::Result<FundUpdate> {
    Ok(FundUpdate {
        id: FundUpdateId::new(row.get::<_, String>(0)?),
        project_id: ProjectId::new(row.get::<_, String>(1)?),
        contractor_id: ProfileId::new(row.get::<_, String>(2)?),
        amount: row.get(3)?,
        description: row.get(4)?,
        receipt_url: row.get(5)?,
        status: parse_enum(&row.get::<_, String>(6)?)?,
        reviewed_by: row.get::<_, Option<String>>(7)?.map(ProfileId::new),
        reviewed_at: parse_opt_ts(row.get(8)?)?,
        created_at: parse_ts(&row.get::<_, String>(9)?)?,
    })
}

fn row_communication(row: &Row<'_>) -> rusqlite::Result<Communication> {
    Ok(Communication {
        id: CommunicationId::new(row.get::<_, String>(0)?),
        project_id: row.get::<_, Option<String>>(1)?.map(ProjectId::new),
        contractor_id: ProfileId::new(row.get::<_, String>(2)?),
        district_collector_id: row.get::<_, Option<String>>(3)?.map(ProfileId::new),
        sender_type: parse_enum(&row.get::<_, String>(4)?)?,
        message: row.get(5)?,
        read: row.get(6)?,
        created_at: parse_ts(&row.get::<_, String>(7)?)?,
    })
}

fn row_image_update(row: &Row<'_>) -> rusqlite::Result<ImageUpdate> {
    Ok(ImageUpdate {
        id: ImageUpdateId::new(row.get::<_, String>(0)?),
        project_id: ProjectId::new(row.get::<_, String>(1)?),
        contractor_id: ProfileId::new(row.get::<_, String>(2)?),
        image_type: parse_enum(&row.get::<_, String>(3)?)?,
        image_url: row.get(4)?,
        description: row.get(5)?,
        created_at: parse_ts(&row.get::<_, String>(6)?)?,
    })
}

// ---------------------------------------------------------------------------
// Shared fetchers (usable inside and outside transactions)
// ---------------------------------------------------------------------------

const PROJECT_COLUMNS: &str = "id, name, district, agency, contractor_id, budget_allocated, \
     fund_utilized, completion_percentage, status, start_date, end_date, created_at, updated_at";

const FUND_UPDATE_COLUMNS: &str = "id, project_id, contractor_id, amount, description, \
     receipt_url, status, reviewed_by, reviewed_at, created_at";

fn fetch_project(conn: &Connection, id: &ProjectId) -> Result<Project, StoreError> {
    let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1");
    match conn.query_row(&sql, [id.as_str()], row_project) {
        Ok(project) => Ok(project),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(StoreError::NotFound {
            entity: "project",
            id: id.to_string(),
        }),
        Err(err) => Err(backend(err)),
    }
}

fn fetch_fund_update(conn: &Connection, id: &FundUpdateId) -> Result<FundUpdate, StoreError> {
    let sql = format!("SELECT {FUND_UPDATE_COLUMNS} FROM fund_updates WHERE id = ?1");
    match conn.query_row(&sql, [id.as_str()], row_fund_update) {
        Ok(update) => Ok(update),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(StoreError::NotFound {
            entity: "fund update",
            id: id.to_string(),
        }),
        Err(err) => Err(backend(err)),
    }
}

fn list<T>(
    conn: &Connection,
    sql: &str,
    mapper: impl FnMut(&Row<'_>) -> rusqlite::Result<T>,
) -> Result<Vec<T>, StoreError> {
    let mut stmt = conn.prepare(sql).map_err(backend)?;
    let rows = stmt.query_map([], mapper).map_err(backend)?;
    rows.collect::<rusqlite::Result<Vec<T>>>().map_err(backend)
}

// ---------------------------------------------------------------------------
// EntityStore impl
// ---------------------------------------------------------------------------

impl EntityStore for SqliteStore {
    fn districts(&self) -> Result<Vec<String>, StoreError> {
        list(&self.conn, "SELECT name FROM districts ORDER BY rowid", |row| {
            row.get(0)
        })
    }

    fn insert_district(&mut self, name: &str) -> Result<(), StoreError> {
        let exists: bool = self
            .conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM districts WHERE name = ?1)",
                [name],
                |row| row.get(0),
            )
            .map_err(backend)?;
        if exists {
            return Err(StoreError::AlreadyExists {
                entity: "district",
                id: name.to_string(),
            });
        }
        self.conn
            .execute("INSERT INTO districts (name) VALUES (?1)", [name])
            .map_err(backend)?;
        Ok(())
    }

    fn profile(&self, id: &ProfileId) -> Result<Profile, StoreError> {
        match self.conn.query_row(
            "SELECT id, role, assigned_district, email, full_name, created_at
             FROM profiles WHERE id = ?1",
            [id.as_str()],
            row_profile,
        ) {
            Ok(profile) => Ok(profile),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(StoreError::NotFound {
                entity: "profile",
                id: id.to_string(),
            }),
            Err(err) => Err(backend(err)),
        }
    }

    fn profiles(&self) -> Result<Vec<Profile>, StoreError> {
        list(
            &self.conn,
            "SELECT id, role, assigned_district, email, full_name, created_at
             FROM profiles ORDER BY rowid",
            row_profile,
        )
    }

    fn insert_profile(&mut self, profile: Profile) -> Result<(), StoreError> {
        self.guard_new("profiles", "profile", profile.id.as_str())?;
        self.conn
            .execute(
                "INSERT INTO profiles (id, role, assigned_district, email, full_name, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    profile.id.as_str(),
                    profile.role.to_string(),
                    profile.assigned_district,
                    profile.email,
                    profile.full_name,
                    ts(profile.created_at),
                ],
            )
            .map_err(backend)?;
        Ok(())
    }

    fn project(&self, id: &ProjectId) -> Result<Project, StoreError> {
        fetch_project(&self.conn, id)
    }

    fn projects(&self) -> Result<Vec<Project>, StoreError> {
        let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects ORDER BY rowid");
        list(&self.conn, &sql, row_project)
    }

    fn insert_project(&mut self, project: Project) -> Result<(), StoreError> {
        self.guard_new("projects", "project", project.id.as_str())?;
        self.conn
            .execute(
                "INSERT INTO projects
                 (id, name, district, agency, contractor_id, budget_allocated, fund_utilized,
                  completion_percentage, status, start_date, end_date, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                params![
                    project.id.as_str(),
                    project.name,
                    project.district,
                    project.agency,
                    project.contractor_id.as_ref().map(ProfileId::as_str),
                    project.budget_allocated,
                    project.fund_utilized,
                    project.completion_percentage,
                    project.status.to_string(),
                    date(project.start_date),
                    project.end_date.map(date),
                    ts(project.created_at),
                    ts(project.updated_at),
                ],
            )
            .map_err(backend)?;
        Ok(())
    }

    fn claim_project(
        &mut self,
        id: &ProjectId,
        contractor: &ProfileId,
        now: DateTime<Utc>,
    ) -> Result<Project, StoreError> {
        let tx = self.conn.transaction().map_err(backend)?;
        let current = fetch_project(&tx, id)?;

        let changed = tx
            .execute(
                "UPDATE projects SET contractor_id = ?1, updated_at = ?2
                 WHERE id = ?3 AND contractor_id IS NULL AND status = 'ongoing'",
                params![contractor.as_str(), ts(now), id.as_str()],
            )
            .map_err(backend)?;

        if changed == 0 {
            let actual = current.contractor_id.map_or_else(
                || format!("status {}", current.status),
                |c| format!("assigned to '{c}'"),
            );
            return Err(StoreError::Conflict {
                entity: "project",
                id: id.to_string(),
                expected: "unassigned and ongoing".into(),
                actual,
            });
        }

        let project = fetch_project(&tx, id)?;
        tx.commit().map_err(backend)?;
        debug!(project = %id, contractor = %contractor, "claim committed");
        Ok(project)
    }

    fn update_progress(
        &mut self,
        id: &ProjectId,
        completion: u8,
        status: ProjectStatus,
        now: DateTime<Utc>,
    ) -> Result<Project, StoreError> {
        let changed = self
            .conn
            .execute(
                "UPDATE projects SET completion_percentage = ?1, status = ?2, updated_at = ?3
                 WHERE id = ?4",
                params![completion, status.to_string(), ts(now), id.as_str()],
            )
            .map_err(backend)?;
        if changed == 0 {
            return Err(StoreError::NotFound {
                entity: "project",
                id: id.to_string(),
            });
        }
        fetch_project(&self.conn, id)
    }

    fn alert(&self, id: &AlertId) -> Result<Alert, StoreError> {
        match self.conn.query_row(
            "SELECT id, project_id, district, alert_type, severity, status, title,
                    description, resolved_at, created_at
             FROM alerts WHERE id = ?1",
            [id.as_str()],
            row_alert,
        ) {
            Ok(alert) => Ok(alert),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(StoreError::NotFound {
                entity: "alert",
                id: id.to_string(),
            }),
            Err(err) => Err(backend(err)),
        }
    }

    fn alerts(&self) -> Result<Vec<Alert>, StoreError> {
        list(
            &self.conn,
            "SELECT id, project_id, district, alert_type, severity, status, title,
                    description, resolved_at, created_at
             FROM alerts ORDER BY rowid",
            row_alert,
        )
    }

    fn insert_alert(&mut self, alert: Alert) -> Result<(), StoreError> {
        self.guard_new("alerts", "alert", alert.id.as_str())?;
        self.conn
            .execute(
                "INSERT INTO alerts
                 (id, project_id, district, alert_type, severity, status, title,
                  description, resolved_at, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    alert.id.as_str(),
                    alert.project_id.as_ref().map(ProjectId::as_str),
                    alert.district,
                    alert.alert_type.as_str(),
                    alert.severity.to_string(),
                    alert.status.to_string(),
                    alert.title,
                    alert.description,
                    alert.resolved_at.map(ts),
                    ts(alert.created_at),
                ],
            )
            .map_err(backend)?;
        Ok(())
    }

    fn resolve_alert(&mut self, id: &AlertId, at: DateTime<Utc>) -> Result<Alert, StoreError> {
        // Existence first, so a missing id is NotFound rather than Conflict.
        let current = self.alert(id)?;
        let changed = self
            .conn
            .execute(
                "UPDATE alerts SET status = 'resolved', resolved_at = ?1
                 WHERE id = ?2 AND status = 'active'",
                params![ts(at), id.as_str()],
            )
            .map_err(backend)?;
        if changed == 0 {
            return Err(StoreError::Conflict {
                entity: "alert",
                id: id.to_string(),
                expected: "status active".into(),
                actual: format!("status {}", current.status),
            });
        }
        self.alert(id)
    }

    fn feedback_entry(&self, id: &FeedbackId) -> Result<Feedback, StoreError> {
        match self.conn.query_row(
            "SELECT id, project_id, district, citizen_name, feedback_type, priority,
                    status, description, created_at
             FROM citizen_feedback WHERE id = ?1",
            [id.as_str()],
            row_feedback,
        ) {
            Ok(feedback) => Ok(feedback),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(StoreError::NotFound {
                entity: "feedback",
                id: id.to_string(),
            }),
            Err(err) => Err(backend(err)),
        }
    }

    fn feedback(&self) -> Result<Vec<Feedback>, StoreError> {
        list(
            &self.conn,
            "SELECT id, project_id, district, citizen_name, feedback_type, priority,
                    status, description, created_at
             FROM citizen_feedback ORDER BY rowid",
            row_feedback,
        )
    }

    fn insert_feedback(&mut self, feedback: Feedback) -> Result<(), StoreError> {
        self.guard_new("citizen_feedback", "feedback", feedback.id.as_str())?;
        self.conn
            .execute(
                "INSERT INTO citizen_feedback
                 (id, project_id, district, citizen_name, feedback_type, priority,
                  status, description, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    feedback.id.as_str(),
                    feedback.project_id.as_ref().map(ProjectId::as_str),
                    feedback.district,
                    feedback.citizen_name,
                    feedback.feedback_type.to_string(),
                    feedback.priority.to_string(),
                    feedback.status.to_string(),
                    feedback.description,
                    ts(feedback.created_at),
                ],
            )
            .map_err(backend)?;
        Ok(())
    }

    fn advance_feedback(
        &mut self,
        id: &FeedbackId,
        expected: FeedbackStatus,
        next: FeedbackStatus,
    ) -> Result<Feedback, StoreError> {
        let current = self.feedback_entry(id)?;
        let changed = self
            .conn
            .execute(
                "UPDATE citizen_feedback SET status = ?1 WHERE id = ?2 AND status = ?3",
                params![next.to_string(), id.as_str(), expected.to_string()],
            )
            .map_err(backend)?;
        if changed == 0 {
            return Err(StoreError::Conflict {
                entity: "feedback",
                id: id.to_string(),
                expected: format!("status {expected}"),
                actual: format!("status {}", current.status),
            });
        }
        self.feedback_entry(id)
    }

    fn fund_update(&self, id: &FundUpdateId) -> Result<FundUpdate, StoreError> {
        fetch_fund_update(&self.conn, id)
    }

    fn fund_updates(&self) -> Result<Vec<FundUpdate>, StoreError> {
        let sql = format!("SELECT {FUND_UPDATE_COLUMNS} FROM fund_updates ORDER BY rowid");
        list(&self.conn, &sql, row_fund_update)
    }

    fn insert_fund_update(&mut self, update: FundUpdate) -> Result<(), StoreError> {
        self.guard_new("fund_updates", "fund update", update.id.as_str())?;
        self.conn
            .execute(
                "INSERT INTO fund_updates
                 (id, project_id, contractor_id, amount, description, receipt_url,
                  status, reviewed_by, reviewed_at, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    update.id.as_str(),
                    update.project_id.as_str(),
                    update.contractor_id.as_str(),
                    update.amount,
                    update.description,
                    update.receipt_url,
                    update.status.to_string(),
                    update.reviewed_by.as_ref().map(ProfileId::as_str),
                    update.reviewed_at.map(ts),
                    ts(update.created_at),
                ],
            )
            .map_err(backend)?;
        Ok(())
    }

    fn settle_fund_update(
        &mut self,
        id: &FundUpdateId,
        expected: ReviewStatus,
        decision: ReviewDecision,
    ) -> Result<FundUpdate, StoreError> {
        let tx = self.conn.transaction().map_err(backend)?;
        let current = fetch_fund_update(&tx, id)?;
        if decision.verdict == ReviewStatus::Approved {
            // Surface a dangling project reference before mutating anything.
            fetch_project(&tx, &current.project_id)?;
        }

        let changed = tx
            .execute(
                "UPDATE fund_updates SET status = ?1, reviewed_by = ?2, reviewed_at = ?3
                 WHERE id = ?4 AND status = ?5",
                params![
                    decision.verdict.to_string(),
                    decision.reviewed_by.as_str(),
                    ts(decision.reviewed_at),
                    id.as_str(),
                    expected.to_string(),
                ],
            )
            .map_err(backend)?;

        if changed == 0 {
            return Err(StoreError::Conflict {
                entity: "fund update",
                id: id.to_string(),
                expected: format!("status {expected}"),
                actual: format!("status {}", current.status),
            });
        }

        if decision.verdict == ReviewStatus::Approved {
            tx.execute(
                "UPDATE projects SET fund_utilized = fund_utilized + ?1, updated_at = ?2
                 WHERE id = ?3",
                params![
                    current.amount,
                    ts(decision.reviewed_at),
                    current.project_id.as_str(),
                ],
            )
            .map_err(backend)?;
        }

        let settled = fetch_fund_update(&tx, id)?;
        tx.commit().map_err(backend)?;
        debug!(fund_update = %id, verdict = %settled.status, "settle committed");
        Ok(settled)
    }

    fn communication(&self, id: &CommunicationId) -> Result<Communication, StoreError> {
        match self.conn.query_row(
            "SELECT id, project_id, contractor_id, district_collector_id, sender_type,
                    message, \"read\", created_at
             FROM communications WHERE id = ?1",
            [id.as_str()],
            row_communication,
        ) {
            Ok(comm) => Ok(comm),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(StoreError::NotFound {
                entity: "communication",
                id: id.to_string(),
            }),
            Err(err) => Err(backend(err)),
        }
    }

    fn communications(&self) -> Result<Vec<Communication>, StoreError> {
        list(
            &self.conn,
            "SELECT id, project_id, contractor_id, district_collector_id, sender_type,
                    message, \"read\", created_at
             FROM communications ORDER BY rowid",
            row_communication,
        )
    }

    fn insert_communication(&mut self, comm: Communication) -> Result<(), StoreError> {
        self.guard_new("communications", "communication", comm.id.as_str())?;
        self.conn
            .execute(
                "INSERT INTO communications
                 (id, project_id, contractor_id, district_collector_id, sender_type,
                  message, \"read\", created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    comm.id.as_str(),
                    comm.project_id.as_ref().map(ProjectId::as_str),
                    comm.contractor_id.as_str(),
                    comm.district_collector_id.as_ref().map(ProfileId::as_str),
                    comm.sender_type.to_string(),
                    comm.message,
                    comm.read,
                    ts(comm.created_at),
                ],
            )
            .map_err(backend)?;
        Ok(())
    }

    fn mark_communication_read(
        &mut self,
        id: &CommunicationId,
    ) -> Result<Communication, StoreError> {
        let changed = self
            .conn
            .execute(
                "UPDATE communications SET \"read\" = 1 WHERE id = ?1",
                [id.as_str()],
            )
            .map_err(backend)?;
        if changed == 0 {
            return Err(StoreError::NotFound {
                entity: "communication",
                id: id.to_string(),
            });
        }
        self.communication(id)
    }

    fn image_updates(&self) -> Result<Vec<ImageUpdate>, StoreError> {
        list(
            &self.conn,
            "SELECT id, project_id, contractor_id, image_type, image_url, description, created_at
             FROM image_updates ORDER BY rowid",
            row_image_update,
        )
    }

    fn insert_image_update(&mut self, update: ImageUpdate) -> Result<(), StoreError> {
        self.guard_new("image_updates", "image update", update.id.as_str())?;
        self.conn
            .execute(
                "INSERT INTO image_updates
                 (id, project_id, contractor_id, image_type, image_url, description, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    update.id.as_str(),
                    update.project_id.as_str(),
                    update.contractor_id.as_str(),
                    update.image_type.to_string(),
                    update.image_url,
                    update.description,
                    ts(update.created_at),
                ],
            )
            .map_err(backend)?;
        Ok(())
    }
}
