//! Canonical SQLite schema for the pragati store.
//!
//! One table per entity of the monitoring domain, normalized and
//! CHECK-constrained so a loosely-typed writer cannot smuggle in an unknown
//! status. `alert_type` is deliberately unconstrained — it is the one open
//! set in the model. Timestamps are RFC 3339 TEXT in UTC; dates are
//! `YYYY-MM-DD` TEXT; money columns are whole rupees as INTEGER.

/// Migration v1: entity tables plus store metadata.
pub const MIGRATION_V1_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS districts (
    name TEXT PRIMARY KEY CHECK (length(trim(name)) > 0)
);

CREATE TABLE IF NOT EXISTS profiles (
    id TEXT PRIMARY KEY,
    role TEXT NOT NULL CHECK (role IN ('state_official', 'district_collector', 'contractor')),
    assigned_district TEXT,
    email TEXT NOT NULL,
    full_name TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS projects (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    district TEXT NOT NULL,
    agency TEXT NOT NULL,
    contractor_id TEXT REFERENCES profiles(id),
    budget_allocated INTEGER NOT NULL CHECK (budget_allocated >= 0),
    fund_utilized INTEGER NOT NULL DEFAULT 0 CHECK (fund_utilized >= 0),
    completion_percentage INTEGER NOT NULL DEFAULT 0
        CHECK (completion_percentage BETWEEN 0 AND 100),
    status TEXT NOT NULL CHECK (status IN ('planned', 'ongoing', 'delayed', 'completed')),
    start_date TEXT NOT NULL,
    end_date TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS alerts (
    id TEXT PRIMARY KEY,
    project_id TEXT REFERENCES projects(id),
    district TEXT NOT NULL,
    alert_type TEXT NOT NULL,
    severity TEXT NOT NULL CHECK (severity IN ('low', 'medium', 'high', 'critical')),
    status TEXT NOT NULL DEFAULT 'active' CHECK (status IN ('active', 'resolved')),
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    resolved_at TEXT,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS citizen_feedback (
    id TEXT PRIMARY KEY,
    project_id TEXT REFERENCES projects(id),
    district TEXT NOT NULL,
    citizen_name TEXT,
    feedback_type TEXT NOT NULL
        CHECK (feedback_type IN ('complaint', 'query', 'suggestion', 'appreciation')),
    priority TEXT NOT NULL CHECK (priority IN ('low', 'medium', 'high')),
    status TEXT NOT NULL DEFAULT 'pending'
        CHECK (status IN ('pending', 'in_progress', 'resolved')),
    description TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS fund_updates (
    id TEXT PRIMARY KEY,
    project_id TEXT NOT NULL REFERENCES projects(id),
    contractor_id TEXT NOT NULL REFERENCES profiles(id),
    amount INTEGER NOT NULL CHECK (amount > 0),
    description TEXT NOT NULL,
    receipt_url TEXT,
    status TEXT NOT NULL DEFAULT 'pending'
        CHECK (status IN ('pending', 'approved', 'rejected')),
    reviewed_by TEXT REFERENCES profiles(id),
    reviewed_at TEXT,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS communications (
    id TEXT PRIMARY KEY,
    project_id TEXT REFERENCES projects(id),
    contractor_id TEXT NOT NULL REFERENCES profiles(id),
    district_collector_id TEXT REFERENCES profiles(id),
    sender_type TEXT NOT NULL CHECK (sender_type IN ('contractor', 'district_collector')),
    message TEXT NOT NULL,
    read INTEGER NOT NULL DEFAULT 0 CHECK (read IN (0, 1)),
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS image_updates (
    id TEXT PRIMARY KEY,
    project_id TEXT NOT NULL REFERENCES projects(id),
    contractor_id TEXT NOT NULL REFERENCES profiles(id),
    image_type TEXT NOT NULL CHECK (image_type IN ('progress', 'ar', '360')),
    image_url TEXT NOT NULL,
    description TEXT,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS store_meta (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    schema_version INTEGER NOT NULL,
    seeded INTEGER NOT NULL DEFAULT 0 CHECK (seeded IN (0, 1))
);

INSERT OR IGNORE INTO store_meta (id, schema_version, seeded) VALUES (1, 1, 0);
"#;

/// Migration v2: query-path indexes.
pub const MIGRATION_V2_SQL: &str = r"
CREATE INDEX IF NOT EXISTS idx_projects_district ON projects(district);
CREATE INDEX IF NOT EXISTS idx_projects_contractor ON projects(contractor_id);
CREATE INDEX IF NOT EXISTS idx_alerts_district ON alerts(district);
CREATE INDEX IF NOT EXISTS idx_alerts_project ON alerts(project_id);
CREATE INDEX IF NOT EXISTS idx_feedback_district ON citizen_feedback(district);
CREATE INDEX IF NOT EXISTS idx_fund_updates_project ON fund_updates(project_id);
CREATE INDEX IF NOT EXISTS idx_fund_updates_status ON fund_updates(status);
CREATE INDEX IF NOT EXISTS idx_communications_contractor ON communications(contractor_id);
CREATE INDEX IF NOT EXISTS idx_image_updates_project ON image_updates(project_id);
";

/// Indexes every migrated database must carry.
pub const REQUIRED_INDEXES: &[&str] = &[
    "idx_projects_district",
    "idx_projects_contractor",
    "idx_alerts_district",
    "idx_alerts_project",
    "idx_feedback_district",
    "idx_fund_updates_project",
    "idx_fund_updates_status",
    "idx_communications_contractor",
    "idx_image_updates_project",
];
