//! One module per command. Every handler receives a [`Ctx`] with the opened
//! store, the resolved acting profile, and the output mode — commands never
//! reach around the engine to query raw tables.

pub mod claim;
pub mod completions;
pub mod dashboard;
pub mod fundflow;
pub mod init;
pub mod message;
pub mod projects;
pub mod records;
pub mod review;
pub mod submit;

use pragati_core::model::Profile;
use pragati_store::SqliteStore;

use crate::output::OutputMode;

/// Per-invocation context shared by all engine-facing commands.
pub struct Ctx {
    pub store: SqliteStore,
    pub actor: Profile,
    pub output: OutputMode,
}
