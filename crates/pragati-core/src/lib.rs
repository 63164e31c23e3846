//! pragati-core: the role-scoped visibility, aggregation, and workflow engine
//! for monitoring public infrastructure projects.
//!
//! The engine is pure and synchronous. Every entry point takes an explicit
//! acting [`model::Profile`] — there is no ambient "current session" — and
//! operates over snapshots provided by an [`store::EntityStore`]. Mutations go
//! through the workflow functions in [`workflow`], which validate, authorize,
//! and then issue a single conditional store write; concurrent writers are
//! resolved by compare-and-set at the store, never by locks.
//!
//! # Conventions
//!
//! - **Errors**: typed [`error::EngineError`] taxonomy; no generic failures.
//! - **Logging**: `tracing` macros (`info!` on transitions, `warn!` on
//!   conflicts, `debug!` elsewhere).

pub mod aggregate;
pub mod error;
pub mod facade;
pub mod model;
pub mod percent;
pub mod store;
pub mod visibility;
pub mod workflow;

pub use error::{EngineError, ErrorCode};
pub use store::{EntityStore, MemoryStore, StoreError};
