//! The workflow controller: every mutation of shared entities goes through
//! here.
//!
//! Each function follows the same shape — validate input, authorize the
//! explicit actor, check cross-entity consistency, then issue exactly one
//! conditional store write. Illegal transitions come back as typed
//! [`crate::EngineError`]s; nothing is retried or silently ignored. Callers
//! that hit a `Conflict` re-read current state and decide for themselves.

pub mod claim;
pub mod comms;
pub mod records;
pub mod review;
pub mod submit;

pub use claim::claim_project;
pub use comms::{mark_read, send_message};
pub use records::{advance_feedback, resolve_alert};
pub use review::{approve_fund_update, reject_fund_update};
pub use submit::{report_progress, submit_fund_update, submit_image_update};
