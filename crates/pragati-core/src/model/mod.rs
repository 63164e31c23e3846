//! The persisted data model: profiles, projects, alerts, feedback, fund
//! updates, communications, and image updates.
//!
//! Roles, statuses, and types are closed enums with exhaustive matching so a
//! new status is a compile-time-visible change everywhere it matters. The one
//! deliberate exception is [`AlertType`], an open set in the source schema.
//! Monetary fields are raw whole rupees throughout; display units (lakh,
//! crore) are a presentation concern.

pub mod alert;
pub mod comms;
pub mod feedback;
pub mod funds;
pub mod ids;
pub mod images;
pub mod profile;
pub mod project;

pub use alert::{Alert, AlertStatus, AlertType, Severity};
pub use comms::{Communication, SenderType};
pub use feedback::{Feedback, FeedbackPriority, FeedbackStatus, FeedbackType};
pub use funds::{FundUpdate, ReviewStatus};
pub use ids::{
    AlertId, CommunicationId, FeedbackId, FundUpdateId, ImageUpdateId, ProfileId, ProjectId,
};
pub use images::{ImageKind, ImageUpdate};
pub use profile::{Profile, Role};
pub use project::{Project, ProjectStatus};

use std::fmt;

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.expected, self.got)
    }
}

impl std::error::Error for ParseEnumError {}

pub(crate) fn normalize(input: &str) -> String {
    input.trim().to_ascii_lowercase()
}
