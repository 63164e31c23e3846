//! Opaque, stable identifiers for every persisted entity.
//!
//! Ids are plain strings at the storage boundary (the original records carry
//! UUIDs), wrapped in per-entity newtypes so a `ProjectId` can never be
//! passed where a `ProfileId` belongs. `generate()` mints a fresh v4 UUID for
//! records created through the engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing stored id.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Mint a fresh random id.
            #[must_use]
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

entity_id!(
    /// Identifies a [`super::Profile`].
    ProfileId
);
entity_id!(
    /// Identifies a [`super::Project`].
    ProjectId
);
entity_id!(
    /// Identifies an [`super::Alert`].
    AlertId
);
entity_id!(
    /// Identifies a [`super::Feedback`] entry.
    FeedbackId
);
entity_id!(
    /// Identifies a [`super::FundUpdate`].
    FundUpdateId
);
entity_id!(
    /// Identifies a [`super::Communication`].
    CommunicationId
);
entity_id!(
    /// Identifies an [`super::ImageUpdate`].
    ImageUpdateId
);
