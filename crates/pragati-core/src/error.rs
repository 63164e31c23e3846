use std::fmt;

use crate::store::StoreError;

/// Machine-readable error codes, one per taxonomy member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Authorization,
    NotFound,
    Conflict,
    Validation,
    Storage,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Authorization => "E1001",
            Self::NotFound => "E2001",
            Self::Conflict => "E3001",
            Self::Validation => "E4001",
            Self::Storage => "E5001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Authorization => "Actor not authorized for this action",
            Self::NotFound => "Referenced record not found",
            Self::Conflict => "State changed since it was read",
            Self::Validation => "Invalid input",
            Self::Storage => "Storage backend failure",
        }
    }

    /// Optional remediation hint surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::Authorization => {
                Some("Check the acting profile's role and assigned district.")
            }
            Self::NotFound => None,
            Self::Conflict => {
                Some("Re-read the current record state and retry if still applicable.")
            }
            Self::Validation => Some("Correct the rejected field and resubmit."),
            Self::Storage => Some("Check the database file and its permissions."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// The engine's error taxonomy. Every rejected action carries the specific
/// reason; callers decide whether to re-read and retry (the engine never
/// retries on its own).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The actor's role or district scope does not permit the action.
    #[error("not authorized: {reason}")]
    Authorization { reason: String },

    /// A referenced record id does not exist.
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    /// A transition precondition no longer holds (stale status, taken
    /// project, already-reviewed update).
    #[error("conflict: {reason}")]
    Conflict { reason: String },

    /// Malformed input: non-positive amount, out-of-range percentage, blank
    /// required field.
    #[error("invalid input: {reason}")]
    Validation { reason: String },

    /// A backend fault from the entity store, distinct from the four
    /// rejection categories above.
    #[error("storage: {0}")]
    Storage(String),
}

impl EngineError {
    /// The taxonomy code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Authorization { .. } => ErrorCode::Authorization,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::Conflict { .. } => ErrorCode::Conflict,
            Self::Validation { .. } => ErrorCode::Validation,
            Self::Storage(_) => ErrorCode::Storage,
        }
    }

    pub(crate) fn authorization(reason: impl Into<String>) -> Self {
        Self::Authorization {
            reason: reason.into(),
        }
    }

    pub(crate) fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
        }
    }

    pub(crate) fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => Self::NotFound { entity, id },
            StoreError::Conflict {
                entity,
                id,
                expected,
                actual,
            } => Self::Conflict {
                reason: format!("{entity} '{id}' expected {expected}, found {actual}"),
            },
            StoreError::AlreadyExists { entity, id } => Self::Conflict {
                reason: format!("{entity} '{id}' already exists"),
            },
            StoreError::Backend(msg) => Self::Storage(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EngineError, ErrorCode};
    use crate::store::StoreError;
    use std::collections::HashSet;

    #[test]
    fn all_codes_are_unique() {
        let all = [
            ErrorCode::Authorization,
            ErrorCode::NotFound,
            ErrorCode::Conflict,
            ErrorCode::Validation,
            ErrorCode::Storage,
        ];

        let mut seen = HashSet::new();
        for code in all {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        let code = ErrorCode::Conflict.code();
        assert_eq!(code.len(), 5);
        assert!(code.starts_with('E'));
        assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn store_conflict_maps_to_conflict() {
        let err = EngineError::from(StoreError::Conflict {
            entity: "fund update",
            id: "fu-1".into(),
            expected: "pending".into(),
            actual: "approved".into(),
        });
        assert_eq!(err.code(), ErrorCode::Conflict);
        assert!(err.to_string().contains("approved"));
    }

    #[test]
    fn store_not_found_keeps_entity_and_id() {
        let err = EngineError::from(StoreError::NotFound {
            entity: "project",
            id: "p-9".into(),
        });
        assert_eq!(
            err,
            EngineError::NotFound {
                entity: "project",
                id: "p-9".into()
            }
        );
    }
}
