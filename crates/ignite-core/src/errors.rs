//! Business rule errors for Ignite.
//!
//! These are the typed failures every progression operation can report.
//! Storage failures are not represented here: they live in `ignite-db`'s
//! `DatabaseError` and are never folded into a business error.

use thiserror::Error;

use crate::enums::{EntityType, Role};
use crate::policy::Operation;

/// Errors raised when a request breaks a progression rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Unknown id, or an id that does not live under the stated parent.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: EntityType, id: String },

    /// A sibling with the same name already exists under the parent.
    #[error("Duplicate name: {entity_type} '{name}' already exists under {parent_id}")]
    DuplicateName {
        entity_type: EntityType,
        parent_id: String,
        name: String,
    },

    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: EntityType,
        id: String,
        from: String,
        to: String,
    },

    /// The actor's role lacks the capability for this operation.
    #[error("Permission denied: {role} may not {operation}")]
    PermissionDenied { role: Role, operation: Operation },

    /// A non-privileged actor targeted a milestone whose predecessor is not completed.
    #[error("Milestone {milestone_id} (#{sequence_index}) is locked")]
    LockedMilestone {
        milestone_id: String,
        sequence_index: u32,
    },

    /// Malformed input (empty name, empty comment, ...).
    #[error("Validation error: {0}")]
    Validation(String),
}

impl CoreError {
    pub fn not_found(entity_type: EntityType, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    pub fn invalid_transition(
        entity_type: EntityType,
        id: impl Into<String>,
        from: impl ToString,
        to: impl ToString,
    ) -> Self {
        Self::InvalidTransition {
            entity_type,
            id: id.into(),
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

/// Reject empty or whitespace-only input, returning the trimmed value.
///
/// # Errors
///
/// Returns `CoreError::Validation` naming `field` when the value is blank.
pub fn require_non_blank<'a>(field: &str, value: &'a str) -> Result<&'a str, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_non_blank_trims() {
        assert_eq!(require_non_blank("name", "  Report ").unwrap(), "Report");
    }

    #[test]
    fn require_non_blank_rejects_whitespace() {
        let err = require_non_blank("content", " \n\t").unwrap_err();
        assert_eq!(
            err,
            CoreError::Validation("content must not be empty".into())
        );
    }

    #[test]
    fn display_messages() {
        let err = CoreError::LockedMilestone {
            milestone_id: "mil-1".into(),
            sequence_index: 2,
        };
        assert_eq!(err.to_string(), "Milestone mil-1 (#2) is locked");

        let err = CoreError::invalid_transition(
            EntityType::Deliverable,
            "dlv-1",
            "pending",
            "approved",
        );
        assert_eq!(
            err.to_string(),
            "Invalid state transition: deliverable dlv-1 from pending to approved"
        );
    }
}
