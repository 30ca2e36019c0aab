//! Status enums, roles, entity types, and actions for Ignite.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! Status enums with state machines provide `allowed_next_states()` to enforce
//! valid transitions at the application layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Role of the authenticated actor, supplied by the identity layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    Incubatee,
}

impl Role {
    /// Admin roles bypass milestone locks and may review deliverables.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::SuperAdmin | Self::Admin)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Admin => "admin",
            Self::Incubatee => "incubatee",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// StartupStage
// ---------------------------------------------------------------------------

/// Maturity stage of a startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StartupStage {
    #[default]
    Ideation,
    Validation,
    Scaling,
}

impl StartupStage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ideation => "ideation",
            Self::Validation => "validation",
            Self::Scaling => "scaling",
        }
    }
}

impl fmt::Display for StartupStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MilestoneStatus
// ---------------------------------------------------------------------------

/// Status of a milestone. Always derived from its deliverables, never set
/// directly (see `progression::derive_milestone_status`).
///
/// ```text
/// not_started → pending → completed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStatus {
    NotStarted,
    Pending,
    Completed,
}

impl MilestoneStatus {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::NotStarted => &[Self::Pending],
            Self::Pending => &[Self::Completed],
            Self::Completed => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for MilestoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DeliverableStatus
// ---------------------------------------------------------------------------

/// Status of a deliverable through its submit/review lifecycle.
///
/// ```text
/// pending → submitted → approved
///                     → rejected → submitted (resubmission)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeliverableStatus {
    Pending,
    Submitted,
    Approved,
    Rejected,
}

impl DeliverableStatus {
    #[must_use]
    #[allow(clippy::match_same_arms)]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Submitted],
            Self::Submitted => &[Self::Approved, Self::Rejected],
            Self::Rejected => &[Self::Submitted],
            Self::Approved => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for DeliverableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FileSlot
// ---------------------------------------------------------------------------

/// Which of a deliverable's two independent file slots is being written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FileSlot {
    /// Template or reference file provided by program staff.
    Admin,
    /// The startup's submission.
    Incubatee,
}

impl FileSlot {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Incubatee => "incubatee",
        }
    }
}

impl fmt::Display for FileSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ReviewDecision
// ---------------------------------------------------------------------------

/// Outcome of an admin review of a submitted deliverable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    Approve,
    Reject,
}

impl ReviewDecision {
    /// The deliverable status this decision moves to.
    #[must_use]
    pub const fn target_status(self) -> DeliverableStatus {
        match self {
            Self::Approve => DeliverableStatus::Approved,
            Self::Reject => DeliverableStatus::Rejected,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for ReviewDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AuditAction
// ---------------------------------------------------------------------------

/// Type of action recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Created,
    Updated,
    Deleted,
    StatusChanged,
    FileAttached,
    Reviewed,
    Commented,
    MemberAdded,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::StatusChanged => "status_changed",
            Self::FileAttached => "file_attached",
            Self::Reviewed => "reviewed",
            Self::Commented => "commented",
            Self::MemberAdded => "member_added",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Type of entity in the system, used in the audit trail and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Startup,
    Member,
    Milestone,
    Deliverable,
    Readiness,
    Comment,
    Report,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::Member => "member",
            Self::Milestone => "milestone",
            Self::Deliverable => "deliverable",
            Self::Readiness => "readiness",
            Self::Comment => "comment",
            Self::Report => "report",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deliverable_approved_is_terminal() {
        assert!(DeliverableStatus::Approved.allowed_next_states().is_empty());
    }

    #[test]
    fn deliverable_rejected_can_be_resubmitted() {
        assert!(DeliverableStatus::Rejected.can_transition_to(DeliverableStatus::Submitted));
        assert!(!DeliverableStatus::Rejected.can_transition_to(DeliverableStatus::Approved));
    }

    #[test]
    fn deliverable_review_only_from_submitted() {
        for status in [
            DeliverableStatus::Pending,
            DeliverableStatus::Approved,
            DeliverableStatus::Rejected,
        ] {
            assert!(!status.can_transition_to(DeliverableStatus::Approved));
        }
        assert!(DeliverableStatus::Submitted.can_transition_to(DeliverableStatus::Approved));
        assert!(DeliverableStatus::Submitted.can_transition_to(DeliverableStatus::Rejected));
    }

    #[test]
    fn milestone_completed_is_terminal() {
        assert!(MilestoneStatus::Completed.allowed_next_states().is_empty());
        assert!(!MilestoneStatus::NotStarted.can_transition_to(MilestoneStatus::Completed));
    }

    #[test]
    fn review_decision_targets() {
        assert_eq!(
            ReviewDecision::Approve.target_status(),
            DeliverableStatus::Approved
        );
        assert_eq!(
            ReviewDecision::Reject.target_status(),
            DeliverableStatus::Rejected
        );
    }

    #[test]
    fn admin_roles() {
        assert!(Role::SuperAdmin.is_admin());
        assert!(Role::Admin.is_admin());
        assert!(!Role::Incubatee.is_admin());
    }

    #[test]
    fn serde_matches_as_str() {
        let json = serde_json::to_value(MilestoneStatus::NotStarted).unwrap();
        assert_eq!(json, serde_json::json!("not_started"));
        let role: Role = serde_json::from_value(serde_json::json!("super_admin")).unwrap();
        assert_eq!(role, Role::SuperAdmin);
        assert_eq!(role.to_string(), "super_admin");
    }
}
