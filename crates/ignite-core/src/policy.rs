//! Permission gate for every mutating operation.
//!
//! One capability table (`allows`) decides which roles may attempt which
//! operation kinds. `authorize` then layers the per-target checks on top:
//! startup membership for incubatees, and the milestone lock. Admin roles
//! bypass both target checks.

use std::fmt;

use crate::enums::{FileSlot, Role};
use crate::errors::CoreError;

/// The kind of mutation an actor is attempting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ManageStartup,
    /// Edit a startup's profile. For incubatees "member" means owner here.
    EditProfile,
    ManageMembers,
    ManageMilestones,
    CreateDeliverable,
    AttachFile(FileSlot),
    ReviewDeliverable,
    ToggleReadiness,
    AddComment,
    SubmitReport,
}

impl Operation {
    /// Whether the operation acts on a single milestone's deliverables and is
    /// therefore subject to the milestone lock.
    #[must_use]
    pub const fn is_milestone_scoped(self) -> bool {
        matches!(
            self,
            Self::CreateDeliverable
                | Self::AttachFile(_)
                | Self::ReviewDeliverable
                | Self::ToggleReadiness
                | Self::AddComment
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ManageStartup => f.write_str("manage startups"),
            Self::EditProfile => f.write_str("edit startup profiles"),
            Self::ManageMembers => f.write_str("manage startup members"),
            Self::ManageMilestones => f.write_str("manage milestones"),
            Self::CreateDeliverable => f.write_str("create deliverables"),
            Self::AttachFile(slot) => write!(f, "attach files to the {slot} slot"),
            Self::ReviewDeliverable => f.write_str("review deliverables"),
            Self::ToggleReadiness => f.write_str("update readiness items"),
            Self::AddComment => f.write_str("comment on deliverables"),
            Self::SubmitReport => f.write_str("submit progress reports"),
        }
    }
}

/// Role capability table: may `role` attempt `operation` at all?
#[must_use]
pub const fn allows(role: Role, operation: Operation) -> bool {
    match role {
        Role::SuperAdmin | Role::Admin => true,
        Role::Incubatee => matches!(
            operation,
            Operation::EditProfile
                | Operation::CreateDeliverable
                | Operation::AttachFile(FileSlot::Incubatee)
                | Operation::ToggleReadiness
                | Operation::AddComment
                | Operation::SubmitReport
        ),
    }
}

/// Lock state of the milestone an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MilestoneLock<'a> {
    pub milestone_id: &'a str,
    pub sequence_index: u32,
    pub locked: bool,
}

/// What the policy needs to know about the operation's target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target<'a> {
    /// Actor is the startup's owner or a registered member.
    pub is_member: bool,
    /// Present for milestone-scoped operations.
    pub milestone: Option<MilestoneLock<'a>>,
}

impl<'a> Target<'a> {
    #[must_use]
    pub const fn startup(is_member: bool) -> Self {
        Self {
            is_member,
            milestone: None,
        }
    }

    #[must_use]
    pub const fn milestone(is_member: bool, lock: MilestoneLock<'a>) -> Self {
        Self {
            is_member,
            milestone: Some(lock),
        }
    }
}

/// Decide whether `role` may perform `operation` against `target`.
///
/// Check order: capability, membership, lock.
///
/// # Errors
///
/// - `CoreError::PermissionDenied` when the role lacks the capability or the
///   actor is not part of the startup.
/// - `CoreError::LockedMilestone` when a non-admin targets a locked milestone.
pub fn authorize(role: Role, operation: Operation, target: Target<'_>) -> Result<(), CoreError> {
    if !allows(role, operation) {
        return Err(CoreError::PermissionDenied { role, operation });
    }
    if role.is_admin() {
        return Ok(());
    }
    if !target.is_member {
        return Err(CoreError::PermissionDenied { role, operation });
    }
    if operation.is_milestone_scoped()
        && let Some(lock) = target.milestone
        && lock.locked
    {
        return Err(CoreError::LockedMilestone {
            milestone_id: lock.milestone_id.to_string(),
            sequence_index: lock.sequence_index,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const LOCKED: MilestoneLock<'static> = MilestoneLock {
        milestone_id: "mil-2",
        sequence_index: 2,
        locked: true,
    };

    const OPEN: MilestoneLock<'static> = MilestoneLock {
        milestone_id: "mil-1",
        sequence_index: 1,
        locked: false,
    };

    #[rstest]
    #[case(Role::SuperAdmin)]
    #[case(Role::Admin)]
    fn admins_bypass_lock_and_membership(#[case] role: Role) {
        for op in [
            Operation::CreateDeliverable,
            Operation::AttachFile(FileSlot::Admin),
            Operation::AttachFile(FileSlot::Incubatee),
            Operation::ReviewDeliverable,
            Operation::ToggleReadiness,
            Operation::AddComment,
        ] {
            assert!(authorize(role, op, Target::milestone(false, LOCKED)).is_ok());
        }
    }

    #[rstest]
    #[case(Operation::ManageStartup)]
    #[case(Operation::ManageMembers)]
    #[case(Operation::ManageMilestones)]
    #[case(Operation::ReviewDeliverable)]
    #[case(Operation::AttachFile(FileSlot::Admin))]
    fn incubatee_lacks_admin_capabilities(#[case] op: Operation) {
        let err = authorize(Role::Incubatee, op, Target::milestone(true, OPEN)).unwrap_err();
        assert_eq!(
            err,
            CoreError::PermissionDenied {
                role: Role::Incubatee,
                operation: op,
            }
        );
    }

    #[test]
    fn incubatee_member_on_locked_milestone_is_rejected() {
        let err = authorize(
            Role::Incubatee,
            Operation::AttachFile(FileSlot::Incubatee),
            Target::milestone(true, LOCKED),
        )
        .unwrap_err();
        assert_eq!(
            err,
            CoreError::LockedMilestone {
                milestone_id: "mil-2".into(),
                sequence_index: 2,
            }
        );
    }

    #[test]
    fn non_member_is_denied_before_lock_check() {
        let err = authorize(
            Role::Incubatee,
            Operation::AddComment,
            Target::milestone(false, LOCKED),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::PermissionDenied { .. }));
    }

    #[test]
    fn incubatee_member_on_open_milestone_is_allowed() {
        assert!(
            authorize(
                Role::Incubatee,
                Operation::ToggleReadiness,
                Target::milestone(true, OPEN)
            )
            .is_ok()
        );
    }

    #[test]
    fn profile_edit_needs_ownership() {
        assert!(authorize(Role::Incubatee, Operation::EditProfile, Target::startup(true)).is_ok());
        assert!(matches!(
            authorize(Role::Incubatee, Operation::EditProfile, Target::startup(false)),
            Err(CoreError::PermissionDenied { .. })
        ));
    }

    #[test]
    fn report_submission_ignores_locks() {
        assert!(authorize(Role::Incubatee, Operation::SubmitReport, Target::startup(true)).is_ok());
        assert!(
            authorize(Role::Incubatee, Operation::SubmitReport, Target::startup(false)).is_err()
        );
    }
}
