//! Pure progression rules: lock state, milestone status projection, and
//! progress rollup.
//!
//! Nothing here touches storage. The service layer loads a startup's
//! milestones and deliverable statuses, then asks these functions. Lock state
//! is always computed from the latest milestone statuses and never cached.

use crate::entities::Milestone;
use crate::enums::{DeliverableStatus, EntityType, MilestoneStatus};
use crate::errors::CoreError;

/// Project a milestone's status from its deliverables' statuses.
///
/// - no deliverables → `NotStarted`
/// - every deliverable approved → `Completed`
/// - otherwise → `Pending`
#[must_use]
pub fn derive_milestone_status<I>(statuses: I) -> MilestoneStatus
where
    I: IntoIterator<Item = DeliverableStatus>,
{
    let mut any = false;
    let mut all_approved = true;
    for status in statuses {
        any = true;
        all_approved &= status == DeliverableStatus::Approved;
    }
    match (any, all_approved) {
        (false, _) => MilestoneStatus::NotStarted,
        (true, true) => MilestoneStatus::Completed,
        (true, false) => MilestoneStatus::Pending,
    }
}

/// Whether `target` is locked given all milestones of its startup.
///
/// Sequence 1 is never locked. Sequence `n > 1` is locked iff milestone `n-1`
/// is missing or not completed.
#[must_use]
pub fn is_locked(milestones: &[Milestone], target: &Milestone) -> bool {
    if target.sequence_index <= 1 {
        return false;
    }
    let previous = target.sequence_index - 1;
    !milestones
        .iter()
        .any(|m| m.sequence_index == previous && m.is_completed())
}

/// Lock state of the milestone `milestone_id` within `milestones`.
///
/// # Errors
///
/// Returns `CoreError::NotFound` if the milestone is not part of the slice
/// (i.e. does not belong to the startup the slice was loaded for).
pub fn lock_state(milestones: &[Milestone], milestone_id: &str) -> Result<bool, CoreError> {
    let target = milestones
        .iter()
        .find(|m| m.id == milestone_id)
        .ok_or_else(|| CoreError::not_found(EntityType::Milestone, milestone_id))?;
    Ok(is_locked(milestones, target))
}

/// Rounded percentage of completed milestones; 0 when there are none.
#[must_use]
pub fn progress_percent(milestones: &[Milestone]) -> u8 {
    let total = milestones.len();
    if total == 0 {
        return 0;
    }
    let completed = milestones.iter().filter(|m| m.is_completed()).count();
    // round half up: floor((200c + t) / 2t)
    let percent = (200 * completed + total) / (2 * total);
    u8::try_from(percent).unwrap_or(100)
}

/// Lowest-sequence milestone that is neither completed nor locked.
#[must_use]
pub fn current_actionable(milestones: &[Milestone]) -> Option<&Milestone> {
    let mut ordered: Vec<&Milestone> = milestones.iter().collect();
    ordered.sort_by_key(|m| m.sequence_index);
    ordered
        .into_iter()
        .find(|m| !m.is_completed() && !is_locked(milestones, m))
}
