//! Deliverable repository: creation, file slots, review, and the status machine
//! pending → submitted → {approved, rejected}, rejected → submitted.
//!
//! Every mutation here ends by recomputing the parent milestone's status.

use chrono::{NaiveDate, Utc};

use ignite_core::audit_detail::{FileAttachedDetail, ReviewedDetail, StatusChangedDetail};
use ignite_core::entities::{Deliverable, Milestone};
use ignite_core::enums::{AuditAction, DeliverableStatus, EntityType, FileSlot, MilestoneStatus, ReviewDecision};
use ignite_core::errors::{CoreError, require_non_blank};
use ignite_core::identity::Actor;
use ignite_core::ids::PREFIX_DELIVERABLE;
use ignite_core::policy::Operation;
use ignite_core::responses::DeliverableDetail;

use crate::error::DatabaseError;
use crate::helpers::{
    format_date, get_opt_string, parse_datetime, parse_enum, parse_optional_date, to_detail,
};
use crate::service::IgniteService;

const SELECT_COLS: &str = "id, milestone_id, name, requirements, due_date, status, \
     admin_file, incubatee_file, created_at, updated_at";

fn row_to_deliverable(row: &libsql::Row) -> Result<Deliverable, DatabaseError> {
    Ok(Deliverable {
        id: row.get(0)?,
        milestone_id: row.get(1)?,
        name: row.get(2)?,
        requirements: get_opt_string(row, 3)?,
        due_date: parse_optional_date(get_opt_string(row, 4)?.as_deref())?,
        status: parse_enum(&row.get::<String>(5)?)?,
        admin_file: get_opt_string(row, 6)?,
        incubatee_file: get_opt_string(row, 7)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
        updated_at: parse_datetime(&row.get::<String>(9)?)?,
    })
}

/// Payload for [`IgniteService::create_deliverable`].
#[derive(Debug, Clone, Default)]
pub struct NewDeliverable {
    pub name: String,
    pub requirements: Option<String>,
    pub due_date: Option<NaiveDate>,
}

impl NewDeliverable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl IgniteService {
    /// Create a pending deliverable under a milestone.
    ///
    /// # Errors
    ///
    /// - `NotFound` for an unknown milestone.
    /// - `PermissionDenied` for non-members, `LockedMilestone` for incubatees
    ///   targeting a locked milestone.
    /// - `Validation` for a blank name.
    /// - `InvalidTransition` when the milestone is already completed.
    /// - `DuplicateName` when the milestone already has a deliverable so named.
    pub async fn create_deliverable(
        &self,
        actor: &Actor,
        milestone_id: &str,
        new: &NewDeliverable,
    ) -> Result<Deliverable, DatabaseError> {
        self.write_tx(|svc| svc.create_deliverable_tx(actor, milestone_id, new))
            .await
    }

    async fn create_deliverable_tx(
        &self,
        actor: &Actor,
        milestone_id: &str,
        new: &NewDeliverable,
    ) -> Result<Deliverable, DatabaseError> {
        let milestone = self
            .authorize_milestone(actor, Operation::CreateDeliverable, milestone_id)
            .await?;
        let deliverable = self.insert_deliverable(actor, &milestone, new).await?;
        self.recompute_milestone_status_tx(actor, milestone_id)
            .await?;
        Ok(deliverable)
    }

    /// Insert without gating or recomputing. Callers own both.
    pub(crate) async fn insert_deliverable(
        &self,
        actor: &Actor,
        milestone: &Milestone,
        new: &NewDeliverable,
    ) -> Result<Deliverable, DatabaseError> {
        let name = require_non_blank("deliverable name", &new.name)?;
        if milestone.is_completed() {
            return Err(CoreError::invalid_transition(
                EntityType::Milestone,
                &milestone.id,
                MilestoneStatus::Completed,
                MilestoneStatus::Pending,
            )
            .into());
        }
        if self.deliverable_name_taken(&milestone.id, name).await? {
            return Err(CoreError::DuplicateName {
                entity_type: EntityType::Deliverable,
                parent_id: milestone.id.clone(),
                name: name.to_string(),
            }
            .into());
        }

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_DELIVERABLE).await?;
        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO deliverables ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, NULL, NULL, ?7, ?8)"
                ),
                libsql::params![
                    id.as_str(),
                    milestone.id.as_str(),
                    name,
                    new.requirements.as_deref(),
                    new.due_date.map(format_date),
                    DeliverableStatus::Pending.as_str(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        let deliverable = Deliverable {
            id: id.clone(),
            milestone_id: milestone.id.clone(),
            name: name.to_string(),
            requirements: new.requirements.clone(),
            due_date: new.due_date,
            status: DeliverableStatus::Pending,
            admin_file: None,
            incubatee_file: None,
            created_at: now,
            updated_at: now,
        };
        self.record(
            actor,
            EntityType::Deliverable,
            &id,
            AuditAction::Created,
            Some(to_detail(&deliverable)?),
        )
        .await?;
        Ok(deliverable)
    }

    /// Store `file_ref` in one of the deliverable's file slots.
    ///
    /// The incubatee slot drives the lifecycle: pending or rejected becomes
    /// submitted, submitted stays submitted with the file replaced. The admin
    /// slot never changes status.
    ///
    /// # Errors
    ///
    /// - `NotFound` for an unknown deliverable.
    /// - `PermissionDenied` when an incubatee targets the admin slot or is not
    ///   part of the startup; `LockedMilestone` on a locked milestone.
    /// - `Validation` for a blank `file_ref`.
    /// - `InvalidTransition` for an incubatee upload to an approved deliverable.
    pub async fn attach_file(
        &self,
        actor: &Actor,
        deliverable_id: &str,
        slot: FileSlot,
        file_ref: &str,
    ) -> Result<Deliverable, DatabaseError> {
        self.write_tx(|svc| svc.attach_file_tx(actor, deliverable_id, slot, file_ref))
            .await
    }

    async fn attach_file_tx(
        &self,
        actor: &Actor,
        deliverable_id: &str,
        slot: FileSlot,
        file_ref: &str,
    ) -> Result<Deliverable, DatabaseError> {
        let mut deliverable = self.get_deliverable(deliverable_id).await?;
        self.authorize_milestone(actor, Operation::AttachFile(slot), &deliverable.milestone_id)
            .await?;
        let file_ref = require_non_blank("file reference", file_ref)?;

        let previous = deliverable.status;
        match slot {
            FileSlot::Admin => deliverable.admin_file = Some(file_ref.to_string()),
            FileSlot::Incubatee => {
                match previous {
                    DeliverableStatus::Pending | DeliverableStatus::Rejected => {
                        deliverable.status = DeliverableStatus::Submitted;
                    }
                    DeliverableStatus::Submitted => {}
                    DeliverableStatus::Approved => {
                        return Err(CoreError::invalid_transition(
                            EntityType::Deliverable,
                            deliverable_id,
                            previous,
                            DeliverableStatus::Submitted,
                        )
                        .into());
                    }
                }
                deliverable.incubatee_file = Some(file_ref.to_string());
            }
        }

        let now = Utc::now();
        deliverable.updated_at = now;
        self.db()
            .conn()
            .execute(
                "UPDATE deliverables
                 SET status = ?1, admin_file = ?2, incubatee_file = ?3, updated_at = ?4
                 WHERE id = ?5",
                libsql::params![
                    deliverable.status.as_str(),
                    deliverable.admin_file.as_deref(),
                    deliverable.incubatee_file.as_deref(),
                    now.to_rfc3339(),
                    deliverable_id
                ],
            )
            .await?;

        self.record(
            actor,
            EntityType::Deliverable,
            deliverable_id,
            AuditAction::FileAttached,
            Some(to_detail(&FileAttachedDetail {
                slot,
                file_ref: file_ref.to_string(),
            })?),
        )
        .await?;
        if deliverable.status != previous {
            self.record(
                actor,
                EntityType::Deliverable,
                deliverable_id,
                AuditAction::StatusChanged,
                Some(to_detail(&StatusChangedDetail {
                    from: previous.as_str().to_string(),
                    to: deliverable.status.as_str().to_string(),
                    reason: Some("incubatee upload".to_string()),
                })?),
            )
            .await?;
        }

        self.recompute_milestone_status_tx(actor, &deliverable.milestone_id)
            .await?;
        Ok(deliverable)
    }

    /// Approve or reject a submitted deliverable.
    ///
    /// # Errors
    ///
    /// - `NotFound` for an unknown deliverable.
    /// - `PermissionDenied` for non-admin roles.
    /// - `InvalidTransition` unless the deliverable is submitted.
    pub async fn review_deliverable(
        &self,
        actor: &Actor,
        deliverable_id: &str,
        decision: ReviewDecision,
    ) -> Result<Deliverable, DatabaseError> {
        self.write_tx(|svc| svc.review_deliverable_tx(actor, deliverable_id, decision))
            .await
    }

    async fn review_deliverable_tx(
        &self,
        actor: &Actor,
        deliverable_id: &str,
        decision: ReviewDecision,
    ) -> Result<Deliverable, DatabaseError> {
        let mut deliverable = self.get_deliverable(deliverable_id).await?;
        self.authorize_milestone(actor, Operation::ReviewDeliverable, &deliverable.milestone_id)
            .await?;

        let target = decision.target_status();
        if !deliverable.status.can_transition_to(target) {
            return Err(CoreError::invalid_transition(
                EntityType::Deliverable,
                deliverable_id,
                deliverable.status,
                target,
            )
            .into());
        }

        let now = Utc::now();
        deliverable.status = target;
        deliverable.updated_at = now;
        self.db()
            .conn()
            .execute(
                "UPDATE deliverables SET status = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![target.as_str(), now.to_rfc3339(), deliverable_id],
            )
            .await?;

        self.record(
            actor,
            EntityType::Deliverable,
            deliverable_id,
            AuditAction::Reviewed,
            Some(to_detail(&ReviewedDetail { decision })?),
        )
        .await?;
        tracing::debug!(deliverable = %deliverable_id, %decision, "deliverable reviewed");

        self.recompute_milestone_status_tx(actor, &deliverable.milestone_id)
            .await?;
        Ok(deliverable)
    }

    /// # Errors
    ///
    /// `NotFound` if no deliverable has this id.
    pub async fn get_deliverable(&self, id: &str) -> Result<Deliverable, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM deliverables WHERE id = ?1"), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::not_found(EntityType::Deliverable, id))?;
        row_to_deliverable(&row)
    }

    /// Deliverables of a milestone in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_deliverables(
        &self,
        milestone_id: &str,
    ) -> Result<Vec<Deliverable>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM deliverables WHERE milestone_id = ?1 ORDER BY rowid"),
                [milestone_id],
            )
            .await?;
        let mut deliverables = Vec::new();
        while let Some(row) = rows.next().await? {
            deliverables.push(row_to_deliverable(&row)?);
        }
        Ok(deliverables)
    }

    /// A deliverable with its readiness checklist and comment thread.
    ///
    /// # Errors
    ///
    /// `NotFound` if no deliverable has this id.
    pub async fn deliverable_detail(&self, id: &str) -> Result<DeliverableDetail, DatabaseError> {
        let deliverable = self.get_deliverable(id).await?;
        let readiness = self.list_readiness(id).await?;
        let comments = self.list_comments(id).await?;
        Ok(DeliverableDetail {
            deliverable,
            readiness,
            comments,
        })
    }

    pub(crate) async fn deliverable_statuses(
        &self,
        milestone_id: &str,
    ) -> Result<Vec<DeliverableStatus>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT status FROM deliverables WHERE milestone_id = ?1",
                [milestone_id],
            )
            .await?;
        let mut statuses = Vec::new();
        while let Some(row) = rows.next().await? {
            statuses.push(parse_enum(&row.get::<String>(0)?)?);
        }
        Ok(statuses)
    }

    async fn deliverable_name_taken(
        &self,
        milestone_id: &str,
        name: &str,
    ) -> Result<bool, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT 1 FROM deliverables WHERE milestone_id = ?1 AND name = ?2",
                [milestone_id, name],
            )
            .await?;
        Ok(rows.next().await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::audit::AuditFilter;
    use crate::test_support::{
        admin, approved_deliverable, founder, outsider, seeded_startup, test_service,
    };
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[tokio::test]
    async fn create_moves_milestone_to_pending() {
        let svc = test_service().await;
        let (_, milestones) = seeded_startup(&svc).await;
        let due = NaiveDate::from_ymd_opt(2026, 11, 30).unwrap();

        let deliverable = svc
            .create_deliverable(
                &founder(),
                &milestones[0].id,
                &NewDeliverable {
                    name: "Pitch Deck".into(),
                    requirements: Some("10 slides max".into()),
                    due_date: Some(due),
                },
            )
            .await
            .unwrap();

        assert!(deliverable.id.starts_with("dlv-"));
        assert_eq!(deliverable.status, DeliverableStatus::Pending);
        assert_eq!(svc.get_deliverable(&deliverable.id).await.unwrap(), deliverable);
        assert_eq!(
            svc.get_milestone(&milestones[0].id).await.unwrap().status,
            MilestoneStatus::Pending
        );
    }

    #[tokio::test]
    async fn duplicate_name_rejected_per_milestone() {
        let svc = test_service().await;
        let (_, milestones) = seeded_startup(&svc).await;
        svc.create_deliverable(&admin(), &milestones[0].id, &NewDeliverable::new("Report"))
            .await
            .unwrap();

        let err = svc
            .create_deliverable(&admin(), &milestones[0].id, &NewDeliverable::new("Report"))
            .await
            .unwrap_err();
        assert_eq!(
            err.as_core(),
            Some(&CoreError::DuplicateName {
                entity_type: EntityType::Deliverable,
                parent_id: milestones[0].id.clone(),
                name: "Report".into(),
            })
        );

        // same name under another milestone is fine
        svc.create_deliverable(&admin(), &milestones[1].id, &NewDeliverable::new("Report"))
            .await
            .unwrap();
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[tokio::test]
    async fn blank_name_rejected(#[case] name: &str) {
        let svc = test_service().await;
        let (_, milestones) = seeded_startup(&svc).await;
        let err = svc
            .create_deliverable(&admin(), &milestones[0].id, &NewDeliverable::new(name))
            .await
            .unwrap_err();
        assert!(matches!(err.as_core(), Some(CoreError::Validation(_))));
        assert!(svc.list_deliverables(&milestones[0].id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_under_completed_milestone_rejected() {
        let svc = test_service().await;
        let (_, milestones) = seeded_startup(&svc).await;
        approved_deliverable(&svc, &milestones[0].id, "Pitch Deck").await;

        let err = svc
            .create_deliverable(&admin(), &milestones[0].id, &NewDeliverable::new("Late"))
            .await
            .unwrap_err();
        assert!(matches!(err.as_core(), Some(CoreError::InvalidTransition { .. })));
        assert_eq!(
            svc.get_milestone(&milestones[0].id).await.unwrap().status,
            MilestoneStatus::Completed
        );
    }

    #[tokio::test]
    async fn incubatee_upload_submits() {
        let svc = test_service().await;
        let (_, milestones) = seeded_startup(&svc).await;
        let d = svc
            .create_deliverable(&founder(), &milestones[0].id, &NewDeliverable::new("Deck"))
            .await
            .unwrap();

        let submitted = svc
            .attach_file(&founder(), &d.id, FileSlot::Incubatee, "files/deck-v1.pdf")
            .await
            .unwrap();
        assert_eq!(submitted.status, DeliverableStatus::Submitted);
        assert_eq!(submitted.incubatee_file.as_deref(), Some("files/deck-v1.pdf"));

        let replaced = svc
            .attach_file(&founder(), &d.id, FileSlot::Incubatee, "files/deck-v2.pdf")
            .await
            .unwrap();
        assert_eq!(replaced.status, DeliverableStatus::Submitted);
        assert_eq!(replaced.incubatee_file.as_deref(), Some("files/deck-v2.pdf"));
        assert_eq!(svc.get_deliverable(&d.id).await.unwrap(), replaced);
    }

    #[tokio::test]
    async fn admin_slot_keeps_status() {
        let svc = test_service().await;
        let (_, milestones) = seeded_startup(&svc).await;
        let d = svc
            .create_deliverable(&admin(), &milestones[0].id, &NewDeliverable::new("Template"))
            .await
            .unwrap();

        let updated = svc
            .attach_file(&admin(), &d.id, FileSlot::Admin, "files/template.docx")
            .await
            .unwrap();
        assert_eq!(updated.status, DeliverableStatus::Pending);
        assert_eq!(updated.admin_file.as_deref(), Some("files/template.docx"));
        assert_eq!(updated.incubatee_file, None);
    }

    #[tokio::test]
    async fn incubatee_cannot_use_admin_slot() {
        let svc = test_service().await;
        let (_, milestones) = seeded_startup(&svc).await;
        let d = svc
            .create_deliverable(&admin(), &milestones[0].id, &NewDeliverable::new("Template"))
            .await
            .unwrap();
        let err = svc
            .attach_file(&founder(), &d.id, FileSlot::Admin, "files/x.pdf")
            .await
            .unwrap_err();
        assert!(matches!(err.as_core(), Some(CoreError::PermissionDenied { .. })));
    }

    #[tokio::test]
    async fn outsider_cannot_upload() {
        let svc = test_service().await;
        let (_, milestones) = seeded_startup(&svc).await;
        let d = svc
            .create_deliverable(&admin(), &milestones[0].id, &NewDeliverable::new("Deck"))
            .await
            .unwrap();
        let err = svc
            .attach_file(&outsider(), &d.id, FileSlot::Incubatee, "files/x.pdf")
            .await
            .unwrap_err();
        assert!(matches!(err.as_core(), Some(CoreError::PermissionDenied { .. })));
        assert_eq!(
            svc.get_deliverable(&d.id).await.unwrap().status,
            DeliverableStatus::Pending
        );
    }

    #[tokio::test]
    async fn blank_file_ref_rejected() {
        let svc = test_service().await;
        let (_, milestones) = seeded_startup(&svc).await;
        let d = svc
            .create_deliverable(&admin(), &milestones[0].id, &NewDeliverable::new("Deck"))
            .await
            .unwrap();
        let err = svc
            .attach_file(&founder(), &d.id, FileSlot::Incubatee, " ")
            .await
            .unwrap_err();
        assert!(matches!(err.as_core(), Some(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn upload_to_approved_rejected() {
        let svc = test_service().await;
        let (_, milestones) = seeded_startup(&svc).await;
        let d = approved_deliverable(&svc, &milestones[0].id, "Deck").await;
        let err = svc
            .attach_file(&founder(), &d.id, FileSlot::Incubatee, "files/late.pdf")
            .await
            .unwrap_err();
        assert!(matches!(err.as_core(), Some(CoreError::InvalidTransition { .. })));
        assert_eq!(
            svc.get_deliverable(&d.id).await.unwrap().incubatee_file.as_deref(),
            Some("files/upload.pdf")
        );
    }

    #[tokio::test]
    async fn unknown_deliverable_not_found() {
        let svc = test_service().await;
        let err = svc
            .attach_file(&admin(), "dlv-missing", FileSlot::Admin, "files/x.pdf")
            .await
            .unwrap_err();
        assert_eq!(
            err.as_core(),
            Some(&CoreError::not_found(EntityType::Deliverable, "dlv-missing"))
        );
    }

    #[rstest]
    #[case(ReviewDecision::Approve)]
    #[case(ReviewDecision::Reject)]
    #[tokio::test]
    async fn review_requires_submitted(#[case] decision: ReviewDecision) {
        let svc = test_service().await;
        let (_, milestones) = seeded_startup(&svc).await;
        let d = svc
            .create_deliverable(&admin(), &milestones[0].id, &NewDeliverable::new("Deck"))
            .await
            .unwrap();

        let err = svc
            .review_deliverable(&admin(), &d.id, decision)
            .await
            .unwrap_err();
        assert_eq!(
            err.as_core(),
            Some(&CoreError::invalid_transition(
                EntityType::Deliverable,
                d.id.clone(),
                DeliverableStatus::Pending,
                decision.target_status(),
            ))
        );
    }

    #[tokio::test]
    async fn incubatee_cannot_review() {
        let svc = test_service().await;
        let (_, milestones) = seeded_startup(&svc).await;
        let d = svc
            .create_deliverable(&founder(), &milestones[0].id, &NewDeliverable::new("Deck"))
            .await
            .unwrap();
        svc.attach_file(&founder(), &d.id, FileSlot::Incubatee, "files/deck.pdf")
            .await
            .unwrap();
        let err = svc
            .review_deliverable(&founder(), &d.id, ReviewDecision::Approve)
            .await
            .unwrap_err();
        assert!(matches!(err.as_core(), Some(CoreError::PermissionDenied { .. })));
    }

    #[tokio::test]
    async fn reject_then_resubmit_then_approve() {
        let svc = test_service().await;
        let (_, milestones) = seeded_startup(&svc).await;
        let d = svc
            .create_deliverable(&founder(), &milestones[0].id, &NewDeliverable::new("Deck"))
            .await
            .unwrap();
        svc.attach_file(&founder(), &d.id, FileSlot::Incubatee, "files/v1.pdf")
            .await
            .unwrap();

        let rejected = svc
            .review_deliverable(&admin(), &d.id, ReviewDecision::Reject)
            .await
            .unwrap();
        assert_eq!(rejected.status, DeliverableStatus::Rejected);
        assert_eq!(
            svc.get_milestone(&milestones[0].id).await.unwrap().status,
            MilestoneStatus::Pending
        );

        let resubmitted = svc
            .attach_file(&founder(), &d.id, FileSlot::Incubatee, "files/v2.pdf")
            .await
            .unwrap();
        assert_eq!(resubmitted.status, DeliverableStatus::Submitted);

        let approved = svc
            .review_deliverable(&admin(), &d.id, ReviewDecision::Approve)
            .await
            .unwrap();
        assert_eq!(approved.status, DeliverableStatus::Approved);

        let err = svc
            .review_deliverable(&admin(), &d.id, ReviewDecision::Reject)
            .await
            .unwrap_err();
        assert!(matches!(err.as_core(), Some(CoreError::InvalidTransition { .. })));
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let svc = test_service().await;
        let (_, milestones) = seeded_startup(&svc).await;
        for name in ["Zeta", "Alpha", "Mid"] {
            svc.create_deliverable(&admin(), &milestones[0].id, &NewDeliverable::new(name))
                .await
                .unwrap();
        }
        let names: Vec<String> = svc
            .list_deliverables(&milestones[0].id)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[tokio::test]
    async fn failed_mutation_leaves_no_audit() {
        let svc = test_service().await;
        let (_, milestones) = seeded_startup(&svc).await;
        let d = svc
            .create_deliverable(&admin(), &milestones[0].id, &NewDeliverable::new("Deck"))
            .await
            .unwrap();
        let before = svc
            .query_audit(&AuditFilter {
                entity_id: Some(d.id.clone()),
                ..Default::default()
            })
            .await
            .unwrap()
            .len();

        svc.review_deliverable(&admin(), &d.id, ReviewDecision::Approve)
            .await
            .unwrap_err();

        let after = svc
            .query_audit(&AuditFilter {
                entity_id: Some(d.id.clone()),
                ..Default::default()
            })
            .await
            .unwrap()
            .len();
        assert_eq!(before, after);
    }
}
