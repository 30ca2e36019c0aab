//! Milestone repository: sequence management and the derived status projection.

use chrono::{NaiveDate, Utc};

use ignite_core::audit_detail::StatusChangedDetail;
use ignite_core::entities::Milestone;
use ignite_core::enums::{AuditAction, EntityType, MilestoneStatus};
use ignite_core::errors::{CoreError, require_non_blank};
use ignite_core::identity::Actor;
use ignite_core::ids::PREFIX_MILESTONE;
use ignite_core::policy::Operation;
use ignite_core::progression;

use crate::error::DatabaseError;
use crate::helpers::{
    format_date, get_opt_string, get_u32, parse_datetime, parse_enum, parse_optional_date,
    parse_optional_datetime, to_detail,
};
use crate::service::IgniteService;
use crate::updates::milestone::MilestoneUpdate;

pub(crate) const SELECT_COLS: &str = "id, startup_id, sequence_index, title, description, due_date, \
     status, completed_at, created_at, updated_at";

pub(crate) fn row_to_milestone(row: &libsql::Row) -> Result<Milestone, DatabaseError> {
    Ok(Milestone {
        id: row.get(0)?,
        startup_id: row.get(1)?,
        sequence_index: get_u32(row, 2)?,
        title: row.get(3)?,
        description: get_opt_string(row, 4)?,
        due_date: parse_optional_date(get_opt_string(row, 5)?.as_deref())?,
        status: parse_enum(&row.get::<String>(6)?)?,
        completed_at: parse_optional_datetime(get_opt_string(row, 7)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
        updated_at: parse_datetime(&row.get::<String>(9)?)?,
    })
}

/// Payload for [`IgniteService::add_milestone`].
#[derive(Debug, Clone, Default)]
pub struct NewMilestone {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
}

impl NewMilestone {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

impl IgniteService {
    pub(crate) async fn insert_milestone(
        &self,
        actor: &Actor,
        startup_id: &str,
        sequence_index: u32,
        new: &NewMilestone,
    ) -> Result<Milestone, DatabaseError> {
        let title = require_non_blank("milestone title", &new.title)?;
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_MILESTONE).await?;

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO milestones ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, NULL, ?8, ?9)"
                ),
                libsql::params![
                    id.as_str(),
                    startup_id,
                    i64::from(sequence_index),
                    title,
                    new.description.as_deref(),
                    new.due_date.map(format_date),
                    MilestoneStatus::NotStarted.as_str(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        let milestone = Milestone {
            id: id.clone(),
            startup_id: startup_id.to_string(),
            sequence_index,
            title: title.to_string(),
            description: new.description.clone(),
            due_date: new.due_date,
            status: MilestoneStatus::NotStarted,
            completed_at: None,
            created_at: now,
            updated_at: now,
        };
        self.record(
            actor,
            EntityType::Milestone,
            &id,
            AuditAction::Created,
            Some(to_detail(&milestone)?),
        )
        .await?;
        Ok(milestone)
    }

    /// # Errors
    ///
    /// `NotFound` if no milestone has this id.
    pub async fn get_milestone(&self, id: &str) -> Result<Milestone, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM milestones WHERE id = ?1"), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::not_found(EntityType::Milestone, id))?;
        row_to_milestone(&row)
    }

    /// All milestones of a startup in sequence order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_milestones(&self, startup_id: &str) -> Result<Vec<Milestone>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM milestones WHERE startup_id = ?1 ORDER BY sequence_index"
                ),
                [startup_id],
            )
            .await?;
        let mut milestones = Vec::new();
        while let Some(row) = rows.next().await? {
            milestones.push(row_to_milestone(&row)?);
        }
        Ok(milestones)
    }

    /// Append a milestone after the current last one.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown startup, `PermissionDenied` for non-admin
    /// roles, `Validation` for a blank title.
    pub async fn add_milestone(
        &self,
        actor: &Actor,
        startup_id: &str,
        new: &NewMilestone,
    ) -> Result<Milestone, DatabaseError> {
        self.write_tx(|svc| svc.add_milestone_tx(actor, startup_id, new))
            .await
    }

    async fn add_milestone_tx(
        &self,
        actor: &Actor,
        startup_id: &str,
        new: &NewMilestone,
    ) -> Result<Milestone, DatabaseError> {
        self.authorize_startup(actor, Operation::ManageMilestones, startup_id)
            .await?;
        let next = self
            .last_sequence_index(startup_id)
            .await?
            .map_or(1, |last| last + 1);
        self.insert_milestone(actor, startup_id, next, new).await
    }

    /// Edit a milestone's title, description or due date. Status is never
    /// editable; it is derived from the deliverables.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id, `PermissionDenied` for non-admin roles,
    /// `Validation` for a blank title.
    pub async fn update_milestone(
        &self,
        actor: &Actor,
        milestone_id: &str,
        update: MilestoneUpdate,
    ) -> Result<Milestone, DatabaseError> {
        self.write_tx(|svc| svc.update_milestone_tx(actor, milestone_id, update))
            .await
    }

    async fn update_milestone_tx(
        &self,
        actor: &Actor,
        milestone_id: &str,
        update: MilestoneUpdate,
    ) -> Result<Milestone, DatabaseError> {
        let milestone = self.get_milestone(milestone_id).await?;
        self.authorize_startup(actor, Operation::ManageMilestones, &milestone.startup_id)
            .await?;

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(ref title) = update.title {
            let title = require_non_blank("milestone title", title)?;
            sets.push(format!("title = ?{idx}"));
            params.push(title.into());
            idx += 1;
        }
        if let Some(ref description) = update.description {
            sets.push(format!("description = ?{idx}"));
            params.push(description.clone().map_or(libsql::Value::Null, Into::into));
            idx += 1;
        }
        if let Some(due_date) = update.due_date {
            sets.push(format!("due_date = ?{idx}"));
            params.push(due_date.map_or(libsql::Value::Null, |d| format_date(d).into()));
            idx += 1;
        }

        if sets.is_empty() {
            return Ok(milestone);
        }

        sets.push(format!("updated_at = ?{idx}"));
        params.push(Utc::now().to_rfc3339().into());
        idx += 1;

        params.push(milestone_id.into());
        let sql = format!("UPDATE milestones SET {} WHERE id = ?{idx}", sets.join(", "));
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;

        self.record(
            actor,
            EntityType::Milestone,
            milestone_id,
            AuditAction::Updated,
            Some(to_detail(&update)?),
        )
        .await?;
        self.get_milestone(milestone_id).await
    }

    /// Remove the highest-sequence milestone (and its deliverables).
    ///
    /// Only the last milestone can go, so the sequence never has gaps.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown startup, `PermissionDenied` for non-admin
    /// roles, `Validation` when the startup has no milestones.
    pub async fn remove_last_milestone(
        &self,
        actor: &Actor,
        startup_id: &str,
    ) -> Result<Milestone, DatabaseError> {
        self.write_tx(|svc| svc.remove_last_milestone_tx(actor, startup_id))
            .await
    }

    async fn remove_last_milestone_tx(
        &self,
        actor: &Actor,
        startup_id: &str,
    ) -> Result<Milestone, DatabaseError> {
        self.authorize_startup(actor, Operation::ManageMilestones, startup_id)
            .await?;
        let last = self
            .list_milestones(startup_id)
            .await?
            .pop()
            .ok_or_else(|| CoreError::Validation(format!("startup {startup_id} has no milestones")))?;

        self.db()
            .conn()
            .execute("DELETE FROM milestones WHERE id = ?1", [last.id.as_str()])
            .await?;
        self.record(actor, EntityType::Milestone, &last.id, AuditAction::Deleted, None)
            .await?;
        Ok(last)
    }

    async fn last_sequence_index(&self, startup_id: &str) -> Result<Option<u32>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT MAX(sequence_index) FROM milestones WHERE startup_id = ?1",
                [startup_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row.get::<Option<i64>>(0)?
            .map(|raw| {
                u32::try_from(raw)
                    .map_err(|_| DatabaseError::InvalidState(format!("bad sequence index {raw}")))
            })
            .transpose()
    }

    /// Re-derive a milestone's status from its deliverables and persist it
    /// when it changed.
    ///
    /// Idempotent: a second run without an intervening mutation writes nothing.
    ///
    /// # Errors
    ///
    /// `NotFound` if no milestone has this id.
    pub async fn recompute_milestone_status(
        &self,
        actor: &Actor,
        milestone_id: &str,
    ) -> Result<Milestone, DatabaseError> {
        self.write_tx(|svc| svc.recompute_milestone_status_tx(actor, milestone_id))
            .await
    }

    pub(crate) async fn recompute_milestone_status_tx(
        &self,
        actor: &Actor,
        milestone_id: &str,
    ) -> Result<Milestone, DatabaseError> {
        let mut milestone = self.get_milestone(milestone_id).await?;
        let statuses = self.deliverable_statuses(milestone_id).await?;
        let derived = progression::derive_milestone_status(statuses);
        if derived == milestone.status {
            return Ok(milestone);
        }

        let now = Utc::now();
        if derived == MilestoneStatus::Completed && milestone.completed_at.is_none() {
            milestone.completed_at = Some(now);
        }
        let previous = milestone.status;
        milestone.status = derived;
        milestone.updated_at = now;

        self.db()
            .conn()
            .execute(
                "UPDATE milestones SET status = ?1, completed_at = ?2, updated_at = ?3 WHERE id = ?4",
                libsql::params![
                    derived.as_str(),
                    milestone.completed_at.map(|at| at.to_rfc3339()),
                    now.to_rfc3339(),
                    milestone_id
                ],
            )
            .await?;

        self.record(
            actor,
            EntityType::Milestone,
            milestone_id,
            AuditAction::StatusChanged,
            Some(to_detail(&StatusChangedDetail {
                from: previous.as_str().to_string(),
                to: derived.as_str().to_string(),
                reason: None,
            })?),
        )
        .await?;

        if derived == MilestoneStatus::Completed {
            tracing::info!(
                milestone = %milestone_id,
                sequence = milestone.sequence_index,
                "milestone completed"
            );
        } else {
            tracing::debug!(milestone = %milestone_id, %previous, %derived, "milestone status changed");
        }
        Ok(milestone)
    }
}
