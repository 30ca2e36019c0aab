//! Readiness checklist repository.

use chrono::Utc;

use ignite_core::entities::ReadinessItem;
use ignite_core::enums::{AuditAction, EntityType};
use ignite_core::errors::{CoreError, require_non_blank};
use ignite_core::identity::Actor;
use ignite_core::ids::PREFIX_READINESS;
use ignite_core::policy::Operation;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, to_detail};
use crate::service::IgniteService;

const SELECT_COLS: &str = "id, deliverable_id, name, level, created_at";

fn row_to_readiness(row: &libsql::Row) -> Result<ReadinessItem, DatabaseError> {
    Ok(ReadinessItem {
        id: row.get(0)?,
        deliverable_id: row.get(1)?,
        name: row.get(2)?,
        level: get_opt_string(row, 3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl IgniteService {
    /// Mark a readiness item on a deliverable.
    ///
    /// Idempotent: an existing item is returned as-is, or with its level
    /// replaced when a different non-blank `level` is supplied.
    ///
    /// # Errors
    ///
    /// `NotFound`, `PermissionDenied` and `LockedMilestone` as for any
    /// deliverable operation; `Validation` for a blank name.
    pub async fn toggle_readiness(
        &self,
        actor: &Actor,
        deliverable_id: &str,
        name: &str,
        level: Option<&str>,
    ) -> Result<ReadinessItem, DatabaseError> {
        self.write_tx(|svc| svc.toggle_readiness_tx(actor, deliverable_id, name, level))
            .await
    }

    async fn toggle_readiness_tx(
        &self,
        actor: &Actor,
        deliverable_id: &str,
        name: &str,
        level: Option<&str>,
    ) -> Result<ReadinessItem, DatabaseError> {
        let deliverable = self.get_deliverable(deliverable_id).await?;
        self.authorize_milestone(actor, Operation::ToggleReadiness, &deliverable.milestone_id)
            .await?;
        let name = require_non_blank("readiness item name", name)?;
        let level = level.map(str::trim).filter(|l| !l.is_empty());

        if let Some(mut item) = self.find_readiness(deliverable_id, name).await? {
            if let Some(level) = level
                && item.level.as_deref() != Some(level)
            {
                self.db()
                    .conn()
                    .execute(
                        "UPDATE readiness_items SET level = ?1 WHERE id = ?2",
                        [level, item.id.as_str()],
                    )
                    .await?;
                item.level = Some(level.to_string());
                self.record(
                    actor,
                    EntityType::Readiness,
                    &item.id,
                    AuditAction::Updated,
                    Some(serde_json::json!({ "level": level })),
                )
                .await?;
            }
            return Ok(item);
        }

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_READINESS).await?;
        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO readiness_items ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5)"),
                libsql::params![id.as_str(), deliverable_id, name, level, now.to_rfc3339()],
            )
            .await?;
        let item = ReadinessItem {
            id: id.clone(),
            deliverable_id: deliverable_id.to_string(),
            name: name.to_string(),
            level: level.map(String::from),
            created_at: now,
        };
        self.record(
            actor,
            EntityType::Readiness,
            &id,
            AuditAction::Created,
            Some(to_detail(&item)?),
        )
        .await?;
        Ok(item)
    }

    /// Remove a readiness item by name.
    ///
    /// # Errors
    ///
    /// Gated like [`Self::toggle_readiness`]; `NotFound` if the deliverable
    /// has no item with this name.
    pub async fn remove_readiness(
        &self,
        actor: &Actor,
        deliverable_id: &str,
        name: &str,
    ) -> Result<(), DatabaseError> {
        self.write_tx(|svc| svc.remove_readiness_tx(actor, deliverable_id, name))
            .await
    }

    async fn remove_readiness_tx(
        &self,
        actor: &Actor,
        deliverable_id: &str,
        name: &str,
    ) -> Result<(), DatabaseError> {
        let deliverable = self.get_deliverable(deliverable_id).await?;
        self.authorize_milestone(actor, Operation::ToggleReadiness, &deliverable.milestone_id)
            .await?;
        let item = self
            .find_readiness(deliverable_id, name.trim())
            .await?
            .ok_or_else(|| CoreError::not_found(EntityType::Readiness, name))?;
        self.db()
            .conn()
            .execute("DELETE FROM readiness_items WHERE id = ?1", [item.id.as_str()])
            .await?;
        self.record(actor, EntityType::Readiness, &item.id, AuditAction::Deleted, None)
            .await
    }

    /// Readiness items of a deliverable in creation order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_readiness(
        &self,
        deliverable_id: &str,
    ) -> Result<Vec<ReadinessItem>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM readiness_items WHERE deliverable_id = ?1 ORDER BY rowid"),
                [deliverable_id],
            )
            .await?;
        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_readiness(&row)?);
        }
        Ok(items)
    }

    async fn find_readiness(
        &self,
        deliverable_id: &str,
        name: &str,
    ) -> Result<Option<ReadinessItem>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM readiness_items WHERE deliverable_id = ?1 AND name = ?2"),
                [deliverable_id, name],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_readiness(&row)?)),
            None => Ok(None),
        }
    }
}
