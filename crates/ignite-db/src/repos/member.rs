//! Startup member repository.

use chrono::Utc;

use ignite_core::audit_detail::MemberAddedDetail;
use ignite_core::entities::StartupMember;
use ignite_core::enums::{AuditAction, EntityType};
use ignite_core::errors::{CoreError, require_non_blank};
use ignite_core::identity::Actor;
use ignite_core::ids::PREFIX_MEMBER;
use ignite_core::policy::Operation;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, to_detail};
use crate::service::IgniteService;

const SELECT_COLS: &str = "id, startup_id, user_id, position, joined_at";

fn row_to_member(row: &libsql::Row) -> Result<StartupMember, DatabaseError> {
    Ok(StartupMember {
        id: row.get(0)?,
        startup_id: row.get(1)?,
        user_id: row.get(2)?,
        position: get_opt_string(row, 3)?,
        joined_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl IgniteService {
    /// Register `user_id` as a member of the startup.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown startup, `PermissionDenied` for non-admin
    /// roles, `DuplicateName` if the user already belongs to the startup.
    pub async fn add_member(
        &self,
        actor: &Actor,
        startup_id: &str,
        user_id: &str,
        position: Option<&str>,
    ) -> Result<StartupMember, DatabaseError> {
        self.write_tx(|svc| svc.add_member_tx(actor, startup_id, user_id, position))
            .await
    }

    async fn add_member_tx(
        &self,
        actor: &Actor,
        startup_id: &str,
        user_id: &str,
        position: Option<&str>,
    ) -> Result<StartupMember, DatabaseError> {
        self.authorize_startup(actor, Operation::ManageMembers, startup_id)
            .await?;
        let user_id = require_non_blank("user id", user_id)?;
        if self.find_member(startup_id, user_id).await?.is_some() {
            return Err(CoreError::DuplicateName {
                entity_type: EntityType::Member,
                parent_id: startup_id.to_string(),
                name: user_id.to_string(),
            }
            .into());
        }

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_MEMBER).await?;
        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO startup_members ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5)"),
                libsql::params![id.as_str(), startup_id, user_id, position, now.to_rfc3339()],
            )
            .await?;

        self.record(
            actor,
            EntityType::Member,
            &id,
            AuditAction::MemberAdded,
            Some(to_detail(&MemberAddedDetail {
                user_id: user_id.to_string(),
                position: position.map(String::from),
            })?),
        )
        .await?;

        Ok(StartupMember {
            id,
            startup_id: startup_id.to_string(),
            user_id: user_id.to_string(),
            position: position.map(String::from),
            joined_at: now,
        })
    }

    /// Remove a member. The owner is not a member row and cannot be removed.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown startup or if the user is not a member,
    /// `PermissionDenied` for non-admin roles.
    pub async fn remove_member(
        &self,
        actor: &Actor,
        startup_id: &str,
        user_id: &str,
    ) -> Result<(), DatabaseError> {
        self.write_tx(|svc| svc.remove_member_tx(actor, startup_id, user_id))
            .await
    }

    async fn remove_member_tx(
        &self,
        actor: &Actor,
        startup_id: &str,
        user_id: &str,
    ) -> Result<(), DatabaseError> {
        self.authorize_startup(actor, Operation::ManageMembers, startup_id)
            .await?;
        let member = self
            .find_member(startup_id, user_id)
            .await?
            .ok_or_else(|| CoreError::not_found(EntityType::Member, user_id))?;
        self.db()
            .conn()
            .execute("DELETE FROM startup_members WHERE id = ?1", [member.id.as_str()])
            .await?;
        self.record(actor, EntityType::Member, &member.id, AuditAction::Deleted, None)
            .await
    }

    /// Members in join order. Does not include the owner.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_members(&self, startup_id: &str) -> Result<Vec<StartupMember>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM startup_members WHERE startup_id = ?1 ORDER BY rowid"),
                [startup_id],
            )
            .await?;
        let mut members = Vec::new();
        while let Some(row) = rows.next().await? {
            members.push(row_to_member(&row)?);
        }
        Ok(members)
    }

    async fn find_member(
        &self,
        startup_id: &str,
        user_id: &str,
    ) -> Result<Option<StartupMember>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM startup_members WHERE startup_id = ?1 AND user_id = ?2"),
                [startup_id, user_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_member(&row)?)),
            None => Ok(None),
        }
    }
}
