//! Startup repository: creation from the program template, lookups, cascade delete.

use chrono::Utc;

use ignite_config::ProgramConfig;
use ignite_core::entities::Startup;
use ignite_core::enums::{AuditAction, EntityType, StartupStage};
use ignite_core::errors::{CoreError, require_non_blank};
use ignite_core::identity::Actor;
use ignite_core::ids::PREFIX_STARTUP;
use ignite_core::policy::{self, Operation, Target};

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum, to_detail};
use crate::repos::deliverable::NewDeliverable;
use crate::repos::milestone::NewMilestone;
use crate::service::IgniteService;
use crate::updates::startup::StartupUpdate;

const SELECT_COLS: &str =
    "id, name, description, industry, stage, owner_id, email, contact_number, created_at";

fn row_to_startup(row: &libsql::Row) -> Result<Startup, DatabaseError> {
    Ok(Startup {
        id: row.get(0)?,
        name: row.get(1)?,
        description: get_opt_string(row, 2)?,
        industry: get_opt_string(row, 3)?,
        stage: parse_enum(&row.get::<String>(4)?)?,
        owner_id: row.get(5)?,
        email: get_opt_string(row, 6)?,
        contact_number: get_opt_string(row, 7)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

/// Payload for [`IgniteService::create_startup`].
#[derive(Debug, Clone, Default)]
pub struct NewStartup {
    pub name: String,
    pub owner_id: String,
    pub description: Option<String>,
    pub industry: Option<String>,
    pub stage: StartupStage,
    pub email: Option<String>,
    pub contact_number: Option<String>,
}

impl NewStartup {
    pub fn new(name: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner_id: owner_id.into(),
            ..Self::default()
        }
    }
}

impl IgniteService {
    /// Register a startup and lay out its milestone sequence from `program`.
    ///
    /// Milestones are numbered from 1 in template order. Template deliverables
    /// are created pending, which moves their milestone to pending.
    ///
    /// # Errors
    ///
    /// - `PermissionDenied` unless the actor is an admin role.
    /// - `Validation` for a blank name or owner.
    pub async fn create_startup(
        &self,
        actor: &Actor,
        new: &NewStartup,
        program: &ProgramConfig,
    ) -> Result<Startup, DatabaseError> {
        self.write_tx(|svc| svc.create_startup_tx(actor, new, program))
            .await
    }

    async fn create_startup_tx(
        &self,
        actor: &Actor,
        new: &NewStartup,
        program: &ProgramConfig,
    ) -> Result<Startup, DatabaseError> {
        policy::authorize(actor.role, Operation::ManageStartup, Target::startup(true))?;
        let name = require_non_blank("startup name", &new.name)?;
        let owner_id = require_non_blank("owner id", &new.owner_id)?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_STARTUP).await?;
        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO startups ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"),
                libsql::params![
                    id.as_str(),
                    name,
                    new.description.as_deref(),
                    new.industry.as_deref(),
                    new.stage.as_str(),
                    owner_id,
                    new.email.as_deref(),
                    new.contact_number.as_deref(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        let startup = Startup {
            id: id.clone(),
            name: name.to_string(),
            description: new.description.clone(),
            industry: new.industry.clone(),
            stage: new.stage,
            owner_id: owner_id.to_string(),
            email: new.email.clone(),
            contact_number: new.contact_number.clone(),
            created_at: now,
        };
        self.record(
            actor,
            EntityType::Startup,
            &id,
            AuditAction::Created,
            Some(to_detail(&startup)?),
        )
        .await?;

        for (position, template) in program.milestones.iter().enumerate() {
            let sequence_index = u32::try_from(position + 1)
                .map_err(|_| CoreError::Validation("too many milestones in program".into()))?;
            let milestone = self
                .insert_milestone(
                    actor,
                    &id,
                    sequence_index,
                    &NewMilestone {
                        title: template.title.clone(),
                        description: template.description.clone(),
                        due_date: None,
                    },
                )
                .await?;
            for deliverable in &template.deliverables {
                self.insert_deliverable(actor, &milestone, &NewDeliverable::new(deliverable))
                    .await?;
            }
            if !template.deliverables.is_empty() {
                self.recompute_milestone_status_tx(actor, &milestone.id)
                    .await?;
            }
        }

        tracing::info!(startup = %id, milestones = program.milestones.len(), "startup created");
        Ok(startup)
    }

    /// # Errors
    ///
    /// `NotFound` if no startup has this id.
    pub async fn get_startup(&self, id: &str) -> Result<Startup, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM startups WHERE id = ?1"), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::not_found(EntityType::Startup, id))?;
        row_to_startup(&row)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn startup_exists(&self, id: &str) -> Result<bool, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT 1 FROM startups WHERE id = ?1", [id])
            .await?;
        Ok(rows.next().await?.is_some())
    }

    /// Most recently created first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_startups(&self, limit: u32) -> Result<Vec<Startup>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM startups ORDER BY created_at DESC, rowid DESC LIMIT ?1"),
                [i64::from(limit)],
            )
            .await?;
        let mut startups = Vec::new();
        while let Some(row) = rows.next().await? {
            startups.push(row_to_startup(&row)?);
        }
        Ok(startups)
    }

    /// Startups the user owns or belongs to, by name.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_startups_for_user(&self, user_id: &str) -> Result<Vec<Startup>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM startups
                     WHERE owner_id = ?1
                        OR id IN (SELECT startup_id FROM startup_members WHERE user_id = ?1)
                     ORDER BY name"
                ),
                [user_id],
            )
            .await?;
        let mut startups = Vec::new();
        while let Some(row) = rows.next().await? {
            startups.push(row_to_startup(&row)?);
        }
        Ok(startups)
    }

    /// Edit the startup profile. Allowed for admin roles and the owner.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id, `PermissionDenied` for anyone else,
    /// `Validation` for a blank name.
    pub async fn update_startup(
        &self,
        actor: &Actor,
        id: &str,
        update: StartupUpdate,
    ) -> Result<Startup, DatabaseError> {
        self.write_tx(|svc| svc.update_startup_tx(actor, id, update))
            .await
    }

    async fn update_startup_tx(
        &self,
        actor: &Actor,
        id: &str,
        update: StartupUpdate,
    ) -> Result<Startup, DatabaseError> {
        let startup = self.get_startup(id).await?;
        let is_owner = actor.is_admin() || startup.owner_id == actor.actor_id;
        policy::authorize(actor.role, Operation::EditProfile, Target::startup(is_owner))?;

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(ref name) = update.name {
            let name = require_non_blank("startup name", name)?;
            sets.push(format!("name = ?{idx}"));
            params.push(name.into());
            idx += 1;
        }
        for (column, value) in [
            ("description", &update.description),
            ("industry", &update.industry),
            ("email", &update.email),
            ("contact_number", &update.contact_number),
        ] {
            if let Some(value) = value {
                sets.push(format!("{column} = ?{idx}"));
                params.push(value.clone().map_or(libsql::Value::Null, Into::into));
                idx += 1;
            }
        }
        if let Some(stage) = update.stage {
            sets.push(format!("stage = ?{idx}"));
            params.push(stage.as_str().into());
            idx += 1;
        }

        if sets.is_empty() {
            return Ok(startup);
        }

        params.push(id.into());
        let sql = format!("UPDATE startups SET {} WHERE id = ?{idx}", sets.join(", "));
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;

        self.record(
            actor,
            EntityType::Startup,
            id,
            AuditAction::Updated,
            Some(to_detail(&update)?),
        )
        .await?;
        self.get_startup(id).await
    }

    /// Delete a startup and everything it owns.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id, `PermissionDenied` for non-admin roles.
    pub async fn delete_startup(&self, actor: &Actor, id: &str) -> Result<(), DatabaseError> {
        self.write_tx(|svc| svc.delete_startup_tx(actor, id)).await
    }

    async fn delete_startup_tx(&self, actor: &Actor, id: &str) -> Result<(), DatabaseError> {
        self.authorize_startup(actor, Operation::ManageStartup, id)
            .await?;
        self.db()
            .conn()
            .execute("DELETE FROM startups WHERE id = ?1", [id])
            .await?;
        self.record(actor, EntityType::Startup, id, AuditAction::Deleted, None)
            .await?;
        tracing::info!(startup = %id, "startup deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::audit::AuditFilter;
    use crate::test_support::{admin, founder, outsider, seeded_startup, test_service};
    use crate::updates::startup::StartupUpdateBuilder;
    use ignite_config::MilestoneTemplate;
    use ignite_core::enums::MilestoneStatus;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_startup_lays_out_default_program() {
        let svc = test_service().await;
        let (startup, milestones) = seeded_startup(&svc).await;

        assert!(startup.id.starts_with("stp-"));
        assert_eq!(startup.stage, StartupStage::Ideation);
        assert_eq!(startup.owner_id, founder().actor_id);
        let sequence: Vec<u32> = milestones.iter().map(|m| m.sequence_index).collect();
        assert_eq!(sequence, vec![1, 2, 3, 4]);
        assert_eq!(milestones[0].title, "Milestone 1");
        assert!(milestones
            .iter()
            .all(|m| m.status == MilestoneStatus::NotStarted));
    }

    #[tokio::test]
    async fn create_startup_seeds_template_deliverables() {
        let svc = test_service().await;
        let program = ProgramConfig {
            milestones: vec![
                MilestoneTemplate {
                    title: "Discovery".into(),
                    description: Some("Validate the problem".into()),
                    deliverables: vec!["Lean Canvas".into(), "Interviews".into()],
                },
                MilestoneTemplate {
                    title: "Prototype".into(),
                    description: None,
                    deliverables: vec![],
                },
            ],
        };
        let startup = svc
            .create_startup(&admin(), &NewStartup::new("Acme", "usr-founder"), &program)
            .await
            .unwrap();

        let milestones = svc.list_milestones(&startup.id).await.unwrap();
        assert_eq!(milestones.len(), 2);
        assert_eq!(milestones[0].status, MilestoneStatus::Pending);
        assert_eq!(milestones[1].status, MilestoneStatus::NotStarted);

        let names: Vec<String> = svc
            .list_deliverables(&milestones[0].id)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["Lean Canvas", "Interviews"]);
    }

    #[tokio::test]
    async fn create_startup_requires_admin() {
        let svc = test_service().await;
        let err = svc
            .create_startup(
                &founder(),
                &NewStartup::new("Acme", "usr-founder"),
                &ProgramConfig::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_core(),
            Some(CoreError::PermissionDenied { .. })
        ));
        assert!(svc.list_startups(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_startup_rejects_blank_name() {
        let svc = test_service().await;
        let err = svc
            .create_startup(
                &admin(),
                &NewStartup::new("   ", "usr-founder"),
                &ProgramConfig::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err.as_core(), Some(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn get_unknown_startup_is_not_found() {
        let svc = test_service().await;
        let err = svc.get_startup("stp-missing").await.unwrap_err();
        assert_eq!(
            err.as_core(),
            Some(&CoreError::not_found(EntityType::Startup, "stp-missing"))
        );
    }

    #[tokio::test]
    async fn list_startups_for_user_includes_owned_and_joined() {
        let svc = test_service().await;
        let (owned, _) = seeded_startup(&svc).await;
        let joined = svc
            .create_startup(
                &admin(),
                &NewStartup::new("Beta Labs", "usr-other"),
                &ProgramConfig::default(),
            )
            .await
            .unwrap();
        svc.add_member(&admin(), &joined.id, &founder().actor_id, Some("CTO"))
            .await
            .unwrap();

        let mine = svc.list_startups_for_user(&founder().actor_id).await.unwrap();
        let ids: Vec<&str> = mine.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec![owned.id.as_str(), joined.id.as_str()]);
        assert!(svc
            .list_startups_for_user(&outsider().actor_id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn owner_edits_profile() {
        let svc = test_service().await;
        let (startup, _) = seeded_startup(&svc).await;

        let updated = svc
            .update_startup(
                &founder(),
                &startup.id,
                StartupUpdateBuilder::new()
                    .industry(Some("Robotics".into()))
                    .stage(StartupStage::Validation)
                    .build(),
            )
            .await
            .unwrap();
        assert_eq!(updated.industry.as_deref(), Some("Robotics"));
        assert_eq!(updated.stage, StartupStage::Validation);
        assert_eq!(updated.name, startup.name);
    }

    #[tokio::test]
    async fn members_other_than_owner_cannot_edit_profile() {
        let svc = test_service().await;
        let (startup, _) = seeded_startup(&svc).await;
        svc.add_member(&admin(), &startup.id, &outsider().actor_id, None)
            .await
            .unwrap();

        let err = svc
            .update_startup(
                &outsider(),
                &startup.id,
                StartupUpdateBuilder::new().name("Hijacked").build(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err.as_core(), Some(CoreError::PermissionDenied { .. })));
        assert_eq!(svc.get_startup(&startup.id).await.unwrap().name, "Acme Robotics");
    }

    #[tokio::test]
    async fn delete_startup_cascades() {
        let svc = test_service().await;
        let (startup, milestones) = seeded_startup(&svc).await;
        svc.create_deliverable(&admin(), &milestones[0].id, &NewDeliverable::new("Pitch Deck"))
            .await
            .unwrap();

        svc.delete_startup(&admin(), &startup.id).await.unwrap();

        assert!(!svc.startup_exists(&startup.id).await.unwrap());
        assert!(svc.list_milestones(&startup.id).await.unwrap().is_empty());
        let mut rows = svc
            .db()
            .conn()
            .query("SELECT COUNT(*) FROM deliverables", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 0);

        let deleted = svc
            .query_audit(&AuditFilter {
                entity_type: Some(EntityType::Startup),
                action: Some(AuditAction::Deleted),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(deleted.len(), 1);
    }

    #[tokio::test]
    async fn delete_startup_checks_existence_then_role() {
        let svc = test_service().await;
        let (startup, _) = seeded_startup(&svc).await;

        let missing = svc.delete_startup(&founder(), "stp-missing").await.unwrap_err();
        assert!(matches!(missing.as_core(), Some(CoreError::NotFound { .. })));

        let denied = svc.delete_startup(&founder(), &startup.id).await.unwrap_err();
        assert!(matches!(
            denied.as_core(),
            Some(CoreError::PermissionDenied { .. })
        ));
        assert!(svc.startup_exists(&startup.id).await.unwrap());
    }
}
