//! Service layer orchestrating progression mutations with audit.
//!
//! `IgniteService` wraps `IgniteDb`. All repo methods are implemented as
//! `impl IgniteService` blocks under [`crate::repos`].

use std::future::Future;

use tokio::sync::Mutex;

use ignite_core::entities::Milestone;
use ignite_core::enums::EntityType;
use ignite_core::errors::CoreError;
use ignite_core::identity::Actor;
use ignite_core::policy::{self, MilestoneLock, Operation, Target};
use ignite_core::progression;

use crate::IgniteDb;
use crate::error::DatabaseError;

/// Orchestrates database mutations with the audit trail.
///
/// Every mutation method follows this protocol:
/// 1. Begin an immediate write transaction
/// 2. Load state and run the permission gate
/// 3. Execute SQL
/// 4. Append audit entry (inside transaction)
/// 5. Commit, or roll back on any error
///
/// Mutations share one connection, so `write_gate` admits one transaction
/// at a time. Reads take no lock; a read racing a write may see the
/// write's uncommitted rows.
pub struct IgniteService {
    db: IgniteDb,
    write_gate: Mutex<()>,
}

impl IgniteService {
    /// Open a service over a local database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = IgniteDb::open_local(db_path).await?;
        Ok(Self::from_db(db))
    }

    /// Create from an existing `IgniteDb`.
    #[must_use]
    pub fn from_db(db: IgniteDb) -> Self {
        Self {
            db,
            write_gate: Mutex::new(()),
        }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &IgniteDb {
        &self.db
    }

    /// Run `body` inside one immediate write transaction.
    ///
    /// Waits for any other write in flight, then commits when `body`
    /// succeeds and rolls back when it fails. The body must not open a
    /// transaction of its own.
    pub(crate) async fn write_tx<'a, T, F, Fut>(&'a self, body: F) -> Result<T, DatabaseError>
    where
        F: FnOnce(&'a Self) -> Fut,
        Fut: Future<Output = Result<T, DatabaseError>> + 'a,
    {
        let _gate = self.write_gate.lock().await;
        let tx = self
            .db
            .conn()
            .transaction_with_behavior(libsql::TransactionBehavior::Immediate)
            .await?;
        match body(self).await {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(error) => {
                if let Err(rollback) = tx.rollback().await {
                    tracing::warn!(%error, %rollback, "rollback failed");
                }
                Err(error)
            }
        }
    }

    /// Whether `user_id` owns or is a registered member of the startup.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn is_startup_member(
        &self,
        startup_id: &str,
        user_id: &str,
    ) -> Result<bool, DatabaseError> {
        let mut rows = self
            .db
            .conn()
            .query(
                "SELECT EXISTS (SELECT 1 FROM startups WHERE id = ?1 AND owner_id = ?2)
                     OR EXISTS (SELECT 1 FROM startup_members WHERE startup_id = ?1 AND user_id = ?2)",
                [startup_id, user_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<i64>(0)? != 0)
    }

    /// Membership as seen by the gate. Admin roles skip the lookup.
    async fn membership(&self, actor: &Actor, startup_id: &str) -> Result<bool, DatabaseError> {
        if actor.is_admin() {
            return Ok(true);
        }
        self.is_startup_member(startup_id, &actor.actor_id).await
    }

    /// Permission gate for startup-scoped operations.
    ///
    /// Fails with `NotFound` for an unknown startup before any role check.
    pub(crate) async fn authorize_startup(
        &self,
        actor: &Actor,
        operation: Operation,
        startup_id: &str,
    ) -> Result<(), DatabaseError> {
        if !self.startup_exists(startup_id).await? {
            return Err(CoreError::not_found(EntityType::Startup, startup_id).into());
        }
        let is_member = self.membership(actor, startup_id).await?;
        policy::authorize(actor.role, operation, Target::startup(is_member))?;
        Ok(())
    }

    /// Permission gate for milestone-scoped operations.
    ///
    /// Loads the milestone and its siblings, computes the lock from the
    /// current statuses, and returns the milestone once the gate passes.
    pub(crate) async fn authorize_milestone(
        &self,
        actor: &Actor,
        operation: Operation,
        milestone_id: &str,
    ) -> Result<Milestone, DatabaseError> {
        let milestone = self.get_milestone(milestone_id).await?;
        let siblings = self.list_milestones(&milestone.startup_id).await?;
        let locked = progression::is_locked(&siblings, &milestone);
        let is_member = self.membership(actor, &milestone.startup_id).await?;
        let lock = MilestoneLock {
            milestone_id: &milestone.id,
            sequence_index: milestone.sequence_index,
            locked,
        };
        policy::authorize(actor.role, operation, Target::milestone(is_member, lock))?;
        Ok(milestone)
    }
}
