//! Startup progression facade: lock state, progress rollup, and the current
//! actionable milestone. Everything is computed from the latest rows on each
//! call; nothing here is cached or stored.

use std::collections::HashMap;

use ignite_core::entities::Milestone;
use ignite_core::enums::EntityType;
use ignite_core::errors::CoreError;
use ignite_core::progression;
use ignite_core::responses::{MilestoneOverview, StartupProgress};

use crate::error::DatabaseError;
use crate::helpers::get_u32;
use crate::service::IgniteService;

#[derive(Debug, Default, Clone, Copy)]
struct DeliverableCounts {
    total: u32,
    approved: u32,
}

impl IgniteService {
    /// Milestones of an existing startup.
    async fn startup_milestones(&self, startup_id: &str) -> Result<Vec<Milestone>, DatabaseError> {
        if !self.startup_exists(startup_id).await? {
            return Err(CoreError::not_found(EntityType::Startup, startup_id).into());
        }
        self.list_milestones(startup_id).await
    }

    /// Whether the milestone is locked for incubatees.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown startup, or a milestone that does not belong
    /// to it.
    pub async fn is_locked(&self, startup_id: &str, milestone_id: &str) -> Result<bool, DatabaseError> {
        let milestones = self.startup_milestones(startup_id).await?;
        Ok(progression::lock_state(&milestones, milestone_id)?)
    }

    /// Rounded share of completed milestones, 0 to 100.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown startup.
    pub async fn progress_percent(&self, startup_id: &str) -> Result<u8, DatabaseError> {
        let milestones = self.startup_milestones(startup_id).await?;
        Ok(progression::progress_percent(&milestones))
    }

    /// The lowest-sequence milestone that is neither completed nor locked.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown startup.
    pub async fn current_actionable_milestone(
        &self,
        startup_id: &str,
    ) -> Result<Option<Milestone>, DatabaseError> {
        let milestones = self.startup_milestones(startup_id).await?;
        Ok(progression::current_actionable(&milestones).cloned())
    }

    /// Dashboard snapshot of a startup's progression.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown startup.
    pub async fn startup_progress(&self, startup_id: &str) -> Result<StartupProgress, DatabaseError> {
        let startup = self.get_startup(startup_id).await?;
        let milestones = self.list_milestones(startup_id).await?;
        let counts = self.deliverable_counts(startup_id).await?;

        let current_milestone = progression::current_actionable(&milestones).cloned();
        let progress_percent = progression::progress_percent(&milestones);
        let overviews = milestones
            .iter()
            .map(|milestone| {
                let c = counts.get(&milestone.id).copied().unwrap_or_default();
                MilestoneOverview {
                    locked: progression::is_locked(&milestones, milestone),
                    deliverables_total: c.total,
                    deliverables_approved: c.approved,
                    milestone: milestone.clone(),
                }
            })
            .collect();

        tracing::debug!(startup = %startup_id, progress_percent, "computed startup progress");
        Ok(StartupProgress {
            startup,
            progress_percent,
            milestones: overviews,
            current_milestone,
        })
    }

    async fn deliverable_counts(
        &self,
        startup_id: &str,
    ) -> Result<HashMap<String, DeliverableCounts>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT d.milestone_id,
                        COUNT(*),
                        SUM(CASE WHEN d.status = 'approved' THEN 1 ELSE 0 END)
                 FROM deliverables d
                 JOIN milestones m ON m.id = d.milestone_id
                 WHERE m.startup_id = ?1
                 GROUP BY d.milestone_id",
                [startup_id],
            )
            .await?;
        let mut counts = HashMap::new();
        while let Some(row) = rows.next().await? {
            counts.insert(
                row.get::<String>(0)?,
                DeliverableCounts {
                    total: get_u32(&row, 1)?,
                    approved: get_u32(&row, 2)?,
                },
            );
        }
        Ok(counts)
    }
}
