//! Progress report repository. Reports are append-only.

use chrono::Utc;

use ignite_core::entities::ProgressReport;
use ignite_core::enums::{AuditAction, EntityType};
use ignite_core::errors::require_non_blank;
use ignite_core::identity::Actor;
use ignite_core::ids::PREFIX_REPORT;
use ignite_core::policy::Operation;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime};
use crate::service::IgniteService;

const SELECT_COLS: &str = "id, startup_id, submitted_by, title, description, achievements, \
     challenges, next_steps, submitted_at";

fn row_to_report(row: &libsql::Row) -> Result<ProgressReport, DatabaseError> {
    Ok(ProgressReport {
        id: row.get(0)?,
        startup_id: row.get(1)?,
        submitted_by: row.get(2)?,
        title: row.get(3)?,
        description: row.get(4)?,
        achievements: get_opt_string(row, 5)?,
        challenges: get_opt_string(row, 6)?,
        next_steps: get_opt_string(row, 7)?,
        submitted_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

/// Payload for [`IgniteService::submit_progress_report`].
#[derive(Debug, Clone, Default)]
pub struct NewProgressReport {
    pub title: String,
    pub description: String,
    pub achievements: Option<String>,
    pub challenges: Option<String>,
    pub next_steps: Option<String>,
}

impl IgniteService {
    /// # Errors
    ///
    /// `NotFound` for an unknown startup, `PermissionDenied` for incubatees
    /// outside the startup, `Validation` for a blank title or description.
    pub async fn submit_progress_report(
        &self,
        actor: &Actor,
        startup_id: &str,
        report: &NewProgressReport,
    ) -> Result<ProgressReport, DatabaseError> {
        self.write_tx(|svc| svc.submit_progress_report_tx(actor, startup_id, report))
            .await
    }

    async fn submit_progress_report_tx(
        &self,
        actor: &Actor,
        startup_id: &str,
        report: &NewProgressReport,
    ) -> Result<ProgressReport, DatabaseError> {
        self.authorize_startup(actor, Operation::SubmitReport, startup_id)
            .await?;
        let title = require_non_blank("report title", &report.title)?;
        let description = require_non_blank("report description", &report.description)?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_REPORT).await?;
        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO progress_reports ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
                ),
                libsql::params![
                    id.as_str(),
                    startup_id,
                    actor.actor_id.as_str(),
                    title,
                    description,
                    report.achievements.as_deref(),
                    report.challenges.as_deref(),
                    report.next_steps.as_deref(),
                    now.to_rfc3339()
                ],
            )
            .await?;
        self.record(actor, EntityType::Report, &id, AuditAction::Created, None)
            .await?;

        Ok(ProgressReport {
            id,
            startup_id: startup_id.to_string(),
            submitted_by: actor.actor_id.clone(),
            title: title.to_string(),
            description: description.to_string(),
            achievements: report.achievements.clone(),
            challenges: report.challenges.clone(),
            next_steps: report.next_steps.clone(),
            submitted_at: now,
        })
    }

    /// Reports for one startup, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_progress_reports(
        &self,
        startup_id: &str,
    ) -> Result<Vec<ProgressReport>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM progress_reports
                     WHERE startup_id = ?1 ORDER BY submitted_at DESC, rowid DESC"
                ),
                [startup_id],
            )
            .await?;
        let mut reports = Vec::new();
        while let Some(row) = rows.next().await? {
            reports.push(row_to_report(&row)?);
        }
        Ok(reports)
    }

    /// Latest reports across every startup.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_recent_reports(&self, limit: u32) -> Result<Vec<ProgressReport>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM progress_reports
                     ORDER BY submitted_at DESC, rowid DESC LIMIT ?1"
                ),
                [i64::from(limit)],
            )
            .await?;
        let mut reports = Vec::new();
        while let Some(row) = rows.next().await? {
            reports.push(row_to_report(&row)?);
        }
        Ok(reports)
    }
}
