//! Comment log repository. Comments are append-only.

use chrono::Utc;

use ignite_core::entities::Comment;
use ignite_core::enums::{AuditAction, EntityType};
use ignite_core::errors::require_non_blank;
use ignite_core::identity::Actor;
use ignite_core::ids::PREFIX_COMMENT;
use ignite_core::policy::Operation;

use crate::error::DatabaseError;
use crate::helpers::parse_datetime;
use crate::service::IgniteService;

const SELECT_COLS: &str = "id, deliverable_id, author_id, content, created_at";

fn row_to_comment(row: &libsql::Row) -> Result<Comment, DatabaseError> {
    Ok(Comment {
        id: row.get(0)?,
        deliverable_id: row.get(1)?,
        author_id: row.get(2)?,
        content: row.get(3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl IgniteService {
    /// Append a comment to a deliverable's thread.
    ///
    /// Posting the same content twice as the same author returns the first
    /// comment instead of adding a duplicate.
    ///
    /// # Errors
    ///
    /// `NotFound`, `PermissionDenied` and `LockedMilestone` as for any
    /// deliverable operation; `Validation` for blank content.
    pub async fn add_comment(
        &self,
        actor: &Actor,
        deliverable_id: &str,
        content: &str,
    ) -> Result<Comment, DatabaseError> {
        self.write_tx(|svc| svc.add_comment_tx(actor, deliverable_id, content))
            .await
    }

    async fn add_comment_tx(
        &self,
        actor: &Actor,
        deliverable_id: &str,
        content: &str,
    ) -> Result<Comment, DatabaseError> {
        let deliverable = self.get_deliverable(deliverable_id).await?;
        self.authorize_milestone(actor, Operation::AddComment, &deliverable.milestone_id)
            .await?;
        // Stored verbatim; trimming only decides blankness.
        require_non_blank("comment", content)?;

        if let Some(existing) = self
            .find_comment(deliverable_id, &actor.actor_id, content)
            .await?
        {
            tracing::debug!(deliverable = %deliverable_id, "duplicate comment ignored");
            return Ok(existing);
        }

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_COMMENT).await?;
        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO comments ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5)"),
                libsql::params![
                    id.as_str(),
                    deliverable_id,
                    actor.actor_id.as_str(),
                    content,
                    now.to_rfc3339()
                ],
            )
            .await?;
        self.record(
            actor,
            EntityType::Comment,
            &id,
            AuditAction::Commented,
            Some(serde_json::json!({ "deliverable_id": deliverable_id })),
        )
        .await?;

        Ok(Comment {
            id,
            deliverable_id: deliverable_id.to_string(),
            author_id: actor.actor_id.clone(),
            content: content.to_string(),
            created_at: now,
        })
    }

    /// Comments on a deliverable, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_comments(&self, deliverable_id: &str) -> Result<Vec<Comment>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM comments WHERE deliverable_id = ?1 ORDER BY created_at, rowid"
                ),
                [deliverable_id],
            )
            .await?;
        let mut comments = Vec::new();
        while let Some(row) = rows.next().await? {
            comments.push(row_to_comment(&row)?);
        }
        Ok(comments)
    }

    async fn find_comment(
        &self,
        deliverable_id: &str,
        author_id: &str,
        content: &str,
    ) -> Result<Option<Comment>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM comments
                     WHERE deliverable_id = ?1 AND author_id = ?2 AND content = ?3
                     ORDER BY rowid LIMIT 1"
                ),
                [deliverable_id, author_id, content],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_comment(&row)?)),
            None => Ok(None),
        }
    }
}
