//! Audit trail repository.
//!
//! Append-only audit entries recording every mutation, with dynamic
//! filtering for queries.

use chrono::Utc;

use ignite_core::entities::AuditEntry;
use ignite_core::enums::{AuditAction, EntityType};
use ignite_core::identity::Actor;
use ignite_core::ids::PREFIX_AUDIT;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum, parse_optional_json};
use crate::service::IgniteService;

/// Filter criteria for audit queries.
#[derive(Debug, Default)]
pub struct AuditFilter {
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<String>,
    pub action: Option<AuditAction>,
    pub actor_id: Option<String>,
    pub limit: Option<u32>,
}

impl IgniteService {
    /// Append an audit entry.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn append_audit(&self, entry: &AuditEntry) -> Result<(), DatabaseError> {
        self.db()
            .conn()
            .execute(
                "INSERT INTO audit_trail (id, actor_id, entity_type, entity_id, action, detail, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                libsql::params![
                    entry.id.as_str(),
                    entry.actor_id.as_str(),
                    entry.entity_type.as_str(),
                    entry.entity_id.as_str(),
                    entry.action.as_str(),
                    entry.detail.as_ref().map(std::string::ToString::to_string),
                    entry.created_at.to_rfc3339()
                ],
            )
            .await?;
        Ok(())
    }

    /// Build and append the audit entry for a mutation by `actor`.
    pub(crate) async fn record(
        &self,
        actor: &Actor,
        entity_type: EntityType,
        entity_id: &str,
        action: AuditAction,
        detail: Option<serde_json::Value>,
    ) -> Result<(), DatabaseError> {
        let id = self.db().generate_id(PREFIX_AUDIT).await?;
        self.append_audit(&AuditEntry {
            id,
            actor_id: actor.actor_id.clone(),
            entity_type,
            entity_id: entity_id.to_string(),
            action,
            detail,
            created_at: Utc::now(),
        })
        .await
    }

    /// Query audit entries with optional filters, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn query_audit(&self, filter: &AuditFilter) -> Result<Vec<AuditEntry>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref et) = filter.entity_type {
            params.push(libsql::Value::Text(et.as_str().to_string()));
            conditions.push(format!("entity_type = ?{}", params.len()));
        }
        if let Some(ref eid) = filter.entity_id {
            params.push(libsql::Value::Text(eid.clone()));
            conditions.push(format!("entity_id = ?{}", params.len()));
        }
        if let Some(ref action) = filter.action {
            params.push(libsql::Value::Text(action.as_str().to_string()));
            conditions.push(format!("action = ?{}", params.len()));
        }
        if let Some(ref actor_id) = filter.actor_id {
            params.push(libsql::Value::Text(actor_id.clone()));
            conditions.push(format!("actor_id = ?{}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let limit = filter.limit.unwrap_or(100);
        let sql = format!(
            "SELECT id, actor_id, entity_type, entity_id, action, detail, created_at
             FROM audit_trail {where_clause}
             ORDER BY created_at DESC, rowid DESC LIMIT {limit}"
        );

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut entries = Vec::new();

        while let Some(row) = rows.next().await? {
            entries.push(AuditEntry {
                id: row.get::<String>(0)?,
                actor_id: row.get::<String>(1)?,
                entity_type: parse_enum(&row.get::<String>(2)?)?,
                entity_id: row.get::<String>(3)?,
                action: parse_enum(&row.get::<String>(4)?)?,
                detail: parse_optional_json(get_opt_string(&row, 5)?.as_deref())?,
                created_at: parse_datetime(&row.get::<String>(6)?)?,
            });
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{admin, test_service};
    use pretty_assertions::assert_eq;

    fn entry(id: &str, entity_type: EntityType, action: AuditAction) -> AuditEntry {
        AuditEntry {
            id: id.to_string(),
            actor_id: "usr-admin".to_string(),
            entity_type,
            entity_id: format!("{}-1", entity_type.as_str()),
            action,
            detail: Some(serde_json::json!({"from": "pending", "to": "submitted"})),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn append_and_query() {
        let svc = test_service().await;
        let original = entry("aud-1", EntityType::Deliverable, AuditAction::StatusChanged);
        svc.append_audit(&original).await.unwrap();

        let entries = svc.query_audit(&AuditFilter::default()).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "aud-1");
        assert_eq!(entries[0].detail, original.detail);
        assert_eq!(entries[0].action, AuditAction::StatusChanged);
    }

    #[tokio::test]
    async fn filters_combine() {
        let svc = test_service().await;
        svc.append_audit(&entry("aud-1", EntityType::Deliverable, AuditAction::Created))
            .await
            .unwrap();
        svc.append_audit(&entry("aud-2", EntityType::Deliverable, AuditAction::Reviewed))
            .await
            .unwrap();
        svc.append_audit(&entry("aud-3", EntityType::Comment, AuditAction::Created))
            .await
            .unwrap();

        let created = svc
            .query_audit(&AuditFilter {
                action: Some(AuditAction::Created),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(created.len(), 2);

        let deliverable_created = svc
            .query_audit(&AuditFilter {
                entity_type: Some(EntityType::Deliverable),
                action: Some(AuditAction::Created),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(deliverable_created.len(), 1);
        assert_eq!(deliverable_created[0].id, "aud-1");
    }

    #[tokio::test]
    async fn record_uses_actor_and_prefix() {
        let svc = test_service().await;
        svc.record(&admin(), EntityType::Startup, "stp-1", AuditAction::Deleted, None)
            .await
            .unwrap();
        let entries = svc
            .query_audit(&AuditFilter {
                actor_id: Some("usr-admin".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].id.starts_with("aud-"));
        assert_eq!(entries[0].detail, None);
    }

    #[tokio::test]
    async fn limit_applies() {
        let svc = test_service().await;
        for i in 0..5 {
            svc.append_audit(&entry(&format!("aud-{i}"), EntityType::Comment, AuditAction::Created))
                .await
                .unwrap();
        }
        let entries = svc
            .query_audit(&AuditFilter {
                limit: Some(3),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(entries.len(), 3);
    }
}
