use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A named checklist entry attached to a deliverable.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReadinessItem {
    pub id: String,
    pub deliverable_id: String,
    pub name: String,
    /// Free-form status label, e.g. "In Progress".
    pub level: Option<String>,
    pub created_at: DateTime<Utc>,
}
