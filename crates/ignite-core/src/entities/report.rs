use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A periodic free-form progress report submitted for a startup.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProgressReport {
    pub id: String,
    pub startup_id: String,
    pub submitted_by: String,
    pub title: String,
    pub description: String,
    pub achievements: Option<String>,
    pub challenges: Option<String>,
    pub next_steps: Option<String>,
    pub submitted_at: DateTime<Utc>,
}
