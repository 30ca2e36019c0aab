use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An immutable discussion entry on a deliverable.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Comment {
    pub id: String,
    pub deliverable_id: String,
    pub author_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
