use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Membership of a user in a startup's team.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StartupMember {
    pub id: String,
    pub startup_id: String,
    pub user_id: String,
    /// Position within the team, e.g. CEO or CTO.
    pub position: Option<String>,
    pub joined_at: DateTime<Utc>,
}
