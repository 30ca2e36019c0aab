use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::StartupStage;

/// A startup enrolled in the incubation program.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Startup {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub industry: Option<String>,
    pub stage: StartupStage,
    pub owner_id: String,
    pub email: Option<String>,
    pub contact_number: Option<String>,
    pub created_at: DateTime<Utc>,
}
