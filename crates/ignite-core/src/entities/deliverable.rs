use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::DeliverableStatus;

/// A required artifact within a milestone, tracked through submit/review.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Deliverable {
    pub id: String,
    pub milestone_id: String,
    pub name: String,
    pub requirements: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: DeliverableStatus,
    /// Opaque file-store reference attached by program staff.
    pub admin_file: Option<String>,
    /// Opaque file-store reference attached by the startup.
    pub incubatee_file: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
