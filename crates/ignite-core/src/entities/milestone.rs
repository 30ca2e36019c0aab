use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::MilestoneStatus;

/// A sequenced phase of the program. Unlocks once its predecessor completes.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Milestone {
    pub id: String,
    pub startup_id: String,
    /// 1-based position in the startup's sequence, unique and gap-free.
    pub sequence_index: u32,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: MilestoneStatus,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Milestone {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == MilestoneStatus::Completed
    }
}
