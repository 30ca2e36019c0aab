//! Snapshot types returned by the progression facade and printed by the
//! `ignite` CLI.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Comment, Deliverable, Milestone, ReadinessItem, Startup};

/// A milestone together with its derived lock flag and deliverable tallies.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MilestoneOverview {
    pub milestone: Milestone,
    pub locked: bool,
    pub deliverables_total: u32,
    pub deliverables_approved: u32,
}

/// Response from `ignite progress`: everything a dashboard renders for a startup.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StartupProgress {
    pub startup: Startup,
    pub progress_percent: u8,
    pub milestones: Vec<MilestoneOverview>,
    pub current_milestone: Option<Milestone>,
}

/// Response from `ignite deliverable get`: a deliverable with its checklist and thread.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DeliverableDetail {
    pub deliverable: Deliverable,
    pub readiness: Vec<ReadinessItem>,
    pub comments: Vec<Comment>,
}
