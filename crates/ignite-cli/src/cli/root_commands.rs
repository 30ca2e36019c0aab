use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    CommentCommands, DeliverableCommands, MemberCommands, MilestoneCommands, ReadinessCommands,
    ReportCommands, StartupCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Startups.
    Startup {
        #[command(subcommand)]
        action: StartupCommands,
    },
    /// Startup members.
    Member {
        #[command(subcommand)]
        action: MemberCommands,
    },
    /// Milestones.
    Milestone {
        #[command(subcommand)]
        action: MilestoneCommands,
    },
    /// Deliverables.
    Deliverable {
        #[command(subcommand)]
        action: DeliverableCommands,
    },
    /// Readiness checklist items.
    Readiness {
        #[command(subcommand)]
        action: ReadinessCommands,
    },
    /// Deliverable comments.
    Comment {
        #[command(subcommand)]
        action: CommentCommands,
    },
    /// Progress reports.
    Report {
        #[command(subcommand)]
        action: ReportCommands,
    },
    /// Progress snapshot for a startup.
    Progress { startup: String },
    /// Current actionable milestone for a startup.
    Next { startup: String },
    /// Query the audit trail.
    Audit(AuditArgs),
}

#[derive(Clone, Debug, Args)]
pub struct AuditArgs {
    #[arg(long)]
    pub entity_type: Option<String>,
    #[arg(long)]
    pub entity_id: Option<String>,
    #[arg(long)]
    pub action: Option<String>,
    /// Only entries recorded for this actor id
    #[arg(long)]
    pub by: Option<String>,
}
